use clap::{CommandFactory, Parser};
use manifest_merge::tooling::Cli;

#[test]
fn parse_valid_argument_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["manifest-merge"],
        vec!["manifest-merge", "--root", "deploy"],
        vec!["manifest-merge", "--root", "deploy", "--output", "out.yaml"],
        vec!["manifest-merge", "--root", "deploy", "-o", "out.yaml"],
        vec!["manifest-merge", "--config", "merge.toml", "--no-input"],
        vec!["manifest-merge", "--root", "deploy", "--format", "json"],
        vec!["manifest-merge", "--follow-symlinks", "--verbose"],
        vec![
            "manifest-merge",
            "--log-level",
            "warn",
            "--log-format",
            "json",
            "--log-output",
            "file",
            "--log-file",
            "/tmp/merge.log",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_report_format() {
    let parsed = Cli::try_parse_from(["manifest-merge", "--format", "xml"]);
    assert!(parsed.is_err());
}

#[test]
fn parse_defaults() {
    let cli = Cli::try_parse_from(["manifest-merge"]).unwrap();
    assert_eq!(cli.root, None);
    assert_eq!(cli.output, None);
    assert_eq!(cli.format, "text");
    assert!(!cli.no_input);
    assert!(!cli.verbose);
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
