use manifest_merge::document::parse_non_null;
use manifest_merge::{merge, MergeError, MergeOptions, Merger};

use crate::support::Fixture;

#[test]
fn empty_root_creates_empty_output() {
    let fx = Fixture::new();
    let report = merge(fx.root(), fx.output()).unwrap();

    assert!(fx.output().exists());
    assert_eq!(fx.read_output(), "");
    assert_eq!(report.documents_written, 0);
    assert!(report.directories.is_empty());
}

#[test]
fn directories_without_yaml_produce_no_documents() {
    let fx = Fixture::new();
    fx.write("docs/readme.md", "# not yaml\n");
    fx.write("top.yaml", "name: root-level\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "");
    assert_eq!(report.documents_written, 0);
}

#[test]
fn two_directories_get_one_separator() {
    let fx = Fixture::new();
    fx.write("b/svc.yaml", "name: b\n");
    fx.write("a/svc.yaml", "name: a\n");

    merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "name: a\n\n---\nname: b\n");
}

#[test]
fn directory_order_is_case_sensitive() {
    let fx = Fixture::new();
    fx.write("a/svc.yaml", "name: lower\n");
    fx.write("B/svc.yaml", "name: upper\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "name: upper\n\n---\nname: lower\n");
    let dirs: Vec<&str> = report.directories.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(dirs, vec!["B", "a"]);
}

#[test]
fn stray_trailing_separator_is_dropped() {
    let fx = Fixture::new();
    fx.write("svc1/a.yaml", "name: x\n");
    fx.write("svc2/b.yaml", "name: y\n---\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "name: x\n\n---\nname: y\n");
    assert_eq!(report.documents_written, 2);
}

#[test]
fn null_documents_contribute_nothing() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "---\nname: one\n---\n---\n~\n---\nname: two\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(report.documents_written, 2);
    assert_eq!(fx.read_output(), "name: one\n\n---\nname: two\n");
}

#[test]
fn trailing_file_without_documents_leaves_no_separator() {
    let fx = Fixture::new();
    fx.write("a/one.yaml", "name: one\n");
    fx.write("a/two.yaml", "# nothing here\n");
    fx.write("z/empty.yml", "---\n");

    merge(fx.root(), fx.output()).unwrap();
    let out = fx.read_output();
    assert_eq!(out, "name: one\n");
    assert!(!out.ends_with("---\n"));
}

#[test]
fn malformed_file_is_skipped_and_siblings_kept() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "name: first\n");
    fx.write("svc/b.yaml", "name: [unclosed\n");
    fx.write("svc/c.yaml", "name: third\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "name: first\n\n---\nname: third\n");

    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("b.yaml"));
    assert!(!report.skipped[0].reason.is_empty());
    let files = &report.directories[0].files;
    assert_eq!(files.len(), 3);
    assert!(files[1].skipped);
    assert_eq!(files[1].documents_written, 0);
}

#[test]
fn malformed_last_file_leaves_no_separator() {
    let fx = Fixture::new();
    fx.write("a/ok.yaml", "name: ok\n");
    fx.write("b/bad.yaml", "key: \"unterminated\n");

    merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "name: ok\n");
}

#[test]
fn multi_document_files_keep_order() {
    let fx = Fixture::new();
    fx.write("app/10-deploy.yaml", "kind: Deployment\n---\nkind: Service\n");
    fx.write("app/20-ingress.yml", "kind: Ingress\n");
    fx.write("app/overlays/prod.yaml", "kind: ConfigMap\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    let docs = parse_non_null(&fx.read_output()).unwrap();
    assert_eq!(docs.len(), 4);
    assert_eq!(report.documents_written, 4);
    assert_eq!(
        fx.read_output(),
        "kind: Deployment\n\n---\nkind: Service\n\n---\nkind: Ingress\n\n---\nkind: ConfigMap\n"
    );
}

#[test]
fn output_is_reserialized_in_block_style() {
    let fx = Fixture::new();
    fx.write(
        "svc/a.yaml",
        "metadata: {name: web, labels: {tier: \"프론트엔드\"}}\nports: [80]\n",
    );

    merge(fx.root(), fx.output()).unwrap();
    assert_eq!(
        fx.read_output(),
        "metadata:\n  name: web\n  labels:\n    tier: 프론트엔드\nports:\n- 80\n"
    );
}

#[test]
fn existing_output_is_overwritten() {
    let fx = Fixture::new();
    std::fs::write(fx.output(), "stale: true\n---\nstale: again\n").unwrap();
    fx.write("svc/a.yaml", "fresh: true\n");

    merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "fresh: true\n");
}

#[test]
fn report_carries_absolute_output_path() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "name: a\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert!(report.output_path.is_absolute());
    assert!(report.output_path.ends_with("merged.yaml"));
}

#[test]
fn missing_root_is_fatal_and_output_untouched() {
    let fx = Fixture::new();
    let result = merge(fx.root().join("missing"), fx.output());

    assert!(matches!(result, Err(MergeError::RootUnreadable { .. })));
    assert!(!fx.output().exists());
}

#[test]
fn unwritable_output_is_fatal() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "name: a\n");
    let output = fx.temp.path().join("no-such-dir").join("out.yaml");

    let result = Merger::new(MergeOptions::new(fx.root(), output)).run();
    assert!(matches!(result, Err(MergeError::OutputOpen { .. })));
}

#[test]
fn unserializable_document_skips_file_not_run() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "name: first\n---\n? {x: 1}\n: v\n");
    fx.write("svc/b.yaml", "name: after\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "name: after\n");
    assert_eq!(report.documents_written, 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].path.ends_with("a.yaml"));
    assert!(report.directories[0].files[0].skipped);
}

#[test]
fn invalid_utf8_file_is_skipped() {
    let fx = Fixture::new();
    fx.write("svc/b.yaml", "name: ok\n");
    let bad = fx.root().join("svc").join("a.yaml");
    std::fs::write(&bad, b"name: \xff\xfe\n").unwrap();

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "name: ok\n");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, bad);
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new();
    fx.write("locked/a.yaml", "name: hidden\n");
    fx.write("open/b.yaml", "name: visible\n");
    let locked = fx.root().join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not bind a privileged user
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = merge(fx.root(), fx.output());
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    let report = result.unwrap();
    assert_eq!(fx.read_output(), "name: visible\n");
    let dirs: Vec<&str> = report.directories.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(dirs, vec!["open"]);
}

#[test]
fn wide_integers_are_preserved() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "big: 123456789012345678901234567890\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(fx.read_output(), "big: 123456789012345678901234567890\n");
}

#[test]
fn dropped_core_tag_is_reported() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "t: !!binary aGVsbG8=\n");
    fx.write("svc/b.yaml", "ref: !Ref bucket\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert_eq!(fx.read_output(), "t: aGVsbG8=\n\n---\nref: !Ref bucket\n");
    let files = &report.directories[0].files;
    assert_eq!(files[0].dropped_tags, vec!["!!binary".to_string()]);
    assert!(files[1].dropped_tags.is_empty());
}

#[test]
fn duplicate_keys_keep_last_value() {
    let fx = Fixture::new();
    fx.write("svc/a.yaml", "a: 1\na: 2\n");

    let report = merge(fx.root(), fx.output()).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(fx.read_output(), "a: 2\n");
}
