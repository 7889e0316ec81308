//! Render a merge report as text or JSON.

use crate::error::MergeError;
use crate::merger::MergeReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Closing line naming the written file.
pub fn created_at_line(report: &MergeReport) -> String {
    format!(
        "Merged manifest file created at: {}",
        report.output_path.display()
    )
}

/// Human-readable report: per-file table, skipped files, then the output path.
pub fn format_report_text(report: &MergeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Merge Summary")));

    if report.directories.is_empty() {
        out.push_str("  No YAML files found below the root directory.\n\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Directory", "File", "Documents", "Status"]);
        for dir in &report.directories {
            for file in &dir.files {
                let status = if file.skipped { "skipped" } else { "ok" };
                table.add_row(vec![
                    dir.path.clone(),
                    file.name.clone(),
                    file.documents_written.to_string(),
                    status.to_string(),
                ]);
            }
        }
        out.push_str(&format!("{}\n\n", table));
    }

    out.push_str(&format!("  Directories: {}\n", report.directories.len()));
    out.push_str(&format!("  Files read: {}\n", report.files_read()));
    out.push_str(&format!("  Documents written: {}\n", report.documents_written));

    if !report.skipped.is_empty() {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Skipped files")
        ));
        for skipped in &report.skipped {
            out.push_str(&format!("  {}: {}\n", skipped.path.display(), skipped.reason));
        }
    }

    let untagged: Vec<(&str, &str, &Vec<String>)> = report
        .directories
        .iter()
        .flat_map(|dir| {
            dir.files
                .iter()
                .filter(|f| !f.dropped_tags.is_empty())
                .map(move |f| (dir.path.as_str(), f.name.as_str(), &f.dropped_tags))
        })
        .collect();
    if !untagged.is_empty() {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Written without tags")
        ));
        for (dir, file, tags) in untagged {
            out.push_str(&format!("  {}/{}: {}\n", dir, file, tags.join(", ")));
        }
    }

    out.push('\n');
    out.push_str(&created_at_line(report));
    out
}

/// Pretty JSON rendering of the report.
pub fn format_report_json(report: &MergeReport) -> Result<String, MergeError> {
    Ok(serde_json::to_string_pretty(report)?)
}
