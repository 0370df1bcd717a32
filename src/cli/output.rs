//! Output formatting utilities

use crate::application::BuildReport;
use std::path::Path;

/// Summary printed after a build
pub fn format_summary(report: &BuildReport, out_dir: &Path) -> String {
    let mut output = format!(
        "Converted {} file(s) into {}\n",
        report.converted_count(),
        out_dir.display()
    );

    if !report.linked.is_empty() {
        output.push_str(&format!(
            "Linked {} document(s) with imports or exports\n",
            report.linked.len()
        ));
    }
    if !report.diagnostics.is_empty() {
        output.push_str(&format!("{} warning(s)\n", report.diagnostics.len()));
    }
    if !report.failures.is_empty() {
        output.push_str(&format!("{} failure(s):\n", report.failures.len()));
        for (source, error) in &report.failures {
            output.push_str(&format!("  {}: {}\n", source.display(), error));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::modules::LinkDiagnostic;
    use crate::error::HtlmError;
    use std::path::PathBuf;

    #[test]
    fn test_format_empty_report() {
        let report = BuildReport::default();
        assert_eq!(
            format_summary(&report, Path::new("/out")),
            "Converted 0 file(s) into /out\n"
        );
    }

    #[test]
    fn test_format_full_report() {
        let report = BuildReport {
            written: vec![PathBuf::from("/out/a.html")],
            linked: vec![PathBuf::from("/out/b.html"), PathBuf::from("/out/c.html")],
            diagnostics: vec![LinkDiagnostic::UnresolvedImport {
                id: "nav".to_string(),
                document: PathBuf::from("/out/b.html"),
            }],
            failures: vec![(
                PathBuf::from("bad.htlm"),
                HtlmError::UnknownTag("zzz".to_string()),
            )],
            ..Default::default()
        };

        let output = format_summary(&report, Path::new("/out"));
        assert!(output.contains("Converted 3 file(s) into /out"));
        assert!(output.contains("Linked 2 document(s)"));
        assert!(output.contains("1 warning(s)"));
        assert!(output.contains("bad.htlm: Unknown HTML tag <zzz>"));
    }
}
