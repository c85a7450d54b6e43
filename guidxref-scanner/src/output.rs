//! Output formatting for scan results.
//!
//! Writes the cross-reference file and the run summary. Choosing where the
//! output goes (file naming, stdout) is the caller's job.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::report::ScanReport;

/// Tool name used in the cross-reference header.
pub const TOOL_NAME: &str = "guidxref";

/// Column the progress dot leader pads to.
pub const PROGRESS_COLUMN: usize = 110;

const MIN_LEADER_DOTS: usize = 3;
const HEADER_RULE_WIDTH: usize = 80;

/// Write the cross-reference file: a two-line header followed by one
/// `"<GUID>  <name>"` line per unique record, in ascending order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_xref(
    report: &ScanReport,
    generated: &DateTime<Local>,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    writeln!(
        writer,
        "{TOOL_NAME} {} GUID cross-reference of {} generated {}",
        env!("CARGO_PKG_VERSION"),
        report.root.display(),
        generated.format("%Y-%m-%d %H:%M:%S"),
    )?;
    writeln!(writer, "{}", "-".repeat(HEADER_RULE_WIDTH))?;
    for record in &report.records {
        writer.write_all(record.to_line().as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Format a `ScanReport` summary as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ScanReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ScanReport` summary as plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ScanReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{} Summary {}", "-".repeat(50), "-".repeat(55))?;
    for (kind, count) in report.tally.iter() {
        writeln!(writer, "File type: {kind} {count} files")?;
    }
    writeln!(writer)?;
    writeln!(writer, "Total number of GUIDs found: {}", report.guids_found)?;
    writeln!(
        writer,
        "Total number of GUIDs written: {}",
        report.guids_written()
    )?;
    Ok(())
}

/// One progress line: the path, a dot leader up to [`PROGRESS_COLUMN`]
/// (never fewer than three dots), then the record count.
#[must_use]
pub fn progress_line(path: &Path, count: usize) -> String {
    let shown = path.display().to_string();
    let dots = PROGRESS_COLUMN
        .saturating_sub(shown.chars().count())
        .max(MIN_LEADER_DOTS);
    format!("{shown} {} {count}", ".".repeat(dots))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;
    use guidxref_id::Guid;

    use super::*;
    use crate::record::GuidRecord;
    use crate::strategy::SourceKind;

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::new(PathBuf::from("edk2"), &SourceKind::ALL);
        report.tally.record(SourceKind::Header);
        report.tally.record(SourceKind::ModuleInformation);
        report.files_with_guids = 2;
        report.guids_found = 3;
        let guid: Guid = "a5102dba-c528-47bd-a992-a2906ed0d22b".parse().unwrap();
        report.records.insert(GuidRecord::new(guid, "Foo.inf"));
        report.records.insert(GuidRecord::new(
            "00000001-0002-0003-0405-060708090A0B".parse().unwrap(),
            "P",
        ));
        report
    }

    #[test]
    fn test_xref_header_and_sorted_body() {
        let generated = Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let mut buf = Vec::new();
        write_xref(&sample_report(), &generated, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("guidxref "), "got: {}", lines[0]);
        assert!(lines[0].contains("edk2"));
        assert!(lines[0].ends_with("2024-03-01 12:30:00"));
        assert_eq!(lines[1], "-".repeat(80));
        assert_eq!(lines[2], "00000001-0002-0003-0405-060708090A0B  P");
        assert_eq!(lines[3], "A5102DBA-C528-47BD-A992-A2906ED0D22B  Foo.inf");
        assert_eq!(lines.len(), 4);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_human_summary() {
        let mut buf = Vec::new();
        write_human(&sample_report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains(" Summary "));
        assert!(text.contains("File type: .h 1 files\n"));
        assert!(text.contains("File type: .dec 0 files\n"));
        assert!(text.contains("File type: .inf 1 files\n"));
        assert!(text.contains("File type: .dsc 0 files\n"));
        assert!(text.contains("Total number of GUIDs found: 3\n"));
        assert!(text.contains("Total number of GUIDs written: 2\n"));
        let h = text.find(".h ").unwrap();
        let dsc = text.find(".dsc ").unwrap();
        assert!(h < dsc);
    }

    #[test]
    fn test_json_summary() {
        let mut buf = Vec::new();
        write_json(&sample_report(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["guids_found"], 3);
        assert_eq!(value["tally"][".h"], 1);
        assert_eq!(
            value["records"][1],
            "A5102DBA-C528-47BD-A992-A2906ED0D22B  Foo.inf"
        );
    }

    #[test]
    fn test_progress_line_pads_to_column() {
        let line = progress_line(Path::new("MdePkg/MdePkg.dec"), 7);
        let dots = line.matches('.').count() - 1;
        assert_eq!(dots, PROGRESS_COLUMN - "MdePkg/MdePkg.dec".len());
        assert!(line.starts_with("MdePkg/MdePkg.dec ..."));
        assert!(line.ends_with(" 7"));
    }

    #[test]
    fn test_progress_line_minimum_dots() {
        let long = "a".repeat(200);
        let line = progress_line(Path::new(&long), 1);
        assert_eq!(line, format!("{long} ... 1"));
    }
}
