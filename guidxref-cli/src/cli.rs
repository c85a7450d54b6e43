use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use chrono::Local;
use clap::{ArgAction, CommandFactory, Parser};
use guidxref_scanner::output::{progress_line, write_human, write_json, write_xref};
use guidxref_scanner::{ScanConfig, ScanError, ScanErrorKind, scan_fs_with};

use crate::{logging, output_file};

/// Exit status for an unusable scan root or option.
pub const EXIT_INVALID_INPUT: i32 = 1;
/// Exit status for a source file or directory that could not be read.
pub const EXIT_IO: i32 = 2;
/// Exit status for a GUID literal with an out-of-range field.
pub const EXIT_MALFORMED: i32 = 3;
/// Exit status for output file failures and anything else.
pub const EXIT_OUTPUT: i32 = 4;

#[derive(Debug, Parser)]
#[command(name = "guidxref")]
#[command(about = "Build a GUID cross-reference for a UEFI firmware source tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Root directory of the source tree to scan
    pub root: Option<PathBuf>,

    /// Directory in which the cross-reference file is created
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Exclude files or directories matching a glob (repeatable)
    #[arg(short = 'x', long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Verbose logging on stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress per-file progress lines
    #[arg(short, long)]
    pub quiet: bool,
}

/// Map a top-level error to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ScanError>().map(ScanError::kind) {
        Some(ScanErrorKind::InvalidInput) => EXIT_INVALID_INPUT,
        Some(ScanErrorKind::Io) => EXIT_IO,
        Some(ScanErrorKind::MalformedGuid) => EXIT_MALFORMED,
        _ => EXIT_OUTPUT,
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(root) = cli.root else {
        println!("{}", Cli::command().render_usage());
        return Ok(());
    };

    logging::init(cli.verbose)?;

    let mut config = ScanConfig::new(root);
    config.exclude = cli.exclude;

    let show_progress = !cli.quiet && !cli.json;
    let report = scan_fs_with(&config, |path, count| {
        if show_progress {
            println!("{}", progress_line(path, count));
        }
    })?;

    let (path, file) = output_file::create_next(&cli.output_dir)?;
    write_xref(&report, &Local::now(), &mut BufWriter::new(file))
        .map_err(|e| anyhow!("failed to write {}: {e}", path.display()))?;

    let mut stdout = io::stdout().lock();
    if cli.json {
        write_json(&report, &mut stdout)?;
    } else {
        write_human(&report, &mut stdout)?;
        println!("Cross-reference written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_code_mapping() {
        let not_found = anyhow::Error::from(ScanError::RootNotFound(PathBuf::from("x")));
        assert_eq!(exit_code(&not_found), EXIT_INVALID_INPUT);

        let io_err = anyhow::Error::from(ScanError::Io {
            path: PathBuf::from("Foo.h"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(exit_code(&io_err), EXIT_IO);

        let other = anyhow::anyhow!("no free output file name");
        assert_eq!(exit_code(&other), EXIT_OUTPUT);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["guidxref", "edk2", "-x", "*Test*", "-x", "Build*", "-vv", "--json"]);
        assert_eq!(cli.root.as_deref(), Some(Path::new("edk2")));
        assert_eq!(cli.exclude, vec!["*Test*", "Build*"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }
}
