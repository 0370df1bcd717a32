//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "htlm")]
#[command(about = "Convert scrambled-tag .htlm documents to HTML", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory containing .htlm files (default: current directory)
    #[arg(long, alias = "srcDir", value_name = "DIR")]
    pub src_dir: Option<PathBuf>,

    /// Directory for generated .html files (default: ./dist)
    #[arg(long, alias = "outDir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Configuration file (default: htlm.config.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["htlm", "--src-dir", "pages", "--out-dir", "site", "-vv"]);
        assert_eq!(cli.src_dir, Some(PathBuf::from("pages")));
        assert_eq!(cli.out_dir, Some(PathBuf::from("site")));
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_camel_case_aliases() {
        let cli = Cli::parse_from(["htlm", "--srcDir", "a", "--outDir", "b"]);
        assert_eq!(cli.src_dir, Some(PathBuf::from("a")));
        assert_eq!(cli.out_dir, Some(PathBuf::from("b")));
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["htlm", "-q", "-v"]).is_err());
        assert_eq!(Cli::parse_from(["htlm", "-q"]).log_level(), Level::ERROR);
    }
}
