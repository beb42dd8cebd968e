use crate::config::{DEFAULT_MAX_DEPTH, DEFAULT_OUTPUT_FILE, DEFAULT_SETTINGS_FILE};
use anyhow::Result;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "repotally")]
#[command(about = "Count lines per file extension across your GitHub repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub scan: ScanArgs,

    #[arg(short, long, action = ArgAction::Count, help = "Diagnostic output on stderr (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Args, Clone, Debug)]
pub struct ScanArgs {
    #[arg(long, help = "Only scan repositories created in this year (skips the prompt)")]
    pub year: Option<i32>,

    #[arg(long, help = "Scan at most this many repositories")]
    pub limit: Option<usize>,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE, help = "Summary file to append to")]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_SETTINGS_FILE, help = "File holding USERNAME and TOKEN")]
    pub env_file: PathBuf,

    #[arg(long, help = "API base URL, e.g. for GitHub Enterprise")]
    pub api_url: Option<String>,

    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, help = "Maximum directory depth to descend")]
    pub max_depth: usize,

    #[arg(long, help = "Print the results as JSON on stdout")]
    pub json: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        setup_tracing(self.verbose);
        crate::scan::exec(self.scan)
    }
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("repotally=warn"),
        1 => EnvFilter::new("repotally=info"),
        2 => EnvFilter::new("repotally=debug"),
        _ => EnvFilter::new("repotally=trace"),
    };

    // A subscriber may already be installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prompt_driven_run() {
        let cli = Cli::try_parse_from(["repotally"]).unwrap();
        assert_eq!(cli.scan.year, None);
        assert_eq!(cli.scan.limit, None);
        assert_eq!(cli.scan.output, PathBuf::from("repo_stats.txt"));
        assert_eq!(cli.scan.env_file, PathBuf::from(".env"));
        assert_eq!(cli.scan.max_depth, 64);
        assert!(!cli.scan.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "repotally",
            "--year",
            "2020",
            "--limit",
            "5",
            "--api-url",
            "https://ghe.local/api/v3",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.scan.year, Some(2020));
        assert_eq!(cli.scan.limit, Some(5));
        assert_eq!(cli.scan.api_url.as_deref(), Some("https://ghe.local/api/v3"));
        assert!(cli.scan.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_non_numeric_year_flag() {
        assert!(Cli::try_parse_from(["repotally", "--year", "soon"]).is_err());
    }
}
