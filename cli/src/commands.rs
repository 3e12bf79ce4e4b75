pub mod blocks;
pub mod countries;
pub mod expand;
pub mod filter;
pub mod run;

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use geoscan_common::config::{Config, DEFAULT_DATA_DIR, DEFAULT_WORK_DIR};

#[derive(Parser)]
#[command(name = "geoscan")]
#[command(about = "Scan the address blocks registered to a country.", version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding countries.csv and the countries/<code>.csv tables
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory for target lists and raw scanner reports
    #[arg(long, global = true, default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// Directory for filtered results [default: <WORK_DIR>/results]
    #[arg(long, global = true)]
    pub results_dir: Option<PathBuf>,

    /// Scanner executable
    #[arg(long, global = true, default_value = "nmap")]
    pub nmap: PathBuf,

    /// Keep the target list and raw report after a scan
    #[arg(long, global = true)]
    pub keep_files: bool,

    /// Do not open the result file when a scan finishes
    #[arg(long, global = true)]
    pub no_open: bool,

    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Do not clear the screen between interactive steps
    #[arg(long, global = true)]
    pub no_clear: bool,

    /// Print less; repeat for results only
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a country and an allocation block, then scan it
    #[command(alias = "r")]
    Run,
    /// List the available countries
    #[command(alias = "c")]
    Countries,
    /// Show the allocation blocks of a country
    #[command(alias = "b")]
    Blocks {
        /// Entry number from the country list
        country: usize,
    },
    /// Print every address between two endpoints, inclusive
    #[command(alias = "e")]
    Expand {
        start: String,
        end: String,
        /// Write the list to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Keep only hosts with open ports from a grepable scanner report
    #[command(alias = "f")]
    Filter {
        report: PathBuf,
        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            data_dir: self.data_dir.clone(),
            work_dir: self.work_dir.clone(),
            results_dir: self
                .results_dir
                .clone()
                .unwrap_or_else(|| self.work_dir.join("results")),
            nmap: self.nmap.clone(),
            keep_intermediate: self.keep_files,
            no_open: self.no_open,
            no_banner: self.no_banner,
            no_clear: self.no_clear,
            quiet: self.quiet,
        }
    }
}

/// Treats a reader that went away (`geoscan expand ... | head`) as a normal end.
///
/// Returns `Ok(None)` when stdout was closed early.
pub fn unless_pipe_closed<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(None),
        Err(e) => Err(e),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use geoscan_common::network::range::{Ipv4Range, write_target_list};

    #[test]
    fn test_cli_definition() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = CommandLine::try_parse_from(["geoscan", "run"]).unwrap();
        let cfg = cli.to_config();

        assert!(matches!(cli.command, Commands::Run));
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.work_dir, PathBuf::from("/opt/ips"));
        assert_eq!(cfg.results_dir, PathBuf::from("/opt/ips/results"));
        assert_eq!(cfg.quiet, 0);
        assert!(!cfg.keep_intermediate);
    }

    #[test]
    fn test_aliases_and_global_flags() {
        let cli = CommandLine::try_parse_from([
            "geoscan", "e", "10.0.0.1", "10.0.0.9", "-o", "list.txt", "-qq", "--work-dir", "/tmp/w",
        ])
        .unwrap();
        let cfg = cli.to_config();

        match cli.command {
            Commands::Expand { start, end, output } => {
                assert_eq!(start, "10.0.0.1");
                assert_eq!(end, "10.0.0.9");
                assert_eq!(output, Some(PathBuf::from("list.txt")));
            }
            _ => panic!("expected expand"),
        }
        assert_eq!(cfg.quiet, 2);
        assert_eq!(cfg.results_dir, PathBuf::from("/tmp/w/results"));
    }

    #[test]
    fn test_closed_pipe_ends_quietly() {
        /// Accepts a few bytes, then behaves like a pipe whose reader exited.
        struct ClosingPipe(usize);

        impl io::Write for ClosingPipe {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if self.0 == 0 {
                    return Err(io::ErrorKind::BrokenPipe.into());
                }
                let n = buf.len().min(self.0);
                self.0 -= n;
                Ok(n)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let range = Ipv4Range::parse("10.0.0.0", "10.255.255.255").unwrap();
        let result = write_target_list(&range, ClosingPipe(64));
        assert!(matches!(unless_pipe_closed(result), Ok(None)));

        let other: io::Result<()> = Err(io::ErrorKind::PermissionDenied.into());
        assert!(unless_pipe_closed(other).is_err());
        assert_eq!(unless_pipe_closed(Ok(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_blocks_requires_number() {
        assert!(CommandLine::try_parse_from(["geoscan", "blocks", "andorra"]).is_err());
    }
}
