//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use ictfd::request::{resolve, DownloadRequest, ExistingFilePolicy};
use ictfd::{Error, ErrorKind, Outcome, Settings};

/// The download finished and the file is complete.
pub const EXIT_SUCCESS: u8 = 0;
/// The download failed (retries exhausted, disk error...).
pub const EXIT_FAILURE: u8 = 1;
/// Invalid arguments, URL or configuration file.
pub const EXIT_USAGE: u8 = 2;
/// The download was canceled, by Ctrl+C or by refusing to overwrite.
pub const EXIT_CANCELED: u8 = 130;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0    file downloaded
  1    download failed
  2    invalid arguments, URL or configuration
  130  download canceled";

/// Interactive Command-line File Downloader.
///
/// Downloads a file over HTTP(S) with live progress, retrying transient
/// failures. Without a URL, starts an interactive session.
#[derive(Parser, Debug)]
#[command(name = "ictfd")]
#[command(author, version, about, after_help = EXIT_CODES_HELP)]
pub struct Args {
    /// The URL of the file to download
    pub url: Option<String>,

    /// Custom chunk size for downloading, in bytes
    #[arg(short = 'c', long, value_parser = parse_chunk_size)]
    pub chunk_size: Option<usize>,

    /// Custom directory for downloaded files
    #[arg(short = 'd', long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Per-attempt timeout in seconds
    #[arg(short = 't', long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Maximum number of attempts
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: Option<u32>,

    /// Save under this file name instead of the last URL segment
    #[arg(short = 'o', long, value_name = "NAME")]
    pub output_name: Option<String>,

    /// Overwrite an existing file without asking
    #[arg(short = 'y', long, conflicts_with = "skip_existing")]
    pub overwrite: bool,

    /// Keep an existing file and skip the download
    #[arg(short = 'n', long)]
    pub skip_existing: bool,

    /// Configuration file (defaults to <config dir>/ictfd/ictfd.conf)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Hide the live progress line
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// What to do with an existing target file.
    pub fn policy(&self) -> ExistingFilePolicy {
        if self.overwrite {
            ExistingFilePolicy::Overwrite
        } else if self.skip_existing {
            ExistingFilePolicy::Skip
        } else {
            ExistingFilePolicy::Ask
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Resolves `url` with flags taking precedence over `settings`.
    pub fn to_request(&self, url: &str, settings: &Settings) -> ictfd::Result<DownloadRequest> {
        let directory = self
            .download_dir
            .clone()
            .unwrap_or_else(|| settings.download_dir.clone());
        let request = resolve(
            url,
            directory,
            Some(self.chunk_size.unwrap_or(settings.chunk_size)),
            Some(
                self.timeout
                    .map(Duration::from_secs)
                    .unwrap_or(settings.timeout),
            ),
            Some(self.retries.unwrap_or(settings.retries)),
        )?;
        let request = match &self.output_name {
            Some(name) => request.with_filename(name.clone())?,
            None => request,
        };
        Ok(request.with_policy(self.policy()))
    }
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    match parse_positive::<usize>(value) {
        Some(size) => Ok(size),
        None => Err(format!("\"{}\" is not a positive number of bytes", value)),
    }
}

/// Parses a strictly positive number, `None` otherwise.
pub fn parse_positive<T>(value: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|parsed| *parsed > T::default())
}

/// Maps a download outcome to the process exit status.
pub fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Completed { .. } => EXIT_SUCCESS,
        Outcome::Canceled => EXIT_CANCELED,
        Outcome::Failed(_) => EXIT_FAILURE,
    }
}

/// Exit status for a request that could not be resolved.
///
/// Bad input is a usage error; failing to create the download directory is not.
pub fn resolve_error_status(error: &Error) -> u8 {
    match error.kind() {
        ErrorKind::Io => EXIT_FAILURE,
        _ => EXIT_USAGE,
    }
}
