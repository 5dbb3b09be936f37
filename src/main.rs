//! CLI entry point for ictfd.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::{Confirm, Input};
use ictfd::progress::{render_failure, render_request, ProgressBarOpts, ProgressDisplay};
use ictfd::request::DownloadRequest;
use ictfd::{CancelToken, Downloader, DownloaderBuilder, Outcome, Reporter, Settings};
use std::path::Path;
use tracing::{debug, warn};

mod cli;

use cli::{
    exit_status, parse_positive, resolve_error_status, Args, EXIT_CANCELED, EXIT_FAILURE,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

async fn run(args: Args) -> Result<u8> {
    let settings = load_settings(&args)?;
    let downloader = DownloaderBuilder::new()
        .build()
        .context("failed to set up the HTTP client")?;

    let cancel = CancelToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher.cancel();
        }
        // A second Ctrl+C leaves immediately, e.g. while a prompt is waiting.
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(EXIT_CANCELED.into());
        }
    });

    match &args.url {
        Some(url) => {
            let request = match args.to_request(url, &settings) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("{}", e);
                    return Ok(resolve_error_status(&e));
                }
            };
            let outcome = download(&downloader, &request, args.quiet, &cancel).await;
            Ok(exit_status(&outcome))
        }
        None => interactive(&downloader, &args, &settings, &cancel).await,
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let path = match args.config.clone().or_else(Settings::default_path) {
        Some(path) => path,
        None => {
            warn!("No configuration directory found, using built-in defaults");
            return Ok(Settings::default());
        }
    };
    Settings::load_or_init(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

/// Runs one download with terminal output and returns its outcome.
async fn download(
    downloader: &Downloader,
    request: &DownloadRequest,
    quiet: bool,
    cancel: &CancelToken,
) -> Outcome {
    let opts = if quiet {
        ProgressBarOpts::hidden()
    } else {
        ProgressBarOpts::default()
    };
    let mut reporter = Reporter::new();
    let mut display = ProgressDisplay::new(opts);
    display.print_lines(&render_request(request));

    let outcome = downloader
        .execute(
            request,
            confirm_overwrite,
            |event| {
                if let Some(rendered) = reporter.render(&event) {
                    display.apply(rendered);
                }
            },
            cancel,
        )
        .await;
    display.finish();

    if let Outcome::Failed(e) = &outcome {
        for line in render_failure(e) {
            eprintln!("{}", line);
        }
    }
    outcome
}

fn confirm_overwrite(path: &Path) -> bool {
    Confirm::new()
        .with_prompt(format!(
            "File '{}' already exists. Do you want to overwrite it?",
            path.display()
        ))
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Asks for the files one by one and downloads them in sequence.
async fn interactive(
    downloader: &Downloader,
    args: &Args,
    settings: &Settings,
    cancel: &CancelToken,
) -> Result<u8> {
    println!("\nICTFD - Interactive Mode\n");
    println!("To download files, please follow these steps:");
    println!("1. Enter the number of files you want to download.");
    println!("2. For each file, enter the URL of the file.");
    println!("3. Optionally, specify a custom chunk size for downloading.");
    println!("4. Optionally, specify a custom download directory.");
    println!("5. Optionally, specify a custom download timeout.\n");

    let count: String = Input::new()
        .with_prompt("Enter the number of files to download")
        .interact_text()?;
    let Some(count) = parse_positive::<usize>(&count) else {
        println!("Invalid input. Please enter a valid number.");
        return Ok(EXIT_USAGE);
    };

    let mut status = EXIT_SUCCESS;
    for index in 1..=count {
        if cancel.is_cancelled() {
            return Ok(EXIT_CANCELED);
        }
        println!("\nFile {}:", index);

        let url: String = Input::new()
            .with_prompt("Enter the URL of the file")
            .interact_text()?;
        let chunk_size = prompt_number::<usize>(
            "Enter custom chunk size (press Enter for default)",
            "Invalid chunk size. Using default.",
        )?;
        let directory: String = Input::new()
            .with_prompt("Enter custom download directory (press Enter to use default)")
            .allow_empty(true)
            .interact_text()?;
        let timeout = prompt_number::<u64>(
            "Enter custom timeout in seconds (press Enter for default)",
            "Invalid timeout. Using default.",
        )?;

        let entry = Args {
            url: Some(url.clone()),
            chunk_size,
            download_dir: (!directory.trim().is_empty()).then(|| directory.trim().into()),
            timeout,
            retries: args.retries,
            output_name: None,
            overwrite: args.overwrite,
            skip_existing: args.skip_existing,
            config: None,
            quiet: args.quiet,
            verbose: args.verbose,
        };
        let request = match entry.to_request(&url, settings) {
            Ok(request) => request,
            Err(e) => {
                println!("{}", e);
                status = EXIT_FAILURE;
                continue;
            }
        };

        match exit_status(&download(downloader, &request, args.quiet, cancel).await) {
            EXIT_CANCELED if cancel.is_cancelled() => return Ok(EXIT_CANCELED),
            EXIT_FAILURE => status = EXIT_FAILURE,
            _ => {}
        }
    }

    let _: std::result::Result<String, _> = Input::new()
        .with_prompt("Press Enter to exit")
        .allow_empty(true)
        .interact_text();
    Ok(status)
}

/// Prompts for an optional positive number; empty or invalid input yields `None`.
fn prompt_number<T>(prompt: &str, invalid: &str) -> Result<Option<T>>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let parsed = parse_positive::<T>(&raw);
    if parsed.is_none() {
        println!("{}", invalid);
    }
    Ok(parsed)
}
