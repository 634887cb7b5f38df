//! Command-line consumer of the downloader API.
//!
//! Each subcommand maps to one facade operation; `fetch` chains validate,
//! info and download the way an integrating page does. `--json` prints the
//! raw typed response instead of a summary. Errors go to stderr with a
//! nonzero exit code and are never retried.

mod gate;

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;
use videodl_core::{precheck_url, Quality, VideoApi};

use crate::gate::ActionGate;

#[derive(Parser)]
#[command(name = "videodl", version, about = "Talk to a Video Downloader API instance")]
struct Cli {
    /// Base URL of the downloader API.
    #[arg(
        long,
        global = true,
        env = "VIDEODL_BASE_URL",
        default_value = "http://localhost:5000"
    )]
    base_url: String,

    /// Print the raw JSON response instead of a summary.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the API is up.
    Health,
    /// List the platforms the API accepts.
    Platforms,
    /// Ask the server whether it accepts a URL.
    Validate { url: String },
    /// Fetch video metadata without downloading.
    Info { url: String },
    /// Request a server-side download.
    Download {
        url: String,
        #[arg(long, short, default_value_t)]
        quality: Quality,
    },
    /// Resolve a direct media URL without a server-side download.
    DirectUrl {
        url: String,
        #[arg(long, short, default_value_t)]
        quality: Quality,
    },
    /// Look up a previously requested server-side download.
    Status { id: Uuid },
    /// Show the API's rate-limit window for this client.
    RateLimit,
    /// Validate, inspect and request a download in one go.
    Fetch {
        url: String,
        #[arg(long, short, default_value_t)]
        quality: Quality,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = VideoApi::new(&cli.base_url);

    let gate = ActionGate::new();
    let _permit = gate
        .begin()
        .context("another action is already in flight")?;

    run(&cli, &api)
}

fn run(cli: &Cli, api: &VideoApi) -> anyhow::Result<()> {
    match &cli.command {
        Command::Health => {
            let health = api.check_health()?;
            if cli.json {
                return print_json(&health);
            }
            println!("{}: {}", health.service, health.status);
            if let Some(database) = &health.database {
                println!("  database: {database}");
            }
        }
        Command::Platforms => {
            let platforms = api.supported_platforms()?;
            if cli.json {
                return print_json(&platforms);
            }
            for (id, entry) in &platforms.platforms {
                println!("{id}: {} ({})", entry.name, entry.domains.join(", "));
            }
        }
        Command::Validate { url } => {
            let validation = api.validate_url(url)?;
            if cli.json {
                return print_json(&validation);
            }
            if validation.valid {
                let platform = validation
                    .platform
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!("accepted ({platform})");
            } else {
                let reason = validation
                    .error
                    .as_deref()
                    .unwrap_or("URL is not from a supported platform");
                println!("rejected: {reason}");
            }
        }
        Command::Info { url } => {
            precheck_url(url)?;
            let info = api.video_info(url)?;
            if cli.json {
                return print_json(&info);
            }
            let v = &info.data;
            println!("{}", v.title);
            println!("  uploader:  {}", v.uploader);
            println!("  duration:  {}", v.duration_string);
            println!("  views:     {}", v.view_count);
            println!("  page:      {}", v.webpage_url);
        }
        Command::Download { url, quality } => {
            precheck_url(url)?;
            let download = api.download_link(url, *quality)?;
            if cli.json {
                return print_json(&download);
            }
            let d = &download.data;
            println!("{}", d.title);
            println!("  id:        {}", d.download_id);
            println!("  file:      {} ({} bytes)", d.filename, d.file_size);
            println!("  serve at:  {}", d.download_url);
        }
        Command::DirectUrl { url, quality } => {
            precheck_url(url)?;
            let direct = api.direct_url(url, *quality)?;
            if cli.json {
                return print_json(&direct);
            }
            let d = &direct.data;
            println!("{}", d.title);
            println!("  media url: {}", d.download_url);
            println!("  format:    {} {}", d.resolution, d.file_extension);
        }
        Command::Status { id } => {
            let status = api.download_status(*id)?;
            if cli.json {
                return print_json(&status);
            }
            let s = &status.data;
            println!("{}", s.title);
            println!("  downloads: {}", s.download_count);
            println!("  expires:   {}", s.expires_at);
            println!("  serve at:  {}", s.download_url);
        }
        Command::RateLimit => {
            let status = api.rate_limit_status()?;
            if cli.json {
                return print_json(&status);
            }
            let window = &status.rate_limit;
            println!(
                "{} of {} requests used over {}s (resets in {:.0}s)",
                window.requests_made,
                window.max_requests,
                window.time_window,
                window.time_until_reset
            );
        }
        Command::Fetch { url, quality } => {
            fetch(api, url, *quality, cli.json)?;
        }
    }
    Ok(())
}

/// The integration-page flow: pre-check locally, then validate, inspect and
/// request a download against the API.
fn fetch(api: &VideoApi, url: &str, quality: Quality, json: bool) -> anyhow::Result<()> {
    precheck_url(url)?;

    let validation = api.validate_url(url)?;
    if !validation.valid {
        anyhow::bail!("URL is not valid or the platform is not supported");
    }

    let info = api.video_info(url)?;
    let download = api.download_link(url, quality)?;

    if json {
        return print_json(&serde_json::json!({
            "success": true,
            "video_info": info.data,
            "download_info": download.data,
        }));
    }

    let v = &info.data;
    let d = &download.data;
    println!("{}", v.title);
    println!("  uploader:   {}", v.uploader);
    println!("  duration:   {}", v.duration_string);
    println!("  thumbnail:  {}", v.thumbnail);
    println!(
        "  download:   {} ({})",
        d.download_url,
        d.file_extension.to_uppercase()
    );
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
