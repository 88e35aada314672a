use anyhow::{anyhow, Context, Result};
use bat::PrettyPrinter;
use clap::Parser;
use console::{style, Style};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use phototagger::encoding::{load_image_file, DEFAULT_JPEG_QUALITY};
use phototagger::models::{PhotoAnalysis, PhotoColor};
use phototagger::orchestrator::Orchestrator;
use phototagger::services::configs::{Credentials, ImaggaConfig, ServiceConfig, IMAGGA_HOST};
use phototagger::services::imagga::ImaggaService;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Photo to tag (any format the image decoder understands)
    image: PathBuf,

    /// Imagga API key (can also be set via IMAGGA_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Imagga API secret (can also be set via IMAGGA_API_SECRET environment variable)
    #[arg(long)]
    api_secret: Option<String>,

    /// API base URL (can also be set via IMAGGA_HOST environment variable)
    #[arg(long)]
    host: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// JPEG quality used for the upload, 1-100
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before the subscriber so RUST_LOG can come from .env
    let dotenv_path = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    if let Ok(path) = dotenv_path {
        debug!("Loaded environment from {:?}", path);
    }

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let image = load_image_file(&cli.image)?;

    let service = ImaggaService::new(config)?;
    let mut orchestrator = Orchestrator::new(service).with_quality(cli.quality);

    cliclack::intro(style(" phototagger ").on_cyan().black())?;

    let (tx, mut rx) = watch::channel(0.0f32);
    let render = async move {
        let bar = cliclack::progress_bar(100);
        bar.start("Uploading photo");
        let mut shown = 0u64;
        while rx.changed().await.is_ok() {
            let percent = (*rx.borrow_and_update() * 100.0).round() as u64;
            if percent > shown {
                bar.inc(percent - shown);
                shown = percent;
            }
        }
        bar.stop("Upload finished");

        let spin = cliclack::spinner();
        spin.start("Fetching tags and colors");
        spin
    };
    let upload = orchestrator.analyze(&image, move |fraction| {
        let _ = tx.send(fraction);
    });

    let (analysis, spin) = tokio::join!(upload, render);
    let analysis = match analysis {
        Ok(analysis) => {
            spin.stop("Analysis complete");
            analysis
        }
        Err(e) => {
            spin.stop("Analysis failed");
            return Err(e).context(format!("Could not analyze {}", cli.image.display()));
        }
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&analysis.to_json())?;
        render_json(&json)?;
    } else {
        print_analysis(&analysis);
    }

    cliclack::outro(format!("Content id {}", style(&analysis.content_id).dim()))?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ImaggaConfig> {
    let mut config = match (&cli.api_key, &cli.api_secret) {
        (Some(api_key), Some(api_secret)) => {
            let host = env::var("IMAGGA_HOST").unwrap_or_else(|_| IMAGGA_HOST.to_string());
            ImaggaConfig::new(
                host,
                Credentials::Basic {
                    api_key: api_key.clone(),
                    api_secret: api_secret.clone(),
                },
            )
        }
        _ => ImaggaConfig::from_env().context(
            "API credentials must be provided via --api-key and --api-secret or IMAGGA_* environment variables",
        )?,
    };

    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

fn print_analysis(analysis: &PhotoAnalysis) {
    println!("{}", style("Tags").bold());
    match &analysis.tags {
        Ok(tags) if tags.is_empty() => println!("  {}", style("none").dim()),
        Ok(tags) => {
            for tag in tags {
                println!("  {}", tag);
            }
        }
        Err(e) => println!("  {}", style(format!("unavailable: {}", e)).red()),
    }

    println!("\n{}", style("Colors").bold());
    match &analysis.colors {
        Ok(colors) if colors.is_empty() => println!("  {}", style("none").dim()),
        Ok(colors) => {
            for color in colors {
                let swatch = Style::new().color256(ansi256(color)).apply_to("████");
                println!("  {} {} {}", swatch, color.hex(), color.color_name);
            }
        }
        Err(e) => println!("  {}", style(format!("unavailable: {}", e)).red()),
    }
    println!();
}

/// Nearest entry of the 6x6x6 color cube in the 256 color palette
fn ansi256(color: &PhotoColor) -> u8 {
    let level = |c: u8| ((c as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(color.red) + 6 * level(color.green) + level(color.blue)
}

fn render_json(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("json")
        .print()
        .map_err(|e| anyhow!("Could not render output: {}", e))?;
    Ok(())
}
