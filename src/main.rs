use clap::{Parser, Subcommand};
use portfolio_assets::config::{self, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR, PORTFOLIO_MANIFEST};
use portfolio_assets::optimize::{self, OptimizeError};
use portfolio_assets::{output, portfolio};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once; clap wants a 'static str
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "portfolio-assets")]
#[command(about = "Image optimizer and manifest generator for the portfolio site")]
#[command(long_about = "\
Image optimizer and manifest generator for the portfolio site

Two independent jobs prepare the site's media:

  optimize   Walks the source tree and writes four WebP renditions of every
             JPEG/PNG/GIF/BMP/TIFF (thumbnail 300, medium 600, large 1200,
             original size), plus optimization_manifest.json.
  manifest   Lists the media in each portfolio category folder and writes
             portfolio-manifest.json for the front end.

Layout expected by the stock categories:

  Images&videos/
  ├── Embedded Software Development/
  ├── PCB designing/
  ├── Graphical User Interface Software/
  └── Test box for systems simulation/

Run 'portfolio-assets show-config' to print the category configuration.")]
#[command(version = version_string())]
struct Cli {
    /// Directory of source images for the optimizer
    #[arg(long, default_value = DEFAULT_SOURCE_DIR, global = true)]
    source: PathBuf,

    /// Directory the optimizer writes renditions and its manifest into
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, global = true)]
    output: PathBuf,

    /// Site root: category folders are resolved against it and the
    /// portfolio manifest is written into it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate WebP size variants for every source image
    Optimize,
    /// Write portfolio-manifest.json from the category folders
    Manifest,
    /// Run both jobs: optimize, then manifest
    Build,
    /// Print the built-in category configuration
    ShowConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Optimize => {
            run_optimize(&cli.source, &cli.output)?;
        }
        Command::Manifest => {
            run_manifest(&cli.root)?;
        }
        Command::Build => {
            println!("==> Stage 1/2: Optimizing {}", cli.source.display());
            run_optimize(&cli.source, &cli.output)?;

            println!();
            println!("==> Stage 2/2: Generating portfolio manifest");
            run_manifest(&cli.root)?;

            println!("==> Build complete");
        }
        Command::ShowConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run the optimizer. A missing source directory is reported, not fatal.
fn run_optimize(source: &Path, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match optimize::optimize(source, output_dir, output::print_optimize_event) {
        Ok(_) => Ok(()),
        Err(OptimizeError::SourceNotFound(dir)) => {
            output::print_source_missing(&dir);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_manifest(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_stock_config()?;
    println!("Generating portfolio manifest...");

    let manifest = portfolio::generate(root, &config, output::print_scan_event)?;
    let manifest_path = root.join(PORTFOLIO_MANIFEST);
    portfolio::write_manifest(&manifest, &manifest_path)?;

    output::print_manifest_written(&manifest_path, manifest.media_count());
    Ok(())
}
