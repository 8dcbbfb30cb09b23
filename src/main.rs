use clap::{Parser, Subcommand};
use night_gallery::config;
use night_gallery::controller::NightGallery;
use night_gallery::dataset::NightDataset;
use night_gallery::lazy::ObserverLoader;
use night_gallery::{generate, merge, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Where `merge` looks and writes.
#[derive(clap::Args, Clone)]
struct MergeArgs {
    /// Scratch root holding one directory per night [default: $SCRATCH/CI]
    #[arg(long)]
    scratch: Option<PathBuf>,

    /// Only merge nights whose id starts with this (e.g. 2019)
    #[arg(long, default_value = "")]
    prefix: String,
}

#[derive(Parser)]
#[command(name = "night-gallery")]
#[command(about = "Static thumbnail gallery for nightly exposure sets")]
#[command(long_about = "\
Static thumbnail gallery for nightly exposure sets

Merges per-night exposure lists and renders a static site that lists every
night and lazily loads each night's thumbnails from the image host.

Scratch layout read by 'merge':

  $SCRATCH/CI/
  ├── 20190912/
  │   ├── 20190912.yaml      # [{EXPID: '00004521', RA: .., DEC: ..}, ...]
  │   └── 00004521.jpg
  └── 20190913/              # no YAML yet: skipped

Thumbnails are fetched from {images.base_url}{night}/{EXPID}.jpg.

Run 'night-gallery gen-config' to print a documented night-gallery.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used if it does not exist)
    #[arg(long, default_value = "night-gallery.toml", global = true)]
    config: PathBuf,

    /// Merged dataset
    #[arg(long, default_value = "merged.json", global = true)]
    data: PathBuf,

    /// Output directory for the generated site
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collect per-night exposure lists into the merged dataset
    Merge(MergeArgs),
    /// Render the static site from the merged dataset
    Generate,
    /// Run merge, then generate
    Build(MergeArgs),
    /// Print the panel a click on NIGHT would produce
    Show {
        /// Night id (YYYYMMDD)
        night: String,
    },
    /// Print a stock night-gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Merge(args) => {
            run_merge(&args, &cli.data)?;
        }
        Command::Generate => {
            let site_config = config::load_config(&cli.config)?;
            let dataset = NightDataset::load(&cli.data)?;
            let report = generate::generate(&dataset, &site_config, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build(args) => {
            let site_config = config::load_config(&cli.config)?;

            println!("==> Stage 1: Merging {}", scratch_root(&args)?.display());
            let dataset = run_merge(&args, &cli.data)?;

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&dataset, &site_config, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Show { night } => {
            let site_config = config::load_config(&cli.config)?;
            let dataset = NightDataset::load(&cli.data)?;
            let mut gallery = NightGallery::new(&site_config, ObserverLoader::new());
            gallery.initialize();
            gallery.init_nights(dataset);
            gallery.click(&night)?;
            output::print_panel(&gallery);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_merge(args: &MergeArgs, out: &Path) -> Result<NightDataset, Box<dyn std::error::Error>> {
    let result = merge::merge(&scratch_root(args)?, &args.prefix)?;
    merge::write_merged(&result.dataset, out)?;
    output::print_merge_output(&result);
    println!("Wrote {}", out.display());
    Ok(result.dataset)
}

/// `--scratch`, else `$SCRATCH/CI` where the thumbnail producer writes.
fn scratch_root(args: &MergeArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match (&args.scratch, std::env::var_os("SCRATCH")) {
        (Some(path), _) => Ok(path.clone()),
        (None, Some(scratch)) => Ok(PathBuf::from(scratch).join("CI")),
        (None, None) => Err("no --scratch given and $SCRATCH is not set".into()),
    }
}
