use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use watchpost::content::{self, Catalog};
use watchpost::logging::{Verbosity, init_logging};
use watchpost::{assets, check, config, generate, output, routes};

/// Shared flags for commands that run the checker.
#[derive(clap::Args, Clone)]
struct CheckArgs {
    /// Treat warnings (over-long titles, duplicate titles) as failures
    #[arg(long)]
    strict: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("WATCHPOST_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("WATCHPOST_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "watchpost")]
#[command(about = "Static site generator for a security integrator's marketing site")]
#[command(long_about = "\
Static site generator for a security integrator's marketing site

Content is plain files. TOML records describe services, industries, brands
and guides; markdown with +++ front matter holds blog posts and pages.

Content structure:

  content/
  ├── config.toml                     # Company, site URL, integrations, colors
  ├── assets/                         # Copied to dist/assets/
  ├── blog/<slug>.md                  # Blog post
  ├── guides/<slug>.toml              # Buyer's guide ([[sections]])
  ├── services/010-access-control.toml  # Numbered = in the navbar
  ├── services/structured-cabling.toml  # Unnumbered = page only
  ├── industries/010-cannabis.toml
  ├── brands/010-axis-communications.toml
  ├── locations.toml                  # [[location]] towns and local services
  └── pages/privacy-policy.md         # legal = true → footer link

Run 'watchpost gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (catalog.json)
    #[arg(long, default_value = ".watchpost-temp", global = true)]
    temp_dir: PathBuf,

    /// More log output on stderr (-v progress, -vv per-file detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the content directory into a catalog
    Load,
    /// Check the catalog for broken references, dead links and SEO issues
    Check(CheckArgs),
    /// Produce the final HTML site from the catalog
    Generate,
    /// Run the full pipeline: load → check → generate
    Build(CheckArgs),
    /// List every route and the file it is written to
    Routes,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose, cli.quiet));

    let catalog_path = cli.temp_dir.join("catalog.json");

    match cli.command {
        Command::Load => {
            let catalog = load_stage(&cli.source, &cli.temp_dir)?;
            output::print_load_output(&catalog, &cli.source);
        }
        Command::Check(args) => {
            let catalog = Catalog::read_json(&catalog_path)?;
            check_stage(&catalog, &cli.source, args.strict)?;
        }
        Command::Generate => {
            let catalog = Catalog::read_json(&catalog_path)?;
            let summary = generate::generate(&catalog, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);
        }
        Command::Build(args) => {
            println!("==> Stage 1: Loading {}", cli.source.display());
            let catalog = load_stage(&cli.source, &cli.temp_dir)?;
            output::print_load_output(&catalog, &cli.source);

            println!("==> Stage 2: Checking");
            check_stage(&catalog, &cli.source, args.strict)?;

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let summary = generate::generate(&catalog, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Routes => {
            let catalog = content::load(&cli.source)?;
            output::print_routes(&routes::all_routes(&catalog));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_stage(source: &Path, temp_dir: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog = content::load(source)?;
    std::fs::create_dir_all(temp_dir)?;
    let catalog_path = temp_dir.join("catalog.json");
    catalog.write_json(&catalog_path)?;
    info!(path = %catalog_path.display(), "wrote catalog");
    Ok(catalog)
}

/// Run the checker and print its report. A failing report ends the run.
fn check_stage(
    catalog: &Catalog,
    source: &Path,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content_assets = assets::list_assets(&source.join(&catalog.config.assets_dir))?;
    let report = check::check(catalog, &content_assets);
    output::print_check_report(&report);
    if !report.passes(strict) {
        let errors = report.errors().count();
        let warnings = report.warnings().count();
        if strict && errors == 0 {
            warn!(warnings, "warnings are failures in strict mode");
        }
        return Err(format!("check failed: {errors} errors, {warnings} warnings").into());
    }
    Ok(())
}
