use bloomsberry::assets::{self, AssetConfig, AssetReport};
use bloomsberry::contact::{ContactForm, Field, FormStatus, SimulatedTransport};
use bloomsberry::config::{self, SiteConfig};
use bloomsberry::generate::{self, GenerateReport};
use bloomsberry::{menu, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that process images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the asset cache and re-encode every image
    #[arg(long)]
    no_cache: bool,
}

/// A contact message to push through the simulated transport.
#[derive(clap::Args, Clone)]
struct SubmitArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    message: String,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "bloomsberry")]
#[command(about = "Static site generator for the Bloomsberry café website")]
#[command(long_about = "\
Static site generator for the Bloomsberry café website

Renders the home, menu and contact pages to plain HTML and prepares the
site's icons and optimized images from the source artwork.

Source structure:

  public/
  ├── logo.png          # Wordmark; icons are cropped from its left square
  ├── hero-bg.png       # Images listed under [images] optimize
  ├── about-img.png
  ├── gallery-1.png
  └── ...               # Anything else is copied to the output as-is

Output:

  dist/
  ├── index.html, menu/index.html, contact/index.html
  ├── error.html, site.webmanifest
  ├── favicon.ico, favicon-*.png, apple-touch-icon.png, icon-*.png
  └── *.avif next to the copied originals

Run 'bloomsberry gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source artwork directory
    #[arg(long, default_value = "public", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full build: assets, then pages
    Build(CacheArgs),
    /// Render the HTML pages only
    Pages,
    /// Generate icons and optimized images
    Assets(CacheArgs),
    /// Validate config and menu data without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Submit a contact message through the simulated transport
    Submit(SubmitArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build(cache_args) => {
            let site_config = config::load_config(&cli.config)?;
            init_thread_pool(&site_config.processing);

            println!("==> Stage 1: Assets {} → {}", cli.source.display(), cli.output.display());
            let asset_report = run_assets(&site_config, &cli.source, &cli.output, &cache_args)?;

            println!("==> Stage 2: Pages → {}", cli.output.display());
            let page_report = generate::generate(&site_config, &cli.output)?;
            output::print_generate_output(&page_report);

            check_outcome(&asset_report, &page_report)?;
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Pages => {
            let site_config = config::load_config(&cli.config)?;
            let page_report = generate::generate(&site_config, &cli.output)?;
            output::print_generate_output(&page_report);
            check_outcome(&AssetReport::default(), &page_report)?;
        }
        Command::Assets(cache_args) => {
            let site_config = config::load_config(&cli.config)?;
            init_thread_pool(&site_config.processing);
            let asset_report = run_assets(&site_config, &cli.source, &cli.output, &cache_args)?;
            check_outcome(&asset_report, &GenerateReport::default())?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.join("config.toml").display());
            let site_config = config::load_config(&cli.config)?;
            menu::validate_menu(menu::categories())?;
            output::print_check_output(&site_config, menu::categories());
            println!("==> Config and menu are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Submit(args) => {
            let site_config = config::load_config(&cli.config)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(submit_contact(&site_config, args))?;
        }
    }

    Ok(())
}

/// Diagnostics on stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Run the assets stage, streaming progress lines from a printer thread.
fn run_assets(
    site_config: &SiteConfig,
    source: &Path,
    output_dir: &Path,
    cache_args: &CacheArgs,
) -> Result<AssetReport, Box<dyn std::error::Error>> {
    let asset_config = AssetConfig::from_site_config(site_config);
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_asset_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = assets::process_assets(
        source,
        output_dir,
        &asset_config,
        !cache_args.no_cache,
        Some(tx),
    );
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    let report = result?;
    output::print_asset_report(&report);
    Ok(report)
}

/// Failed assets and fallback pages are written but still fail the command.
fn check_outcome(
    asset_report: &AssetReport,
    page_report: &GenerateReport,
) -> Result<(), Box<dyn std::error::Error>> {
    let failed = asset_report.failed.len();
    let fallbacks = page_report.fallbacks();
    if failed == 0 && fallbacks == 0 {
        return Ok(());
    }
    Err(format!("{failed} asset(s) failed, {fallbacks} page(s) rendered as fallback").into())
}

async fn submit_contact(
    site_config: &SiteConfig,
    args: SubmitArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = ContactForm::from_config(&site_config.contact_form);
    form.set_field(Field::Name, args.name);
    form.set_field(Field::Email, args.email);
    form.set_field(Field::Phone, args.phone.unwrap_or_default());
    form.set_field(Field::Message, args.message);

    let transport = SimulatedTransport::from_config(&site_config.contact_form);
    let start = tokio::time::Instant::now();
    let mut status = form.subscribe();
    println!("{}", output::format_contact_status(form.status(), start.elapsed()));

    let watcher = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = *status.borrow_and_update();
            println!("{}", output::format_contact_status(current, start.elapsed()));
            if current == FormStatus::Idle {
                break;
            }
        }
    });

    let sent = form.submit(&transport).await?;
    tracing::debug!(name = %sent.name, "message accepted");
    form.settle().await;
    watcher.await?;
    Ok(())
}
