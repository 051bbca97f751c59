use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use backdrop::api;
use backdrop::assets::{AssetCategory, AssetLoader};
use backdrop::models::AppConfig;
use backdrop::server;
use backdrop::services::{
    palette_from_bytes, strategy_for, HttpImageFetcher, ImageFetcher, ImageHost, ResultsView,
    SearchClient, SearchQuery,
};

#[derive(Parser)]
#[command(name = "backdrop")]
#[command(about = "Movie backdrops on a palette-matched stage")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Search movies and print the result cards for the configured variant
    Search {
        /// Movie title to search for
        query: String,
    },
    /// Extract a palette from an image URL or file and print the gradients
    Palette {
        /// http(s) URL or local file path
        source: String,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract page templates
        #[arg(long)]
        templates: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backdrop API",
        description = "Movie backdrops on a palette-matched stage",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_state),
    components(schemas(
        backdrop::services::SessionSnapshot,
        backdrop::services::ResultsView,
        backdrop::services::ResultCard,
        backdrop::services::DisplayedImage,
        backdrop::models::LayerStack,
        backdrop::models::Variant,
    )),
    tags(
        (name = "Page", description = "Page session state")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Search { query }) => run_search_command(&query).await,
        Some(Commands::Palette { source }) => run_palette_command(&source).await,
        Some(Commands::Init {
            templates,
            config,
            all,
            force,
            list,
        }) => run_init_command(templates, config, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backdrop=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config() -> AppConfig {
    let loader = AssetLoader::from_env();
    AppConfig::load_from_assets(&loader).with_env_overrides()
}

/// Search and print cards (no server needed)
async fn run_search_command(raw_query: &str) -> anyhow::Result<()> {
    init_cli_logging();

    let Some(query) = SearchQuery::parse(raw_query) else {
        anyhow::bail!("Query is empty");
    };

    let config = load_config();
    let profile = config.variant.profile();
    let host = ImageHost::new(&config.tmdb.image_base);
    let client = SearchClient::new(&config.tmdb.base_url, &config.tmdb.api_key);

    let view = match client.search(&query).await {
        Ok(results) => ResultsView::from_results(&results, &profile, &host),
        Err(e) => {
            tracing::warn!(%e, "Search failed");
            ResultsView::failed()
        }
    };

    match view {
        ResultsView::Message { text } => println!("{text}"),
        ResultsView::Cards { cards } => {
            println!("{} results ({} variant)\n", cards.len(), profile.variant);
            for card in cards {
                println!("{}", card.title);
                println!(
                    "  thumbnail: {}",
                    card.thumbnail_url.as_deref().unwrap_or("(placeholder)")
                );
                println!("  backdrop:  {}", card.backdrop_url);
            }
        }
    }

    Ok(())
}

/// Extract a palette and print swatches plus the composed backgrounds
async fn run_palette_command(source: &str) -> anyhow::Result<()> {
    init_cli_logging();

    let config = load_config();
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        HttpImageFetcher::new().fetch(source).await?
    } else {
        std::fs::read(Path::new(source))?
    };

    let builder = swatch::PaletteBuilder::new()
        .quality(config.palette.quality)
        .color_count(config.palette.color_count);
    let max_dimension = config.palette.max_dimension;
    let outcome =
        tokio::task::spawn_blocking(move || palette_from_bytes(&bytes, &builder, max_dimension))
            .await?;

    let palette = match outcome {
        Ok(palette) => {
            println!("Swatches:");
            for (role, swatch) in palette.iter() {
                println!(
                    "  {:<14} {}  {}  (population {})",
                    role.name(),
                    swatch.rgb.to_hex(),
                    swatch.rgb,
                    swatch.population
                );
            }
            if palette.is_empty() {
                println!("  (none)");
            }
            Some(palette)
        }
        Err(e) => {
            println!("Extraction failed: {e}");
            None
        }
    };

    let profile = config.variant.profile();
    match profile.strategy {
        Some(kind) => {
            let layers = strategy_for(kind).compose(palette.as_ref());
            println!("\n{} layers:", profile.variant);
            println!("  color: {}", layers.color);
            if let Some(wash) = layers.wash {
                println!("  wash:  {wash}");
            }
        }
        None => println!("\n{} variant has no color layers", profile.variant),
    }

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    templates: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Templates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || templates {
        categories.push(AssetCategory::Templates);
    }
    // config is the default when nothing else is asked for
    if all || config || !templates {
        categories.push(AssetCategory::Config);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let templates_dir = std::env::var("TEMPLATES_DIR").ok();
    let variant = std::env::var("BACKDROP_VARIANT").ok();
    let api_key_set = std::env::var("TMDB_API_KEY").is_ok_and(|k| !k.trim().is_empty());

    println!("Backdrop v{VERSION}");
    println!("Movie backdrops on a palette-matched stage\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR        = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE      = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEMPLATES_DIR    = {}",
        templates_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  BACKDROP_VARIANT = {}",
        variant.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TMDB_API_KEY     = {}",
        if api_key_set { "(set)" } else { "(not set)" }
    );

    println!("\nAsset Sources:");
    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:    {config_source}");

    let loader = AssetLoader::new(templates_dir.clone().map(PathBuf::from), None);
    let templates = loader.list_templates();
    match templates_dir {
        Some(ref path) if PathBuf::from(path).exists() => {
            println!("  Templates: {path} ({} available)", templates.len())
        }
        _ => println!("  Templates: embedded ({} available)", templates.len()),
    }

    println!("\nCommands:");
    println!("  backdrop serve            Start the HTTP server");
    println!("  backdrop search <query>   Print result cards for a query");
    println!("  backdrop palette <src>    Extract a palette from a URL or file");
    println!("  backdrop init             Extract embedded assets");
    println!("\nRun 'backdrop --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backdrop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(
        config = ?asset_loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    let state = server::create_app_state(asset_loader)?;
    let pipeline = state.pipeline.clone();

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Backdrop server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(%e, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    pipeline.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}
