use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use smart_tourism::api::AppState;
use smart_tourism::config::{AppConfig, LoggingConfig};
use smart_tourism::filters::{apply_filters, sort_by_distance, sort_by_rating};
use smart_tourism::{
    DestinationFilters, FavoritesStore, InMemoryFavoritesStore, Location, RelationKind,
    SortOrder, SourceFiles, SupabaseFavoritesStore, load_catalog, related_to, web,
};

#[derive(Parser)]
#[command(name = "smart-tourism", version, about = "Tourist destination catalog with semantic relationships")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Rating,
    Distance,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print destinations matching the filters
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Ascending rating order
        #[arg(long)]
        asc: bool,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Print destinations related to an id
    Related {
        id: String,
        #[arg(long, default_value = "all")]
        kind: String,
    },
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn favorites_store(config: &AppConfig) -> Result<Arc<dyn FavoritesStore>> {
    match config.favorites.credentials() {
        Some((url, key)) => Ok(Arc::new(SupabaseFavoritesStore::new(url, key)?)),
        None => {
            tracing::warn!(
                "Supabase URL or anon key is missing, favorites are kept in memory only"
            );
            Ok(Arc::new(InMemoryFavoritesStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_from_path(cli.config.clone())?;
    init_tracing(&config.logging, cli.verbose);

    let sources = SourceFiles::from_config(&config.data);
    tracing::debug!("Using sources: {:?}", sources);

    match cli.command {
        Command::Serve { port } => {
            let mut server = config.server.clone();
            if let Some(port) = port {
                server.port = port;
            }
            let state = AppState::new(sources, favorites_store(&config)?);
            web::run(&server, state).await?;
        }
        Command::List {
            category,
            state,
            city,
            search,
            sort,
            asc,
            lat,
            lon,
        } => {
            let catalog = load_catalog(&sources)?;
            let filters = DestinationFilters {
                category,
                state,
                city,
                search,
            };
            let filtered = apply_filters(&catalog, &filters);

            match sort {
                Some(SortKey::Distance) => {
                    let from = Location::new(
                        lat.context("--lat is required to sort by distance")?,
                        lon.context("--lon is required to sort by distance")?,
                    );
                    for ranked in sort_by_distance(&filtered, &from) {
                        println!(
                            "{:<28} {:<20} {:>8.1} km",
                            ranked.destination.name, ranked.destination.city, ranked.distance
                        );
                    }
                }
                other => {
                    let list = match other {
                        Some(SortKey::Rating) => {
                            let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
                            sort_by_rating(&filtered, order)
                        }
                        _ => filtered,
                    };
                    if list.is_empty() {
                        println!("No destinations found");
                    }
                    for d in list {
                        println!("{:<28} {:<14} {:<20} {:>4.1}", d.name, d.category, d.state, d.rating);
                    }
                }
            }
        }
        Command::Related { id, kind } => {
            let kind: RelationKind = kind.parse()?;
            let related = related_to(&sources, &id, kind)?;
            if related.is_empty() {
                println!("No related attractions for {id}");
            }
            for related_id in related {
                println!("{related_id}");
            }
        }
    }

    Ok(())
}
