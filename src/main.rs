use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use shoprank_core::{generate_catalog, paginate, CatalogProvider};
use shoprank_ranking::{
    parse_requested_traits, EngineConfig, PersonalityDimension, Ranker, RecommendationResponse, ReferenceData,
    SessionFilters, TraitMatchResponse, TraitValues,
};
use std::collections::HashMap;
use shoprank_storage::{write_seed_file, CatalogStore};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding tracing filter directives
const LOG_ENV: &str = "SHOPRANK_LOG";

/// Rank and match products from a personality-aware catalog
#[derive(Parser, Debug)]
#[command(name = "shoprank")]
#[command(about = "Catalog ranking and matching engine", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Reference tables (JSON) replacing the built-in ones
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Engine settings (JSON); missing keys keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed an empty catalog from a seed file (.csv or JSON)
    Seed {
        #[arg(long)]
        from: PathBuf,
    },
    /// Write a synthetic seed file (.csv or JSON)
    Generate {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long)]
        out: PathBuf,
        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Shortlist products for the last search, category or trait
    Recommend {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "trait")]
        trait_name: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rank products by overlap with comma-separated traits
    Match {
        #[arg(long, default_value = "")]
        traits: String,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Recommend a product for the strongest personality dimension
    Dominant {
        /// JSON object of dimension scores; keys are case-insensitive
        #[arg(long)]
        profile: Option<PathBuf>,
        #[arg(long)]
        openness: Option<f64>,
        #[arg(long)]
        extraversion: Option<f64>,
        #[arg(long)]
        conscientiousness: Option<f64>,
        #[arg(long)]
        agreeableness: Option<f64>,
        #[arg(long)]
        neuroticism: Option<f64>,
    },
    /// Complementary items for a product
    Addons { product: String },
    /// List the catalog one page at a time
    Products {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Search the category showcase
    Showcase {
        #[command(subcommand)]
        command: ShowcaseCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ShowcaseCommand {
    /// Items from every category whose name contains the query
    Search { query: String },
    /// A single item by exact name
    Find { name: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    debug!("shoprank v{}", env!("CARGO_PKG_VERSION"));
    debug!("Data directory: {:?}", args.data_dir);

    let reference = match &args.reference {
        Some(path) => ReferenceData::from_path(path)
            .with_context(|| format!("loading reference tables from {}", path.display()))?,
        None => ReferenceData::builtin().context("loading built-in reference tables")?,
    };
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading engine config {}", path.display()))?;
            EngineConfig::from_json_str(&json)
                .with_context(|| format!("parsing engine config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    debug!(?config, "Engine config");
    let ranker = Ranker::new(reference, config);

    match args.command {
        Command::Generate { count, out, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let products = generate_catalog(count, &mut rng);
            write_seed_file(&out, &products).with_context(|| format!("writing {}", out.display()))?;
            info!("Wrote {} products to {:?}", products.len(), out);
            print_json(&products.len())
        }
        Command::Seed { from } => {
            let store = open_store(&args.data_dir)?;
            let report = store
                .startup(Some(from.as_path()))
                .with_context(|| format!("seeding from {}", from.display()))?;
            print_json(&report)
        }
        Command::Recommend {
            query,
            category,
            trait_name,
            limit,
        } => {
            let store = open_store(&args.data_dir)?;
            let filters = SessionFilters {
                last_search: query,
                last_category: category,
                last_traits: trait_name,
            };
            let context = filters.resolve();
            debug!(?context, "Resolved selection");

            let products = store.products();
            let limit = limit.unwrap_or(ranker.config().default_limit);
            let selection = ranker.rank_by_selection(&products, &context, limit);
            print_json(&RecommendationResponse::from_selection(&selection))
        }
        Command::Match { traits, top } => {
            let store = open_store(&args.data_dir)?;
            let products = store.products();
            let requested = parse_requested_traits(&traits);
            let top = top.unwrap_or(ranker.config().overlap_top_n);
            let ranked = ranker.rank_by_trait_overlap(&products, &requested, top);
            print_json(&TraitMatchResponse::from_ranked(&requested, &ranked, products.len()))
        }
        Command::Dominant {
            profile,
            openness,
            extraversion,
            conscientiousness,
            agreeableness,
            neuroticism,
        } => {
            let mut values = match &profile {
                Some(path) => {
                    let json = std::fs::read_to_string(path)
                        .with_context(|| format!("reading profile {}", path.display()))?;
                    let map: HashMap<String, f64> = serde_json::from_str(&json)
                        .with_context(|| format!("parsing profile {}", path.display()))?;
                    TraitValues::from_map(&map)
                }
                None => TraitValues::default(),
            };
            let overrides = [
                (PersonalityDimension::Openness, openness),
                (PersonalityDimension::Extraversion, extraversion),
                (PersonalityDimension::Conscientiousness, conscientiousness),
                (PersonalityDimension::Agreeableness, agreeableness),
                (PersonalityDimension::Neuroticism, neuroticism),
            ];
            for (dimension, value) in overrides {
                if let Some(value) = value {
                    values.set(dimension, value);
                }
            }
            print_json(&ranker.recommend_by_dominant_trait(&values))
        }
        Command::Addons { product } => print_json(&ranker.lookup_add_ons(&product)),
        Command::Products { page, per_page } => {
            let store = open_store(&args.data_dir)?;
            let products = store.products();
            let per_page = per_page.unwrap_or(ranker.config().page_size);
            print_json(&paginate(&products, page, per_page))
        }
        Command::Showcase { command } => match command {
            ShowcaseCommand::Search { query } => print_json(&ranker.search_showcase(&query)),
            ShowcaseCommand::Find { name } => {
                let hit = ranker
                    .find_showcase_item(&name)
                    .with_context(|| format!("no showcase item named {name:?}"))?;
                print_json(&hit)
            }
        },
    }
}

/// Open the store and run the startup migration
fn open_store(data_dir: &std::path::Path) -> anyhow::Result<CatalogStore> {
    let store =
        CatalogStore::open(data_dir).with_context(|| format!("opening data directory {}", data_dir.display()))?;
    store.startup(None).context("preparing catalog")?;
    Ok(store)
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(directives).with_context(|| format!("parsing {LOG_ENV}"))?,
        Err(_) => {
            let level = match log_level {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => Level::INFO,
            };
            EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
