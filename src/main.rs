//! vinyl - search the Discogs catalog with marketplace price estimates

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use vinyl_catalog::api::DEFAULT_BASE_URL;
use vinyl_catalog::config::{BASE_URL_ENV, CACHE_DB_ENV, TOKEN_ENV};
use vinyl_catalog::formatters::{
    format_error, format_estimate, format_no_results, format_record, format_search_results,
};
use vinyl_catalog::{
    Catalog, CatalogError, Config, EnrichmentOutcome, FilterState, PriceCache, PriceRange,
    QuickRange, SortOption, DEFAULT_PER_PAGE,
};

/// Vinyl record search with marketplace price estimates
#[derive(Parser, Debug)]
#[command(name = "vinyl")]
#[command(version, about, long_about = None)]
struct Args {
    /// Discogs personal access token
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Discogs API base URL
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Path to the price cache database
    #[arg(long, global = true, env = CACHE_DB_ENV)]
    cache_db: Option<PathBuf>,

    /// Do not read or write the price cache
    #[arg(long, global = true, default_value_t = false)]
    no_cache: bool,

    /// Delay between price lookups in milliseconds
    #[arg(long, global = true, default_value_t = 150)]
    throttle_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search releases and show them with prices
    Search {
        /// Artist, album or any search term
        query: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,

        /// relevance, year-asc, year-desc, title-asc, price-asc, price-desc
        #[arg(long, default_value = "relevance")]
        sort: SortOption,

        /// Quick price range: 0-20, 20-50, 50-100 or all
        #[arg(long)]
        range: Option<QuickRange>,

        /// Minimum price (inclusive)
        #[arg(long)]
        min: Option<f64>,

        /// Maximum price (inclusive)
        #[arg(long)]
        max: Option<f64>,

        /// Hide records without a known price
        #[arg(long, default_value_t = false)]
        exclude_unknown: bool,

        /// Skip price lookups
        #[arg(long, default_value_t = false)]
        no_prices: bool,
    },
    /// Show full details of a release
    Record { id: u64 },
    /// Show the price estimate of a release
    Price { id: u64 },
}

impl Args {
    fn config(&self) -> Config {
        let cache_path = if self.no_cache {
            None
        } else {
            Some(
                self.cache_db
                    .clone()
                    .unwrap_or_else(PriceCache::default_path),
            )
        };
        Config {
            token: self.token.clone(),
            base_url: self.base_url.clone(),
            cache_path,
            throttle: Duration::from_millis(self.throttle_ms),
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=vinyl_catalog=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let catalog = args.config().build_catalog();

    let result = match args.command {
        Command::Search {
            query,
            page,
            per_page,
            sort,
            range,
            min,
            max,
            exclude_unknown,
            no_prices,
        } => {
            let options = SearchOptions {
                sort,
                range,
                min,
                max,
                include_unknown: !exclude_unknown,
                prices: !no_prices,
            };
            run_search(&catalog, &query, page, per_page, &options).await
        }
        Command::Record { id } => catalog.record(id).await.map(|d| print!("{}", format_record(&d))),
        Command::Price { id } => catalog
            .price(id)
            .await
            .map(|e| print!("{}", format_estimate(id, &e))),
    };

    if let Err(e) = result {
        log::error!("Command failed: {e}");
        eprint!("{}", format_error(&e));
        std::process::exit(1);
    }
}

struct SearchOptions {
    sort: SortOption,
    range: Option<QuickRange>,
    min: Option<f64>,
    max: Option<f64>,
    include_unknown: bool,
    prices: bool,
}

async fn run_search(
    catalog: &Catalog,
    query: &str,
    page: u32,
    per_page: u32,
    options: &SearchOptions,
) -> Result<(), CatalogError> {
    let mut view = catalog.search(query, page, per_page).await?;

    if view.results.is_empty() {
        print!("{}", format_no_results(&view.query));
        return Ok(());
    }

    if options.prices {
        if let EnrichmentOutcome::Cancelled { committed } = catalog.enrich(&mut view).await {
            log::warn!("Price lookup interrupted after {committed} records");
        }
    }

    let filter = view.prices.range().map(|range| build_filter(range, options));
    let items = view.project(&filter.unwrap_or_default(), options.sort);
    print!(
        "{}",
        format_search_results(&view, &items, filter.as_ref())
    );
    Ok(())
}

/// Preset (or the full range), then explicit bounds, then the unknown-price toggle
fn build_filter(range: &PriceRange, options: &SearchOptions) -> FilterState {
    let base = match options.range {
        Some(preset) => FilterState::quick(preset, range),
        None => FilterState::for_range(range),
    };
    FilterState {
        min: options.min.unwrap_or(base.min),
        max: options.max.unwrap_or(base.max),
        include_unknown: options.include_unknown,
    }
}
