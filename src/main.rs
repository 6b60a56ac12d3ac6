//! websearch CLI - multi-provider web search from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use websearch::{
    providers::{self, PROVIDER_NAMES, TAVILY_API_KEY_ENV},
    HttpContentFetcher, SearchConfig, SearchOutcome, SearchQuery, WebSearch,
};

/// websearch - multi-provider web search CLI
#[derive(Parser)]
#[command(name = "websearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web across all configured providers
    Search(SearchArgs),

    /// List available search providers
    Providers,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Number of results to return
    #[arg(short = 'n', long, default_value = "5")]
    count: usize,

    /// Language code (e.g., en, zh)
    #[arg(short, long)]
    lang: Option<String>,

    /// Country code (e.g., us, cn)
    #[arg(long)]
    country: Option<String>,

    /// Fetch the content of each result page
    #[arg(long)]
    fetch_content: bool,

    /// Providers to register (comma-separated)
    /// Available: ddg, brave, wiki, sogou, tavily
    #[arg(short, long, value_delimiter = ',')]
    providers: Option<Vec<String>>,

    /// Provider consulted first
    #[arg(long)]
    prefer: Option<String>,

    /// Providers consulted after the preferred one (comma-separated)
    #[arg(long, value_delimiter = ',')]
    fallback: Option<Vec<String>>,

    /// Extra search cycles when every provider fails
    #[arg(long)]
    retries: Option<u32>,

    /// Pause between search cycles in seconds
    #[arg(long)]
    retry_delay: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Proxy URL (e.g., http://127.0.0.1:8080 or socks5://127.0.0.1:1080)
    #[arg(long)]
    proxy: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Providers => list_providers(),
    }
}

fn list_providers() -> Result<()> {
    println!("Available search providers:\n");
    println!("  International:");
    println!("    ddg      - DuckDuckGo (privacy-focused search)");
    println!("    brave    - Brave Search");
    println!("    wiki     - Wikipedia");
    println!("    tavily   - Tavily API (needs {})", TAVILY_API_KEY_ENV);
    println!();
    println!("  Chinese (中国搜索引擎):");
    println!("    sogou    - Sogou (搜狗)");
    println!();
    println!("Default registration order: {}", PROVIDER_NAMES.join(", "));
    println!("Usage: websearch search \"query\" -p ddg,wiki,sogou");
    Ok(())
}

fn load_config(args: &SearchArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(prefer) = &args.prefer {
        config.preferred_provider = prefer.clone();
    }
    if let Some(fallback) = &args.fallback {
        config.fallback_providers = fallback.clone();
    }
    if let Some(retries) = args.retries {
        config.max_retries = retries;
    }
    if let Some(delay) = args.retry_delay {
        config.retry_delay_secs = delay;
    }
    if let Some(proxy) = &args.proxy {
        config.proxy = Some(proxy.clone());
    }
    config.validate()?;
    Ok(config)
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let config = load_config(&args)?;

    let registry = providers::build_registry(&config, args.providers.as_deref())?;
    if registry.is_empty() {
        anyhow::bail!("No valid providers specified");
    }
    if let (Some(proxy), OutputFormat::Text) = (&config.proxy, args.format) {
        eprintln!("Using proxy: {}", proxy);
    }

    let fetcher = match &config.proxy {
        Some(proxy) => HttpContentFetcher::with_proxy(proxy)?,
        None => HttpContentFetcher::new()?,
    };
    let language = args.lang.clone().unwrap_or_else(|| config.language.clone());
    let fetcher = fetcher
        .with_language(&language)
        .with_max_chars(config.max_content_chars);

    let search = WebSearch::new(registry, Arc::new(fetcher), config);

    let mut query = SearchQuery::new(&args.query)
        .with_result_count(args.count)
        .with_fetch_content(args.fetch_content);
    if let Some(lang) = args.lang {
        query = query.with_language(lang);
    }
    if let Some(country) = args.country {
        query = query.with_country(country);
    }

    let outcome = search.search(query).await;
    print_outcome(&outcome, args.format)?;
    into_result(outcome)
}

/// Turns a failed search into an error so the process exits non-zero.
fn into_result(outcome: SearchOutcome) -> Result<()> {
    match outcome {
        SearchOutcome::Success(_) => Ok(()),
        SearchOutcome::Failure(failure) => anyhow::bail!("{}", failure.reason),
    }
}

fn print_outcome(outcome: &SearchOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        // Failures are reported once, by the error returned from main.
        _ if !outcome.is_success() => {}
        OutputFormat::Text => println!("{}", outcome),
        OutputFormat::Compact => {
            for result in outcome.results() {
                println!("{}\t{}\t{}", result.position, result.title, result.url);
            }
        }
    }
    Ok(())
}
