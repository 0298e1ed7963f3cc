use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use lemmatizer_server::{AppState, ModelPaths, load_lemmatizer, router};
use suffix_lemmatizer::{LemmatizerConfig, LookupStrategy, Smoothing};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_CORPUS: &str = "corpus.tsv";
const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    info!("binding to {}:{}", config.host, config.port);
    info!("using corpus at {}", config.paths.corpus.display());
    if let Some(snapshot) = &config.paths.snapshot {
        info!("using model snapshot at {}", snapshot.display());
    }
    info!(
        "smoothing {}, lookup {}, min suffix length {}",
        config.lemmatizer.smoothing, config.lemmatizer.strategy, config.lemmatizer.min_suf_len
    );

    let lemmatizer = load_lemmatizer(&config.paths, config.lemmatizer)?;
    let state = AppState {
        lemmatizer: Arc::new(lemmatizer),
        max_batch_size: config.max_batch_size,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen address")?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    paths: ModelPaths,
    lemmatizer: LemmatizerConfig,
    max_batch_size: usize,
}

fn load_config() -> Result<Config> {
    let mut cli_corpus: Option<PathBuf> = None;
    let mut cli_dictionary: Option<PathBuf> = None;
    let mut cli_exceptions: Option<PathBuf> = None;
    let mut cli_model: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--corpus" => cli_corpus = args.next().map(PathBuf::from),
            "--model" => cli_model = args.next().map(PathBuf::from),
            _ => {
                if let Some(path) = arg.strip_prefix("--corpus=") {
                    cli_corpus = Some(PathBuf::from(path));
                } else if let Some(path) = arg.strip_prefix("--dictionary=") {
                    cli_dictionary = Some(PathBuf::from(path));
                } else if let Some(path) = arg.strip_prefix("--exceptions=") {
                    cli_exceptions = Some(PathBuf::from(path));
                } else if let Some(path) = arg.strip_prefix("--model=") {
                    cli_model = Some(PathBuf::from(path));
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let paths = ModelPaths {
        corpus: cli_corpus
            .or_else(|| env_path("CORPUS_PATH"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS)),
        dictionary: cli_dictionary.or_else(|| env_path("DICTIONARY_PATH")),
        exceptions: cli_exceptions.or_else(|| env_path("EXCEPTIONS_PATH")),
        snapshot: cli_model.or_else(|| env_path("MODEL_PATH")),
    };

    let defaults = LemmatizerConfig::default();
    let lemmatizer = LemmatizerConfig {
        min_suf_len: env_number("MIN_SUF_LEN").unwrap_or(defaults.min_suf_len),
        prefix_window: env_number("PREFIX_WINDOW").unwrap_or(defaults.prefix_window),
        min_count: env_number("MIN_COUNT").unwrap_or(defaults.min_count),
        smoothing: env_parsed::<Smoothing>("SMOOTHING")?.unwrap_or(defaults.smoothing),
        strategy: env_parsed::<LookupStrategy>("LOOKUP_STRATEGY")?.unwrap_or(defaults.strategy),
    };
    let max_batch_size = env_number("MAX_BATCH_SIZE")
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_BATCH_SIZE);

    Ok(Config {
        host,
        port,
        paths,
        lemmatizer,
        max_batch_size,
    })
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key).ok().filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn env_number<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn env_parsed<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("invalid {key}")),
        Err(_) => Ok(None),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
