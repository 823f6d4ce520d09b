use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use alpha_pagination::{
    AlphaPagination, AlphabetProvider, CacheBackend, FileCache, HandlerRef, HandlerType,
    MemoryCache, PaginationOptions, Services, SqliteDatabase, ViewState,
};
use alpha_pagination_protocol::{CapturedQuery, HandlerConfig, AREA_PLUGIN_ID};

mod report;

#[derive(Parser)]
#[command(name = "alpha-pagination")]
#[command(about = "Alphabetical pagination index for SQL listings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print the index of a listing query
    Render(RenderArgs),

    /// Print the alphabet (or numbers) of a language
    Alphabet(AlphabetArgs),

    /// Print a listing query rewritten for prefix discovery
    Normalize(NormalizeArgs),

    /// Check pagination options
    Validate(ValidateArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// SQLite database file
    #[arg(long)]
    db: PathBuf,

    /// Listing query
    #[arg(long, conflicts_with = "query_file", required_unless_present = "query_file")]
    query: Option<String>,

    /// File holding the listing query
    #[arg(long)]
    query_file: Option<PathBuf>,

    /// Table the listing is based on
    #[arg(long)]
    base_table: String,

    /// Identifier column returned by the listing query
    #[arg(long)]
    base_field: String,

    /// Options file (TOML, or JSON with a .json extension)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Request argument; the last one selects the active character
    #[arg(long = "arg")]
    args: Vec<String>,

    /// Listing path, `%` marks argument positions
    #[arg(long)]
    path: Option<String>,

    /// Request query parameter kept on links (key=value)
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Language of the alphabet
    #[arg(long)]
    langcode: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Persist computed indexes in this directory (in memory otherwise)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Cache TTL in seconds (file cache only)
    #[arg(long)]
    cache_ttl_seconds: Option<u64>,
}

#[derive(Args)]
struct AlphabetArgs {
    /// Language code, e.g. en, ar, ru
    #[arg(long)]
    langcode: Option<String>,

    /// Print the numbers table instead
    #[arg(long)]
    numbers: bool,
}

#[derive(Args)]
struct NormalizeArgs {
    /// Query text; read from stdin when omitted
    query: Option<String>,
}

#[derive(Args)]
struct ValidateArgs {
    /// Options file (TOML, or JSON with a .json extension)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Language the options are checked against
    #[arg(long)]
    langcode: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Render(args) => run_render(args)?,
        Commands::Alphabet(args) => run_alphabet(args)?,
        Commands::Normalize(args) => run_normalize(args)?,
        Commands::Validate(args) => run_validate(args)?,
    }

    Ok(())
}

fn run_render(args: RenderArgs) -> Result<()> {
    let options = load_options(args.options.as_deref())?;
    let sql = match (&args.query, &args.query_file) {
        (Some(query), _) => query.clone(),
        (None, Some(file)) => fs::read_to_string(file)
            .with_context(|| format!("Failed to read query file {}", file.display()))?,
        (None, None) => anyhow::bail!("Either --query or --query-file is required"),
    };

    let db = SqliteDatabase::open(&args.db)
        .with_context(|| format!("Failed to open database {}", args.db.display()))?;

    let cache: Arc<dyn CacheBackend> = match &args.cache_dir {
        Some(dir) => {
            let mut file_cache = FileCache::new(dir);
            if let Some(ttl) = args.cache_ttl_seconds {
                file_cache = file_cache.with_ttl(Duration::from_secs(ttl));
            }
            Arc::new(file_cache)
        }
        None => Arc::new(MemoryCache::default()),
    };
    let services = Services {
        alphabets: Arc::new(AlphabetProvider::new(cache.clone())),
        cache,
        db: &db,
    };

    let handler = HandlerRef {
        view_id: "cli".to_string(),
        display_id: "default".to_string(),
        handler_type: HandlerType::Header,
        field_id: AREA_PLUGIN_ID.to_string(),
        langcode: args.langcode.clone().unwrap_or_default(),
    };
    let view = ViewState {
        view_id: handler.view_id.clone(),
        display_id: handler.display_id.clone(),
        base_table: args.base_table.clone(),
        base_field: args.base_field.clone(),
        args: args.args.clone(),
        current_path: args.path.clone().unwrap_or_default(),
        path: args.path.clone(),
        query_parameters: args.params.iter().cloned().collect::<BTreeMap<_, _>>(),
        build_info: Some(CapturedQuery::new(sql)),
        handlers: vec![HandlerConfig {
            id: handler.field_id.clone(),
            handler_type: handler.handler_type,
            plugin: AREA_PLUGIN_ID.to_string(),
            options,
        }],
        ..Default::default()
    };

    let pagination = AlphaPagination::new(view, handler, services);
    let output = match args.format {
        OutputFormat::Text => report::render_text(&pagination)?,
        OutputFormat::Json => serde_json::to_string_pretty(&report::render_json(&pagination)?)?,
        OutputFormat::Html => pagination.render()?.to_html(),
    };
    println!("{output}");
    Ok(())
}

fn run_alphabet(args: AlphabetArgs) -> Result<()> {
    let provider = AlphabetProvider::new(Arc::new(MemoryCache::default()));
    let langcode = args.langcode.as_deref();
    let table = if args.numbers {
        provider.numbers(langcode)?
    } else {
        provider.alphabet(langcode)?
    };
    println!("{}", table.join(" "));
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let raw = match args.query {
        Some(query) => query,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read query from stdin")?;
            buf
        }
    };
    println!("{}", alpha_pagination_query::normalize_query(raw.trim_end_matches('\n')));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
    let options = load_options(args.options.as_deref())?;
    let provider = AlphabetProvider::new(Arc::new(MemoryCache::default()));
    let langcode = args.langcode.as_deref();
    let messages = options.validate(&provider.alphabet(langcode)?, &provider.numbers(langcode)?);

    if messages.is_empty() {
        println!("{}: options are valid", options.ui_name());
        return Ok(());
    }
    for message in &messages {
        println!("{message}");
    }
    anyhow::bail!("{} validation problem(s)", messages.len())
}

fn load_options(path: Option<&Path>) -> Result<PaginationOptions> {
    let Some(path) = path else {
        return Ok(PaginationOptions::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let options = if is_json {
        PaginationOptions::from_json_str(&raw)
    } else {
        PaginationOptions::from_toml_str(&raw)
    };
    options.with_context(|| format!("Invalid options in {}", path.display()))
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {raw:?}")),
    }
}
