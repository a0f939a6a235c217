use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use schema_doc_core::{DEFAULT_SCHEMA_SQL, DocConfig, Language, SampleRanking};
use schema_doc_sqlite::{ConnectionTarget, collect_schema, document_database, execute_script};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    /// The Markdown document itself.
    Markdown,
    /// The collected schema model as JSON.
    Json,
    /// The document wrapped with its file name and media type, as JSON.
    Artifact,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliLanguage {
    En,
    Pt,
}

impl From<CliLanguage> for Language {
    fn from(lang: CliLanguage) -> Self {
        match lang {
            CliLanguage::En => Self::English,
            CliLanguage::Pt => Self::Portuguese,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliRanking {
    Query,
    Scan,
}

impl From<CliRanking> for SampleRanking {
    fn from(ranking: CliRanking) -> Self {
        match ranking {
            CliRanking::Query => Self::Query,
            CliRanking::Scan => Self::Scan,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "schema-doc")]
#[command(about = "Reset a SQLite database from a schema script and document it as Markdown")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Execute a schema script atomically, resetting the database.
    Execute(ExecuteArgs),
    /// Generate Markdown documentation of the database schema.
    Document(DocumentArgs),
    /// Print the default bootstrap schema script.
    Bootstrap,
}

#[derive(Debug, Args)]
struct ExecuteArgs {
    /// Database file path, or `:memory:`.
    #[arg(long)]
    db: Option<String>,
    /// File containing the SQL script. Reads stdin when neither this nor --default is given.
    #[arg(long, conflicts_with = "default")]
    script: Option<PathBuf>,
    /// Execute the built-in bootstrap script.
    #[arg(long)]
    default: bool,
    /// Enforce foreign key constraints while executing.
    #[arg(long)]
    foreign_keys: bool,
}

#[derive(Debug, Args)]
struct DocumentArgs {
    /// Database file path, or `:memory:`.
    #[arg(long)]
    db: Option<String>,
    /// Output file (defaults to documentacao_banco.md).
    #[arg(long, conflicts_with = "stdout")]
    output: Option<PathBuf>,
    /// Print to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,
    /// Database name shown in the document heading.
    #[arg(long)]
    title: Option<String>,
    /// Language of the document labels.
    #[arg(long)]
    language: Option<CliLanguage>,
    /// Where the most complete sample row is ranked.
    #[arg(long)]
    ranking: Option<CliRanking>,
    /// Output format.
    #[arg(long, default_value = "markdown")]
    format: CliOutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Command::Execute(args) => run_execute(args, config),
        Command::Document(args) => run_document(args, config),
        Command::Bootstrap => run_bootstrap(),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<DocConfig, String> {
    match path {
        Some(path) => {
            let config = DocConfig::load(path)
                .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?;
            debug!(?config, "loaded configuration");
            Ok(config)
        }
        None => Ok(DocConfig::default()),
    }
}

fn run_execute(args: ExecuteArgs, mut config: DocConfig) -> Result<(), String> {
    if let Some(db) = args.db {
        config.database = db;
    }
    config.foreign_keys |= args.foreign_keys;

    let script = if args.default {
        DEFAULT_SCHEMA_SQL.to_string()
    } else if let Some(path) = &args.script {
        fs::read_to_string(path)
            .map_err(|e| format!("Failed to read script '{}': {e}", path.display()))?
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read script from stdin: {e}"))?;
        buf
    };

    let target = parse_target(&config.database);
    let report = execute_script(&target, &script, config.foreign_keys)
        .map_err(|e| format!("Failed to execute SQL script: {e}"))?;
    println!(
        "Script executed successfully. Database reset ({} statements in '{}').",
        report.statements_executed, target
    );
    Ok(())
}

fn run_document(args: DocumentArgs, mut config: DocConfig) -> Result<(), String> {
    if let Some(db) = args.db {
        config.database = db;
    }
    if let Some(title) = args.title {
        config.title = Some(title);
    }
    if let Some(language) = args.language {
        config.language = language.into();
    }
    if let Some(ranking) = args.ranking {
        config.sample_ranking = ranking.into();
    }
    if let Some(output) = args.output {
        config.output = output;
    }

    let target = parse_target(&config.database);
    let content = match args.format {
        CliOutputFormat::Markdown => document_database(&target, &config)
            .map_err(|e| format!("Failed to generate documentation: {e}"))?
            .to_string(),
        CliOutputFormat::Artifact => {
            let artifact = document_database(&target, &config)
                .map_err(|e| format!("Failed to generate documentation: {e}"))?
                .into_artifact();
            serde_json::to_string_pretty(&artifact)
                .map_err(|e| format!("JSON serialization failed: {e}"))?
        }
        CliOutputFormat::Json => {
            let tables = collect_schema(&target, config.sample_ranking)
                .map_err(|e| format!("Failed to collect schema: {e}"))?;
            let model = serde_json::json!({
                "database": config.document_title(),
                "tables": tables,
            });
            serde_json::to_string_pretty(&model)
                .map_err(|e| format!("JSON serialization failed: {e}"))?
        }
    };

    if args.stdout {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
        return Ok(());
    }

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {e}", parent.display()))?;
    }
    fs::write(&config.output, &content)
        .map_err(|e| format!("Failed to write '{}': {e}", config.output.display()))?;
    println!("Documentation written to '{}'.", config.output.display());
    Ok(())
}

fn run_bootstrap() -> Result<(), String> {
    println!("{DEFAULT_SCHEMA_SQL}");
    Ok(())
}

fn parse_target(raw: &str) -> ConnectionTarget {
    let Ok(target) = raw.parse::<ConnectionTarget>();
    target
}
