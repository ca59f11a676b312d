//! looksatwords CLI: news headline pipeline.
//!
//! Usage:
//!   looksatwords run [-k keyword]... [-t table] [-f num_gen] [-g num_gath] [-a level] [-v visual]...
//!   looksatwords tables [--db path]
//!   looksatwords clear <table> [--db path]

use clap::{Parser, Subcommand};
use looksatwords::{
    Gatherer, Generator, NoopProgress, OpenStore, Orchestrator, PipelineConfig, PipelineContext,
    ProgressSink, QueryDescriptor, RunOptions, SqliteStore, TableStore, TerminalProgress,
    VisualKind, Visualizer,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "looksatwords",
    version,
    about = "Gather, generate, analyze and chart news headlines"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline
    Run(RunArgs),
    /// List tables and their row counts
    Tables,
    /// Remove every row of a table
    Clear {
        /// Table name, e.g. io_gatherer
        table: String,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Search keywords, joined with spaces into one query
    #[arg(short = 'k', long = "keyword", default_values_t = vec!["test".to_string()])]
    keywords: Vec<String>,
    /// Base table name
    #[arg(short = 't', long, default_value = "io")]
    table: String,
    /// Number of articles to generate (0 skips generation)
    #[arg(short = 'f', long, default_value_t = 3)]
    num_gen: usize,
    /// Number of articles to gather
    #[arg(short = 'g', long, default_value_t = 3)]
    num_gath: usize,
    /// Analysis level; anything but "default" skips analysis
    #[arg(short = 'a', long, default_value = "default")]
    analysis: String,
    /// Requested visual kinds (sentiment, wordcount, grammar)
    #[arg(short = 'v', long = "visual", default_values_t = VisualKind::ALL.to_vec())]
    visuals: Vec<VisualKind>,
    /// Skip chart rendering
    #[arg(long, conflicts_with = "visuals")]
    no_visuals: bool,
    /// Seed phrase for generated headlines (defaults to the keywords)
    #[arg(long)]
    seed: Option<String>,
    /// Directory for chart output
    #[arg(long)]
    output: Option<PathBuf>,
    /// Hide progress bars
    #[arg(long)]
    quiet: bool,
}

fn open_store(config: &PipelineConfig) -> Result<SqliteStore, String> {
    SqliteStore::open(&config.store.path).map_err(|e| {
        format!(
            "Failed to open database at {}: {}",
            config.store.path.display(),
            e
        )
    })
}

fn build_orchestrator(config: &PipelineConfig, args: &RunArgs) -> Result<Orchestrator, String> {
    let keywords = args.keywords.join(" ");
    let mut orchestrator = Orchestrator::new(&args.table);

    let search = Arc::new(config.search.client());
    orchestrator.add_gatherer(
        Gatherer::new(search, QueryDescriptor::keyword(keywords.clone()), &args.table)
            .with_max_results(args.num_gath),
    );

    if args.num_gen > 0 {
        let chat = Arc::new(config.llm.client().map_err(|e| e.to_string())?);
        let seed = args.seed.clone().unwrap_or(keywords);
        orchestrator.add_generator(Generator::new(chat, seed, &args.table).with_count(args.num_gen));
    }

    let visuals = if args.no_visuals { Vec::new() } else { args.visuals.clone() };
    if !visuals.is_empty() {
        orchestrator.set_visualizer(Visualizer::new(config.output.dir.clone()).with_kinds(visuals));
    }
    Ok(orchestrator)
}

fn cmd_run(config: &PipelineConfig, args: RunArgs) -> i32 {
    let store = match open_store(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let progress: Arc<dyn ProgressSink> = if args.quiet {
        Arc::new(NoopProgress)
    } else {
        Arc::new(TerminalProgress::new())
    };
    let ctx = PipelineContext::new(Arc::new(store), progress);

    let orchestrator = match build_orchestrator(config, &args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let options = RunOptions {
        analyze: args.analysis == "default",
        visualize: !args.no_visuals && !args.visuals.is_empty(),
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return 1;
        }
    };
    match rt.block_on(orchestrator.run(&ctx, options)) {
        Ok(report) => {
            println!(
                "Gathered {}, generated {}, analyzed {} articles",
                report.gathered, report.generated, report.analyzed
            );
            for path in &report.artifacts {
                println!("  {}", path.display());
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_tables(store: &dyn TableStore) -> i32 {
    let tables = match store.tables() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if tables.is_empty() {
        println!("No tables.");
        return 0;
    }
    println!("{:<32}  {:>7}", "TABLE", "ROWS");
    println!("{}", "-".repeat(41));
    for table in tables {
        println!("{:<32}  {:>7}", table.name, table.rows);
    }
    0
}

fn cmd_clear(store: &dyn TableStore, table: &str) -> i32 {
    match store.clear(table) {
        Ok(()) => {
            println!("Cleared table '{}'", table);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = match PipelineConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(db) = cli.db {
        config.store.path = db;
    }

    let code = match cli.command {
        Commands::Run(args) => {
            if let Some(output) = &args.output {
                config.output.dir = output.clone();
            }
            cmd_run(&config, args)
        }
        Commands::Tables => match open_store(&config) {
            Ok(store) => cmd_tables(&store),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Clear { table } => match open_store(&config) {
            Ok(store) => cmd_clear(&store, &table),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };
    std::process::exit(code);
}
