//! dbscaffold CLI - Spring boilerplate generation and MySQL schema tools
//!
//! Every relation choice is made interactively from a numbered list.

use clap::{Parser, Subcommand};
use dbscaffold::codegen::{GenerationDepth, Generator};
use dbscaffold::config::{ScaffoldConfig, DEFAULT_CONFIG_FILE};
use dbscaffold::db::MysqlCatalog;
use dbscaffold::ops::{compare, transfer_views, TableTransferer};
use dbscaffold::schema::{Catalog, Introspector};
use dbscaffold::select::{PromptSelector, SelectionProvider};
use dbscaffold::{Result, ScaffoldError};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "dbscaffold")]
#[command(version, about = "Schema-driven Spring boilerplate and MySQL schema tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java classes for one table or view
    Generate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Compare the schemas of DB1 and DB2 and write a report
    Diff {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Report path (default: compare.report_path from config)
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Copy structure and rows of selected tables from DB1 to DB2
    TransferTables {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Recreate selected views of DB1 in DB2
    TransferViews {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// List tables and views of the configured database
    List {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config } => generate(config),
        Commands::Diff { config, report } => diff(config, report),
        Commands::TransferTables { config } => transfer_tables(config),
        Commands::TransferViews { config } => transfer_views_cmd(config),
        Commands::List { config } => list(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Generate artifacts for an interactively chosen relation
fn generate(config_path: PathBuf) -> Result<()> {
    let config = ScaffoldConfig::load(&config_path)?;
    let package_name = config.package_name()?;
    let catalog = MysqlCatalog::connect(config.database_url()?)?;
    println!("  ✓ Connected to database");

    let introspector = Introspector::new(&catalog)
        .with_type_map(config.type_map())
        .with_policy(config.generator.auto_increment);

    let relations = introspector.list_relations()?;
    if relations.is_empty() {
        println!("  ℹ No tables or views found");
        return Ok(());
    }

    let mut selector = PromptSelector::stdio();
    let relation = &relations[selector.select_one("Select a table or view", &relations)?];

    let labels: Vec<String> = GenerationDepth::ALL
        .iter()
        .map(|depth| depth.label().to_string())
        .collect();
    let depth = GenerationDepth::ALL[selector.select_one("Select what to generate", &labels)?];

    println!("🔧 Generating {} for {}...", depth.label(), relation);

    let generator = Generator::new(introspector, package_name, config.output_root());
    let outcomes = generator.generate(relation, depth.kinds())?;

    let mut generated = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => {
                generated += 1;
                println!("  ✓ Generated {} {}", outcome.kind, path.display());
            }
            Err(e) => println!("  ✗ Failed {}: {}", outcome.kind, e),
        }
    }

    println!("✨ Generated {}/{} artifacts", generated, outcomes.len());
    Ok(())
}

fn diff(config_path: PathBuf, report: Option<PathBuf>) -> Result<()> {
    let config = ScaffoldConfig::load(&config_path)?;
    let db1 = MysqlCatalog::connect(config.db1_url()?)?;
    let db2 = MysqlCatalog::connect(config.db2_url()?)?;
    println!("  ✓ Connected to DB1 and DB2");

    let report_path = report.unwrap_or_else(|| PathBuf::from(&config.compare.report_path));
    let diff_report = compare(&db1, &db2)?;

    println!("{}", diff_report.to_text());
    diff_report.write_to(&report_path)?;
    println!("  ✓ Report written to {}", report_path.display());
    Ok(())
}

fn transfer_tables(config_path: PathBuf) -> Result<()> {
    let config = ScaffoldConfig::load(&config_path)?;
    let source = MysqlCatalog::connect(config.db1_url()?)?;
    let mut target = MysqlCatalog::connect(config.db2_url()?)?;

    let tables = source.table_names()?;
    if tables.is_empty() {
        println!("  ℹ No tables found in DB1");
        return Ok(());
    }

    let selected = choose_many("Select tables to transfer (comma-separated)", &tables)?;

    let outcomes = TableTransferer::new(&source, &mut target)
        .with_batch_size(config.transfer.batch_size)
        .transfer_all(&selected);

    for outcome in &outcomes {
        match &outcome.data {
            Ok(rows) => {
                if let Err(e) = &outcome.structure {
                    println!("  ℹ {}: table not created ({})", outcome.table, e);
                }
                println!("  ✓ {}: {} rows", outcome.table, rows);
            }
            Err(e) => println!("  ✗ {}: {}", outcome.table, e),
        }
    }

    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    println!("✨ Transferred {}/{} tables", succeeded, outcomes.len());
    Ok(())
}

fn transfer_views_cmd(config_path: PathBuf) -> Result<()> {
    let config = ScaffoldConfig::load(&config_path)?;
    let source = MysqlCatalog::connect(config.db1_url()?)?;
    let mut target = MysqlCatalog::connect(config.db2_url()?)?;

    let views = source.view_names()?;
    if views.is_empty() {
        println!("  ℹ No views found in DB1");
        return Ok(());
    }

    let selected = choose_many("Select views to transfer (comma-separated)", &views)?;
    let outcomes = transfer_views(&source, &mut target, &selected);

    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => println!("  ✓ {}", outcome.view),
            Err(e) => println!("  ✗ {}: {}", outcome.view, e),
        }
    }

    let succeeded = outcomes.iter().filter(|o| o.result.is_ok()).count();
    println!("✨ Transferred {}/{} views", succeeded, outcomes.len());
    Ok(())
}

fn list(config_path: PathBuf) -> Result<()> {
    let config = ScaffoldConfig::load(&config_path)?;
    let catalog = MysqlCatalog::connect(config.database_url()?)?;

    println!("Tables:");
    for table in catalog.table_names()? {
        println!("  {}", table);
    }
    println!("Views:");
    for view in catalog.view_names()? {
        println!("  {}", view);
    }
    Ok(())
}

fn choose_many(prompt: &str, items: &[String]) -> Result<Vec<String>> {
    let indices = PromptSelector::stdio().select_many(prompt, items)?;
    if indices.is_empty() {
        return Err(ScaffoldError::Selection("nothing selected".to_string()));
    }
    Ok(indices.into_iter().map(|i| items[i].clone()).collect())
}
