//! Trellis CLI - Build relational schema modules from graph snapshots
//!
//! Usage:
//!   trellis build --graph <snapshot.json> --database <guid> --catalog <name> --schema <name>
//!   trellis schemas --graph <snapshot.json> --database <guid>
//!
//! Examples:
//!   trellis build --graph graph.json --database 3f2a... --catalog PROD --schema SALES --pretty
//!   trellis build --config trellis.toml --database 3f2a... --catalog PROD --schema SALES --table ORDERS
//!   trellis schemas --graph graph.json --database 3f2a...

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use trellis::builder::{ModuleBuilder, ModuleRequest};
use trellis::config::Settings;
use trellis::graph::SnapshotGraph;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Trellis - Materialize relational schema modules from metadata graphs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the module document for one (database, catalog, schema) triple
    Build {
        #[command(flatten)]
        source: GraphSource,

        /// Guid of the database entity
        #[arg(short, long)]
        database: String,

        /// Catalog display label
        #[arg(long)]
        catalog: String,

        /// Schema display name (exact match)
        #[arg(short, long)]
        schema: String,

        /// Restrict the build to these table names (repeatable)
        #[arg(short, long = "table")]
        tables: Vec<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the schemas reachable from a database entity
    Schemas {
        #[command(flatten)]
        source: GraphSource,

        /// Guid of the database entity
        #[arg(short, long)]
        database: String,
    },
}

/// Where the graph snapshot comes from.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct GraphSource {
    /// Path to a graph snapshot JSON file
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Path to a trellis.toml naming the snapshot
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            source,
            database,
            catalog,
            schema,
            tables,
            pretty,
        } => cmd_build(source, database, catalog, schema, tables, pretty).await,
        Commands::Schemas { source, database } => cmd_schemas(source, database).await,
    }
}

/// Load the builder (graph plus fan-out limits) from the selected source.
fn load_builder(source: &GraphSource) -> Result<ModuleBuilder, String> {
    let (snapshot_path, limits) = match (&source.graph, &source.config) {
        (Some(path), _) => (path.clone(), None),
        (None, Some(config_path)) => {
            let settings = Settings::load(config_path).map_err(|e| e.to_string())?;
            let path = settings
                .snapshot_path()
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("{}: no [graph] snapshot configured", config_path.display()))?;
            (path, Some(settings.fanout_limits()))
        }
        (None, None) => return Err("either --graph or --config is required".to_string()),
    };

    let graph = SnapshotGraph::from_file(&snapshot_path).map_err(|e| e.to_string())?;
    let mut builder = ModuleBuilder::new(Arc::new(graph));
    if let Some(limits) = limits {
        builder = builder.with_limits(limits);
    }
    Ok(builder)
}

async fn cmd_build(
    source: GraphSource,
    database: String,
    catalog: String,
    schema: String,
    tables: Vec<String>,
    pretty: bool,
) -> ExitCode {
    let builder = match load_builder(&source) {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut request = ModuleRequest::new(database, catalog, schema);
    if !tables.is_empty() {
        let wanted: HashSet<String> = tables.into_iter().collect();
        request = request.with_table_filter(move |name| wanted.contains(name));
    }

    match builder.build(&request).await {
        Ok(module) => {
            let rendered = if pretty {
                serde_json::to_string_pretty(&module)
            } else {
                serde_json::to_string(&module)
            };
            match rendered {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Serialization error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Build error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_schemas(source: GraphSource, database: String) -> ExitCode {
    let builder = match load_builder(&source) {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match builder.list_schemas(&database).await {
        Ok(schemas) => {
            for schema in schemas {
                println!("{}", schema);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
