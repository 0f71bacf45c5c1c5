//! route-compiler CLI
//!
//! ```text
//! route-compiler compile --path '/user/{id}' --where id='\d+'
//! route-compiler check routes.toml
//! route-compiler watch routes.toml
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};

use route_compiler::config::watcher::RouteTableWatcher;
use route_compiler::config::load_config;
use route_compiler::observability::logging;
use route_compiler::routing::RouteTable;
use route_compiler::{compile, RouteCache, RoutePattern};

#[derive(Parser)]
#[command(name = "route-compiler")]
#[command(about = "Compile route patterns into anchored regex matchers", long_about = None)]
struct Cli {
    /// Log level; defaults to the route table setting, or `info`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a single pattern and print the result as JSON
    Compile {
        /// Path pattern, e.g. /user/{id}/{tab?}
        #[arg(short, long)]
        path: String,

        /// Host pattern, e.g. {tenant}.example.com
        #[arg(long)]
        host: Option<String>,

        /// Constraint override as name=regex (repeatable)
        #[arg(short = 'w', long = "where", value_parser = parse_constraint)]
        constraints: Vec<(String, String)>,
    },
    /// Validate a route table file and print its compiled regexes
    Check { file: PathBuf },
    /// Compile a route table and recompile it whenever the file changes
    Watch { file: PathBuf },
}

fn parse_constraint(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, regex)) if !name.is_empty() => Ok((name.to_string(), regex.to_string())),
        _ => Err(format!("expected name=regex, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            path,
            host,
            constraints,
        } => {
            logging::init(cli.log_level.as_deref().unwrap_or("info"));

            let mut pattern = RoutePattern::new(path).with_host(host.unwrap_or_default());
            for (name, regex) in constraints {
                pattern = pattern.with_constraint(name, regex);
            }

            let compiled = compile(&pattern)?;
            println!("{}", serde_json::to_string_pretty(&compiled)?);
        }
        Commands::Check { file } => {
            let table = load_table(&file, cli.log_level.as_deref(), &RouteCache::new())?;
            for route in table.iter() {
                println!("{}", route.name);
                if route.compiled.has_host() {
                    println!("  host: {}", route.compiled.host_regex);
                }
                println!("  path: {}", route.compiled.path_regex);
            }
        }
        Commands::Watch { file } => {
            let cache = RouteCache::new();
            let table = Arc::new(ArcSwap::from_pointee(load_table(
                &file,
                cli.log_level.as_deref(),
                &cache,
            )?));

            let watcher = RouteTableWatcher::new(&file, table.clone(), cache);
            let _guard = watcher.run()?;

            tokio::signal::ctrl_c().await?;
            tracing::info!(routes = table.load().len(), "Shutdown signal received");
        }
    }

    Ok(())
}

/// Load, validate and compile a route table, exiting with every validation
/// error on failure.
fn load_table(
    file: &Path,
    log_level: Option<&str>,
    cache: &RouteCache,
) -> Result<RouteTable, Box<dyn std::error::Error>> {
    let config = load_config(file)?;

    logging::init(log_level.unwrap_or(&config.observability.log_level));
    tracing::info!(path = %file.display(), routes = config.routes.len(), "Route table loaded");

    match RouteTable::from_config(&config, cache) {
        Ok(table) => Ok(table),
        Err(errors) => {
            eprintln!("{}: {} invalid route(s)", file.display(), errors.len());
            for error in errors {
                eprintln!("  {error}");
            }
            std::process::exit(1);
        }
    }
}
