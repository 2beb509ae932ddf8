//! hrmigrate CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use hrmigrate::{
    commands::{
        cmd_init, cmd_load, cmd_report, cmd_status, print_load_result, print_report,
        print_status, ReportKind,
    },
    config::Config,
    error::Result,
    models::EntityKind,
    server::ApiServer,
    store::EntityStore,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hrmigrate")]
#[command(version, about = "Load HR tables from CSV or JSON into SQLite and report on hiring", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and create the database schema
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long, env = "HRMIGRATE_BIND_ADDR")]
        bind: Option<String>,
    },

    /// Load a headerless CSV file as one batch
    Load {
        /// Entity kind: department, job or employee
        kind: EntityKind,

        /// Path to the CSV file
        path: PathBuf,
    },

    /// Print a hiring report
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
    },

    /// Show database status
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Init and completions don't need an existing config
    if let Commands::Init { force } = cli.command {
        return handle_init(cli.config, force).await;
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "hrmigrate", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    let store = EntityStore::connect(&config).await?;

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
                config.validate()?;
            }
            store.init_schema().await?;
            ApiServer::new(config, store).run().await?;
        }

        Commands::Load { kind, path } => {
            store.init_schema().await?;
            let response = cmd_load(&store, kind, &path).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_load_result(&response);
            }
        }

        Commands::Report { kind } => {
            store.init_schema().await?;
            let output = cmd_report(&store, kind).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_report(&output);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &store).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }

    Ok(())
}

async fn handle_init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    // A .toml path names the file; anything else names the directory
    let base_dir = config_path.map(|path| {
        if path.extension().map_or(false, |e| e == "toml") {
            path.parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            path
        }
    });

    let config = cmd_init(base_dir, force).await?;

    println!("✓ hrmigrate initialized successfully");
    println!("  Config: {}", config.paths.config_file.display());
    println!("  Database: {}", config.paths.db_file.display());
    println!("\nNext steps:");
    println!("  hrmigrate load department ./departments.csv");
    println!("  hrmigrate serve");

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_from(None),
    }
}
