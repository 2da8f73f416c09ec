//! tweetql CLI - GraphQL over users, tweets and movies.
//!
//! Usage:
//!   tweetql serve                  # Run the HTTP server
//!   tweetql serve --listen ADDR    # Override the listen address
//!   tweetql query '<document>'     # Run one operation in-process
//!   tweetql schema                 # Print the SDL

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tweetql::server::{self, AppState};
use tweetql::{build_schema, execute_request, Config, MovieCatalog, RelationStore};

#[derive(Parser)]
#[command(name = "tweetql")]
#[command(about = "tweetql - GraphQL over users, tweets and movies", long_about = None)]
struct Cli {
    /// Directory searched for tweetql.toml (default: current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Explicit config file (overrides --root discovery)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the GraphQL HTTP server
    Serve {
        /// Listen address, e.g. 0.0.0.0:4000
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Execute one GraphQL operation against a fresh store and print the JSON
    Query {
        /// GraphQL document
        document: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },

    /// Print the schema in SDL
    Schema,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::discover(&cli.root)?,
    };
    Ok(config.with_env())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                config.server.listen = listen;
            }
            server::serve(&config).await?;
        }

        Commands::Query { document, variables } => {
            let state = AppState::from_config(&config)?;

            let mut request = async_graphql::Request::new(document);
            if let Some(vars) = variables {
                let value: serde_json::Value =
                    serde_json::from_str(&vars).context("parsing --variables")?;
                request = request.variables(async_graphql::Variables::from_json(value));
            }

            let response = execute_request(&state.schema, request).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if response.is_err() {
                std::process::exit(2);
            }
        }

        Commands::Schema => {
            // SDL generation never touches the catalog
            let catalog: Arc<dyn MovieCatalog> =
                Arc::new(tweetql::HttpCatalog::from_config(&config.catalog)?);
            let schema = build_schema(
                Arc::new(RelationStore::with_default_seed()),
                catalog,
                &config.server,
            );
            println!("{}", schema.sdl());
        }
    }

    Ok(())
}
