//! Command-line client for poking a running catalog API.

use std::process::ExitCode;

use catalog::client::{ApiResponse, CatalogClient, ClientError};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Debug, Parser)]
#[command(name = "catalog-client", about = "Product catalog API client", long_about = None)]
struct Cli {
    /// API root
    #[arg(long, env = "CATALOG_ENDPOINT", default_value = "http://localhost:8000/api/")]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every product
    List,

    /// Show one product
    Get { id: u64 },

    /// Create a product
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        price: Option<String>,
    },

    /// Change a product (PATCH, or PUT with --full)
    Update {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        price: Option<String>,

        /// Replace the product instead of patching it
        #[arg(long)]
        full: bool,
    },

    /// Delete a product
    Delete { id: u64 },

    /// Send a request to the echo endpoint
    Echo {
        /// Query parameter, repeatable
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// JSON request body
        #[arg(long, value_parser = parse_json)]
        json: Option<Value>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

fn fields(title: Option<String>, content: Option<String>, price: Option<String>) -> Value {
    let mut body = Map::new();
    for (key, value) in [("title", title), ("content", content), ("price", price)] {
        if let Some(value) = value {
            body.insert(key.to_owned(), Value::String(value));
        }
    }
    Value::Object(body)
}

async fn run(cli: Cli) -> Result<ApiResponse, ClientError> {
    let client = CatalogClient::new(&cli.endpoint);

    match cli.command {
        Command::List => client.list().await,
        Command::Get { id } => client.get(id).await,
        Command::Create { title, content, price } => {
            client.create(&fields(Some(title), content, price)).await
        }
        Command::Update { id, title, content, price, full } => {
            client.update(id, &fields(title, content, price), full).await
        }
        Command::Delete { id } => client.delete(id).await,
        Command::Echo { params, json } => client.echo(&params, json.as_ref()).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(response) => {
            println!("{}", response.status);
            if !response.body.is_null() {
                let pretty = serde_json::to_string_pretty(&response.body)
                    .unwrap_or_else(|_| response.body.to_string());
                println!("{pretty}");
            }
            if response.status < 400 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
