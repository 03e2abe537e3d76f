use anyhow::{Context, Error};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs::read_to_string;
use tracing::{Level, event};
use tracing_subscriber::EnvFilter;

use hello_serverless::clock::{Clock, FixedClock, SystemClock};
use hello_serverless::config::Config;
use hello_serverless::context::InvocationContext;
use hello_serverless::handler::handle;
use hello_serverless::response::internal_error_response;
use hello_serverless::store::{DynamoDbStore, MemoryStore, RecordStore};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands
}

#[derive(Subcommand)]
enum Commands {
    /// Invokes the request handler locally and prints the response.
    ///
    /// Configuration is read from `TABLE_NAME` and `ENVIRONMENT` as the
    /// Lambda function does.
    Invoke {
        /// Request ID of the invocation.
        ///
        /// A fresh one is made if omitted.
        #[arg(long)]
        request_id: Option<String>,
        /// Path to a JSON file with the event.
        #[arg(long)]
        event: Option<String>,
        /// Whether to record greetings in memory instead of DynamoDB.
        #[arg(long)]
        memory_store: bool,
        /// Time of the invocation in RFC 3339.
        #[arg(long)]
        at: Option<String>,
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Invoke { request_id, event, memory_store, at } => {
            invoke(request_id, event, memory_store, at).await?;
        }
    }
    Ok(())
}

async fn invoke(
    request_id: Option<String>,
    event_path: Option<String>,
    memory_store: bool,
    at: Option<String>,
) -> Result<(), Error> {
    let event = match event_path {
        Some(path) => {
            let json = read_to_string(&path)
                .with_context(|| format!("failed to read event: {}", path))?;
            serde_json::from_str::<Value>(&json)
                .with_context(|| format!("invalid event JSON: {}", path))?
        },
        None => Value::Object(Default::default()),
    };
    let clock: Box<dyn Clock> = match at {
        Some(at) => {
            let at = DateTime::parse_from_rfc3339(&at)
                .with_context(|| format!("invalid time: {}", at))?;
            Box::new(FixedClock::new(at.with_timezone(&Utc)))
        },
        None => Box::new(SystemClock),
    };
    let request_id = request_id.unwrap_or_else(|| {
        format!("local-{:x}", Utc::now().timestamp_micros())
    });
    event!(Level::INFO, "invoking with request ID {}", request_id);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            event!(Level::ERROR, "failed to resolve configuration: {}", err);
            print_json(&internal_error_response(&err))?;
            return Ok(());
        }
    };
    let context = InvocationContext::new(request_id);

    if memory_store {
        let store = config.table_name().map(|_| MemoryStore::new());
        let response = handle(
            &event,
            Some(&context),
            &config,
            store.as_ref().map(|s| s as &dyn RecordStore),
            clock.as_ref(),
        ).await;
        print_json(&response)?;
        if let Some(store) = store {
            for item in store.items() {
                println!("recorded: {}", serde_json::to_string(&item)?);
            }
        }
    } else {
        let store = match config.table_name() {
            Some(table_name) => {
                let aws_config = aws_config::load_from_env().await;
                let dynamodb = aws_sdk_dynamodb::Client::new(&aws_config);
                Some(DynamoDbStore::new(dynamodb, table_name))
            },
            None => None,
        };
        let response = handle(
            &event,
            Some(&context),
            &config,
            store.as_ref().map(|s| s as &dyn RecordStore),
            clock.as_ref(),
        ).await;
        print_json(&response)?;
    }
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
