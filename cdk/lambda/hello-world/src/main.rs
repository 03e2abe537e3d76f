//! Greets through API Gateway.
//!
//! # Environment variables
//!
//! - `TABLE_NAME`: name of the DynamoDB table where greetings are recorded.
//!   Optional.
//! - `ENVIRONMENT`: label echoed in the greeting. Optional.

use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{Level, event};

use hello_serverless::clock::SystemClock;
use hello_serverless::config::Config;
use hello_serverless::context::InvocationContext;
use hello_serverless::handler::handle;
use hello_serverless::response::{ApiGatewayResponse, internal_error_response};
use hello_serverless::store::{DynamoDbStore, RecordStore};

async fn function_handler(
    dynamodb: &aws_sdk_dynamodb::Client,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    // resolved every invocation
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            event!(Level::ERROR, "failed to resolve configuration: {}", err);
            return Ok(internal_error_response(&err));
        },
    };
    let store = config.table_name()
        .map(|table_name| DynamoDbStore::new(dynamodb.clone(), table_name));
    let context = InvocationContext::new(context.request_id);
    let response = handle(
        &payload,
        Some(&context),
        &config,
        store.as_ref().map(|s| s as &dyn RecordStore),
        &SystemClock,
    ).await;
    event!(Level::INFO, "responding with {}", response.status_code);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let aws_config = aws_config::load_from_env().await;
    let dynamodb = aws_sdk_dynamodb::Client::new(&aws_config);
    lambda_runtime::run(service_fn(|event| function_handler(&dynamodb, event)))
        .await
}
