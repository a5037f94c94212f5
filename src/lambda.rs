#[cfg(feature = "lambda")]
use greeting_services::core::lambda::{handle_event, LambdaResponse};
#[cfg(feature = "lambda")]
use greeting_services::utils::logger;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<serde_json::Value>) -> Result<LambdaResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling greeting request");
    Ok(handle_event(&event.payload))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
