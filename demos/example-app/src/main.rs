use decor::prelude::*;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    decor::init_tracing();

    let config = DecorConfig::load("dev").unwrap_or_else(|err| {
        warn!(error = %err, "Falling back to default configuration");
        DecorConfig::empty()
    });

    example_app::app(config)
        .with_trace()
        .with_catch_panic()
        .normalize_path()
        .serve_from_config()
        .await
}
