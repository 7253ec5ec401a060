use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

/// Sends `debug` and above to the devtools console.
pub fn simple_web_logger_init() {
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(Level::DEBUG)
        .build();
    let result = tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(WASMLayer::new(config))
        .try_init();
    if let Err(err) = result {
        tracing::warn!("logger already set: {err}");
    }
}
