//! Logging setup
//!
//! Controllers log through `tracing`. In the browser the events go to the
//! developer console via `tracing-wasm`; natively they go wherever the host
//! installed a subscriber.

use crate::config::LoggingConfig;

/// Installs the console subscriber and panic hook. Safe to call repeatedly;
/// only the first call takes effect.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(config: &LoggingConfig) {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let layer_config = tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(config.max_level())
            .build();
        tracing_wasm::set_as_global_default_with_config(layer_config);
    });
}

/// Non-WASM fallback: the host owns the subscriber.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(config: &LoggingConfig) {
    tracing::debug!(level = %config.max_level(), "logging left to host subscriber");
}
