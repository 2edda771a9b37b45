//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The filter comes from `RUST_LOG` when set, otherwise [`DEFAULT_FILTER`].

use tracing_subscriber::{fmt, EnvFilter};

/// Pipeline at info, GUI backends quieter.
pub const DEFAULT_FILTER: &str = "info,eframe=warn,egui_glow=warn,winit=warn,wgpu=warn";

/// Install the global subscriber. Call once, at startup.
pub fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();
}
