use tracing_subscriber::EnvFilter;

/// Initialize tracing and bridge `log` to `tracing`.
/// Safe to call more than once (later attempts are ignored).
pub fn init_logging(verbose: bool) {
    // Bridge `log` records into `tracing` so the `log` macros used
    // throughout the crate are captured by the subscriber
    let _ = tracing_log::LogTracer::init();

    // Explicit verbose flag wins, otherwise RUST_LOG, otherwise info
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // try_init so tests calling this repeatedly don't panic
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .ok();
}
