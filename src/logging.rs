//! Log subscriber setup for programs embedding frabdl.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "frabdl=debug,frabdl_parser=debug,frabdl_common=debug"
    } else {
        // Listing skips are reported through MediaIndex::skipped() as well.
        "frabdl=info,frabdl_parser=warn"
    }
}

/// Install a fmt subscriber.
///
/// `RUST_LOG` wins over the verbosity flag. Returns false if a global
/// subscriber was already installed.
pub fn init(verbose: bool) -> bool {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .try_init()
        .is_ok()
}
