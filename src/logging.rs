use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects between
/// `awesome_index=debug` and `awesome_index=warn`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "awesome_index=debug"
    } else {
        "awesome_index=warn"
    }
}
