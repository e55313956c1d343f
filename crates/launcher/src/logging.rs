use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "eeg_launcher=info,experiments=info,eeg_sensor=info";
const VERBOSE_FILTER: &str = "eeg_launcher=debug,experiments=debug,eeg_sensor=debug";

/// Install the global subscriber. `RUST_LOG` wins over the `verbose` default.
///
/// Logs go to stderr so the interactive prompts on stdout stay readable.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
