//!
//! Console logger setup.
//!

use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::config;

/// Handle to the installed logging pipeline. Hold it for the lifetime of
/// the process.
#[derive(Debug)]
pub struct TelemetryGuard {
    _priv: (),
}

/// Install the global tracing subscriber described by `config`.
///
/// `crates_to_filter` lists the crates allowed to emit at the configured
/// level; everything else is capped at `warn`. An explicit
/// `filtering_directive` replaces the constructed filter entirely. Later
/// calls are no-ops once a subscriber is installed, so hosts and test
/// harnesses may call this unconditionally.
pub fn setup(
    config: &config::Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> TelemetryGuard {
    if config.console.enabled {
        let console_filter = get_envfilter(&config.console, crates_to_filter);
        let subscriber = tracing_subscriber::registry();

        match config.console.log_format {
            config::LogFormat::Default => {
                let logging_layer = fmt::layer().pretty().with_filter(console_filter);
                subscriber.with(logging_layer).try_init().ok();
            }
            config::LogFormat::Json => {
                let logging_layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_filter(console_filter);
                subscriber.with(logging_layer).try_init().ok();
            }
        }
        tracing::info!(service = service_name, "logger installed");
    }

    TelemetryGuard { _priv: () }
}

fn get_envfilter(
    console: &config::LogConsole,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> EnvFilter {
    if let Some(directive) = &console.filtering_directive {
        return EnvFilter::new(directive);
    }

    let level = console.level.into_level();
    let mut filter = EnvFilter::new(tracing::Level::WARN.to_string().to_lowercase());
    for krate in crates_to_filter.as_ref() {
        if let Ok(directive) = format!("{krate}={level}").parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}
