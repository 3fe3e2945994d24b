//! Logging for the `studymate` binary.
//!
//! Log lines go to stderr so `--json` output on stdout stays parseable.
//! The filter comes from `RUST_LOG` when set, otherwise from the CLI's
//! verbosity flags via [`verbosity_filter`]. With `--otel`, spans (chat
//! completions, study requests) are also exported through OpenTelemetry's
//! stdout exporter.
//!
//! ```no_run
//! use studymate_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};
//!
//! init_tracing(verbosity_filter(false, 1), false)?;
//! // ... run the command ...
//! shutdown_tracing();
//! # Ok::<(), studymate_observe::tracing_setup::TracingError>(())
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Instrumentation scope name reported on exported spans.
const TRACER_NAME: &str = "studymate";

/// Set only when span export is enabled.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Default filter for the CLI's `--quiet` / `-v` flags.
///
/// `--quiet` keeps errors only; each `-v` widens the filter.
pub fn verbosity_filter(quiet: bool, verbose: u8) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,studymate=debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `default_filter` applies only when `RUST_LOG` is unset or unparsable.
pub fn init_tracing(default_filter: &str, enable_otel: bool) -> Result<(), TracingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let otel_layer = enable_otel.then(|| {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer(TRACER_NAME);
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;
    Ok(())
}

/// Flush buffered spans. Does nothing unless span export was enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: span exporter shutdown failed: {e}");
        }
    }
}
