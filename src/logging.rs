//! Structured logging initialization for the storeart CLI.
//!
//! Library code only emits `tracing` events; this module installs the
//! subscriber that prints them. Logs go to stderr so stdout stays clean for
//! `build --json`.

use std::io::{self, IsTerminal};

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Filter directive for a verbosity level.
///
/// 0 = warnings (fallbacks such as a missing font), 1 = info, 2 = debug,
/// 3+ = trace. `quiet` wins over any verbosity.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "storeart=error";
    }
    match verbose {
        0 => "storeart=warn",
        1 => "storeart=info",
        2 => "storeart=debug",
        _ => "storeart=trace",
    }
}

/// Initialize the tracing subscriber based on CLI flags and environment.
///
/// `RUST_LOG` overrides the verbosity flags when set. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let registry = tracing_subscriber::registry().with(filter);

    if io::stderr().is_terminal() {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);

        let _ = registry.with(fmt_layer).try_init();
    } else {
        // Piped or redirected
        let fmt_layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .compact()
            .with_writer(io::stderr);

        let _ = registry.with(fmt_layer).try_init();
    }
}
