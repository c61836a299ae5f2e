//! Logging setup for the relief tools.
//!
//! Console output goes through a `tracing_subscriber` fmt layer timed from
//! process start. Debug builds can also write a JSON log next to the config.
//! `RUST_LOG` takes precedence over the configured level.

use std::fs::File;
use std::path::Path;

use relief_config::Config;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LEVEL: &str = "info";

/// Dependency targets capped at `warn` unless the filter names them itself.
pub const QUIET_TARGETS: [&str; 2] = ["png", "rayon_core"];

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE: &str = "relief.log";

/// Install the global tracing subscriber.
///
/// `log_dir` is only used when `debug_build` is set; if the file cannot be
/// created, console logging still starts. Calling this twice in one process
/// panics, like any `SubscriberInitExt::init`.
///
/// ```no_run
/// use relief_config::Config;
/// use relief_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let base = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| filter_directive(config));

    let file_layer = log_dir
        .filter(|_| debug_build)
        .and_then(open_log_file)
        .map(|file| {
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_timer(fmt::time::uptime())
                .json()
        });

    tracing_subscriber::registry()
        .with(build_filter(&base))
        .with(
            fmt::layer()
                .with_thread_names(true)
                .with_timer(fmt::time::uptime()),
        )
        .with(file_layer)
        .init();
}

/// The level string taken from `config`, or [`DEFAULT_LEVEL`] when unset.
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_LEVEL.to_string(),
    }
}

/// Parse `base` and cap every [`QUIET_TARGETS`] entry it does not mention.
///
/// Unparseable directives in `base` are skipped rather than rejected.
pub fn build_filter(base: &str) -> EnvFilter {
    QUIET_TARGETS
        .iter()
        .filter(|target| !names_target(base, target))
        .filter_map(|target| format!("{target}=warn").parse::<Directive>().ok())
        .fold(EnvFilter::new(base), EnvFilter::add_directive)
}

fn names_target(base: &str, target: &str) -> bool {
    base.split(',')
        .any(|d| d.trim().split(['=', '[']).next() == Some(target))
}

fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,relief_distance=trace".to_string();
        assert_eq!(
            filter_directive(Some(&config)),
            "debug,relief_distance=trace"
        );
    }

    #[test]
    fn test_filter_directive_falls_back() {
        assert_eq!(filter_directive(None), DEFAULT_LEVEL);

        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_LEVEL);
    }

    #[test]
    fn test_build_filter_quiets_dependencies() {
        let filter = build_filter("debug").to_string();
        assert!(filter.contains("debug"));
        assert!(filter.contains("png=warn"));
        assert!(filter.contains("rayon_core=warn"));
    }

    #[test]
    fn test_build_filter_keeps_explicit_dependency_level() {
        let filter = build_filter("info,png=trace").to_string();
        assert!(filter.contains("png=trace"));
        assert!(!filter.contains("png=warn"));
        assert!(filter.contains("rayon_core=warn"));
    }

    #[test]
    fn test_names_target() {
        assert!(names_target("info, png=debug", "png"));
        assert!(names_target("rayon_core[span]=trace", "rayon_core"));
        assert!(!names_target("info,pngx=debug", "png"));
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");
        assert!(open_log_file(&nested).is_some());
        assert!(nested.join(LOG_FILE).exists());
    }
}
