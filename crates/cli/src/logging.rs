//! Log output for the command line
//!
//! Everything goes to stderr so stdout only carries results such as the
//! saved path or `--show-draft` JSON.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log filter from `RUST_LOG` directives, falling back to `debug` with
/// `--verbose` and `info` otherwise
fn filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives.unwrap_or_default())
}

pub fn init(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, directives.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_levels() {
        assert_eq!(filter(false, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter(false, Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_overrides_without_verbose() {
        assert_eq!(
            filter(false, Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            filter(true, Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
