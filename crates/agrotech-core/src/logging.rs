//! Tracing bootstrap for host applications.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber with the given filter directive.
///
/// Returns `false` if the filter does not parse or a subscriber is already
/// installed; the host keeps running either way.
pub fn init_tracing(filter: &str) -> bool {
    let Some(filter) = build_filter(filter) else {
        return false;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Parse a filter directive such as `info` or `agrotech_core=debug`.
pub fn build_filter(directive: &str) -> Option<EnvFilter> {
    EnvFilter::try_new(directive).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // Whichever test installs first wins; the next attempt must not panic.
        let _ = init_tracing("warn");
        assert!(!init_tracing("warn"));
    }

    #[test]
    fn test_build_filter() {
        assert!(build_filter("info").is_some());
        assert!(build_filter("agrotech_core=debug,warn").is_some());
        assert!(build_filter("agrotech_core=loud").is_none());
    }
}
