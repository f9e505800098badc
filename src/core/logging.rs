//! Diagnostic logging to stderr

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug`, `--quiet`
/// selects `error`, and everything else logs warnings only. Output goes to
/// stderr so it never mixes with links or summaries on stdout.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_level(verbose, quiet))
    });

    // A second init (as in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "onboard=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true, false), "onboard=debug");
        assert_eq!(default_level(true, true), "onboard=debug");
        assert_eq!(default_level(false, true), "error");
        assert_eq!(default_level(false, false), "warn");
    }
}
