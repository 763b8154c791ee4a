//! Log output for the command line tool.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Directive, EnvFilter};

/// Our own crate at `level`, everything else at warn unless `RUST_LOG` says
/// otherwise.
pub fn filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy()
        .add_directive(
            format!("drone_partials={level}")
                .parse::<Directive>()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        )
}

/// Installs a compact stderr subscriber. Returns `false` when another
/// subscriber was already set, which leaves that one in place.
pub fn init(level: LevelFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_directive_uses_requested_level() {
        let rendered = filter(LevelFilter::DEBUG).to_string();
        assert!(rendered.contains("drone_partials=debug"), "{rendered}");
    }

    #[test]
    fn second_init_keeps_first_subscriber() {
        init(LevelFilter::INFO);
        assert!(!init(LevelFilter::DEBUG));
    }
}
