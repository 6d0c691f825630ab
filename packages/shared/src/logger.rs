//! Logging setup utilities for the Kaiwa chat application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are enabled at the default level.
const WORKSPACE_TARGETS: [&str; 3] = ["kaiwa_server", "kaiwa_shared", "tower_http"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Binary names use dashes while tracing targets use underscores, so the
/// binary name is normalized before being added to the directive list.
pub fn default_directives(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");

    let mut targets: Vec<&str> = WORKSPACE_TARGETS.to_vec();
    if !targets.contains(&binary_target.as_str()) {
        targets.push(&binary_target);
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "kaiwa-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use kaiwa_shared::logger::setup_logger;
///
/// setup_logger("kaiwa-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_normalizes_binary_name() {
        // テスト項目: バイナリ名のダッシュがアンダースコアに変換され、重複しない
        // given (前提条件):
        let binary_name = "kaiwa-server";

        // when (操作):
        let directives = default_directives(binary_name, "info");

        // then (期待する結果):
        assert_eq!(
            directives,
            "kaiwa_server=info,kaiwa_shared=info,tower_http=info"
        );
    }

    #[test]
    fn test_default_directives_appends_unknown_binary() {
        // テスト項目: ワークスペース外のバイナリ名はターゲットとして追加される
        // given (前提条件):
        let binary_name = "load-tester";

        // when (操作):
        let directives = default_directives(binary_name, "debug");

        // then (期待する結果):
        assert!(directives.ends_with(",load_tester=debug"));
        assert!(directives.starts_with("kaiwa_server=debug"));
    }
}
