//! Integration tests for config

#[cfg(test)]
mod tests {
    use lanekit_config::*;
    use lanekit_errors::{ConfigError, Error};
    use lanekit_types::{ColorChoice, OutputFormat};
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"
color = "never"

[endpoints]
pgyer = "http://localhost:8080"

[timeouts]
bugly = 60
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.endpoints.pgyer, "http://localhost:8080");
        assert_eq!(config.endpoints.bugly, "https://api.bugly.qq.com");
        assert_eq!(
            config.timeouts.for_action("bugly"),
            Some(Duration::from_secs(60))
        );
        assert_eq!(
            config.timeouts.for_action("pgyer"),
            Some(Duration::from_secs(120))
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Config::load_from_file(std::path::Path::new("/nonexistent/lanekit.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml("[timeouts]\nbugly = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("LANEKIT_OUTPUT", "json");
        std::env::set_var("LANEKIT_COLOR", "always");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorChoice::Always);

        // Clean up
        std::env::remove_var("LANEKIT_OUTPUT");
        std::env::remove_var("LANEKIT_COLOR");
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var("LANEKIT_OUTPUT", "invalid");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        // Clean up
        std::env::remove_var("LANEKIT_OUTPUT");
    }
}
