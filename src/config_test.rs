use super::*;

fn parse(args: &[&str]) -> ServiceConfig {
    let mut argv = vec!["boundary"];
    argv.extend_from_slice(args);
    ServiceConfig::try_parse_from(argv).expect("valid arguments")
}

mod runtime_mode {
    use super::*;

    #[test]
    fn when_environment_development_should_expose_detail() {
        // Arrange & Act
        let mode = RuntimeMode::from_environment("development");

        // Assert
        assert_eq!(mode, RuntimeMode::Development);
        assert!(mode.exposes_error_detail());
    }

    #[test]
    fn when_environment_differs_should_redact_detail() {
        // Arrange & Act & Assert
        for name in ["production", "staging", "Development", ""] {
            let mode = RuntimeMode::from_environment(name);
            assert_eq!(mode, RuntimeMode::Production, "{name:?}");
            assert!(!mode.exposes_error_detail());
        }
    }
}

mod parse {
    use super::*;

    #[test]
    fn when_flags_given_should_populate_config() {
        // Arrange & Act
        let config = parse(&[
            "--port",
            "8081",
            "--host",
            "127.0.0.1",
            "--environment",
            "development",
            "--allowed-origin",
            "https://a.test,https://b.test",
            "--allowed-origin",
            "https://c.test",
            "--credentials",
            "always",
            "--body-limit",
            "2048",
            "--log-format",
            "json",
        ]);

        // Assert
        assert_eq!(config.port, Some(8081));
        assert_eq!(config.bind_addr(), "127.0.0.1:8081".parse().unwrap());
        assert_eq!(config.runtime_mode(), RuntimeMode::Development);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.test", "https://b.test", "https://c.test"]
        );
        assert_eq!(config.credentials, CredentialsMode::Always);
        assert_eq!(config.body_limit, 2048);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn when_credentials_unknown_should_fail() {
        // Arrange & Act
        let result = ServiceConfig::try_parse_from(["boundary", "--credentials", "sometimes"]);

        // Assert
        assert!(result.is_err());
    }
}

mod defaults {
    use super::*;

    #[test]
    fn when_default_should_bind_default_port_in_production() {
        // Arrange & Act
        let config = ServiceConfig::default();

        // Assert
        assert_eq!(config.bind_addr().port(), DEFAULT_PORT);
        assert_eq!(config.runtime_mode(), RuntimeMode::Production);
        assert_eq!(config.diagnostics().port_label(), "not set");
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);
    }
}

mod allowed_origins {
    use super::*;

    #[test]
    fn when_no_override_should_use_default_set() {
        // Arrange
        let config = ServiceConfig::default();

        // Act
        let origins = config.allowed_origins().expect("valid origins");

        // Assert
        assert_eq!(origins, *DEFAULT_ALLOWED_ORIGINS);
    }

    #[test]
    fn when_override_has_blank_entries_should_skip_them() {
        // Arrange
        let config = ServiceConfig {
            allowed_origins: vec![" https://a.test ".into(), "".into()],
            ..ServiceConfig::default()
        };

        // Act
        let origins = config.allowed_origins().expect("valid origins");

        // Assert
        assert_eq!(origins.iter().collect::<Vec<_>>(), vec!["https://a.test"]);
    }

    #[test]
    fn when_override_contains_wildcard_should_fail() {
        // Arrange
        let config = ServiceConfig {
            allowed_origins: vec!["*".into()],
            ..ServiceConfig::default()
        };

        // Act
        let result = config.cors_options();

        // Assert
        assert!(matches!(
            result,
            Err(ValidationError::Origin(crate::origin::OriginError::Wildcard))
        ));
    }
}
