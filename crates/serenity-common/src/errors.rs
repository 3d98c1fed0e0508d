use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("no platform config directory available")]
    NoConfigDir,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SerenityError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("model.top_p = 1.5 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: model.top_p = 1.5 is out of range"
        );
    }

    #[test]
    fn io_config_errors_name_the_path() {
        let err = ConfigError::Write {
            path: PathBuf::from("/etc/serenity/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write /etc/serenity/config.toml: denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn serenity_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: SerenityError = config_err.into();
        assert!(matches!(err, SerenityError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn serenity_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SerenityError = io_err.into();
        assert!(matches!(err, SerenityError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn serenity_error_other_variants() {
        let err = SerenityError::Backend("quota exceeded".into());
        assert_eq!(err.to_string(), "backend error: quota exceeded");

        let err = SerenityError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
