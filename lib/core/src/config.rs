use std::path::PathBuf;

/// Server configuration resolved from command-line arguments and the
/// environment.
///
/// The document store is optional: when neither `data_dir` nor `db_path`
/// is set, the service runs in demo mode (reads serve static payloads,
/// writes return 503).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the document database file.
    pub data_dir: Option<PathBuf>,

    /// Path to the document database file.
    /// Defaults to `{data_dir}/data.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: "0.0.0.0:8000".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Whether a document store location was configured at all.
    pub fn store_configured(&self) -> bool {
        self.data_dir.is_some() || self.db_path.is_some()
    }

    /// Resolve the database path, falling back to `{data_dir}/data.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("data.redb"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert!(config.store_configured());
        assert_eq!(config.resolve_db_path(), PathBuf::from("/data/data.redb"));
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            db_path: Some(PathBuf::from("/elsewhere/track.redb")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/elsewhere/track.redb"));
    }

    #[test]
    fn test_unconfigured() {
        let config = ServiceConfig::default();
        assert!(!config.store_configured());
        assert_eq!(config.listen, "0.0.0.0:8000");
    }
}
