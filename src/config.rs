use std::env;
use std::fmt;

/// Which persistence backend serves the user collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDB,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDB),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                key: "USER_STORE",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub store: StoreBackend,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Reads the process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port_raw = lookup("PORT").unwrap_or_else(|| "3030".to_string());
        let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "PORT",
            value: port_raw.clone(),
        })?;

        let store = match lookup("USER_STORE") {
            Some(raw) => StoreBackend::parse(&raw)?,
            None => StoreBackend::MongoDB,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: lookup("MONGODB_DATABASE").unwrap_or_else(|| "users".to_string()),
            store,
            cors_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3030");
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "users");
        assert_eq!(config.store, StoreBackend::MongoDB);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000".to_string()]);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("PORT", "8081"),
            ("USER_STORE", "Memory"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ])
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "http://b.test");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_with(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT: 'eighty'");
    }

    #[test]
    fn test_unknown_store_is_rejected() {
        assert!(config_with(&[("USER_STORE", "postgres")]).is_err());
    }
}
