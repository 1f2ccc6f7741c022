//! Process configuration, read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `JWT_SECRET` | insecure dev value | HS256 secret for bearer tokens |
//! | `USE_PERSISTENT_STORES` | `false` | use Postgres instead of the in-memory store |
//! | `DATABASE_URL` | unset | required when persistent |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | pool size |
//! | `LOGIN_URL` | unset | redirect target for unauthenticated requests (401 when unset) |

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),
}

/// Which product store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub store: StoreConfig,
    pub login_url: Option<String>,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let store = match &self.store {
            StoreConfig::InMemory => "in-memory".to_string(),
            StoreConfig::Postgres { max_connections, .. } => {
                format!("postgres (max_connections={max_connections})")
            }
        };
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"[REDACTED]")
            .field("store", &store)
            .field("login_url", &self.login_url)
            .finish()
    }
}

impl AppConfig {
    /// In-memory configuration with the given secret (dev/test wiring).
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080))),
            jwt_secret: jwt_secret.into(),
            store: StoreConfig::InMemory,
            login_url: None,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup` (blank values count as unset).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let use_persistent = match get("USE_PERSISTENT_STORES") {
            Some(v) => v.parse::<bool>().map_err(|e| ConfigError::Invalid {
                var: "USE_PERSISTENT_STORES",
                reason: e.to_string(),
            })?,
            None => false,
        };

        let store = if use_persistent {
            let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                Some(v) => v
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ConfigError::Invalid {
                        var: "DATABASE_MAX_CONNECTIONS",
                        reason: format!("expected a positive integer, got '{v}'"),
                    })?,
                None => DEFAULT_MAX_CONNECTIONS,
            };
            StoreConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StoreConfig::InMemory
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            store,
            login_url: get("LOGIN_URL"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_to_in_memory_store() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.store, StoreConfig::InMemory);
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(cfg.login_url, None);
    }

    #[test]
    fn persistent_store_requires_database_url() {
        assert_eq!(
            load(&[("USE_PERSISTENT_STORES", "true")]).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );

        let cfg = load(&[
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://localhost/stock"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(
            cfg.store,
            StoreConfig::Postgres {
                database_url: "postgres://localhost/stock".to_string(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            load(&[("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { var: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            load(&[("USE_PERSISTENT_STORES", "yes")]),
            Err(ConfigError::Invalid { var: "USE_PERSISTENT_STORES", .. })
        ));
        assert!(matches!(
            load(&[
                ("USE_PERSISTENT_STORES", "true"),
                ("DATABASE_URL", "postgres://x"),
                ("DATABASE_MAX_CONNECTIONS", "0"),
            ]),
            Err(ConfigError::Invalid { var: "DATABASE_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = load(&[("LOGIN_URL", "  "), ("JWT_SECRET", "s")]).unwrap();
        assert_eq!(cfg.login_url, None);
        assert_eq!(cfg.jwt_secret, "s");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = load(&[
            ("JWT_SECRET", "top-secret"),
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://user:pw@db/stock"),
        ])
        .unwrap();
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("top-secret"));
        assert!(!printed.contains("pw@db"));
    }
}
