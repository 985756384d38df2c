use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub pos: PosConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosConfig {
    /// Tax as a decimal fraction applied to order subtotals.
    #[serde(default = "default_tax_rate", with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(default = "default_restaurant_name")]
    pub restaurant_name: String,
}

fn default_tax_rate() -> Decimal {
    Decimal::new(8, 2) // 0.08
}

fn default_restaurant_name() -> String {
    "Restaurant".to_string()
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            restaurant_name: default_restaurant_name(),
        }
    }
}

impl Config {
    /// Loads `config.toml` (path overridable via `CONFIG_PATH`), then applies
    /// environment-variable overrides. Without a config file the database URL
    /// must come from `DATABASE_URL`.
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse {config_path}: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is required when no config.toml is present")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        token_expires_in: get_env_parse("JWT_EXPIRES_IN", 43_200i64),
                    },
                    pos: PosConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment overrides win even when the file exists.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT") {
            if let Ok(p) = v.parse() {
                config.server.port = p;
            }
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS") {
            if let Ok(mc) = v.parse() {
                config.database.max_connections = mc;
            }
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRES_IN") {
            if let Ok(n) = v.parse() {
                config.jwt.token_expires_in = n;
            }
        }
        if let Ok(v) = env::var("POS_TAX_RATE") {
            if let Ok(rate) = v.parse::<Decimal>() {
                config.pos.tax_rate = rate;
            }
        }
        if let Ok(v) = env::var("POS_RESTAURANT_NAME") {
            config.pos.restaurant_name = v;
        }

        Ok(config)
    }
}
