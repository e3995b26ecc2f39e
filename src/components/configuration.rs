use std::collections::HashMap;

use clap::Parser;
use config::{ConfigError, File};
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Host
    #[clap(long, value_parser)]
    host: Option<String>,

    /// Port to expose the server
    #[clap(short, long, value_parser)]
    port: Option<u16>,

    /// Storage backend: `memory` or `postgres`
    #[clap(short, long, value_parser)]
    storage: Option<String>,

    /// JSON file used to seed the in-memory store
    #[clap(long, value_parser)]
    seed_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Storage {
    pub backend: StorageBackend,
    pub seed_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Database {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Identity {
    /// Base URL of the identity provider resolving bearer tokens. Empty means
    /// only `static_tokens` are accepted.
    pub url: String,
    #[serde(default)]
    pub static_tokens: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: Server,
    pub storage: Storage,
    pub db: Database,
    pub identity: Identity,
    pub env: String, // prd / stg / dev
    pub wkc_metrics_bearer_token: String,
}

const IDENTITY_URL_ENV: &str = "IDENTITY_URL";
const ENV_VAR: &str = "ENV";
const METRICS_TOKEN: &str = "WKC_METRICS_BEARER_TOKEN";
const DB_HOST: &str = "DB_HOST";
const DB_USER: &str = "DB_USER";
const DB_PWD: &str = "DB_PASSWORD";
const DB_NAME: &str = "DB_NAME";
const STORAGE_BACKEND: &str = "STORAGE_BACKEND";
// Keys containing `_` can't go through the `_`-separated environment source.
const SEED_PATH_ENV: &str = "STORAGE_SEED_PATH";
const STATIC_TOKENS_ENV: &str = "IDENTITY_STATIC_TOKENS";

/// Parses `token=user_id` pairs separated by commas. Malformed pairs are skipped.
fn parse_static_tokens(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (token, user_id) = pair.split_once('=')?;
            let (token, user_id) = (token.trim(), user_id.trim());
            (!token.is_empty() && !user_id.is_empty())
                .then(|| (token.to_string(), user_id.to_string()))
        })
        .collect()
}

impl Config {
    /// Reads `configuration.toml`, the environment and the command line, in
    /// increasing order of precedence.
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        log::debug!("Args: {:#?}", args);

        Self::from_args(args)
    }

    /// Same as [`Config::new`] without parsing the process arguments. Used by tests.
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::from_args(Args::default())
    }

    fn from_args(args: Args) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                config::Environment::default()
                    .with_list_parse_key(IDENTITY_URL_ENV)
                    .with_list_parse_key(DB_HOST)
                    .with_list_parse_key(DB_USER)
                    .with_list_parse_key(DB_PWD)
                    .with_list_parse_key(DB_NAME)
                    .with_list_parse_key(STORAGE_BACKEND)
                    .try_parsing(true)
                    .separator("_"),
            )
            .add_source(
                config::Environment::default()
                    .with_list_parse_key(METRICS_TOKEN)
                    .with_list_parse_key(ENV_VAR)
                    .try_parsing(true),
            )
            .set_override_option("server.host", args.host)?
            .set_override_option("server.port", args.port)?
            .set_override_option("storage.backend", args.storage)?
            .set_override_option(
                "storage.seed_path",
                args.seed_path.or_else(|| std::env::var(SEED_PATH_ENV).ok()),
            )?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("storage.backend", "memory")?
            .set_default("identity.url", "")?
            .set_default("env", "dev")?
            .set_default("wkc_metrics_bearer_token", "")?
            .set_default("db.host", "0.0.0.0:5432")? // docker-compose -> local env
            .set_default("db.user", "postgres")? // docker-compose -> local env
            .set_default("db.password", "postgres")? // docker-compose -> local env
            .set_default("db.name", "friends_service")? // docker-compose -> local env
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        if let Ok(raw) = std::env::var(STATIC_TOKENS_ENV) {
            config
                .identity
                .static_tokens
                .extend(parse_static_tokens(&raw));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static_tokens() {
        let tokens = parse_static_tokens("t1=alice, t2 = bob,broken,=nobody,t3=");

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.get("t1").map(String::as_str), Some("alice"));
        assert_eq!(tokens.get("t2").map(String::as_str), Some("bob"));
    }

    #[test]
    #[serial_test::serial]
    fn test_seed_path_and_static_tokens_from_env() {
        std::env::set_var(SEED_PATH_ENV, "demos/seed.json");
        std::env::set_var(STATIC_TOKENS_ENV, "env-token=carol");

        let config = Config::from_defaults();

        std::env::remove_var(SEED_PATH_ENV);
        std::env::remove_var(STATIC_TOKENS_ENV);

        let config = config.unwrap();
        assert_eq!(config.storage.seed_path.as_deref(), Some("demos/seed.json"));
        assert_eq!(
            config.identity.static_tokens.get("env-token").map(String::as_str),
            Some("carol")
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_defaults() {
        let config = Config::from_defaults().unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.db.name, "friends_service");
        assert_eq!(config.env, "dev");
    }
}
