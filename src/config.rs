use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

// Bitcoin network the provider serves; selects the default Esplora endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Signet,
}

impl Network {
    pub fn default_esplora_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://blockstream.info/api",
            Network::Testnet => "https://blockstream.info/testnet/api",
            Network::Signet => "https://mempool.space/signet/api",
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "signet" => Ok(Network::Signet),
            other => Err(format!("unknown network {other}")),
        }
    }
}

// Configuration for the request lookup service
#[derive(Debug, Clone)]
pub struct Config {
    pub network: Network,
    pub esplora_url: String, // Base URL of the Esplora-compatible REST API
    pub bind_addr: String, // Address for the HTTP server
    pub max_concurrent_fetches: usize, // Upper bound on in-flight tx hex requests per lookup
    pub request_timeout: Duration, // Per HTTP request deadline
    pub max_retry_elapsed: Duration, // Backoff budget for transient provider failures
}

impl Default for Config {
    fn default() -> Self {
        Config {
            network: Network::Mainnet,
            esplora_url: Network::Mainnet.default_esplora_url().to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            max_concurrent_fetches: 8,
            request_timeout: Duration::from_secs(30),
            max_retry_elapsed: Duration::from_secs(60),
        }
    }
}

impl Config {
    // Loads configuration from the process environment (after .env), with defaults for every field
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    // Builds a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let network: Network = parse_var(&lookup, "NETWORK")?.unwrap_or(defaults.network);
        let esplora_url = lookup("ESPLORA_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| network.default_esplora_url().to_string());

        let max_concurrent_fetches = parse_var(&lookup, "MAX_CONCURRENT_FETCHES")?
            .unwrap_or(defaults.max_concurrent_fetches);
        if max_concurrent_fetches == 0 {
            return Err(ConfigError::Invalid {
                name: "MAX_CONCURRENT_FETCHES",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            network,
            esplora_url: esplora_url.trim_end_matches('/').to_string(),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_concurrent_fetches,
            request_timeout: parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_retry_elapsed: parse_var(&lookup, "MAX_RETRY_ELAPSED_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_retry_elapsed),
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                name,
                value: value.clone(),
                reason: e.to_string(),
            }),
    }
}
