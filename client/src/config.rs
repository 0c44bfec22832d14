use anchor_client::Cluster;
use configparser::ini::Ini;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::str::FromStr;
use thiserror::Error;

use crate::registry::default_admin_wallets;

pub const DEFAULT_CONFIG_PATH: &str = "client_config.ini";
pub const NETWORK_ENV: &str = "WHALEHUB_NETWORK";
pub const RPC_URL_ENV: &str = "WHALEHUB_RPC_URL";

const SECTION: &str = "Global";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// `mainnet` selects the mainnet registry, anything else the testnet one.
    pub fn from_selector(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("mainnet") {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WHALEHUB_NETWORK must be set")]
    MissingNetwork,
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("{0} must not be empty")]
    MissingKey(&'static str),
    #[error("{key} is not a valid pubkey: {value}")]
    InvalidPubkey { key: &'static str, value: String },
    #[error("unknown commitment level: {0}")]
    InvalidCommitment(String),
}

/// Values read from the environment before the config file is consulted.
#[derive(Clone, Debug, Default)]
pub struct EnvOverrides {
    pub network: Option<String>,
    pub rpc_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            network: non_empty(NETWORK_ENV),
            rpc_url: non_empty(RPC_URL_ENV),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub network: Network,
    pub http_url: String,
    pub payer_path: Option<String>,
    pub liquid_staking_program: Pubkey,
    pub token_staking_program: Pubkey,
    pub admin_wallets: Vec<Pubkey>,
    pub commitment: CommitmentConfig,
}

pub fn load_cfg(client_config: &str, env: &EnvOverrides) -> Result<ClientConfig, ConfigError> {
    let network = env
        .network
        .as_deref()
        .map(Network::from_selector)
        .ok_or(ConfigError::MissingNetwork)?;

    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|reason| ConfigError::Load {
            path: client_config.to_string(),
            reason,
        })?;
    let get = |key: &str| config.get(SECTION, key).filter(|v| !v.trim().is_empty());

    let http_url = env
        .rpc_url
        .clone()
        .or_else(|| get("http_url"))
        .unwrap_or_else(|| Cluster::Devnet.url().to_string());

    let liquid_staking_program = parse_pubkey_key(get("liquid_staking_program"), "liquid_staking_program")?;
    let token_staking_program = parse_pubkey_key(get("token_staking_program"), "token_staking_program")?;

    let admin_wallets = match get("admin_wallets") {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pubkey::from_str(s).map_err(|_| ConfigError::InvalidPubkey {
                    key: "admin_wallets",
                    value: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => default_admin_wallets(),
    };

    let commitment = match get("commitment") {
        Some(level) => CommitmentConfig::from_str(level.trim())
            .map_err(|_| ConfigError::InvalidCommitment(level))?,
        None => CommitmentConfig::confirmed(),
    };

    Ok(ClientConfig {
        network,
        http_url,
        payer_path: get("payer_path"),
        liquid_staking_program,
        token_staking_program,
        admin_wallets,
        commitment,
    })
}

fn parse_pubkey_key(value: Option<String>, key: &'static str) -> Result<Pubkey, ConfigError> {
    let value = value.ok_or(ConfigError::MissingKey(key))?;
    Pubkey::from_str(value.trim()).map_err(|_| ConfigError::InvalidPubkey { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LIQUID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
    const TOKEN: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    fn env(network: Option<&str>, rpc_url: Option<&str>) -> EnvOverrides {
        EnvOverrides {
            network: network.map(str::to_string),
            rpc_url: rpc_url.map(str::to_string),
        }
    }

    fn minimal() -> String {
        format!(
            "[Global]\nliquid_staking_program = {}\ntoken_staking_program = {}\n",
            LIQUID, TOKEN
        )
    }

    #[test]
    fn network_variable_is_required() {
        let file = write_config(&minimal());
        let err = load_cfg(file.path().to_str().unwrap(), &env(None, None)).unwrap_err();
        assert_eq!(err, ConfigError::MissingNetwork);
    }

    #[test]
    fn defaults_to_devnet_and_builtin_admins() {
        let file = write_config(&minimal());
        let cfg = load_cfg(file.path().to_str().unwrap(), &env(Some("testnet"), None)).unwrap();
        assert_eq!(cfg.network, Network::Testnet);
        assert_eq!(cfg.http_url, Cluster::Devnet.url());
        assert_eq!(cfg.admin_wallets, default_admin_wallets());
        assert_eq!(cfg.commitment, CommitmentConfig::confirmed());
        assert_eq!(cfg.payer_path, None);
        assert_eq!(cfg.liquid_staking_program, Pubkey::from_str(LIQUID).unwrap());
    }

    #[test]
    fn env_rpc_url_wins_over_file() {
        let body = format!("{}http_url = http://file:8899\n", minimal());
        let file = write_config(&body);
        let path = file.path().to_str().unwrap();

        let cfg = load_cfg(path, &env(Some("mainnet"), None)).unwrap();
        assert_eq!(cfg.http_url, "http://file:8899");
        assert_eq!(cfg.network, Network::Mainnet);

        let cfg = load_cfg(path, &env(Some("mainnet"), Some("http://env:8899"))).unwrap();
        assert_eq!(cfg.http_url, "http://env:8899");
    }

    #[test]
    fn malformed_keys_are_rejected() {
        let file = write_config("[Global]\nliquid_staking_program = not-a-key\n");
        let err = load_cfg(file.path().to_str().unwrap(), &env(Some("testnet"), None)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPubkey {
                key: "liquid_staking_program",
                ..
            }
        ));

        let file = write_config(&format!("[Global]\nliquid_staking_program = {}\n", LIQUID));
        let err = load_cfg(file.path().to_str().unwrap(), &env(Some("testnet"), None)).unwrap_err();
        assert_eq!(err, ConfigError::MissingKey("token_staking_program"));
    }

    #[test]
    fn admin_list_and_commitment_are_read() {
        let admin = Pubkey::new_unique();
        let body = format!(
            "{}admin_wallets = {}, \ncommitment = finalized\npayer_path = id.json\n",
            minimal(),
            admin
        );
        let file = write_config(&body);
        let cfg = load_cfg(file.path().to_str().unwrap(), &env(Some("testnet"), None)).unwrap();
        assert_eq!(cfg.admin_wallets, vec![admin]);
        assert_eq!(cfg.commitment, CommitmentConfig::finalized());
        assert_eq!(cfg.payer_path.as_deref(), Some("id.json"));
    }
}
