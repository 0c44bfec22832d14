//! Static allow-lists shipped with the client: admin wallets, whitelisted
//! validators and the stakeable tokens of each network.

use crate::config::Network;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Wallets shown the admin views unless `admin_wallets` is configured.
pub const DEFAULT_ADMIN_WALLETS: &[&str] = &["2gNjSWyf4WoPjM6QRTRnStaQUHC3yEoo8reW1KgLNViC"];

pub const UNKNOWN_VALIDATOR_NAME: &str = "Anonymous";
pub const DEFAULT_VALIDATOR_COLOR: &str = "#FFFFFF";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WhitelistedValidator {
    pub name: &'static str,
    pub vote_account: &'static str,
    pub color: &'static str,
}

pub const WHITELISTED_VALIDATORS: &[WhitelistedValidator] = &[
    WhitelistedValidator {
        name: "Orangefin Ventures",
        vote_account: "oRAnGeU5h8h2UkvbfnE5cjXnnAa4rBoaxmS4kbFymSe",
        color: "#006666",
    },
    WhitelistedValidator {
        name: "DimAn",
        vote_account: "voteRnv6PBzmiGP8NicWtQiqEJTwKKq2SxtqtdLUJjd",
        color: "#40bf7b",
    },
    WhitelistedValidator {
        name: "L0vd 0% fee +MEV",
        vote_account: "A7uqmajxP3NdzbYDXiGQRGTL8d3dZ5pjS4kR9NTZcxtg",
        color: "#5e20e5",
    },
];

/// Display name and colour of a validator, joined on the vote account string.
pub fn validator_label(vote_account: &Pubkey) -> (&'static str, &'static str) {
    let key = vote_account.to_string();
    WHITELISTED_VALIDATORS
        .iter()
        .find(|v| v.vote_account == key)
        .map(|v| (v.name, v.color))
        .unwrap_or((UNKNOWN_VALIDATOR_NAME, DEFAULT_VALIDATOR_COLOR))
}

/// A token that can be converted to its JWL counterpart and staked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisteredToken {
    /// Route id, as in `/stake/hades`.
    pub id: &'static str,
    pub symbol: &'static str,
    mainnet_mint: &'static str,
    testnet_mint: &'static str,
}

pub const REGISTERED_TOKENS: &[RegisteredToken] = &[RegisteredToken {
    id: "hades",
    symbol: "HADES",
    mainnet_mint: "BWXrrYFhT7bMHmNBFoQFWdsSgA3yXoAnMhDK6Fn1eSEn",
    testnet_mint: "AkeMXdPXeGNNLKFsk6Pc9AwfJUsZzrLK1YTBqJpomEiB",
}];

/// Token served when a route names no token or an unknown one.
pub const DEFAULT_TOKEN_ID: &str = "hades";

impl RegisteredToken {
    pub fn mint(&self, network: Network) -> Pubkey {
        let mint = match network {
            Network::Mainnet => self.mainnet_mint,
            Network::Testnet => self.testnet_mint,
        };
        // registry entries are compile-time constants covered by tests
        Pubkey::from_str(mint).unwrap_or_default()
    }

    /// Symbol of the liquid counterpart minted by the token staking program.
    pub fn jwl_symbol(&self) -> String {
        format!("{}{}", jewelswap_token_staking::JWLTOKEN_PREFIX, self.symbol)
    }
}

pub fn find_token(id: &str) -> Option<&'static RegisteredToken> {
    REGISTERED_TOKENS
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(id))
}

/// Reverse lookup used when labelling a mint read from chain.
pub fn find_token_by_mint(mint: &Pubkey, network: Network) -> Option<&'static RegisteredToken> {
    REGISTERED_TOKENS.iter().find(|t| t.mint(network) == *mint)
}

pub fn default_admin_wallets() -> Vec<Pubkey> {
    DEFAULT_ADMIN_WALLETS
        .iter()
        .filter_map(|s| Pubkey::from_str(s).ok())
        .collect()
}
