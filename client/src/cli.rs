use clap::Parser;
use solana_sdk::pubkey::Pubkey;

use crate::actions::ActionRequest;
use crate::config::DEFAULT_CONFIG_PATH;
use crate::registry::DEFAULT_TOKEN_ID;

#[derive(Debug, Parser)]
#[clap(name = "whalehub", version, about = "WhaleHub staking client")]
pub struct Opts {
    /// Path of the INI configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
    /// Show the views for this wallet instead of the configured keypair.
    #[arg(long)]
    pub wallet: Option<Pubkey>,
    #[arg(
        long,
        default_value = "display",
        value_parser = ["display", "json", "json-compact", "quiet", "verbose"]
    )]
    pub output: String,
    #[clap(subcommand)]
    pub command: WhalehubCommands,
}

#[derive(Debug, Parser)]
pub enum WhalehubCommands {
    /// SOL liquid staking view.
    Liquid,
    /// Token staking view of a registered token.
    Token {
        #[arg(long, default_value = DEFAULT_TOKEN_ID)]
        token: String,
    },
    /// Validator gauge view.
    Gauge,
    /// Protocol bookkeeping, for admin wallets.
    Admin,
    /// Opens a page by path, e.g. `/stake/hades` or `/gauge`.
    Open { path: String },
    /// Opens a page and keeps its time-dependent figures current.
    Watch {
        #[arg(default_value = "/")]
        path: String,
    },
    Deposit {
        #[arg(long)]
        amount: f64,
    },
    ReserveRedeem {
        #[arg(long)]
        amount: f64,
    },
    StakeJwlsol {
        #[arg(long)]
        amount: f64,
    },
    UnstakeSjwlsol {
        #[arg(long)]
        amount: f64,
    },
    Vote {
        #[arg(long)]
        vote_account: Option<Pubkey>,
        /// Percent of the voting power to put on the validator.
        #[arg(long)]
        weight: f64,
    },
    Convert {
        #[arg(long, default_value = DEFAULT_TOKEN_ID)]
        token: String,
        #[arg(long)]
        amount: f64,
        /// Stake the converted JWLTOKEN right away.
        #[arg(long)]
        stake: bool,
    },
    StakeJwltoken {
        #[arg(long, default_value = DEFAULT_TOKEN_ID)]
        token: String,
        #[arg(long)]
        amount: f64,
    },
    UnstakeJwltoken {
        #[arg(long, default_value = DEFAULT_TOKEN_ID)]
        token: String,
        #[arg(long)]
        amount: f64,
    },
    ClaimRewards {
        #[arg(long, default_value = DEFAULT_TOKEN_ID)]
        token: String,
    },
    AddValidator {
        #[arg(long)]
        vote_account: Option<Pubkey>,
    },
    RemoveValidator {
        #[arg(long)]
        vote_account: Option<Pubkey>,
    },
    Fund {
        #[arg(long)]
        amount: f64,
    },
    ReserveClaim {
        #[arg(long)]
        amount: f64,
    },
    ClaimSol {
        #[arg(long)]
        amount: f64,
    },
    RegisterToken {
        #[arg(long)]
        token_mint: Option<Pubkey>,
        #[arg(long, default_value = "")]
        symbol: String,
        #[arg(long, default_value = "")]
        uri: String,
        #[arg(long, default_value_t = 50)]
        staking_percentage: u64,
    },
}

/// Which view an action validates against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionView {
    Liquid,
    Token(String),
    Gauge,
    None,
}

impl WhalehubCommands {
    /// The action a command requests, with the view it needs loaded first.
    /// `None` for the read-only commands.
    pub fn action(&self) -> Option<(ActionRequest, ActionView)> {
        let token = |token: &String| ActionView::Token(token.clone());
        let action = match self {
            WhalehubCommands::Liquid
            | WhalehubCommands::Token { .. }
            | WhalehubCommands::Gauge
            | WhalehubCommands::Admin
            | WhalehubCommands::Open { .. }
            | WhalehubCommands::Watch { .. } => return None,
            WhalehubCommands::Deposit { amount } => {
                (ActionRequest::Deposit { amount: *amount }, ActionView::Liquid)
            }
            WhalehubCommands::ReserveRedeem { amount } => {
                (ActionRequest::ReserveRedeem { amount: *amount }, ActionView::Liquid)
            }
            WhalehubCommands::StakeJwlsol { amount } => {
                (ActionRequest::StakeJwlsol { amount: *amount }, ActionView::Liquid)
            }
            WhalehubCommands::UnstakeSjwlsol { amount } => {
                (ActionRequest::UnstakeSjwlsol { amount: *amount }, ActionView::Liquid)
            }
            WhalehubCommands::Vote {
                vote_account,
                weight,
            } => (
                ActionRequest::Vote {
                    vote_account: *vote_account,
                    weight: *weight,
                },
                ActionView::Gauge,
            ),
            WhalehubCommands::Convert {
                token: id,
                amount,
                stake,
            } => (
                ActionRequest::Convert {
                    amount: *amount,
                    is_staking: *stake,
                },
                token(id),
            ),
            WhalehubCommands::StakeJwltoken { token: id, amount } => {
                (ActionRequest::StakeJwltoken { amount: *amount }, token(id))
            }
            WhalehubCommands::UnstakeJwltoken { token: id, amount } => {
                (ActionRequest::UnstakeJwltoken { amount: *amount }, token(id))
            }
            WhalehubCommands::ClaimRewards { token: id } => (ActionRequest::ClaimRewards, token(id)),
            WhalehubCommands::AddValidator { vote_account } => (
                ActionRequest::AddValidator {
                    vote_account: *vote_account,
                },
                ActionView::Gauge,
            ),
            WhalehubCommands::RemoveValidator { vote_account } => (
                ActionRequest::RemoveValidator {
                    vote_account: *vote_account,
                },
                ActionView::Gauge,
            ),
            WhalehubCommands::Fund { amount } => {
                (ActionRequest::Fund { amount: *amount }, ActionView::Liquid)
            }
            WhalehubCommands::ReserveClaim { amount } => {
                (ActionRequest::ReserveClaim { amount: *amount }, ActionView::Liquid)
            }
            WhalehubCommands::ClaimSol { amount } => {
                (ActionRequest::ClaimSol { amount: *amount }, ActionView::Liquid)
            }
            WhalehubCommands::RegisterToken {
                token_mint,
                symbol,
                uri,
                staking_percentage,
            } => (
                ActionRequest::RegisterToken {
                    token_mint: *token_mint,
                    symbol: symbol.clone(),
                    metadata_uri: uri.clone(),
                    staking_percentage: *staking_percentage,
                },
                ActionView::None,
            ),
        };
        Some(action)
    }
}
