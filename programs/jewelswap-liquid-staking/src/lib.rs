//! Client-side interface of the JewelSwap liquid staking program.
//!
//! The program itself is deployed separately; this crate only mirrors its
//! account layouts, PDA seeds, instruction encodings and error codes so that a
//! client can derive addresses, decode accounts and build instructions that the
//! deployed program accepts.

pub mod accounts;
pub mod error;
pub mod instruction;
pub mod states;

pub const GLOBAL_STATE_SEED: &str = "global-state";
pub const RESERVE_VAULT_SEED: &str = "reserve-vault";
pub const USER_INFO_SEED: &str = "user-info-pda";
pub const VALIDATOR_SEED: &str = "validator";
pub const USER_TO_VALIDATOR_SEED: &str = "user-to-validator";

/// Smallest SOL deposit accepted by the program, in whole SOL.
pub const MIN_DEPOSIT_AMOUNT: f64 = 0.01;

/// SOL kept back from a "max" deposit to pay for fees and account rent.
pub const MAX_FEE_TO_DEPOSIT: f64 = 0.014;

/// Seconds a user must wait before voting for the same validator again.
pub const VOTE_COOLDOWN: i64 = 10 * 86_400;

/// Number of chain epochs a reserved redemption stays bonded.
pub const UNBONDING_PERIOD: u64 = 5;

/// Unix time at which the program started accruing rewards.
pub const CONTRACT_DEPLOYED_AT: i64 = 1_708_214_181;

/// Capacity of the stake-account list held by each validator store.
pub const MAX_VALIDATOR_STAKE_ACCOUNTS: usize = 100;
