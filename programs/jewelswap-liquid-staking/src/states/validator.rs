use anchor_lang::prelude::*;

use super::anchor_account;
use crate::MAX_VALIDATOR_STAKE_ACCOUNTS;

/// A whitelisted delegation target, keyed by `VALIDATOR_SEED + vote_account`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct Validator {
    pub vote_account: Pubkey,
    /// Keypair account listing the stake accounts delegated to this validator.
    pub validator_store: Pubkey,
    /// Votes accumulated for the running period.
    pub voting_score: u64,
    /// Score applied to the current delegation split.
    pub current_score: u64,
}

anchor_account!(Validator, [108, 40, 172, 51, 190, 198, 22, 15]);

impl Validator {
    pub const LEN: usize = 8 + 32 * 2 + 8 * 2;
}

/// Vote allocation of one user to one validator, keyed by
/// `USER_TO_VALIDATOR_SEED + user + validator`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct UserToValidator {
    pub voting_point: u64,
    /// Unix time of the last vote.
    pub last_voted_at: u64,
}

anchor_account!(UserToValidator, [28, 0, 196, 47, 226, 91, 21, 114]);

impl UserToValidator {
    pub const LEN: usize = 8 + 8 * 2;
}

/// Size of the keypair account that `add_validator` expects to be created
/// beforehand: discriminator, a `u32` count and the fixed stake-account array.
pub const VALIDATOR_STORE_LEN: usize = 8 + 4 + 32 * MAX_VALIDATOR_STAKE_ACCOUNTS;
