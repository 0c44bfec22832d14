//! Client-side interface of the JewelSwap token staking program.
//!
//! Registered tokens are converted 1:1 into a JWLTOKEN derivative that can be
//! staked for epoch rewards. This crate mirrors the program's account layouts,
//! seeds, instruction encodings and error codes; it holds no program logic.

use anchor_lang::prelude::*;

pub mod accounts;
pub mod error;
pub mod instruction;
pub mod states;

pub mod token_metadata_program {
    use anchor_lang::prelude::declare_id;
    declare_id!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
}

pub const GLOBAL_STATE_SEED: &str = "global-state";
pub const TOKEN_AUTHORITY_SEED: &str = "token-authority";
pub const TOKEN_VAULT_AUTHORITY_SEED: &str = "token-vault-authority";
pub const TOKEN_INFO_SEED: &str = "token-info";
pub const TOKEN_VAULT_SEED: &str = "token-vault";
pub const USER_JWLTOKEN_INFO_SEED: &str = "user-jwltoken-info";
pub const METADATA_SEED: &str = "metadata";

/// Length of a reward epoch in seconds.
pub const TOKEN_STAKING_EPOCH: i64 = 7 * 86_400;

/// Seconds staked JWLTOKEN stays locked after the last stake.
pub const TOKEN_STAKING_COOLDOWN: i64 = 7 * 86_400;

/// Prefix of the derivative token's name and symbol (`JWL<SYMBOL>`).
pub const JWLTOKEN_PREFIX: &str = "JWL";

/// Address of the Metaplex metadata account describing `mint`.
pub fn get_metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED.as_bytes(),
            token_metadata_program::ID.as_ref(),
            mint.as_ref(),
        ],
        &token_metadata_program::ID,
    )
}
