use anchor_lang::prelude::*;

use super::anchor_account;

/// Singleton of the token staking program, derived from `GLOBAL_STATE_SEED`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct GlobalState {
    pub admin_account: Pubkey,
    pub bot_account: Pubkey,
    /// Mint authority of every JWLTOKEN mint.
    pub token_authority: Pubkey,
    pub token_authority_bump: u8,
    /// Owner of the token and JWLTOKEN vaults.
    pub token_vault_authority: Pubkey,
    pub token_vault_authority_bump: u8,
}

anchor_account!(GlobalState, [163, 46, 74, 168, 216, 123, 133, 98]);

impl GlobalState {
    pub const LEN: usize = 8 + 32 * 4 + 2;
}
