use anchor_lang::prelude::*;

use super::anchor_account;

/// Per-user staking ledger for one JWLTOKEN, keyed by
/// `USER_JWLTOKEN_INFO_SEED + user + jwltoken_mint`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct UserJwltokenInfo {
    pub user_address: Pubkey,
    pub jwltoken_mint: Pubkey,
    pub jwltoken_staked: u64,
    /// Rewards distributed to the user and not claimed yet.
    pub total_rewards: u64,
    /// Unix time of the last stake; starts the unstake cooldown.
    pub last_staked_at: u64,
    pub last_epoch_checked: u64,
}

anchor_account!(UserJwltokenInfo, [161, 143, 177, 195, 171, 65, 141, 165]);

impl UserJwltokenInfo {
    pub const LEN: usize = 8 + 32 * 2 + 8 * 4;
}
