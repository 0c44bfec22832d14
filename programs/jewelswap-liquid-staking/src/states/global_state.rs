use anchor_lang::prelude::*;

use super::anchor_account;

//
// ──────────────────────────────────────────────────────────────────────────────
// Global State Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// Protocol-wide counters and fixed addresses of the liquid staking program.
///
/// Derived from `GLOBAL_STATE_SEED` alone. Reserves are lamport-denominated:
/// `jwlsol_reserve` grows with staking rewards while `sjwlsol_reserve` tracks
/// the staked share supply, which is what the yield projection compares.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct GlobalState {
    /// Wallet allowed to run admin instructions.
    pub admin_account: Pubkey,
    /// Wallet allowed to run the reward/score bot instructions.
    pub bot_account: Pubkey,

    pub jwlsol_mint: Pubkey,
    pub jwlsol_authority: Pubkey,
    pub jwlsol_authority_bump: u8,
    /// Vault holding JWLSOL staked for SJWLSOL.
    pub jwlsol_vault: Pubkey,
    pub jwlsol_vault_bump: u8,
    pub jwlsol_vault_authority: Pubkey,
    pub jwlsol_vault_authority_bump: u8,
    pub jwlsol_reserve: u64,

    pub sjwlsol_mint: Pubkey,
    pub sjwlsol_authority: Pubkey,
    pub sjwlsol_authority_bump: u8,
    pub sjwlsol_reserve: u64,
    /// Total vote-escrow balance handed out to SJWLSOL holders.
    pub vejwlsol_reserve: u64,

    /// System-owned PDA receiving SOL deposits.
    pub reserve_vault: Pubkey,
    pub reserve_vault_bump: u8,
    pub stake_withdraw_authority: Pubkey,
    pub stake_withdraw_authority_bump: u8,
    pub stake_deposit_authority: Pubkey,
    pub stake_deposit_authority_bump: u8,
    pub split_stake_accounts_store: Pubkey,

    pub whirlpool: Pubkey,
    pub whirlpool_position: Pubkey,
    pub whirlpool_position_mint: Pubkey,
    pub whirlpool_position_mint_owner: Pubkey,
    pub whirlpool_position_token_account: Pubkey,

    pub last_epoch_checked_rewards: u64,
    pub total_sol_to_stake: u64,
    pub total_sol_to_redeem: u64,
    pub total_sol_available_to_unstake: u64,
    pub total_sol_to_add_liquidity: u64,
    pub total_sol_delegated: u64,
    pub total_sol_to_claim: u64,
    pub total_sol_reserved_to_claim: u64,
    pub total_sol_earned: u64,
}

anchor_account!(GlobalState, [163, 46, 74, 168, 216, 123, 133, 98]);

impl GlobalState {
    /// Serialized size including the discriminator.
    ///
    /// - 8: discriminator
    /// - 32 * 17: pubkeys
    /// - 7: bumps
    /// - 8 * 12: reserves and counters
    pub const LEN: usize = 8 + 32 * 17 + 7 + 8 * 12;
}
