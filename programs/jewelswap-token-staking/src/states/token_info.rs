use anchor_lang::prelude::*;

use super::anchor_account;

//
// ──────────────────────────────────────────────────────────────────────────────
// TokenInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// Staking state of one registered token, keyed by `TOKEN_INFO_SEED + token_mint`.
///
/// Rewards are distributed per epoch: `epoch_rewards` is the pool collected
/// since `epoch_start_time` and is split across `total_jwltoken_staked` when
/// the bot triggers the next epoch.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
    pub token_vault_bump: u8,
    pub jwltoken_mint: Pubkey,
    pub jwltoken_vault: Pubkey,
    pub jwltoken_vault_bump: u8,

    pub whirlpool: Pubkey,
    pub whirlpool_position: Pubkey,
    pub whirlpool_position_mint: Pubkey,
    pub whirlpool_position_mint_owner: Pubkey,
    pub whirlpool_position_token_account: Pubkey,

    /// Share of converted tokens kept for staking rather than liquidity.
    pub staking_percentage: u64,
    pub token_to_stake: u64,
    pub token_to_add_liquidity: u64,
    pub total_jwltoken_staked: u64,
    pub total_jwltoken_compounded: u64,
    pub total_stakers: u64,
    pub total_stakers_checked: u64,
    pub current_epoch: u64,
    pub epoch_rewards: u64,
    /// Unix time the current epoch started.
    pub epoch_start_time: u64,
}

anchor_account!(TokenInfo, [109, 162, 52, 125, 77, 166, 37, 202]);

impl TokenInfo {
    /// - 8: discriminator
    /// - 32 * 9: pubkeys
    /// - 2: bumps
    /// - 8 * 10: counters
    pub const LEN: usize = 8 + 32 * 9 + 2 + 8 * 10;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::{AccountDeserialize, AccountSerialize};

    #[test]
    fn len_matches_layout() {
        let info = TokenInfo {
            token_mint: Pubkey::new_unique(),
            jwltoken_mint: Pubkey::new_unique(),
            current_epoch: 12,
            epoch_rewards: 5_000,
            epoch_start_time: 1_700_000_000,
            ..Default::default()
        };
        let mut data = Vec::new();
        info.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), TokenInfo::LEN);

        let decoded = TokenInfo::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = Vec::new();
        TokenInfo::default().try_serialize(&mut data).unwrap();
        data.extend_from_slice(&[0u8; 64]);

        assert!(TokenInfo::try_deserialize(&mut data.as_slice()).is_ok());
    }
}
