use anchor_lang::prelude::*;

use super::anchor_account;

/// Per-user liquid staking ledger, keyed by `USER_INFO_SEED + user`.
///
/// Created by the user's first deposit, so it is legitimately missing for
/// wallets that never deposited.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct UserInfoAccount {
    pub user_address: Pubkey,
    /// Vote-escrow balance earned by staking JWLSOL.
    pub vejwlsol_amount: u64,
    /// Part of `vejwlsol_amount` already committed to validators.
    pub voted_vejwlsol_amount: u64,
    pub reserved_redeem_amount: u64,
    pub approved_redeem_amount: u64,
    pub last_redeem_reserved_epoch: u64,
    pub last_redeem_approved_epoch: u64,
    pub is_redeem_approved: bool,
}

anchor_account!(UserInfoAccount, [218, 126, 115, 208, 144, 223, 187, 184]);

impl UserInfoAccount {
    pub const LEN: usize = 8 + 32 + 8 * 6 + 1;

    /// Vote-escrow balance not yet committed to any validator.
    pub fn unused_vejwlsol(&self) -> u64 {
        self.vejwlsol_amount.saturating_sub(self.voted_vejwlsol_amount)
    }
}
