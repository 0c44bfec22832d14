use anchor_lang::prelude::*;

/// Custom errors returned by the deployed liquid staking program.
#[error_code]
pub enum ErrorCode {
    #[msg("Unauthorized singer")]
    Unauthorized,

    #[msg("Validator has sol delegated")]
    ValidatorHasSolDelegated,

    #[msg("Insufficient token balance")]
    InsufficientTokenBalance,

    #[msg("Duplicated stake account")]
    DuplicatedStakeAccount,

    #[msg("Mismatched stake account")]
    MismatchedStakeAccount,

    #[msg("Invalid stake account")]
    InvalidStakeAccount,

    #[msg("Voting cooldown not over")]
    VoteCooldownNotOver,

    #[msg("Zero vejwlsol amount")]
    ZeroVeJwlsolAmount,

    #[msg("Exceed vejwlsol amount")]
    ExceedVeJwlsolAmount,

    #[msg("An account's data contents was invalid")]
    InvalidAccountData,

    #[msg("Invalid epoch")]
    InvalidEpoch,

    #[msg("Already approved redeem")]
    AlreadyApprovedRedeem,

    #[msg("Not approved redeem")]
    NotApprovedRedeem,

    #[msg("Not time to redeem")]
    NotTimeToRedeem,

    #[msg("Not time to run redeem")]
    NotTimeToRunRedeem,

    #[msg("Insufficient reserve vault balance")]
    InsufficientReserveVaultBalance,

    #[msg("Zero balance")]
    ZeroBalance,

    #[msg("Insufficient total sol to claim")]
    InsufficientSolToClaim,

    #[msg("Insufficient total sol reserved to claim")]
    InsufficientSolReservedToClaim,

    #[msg("Insufficient sol available to claim")]
    InsufficientSolAvailableToClaim,

    #[msg("Lower than min deposit amount")]
    LowerThanMinDepositAmount,
}

impl ErrorCode {
    const ALL: [ErrorCode; 21] = [
        ErrorCode::Unauthorized,
        ErrorCode::ValidatorHasSolDelegated,
        ErrorCode::InsufficientTokenBalance,
        ErrorCode::DuplicatedStakeAccount,
        ErrorCode::MismatchedStakeAccount,
        ErrorCode::InvalidStakeAccount,
        ErrorCode::VoteCooldownNotOver,
        ErrorCode::ZeroVeJwlsolAmount,
        ErrorCode::ExceedVeJwlsolAmount,
        ErrorCode::InvalidAccountData,
        ErrorCode::InvalidEpoch,
        ErrorCode::AlreadyApprovedRedeem,
        ErrorCode::NotApprovedRedeem,
        ErrorCode::NotTimeToRedeem,
        ErrorCode::NotTimeToRunRedeem,
        ErrorCode::InsufficientReserveVaultBalance,
        ErrorCode::ZeroBalance,
        ErrorCode::InsufficientSolToClaim,
        ErrorCode::InsufficientSolReservedToClaim,
        ErrorCode::InsufficientSolAvailableToClaim,
        ErrorCode::LowerThanMinDepositAmount,
    ];

    /// Maps a `Custom(code)` instruction error back to the program's variant.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| u32::from(*e) == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_codes_start_at_anchor_offset() {
        assert!(matches!(
            ErrorCode::from_code(6000),
            Some(ErrorCode::Unauthorized)
        ));
        assert!(matches!(
            ErrorCode::from_code(6020),
            Some(ErrorCode::LowerThanMinDepositAmount)
        ));
        assert!(ErrorCode::from_code(6021).is_none());
        assert!(ErrorCode::from_code(0).is_none());
    }
}
