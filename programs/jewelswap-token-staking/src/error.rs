use anchor_lang::prelude::*;

/// Custom errors returned by the deployed token staking program.
#[error_code]
pub enum ErrorCode {
    #[msg("Unauthorized singer")]
    Unauthorized,

    #[msg("Invalid value")]
    InvalidValue,

    #[msg("Epoch period is over")]
    EpochIsOver,

    #[msg("Epoch period is not over")]
    EpochIsNotOver,

    #[msg("Cooldown is not over")]
    CooldownIsNotOver,

    #[msg("Not time to trigger epoch")]
    NotTimeToTriggerEpoch,

    #[msg("Already got rewards")]
    AlreadyGotRewards,

    #[msg("Already done distribution")]
    AlreadyDoneDistribution,

    #[msg("Insufficient rewards")]
    InsufficientRewards,

    #[msg("Insufficient balance")]
    InsufficientBalance,
}

impl ErrorCode {
    const ALL: [ErrorCode; 10] = [
        ErrorCode::Unauthorized,
        ErrorCode::InvalidValue,
        ErrorCode::EpochIsOver,
        ErrorCode::EpochIsNotOver,
        ErrorCode::CooldownIsNotOver,
        ErrorCode::NotTimeToTriggerEpoch,
        ErrorCode::AlreadyGotRewards,
        ErrorCode::AlreadyDoneDistribution,
        ErrorCode::InsufficientRewards,
        ErrorCode::InsufficientBalance,
    ];

    /// Maps a `Custom(code)` instruction error back to the program's variant.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| u32::from(*e) == code)
    }
}
