//! Instruction data of the liquid staking program.
//!
//! Each struct carries the handler's arguments in declaration order and the
//! discriminator `sha256("global:<handler_name>")[..8]`.

use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, InstructionData};

macro_rules! instruction_data {
    ($name:ident, $discriminator:expr) => {
        impl Discriminator for $name {
            const DISCRIMINATOR: &'static [u8] = &$discriminator;
        }

        impl InstructionData for $name {}
    };
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Deposit {
    pub amount: u64,
}
instruction_data!(Deposit, [242, 35, 198, 137, 82, 225, 242, 182]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct StakeJwlsol {
    pub amount: u64,
}
instruction_data!(StakeJwlsol, [187, 28, 248, 171, 190, 9, 7, 156]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UnstakeSjwlsol {
    pub amount: u64,
}
instruction_data!(UnstakeSjwlsol, [227, 48, 96, 181, 5, 243, 155, 23]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ReserveRedeem {
    pub amount: u64,
}
instruction_data!(ReserveRedeem, [202, 148, 83, 114, 244, 157, 35, 253]);

/// `vote_percentage` is the vote weight in hundredths of a percent
/// (`10_000` commits the whole unused balance).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct VoteValidator {
    pub vote_percentage: u64,
}
instruction_data!(VoteValidator, [252, 173, 171, 167, 231, 241, 205, 193]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct AddValidator {}
instruction_data!(AddValidator, [250, 113, 53, 54, 141, 117, 215, 185]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RemoveValidator {}
instruction_data!(RemoveValidator, [25, 96, 211, 155, 161, 14, 168, 188]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Fund {
    pub amount: u64,
}
instruction_data!(Fund, [218, 188, 111, 221, 152, 113, 174, 7]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ReserveClaim {
    pub amount: u64,
}
instruction_data!(ReserveClaim, [103, 167, 250, 70, 19, 61, 31, 213]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ClaimRewards {
    pub amount: u64,
}
instruction_data!(ClaimRewards, [4, 144, 132, 71, 116, 23, 151, 80]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_is_discriminator_then_borsh_args() {
        let data = Deposit { amount: 1_000_000_000 }.data();
        assert_eq!(&data[..8], Deposit::DISCRIMINATOR);
        assert_eq!(&data[8..], &1_000_000_000u64.to_le_bytes());
    }

    #[test]
    fn argless_instructions_are_only_the_discriminator() {
        assert_eq!(AddValidator {}.data(), AddValidator::DISCRIMINATOR.to_vec());
    }
}
