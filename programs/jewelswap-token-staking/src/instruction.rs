//! Instruction data of the token staking program, discriminated by
//! `sha256("global:<handler_name>")[..8]`.

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

/// Converts `amount` tokens into JWLTOKEN, optionally staking the result in
/// the same instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Convert {
    pub amount: u64,
    pub is_staking: bool,
}
instruction_data!(Convert, [122, 80, 212, 208, 92, 200, 34, 161]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct StakeJwltoken {
    pub amount: u64,
}
instruction_data!(StakeJwltoken, [147, 220, 201, 73, 120, 87, 11, 91]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UnstakeJwltoken {
    pub amount: u64,
}
instruction_data!(UnstakeJwltoken, [91, 225, 35, 194, 33, 100, 83, 156]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ClaimRewards {
    pub amount: u64,
}
instruction_data!(ClaimRewards, [4, 144, 132, 71, 116, 23, 151, 80]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RegisterToken {
    pub staking_percentage: u64,
    pub token_vault_bump: u8,
    pub jwltoken_vault_bump: u8,
    pub jwltoken_name: String,
    pub jwltoken_symbol: String,
    pub jwltoken_metadata_uri: String,
}
instruction_data!(RegisterToken, [32, 146, 36, 240, 80, 183, 36, 84]);
