pub mod liquid_staking_instructions;
pub mod rpc;
pub mod token_staking_instructions;
pub mod utils;

use anchor_lang::{InstructionData, ToAccountMetas};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

/// Anchor instruction from an account list and its argument struct.
pub(crate) fn anchor_instruction<A, D>(program_id: Pubkey, accounts: A, args: D) -> Instruction
where
    A: ToAccountMetas,
    D: InstructionData,
{
    Instruction {
        program_id,
        accounts: accounts.to_account_metas(None),
        data: args.data(),
    }
}
