use anyhow::Result;
use jewelswap_liquid_staking::accounts as liquid_accounts;
use jewelswap_liquid_staking::instruction as liquid_instructions;
use jewelswap_liquid_staking::states::{GlobalState, VALIDATOR_STORE_LEN};
use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, system_instruction, system_program, sysvar,
};
use spl_associated_token_account::get_associated_token_address;

use super::anchor_instruction;
use super::utils::{get_user_info_address, get_user_to_validator_address, get_validator_address};
use crate::context::ClientContext;

pub fn deposit_instr(
    ctx: &ClientContext,
    global_state: &GlobalState,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.liquid_staking_program;
    let instruction = anchor_instruction(
        program_id,
        liquid_accounts::Deposit {
            signer,
            user_info_account: get_user_info_address(&program_id, &signer),
            global_state: ctx.addresses.liquid_global_state,
            reserve_vault: ctx.addresses.reserve_vault,
            jwlsol_mint: global_state.jwlsol_mint,
            jwlsol_authority: global_state.jwlsol_authority,
            user_jwlsol_account: get_associated_token_address(&signer, &global_state.jwlsol_mint),
            rent: sysvar::rent::id(),
            system_program: system_program::id(),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
        },
        liquid_instructions::Deposit { amount },
    );
    Ok(vec![instruction])
}

pub fn reserve_redeem_instr(
    ctx: &ClientContext,
    global_state: &GlobalState,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.liquid_staking_program;
    let instruction = anchor_instruction(
        program_id,
        liquid_accounts::ReserveRedeem {
            signer,
            user_info_account: get_user_info_address(&program_id, &signer),
            global_state: ctx.addresses.liquid_global_state,
            jwlsol_mint: global_state.jwlsol_mint,
            jwlsol_vault: global_state.jwlsol_vault,
            user_jwlsol_account: get_associated_token_address(&signer, &global_state.jwlsol_mint),
            clock: sysvar::clock::id(),
            rent: sysvar::rent::id(),
            system_program: system_program::id(),
            token_program: spl_token::id(),
        },
        liquid_instructions::ReserveRedeem { amount },
    );
    Ok(vec![instruction])
}

pub fn stake_jwlsol_instr(
    ctx: &ClientContext,
    global_state: &GlobalState,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.liquid_staking_program;
    let instruction = anchor_instruction(
        program_id,
        liquid_accounts::StakeJwlsol {
            signer,
            user_info_account: get_user_info_address(&program_id, &signer),
            global_state: ctx.addresses.liquid_global_state,
            jwlsol_mint: global_state.jwlsol_mint,
            jwlsol_vault: global_state.jwlsol_vault,
            user_jwlsol_account: get_associated_token_address(&signer, &global_state.jwlsol_mint),
            sjwlsol_mint: global_state.sjwlsol_mint,
            sjwlsol_authority: global_state.sjwlsol_authority,
            user_sjwlsol_account: get_associated_token_address(&signer, &global_state.sjwlsol_mint),
            rent: sysvar::rent::id(),
            system_program: system_program::id(),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
        },
        liquid_instructions::StakeJwlsol { amount },
    );
    Ok(vec![instruction])
}

pub fn unstake_sjwlsol_instr(
    ctx: &ClientContext,
    global_state: &GlobalState,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.liquid_staking_program;
    let instruction = anchor_instruction(
        program_id,
        liquid_accounts::UnstakeSjwlsol {
            signer,
            user_info_account: get_user_info_address(&program_id, &signer),
            global_state: ctx.addresses.liquid_global_state,
            jwlsol_mint: global_state.jwlsol_mint,
            jwlsol_vault: global_state.jwlsol_vault,
            jwlsol_vault_authority: global_state.jwlsol_vault_authority,
            user_jwlsol_account: get_associated_token_address(&signer, &global_state.jwlsol_mint),
            sjwlsol_mint: global_state.sjwlsol_mint,
            user_sjwlsol_account: get_associated_token_address(&signer, &global_state.sjwlsol_mint),
            token_program: spl_token::id(),
        },
        liquid_instructions::UnstakeSjwlsol { amount },
    );
    Ok(vec![instruction])
}

/// `vote_percentage` is the weight in percent scaled by 100.
pub fn vote_validator_instr(
    ctx: &ClientContext,
    signer: Pubkey,
    vote_account: Pubkey,
    vote_percentage: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.liquid_staking_program;
    let validator = get_validator_address(&program_id, &vote_account);
    let instruction = anchor_instruction(
        program_id,
        liquid_accounts::VoteValidator {
            signer,
            global_state: ctx.addresses.liquid_global_state,
            validator,
            user_to_validator: get_user_to_validator_address(&program_id, &signer, &validator),
            user_info_account: get_user_info_address(&program_id, &signer),
            rent: sysvar::rent::id(),
            system_program: system_program::id(),
        },
        liquid_instructions::VoteValidator { vote_percentage },
    );
    Ok(vec![instruction])
}

/// Creates the validator store account owned by the program, then registers
/// the validator. `validator_store` must sign the transaction.
pub fn add_validator_instr(
    ctx: &ClientContext,
    signer: Pubkey,
    vote_account: Pubkey,
    validator_store: Pubkey,
    validator_store_rent: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.liquid_staking_program;
    let create_store = system_instruction::create_account(
        &signer,
        &validator_store,
        validator_store_rent,
        VALIDATOR_STORE_LEN as u64,
        &program_id,
    );
    let add_validator = anchor_instruction(
        program_id,
        liquid_accounts::AddValidator {
            signer,
            global_state: ctx.addresses.liquid_global_state,
            validator: get_validator_address(&program_id, &vote_account),
            validator_vote_account: vote_account,
            validator_store,
            rent: sysvar::rent::id(),
            system_program: system_program::id(),
        },
        liquid_instructions::AddValidator {},
    );
    Ok(vec![create_store, add_validator])
}

pub fn remove_validator_instr(
    ctx: &ClientContext,
    signer: Pubkey,
    vote_account: Pubkey,
    validator_store: Pubkey,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.liquid_staking_program;
    let instruction = anchor_instruction(
        program_id,
        liquid_accounts::RemoveValidator {
            signer,
            global_state: ctx.addresses.liquid_global_state,
            validator: get_validator_address(&program_id, &vote_account),
            validator_vote_account: vote_account,
            validator_store,
        },
        liquid_instructions::RemoveValidator {},
    );
    Ok(vec![instruction])
}

pub fn fund_instr(
    ctx: &ClientContext,
    global_state: &GlobalState,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let instruction = anchor_instruction(
        ctx.liquid_staking_program,
        liquid_accounts::Fund {
            signer,
            global_state: ctx.addresses.liquid_global_state,
            reserve_vault: global_state.reserve_vault,
            system_program: system_program::id(),
        },
        liquid_instructions::Fund { amount },
    );
    Ok(vec![instruction])
}

pub fn reserve_claim_instr(ctx: &ClientContext, signer: Pubkey, amount: u64) -> Result<Vec<Instruction>> {
    let instruction = anchor_instruction(
        ctx.liquid_staking_program,
        liquid_accounts::ReserveClaim {
            signer,
            global_state: ctx.addresses.liquid_global_state,
        },
        liquid_instructions::ReserveClaim { amount },
    );
    Ok(vec![instruction])
}

/// Withdraws earned SOL from the reserve vault.
pub fn claim_sol_instr(
    ctx: &ClientContext,
    global_state: &GlobalState,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let instruction = anchor_instruction(
        ctx.liquid_staking_program,
        liquid_accounts::ClaimRewards {
            signer,
            global_state: ctx.addresses.liquid_global_state,
            reserve_vault: global_state.reserve_vault,
        },
        liquid_instructions::ClaimRewards { amount },
    );
    Ok(vec![instruction])
}
