use anyhow::Result;
use jewelswap_token_staking::accounts as token_accounts;
use jewelswap_token_staking::instruction as token_instructions;
use jewelswap_token_staking::states::TokenInfo;
use jewelswap_token_staking::token_metadata_program;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program, sysvar};
use spl_associated_token_account::get_associated_token_address;

use super::anchor_instruction;
use super::utils::{
    get_metadata_address, get_token_info_address, get_token_vault_address,
    get_user_jwltoken_info_address,
};
use crate::context::ClientContext;

pub fn convert_instr(
    ctx: &ClientContext,
    token_info: &TokenInfo,
    signer: Pubkey,
    amount: u64,
    is_staking: bool,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.token_staking_program;
    let token_mint = token_info.token_mint;
    let jwltoken_mint = token_info.jwltoken_mint;
    let instruction = anchor_instruction(
        program_id,
        token_accounts::Convert {
            signer,
            global_state: ctx.addresses.token_global_state,
            token_mint,
            token_vault: get_token_vault_address(&program_id, &token_mint).0,
            jwltoken_mint,
            jwltoken_vault: get_token_vault_address(&program_id, &jwltoken_mint).0,
            token_info: get_token_info_address(&program_id, &token_mint),
            token_authority: ctx.addresses.token_authority,
            user_token_account: get_associated_token_address(&signer, &token_mint),
            user_jwltoken_account: get_associated_token_address(&signer, &jwltoken_mint),
            user_jwltoken_info: get_user_jwltoken_info_address(&program_id, &signer, &jwltoken_mint),
            rent: sysvar::rent::id(),
            system_program: system_program::id(),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
        },
        token_instructions::Convert { amount, is_staking },
    );
    Ok(vec![instruction])
}

pub fn stake_jwltoken_instr(
    ctx: &ClientContext,
    token_info: &TokenInfo,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.token_staking_program;
    let jwltoken_mint = token_info.jwltoken_mint;
    let instruction = anchor_instruction(
        program_id,
        token_accounts::StakeJwltoken {
            signer,
            global_state: ctx.addresses.token_global_state,
            token_mint: token_info.token_mint,
            jwltoken_mint,
            jwltoken_vault: get_token_vault_address(&program_id, &jwltoken_mint).0,
            token_info: get_token_info_address(&program_id, &token_info.token_mint),
            user_jwltoken_account: get_associated_token_address(&signer, &jwltoken_mint),
            user_jwltoken_info: get_user_jwltoken_info_address(&program_id, &signer, &jwltoken_mint),
            system_program: system_program::id(),
            token_program: spl_token::id(),
        },
        token_instructions::StakeJwltoken { amount },
    );
    Ok(vec![instruction])
}

pub fn unstake_jwltoken_instr(
    ctx: &ClientContext,
    token_info: &TokenInfo,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.token_staking_program;
    let jwltoken_mint = token_info.jwltoken_mint;
    let instruction = anchor_instruction(
        program_id,
        token_accounts::UnstakeJwltoken {
            signer,
            global_state: ctx.addresses.token_global_state,
            token_mint: token_info.token_mint,
            jwltoken_mint,
            jwltoken_vault: get_token_vault_address(&program_id, &jwltoken_mint).0,
            token_info: get_token_info_address(&program_id, &token_info.token_mint),
            token_vault_authority: ctx.addresses.token_vault_authority,
            user_jwltoken_account: get_associated_token_address(&signer, &jwltoken_mint),
            user_jwltoken_info: get_user_jwltoken_info_address(&program_id, &signer, &jwltoken_mint),
            token_program: spl_token::id(),
        },
        token_instructions::UnstakeJwltoken { amount },
    );
    Ok(vec![instruction])
}

/// Claims `amount` of accumulated JWLTOKEN rewards; the views always pass the
/// full `total_rewards`.
pub fn claim_rewards_instr(
    ctx: &ClientContext,
    token_info: &TokenInfo,
    signer: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.token_staking_program;
    let jwltoken_mint = token_info.jwltoken_mint;
    let instruction = anchor_instruction(
        program_id,
        token_accounts::ClaimRewards {
            signer,
            global_state: ctx.addresses.token_global_state,
            token_mint: token_info.token_mint,
            jwltoken_mint,
            jwltoken_vault: get_token_vault_address(&program_id, &jwltoken_mint).0,
            token_info: get_token_info_address(&program_id, &token_info.token_mint),
            token_vault_authority: ctx.addresses.token_vault_authority,
            user_jwltoken_account: get_associated_token_address(&signer, &jwltoken_mint),
            user_jwltoken_info: get_user_jwltoken_info_address(&program_id, &signer, &jwltoken_mint),
            token_program: spl_token::id(),
        },
        token_instructions::ClaimRewards { amount },
    );
    Ok(vec![instruction])
}

/// Registers `token_mint` for staking. `jwltoken_mint` is a fresh keypair's
/// address and must sign; `jwltoken_symbol` is used for both name and symbol.
pub fn register_token_instr(
    ctx: &ClientContext,
    signer: Pubkey,
    token_mint: Pubkey,
    jwltoken_mint: Pubkey,
    staking_percentage: u64,
    jwltoken_symbol: String,
    jwltoken_metadata_uri: String,
) -> Result<Vec<Instruction>> {
    let program_id = ctx.token_staking_program;
    let (token_vault, token_vault_bump) = get_token_vault_address(&program_id, &token_mint);
    let (jwltoken_vault, jwltoken_vault_bump) = get_token_vault_address(&program_id, &jwltoken_mint);
    let instruction = anchor_instruction(
        program_id,
        token_accounts::RegisterToken {
            signer,
            global_state: ctx.addresses.token_global_state,
            token_mint,
            token_info: get_token_info_address(&program_id, &token_mint),
            token_vault,
            jwltoken_mint,
            jwltoken_vault,
            token_authority: ctx.addresses.token_authority,
            token_vault_authority: ctx.addresses.token_vault_authority,
            jwltoken_metadata_account: get_metadata_address(&jwltoken_mint),
            rent: sysvar::rent::id(),
            system_program: system_program::id(),
            token_program: spl_token::id(),
            token_metadata_program: token_metadata_program::ID,
        },
        token_instructions::RegisterToken {
            staking_percentage,
            token_vault_bump,
            jwltoken_vault_bump,
            jwltoken_name: jwltoken_symbol.clone(),
            jwltoken_symbol,
            jwltoken_metadata_uri,
        },
    );
    Ok(vec![instruction])
}
