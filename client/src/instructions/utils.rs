use anchor_lang::AccountDeserialize;
use anyhow::Result;
use jewelswap_liquid_staking::{
    GLOBAL_STATE_SEED as LIQUID_GLOBAL_STATE_SEED, RESERVE_VAULT_SEED, USER_INFO_SEED,
    USER_TO_VALIDATOR_SEED, VALIDATOR_SEED,
};
use jewelswap_token_staking::{
    GLOBAL_STATE_SEED as TOKEN_GLOBAL_STATE_SEED, TOKEN_AUTHORITY_SEED, TOKEN_INFO_SEED,
    TOKEN_VAULT_AUTHORITY_SEED, TOKEN_VAULT_SEED, USER_JWLTOKEN_INFO_SEED,
};
use solana_sdk::{account::Account, pubkey::Pubkey};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

/// Program derived address for `seeds` under `program_id`, with its bump.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(seeds, program_id)
}

pub fn get_liquid_global_state_address(program_id: &Pubkey) -> Pubkey {
    let (global_state, _bump) = derive_address(&[LIQUID_GLOBAL_STATE_SEED.as_bytes()], program_id);
    global_state
}

pub fn get_reserve_vault_address(program_id: &Pubkey, global_state: &Pubkey) -> Pubkey {
    let (reserve_vault, _bump) = derive_address(
        &[RESERVE_VAULT_SEED.as_bytes(), global_state.as_ref()],
        program_id,
    );
    reserve_vault
}

pub fn get_user_info_address(program_id: &Pubkey, user: &Pubkey) -> Pubkey {
    let (user_info, _bump) =
        derive_address(&[USER_INFO_SEED.as_bytes(), user.as_ref()], program_id);
    user_info
}

pub fn get_validator_address(program_id: &Pubkey, vote_account: &Pubkey) -> Pubkey {
    let (validator, _bump) =
        derive_address(&[VALIDATOR_SEED.as_bytes(), vote_account.as_ref()], program_id);
    validator
}

/// `validator` is the validator PDA, not the vote account.
pub fn get_user_to_validator_address(
    program_id: &Pubkey,
    user: &Pubkey,
    validator: &Pubkey,
) -> Pubkey {
    let (user_to_validator, _bump) = derive_address(
        &[
            USER_TO_VALIDATOR_SEED.as_bytes(),
            user.as_ref(),
            validator.as_ref(),
        ],
        program_id,
    );
    user_to_validator
}

pub fn get_token_global_state_address(program_id: &Pubkey) -> Pubkey {
    let (global_state, _bump) = derive_address(&[TOKEN_GLOBAL_STATE_SEED.as_bytes()], program_id);
    global_state
}

pub fn get_token_authority_address(program_id: &Pubkey, global_state: &Pubkey) -> Pubkey {
    let (authority, _bump) = derive_address(
        &[TOKEN_AUTHORITY_SEED.as_bytes(), global_state.as_ref()],
        program_id,
    );
    authority
}

pub fn get_token_vault_authority_address(program_id: &Pubkey, global_state: &Pubkey) -> Pubkey {
    let (authority, _bump) = derive_address(
        &[TOKEN_VAULT_AUTHORITY_SEED.as_bytes(), global_state.as_ref()],
        program_id,
    );
    authority
}

pub fn get_token_info_address(program_id: &Pubkey, token_mint: &Pubkey) -> Pubkey {
    let (token_info, _bump) =
        derive_address(&[TOKEN_INFO_SEED.as_bytes(), token_mint.as_ref()], program_id);
    token_info
}

/// Vault of either the underlying token or its JWL counterpart. The bump is
/// passed to `register_token`.
pub fn get_token_vault_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    derive_address(&[TOKEN_VAULT_SEED.as_bytes(), mint.as_ref()], program_id)
}

pub fn get_user_jwltoken_info_address(
    program_id: &Pubkey,
    user: &Pubkey,
    jwltoken_mint: &Pubkey,
) -> Pubkey {
    let (user_jwltoken_info, _bump) = derive_address(
        &[
            USER_JWLTOKEN_INFO_SEED.as_bytes(),
            user.as_ref(),
            jwltoken_mint.as_ref(),
        ],
        program_id,
    );
    user_jwltoken_info
}

/// Metaplex metadata account of `mint`.
pub fn get_metadata_address(mint: &Pubkey) -> Pubkey {
    let (metadata, _bump) = jewelswap_token_staking::get_metadata_address(mint);
    metadata
}
