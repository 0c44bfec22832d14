//! Account lists of the token staking instructions, in program order.

use anchor_lang::prelude::*;
use anchor_lang::ToAccountMetas;

macro_rules! account_meta {
    (signer, $key:expr) => {
        AccountMeta::new($key, true)
    };
    (writable, $key:expr) => {
        AccountMeta::new($key, false)
    };
    (readonly, $key:expr) => {
        AccountMeta::new_readonly($key, false)
    };
}

macro_rules! instruction_accounts {
    ($(#[$meta:meta])* $name:ident { $($field:ident: $kind:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: Pubkey,)*
        }

        impl ToAccountMetas for $name {
            fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
                vec![$(account_meta!($kind, self.$field)),*]
            }
        }
    };
}

instruction_accounts!(
    /// `jwltoken_mint` is a fresh keypair that signs its own creation.
    RegisterToken {
        signer: signer,
        global_state: writable,
        token_mint: writable,
        token_info: writable,
        token_vault: writable,
        jwltoken_mint: signer,
        jwltoken_vault: writable,
        token_authority: writable,
        token_vault_authority: writable,
        jwltoken_metadata_account: writable,
        rent: readonly,
        system_program: readonly,
        token_program: readonly,
        token_metadata_program: readonly,
    }
);

instruction_accounts!(Convert {
    signer: signer,
    global_state: writable,
    token_mint: writable,
    token_vault: writable,
    jwltoken_mint: writable,
    jwltoken_vault: writable,
    token_info: writable,
    token_authority: writable,
    user_token_account: writable,
    user_jwltoken_account: writable,
    user_jwltoken_info: writable,
    rent: readonly,
    system_program: readonly,
    token_program: readonly,
    associated_token_program: readonly,
});

instruction_accounts!(StakeJwltoken {
    signer: signer,
    global_state: writable,
    token_mint: writable,
    jwltoken_mint: writable,
    jwltoken_vault: writable,
    token_info: writable,
    user_jwltoken_account: writable,
    user_jwltoken_info: writable,
    system_program: readonly,
    token_program: readonly,
});

instruction_accounts!(UnstakeJwltoken {
    signer: signer,
    global_state: writable,
    token_mint: writable,
    jwltoken_mint: writable,
    jwltoken_vault: writable,
    token_info: writable,
    token_vault_authority: writable,
    user_jwltoken_account: writable,
    user_jwltoken_info: writable,
    token_program: readonly,
});

instruction_accounts!(ClaimRewards {
    signer: signer,
    global_state: writable,
    token_mint: writable,
    jwltoken_mint: writable,
    jwltoken_vault: writable,
    token_info: writable,
    token_vault_authority: writable,
    user_jwltoken_account: writable,
    user_jwltoken_info: writable,
    token_program: readonly,
});
