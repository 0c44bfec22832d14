//! Account lists of the liquid staking instructions.
//!
//! Field order is the order the program reads its accounts in, so it must not
//! be rearranged.

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

instruction_accounts!(Deposit {
    signer: signer,
    user_info_account: writable,
    global_state: writable,
    reserve_vault: writable,
    jwlsol_mint: writable,
    jwlsol_authority: writable,
    user_jwlsol_account: writable,
    rent: readonly,
    system_program: readonly,
    token_program: readonly,
    associated_token_program: readonly,
});

instruction_accounts!(StakeJwlsol {
    signer: signer,
    user_info_account: writable,
    global_state: writable,
    jwlsol_mint: writable,
    jwlsol_vault: writable,
    user_jwlsol_account: writable,
    sjwlsol_mint: writable,
    sjwlsol_authority: writable,
    user_sjwlsol_account: writable,
    rent: readonly,
    system_program: readonly,
    token_program: readonly,
    associated_token_program: readonly,
});

instruction_accounts!(UnstakeSjwlsol {
    signer: signer,
    user_info_account: writable,
    global_state: writable,
    jwlsol_mint: writable,
    jwlsol_vault: writable,
    jwlsol_vault_authority: writable,
    user_jwlsol_account: writable,
    sjwlsol_mint: writable,
    user_sjwlsol_account: writable,
    token_program: readonly,
});

instruction_accounts!(ReserveRedeem {
    signer: signer,
    user_info_account: writable,
    global_state: writable,
    jwlsol_mint: writable,
    jwlsol_vault: writable,
    user_jwlsol_account: writable,
    clock: readonly,
    rent: readonly,
    system_program: readonly,
    token_program: readonly,
});

instruction_accounts!(VoteValidator {
    signer: signer,
    global_state: writable,
    validator: writable,
    user_to_validator: writable,
    user_info_account: writable,
    rent: readonly,
    system_program: readonly,
});

instruction_accounts!(
    /// `validator_store` must already exist with `VALIDATOR_STORE_LEN` bytes
    /// owned by the program.
    AddValidator {
        signer: signer,
        global_state: writable,
        validator: writable,
        validator_vote_account: writable,
        validator_store: writable,
        rent: readonly,
        system_program: readonly,
    }
);

instruction_accounts!(RemoveValidator {
    signer: signer,
    global_state: writable,
    validator: writable,
    validator_vote_account: writable,
    validator_store: writable,
});

instruction_accounts!(Fund {
    signer: signer,
    global_state: writable,
    reserve_vault: writable,
    system_program: readonly,
});

instruction_accounts!(ReserveClaim {
    signer: signer,
    global_state: writable,
});

instruction_accounts!(ClaimRewards {
    signer: signer,
    global_state: writable,
    reserve_vault: writable,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metas_follow_declaration_order_and_flags() {
        let accounts = Fund {
            signer: Pubkey::new_unique(),
            global_state: Pubkey::new_unique(),
            reserve_vault: Pubkey::new_unique(),
            system_program: Pubkey::default(),
        };
        let metas = accounts.to_account_metas(None);

        assert_eq!(metas.len(), 4);
        assert_eq!(metas[0], AccountMeta::new(accounts.signer, true));
        assert_eq!(metas[1], AccountMeta::new(accounts.global_state, false));
        assert_eq!(metas[2], AccountMeta::new(accounts.reserve_vault, false));
        assert_eq!(
            metas[3],
            AccountMeta::new_readonly(accounts.system_program, false)
        );
    }
}
