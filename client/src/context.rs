use solana_sdk::pubkey::Pubkey;

use crate::config::{ClientConfig, Network};
use crate::instructions::utils::{
    get_liquid_global_state_address, get_reserve_vault_address, get_token_authority_address,
    get_token_global_state_address, get_token_vault_authority_address,
};

/// Protocol-wide addresses that only depend on the program ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolAddresses {
    pub liquid_global_state: Pubkey,
    pub reserve_vault: Pubkey,
    pub token_global_state: Pubkey,
    pub token_authority: Pubkey,
    pub token_vault_authority: Pubkey,
}

impl ProtocolAddresses {
    pub fn new(liquid_staking_program: &Pubkey, token_staking_program: &Pubkey) -> Self {
        let liquid_global_state = get_liquid_global_state_address(liquid_staking_program);
        let token_global_state = get_token_global_state_address(token_staking_program);
        Self {
            liquid_global_state,
            reserve_vault: get_reserve_vault_address(liquid_staking_program, &liquid_global_state),
            token_global_state,
            token_authority: get_token_authority_address(token_staking_program, &token_global_state),
            token_vault_authority: get_token_vault_authority_address(
                token_staking_program,
                &token_global_state,
            ),
        }
    }
}

/// Everything a refresh or an action needs besides the RPC connection.
#[derive(Clone, Debug)]
pub struct ClientContext {
    pub network: Network,
    pub liquid_staking_program: Pubkey,
    pub token_staking_program: Pubkey,
    pub addresses: ProtocolAddresses,
    pub admin_wallets: Vec<Pubkey>,
}

impl ClientContext {
    pub fn new(
        network: Network,
        liquid_staking_program: Pubkey,
        token_staking_program: Pubkey,
        admin_wallets: Vec<Pubkey>,
    ) -> Self {
        Self {
            network,
            liquid_staking_program,
            token_staking_program,
            addresses: ProtocolAddresses::new(&liquid_staking_program, &token_staking_program),
            admin_wallets,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.network,
            config.liquid_staking_program,
            config.token_staking_program,
            config.admin_wallets.clone(),
        )
    }

    /// Gates the admin views. The programs enforce the real authority.
    pub fn is_admin(&self, wallet: &Pubkey) -> bool {
        self.admin_wallets.contains(wallet)
    }
}
