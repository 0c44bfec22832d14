use anchor_lang::AccountDeserialize;
use anyhow::Result;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    client_error::ClientError,
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    account::Account,
    epoch_info::EpochInfo,
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use spl_associated_token_account::get_associated_token_address;

use super::utils::deserialize_anchor_account;

/// Largest key list accepted by `getMultipleAccounts`.
const MAX_MULTIPLE_ACCOUNTS: usize = 100;

/// Read side of the chain as the refresher sees it.
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>>;

    /// One entry per address, in order, `None` where nothing exists.
    async fn fetch_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>>;

    /// Every account of `program_id` whose data starts with `discriminator`.
    async fn fetch_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: &[u8],
    ) -> Result<Vec<(Pubkey, Account)>>;

    /// Block time of the latest slot.
    async fn fetch_block_time(&self) -> Result<i64>;

    async fn fetch_epoch_info(&self) -> Result<EpochInfo>;

    async fn fetch_balance(&self, address: &Pubkey) -> Result<u64>;

    /// Balance of the owner's associated token account, 0 when it does not
    /// exist.
    async fn fetch_token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64>;

    async fn fetch_token_supply(&self, mint: &Pubkey) -> Result<u64>;
}

impl ChainReader for RpcClient {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        Ok(self
            .get_account_with_commitment(address, self.commitment())
            .await?
            .value)
    }

    async fn fetch_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        let mut accounts = Vec::with_capacity(addresses.len());
        for chunk in addresses.chunks(MAX_MULTIPLE_ACCOUNTS) {
            accounts.extend(self.get_multiple_accounts(chunk).await?);
        }
        Ok(accounts)
    }

    async fn fetch_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: &[u8],
    ) -> Result<Vec<(Pubkey, Account)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                0,
                discriminator,
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        Ok(self
            .get_program_accounts_with_config(program_id, config)
            .await?)
    }

    async fn fetch_block_time(&self) -> Result<i64> {
        let slot = self.get_slot().await?;
        Ok(self.get_block_time(slot).await?)
    }

    async fn fetch_epoch_info(&self) -> Result<EpochInfo> {
        Ok(self.get_epoch_info().await?)
    }

    async fn fetch_balance(&self, address: &Pubkey) -> Result<u64> {
        Ok(self.get_balance(address).await?)
    }

    async fn fetch_token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        let token_account = get_associated_token_address(owner, mint);
        if self.fetch_account(&token_account).await?.is_none() {
            return Ok(0);
        }
        let balance = self.get_token_account_balance(&token_account).await?;
        Ok(balance.amount.parse()?)
    }

    async fn fetch_token_supply(&self, mint: &Pubkey) -> Result<u64> {
        let supply = self.get_token_supply(mint).await?;
        Ok(supply.amount.parse()?)
    }
}

/// Decodes the Anchor account at `address`, `None` when it does not exist.
pub async fn fetch_anchor_account<T, R>(reader: &R, address: &Pubkey) -> Result<Option<T>>
where
    T: AccountDeserialize,
    R: ChainReader,
{
    match reader.fetch_account(address).await? {
        Some(account) => Ok(Some(deserialize_anchor_account(&account)?)),
        None => Ok(None),
    }
}

/// Like [`fetch_anchor_account`] but a missing account is an error.
pub async fn fetch_required_account<T, R>(reader: &R, address: &Pubkey) -> Result<T>
where
    T: AccountDeserialize,
    R: ChainReader,
{
    fetch_anchor_account(reader, address)
        .await?
        .ok_or_else(|| anyhow::format_err!("account {} not found", address))
}

/// Every account of type `T` owned by `program_id`.
pub async fn fetch_all_anchor_accounts<T, R>(reader: &R, program_id: &Pubkey) -> Result<Vec<(Pubkey, T)>>
where
    T: AccountDeserialize + anchor_lang::Discriminator,
    R: ChainReader,
{
    reader
        .fetch_program_accounts(program_id, T::DISCRIMINATOR)
        .await?
        .iter()
        .map(|(address, account)| Ok((*address, deserialize_anchor_account(account)?)))
        .collect()
}

/// Write side of the chain: what signing and sending a transaction needs.
#[allow(async_fn_in_trait)]
pub trait ChainWriter {
    async fn latest_blockhash(&self) -> Result<Hash>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    /// Sends `txn` and waits for confirmation.
    async fn send_txn(&self, txn: &Transaction) -> Result<Signature, ClientError>;
}

impl ChainWriter for RpcClient {
    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.get_latest_blockhash().await?)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(self.get_minimum_balance_for_rent_exemption(data_len).await?)
    }

    async fn send_txn(&self, txn: &Transaction) -> Result<Signature, ClientError> {
        self.send_and_confirm_transaction(txn).await
    }
}

/// Code of a custom program error carried by a failed send, if any.
pub fn custom_error_code(err: &ClientError) -> Option<u32> {
    match err.get_transaction_error()? {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}
