//! In-memory chain used by the refresher and action tests.

use anchor_lang::AccountSerialize;
use anyhow::{format_err, Result};
use solana_client::client_error::ClientError;
use solana_sdk::{
    account::Account,
    epoch_info::EpochInfo,
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use crate::config::Network;
use crate::context::ClientContext;
use crate::instructions::rpc::{ChainReader, ChainWriter};

pub(crate) fn context() -> ClientContext {
    ClientContext::new(
        Network::Testnet,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Vec::new(),
    )
}

pub(crate) struct MockChain {
    pub accounts: BTreeMap<Pubkey, Account>,
    /// Addresses whose reads fail.
    pub failing: HashSet<Pubkey>,
    /// Owners whose token balance reads fail.
    pub failing_token_owners: HashSet<Pubkey>,
    pub balances: HashMap<Pubkey, u64>,
    pub token_balances: HashMap<(Pubkey, Pubkey), u64>,
    pub supplies: HashMap<Pubkey, u64>,
    pub block_time: i64,
    pub epoch: EpochInfo,
    pub epoch_fails: bool,
    /// Custom program error every send fails with.
    pub send_error: Option<u32>,
    sent: Mutex<Vec<Transaction>>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            accounts: BTreeMap::new(),
            failing: HashSet::new(),
            failing_token_owners: HashSet::new(),
            balances: HashMap::new(),
            token_balances: HashMap::new(),
            supplies: HashMap::new(),
            block_time: 1_710_000_000,
            epoch: EpochInfo {
                epoch: 600,
                slot_index: 0,
                slots_in_epoch: 100,
                absolute_slot: 0,
                block_height: 0,
                transaction_count: None,
            },
            epoch_fails: false,
            send_error: None,
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl MockChain {
    pub fn insert_anchor<T: AccountSerialize>(&mut self, address: Pubkey, owner: Pubkey, value: &T) {
        let mut data = Vec::new();
        value.try_serialize(&mut data).unwrap();
        self.accounts.insert(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn sent_transactions(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    fn read(&self, address: &Pubkey) -> Result<Option<Account>> {
        if self.failing.contains(address) {
            return Err(format_err!("read of {} failed", address));
        }
        Ok(self.accounts.get(address).cloned())
    }
}

impl ChainReader for MockChain {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        self.read(address)
    }

    async fn fetch_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        addresses.iter().map(|address| self.read(address)).collect()
    }

    async fn fetch_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: &[u8],
    ) -> Result<Vec<(Pubkey, Account)>> {
        Ok(self
            .accounts
            .iter()
            .filter(|(_, account)| {
                account.owner == *program_id && account.data.starts_with(discriminator)
            })
            .map(|(address, account)| (*address, account.clone()))
            .collect())
    }

    async fn fetch_block_time(&self) -> Result<i64> {
        Ok(self.block_time)
    }

    async fn fetch_epoch_info(&self) -> Result<EpochInfo> {
        if self.epoch_fails {
            return Err(format_err!("epoch info unavailable"));
        }
        Ok(self.epoch.clone())
    }

    async fn fetch_balance(&self, address: &Pubkey) -> Result<u64> {
        Ok(self.balances.get(address).copied().unwrap_or_default())
    }

    async fn fetch_token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        if self.failing_token_owners.contains(owner) {
            return Err(format_err!("token balance of {} failed", owner));
        }
        Ok(self
            .token_balances
            .get(&(*owner, *mint))
            .copied()
            .unwrap_or_default())
    }

    async fn fetch_token_supply(&self, mint: &Pubkey) -> Result<u64> {
        self.supplies
            .get(mint)
            .copied()
            .ok_or_else(|| format_err!("no supply for {}", mint))
    }
}

impl ChainWriter for MockChain {
    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(Hash::default())
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(data_len as u64 * 10)
    }

    async fn send_txn(&self, txn: &Transaction) -> Result<Signature, ClientError> {
        if let Some(code) = self.send_error {
            return Err(TransactionError::InstructionError(0, InstructionError::Custom(code)).into());
        }
        self.sent.lock().unwrap().push(txn.clone());
        Ok(txn.signatures[0])
    }
}
