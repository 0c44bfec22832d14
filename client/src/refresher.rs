use anyhow::Result;
use jewelswap_liquid_staking::states::{
    GlobalState as LiquidGlobalState, UserInfoAccount, UserToValidator, Validator,
};
use jewelswap_token_staking::states::{GlobalState as TokenGlobalState, TokenInfo, UserJwltokenInfo};
use log::{debug, error, info, warn};
use solana_sdk::pubkey::Pubkey;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::context::ClientContext;
use crate::instructions::rpc::{
    fetch_all_anchor_accounts, fetch_anchor_account, fetch_required_account, ChainReader,
};
use crate::instructions::utils::{
    deserialize_anchor_account, get_token_info_address, get_user_info_address,
    get_user_jwltoken_info_address, get_user_to_validator_address, get_validator_address,
};
use crate::projection::{allocation_shares, largest_share, max_vote_weight};
use crate::registry::{find_token_by_mint, validator_label};
use crate::snapshot::{
    AccountState, AdminView, GaugeUserState, GaugeView, LiquidStakingView, LiquidUserState,
    Snapshot, SnapshotStore, Ticket, TokenListing, TokenStakingView, TokenUserState,
    ValidatorAllocation, ViewUpdate,
};

/// Interval of the time-only refresh.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Gathers account data for the views and keeps the latest snapshot.
///
/// Protocol-wide reads are required: if one fails the cycle returns an error
/// and the previous snapshot stays in place. Per-user reads degrade to empty
/// values so a wallet without accounts still sees the protocol figures.
pub struct Refresher<R: ChainReader> {
    reader: R,
    ctx: ClientContext,
    wallet: Option<Pubkey>,
    store: Mutex<SnapshotStore>,
}

impl<R: ChainReader> Refresher<R> {
    pub fn new(reader: R, ctx: ClientContext, wallet: Option<Pubkey>) -> Self {
        Self {
            reader,
            ctx,
            wallet,
            store: Mutex::new(SnapshotStore::new()),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    pub fn wallet(&self) -> Option<Pubkey> {
        self.wallet
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store().snapshot().clone()
    }

    fn store(&self) -> MutexGuard<'_, SnapshotStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn issue_ticket(&self) -> Ticket {
        self.store().issue_ticket()
    }

    fn apply(&self, ticket: Ticket, update: ViewUpdate) {
        let kind = update.kind();
        if !self.store().apply(ticket, update) {
            debug!("discarded {:?} update from stale cycle {:?}", kind, ticket);
        }
    }

    /// Switches the connected wallet and refreshes every view shown so far.
    pub async fn set_wallet(&mut self, wallet: Option<Pubkey>) -> Result<()> {
        if self.wallet == wallet {
            return Ok(());
        }
        match wallet {
            Some(wallet) => info!("wallet connected: {}", wallet),
            None => info!("wallet disconnected"),
        }
        self.wallet = wallet;
        self.store().clear_user_fields();
        self.refresh_all().await
    }

    /// Full refresh of every view present in the snapshot.
    pub async fn refresh_all(&self) -> Result<()> {
        let snapshot = self.snapshot();
        let token_mint = snapshot.token.as_ref().map(|view| view.token_mint);

        let liquid = async {
            match snapshot.liquid {
                Some(_) => self.refresh_liquid().await,
                None => Ok(()),
            }
        };
        let token = async {
            match token_mint {
                Some(mint) => self.refresh_token(&mint).await,
                None => Ok(()),
            }
        };
        let gauge = async {
            match snapshot.gauge {
                Some(_) => self.refresh_gauge().await,
                None => Ok(()),
            }
        };
        let admin = async {
            match snapshot.admin {
                Some(_) => self.refresh_admin_tokens().await,
                None => Ok(()),
            }
        };
        let (liquid, token, gauge, admin) = tokio::join!(liquid, token, gauge, admin);
        liquid.and(token).and(gauge).and(admin)
    }

    pub async fn refresh_liquid(&self) -> Result<()> {
        let ticket = self.issue_ticket();
        let global_state_address = self.ctx.addresses.liquid_global_state;

        let (global_state, epoch, now) = tokio::try_join!(
            fetch_required_account::<LiquidGlobalState, _>(&self.reader, &global_state_address),
            self.reader.fetch_epoch_info(),
            self.reader.fetch_block_time(),
        )
        .inspect_err(|err| error!("liquid staking refresh failed: {:#}", err))?;

        let (jwlsol_supply, sjwlsol_supply, user) = tokio::join!(
            self.token_supply(&global_state.jwlsol_mint),
            self.token_supply(&global_state.sjwlsol_mint),
            self.liquid_user_state(&global_state),
        );

        let view = LiquidStakingView::new(
            global_state,
            epoch,
            now,
            jwlsol_supply,
            sjwlsol_supply,
            user,
        );
        self.apply(ticket, ViewUpdate::Liquid(view));
        Ok(())
    }

    async fn liquid_user_state(&self, global_state: &LiquidGlobalState) -> Option<LiquidUserState> {
        let wallet = self.wallet?;
        let user_info_address = get_user_info_address(&self.ctx.liquid_staking_program, &wallet);

        let (user_info, sol_balance, jwlsol_balance, sjwlsol_balance) = tokio::join!(
            fetch_anchor_account::<UserInfoAccount, _>(&self.reader, &user_info_address),
            self.reader.fetch_balance(&wallet),
            self.reader.fetch_token_balance(&wallet, &global_state.jwlsol_mint),
            self.reader.fetch_token_balance(&wallet, &global_state.sjwlsol_mint),
        );

        Some(LiquidUserState {
            user_info: user_account(user_info, "user info"),
            sol_balance: user_amount(sol_balance, "SOL balance"),
            jwlsol_balance: user_amount(jwlsol_balance, "JWLSOL balance"),
            sjwlsol_balance: user_amount(sjwlsol_balance, "SJWLSOL balance"),
        })
    }

    pub async fn refresh_token(&self, token_mint: &Pubkey) -> Result<()> {
        let ticket = self.issue_ticket();
        let program_id = self.ctx.token_staking_program;
        let global_state_address = self.ctx.addresses.token_global_state;
        let token_info_address = get_token_info_address(&program_id, token_mint);

        let (global_state, token_info, now) = tokio::try_join!(
            fetch_required_account::<TokenGlobalState, _>(&self.reader, &global_state_address),
            fetch_required_account::<TokenInfo, _>(&self.reader, &token_info_address),
            self.reader.fetch_block_time(),
        )
        .inspect_err(|err| error!("token staking refresh of {} failed: {:#}", token_mint, err))?;

        let (jwltoken_supply, user) = tokio::join!(
            self.token_supply(&token_info.jwltoken_mint),
            self.token_user_state(&token_info),
        );

        let symbol = token_symbol(token_mint, &self.ctx);

        let view = TokenStakingView::new(
            *token_mint,
            symbol,
            global_state,
            token_info,
            now,
            jwltoken_supply,
            user,
        );
        self.apply(ticket, ViewUpdate::Token(view));
        Ok(())
    }

    async fn token_user_state(&self, token_info: &TokenInfo) -> Option<TokenUserState> {
        let wallet = self.wallet?;
        let user_jwltoken_info_address = get_user_jwltoken_info_address(
            &self.ctx.token_staking_program,
            &wallet,
            &token_info.jwltoken_mint,
        );

        let (user_jwltoken_info, token_balance, jwltoken_balance) = tokio::join!(
            fetch_anchor_account::<UserJwltokenInfo, _>(&self.reader, &user_jwltoken_info_address),
            self.reader.fetch_token_balance(&wallet, &token_info.token_mint),
            self.reader.fetch_token_balance(&wallet, &token_info.jwltoken_mint),
        );

        Some(TokenUserState {
            user_jwltoken_info: user_account(user_jwltoken_info, "JWLTOKEN info"),
            token_balance: user_amount(token_balance, "token balance"),
            jwltoken_balance: user_amount(jwltoken_balance, "JWLTOKEN balance"),
        })
    }

    pub async fn refresh_gauge(&self) -> Result<()> {
        let ticket = self.issue_ticket();
        let program_id = self.ctx.liquid_staking_program;
        let global_state_address = self.ctx.addresses.liquid_global_state;

        let (global_state, validators, user_infos, now) = tokio::try_join!(
            fetch_required_account::<LiquidGlobalState, _>(&self.reader, &global_state_address),
            fetch_all_anchor_accounts::<Validator, _>(&self.reader, &program_id),
            fetch_all_anchor_accounts::<UserInfoAccount, _>(&self.reader, &program_id),
            self.reader.fetch_block_time(),
        )
        .inspect_err(|err| error!("gauge refresh failed: {:#}", err))?;

        let total_vejwlsol_voted = user_infos
            .iter()
            .map(|(_, info)| info.voted_vejwlsol_amount)
            .fold(0u64, u64::saturating_add);
        let vejwlsol_unused = user_infos
            .iter()
            .map(|(_, info)| info.unused_vejwlsol())
            .fold(0u64, u64::saturating_add);

        let user_links = self.user_to_validator_links(&validators).await;

        let scores: Vec<u64> = validators.iter().map(|(_, v)| v.current_score).collect();
        let shares = allocation_shares(&scores);
        let allocations: Vec<ValidatorAllocation> = validators
            .iter()
            .zip(shares)
            .enumerate()
            .map(|(i, ((address, validator), share))| {
                let (name, color) = validator_label(&validator.vote_account);
                let link = user_links.get(i).cloned().flatten().unwrap_or_default();
                ValidatorAllocation {
                    address: *address,
                    vote_account: validator.vote_account,
                    validator_store: validator.validator_store,
                    name,
                    color,
                    voting_score: validator.voting_score,
                    current_score: validator.current_score,
                    share,
                    voting_point: link.voting_point,
                    last_voted_at: link.last_voted_at as i64,
                }
            })
            .collect();
        let shares: Vec<f64> = allocations.iter().map(|a| a.share).collect();

        let user = self.wallet.map(|wallet| {
            let vejwlsol_amount = user_infos
                .iter()
                .find(|(_, info)| info.user_address == wallet)
                .map_or(0, |(_, info)| info.vejwlsol_amount);
            let committed = allocations
                .iter()
                .map(|a| a.voting_point)
                .fold(0u64, u64::saturating_add);
            GaugeUserState {
                vejwlsol_amount,
                committed,
                max_vote_weight: max_vote_weight(vejwlsol_amount, committed),
            }
        });

        let view = GaugeView {
            global_state,
            now,
            selected: largest_share(&shares),
            validators: allocations,
            total_vejwlsol_voted,
            vejwlsol_unused,
            user,
        };
        self.apply(ticket, ViewUpdate::Gauge(view));
        Ok(())
    }

    /// The wallet's link to each validator, in validator order. Empty without
    /// a wallet; entries are `None` where the wallet never voted.
    async fn user_to_validator_links(
        &self,
        validators: &[(Pubkey, Validator)],
    ) -> Vec<Option<UserToValidator>> {
        let Some(wallet) = self.wallet else {
            return Vec::new();
        };
        let program_id = self.ctx.liquid_staking_program;
        let addresses: Vec<Pubkey> = validators
            .iter()
            .map(|(_, validator)| {
                let validator = get_validator_address(&program_id, &validator.vote_account);
                get_user_to_validator_address(&program_id, &wallet, &validator)
            })
            .collect();

        let accounts = match self.reader.fetch_multiple_accounts(&addresses).await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!("failed to fetch votes of {}: {:#}", wallet, err);
                return Vec::new();
            }
        };
        accounts
            .iter()
            .map(|account| {
                let account = account.as_ref()?;
                deserialize_anchor_account::<UserToValidator>(account)
                    .inspect_err(|err| warn!("undecodable vote record: {:#}", err))
                    .ok()
            })
            .collect()
    }

    /// Lists every token registered with the token staking program.
    pub async fn refresh_admin_tokens(&self) -> Result<()> {
        let ticket = self.issue_ticket();
        let token_infos =
            fetch_all_anchor_accounts::<TokenInfo, _>(&self.reader, &self.ctx.token_staking_program)
                .await
                .inspect_err(|err| error!("registered token scan failed: {:#}", err))?;

        let tokens = token_infos
            .into_iter()
            .map(|(address, token_info)| TokenListing {
                address,
                symbol: token_symbol(&token_info.token_mint, &self.ctx),
                token_info,
            })
            .collect();
        self.apply(ticket, ViewUpdate::Admin(AdminView { tokens }));
        Ok(())
    }

    /// Refreshes only the time-dependent fields of the views already shown.
    /// A failure in one view does not hold back the other.
    pub async fn tick(&self) -> Result<()> {
        let snapshot = self.snapshot();
        let token_mint = snapshot.token.as_ref().map(|view| view.token_mint);
        let (liquid, token) = tokio::join!(
            self.tick_liquid(snapshot.liquid.is_some()),
            self.tick_token(token_mint),
        );
        liquid.and(token)
    }

    async fn tick_liquid(&self, shown: bool) -> Result<()> {
        if !shown {
            return Ok(());
        }
        let ticket = self.issue_ticket();
        let epoch = self
            .reader
            .fetch_epoch_info()
            .await
            .inspect_err(|err| error!("epoch refresh failed: {:#}", err))?;
        self.apply(ticket, ViewUpdate::LiquidEpoch(epoch));
        Ok(())
    }

    async fn tick_token(&self, token_mint: Option<Pubkey>) -> Result<()> {
        let Some(token_mint) = token_mint else {
            return Ok(());
        };
        let ticket = self.issue_ticket();
        let token_info_address = get_token_info_address(&self.ctx.token_staking_program, &token_mint);
        let (token_info, now) = tokio::try_join!(
            fetch_required_account::<TokenInfo, _>(&self.reader, &token_info_address),
            self.reader.fetch_block_time(),
        )
        .inspect_err(|err| error!("token epoch refresh failed: {:#}", err))?;
        self.apply(ticket, ViewUpdate::TokenTime { token_info, now });
        Ok(())
    }

    /// Runs [`Self::tick`] every minute until Ctrl-C, calling `on_update` with
    /// the snapshot after each successful tick.
    pub async fn watch<F>(&self, mut on_update: F) -> Result<()>
    where
        F: FnMut(&Snapshot),
    {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        // the first tick completes immediately and the caller already refreshed
        interval.tick().await;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("stopped watching");
                    return Ok(());
                }
                result = async {
                    interval.tick().await;
                    self.tick().await
                } => {
                    if result.is_ok() {
                        on_update(&self.snapshot());
                    }
                }
            }
        }
    }

    async fn token_supply(&self, mint: &Pubkey) -> u64 {
        self.reader.fetch_token_supply(mint).await.unwrap_or_else(|err| {
            warn!("failed to fetch supply of {}: {:#}", mint, err);
            0
        })
    }
}

fn token_symbol(token_mint: &Pubkey, ctx: &ClientContext) -> String {
    find_token_by_mint(token_mint, ctx.network)
        .map(|token| token.symbol.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

fn user_account<T>(result: Result<Option<T>>, what: &str) -> AccountState<T> {
    match result {
        Ok(account) => account.into(),
        Err(err) => {
            warn!("failed to fetch {}: {:#}", what, err);
            AccountState::NotCreated
        }
    }
}

fn user_amount(result: Result<u64>, what: &str) -> u64 {
    result.unwrap_or_else(|err| {
        warn!("failed to fetch {}: {:#}", what, err);
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{context, MockChain};
    use jewelswap_liquid_staking::states::UserToValidator;
    use crate::registry::find_token;
    use std::str::FromStr;

    fn liquid_global_state() -> LiquidGlobalState {
        LiquidGlobalState {
            jwlsol_mint: Pubkey::new_unique(),
            sjwlsol_mint: Pubkey::new_unique(),
            jwlsol_reserve: 1_100,
            sjwlsol_reserve: 1_000,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn per_user_failure_keeps_protocol_fields() {
        let ctx = context();
        let wallet = Pubkey::new_unique();
        let global_state = liquid_global_state();

        let mut chain = MockChain::default();
        chain.insert_anchor(ctx.addresses.liquid_global_state, ctx.liquid_staking_program, &global_state);
        chain.supplies.insert(global_state.jwlsol_mint, 500);
        chain.balances.insert(wallet, 42);
        chain
            .failing
            .insert(get_user_info_address(&ctx.liquid_staking_program, &wallet));
        chain.failing_token_owners.insert(wallet);

        let refresher = Refresher::new(chain, ctx, Some(wallet));
        refresher.refresh_liquid().await.unwrap();

        let view = refresher.snapshot().liquid.unwrap();
        assert_eq!(view.global_state, global_state);
        assert_eq!(view.jwlsol_supply, 500);
        assert_eq!(view.sjwlsol_supply, 0);
        assert!(view.apy > 0.0);

        let user = view.user.unwrap();
        assert_eq!(user.user_info, AccountState::NotCreated);
        assert_eq!(user.sol_balance, 42);
        assert_eq!(user.jwlsol_balance, 0);
    }

    #[tokio::test]
    async fn protocol_failure_keeps_previous_snapshot() {
        let ctx = context();
        let global_state = liquid_global_state();
        let mut chain = MockChain::default();
        chain.insert_anchor(ctx.addresses.liquid_global_state, ctx.liquid_staking_program, &global_state);
        let address = ctx.addresses.liquid_global_state;

        let mut refresher = Refresher::new(chain, ctx, None);
        refresher.refresh_liquid().await.unwrap();
        assert!(refresher.snapshot().liquid.unwrap().user.is_none());

        refresher.reader.failing.insert(address);
        assert!(refresher.refresh_liquid().await.is_err());
        assert_eq!(refresher.snapshot().liquid.unwrap().global_state, global_state);

        refresher.reader.failing.clear();
        refresher.reader.accounts.remove(&address);
        assert!(refresher.refresh_liquid().await.is_err());
        assert!(refresher.snapshot().liquid.is_some());
    }

    #[tokio::test]
    async fn wallet_change_refreshes_shown_views() {
        let ctx = context();
        let wallet = Pubkey::new_unique();
        let global_state = liquid_global_state();
        let user_info = UserInfoAccount {
            user_address: wallet,
            vejwlsol_amount: 9,
            ..Default::default()
        };

        let mut chain = MockChain::default();
        chain.insert_anchor(ctx.addresses.liquid_global_state, ctx.liquid_staking_program, &global_state);
        chain.insert_anchor(
            get_user_info_address(&ctx.liquid_staking_program, &wallet),
            ctx.liquid_staking_program,
            &user_info,
        );

        let mut refresher = Refresher::new(chain, ctx, None);
        refresher.refresh_liquid().await.unwrap();
        assert!(refresher.snapshot().liquid.unwrap().user.is_none());

        refresher.set_wallet(Some(wallet)).await.unwrap();
        let user = refresher.snapshot().liquid.unwrap().user.unwrap();
        assert_eq!(user.user_info, AccountState::Loaded(user_info));

        refresher.set_wallet(None).await.unwrap();
        let view = refresher.snapshot().liquid.unwrap();
        assert!(view.user.is_none());
        assert_eq!(view.global_state, global_state);
    }

    #[tokio::test]
    async fn switching_wallets_never_shows_previous_user() {
        let ctx = context();
        let program_id = ctx.liquid_staking_program;
        let global_state_address = ctx.addresses.liquid_global_state;
        let wallet_a = Pubkey::new_unique();
        let wallet_b = Pubkey::new_unique();
        let user_info_a = UserInfoAccount {
            user_address: wallet_a,
            vejwlsol_amount: 9,
            ..Default::default()
        };
        let user_info_b = UserInfoAccount {
            user_address: wallet_b,
            vejwlsol_amount: 3,
            ..Default::default()
        };

        let mut chain = MockChain::default();
        chain.insert_anchor(global_state_address, program_id, &liquid_global_state());
        chain.insert_anchor(get_user_info_address(&program_id, &wallet_a), program_id, &user_info_a);
        chain.insert_anchor(get_user_info_address(&program_id, &wallet_b), program_id, &user_info_b);
        chain.balances.insert(wallet_a, 500);

        let mut refresher = Refresher::new(chain, ctx, Some(wallet_a));
        refresher.refresh_liquid().await.unwrap();
        let user = refresher.snapshot().liquid.unwrap().user.unwrap();
        assert_eq!(user.user_info, AccountState::Loaded(user_info_a.clone()));

        refresher.reader.failing.insert(global_state_address);
        assert!(refresher.set_wallet(Some(wallet_b)).await.is_err());
        assert!(refresher.snapshot().liquid.unwrap().user.is_none());

        refresher.reader.failing.clear();
        refresher.set_wallet(Some(wallet_a)).await.unwrap();
        refresher.set_wallet(Some(wallet_b)).await.unwrap();
        let user = refresher.snapshot().liquid.unwrap().user.unwrap();
        assert_eq!(user.user_info, AccountState::Loaded(user_info_b));
        assert_eq!(user.sol_balance, 0);
    }

    #[tokio::test]
    async fn token_view_without_user_account() {
        let ctx = context();
        let wallet = Pubkey::new_unique();
        let token_mint = Pubkey::new_unique();
        let token_info = TokenInfo {
            token_mint,
            jwltoken_mint: Pubkey::new_unique(),
            epoch_start_time: 1_000,
            epoch_rewards: 10,
            total_jwltoken_staked: 1_000,
            ..Default::default()
        };

        let mut chain = MockChain::default();
        chain.block_time = 1_000 + 86_400;
        chain.insert_anchor(
            ctx.addresses.token_global_state,
            ctx.token_staking_program,
            &TokenGlobalState::default(),
        );
        chain.insert_anchor(
            get_token_info_address(&ctx.token_staking_program, &token_mint),
            ctx.token_staking_program,
            &token_info,
        );
        chain.token_balances.insert((wallet, token_mint), 77);

        let refresher = Refresher::new(chain, ctx, Some(wallet));
        refresher.refresh_token(&token_mint).await.unwrap();

        let view = refresher.snapshot().token.unwrap();
        assert_eq!(view.symbol, "UNKNOWN");
        assert!(view.apy > 0.0);
        assert_eq!(view.epoch_countdown, 6 * 86_400);
        assert_eq!(view.release_time, None);
        let user = view.user.unwrap();
        assert_eq!(user.user_jwltoken_info, AccountState::NotCreated);
        assert_eq!(user.token_balance, 77);
        assert_eq!(user.staked(), 0);
    }

    #[tokio::test]
    async fn gauge_joins_validators_with_allow_list() {
        let ctx = context();
        let program_id = ctx.liquid_staking_program;
        let wallet = Pubkey::new_unique();
        let known = Pubkey::from_str("oRAnGeU5h8h2UkvbfnE5cjXnnAa4rBoaxmS4kbFymSe").unwrap();
        let unknown = Pubkey::new_unique();

        let mut chain = MockChain::default();
        chain.block_time = 5_000;
        chain.insert_anchor(ctx.addresses.liquid_global_state, program_id, &liquid_global_state());
        for vote_account in [known, unknown] {
            chain.insert_anchor(
                get_validator_address(&program_id, &vote_account),
                program_id,
                &Validator {
                    vote_account,
                    ..Default::default()
                },
            );
        }
        chain.insert_anchor(
            get_user_info_address(&program_id, &wallet),
            program_id,
            &UserInfoAccount {
                user_address: wallet,
                vejwlsol_amount: 100,
                voted_vejwlsol_amount: 80,
                ..Default::default()
            },
        );
        chain.insert_anchor(
            get_user_info_address(&program_id, &Pubkey::new_unique()),
            program_id,
            &UserInfoAccount {
                vejwlsol_amount: 50,
                voted_vejwlsol_amount: 10,
                ..Default::default()
            },
        );
        let known_validator = get_validator_address(&program_id, &known);
        chain.insert_anchor(
            get_user_to_validator_address(&program_id, &wallet, &known_validator),
            program_id,
            &UserToValidator {
                voting_point: 80,
                last_voted_at: 4_000,
            },
        );

        let refresher = Refresher::new(chain, ctx, Some(wallet));
        refresher.refresh_gauge().await.unwrap();
        let view = refresher.snapshot().gauge.unwrap();

        assert_eq!(view.validators.len(), 2);
        assert_eq!(view.total_vejwlsol_voted, 90);
        assert_eq!(view.vejwlsol_unused, 60);
        assert_eq!(view.selected, Some(0));
        for allocation in &view.validators {
            assert_eq!(allocation.share, 0.5);
            if allocation.vote_account == known {
                assert_eq!(allocation.name, "Orangefin Ventures");
                assert_eq!(allocation.voting_point, 80);
                assert_eq!(allocation.last_voted_at, 4_000);
            } else {
                assert_eq!(allocation.name, "Anonymous");
                assert_eq!(allocation.color, "#FFFFFF");
                assert_eq!(allocation.voting_point, 0);
            }
        }

        let user = view.user.unwrap();
        assert_eq!(user.vejwlsol_amount, 100);
        assert_eq!(user.committed, 80);
        assert_eq!(user.max_vote_weight, 20.0);
    }

    #[tokio::test]
    async fn tick_updates_time_fields_only() {
        let ctx = context();
        let global_state = liquid_global_state();
        let mut chain = MockChain::default();
        chain.insert_anchor(ctx.addresses.liquid_global_state, ctx.liquid_staking_program, &global_state);
        chain.epoch.slot_index = 10;
        let address = ctx.addresses.liquid_global_state;

        let mut refresher = Refresher::new(chain, ctx, None);
        refresher.tick().await.unwrap();
        assert!(refresher.snapshot().liquid.is_none());

        refresher.refresh_liquid().await.unwrap();
        refresher.reader.epoch.slot_index = 50;
        refresher.reader.failing.insert(address);
        refresher.tick().await.unwrap();

        let view = refresher.snapshot().liquid.unwrap();
        assert_eq!(view.epoch.slot_index, 50);
        assert_eq!(view.epoch_progress, 50.0);
        assert_eq!(view.global_state, global_state);
    }

    #[tokio::test]
    async fn tick_failure_of_one_view_still_updates_the_other() {
        let ctx = context();
        let token_mint = Pubkey::new_unique();
        let token_info = TokenInfo {
            token_mint,
            jwltoken_mint: Pubkey::new_unique(),
            epoch_start_time: 1_000,
            ..Default::default()
        };

        let mut chain = MockChain::default();
        chain.block_time = 1_000 + 86_400;
        chain.insert_anchor(ctx.addresses.liquid_global_state, ctx.liquid_staking_program, &liquid_global_state());
        chain.insert_anchor(
            ctx.addresses.token_global_state,
            ctx.token_staking_program,
            &TokenGlobalState::default(),
        );
        chain.insert_anchor(
            get_token_info_address(&ctx.token_staking_program, &token_mint),
            ctx.token_staking_program,
            &token_info,
        );

        let mut refresher = Refresher::new(chain, ctx, None);
        refresher.refresh_liquid().await.unwrap();
        refresher.refresh_token(&token_mint).await.unwrap();
        assert_eq!(refresher.snapshot().token.unwrap().epoch_countdown, 6 * 86_400);

        refresher.reader.epoch_fails = true;
        refresher.reader.block_time = 1_000 + 2 * 86_400;
        assert!(refresher.tick().await.is_err());

        let token = refresher.snapshot().token.unwrap();
        assert_eq!(token.now, 1_000 + 2 * 86_400);
        assert_eq!(token.epoch_countdown, 5 * 86_400);
    }

    #[tokio::test]
    async fn admin_view_lists_registered_tokens() {
        let ctx = context();
        let program_id = ctx.token_staking_program;
        let hades_mint = find_token("hades").unwrap().mint(ctx.network);
        let other_mint = Pubkey::new_unique();

        let mut chain = MockChain::default();
        for (token_mint, total_stakers) in [(hades_mint, 4), (other_mint, 0)] {
            chain.insert_anchor(
                get_token_info_address(&program_id, &token_mint),
                program_id,
                &TokenInfo {
                    token_mint,
                    jwltoken_mint: Pubkey::new_unique(),
                    total_stakers,
                    ..Default::default()
                },
            );
        }
        chain.insert_anchor(ctx.addresses.token_global_state, program_id, &TokenGlobalState::default());

        let refresher = Refresher::new(chain, ctx, None);
        refresher.refresh_admin_tokens().await.unwrap();

        let admin = refresher.snapshot().admin.unwrap();
        assert_eq!(admin.tokens.len(), 2);
        for listing in &admin.tokens {
            if listing.token_info.token_mint == hades_mint {
                assert_eq!(listing.symbol, "HADES");
                assert_eq!(listing.token_info.total_stakers, 4);
            } else {
                assert_eq!(listing.symbol, "UNKNOWN");
            }
        }
    }
}
