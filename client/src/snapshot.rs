//! Last known state of each view and the ticket rule that keeps a slow
//! refresh cycle from overwriting a newer one.

use jewelswap_liquid_staking::states::{
    GlobalState as LiquidGlobalState, UserInfoAccount,
};
use jewelswap_token_staking::states::{
    GlobalState as TokenGlobalState, TokenInfo, UserJwltokenInfo,
};
use jewelswap_token_staking::TOKEN_STAKING_EPOCH;
use solana_sdk::{epoch_info::EpochInfo, pubkey::Pubkey};

use crate::projection::{
    cooldown_release_time, epoch_progress, epoch_seconds_left, liquid_staking_apy,
    token_epoch_countdown, token_epoch_progress, token_staking_apy,
};

/// A per-user account that may legitimately not exist yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AccountState<T> {
    #[default]
    NotCreated,
    Loaded(T),
}

impl<T> AccountState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            AccountState::Loaded(value) => Some(value),
            AccountState::NotCreated => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, AccountState::Loaded(_))
    }
}

impl<T> From<Option<T>> for AccountState<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(AccountState::NotCreated, AccountState::Loaded)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiquidUserState {
    pub user_info: AccountState<UserInfoAccount>,
    pub sol_balance: u64,
    pub jwlsol_balance: u64,
    pub sjwlsol_balance: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiquidStakingView {
    pub global_state: LiquidGlobalState,
    pub epoch: EpochInfo,
    pub now: i64,
    pub jwlsol_supply: u64,
    pub sjwlsol_supply: u64,
    pub apy: f64,
    pub epoch_progress: f64,
    pub epoch_seconds_left: i64,
    /// `None` while no wallet is connected.
    pub user: Option<LiquidUserState>,
}

impl LiquidStakingView {
    pub fn new(
        global_state: LiquidGlobalState,
        epoch: EpochInfo,
        now: i64,
        jwlsol_supply: u64,
        sjwlsol_supply: u64,
        user: Option<LiquidUserState>,
    ) -> Self {
        let apy = liquid_staking_apy(
            global_state.jwlsol_reserve,
            global_state.sjwlsol_reserve,
            now - jewelswap_liquid_staking::CONTRACT_DEPLOYED_AT,
        );
        let mut view = Self {
            global_state,
            epoch: epoch.clone(),
            now,
            jwlsol_supply,
            sjwlsol_supply,
            apy,
            epoch_progress: 0.0,
            epoch_seconds_left: 0,
            user,
        };
        view.set_epoch(epoch);
        view
    }

    pub fn set_epoch(&mut self, epoch: EpochInfo) {
        self.epoch_progress = epoch_progress(epoch.slot_index, epoch.slots_in_epoch);
        self.epoch_seconds_left = epoch_seconds_left(epoch.slot_index, epoch.slots_in_epoch);
        self.epoch = epoch;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenUserState {
    pub user_jwltoken_info: AccountState<UserJwltokenInfo>,
    pub token_balance: u64,
    pub jwltoken_balance: u64,
}

impl TokenUserState {
    pub fn staked(&self) -> u64 {
        self.user_jwltoken_info
            .loaded()
            .map_or(0, |info| info.jwltoken_staked)
    }

    pub fn total_rewards(&self) -> u64 {
        self.user_jwltoken_info
            .loaded()
            .map_or(0, |info| info.total_rewards)
    }

    pub fn last_staked_at(&self) -> i64 {
        self.user_jwltoken_info
            .loaded()
            .map_or(0, |info| info.last_staked_at as i64)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TokenStakingView {
    pub token_mint: Pubkey,
    pub symbol: String,
    pub global_state: TokenGlobalState,
    pub token_info: TokenInfo,
    pub now: i64,
    pub jwltoken_supply: u64,
    pub apy: f64,
    pub epoch_countdown: i64,
    pub epoch_progress: f64,
    /// Unlock time of the wallet's stake while the cooldown runs.
    pub release_time: Option<i64>,
    pub user: Option<TokenUserState>,
}

impl TokenStakingView {
    pub fn new(
        token_mint: Pubkey,
        symbol: String,
        global_state: TokenGlobalState,
        token_info: TokenInfo,
        now: i64,
        jwltoken_supply: u64,
        user: Option<TokenUserState>,
    ) -> Self {
        let mut view = Self {
            token_mint,
            symbol,
            global_state,
            token_info: token_info.clone(),
            now,
            jwltoken_supply,
            apy: 0.0,
            epoch_countdown: 0,
            epoch_progress: 0.0,
            release_time: None,
            user,
        };
        view.set_time(token_info, now);
        view
    }

    /// Recomputes every time-dependent figure from a fresh `TokenInfo`.
    pub fn set_time(&mut self, token_info: TokenInfo, now: i64) {
        let epoch_start = token_info.epoch_start_time as i64;
        self.apy = token_staking_apy(
            token_info.epoch_rewards,
            token_info.total_jwltoken_staked,
            now - epoch_start,
            TOKEN_STAKING_EPOCH,
        );
        self.epoch_countdown = token_epoch_countdown(epoch_start, now);
        self.epoch_progress = token_epoch_progress(epoch_start, now, TOKEN_STAKING_EPOCH);
        self.release_time = self
            .user
            .as_ref()
            .and_then(|user| cooldown_release_time(user.last_staked_at(), now));
        self.token_info = token_info;
        self.now = now;
    }

    pub fn jwl_symbol(&self) -> String {
        format!("{}{}", jewelswap_token_staking::JWLTOKEN_PREFIX, self.symbol)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatorAllocation {
    /// Validator PDA of the liquid staking program.
    pub address: Pubkey,
    pub vote_account: Pubkey,
    pub validator_store: Pubkey,
    pub name: &'static str,
    pub color: &'static str,
    pub voting_score: u64,
    pub current_score: u64,
    pub share: f64,
    /// The wallet's points on this validator, zero without a wallet.
    pub voting_point: u64,
    pub last_voted_at: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GaugeUserState {
    pub vejwlsol_amount: u64,
    /// Points already assigned to validators.
    pub committed: u64,
    pub max_vote_weight: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GaugeView {
    pub global_state: LiquidGlobalState,
    pub now: i64,
    pub validators: Vec<ValidatorAllocation>,
    /// Validator with the largest share.
    pub selected: Option<usize>,
    pub total_vejwlsol_voted: u64,
    pub vejwlsol_unused: u64,
    pub user: Option<GaugeUserState>,
}

/// A token registered with the token staking program, as listed on the admin
/// page.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenListing {
    pub address: Pubkey,
    pub symbol: String,
    pub token_info: TokenInfo,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminView {
    pub tokens: Vec<TokenListing>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Liquid,
    Token,
    Gauge,
    Admin,
}

/// Issue order of a refresh cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Clone, Debug)]
pub enum ViewUpdate {
    Liquid(LiquidStakingView),
    Token(TokenStakingView),
    Gauge(GaugeView),
    Admin(AdminView),
    /// Timer update of the chain epoch only.
    LiquidEpoch(EpochInfo),
    /// Timer update of the token epoch figures only.
    TokenTime { token_info: TokenInfo, now: i64 },
}

impl ViewUpdate {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewUpdate::Liquid(_) | ViewUpdate::LiquidEpoch(_) => ViewKind::Liquid,
            ViewUpdate::Token(_) | ViewUpdate::TokenTime { .. } => ViewKind::Token,
            ViewUpdate::Gauge(_) => ViewKind::Gauge,
            ViewUpdate::Admin(_) => ViewKind::Admin,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub liquid: Option<LiquidStakingView>,
    pub token: Option<TokenStakingView>,
    pub gauge: Option<GaugeView>,
    pub admin: Option<AdminView>,
}

#[derive(Debug, Default)]
pub struct SnapshotStore {
    next_ticket: u64,
    last_applied: [Option<Ticket>; 4],
    snapshot: Snapshot,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    /// Applies `update` unless a cycle issued later already updated the same
    /// view. Returns whether the update was applied.
    pub fn apply(&mut self, ticket: Ticket, update: ViewUpdate) -> bool {
        let slot = &mut self.last_applied[update.kind() as usize];
        if matches!(slot, Some(last) if *last > ticket) {
            return false;
        }

        match update {
            ViewUpdate::Liquid(view) => self.snapshot.liquid = Some(view),
            ViewUpdate::Token(view) => self.snapshot.token = Some(view),
            ViewUpdate::Gauge(view) => self.snapshot.gauge = Some(view),
            ViewUpdate::Admin(view) => self.snapshot.admin = Some(view),
            ViewUpdate::LiquidEpoch(epoch) => match self.snapshot.liquid.as_mut() {
                Some(view) => view.set_epoch(epoch),
                None => return false,
            },
            ViewUpdate::TokenTime { token_info, now } => match self.snapshot.token.as_mut() {
                Some(view) if view.token_mint == token_info.token_mint => {
                    view.set_time(token_info, now)
                }
                _ => return false,
            },
        }
        *slot = Some(ticket);
        true
    }

    /// Drops every per-user field and keeps the protocol-wide ones.
    pub fn clear_user_fields(&mut self) {
        if let Some(view) = self.snapshot.liquid.as_mut() {
            view.user = None;
        }
        if let Some(view) = self.snapshot.token.as_mut() {
            view.user = None;
            view.release_time = None;
        }
        if let Some(view) = self.snapshot.gauge.as_mut() {
            view.user = None;
            for validator in view.validators.iter_mut() {
                validator.voting_point = 0;
                validator.last_voted_at = 0;
            }
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}
