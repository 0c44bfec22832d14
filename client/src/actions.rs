//! Write actions: local precondition checks, then build, sign and send.
//!
//! Each kind of action moves through its own small state machine so that a
//! second request of the same kind is refused while one is in flight.

use anyhow::{format_err, Result};
use jewelswap_liquid_staking::states::GlobalState as LiquidGlobalState;
use jewelswap_liquid_staking::MIN_DEPOSIT_AMOUNT;
use jewelswap_token_staking::states::TokenInfo;
use log::{error, info, warn};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::context::ClientContext;
use crate::instructions::liquid_staking_instructions::{
    add_validator_instr, claim_sol_instr, deposit_instr, fund_instr, remove_validator_instr,
    reserve_claim_instr, reserve_redeem_instr, stake_jwlsol_instr, unstake_sjwlsol_instr,
    vote_validator_instr,
};
use crate::instructions::rpc::{custom_error_code, ChainReader, ChainWriter};
use crate::instructions::token_staking_instructions::{
    claim_rewards_instr, convert_instr, register_token_instr, stake_jwltoken_instr,
    unstake_jwltoken_instr,
};
use crate::notify;
use crate::projection::{
    clamp_vote_weight, to_base_units, vote_cooldown_over, vote_percentage_arg,
};
use crate::refresher::Refresher;
use crate::snapshot::{LiquidUserState, Snapshot, TokenStakingView, ViewKind};
use jewelswap_liquid_staking::states::VALIDATOR_STORE_LEN;
use jewelswap_token_staking::TOKEN_STAKING_COOLDOWN;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Deposit,
    ReserveRedeem,
    StakeJwlsol,
    UnstakeSjwlsol,
    Vote,
    Convert,
    StakeJwltoken,
    UnstakeJwltoken,
    ClaimRewards,
    AddValidator,
    RemoveValidator,
    Fund,
    ReserveClaim,
    ClaimSol,
    RegisterToken,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Deposit => "deposit SOL",
            ActionKind::ReserveRedeem => "reserve redeem",
            ActionKind::StakeJwlsol => "stake JWLSOL",
            ActionKind::UnstakeSjwlsol => "unstake SJWLSOL",
            ActionKind::Vote => "vote",
            ActionKind::Convert => "convert token",
            ActionKind::StakeJwltoken => "stake JWLTOKEN",
            ActionKind::UnstakeJwltoken => "unstake JWLTOKEN",
            ActionKind::ClaimRewards => "claim rewards",
            ActionKind::AddValidator => "add validator",
            ActionKind::RemoveValidator => "remove validator",
            ActionKind::Fund => "fund",
            ActionKind::ReserveClaim => "reserve claiming",
            ActionKind::ClaimSol => "claim",
            ActionKind::RegisterToken => "register a new token",
        }
    }

    /// View to refresh once the action is confirmed.
    pub fn view(&self) -> Option<ViewKind> {
        match self {
            ActionKind::Deposit
            | ActionKind::ReserveRedeem
            | ActionKind::StakeJwlsol
            | ActionKind::UnstakeSjwlsol
            | ActionKind::Fund
            | ActionKind::ReserveClaim
            | ActionKind::ClaimSol => Some(ViewKind::Liquid),
            ActionKind::Vote | ActionKind::AddValidator | ActionKind::RemoveValidator => {
                Some(ViewKind::Gauge)
            }
            ActionKind::Convert
            | ActionKind::StakeJwltoken
            | ActionKind::UnstakeJwltoken
            | ActionKind::ClaimRewards => Some(ViewKind::Token),
            ActionKind::RegisterToken => Some(ViewKind::Admin),
        }
    }

    fn is_token_staking(&self) -> bool {
        matches!(
            self,
            ActionKind::Convert
                | ActionKind::StakeJwltoken
                | ActionKind::UnstakeJwltoken
                | ActionKind::ClaimRewards
                | ActionKind::RegisterToken
        )
    }

    fn is_admin_only(&self) -> bool {
        matches!(
            self,
            ActionKind::AddValidator
                | ActionKind::RemoveValidator
                | ActionKind::Fund
                | ActionKind::ReserveClaim
                | ActionKind::ClaimSol
                | ActionKind::RegisterToken
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user request. Amounts are in whole tokens as typed; they are converted
/// to base units during validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionRequest {
    Deposit { amount: f64 },
    ReserveRedeem { amount: f64 },
    StakeJwlsol { amount: f64 },
    UnstakeSjwlsol { amount: f64 },
    /// `weight` is the percent of the voting power to put on the validator.
    Vote { vote_account: Option<Pubkey>, weight: f64 },
    Convert { amount: f64, is_staking: bool },
    StakeJwltoken { amount: f64 },
    UnstakeJwltoken { amount: f64 },
    ClaimRewards,
    AddValidator { vote_account: Option<Pubkey> },
    RemoveValidator { vote_account: Option<Pubkey> },
    Fund { amount: f64 },
    ReserveClaim { amount: f64 },
    ClaimSol { amount: f64 },
    RegisterToken {
        token_mint: Option<Pubkey>,
        symbol: String,
        metadata_uri: String,
        staking_percentage: u64,
    },
}

impl ActionRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::Deposit { .. } => ActionKind::Deposit,
            ActionRequest::ReserveRedeem { .. } => ActionKind::ReserveRedeem,
            ActionRequest::StakeJwlsol { .. } => ActionKind::StakeJwlsol,
            ActionRequest::UnstakeSjwlsol { .. } => ActionKind::UnstakeSjwlsol,
            ActionRequest::Vote { .. } => ActionKind::Vote,
            ActionRequest::Convert { .. } => ActionKind::Convert,
            ActionRequest::StakeJwltoken { .. } => ActionKind::StakeJwltoken,
            ActionRequest::UnstakeJwltoken { .. } => ActionKind::UnstakeJwltoken,
            ActionRequest::ClaimRewards => ActionKind::ClaimRewards,
            ActionRequest::AddValidator { .. } => ActionKind::AddValidator,
            ActionRequest::RemoveValidator { .. } => ActionKind::RemoveValidator,
            ActionRequest::Fund { .. } => ActionKind::Fund,
            ActionRequest::ReserveClaim { .. } => ActionKind::ReserveClaim,
            ActionRequest::ClaimSol { .. } => ActionKind::ClaimSol,
            ActionRequest::RegisterToken { .. } => ActionKind::RegisterToken,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Please connect wallet.")]
    WalletNotConnected,
    #[error("Only admin wallets can {0}.")]
    NotAdmin(ActionKind),
    #[error("Global state not initialized.")]
    GlobalStateNotLoaded,
    #[error("Token info not initialized.")]
    TokenInfoNotLoaded,
    #[error("Please input amount to {0}.")]
    MissingAmount(&'static str),
    #[error("Deposit amount should be higher than {}.", MIN_DEPOSIT_AMOUNT)]
    DepositTooSmall,
    #[error("Insufficient {0} balance.")]
    InsufficientBalance(String),
    #[error("Zero staked amount.")]
    NothingStaked,
    #[error("Cooldown is not over.")]
    CooldownNotOver,
    #[error("No rewards.")]
    NoRewards,
    #[error("Please select validator.")]
    NoValidatorSelected,
    #[error("No voting power.")]
    NoVotingPower,
    #[error("Vote weight must be greater than zero.")]
    ZeroVoteWeight,
    #[error("Vote cooldown is not over.")]
    VoteCooldownNotOver,
    #[error("Please input validator vote account.")]
    MissingVoteAccount,
    #[error("Already added.")]
    AlreadyAdded,
    #[error("Invalid vote account.")]
    InvalidVoteAccount,
    #[error("Please input token mint address.")]
    MissingTokenMint,
    #[error("Please input token symbol.")]
    MissingTokenSymbol,
    #[error("Please input jwltoken metadata uri.")]
    MissingMetadataUri,
}

/// What validation hands to the builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validated {
    pub signer: Pubkey,
    /// Base units for amount actions, the scaled percentage for a vote, the
    /// staking percentage for a token registration, zero otherwise.
    pub amount: u64,
}

fn liquid_global_state(snapshot: &Snapshot) -> Result<&LiquidGlobalState, PreconditionError> {
    snapshot
        .liquid
        .as_ref()
        .map(|view| &view.global_state)
        .or_else(|| snapshot.gauge.as_ref().map(|view| &view.global_state))
        .ok_or(PreconditionError::GlobalStateNotLoaded)
}

fn token_view(snapshot: &Snapshot) -> Result<&TokenStakingView, PreconditionError> {
    snapshot.token.as_ref().ok_or(PreconditionError::GlobalStateNotLoaded)
}

fn token_info(snapshot: &Snapshot) -> Result<&TokenInfo, PreconditionError> {
    let view = token_view(snapshot)?;
    if view.token_info.jwltoken_mint == Pubkey::default() {
        return Err(PreconditionError::TokenInfoNotLoaded);
    }
    Ok(&view.token_info)
}

fn base_amount(amount: f64, verb: &'static str) -> Result<u64, PreconditionError> {
    match to_base_units(amount) {
        0 => Err(PreconditionError::MissingAmount(verb)),
        amount => Ok(amount),
    }
}

fn ensure_balance(amount: u64, balance: u64, symbol: &str) -> Result<(), PreconditionError> {
    if amount > balance {
        return Err(PreconditionError::InsufficientBalance(symbol.to_string()));
    }
    Ok(())
}

/// Checks `request` against the last snapshot without touching the network.
///
/// Chain time comes from the snapshot the check runs against.
pub fn validate(
    request: &ActionRequest,
    ctx: &ClientContext,
    snapshot: &Snapshot,
    wallet: Option<Pubkey>,
) -> Result<Validated, PreconditionError> {
    let kind = request.kind();
    let signer = wallet.ok_or(PreconditionError::WalletNotConnected)?;
    if kind.is_admin_only() && !ctx.is_admin(&signer) {
        return Err(PreconditionError::NotAdmin(kind));
    }

    let amount = match request {
        ActionRequest::Deposit { amount } => {
            liquid_global_state(snapshot)?;
            let amount = base_amount(*amount, "stake")?;
            if amount < to_base_units(MIN_DEPOSIT_AMOUNT) {
                return Err(PreconditionError::DepositTooSmall);
            }
            amount
        }
        ActionRequest::ReserveRedeem { amount } | ActionRequest::StakeJwlsol { amount } => {
            liquid_global_state(snapshot)?;
            let verb = match kind {
                ActionKind::ReserveRedeem => "reserve redeem",
                _ => "stake",
            };
            let amount = base_amount(*amount, verb)?;
            let balance = liquid_user(snapshot).map_or(0, |user| user.jwlsol_balance);
            ensure_balance(amount, balance, "JWLSOL")?;
            amount
        }
        ActionRequest::UnstakeSjwlsol { amount } => {
            liquid_global_state(snapshot)?;
            let amount = base_amount(*amount, "unstake")?;
            let balance = liquid_user(snapshot).map_or(0, |user| user.sjwlsol_balance);
            ensure_balance(amount, balance, "SJWLSOL")?;
            amount
        }
        ActionRequest::Vote {
            vote_account,
            weight,
        } => validate_vote(snapshot, *vote_account, *weight)?,
        ActionRequest::Convert { amount, .. } => {
            let view = token_view(snapshot)?;
            token_info(snapshot)?;
            let amount = base_amount(*amount, "convert")?;
            let balance = view.user.as_ref().map_or(0, |user| user.token_balance);
            ensure_balance(amount, balance, &view.symbol)?;
            amount
        }
        ActionRequest::StakeJwltoken { amount } => {
            let view = token_view(snapshot)?;
            token_info(snapshot)?;
            let amount = base_amount(*amount, "stake")?;
            let balance = view.user.as_ref().map_or(0, |user| user.jwltoken_balance);
            ensure_balance(amount, balance, &view.jwl_symbol())?;
            amount
        }
        ActionRequest::UnstakeJwltoken { amount } => {
            let view = token_view(snapshot)?;
            let user = view.user.as_ref();
            let staked = user.map_or(0, |user| user.staked());
            if staked == 0 {
                return Err(PreconditionError::NothingStaked);
            }
            token_info(snapshot)?;
            let amount = base_amount(*amount, "unstake")?;
            ensure_balance(amount, staked, &format!("staked {}", view.jwl_symbol()))?;
            let last_staked_at = user.map_or(0, |user| user.last_staked_at());
            if last_staked_at + TOKEN_STAKING_COOLDOWN >= view.now {
                return Err(PreconditionError::CooldownNotOver);
            }
            amount
        }
        ActionRequest::ClaimRewards => {
            let view = token_view(snapshot)?;
            token_info(snapshot)?;
            match view.user.as_ref().map_or(0, |user| user.total_rewards()) {
                0 => return Err(PreconditionError::NoRewards),
                rewards => rewards,
            }
        }
        ActionRequest::AddValidator { vote_account } => {
            let gauge = snapshot
                .gauge
                .as_ref()
                .ok_or(PreconditionError::GlobalStateNotLoaded)?;
            let vote_account = vote_account.ok_or(PreconditionError::MissingVoteAccount)?;
            if gauge.validators.iter().any(|v| v.vote_account == vote_account) {
                return Err(PreconditionError::AlreadyAdded);
            }
            0
        }
        ActionRequest::RemoveValidator { vote_account } => {
            let gauge = snapshot
                .gauge
                .as_ref()
                .ok_or(PreconditionError::GlobalStateNotLoaded)?;
            let vote_account = vote_account.ok_or(PreconditionError::MissingVoteAccount)?;
            if !gauge.validators.iter().any(|v| v.vote_account == vote_account) {
                return Err(PreconditionError::InvalidVoteAccount);
            }
            0
        }
        ActionRequest::Fund { amount } => {
            liquid_global_state(snapshot)?;
            base_amount(*amount, "fund")?
        }
        ActionRequest::ReserveClaim { amount } => {
            liquid_global_state(snapshot)?;
            base_amount(*amount, "reserve claiming")?
        }
        ActionRequest::ClaimSol { amount } => {
            liquid_global_state(snapshot)?;
            base_amount(*amount, "claim")?
        }
        ActionRequest::RegisterToken {
            token_mint,
            symbol,
            metadata_uri,
            staking_percentage,
        } => {
            if symbol.trim().is_empty() {
                return Err(PreconditionError::MissingTokenSymbol);
            }
            if token_mint.is_none() {
                return Err(PreconditionError::MissingTokenMint);
            }
            if metadata_uri.trim().is_empty() {
                return Err(PreconditionError::MissingMetadataUri);
            }
            *staking_percentage
        }
    };

    Ok(Validated { signer, amount })
}

fn liquid_user(snapshot: &Snapshot) -> Option<&LiquidUserState> {
    snapshot.liquid.as_ref()?.user.as_ref()
}

/// Returns the vote argument: weight in percent scaled by 100.
fn validate_vote(
    snapshot: &Snapshot,
    vote_account: Option<Pubkey>,
    weight: f64,
) -> Result<u64, PreconditionError> {
    let gauge = snapshot
        .gauge
        .as_ref()
        .ok_or(PreconditionError::GlobalStateNotLoaded)?;
    let user = gauge.user.as_ref().cloned().unwrap_or_default();
    if user.vejwlsol_amount == 0 {
        return Err(PreconditionError::NoVotingPower);
    }
    let validator = vote_account
        .and_then(|vote_account| {
            gauge
                .validators
                .iter()
                .find(|v| v.vote_account == vote_account)
        })
        .ok_or(PreconditionError::NoValidatorSelected)?;
    if !vote_cooldown_over(validator.last_voted_at, gauge.now) {
        return Err(PreconditionError::VoteCooldownNotOver);
    }
    let weight = clamp_vote_weight(weight, user.vejwlsol_amount, user.committed);
    match vote_percentage_arg(weight) {
        0 => Err(PreconditionError::ZeroVoteWeight),
        percentage => Ok(percentage),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Confirmed,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0} is already in progress")]
    Busy(ActionKind),
    #[error("{kind} cannot move from {from:?} to {to:?}")]
    IllegalTransition {
        kind: ActionKind,
        from: ActionState,
        to: ActionState,
    },
}

#[derive(Debug)]
pub enum ActionOutcome {
    Rejected(PreconditionError),
    Confirmed(Signature),
    Failed,
}

#[derive(Debug, Default)]
pub struct ActionTracker {
    states: HashMap<ActionKind, ActionState>,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, kind: ActionKind) -> ActionState {
        self.states.get(&kind).copied().unwrap_or_default()
    }

    fn transition(
        &mut self,
        kind: ActionKind,
        allowed: &[ActionState],
        to: ActionState,
    ) -> Result<(), ActionError> {
        let from = self.state(kind);
        if !allowed.contains(&from) {
            return Err(ActionError::IllegalTransition { kind, from, to });
        }
        self.states.insert(kind, to);
        Ok(())
    }

    pub fn start(&mut self, kind: ActionKind) -> Result<(), ActionError> {
        if self.state(kind) != ActionState::Idle {
            return Err(ActionError::Busy(kind));
        }
        self.transition(kind, &[ActionState::Idle], ActionState::Validating)
    }

    pub fn submit(&mut self, kind: ActionKind) -> Result<(), ActionError> {
        self.transition(kind, &[ActionState::Validating], ActionState::Submitting)
    }

    pub fn finish(&mut self, kind: ActionKind, confirmed: bool) -> Result<(), ActionError> {
        let to = if confirmed {
            ActionState::Confirmed
        } else {
            ActionState::Failed
        };
        self.transition(kind, &[ActionState::Submitting], to)
    }

    /// Back to `Idle` after a rejected validation or a finished submission.
    pub fn reset(&mut self, kind: ActionKind) -> Result<(), ActionError> {
        self.transition(
            kind,
            &[
                ActionState::Validating,
                ActionState::Confirmed,
                ActionState::Failed,
            ],
            ActionState::Idle,
        )
    }

    /// Validates, signs and sends `request`, refreshes the affected view and
    /// shows a notice. Only a request of a kind already in flight is an `Err`.
    pub async fn run<R>(
        &mut self,
        refresher: &Refresher<R>,
        payer: Option<&Keypair>,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, ActionError>
    where
        R: ChainReader + ChainWriter,
    {
        let kind = request.kind();
        self.start(kind)?;

        let wallet = payer
            .map(|payer| payer.pubkey())
            .filter(|payer| refresher.wallet() == Some(*payer));
        let snapshot = refresher.snapshot();
        let validated = match validate(request, refresher.context(), &snapshot, wallet) {
            Ok(validated) => validated,
            Err(err) => return self.reject(kind, err),
        };
        let Some(payer) = payer else {
            return self.reject(kind, PreconditionError::WalletNotConnected);
        };

        // accounts the program creates must be funded and signed for
        let extra_signer = match kind {
            ActionKind::AddValidator | ActionKind::RegisterToken => Some(Keypair::new()),
            _ => None,
        };
        if let ActionRequest::AddValidator {
            vote_account: Some(vote_account),
        } = request
        {
            match refresher.reader().fetch_account(vote_account).await {
                Ok(Some(account)) if account.owner == solana_sdk::vote::program::id() => {}
                Ok(_) => return self.reject(kind, PreconditionError::InvalidVoteAccount),
                Err(err) => {
                    error!("failed to read vote account {}: {:#}", vote_account, err);
                    notify::error(&format!("Failed to {}", kind));
                    self.reset(kind)?;
                    return Ok(ActionOutcome::Failed);
                }
            }
        }

        self.submit(kind)?;
        let result = self
            .sign_and_send(
                refresher,
                payer,
                extra_signer.as_ref(),
                request,
                &snapshot,
                validated,
            )
            .await;

        let outcome = match result {
            Ok(signature) => {
                info!("{} confirmed: {}", kind, signature);
                self.finish(kind, true)?;
                if let Err(err) = refresh_view(refresher, kind, &snapshot).await {
                    warn!("refresh after {} failed: {:#}", kind, err);
                }
                notify::success(&format!("Successful to {}", kind));
                ActionOutcome::Confirmed(signature)
            }
            Err(err) => {
                error!("{} failed: {:#}", kind, err);
                self.finish(kind, false)?;
                notify::error(&format!("Failed to {}", kind));
                ActionOutcome::Failed
            }
        };
        self.reset(kind)?;
        Ok(outcome)
    }

    fn reject(
        &mut self,
        kind: ActionKind,
        err: PreconditionError,
    ) -> Result<ActionOutcome, ActionError> {
        notify::warn(&err.to_string());
        self.reset(kind)?;
        Ok(ActionOutcome::Rejected(err))
    }

    async fn sign_and_send<R>(
        &self,
        refresher: &Refresher<R>,
        payer: &Keypair,
        extra_signer: Option<&Keypair>,
        request: &ActionRequest,
        snapshot: &Snapshot,
        validated: Validated,
    ) -> Result<Signature>
    where
        R: ChainReader + ChainWriter,
    {
        let writer = refresher.reader();
        let store_rent = match request {
            ActionRequest::AddValidator { .. } => {
                writer
                    .minimum_balance_for_rent_exemption(VALIDATOR_STORE_LEN)
                    .await?
            }
            _ => 0,
        };
        let instructions = build_instructions(
            request,
            refresher.context(),
            snapshot,
            validated,
            extra_signer.map(|signer| signer.pubkey()),
            store_rent,
        )?;

        let mut signers = vec![payer];
        signers.extend(extra_signer);
        let recent_hash = writer.latest_blockhash().await?;
        let txn = Transaction::new_signed_with_payer(
            &instructions,
            Some(&payer.pubkey()),
            &signers,
            recent_hash,
        );

        writer.send_txn(&txn).await.map_err(|err| {
            match custom_error_code(&err).and_then(|code| program_error_name(request.kind(), code))
            {
                Some(name) => format_err!("program error {}: {}", name, err),
                None => format_err!(err),
            }
        })
    }
}

fn program_error_name(kind: ActionKind, code: u32) -> Option<String> {
    if kind.is_token_staking() {
        jewelswap_token_staking::error::ErrorCode::from_code(code).map(|code| code.name())
    } else {
        jewelswap_liquid_staking::error::ErrorCode::from_code(code).map(|code| code.name())
    }
}

/// `extra_signer` is the fresh validator store or JWLTOKEN mint address.
fn build_instructions(
    request: &ActionRequest,
    ctx: &ClientContext,
    snapshot: &Snapshot,
    validated: Validated,
    extra_signer: Option<Pubkey>,
    store_rent: u64,
) -> Result<Vec<Instruction>> {
    let Validated { signer, amount } = validated;
    let missing = || format_err!("{} is missing its generated account", request.kind());

    match request {
        ActionRequest::Deposit { .. } => {
            deposit_instr(ctx, liquid_global_state(snapshot)?, signer, amount)
        }
        ActionRequest::ReserveRedeem { .. } => {
            reserve_redeem_instr(ctx, liquid_global_state(snapshot)?, signer, amount)
        }
        ActionRequest::StakeJwlsol { .. } => {
            stake_jwlsol_instr(ctx, liquid_global_state(snapshot)?, signer, amount)
        }
        ActionRequest::UnstakeSjwlsol { .. } => {
            unstake_sjwlsol_instr(ctx, liquid_global_state(snapshot)?, signer, amount)
        }
        ActionRequest::Vote { vote_account, .. } => {
            let vote_account = vote_account.ok_or(PreconditionError::NoValidatorSelected)?;
            vote_validator_instr(ctx, signer, vote_account, amount)
        }
        ActionRequest::Convert { is_staking, .. } => {
            convert_instr(ctx, token_info(snapshot)?, signer, amount, *is_staking)
        }
        ActionRequest::StakeJwltoken { .. } => {
            stake_jwltoken_instr(ctx, token_info(snapshot)?, signer, amount)
        }
        ActionRequest::UnstakeJwltoken { .. } => {
            unstake_jwltoken_instr(ctx, token_info(snapshot)?, signer, amount)
        }
        ActionRequest::ClaimRewards => {
            claim_rewards_instr(ctx, token_info(snapshot)?, signer, amount)
        }
        ActionRequest::AddValidator { vote_account } => {
            let vote_account = vote_account.ok_or(PreconditionError::MissingVoteAccount)?;
            let validator_store = extra_signer.ok_or_else(missing)?;
            add_validator_instr(ctx, signer, vote_account, validator_store, store_rent)
        }
        ActionRequest::RemoveValidator { vote_account } => {
            let vote_account = vote_account.ok_or(PreconditionError::MissingVoteAccount)?;
            let validator = snapshot
                .gauge
                .as_ref()
                .and_then(|gauge| {
                    gauge
                        .validators
                        .iter()
                        .find(|v| v.vote_account == vote_account)
                })
                .ok_or(PreconditionError::InvalidVoteAccount)?;
            remove_validator_instr(ctx, signer, vote_account, validator.validator_store)
        }
        ActionRequest::Fund { .. } => {
            fund_instr(ctx, liquid_global_state(snapshot)?, signer, amount)
        }
        ActionRequest::ReserveClaim { .. } => reserve_claim_instr(ctx, signer, amount),
        ActionRequest::ClaimSol { .. } => {
            claim_sol_instr(ctx, liquid_global_state(snapshot)?, signer, amount)
        }
        ActionRequest::RegisterToken {
            token_mint,
            symbol,
            metadata_uri,
            ..
        } => {
            let token_mint = token_mint.ok_or(PreconditionError::MissingTokenMint)?;
            let jwltoken_mint = extra_signer.ok_or_else(missing)?;
            let jwltoken_symbol = format!(
                "{}{}",
                jewelswap_token_staking::JWLTOKEN_PREFIX,
                symbol.trim().to_uppercase()
            );
            register_token_instr(
                ctx,
                signer,
                token_mint,
                jwltoken_mint,
                amount,
                jwltoken_symbol,
                metadata_uri.trim().to_string(),
            )
        }
    }
}

async fn refresh_view<R: ChainReader>(
    refresher: &Refresher<R>,
    kind: ActionKind,
    snapshot: &Snapshot,
) -> Result<()> {
    match kind.view() {
        Some(ViewKind::Liquid) => refresher.refresh_liquid().await,
        Some(ViewKind::Gauge) => refresher.refresh_gauge().await,
        Some(ViewKind::Admin) => refresher.refresh_admin_tokens().await,
        Some(ViewKind::Token) => match snapshot.token.as_ref() {
            Some(view) => refresher.refresh_token(&view.token_mint).await,
            None => Ok(()),
        },
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        AccountState, GaugeUserState, GaugeView, LiquidStakingView, TokenUserState,
        ValidatorAllocation,
    };
    use crate::test_utils::{context, MockChain};
    use jewelswap_liquid_staking::VOTE_COOLDOWN;
    use jewelswap_token_staking::states::{GlobalState as TokenGlobalState, UserJwltokenInfo};
    use solana_sdk::epoch_info::EpochInfo;

    const SOL: u64 = 1_000_000_000;

    fn liquid_snapshot(user: Option<LiquidUserState>) -> Snapshot {
        Snapshot {
            liquid: Some(LiquidStakingView::new(
                LiquidGlobalState {
                    jwlsol_mint: Pubkey::new_unique(),
                    sjwlsol_mint: Pubkey::new_unique(),
                    ..Default::default()
                },
                EpochInfo {
                    epoch: 600,
                    slot_index: 0,
                    slots_in_epoch: 100,
                    absolute_slot: 0,
                    block_height: 0,
                    transaction_count: None,
                },
                0,
                0,
                0,
                user,
            )),
            ..Default::default()
        }
    }

    fn token_snapshot(user: Option<TokenUserState>, now: i64) -> Snapshot {
        let token_mint = Pubkey::new_unique();
        Snapshot {
            token: Some(TokenStakingView::new(
                token_mint,
                "HADES".to_string(),
                TokenGlobalState::default(),
                TokenInfo {
                    token_mint,
                    jwltoken_mint: Pubkey::new_unique(),
                    ..Default::default()
                },
                now,
                0,
                user,
            )),
            ..Default::default()
        }
    }

    fn gauge_snapshot(vote_account: Pubkey, user: GaugeUserState, last_voted_at: i64) -> Snapshot {
        Snapshot {
            gauge: Some(GaugeView {
                global_state: LiquidGlobalState::default(),
                now: 100 * 86_400,
                validators: vec![ValidatorAllocation {
                    address: Pubkey::new_unique(),
                    vote_account,
                    validator_store: Pubkey::new_unique(),
                    name: "Anonymous",
                    color: "#FFFFFF",
                    voting_score: 0,
                    current_score: 0,
                    share: 1.0,
                    voting_point: user.committed,
                    last_voted_at,
                }],
                selected: Some(0),
                total_vejwlsol_voted: 0,
                vejwlsol_unused: 0,
                user: Some(user),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn wallet_is_checked_first() {
        let err = validate(
            &ActionRequest::Deposit { amount: 1.0 },
            &context(),
            &Snapshot::default(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, PreconditionError::WalletNotConnected);
        assert_eq!(err.to_string(), "Please connect wallet.");
    }

    #[test]
    fn deposit_checks() {
        let ctx = context();
        let wallet = Some(Pubkey::new_unique());
        let request = ActionRequest::Deposit { amount: 1.0 };
        assert_eq!(
            validate(&request, &ctx, &Snapshot::default(), wallet),
            Err(PreconditionError::GlobalStateNotLoaded)
        );

        let snapshot = liquid_snapshot(None);
        assert_eq!(
            validate(&ActionRequest::Deposit { amount: 0.0 }, &ctx, &snapshot, wallet),
            Err(PreconditionError::MissingAmount("stake"))
        );
        assert_eq!(
            validate(&ActionRequest::Deposit { amount: 0.001 }, &ctx, &snapshot, wallet),
            Err(PreconditionError::DepositTooSmall)
        );
        assert_eq!(
            validate(&request, &ctx, &snapshot, wallet).unwrap().amount,
            SOL
        );
    }

    #[test]
    fn stake_is_bounded_by_balance() {
        let ctx = context();
        let wallet = Some(Pubkey::new_unique());
        let snapshot = liquid_snapshot(Some(LiquidUserState {
            jwlsol_balance: 2 * SOL,
            ..Default::default()
        }));

        let err = validate(&ActionRequest::StakeJwlsol { amount: 3.0 }, &ctx, &snapshot, wallet)
            .unwrap_err();
        assert_eq!(err.to_string(), "Insufficient JWLSOL balance.");
        assert!(validate(&ActionRequest::StakeJwlsol { amount: 2.0 }, &ctx, &snapshot, wallet).is_ok());
        assert_eq!(
            validate(&ActionRequest::UnstakeSjwlsol { amount: 1.0 }, &ctx, &snapshot, wallet),
            Err(PreconditionError::InsufficientBalance("SJWLSOL".to_string()))
        );
    }

    #[test]
    fn unstake_jwltoken_waits_for_cooldown() {
        let ctx = context();
        let wallet = Some(Pubkey::new_unique());
        let staked_at = 1_000;
        let user = TokenUserState {
            user_jwltoken_info: AccountState::Loaded(UserJwltokenInfo {
                jwltoken_staked: 5 * SOL,
                last_staked_at: staked_at as u64,
                ..Default::default()
            }),
            ..Default::default()
        };
        let request = ActionRequest::UnstakeJwltoken { amount: 1.0 };

        let snapshot = token_snapshot(Some(user.clone()), staked_at + TOKEN_STAKING_COOLDOWN);
        assert_eq!(
            validate(&request, &ctx, &snapshot, wallet),
            Err(PreconditionError::CooldownNotOver)
        );

        let snapshot = token_snapshot(Some(user), staked_at + TOKEN_STAKING_COOLDOWN + 1);
        assert_eq!(validate(&request, &ctx, &snapshot, wallet).unwrap().amount, SOL);

        let snapshot = token_snapshot(Some(TokenUserState::default()), 0);
        assert_eq!(
            validate(&request, &ctx, &snapshot, wallet),
            Err(PreconditionError::NothingStaked)
        );
    }

    #[test]
    fn claim_needs_rewards() {
        let ctx = context();
        let wallet = Some(Pubkey::new_unique());
        let snapshot = token_snapshot(Some(TokenUserState::default()), 0);
        assert_eq!(
            validate(&ActionRequest::ClaimRewards, &ctx, &snapshot, wallet),
            Err(PreconditionError::NoRewards)
        );

        let snapshot = token_snapshot(
            Some(TokenUserState {
                user_jwltoken_info: AccountState::Loaded(UserJwltokenInfo {
                    total_rewards: 42,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            0,
        );
        assert_eq!(
            validate(&ActionRequest::ClaimRewards, &ctx, &snapshot, wallet)
                .unwrap()
                .amount,
            42
        );
    }

    #[test]
    fn vote_is_clamped_to_uncommitted_power() {
        let ctx = context();
        let wallet = Some(Pubkey::new_unique());
        let vote_account = Pubkey::new_unique();
        let user = GaugeUserState {
            vejwlsol_amount: 100,
            committed: 80,
            max_vote_weight: 20.0,
        };
        let snapshot = gauge_snapshot(vote_account, user.clone(), 0);

        let request = ActionRequest::Vote {
            vote_account: Some(vote_account),
            weight: 50.0,
        };
        assert_eq!(validate(&request, &ctx, &snapshot, wallet).unwrap().amount, 2_000);

        let request = ActionRequest::Vote {
            vote_account: None,
            weight: 50.0,
        };
        assert_eq!(
            validate(&request, &ctx, &snapshot, wallet),
            Err(PreconditionError::NoValidatorSelected)
        );

        let snapshot = gauge_snapshot(vote_account, user, 100 * 86_400 - VOTE_COOLDOWN + 1);
        let request = ActionRequest::Vote {
            vote_account: Some(vote_account),
            weight: 10.0,
        };
        assert_eq!(
            validate(&request, &ctx, &snapshot, wallet),
            Err(PreconditionError::VoteCooldownNotOver)
        );
    }

    #[test]
    fn admin_actions_need_an_admin_wallet() {
        let admin = Pubkey::new_unique();
        let mut ctx = context();
        ctx.admin_wallets = vec![admin];
        let vote_account = Pubkey::new_unique();
        let snapshot = gauge_snapshot(vote_account, GaugeUserState::default(), 0);

        let request = ActionRequest::AddValidator {
            vote_account: Some(vote_account),
        };
        assert_eq!(
            validate(&request, &ctx, &snapshot, Some(Pubkey::new_unique())),
            Err(PreconditionError::NotAdmin(ActionKind::AddValidator))
        );
        assert_eq!(
            validate(&request, &ctx, &snapshot, Some(admin)),
            Err(PreconditionError::AlreadyAdded)
        );

        let request = ActionRequest::RemoveValidator {
            vote_account: Some(Pubkey::new_unique()),
        };
        assert_eq!(
            validate(&request, &ctx, &snapshot, Some(admin)),
            Err(PreconditionError::InvalidVoteAccount)
        );

        let request = ActionRequest::RegisterToken {
            token_mint: Some(Pubkey::new_unique()),
            symbol: "hades".to_string(),
            metadata_uri: " ".to_string(),
            staking_percentage: 50,
        };
        assert_eq!(
            validate(&request, &ctx, &snapshot, Some(admin)),
            Err(PreconditionError::MissingMetadataUri)
        );
    }

    #[test]
    fn tracker_rejects_concurrent_starts() {
        let mut tracker = ActionTracker::new();
        tracker.start(ActionKind::Deposit).unwrap();
        assert_eq!(
            tracker.start(ActionKind::Deposit),
            Err(ActionError::Busy(ActionKind::Deposit))
        );
        tracker.start(ActionKind::Vote).unwrap();

        tracker.submit(ActionKind::Deposit).unwrap();
        assert_eq!(tracker.state(ActionKind::Deposit), ActionState::Submitting);
        assert!(tracker.reset(ActionKind::Deposit).is_err());
        tracker.finish(ActionKind::Deposit, false).unwrap();
        assert_eq!(tracker.state(ActionKind::Deposit), ActionState::Failed);
        tracker.reset(ActionKind::Deposit).unwrap();
        assert_eq!(tracker.state(ActionKind::Deposit), ActionState::Idle);

        assert!(tracker.finish(ActionKind::Vote, true).is_err());
    }

    #[test]
    fn register_token_uses_prefixed_symbol() {
        let ctx = context();
        let request = ActionRequest::RegisterToken {
            token_mint: Some(Pubkey::new_unique()),
            symbol: "hades".to_string(),
            metadata_uri: "https://example.com/jwlhades.json".to_string(),
            staking_percentage: 50,
        };
        let validated = Validated {
            signer: Pubkey::new_unique(),
            amount: 50,
        };
        let mint = Pubkey::new_unique();
        let instructions =
            build_instructions(&request, &ctx, &Snapshot::default(), validated, Some(mint), 0)
                .unwrap();
        assert_eq!(instructions.len(), 1);
        let data = &instructions[0].data;
        let needle = b"JWLHADES";
        assert!(data.windows(needle.len()).any(|window| window == needle));
        assert!(instructions[0]
            .accounts
            .iter()
            .any(|meta| meta.pubkey == mint && meta.is_signer));
    }

    #[tokio::test]
    async fn confirmed_action_refreshes_and_returns_to_idle() {
        let ctx = context();
        let payer = Keypair::new();
        let global_state = LiquidGlobalState {
            jwlsol_mint: Pubkey::new_unique(),
            sjwlsol_mint: Pubkey::new_unique(),
            ..Default::default()
        };
        let mut chain = MockChain::default();
        chain.insert_anchor(ctx.addresses.liquid_global_state, ctx.liquid_staking_program, &global_state);
        chain.balances.insert(payer.pubkey(), 5 * SOL);

        let refresher = Refresher::new(chain, ctx, Some(payer.pubkey()));
        refresher.refresh_liquid().await.unwrap();

        let mut tracker = ActionTracker::new();
        let outcome = tracker
            .run(&refresher, Some(&payer), &ActionRequest::Deposit { amount: 1.0 })
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::Confirmed(_)));
        assert_eq!(tracker.state(ActionKind::Deposit), ActionState::Idle);

        let sent = refresher.reader().sent_transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message.account_keys[0], payer.pubkey());
    }

    #[tokio::test]
    async fn failed_send_and_rejection_return_to_idle() {
        let ctx = context();
        let payer = Keypair::new();
        let mut chain = MockChain::default();
        chain.insert_anchor(
            ctx.addresses.liquid_global_state,
            ctx.liquid_staking_program,
            &LiquidGlobalState::default(),
        );
        chain.send_error = Some(6000);

        let refresher = Refresher::new(chain, ctx, Some(payer.pubkey()));
        refresher.refresh_liquid().await.unwrap();
        let mut tracker = ActionTracker::new();

        let outcome = tracker
            .run(&refresher, Some(&payer), &ActionRequest::Deposit { amount: 1.0 })
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::Failed));
        assert_eq!(tracker.state(ActionKind::Deposit), ActionState::Idle);

        let outcome = tracker
            .run(&refresher, None, &ActionRequest::Deposit { amount: 1.0 })
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            ActionOutcome::Rejected(PreconditionError::WalletNotConnected)
        ));
        assert_eq!(tracker.state(ActionKind::Deposit), ActionState::Idle);
        assert!(refresher.reader().sent_transactions().is_empty());
    }
}
