use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_cli_output::{display::writeln_name_value, OutputFormat, QuietDisplay, VerboseDisplay};
use solana_sdk::pubkey::Pubkey;
use std::fmt::{Display, Formatter};

use crate::projection::{
    estimated_epoch_rewards, format_countdown, max_deposit, sjwlsol_exchange_rate,
    to_ui_amount, unbonding_epoch, vote_cooldown_over,
};
use crate::snapshot::{GaugeView, LiquidStakingView, TokenListing, TokenStakingView};

pub fn parse_output_format(output_format: &str) -> OutputFormat {
    match output_format {
        "json" => OutputFormat::Json,
        "json-compact" => OutputFormat::JsonCompact,
        "quiet" => OutputFormat::DisplayQuiet,
        "verbose" => OutputFormat::DisplayVerbose,
        _ => OutputFormat::Display,
    }
}

pub fn format_output<T>(output_format: &OutputFormat, command_output: &T) -> String
where
    T: Serialize + Display + QuietDisplay + VerboseDisplay,
{
    output_format.formatted_string(command_output)
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidUserOutput {
    pub sol_balance: f64,
    pub max_deposit: f64,
    pub jwlsol_balance: f64,
    pub sjwlsol_balance: f64,
    pub vejwlsol_amount: f64,
    pub reserved_redeem_amount: f64,
    pub approved_redeem_amount: f64,
    /// Epoch from which the reserved redemption can be claimed.
    pub claimable_epoch: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidStakingOutput {
    pub apy: f64,
    pub exchange_rate: f64,
    pub jwlsol_reserve: f64,
    pub sjwlsol_reserve: f64,
    pub jwlsol_supply: f64,
    pub sjwlsol_supply: f64,
    pub total_sol_earned: f64,
    pub epoch: u64,
    pub epoch_progress: f64,
    pub epoch_countdown: String,
    pub user: Option<LiquidUserOutput>,
}

impl From<&LiquidStakingView> for LiquidStakingOutput {
    fn from(view: &LiquidStakingView) -> Self {
        let global_state = &view.global_state;
        let user = view.user.as_ref().map(|user| {
            let info = user.user_info.loaded().cloned().unwrap_or_default();
            LiquidUserOutput {
                sol_balance: to_ui_amount(user.sol_balance),
                max_deposit: max_deposit(user.sol_balance),
                jwlsol_balance: to_ui_amount(user.jwlsol_balance),
                sjwlsol_balance: to_ui_amount(user.sjwlsol_balance),
                vejwlsol_amount: to_ui_amount(info.vejwlsol_amount),
                reserved_redeem_amount: to_ui_amount(info.reserved_redeem_amount),
                approved_redeem_amount: to_ui_amount(info.approved_redeem_amount),
                claimable_epoch: (info.reserved_redeem_amount > 0)
                    .then(|| unbonding_epoch(info.last_redeem_reserved_epoch)),
            }
        });
        Self {
            apy: view.apy,
            exchange_rate: sjwlsol_exchange_rate(
                global_state.jwlsol_reserve,
                global_state.sjwlsol_reserve,
            ),
            jwlsol_reserve: to_ui_amount(global_state.jwlsol_reserve),
            sjwlsol_reserve: to_ui_amount(global_state.sjwlsol_reserve),
            jwlsol_supply: to_ui_amount(view.jwlsol_supply),
            sjwlsol_supply: to_ui_amount(view.sjwlsol_supply),
            total_sol_earned: to_ui_amount(global_state.total_sol_earned),
            epoch: view.epoch.epoch,
            epoch_progress: view.epoch_progress,
            epoch_countdown: format_countdown(view.epoch_seconds_left),
            user,
        }
    }
}

impl Display for LiquidStakingOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "SJWLSOL APY:", &percent(self.apy))?;
        writeln_name_value(f, "JWLSOL per SJWLSOL:", &format!("{:.6}", self.exchange_rate))?;
        writeln_name_value(f, "JWLSOL supply:", &format!("{:.4}", self.jwlsol_supply))?;
        writeln_name_value(f, "SJWLSOL supply:", &format!("{:.4}", self.sjwlsol_supply))?;
        writeln_name_value(f, "Epoch:", &self.epoch.to_string())?;
        writeln_name_value(f, "Epoch progress:", &percent(self.epoch_progress))?;
        writeln_name_value(f, "Next epoch in:", &self.epoch_countdown)?;
        match &self.user {
            Some(user) => {
                writeln!(f)?;
                writeln_name_value(f, "SOL balance:", &format!("{:.4}", user.sol_balance))?;
                writeln_name_value(f, "Max deposit:", &format!("{:.4}", user.max_deposit))?;
                writeln_name_value(f, "JWLSOL balance:", &format!("{:.4}", user.jwlsol_balance))?;
                writeln_name_value(f, "SJWLSOL balance:", &format!("{:.4}", user.sjwlsol_balance))?;
                writeln_name_value(f, "veJWLSOL:", &format!("{:.4}", user.vejwlsol_amount))?;
                if let Some(epoch) = user.claimable_epoch {
                    writeln_name_value(
                        f,
                        "Reserved redeem:",
                        &format!("{:.4} (claimable from epoch {})", user.reserved_redeem_amount, epoch),
                    )?;
                }
            }
            None => writeln_name_value(f, "Wallet:", "not connected")?,
        }
        Ok(())
    }
}

impl QuietDisplay for LiquidStakingOutput {}
impl VerboseDisplay for LiquidStakingOutput {
    fn write_str(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        write!(w, "{}", self)?;
        writeln!(w)?;
        writeln!(w, "{:<30} {:.4}", "JWLSOL reserve:", self.jwlsol_reserve)?;
        writeln!(w, "{:<30} {:.4}", "SJWLSOL reserve:", self.sjwlsol_reserve)?;
        writeln!(w, "{:<30} {:.4}", "Total SOL earned:", self.total_sol_earned)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUserOutput {
    pub token_balance: f64,
    pub jwltoken_balance: f64,
    pub staked: f64,
    pub total_rewards: f64,
    pub estimated_epoch_rewards: f64,
    /// Unix time at which the stake unlocks, while the cooldown runs.
    pub release_time: Option<i64>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStakingOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub token_mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub jwltoken_mint: Pubkey,
    pub symbol: String,
    pub jwl_symbol: String,
    pub apy: f64,
    pub total_staked: f64,
    pub total_stakers: u64,
    pub epoch_rewards: f64,
    pub jwltoken_supply: f64,
    pub epoch_progress: f64,
    pub epoch_countdown: String,
    pub user: Option<TokenUserOutput>,
}

impl From<&TokenStakingView> for TokenStakingOutput {
    fn from(view: &TokenStakingView) -> Self {
        let token_info = &view.token_info;
        let user = view.user.as_ref().map(|user| TokenUserOutput {
            token_balance: to_ui_amount(user.token_balance),
            jwltoken_balance: to_ui_amount(user.jwltoken_balance),
            staked: to_ui_amount(user.staked()),
            total_rewards: to_ui_amount(user.total_rewards()),
            estimated_epoch_rewards: estimated_epoch_rewards(
                token_info.epoch_rewards,
                user.staked(),
                token_info.total_jwltoken_staked,
            ) / 1e9,
            release_time: view.release_time,
        });
        Self {
            token_mint: view.token_mint,
            jwltoken_mint: token_info.jwltoken_mint,
            symbol: view.symbol.clone(),
            jwl_symbol: view.jwl_symbol(),
            apy: view.apy,
            total_staked: to_ui_amount(token_info.total_jwltoken_staked),
            total_stakers: token_info.total_stakers,
            epoch_rewards: to_ui_amount(token_info.epoch_rewards),
            jwltoken_supply: to_ui_amount(view.jwltoken_supply),
            epoch_progress: view.epoch_progress,
            epoch_countdown: format_countdown(view.epoch_countdown),
            user,
        }
    }
}

impl Display for TokenStakingOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, &format!("{} APY:", self.jwl_symbol), &percent(self.apy))?;
        writeln_name_value(f, "Total staked:", &format!("{:.4}", self.total_staked))?;
        writeln_name_value(f, "Epoch rewards:", &format!("{:.4}", self.epoch_rewards))?;
        writeln_name_value(f, "Epoch progress:", &percent(self.epoch_progress))?;
        writeln_name_value(f, "Next distribution in:", &self.epoch_countdown)?;
        match &self.user {
            Some(user) => {
                writeln!(f)?;
                writeln_name_value(
                    f,
                    &format!("{} balance:", self.symbol),
                    &format!("{:.4}", user.token_balance),
                )?;
                writeln_name_value(
                    f,
                    &format!("{} balance:", self.jwl_symbol),
                    &format!("{:.4}", user.jwltoken_balance),
                )?;
                writeln_name_value(f, "Staked:", &format!("{:.4}", user.staked))?;
                writeln_name_value(f, "Rewards:", &format!("{:.4}", user.total_rewards))?;
                writeln_name_value(
                    f,
                    "Estimated epoch rewards:",
                    &format!("{:.4}", user.estimated_epoch_rewards),
                )?;
                if let Some(release_time) = user.release_time {
                    writeln_name_value(f, "Unlocks at:", &release_time.to_string())?;
                }
            }
            None => writeln_name_value(f, "Wallet:", "not connected")?,
        }
        Ok(())
    }
}

impl QuietDisplay for TokenStakingOutput {}
impl VerboseDisplay for TokenStakingOutput {
    fn write_str(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        write!(w, "{}", self)?;
        writeln!(w)?;
        writeln!(w, "{:<30} {}", "Token mint:", self.token_mint)?;
        writeln!(w, "{:<30} {}", "JWLTOKEN mint:", self.jwltoken_mint)?;
        writeln!(w, "{:<30} {}", "Stakers:", self.total_stakers)?;
        writeln!(w, "{:<30} {:.4}", "JWLTOKEN supply:", self.jwltoken_supply)
    }
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorOutput {
    pub name: String,
    #[serde_as(as = "DisplayFromStr")]
    pub vote_account: Pubkey,
    pub color: String,
    /// Percent of the allocation.
    pub share: f64,
    pub voting_score: u64,
    pub current_score: u64,
    pub voting_point: u64,
    pub can_vote: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeUserOutput {
    pub vejwlsol_amount: f64,
    pub committed: f64,
    pub max_vote_weight: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeOutput {
    pub total_vejwlsol_voted: f64,
    pub vejwlsol_unused: f64,
    pub selected: Option<String>,
    pub validators: Vec<ValidatorOutput>,
    pub user: Option<GaugeUserOutput>,
}

impl From<&GaugeView> for GaugeOutput {
    fn from(view: &GaugeView) -> Self {
        let vejwlsol_amount = view.user.as_ref().map_or(0, |user| user.vejwlsol_amount);
        Self {
            total_vejwlsol_voted: to_ui_amount(view.total_vejwlsol_voted),
            vejwlsol_unused: to_ui_amount(view.vejwlsol_unused),
            selected: view
                .selected
                .and_then(|i| view.validators.get(i))
                .map(|v| v.name.to_string()),
            validators: view
                .validators
                .iter()
                .map(|v| ValidatorOutput {
                    name: v.name.to_string(),
                    vote_account: v.vote_account,
                    color: v.color.to_string(),
                    share: v.share * 100.0,
                    voting_score: v.voting_score,
                    current_score: v.current_score,
                    voting_point: v.voting_point,
                    can_vote: vejwlsol_amount > 0 && vote_cooldown_over(v.last_voted_at, view.now),
                })
                .collect(),
            user: view.user.as_ref().map(|user| GaugeUserOutput {
                vejwlsol_amount: to_ui_amount(user.vejwlsol_amount),
                committed: to_ui_amount(user.committed),
                max_vote_weight: user.max_vote_weight,
            }),
        }
    }
}

impl Display for GaugeOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "veJWLSOL voted:", &format!("{:.4}", self.total_vejwlsol_voted))?;
        writeln_name_value(f, "veJWLSOL unused:", &format!("{:.4}", self.vejwlsol_unused))?;
        if let Some(user) = &self.user {
            writeln_name_value(f, "Your veJWLSOL:", &format!("{:.4}", user.vejwlsol_amount))?;
            writeln_name_value(f, "Max vote weight:", &percent(user.max_vote_weight))?;
        }
        writeln!(f)?;
        for validator in &self.validators {
            let marker = if self.selected.as_deref() == Some(validator.name.as_str()) {
                "*"
            } else {
                " "
            };
            writeln!(
                f,
                "{} {:<24} {:>8} {:<44} {}",
                marker,
                validator.name,
                percent(validator.share),
                validator.vote_account,
                if validator.can_vote { "can vote" } else { "" },
            )?;
        }
        Ok(())
    }
}

impl QuietDisplay for GaugeOutput {}
impl VerboseDisplay for GaugeOutput {}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOutput {
    #[serde_as(as = "DisplayFromStr")]
    pub admin_account: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub bot_account: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub reserve_vault: Pubkey,
    pub total_sol_to_stake: f64,
    pub total_sol_to_redeem: f64,
    pub total_sol_delegated: f64,
    pub total_sol_to_claim: f64,
    pub total_sol_reserved_to_claim: f64,
    pub total_sol_earned: f64,
    pub validators: Vec<String>,
    pub registered_tokens: Vec<RegisteredTokenOutput>,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredTokenOutput {
    pub symbol: String,
    #[serde_as(as = "DisplayFromStr")]
    pub token_mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub jwltoken_mint: Pubkey,
    pub total_stakers: u64,
    pub total_jwltoken_staked: f64,
    pub epoch_rewards: f64,
}

impl From<&TokenListing> for RegisteredTokenOutput {
    fn from(listing: &TokenListing) -> Self {
        let token_info = &listing.token_info;
        Self {
            symbol: listing.symbol.clone(),
            token_mint: token_info.token_mint,
            jwltoken_mint: token_info.jwltoken_mint,
            total_stakers: token_info.total_stakers,
            total_jwltoken_staked: to_ui_amount(token_info.total_jwltoken_staked),
            epoch_rewards: to_ui_amount(token_info.epoch_rewards),
        }
    }
}

impl AdminOutput {
    pub fn new(view: &GaugeView, tokens: &[TokenListing]) -> Self {
        let global_state = &view.global_state;
        Self {
            admin_account: global_state.admin_account,
            bot_account: global_state.bot_account,
            reserve_vault: global_state.reserve_vault,
            total_sol_to_stake: to_ui_amount(global_state.total_sol_to_stake),
            total_sol_to_redeem: to_ui_amount(global_state.total_sol_to_redeem),
            total_sol_delegated: to_ui_amount(global_state.total_sol_delegated),
            total_sol_to_claim: to_ui_amount(global_state.total_sol_to_claim),
            total_sol_reserved_to_claim: to_ui_amount(global_state.total_sol_reserved_to_claim),
            total_sol_earned: to_ui_amount(global_state.total_sol_earned),
            validators: view
                .validators
                .iter()
                .map(|v| format!("{} ({})", v.vote_account, v.name))
                .collect(),
            registered_tokens: tokens.iter().map(RegisteredTokenOutput::from).collect(),
        }
    }
}

impl Display for AdminOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Admin:", &self.admin_account.to_string())?;
        writeln_name_value(f, "Bot:", &self.bot_account.to_string())?;
        writeln_name_value(f, "Reserve vault:", &self.reserve_vault.to_string())?;
        writeln_name_value(f, "SOL to stake:", &format!("{:.4}", self.total_sol_to_stake))?;
        writeln_name_value(f, "SOL to redeem:", &format!("{:.4}", self.total_sol_to_redeem))?;
        writeln_name_value(f, "SOL delegated:", &format!("{:.4}", self.total_sol_delegated))?;
        writeln_name_value(f, "SOL to claim:", &format!("{:.4}", self.total_sol_to_claim))?;
        writeln_name_value(
            f,
            "SOL reserved to claim:",
            &format!("{:.4}", self.total_sol_reserved_to_claim),
        )?;
        writeln_name_value(f, "SOL earned:", &format!("{:.4}", self.total_sol_earned))?;
        writeln!(f)?;
        writeln!(f, "Validators:")?;
        for validator in &self.validators {
            writeln!(f, "  {}", validator)?;
        }
        writeln!(f)?;
        writeln!(f, "Tokens registered:")?;
        if self.registered_tokens.is_empty() {
            writeln!(f, "  No items")?;
        }
        for token in &self.registered_tokens {
            writeln!(
                f,
                "  {} {} (JWL mint {}, {} stakers, {:.4} staked, {:.4} epoch rewards)",
                token.symbol,
                token.token_mint,
                token.jwltoken_mint,
                token.total_stakers,
                token.total_jwltoken_staked,
                token.epoch_rewards,
            )?;
        }
        Ok(())
    }
}

impl QuietDisplay for AdminOutput {}
impl VerboseDisplay for AdminOutput {}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutput {
    pub action: String,
    pub status: String,
    pub signature: Option<String>,
}

impl Display for ActionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln_name_value(f, "Action:", &self.action)?;
        writeln_name_value(f, "Status:", &self.status)?;
        if let Some(signature) = &self.signature {
            writeln_name_value(f, "Signature:", signature)?;
        }
        Ok(())
    }
}

impl QuietDisplay for ActionOutput {
    fn write_str(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        match &self.signature {
            Some(signature) => writeln!(w, "{}", signature),
            None => Ok(()),
        }
    }
}
impl VerboseDisplay for ActionOutput {}
