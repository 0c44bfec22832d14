//! Pure conversions from raw account values to the figures the views show.
//!
//! Nothing here touches the network; callers pass the chain time they read
//! alongside the accounts.

use jewelswap_liquid_staking::{MAX_FEE_TO_DEPOSIT, UNBONDING_PERIOD, VOTE_COOLDOWN};
use jewelswap_token_staking::{TOKEN_STAKING_COOLDOWN, TOKEN_STAKING_EPOCH};

pub const DAY_IN_SECOND: f64 = 86_400.0;
pub const YEAR_IN_DAY: f64 = 365.0;

/// Both JWL tokens and the registered tokens use nine decimals, like SOL.
pub const TOKEN_DECIMALS: u32 = 9;
const BASE_UNITS_PER_TOKEN: f64 = 1_000_000_000.0;

/// Average slot time used for the epoch countdown.
const SECONDS_PER_SLOT: f64 = 0.4;

/// Annualised yield of SJWLSOL, assuming the reserve grew linearly since the
/// program was deployed.
pub fn liquid_staking_apy(jwlsol_reserve: u64, sjwlsol_reserve: u64, elapsed_seconds: i64) -> f64 {
    if sjwlsol_reserve == 0 || jwlsol_reserve <= sjwlsol_reserve || elapsed_seconds <= 0 {
        return 0.0;
    }
    let increased = (jwlsol_reserve - sjwlsol_reserve) as f64;
    let elapsed_days = elapsed_seconds as f64 / DAY_IN_SECOND;
    increased / sjwlsol_reserve as f64 / elapsed_days * YEAR_IN_DAY * 100.0
}

/// Yield of staked JWLTOKEN: the current epoch's reward rate annualised, then
/// compounded `epoch_length` times.
pub fn token_staking_apy(
    epoch_rewards: u64,
    total_staked: u64,
    elapsed_in_epoch: i64,
    epoch_length: i64,
) -> f64 {
    if total_staked == 0 || elapsed_in_epoch <= 0 || epoch_length <= 0 {
        return 0.0;
    }
    let apr = epoch_rewards as f64 * YEAR_IN_DAY * DAY_IN_SECOND
        / elapsed_in_epoch as f64
        / total_staked as f64;
    let periods = epoch_length as f64;
    ((1.0 + apr / periods).powf(periods) - 1.0) * 100.0
}

/// `"{d}d {hh}h {mm}m {ss}s"`.
pub fn format_countdown(seconds: i64) -> String {
    if seconds <= 0 {
        return "0d 0h 0m 0s".to_string();
    }
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    let secs = seconds % 60;
    format!("{}d {:02}h {:02}m {:02}s", days, hours, minutes, secs)
}

/// Largest vote weight, in percent with two decimals, the uncommitted part of
/// `balance` allows.
pub fn max_vote_weight(balance: u64, committed: u64) -> f64 {
    if balance == 0 || committed >= balance {
        return 0.0;
    }
    let weight = (balance - committed) as f64 / balance as f64 * 100.0;
    (weight * 100.0).round() / 100.0
}

pub fn clamp_vote_weight(requested: f64, balance: u64, committed: u64) -> f64 {
    requested.max(0.0).min(max_vote_weight(balance, committed))
}

/// Vote argument expected by the program: percent scaled by 100.
pub fn vote_percentage_arg(weight: f64) -> u64 {
    (weight * 100.0).round() as u64
}

/// Share of each validator in the allocation, uniform while no score exists.
pub fn allocation_shares(scores: &[u64]) -> Vec<f64> {
    let total: u128 = scores.iter().map(|s| *s as u128).sum();
    if total == 0 {
        let uniform = 1.0 / scores.len() as f64;
        return vec![uniform; scores.len()];
    }
    scores
        .iter()
        .map(|s| *s as f64 / total as f64)
        .collect()
}

/// Index of the first largest share.
pub fn largest_share(shares: &[f64]) -> Option<usize> {
    let mut selected = None;
    let mut max = 0.0;
    for (i, share) in shares.iter().enumerate() {
        if selected.is_none() || *share > max {
            selected = Some(i);
            max = *share;
        }
    }
    selected
}

/// Percent of the current chain epoch that has elapsed.
pub fn epoch_progress(slot_index: u64, slots_in_epoch: u64) -> f64 {
    if slots_in_epoch == 0 {
        return 0.0;
    }
    slot_index as f64 / slots_in_epoch as f64 * 100.0
}

/// Estimated seconds until the next chain epoch.
pub fn epoch_seconds_left(slot_index: u64, slots_in_epoch: u64) -> i64 {
    (slots_in_epoch.saturating_sub(slot_index) as f64 * SECONDS_PER_SLOT) as i64
}

pub fn token_epoch_progress(epoch_start: i64, now: i64, epoch_length: i64) -> f64 {
    if epoch_length <= 0 {
        return 0.0;
    }
    ((now - epoch_start) as f64 / epoch_length as f64 * 100.0).clamp(0.0, 100.0)
}

/// Seconds left until the next token staking reward distribution.
pub fn token_epoch_countdown(epoch_start: i64, now: i64) -> i64 {
    epoch_start + TOKEN_STAKING_EPOCH - now
}

/// Chain epoch at which a redemption reserved in `last_reserved_epoch` can be
/// claimed.
pub fn unbonding_epoch(last_reserved_epoch: u64) -> u64 {
    last_reserved_epoch + UNBONDING_PERIOD + 1
}

/// When staked JWLTOKEN unlocks, or `None` if it already has or was never
/// staked.
pub fn cooldown_release_time(last_staked_at: i64, now: i64) -> Option<i64> {
    if last_staked_at <= 0 {
        return None;
    }
    let release = last_staked_at + TOKEN_STAKING_COOLDOWN;
    (release > now).then_some(release)
}

pub fn vote_cooldown_over(last_voted_at: i64, now: i64) -> bool {
    now > last_voted_at + VOTE_COOLDOWN
}

/// JWLSOL redeemable for one SJWLSOL.
pub fn sjwlsol_exchange_rate(jwlsol_reserve: u64, sjwlsol_reserve: u64) -> f64 {
    if jwlsol_reserve == 0 || sjwlsol_reserve == 0 {
        return 1.0;
    }
    jwlsol_reserve as f64 / sjwlsol_reserve as f64
}

/// The wallet's pro-rata part of this epoch's rewards, in base units.
pub fn estimated_epoch_rewards(epoch_rewards: u64, staked: u64, total_staked: u64) -> f64 {
    if total_staked == 0 {
        return 0.0;
    }
    epoch_rewards as f64 * staked as f64 / total_staked as f64
}

/// Largest SOL deposit, in SOL, that still leaves room for fees and rent.
pub fn max_deposit(lamports: u64) -> f64 {
    let max = to_ui_amount(lamports) - MAX_FEE_TO_DEPOSIT;
    if max > 0.0 {
        max
    } else {
        0.0
    }
}

pub fn to_base_units(ui_amount: f64) -> u64 {
    if !ui_amount.is_finite() || ui_amount <= 0.0 {
        return 0;
    }
    (ui_amount * BASE_UNITS_PER_TOKEN).round() as u64
}

pub fn to_ui_amount(base_units: u64) -> f64 {
    base_units as f64 / BASE_UNITS_PER_TOKEN
}
