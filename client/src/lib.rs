//! Terminal client of the WhaleHub staking protocols: SOL liquid staking with
//! validator gauge voting, and token staking with epoch rewards.

pub mod actions;
pub mod cli;
pub mod config;
pub mod context;
pub mod instructions;
pub mod notify;
pub mod output;
pub mod projection;
pub mod refresher;
pub mod registry;
pub mod routes;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_utils;
