//! Reward values paid out by the environment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Reward for a low-battery search that ends in depletion.
pub const DEPLETION_PENALTY: f64 = -3.0;

/// Reward for recharging.
pub const RECHARGE_REWARD: f64 = 0.0;

/// The two configurable rewards, with `r_search >= r_wait` enforced on every write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RewardModel {
    r_search: f64,
    r_wait: f64,
}

impl RewardModel {
    /// Creates a reward model.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if `r_search < r_wait` or
    /// either value is NaN.
    pub fn new(r_search: f64, r_wait: f64) -> Result<Self> {
        check_order(r_search, r_wait)?;
        Ok(Self { r_search, r_wait })
    }

    /// The reward for searching.
    pub fn r_search(&self) -> f64 {
        self.r_search
    }

    /// The reward for waiting.
    pub fn r_wait(&self) -> f64 {
        self.r_wait
    }

    /// Replaces the search reward, validated against the current wait reward.
    /// The model is unchanged on error.
    pub fn set_r_search(&mut self, r_search: f64) -> Result<()> {
        check_order(r_search, self.r_wait)?;
        self.r_search = r_search;
        Ok(())
    }

    /// Replaces the wait reward, validated against the current search reward.
    /// The model is unchanged on error.
    pub fn set_r_wait(&mut self, r_wait: f64) -> Result<()> {
        check_order(self.r_search, r_wait)?;
        self.r_wait = r_wait;
        Ok(())
    }
}

fn check_order(r_search: f64, r_wait: f64) -> Result<()> {
    // NaN fails this comparison too
    if r_search >= r_wait {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "r_search ({}) must be greater than or equal to r_wait ({})",
            r_search, r_wait
        )))
    }
}

impl<'de> Deserialize<'de> for RewardModel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            r_search: f64,
            r_wait: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        RewardModel::new(raw.r_search, raw.r_wait).map_err(serde::de::Error::custom)
    }
}
