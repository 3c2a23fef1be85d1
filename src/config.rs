// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Run Configuration

use serde::{Deserialize, Serialize};

/// Price sentinel returned when the USD reserve is empty ("infinitely cheap"
/// guard against division by zero). Structurally unreachable while the
/// liquidity floor holds.
pub const PRICE_SENTINEL: f64 = 1e9;

// ─── SimConfig ───────────────────────────────────────────────────────────────

/// Every tunable of a simulation run. `Default` reproduces the reference
/// parameterization: 1 simulated day at 20 trades per second against a
/// 15k USD / 985M token pool with 1100 trader entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Simulated days; the run is `days * 86_400` ticks of one second each.
    pub days: u64,
    /// Independent trade rounds executed within a single tick.
    pub trades_per_second: u32,
    /// Ticks between periodic reports (3600 = hourly).
    pub print_interval: u64,

    /// Total token supply used for market-cap derivation.
    pub total_supply: f64,
    /// The distinguished holder's fixed token allocation ("the bag").
    pub holder_tokens: f64,

    pub initial_usd_reserve: f64,
    pub initial_token_reserve: f64,

    pub entity_count: usize,
    /// Log-normal parameters for initial entity capital, clipped to the cap.
    pub capital_mu: f64,
    pub capital_sigma: f64,
    pub capital_cap: f64,

    /// Log-normal parameters for trade size, clamped to [min, max].
    pub trade_size_mu: f64,
    pub trade_size_sigma: f64,
    pub trade_size_min: f64,
    pub trade_size_max: f64,

    /// Per-tick probability of a rug-pull liquidity shock.
    pub rug_pull_prob: f64,
    /// Multiplicative reserve shrink applied by a rug pull.
    pub rug_pull_shrink: f64,

    /// Liquidity floor thresholds and injection margins.
    pub min_usd_reserve: f64,
    pub usd_inject_margin: f64,
    pub min_token_reserve: f64,
    pub token_inject_margin: f64,

    /// A sell may consume at most this fraction of the USD reserve.
    pub sell_cap_fraction: f64,

    /// Sentiment window length (ticks) and the two bias levels.
    pub sentiment_window: usize,
    pub bias_above_avg: f64,
    pub bias_below_avg: f64,

    /// Bounded attempts before the selector falls back to a forced trade.
    pub select_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days: 1,
            trades_per_second: 20,
            print_interval: 3600,
            total_supply: 1_000_000_000.0,
            holder_tokens: 15_000_000.0,
            initial_usd_reserve: 15_000.0,
            initial_token_reserve: 985_000_000.0,
            entity_count: 1100,
            capital_mu: 4.0,
            capital_sigma: 1.5,
            capital_cap: 20_000.0,
            trade_size_mu: 2.0,
            trade_size_sigma: 1.0,
            trade_size_min: 1.0,
            trade_size_max: 1000.0,
            rug_pull_prob: 0.002,
            rug_pull_shrink: 0.5,
            min_usd_reserve: 500.0,
            usd_inject_margin: 1000.0,
            min_token_reserve: 500_000.0,
            token_inject_margin: 50_000.0,
            sell_cap_fraction: 0.9,
            sentiment_window: 100,
            bias_above_avg: 0.45,
            bias_below_avg: 0.55,
            select_attempts: 10,
        }
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f64 },

    #[error("sell_cap_fraction must be in (0, 1), got {0}")]
    BadSellCap(f64),

    #[error("invalid {field} log-normal parameters: {source}")]
    BadDistribution {
        field: &'static str,
        source: rand_distr::NormalError,
    },
}

impl SimConfig {
    pub fn seconds(&self) -> u64 {
        self.days * 24 * 3600
    }

    /// Reject configurations that would put the pool or the sampler into a
    /// state the simulation cannot recover from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives: [(&'static str, f64); 9] = [
            ("days", self.days as f64),
            ("trades_per_second", self.trades_per_second as f64),
            ("print_interval", self.print_interval as f64),
            ("initial_usd_reserve", self.initial_usd_reserve),
            ("initial_token_reserve", self.initial_token_reserve),
            ("entity_count", self.entity_count as f64),
            ("min_usd_reserve", self.min_usd_reserve),
            ("min_token_reserve", self.min_token_reserve),
            ("sentiment_window", self.sentiment_window as f64),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("rug_pull_prob", self.rug_pull_prob),
            ("bias_above_avg", self.bias_above_avg),
            ("bias_below_avg", self.bias_below_avg),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAProbability { field, value });
            }
        }
        if !(self.sell_cap_fraction > 0.0 && self.sell_cap_fraction < 1.0) {
            return Err(ConfigError::BadSellCap(self.sell_cap_fraction));
        }
        Ok(())
    }
}
