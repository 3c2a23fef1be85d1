// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A synthetic trader: cash on hand and tokens held. Balances never go
/// negative; they are mutated only by executed trades.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Entity {
    pub usd_balance: f64,
    pub token_balance: f64,
}

// ─── Trade direction ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A trade the selector has judged executable: which entity, how many USD
/// worth, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeIntent {
    pub entity: usize,
    pub usd_amount: f64,
    pub side: TradeSide,
}

// ─── MarketState ─────────────────────────────────────────────────────────────

/// Observable market snapshot after a tick. Cloned into every `TickResult`
/// so external consumers (bench, time-series writers) never touch live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketState {
    pub tick: u64,
    /// Tokens per USD. Lower means the token is more expensive.
    pub price: f64,
    pub usd_reserve: f64,
    pub token_reserve: f64,
    pub buy_bias: f64,

    pub buy_count: u64,
    pub sell_count: u64,
    pub buy_volume: f64,
    pub sell_volume: f64,

    pub rug_pull_count: u64,
    pub injection_count: u64,

    /// USD value of the distinguished holder's bag at the current price.
    pub holder_bag_value: f64,
    /// Implied market capitalization at the current price.
    pub market_cap: f64,
}

// ─── TickResult ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    pub state: MarketState,
    /// Trades executed this tick (skipped zero-amount fallbacks excluded).
    pub trades_executed: u32,
    pub rug_pull: bool,
    pub injected: bool,
}

// ─── RunSummary ──────────────────────────────────────────────────────────────

/// Final accounting for a completed (or stopped) run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub completed_ticks: u64,
    pub stopped_early: bool,
    pub final_price: f64,
    pub final_bag_value: f64,
    pub final_market_cap: f64,
    pub buy_count: u64,
    pub sell_count: u64,
    pub buy_volume: f64,
    pub sell_volume: f64,
    pub rug_pull_count: u64,
    pub injection_count: u64,
}

impl RunSummary {
    pub fn total_trades(&self) -> u64 {
        self.buy_count + self.sell_count
    }

    pub fn total_volume(&self) -> f64 {
        self.buy_volume + self.sell_volume
    }

    pub fn buy_ratio(&self) -> f64 {
        let total = self.total_trades();
        if total == 0 {
            0.0
        } else {
            self.buy_count as f64 / total as f64
        }
    }
}
