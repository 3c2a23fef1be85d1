// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Run Metrics

use serde::{Deserialize, Serialize};

use crate::types::TradeSide;

// ─── MetricsRecorder ─────────────────────────────────────────────────────────

/// Accumulates trade counters and the three aligned per-tick series (price,
/// bag value, market cap). Counters are monotonic; series grow by exactly one
/// entry per tick, plus the initial observation at index 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsRecorder {
    pub buy_count: u64,
    pub sell_count: u64,
    pub buy_volume: f64,
    pub sell_volume: f64,

    pub price_series: Vec<f64>,
    pub bag_value_series: Vec<f64>,
    pub market_cap_series: Vec<f64>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an executed trade. Called per trade at execution time, not at
    /// tick recording time.
    pub fn record_trade(&mut self, side: TradeSide, usd_amount: f64) {
        match side {
            TradeSide::Buy => {
                self.buy_count += 1;
                self.buy_volume += usd_amount;
            }
            TradeSide::Sell => {
                self.sell_count += 1;
                self.sell_volume += usd_amount;
            }
        }
    }

    /// Append the post-tick derived values. `price` is tokens per USD, so
    /// both derivations divide by it.
    pub fn record_tick(&mut self, price: f64, holder_tokens: f64, total_supply: f64) {
        self.price_series.push(price);
        self.bag_value_series.push(holder_tokens / price);
        self.market_cap_series.push(total_supply / price);
    }

    pub fn total_trades(&self) -> u64 {
        self.buy_count + self.sell_count
    }

    pub fn buy_ratio(&self) -> f64 {
        let total = self.total_trades();
        if total == 0 {
            0.0
        } else {
            self.buy_count as f64 / total as f64
        }
    }

    pub fn last_price(&self) -> Option<f64> {
        self.price_series.last().copied()
    }

    /// Hourly progress block. Pure formatting; the numeric content is the
    /// contract, the layout is not.
    pub fn periodic_report(&self, tick: u64) -> String {
        let hours = tick / 3600;
        let price = self.last_price().unwrap_or(0.0);
        let bag = self.bag_value_series.last().copied().unwrap_or(0.0);
        let mcap = self.market_cap_series.last().copied().unwrap_or(0.0);
        format!(
            "Day {} Hour {}: ({} sec)\n\
             Tokens/USD: {:.10}\n\
             Your bag value: {}\n\
             Market Cap: {}\n\
             Buys: {}, Sells: {}, Buy Vol: {}, Sell Vol: {}\n\
             {}",
            hours / 24,
            hours % 24,
            tick,
            price,
            format_usd(bag),
            format_usd(mcap),
            self.buy_count,
            self.sell_count,
            format_usd(self.buy_volume),
            format_usd(self.sell_volume),
            "-".repeat(40),
        )
    }

    /// Final summary block after the run completes.
    pub fn final_report(&self, completed_ticks: u64) -> String {
        let price = self.last_price().unwrap_or(0.0);
        let bag = self.bag_value_series.last().copied().unwrap_or(0.0);
        let mcap = self.market_cap_series.last().copied().unwrap_or(0.0);
        format!(
            "Simulation completed ({} ticks).\n\
             Final Tokens/USD: {:.10}\n\
             Your final bag value: {}\n\
             Final Market Cap: {}\n\
             Total trades: {}\n\
             Buys: {}, Sells: {}\n\
             Total volume: {} (Buy Vol: {}, Sell Vol: {})\n\
             Buy ratio: {:.2}",
            completed_ticks,
            price,
            format_usd(bag),
            format_usd(mcap),
            self.total_trades(),
            self.buy_count,
            self.sell_count,
            format_usd(self.buy_volume + self.sell_volume),
            format_usd(self.buy_volume),
            format_usd(self.sell_volume),
            self.buy_ratio(),
        )
    }
}

// ─── Currency formatting ─────────────────────────────────────────────────────

/// `$1,234,567.89` style. Values here are always non-negative.
pub fn format_usd(value: f64) -> String {
    let cents = format!("{:.2}", value);
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}.{}", grouped, frac_part)
}
