// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Simulation Core

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, SimConfig};
use crate::metrics::MetricsRecorder;
use crate::pool::{LiquidityPool, PoolError};
use crate::population::EntityPopulation;
use crate::sampler::RandomSampler;
use crate::selector::TradeSelector;
use crate::sentiment::SentimentTracker;
use crate::types::{MarketState, RunSummary, TickResult, TradeSide};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A tick either completes fully or the run is considered corrupted; pool
/// invariant violations abort the run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("pool: {0}")]
    Pool(#[from] PoolError),
}

// ─── MarketSimulation ────────────────────────────────────────────────────────

/// The simulation clock. Owns every piece of run state (pool, population,
/// PRNG stream, sentiment window, metrics) so independent runs never share
/// anything and can execute in parallel.
pub struct MarketSimulation {
    cfg: SimConfig,
    pool: LiquidityPool,
    population: EntityPopulation,
    sampler: RandomSampler,
    selector: TradeSelector,
    sentiment: SentimentTracker,
    metrics: MetricsRecorder,

    tick: u64,
    current_price: f64,
    buy_bias: f64,
    rug_pull_count: u64,
    injection_count: u64,

    stop: Arc<AtomicBool>,
}

impl MarketSimulation {
    pub fn new(cfg: SimConfig, seed: u64) -> Result<Self, SimError> {
        cfg.validate()?;
        let mut sampler = RandomSampler::new(&cfg, ChaCha8Rng::seed_from_u64(seed))?;
        let population = EntityPopulation::spawn(cfg.entity_count, &mut sampler);
        let pool = LiquidityPool::new(&cfg);
        let current_price = pool.price();
        let sentiment = SentimentTracker::new(
            cfg.sentiment_window,
            current_price,
            cfg.bias_below_avg,
            cfg.bias_above_avg,
        );
        let mut metrics = MetricsRecorder::new();
        // Initial observation at index 0, before any tick runs.
        metrics.record_tick(current_price, cfg.holder_tokens, cfg.total_supply);
        let selector = TradeSelector::new(cfg.select_attempts);
        let buy_bias = cfg.bias_above_avg;

        Ok(Self {
            cfg,
            pool,
            population,
            sampler,
            selector,
            sentiment,
            metrics,
            buy_bias,
            tick: 0,
            current_price,
            rug_pull_count: 0,
            injection_count: 0,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle for graceful early termination; checked once per tick boundary.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn pool(&self) -> &LiquidityPool {
        &self.pool
    }

    pub fn population(&self) -> &EntityPopulation {
        &self.population
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Assemble the observable snapshot of the current state.
    pub fn state(&self) -> MarketState {
        MarketState {
            tick: self.tick,
            price: self.current_price,
            usd_reserve: self.pool.usd_reserve(),
            token_reserve: self.pool.token_reserve(),
            buy_bias: self.buy_bias,
            buy_count: self.metrics.buy_count,
            sell_count: self.metrics.sell_count,
            buy_volume: self.metrics.buy_volume,
            sell_volume: self.metrics.sell_volume,
            rug_pull_count: self.rug_pull_count,
            injection_count: self.injection_count,
            holder_bag_value: self.cfg.holder_tokens / self.current_price,
            market_cap: self.cfg.total_supply / self.current_price,
        }
    }

    /// One simulated second: sentiment update, rug-pull draw, the trade
    /// batch, the once-per-tick floor check, then price recording.
    pub fn tick_core(&mut self) -> Result<TickResult, SimError> {
        self.tick += 1;

        // (a) Sentiment sees the previous tick's closing price.
        self.buy_bias = self.sentiment.observe(self.current_price);

        // (b) Rug-pull draw. The shock path injects immediately if it
        // punched through the floor.
        let rug_pull = self.sampler.roll(self.cfg.rug_pull_prob);
        let mut injected = false;
        if rug_pull {
            self.rug_pull_count += 1;
            if self.pool.apply_rug_pull() {
                injected = true;
                self.injection_count += 1;
            }
        }

        // (c) Trade batch.
        let mut trades_executed = 0u32;
        for _ in 0..self.cfg.trades_per_second {
            if self.execute_trade_round()? {
                trades_executed += 1;
            }
        }

        // (d) Floor check once per tick; heals slow reserve bleed from
        // repeated capped sells, not just rug shocks.
        if self.pool.maybe_inject_liquidity() {
            injected = true;
            self.injection_count += 1;
        }

        // (e) Close the tick: recompute price, append the derived series.
        self.current_price = self.pool.price();
        self.metrics
            .record_tick(self.current_price, self.cfg.holder_tokens, self.cfg.total_supply);

        Ok(TickResult {
            state: self.state(),
            trades_executed,
            rug_pull,
            injected,
        })
    }

    /// One trade round: select, swap, settle balances. Returns whether a
    /// trade was actually executed (zero-amount fallback intents and stale
    /// solvency are skipped without counting).
    fn execute_trade_round(&mut self) -> Result<bool, SimError> {
        let price = self.pool.price();
        let intent =
            self.selector
                .select_trade(&mut self.sampler, &self.population, self.buy_bias, price);
        if intent.usd_amount <= 0.0 {
            return Ok(false);
        }

        match intent.side {
            TradeSide::Buy => {
                if self.population.get(intent.entity).usd_balance < intent.usd_amount {
                    return Ok(false);
                }
                let tokens_bought = self.pool.swap_buy(intent.usd_amount)?;
                self.population
                    .apply_buy(intent.entity, intent.usd_amount, tokens_bought);
                self.metrics.record_trade(TradeSide::Buy, intent.usd_amount);
            }
            TradeSide::Sell => {
                // The seller surrenders tokens at the pre-trade spot ratio;
                // solvency was checked against that same ratio.
                if self.population.get(intent.entity).token_balance < intent.usd_amount * price {
                    return Ok(false);
                }
                let outcome = self.pool.swap_sell(intent.usd_amount)?;
                let tokens_paid = outcome.usd_out * price;
                self.population
                    .apply_sell(intent.entity, outcome.usd_out, tokens_paid);
                self.metrics.record_trade(TradeSide::Sell, outcome.usd_out);
            }
        }
        Ok(true)
    }

    /// Drive up to `ticks` further ticks, honoring the stop handle at each
    /// tick boundary. `emit` receives the periodic report text.
    pub fn run_ticks<F: FnMut(&str)>(
        &mut self,
        ticks: u64,
        mut emit: F,
    ) -> Result<(), SimError> {
        let target = self.tick + ticks;
        while self.tick < target {
            if self.stop.load(Ordering::Relaxed) {
                log::info!("stop signal received at tick {}", self.tick);
                break;
            }
            self.tick_core()?;
            if self.tick % self.cfg.print_interval == 0 {
                emit(&self.metrics.periodic_report(self.tick));
            }
        }
        Ok(())
    }

    /// Run the full configured horizon and emit the final summary.
    pub fn run<F: FnMut(&str)>(&mut self, mut emit: F) -> Result<RunSummary, SimError> {
        let seconds = self.cfg.seconds();
        log::info!(
            "starting run: {} ticks, {} trades/tick, {} entities",
            seconds,
            self.cfg.trades_per_second,
            self.cfg.entity_count
        );
        self.run_ticks(seconds.saturating_sub(self.tick), &mut emit)?;
        let summary = self.summary();
        emit(&self.metrics.final_report(summary.completed_ticks));
        log::info!(
            "run finished: {} trades, {} rug pulls, {} injections",
            summary.total_trades(),
            summary.rug_pull_count,
            summary.injection_count
        );
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            completed_ticks: self.tick,
            stopped_early: self.tick < self.cfg.seconds(),
            final_price: self.current_price,
            final_bag_value: self.cfg.holder_tokens / self.current_price,
            final_market_cap: self.cfg.total_supply / self.current_price,
            buy_count: self.metrics.buy_count,
            sell_count: self.metrics.sell_count,
            buy_volume: self.metrics.buy_volume,
            sell_volume: self.metrics.sell_volume,
            rug_pull_count: self.rug_pull_count,
            injection_count: self.injection_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(seed: u64) -> MarketSimulation {
        MarketSimulation::new(SimConfig::default(), seed).expect("default config")
    }

    #[test]
    fn tick_advances_and_records() {
        let mut s = sim(42);
        let result = s.tick_core().expect("tick");
        assert_eq!(result.state.tick, 1);
        // Initial observation plus one tick.
        assert_eq!(s.metrics().price_series.len(), 2);
        assert!(result.trades_executed <= 20);
    }

    #[test]
    fn counters_equal_executed_trades() {
        let mut s = sim(7);
        let mut executed: u64 = 0;
        for _ in 0..500 {
            executed += s.tick_core().expect("tick").trades_executed as u64;
        }
        assert_eq!(s.metrics().total_trades(), executed);
    }

    #[test]
    fn stop_handle_halts_at_tick_boundary() {
        let mut s = sim(1);
        s.stop_handle().store(true, Ordering::Relaxed);
        let summary = s.run(|_| {}).expect("run");
        assert_eq!(summary.completed_ticks, 0);
        assert!(summary.stopped_early);
    }

    #[test]
    fn determinism_per_seed() {
        let mut a = sim(1234);
        let mut b = sim(1234);
        for _ in 0..300 {
            a.tick_core().expect("tick");
            b.tick_core().expect("tick");
        }
        assert_eq!(a.metrics().price_series, b.metrics().price_series);
        assert_eq!(a.metrics().buy_count, b.metrics().buy_count);
        assert_eq!(a.metrics().sell_volume, b.metrics().sell_volume);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = sim(1);
        let mut b = sim(2);
        for _ in 0..100 {
            a.tick_core().expect("tick");
            b.tick_core().expect("tick");
        }
        assert_ne!(a.metrics().price_series, b.metrics().price_series);
    }
}
