// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit")
//
// Discrete-event, stochastic simulation of a constant-product AMM token
// market: a synthetic trader pool pushes random buy/sell flow through a
// two-reserve pool under periodic rug-pull shocks and liquidity-floor
// injections, producing per-tick price, bag-value, and market-cap series.

pub mod config;
pub mod metrics;
pub mod pool;
pub mod population;
pub mod sampler;
pub mod selector;
pub mod sentiment;
pub mod simulation;
pub mod types;

pub use config::{ConfigError, SimConfig, PRICE_SENTINEL};
pub use metrics::MetricsRecorder;
pub use pool::{LiquidityPool, PoolError, SellOutcome};
pub use population::EntityPopulation;
pub use sampler::RandomSampler;
pub use selector::TradeSelector;
pub use sentiment::SentimentTracker;
pub use simulation::{MarketSimulation, SimError};
pub use types::*;
