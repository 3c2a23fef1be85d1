// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Stochastic Primitives

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

use crate::config::{ConfigError, SimConfig};

// ─── RandomSampler ───────────────────────────────────────────────────────────

/// Owns the run's PRNG stream and the two log-normal distributions the model
/// draws from. Every run gets its own sampler seeded independently, so runs
/// are reproducible and never share generator state.
pub struct RandomSampler {
    rng: ChaCha8Rng,
    capital: LogNormal<f64>,
    capital_cap: f64,
    trade_size: LogNormal<f64>,
    trade_size_min: f64,
    trade_size_max: f64,
}

impl RandomSampler {
    pub fn new(cfg: &SimConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        let capital = LogNormal::new(cfg.capital_mu, cfg.capital_sigma)
            .map_err(|source| ConfigError::BadDistribution { field: "capital", source })?;
        let trade_size = LogNormal::new(cfg.trade_size_mu, cfg.trade_size_sigma)
            .map_err(|source| ConfigError::BadDistribution { field: "trade_size", source })?;
        Ok(Self {
            rng,
            capital,
            capital_cap: cfg.capital_cap,
            trade_size,
            trade_size_min: cfg.trade_size_min,
            trade_size_max: cfg.trade_size_max,
        })
    }

    /// Initial entity capital: log-normal draw clipped to the configured cap.
    pub fn initial_capital(&mut self) -> f64 {
        self.capital.sample(&mut self.rng).min(self.capital_cap)
    }

    /// USD trade size: log-normal draw clamped to [min, max].
    pub fn trade_size(&mut self) -> f64 {
        self.trade_size
            .sample(&mut self.rng)
            .clamp(self.trade_size_min, self.trade_size_max)
    }

    /// Uniform entity index in `0..population`.
    pub fn entity_index(&mut self, population: usize) -> usize {
        self.rng.gen_range(0..population)
    }

    /// Bernoulli trigger: true with probability `p`.
    pub fn roll(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn sampler(seed: u64) -> RandomSampler {
        let cfg = SimConfig::default();
        RandomSampler::new(&cfg, ChaCha8Rng::seed_from_u64(seed)).expect("valid default config")
    }

    #[test]
    fn capital_respects_cap() {
        let mut s = sampler(42);
        for _ in 0..10_000 {
            let c = s.initial_capital();
            assert!(c > 0.0 && c <= 20_000.0, "capital {} outside (0, 20000]", c);
        }
    }

    #[test]
    fn trade_size_clamped() {
        let mut s = sampler(42);
        for _ in 0..10_000 {
            let t = s.trade_size();
            assert!((1.0..=1000.0).contains(&t), "trade size {} outside [1, 1000]", t);
        }
    }

    #[test]
    fn trade_size_median_near_e_squared() {
        // LogNormal(μ=2, σ=1) has median e^2 ≈ 7.39; the [1, 1000] clamp
        // barely touches the tails so the sample median should sit close.
        let mut s = sampler(7);
        let mut draws: Vec<f64> = (0..10_001).map(|_| s.trade_size()).collect();
        draws.sort_by(|a, b| a.partial_cmp(b).expect("finite draws"));
        let median = draws[draws.len() / 2];
        assert!(
            (median - 2.0_f64.exp()).abs() < 1.0,
            "median {:.2} far from e^2 ≈ 7.39",
            median
        );
    }

    #[test]
    fn roll_frequency_tracks_probability() {
        let mut s = sampler(99);
        let n = 100_000;
        let hits = (0..n).filter(|_| s.roll(0.002)).count();
        let rate = hits as f64 / n as f64;
        assert!((rate - 0.002).abs() < 0.001, "rug rate {} far from 0.002", rate);
    }

    #[test]
    fn entity_index_covers_range() {
        let mut s = sampler(3);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            seen[s.entity_index(10)] = true;
        }
        assert!(seen.iter().all(|&b| b), "uniform index never hit some slots");
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = sampler(1234);
        let mut b = sampler(1234);
        for _ in 0..100 {
            assert_eq!(a.trade_size(), b.trade_size());
            assert_eq!(a.entity_index(1100), b.entity_index(1100));
        }
    }
}
