// Benchmark Report Types — structured output for independent analysis
// Per-run results, per-scenario Monte Carlo aggregation, suite summary.

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub seed: u64,
    pub pass: bool,

    pub ticks: u64,
    pub trades_executed: u64,
    pub buy_ratio: f64,
    pub rug_pull_count: u64,
    pub injection_count: u64,

    pub final_price: f64,
    pub final_bag_value: f64,
    pub final_market_cap: f64,

    pub max_invariant_drift: f64,
    pub max_bag_drawdown: f64,
    pub floor_violations: u64,
    pub solvency_violations: u64,

    pub elapsed_ms: u128,
    pub ticks_per_sec: f64,
}

// ─── Monte Carlo Report (per-scenario aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub n_runs: usize,
    pub pass_rate: f64,

    pub final_price: Stats,
    pub final_bag_value: Stats,
    pub final_market_cap: Stats,
    pub trades_executed: Stats,
    pub buy_ratio: Stats,
    pub rug_pull_count: Stats,
    pub injection_count: Stats,
    pub max_invariant_drift: Stats,
    pub max_bag_drawdown: Stats,
    pub elapsed_ms: Stats,
    pub ticks_per_sec: Stats,

    pub individual_runs: Vec<BenchResult>,
}

// ─── Model Validation Summary ───────────────────────────────────────────────

/// Safety-mechanism gates checked across the whole suite: the structural
/// guards of the model must hold in every run of every scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ModelValidation {
    pub floors_never_breached: bool,
    pub solvency_never_breached: bool,
    pub invariant_preserved: bool,
    pub max_invariant_drift: f64,
}

impl ModelValidation {
    pub fn all_pass(&self) -> bool {
        self.floors_never_breached && self.solvency_never_breached && self.invariant_preserved
    }
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub summary: Summary,
    pub model_validation: ModelValidation,
    pub scenarios: Vec<MonteCarloReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
