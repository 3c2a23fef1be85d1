// Scenario Definitions — market regimes exercising the model's safety rails
// All scenario logic lives in config overrides and pass criteria; the engine
// is never special-cased.

use pit_engine::SimConfig;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub ticks: u64,
    pub config: SimConfig,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    /// Reserves must sit at or above both floors after every tick.
    pub require_floor: bool,
    /// No entity balance may ever go negative.
    pub require_solvency: bool,
    /// Max relative drift of `k` across swap-only ticks, if bounded.
    pub max_invariant_drift: Option<f64>,
    /// Minimum trades executed across the whole run, if bounded.
    pub min_trades: Option<u64>,
    /// Expected minimum number of rug pulls (sanity for shock scenarios).
    pub min_rug_pulls: Option<u64>,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            require_floor: true,
            require_solvency: true,
            max_invariant_drift: None,
            min_trades: None,
            min_rug_pulls: None,
        }
    }
}

// ─── Scenario Definitions ───────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        // ─── Baseline ────────────────────────────────────────────────────
        Scenario {
            name: "NORMAL_MARKET",
            label: "Normal Market",
            category: "baseline",
            ticks: 7200,
            config: SimConfig::default(),
            criteria: PassCriteria {
                // Most of the 20 rounds/tick should find solvent traders.
                min_trades: Some(7200 * 10),
                ..PassCriteria::default()
            },
        },
        // ─── Invariant check: no liquidity events at all ─────────────────
        Scenario {
            name: "NO_RUG_INVARIANT",
            label: "No-Rug Invariant",
            category: "invariant",
            ticks: 7200,
            config: SimConfig {
                rug_pull_prob: 0.0,
                ..SimConfig::default()
            },
            criteria: PassCriteria {
                max_invariant_drift: Some(1e-9),
                ..PassCriteria::default()
            },
        },
        // ─── Shock scenarios ─────────────────────────────────────────────
        Scenario {
            name: "RUG_STORM",
            label: "Rug Storm",
            category: "shock",
            ticks: 7200,
            config: SimConfig {
                rug_pull_prob: 0.05,
                ..SimConfig::default()
            },
            criteria: PassCriteria {
                // ~360 expected rugs; even an unlucky seed sees plenty.
                min_rug_pulls: Some(200),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "DEEP_RUG",
            label: "Deep Rug (90% shrink)",
            category: "shock",
            ticks: 7200,
            config: SimConfig {
                rug_pull_prob: 0.01,
                rug_pull_shrink: 0.1,
                ..SimConfig::default()
            },
            criteria: PassCriteria::default(),
        },
        // ─── Liquidity stress ────────────────────────────────────────────
        Scenario {
            name: "THIN_LIQUIDITY",
            label: "Thin Liquidity",
            category: "liquidity",
            ticks: 7200,
            config: SimConfig {
                initial_usd_reserve: 600.0,
                initial_token_reserve: 40_000_000.0,
                ..SimConfig::default()
            },
            criteria: PassCriteria::default(),
        },
        // ─── Load and population shape ───────────────────────────────────
        Scenario {
            name: "HIGH_FREQUENCY",
            label: "High Frequency (200 t/s)",
            category: "load",
            ticks: 1800,
            config: SimConfig {
                trades_per_second: 200,
                ..SimConfig::default()
            },
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "WHALE_POPULATION",
            label: "Whale Population",
            category: "population",
            ticks: 3600,
            config: SimConfig {
                capital_mu: 6.0,
                capital_cap: 200_000.0,
                ..SimConfig::default()
            },
            criteria: PassCriteria {
                min_trades: Some(3600 * 10),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "SMALL_CROWD",
            label: "Small Crowd (50 entities)",
            category: "population",
            ticks: 3600,
            config: SimConfig {
                entity_count: 50,
                ..SimConfig::default()
            },
            criteria: PassCriteria::default(),
        },
        // ─── Selector stress: almost everyone is broke ───────────────────
        Scenario {
            name: "BROKE_CROWD",
            label: "Broke Crowd (fallback-heavy)",
            category: "selector",
            ticks: 3600,
            config: SimConfig {
                capital_mu: 0.0,
                capital_sigma: 0.5,
                capital_cap: 5.0,
                ..SimConfig::default()
            },
            criteria: PassCriteria::default(),
        },
    ]
}
