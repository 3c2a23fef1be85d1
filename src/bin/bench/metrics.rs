// Per-Tick Metric Trackers — invariant drift, floor breaches, bag drawdown
// Everything works off the cloned per-tick state so the engine stays untouched.

use pit_engine::TickResult;

// ─── Invariant Drift Tracker ────────────────────────────────────────────────

/// Tracks the relative drift of the constant product `k` between liquidity
/// events. Swaps must preserve `k` to floating-point tolerance; rug pulls and
/// injections legitimately move it, so the baseline rebases on those ticks.
pub struct InvariantTracker {
    baseline_k: f64,
    pub max_drift: f64,
    pub swap_only_ticks: u64,
}

impl InvariantTracker {
    pub fn new(initial_k: f64) -> Self {
        Self { baseline_k: initial_k, max_drift: 0.0, swap_only_ticks: 0 }
    }

    pub fn record_tick(&mut self, result: &TickResult) {
        let k = result.state.usd_reserve * result.state.token_reserve;
        if result.rug_pull || result.injected {
            self.baseline_k = k;
            return;
        }
        if self.baseline_k > 0.0 {
            let drift = (k - self.baseline_k).abs() / self.baseline_k;
            self.max_drift = self.max_drift.max(drift);
            self.swap_only_ticks += 1;
        }
        self.baseline_k = k;
    }
}

// ─── Floor Tracker ──────────────────────────────────────────────────────────

/// Counts post-tick reserve states below the configured floors. The engine's
/// per-tick injection should make this impossible; any hit is a red flag.
pub struct FloorTracker {
    min_usd: f64,
    min_token: f64,
    pub violations: u64,
}

impl FloorTracker {
    pub fn new(min_usd: f64, min_token: f64) -> Self {
        Self { min_usd, min_token, violations: 0 }
    }

    pub fn record_tick(&mut self, result: &TickResult) {
        if result.state.usd_reserve < self.min_usd || result.state.token_reserve < self.min_token {
            self.violations += 1;
        }
    }
}

// ─── Bag Drawdown Tracker ───────────────────────────────────────────────────

/// Max peak-to-trough drawdown of the distinguished holder's bag value.
pub struct DrawdownTracker {
    peak: f64,
    pub max_drawdown: f64,
}

impl DrawdownTracker {
    pub fn new() -> Self {
        Self { peak: 0.0, max_drawdown: 0.0 }
    }

    pub fn record_tick(&mut self, result: &TickResult) {
        let bag = result.state.holder_bag_value;
        self.peak = self.peak.max(bag);
        if self.peak > 0.0 {
            let drawdown = (self.peak - bag) / self.peak;
            self.max_drawdown = self.max_drawdown.max(drawdown);
        }
    }
}
