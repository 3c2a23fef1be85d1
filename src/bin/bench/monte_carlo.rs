// Monte Carlo Infrastructure — N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N-1, computing mean ± 95% CI

use pit_engine::MarketSimulation;

use crate::metrics::{DrawdownTracker, FloorTracker, InvariantTracker};
use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> BenchResult {
    let start = Instant::now();
    let mut sim = MarketSimulation::new(scenario.config.clone(), seed)
        .expect("scenario config must validate");

    // Metric trackers
    let mut invariant = InvariantTracker::new(sim.pool().k());
    let mut floors = FloorTracker::new(
        scenario.config.min_usd_reserve,
        scenario.config.min_token_reserve,
    );
    let mut drawdown = DrawdownTracker::new();
    let mut time_series = if time_series_dir.is_some() {
        Some(TimeSeriesRecorder::new())
    } else {
        None
    };

    let mut solvency_violations: u64 = 0;

    for _ in 0..scenario.ticks {
        let result = sim.tick_core().expect("tick must not corrupt the pool");

        invariant.record_tick(&result);
        floors.record_tick(&result);
        drawdown.record_tick(&result);

        for entity in sim.population().iter() {
            if entity.usd_balance < 0.0 || entity.token_balance < 0.0 {
                solvency_violations += 1;
            }
        }

        if let Some(ref mut ts) = time_series {
            ts.record(&result);
        }
    }

    // Write time series if enabled
    if let (Some(ts), Some(dir)) = (&time_series, time_series_dir) {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            eprintln!("  Warning: failed to write time series: {}", e);
        }
    }

    let elapsed = start.elapsed();
    let elapsed_ms = elapsed.as_millis();
    let elapsed_secs = elapsed.as_secs_f64().max(0.001);

    let summary = sim.summary();

    // Evaluate pass/fail
    let mut pass = true;
    if scenario.criteria.require_floor && floors.violations > 0 {
        pass = false;
    }
    if scenario.criteria.require_solvency && solvency_violations > 0 {
        pass = false;
    }
    if let Some(max_drift) = scenario.criteria.max_invariant_drift {
        if invariant.max_drift > max_drift {
            pass = false;
        }
    }
    if let Some(min_trades) = scenario.criteria.min_trades {
        if summary.total_trades() < min_trades {
            pass = false;
        }
    }
    if let Some(min_rugs) = scenario.criteria.min_rug_pulls {
        if summary.rug_pull_count < min_rugs {
            pass = false;
        }
    }

    BenchResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass,
        ticks: scenario.ticks,
        trades_executed: summary.total_trades(),
        buy_ratio: summary.buy_ratio(),
        rug_pull_count: summary.rug_pull_count,
        injection_count: summary.injection_count,
        final_price: summary.final_price,
        final_bag_value: summary.final_bag_value,
        final_market_cap: summary.final_market_cap,
        max_invariant_drift: invariant.max_drift,
        max_bag_drawdown: drawdown.max_drawdown,
        floor_violations: floors.violations,
        solvency_violations,
        elapsed_ms,
        ticks_per_sec: scenario.ticks as f64 / elapsed_secs,
    }
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> MonteCarloReport {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        results.push(run_single(scenario, seed, ts_dir.as_deref()));
    }

    aggregate(scenario, results)
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = passed as f64 / n as f64;

    let final_price = Stats::from_samples(
        &results.iter().map(|r| r.final_price).collect::<Vec<_>>(),
    );
    let final_bag_value = Stats::from_samples(
        &results.iter().map(|r| r.final_bag_value).collect::<Vec<_>>(),
    );
    let final_market_cap = Stats::from_samples(
        &results.iter().map(|r| r.final_market_cap).collect::<Vec<_>>(),
    );
    let trades_executed = Stats::from_samples(
        &results.iter().map(|r| r.trades_executed as f64).collect::<Vec<_>>(),
    );
    let buy_ratio = Stats::from_samples(
        &results.iter().map(|r| r.buy_ratio).collect::<Vec<_>>(),
    );
    let rug_pull_count = Stats::from_samples(
        &results.iter().map(|r| r.rug_pull_count as f64).collect::<Vec<_>>(),
    );
    let injection_count = Stats::from_samples(
        &results.iter().map(|r| r.injection_count as f64).collect::<Vec<_>>(),
    );
    let max_invariant_drift = Stats::from_samples(
        &results.iter().map(|r| r.max_invariant_drift).collect::<Vec<_>>(),
    );
    let max_bag_drawdown = Stats::from_samples(
        &results.iter().map(|r| r.max_bag_drawdown).collect::<Vec<_>>(),
    );
    let elapsed_ms = Stats::from_samples(
        &results.iter().map(|r| r.elapsed_ms as f64).collect::<Vec<_>>(),
    );
    let ticks_per_sec = Stats::from_samples(
        &results.iter().map(|r| r.ticks_per_sec).collect::<Vec<_>>(),
    );

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate,
        final_price,
        final_bag_value,
        final_market_cap,
        trades_executed,
        buy_ratio,
        rug_pull_count,
        injection_count,
        max_invariant_drift,
        max_bag_drawdown,
        elapsed_ms,
        ticks_per_sec,
        individual_runs: results,
    }
}
