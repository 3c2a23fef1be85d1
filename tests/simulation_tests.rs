#[cfg(test)]
mod tests {
    use pit_engine::{MarketSimulation, SimConfig};

    fn short_config() -> SimConfig {
        SimConfig {
            entity_count: 200,
            ..SimConfig::default()
        }
    }

    // ========== Test Suite A: Safety Rails ==========

    #[test]
    fn test_floors_hold_under_rug_storm() {
        // Aggressive shock rate so injections fire often.
        let cfg = SimConfig {
            rug_pull_prob: 0.05,
            ..short_config()
        };
        let min_usd = cfg.min_usd_reserve;
        let min_token = cfg.min_token_reserve;
        let mut sim = MarketSimulation::new(cfg, 99).unwrap();

        for _ in 0..2000 {
            let result = sim.tick_core().unwrap();
            assert!(
                result.state.usd_reserve >= min_usd,
                "USD floor breached at tick {}: {}",
                result.state.tick,
                result.state.usd_reserve
            );
            assert!(
                result.state.token_reserve >= min_token,
                "Token floor breached at tick {}: {}",
                result.state.tick,
                result.state.token_reserve
            );
        }
        assert!(sim.summary().rug_pull_count > 50, "Rug storm never materialized");
    }

    #[test]
    fn test_entities_stay_solvent() {
        let mut sim = MarketSimulation::new(short_config(), 7).unwrap();
        for _ in 0..2000 {
            sim.tick_core().unwrap();
        }
        for (i, entity) in sim.population().iter().enumerate() {
            assert!(
                entity.usd_balance >= 0.0,
                "Entity {} has negative cash: {}",
                i,
                entity.usd_balance
            );
            assert!(
                entity.token_balance >= 0.0,
                "Entity {} has negative tokens: {}",
                i,
                entity.token_balance
            );
        }
    }

    #[test]
    fn test_invariant_preserved_without_shocks() {
        // No rug pulls and a deep pool: k must only move on injections,
        // and injections should never fire from this starting state.
        let cfg = SimConfig {
            rug_pull_prob: 0.0,
            ..short_config()
        };
        let mut sim = MarketSimulation::new(cfg, 3).unwrap();
        let k0 = sim.pool().k();

        for _ in 0..2000 {
            let result = sim.tick_core().unwrap();
            assert!(!result.injected, "Unexpected injection in a calm deep pool");
            let k = result.state.usd_reserve * result.state.token_reserve;
            assert!(
                (k - k0).abs() / k0 < 1e-9,
                "Constant product drifted: {} vs {}",
                k,
                k0
            );
        }
    }

    // ========== Test Suite B: Accounting Consistency ==========

    #[test]
    fn test_trade_counters_match_executed() {
        let mut sim = MarketSimulation::new(short_config(), 11).unwrap();
        let mut executed: u64 = 0;
        for _ in 0..1000 {
            executed += sim.tick_core().unwrap().trades_executed as u64;
        }
        let summary = sim.summary();
        assert_eq!(summary.buy_count + summary.sell_count, executed);
        assert!(summary.buy_volume >= 0.0 && summary.sell_volume >= 0.0);
    }

    #[test]
    fn test_derived_series_track_price() {
        let cfg = short_config();
        let holder = cfg.holder_tokens;
        let supply = cfg.total_supply;
        let mut sim = MarketSimulation::new(cfg, 21).unwrap();
        for _ in 0..500 {
            let result = sim.tick_core().unwrap();
            let s = &result.state;
            assert!(
                (s.holder_bag_value - holder / s.price).abs() < 1e-6,
                "Bag value out of sync with price at tick {}",
                s.tick
            );
            assert!(
                (s.market_cap - supply / s.price).abs() < 1e-6,
                "Market cap out of sync with price at tick {}",
                s.tick
            );
        }
        // One observation per tick plus the initial one.
        assert_eq!(sim.metrics().price_series.len(), 501);
    }

    #[test]
    fn test_buy_bias_stays_at_configured_levels() {
        let cfg = short_config();
        let (lo, hi) = (cfg.bias_above_avg, cfg.bias_below_avg);
        let mut sim = MarketSimulation::new(cfg, 5).unwrap();
        for _ in 0..500 {
            let bias = sim.tick_core().unwrap().state.buy_bias;
            assert!(
                bias == lo || bias == hi,
                "Bias {} is neither configured level",
                bias
            );
        }
    }

    // ========== Test Suite C: Run Control ==========

    #[test]
    fn test_full_run_reaches_horizon() {
        // A 6-minute horizon keeps the test fast while still crossing
        // several report boundaries.
        let cfg = SimConfig {
            days: 1,
            print_interval: 60,
            ..short_config()
        };
        let mut sim = MarketSimulation::new(cfg, 1).unwrap();
        let mut reports = 0;
        sim.run_ticks(360, |_| reports += 1).unwrap();
        assert_eq!(sim.current_tick(), 360);
        assert_eq!(reports, 6);
    }

    #[test]
    fn test_stop_signal_halts_run() {
        let mut sim = MarketSimulation::new(short_config(), 1).unwrap();
        let stop = sim.stop_handle();
        sim.run_ticks(1000, |_| {}).unwrap();
        assert_eq!(sim.current_tick(), 1000);

        stop.store(true, std::sync::atomic::Ordering::Relaxed);
        sim.run_ticks(1000, |_| {}).unwrap();
        assert_eq!(sim.current_tick(), 1000, "Run continued past stop signal");
        assert!(sim.summary().stopped_early);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let mut a = MarketSimulation::new(short_config(), 4242).unwrap();
        let mut b = MarketSimulation::new(short_config(), 4242).unwrap();
        for _ in 0..1000 {
            a.tick_core().unwrap();
            b.tick_core().unwrap();
        }
        let (sa, sb) = (a.summary(), b.summary());
        assert_eq!(sa.final_price, sb.final_price);
        assert_eq!(sa.buy_count, sb.buy_count);
        assert_eq!(sa.sell_volume, sb.sell_volume);
        assert_eq!(sa.rug_pull_count, sb.rug_pull_count);
    }

    // ========== Test Suite D: Degenerate Markets ==========

    #[test]
    fn test_broke_population_does_not_stall() {
        // Nearly everyone starts with pocket change; the forced-fallback
        // path must keep the clock moving without corrupting balances.
        let cfg = SimConfig {
            capital_mu: 0.0,
            capital_sigma: 0.5,
            capital_cap: 5.0,
            entity_count: 100,
            ..SimConfig::default()
        };
        let mut sim = MarketSimulation::new(cfg, 13).unwrap();
        for _ in 0..1000 {
            sim.tick_core().unwrap();
        }
        assert_eq!(sim.current_tick(), 1000);
        for entity in sim.population().iter() {
            assert!(entity.usd_balance >= 0.0);
            assert!(entity.token_balance >= 0.0);
        }
    }

    #[test]
    fn test_thin_pool_recovers_via_injection() {
        // Poor entities keep the pool shallow; a 90% shrink from any
        // reachable reserve level punches through the floor.
        let cfg = SimConfig {
            initial_usd_reserve: 600.0,
            initial_token_reserve: 40_000_000.0,
            rug_pull_prob: 0.02,
            rug_pull_shrink: 0.1,
            capital_mu: 2.0,
            capital_cap: 50.0,
            ..short_config()
        };
        let min_usd = cfg.min_usd_reserve;
        let mut sim = MarketSimulation::new(cfg, 17).unwrap();
        for _ in 0..2000 {
            let result = sim.tick_core().unwrap();
            assert!(result.state.usd_reserve >= min_usd);
        }
        assert!(
            sim.summary().injection_count > 0,
            "Thin pool under shocks never needed an injection"
        );
    }
}
