// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Trade Selection

use crate::population::EntityPopulation;
use crate::sampler::RandomSampler;
use crate::types::{TradeIntent, TradeSide};

// ─── Selector state machine ──────────────────────────────────────────────────

/// Selection proceeds through two phases: a bounded random search for a
/// solvent (entity, size, direction) match, then a forced fallback that
/// shrinks the trade to whatever one freshly drawn entity can afford.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectorPhase {
    Searching { attempts_left: u32 },
    ForcedFallback,
}

// ─── TradeSelector ───────────────────────────────────────────────────────────

/// Chooses, each trade round, which entity trades, in which direction, and
/// for how much. Never starves: the fallback always produces an intent,
/// though a fully broke fallback entity may yield a zero-amount buy the
/// clock drops without executing.
#[derive(Debug, Clone, Copy)]
pub struct TradeSelector {
    max_attempts: u32,
}

impl TradeSelector {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// `buy_bias` is the probability a candidate trade is a buy; `price` is
    /// tokens per USD, used for sell-side solvency.
    pub fn select_trade(
        &self,
        sampler: &mut RandomSampler,
        population: &EntityPopulation,
        buy_bias: f64,
        price: f64,
    ) -> TradeIntent {
        let mut phase = SelectorPhase::Searching { attempts_left: self.max_attempts };
        loop {
            match phase {
                SelectorPhase::Searching { attempts_left: 0 } => {
                    phase = SelectorPhase::ForcedFallback;
                }
                SelectorPhase::Searching { attempts_left } => {
                    let idx = sampler.entity_index(population.len());
                    let amount = sampler.trade_size();
                    let entity = population.get(idx);
                    if sampler.roll(buy_bias) {
                        if entity.usd_balance >= amount {
                            return TradeIntent { entity: idx, usd_amount: amount, side: TradeSide::Buy };
                        }
                    } else if entity.token_balance >= amount * price {
                        return TradeIntent { entity: idx, usd_amount: amount, side: TradeSide::Sell };
                    }
                    phase = SelectorPhase::Searching { attempts_left: attempts_left - 1 };
                }
                SelectorPhase::ForcedFallback => {
                    return self.forced_fallback(sampler, population, price);
                }
            }
        }
    }

    /// Deterministic fallback: one fresh entity, trade shrunk to what it can
    /// actually afford. Prefers a buy; falls back to a sell if the tokens
    /// cover it; otherwise a minimal buy of whatever cash remains.
    fn forced_fallback(
        &self,
        sampler: &mut RandomSampler,
        population: &EntityPopulation,
        price: f64,
    ) -> TradeIntent {
        let idx = sampler.entity_index(population.len());
        let entity = population.get(idx);
        let affordable = if entity.usd_balance > 1.0 { entity.usd_balance } else { 1.0 };
        let amount = sampler.trade_size().min(affordable);

        if entity.usd_balance > amount {
            return TradeIntent { entity: idx, usd_amount: amount, side: TradeSide::Buy };
        }
        if entity.token_balance > amount * price {
            return TradeIntent { entity: idx, usd_amount: amount, side: TradeSide::Sell };
        }
        // May be zero for a fully broke entity; the clock skips it.
        TradeIntent {
            entity: idx,
            usd_amount: entity.usd_balance.min(1.0),
            side: TradeSide::Buy,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::types::Entity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sampler(seed: u64) -> RandomSampler {
        RandomSampler::new(&SimConfig::default(), ChaCha8Rng::seed_from_u64(seed))
            .expect("default config")
    }

    fn wealthy(n: usize) -> EntityPopulation {
        EntityPopulation::from_entities(vec![
            Entity { usd_balance: 10_000.0, token_balance: 0.0 };
            n
        ])
    }

    #[test]
    fn search_returns_solvent_buys() {
        let mut s = sampler(42);
        let pop = wealthy(100);
        let selector = TradeSelector::new(10);
        for _ in 0..1000 {
            let intent = selector.select_trade(&mut s, &pop, 0.55, 65_666.0);
            // No entity holds tokens, so every intent must be an affordable buy.
            assert_eq!(intent.side, TradeSide::Buy);
            assert!(intent.usd_amount > 0.0);
            assert!(pop.get(intent.entity).usd_balance >= intent.usd_amount);
        }
    }

    #[test]
    fn search_finds_sell_side_when_tokens_exist() {
        let mut s = sampler(9);
        let mut entities = vec![Entity { usd_balance: 5000.0, token_balance: 0.0 }; 50];
        for e in entities.iter_mut() {
            e.token_balance = 100_000_000.0;
        }
        let pop = EntityPopulation::from_entities(entities);
        let selector = TradeSelector::new(10);
        let price = 65_666.0;
        let sells = (0..1000)
            .filter(|_| {
                selector.select_trade(&mut s, &pop, 0.45, price).side == TradeSide::Sell
            })
            .count();
        // With bias 0.45 toward buys, roughly 55% of intents should be sells.
        assert!((450..=650).contains(&sells), "sell share {} out of band", sells);
    }

    #[test]
    fn single_solvent_entity_is_found_without_fallback() {
        let mut s = sampler(1);
        let mut entities = vec![Entity { usd_balance: 0.0, token_balance: 0.0 }; 5];
        entities[3].usd_balance = 10_000.0;
        let pop = EntityPopulation::from_entities(entities);
        let selector = TradeSelector::new(10);
        let mut hits = 0;
        for _ in 0..500 {
            let intent = selector.select_trade(&mut s, &pop, 1.0, 65_666.0);
            if intent.entity == 3 {
                hits += 1;
            }
        }
        // Miss probability per attempt is 4/5; over 10 attempts the solvent
        // entity is found with probability ~0.89, so expect well over half.
        assert!(hits > 350, "solvent entity hit only {} of 500", hits);
    }

    #[test]
    fn fallback_on_broke_population_yields_skippable_intent() {
        let mut s = sampler(5);
        let pop = EntityPopulation::from_entities(vec![
            Entity { usd_balance: 0.0, token_balance: 0.0 };
            10
        ]);
        let selector = TradeSelector::new(10);
        let intent = selector.select_trade(&mut s, &pop, 0.55, 65_666.0);
        assert_eq!(intent.side, TradeSide::Buy);
        assert_eq!(intent.usd_amount, 0.0);
    }

    #[test]
    fn fallback_shrinks_to_affordable_cash() {
        let mut s = sampler(11);
        // Nobody passes the search (all balances below the minimum trade
        // size of 1), so the fallback path must fire and shrink the amount.
        let pop = EntityPopulation::from_entities(vec![
            Entity { usd_balance: 0.5, token_balance: 0.0 };
            10
        ]);
        let selector = TradeSelector::new(10);
        let intent = selector.select_trade(&mut s, &pop, 0.55, 65_666.0);
        assert_eq!(intent.side, TradeSide::Buy);
        assert!(intent.usd_amount <= 0.5);
    }
}
