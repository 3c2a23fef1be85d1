// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Trader Population

use serde::{Deserialize, Serialize};

use crate::sampler::RandomSampler;
use crate::types::Entity;

// ─── EntityPopulation ────────────────────────────────────────────────────────

/// The fixed pool of synthetic traders. Created once at run start with
/// log-normal capital and zero tokens; entities are never added or destroyed
/// during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPopulation {
    entities: Vec<Entity>,
}

impl EntityPopulation {
    pub fn spawn(count: usize, sampler: &mut RandomSampler) -> Self {
        let entities = (0..count)
            .map(|_| Entity {
                usd_balance: sampler.initial_capital(),
                token_balance: 0.0,
            })
            .collect();
        Self { entities }
    }

    /// Build a population from explicit balances (scenario setup and tests).
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, idx: usize) -> &Entity {
        &self.entities[idx]
    }

    /// Apply an executed buy: cash out, tokens in.
    pub fn apply_buy(&mut self, idx: usize, usd_spent: f64, tokens_bought: f64) {
        let e = &mut self.entities[idx];
        debug_assert!(e.usd_balance >= usd_spent, "buy exceeds cash balance");
        e.usd_balance -= usd_spent;
        e.token_balance += tokens_bought;
    }

    /// Apply an executed sell: tokens out, cash in.
    pub fn apply_sell(&mut self, idx: usize, usd_received: f64, tokens_paid: f64) {
        let e = &mut self.entities[idx];
        debug_assert!(e.token_balance >= tokens_paid, "sell exceeds token balance");
        e.usd_balance += usd_received;
        e.token_balance -= tokens_paid;
    }

    /// Sum of all entity cash balances (diagnostics and tests).
    pub fn total_usd(&self) -> f64 {
        self.entities.iter().map(|e| e.usd_balance).sum()
    }

    /// Sum of all entity token balances (diagnostics and tests).
    pub fn total_tokens(&self) -> f64 {
        self.entities.iter().map(|e| e.token_balance).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}
