// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Constant-Product Pool

use serde::{Deserialize, Serialize};

use crate::config::{SimConfig, PRICE_SENTINEL};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Errors raised by pool operations. `ReserveDepleted` is an invariant
/// violation: the sell cap and the liquidity floor exist precisely so it can
/// never happen, and there is no recovery path when it does.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("swap amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    #[error("reserve depleted: usd={usd}, token={token}")]
    ReserveDepleted { usd: f64, token: f64 },
}

// ─── SellOutcome ─────────────────────────────────────────────────────────────

/// Result of a sell swap: the USD actually paid out (after the reserve cap)
/// and the tokens the pool received in exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellOutcome {
    pub usd_out: f64,
    pub tokens_in: f64,
}

// ─── LiquidityPool ───────────────────────────────────────────────────────────

/// The two AMM reserves and the swap/invariant math. Both reserves are
/// strictly positive at all observable times; the product
/// `usd_reserve × token_reserve` is preserved across swaps, halved by a rug
/// pull, and increased by floor injection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityPool {
    usd_reserve: f64,
    token_reserve: f64,

    min_usd: f64,
    usd_margin: f64,
    min_token: f64,
    token_margin: f64,
    sell_cap_fraction: f64,
    rug_shrink: f64,
}

impl LiquidityPool {
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            usd_reserve: cfg.initial_usd_reserve,
            token_reserve: cfg.initial_token_reserve,
            min_usd: cfg.min_usd_reserve,
            usd_margin: cfg.usd_inject_margin,
            min_token: cfg.min_token_reserve,
            token_margin: cfg.token_inject_margin,
            sell_cap_fraction: cfg.sell_cap_fraction,
            rug_shrink: cfg.rug_pull_shrink,
        }
    }

    pub fn usd_reserve(&self) -> f64 {
        self.usd_reserve
    }

    pub fn token_reserve(&self) -> f64 {
        self.token_reserve
    }

    /// The constant-product invariant `k`.
    pub fn k(&self) -> f64 {
        self.usd_reserve * self.token_reserve
    }

    /// Tokens per USD, or the sentinel if the USD reserve is somehow empty.
    pub fn price(&self) -> f64 {
        if self.usd_reserve > 0.0 {
            self.token_reserve / self.usd_reserve
        } else {
            PRICE_SENTINEL
        }
    }

    /// Buy: add `amount` USD to the pool, receive tokens. Preserves `k`.
    pub fn swap_buy(&mut self, amount: f64) -> Result<f64, PoolError> {
        if amount <= 0.0 {
            return Err(PoolError::NonPositiveAmount(amount));
        }
        let k = self.k();
        let new_usd = self.usd_reserve + amount;
        let new_token = k / new_usd;
        let tokens_out = self.token_reserve - new_token;
        self.usd_reserve = new_usd;
        self.token_reserve = new_token;
        self.ensure_positive()?;
        Ok(tokens_out)
    }

    /// Sell: withdraw up to `amount` USD from the pool against tokens. The
    /// executed amount is capped at `sell_cap_fraction` of the USD reserve so
    /// a single trade can never collapse the reserve. Preserves `k`.
    pub fn swap_sell(&mut self, amount: f64) -> Result<SellOutcome, PoolError> {
        if amount <= 0.0 {
            return Err(PoolError::NonPositiveAmount(amount));
        }
        let executed = amount.min(self.sell_cap_fraction * self.usd_reserve);
        let k = self.k();
        let new_usd = self.usd_reserve - executed;
        let new_token = k / new_usd;
        let tokens_in = new_token - self.token_reserve;
        self.usd_reserve = new_usd;
        self.token_reserve = new_token;
        self.ensure_positive()?;
        Ok(SellOutcome { usd_out: executed, tokens_in })
    }

    /// Floor injection: if either reserve is below its floor, add enough to
    /// clear the floor plus a margin, matched on the other side so the
    /// current price ratio is preserved (the invariant `k` grows).
    /// Returns whether anything was injected.
    pub fn maybe_inject_liquidity(&mut self) -> bool {
        let mut injected = false;
        if self.usd_reserve < self.min_usd {
            let add_usd = self.min_usd - self.usd_reserve + self.usd_margin;
            let add_tokens = add_usd * self.token_reserve / self.usd_reserve;
            self.usd_reserve += add_usd;
            self.token_reserve += add_tokens;
            injected = true;
            log::debug!(
                "floor injection: +{:.2} USD, +{:.0} tokens (usd reserve was below {})",
                add_usd, add_tokens, self.min_usd
            );
        }
        if self.token_reserve < self.min_token {
            let add_tokens = self.min_token - self.token_reserve + self.token_margin;
            let add_usd = add_tokens * self.usd_reserve / self.token_reserve;
            self.usd_reserve += add_usd;
            self.token_reserve += add_tokens;
            injected = true;
            log::debug!(
                "floor injection: +{:.2} USD, +{:.0} tokens (token reserve was below {})",
                add_usd, add_tokens, self.min_token
            );
        }
        injected
    }

    /// Rug pull: multiply both reserves by the shrink factor (liquidity
    /// withdrawal), then immediately restore the floor. Shrinking both sides
    /// equally leaves the price untouched; only `k` drops.
    pub fn apply_rug_pull(&mut self) -> bool {
        self.usd_reserve *= self.rug_shrink;
        self.token_reserve *= self.rug_shrink;
        log::info!(
            "rug pull: reserves shrunk to usd={:.2}, token={:.0}",
            self.usd_reserve, self.token_reserve
        );
        self.maybe_inject_liquidity()
    }

    fn ensure_positive(&self) -> Result<(), PoolError> {
        if self.usd_reserve > 0.0 && self.token_reserve > 0.0 {
            Ok(())
        } else {
            Err(PoolError::ReserveDepleted {
                usd: self.usd_reserve,
                token: self.token_reserve,
            })
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
