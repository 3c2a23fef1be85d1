// Copyright 2026 Degen Labs. All rights reserved.
// Degen Market Simulation Suite ("The Pit") - Sentiment Feedback

use std::collections::VecDeque;

// ─── SentimentTracker ────────────────────────────────────────────────────────

/// Rolling window of recent prices feeding a mild momentum bias ("slight
/// FOMO"): price below the window mean — the token got more expensive in USD
/// terms, since price is tokens per USD — nudges buy probability up to 0.55,
/// otherwise down to 0.45.
#[derive(Debug, Clone)]
pub struct SentimentTracker {
    window: VecDeque<f64>,
    bias_below_avg: f64,
    bias_above_avg: f64,
}

impl SentimentTracker {
    /// The window starts pre-filled with the initial price so the bias is
    /// neutral-ish until real history accumulates.
    pub fn new(window_len: usize, initial_price: f64, bias_below_avg: f64, bias_above_avg: f64) -> Self {
        let mut window = VecDeque::with_capacity(window_len);
        window.extend(std::iter::repeat(initial_price).take(window_len));
        Self { window, bias_below_avg, bias_above_avg }
    }

    /// Record the latest closing price (FIFO: oldest observation drops out)
    /// and return the buy bias for the coming tick.
    pub fn observe(&mut self, price: f64) -> f64 {
        self.window.pop_front();
        self.window.push_back(price);
        let avg = self.window.iter().sum::<f64>() / self.window.len() as f64;
        if price < avg {
            self.bias_below_avg
        } else {
            self.bias_above_avg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(initial: f64) -> SentimentTracker {
        SentimentTracker::new(100, initial, 0.55, 0.45)
    }

    #[test]
    fn flat_price_gives_low_bias() {
        let mut t = tracker(1000.0);
        // price == avg, not below it
        assert_eq!(t.observe(1000.0), 0.45);
    }

    #[test]
    fn falling_price_raises_buy_bias() {
        // Price in tokens-per-USD falling = token appreciating = FOMO.
        let mut t = tracker(1000.0);
        assert_eq!(t.observe(900.0), 0.55);
    }

    #[test]
    fn rising_price_lowers_buy_bias() {
        let mut t = tracker(1000.0);
        assert_eq!(t.observe(1100.0), 0.45);
    }

    #[test]
    fn window_is_fifo_with_fixed_length() {
        let mut t = tracker(1000.0);
        // Push 100 observations of 500; the window now holds only 500s.
        for _ in 0..100 {
            t.observe(500.0);
        }
        assert_eq!(t.window.len(), 100);
        // 500 equals the new average exactly, so bias is the above-avg one.
        assert_eq!(t.observe(500.0), 0.45);
        // A dip below the all-500 average flips it back.
        assert_eq!(t.observe(499.0), 0.55);
    }
}
