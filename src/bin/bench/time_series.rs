// Per-Tick JSONL Time Series Recorder
// Outputs one JSON line per tick for independent analysis and plotting.

use pit_engine::TickResult;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub price: f64,
    pub bag_value: f64,
    pub market_cap: f64,
    pub usd_reserve: f64,
    pub token_reserve: f64,
    pub buy_bias: f64,
    pub buy_count: u64,
    pub sell_count: u64,
    pub buy_volume: f64,
    pub sell_volume: f64,
    pub trades_executed: u32,
    pub rug_pull: bool,
    pub injected: bool,
}

impl TickSnapshot {
    pub fn from_result(result: &TickResult) -> Self {
        let s = &result.state;
        Self {
            tick: s.tick,
            price: s.price,
            bag_value: s.holder_bag_value,
            market_cap: s.market_cap,
            usd_reserve: s.usd_reserve,
            token_reserve: s.token_reserve,
            buy_bias: s.buy_bias,
            buy_count: s.buy_count,
            sell_count: s.sell_count,
            buy_volume: s.buy_volume,
            sell_volume: s.sell_volume,
            trades_executed: result.trades_executed,
            rug_pull: result.rug_pull,
            injected: result.injected,
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL.
pub struct TimeSeriesRecorder {
    snapshots: Vec<TickSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, result: &TickResult) {
        self.snapshots.push(TickSnapshot::from_result(result));
    }

    /// Write all snapshots to a JSONL file.
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
