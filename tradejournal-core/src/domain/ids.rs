use super::trade::TradeRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic content hash of a trade log.
///
/// Recorded alongside exported reports so a report can be traced back to the
/// exact set of trades that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    /// BLAKE3 over every field of every trade, in order.
    ///
    /// Fields are length-prefixed so `("ab", "c")` and `("a", "bc")` differ.
    pub fn of(trades: &[TradeRecord]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(trades.len() as u64).to_le_bytes());
        for t in trades {
            update_str(&mut hasher, &t.date.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
            hasher.update(&t.result.to_bits().to_le_bytes());
            update_opt(&mut hasher, t.reason.as_deref());
            update_opt(&mut hasher, t.direction.map(|d| d.as_str()));
            update_opt(&mut hasher, t.quality.as_deref());
            update_opt(&mut hasher, t.session.as_deref());
            update_opt(&mut hasher, t.symbol.as_deref());
            update_opt(&mut hasher, t.journal.as_deref());
        }
        Self(hasher.finalize().to_hex().to_string())
    }
}

fn update_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn update_opt(hasher: &mut blake3::Hasher, s: Option<&str>) {
    match s {
        Some(s) => {
            hasher.update(&[1]);
            update_str(hasher, s);
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
