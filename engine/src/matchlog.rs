//! Rally-by-rally match record with a binding digest.
//!
//! Two runs of the engine with the same seed and inputs produce the same
//! log hash, so replays can be compared by digest alone.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::game::RallyOutcome;
use crate::types::{Fault, Score, Side};

/// Version prefix for the log hash encoding.
const LOG_HASH_PREFIX: &[u8] = b"PKLLOGv1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RallyRecord {
    pub rally_number: u32,
    pub winner: Side,
    pub fault: Option<Fault>,
    pub score: Score,
}

impl From<RallyOutcome> for RallyRecord {
    fn from(outcome: RallyOutcome) -> Self {
        Self {
            rally_number: outcome.rally_number,
            winner: outcome.winner,
            fault: outcome.fault,
            score: outcome.score,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchLog {
    pub records: Vec<RallyRecord>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RallyRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// SHA-256 over a versioned little-endian encoding of every record.
    pub fn log_hash(&self) -> [u8; 32] {
        // Fixed 14 bytes per record after the prefix.
        let mut buf = Vec::with_capacity(LOG_HASH_PREFIX.len() + self.records.len() * 14);
        buf.extend_from_slice(LOG_HASH_PREFIX);
        for record in &self.records {
            buf.extend_from_slice(&record.rally_number.to_le_bytes());
            buf.push(side_code(record.winner));
            buf.push(fault_code(record.fault));
            buf.extend_from_slice(&record.score.p1.to_le_bytes());
            buf.extend_from_slice(&record.score.p2.to_le_bytes());
        }

        let mut hasher = Sha256::new();
        hasher.update(&buf);
        let out = hasher.finalize();
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&out);
        arr
    }
}

fn side_code(side: Side) -> u8 {
    match side {
        Side::P1 => 1,
        Side::P2 => 2,
    }
}

fn fault_code(fault: Option<Fault>) -> u8 {
    match fault {
        None => 0,
        Some(Fault::ServeOutOfBounds) => 1,
        Some(Fault::ServeIntoKitchen) => 2,
        Some(Fault::NetContact) => 3,
        Some(Fault::VolleyBeforeDoubleBounce) => 4,
        Some(Fault::BallOutOfBounds) => 5,
        Some(Fault::VolleyFromNvz) => 6,
        Some(Fault::DoubleBounce) => 7,
        Some(Fault::NetTouch) => 8,
        Some(Fault::BallHitPlayer) => 9,
        Some(Fault::BallHitPermanentObject) => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BySide;

    fn record(rally: u32, winner: Side, fault: Option<Fault>) -> RallyRecord {
        RallyRecord {
            rally_number: rally,
            winner,
            fault,
            score: BySide { p1: rally, p2: 0 },
        }
    }

    #[test]
    fn identical_logs_hash_identically() {
        let mut a = MatchLog::new();
        let mut b = MatchLog::new();
        for i in 1..=5 {
            a.push(record(i, Side::P1, Some(Fault::DoubleBounce)));
            b.push(record(i, Side::P1, Some(Fault::DoubleBounce)));
        }
        assert_eq!(a.log_hash(), b.log_hash());
    }

    #[test]
    fn different_outcomes_hash_differently() {
        let mut a = MatchLog::new();
        let mut b = MatchLog::new();
        a.push(record(1, Side::P1, None));
        b.push(record(1, Side::P2, None));
        assert_ne!(a.log_hash(), b.log_hash());

        let mut c = MatchLog::new();
        c.push(record(1, Side::P1, Some(Fault::NetContact)));
        assert_ne!(a.log_hash(), c.log_hash());
    }

    #[test]
    fn empty_log_hashes_prefix_only() {
        let log = MatchLog::new();
        let mut hasher = Sha256::new();
        hasher.update(LOG_HASH_PREFIX);
        let expected: [u8; 32] = hasher.finalize().into();
        assert_eq!(log.log_hash(), expected);
    }
}
