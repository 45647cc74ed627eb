//! Code synthesis and the generation outcome sum type.

use rand::Rng;
use shared_types::OneTimeCode;

/// Result of one generation attempt, returned by value.
///
/// Only `Issued` carries a code. The other variants are expected outcomes
/// the caller must handle as ordinary values; none of them is a fault.
#[derive(Clone, Debug)]
pub enum GenerateOutcome {
    /// Readiness was observed in time and a code was issued.
    Issued(OneTimeCode),
    /// The deadline elapsed before readiness was observed (or with too
    /// little budget left to issue).
    TimedOut,
    /// The transaction reached a terminal failed state while waiting;
    /// there is no point in burning the remaining budget.
    Aborted,
}

impl GenerateOutcome {
    /// Returns true for `Issued`.
    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued(_))
    }
}

/// Synthesizes a random numeric code of the given length.
///
/// Not cryptographic: this is a timing demo, and the code only needs to be
/// plausible and fixed-length.
pub fn synthesize_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| rng.gen_range(b'0'..=b'9') as char).collect()
}
