//! Deterministic random number generation for synthetic rosters.
//!
//! RULE: The roster generator never calls any platform RNG.
//! All randomness flows through RosterRng instances derived from one
//! master seed.
//!
//! Each record attribute gets its own stream, seeded from
//! (master_seed XOR stream_index * golden ratio). This means:
//!   - Adding a new attribute never changes existing attributes' values.
//!   - The same seed always yields the same roster.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for one roster attribute.
pub struct RosterRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl RosterRng {
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one entry with probability proportional to `weight(entry)`.
    /// Returns None only for an empty slice.
    pub fn pick_weighted<'a, T>(&mut self, items: &'a [T], weight: impl Fn(&T) -> f64) -> Option<&'a T> {
        let total: f64 = items.iter().map(&weight).sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for item in items {
            cumulative += weight(item);
            if roll < cumulative {
                return Some(item);
            }
        }
        items.last()
    }
}

/// All attribute RNGs for one roster, indexed by stable stream.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, stream: RosterStream) -> RosterRng {
        RosterRng::new(self.master_seed, stream as u64).with_name(stream.name())
    }
}

/// Stable stream assignments.
/// NEVER reorder or remove entries, only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RosterStream {
    Position = 0,
    Location = 1,
    Status = 2,
    Joining = 3,
}

impl RosterStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Location => "location",
            Self::Status   => "status",
            Self::Joining  => "joining",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_are_reproducible() {
        let bank = RngBank::new(12345);
        let mut a = bank.for_stream(RosterStream::Position);
        let mut b = bank.for_stream(RosterStream::Position);
        for _ in 0..20 {
            assert_eq!(a.next_u64_below(1000), b.next_u64_below(1000));
        }
    }

    #[test]
    fn weighted_pick_skips_zero_weights() {
        let mut rng = RngBank::new(7).for_stream(RosterStream::Location);
        let items = [("never", 0.0), ("always", 1.0)];
        for _ in 0..50 {
            let picked = rng.pick_weighted(&items, |i| i.1).map(|i| i.0);
            assert_eq!(picked, Some("always"));
        }
        let empty: [(&str, f64); 0] = [];
        assert!(rng.pick_weighted(&empty, |i| i.1).is_none());
    }
}
