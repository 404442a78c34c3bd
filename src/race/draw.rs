//! Weighted winner draw.
//!
//! Keeps running totals of the entrant weights and maps a single uniform
//! roll in `0..total` onto an entrant index by binary search. Weights are
//! relative; nothing is normalized.

use rand::Rng;

/// Cumulative weight table over a fixed list of entrants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeWeights {
    /// `bounds[i]` is the sum of weights `0..=i`. Strictly increasing.
    bounds: Vec<u64>,
}

impl CumulativeWeights {
    /// Build the table. Returns `None` if the weights are empty or any
    /// weight is zero, since such a table cannot produce a valid draw.
    pub fn new<I>(weights: I) -> Option<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut total = 0u64;
        let mut bounds = Vec::new();
        for w in weights {
            if w == 0 {
                return None;
            }
            total += u64::from(w);
            bounds.push(total);
        }
        if bounds.is_empty() {
            return None;
        }
        Some(Self { bounds })
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        // Non-empty by construction.
        self.bounds[self.bounds.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Index owning `roll`, where `roll < total()`.
    pub fn index_for(&self, roll: u64) -> usize {
        let idx = self.bounds.partition_point(|&bound| bound <= roll);
        idx.min(self.bounds.len() - 1)
    }

    /// Draw one index with probability `weight / total`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let roll = rng.gen_range(0..self.total());
        self.index_for(roll)
    }
}
