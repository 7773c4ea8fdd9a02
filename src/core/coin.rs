use crate::domain::model::{CoinSide, TossStats};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Upper bound on flips requested in one call; every flip is kept in memory.
pub const MAX_FLIPS_PER_CALL: u64 = 1_000_000;

/// Fair coin with a running head/tail tally.
#[derive(Debug)]
pub struct CoinTosser<R: Rng> {
    rng: R,
    stats: TossStats,
}

impl CoinTosser<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for CoinTosser<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinTosser<StdRng> {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CoinTosser<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            stats: TossStats::default(),
        }
    }

    pub fn flip(&mut self) -> CoinSide {
        let side = if self.rng.random_bool(0.5) {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        };

        match side {
            CoinSide::Heads => self.stats.heads += 1,
            CoinSide::Tails => self.stats.tails += 1,
        }
        tracing::debug!(%side, flips = self.stats.flip_count(), "Tossed coin");

        side
    }

    pub fn flip_many(&mut self, count: u64) -> Vec<CoinSide> {
        (0..count).map(|_| self.flip()).collect()
    }

    pub fn stats(&self) -> TossStats {
        self.stats
    }

    pub fn reset(&mut self) {
        self.stats = TossStats::default();
    }
}
