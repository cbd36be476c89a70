use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

/// Seedable uniform sampler shared by the serendipity paths
///
/// Wraps a `StdRng` so callers can hold it behind an `Arc` and sample from
/// `&self`. A fixed seed makes every sample sequence reproducible.
#[derive(Debug)]
pub struct Sampler {
    rng: Mutex<StdRng>,
}

impl Sampler {
    /// Sampler seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic sampler for reproducible runs and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// `min(amount, len)` distinct indices in `0..len`, drawn uniformly
    /// without replacement
    pub fn sample_indices(&self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rand::seq::index::sample(&mut *rng, len, amount).into_vec()
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
