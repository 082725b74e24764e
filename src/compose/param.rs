use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bounded-random numeric values for the composers.
///
/// The generator state is threaded explicitly through every composer rather
/// than living in ambient global state, so a seeded source makes a whole
/// fixture run reproducible.
#[derive(Debug)]
pub struct ParamSource {
    rng: StdRng,
}

impl ParamSource {
    /// An entropy-seeded source; fixtures differ from run to run.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// An explicitly seeded source for reproducible corpora.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw uniformly from the inclusive range `[min, max]`.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..=max)
    }

    /// Draw an integer from the inclusive range `[min, max]`.
    pub fn integer(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }
}

impl Default for ParamSource {
    fn default() -> Self {
        Self::new()
    }
}
