//! Count generators.
//!
//! Each generator owns its own [`RandomSource`] seeded at construction.
//! Parameters are validated when the generator is built; generation only
//! fails with `Numerical` when a draw does not fit in a `u64` count.

pub mod rng;

mod multiple;
mod replicate;
mod single;

pub use multiple::MultipleSampleGenerator;
pub use replicate::ReplicateGenerator;
pub use rng::{NegativeBinomial, RandomSource};
pub use single::SingleSampleGenerator;

/// Draw `len` independent counts, in order.
fn draw_counts(
    rng: &mut RandomSource,
    distribution: &NegativeBinomial,
    len: usize,
) -> crate::error::Result<Vec<u64>> {
    (0..len).map(|_| rng.negative_binomial(distribution)).collect()
}
