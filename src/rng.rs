use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG factory for a given (seed, line_id) pair.
///
/// Derives the generator seed as `seed ^ line_id` and uses PCG 64, so equal
/// inputs reproduce the same sequence across runs and platforms.
#[inline]
pub fn rng_for_line(seed: u64, line_id: u64) -> impl Rng {
    Pcg64::seed_from_u64(seed ^ line_id)
}

/// A reproducible coin line of `len` coins valued in `1..=max_coin`.
/// A `max_coin` of zero yields a line of zeros.
pub fn random_coins(seed: u64, line_id: u64, len: usize, max_coin: u32) -> Vec<u32> {
    if max_coin == 0 {
        return vec![0; len];
    }
    let mut rng = rng_for_line(seed, line_id);
    (0..len).map(|_| rng.gen_range(1..=max_coin)).collect()
}
