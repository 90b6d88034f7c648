use std::env;
use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;
use zipf::ZipfDistribution;

/// Seed shared by all patterns in this process. Set `OVERRIDE_SEED=<u64>` to reproduce a
/// failing run.
static SEED: Lazy<u64> = Lazy::new(|| {
    env::var("OVERRIDE_SEED")
        .ok()
        .and_then(|seed| seed.parse().ok())
        .unwrap_or_else(|| thread_rng().gen())
});

pub fn random_init_seed() -> u64 {
    *SEED
}

fn new_seeded_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_seeded_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_with_seed(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform(len: usize, range: RangeInclusive<i32>) -> Vec<i32> {
    // :.:.:.::

    let mut rng = new_seeded_rng();
    let dist = Uniform::from(range);
    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law

    if len == 0 {
        return Vec::new();
    }

    let mut rng = new_seeded_rng();
    let dist = ZipfDistribution::new(len, exponent)
        .unwrap_or_else(|()| panic!("invalid zipf parameters len: {len} exponent: {exponent}"));
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    let mut vals = random(len);
    if len == 0 {
        return vals;
    }

    let chunk_len = len.div_ceil(saw_count.max(1));
    for chunk in vals.chunks_mut(chunk_len) {
        chunk.sort_unstable();
    }

    vals
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    let mut vals = saw_ascending(len, saw_count);
    if len == 0 {
        return vals;
    }

    let chunk_len = len.div_ceil(saw_count.max(1));
    for chunk in vals.chunks_mut(chunk_len) {
        chunk.reverse();
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random(len);
    let first_half = len / 2;
    vals[..first_half].sort_unstable();
    vals[first_half..].sort_unstable_by(|a, b| b.cmp(a));

    vals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        assert_eq!(random_with_seed(100, 7), random_with_seed(100, 7));
        assert_eq!(random(64), random(64));
    }

    #[test]
    fn uniform_stays_in_range() {
        assert!(random_uniform(1_000, 0..=3)
            .iter()
            .all(|v| (0..=3).contains(v)));
    }

    #[test]
    fn zipf_is_one_based() {
        let vals = random_zipf(500, 1.0);
        assert_eq!(vals.len(), 500);
        assert!(vals.iter().all(|&v| (1..=500).contains(&v)));
        assert!(random_zipf(0, 1.0).is_empty());
    }

    #[test]
    fn saw_chunks_are_sorted() {
        let vals = saw_ascending(100, 4);
        for chunk in vals.chunks(25) {
            assert!(chunk.windows(2).all(|w| w[0] <= w[1]));
        }

        let vals = saw_descending(100, 4);
        for chunk in vals.chunks(25) {
            assert!(chunk.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn pipe_organ_shape() {
        let vals = pipe_organ(10);
        assert!(vals[..5].windows(2).all(|w| w[0] <= w[1]));
        assert!(vals[5..].windows(2).all(|w| w[0] >= w[1]));
    }
}
