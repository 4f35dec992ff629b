//! # Weight Sampler
//!
//! $$
//! u_i \sim \mathcal U(0,1),\qquad w_i = \frac{u_i}{\sum_j u_j}
//! $$
//!
//! Lazy stream of random long-only weight vectors on the unit simplex.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::Open01;

use crate::error::FrontierError;
use crate::error::Result;

/// Iterator over `n` random weight vectors of length `k`.
#[derive(Clone, Debug)]
pub struct WeightSampler {
  k: usize,
  remaining: usize,
  rng: StdRng,
}

impl WeightSampler {
  /// Seeded sampler, or OS entropy when `seed` is `None`.
  pub fn new(k: usize, n: usize, seed: Option<u64>) -> Result<Self> {
    let rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Self::with_rng(k, n, rng)
  }

  /// Sampler drawing from a caller-supplied generator stream.
  pub fn with_rng(k: usize, n: usize, rng: StdRng) -> Result<Self> {
    if k == 0 {
      return Err(FrontierError::input("asset count must be >= 1"));
    }
    if n == 0 {
      return Err(FrontierError::input("sample count must be >= 1"));
    }
    Ok(Self { k, remaining: n, rng })
  }

  /// Assets per weight vector.
  pub fn k(&self) -> usize {
    self.k
  }

  fn draw(&mut self) -> Vec<f64> {
    if self.k == 1 {
      return vec![1.0];
    }

    let mut w: Vec<f64> = (0..self.k).map(|_| self.rng.sample(Open01)).collect();
    let sum: f64 = w.iter().sum();
    w.iter_mut().for_each(|x| *x /= sum);
    w
  }
}

impl Iterator for WeightSampler {
  type Item = Vec<f64>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }
    self.remaining -= 1;
    Some(self.draw())
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl ExactSizeIterator for WeightSampler {}

const SPLITMIX_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

fn splitmix64_next(state: &mut u64) -> u64 {
  *state = state.wrapping_add(SPLITMIX_GAMMA);
  let mut z = *state;
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
  z ^ (z >> 31)
}

/// Derive the seed of generator stream `index` from a base seed: the
/// `index`-th splitmix64 output of a state started at `base`.
pub fn stream_seed(base: u64, index: u64) -> u64 {
  let mut state = base.wrapping_add(index.wrapping_mul(SPLITMIX_GAMMA));
  splitmix64_next(&mut state)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn weights_are_non_negative_and_sum_to_one() {
    for k in [2, 3, 5, 17] {
      let sampler = WeightSampler::new(k, 500, Some(11)).unwrap();
      assert_eq!(sampler.len(), 500);

      for w in sampler {
        assert_eq!(w.len(), k);
        assert!(w.iter().all(|&x| x > 0.0 && x < 1.0));
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-9);
      }
    }
  }

  #[test]
  fn single_asset_always_gets_full_weight() {
    let all: Vec<_> = WeightSampler::new(1, 10, None).unwrap().collect();
    assert_eq!(all.len(), 10);
    assert!(all.iter().all(|w| w == &vec![1.0]));
  }

  #[test]
  fn same_seed_same_stream() {
    let a: Vec<_> = WeightSampler::new(4, 50, Some(42)).unwrap().collect();
    let b: Vec<_> = WeightSampler::new(4, 50, Some(42)).unwrap().collect();
    let c: Vec<_> = WeightSampler::new(4, 50, Some(43)).unwrap().collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
  }

  #[test]
  fn rejects_empty_dimensions() {
    assert!(WeightSampler::new(0, 10, Some(1)).is_err());
    assert!(WeightSampler::new(3, 0, Some(1)).is_err());
  }

  #[test]
  fn stream_seeds_differ() {
    let seeds: Vec<u64> = (0..64).map(|i| stream_seed(7, i)).collect();
    for i in 0..seeds.len() {
      for j in (i + 1)..seeds.len() {
        assert_ne!(seeds[i], seeds[j]);
      }
    }
    assert_eq!(stream_seed(7, 3), stream_seed(7, 3));
  }

  #[test]
  fn stream_seed_walks_the_splitmix_sequence() {
    let mut state = 0u64;
    assert_eq!(splitmix64_next(&mut state), 0xe220_a839_7b1d_cdaf);
    assert_eq!(stream_seed(0, 0), 0xe220_a839_7b1d_cdaf);

    let mut state = 7u64;
    let walked: Vec<u64> = (0..4).map(|_| splitmix64_next(&mut state)).collect();
    let derived: Vec<u64> = (0..4).map(|i| stream_seed(7, i)).collect();
    assert_eq!(walked, derived);
  }
}
