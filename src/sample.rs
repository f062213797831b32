//! Deterministic sampling for the scatter view.

/// Minimal deterministic PRNG (xoshiro256**)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64) as usize % bound
    }

    /// Box-Muller transform for normal distribution
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Snap a percentage onto the slider grid: 10, 20, … 100.
pub fn snap_percent(percent: u8) -> u8 {
    let snapped = (percent as u16 + 5) / 10 * 10;
    snapped.clamp(10, 100) as u8
}

/// Pick `percent`% of `indices` with a seeded partial Fisher–Yates shuffle.
///
/// The sample size rounds half to even. The result keeps the input order, and the same seed always selects the
/// same events.
pub fn sample_indices(indices: &[usize], percent: u8, seed: u64) -> Vec<usize> {
    let percent = snap_percent(percent);
    if percent >= 100 {
        return indices.to_vec();
    }

    let n = indices.len();
    let k = (n as f64 * percent as f64 / 100.0).round_ties_even() as usize;
    let mut pool: Vec<usize> = (0..n).collect();
    let mut rng = SimpleRng::new(seed);
    for i in 0..k {
        let j = i + rng.below(n - i);
        pool.swap(i, j);
    }

    let mut chosen = pool[..k].to_vec();
    chosen.sort_unstable();
    chosen.into_iter().map(|i| indices[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_snaps_to_slider_steps() {
        assert_eq!(snap_percent(0), 10);
        assert_eq!(snap_percent(44), 40);
        assert_eq!(snap_percent(45), 50);
        assert_eq!(snap_percent(100), 100);
        assert_eq!(snap_percent(255), 100);
    }

    #[test]
    fn full_sample_is_the_whole_view() {
        let view = vec![3, 5, 8];
        assert_eq!(sample_indices(&view, 100, 42), view);
    }

    #[test]
    fn sample_is_an_ordered_subset_of_the_right_size() {
        let view: Vec<usize> = (0..200).map(|i| i * 3).collect();
        let sample = sample_indices(&view, 30, 42);

        assert_eq!(sample.len(), 60);
        assert!(sample.windows(2).all(|w| w[0] < w[1]));
        assert!(sample.iter().all(|i| view.contains(i)));
    }

    #[test]
    fn same_seed_same_sample() {
        let view: Vec<usize> = (0..500).collect();
        assert_eq!(sample_indices(&view, 50, 7), sample_indices(&view, 50, 7));
        assert_ne!(sample_indices(&view, 50, 7), sample_indices(&view, 50, 8));
    }

    #[test]
    fn sample_size_rounds_half_to_even() {
        let five: Vec<usize> = (0..5).collect();
        assert_eq!(sample_indices(&five, 50, 42).len(), 2);
        let three: Vec<usize> = (0..3).collect();
        assert_eq!(sample_indices(&three, 50, 42).len(), 2);
    }

    #[test]
    fn empty_view_samples_to_empty() {
        assert!(sample_indices(&[], 10, 42).is_empty());
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = SimpleRng::new(1);
        assert!((0..1000).all(|_| rng.below(7) < 7));
    }
}
