//! Fast PRNG for pull simulation. Uses SplitMix64 for throughput and good statistical quality.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// 2^-53, maps the top 53 bits of a draw onto [0, 1).
const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        mix(self.state)
    }

    /// Uniform in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_SCALE
    }

    /// Uniform in [0, 100). All chances in this crate are percentages.
    #[inline]
    pub fn roll_percent(&mut self) -> f64 {
        self.next_f64() * 100.0
    }

    /// True with probability `percent / 100`.
    #[inline]
    pub fn chance(&mut self, percent: f64) -> bool {
        self.roll_percent() < percent
    }

    #[inline]
    pub fn coin_flip(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
    z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
    z ^ (z >> 31)
}

/// Seed for stream `stream` of a batch seeded with `base`.
///
/// Adjacent streams do not overlap: `base + i` would only shift one SplitMix
/// sequence by a step, so the index is mixed before it is combined.
pub fn stream_seed(base: u64, stream: u64) -> u64 {
    mix(base ^ mix(stream.wrapping_add(SPLITMIX64_GOLDEN)))
}

pub fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            eprintln!("os entropy unavailable ({err}), using fixed seed");
            SPLITMIX64_GOLDEN
        }
    }
}
