#![allow(dead_code)]
use std::path::PathBuf;

use pink_noise::{SampleBuffer, HEADROOM};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TEST_AUDIO_DIR: &str = "pink-noise-test-render";

pub fn test_audio_path(label: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(TEST_AUDIO_DIR);
  std::fs::create_dir_all(&dir).expect("could not create test render dir");
  dir.join(format!("{}.wav", label))
}

/// Reproducible white noise for one channel.
pub fn white_channel(len: usize, seed: u64) -> SampleBuffer {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect()
}

pub fn loudest(channels: &[SampleBuffer]) -> f64 {
  channels.iter().flatten().map(|s| s.abs()).fold(0.0, f64::max)
}

/// Every sample within the headroom, and the loudest exactly on it.
pub fn assert_tight(channels: &[SampleBuffer]) {
  assert!(channels.iter().flatten().all(|s| s.abs() <= HEADROOM));
  assert_eq!(loudest(channels), HEADROOM);
}
