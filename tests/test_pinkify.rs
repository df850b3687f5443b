mod common;

use pink_noise::noise::{filter, filter_channel};
use pink_noise::render::normalize::{min_max, normalize, Gain};
use pink_noise::{pinkify, BufferSize, HEADROOM};

/// Kellet filter output for [1, -1, 1, -1, 1, -1, 1, -1].
const ALTERNATING_PINK: [f64; 8] = [
  1.6471855999999998,
  -0.6771190102179999,
  1.335583778661623,
  -0.7685586600581882,
  1.2506715827899055,
  -0.8086123431137593,
  1.2061042510227327,
  -0.8314790080319573,
];

#[test]
fn test_zero_in_zero_out() {
  let mut buffer = vec![vec![0.0; 512]; 4];
  let gain = pinkify(&mut buffer);
  assert_eq!(gain, Gain::Unity);
  assert!(buffer.iter().flatten().all(|&s| s == 0.0));
}

#[test]
fn test_shape_is_preserved() {
  for channels in 1..=32 {
    for size in BufferSize::ALL {
      let white = vec![vec![0.25; size.len()]; channels];
      let pink = filter(&white);
      assert_eq!(pink.len(), channels);
      assert!(pink.iter().all(|c| c.len() == size.len()));
    }
  }
}

#[test]
fn test_normalized_bound_is_tight() {
  for seed in 0..8 {
    let mut buffer: Vec<_> = (0..3).map(|c| common::white_channel(1024, seed * 10 + c)).collect();
    let gain = pinkify(&mut buffer);
    assert!(matches!(gain, Gain::Scaled(g) if g > 0.0));
    common::assert_tight(&buffer);
  }
}

#[test]
fn test_channels_are_independent() {
  let first = common::white_channel(4096, 1);
  let second = common::white_channel(4096, 2);

  let together = filter(&[first.clone(), second.clone()]);
  let alone = filter_channel(&second);
  assert_eq!(together[1], alone);
  assert_eq!(together[0], filter_channel(&first));
}

#[test]
fn test_deterministic_replay() {
  let white: Vec<_> = (0..2).map(|c| common::white_channel(2048, 77 + c)).collect();
  let mut a = white.clone();
  let mut b = white.clone();
  pinkify(&mut a);
  pinkify(&mut b);
  assert_eq!(a, b);
}

#[test]
fn test_alternating_end_to_end() {
  let mut buffer = vec![vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0], vec![0.0; 8]];

  let pink = filter(&buffer);
  for (got, want) in pink[0].iter().zip(ALTERNATING_PINK.iter()) {
    assert!((got - want).abs() < 1e-12, "{} != {}", got, want);
  }
  assert!(pink[1].iter().all(|&s| s == 0.0));

  let gain = pinkify(&mut buffer);
  let peak = ALTERNATING_PINK[0];
  match gain {
    Gain::Scaled(g) => assert!((g - HEADROOM / peak).abs() < 1e-12),
    Gain::Unity => panic!("alternating input should be scaled"),
  }

  assert!(buffer[1].iter().all(|&s| s == 0.0));
  assert_eq!(buffer[0][0], HEADROOM);
  for (got, want) in buffer[0].iter().zip(ALTERNATING_PINK.iter()) {
    assert!((got - want / peak * HEADROOM).abs() < 1e-12);
  }
  common::assert_tight(&buffer);
}

#[test]
fn test_min_max_after_normalize() {
  let mut buffer = vec![common::white_channel(256, 5)];
  pinkify(&mut buffer);
  let (min, max) = min_max(&buffer).unwrap();
  assert!(min >= -HEADROOM && max <= HEADROOM);
  assert!(min.abs() == HEADROOM || max == HEADROOM);
}

#[test]
fn test_normalize_twice_is_stable() {
  let mut buffer = vec![common::white_channel(512, 9), common::white_channel(512, 10)];
  pinkify(&mut buffer);
  let once = buffer.clone();
  normalize(&mut buffer);
  for (a, b) in once.iter().flatten().zip(buffer.iter().flatten()) {
    assert!((a - b).abs() < 1e-15);
  }
}
