use itertools::{Itertools, MinMaxResult};

use crate::types::{SampleBuffer, HEADROOM};

/// Gain applied by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gain {
  /// Nothing to scale (silence or no samples)
  Unity,
  /// Nominal coefficient `HEADROOM / peak`. Samples are scaled as
  /// `sample / peak * HEADROOM`, which may differ from `sample * coefficient`
  /// in the last bit.
  Scaled(f64),
}

impl Gain {
  pub fn factor(self) -> f64 {
    match self {
      Gain::Unity => 1.0,
      Gain::Scaled(coefficient) => coefficient,
    }
  }
}

/// Global minimum and maximum over all channels, or `None` without samples.
pub fn min_max(channels: &[SampleBuffer]) -> Option<(f64, f64)> {
  match channels.iter().flatten().copied().minmax() {
    MinMaxResult::NoElements => None,
    MinMaxResult::OneElement(x) => Some((x, x)),
    MinMaxResult::MinMax(min, max) => Some((min, max)),
  }
}

/// Largest magnitude among `min` and `max`, or `None` for silence.
pub fn peak(min: f64, max: f64) -> Option<f64> {
  let peak = min.abs().max(max);
  if peak > 0.0 && peak.is_finite() {
    Some(peak)
  } else {
    None
  }
}

/// Gain mapping the most extreme sample onto `HEADROOM`, or `None` for silence.
pub fn gain_coefficient(min: f64, max: f64) -> Option<f64> {
  peak(min, max).map(|peak| HEADROOM / peak)
}

/// Rescales every channel by one shared gain so the loudest sample sits just
/// under full scale.
pub fn normalize(channels: &mut [SampleBuffer]) -> Gain {
  let peak = match min_max(channels).and_then(|(min, max)| peak(min, max)) {
    Some(peak) => peak,
    None => return Gain::Unity,
  };

  for channel in channels.iter_mut() {
    // dividing first lands the extreme sample exactly on HEADROOM
    channel.iter_mut().for_each(|sample| *sample = *sample / peak * HEADROOM);
  }

  Gain::Scaled(HEADROOM / peak)
}

#[cfg(test)]
mod test {
  use super::*;

  fn loudest(channels: &[SampleBuffer]) -> f64 {
    channels.iter().flatten().map(|s| s.abs()).fold(0.0, f64::max)
  }

  #[test]
  fn test_min_max_spans_channels() {
    let channels = vec![vec![0.1, -0.4], vec![2.0, 0.3]];
    assert_eq!(min_max(&channels), Some((-0.4, 2.0)));
    assert_eq!(min_max(&[vec![0.5]]), Some((0.5, 0.5)));
    assert_eq!(min_max(&[]), None);
    assert_eq!(min_max(&[vec![], vec![]]), None);
  }

  #[test]
  fn test_negative_peak_sets_gain() {
    let mut channels = vec![vec![-4.0, 1.0], vec![2.0, 0.0]];
    let gain = normalize(&mut channels);
    assert_eq!(gain, Gain::Scaled(HEADROOM / 4.0));
    assert_eq!(channels[0][0], -HEADROOM);
    assert!(loudest(&channels) <= HEADROOM);
  }

  #[test]
  fn test_reported_gain_is_nominal() {
    let original = vec![vec![0.3, -0.7, 0.11], vec![0.05, 0.69, -0.2]];
    let mut channels = original.clone();
    let factor = normalize(&mut channels).factor();
    assert_eq!(factor, HEADROOM / 0.7);
    for (before, after) in original.iter().flatten().zip(channels.iter().flatten()) {
      assert!((before * factor - after).abs() <= 2.0 * f64::EPSILON * after.abs());
    }
  }

  #[test]
  fn test_quiet_signal_is_boosted() {
    let mut channels = vec![vec![0.01, -0.005, 0.002]];
    normalize(&mut channels);
    assert_eq!(loudest(&channels), HEADROOM);
  }

  #[test]
  fn test_silence_is_untouched() {
    let mut channels = vec![vec![0.0; 16]; 2];
    assert_eq!(normalize(&mut channels), Gain::Unity);
    assert!(channels.iter().flatten().all(|&s| s == 0.0));
    assert_eq!(Gain::Unity.factor(), 1.0);
  }

  #[test]
  fn test_empty_is_untouched() {
    let mut channels: Vec<SampleBuffer> = vec![];
    assert_eq!(normalize(&mut channels), Gain::Unity);
    let mut channels: Vec<SampleBuffer> = vec![vec![]];
    assert_eq!(normalize(&mut channels), Gain::Unity);
  }

  #[test]
  fn test_gain_coefficient() {
    assert_eq!(gain_coefficient(0.0, 0.0), None);
    assert_eq!(gain_coefficient(-2.0, 1.0), Some(HEADROOM / 2.0));
    assert_eq!(gain_coefficient(-1.0, 4.0), Some(HEADROOM / 4.0));
    assert_eq!(gain_coefficient(f64::NEG_INFINITY, 1.0), None);
    assert_eq!(peak(-0.25, 0.0), Some(0.25));
  }
}
