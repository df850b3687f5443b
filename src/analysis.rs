use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// FFT length for the averaged periodogram
pub const FRAME: usize = 1024;

/// Frequency band the slope is fitted over.
pub const FIT_LOW_HZ: f64 = 100.0;
pub const FIT_HIGH_HZ: f64 = 10000.0;

fn hann(n: usize) -> Vec<f64> {
  (0..n).map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos()).collect()
}

/// Welch-style power spectrum: Hann-windowed, non-overlapping frames,
/// averaged. Returns `FRAME / 2 + 1` bins, or `None` when shorter than a frame.
pub fn power_spectrum(samples: &[f64]) -> Option<Vec<f64>> {
  let frames = samples.len() / FRAME;
  if frames == 0 {
    return None;
  }

  let window = hann(FRAME);
  let mut planner = FftPlanner::<f64>::new();
  let fft = planner.plan_fft_forward(FRAME);

  let mut power = vec![0.0; FRAME / 2 + 1];
  let mut scratch: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); FRAME];
  for chunk in samples.chunks_exact(FRAME) {
    for (bin, (&s, &w)) in scratch.iter_mut().zip(chunk.iter().zip(window.iter())) {
      *bin = Complex::new(s * w, 0.0);
    }
    fft.process(&mut scratch);
    for (p, c) in power.iter_mut().zip(scratch.iter()) {
      *p += c.norm_sqr();
    }
  }

  power.iter_mut().for_each(|p| *p /= frames as f64);
  Some(power)
}

/// Least-squares slope of power (dB) against log2 frequency, in dB/octave.
/// Pink noise sits near -3, white noise near 0.
pub fn spectral_slope(samples: &[f64], sample_rate: u32) -> Option<f64> {
  let power = power_spectrum(samples)?;
  let bin_hz = sample_rate as f64 / FRAME as f64;

  let points: Vec<(f64, f64)> = power
    .iter()
    .enumerate()
    .map(|(k, &p)| (k as f64 * bin_hz, p))
    .filter(|&(f, p)| f >= FIT_LOW_HZ && f <= FIT_HIGH_HZ && p > 0.0)
    .map(|(f, p)| (f.log2(), 10.0 * p.log10()))
    .collect();

  if points.len() < 2 {
    return None;
  }

  let n = points.len() as f64;
  let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
  let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
  let (num, den) = points.iter().fold((0.0, 0.0), |(num, den), &(x, y)| {
    (num + (x - mean_x) * (y - mean_y), den + (x - mean_x).powi(2))
  });

  if den == 0.0 {
    None
  } else {
    Some(num / den)
  }
}
