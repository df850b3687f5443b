//! Paul Kellet's refined pink noise filter.
//!
//! Six leaky integrators at staggered poles plus a one-sample delayed
//! white term approximate a -3 dB/octave slope across the audio band.

use crate::types::{Channels, SampleBuffer};

/// Running accumulators b0..b6 for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KelletState {
  b: [f64; 7],
}

impl KelletState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn reset(&mut self) {
    self.b = [0.0; 7];
  }

  /// Consumes one white sample and yields one pink sample.
  #[inline]
  pub fn tick(&mut self, white: f64) -> f64 {
    let b = &mut self.b;
    b[0] = 0.99886 * b[0] + white * 0.0555179;
    b[1] = 0.99332 * b[1] + white * 0.0750759;
    b[2] = 0.96900 * b[2] + white * 0.1538520;
    b[3] = 0.86650 * b[3] + white * 0.3104856;
    b[4] = 0.55000 * b[4] + white * 0.5329522;
    b[5] = -0.7616 * b[5] - white * 0.0168980;
    // b6 still holds the previous sample's term here
    let pink = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + white * 0.5362;
    b[6] = white * 0.115926;
    pink
  }
}

/// Filters one channel from a zeroed state.
pub fn filter_channel(white: &[f64]) -> SampleBuffer {
  let mut state = KelletState::new();
  white.iter().map(|&w| state.tick(w)).collect()
}

/// Filters every channel independently. The output has the input's shape.
pub fn filter(white: &[SampleBuffer]) -> Channels {
  white.iter().map(|channel| filter_channel(channel)).collect()
}

/// Same as [`filter`] but overwrites the input.
pub fn filter_in_place(channels: &mut [SampleBuffer]) {
  for channel in channels.iter_mut() {
    let mut state = KelletState::new();
    channel.iter_mut().for_each(|sample| *sample = state.tick(*sample));
  }
}
