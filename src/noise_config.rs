use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{BufferSize, DEFAULT_CHANNELS, DEFAULT_STEREO, MAX_CHANNELS, MIN_CHANNELS};

/// Parameters shared by the white and pink noise generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoiseConfig {
  pub stereo: bool,
  #[serde(deserialize_with = "lenient_channels")]
  pub channels: usize,
  #[serde(deserialize_with = "lenient_buffer_size")]
  pub buffer_size: BufferSize,
  /// Fixed seed for reproducible noise; entropy when absent
  pub seed: Option<u64>,
}

impl Default for NoiseConfig {
  fn default() -> Self {
    NoiseConfig {
      stereo: DEFAULT_STEREO,
      channels: DEFAULT_CHANNELS,
      buffer_size: BufferSize::default(),
      seed: None,
    }
  }
}

impl NoiseConfig {
  pub fn new(stereo: bool, channels: usize, buffer_size: usize) -> NoiseConfig {
    NoiseConfig {
      stereo,
      channels: channels_or_default(channels),
      buffer_size: buffer_size_or_default(buffer_size),
      seed: None,
    }
  }

  pub fn with_seed(mut self, seed: u64) -> NoiseConfig {
    self.seed = Some(seed);
    self
  }

  pub fn len(&self) -> usize {
    self.buffer_size.len()
  }

  /// Same config with out of range fields replaced by their defaults.
  pub fn sanitized(self) -> NoiseConfig {
    NoiseConfig {
      channels: channels_or_default(self.channels),
      ..self
    }
  }
}

/// Channel counts outside [1, 32] fall back to the default.
pub fn channels_or_default(channels: usize) -> usize {
  if (MIN_CHANNELS..=MAX_CHANNELS).contains(&channels) {
    channels
  } else {
    warn!("channels {} out of range {}..={}, using {}", channels, MIN_CHANNELS, MAX_CHANNELS, DEFAULT_CHANNELS);
    DEFAULT_CHANNELS
  }
}

/// Unrecognized buffer sizes fall back to the default.
pub fn buffer_size_or_default(len: usize) -> BufferSize {
  let size = BufferSize::from_len_or_default(len);
  if size.len() != len {
    warn!("unsupported buffer size {}, using {}", len, size);
  }
  size
}

fn lenient_channels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
  let channels = usize::deserialize(deserializer)?;
  Ok(channels_or_default(channels))
}

fn lenient_buffer_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BufferSize, D::Error> {
  let len = usize::deserialize(deserializer)?;
  Ok(buffer_size_or_default(len))
}
