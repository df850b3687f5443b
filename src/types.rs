use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Sample values in -1 to 1
pub type SampleBuffer = Vec<f64>;

/// One `SampleBuffer` per channel, all of equal length
pub type Channels = Vec<SampleBuffer>;

/// Identifies a node in the host audio graph
pub type NodeId = usize;

/// Largest positive value of 32-bit signed PCM.
pub const FULL_SCALE: f64 = i32::MAX as f64;

/// Largest magnitude produced by the normalizer.
/// Scaled by 2^31 this lands exactly on `i32::MAX`.
pub const HEADROOM: f64 = FULL_SCALE / (FULL_SCALE + 1.0);

pub const MIN_CHANNELS: usize = 1;
pub const MAX_CHANNELS: usize = 32;
pub const DEFAULT_CHANNELS: usize = 2;
pub const DEFAULT_STEREO: bool = true;

/// Supported lengths of a channel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BufferSize {
  S128,
  S256,
  S512,
  S1024,
  S2048,
  S4096,
  S8192,
  S16384,
}

impl BufferSize {
  pub const ALL: [BufferSize; 8] = [
    BufferSize::S128,
    BufferSize::S256,
    BufferSize::S512,
    BufferSize::S1024,
    BufferSize::S2048,
    BufferSize::S4096,
    BufferSize::S8192,
    BufferSize::S16384,
  ];

  pub fn len(self) -> usize {
    match self {
      BufferSize::S128 => 128,
      BufferSize::S256 => 256,
      BufferSize::S512 => 512,
      BufferSize::S1024 => 1024,
      BufferSize::S2048 => 2048,
      BufferSize::S4096 => 4096,
      BufferSize::S8192 => 8192,
      BufferSize::S16384 => 16384,
    }
  }

  /// Unrecognized lengths fall back to the default instead of failing.
  pub fn from_len_or_default(len: usize) -> BufferSize {
    BufferSize::try_from(len).unwrap_or_default()
  }
}

impl Default for BufferSize {
  fn default() -> Self {
    BufferSize::S4096
  }
}

impl TryFrom<usize> for BufferSize {
  type Error = Error;

  fn try_from(len: usize) -> Result<Self, Self::Error> {
    BufferSize::ALL
      .iter()
      .copied()
      .find(|size| size.len() == len)
      .ok_or(Error::UnsupportedBufferSize(len))
  }
}

impl From<BufferSize> for usize {
  fn from(size: BufferSize) -> usize {
    size.len()
  }
}

impl std::fmt::Display for BufferSize {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.len())
  }
}

/// Allocates a silent buffer of the given shape.
pub fn silence(channels: usize, len: usize) -> Channels {
  vec![vec![0.0; len]; channels]
}
