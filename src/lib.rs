pub mod analysis;
pub mod arg_parse;
pub mod error;
pub mod host;
pub mod meta;
pub mod node;
pub mod noise;
pub mod noise_config;
pub mod render;
pub mod types;

pub use error::{Error, Result};
pub use host::{AudioSource, BufferSource, Destination};
pub use node::{PinkNoise, SharedPinkNoise};
pub use noise::{filter, WhiteNoise};
pub use noise_config::NoiseConfig;
pub use render::normalize::{normalize, Gain};
pub use types::{BufferSize, Channels, SampleBuffer, FULL_SCALE, HEADROOM};

/// Filters a white noise buffer into pink noise and normalizes it in place.
pub fn pinkify(channels: &mut [SampleBuffer]) -> Gain {
  noise::filter_in_place(channels);
  normalize(channels)
}
