pub mod normalize;

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::host::{AudioSource, BufferSource, Destination};
use crate::node::PinkNoise;
use crate::noise_config::NoiseConfig;
use crate::types::{Channels, NodeId};

pub use normalize::{gain_coefficient, min_max, normalize, Gain};

/// Converts a sample in [-1, 1) to 32-bit PCM.
/// `HEADROOM` maps exactly onto `i32::MAX`.
#[inline]
pub fn to_pcm32(sample: f64) -> i32 {
  (sample * 2147483648.0) as i32
}

/// Longest render accepted, one hour.
pub const MAX_SECONDS: f64 = 3600.0;

/// Settings for an offline render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
  pub noise: NoiseConfig,
  pub sample_rate: u32,
  pub seconds: f64,
  pub out: PathBuf,
}

impl Default for RenderConfig {
  fn default() -> Self {
    RenderConfig {
      noise: NoiseConfig::default(),
      sample_rate: 44100,
      seconds: 5.0,
      out: PathBuf::from("pink-noise.wav"),
    }
  }
}

impl RenderConfig {
  pub fn frames(&self) -> usize {
    (self.seconds.clamp(0.0, MAX_SECONDS) * self.sample_rate as f64).round() as usize
  }

  pub fn validate(&self) -> Result<()> {
    if !self.seconds.is_finite() || self.seconds > MAX_SECONDS {
      return Err(Error::Argument(format!(
        "seconds must be at most {}, got {}",
        MAX_SECONDS, self.seconds
      )));
    }
    Ok(())
  }
}

/// Destination that records whatever is played into it.
#[derive(Debug, Clone, Default)]
pub struct WavSink {
  id: NodeId,
  channels: Channels,
}

impl Destination for WavSink {
  fn id(&self) -> NodeId {
    self.id
  }
}

impl WavSink {
  pub fn new(id: NodeId) -> Self {
    WavSink { id, channels: Vec::new() }
  }

  pub fn channels(&self) -> &Channels {
    &self.channels
  }

  pub fn frames(&self) -> usize {
    self.channels.first().map_or(0, |c| c.len())
  }

  pub fn write_frames(&mut self, frames: Channels) {
    if self.channels.len() < frames.len() {
      let len = self.frames();
      self.channels.resize(frames.len(), vec![0.0; len]);
    }
    for (channel, block) in self.channels.iter_mut().zip(frames) {
      channel.extend(block);
    }
  }

  /// Writes the recording as interleaved 32-bit integer PCM.
  pub fn write_wav<P: AsRef<Path>>(&self, path: P, sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
      channels: self.channels.len().max(1) as u16,
      sample_rate,
      bits_per_sample: 32,
      sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for i in 0..self.frames() {
      for channel in &self.channels {
        writer.write_sample(to_pcm32(channel[i]))?;
      }
    }
    writer.finalize()?;
    Ok(())
  }
}

/// Plays `node` into `sink` for the configured duration and writes the file.
pub fn render_to_wav(node: &mut PinkNoise<BufferSource>, sink: &mut WavSink, config: &RenderConfig) -> Result<PathBuf> {
  config.validate()?;
  node.connect(&*sink);
  node.start(0.0);

  let block = node.buffer_size().len();
  let total = config.frames();
  let mut written = 0;
  while written < total {
    let n = block.min(total - written);
    let frames = node.source_mut().read_frames(n);
    if node.source().connections().contains(&sink.endpoint()) {
      sink.write_frames(frames);
    }
    written += n;
  }
  debug!("played {} frames into node {}", written, sink.id());

  node.stop(config.seconds);
  node.disconnect();

  sink.write_wav(&config.out, config.sample_rate)?;
  info!(
    "wrote {} ({} channels, {} Hz, {:.2}s)",
    config.out.display(),
    sink.channels().len(),
    config.sample_rate,
    config.seconds
  );
  Ok(config.out.clone())
}
