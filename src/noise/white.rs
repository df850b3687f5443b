use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::host::{AudioSource, BufferSource};
use crate::noise_config::{buffer_size_or_default, channels_or_default, NoiseConfig};
use crate::types::{BufferSize, Channels, SampleBuffer};

/// Uniform white noise in [-1, 1], held in a playable source.
pub struct WhiteNoise<S: AudioSource = BufferSource> {
  config: NoiseConfig,
  rng: StdRng,
  source: S,
}

impl WhiteNoise<BufferSource> {
  pub fn new(config: NoiseConfig) -> Self {
    WhiteNoise::with_source(config, BufferSource::default())
  }
}

impl<S: AudioSource> WhiteNoise<S> {
  pub fn with_source(config: NoiseConfig, source: S) -> Self {
    let config = config.sanitized();
    let rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    let mut noise = WhiteNoise { config, rng, source };
    noise.generate();
    noise
  }

  /// Refills the source buffer with fresh noise for the current config.
  pub fn generate(&mut self) {
    let buffer = render_white(&mut self.rng, &self.config);
    self.source.set_buffer(buffer);
  }

  pub fn config(&self) -> &NoiseConfig {
    &self.config
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  pub fn source_mut(&mut self) -> &mut S {
    &mut self.source
  }

  pub fn stereo(&self) -> bool {
    self.config.stereo
  }

  pub fn channels(&self) -> usize {
    self.config.channels
  }

  pub fn buffer_size(&self) -> BufferSize {
    self.config.buffer_size
  }

  pub fn set_stereo(&mut self, stereo: bool) -> bool {
    self.config.stereo = stereo;
    self.generate();
    stereo
  }

  pub fn set_channels(&mut self, channels: usize) -> usize {
    self.config.channels = channels_or_default(channels);
    self.generate();
    self.config.channels
  }

  pub fn set_buffer_size(&mut self, len: usize) -> BufferSize {
    self.config.buffer_size = buffer_size_or_default(len);
    self.generate();
    self.config.buffer_size
  }

  /// Replaces the whole config. A new seed reseeds the generator.
  pub fn configure(&mut self, config: NoiseConfig) {
    let config = config.sanitized();
    if let Some(seed) = config.seed.filter(|_| config.seed != self.config.seed) {
      self.rng = StdRng::seed_from_u64(seed);
    }
    self.config = config;
    self.generate();
  }
}

/// Draws one buffer of white noise. Mono mode copies channel 0 everywhere.
pub fn render_white<R: Rng>(rng: &mut R, config: &NoiseConfig) -> Channels {
  let len = config.len();
  let mut draw = || -> SampleBuffer { (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect() };

  if config.stereo {
    (0..config.channels).map(|_| draw()).collect()
  } else {
    vec![draw(); config.channels]
  }
}
