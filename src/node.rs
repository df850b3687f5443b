//! The pink noise generator node: white noise source, Kellet filter and
//! normalizer wired behind the host lifecycle calls.

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::error::{Error, Result};
use crate::host::{AudioSource, BufferSource, Destination};
use crate::meta::{ModuleMeta, META};
use crate::noise::WhiteNoise;
use crate::noise_config::NoiseConfig;
use crate::render::normalize::Gain;
use crate::types::{BufferSize, SampleBuffer};

pub struct PinkNoise<S: AudioSource = BufferSource> {
  noise: WhiteNoise<S>,
}

impl PinkNoise<BufferSource> {
  pub fn new(config: NoiseConfig) -> Self {
    PinkNoise::from_white(WhiteNoise::new(config))
  }

  pub fn meta() -> &'static ModuleMeta {
    &META
  }
}

impl Default for PinkNoise<BufferSource> {
  fn default() -> Self {
    PinkNoise::new(NoiseConfig::default())
  }
}

impl<S: AudioSource> PinkNoise<S> {
  /// Takes over a white noise source and pinkifies its current buffer.
  pub fn from_white(noise: WhiteNoise<S>) -> Self {
    let mut node = PinkNoise { noise };
    node.pinkify();
    node
  }

  pub fn config(&self) -> &NoiseConfig {
    self.noise.config()
  }

  pub fn stereo(&self) -> bool {
    self.noise.stereo()
  }

  pub fn channels(&self) -> usize {
    self.noise.channels()
  }

  pub fn buffer_size(&self) -> BufferSize {
    self.noise.buffer_size()
  }

  pub fn buffer(&self) -> &[SampleBuffer] {
    self.noise.source().buffer()
  }

  pub fn source(&self) -> &S {
    self.noise.source()
  }

  pub fn source_mut(&mut self) -> &mut S {
    self.noise.source_mut()
  }

  pub fn set_stereo(&mut self, stereo: bool) -> bool {
    let stereo = self.noise.set_stereo(stereo);
    self.pinkify();
    stereo
  }

  /// Out of range counts fall back to the default of 2.
  pub fn set_channels(&mut self, channels: usize) -> usize {
    let channels = self.noise.set_channels(channels);
    self.pinkify();
    channels
  }

  /// Unsupported sizes fall back to the default of 4096.
  pub fn set_buffer_size(&mut self, len: usize) -> BufferSize {
    let size = self.noise.set_buffer_size(len);
    self.pinkify();
    size
  }

  pub fn configure(&mut self, config: NoiseConfig) -> Gain {
    self.noise.configure(config);
    self.pinkify()
  }

  /// Draws fresh white noise and pinkifies it.
  pub fn recompute(&mut self) -> Gain {
    self.noise.generate();
    self.pinkify()
  }

  /// Filters the source buffer in place and normalizes it.
  fn pinkify(&mut self) -> Gain {
    let buffer = self.noise.source_mut().buffer_mut();
    let gain = crate::pinkify(buffer);
    debug!(
      "pinkified {} channels x {} samples, gain {:?}",
      buffer.len(),
      buffer.first().map_or(0, |c| c.len()),
      gain
    );
    gain
  }

  pub fn connect<D: Destination + ?Sized>(&mut self, destination: &D) {
    self.noise.source_mut().connect(destination.endpoint());
  }

  pub fn disconnect(&mut self) {
    self.noise.source_mut().disconnect();
  }

  /// Rebuilds the buffer, then starts playback at `when`.
  pub fn start(&mut self, when: f64) -> Gain {
    let gain = self.recompute();
    self.noise.source_mut().start(when);
    gain
  }

  pub fn stop(&mut self, when: f64) {
    self.noise.source_mut().stop(when);
  }

  pub fn is_playing(&self) -> bool {
    self.noise.source().is_playing()
  }
}

/// A node shared between threads. Every call holds the lock for the whole
/// recompute, so parameter changes never interleave.
pub struct SharedPinkNoise<S: AudioSource = BufferSource> {
  inner: Arc<Mutex<PinkNoise<S>>>,
}

impl<S: AudioSource> Clone for SharedPinkNoise<S> {
  fn clone(&self) -> Self {
    SharedPinkNoise { inner: Arc::clone(&self.inner) }
  }
}

impl<S: AudioSource> SharedPinkNoise<S> {
  pub fn new(node: PinkNoise<S>) -> Self {
    SharedPinkNoise { inner: Arc::new(Mutex::new(node)) }
  }

  pub fn lock(&self) -> Result<MutexGuard<'_, PinkNoise<S>>> {
    self.inner.lock().map_err(|_| Error::Poisoned)
  }

  pub fn with<R>(&self, f: impl FnOnce(&mut PinkNoise<S>) -> R) -> Result<R> {
    let mut node = self.lock()?;
    Ok(f(&mut node))
  }

  pub fn set_stereo(&self, stereo: bool) -> Result<bool> {
    self.with(|node| node.set_stereo(stereo))
  }

  pub fn set_channels(&self, channels: usize) -> Result<usize> {
    self.with(|node| node.set_channels(channels))
  }

  pub fn set_buffer_size(&self, len: usize) -> Result<BufferSize> {
    self.with(|node| node.set_buffer_size(len))
  }

  pub fn start(&self, when: f64) -> Result<Gain> {
    self.with(|node| node.start(when))
  }

  pub fn stop(&self, when: f64) -> Result<()> {
    self.with(|node| node.stop(when))
  }
}
