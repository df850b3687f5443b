//! Minimal host audio graph surface: something that plays a buffer and
//! something that receives it.

use log::debug;

use crate::types::{Channels, NodeId, SampleBuffer};

/// A node that can be connected to.
pub trait Destination {
  fn id(&self) -> NodeId;

  /// Dedicated input node, when the destination routes through one.
  fn input(&self) -> Option<NodeId> {
    None
  }

  /// Where connections should actually land.
  fn endpoint(&self) -> NodeId {
    self.input().unwrap_or_else(|| self.id())
  }
}

/// A playable handle around a multi-channel buffer.
pub trait AudioSource {
  fn buffer(&self) -> &[SampleBuffer];
  fn buffer_mut(&mut self) -> &mut Channels;
  fn set_buffer(&mut self, buffer: Channels);

  fn start(&mut self, when: f64);
  fn stop(&mut self, when: f64);
  fn is_playing(&self) -> bool;

  fn connect(&mut self, destination: NodeId);
  fn disconnect(&mut self);
  fn connections(&self) -> &[NodeId];
}

/// In-memory looping buffer source.
#[derive(Debug, Clone, Default)]
pub struct BufferSource {
  buffer: Channels,
  playing: bool,
  position: usize,
  started_at: Option<f64>,
  stopped_at: Option<f64>,
  connections: Vec<NodeId>,
}

impl BufferSource {
  pub fn new(buffer: Channels) -> Self {
    BufferSource { buffer, ..Default::default() }
  }

  pub fn channels(&self) -> usize {
    self.buffer.len()
  }

  pub fn len(&self) -> usize {
    self.buffer.first().map_or(0, |c| c.len())
  }

  pub fn started_at(&self) -> Option<f64> {
    self.started_at
  }

  pub fn stopped_at(&self) -> Option<f64> {
    self.stopped_at
  }

  /// Pulls `frames` frames, looping the buffer. Silence while stopped.
  pub fn read_frames(&mut self, frames: usize) -> Channels {
    let len = self.len();
    if !self.playing || len == 0 {
      return vec![vec![0.0; frames]; self.channels()];
    }

    let start = self.position;
    let out = self
      .buffer
      .iter()
      .map(|channel| (0..frames).map(|i| channel[(start + i) % len]).collect())
      .collect();
    self.position = (start + frames) % len;
    out
  }
}

impl AudioSource for BufferSource {
  fn buffer(&self) -> &[SampleBuffer] {
    &self.buffer
  }

  fn buffer_mut(&mut self) -> &mut Channels {
    &mut self.buffer
  }

  fn set_buffer(&mut self, buffer: Channels) {
    self.buffer = buffer;
    self.position = 0;
  }

  fn start(&mut self, when: f64) {
    self.playing = true;
    self.started_at = Some(when);
    self.stopped_at = None;
  }

  fn stop(&mut self, when: f64) {
    self.playing = false;
    self.position = 0;
    self.stopped_at = Some(when);
  }

  fn is_playing(&self) -> bool {
    self.playing
  }

  fn connect(&mut self, destination: NodeId) {
    if !self.connections.contains(&destination) {
      debug!("buffer source connected to node {}", destination);
      self.connections.push(destination);
    }
  }

  fn disconnect(&mut self) {
    self.connections.clear();
  }

  fn connections(&self) -> &[NodeId] {
    &self.connections
  }
}

#[cfg(test)]
mod test {
  use super::*;

  struct Plain(NodeId);
  impl Destination for Plain {
    fn id(&self) -> NodeId {
      self.0
    }
  }

  struct Routed(NodeId, NodeId);
  impl Destination for Routed {
    fn id(&self) -> NodeId {
      self.0
    }
    fn input(&self) -> Option<NodeId> {
      Some(self.1)
    }
  }

  #[test]
  fn test_endpoint_prefers_input() {
    assert_eq!(Plain(3).endpoint(), 3);
    assert_eq!(Routed(3, 9).endpoint(), 9);
  }

  #[test]
  fn test_loops_while_playing() {
    let mut source = BufferSource::new(vec![vec![1.0, 2.0, 3.0], vec![-1.0, -2.0, -3.0]]);
    assert_eq!(source.read_frames(2), vec![vec![0.0, 0.0], vec![0.0, 0.0]]);

    source.start(0.0);
    assert_eq!(source.read_frames(2), vec![vec![1.0, 2.0], vec![-1.0, -2.0]]);
    assert_eq!(source.read_frames(4), vec![vec![3.0, 1.0, 2.0, 3.0], vec![-3.0, -1.0, -2.0, -3.0]]);

    source.stop(1.5);
    assert!(!source.is_playing());
    assert_eq!(source.stopped_at(), Some(1.5));
    source.start(2.0);
    assert_eq!(source.read_frames(1), vec![vec![1.0], vec![-1.0]]);
  }

  #[test]
  fn test_connections() {
    let mut source = BufferSource::default();
    source.connect(1);
    source.connect(1);
    source.connect(4);
    assert_eq!(source.connections(), &[1, 4]);
    source.disconnect();
    assert!(source.connections().is_empty());
  }

  #[test]
  fn test_empty_source_reads_nothing() {
    let mut source = BufferSource::default();
    source.start(0.0);
    assert!(source.read_frames(8).is_empty());
  }
}
