use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("wav error: {0}")]
  Wav(#[from] hound::Error),

  #[error("invalid config: {0}")]
  Config(#[from] serde_json::Error),

  #[error("unsupported buffer size {0}, expected one of 128, 256, 512, 1024, 2048, 4096, 8192, 16384")]
  UnsupportedBufferSize(usize),

  #[error("bad argument: {0}")]
  Argument(String),

  #[error("pink noise node lock was poisoned")]
  Poisoned,
}

pub type Result<T> = std::result::Result<T, Error>;
