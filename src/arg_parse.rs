use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::noise_config::{buffer_size_or_default, channels_or_default};
use crate::render::RenderConfig;

pub const USAGE: &str = r#"Usage: pink-noise [config.json] [--out PATH] [--seconds N] [--sample-rate N]
                  [--seed N] [--channels N] [--buffer-size N] [--mono] [--meta] [--analyze]"#;

/// Environment variables read after `.env` is loaded.
pub const ENV_OUT: &str = "PINK_NOISE_OUT";
pub const ENV_SECONDS: &str = "PINK_NOISE_SECONDS";
pub const ENV_SAMPLE_RATE: &str = "PINK_NOISE_SAMPLE_RATE";
pub const ENV_SEED: &str = "PINK_NOISE_SEED";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
  pub config_path: Option<PathBuf>,
  pub out: Option<PathBuf>,
  pub seconds: Option<f64>,
  pub sample_rate: Option<u32>,
  pub seed: Option<u64>,
  pub channels: Option<usize>,
  pub buffer_size: Option<usize>,
  pub mono: bool,
  pub meta: bool,
  pub analyze: bool,
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T> {
  let value = value.ok_or_else(|| Error::Argument(format!("{} expects a value", flag)))?;
  value
    .parse::<T>()
    .map_err(|_| Error::Argument(format!("{} got unparseable value '{}'", flag, value)))
}

/// Parses command line arguments, excluding the program name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
  let mut parsed = Args::default();
  let mut args = args.into_iter();

  while let Some(arg) = args.next() {
    match arg.as_str() {
      "--out" => parsed.out = Some(parse_value(&arg, args.next())?),
      "--seconds" => parsed.seconds = Some(parse_value(&arg, args.next())?),
      "--sample-rate" => parsed.sample_rate = Some(parse_value(&arg, args.next())?),
      "--seed" => parsed.seed = Some(parse_value(&arg, args.next())?),
      "--channels" => parsed.channels = Some(parse_value(&arg, args.next())?),
      "--buffer-size" => parsed.buffer_size = Some(parse_value(&arg, args.next())?),
      "--mono" => parsed.mono = true,
      "--meta" => parsed.meta = true,
      "--analyze" => parsed.analyze = true,
      flag if flag.starts_with("--") => return Err(Error::Argument(format!("unknown flag {}", flag))),
      path if parsed.config_path.is_none() => parsed.config_path = Some(PathBuf::from(path)),
      extra => return Err(Error::Argument(format!("unexpected argument {}", extra))),
    }
  }

  Ok(parsed)
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<RenderConfig> {
  let contents = fs::read_to_string(path)?;
  let config: RenderConfig = serde_json::from_str(&contents)?;
  Ok(config)
}

/// Applies environment overrides. `lookup` is `std::env::var` in the binary.
pub fn apply_env<F>(config: &mut RenderConfig, lookup: F) -> Result<()>
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(out) = lookup(ENV_OUT) {
    config.out = PathBuf::from(out);
  }
  if let Some(seconds) = lookup(ENV_SECONDS) {
    config.seconds = parse_value(ENV_SECONDS, Some(seconds))?;
  }
  if let Some(rate) = lookup(ENV_SAMPLE_RATE) {
    config.sample_rate = parse_value(ENV_SAMPLE_RATE, Some(rate))?;
  }
  if let Some(seed) = lookup(ENV_SEED) {
    config.noise.seed = Some(parse_value(ENV_SEED, Some(seed))?);
  }
  Ok(())
}

pub fn apply_args(config: &mut RenderConfig, args: &Args) {
  if let Some(out) = &args.out {
    config.out = out.clone();
  }
  if let Some(seconds) = args.seconds {
    config.seconds = seconds;
  }
  if let Some(rate) = args.sample_rate {
    config.sample_rate = rate;
  }
  if let Some(seed) = args.seed {
    config.noise.seed = Some(seed);
  }
  if let Some(channels) = args.channels {
    config.noise.channels = channels_or_default(channels);
  }
  if let Some(len) = args.buffer_size {
    config.noise.buffer_size = buffer_size_or_default(len);
  }
  if args.mono {
    config.noise.stereo = false;
  }
}

/// File, then environment, then flags.
pub fn resolve_config<F>(args: &Args, lookup: F) -> Result<RenderConfig>
where
  F: Fn(&str) -> Option<String>,
{
  let mut config = match &args.config_path {
    Some(path) => load_config_from_file(path)?,
    None => RenderConfig::default(),
  };
  apply_env(&mut config, lookup)?;
  apply_args(&mut config, args);
  config.validate()?;
  Ok(config)
}
