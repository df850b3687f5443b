use std::env;
use std::process;

use log::warn;

use pink_noise::analysis;
use pink_noise::arg_parse::{self, Args, USAGE};
use pink_noise::error::Result;
use pink_noise::render::{self, WavSink};
use pink_noise::PinkNoise;

const SINK_ID: usize = 1;

fn main() {
  dotenv::dotenv().ok();
  env_logger::init();

  let args = match arg_parse::parse_args(env::args().skip(1)) {
    Ok(args) => args,
    Err(msg) => {
      eprintln!("{}\n{}", msg, USAGE);
      process::exit(2);
    }
  };

  if let Err(msg) = run(&args) {
    eprintln!("Problem while rendering: {}", msg);
    process::exit(1);
  }
}

fn run(args: &Args) -> Result<()> {
  if args.meta {
    println!("{}", PinkNoise::meta().to_json()?);
    return Ok(());
  }

  let config = arg_parse::resolve_config(args, |key| env::var(key).ok())?;
  let mut node = PinkNoise::new(config.noise);
  let mut sink = WavSink::new(SINK_ID);
  let out = render::render_to_wav(&mut node, &mut sink, &config)?;

  if args.analyze {
    for (i, channel) in node.buffer().iter().enumerate() {
      match analysis::spectral_slope(channel, config.sample_rate) {
        Some(slope) => println!("channel {}: {:.2} dB/octave", i, slope),
        None => warn!("channel {} too short or silent to analyze", i),
      }
    }
  }

  println!("{}", out.display());
  Ok(())
}
