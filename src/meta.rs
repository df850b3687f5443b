//! Static description of the module and its parameters, for hosts that
//! build their own controls.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::types::{BufferSize, DEFAULT_CHANNELS, DEFAULT_STEREO, MAX_CHANNELS, MIN_CHANNELS};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamMeta {
  Bool {
    #[serde(rename = "defaultValue")]
    default_value: bool,
  },
  Enum {
    values: Vec<usize>,
    #[serde(rename = "defaultValue")]
    default_value: usize,
  },
  Int {
    min: usize,
    max: usize,
    #[serde(rename = "defaultValue")]
    default_value: usize,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleMeta {
  pub name: &'static str,
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub params: Vec<(&'static str, ParamMeta)>,
}

impl ModuleMeta {
  pub fn param(&self, name: &str) -> Option<&ParamMeta> {
    self.params.iter().find(|(n, _)| *n == name).map(|(_, p)| p)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    let params: serde_json::Map<String, serde_json::Value> = self
      .params
      .iter()
      .map(|(name, param)| serde_json::to_value(param).map(|v| (name.to_string(), v)))
      .collect::<serde_json::Result<_>>()?;

    serde_json::to_string_pretty(&serde_json::json!({
      "name": self.name,
      "type": self.kind,
      "params": params,
    }))
  }
}

pub static META: Lazy<ModuleMeta> = Lazy::new(|| ModuleMeta {
  name: "pink-noise",
  kind: "generator",
  params: vec![
    ("stereo", ParamMeta::Bool { default_value: DEFAULT_STEREO }),
    (
      "bufferSize",
      ParamMeta::Enum {
        values: BufferSize::ALL.iter().map(|s| s.len()).collect(),
        default_value: BufferSize::default().len(),
      },
    ),
    (
      "channels",
      ParamMeta::Int {
        min: MIN_CHANNELS,
        max: MAX_CHANNELS,
        default_value: DEFAULT_CHANNELS,
      },
    ),
  ],
});
