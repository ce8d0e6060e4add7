//! Selectable models read from a LiteLLM proxy config file.

mod entry;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub use entry::{context_label, per_million, ModelEntry};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProxyConfig {
    model_list: Vec<ModelListItem>,
    model_info: HashMap<String, DisplayInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelListItem {
    model_name: Option<String>,
    model_info: Option<ProviderInfo>,
}

/// Pricing as LiteLLM reports it, per token.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderInfo {
    max_input_tokens: Option<u64>,
    input_cost_per_token: Option<f64>,
    output_cost_per_token: Option<f64>,
}

/// Display overrides from the top-level `model_info` block, per million tokens.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DisplayInfo {
    context: Option<serde_yaml::Value>,
    input_cost: Option<f64>,
    output_cost: Option<f64>,
    speed: Option<f64>,
    latency: Option<f64>,
}

/// Models available for benchmarking, in config order.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<ModelEntry>,
}

impl ModelCatalog {
    /// Reads the catalog from a LiteLLM config file.
    ///
    /// A missing or malformed file yields an empty catalog.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("model catalog {} unavailable: {err}", path.display());
                return Self::default();
            }
        };
        Self::from_yaml_str(&text).unwrap_or_else(|err| {
            log::warn!("model catalog {} is not valid YAML: {err}", path.display());
            Self::default()
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ProxyConfig = serde_yaml::from_str(text)?;
        Ok(Self::from_proxy_config(config))
    }

    fn from_proxy_config(config: ProxyConfig) -> Self {
        let mut seen = HashSet::new();
        let models = config
            .model_list
            .into_iter()
            .filter_map(|item| {
                let id = item.model_name?.trim().to_string();
                if id.is_empty() || !seen.insert(id.clone()) {
                    return None;
                }
                let mut entry = ModelEntry::new(id);
                if let Some(info) = item.model_info {
                    apply_provider_info(&mut entry, &info);
                }
                if let Some(display) = config.model_info.get(&entry.id) {
                    apply_display_info(&mut entry, display);
                }
                Some(entry)
            })
            .collect();
        Self { models }
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn list(&self) -> &[ModelEntry] {
        &self.models
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.id == id)
    }
}

fn apply_provider_info(entry: &mut ModelEntry, info: &ProviderInfo) {
    if let Some(tokens) = info.max_input_tokens.filter(|t| *t > 0) {
        entry.context_tokens = Some(tokens);
        entry.context = Some(context_label(tokens));
    }
    entry.input_cost_per_1m = info.input_cost_per_token.map(per_million);
    entry.output_cost_per_1m = info.output_cost_per_token.map(per_million);
}

fn apply_display_info(entry: &mut ModelEntry, display: &DisplayInfo) {
    if let Some(context) = display.context.as_ref().and_then(yaml_label) {
        entry.context = Some(context);
    }
    entry.input_cost_per_1m = display.input_cost.or(entry.input_cost_per_1m);
    entry.output_cost_per_1m = display.output_cost.or(entry.output_cost_per_1m);
    entry.speed = display.speed.or(entry.speed);
    entry.latency = display.latency.or(entry.latency);
}

fn yaml_label(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_yaml::Value::Number(n) => n.as_u64().map(context_label).or_else(|| Some(n.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CONFIG: &str = r#"
model_list:
  - model_name: openai/gpt-4o-mini
    litellm_params:
      model: openai/gpt-4o-mini
      api_key: os.environ/OPENAI_API_KEY
    model_info:
      max_input_tokens: 128000
      input_cost_per_token: 0.00000015
      output_cost_per_token: 0.0000006
  - model_name: anthropic/claude-3.5-sonnet
    litellm_params:
      model: anthropic/claude-3-5-sonnet-20240620
  - model_name: openai/gpt-4o-mini
  - litellm_params:
      model: orphan

model_info:
  anthropic/claude-3.5-sonnet:
    context: 200k
    input_cost: 3.0
    output_cost: 15.0
    speed: 80
    latency: 1.4

general_settings:
  master_key: sk-1234
"#;

    #[test]
    fn reads_models_in_order_without_duplicates() {
        let catalog = ModelCatalog::from_yaml_str(CONFIG).unwrap();
        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, ["openai/gpt-4o-mini", "anthropic/claude-3.5-sonnet"]);
    }

    #[test]
    fn derives_metadata_from_provider_info() {
        let catalog = ModelCatalog::from_yaml_str(CONFIG).unwrap();
        let mini = catalog.get("openai/gpt-4o-mini").unwrap();
        assert_eq!(mini.context.as_deref(), Some("128k"));
        assert_eq!(mini.context_tokens, Some(128_000));
        assert_eq!(mini.input_cost_per_1m, Some(0.15));
        assert_eq!(mini.output_cost_per_1m, Some(0.6));
        assert_eq!(mini.speed, None);
    }

    #[test]
    fn top_level_model_info_supplies_display_fields() {
        let catalog = ModelCatalog::from_yaml_str(CONFIG).unwrap();
        let sonnet = catalog.get("anthropic/claude-3.5-sonnet").unwrap();
        assert_eq!(sonnet.context.as_deref(), Some("200k"));
        assert_eq!(sonnet.input_cost_per_1m, Some(3.0));
        assert_eq!(sonnet.output_cost_per_1m, Some(15.0));
        assert_eq!(sonnet.speed, Some(80.0));
        assert_eq!(sonnet.latency, Some(1.4));
    }

    #[test]
    fn missing_file_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ModelCatalog::load(dir.path().join("litellm-config.yaml"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_file_is_an_empty_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model_list: [unterminated").unwrap();
        assert!(ModelCatalog::load(file.path()).is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        assert_eq!(ModelCatalog::load(file.path()).list().len(), 2);
    }
}
