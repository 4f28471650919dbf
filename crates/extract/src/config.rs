use serde::{Deserialize, Serialize};

use crate::ExtractError;

/// Runtime configuration for the chat-completions extractor.
///
/// # Example
/// ```no_run
/// use extract::{ChatCompletionsExtractor, ExtractConfig};
///
/// let cfg = ExtractConfig {
///     api_key: Some("sk-xxx".into()),
///     ..Default::default()
/// };
/// let extractor = ChatCompletionsExtractor::new(cfg).expect("valid config");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    /// `"api"` calls the remote endpoint, `"stub"` answers from the local heuristic stub.
    pub mode: String,
    /// Full URL of an OpenAI-compatible `chat/completions` endpoint.
    pub api_url: String,
    /// Bearer token. Usually injected from the environment rather than the file.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    /// Ask the endpoint for a JSON object response (`response_format`).
    pub json_mode: bool,
    /// Connect timeout for the HTTP client. The overall call deadline is owned by the caller.
    pub connect_timeout_secs: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            mode: "api".into(),
            api_url: "https://api.openai.com/v1/chat/completions".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            temperature: 0.1,
            json_mode: true,
            connect_timeout_secs: 10,
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<(), ExtractError> {
        match self.mode.as_str() {
            "api" => {
                if self.api_url.trim().is_empty() {
                    return Err(ExtractError::InvalidConfig(
                        "api_url is required for api mode".into(),
                    ));
                }
                if self.model.trim().is_empty() {
                    return Err(ExtractError::InvalidConfig("model must not be empty".into()));
                }
            }
            "stub" => {}
            other => {
                return Err(ExtractError::InvalidConfig(format!(
                    "unknown mode `{other}` (expected api or stub)"
                )))
            }
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ExtractError::InvalidConfig(format!(
                "temperature {} outside 0.0..=2.0",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ExtractConfig::default();
        assert_eq!(cfg.mode, "api");
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert!(cfg.api_key.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_mode_and_bad_temperature() {
        let cfg = ExtractConfig {
            mode: "onnx".into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ExtractError::InvalidConfig(_))));

        let cfg = ExtractConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn api_key_is_never_serialized() {
        let cfg = ExtractConfig {
            api_key: Some("secret".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: ExtractConfig = serde_json::from_str(r#"{"model":"gpt-4.1-mini"}"#).unwrap();
        assert_eq!(cfg.model, "gpt-4.1-mini");
        assert_eq!(cfg.mode, "api");
        assert!(cfg.json_mode);
    }
}
