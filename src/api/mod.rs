//! Translation providers

pub mod gemini;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::TranslationError;
use crate::models::TranslationPayload;

/// Something that can translate verse source text
#[allow(async_fn_in_trait)]
pub trait TranslationProvider {
    /// Translate source text into the target language
    async fn translate(
        &self,
        source_text: &str,
        language_code: &str,
        language_name: &str,
    ) -> Result<TranslationPayload, TranslationError>;
}

/// Unified provider that wraps the concrete implementations
#[derive(Debug, Clone)]
pub enum Provider {
    /// Google Gemini
    Gemini(gemini::GeminiClient),
    /// No provider; every request fails with the stored reason
    Disabled(String),
}

impl Provider {
    /// Build the provider described by the configuration
    ///
    /// Never fails: a missing key or client error yields `Disabled`.
    pub fn from_config(config: &ProviderConfig) -> Self {
        match config.kind {
            ProviderKind::Disabled => Self::Disabled("translation provider disabled".to_string()),
            ProviderKind::Gemini => {
                let api_key = match std::env::var(&config.api_key_env) {
                    Ok(key) if !key.trim().is_empty() => key,
                    _ => {
                        tracing::warn!("{} is not set; AI translation disabled", config.api_key_env);
                        return Self::Disabled(format!("set {} to enable AI translation", config.api_key_env));
                    }
                };
                match gemini::GeminiClient::new(&api_key, config) {
                    Ok(client) => Self::Gemini(client),
                    Err(e) => {
                        tracing::warn!("Failed to build Gemini client: {e:#}");
                        Self::Disabled(e.to_string())
                    }
                }
            }
        }
    }

    /// Whether requests can succeed at all
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Gemini(_))
    }

    /// Short name for the status bar
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gemini(_) => "Gemini",
            Self::Disabled(_) => "none",
        }
    }
}

impl TranslationProvider for Provider {
    async fn translate(
        &self,
        source_text: &str,
        language_code: &str,
        language_name: &str,
    ) -> Result<TranslationPayload, TranslationError> {
        match self {
            Self::Gemini(c) => c.translate(source_text, language_code, language_name).await,
            Self::Disabled(reason) => Err(TranslationError::Unavailable(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_provider_fails_every_request() {
        let config = ProviderConfig {
            kind: ProviderKind::Disabled,
            ..ProviderConfig::default()
        };
        let provider = Provider::from_config(&config);
        assert!(!provider.is_enabled());

        let result = tokio_test::block_on(provider.translate("ekam sat", "fr", "French"));
        assert!(matches!(result, Err(TranslationError::Unavailable(_))));
    }

    #[test]
    fn test_missing_api_key_disables_gemini() {
        let config = ProviderConfig {
            kind: ProviderKind::Gemini,
            api_key_env: "SHLOKA_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..ProviderConfig::default()
        };
        let provider = Provider::from_config(&config);
        assert!(matches!(provider, Provider::Disabled(reason) if reason.contains("SHLOKA_TEST_KEY")));
    }
}
