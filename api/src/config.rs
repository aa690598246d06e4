//! Webhook endpoint configuration.

/// Environment variable holding the webhook URL.
pub const WEBHOOK_URL_ENV: &str = "SALESPULSE_WEBHOOK_URL";

/// Local-development default. Treated as "not configured".
pub const PLACEHOLDER_WEBHOOK_URL: &str = "http://localhost:5678/webhook/csv-upload";

/// How a CSV travels to the webhook. Exactly one strategy is active per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// `multipart/form-data` with `file`, `filename` and `timestamp` fields.
    Multipart,
    /// `application/json` with the CSV pre-split into headers and rows.
    JsonRows,
}

impl UploadMode {
    /// Strategy selected at build time through the `json-rows` feature.
    pub fn for_build() -> Self {
        if cfg!(feature = "json-rows") {
            Self::JsonRows
        } else {
            Self::Multipart
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMode::Multipart => "multipart",
            UploadMode::JsonRows => "json-rows",
        }
    }
}

impl Default for UploadMode {
    fn default() -> Self {
        Self::for_build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: String,
    pub mode: UploadMode,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>, mode: UploadMode) -> Self {
        Self {
            url: url.into().trim().to_string(),
            mode,
        }
    }

    /// Resolve the endpoint from the environment.
    ///
    /// Native builds read `SALESPULSE_WEBHOOK_URL` at runtime. WASM has no
    /// process environment, so the value captured at compile time is used
    /// instead. Missing values fall back to [`PLACEHOLDER_WEBHOOK_URL`].
    pub fn from_env() -> Self {
        let url = std::env::var(WEBHOOK_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| option_env!("SALESPULSE_WEBHOOK_URL").map(str::to_string))
            .unwrap_or_else(|| PLACEHOLDER_WEBHOOK_URL.to_string());

        let config = Self::new(url, UploadMode::for_build());
        tracing::debug!(
            mode = config.mode.as_str(),
            configured = config.is_configured(),
            "webhook configuration resolved"
        );
        config
    }

    /// `false` while the URL is blank or still the local-development default.
    pub fn is_configured(&self) -> bool {
        let url = self.url.trim();
        !url.is_empty() && url != PLACEHOLDER_WEBHOOK_URL
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self::new(PLACEHOLDER_WEBHOOK_URL, UploadMode::for_build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_and_blank_urls_are_unconfigured() {
        assert!(!WebhookConfig::default().is_configured());
        assert!(!WebhookConfig::new("   ", UploadMode::Multipart).is_configured());
        assert!(!WebhookConfig::new(
            format!(" {PLACEHOLDER_WEBHOOK_URL} "),
            UploadMode::Multipart
        )
        .is_configured());
    }

    #[test]
    fn real_url_is_configured_and_trimmed() {
        let config = WebhookConfig::new(
            " https://flows.example.com/webhook/weekly-sales ",
            UploadMode::JsonRows,
        );
        assert!(config.is_configured());
        assert_eq!(config.url, "https://flows.example.com/webhook/weekly-sales");
        assert_eq!(config.mode, UploadMode::JsonRows);
    }

    #[test]
    fn build_mode_follows_feature_flag() {
        let expected = if cfg!(feature = "json-rows") {
            UploadMode::JsonRows
        } else {
            UploadMode::Multipart
        };
        assert_eq!(UploadMode::default(), expected);
    }
}
