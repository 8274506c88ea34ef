//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;

use super::types::Res;

/// Default SendGrid API base URL.
fn default_sendgrid_api_url() -> String {
    "https://api.sendgrid.com".to_string()
}

/// Default sender of support notification emails.
fn default_support_from_email() -> String {
    "no-reply@superiorllc.org".to_string()
}

/// Default recipient of support notification emails.
fn default_support_to_email() -> String {
    "info@superiorllc.org".to_string()
}

/// Default comma-separated CORS origin allow-list.
fn default_cors_allowed_origins() -> String {
    "https://app.superiorllc.org,https://superiorllc.org".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

/// Default timeout, in seconds, applied to every outbound HTTP call.
fn default_outbound_timeout_secs() -> u64 {
    10
}

/// Configuration for the support-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// SendGrid API key (`SENDGRID_API_KEY`).
    pub sendgrid_api_key: String,
    /// SendGrid API base URL (`SENDGRID_API_URL`).
    #[serde(default = "default_sendgrid_api_url")]
    pub sendgrid_api_url: String,
    /// Sender of support notification emails (`SUPPORT_FROM_EMAIL`).
    #[serde(default = "default_support_from_email")]
    pub support_from_email: String,
    /// Recipient of support notification emails (`SUPPORT_TO_EMAIL`).
    #[serde(default = "default_support_to_email")]
    pub support_to_email: String,
    /// Supabase project URL (`SUPABASE_URL`).
    pub supabase_url: String,
    /// Supabase service-role key (`SUPABASE_SERVICE_ROLE_KEY`).
    pub supabase_service_role_key: String,
    /// Comma-separated origins allowed by CORS (`CORS_ALLOWED_ORIGINS`).
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
    /// Address the HTTP server binds to (`SERVER_HOST`).
    #[serde(default = "default_server_host")]
    pub server_host: String,
    /// Port the HTTP server binds to (`SERVER_PORT`).
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    /// Timeout for outbound HTTP calls, in seconds (`OUTBOUND_TIMEOUT_SECS`).
    #[serde(default = "default_outbound_timeout_secs")]
    pub outbound_timeout_secs: u64,
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        Self::load_from(config::Environment::default(), explicit_path)
    }

    /// Load from the given environment source, layered with the config file (if any).
    pub fn load_from(environment: config::Environment, explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(environment);

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks the values that cannot be expressed through deserialization alone.
    pub fn validate(&self) -> Res<()> {
        if self.sendgrid_api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("SENDGRID_API_KEY not set."));
        }

        if self.supabase_url.trim().is_empty() || self.supabase_service_role_key.trim().is_empty() {
            return Err(anyhow::anyhow!("SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY not set."));
        }

        if self.outbound_timeout_secs < 1 {
            return Err(anyhow::anyhow!("Outbound timeout must be at least 1 second."));
        }

        let origins = self.allowed_origins();

        if origins.is_empty() {
            return Err(anyhow::anyhow!("At least one CORS origin must be allowed."));
        }

        // Credentials are allowed, so origins must be listed explicitly.
        if origins.iter().any(|origin| origin == "*") {
            return Err(anyhow::anyhow!("CORS origins cannot contain `*` when credentials are allowed."));
        }

        Ok(())
    }

    /// Base URL of the Supabase REST API (`<supabase_url>/rest/v1`).
    pub fn supabase_rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url.trim_end_matches('/'))
    }

    /// The CORS allow-list, split and trimmed.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_secs(self.outbound_timeout_secs)
    }
}

// Tests.
