use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use postbox_api::email::EmailPolicy;

use crate::StaticDirs;

/// Process configuration, read from the environment (and `.env`, if the
/// binary loaded one first).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub static_dirs: StaticDirs,
    /// Apply provider aliasing rules when canonicalizing emails.
    pub email_provider_rules: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "3000")
            .parse::<u16>()
            .context("PORT must be a port number")?;
        let email_provider_rules = parse_bool("POSTBOX_EMAIL_PROVIDER_RULES", &var("POSTBOX_EMAIL_PROVIDER_RULES", "true"))?;

        Ok(Self {
            host: var("POSTBOX_HOST", "0.0.0.0"),
            port,
            db_path: var("POSTBOX_DB_PATH", "postbox.db").into(),
            static_dirs: StaticDirs {
                public: var("POSTBOX_PUBLIC_DIR", "public").into(),
                scripts: var("POSTBOX_SCRIPTS_DIR", "scripts").into(),
            },
            email_provider_rules,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn email_policy(&self) -> EmailPolicy {
        if self.email_provider_rules {
            EmailPolicy::default()
        } else {
            EmailPolicy::domain_only()
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be true or false, got {:?}", key, other),
    }
}
