//! Runtime configuration from environment variables.
//!
//! Every setting has a default, so a bare `Riskdesk` launch in a directory
//! containing `Models/` just works.

use std::path::PathBuf;

use base64::Engine;
use ed25519_dalek::VerifyingKey;

use crate::adapters::artifacts::IntegrityPolicy;
use crate::RiskdeskError;

pub const MODEL_DIR_ENV: &str = "RISKDESK_MODEL_DIR";
pub const REQUIRE_SIGNED_ENV: &str = "RISKDESK_REQUIRE_SIGNED_MODELS";
pub const PUBKEY_B64_ENV: &str = "RISKDESK_MODEL_PUBKEY_B64";
pub const PUBKEY_B64_FILE_ENV: &str = "RISKDESK_MODEL_PUBKEY_B64_FILE";
pub const LOG_MODE_ENV: &str = "RISKDESK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "RISKDESK_LOG_FILE";

const DEFAULT_MODEL_DIR: &str = "Models";
const DEFAULT_LOG_FILE: &str = "riskdesk.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise.
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub mode: LogMode,
    pub file: PathBuf,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_dir: PathBuf,
    pub integrity: IntegrityPolicy,
    pub log: LogConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `RiskdeskError::Config` if the verifying key is malformed or unreadable.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `RiskdeskError::Config` if the verifying key is malformed or unreadable.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_dir = lookup(MODEL_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));

        let require_signed = lookup(REQUIRE_SIGNED_ENV)
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        let key_b64 = match (lookup(PUBKEY_B64_ENV), lookup(PUBKEY_B64_FILE_ENV)) {
            (Some(inline), _) => Some(inline),
            (None, Some(path)) => Some(std::fs::read_to_string(path.trim()).map_err(|e| {
                RiskdeskError::Config(format!("Failed to read {PUBKEY_B64_FILE_ENV}: {e}"))
            })?),
            (None, None) => None,
        };
        let verifying_key = key_b64.as_deref().map(verifying_key_from_b64).transpose()?;

        if require_signed && verifying_key.is_none() {
            return Err(RiskdeskError::Config(format!(
                "{REQUIRE_SIGNED_ENV} is set but neither {PUBKEY_B64_ENV} nor {PUBKEY_B64_FILE_ENV} is provided"
            )));
        }

        let log = LogConfig {
            mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(LogMode::Auto),
            file: lookup(LOG_FILE_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        };

        Ok(Self {
            model_dir,
            integrity: IntegrityPolicy {
                require_signed,
                verifying_key,
            },
            log,
        })
    }
}

/// Accepts `1`, `true`, `TRUE`, `yes`, `YES`.
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}

/// Decode a base64 Ed25519 verifying key.
///
/// # Errors
/// Returns `RiskdeskError::Config` on bad base64, wrong length, or an invalid point.
pub fn verifying_key_from_b64(b64: &str) -> crate::Result<VerifyingKey> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|_| RiskdeskError::Config("Invalid public key base64".into()))?;
    let raw: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        RiskdeskError::Config("Invalid public key length (expected 32 bytes)".into())
    })?;
    VerifyingKey::from_bytes(&raw)
        .map_err(|_| RiskdeskError::Config("Invalid verifying key".into()))
}
