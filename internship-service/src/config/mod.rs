use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Model used for both the simulated client and the reviewer.
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on a single model call, in seconds.
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;

/// Process configuration, read once at startup and never mutated afterwards.
///
/// Every external credential is optional: a missing one degrades the
/// endpoints that need it instead of aborting startup.
#[derive(Debug, Clone)]
pub struct InternshipConfig {
    pub common: core_config::Config,
    pub supabase: SupabaseConfig,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub service_role_key: Option<Secret<String>>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }
}

impl InternshipConfig {
    pub fn load() -> Result<Self, AppError> {
        // Also loads .env
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let defaults = GeminiSettings::default();
        let timeout_secs = parse_setting(
            "GEMINI_TIMEOUT_SECS",
            optional_env("GEMINI_TIMEOUT_SECS"),
            defaults.timeout.as_secs(),
            is_prod,
        )?;

        Ok(InternshipConfig {
            common: common_config,
            supabase: SupabaseConfig {
                url: optional_env("SUPABASE_URL"),
                service_role_key: optional_env("SUPABASE_SERVICE_ROLE_KEY").map(Secret::new),
            },
            gemini: GeminiSettings {
                api_key: optional_env("GEMINI_API_KEY").map(Secret::new),
                model: optional_env("GEMINI_MODEL").unwrap_or(defaults.model),
                api_base: optional_env("GEMINI_API_BASE").unwrap_or(defaults.api_base),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional numeric setting. A malformed value is fatal in
/// production and falls back to the default elsewhere.
fn parse_setting<T>(
    key: &str,
    raw: Option<String>,
    default: T,
    is_prod: bool,
) -> Result<T, AppError>
where
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.parse() {
        Ok(value) => Ok(value),
        Err(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a number, got '{}'",
            key,
            raw
        ))),
        Err(_) => {
            tracing::warn!(key, value = %raw, default = %default, "Ignoring malformed setting");
            Ok(default)
        }
    }
}
