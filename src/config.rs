// Config is the one place runtime settings come from.
// Values are read from the environment (and a local .env file, if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub pretty: bool,
    pub log_filter: String,
    pub max_input_bytes: u64,
}

const DEFAULT_MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let pretty = var_or_fallback(&lookup, "DIGEST_PRETTY", "PRETTY")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        let log_filter = var_or_fallback(&lookup, "DIGEST_LOG", "LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string());

        let max_input_bytes =
            match var_or_fallback(&lookup, "DIGEST_MAX_INPUT_BYTES", "MAX_INPUT_BYTES") {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "DIGEST_MAX_INPUT_BYTES must be a positive integer, got {raw:?}"
                        )
                    })?,
                None => DEFAULT_MAX_INPUT_BYTES,
            };

        Ok(Self {
            pretty,
            log_filter,
            max_input_bytes,
        })
    }
}

fn var_or_fallback(
    lookup: &impl Fn(&str) -> Option<String>,
    primary: &str,
    fallback: &str,
) -> Option<String> {
    lookup(primary)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| lookup(fallback).filter(|s| !s.trim().is_empty()))
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
