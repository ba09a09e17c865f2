use web_sys::window;

pub(crate) const DEFAULT_WORDS_URL: &str = "Borderline Poetry - Individual words.csv";

pub(crate) const FRIDGE_ID: &str = "refrigerator-area";
pub(crate) const POOL_BOTTOM_ID: &str = "word-pool-bottom";
pub(crate) const POOL_LEFT_ID: &str = "word-pool-left";
pub(crate) const POOL_RIGHT_ID: &str = "word-pool-right";
pub(crate) const REFRESH_BUTTON_ID: &str = "refresh-button";

pub(crate) const TILE_CLASS: &str = "word-tile";
pub(crate) const SELECTED_CLASS: &str = "selected";
pub(crate) const PROMPT_CLASS: &str = "poem-prompt";
pub(crate) const TILE_ID_ATTR: &str = "data-tile-id";

pub(crate) const LOAD_ERROR_TEXT: &str = "Error loading word list. Check console for details.";

/// Start-up options, read once from the location hash, e.g.
/// `#words=lists/short.csv;seed=0xBEEF;touch=1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AppConfig {
    pub(crate) words_url: String,
    pub(crate) seed: Option<u64>,
    pub(crate) force_touch: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            words_url: DEFAULT_WORDS_URL.to_string(),
            seed: None,
            force_touch: None,
        }
    }
}

impl AppConfig {
    pub(crate) fn from_location() -> Self {
        let hash = window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default();
        parse_hash_config(&hash)
    }
}

pub(crate) fn parse_hash_config(hash: &str) -> AppConfig {
    let mut config = AppConfig::default();
    let raw = hash.trim().trim_start_matches('#').trim();
    for chunk in raw.split(';') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let mut iter = chunk.splitn(2, '=');
        let key = iter.next().unwrap_or("").trim();
        let value = iter.next().unwrap_or("").trim();
        if key.eq_ignore_ascii_case("words") {
            let decoded = decode_hash_value(value);
            if !decoded.is_empty() {
                config.words_url = decoded;
            }
        } else if key.eq_ignore_ascii_case("seed") {
            config.seed = parse_seed_value(value);
        } else if key.eq_ignore_ascii_case("touch") {
            config.force_touch = parse_flag(value);
        }
    }
    config
}

fn decode_hash_value(value: &str) -> String {
    let raw = value.trim();
    if raw.is_empty() {
        return String::new();
    }
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::decode_uri_component(raw)
            .ok()
            .and_then(|decoded| decoded.as_string())
            .unwrap_or_else(|| raw.to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        raw.to_string()
    }
}

fn parse_seed_value(value: &str) -> Option<u64> {
    let normalized = value.trim().replace('_', "");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        trimmed.parse::<u64>().ok()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        assert_eq!(parse_hash_config(""), AppConfig::default());
        assert_eq!(parse_hash_config("#"), AppConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = parse_hash_config("#words=lists/short.csv; seed=0xBEEF ;touch=1");
        assert_eq!(config.words_url, "lists/short.csv");
        assert_eq!(config.seed, Some(0xBEEF));
        assert_eq!(config.force_touch, Some(true));
    }

    #[test]
    fn seeds_accept_decimal_and_underscores() {
        assert_eq!(parse_hash_config("seed=1_000").seed, Some(1000));
        assert_eq!(parse_hash_config("seed=nope").seed, None);
    }

    #[test]
    fn unknown_keys_and_bad_values_are_ignored() {
        let config = parse_hash_config("#theme=dark;touch=maybe;words=");
        assert_eq!(config, AppConfig::default());
    }
}
