use popcorn_saga_core::{Character, SceneOptions};

pub(crate) const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub(crate) const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GeneratorConfig {
    pub(crate) api_key: Option<String>,
    pub(crate) model: String,
    pub(crate) api_base: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InitConfig {
    pub(crate) generator: GeneratorConfig,
    pub(crate) scene: SceneOptions,
    pub(crate) character: Character,
}

pub(crate) fn load_init_config() -> InitConfig {
    InitConfig {
        generator: load_generator_config(),
        scene: load_scene_options(),
        character: load_initial_character().unwrap_or_default(),
    }
}

pub(crate) fn load_generator_config() -> GeneratorConfig {
    let api_key = first_non_empty(&[
        option_env!("POPCORN_SAGA_API_KEY"),
        option_env!("TRUNK_PUBLIC_GEMINI_API_KEY"),
        option_env!("GEMINI_API_KEY"),
    ]);
    let model = first_non_empty(&[option_env!("POPCORN_SAGA_MODEL")])
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let api_base = first_non_empty(&[option_env!("POPCORN_SAGA_API_BASE")])
        .and_then(|raw| normalize_api_base(&raw))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    GeneratorConfig {
        api_key,
        model,
        api_base,
    }
}

pub(crate) fn load_scene_options() -> SceneOptions {
    SceneOptions {
        clear_image_on_start: option_env!("POPCORN_SAGA_CLEAR_ON_GENERATE")
            .map(parse_flag)
            .unwrap_or(false),
    }
}

fn first_non_empty(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|raw| raw.trim())
        .find(|raw| !raw.is_empty())
        .map(str::to_string)
}

fn normalize_api_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Some(trimmed.to_string())
    } else {
        None
    }
}

fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("yes")
}

#[cfg(target_arch = "wasm32")]
fn load_initial_character() -> Option<Character> {
    let window = web_sys::window()?;
    let location = window.location();
    if let Some(character) = location
        .hash()
        .ok()
        .and_then(|hash| parse_character_from_hash(&hash))
    {
        return Some(character);
    }
    let search = location.search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(search.trim()).ok()?;
    let raw = params.get("character")?;
    parse_character(&raw)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_initial_character() -> Option<Character> {
    None
}

fn parse_character(raw: &str) -> Option<Character> {
    match Character::parse(raw) {
        Ok(character) => Some(character),
        Err(_err) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::warn!("router: ignoring character", _err.to_string());
            }
            None
        }
    }
}

fn parse_character_from_hash(hash: &str) -> Option<Character> {
    let raw = hash.trim().trim_start_matches('#').trim();
    if raw.is_empty() {
        return None;
    }
    for chunk in raw.split(';') {
        let mut iter = chunk.splitn(2, '=');
        let key = iter.next().unwrap_or("").trim();
        let value = iter.next().unwrap_or("").trim();
        if key.eq_ignore_ascii_case("character") {
            return parse_character(value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_selects_character() {
        assert_eq!(
            parse_character_from_hash("#character=pizza"),
            Some(Character::Pizza)
        );
        assert_eq!(
            parse_character_from_hash("#foo=1; character = Soda"),
            Some(Character::Soda)
        );
    }

    #[test]
    fn hash_without_character_is_ignored() {
        assert_eq!(parse_character_from_hash(""), None);
        assert_eq!(parse_character_from_hash("#resume"), None);
        assert_eq!(parse_character_from_hash("#character=nachos"), None);
    }

    #[test]
    fn api_base_requires_http_scheme() {
        assert_eq!(
            normalize_api_base(" https://example.test/v1/ "),
            Some("https://example.test/v1".to_string())
        );
        assert_eq!(normalize_api_base("ftp://example.test"), None);
    }

    #[test]
    fn first_non_empty_skips_blank_values() {
        assert_eq!(
            first_non_empty(&[None, Some("  "), Some(" key "), Some("other")]),
            Some("key".to_string())
        );
        assert_eq!(first_non_empty(&[None, Some("")]), None);
    }

    #[test]
    fn flags_accept_common_truthy_values() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
