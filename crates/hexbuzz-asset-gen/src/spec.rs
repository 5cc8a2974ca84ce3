//! Asset registry
//!
//! The ordered table of assets the batch produces. Defined once before
//! a run and never mutated; iteration order equals registration order
//! so batch logs are reproducible and a partially completed run can be
//! resumed by position.

use hexbuzz_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One named visual output artifact and its generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Output file name, unique within the registry (e.g. "app_icon.png")
    pub id: String,
    /// Positive prompt, required
    pub prompt: String,
    /// Negative prompt; falls back to the global negative prompt
    #[serde(default)]
    pub negative: Option<String>,
    /// Width override; only honored when height is also set
    #[serde(default)]
    pub width: Option<u32>,
    /// Height override; only honored when width is also set
    #[serde(default)]
    pub height: Option<u32>,
    /// Strip the background after generation (transparent PNG icons)
    #[serde(default)]
    pub remove_bg: bool,
}

/// Read-only, insertion-ordered collection of asset specs.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: Vec<AssetSpec>,
}

/// On-disk registry format: an `[[asset]]` array of tables, in batch order.
#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default, rename = "asset")]
    assets: Vec<AssetSpec>,
}

impl AssetRegistry {
    /// Create a registry from specs, validating ids and prompts
    pub fn new(assets: Vec<AssetSpec>) -> Result<Self> {
        let registry = Self { assets };
        registry.validate()?;
        Ok(registry)
    }

    /// Parse a registry from `[[asset]]` TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RegistryFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse registry: {}", e)))?;
        Self::new(file.assets)
    }

    /// Load a registry from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Iterate specs in registration order
    pub fn iter(&self) -> impl Iterator<Item = &AssetSpec> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up a spec by id
    pub fn get(&self, id: &str) -> Option<&AssetSpec> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Keep only the specs whose id is in `ids`, preserving order
    pub fn filtered(&self, ids: &[String]) -> Self {
        Self {
            assets: self
                .assets
                .iter()
                .filter(|a| ids.iter().any(|id| *id == a.id))
                .cloned()
                .collect(),
        }
    }

    /// Check registry invariants: unique non-empty ids, non-empty prompts
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.assets {
            if spec.id.is_empty() {
                return Err(Error::InvalidSpec("asset id is empty".to_string()));
            }
            if spec.prompt.trim().is_empty() {
                return Err(Error::InvalidSpec(format!(
                    "asset '{}' has an empty prompt",
                    spec.id
                )));
            }
            if !seen.insert(spec.id.as_str()) {
                return Err(Error::InvalidSpec(format!(
                    "duplicate asset id '{}'",
                    spec.id
                )));
            }
        }
        Ok(())
    }

    /// The built-in HexBuzz asset table
    pub fn builtin() -> Self {
        Self {
            assets: builtin_assets(),
        }
    }
}

fn asset(id: &str, prompt: &str, negative: &str) -> AssetSpec {
    AssetSpec {
        id: id.to_string(),
        prompt: prompt.to_string(),
        negative: Some(negative.to_string()),
        width: None,
        height: None,
        remove_bg: false,
    }
}

fn icon(id: &str, prompt: &str, negative: &str) -> AssetSpec {
    AssetSpec {
        remove_bg: true,
        ..asset(id, prompt, negative)
    }
}

fn sized(id: &str, prompt: &str, negative: &str, width: u32, height: u32) -> AssetSpec {
    AssetSpec {
        width: Some(width),
        height: Some(height),
        ..asset(id, prompt, negative)
    }
}

fn builtin_assets() -> Vec<AssetSpec> {
    vec![
        asset(
            "app_icon.png",
            "game app icon, golden honeycomb hexagonal pattern, glowing amber honey texture, single cute cartoon bee mascot, warm golden yellow orange gradient, glossy 3D style, mobile game icon, centered composition, high quality, professional game art, no text",
            "text, letters, words, watermark, signature, multiple bees, realistic, photograph",
        ),
        asset(
            "splash_background.png",
            "seamless tileable pattern, honeycomb hexagonal cells background, golden amber honey dripping texture, warm cream yellow gradient, soft glow, game UI background, vector style illustration, abstract geometric, high quality",
            "text, character, bee, figure, watermark, asymmetric",
        ),
        asset(
            "level_button.png",
            "single hexagonal game button icon, golden honeycomb cell, glossy honey texture, warm amber glow, 3D embossed style, game UI element, centered, isolated on transparent, clean edges, high quality mobile game art",
            "text, numbers, multiple, pattern, background, watermark",
        ),
        asset(
            "level_button_hover.png",
            "single hexagonal game button icon, bright glowing golden honeycomb cell, radiant honey amber, strong glow effect, 3D embossed style, game UI hover state, centered, isolated, luminous edges, high quality mobile game art",
            "text, numbers, multiple, pattern, background, watermark",
        ),
        icon(
            "lock_icon.png",
            "game lock icon, vintage brass padlock, honey amber tint, stylized cartoon lock, game UI element, centered, clean design, glossy finish, mobile game art style, isolated icon",
            "text, key, chain, realistic, photograph, multiple, background",
        ),
        icon(
            "star_filled.png",
            "golden star game icon, shining glossy gold star, warm honey amber glow, sparkles, game achievement star, 3D cartoon style, centered, isolated, mobile game UI, high quality vector style",
            "text, multiple stars, background, realistic, dull",
        ),
        icon(
            "star_empty.png",
            "empty star outline icon, silver grey star border, subtle shadow, game UI star placeholder, clean minimalist, centered, isolated, mobile game element, transparent center, outline only",
            "text, filled, gold, yellow, multiple, background, solid",
        ),
        asset(
            "victory_background.png",
            "celebration game victory screen background, golden light rays, honey drip decorations, warm amber gradient, confetti particles, festive game UI background, soft glow effect, high quality mobile game art",
            "text, character, face, realistic, dark, sad",
        ),
        icon(
            "trophy_icon.png",
            "golden trophy cup game icon, honey amber gold, glossy 3D cartoon style, small stars around, achievement reward icon, centered, isolated, mobile game UI element, warm glow",
            "text, realistic, photograph, multiple, background, engraving",
        ),
        asset(
            "hex_cell_unvisited.png",
            "single hexagonal game cell, clean light cream colored honeycomb, subtle texture, soft shadow, game puzzle piece, minimalist flat design, centered, isolated, mobile game UI",
            "text, multiple, pattern, dark, visited mark, trail",
        ),
        asset(
            "hex_cell_visited.png",
            "single hexagonal game cell, golden amber honey filled honeycomb, glowing warm yellow, translucent honey texture, game puzzle visited state, centered, isolated, mobile game UI element",
            "text, multiple, pattern, empty, cream, white",
        ),
        asset(
            "hex_cell_start.png",
            "single hexagonal game cell, green glowing honeycomb, emerald game start marker, bright green glow effect, game puzzle start point, centered, isolated, mobile game UI",
            "text, multiple, pattern, red, yellow, bee",
        ),
        asset(
            "hex_cell_end.png",
            "single hexagonal game cell, red glowing honeycomb, ruby game end goal marker, warm red glow effect, game puzzle destination point, centered, isolated, mobile game UI",
            "text, multiple, pattern, green, yellow, bee",
        ),
        icon(
            "button_play.png",
            "play button game icon, golden hexagonal button with play triangle, honey amber glossy finish, 3D embossed style, game UI start button, centered, isolated, mobile game art, warm glow",
            "text, word play, multiple, background, realistic",
        ),
        icon(
            "button_retry.png",
            "retry refresh button game icon, circular arrow on hexagonal golden button, honey amber finish, 3D game UI element, centered, isolated, mobile game art style, clean design",
            "text, word, multiple, background, realistic",
        ),
        icon(
            "button_next.png",
            "next arrow button game icon, right arrow on hexagonal golden button, honey amber glossy finish, 3D game UI navigation, centered, isolated, mobile game art, forward chevron",
            "text, word next, multiple, background, realistic",
        ),
        icon(
            "button_back.png",
            "back arrow button game icon, left arrow on hexagonal golden button, honey amber finish, 3D game UI navigation, centered, isolated, mobile game art, back chevron",
            "text, word back, multiple, background, realistic",
        ),
        icon(
            "button_menu.png",
            "menu grid button game icon, 3x3 grid dots on hexagonal golden button, honey amber finish, game UI menu icon, centered, isolated, mobile game art, level select icon",
            "text, hamburger menu, lines, multiple, background",
        ),
        sized(
            "header_banner.png",
            "game header banner background, horizontal honeycomb pattern, golden amber gradient, honey drip decorations, warm game UI header, seamless horizontal tile, high quality mobile game art",
            "text, logo, character, vertical, square",
            1024,
            256,
        ),
        icon(
            "bee_mascot.png",
            "cute cartoon bee character mascot, adorable happy bee, chibi style, golden yellow and black stripes, tiny wings, big eyes, game character, centered, isolated, mobile game art, kawaii style",
            "realistic, scary, angry, multiple bees, background, text",
        ),
        icon(
            "honey_drip.png",
            "golden honey drip decoration, translucent amber honey drop, glossy liquid texture, game UI decorative element, isolated, vertical dripping honey, high quality",
            "text, background, solid, character, bee",
        ),
        sized(
            "progress_fill.png",
            "seamless horizontal tile, golden honey gradient texture, glossy amber fill, game progress bar texture, smooth gradient, warm yellow orange, game UI element",
            "text, pattern, hexagon, character, vertical",
            512,
            64,
        ),
        icon(
            "icon_settings.png",
            "settings gear icon, golden brass gear cogwheel, honey amber tint, game UI settings button, 3D cartoon style, centered, isolated, mobile game art, clean design",
            "text, multiple gears, background, realistic, rusty",
        ),
        icon(
            "icon_sound_on.png",
            "sound speaker icon with waves, golden amber game UI icon, 3D cartoon style, audio on indicator, centered, isolated, mobile game art element, clean design",
            "text, mute, x mark, background, realistic",
        ),
        icon(
            "icon_sound_off.png",
            "muted speaker icon with X mark, golden amber game UI icon, 3D cartoon style, audio mute indicator, centered, isolated, mobile game art element",
            "text, waves, sound on, background, realistic",
        ),
        icon(
            "icon_info.png",
            "info help icon, golden circular i button, honey amber game UI icon, 3D cartoon style, information symbol, centered, isolated, mobile game art",
            "text, question mark, background, realistic, multiple",
        ),
        icon(
            "icon_checkmark.png",
            "checkmark tick icon, golden amber check symbol, game UI completion icon, 3D glossy style, success indicator, centered, isolated, mobile game art, green gold",
            "text, x mark, cross, background, realistic",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = AssetRegistry::builtin();
        registry.validate().unwrap();
        assert_eq!(registry.len(), 27);
    }

    #[test]
    fn test_builtin_registry_order_is_stable() {
        let registry = AssetRegistry::builtin();
        let first = registry.iter().next().unwrap();
        let last = registry.iter().last().unwrap();
        assert_eq!(first.id, "app_icon.png");
        assert_eq!(last.id, "icon_checkmark.png");
    }

    #[test]
    fn test_builtin_dimension_overrides_come_in_pairs() {
        for spec in AssetRegistry::builtin().iter() {
            assert_eq!(
                spec.width.is_some(),
                spec.height.is_some(),
                "asset '{}' overrides only one dimension",
                spec.id
            );
        }
    }

    #[test]
    fn test_from_toml_preserves_order_and_defaults() {
        let toml_str = r#"
[[asset]]
id = "a.png"
prompt = "first"

[[asset]]
id = "b.png"
prompt = "second"
negative = "no text"
remove_bg = true
width = 1024
height = 256
"#;
        let registry = AssetRegistry::from_toml_str(toml_str).unwrap();
        let specs: Vec<&AssetSpec> = registry.iter().collect();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].id, "a.png");
        assert!(!specs[0].remove_bg);
        assert!(specs[0].negative.is_none());
        assert_eq!(specs[1].id, "b.png");
        assert!(specs[1].remove_bg);
        assert_eq!(specs[1].width, Some(1024));
        assert_eq!(specs[1].height, Some(256));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = AssetRegistry::new(vec![
            asset("a.png", "x", "n"),
            asset("a.png", "y", "n"),
        ]);
        assert!(matches!(result, Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let result = AssetRegistry::new(vec![asset("a.png", "  ", "n")]);
        assert!(matches!(result, Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn test_filtered_keeps_order() {
        let registry = AssetRegistry::builtin();
        let subset = registry.filtered(&[
            "bee_mascot.png".to_string(),
            "app_icon.png".to_string(),
        ]);
        let ids: Vec<&str> = subset.iter().map(|a| a.id.as_str()).collect();
        // Registry order, not filter-argument order
        assert_eq!(ids, vec!["app_icon.png", "bee_mascot.png"]);
    }
}
