use crate::schema::CharacterConfig;
use anyhow::{bail, Context};
use pokeseal_core::{Catalog, Rarity, StickerMaster, StickerType};
use std::fs;
use std::path::Path;

/// The shipped roster: 10 characters, 15 variants each, 150 masters.
pub fn builtin_characters() -> Vec<CharacterConfig> {
    let character = |name: &str, rarity: u8, kind: StickerType, series: &str, base_rate: i64, gacha_weight: u32| {
        CharacterConfig {
            name: name.to_string(),
            rarity: Rarity::new(rarity),
            kind,
            series: series.to_string(),
            base_rate,
            gacha_weight,
            file_prefix: name.to_string(),
            variants: 15,
            limited: false,
        }
    };
    vec![
        character("もっちも", 5, StickerType::Sparkle, "レジェンドコレクション", 500, 1),
        character("ウールン", 5, StickerType::Sparkle, "レジェンドコレクション", 500, 1),
        character("スタラ", 5, StickerType::Sparkle, "レジェンドコレクション", 500, 1),
        character("ドロル", 4, StickerType::Puffy, "スーパーレアコレクション", 200, 5),
        character("チャックン", 4, StickerType::Puffy, "スーパーレアコレクション", 200, 5),
        character("コケボ", 3, StickerType::Normal, "レアコレクション", 100, 15),
        character("サニたん", 3, StickerType::Normal, "レアコレクション", 100, 15),
        character("キノぼう", 2, StickerType::Normal, "アンコモンコレクション", 50, 30),
        character("ポリ", 2, StickerType::Normal, "アンコモンコレクション", 50, 30),
        character("ポフン", 1, StickerType::Normal, "コモンコレクション", 20, 50),
    ]
}

/// Expand a roster into the immutable sticker catalog. Entry order is
/// roster order then variant order; gacha pools inherit it.
pub fn build_catalog(characters: &[CharacterConfig]) -> anyhow::Result<Catalog> {
    if characters.is_empty() {
        bail!("character roster is empty");
    }
    let mut stickers = Vec::new();
    for config in characters {
        if config.variants == 0 {
            bail!("character {} has zero variants", config.name);
        }
        for variant in 1..=config.variants {
            stickers.push(StickerMaster {
                id: format!("{}_{:02}", config.file_prefix, variant),
                name: format!("{} #{}", config.name, variant),
                character: config.name.clone(),
                variant,
                rarity: config.rarity,
                kind: config.kind,
                series: config.series.clone(),
                image: format!("/images/stickers/{}/{}_{:02}.png", config.name, config.file_prefix, variant),
                base_rate: config.base_rate,
                gacha_weight: config.gacha_weight,
                limited: config.limited,
            });
        }
    }
    Ok(Catalog::new(stickers))
}

pub fn load_characters(path: &Path) -> anyhow::Result<Vec<CharacterConfig>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let characters =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(characters)
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let characters = load_characters(path)?;
    build_catalog(&characters)
}

/// Built-in roster expanded, for callers that ship without a roster
/// file.
pub fn builtin_catalog() -> Catalog {
    // The builtin roster is never empty, so expansion cannot fail.
    build_catalog(&builtin_characters()).expect("builtin roster is valid")
}
