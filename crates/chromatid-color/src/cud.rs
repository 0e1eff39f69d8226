// ABOUTME: Color Universal Design (CUD ver.4) recommended palette and nearest-color lookup
// ABOUTME: Distances are unscaled OKLab, the same units the CUD sub-score thresholds use

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use chromatid_types::HexColor;

use crate::space::{Oklab, hex_to_oklab};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CudGroup {
    Accent,
    Base,
    Achromatic,
}

/// One entry of the recommended palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CudColor {
    pub id: &'static str,
    pub name_en: &'static str,
    pub name_ja: &'static str,
    pub hex: &'static str,
    pub group: CudGroup,
}

const fn cud(
    id: &'static str,
    name_en: &'static str,
    name_ja: &'static str,
    hex: &'static str,
    group: CudGroup,
) -> CudColor {
    CudColor {
        id,
        name_en,
        name_ja,
        hex,
        group,
    }
}

pub const CUD_PALETTE: [CudColor; 20] = [
    cud("red", "Red", "赤", "#FF2800", CudGroup::Accent),
    cud("yellow", "Yellow", "黄色", "#FAF500", CudGroup::Accent),
    cud("green", "Green", "緑", "#35A16B", CudGroup::Accent),
    cud("blue", "Blue", "青", "#0041FF", CudGroup::Accent),
    cud("sky-blue", "Sky Blue", "空色", "#66CCFF", CudGroup::Accent),
    cud("pink", "Pink", "ピンク", "#FF99A0", CudGroup::Accent),
    cud("orange", "Orange", "オレンジ", "#FF9900", CudGroup::Accent),
    cud("purple", "Purple", "紫", "#9A0079", CudGroup::Accent),
    cud("brown", "Brown", "茶色", "#663300", CudGroup::Accent),
    cud("light-pink", "Light Pink", "明るいピンク", "#FFD1D1", CudGroup::Base),
    cud("cream", "Cream", "クリーム", "#FFFF99", CudGroup::Base),
    cud("light-yellow-green", "Light Yellow-Green", "明るい黄緑", "#CBF266", CudGroup::Base),
    cud("light-sky-blue", "Light Sky Blue", "明るい空色", "#B4EBFA", CudGroup::Base),
    cud("beige", "Beige", "ベージュ", "#EDC58F", CudGroup::Base),
    cud("light-green", "Light Green", "明るい緑", "#87E7B0", CudGroup::Base),
    cud("light-purple", "Light Purple", "明るい紫", "#C7B2DE", CudGroup::Base),
    cud("white", "White", "白", "#FFFFFF", CudGroup::Achromatic),
    cud("light-gray", "Light Gray", "明るいグレー", "#C8C8CB", CudGroup::Achromatic),
    cud("gray", "Gray", "グレー", "#7F878F", CudGroup::Achromatic),
    cud("black", "Black", "黒", "#000000", CudGroup::Achromatic),
];

/// How closely a color matches its nearest CUD entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    Exact,
    Near,
    Moderate,
    Off,
}

impl MatchLevel {
    pub const EXACT_MAX: f64 = 0.03;
    pub const NEAR_MAX: f64 = 0.06;
    pub const MODERATE_MAX: f64 = 0.10;

    pub fn from_delta_e(delta_e: f64) -> Self {
        if delta_e < Self::EXACT_MAX {
            MatchLevel::Exact
        } else if delta_e < Self::NEAR_MAX {
            MatchLevel::Near
        } else if delta_e < Self::MODERATE_MAX {
            MatchLevel::Moderate
        } else {
            MatchLevel::Off
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CudMatch {
    pub nearest: CudColor,
    /// Unscaled OKLab distance
    pub delta_e: f64,
    pub match_level: MatchLevel,
}

fn palette_lab() -> &'static [(CudColor, Oklab)] {
    static LAB: OnceLock<Vec<(CudColor, Oklab)>> = OnceLock::new();
    LAB.get_or_init(|| {
        CUD_PALETTE
            .iter()
            .filter_map(|entry| {
                HexColor::parse(entry.hex).map(|hex| (*entry, hex_to_oklab(&hex)))
            })
            .collect()
    })
}

/// Find the nearest CUD color. Ties resolve to the earlier palette entry.
pub fn nearest(color: &HexColor) -> CudMatch {
    let lab = hex_to_oklab(color);

    let mut best = CUD_PALETTE[0];
    let mut best_delta = f64::INFINITY;
    for (entry, entry_lab) in palette_lab() {
        let delta = lab.distance(entry_lab);
        if delta < best_delta {
            best = *entry;
            best_delta = delta;
        }
    }

    CudMatch {
        nearest: best,
        delta_e: best_delta,
        match_level: MatchLevel::from_delta_e(best_delta),
    }
}
