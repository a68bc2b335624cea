//! Fighting style tendency tables
//!
//! Each style multiplies the fighter's own tendencies. A multiplier of 1.0
//! is neutral; the generic mixed martial arts style is neutral everywhere
//! except for strike-type preferences.

use crate::core::StrikeType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightingStyle {
    #[default]
    MixedMartialArts,
    Boxing,
    Kickboxing,
    MuayThai,
    Karate,
    Taekwondo,
    Wrestling,
    BrazilianJiuJitsu,
    Judo,
    Sambo,
    Sanda,
    Capoeira,
    GrecoRoman,
    CatchWrestling,
    KravMaga,
    Savate,
    Kyokushin,
    Brawler,
}

impl FightingStyle {
    pub const ALL: [FightingStyle; 18] = [
        FightingStyle::MixedMartialArts,
        FightingStyle::Boxing,
        FightingStyle::Kickboxing,
        FightingStyle::MuayThai,
        FightingStyle::Karate,
        FightingStyle::Taekwondo,
        FightingStyle::Wrestling,
        FightingStyle::BrazilianJiuJitsu,
        FightingStyle::Judo,
        FightingStyle::Sambo,
        FightingStyle::Sanda,
        FightingStyle::Capoeira,
        FightingStyle::GrecoRoman,
        FightingStyle::CatchWrestling,
        FightingStyle::KravMaga,
        FightingStyle::Savate,
        FightingStyle::Kyokushin,
        FightingStyle::Brawler,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FightingStyle::MixedMartialArts => "mixed_martial_arts",
            FightingStyle::Boxing => "boxing",
            FightingStyle::Kickboxing => "kickboxing",
            FightingStyle::MuayThai => "muay_thai",
            FightingStyle::Karate => "karate",
            FightingStyle::Taekwondo => "taekwondo",
            FightingStyle::Wrestling => "wrestling",
            FightingStyle::BrazilianJiuJitsu => "brazilian_jiu_jitsu",
            FightingStyle::Judo => "judo",
            FightingStyle::Sambo => "sambo",
            FightingStyle::Sanda => "sanda",
            FightingStyle::Capoeira => "capoeira",
            FightingStyle::GrecoRoman => "greco_roman",
            FightingStyle::CatchWrestling => "catch_wrestling",
            FightingStyle::KravMaga => "krav_maga",
            FightingStyle::Savate => "savate",
            FightingStyle::Kyokushin => "kyokushin",
            FightingStyle::Brawler => "brawler",
        }
    }

    /// Lenient lookup: case, spaces, hyphens and a few common abbreviations
    /// are accepted. Returns `None` for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Option<FightingStyle> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        let alias = match key.as_str() {
            "mma" | "generic" | "" => Some(FightingStyle::MixedMartialArts),
            "bjj" | "jiu_jitsu" | "jiujitsu" => Some(FightingStyle::BrazilianJiuJitsu),
            "tkd" => Some(FightingStyle::Taekwondo),
            "greco_roman_wrestling" => Some(FightingStyle::GrecoRoman),
            "striker" | "street" => Some(FightingStyle::Brawler),
            _ => None,
        };
        alias.or_else(|| Self::ALL.iter().copied().find(|style| style.as_str() == key))
    }
}

impl fmt::Display for FightingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandingBias {
    pub punch: f64,
    pub kick: f64,
    pub clinch: f64,
    pub takedown: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClinchBias {
    pub strike: f64,
    pub takedown: f64,
    pub break_away: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundBias {
    pub strike: f64,
    pub advance: f64,
    pub submission: f64,
    pub sweep: f64,
    pub escape: f64,
}

/// Read-only tendency data for one style
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    pub style: FightingStyle,
    pub standing: StandingBias,
    pub clinch: ClinchBias,
    pub ground: GroundBias,
    /// Weights aligned with [`StrikeType::PUNCHES`]
    pub punch_weights: [f64; 6],
    /// Weights aligned with [`StrikeType::KICKS`]
    pub kick_weights: [f64; 3],
}

impl StyleProfile {
    /// Preference weight for any strike type (clinch and ground strikes are flat)
    pub fn strike_weight(&self, strike: StrikeType) -> f64 {
        if let Some(i) = StrikeType::PUNCHES.iter().position(|s| *s == strike) {
            return self.punch_weights[i];
        }
        if let Some(i) = StrikeType::KICKS.iter().position(|s| *s == strike) {
            return self.kick_weights[i];
        }
        1.0
    }
}

#[derive(Debug, Clone)]
pub struct StyleTable {
    profiles: Vec<StyleProfile>,
}

impl StyleTable {
    pub fn standard() -> Self {
        StyleTable {
            profiles: FightingStyle::ALL.iter().map(|s| standard_profile(*s)).collect(),
        }
    }

    pub fn profile(&self, style: FightingStyle) -> &StyleProfile {
        &self.profiles[style as usize]
    }

    pub fn with_profile(mut self, profile: StyleProfile) -> Self {
        let index = profile.style as usize;
        self.profiles[index] = profile;
        self
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::standard()
    }
}

type Row = ([f64; 4], [f64; 3], [f64; 5], [f64; 6], [f64; 3]);

fn standard_row(style: FightingStyle) -> Row {
    use FightingStyle::*;
    // standing: punch kick clinch takedown | clinch: strike takedown break
    // ground: strike advance submission sweep escape
    // punches: jab cross hook uppercut overhand body | kicks: leg body head
    match style {
        MixedMartialArts => (
            [1.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 0.8, 0.7, 0.8],
            [1.0, 0.8, 0.5],
        ),
        Boxing => (
            [1.8, 0.3, 0.6, 0.3],
            [1.3, 0.5, 1.2],
            [1.2, 0.6, 0.4, 0.6, 1.6],
            [1.4, 1.3, 1.2, 1.0, 0.8, 1.1],
            [0.6, 0.3, 0.1],
        ),
        Kickboxing => (
            [1.2, 1.6, 0.6, 0.4],
            [1.0, 0.6, 1.3],
            [1.0, 0.7, 0.5, 0.7, 1.5],
            [1.2, 1.1, 1.0, 0.7, 0.6, 0.8],
            [1.2, 1.0, 0.8],
        ),
        MuayThai => (
            [1.0, 1.5, 1.5, 0.4],
            [1.6, 0.7, 0.6],
            [1.0, 0.7, 0.5, 0.7, 1.4],
            [1.0, 1.0, 0.9, 0.8, 0.6, 0.7],
            [1.4, 1.2, 0.9],
        ),
        Karate => (
            [1.1, 1.4, 0.4, 0.4],
            [0.8, 0.5, 1.5],
            [0.9, 0.7, 0.5, 0.6, 1.5],
            [1.3, 1.4, 0.6, 0.5, 0.4, 0.8],
            [0.8, 1.1, 1.0],
        ),
        Taekwondo => (
            [0.7, 2.0, 0.3, 0.3],
            [0.7, 0.4, 1.6],
            [0.8, 0.6, 0.5, 0.6, 1.6],
            [1.1, 0.9, 0.6, 0.4, 0.3, 0.6],
            [0.6, 1.3, 1.5],
        ),
        Wrestling => (
            [0.8, 0.4, 1.3, 2.0],
            [0.7, 1.8, 0.4],
            [1.3, 1.4, 0.6, 1.0, 0.6],
            [1.0, 1.0, 0.8, 0.6, 1.0, 0.6],
            [0.8, 0.4, 0.2],
        ),
        BrazilianJiuJitsu => (
            [0.6, 0.5, 1.2, 1.4],
            [0.6, 1.3, 0.5],
            [0.7, 1.4, 2.0, 1.5, 0.5],
            [1.0, 0.8, 0.6, 0.4, 0.6, 0.5],
            [0.7, 0.5, 0.2],
        ),
        Judo => (
            [0.6, 0.4, 1.8, 1.6],
            [0.6, 2.0, 0.4],
            [0.9, 1.2, 1.4, 1.0, 0.7],
            [1.0, 0.8, 0.6, 0.4, 0.5, 0.5],
            [0.6, 0.4, 0.2],
        ),
        Sambo => (
            [0.8, 0.7, 1.4, 1.6],
            [0.8, 1.7, 0.5],
            [1.0, 1.2, 1.6, 1.1, 0.7],
            [1.0, 1.0, 0.9, 0.6, 0.8, 0.6],
            [1.0, 0.6, 0.3],
        ),
        Sanda => (
            [1.2, 1.3, 1.2, 1.0],
            [1.0, 1.4, 0.8],
            [1.0, 0.8, 0.6, 0.8, 1.3],
            [1.1, 1.1, 0.9, 0.6, 0.6, 0.7],
            [1.0, 1.2, 0.7],
        ),
        Capoeira => (
            [0.5, 1.9, 0.3, 0.4],
            [0.6, 0.6, 1.6],
            [0.7, 0.6, 0.5, 0.9, 1.6],
            [0.8, 0.8, 0.6, 0.4, 0.4, 0.5],
            [0.8, 1.0, 1.6],
        ),
        GrecoRoman => (
            [0.7, 0.3, 2.0, 1.2],
            [0.8, 2.2, 0.3],
            [1.2, 1.2, 0.5, 0.9, 0.6],
            [1.0, 1.0, 0.9, 0.7, 0.9, 0.8],
            [0.6, 0.3, 0.1],
        ),
        CatchWrestling => (
            [0.7, 0.4, 1.3, 1.7],
            [0.7, 1.6, 0.5],
            [1.2, 1.3, 1.7, 1.0, 0.5],
            [0.9, 0.9, 0.8, 0.6, 0.8, 0.6],
            [0.7, 0.4, 0.2],
        ),
        KravMaga => (
            [1.5, 1.0, 1.1, 0.6],
            [1.4, 0.8, 0.9],
            [1.3, 0.8, 0.7, 0.8, 1.3],
            [1.0, 1.3, 1.2, 1.0, 0.8, 1.0],
            [1.1, 0.9, 0.4],
        ),
        Savate => (
            [1.1, 1.7, 0.4, 0.3],
            [0.9, 0.4, 1.4],
            [0.9, 0.6, 0.4, 0.6, 1.6],
            [1.2, 1.1, 1.0, 0.6, 0.5, 0.7],
            [1.3, 1.1, 0.9],
        ),
        Kyokushin => (
            [1.3, 1.5, 0.5, 0.3],
            [1.1, 0.5, 1.2],
            [0.9, 0.6, 0.4, 0.6, 1.5],
            [0.8, 1.2, 1.2, 1.0, 0.6, 1.5],
            [1.5, 1.1, 1.0],
        ),
        Brawler => (
            [1.9, 0.5, 0.9, 0.4],
            [1.5, 0.6, 0.8],
            [1.5, 0.7, 0.3, 0.5, 1.3],
            [0.6, 1.2, 1.5, 1.0, 1.6, 0.9],
            [0.8, 0.5, 0.3],
        ),
    }
}

fn standard_profile(style: FightingStyle) -> StyleProfile {
    let (s, c, g, punch_weights, kick_weights) = standard_row(style);
    StyleProfile {
        style,
        standing: StandingBias {
            punch: s[0],
            kick: s[1],
            clinch: s[2],
            takedown: s[3],
        },
        clinch: ClinchBias {
            strike: c[0],
            takedown: c[1],
            break_away: c[2],
        },
        ground: GroundBias {
            strike: g[0],
            advance: g[1],
            submission: g[2],
            sweep: g[3],
            escape: g[4],
        },
        punch_weights,
        kick_weights,
    }
}
