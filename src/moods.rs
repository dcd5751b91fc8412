//! Mood catalog.
//!
//! A fixed table mapping each mood to default seed genres and audio-feature
//! bounds used to filter recommendations. The table is built once and never
//! mutated.

use std::{fmt, str::FromStr, sync::LazyLock};

use serde::Serialize;

/// Mood used when the caller's input is missing or unknown.
pub const DEFAULT_MOOD: MoodKey = MoodKey::Happy;

/// Spotify accepts at most 5 seeds per category.
pub const MAX_SEED_GENRES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKey {
    Happy,
    Sad,
    Energetic,
    Chill,
    Focus,
    Romantic,
}

impl MoodKey {
    pub const ALL: [MoodKey; 6] = [
        MoodKey::Happy,
        MoodKey::Sad,
        MoodKey::Energetic,
        MoodKey::Chill,
        MoodKey::Focus,
        MoodKey::Romantic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodKey::Happy => "happy",
            MoodKey::Sad => "sad",
            MoodKey::Energetic => "energetic",
            MoodKey::Chill => "chill",
            MoodKey::Focus => "focus",
            MoodKey::Romantic => "romantic",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for MoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodKey {
    type Err = String;

    /// Case-insensitive, exact match against the known keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        MoodKey::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| format!("unknown mood: {s}"))
    }
}

/// Optional lower and upper bound on one audio feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub const fn none() -> Self {
        Self::new(None, None)
    }

    fn clamped(self) -> Self {
        Self {
            min: self.min.map(clamp_unit),
            max: self.max.map(clamp_unit),
        }
    }
}

/// Rounds to two decimals, then clamps into `[0, 1]`.
fn clamp_unit(value: f64) -> f64 {
    ((value * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

/// Audio-feature constraints of a preset. Valence, energy and danceability are
/// clamped to `[0, 1]`; tempo is BPM and left as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AudioRanges {
    pub valence: Bounds,
    pub energy: Bounds,
    pub danceability: Bounds,
    pub tempo: Bounds,
}

impl AudioRanges {
    pub fn new(valence: Bounds, energy: Bounds, danceability: Bounds, tempo: Bounds) -> Self {
        Self {
            valence: valence.clamped(),
            energy: energy.clamped(),
            danceability: danceability.clamped(),
            tempo,
        }
    }

    /// Every defined bound as a `(min_|max_<feature>, value)` pair. Absent
    /// bounds are skipped.
    pub fn params(&self) -> Vec<(&'static str, f64)> {
        [
            ("min_valence", self.valence.min),
            ("max_valence", self.valence.max),
            ("min_energy", self.energy.min),
            ("max_energy", self.energy.max),
            ("min_danceability", self.danceability.min),
            ("max_danceability", self.danceability.max),
            ("min_tempo", self.tempo.min),
            ("max_tempo", self.tempo.max),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodPreset {
    pub key: MoodKey,
    pub label: &'static str,
    pub description: &'static str,
    pub seed_genres: Vec<&'static str>,
    pub ranges: AudioRanges,
}

impl MoodPreset {
    pub fn new(
        key: MoodKey,
        label: &'static str,
        description: &'static str,
        seed_genres: &[&'static str],
        ranges: AudioRanges,
    ) -> Self {
        Self {
            key,
            label,
            description,
            seed_genres: seed_genres.iter().take(MAX_SEED_GENRES).copied().collect(),
            ranges,
        }
    }
}

// Indexed by `MoodKey as usize`, keep in declaration order.
static PRESETS: LazyLock<[MoodPreset; 6]> = LazyLock::new(|| {
    [
        MoodPreset::new(
            MoodKey::Happy,
            "Happy",
            "Feel-good pop and upbeat vibes.",
            &["pop", "dance", "disco"],
            AudioRanges::new(
                Bounds::new(Some(0.7), None),
                Bounds::new(Some(0.6), None),
                Bounds::new(Some(0.6), None),
                Bounds::new(Some(100.0), Some(140.0)),
            ),
        ),
        MoodPreset::new(
            MoodKey::Sad,
            "Melancholic",
            "Moody ballads for reflective moments.",
            &["acoustic", "indie", "soul"],
            AudioRanges::new(
                Bounds::new(None, Some(0.45)),
                Bounds::new(None, Some(0.5)),
                Bounds::none(),
                Bounds::new(Some(60.0), Some(100.0)),
            ),
        ),
        MoodPreset::new(
            MoodKey::Energetic,
            "Energize",
            "High-octane anthems for workouts.",
            &["edm", "rock", "hip-hop"],
            AudioRanges::new(
                Bounds::none(),
                Bounds::new(Some(0.75), None),
                Bounds::new(Some(0.55), None),
                Bounds::new(Some(120.0), Some(170.0)),
            ),
        ),
        MoodPreset::new(
            MoodKey::Chill,
            "Chill",
            "Lo-fi beats and late-night textures.",
            &["chill", "ambient", "electronic"],
            AudioRanges::new(
                Bounds::none(),
                Bounds::new(None, Some(0.55)),
                Bounds::new(None, Some(0.65)),
                Bounds::new(Some(70.0), Some(110.0)),
            ),
        ),
        MoodPreset::new(
            MoodKey::Focus,
            "Focus",
            "Deep work with minimal distractions.",
            &["classical", "piano", "ambient"],
            AudioRanges::new(
                Bounds::none(),
                Bounds::new(None, Some(0.55)),
                Bounds::new(Some(0.3), Some(0.55)),
                Bounds::new(Some(60.0), Some(120.0)),
            ),
        ),
        MoodPreset::new(
            MoodKey::Romantic,
            "Romance",
            "Smooth R&B and candlelight pop.",
            &["r-n-b", "soul", "pop"],
            AudioRanges::new(
                Bounds::new(Some(0.5), Some(0.85)),
                Bounds::new(Some(0.4), Some(0.75)),
                Bounds::none(),
                Bounds::new(Some(70.0), Some(120.0)),
            ),
        ),
    ]
});

pub fn lookup(key: MoodKey) -> &'static MoodPreset {
    &PRESETS[key.index()]
}

/// All presets in catalog order.
pub fn all() -> &'static [MoodPreset] {
    PRESETS.as_slice()
}

/// Maps raw user input onto a mood. Missing, empty or unknown input yields
/// [`DEFAULT_MOOD`]; this never fails.
pub fn resolve(raw: Option<&str>) -> MoodKey {
    raw.and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_MOOD)
}
