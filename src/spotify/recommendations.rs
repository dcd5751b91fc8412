//! Mood-filtered recommendations.
//!
//! Seeds are blended from three sources: the preset's default genres, the
//! user's medium-term top artists and tracks, and an optional caller-supplied
//! genre override. Personal history is best effort; the request goes ahead
//! without it.
//!
//! ## Request flow
//!
//! ```text
//! resolve(mood) ──► preset
//!                     │
//! GET /me/top/artists ┤ (concurrent, each may fail alone)
//! GET /me/top/tracks  ┘
//!                     ▼
//!                SeedBundle ──► RecommendationRequest ──► GET /recommendations
//!                                                           │
//!                                  404 with custom genres ──┘──► one retry
//!                                                               with preset genres
//! ```
//!
//! At most four upstream calls are made per invocation.

use tracing::{debug, warn};

use crate::{
    error::Result,
    moods::{self, DEFAULT_MOOD, MAX_SEED_GENRES, MoodKey, MoodPreset},
    types::{Credential, MoodRecommendations, RecommendationsResponse, TopItemsResponse},
};

use super::SpotifyClient;

pub const RECOMMENDATION_LIMIT: u32 = 12;
pub const MAX_SEED_ARTISTS: usize = 2;
pub const MAX_SEED_TRACKS: usize = 2;
const TOP_ARTISTS_LIMIT: u32 = 3;
const TOP_TRACKS_LIMIT: u32 = 2;
const TIME_RANGE: &str = "medium_term";

/// Outcome of one personalization lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum History {
    Loaded(Vec<String>),
    /// The lookup failed; treated as "no history".
    Unavailable,
}

impl History {
    /// The loaded ids, empty when the lookup failed.
    pub fn ids(&self) -> &[String] {
        match self {
            History::Loaded(ids) => ids,
            History::Unavailable => &[],
        }
    }
}

/// The user's listening history, each category fetched independently.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalSeeds {
    pub artists: History,
    pub tracks: History,
}

impl PersonalSeeds {
    /// No history in either category.
    pub fn none() -> Self {
        Self {
            artists: History::Unavailable,
            tracks: History::Unavailable,
        }
    }
}

/// Seeds for one recommendation request, built fresh every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedBundle {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
}

impl SeedBundle {
    /// Combines the preset's genres with the user's history.
    ///
    /// # Arguments
    ///
    /// * `preset` - Mood preset, the first 5 of its genres are used
    /// * `personal` - Listening history, the first 2 artists and 2 tracks are used
    ///
    /// # Returns
    ///
    /// A bundle with at least one seed. When all three categories come out
    /// empty, the default mood's genres are used instead.
    pub fn build(preset: &MoodPreset, personal: &PersonalSeeds) -> Self {
        let bundle = Self {
            genres: first_n(&preset.seed_genres, MAX_SEED_GENRES),
            artists: first_n(personal.artists.ids(), MAX_SEED_ARTISTS),
            tracks: first_n(personal.tracks.ids(), MAX_SEED_TRACKS),
        };

        if bundle.is_empty() {
            return Self {
                genres: first_n(&moods::lookup(DEFAULT_MOOD).seed_genres, MAX_SEED_GENRES),
                ..Self::default()
            };
        }
        bundle
    }

    /// True when no category holds a seed.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.artists.is_empty() && self.tracks.is_empty()
    }
}

fn first_n<S: AsRef<str>>(items: &[S], n: usize) -> Vec<String> {
    items.iter().take(n).map(|s| s.as_ref().to_string()).collect()
}

/// Where the genre seeds of a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreSource {
    Custom,
    /// The preset's (or default mood's) genres. A request built this way is
    /// never retried.
    Preset,
}

/// Query parameters for `GET /recommendations`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub genre_source: GenreSource,
    params: Vec<(&'static str, String)>,
}

impl RecommendationRequest {
    /// Custom genres, when non-empty, replace the bundle's genres (first 5,
    /// verbatim). Seed categories and bounds are only emitted when present.
    ///
    /// # Arguments
    ///
    /// * `preset` - Supplies the audio-feature bounds
    /// * `seeds` - Genre, artist and track seeds
    /// * `custom_genres` - Optional genre override
    ///
    /// # Parameters
    ///
    /// `limit=12` first, then `seed_genres`, `seed_artists`, `seed_tracks` as
    /// comma separated lists, then `min_`/`max_` bounds in feature order
    /// (valence, energy, danceability, tempo).
    pub fn new(preset: &MoodPreset, seeds: &SeedBundle, custom_genres: Option<&[String]>) -> Self {
        let (genres, genre_source) = match custom_genres {
            Some(custom) if !custom.is_empty() => {
                (first_n(custom, MAX_SEED_GENRES), GenreSource::Custom)
            }
            _ => (seeds.genres.clone(), GenreSource::Preset),
        };

        let mut params = vec![("limit", RECOMMENDATION_LIMIT.to_string())];
        for (name, values) in [
            ("seed_genres", &genres),
            ("seed_artists", &seeds.artists),
            ("seed_tracks", &seeds.tracks),
        ] {
            if !values.is_empty() {
                params.push((name, values.join(",")));
            }
        }
        params.extend(
            preset
                .ranges
                .params()
                .into_iter()
                .map(|(name, value)| (name, value.to_string())),
        );

        Self {
            genre_source,
            params,
        }
    }

    /// Query parameters in the order they are sent.
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Value of one parameter, `None` when it is not sent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl SpotifyClient {
    /// Recommendations for `mood_param` (resolved through the mood catalog),
    /// optionally overriding the preset genres with `custom_genres`.
    ///
    /// If a custom-genre request comes back 404, it is retried exactly once
    /// with the preset genres. Every other failure, and a failure of that
    /// retry, is returned as is.
    ///
    /// # Arguments
    ///
    /// * `credential` - Valid credential, used for every upstream call
    /// * `mood_param` - Raw mood input. Missing, empty or unknown values
    ///   resolve to the default mood.
    /// * `custom_genres` - Optional genre override, see [`RecommendationRequest::new`]
    ///
    /// # Returns
    ///
    /// The resolved mood and up to 12 normalized tracks.
    ///
    /// # Errors
    ///
    /// Any error of the recommendation request itself ([`Error::Api`],
    /// [`Error::UnexpectedResponse`], [`Error::MalformedResponse`],
    /// [`Error::Transport`]). Personalization failures are never returned.
    ///
    /// [`Error::Api`]: crate::error::Error::Api
    /// [`Error::UnexpectedResponse`]: crate::error::Error::UnexpectedResponse
    /// [`Error::MalformedResponse`]: crate::error::Error::MalformedResponse
    /// [`Error::Transport`]: crate::error::Error::Transport
    pub async fn recommendations_for_mood(
        &self,
        credential: &Credential,
        mood_param: Option<&str>,
        custom_genres: Option<&[String]>,
    ) -> Result<MoodRecommendations> {
        let mood = moods::resolve(mood_param);
        let preset = moods::lookup(mood);
        let personal = self.personal_seeds(credential).await;
        let seeds = SeedBundle::build(preset, &personal);

        let request = RecommendationRequest::new(preset, &seeds, custom_genres);
        match self.request_recommendations(credential, mood, &request).await {
            Err(e) if e.is_not_found() && request.genre_source == GenreSource::Custom => {
                warn!(
                    ?custom_genres,
                    "custom genres produced no results, falling back to the mood preset"
                );
                let fallback = RecommendationRequest::new(preset, &seeds, None);
                self.request_recommendations(credential, mood, &fallback)
                    .await
            }
            result => result,
        }
    }

    /// Top artists and top tracks, fetched concurrently. Either may fail
    /// without affecting the other.
    ///
    /// # Arguments
    ///
    /// * `credential` - Credential authorizing both lookups
    ///
    /// # Returns
    ///
    /// Up to 3 artist ids and 2 track ids from the medium-term window. A
    /// failed lookup is logged and reported as [`History::Unavailable`].
    pub async fn personal_seeds(&self, credential: &Credential) -> PersonalSeeds {
        let (artists, tracks) = tokio::join!(
            self.top_item_ids(credential, "artists", TOP_ARTISTS_LIMIT),
            self.top_item_ids(credential, "tracks", TOP_TRACKS_LIMIT),
        );
        PersonalSeeds { artists, tracks }
    }

    async fn top_item_ids(&self, credential: &Credential, kind: &str, limit: u32) -> History {
        let query = [
            ("limit", limit.to_string()),
            ("time_range", TIME_RANGE.to_string()),
        ];
        match self
            .get::<TopItemsResponse>(credential, &format!("/me/top/{kind}"), &query)
            .await
        {
            Ok(top) => History::Loaded(top.items.into_iter().map(|i| i.id).collect()),
            Err(e) => {
                warn!(kind, error = %e, "unable to load personal seeds, using mood presets");
                History::Unavailable
            }
        }
    }

    async fn request_recommendations(
        &self,
        credential: &Credential,
        mood: MoodKey,
        request: &RecommendationRequest,
    ) -> Result<MoodRecommendations> {
        debug!(%mood, params = ?request.params(), "requesting recommendations");
        let data: RecommendationsResponse = self
            .get(credential, "/recommendations", request.params())
            .await?;

        Ok(MoodRecommendations {
            mood,
            tracks: data.tracks.into_iter().map(Into::into).collect(),
        })
    }
}
