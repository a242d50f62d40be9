use serde::{Deserialize, Serialize};

use super::upsert_by_key;

/// Current version of the structured detail payload
pub const DETAILS_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub place_of_birth: String,
    #[serde(default)]
    pub biography: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationCard {
    pub title: String,
    #[serde(default)]
    pub poster: String,
}

/// Everything the detail page shows about one movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(default = "default_version")]
    pub version: u32,
    pub title: String,
    #[serde(default)]
    pub imdb_id: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub vote_count: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationCard>,
}

fn default_version() -> u32 {
    DETAILS_VERSION
}

impl MovieDetails {
    /// Collapses cast members sharing a name and cards sharing a poster.
    /// A later entry replaces an earlier one in place.
    pub fn normalized(mut self) -> Self {
        self.cast = upsert_by_key(self.cast, |member| member.name.clone());
        self.recommendations = upsert_by_key(self.recommendations, |card| card.poster.clone());
        self
    }
}

/// Form body posted by the search page's script.
///
/// List fields arrive as `["a","b","c"]` strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyDetailsForm {
    pub title: String,
    pub imdb_id: String,
    pub poster: String,
    pub genres: String,
    pub overview: String,
    pub rating: String,
    pub vote_count: String,
    pub release_date: String,
    pub runtime: String,
    pub status: String,
    pub cast_ids: String,
    pub cast_names: String,
    pub cast_chars: String,
    pub cast_bdays: String,
    pub cast_bios: String,
    pub cast_places: String,
    pub cast_profiles: String,
    pub rec_movies: String,
    pub rec_posters: String,
}

/// Decodes a `["a","b"]` string into its elements.
///
/// No validation: surrounding brackets and quotes are trimmed and the rest is
/// split on `","`. Malformed input yields odd or empty lists, never an error.
pub fn decode_list(encoded: &str) -> Vec<String> {
    let inner = encoded
        .trim_matches(|c| c == '[' || c == '"')
        .trim_matches(|c| c == '"' || c == ']');

    if inner.is_empty() {
        return Vec::new();
    }

    inner.split("\",\"").map(str::to_string).collect()
}

impl From<LegacyDetailsForm> for MovieDetails {
    fn from(form: LegacyDetailsForm) -> Self {
        let ids = decode_list(&form.cast_ids);
        let names = decode_list(&form.cast_names);
        let chars = decode_list(&form.cast_chars);
        let bdays = decode_list(&form.cast_bdays);
        let bios = decode_list(&form.cast_bios);
        let places = decode_list(&form.cast_places);
        let profiles = decode_list(&form.cast_profiles);

        // Cast lists are trimmed to the shortest one
        let cast_len = [&ids, &names, &chars, &bdays, &bios, &places, &profiles]
            .iter()
            .map(|list| list.len())
            .min()
            .unwrap_or(0);

        let cast = (0..cast_len)
            .map(|i| CastMember {
                id: ids[i].clone(),
                name: names[i].clone(),
                character: chars[i].clone(),
                profile: profiles[i].clone(),
                birthday: bdays[i].clone(),
                place_of_birth: places[i].clone(),
                biography: bios[i].clone(),
            })
            .collect();

        let recommendations = decode_list(&form.rec_movies)
            .into_iter()
            .zip(decode_list(&form.rec_posters))
            .map(|(title, poster)| RecommendationCard { title, poster })
            .collect();

        MovieDetails {
            version: DETAILS_VERSION,
            title: form.title,
            imdb_id: form.imdb_id,
            poster: form.poster,
            genres: form.genres,
            overview: form.overview,
            rating: form.rating,
            vote_count: form.vote_count,
            release_date: form.release_date,
            runtime: form.runtime,
            status: form.status,
            cast,
            recommendations,
        }
        .normalized()
    }
}
