//! Response types for the TMDB API.
//!
//! Field sets follow the v3 API payloads. Nullable API fields map to
//! `Option`, unknown fields are ignored during deserialization.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}

/// Movie entry as returned by listing endpoints such as trending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub original_language: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub popularity: f64,
    #[serde(default)]
    pub adult: bool,
}

/// TV show entry as returned by listing endpoints such as trending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    pub original_name: String,
    pub original_language: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub popularity: f64,
}

/// Full movie record. Carries its IMDb id inline; external ids and
/// videos are only appended on [`TvDetails`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub original_language: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub imdb_id: Option<String>,
    pub tagline: Option<String>,
    pub status: String,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    pub vote_average: f64,
    pub vote_count: u64,
}

/// Full TV record with appended external ids and videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvDetails {
    pub id: u64,
    pub name: String,
    pub original_name: String,
    pub original_language: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub number_of_seasons: u32,
    pub number_of_episodes: u32,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub in_production: bool,
    pub status: String,
    /// Scripted, Miniseries, Reality and the like.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
    #[serde(default)]
    pub created_by: Vec<Creator>,
    pub last_episode_to_air: Option<Episode>,
    pub next_episode_to_air: Option<Episode>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub external_ids: Option<ExternalIds>,
    pub videos: Option<VideoCollection>,
}

/// Ids of the same title on other databases and social networks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u64>,
    pub facebook_id: Option<String>,
    pub instagram_id: Option<String>,
    pub twitter_id: Option<String>,
}

/// Season entry inside [`TvDetails::seasons`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub season_number: u32,
    pub episode_count: u32,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
}

/// Single episode, used for last and next aired episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub season_number: u32,
    pub episode_number: u32,
    pub air_date: Option<String>,
    pub still_path: Option<String>,
    pub vote_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub name: String,
    pub english_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
}

/// Backdrops, posters and logos for a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCollection {
    #[serde(default)]
    pub backdrops: Vec<Image>,
    #[serde(default)]
    pub posters: Vec<Image>,
    #[serde(default)]
    pub logos: Vec<Image>,
}

/// Single image record. `file_path` feeds
/// [`image_url`](crate::tmdb::image_url).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub file_path: String,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    pub vote_average: f64,
    pub vote_count: u64,
    pub iso_639_1: Option<String>,
}

/// Trailers, teasers and clips for a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoCollection {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Single video record, usually hosted on YouTube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    /// Trailer, Teaser, Clip, Featurette and the like.
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u32,
    #[serde(default)]
    pub official: bool,
    pub published_at: Option<String>,
    pub iso_639_1: Option<String>,
    pub iso_3166_1: Option<String>,
}
