//! Catalog payload types.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// A movie as served by the catalog. Field names follow the catalog's
/// snake_case; absent strings decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(default)]
#[graphql(rename_fields = "snake_case")]
pub struct Movie {
    pub id: i32,
    pub url: String,
    pub imdb_code: String,
    pub title: String,
    pub title_english: String,
    pub title_long: String,
    pub slug: String,
    pub year: i32,
    pub rating: f64,
    pub runtime: f64,
    pub genres: Vec<Option<String>>,
    pub summary: Option<String>,
    pub description_full: String,
    pub synopsis: Option<String>,
    pub yt_trailer_code: String,
    pub language: String,
    pub background_image: String,
    pub background_image_original: String,
    pub small_cover_image: String,
    pub medium_cover_image: String,
    pub large_cover_image: String,
}

/// `{ "data": T }`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MovieList {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MovieDetails {
    #[serde(default)]
    pub movie: Option<Movie>,
}
