use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: Option<Genre>,
    pub director: Option<Director>,
    pub image_url: String,
    pub featured: bool,
    pub runtime_minutes: Option<i32>,
    pub rating: String,
    pub cast: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Genre as embedded in a movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Director as embedded in a movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Director {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// Catalog entry before it has been assigned an id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub genre: Option<Genre>,
    pub director: Option<Director>,
    pub image_url: String,
    pub featured: bool,
    pub runtime_minutes: Option<i32>,
    pub rating: String,
    pub cast: Vec<String>,
}
