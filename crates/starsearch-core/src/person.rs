//! Person listing types as returned by the upstream directory
//!
//! These are read-only views of the upstream payload. Fields the display does not
//! use are optional so partial records still parse, and an explicit `null` reads
//! the same as a missing key.

use serde::{Deserialize, Deserializer, Serialize};

/// One page of people, the shape of both `search/person` and `person/popular`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeoplePage {
    #[serde(default)]
    pub page: Option<u32>,
    pub results: Vec<Person>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u32>,
}

/// A person known to the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub known_for_department: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub known_for: Vec<KnownFor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
}

/// A work a person is known for
///
/// Movies carry `title`/`release_date`, TV shows carry `name`/`first_air_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownFor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
}

impl KnownFor {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    /// Release date for movies, first air date for TV. Empty strings count as absent.
    pub fn display_date(&self) -> Option<&str> {
        fn present(date: &Option<String>) -> Option<&str> {
            date.as_deref().filter(|d| !d.is_empty())
        }
        present(&self.release_date).or_else(|| present(&self.first_air_date))
    }
}

/// Kind of work; tags other than `movie` and `tv` are kept as sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Movie,
    Tv,
    Other(String),
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Other("unknown".to_string())
    }
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Other(tag) => tag,
        }
    }
}

impl From<String> for MediaType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "movie" => MediaType::Movie,
            "tv" => MediaType::Tv,
            _ => MediaType::Other(tag),
        }
    }
}

impl From<MediaType> for String {
    fn from(media: MediaType) -> Self {
        media.as_str().to_string()
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
