/*!
 * Metadata records handled by the translator.
 *
 * Records are produced by the metadata pipeline and only mutated here. Fields
 * the translator does not touch are kept verbatim in `extra` so that a record
 * read from JSON is written back without losing anything.
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Movie metadata as returned by the metadata server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieInfo {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub director: String,

    /// Actor names, in credit order
    #[serde(default)]
    pub actors: Vec<String>,

    #[serde(default)]
    pub maker: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub series: String,

    #[serde(default)]
    pub genres: Vec<String>,

    /// Every other field of the record, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Actor metadata; only the name is translated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorInfo {
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActorInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}
