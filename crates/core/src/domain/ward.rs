use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A ward and the rooms it contains.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ward {
    pub name: String,
    #[serde(default)]
    pub rooms: Vec<String>,
}

/// Ward catalog keyed by ward code (for example `ICU`).
pub type WardCatalog = BTreeMap<String, Ward>;
