use serde::{Deserialize, Serialize};

/// Default number of history snapshots kept
pub const MAX_HISTORY: usize = 50;

/// Default shift applied to a duplicated node, in canvas units
pub const DEFAULT_DUPLICATE_OFFSET: f64 = 20.0;

/// Editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// History cap (values below 1 are treated as 1)
    pub max_history: usize,

    /// How far a duplicate is shifted on both axes
    pub duplicate_offset: f64,

    /// Key hashed into the prefix of generated node ids
    pub id_seed: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
            id_seed: "pagecraft".to_string(),
        }
    }
}
