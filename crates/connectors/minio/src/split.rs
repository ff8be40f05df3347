use serde::{Deserialize, Serialize};

/// Name of the single split every table gets.
pub const SPLIT_NAME: &str = "split1";

/// Action tag meaning "no partitioning, retrieve the whole table".
pub const ACTION_NORMAL: &str = "normal";

/// Unit-of-work descriptor for table retrieval.
///
/// Floe never partitions retrieval, so split planning always yields exactly
/// one whole-table descriptor regardless of table size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub name: String,
    pub action: String,
}

impl Split {
    pub fn whole_table() -> Self {
        Self { name: SPLIT_NAME.to_string(), action: ACTION_NORMAL.to_string() }
    }
}
