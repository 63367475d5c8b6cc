//! Plan history record definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanEntry;

/// A previously generated plan as stored in the append-only history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    /// Store-assigned identifier, increasing with every append
    pub id: u64,

    /// When the plan was stored (UTC, second precision)
    pub created_at: Timestamp,

    /// Weekly goal the plan was generated for
    pub weekly_goal: Option<String>,

    /// Diet descriptor the plan was generated for
    pub diet_descriptor: Option<String>,

    /// Plan entries in weekday order
    #[serde(default)]
    pub plan: Vec<PlanEntry>,
}
