use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ItemId;

/// Identifier assigned by the waste ledger.
pub type RecordId = u64;

/// One logged waste entry. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub id: RecordId,

    pub item_id: ItemId,

    #[serde(rename = "entry_date")]
    pub date: NaiveDate,

    /// Quantity wasted, in the referenced item's unit.
    pub quantity: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A waste entry before the ledger has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewWasteRecord {
    pub item_id: ItemId,
    pub date: NaiveDate,
    pub quantity: f64,
    pub note: Option<String>,
}

impl NewWasteRecord {
    pub fn new(item_id: ItemId, date: NaiveDate, quantity: f64) -> Self {
        Self {
            item_id,
            date,
            quantity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
