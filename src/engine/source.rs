use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Item, ItemId, WasteRecord};

/// Filter for ledger reads. Bounds are inclusive; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WasteQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub item_id: Option<ItemId>,
}

impl WasteQuery {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            item_id: None,
        }
    }

    pub fn for_item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn matches(&self, record: &WasteRecord) -> bool {
        self.start_date.is_none_or(|start| record.date >= start)
            && self.end_date.is_none_or(|end| record.date <= end)
            && self.item_id.is_none_or(|id| record.item_id == id)
    }
}

/// Read access to the item registry.
pub trait ItemRegistry {
    /// Items ordered by name, then id.
    fn list_items(&self, include_inactive: bool) -> Result<Vec<Item>>;
}

/// Read access to the waste ledger.
pub trait WasteLedger {
    /// Matching records ordered by date, then record id.
    fn list_waste(&self, query: &WasteQuery) -> Result<Vec<WasteRecord>>;
}

impl<T: ItemRegistry + ?Sized> ItemRegistry for &T {
    fn list_items(&self, include_inactive: bool) -> Result<Vec<Item>> {
        (**self).list_items(include_inactive)
    }
}

impl<T: WasteLedger + ?Sized> WasteLedger for &T {
    fn list_waste(&self, query: &WasteQuery) -> Result<Vec<WasteRecord>> {
        (**self).list_waste(query)
    }
}
