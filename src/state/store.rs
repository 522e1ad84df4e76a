use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::source::{ItemRegistry, WasteLedger, WasteQuery};
use crate::error::{KitchenError, Result};
use crate::models::{Item, ItemId, NewWasteRecord, RecordId, Unit, WasteRecord};

/// Largest page `page_waste` will return.
pub const MAX_PAGE_SIZE: usize = 200;

/// In-memory item registry and waste ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenStore {
    items: Vec<Item>,
    waste: Vec<WasteRecord>,
}

impl KitchenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing rows.
    ///
    /// Duplicate ids keep the last occurrence.
    pub fn from_parts(items: Vec<Item>, waste: Vec<WasteRecord>) -> Self {
        let items: BTreeMap<ItemId, Item> = items.into_iter().map(|i| (i.id, i)).collect();
        let waste: BTreeMap<RecordId, WasteRecord> =
            waste.into_iter().map(|w| (w.id, w)).collect();
        Self {
            items: items.into_values().collect(),
            waste: waste.into_values().collect(),
        }
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    fn get_item_mut(&mut self, id: ItemId) -> Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(KitchenError::ItemNotFound(id))
    }

    /// Find an item by name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        let key = name.trim().to_lowercase();
        self.items.iter().find(|i| i.key() == key)
    }

    fn check_name(&self, name: &str, except: Option<ItemId>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KitchenError::InvalidInput(
                "item name must not be empty".to_string(),
            ));
        }
        if let Some(existing) = self.find_item(name) {
            if Some(existing.id) != except {
                return Err(KitchenError::DuplicateItem(name.to_string()));
            }
        }
        Ok(name.to_string())
    }

    /// Register a new item and return its id.
    pub fn add_item(&mut self, name: &str, unit: Unit, active: bool) -> Result<ItemId> {
        let name = self.check_name(name, None)?;
        let id = self
            .items
            .iter()
            .map(|i| i.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| KitchenError::InvalidInput("item ids exhausted".to_string()))?;
        self.items.push(Item {
            id,
            name,
            unit,
            active,
        });
        Ok(id)
    }

    /// Rename, re-unit or (de)activate an existing item.
    pub fn update_item(&mut self, id: ItemId, name: &str, unit: Unit, active: bool) -> Result<()> {
        let name = self.check_name(name, Some(id))?;
        let item = self.get_item_mut(id)?;
        item.name = name;
        item.unit = unit;
        item.active = active;
        Ok(())
    }

    /// Apply only the given changes to an item; omitted fields keep their value.
    pub fn patch_item(
        &mut self,
        id: ItemId,
        name: Option<&str>,
        unit: Option<Unit>,
        active: Option<bool>,
    ) -> Result<()> {
        let current = self.get_item(id).ok_or(KitchenError::ItemNotFound(id))?.clone();
        self.update_item(
            id,
            name.unwrap_or(current.name.as_str()),
            unit.unwrap_or(current.unit),
            active.unwrap_or(current.active),
        )
    }

    pub fn set_item_active(&mut self, id: ItemId, active: bool) -> Result<()> {
        self.get_item_mut(id)?.active = active;
        Ok(())
    }

    /// Append a waste record and return its id.
    ///
    /// The item may be inactive but must exist.
    pub fn record_waste(&mut self, entry: NewWasteRecord) -> Result<RecordId> {
        if self.get_item(entry.item_id).is_none() {
            return Err(KitchenError::ItemNotFound(entry.item_id));
        }
        if !entry.quantity.is_finite() || entry.quantity < 0.0 {
            return Err(KitchenError::InvalidQuantity(entry.quantity));
        }

        let note = entry
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let id = self
            .waste
            .iter()
            .map(|w| w.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| KitchenError::InvalidInput("waste record ids exhausted".to_string()))?;
        self.waste.push(WasteRecord {
            id,
            item_id: entry.item_id,
            date: entry.date,
            quantity: entry.quantity,
            note,
        });
        Ok(id)
    }

    /// Newest-first page of matching records, with the total match count.
    pub fn page_waste(
        &self,
        query: &WasteQuery,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<WasteRecord>, usize)> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(KitchenError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let mut rows: Vec<&WasteRecord> = self.waste.iter().filter(|w| query.matches(w)).collect();
        let total = rows.len();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

        let page = rows.into_iter().skip(offset).take(limit).cloned().collect();
        Ok((page, total))
    }

    pub fn into_parts(self) -> (Vec<Item>, Vec<WasteRecord>) {
        (self.items, self.waste)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn waste(&self) -> &[WasteRecord] {
        &self.waste
    }

    /// Count of items in the registry.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemRegistry for KitchenStore {
    fn list_items(&self, include_inactive: bool) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|i| include_inactive || i.active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.key().cmp(&b.key()).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }
}

impl WasteLedger for KitchenStore {
    fn list_waste(&self, query: &WasteQuery) -> Result<Vec<WasteRecord>> {
        let mut rows: Vec<WasteRecord> = self
            .waste
            .iter()
            .filter(|w| query.matches(w))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}
