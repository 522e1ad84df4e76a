use thiserror::Error;

use crate::models::ItemId;

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Invalid view: {0} (use day/week/month)")]
    InvalidView(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item name already exists: {0}")]
    DuplicateItem(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, KitchenError>;
