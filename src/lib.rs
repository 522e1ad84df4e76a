pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use engine::{ForecastPolicy, ItemRegistry, WasteEngine, WasteLedger, WasteQuery};
pub use error::{KitchenError, Result};
pub use models::{DashboardResult, Item, TomorrowPlanResult, WasteRecord};
pub use state::KitchenStore;
