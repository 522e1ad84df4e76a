mod item;
mod report;
mod waste;

pub use item::{Item, ItemId, Unit};
pub use report::{
    Comparison, Confidence, DashboardResult, ItemTotal, PlanEntry, TomorrowPlanResult, TrendPoint,
    View,
};
pub use waste::{NewWasteRecord, RecordId, WasteRecord};
