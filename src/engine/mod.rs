pub mod aggregate;
pub mod clock;
pub mod constants;
pub mod facade;
pub mod forecast;
pub mod period;
pub mod policy;
pub mod source;

pub use aggregate::{RangeTotals, aggregate, compare, daily_trend, sum_waste, totals_by_item};
pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use facade::WasteEngine;
pub use forecast::{DailyHistory, Estimate, forecast_item, group_history, plan};
pub use period::{DateRange, Periods, parse_date, resolve};
pub use policy::{Estimator, ForecastPolicy};
pub use source::{ItemRegistry, WasteLedger, WasteQuery};
