pub mod export;
pub mod prompts;
pub mod render;

pub use export::{to_json, write_dashboard_csv, write_plan_csv};
pub use prompts::{collect_waste_entry, match_items, prompt_yes_no};
pub use render::{
    display_dashboard, display_items, display_plan, display_quantity, display_waste_page,
};
