mod persistence;
mod seed;
mod store;

pub use persistence::{load_policy, load_store, save_policy, save_store};
pub use seed::{DEMO_ITEMS, seed_demo};
pub use store::{KitchenStore, MAX_PAGE_SIZE};
