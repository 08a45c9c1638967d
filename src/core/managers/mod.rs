pub mod deliverer_manager;
pub mod order_manager;
pub mod restaurant_manager;
pub mod user_manager;

pub use deliverer_manager::DelivererManager;
pub use order_manager::OrderManager;
pub use restaurant_manager::{RestaurantManager, SortOrder};
pub use user_manager::{LoginOutcome, UserManager};
