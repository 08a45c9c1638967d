pub mod order;
pub mod restaurant;
pub mod user;

pub use order::{Order, OrderItem, OrderStatus};
pub use restaurant::{Rating, Restaurant, RestaurantMenuItem, RestaurantStyle};
pub use user::{Client, Customer, Deliverer, DelivererStatus, Profile, User};
