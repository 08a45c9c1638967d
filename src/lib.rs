pub mod core;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::{AppConfig, DispatchPolicy};
pub use crate::core::errors::{AribaError, Result};
pub use crate::core::models::{Order, OrderStatus};
pub use crate::core::platform::Platform;
pub use crate::core::types::{Location, Money, OrderId, Role};
pub use crate::ui::app::App;
pub use crate::ui::navigator::MenuNavigator;
