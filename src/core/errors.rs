use super::models::OrderStatus;
use super::types::{MenuItemId, OrderId, RestaurantId, Role, UserId};

/// Errors raised by the platform and the console front end
#[derive(Debug, thiserror::Error)]
pub enum AribaError {
    /// Advancing an order that is already in a terminal state
    #[error("No next status defined for {0}.")]
    NoNextStatus(OrderStatus),
    #[error("Order #{0} not found")]
    OrderNotFound(OrderId),
    /// A step was requested on an order that is not in the status the step starts from
    #[error("Order #{order_id} is {actual}, expected {expected}")]
    WrongStatus {
        order_id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },
    #[error("Order #{0} already has a deliverer")]
    OrderAlreadyAssigned(OrderId),
    #[error("Order #{0} is not available for delivery")]
    OrderNotDeliverable(OrderId),
    #[error("User {0} not found")]
    UserNotFound(UserId),
    /// A user was looked up as one role but is registered as another
    #[error("Expected a {expected} but user is a {actual}")]
    WrongRole { expected: Role, actual: Role },
    #[error("Restaurant {0} not found")]
    RestaurantNotFound(RestaurantId),
    #[error("Menu item {0} not found")]
    MenuItemNotFound(MenuItemId),
    #[error("Email address '{0}' is already in use")]
    EmailInUse(String),
    /// The deliverer already carries an order
    #[error("Deliverer {0} already has an active delivery")]
    DelivererBusy(UserId),
    #[error("Anchor menu is not in the navigation history")]
    AnchorNotInHistory,
    #[error("Home menu not set for role: {0}")]
    HomeNotSet(Role),
    #[error("No user is logged in")]
    NotLoggedIn,
    /// Standard input reached end of file
    #[error("Input closed")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AribaError>;
