use super::restaurant::RestaurantMenuItem;
use crate::core::types::{MenuItemId, Money, OrderId, RestaurantId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an order. Status only ever moves forward through this sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Being assembled by the customer
    Draft,
    /// Confirmed by the customer
    Ordered,
    Cooking,
    Cooked,
    /// Handed to the deliverer
    PickedUp,
    Delivered,
}

impl OrderStatus {
    /// The status that follows this one, or `None` for the terminal state
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Draft => Some(OrderStatus::Ordered),
            OrderStatus::Ordered => Some(OrderStatus::Cooking),
            OrderStatus::Cooking => Some(OrderStatus::Cooked),
            OrderStatus::Cooked => Some(OrderStatus::PickedUp),
            OrderStatus::PickedUp => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Draft => "Draft",
            OrderStatus::Ordered => "Ordered",
            OrderStatus::Cooking => "Cooking",
            OrderStatus::Cooked => "Cooked",
            OrderStatus::PickedUp => "PickedUp",
            OrderStatus::Delivered => "Delivered",
        };
        write!(f, "{}", name)
    }
}

/// One line of an order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// 1-based position within the order
    pub line: usize,
    pub menu_item: RestaurantMenuItem,
    pub quantity: u32,
}

impl OrderItem {
    pub fn menu_item_id(&self) -> &MenuItemId {
        &self.menu_item.id
    }

    pub fn unit_price(&self) -> Money {
        self.menu_item.price
    }

    pub fn subtotal(&self) -> Money {
        self.menu_item.price * self.quantity
    }
}

/// A customer's order from a single restaurant
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    customer_id: UserId,
    restaurant_id: RestaurantId,
    deliverer_id: Option<UserId>,
    status: OrderStatus,
    items: Vec<OrderItem>,
}

impl Order {
    /// Create a new draft order
    pub fn new(id: OrderId, customer_id: UserId, restaurant_id: RestaurantId) -> Self {
        Self {
            id,
            customer_id,
            restaurant_id,
            deliverer_id: None,
            status: OrderStatus::Draft,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> &UserId {
        &self.customer_id
    }

    pub fn restaurant_id(&self) -> &RestaurantId {
        &self.restaurant_id
    }

    pub fn deliverer_id(&self) -> Option<&UserId> {
        self.deliverer_id.as_ref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Sum of all line subtotals, recomputed on every call
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::subtotal).sum()
    }

    pub fn add_item(&mut self, menu_item: RestaurantMenuItem, quantity: u32) {
        self.items.push(OrderItem {
            line: self.items.len() + 1,
            menu_item,
            quantity,
        });
    }

    /// Quantities per menu item, summed and kept in first-seen order
    pub fn grouped_items(&self) -> Vec<(&RestaurantMenuItem, u32)> {
        let mut grouped: Vec<(&RestaurantMenuItem, u32)> = Vec::new();
        for item in &self.items {
            match grouped.iter_mut().find(|(menu_item, _)| menu_item.id == item.menu_item.id) {
                Some((_, quantity)) => *quantity += item.quantity,
                None => grouped.push((&item.menu_item, item.quantity)),
            }
        }
        grouped
    }

    pub(crate) fn advance_status(&mut self) -> Option<OrderStatus> {
        let next = self.status.next()?;
        self.status = next;
        Some(next)
    }

    pub(crate) fn assign_deliverer(&mut self, deliverer_id: UserId) {
        self.deliverer_id = Some(deliverer_id);
    }
}
