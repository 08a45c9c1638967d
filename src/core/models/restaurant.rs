use crate::core::types::{Location, MenuItemId, Money, OrderId, RestaurantId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Cuisine styles a restaurant can register with, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RestaurantStyle {
    Italian,
    French,
    Chinese,
    Japanese,
    American,
    Australian,
}

impl RestaurantStyle {
    pub const ALL: [RestaurantStyle; 6] = [
        RestaurantStyle::Italian,
        RestaurantStyle::French,
        RestaurantStyle::Chinese,
        RestaurantStyle::Japanese,
        RestaurantStyle::American,
        RestaurantStyle::Australian,
    ];
}

impl fmt::Display for RestaurantStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RestaurantStyle::Italian => "Italian",
            RestaurantStyle::French => "French",
            RestaurantStyle::Chinese => "Chinese",
            RestaurantStyle::Japanese => "Japanese",
            RestaurantStyle::American => "American",
            RestaurantStyle::Australian => "Australian",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantMenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Money,
}

impl RestaurantMenuItem {
    pub fn new(name: &str, price: Money) -> Self {
        Self {
            id: MenuItemId::new(),
            name: name.to_string(),
            price,
        }
    }
}

impl fmt::Display for RestaurantMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>7}  {}", self.price, self.name)
    }
}

/// A customer's review of a delivered order
#[derive(Debug, Clone)]
pub struct Rating {
    pub id: Uuid,
    /// Score from 1 to 5
    pub score: u8,
    pub customer_name: String,
    pub comment: String,
    pub order_id: OrderId,
    pub restaurant_id: RestaurantId,
}

/// A restaurant owned by exactly one client
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub owner_id: UserId,
    pub name: String,
    pub style: RestaurantStyle,
    pub location: Location,
    menu_items: Vec<RestaurantMenuItem>,
    ratings: Vec<Rating>,
}

impl Restaurant {
    pub fn new(owner_id: UserId, name: &str, style: RestaurantStyle, location: Location) -> Self {
        Self {
            id: RestaurantId::new(),
            owner_id,
            name: name.to_string(),
            style,
            location,
            menu_items: Vec::new(),
            ratings: Vec::new(),
        }
    }

    pub fn menu_items(&self) -> &[RestaurantMenuItem] {
        &self.menu_items
    }

    pub fn menu_item(&self, id: &MenuItemId) -> Option<&RestaurantMenuItem> {
        self.menu_items.iter().find(|item| &item.id == id)
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Mean score, or `None` while unrated
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: u32 = self.ratings.iter().map(|r| u32::from(r.score)).sum();
        Some(f64::from(sum) / self.ratings.len() as f64)
    }

    pub(crate) fn push_menu_item(&mut self, item: RestaurantMenuItem) {
        self.menu_items.push(item);
    }

    pub(crate) fn push_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }
}
