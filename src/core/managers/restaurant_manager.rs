use crate::core::errors::{AribaError, Result};
use crate::core::models::{Rating, Restaurant, RestaurantMenuItem, RestaurantStyle};
use crate::core::types::{Location, MenuItemId, Money, OrderId, RestaurantId};
use std::cmp::Ordering;
use uuid::Uuid;

/// How the customer wants the restaurant list ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Alphabetical,
    Distance,
    Style,
    Rating,
}

/// Registry of restaurants with their menus and reviews
pub struct RestaurantManager {
    restaurants: Vec<Restaurant>,
}

impl RestaurantManager {
    pub fn new() -> Self {
        Self {
            restaurants: Vec::new(),
        }
    }

    pub fn add_restaurant(&mut self, restaurant: Restaurant) {
        log::info!("[RestaurantManager] Added restaurant {} ({})", restaurant.name, restaurant.id);
        self.restaurants.push(restaurant);
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn restaurant(&self, id: &RestaurantId) -> Result<&Restaurant> {
        self.restaurants
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| AribaError::RestaurantNotFound(id.clone()))
    }

    fn restaurant_mut(&mut self, id: &RestaurantId) -> Result<&mut Restaurant> {
        self.restaurants
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| AribaError::RestaurantNotFound(id.clone()))
    }

    /// Add an item to a restaurant's menu
    pub fn add_menu_item(&mut self, restaurant_id: &RestaurantId, name: &str, price: Money) -> Result<RestaurantMenuItem> {
        let restaurant = self.restaurant_mut(restaurant_id)?;
        let item = RestaurantMenuItem::new(name, price);
        restaurant.push_menu_item(item.clone());
        log::info!("[RestaurantManager] {} added {} at {}", restaurant.name, item.name, item.price);
        Ok(item)
    }

    pub fn menu_item(&self, restaurant_id: &RestaurantId, item_id: &MenuItemId) -> Result<&RestaurantMenuItem> {
        self.restaurant(restaurant_id)?
            .menu_item(item_id)
            .ok_or_else(|| AribaError::MenuItemNotFound(item_id.clone()))
    }

    pub fn reviews(&self, restaurant_id: &RestaurantId) -> Result<&[Rating]> {
        Ok(self.restaurant(restaurant_id)?.ratings())
    }

    /// Attach a review to a restaurant
    pub fn add_rating(
        &mut self,
        restaurant_id: &RestaurantId,
        order_id: OrderId,
        customer_name: &str,
        score: u8,
        comment: &str,
    ) -> Result<()> {
        let restaurant = self.restaurant_mut(restaurant_id)?;
        restaurant.push_rating(Rating {
            id: Uuid::new_v4(),
            score,
            customer_name: customer_name.to_string(),
            comment: comment.to_string(),
            order_id,
            restaurant_id: restaurant_id.clone(),
        });
        log::info!("[RestaurantManager] {} rated {} for order #{}", restaurant.name, score, order_id);
        Ok(())
    }

    /// Whether any restaurant already holds a rating for this order
    pub fn has_rating_for_order(&self, order_id: OrderId) -> bool {
        self.restaurants
            .iter()
            .flat_map(|r| r.ratings())
            .any(|rating| rating.order_id == order_id)
    }

    /// All restaurants in the requested order, with name as the tie-breaker
    pub fn sorted(&self, order: SortOrder, from: &Location) -> Vec<&Restaurant> {
        let mut sorted: Vec<&Restaurant> = self.restaurants.iter().collect();
        sorted.sort_by(|a, b| {
            let primary = match order {
                SortOrder::Alphabetical => Ordering::Equal,
                SortOrder::Distance => from.distance_to(&a.location).cmp(&from.distance_to(&b.location)),
                SortOrder::Style => style_rank(a.style).cmp(&style_rank(b.style)),
                SortOrder::Rating => compare_ratings(a.average_rating(), b.average_rating()),
            };
            primary.then_with(|| a.name.cmp(&b.name))
        });
        sorted
    }
}

fn style_rank(style: RestaurantStyle) -> usize {
    RestaurantStyle::ALL
        .iter()
        .position(|s| *s == style)
        .unwrap_or(RestaurantStyle::ALL.len())
}

/// Rated before unrated, then highest average first
fn compare_ratings(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Default for RestaurantManager {
    fn default() -> Self {
        Self::new()
    }
}
