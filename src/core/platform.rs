//! The platform aggregate
//!
//! `Platform` owns the four managers as separate fields so a workflow can
//! hold a deliverer and an order mutably at the same time. Every operation
//! that touches more than one manager lives here.

use super::config::AppConfig;
use super::errors::{AribaError, Result};
use super::managers::{DelivererManager, OrderManager, RestaurantManager, UserManager};
use super::models::{
    Client, Customer, Deliverer, DelivererStatus, Order, OrderStatus, Profile, Restaurant, RestaurantMenuItem,
    RestaurantStyle, User,
};
use super::types::{Location, MenuItemId, OrderId, RestaurantId, UserId};

/// What happened when a deliverer reported arriving at the restaurant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrivalOutcome {
    NoOrder,
    AlreadyPickedUp,
    AlreadyArrived,
    Arrived { order_id: OrderId, still_preparing: bool },
}

/// Result of a restaurant handing an order to its deliverer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOverOutcome {
    NotCooked,
    DelivererNotArrived,
    PickedUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    NoOrder,
    NotPickedUp,
    Delivered(OrderId),
}

/// Owns all in-memory state for one run
pub struct Platform {
    pub users: UserManager,
    pub restaurants: RestaurantManager,
    pub orders: OrderManager,
    pub deliveries: DelivererManager,
}

impl Platform {
    pub fn new(config: &AppConfig) -> Self {
        log::debug!("[Platform] Starting with dispatch policy {:?}", config.dispatch_policy);
        Self {
            users: UserManager::new(),
            restaurants: RestaurantManager::new(),
            orders: OrderManager::new(config.dispatch_policy),
            deliveries: DelivererManager::new(),
        }
    }

    pub fn register_customer(&mut self, profile: Profile, location: Location) -> Result<UserId> {
        let id = profile.id.clone();
        self.users.add_user(User::Customer(Customer::new(profile, location)))?;
        Ok(id)
    }

    pub fn register_deliverer(&mut self, profile: Profile, licence_plate: &str) -> Result<UserId> {
        let id = profile.id.clone();
        self.users.add_user(User::Deliverer(Deliverer::new(profile, licence_plate)))?;
        Ok(id)
    }

    /// Register a restaurant owner together with their restaurant.
    /// The restaurant is only created once the owner is accepted.
    pub fn register_client(
        &mut self,
        profile: Profile,
        restaurant_name: &str,
        style: RestaurantStyle,
        location: Location,
    ) -> Result<UserId> {
        let id = profile.id.clone();
        let restaurant = Restaurant::new(id.clone(), restaurant_name, style, location);
        let client = Client::new(profile, location, restaurant.id.clone());

        self.users.add_user(User::Client(client))?;
        self.restaurants.add_restaurant(restaurant);
        Ok(id)
    }

    /// The restaurant owned by a client
    pub fn client_restaurant(&self, client_id: &UserId) -> Result<&Restaurant> {
        let client = self.users.client(client_id)?;
        self.restaurants.restaurant(&client.restaurant_id)
    }

    pub fn customer_summary(&self, customer_id: &UserId) -> Result<String> {
        let customer = self.users.customer(customer_id)?;
        Ok(format!(
            "You've made {} order(s) and spent a total of {} here.",
            customer.order_count(),
            self.orders.total_spent(customer_id)
        ))
    }

    pub fn open_draft_order(&mut self, customer_id: &UserId, restaurant_id: &RestaurantId) -> Result<OrderId> {
        let customer = self.users.customer(customer_id)?;
        let restaurant = self.restaurants.restaurant(restaurant_id)?;
        Ok(self.orders.create_draft_order(customer, restaurant))
    }

    /// Add `quantity` of a menu item from the order's own restaurant
    pub fn add_to_order(&mut self, order_id: OrderId, item_id: &MenuItemId, quantity: u32) -> Result<RestaurantMenuItem> {
        let restaurant_id = self.orders.order(order_id)?.restaurant_id().clone();
        let item = self.restaurants.menu_item(&restaurant_id, item_id)?.clone();
        self.orders.order_mut(order_id)?.add_item(item.clone(), quantity);
        Ok(item)
    }

    pub fn finalise_order(&mut self, customer_id: &UserId, order_id: OrderId) -> Result<OrderId> {
        let customer = self.users.customer_mut(customer_id)?;
        self.orders.finalise_order(order_id, customer)
    }

    /// Deliverer to restaurant plus restaurant to customer
    pub fn delivery_distance(&self, from: &Location, order: &Order) -> Result<u64> {
        let restaurant = self.restaurants.restaurant(order.restaurant_id())?;
        let customer = self.users.customer(order.customer_id())?;
        Ok(from.distance_to(&restaurant.location) + restaurant.location.distance_to(&customer.location))
    }

    /// Claim an unassigned order that the dispatch policy currently offers
    pub fn accept_delivery(&mut self, deliverer_id: &UserId, order_id: OrderId) -> Result<()> {
        let order = self.orders.order(order_id)?;
        if order.deliverer_id().is_some() {
            return Err(AribaError::OrderAlreadyAssigned(order_id));
        }
        if !self.orders.is_deliverable(order) {
            return Err(AribaError::OrderNotDeliverable(order_id));
        }

        let deliverer = self.users.deliverer_mut(deliverer_id)?;
        let order = self.orders.order_mut(order_id)?;
        self.deliveries.accept_delivery(deliverer, order)
    }

    pub fn mark_arrived(&mut self, deliverer_id: &UserId) -> Result<ArrivalOutcome> {
        let Some(order_id) = self.deliveries.assigned_order(deliverer_id) else {
            return Ok(ArrivalOutcome::NoOrder);
        };
        let status = self.orders.order(order_id)?.status();
        if matches!(status, OrderStatus::PickedUp | OrderStatus::Delivered) {
            return Ok(ArrivalOutcome::AlreadyPickedUp);
        }

        let deliverer = self.users.deliverer_mut(deliverer_id)?;
        if deliverer.status() == DelivererStatus::ArrivedAtRestaurant {
            return Ok(ArrivalOutcome::AlreadyArrived);
        }
        deliverer.advance_status();
        log::info!("[Platform] {} arrived to collect order #{}", deliverer.profile.name, order_id);

        Ok(ArrivalOutcome::Arrived {
            order_id,
            still_preparing: matches!(status, OrderStatus::Ordered | OrderStatus::Cooking),
        })
    }

    /// Ordered -> Cooking. Any other status is `WrongStatus`.
    pub fn start_cooking(&mut self, order_id: OrderId) -> Result<OrderStatus> {
        self.orders.advance_from(order_id, OrderStatus::Ordered)
    }

    /// Cooking -> Cooked. Any other status is `WrongStatus`.
    pub fn finish_cooking(&mut self, order_id: OrderId) -> Result<OrderStatus> {
        self.orders.advance_from(order_id, OrderStatus::Cooking)
    }

    /// Orders of a restaurant whose deliverer is waiting at the counter
    pub fn arrived_deliveries(&self, restaurant_id: &RestaurantId) -> Vec<(&Order, &Deliverer)> {
        self.orders
            .assigned_orders(restaurant_id)
            .into_iter()
            .filter(|order| order.status() != OrderStatus::PickedUp)
            .filter_map(|order| {
                let deliverer = self.users.deliverer(order.deliverer_id()?).ok()?;
                (deliverer.status() == DelivererStatus::ArrivedAtRestaurant).then_some((order, deliverer))
            })
            .collect()
    }

    /// The restaurant gives a cooked order to the deliverer waiting for it
    pub fn hand_over(&mut self, order_id: OrderId) -> Result<HandOverOutcome> {
        let order = self.orders.order(order_id)?;
        if order.status() != OrderStatus::Cooked {
            return Ok(HandOverOutcome::NotCooked);
        }
        let Some(deliverer_id) = order.deliverer_id().cloned() else {
            return Ok(HandOverOutcome::DelivererNotArrived);
        };
        if self.users.deliverer(&deliverer_id)?.status() != DelivererStatus::ArrivedAtRestaurant {
            return Ok(HandOverOutcome::DelivererNotArrived);
        }

        self.orders.update_status_of_order(order_id)?;
        self.users.deliverer_mut(&deliverer_id)?.advance_status();
        Ok(HandOverOutcome::PickedUp)
    }

    pub fn complete_delivery(&mut self, deliverer_id: &UserId) -> Result<CompletionOutcome> {
        let Some(order_id) = self.deliveries.assigned_order(deliverer_id) else {
            return Ok(CompletionOutcome::NoOrder);
        };
        if self.orders.order(order_id)?.status() != OrderStatus::PickedUp {
            return Ok(CompletionOutcome::NotPickedUp);
        }

        self.orders.update_status_of_order(order_id)?;
        let deliverer = self.users.deliverer_mut(deliverer_id)?;
        deliverer.advance_status();
        self.deliveries.remove_order_assignment(deliverer);
        Ok(CompletionOutcome::Delivered(order_id))
    }

    pub fn current_delivery_status(&self, deliverer_id: &UserId) -> String {
        self.deliveries
            .current_delivery_status(deliverer_id, &self.orders, &self.restaurants, &self.users)
    }

    /// Delivered orders the customer has not rated yet
    pub fn ratable_orders(&self, customer_id: &UserId) -> Vec<&Order> {
        self.orders
            .orders_for_customer(customer_id)
            .into_iter()
            .filter(|order| order.status() == OrderStatus::Delivered)
            .filter(|order| !self.restaurants.has_rating_for_order(order.id()))
            .collect()
    }

    /// Attach a customer's rating to the restaurant an order came from
    pub fn rate_order(&mut self, customer_id: &UserId, order_id: OrderId, score: u8, comment: &str) -> Result<()> {
        let customer_name = self.users.customer(customer_id)?.profile.name.clone();
        let order = self.orders.order(order_id)?;
        if order.customer_id() != customer_id {
            return Err(AribaError::OrderNotFound(order_id));
        }
        let restaurant_id = order.restaurant_id().clone();
        self.restaurants
            .add_rating(&restaurant_id, order_id, &customer_name, score, comment)
    }
}
