use super::order::Order;
use crate::core::types::{Location, OrderId, RestaurantId, Role, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields shared by every kind of user
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub age: u8,
    pub email: String,
    pub mobile: String,
    pub password: String,
}

impl Profile {
    pub fn new(name: &str, age: u8, email: &str, mobile: &str, password: &str) -> Self {
        Self {
            id: UserId::new(),
            name: name.to_string(),
            age,
            email: email.to_string(),
            mobile: mobile.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub profile: Profile,
    pub location: Location,
    /// Finalised orders, oldest first
    order_history: Vec<OrderId>,
}

impl Customer {
    pub fn new(profile: Profile, location: Location) -> Self {
        Self {
            profile,
            location,
            order_history: Vec::new(),
        }
    }

    pub fn order_history(&self) -> &[OrderId] {
        &self.order_history
    }

    pub fn order_count(&self) -> usize {
        self.order_history.len()
    }

    pub(crate) fn add_to_purchase_history(&mut self, order: &Order) {
        self.order_history.push(order.id());
    }
}

/// Where a deliverer is in the delivery cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelivererStatus {
    Free,
    AcceptedOrder,
    ArrivedAtRestaurant,
    Enroute,
    Delivered,
}

impl DelivererStatus {
    /// The next stage; `Delivered` wraps back round to `Free`
    pub fn next(self) -> DelivererStatus {
        match self {
            DelivererStatus::Free => DelivererStatus::AcceptedOrder,
            DelivererStatus::AcceptedOrder => DelivererStatus::ArrivedAtRestaurant,
            DelivererStatus::ArrivedAtRestaurant => DelivererStatus::Enroute,
            DelivererStatus::Enroute => DelivererStatus::Delivered,
            DelivererStatus::Delivered => DelivererStatus::Free,
        }
    }
}

impl fmt::Display for DelivererStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Deliverer {
    pub profile: Profile,
    pub licence_plate: String,
    pub location: Location,
    status: DelivererStatus,
}

impl Deliverer {
    pub fn new(profile: Profile, licence_plate: &str) -> Self {
        Self {
            profile,
            licence_plate: licence_plate.to_string(),
            location: Location::default(),
            status: DelivererStatus::Free,
        }
    }

    pub fn status(&self) -> DelivererStatus {
        self.status
    }

    /// Move to the next stage of the delivery cycle
    pub fn advance_status(&mut self) -> DelivererStatus {
        self.status = self.status.next();
        self.status
    }
}

/// A restaurant owner
#[derive(Debug, Clone)]
pub struct Client {
    pub profile: Profile,
    pub location: Location,
    pub restaurant_id: RestaurantId,
}

impl Client {
    pub fn new(profile: Profile, location: Location, restaurant_id: RestaurantId) -> Self {
        Self {
            profile,
            location,
            restaurant_id,
        }
    }
}

/// A registered user, tagged by role
#[derive(Debug, Clone)]
pub enum User {
    Customer(Customer),
    Deliverer(Deliverer),
    Client(Client),
}

impl User {
    pub fn profile(&self) -> &Profile {
        match self {
            User::Customer(c) => &c.profile,
            User::Deliverer(d) => &d.profile,
            User::Client(c) => &c.profile,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.profile().id
    }

    pub fn role(&self) -> Role {
        match self {
            User::Customer(_) => Role::Customer,
            User::Deliverer(_) => Role::Deliverer,
            User::Client(_) => Role::Client,
        }
    }
}
