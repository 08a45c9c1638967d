use super::types::{RestaurantId, Role, UserId};
use uuid::Uuid;

/// State belonging to one logged-in user, passed explicitly to whatever needs it
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: Uuid,
    user_id: UserId,
    role: Role,
    /// Restaurant the customer is currently ordering from
    visited_restaurant: Option<RestaurantId>,
}

impl Session {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            visited_restaurant: None,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn visited_restaurant(&self) -> Option<&RestaurantId> {
        self.visited_restaurant.as_ref()
    }

    /// Record a restaurant visit, returning whether it differs from the last one
    pub fn visit_restaurant(&mut self, restaurant_id: &RestaurantId) -> bool {
        if self.visited_restaurant.as_ref() == Some(restaurant_id) {
            return false;
        }
        self.visited_restaurant = Some(restaurant_id.clone());
        true
    }
}
