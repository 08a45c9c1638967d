use super::order_manager::OrderManager;
use super::restaurant_manager::RestaurantManager;
use super::user_manager::UserManager;
use crate::core::errors::{AribaError, Result};
use crate::core::models::{Deliverer, DelivererStatus, Order};
use crate::core::types::{OrderId, UserId};
use std::collections::HashMap;

/// Tracks which order each deliverer is carrying.
///
/// This map is the only record of an active assignment; a deliverer appears in
/// it at most once.
pub struct DelivererManager {
    assignments: HashMap<UserId, OrderId>,
}

impl DelivererManager {
    pub fn new() -> Self {
        Self {
            assignments: HashMap::new(),
        }
    }

    /// Assign an order to a free deliverer
    pub fn accept_delivery(&mut self, deliverer: &mut Deliverer, order: &mut Order) -> Result<()> {
        let deliverer_id = deliverer.profile.id.clone();
        if self.assignments.contains_key(&deliverer_id) {
            log::warn!("[DelivererManager] {} tried to accept order #{} while busy", deliverer.profile.name, order.id());
            return Err(AribaError::DelivererBusy(deliverer_id));
        }

        reset_to_free(deliverer);
        self.assignments.insert(deliverer_id.clone(), order.id());
        order.assign_deliverer(deliverer_id);
        deliverer.advance_status();

        log::info!(
            "[DelivererManager] {} accepted order #{} ({})",
            deliverer.profile.name,
            order.id(),
            deliverer.status()
        );
        Ok(())
    }

    pub fn is_available(&self, deliverer_id: &UserId) -> bool {
        !self.assignments.contains_key(deliverer_id)
    }

    pub fn assigned_order(&self, deliverer_id: &UserId) -> Option<OrderId> {
        self.assignments.get(deliverer_id).copied()
    }

    /// Drop the deliverer's assignment and cycle their status round to `Free`
    pub fn remove_order_assignment(&mut self, deliverer: &mut Deliverer) -> Option<OrderId> {
        let removed = self.assignments.remove(&deliverer.profile.id);
        reset_to_free(deliverer);
        if let Some(order_id) = removed {
            log::info!("[DelivererManager] {} released order #{}", deliverer.profile.name, order_id);
        }
        removed
    }

    /// Number of deliverers currently carrying an order
    pub fn active_count(&self) -> usize {
        self.assignments.len()
    }

    /// Two-line summary of the deliverer's active delivery, or an empty string
    pub fn current_delivery_status(
        &self,
        deliverer_id: &UserId,
        orders: &OrderManager,
        restaurants: &RestaurantManager,
        users: &UserManager,
    ) -> String {
        let Some(order) = self.assigned_order(deliverer_id).and_then(|id| orders.order(id).ok()) else {
            return String::new();
        };
        let (Ok(restaurant), Ok(customer)) = (
            restaurants.restaurant(order.restaurant_id()),
            users.customer(order.customer_id()),
        ) else {
            return String::new();
        };

        format!(
            "Current delivery: Order #{} from {} at {}.\nTo be delivered to {} at {}.",
            order.id(),
            restaurant.name,
            restaurant.location,
            customer.profile.name,
            customer.location
        )
    }
}

fn reset_to_free(deliverer: &mut Deliverer) {
    while deliverer.status() != DelivererStatus::Free {
        deliverer.advance_status();
    }
}

impl Default for DelivererManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{OrderStatus, Profile};
    use crate::core::types::RestaurantId;

    fn deliverer() -> Deliverer {
        Deliverer::new(Profile::new("Dan", 30, "dan@x", "0400000000", "Password1"), "DAN 1")
    }

    #[test]
    fn test_accept_then_release_restores_availability() {
        let mut manager = DelivererManager::new();
        let mut dan = deliverer();
        let mut order = Order::new(1, UserId::new(), RestaurantId::new());

        manager.accept_delivery(&mut dan, &mut order).unwrap();
        assert!(!manager.is_available(&dan.profile.id));
        assert_eq!(dan.status(), DelivererStatus::AcceptedOrder);
        assert_eq!(order.deliverer_id(), Some(&dan.profile.id));
        assert_eq!(manager.assigned_order(&dan.profile.id), Some(1));

        assert_eq!(manager.remove_order_assignment(&mut dan), Some(1));
        assert!(manager.is_available(&dan.profile.id));
        assert_eq!(dan.status(), DelivererStatus::Free);
    }

    #[test]
    fn test_busy_deliverer_cannot_accept_twice() {
        let mut manager = DelivererManager::new();
        let mut dan = deliverer();
        let mut first = Order::new(1, UserId::new(), RestaurantId::new());
        let mut second = Order::new(2, UserId::new(), RestaurantId::new());

        manager.accept_delivery(&mut dan, &mut first).unwrap();
        let result = manager.accept_delivery(&mut dan, &mut second);
        assert!(matches!(result, Err(AribaError::DelivererBusy(_))));
        assert!(second.deliverer_id().is_none());
        assert_eq!(second.status(), OrderStatus::Draft);
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn test_release_without_assignment_is_none() {
        let mut manager = DelivererManager::new();
        let mut dan = deliverer();
        assert_eq!(manager.remove_order_assignment(&mut dan), None);
        assert_eq!(dan.status(), DelivererStatus::Free);
    }
}
