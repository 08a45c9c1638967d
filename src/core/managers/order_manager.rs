use super::restaurant_manager::RestaurantManager;
use super::user_manager::UserManager;
use crate::core::config::DispatchPolicy;
use crate::core::errors::{AribaError, Result};
use crate::core::models::{Customer, Order, OrderStatus, Restaurant};
use crate::core::types::{Money, OrderId, RestaurantId, UserId};

/// Owns every order in the system and drives the status state machine.
///
/// Restaurant-side views (ready to cook, cooking, assigned) are computed by
/// filtering this single list, so an order's status lives in one place only.
pub struct OrderManager {
    /// All orders, drafts included, in creation order
    orders: Vec<Order>,
    /// Last allocated order number
    last_id: OrderId,
    dispatch_policy: DispatchPolicy,
}

impl OrderManager {
    pub fn new(dispatch_policy: DispatchPolicy) -> Self {
        Self {
            orders: Vec::new(),
            last_id: 0,
            dispatch_policy,
        }
    }

    /// Open a draft order and record it immediately
    pub fn create_draft_order(&mut self, customer: &Customer, restaurant: &Restaurant) -> OrderId {
        self.last_id += 1;
        let order = Order::new(self.last_id, customer.profile.id.clone(), restaurant.id.clone());
        log::debug!(
            "[OrderManager] Draft order #{} for {} at {}",
            order.id(),
            customer.profile.name,
            restaurant.name
        );
        self.orders.push(order);
        self.last_id
    }

    /// Confirm a draft: advance it to `Ordered` and add it to the customer's history.
    /// Returns the id of the finalised order. Only drafts can be finalised.
    pub fn finalise_order(&mut self, draft_id: OrderId, customer: &mut Customer) -> Result<OrderId> {
        let order = self.order_mut(draft_id)?;
        expect_status(order, OrderStatus::Draft)?;
        let status = advance(order)?;
        customer.add_to_purchase_history(order);
        log::info!("[OrderManager] Order #{} placed by {} ({})", draft_id, customer.profile.name, status);
        Ok(draft_id)
    }

    /// Advance an order exactly one step. Fails if the order is already delivered.
    pub fn update_status_of_order(&mut self, order_id: OrderId) -> Result<OrderStatus> {
        let order = self.order_mut(order_id)?;
        advance(order)
    }

    /// Advance an order one step, but only from `expected`
    pub fn advance_from(&mut self, order_id: OrderId, expected: OrderStatus) -> Result<OrderStatus> {
        let order = self.order_mut(order_id)?;
        expect_status(order, expected)?;
        advance(order)
    }

    /// Discard an order entirely
    pub fn cancel_order(&mut self, draft_id: OrderId) -> Option<Order> {
        let index = self.orders.iter().position(|o| o.id() == draft_id)?;
        log::info!("[OrderManager] Order #{} cancelled", draft_id);
        Some(self.orders.remove(index))
    }

    pub fn order(&self, order_id: OrderId) -> Result<&Order> {
        self.orders
            .iter()
            .find(|o| o.id() == order_id)
            .ok_or(AribaError::OrderNotFound(order_id))
    }

    pub fn order_mut(&mut self, order_id: OrderId) -> Result<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id() == order_id)
            .ok_or(AribaError::OrderNotFound(order_id))
    }

    /// Orders in a given status for one restaurant, lowest id first
    pub fn orders_for_restaurant(&self, restaurant_id: &RestaurantId, status: OrderStatus) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.restaurant_id() == restaurant_id && o.status() == status)
            .collect()
    }

    pub fn orders_ready_for_cooking(&self, restaurant_id: &RestaurantId) -> Vec<&Order> {
        self.orders_for_restaurant(restaurant_id, OrderStatus::Ordered)
    }

    /// Placed orders a restaurant still has to deal with
    pub fn current_orders(&self, restaurant_id: &RestaurantId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.restaurant_id() == restaurant_id)
            .filter(|o| matches!(o.status(), OrderStatus::Ordered | OrderStatus::Cooking | OrderStatus::Cooked))
            .collect()
    }

    /// Unassigned orders a deliverer may claim under the configured policy
    pub fn all_deliverable_orders(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| self.is_deliverable(o))
            .collect()
    }

    /// Unassigned, and in a status the dispatch policy lets deliverers claim
    pub fn is_deliverable(&self, order: &Order) -> bool {
        order.deliverer_id().is_none() && self.is_deliverable_status(order.status())
    }

    fn is_deliverable_status(&self, status: OrderStatus) -> bool {
        match self.dispatch_policy {
            DispatchPolicy::EarlyAssignment => {
                matches!(status, OrderStatus::Ordered | OrderStatus::Cooking | OrderStatus::Cooked)
            }
            DispatchPolicy::CookedOnly => status == OrderStatus::Cooked,
        }
    }

    /// Orders of a restaurant that a deliverer has claimed but not yet delivered
    pub fn assigned_orders(&self, restaurant_id: &RestaurantId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.restaurant_id() == restaurant_id && o.deliverer_id().is_some())
            .filter(|o| o.status() != OrderStatus::Delivered)
            .collect()
    }

    /// A customer's placed orders, oldest first
    pub fn orders_for_customer(&self, customer_id: &UserId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.customer_id() == customer_id && o.status() != OrderStatus::Draft)
            .collect()
    }

    /// Sum of every placed order's total for a customer
    pub fn total_spent(&self, customer_id: &UserId) -> Money {
        self.orders_for_customer(customer_id).iter().map(|o| o.total()).sum()
    }

    /// Human-readable status blocks for each of a customer's placed orders
    pub fn order_statuses(
        &self,
        customer_id: &UserId,
        restaurants: &RestaurantManager,
        users: &UserManager,
    ) -> Vec<String> {
        self.orders_for_customer(customer_id)
            .into_iter()
            .map(|order| {
                let restaurant_name = restaurants
                    .restaurant(order.restaurant_id())
                    .map(|r| r.name.as_str())
                    .unwrap_or("Unknown Restaurant");

                let mut block = format!("Order #{} from {}: {}\n", order.id(), restaurant_name, order.status());
                if order.status() == OrderStatus::Delivered {
                    if let Some(deliverer) = order.deliverer_id().and_then(|id| users.deliverer(id).ok()) {
                        block.push_str(&format!(
                            "This order was delivered by {} (licence plate: {})\n",
                            deliverer.profile.name, deliverer.licence_plate
                        ));
                    }
                }
                for (item, quantity) in order.grouped_items() {
                    block.push_str(&format!("{} x {}\n", quantity, item.name));
                }
                block
            })
            .collect()
    }

    /// Number of orders currently held, drafts included
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

fn expect_status(order: &Order, expected: OrderStatus) -> Result<()> {
    if order.status() != expected {
        return Err(AribaError::WrongStatus {
            order_id: order.id(),
            expected,
            actual: order.status(),
        });
    }
    Ok(())
}

fn advance(order: &mut Order) -> Result<OrderStatus> {
    let from = order.status();
    let to = order.advance_status().ok_or(AribaError::NoNextStatus(from))?;
    log::info!("[OrderManager] Order #{} advanced {} -> {}", order.id(), from, to);
    Ok(to)
}

impl Default for OrderManager {
    fn default() -> Self {
        Self::new(DispatchPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Profile, RestaurantMenuItem, RestaurantStyle};
    use crate::core::types::Location;

    fn fixtures() -> (Customer, Restaurant) {
        let customer = Customer::new(Profile::new("Ann", 30, "a@x", "0400000000", "Password1"), Location::new(0, 0));
        let restaurant = Restaurant::new(UserId::new(), "Diner", RestaurantStyle::American, Location::new(2, 2));
        (customer, restaurant)
    }

    #[test]
    fn test_ids_are_monotonic_even_after_cancel() {
        let (customer, restaurant) = fixtures();
        let mut orders = OrderManager::default();

        let first = orders.create_draft_order(&customer, &restaurant);
        let second = orders.create_draft_order(&customer, &restaurant);
        assert_eq!((first, second), (1, 2));

        assert!(orders.cancel_order(first).is_some());
        let third = orders.create_draft_order(&customer, &restaurant);
        assert_eq!(third, 3);
        assert_eq!(orders.order_count(), 2);
    }

    #[test]
    fn test_draft_is_recorded_immediately() {
        let (customer, restaurant) = fixtures();
        let mut orders = OrderManager::default();
        let id = orders.create_draft_order(&customer, &restaurant);

        assert_eq!(orders.order(id).unwrap().status(), OrderStatus::Draft);
        assert!(orders.orders_for_customer(&customer.profile.id).is_empty());
    }

    #[test]
    fn test_finalise_adds_to_history() {
        let (mut customer, restaurant) = fixtures();
        let mut orders = OrderManager::default();
        let id = orders.create_draft_order(&customer, &restaurant);
        orders
            .order_mut(id)
            .unwrap()
            .add_item(RestaurantMenuItem::new("Fries", Money::from_cents(300)), 3);

        assert_eq!(orders.finalise_order(id, &mut customer).unwrap(), id);
        assert_eq!(customer.order_history(), &[id]);
        assert_eq!(orders.order(id).unwrap().status(), OrderStatus::Ordered);
        assert_eq!(orders.total_spent(&customer.profile.id), Money::from_cents(900));
    }

    #[test]
    fn test_finalise_twice_is_rejected() {
        let (mut customer, restaurant) = fixtures();
        let mut orders = OrderManager::default();
        let id = orders.create_draft_order(&customer, &restaurant);
        orders.finalise_order(id, &mut customer).unwrap();

        let again = orders.finalise_order(id, &mut customer);
        assert!(matches!(
            again,
            Err(AribaError::WrongStatus {
                expected: OrderStatus::Draft,
                actual: OrderStatus::Ordered,
                ..
            })
        ));
        assert_eq!(orders.order(id).unwrap().status(), OrderStatus::Ordered);
        assert_eq!(customer.order_history(), &[id]);
    }

    #[test]
    fn test_advance_from_checks_source_status() {
        let (mut customer, restaurant) = fixtures();
        let mut orders = OrderManager::default();
        let id = orders.create_draft_order(&customer, &restaurant);
        orders.finalise_order(id, &mut customer).unwrap();

        assert!(matches!(
            orders.advance_from(id, OrderStatus::Cooking),
            Err(AribaError::WrongStatus { .. })
        ));
        assert_eq!(orders.advance_from(id, OrderStatus::Ordered).unwrap(), OrderStatus::Cooking);
    }

    #[test]
    fn test_cooked_only_policy() {
        let (mut customer, restaurant) = fixtures();
        let mut orders = OrderManager::new(DispatchPolicy::CookedOnly);
        let id = orders.create_draft_order(&customer, &restaurant);
        orders.finalise_order(id, &mut customer).unwrap();
        assert!(orders.all_deliverable_orders().is_empty());

        orders.update_status_of_order(id).unwrap();
        assert!(orders.all_deliverable_orders().is_empty());
        orders.update_status_of_order(id).unwrap();
        assert_eq!(orders.all_deliverable_orders().len(), 1);
    }

    #[test]
    fn test_cancel_unknown_order_is_none() {
        let mut orders = OrderManager::default();
        assert!(orders.cancel_order(42).is_none());
        assert!(matches!(orders.update_status_of_order(42), Err(AribaError::OrderNotFound(42))));
    }
}
