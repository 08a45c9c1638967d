use aribaeats::core::managers::SortOrder;
use aribaeats::core::models::{DelivererStatus, Profile, RestaurantStyle};
use aribaeats::core::platform::{ArrivalOutcome, CompletionOutcome, HandOverOutcome};
use aribaeats::core::types::{MenuItemId, RestaurantId, UserId};
use aribaeats::{AppConfig, AribaError, DispatchPolicy, Location, Money, OrderId, OrderStatus, Platform};

struct Fixture {
    platform: Platform,
    customer: UserId,
    deliverers: Vec<UserId>,
    restaurant: RestaurantId,
    chips: MenuItemId,
}

fn profile(name: &str, email: &str) -> Profile {
    Profile::new(name, 30, email, "0411111111", "Password1")
}

fn fixture(config: AppConfig) -> Fixture {
    let mut platform = Platform::new(&config);
    let customer = platform
        .register_customer(profile("Ann", "ann@test"), Location::new(4, 4))
        .unwrap();
    let deliverers = vec![
        platform.register_deliverer(profile("Dan", "dan@test"), "DAN 1").unwrap(),
        platform.register_deliverer(profile("Eve", "eve@test"), "EVE 2").unwrap(),
    ];
    let owner = platform
        .register_client(profile("Cat", "cat@test"), "Chippy", RestaurantStyle::Australian, Location::new(1, 1))
        .unwrap();
    let restaurant = platform.client_restaurant(&owner).unwrap().id.clone();
    let chips = platform
        .restaurants
        .add_menu_item(&restaurant, "Chips", Money::from_cents(1250))
        .unwrap()
        .id;

    Fixture {
        platform,
        customer,
        deliverers,
        restaurant,
        chips,
    }
}

fn place_order(f: &mut Fixture, quantity: u32) -> OrderId {
    let draft = f.platform.open_draft_order(&f.customer, &f.restaurant).unwrap();
    f.platform.add_to_order(draft, &f.chips, quantity).unwrap();
    f.platform.finalise_order(&f.customer, draft).unwrap()
}

#[test]
fn test_order_lifecycle_runs_to_delivered() {
    let mut f = fixture(AppConfig::default());
    let order_id = place_order(&mut f, 2);
    assert_eq!(f.platform.orders.order(order_id).unwrap().total(), Money::from_cents(2500));
    assert_eq!(f.platform.orders.order(order_id).unwrap().status(), OrderStatus::Ordered);

    let dan = f.deliverers[0].clone();
    f.platform.accept_delivery(&dan, order_id).unwrap();
    assert_eq!(f.platform.start_cooking(order_id).unwrap(), OrderStatus::Cooking);
    assert_eq!(f.platform.finish_cooking(order_id).unwrap(), OrderStatus::Cooked);
    assert!(matches!(
        f.platform.mark_arrived(&dan).unwrap(),
        ArrivalOutcome::Arrived {
            still_preparing: false,
            ..
        }
    ));
    assert_eq!(f.platform.hand_over(order_id).unwrap(), HandOverOutcome::PickedUp);
    assert_eq!(f.platform.complete_delivery(&dan).unwrap(), CompletionOutcome::Delivered(order_id));
    assert_eq!(f.platform.orders.order(order_id).unwrap().status(), OrderStatus::Delivered);
    assert_eq!(f.platform.users.deliverer(&dan).unwrap().status(), DelivererStatus::Free);
    assert!(f.platform.deliveries.is_available(&dan));

    let result = f.platform.orders.update_status_of_order(order_id);
    assert!(matches!(result, Err(AribaError::NoNextStatus(OrderStatus::Delivered))));
}

#[test]
fn test_deliverer_holds_one_order_at_a_time() {
    let mut f = fixture(AppConfig::default());
    let first = place_order(&mut f, 1);
    let second = place_order(&mut f, 1);
    let dan = f.deliverers[0].clone();
    let eve = f.deliverers[1].clone();

    f.platform.accept_delivery(&dan, first).unwrap();
    assert!(!f.platform.deliveries.is_available(&dan));
    assert!(matches!(
        f.platform.accept_delivery(&dan, second),
        Err(AribaError::DelivererBusy(_))
    ));

    let deliverable: Vec<OrderId> = f.platform.orders.all_deliverable_orders().iter().map(|o| o.id()).collect();
    assert_eq!(deliverable, vec![second]);

    f.platform.accept_delivery(&eve, second).unwrap();
    assert!(f.platform.orders.all_deliverable_orders().is_empty());
    assert_eq!(f.platform.deliveries.active_count(), 2);
}

#[test]
fn test_claimed_order_cannot_be_taken_by_another_deliverer() {
    let mut f = fixture(AppConfig::default());
    let order_id = place_order(&mut f, 1);
    let dan = f.deliverers[0].clone();
    let eve = f.deliverers[1].clone();

    f.platform.accept_delivery(&dan, order_id).unwrap();
    assert!(matches!(
        f.platform.accept_delivery(&eve, order_id),
        Err(AribaError::OrderAlreadyAssigned(id)) if id == order_id
    ));

    assert_eq!(f.platform.orders.order(order_id).unwrap().deliverer_id(), Some(&dan));
    assert_eq!(f.platform.deliveries.assigned_order(&dan), Some(order_id));
    assert!(f.platform.deliveries.is_available(&eve));
    assert_eq!(
        f.platform.users.deliverer(&eve).unwrap().status(),
        DelivererStatus::Free
    );
}

#[test]
fn test_early_assignment_lists_every_unclaimed_placed_order() {
    let mut f = fixture(AppConfig::default());
    let ordered = place_order(&mut f, 1);
    let cooking = place_order(&mut f, 1);
    let cooked = place_order(&mut f, 1);
    let claimed = place_order(&mut f, 1);
    let draft = f.platform.open_draft_order(&f.customer, &f.restaurant).unwrap();

    f.platform.start_cooking(cooking).unwrap();
    for id in [cooked, claimed] {
        f.platform.start_cooking(id).unwrap();
        f.platform.finish_cooking(id).unwrap();
    }
    let dan = f.deliverers[0].clone();
    f.platform.accept_delivery(&dan, claimed).unwrap();

    let deliverable: Vec<OrderId> = f.platform.orders.all_deliverable_orders().iter().map(|o| o.id()).collect();
    assert_eq!(deliverable, vec![ordered, cooking, cooked]);
    assert!(!deliverable.contains(&claimed));
    assert!(!deliverable.contains(&draft));
    assert_eq!(f.platform.orders.order(claimed).unwrap().status(), OrderStatus::Cooked);
}

#[test]
fn test_cooked_only_dispatch_rejects_early_claims() {
    let mut f = fixture(AppConfig::default().with_dispatch_policy(DispatchPolicy::CookedOnly));
    let order_id = place_order(&mut f, 1);
    let dan = f.deliverers[0].clone();

    assert!(matches!(
        f.platform.accept_delivery(&dan, order_id),
        Err(AribaError::OrderNotDeliverable(_))
    ));
    assert!(f.platform.deliveries.is_available(&dan));

    f.platform.start_cooking(order_id).unwrap();
    f.platform.finish_cooking(order_id).unwrap();
    f.platform.accept_delivery(&dan, order_id).unwrap();
    assert!(f.platform.orders.all_deliverable_orders().is_empty());
}

#[test]
fn test_cooked_only_dispatch_hides_uncooked_orders() {
    let mut f = fixture(AppConfig::default().with_dispatch_policy(DispatchPolicy::CookedOnly));
    let order_id = place_order(&mut f, 1);
    assert!(f.platform.orders.all_deliverable_orders().is_empty());

    f.platform.start_cooking(order_id).unwrap();
    f.platform.finish_cooking(order_id).unwrap();
    assert_eq!(f.platform.orders.all_deliverable_orders().len(), 1);
}

#[test]
fn test_arrival_and_completion_guards() {
    let mut f = fixture(AppConfig::default());
    let dan = f.deliverers[0].clone();
    assert_eq!(f.platform.mark_arrived(&dan).unwrap(), ArrivalOutcome::NoOrder);
    assert_eq!(f.platform.complete_delivery(&dan).unwrap(), CompletionOutcome::NoOrder);

    let order_id = place_order(&mut f, 1);
    f.platform.accept_delivery(&dan, order_id).unwrap();
    assert_eq!(f.platform.complete_delivery(&dan).unwrap(), CompletionOutcome::NotPickedUp);
    assert_eq!(f.platform.hand_over(order_id).unwrap(), HandOverOutcome::NotCooked);

    f.platform.start_cooking(order_id).unwrap();
    f.platform.finish_cooking(order_id).unwrap();
    assert_eq!(f.platform.hand_over(order_id).unwrap(), HandOverOutcome::DelivererNotArrived);
    assert_eq!(
        f.platform.users.deliverer(&dan).unwrap().status(),
        DelivererStatus::AcceptedOrder
    );
}

#[test]
fn test_duplicate_email_is_rejected_for_every_role() {
    let mut f = fixture(AppConfig::default());
    let users_before = f.platform.users.user_count();

    let customer = f.platform.register_customer(profile("Copy", "ann@test"), Location::new(0, 0));
    let deliverer = f.platform.register_deliverer(profile("Copy", "dan@test"), "COPY");
    assert!(matches!(customer, Err(AribaError::EmailInUse(_))));
    assert!(matches!(deliverer, Err(AribaError::EmailInUse(_))));
    assert_eq!(f.platform.users.user_count(), users_before);
}

#[test]
fn test_restaurants_sorted_by_distance() {
    let mut f = fixture(AppConfig::default());
    f.platform
        .register_client(profile("Bo", "bo@test"), "Near", RestaurantStyle::French, Location::new(4, 5))
        .unwrap();

    let from = Location::new(4, 4);
    let names: Vec<&str> = f
        .platform
        .restaurants
        .sorted(SortOrder::Distance, &from)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Near", "Chippy"]);
}

#[test]
fn test_cancelled_draft_never_reaches_history() {
    let mut f = fixture(AppConfig::default());
    let draft = f.platform.open_draft_order(&f.customer, &f.restaurant).unwrap();
    assert!(f.platform.orders.cancel_order(draft).is_some());

    let placed = place_order(&mut f, 1);
    assert!(placed > draft);
    assert_eq!(f.platform.users.customer(&f.customer).unwrap().order_history(), &[placed]);
    assert_eq!(f.platform.orders.total_spent(&f.customer), Money::from_cents(1250));
}
