//! Every screen of the console front end and the menu it shows.
//!
//! Menus are rebuilt from the platform each time they are displayed, so a
//! screen only needs to carry the ids it was opened for.

use super::menu::{Menu, TableLayout};
use crate::core::errors::{AribaError, Result};
use crate::core::managers::SortOrder;
use crate::core::models::{Order, OrderStatus};
use crate::core::platform::Platform;
use crate::core::session::Session;
use crate::core::types::{MenuItemId, OrderId, RestaurantId, Role, UserId};

const MAIN_MENU_TITLE: &str = "Please make a choice from the menu below:";
const BACK: &str = "Return to the previous menu";

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    Registration,
    CustomerHome,
    RestaurantSort,
    RestaurantList(SortOrder),
    OrderProcessing(RestaurantId),
    RestaurantMenu { restaurant_id: RestaurantId, order_id: OrderId },
    RateOrder,
    DelivererHome,
    AvailableDeliveries,
    ClientHome,
    StartCooking,
    FinishCooking,
    ArrivedDeliverers,
}

impl Screen {
    /// Landing screen for a role
    pub fn home(role: Role) -> Screen {
        match role {
            Role::Customer => Screen::CustomerHome,
            Role::Deliverer => Screen::DelivererHome,
            Role::Client => Screen::ClientHome,
        }
    }
}

/// What a menu choice asks the app to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Login,
    OpenRegistration,
    Register(Role),
    Exit,
    Back,
    ReturnHome,
    DisplayInfo,
    Logout,

    // Customer
    ChooseRestaurantSort,
    ListRestaurants(SortOrder),
    OpenRestaurant(RestaurantId),
    ViewRestaurantMenu(RestaurantId),
    ShowReviews(RestaurantId),
    AddToOrder { order_id: OrderId, item_id: MenuItemId },
    CompleteOrder(OrderId),
    CancelOrder(OrderId),
    ShowOrderStatuses,
    ChooseOrderToRate,
    RateOrder(OrderId),

    // Deliverer
    ListAvailableDeliveries,
    AcceptDelivery(OrderId),
    ArrivedAtRestaurant,
    CompleteDelivery,

    // Client
    AddMenuItem,
    ShowCurrentOrders,
    ChooseOrderToCook,
    StartCooking(OrderId),
    ChooseOrderToFinish,
    FinishCooking(OrderId),
    HandleArrivedDeliverers,
    HandOver(OrderId),
}

/// Build the menu for a screen from the current platform state
pub fn build(screen: &Screen, platform: &Platform, session: Option<&Session>) -> Result<Menu<Action>> {
    let user_id = || session.map(Session::user_id).ok_or(AribaError::NotLoggedIn);

    match screen {
        Screen::Login => Ok(login()),
        Screen::Registration => Ok(registration()),
        Screen::CustomerHome => Ok(customer_home()),
        Screen::RestaurantSort => Ok(restaurant_sort()),
        Screen::RestaurantList(order) => restaurant_list(platform, user_id()?, *order),
        Screen::OrderProcessing(restaurant_id) => Ok(order_processing(restaurant_id)),
        Screen::RestaurantMenu { restaurant_id, order_id } => restaurant_menu(platform, restaurant_id, *order_id),
        Screen::RateOrder => rate_order(platform, user_id()?),
        Screen::DelivererHome => Ok(deliverer_home()),
        Screen::AvailableDeliveries => available_deliveries(platform, user_id()?),
        Screen::ClientHome => Ok(client_home()),
        Screen::StartCooking => start_cooking(platform, user_id()?),
        Screen::FinishCooking => finish_cooking(platform, user_id()?),
        Screen::ArrivedDeliverers => arrived_deliverers(platform, user_id()?),
    }
}

fn login() -> Menu<Action> {
    Menu::new(MAIN_MENU_TITLE)
        .with_entry("Login as a registered user", Action::Login)
        .with_entry("Register as a new user", Action::OpenRegistration)
        .with_entry("Exit", Action::Exit)
}

fn registration() -> Menu<Action> {
    Menu::new("Which type of user would you like to register as?")
        .with_entry("Customer", Action::Register(Role::Customer))
        .with_entry("Deliverer", Action::Register(Role::Deliverer))
        .with_entry("Client", Action::Register(Role::Client))
        .with_entry(BACK, Action::Back)
}

fn customer_home() -> Menu<Action> {
    Menu::new(MAIN_MENU_TITLE)
        .with_entry("Display your user information", Action::DisplayInfo)
        .with_entry("Select a list of restaurants to order from", Action::ChooseRestaurantSort)
        .with_entry("See the status of your orders", Action::ShowOrderStatuses)
        .with_entry("Rate a restaurant you've ordered from", Action::ChooseOrderToRate)
        .with_entry("Log out", Action::Logout)
}

fn restaurant_sort() -> Menu<Action> {
    Menu::new("How would you like the list of restaurants ordered?")
        .with_entry("Sorted alphabetically by name", Action::ListRestaurants(SortOrder::Alphabetical))
        .with_entry("Sorted by distance", Action::ListRestaurants(SortOrder::Distance))
        .with_entry("Sorted by style", Action::ListRestaurants(SortOrder::Style))
        .with_entry("Sorted by average rating", Action::ListRestaurants(SortOrder::Rating))
        .with_entry(BACK, Action::Back)
}

/// One decimal place, or a dash for an unrated restaurant
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{:.1}", value),
        None => "-".to_string(),
    }
}

fn restaurant_list(platform: &Platform, customer_id: &UserId, order: SortOrder) -> Result<Menu<Action>> {
    let customer = platform.users.customer(customer_id)?;
    let mut menu = Menu::new("You can order from the following restaurants:").with_table(TableLayout::new(&[
        ("Restaurant Name", 25),
        ("Loc", 7),
        ("Dist", 6),
        ("Style", 12),
        ("Rating", 3),
    ]));

    for restaurant in platform.restaurants.sorted(order, &customer.location) {
        menu.push_row(
            vec![
                restaurant.name.clone(),
                restaurant.location.to_string(),
                customer.location.distance_to(&restaurant.location).to_string(),
                restaurant.style.to_string(),
                format_rating(restaurant.average_rating()),
            ],
            Action::OpenRestaurant(restaurant.id.clone()),
        );
    }
    menu.push(BACK, Action::ReturnHome);
    Ok(menu)
}

fn order_processing(restaurant_id: &RestaurantId) -> Menu<Action> {
    Menu::new("")
        .with_entry(
            "See this restaurant's menu and place an order",
            Action::ViewRestaurantMenu(restaurant_id.clone()),
        )
        .with_entry("See reviews for this restaurant", Action::ShowReviews(restaurant_id.clone()))
        .with_entry("Return to main menu", Action::ReturnHome)
}

fn restaurant_menu(platform: &Platform, restaurant_id: &RestaurantId, order_id: OrderId) -> Result<Menu<Action>> {
    let order = platform.orders.order(order_id)?;
    let restaurant = platform.restaurants.restaurant(restaurant_id)?;

    let mut menu = Menu::new(format!("Current order total: {}", order.total()));
    for item in restaurant.menu_items() {
        menu.push(
            item.to_string(),
            Action::AddToOrder {
                order_id,
                item_id: item.id.clone(),
            },
        );
    }
    menu.push("Complete order", Action::CompleteOrder(order_id));
    menu.push("Cancel order", Action::CancelOrder(order_id));
    Ok(menu)
}

fn rate_order(platform: &Platform, customer_id: &UserId) -> Result<Menu<Action>> {
    let mut menu = Menu::new("Select a previous order to rate the restaurant it came from:");
    for order in platform.ratable_orders(customer_id) {
        let restaurant = platform.restaurants.restaurant(order.restaurant_id())?;
        menu.push(
            format!("Order #{} from {}", order.id(), restaurant.name),
            Action::RateOrder(order.id()),
        );
    }
    menu.push(BACK, Action::Back);
    Ok(menu)
}

fn deliverer_home() -> Menu<Action> {
    Menu::new(MAIN_MENU_TITLE)
        .with_entry("Display your user information", Action::DisplayInfo)
        .with_entry("List orders available to deliver", Action::ListAvailableDeliveries)
        .with_entry("Arrived at restaurant to pick up order", Action::ArrivedAtRestaurant)
        .with_entry("Mark this delivery as complete", Action::CompleteDelivery)
        .with_entry("Log out", Action::Logout)
}

fn available_deliveries(platform: &Platform, deliverer_id: &UserId) -> Result<Menu<Action>> {
    let deliverer = platform.users.deliverer(deliverer_id)?;
    let mut menu = Menu::new("The following orders are available for delivery. Select an order to accept it:")
        .with_table(TableLayout::new(&[
            ("Order", 10),
            ("Restaurant Name", 22),
            ("Loc", 7),
            ("Customer Name", 17),
            ("Loc", 7),
            ("Dist", 0),
        ]));

    for order in platform.orders.all_deliverable_orders() {
        let restaurant = platform.restaurants.restaurant(order.restaurant_id())?;
        let customer = platform.users.customer(order.customer_id())?;
        let distance = platform.delivery_distance(&deliverer.location, order)?;
        menu.push_row(
            vec![
                order.id().to_string(),
                restaurant.name.clone(),
                restaurant.location.to_string(),
                customer.profile.name.clone(),
                customer.location.to_string(),
                distance.to_string(),
            ],
            Action::AcceptDelivery(order.id()),
        );
    }
    menu.push(BACK, Action::Back);
    Ok(menu)
}

fn client_home() -> Menu<Action> {
    Menu::new(MAIN_MENU_TITLE)
        .with_entry("Display your user information", Action::DisplayInfo)
        .with_entry("Add item to restaurant menu", Action::AddMenuItem)
        .with_entry("See current orders", Action::ShowCurrentOrders)
        .with_entry("Start cooking order", Action::ChooseOrderToCook)
        .with_entry("Finish cooking order", Action::ChooseOrderToFinish)
        .with_entry("Handle deliverers who have arrived", Action::HandleArrivedDeliverers)
        .with_entry("Log out", Action::Logout)
}

fn order_label(platform: &Platform, order: &Order) -> Result<String> {
    let customer = platform.users.customer(order.customer_id())?;
    Ok(format!("Order #{} for {}", order.id(), customer.profile.name))
}

fn cooking_list(
    platform: &Platform,
    orders: Vec<&Order>,
    title: &str,
    action: fn(OrderId) -> Action,
) -> Result<Menu<Action>> {
    let mut menu = Menu::new(title);
    for order in orders {
        menu.push(order_label(platform, order)?, action(order.id()));
    }
    menu.push(BACK, Action::Back);
    Ok(menu)
}

fn start_cooking(platform: &Platform, client_id: &UserId) -> Result<Menu<Action>> {
    let restaurant = platform.client_restaurant(client_id)?;
    cooking_list(
        platform,
        platform.orders.orders_ready_for_cooking(&restaurant.id),
        "Select an order once you are ready to start cooking:",
        Action::StartCooking,
    )
}

fn finish_cooking(platform: &Platform, client_id: &UserId) -> Result<Menu<Action>> {
    let restaurant = platform.client_restaurant(client_id)?;
    cooking_list(
        platform,
        platform.orders.orders_for_restaurant(&restaurant.id, OrderStatus::Cooking),
        "Select an order once you have finished preparing it:",
        Action::FinishCooking,
    )
}

fn arrived_deliverers(platform: &Platform, client_id: &UserId) -> Result<Menu<Action>> {
    let restaurant = platform.client_restaurant(client_id)?;
    let mut menu = Menu::new("Select an order to indicate that the deliverer has collected it:");
    for (order, deliverer) in platform.arrived_deliveries(&restaurant.id) {
        menu.push(
            format!(
                "{} (Deliverer licence plate: {}) (Order status: {})",
                order_label(platform, order)?,
                deliverer.licence_plate,
                order.status()
            ),
            Action::HandOver(order.id()),
        );
    }
    menu.push(BACK, Action::Back);
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::core::models::{Profile, RestaurantStyle};
    use crate::core::types::{Location, Money};

    #[test]
    fn test_login_menu_text() {
        let platform = Platform::new(&AppConfig::default());
        let menu = build(&Screen::Login, &platform, None).unwrap();
        assert_eq!(
            menu.render(),
            "Please make a choice from the menu below:\n\
             1: Login as a registered user\n\
             2: Register as a new user\n\
             3: Exit\n\
             Please enter a choice between 1 and 3:"
        );
    }

    #[test]
    fn test_role_screens_need_a_session() {
        let platform = Platform::new(&AppConfig::default());
        let result = build(&Screen::RateOrder, &platform, None);
        assert!(matches!(result, Err(AribaError::NotLoggedIn)));
    }

    #[test]
    fn test_restaurant_list_rows() {
        let mut platform = Platform::new(&AppConfig::default());
        let customer = platform
            .register_customer(Profile::new("Ann", 30, "ann@x", "0400000001", "Password1"), Location::new(0, 0))
            .unwrap();
        let client = platform
            .register_client(
                Profile::new("Cat", 40, "cat@x", "0400000003", "Password1"),
                "Diner",
                RestaurantStyle::Italian,
                Location::new(1, 2),
            )
            .unwrap();
        let restaurant_id = platform.client_restaurant(&client).unwrap().id.clone();
        platform
            .restaurants
            .add_menu_item(&restaurant_id, "Pasta", Money::from_cents(1500))
            .unwrap();

        let session = Session::new(customer, Role::Customer);
        let menu = build(&Screen::RestaurantList(SortOrder::Distance), &platform, Some(&session)).unwrap();
        let text = menu.render();
        assert!(text.contains("   Restaurant Name       Loc    Dist  Style       Rating"));
        assert!(text.contains("1: Diner                 1,2    3     Italian     -  "));
        assert_eq!(menu.entries()[1].action, Action::ReturnHome);
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(None), "-");
        assert_eq!(format_rating(Some(4.26)), "4.3");
        assert_eq!(format_rating(Some(5.0)), "5.0");
    }
}
