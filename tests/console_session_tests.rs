use aribaeats::ui::screens::Screen;
use aribaeats::{App, AppConfig, OrderStatus};
use std::io::Cursor;

fn run_script(lines: &[&str]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    let mut app = App::new(AppConfig::default(), Cursor::new(input), Vec::new());
    app.run().unwrap();
    String::from_utf8(app.into_output()).unwrap()
}

const REGISTER_CUSTOMER: &[&str] = &[
    "2", "1", "Ann Lee", "30", "ann@example.com", "0412345678", "Password1", "Password1", "3,4",
];
const REGISTER_DELIVERER: &[&str] = &[
    "2", "2", "Dan Smith", "25", "dan@example.com", "0412345679", "Password1", "Password1", "DAN 123",
];
const REGISTER_CLIENT: &[&str] = &[
    "2", "3", "Cat Jones", "40", "cat@example.com", "0412345670", "Password1", "Password1", "Cat's Diner", "1",
    "0,0",
];

fn login(email: &'static str) -> Vec<&'static str> {
    vec!["1", email, "Password1"]
}

#[test]
fn test_exit_from_login_menu() {
    let output = run_script(&["3"]);
    assert!(output.starts_with("Welcome to Arriba Eats!\n"));
    assert!(output.ends_with("Thank you for using Arriba Eats!\n"));
}

#[test]
fn test_end_of_input_stops_cleanly() {
    let mut app = App::new(AppConfig::default(), Cursor::new(String::new()), Vec::new());
    assert!(app.run().is_ok());
    let output = String::from_utf8(app.into_output()).unwrap();
    assert!(output.contains("Please enter a choice between 1 and 3:"));
}

#[test]
fn test_failed_login() {
    let output = run_script(&["1", "nobody@example.com", "Password1", "1", "", "", "3"]);
    assert!(output.contains("Invalid email or password."));
    assert!(output.contains("Email and password must not be empty."));
}

#[test]
fn test_registration_rejects_reused_email() {
    let mut script: Vec<&str> = REGISTER_CUSTOMER.to_vec();
    script.extend(["2", "1", "Ann Again", "31", "ann@example.com", "other@example.com"]);
    script.extend(["0412345671", "Password1", "Password1", "1,1", "3"]);

    let output = run_script(&script);
    assert!(output.contains("You have been successfully registered as a customer, Ann Lee!"));
    assert!(output.contains("This email address is already in use."));
    assert!(output.contains("You have been successfully registered as a customer, Ann Again!"));
}

#[test]
fn test_full_order_delivery_and_rating() {
    let mut script: Vec<&str> = Vec::new();
    script.extend(REGISTER_CUSTOMER);
    script.extend(REGISTER_DELIVERER);
    script.extend(REGISTER_CLIENT);

    // Client adds a menu item
    script.extend(login("cat@example.com"));
    script.extend(["2", "Burger", "12.50", "7"]);

    // Customer orders two burgers
    script.extend(login("ann@example.com"));
    script.extend(["2", "1", "1", "1", "1", "2", "2", "3", "5"]);

    // Deliverer claims the order and arrives at the restaurant
    script.extend(login("dan@example.com"));
    script.extend(["2", "0,0", "1", "3", "5"]);

    // Restaurant cooks and hands over
    script.extend(login("cat@example.com"));
    script.extend(["4", "1", "5", "1", "6", "1", "7"]);

    // Deliverer completes the delivery
    script.extend(login("dan@example.com"));
    script.extend(["4", "5"]);

    // Customer checks the order and rates the restaurant
    script.extend(login("ann@example.com"));
    script.extend(["3", "4", "1", "5", "Great burgers", "5", "3"]);

    let mut input = script.join("\n");
    input.push('\n');
    let mut app = App::new(AppConfig::default(), Cursor::new(input), Vec::new());
    app.run().unwrap();

    let order = app.platform().orders.order(1).unwrap();
    assert_eq!(order.status(), OrderStatus::Delivered);
    let restaurant = app.platform().restaurants.restaurant(order.restaurant_id()).unwrap();
    assert_eq!(restaurant.average_rating(), Some(5.0));
    assert_eq!(app.navigator().current(), &Screen::Login);

    let output = String::from_utf8(app.into_output()).unwrap();
    for expected in [
        "Welcome back, Cat Jones!",
        "Successfully added Burger ($12.50) to menu.",
        "Placing order from Cat's Diner.",
        "Added 2 x Burger to order.",
        "Your order has been placed. Your order number is #1.",
        "Thanks for accepting the order. Please head to Cat's Diner at 0,0 to pick it up.",
        "Thanks. We have informed Cat's Diner that you have arrived and are ready to pick up order #1.",
        "The order is still being prepared, so please wait patiently until it is ready.",
        "When you have the order, please deliver it to Ann Lee at 3,4.",
        "Order #1 is now marked as cooking.",
        "Order #1 is now ready for collection.",
        "Please take it to the deliverer with licence plate DAN 123, who is waiting to collect it.",
        "Order #1 is now marked as being delivered.",
        "Thank you for making the delivery.",
        "Order #1 from Cat's Diner: Delivered",
        "This order was delivered by Dan Smith (licence plate: DAN 123)",
        "Thank you for rating Cat's Diner.",
        "Thank you for using Arriba Eats!",
    ] {
        assert!(output.contains(expected), "missing: {}", expected);
    }
}

#[test]
fn test_completing_an_order_returns_to_the_restaurant() {
    let mut script: Vec<&str> = Vec::new();
    script.extend(REGISTER_CLIENT);
    script.extend(login("cat@example.com"));
    script.extend(["2", "Pie", "4.50", "7"]);
    script.extend(REGISTER_CUSTOMER);
    script.extend(login("ann@example.com"));
    script.extend(["2", "1", "1", "1", "2", "1", "1", "2"]);

    let mut input = script.join("\n");
    input.push('\n');
    let mut app = App::new(AppConfig::default(), Cursor::new(input), Vec::new());
    app.run().unwrap();

    assert!(matches!(app.navigator().current(), Screen::OrderProcessing(_)));
    let output = String::from_utf8(app.into_output()).unwrap();
    assert!(output.contains("You must add at least one item before completing the order."));
    assert!(output.contains("Your order has been placed. Your order number is #1."));
}
