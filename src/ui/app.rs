use super::console::Console;
use super::input;
use super::navigator::MenuNavigator;
use super::screens::{self, Action, Screen};
use crate::core::config::AppConfig;
use crate::core::errors::{AribaError, Result};
use crate::core::managers::LoginOutcome;
use crate::core::models::{Order, User};
use crate::core::platform::{ArrivalOutcome, CompletionOutcome, HandOverOutcome, Platform};
use crate::core::session::Session;
use crate::core::types::{MenuItemId, OrderId, RestaurantId, Role, UserId};
use std::io::{BufRead, Write};

/// Whether the loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The console application: shows the current screen, reads a choice, acts on it
pub struct App<R, W> {
    config: AppConfig,
    platform: Platform,
    navigator: MenuNavigator<Screen>,
    console: Console<R, W>,
    session: Option<Session>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(config: AppConfig, input: R, output: W) -> Self {
        let platform = Platform::new(&config);
        Self {
            config,
            platform,
            navigator: MenuNavigator::new(Screen::Login),
            console: Console::new(input, output),
            session: None,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Direct access for seeding data before `run`
    pub fn platform_mut(&mut self) -> &mut Platform {
        &mut self.platform
    }

    pub fn navigator(&self) -> &MenuNavigator<Screen> {
        &self.navigator
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Run until the user exits or input runs out
    pub fn run(&mut self) -> Result<()> {
        log::info!("[App] Starting {}", self.config.app_name);
        self.console.say(format!("Welcome to {}!", self.config.app_name))?;
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(AribaError::InputClosed) => {
                    log::info!("[App] Input closed");
                    break;
                }
                Err(e) => {
                    log::error!("[App] Fatal error on {:?}: {}", self.navigator.current(), e);
                    return Err(e);
                }
            }
        }
        log::info!("[App] Stopped");
        Ok(())
    }

    /// Show the current screen once and carry out the chosen action
    pub fn step(&mut self) -> Result<Flow> {
        let menu = screens::build(self.navigator.current(), &self.platform, self.session.as_ref())?;
        self.console.say(menu.render())?;
        let action = menu.select(&mut self.console)?;
        log::debug!("[App] {:?} selected on {:?}", action, self.navigator.current());
        self.perform(action)
    }

    fn perform(&mut self, action: Action) -> Result<Flow> {
        match action {
            Action::Login => self.login()?,
            Action::OpenRegistration => self.navigator.navigate_to(Screen::Registration),
            Action::Register(role) => self.register(role)?,
            Action::Exit => {
                self.console.say(format!("Thank you for using {}!", self.config.app_name))?;
                return Ok(Flow::Exit);
            }
            Action::Back => {
                self.navigator.navigate_back();
            }
            Action::ReturnHome => self.go_home()?,
            Action::DisplayInfo => self.display_info()?,
            Action::Logout => self.logout()?,

            Action::ChooseRestaurantSort => self.navigator.navigate_to(Screen::RestaurantSort),
            Action::ListRestaurants(order) => self.navigator.navigate_to(Screen::RestaurantList(order)),
            Action::OpenRestaurant(restaurant_id) => self.open_restaurant(restaurant_id)?,
            Action::ViewRestaurantMenu(restaurant_id) => {
                let user_id = self.user_id()?;
                let order_id = self.platform.open_draft_order(&user_id, &restaurant_id)?;
                self.navigator.navigate_to(Screen::RestaurantMenu { restaurant_id, order_id });
            }
            Action::ShowReviews(restaurant_id) => self.show_reviews(&restaurant_id)?,
            Action::AddToOrder { order_id, item_id } => self.add_to_order(order_id, &item_id)?,
            Action::CompleteOrder(order_id) => self.complete_order(order_id)?,
            Action::CancelOrder(order_id) => {
                self.platform.orders.cancel_order(order_id);
                self.return_to_anchor()?;
            }
            Action::ShowOrderStatuses => self.show_order_statuses()?,
            Action::ChooseOrderToRate => {
                if self.platform.users.customer(&self.user_id()?)?.order_count() == 0 {
                    self.console.say("You have not placed any orders.")?;
                } else {
                    self.navigator.navigate_to(Screen::RateOrder);
                }
            }
            Action::RateOrder(order_id) => self.rate_order(order_id)?,

            Action::ListAvailableDeliveries => self.list_available_deliveries()?,
            Action::AcceptDelivery(order_id) => self.accept_delivery(order_id)?,
            Action::ArrivedAtRestaurant => self.arrived_at_restaurant()?,
            Action::CompleteDelivery => self.complete_delivery()?,

            Action::AddMenuItem => self.add_menu_item()?,
            Action::ShowCurrentOrders => self.show_current_orders()?,
            Action::ChooseOrderToCook => self.navigator.navigate_to(Screen::StartCooking),
            Action::StartCooking(order_id) => self.start_cooking(order_id)?,
            Action::ChooseOrderToFinish => self.navigator.navigate_to(Screen::FinishCooking),
            Action::FinishCooking(order_id) => self.finish_cooking(order_id)?,
            Action::HandleArrivedDeliverers => {
                self.console
                    .say("These deliverers have arrived and are waiting to collect orders.")?;
                self.navigator.navigate_to(Screen::ArrivedDeliverers);
            }
            Action::HandOver(order_id) => self.hand_over(order_id)?,
        }
        Ok(Flow::Continue)
    }

    fn session_ref(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(AribaError::NotLoggedIn)
    }

    fn user_id(&self) -> Result<UserId> {
        Ok(self.session_ref()?.user_id().clone())
    }

    fn say_all(&mut self, lines: Vec<String>) -> Result<()> {
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn go_home(&mut self) -> Result<()> {
        let role = self.session_ref()?.role();
        match self.navigator.navigate_home(role) {
            Err(AribaError::HomeNotSet(role)) => self.console.say(format!("Home menu not set for role: {}", role)),
            other => other,
        }
    }

    fn return_to_anchor(&mut self) -> Result<()> {
        match self.navigator.navigate_to_anchor() {
            Err(AribaError::AnchorNotInHistory) => {
                log::warn!("[App] Anchor lost, returning home");
                self.go_home()
            }
            other => other,
        }
    }

    fn login(&mut self) -> Result<()> {
        let email = self.console.prompt("Email:")?;
        let password = self.console.prompt("Password:")?;
        if email.trim().is_empty() || password.trim().is_empty() {
            return self.console.say("Email and password must not be empty.");
        }

        let LoginOutcome::Success(user_id) = self.platform.users.login(&email, &password) else {
            return self.console.say("Invalid email or password.");
        };
        let user = self.platform.users.user(&user_id)?;
        let role = user.role();
        let greeting = format!("Welcome back, {}!", user.profile().name);
        self.console.say(greeting)?;

        self.session = Some(Session::new(user_id, role));
        self.navigator.set_home(role, Screen::home(role));
        self.navigator.navigate_to(Screen::home(role));
        Ok(())
    }

    fn register(&mut self, role: Role) -> Result<()> {
        let profile = input::profile(&mut self.console, &self.platform.users)?;
        let name = profile.name.clone();
        match role {
            Role::Customer => {
                let location = input::location(&mut self.console)?;
                self.platform.register_customer(profile, location)?;
            }
            Role::Deliverer => {
                let plate = input::licence_plate(&mut self.console)?;
                self.platform.register_deliverer(profile, &plate)?;
            }
            Role::Client => {
                let restaurant_name = input::restaurant_name(&mut self.console)?;
                let style = input::restaurant_style(&mut self.console)?;
                let location = input::location(&mut self.console)?;
                self.platform.register_client(profile, &restaurant_name, style, location)?;
            }
        }
        self.console
            .say(format!("You have been successfully registered as a {}, {}!", role, name))?;
        self.navigator.navigate_to(Screen::Login);
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            self.platform.users.logout(session);
        }
        self.console.say("You are now logged out.")?;
        self.navigator.navigate_to(Screen::Login);
        self.navigator.clear();
        Ok(())
    }

    fn display_info(&mut self) -> Result<()> {
        let user_id = self.user_id()?;
        let user = self.platform.users.user(&user_id)?;
        let profile = user.profile();
        let mut lines = vec![
            "Your user details are as follows:".to_string(),
            format!("Name: {}", profile.name),
            format!("Age: {}", profile.age),
            format!("Email: {}", profile.email),
            format!("Mobile: {}", profile.mobile),
        ];

        match user {
            User::Customer(customer) => {
                lines.push(format!("Location: {}", customer.location));
                lines.push(self.platform.customer_summary(&user_id)?);
            }
            User::Deliverer(deliverer) => {
                lines.push(format!("Licence plate: {}", deliverer.licence_plate));
                let status = self.platform.current_delivery_status(&user_id);
                if !status.is_empty() {
                    lines.push(status);
                }
            }
            User::Client(client) => {
                let restaurant = self.platform.restaurants.restaurant(&client.restaurant_id)?;
                lines.push(format!("Restaurant name: {}", restaurant.name));
                lines.push(format!("Restaurant style: {}", restaurant.style));
                lines.push(format!("Restaurant location: {}", restaurant.location));
            }
        }
        self.say_all(lines)
    }

    fn open_restaurant(&mut self, restaurant_id: RestaurantId) -> Result<()> {
        let name = self.platform.restaurants.restaurant(&restaurant_id)?.name.clone();
        let session = self.session.as_mut().ok_or(AribaError::NotLoggedIn)?;
        if session.visit_restaurant(&restaurant_id) {
            self.console.say(format!("Placing order from {}.", name))?;
        }
        self.navigator
            .navigate_to_with_anchor(Screen::OrderProcessing(restaurant_id));
        Ok(())
    }

    fn show_reviews(&mut self, restaurant_id: &RestaurantId) -> Result<()> {
        let lines: Vec<String> = self
            .platform
            .restaurants
            .reviews(restaurant_id)?
            .iter()
            .map(|review| {
                format!(
                    "Reviewer: {}\nRating: {}\nComment: {}\n",
                    review.customer_name,
                    "*".repeat(usize::from(review.score)),
                    review.comment
                )
            })
            .collect();

        if lines.is_empty() {
            return self.console.say("No reviews have been left for this restaurant.");
        }
        self.say_all(lines)
    }

    fn add_to_order(&mut self, order_id: OrderId, item_id: &MenuItemId) -> Result<()> {
        let restaurant_id = self.platform.orders.order(order_id)?.restaurant_id().clone();
        let name = self.platform.restaurants.menu_item(&restaurant_id, item_id)?.name.clone();

        self.console.say(format!("Adding {} to order.", name))?;
        let quantity = input::quantity(&mut self.console)?;
        if quantity == 0 {
            return Ok(());
        }
        self.platform.add_to_order(order_id, item_id, quantity)?;
        self.console.say(format!("Added {} x {} to order.", quantity, name))
    }

    fn complete_order(&mut self, order_id: OrderId) -> Result<()> {
        if self.platform.orders.order(order_id)?.items().is_empty() {
            return self
                .console
                .say("You must add at least one item before completing the order.");
        }
        let user_id = self.user_id()?;
        let placed = self.platform.finalise_order(&user_id, order_id)?;
        self.console
            .say(format!("Your order has been placed. Your order number is #{}.", placed))?;
        self.return_to_anchor()
    }

    fn show_order_statuses(&mut self) -> Result<()> {
        let user_id = self.user_id()?;
        let statuses = self
            .platform
            .orders
            .order_statuses(&user_id, &self.platform.restaurants, &self.platform.users);
        if statuses.is_empty() {
            return self.console.say("You have not placed any orders.");
        }
        self.say_all(statuses)
    }

    fn rate_order(&mut self, order_id: OrderId) -> Result<()> {
        let order = self.platform.orders.order(order_id)?;
        let restaurant_name = self.platform.restaurants.restaurant(order.restaurant_id())?.name.clone();
        let mut lines = vec![format!("You are rating order #{} from {}:", order_id, restaurant_name)];
        lines.extend(item_lines(order));
        self.say_all(lines)?;

        let Some(score) = input::rating(&mut self.console)? else {
            self.navigator.navigate_back();
            return Ok(());
        };
        let comment = input::comment(&mut self.console)?;
        let user_id = self.user_id()?;
        self.platform.rate_order(&user_id, order_id, score, &comment)?;
        self.console.say(format!("Thank you for rating {}.", restaurant_name))?;
        self.navigator.navigate_back();
        Ok(())
    }

    fn list_available_deliveries(&mut self) -> Result<()> {
        let deliverer_id = self.user_id()?;
        if !self.platform.deliveries.is_available(&deliverer_id) {
            return self.console.say("You have already selected an order for delivery.");
        }

        let location = input::location(&mut self.console)?;
        self.platform.users.deliverer_mut(&deliverer_id)?.location = location;
        self.navigator.navigate_to(Screen::AvailableDeliveries);
        Ok(())
    }

    fn accept_delivery(&mut self, order_id: OrderId) -> Result<()> {
        let user_id = self.user_id()?;
        self.platform.accept_delivery(&user_id, order_id)?;
        let order = self.platform.orders.order(order_id)?;
        let restaurant = self.platform.restaurants.restaurant(order.restaurant_id())?;
        let message = format!(
            "Thanks for accepting the order. Please head to {} at {} to pick it up.",
            restaurant.name, restaurant.location
        );
        self.console.say(message)?;
        self.go_home()
    }

    fn arrived_at_restaurant(&mut self) -> Result<()> {
        let user_id = self.user_id()?;
        let lines = match self.platform.mark_arrived(&user_id)? {
            ArrivalOutcome::NoOrder => vec!["You have not yet accepted an order.".to_string()],
            ArrivalOutcome::AlreadyPickedUp => vec!["You have already picked up this order.".to_string()],
            ArrivalOutcome::AlreadyArrived => {
                vec!["You already indicated that you have arrived at this restaurant.".to_string()]
            }
            ArrivalOutcome::Arrived {
                order_id,
                still_preparing,
            } => {
                let order = self.platform.orders.order(order_id)?;
                let restaurant = self.platform.restaurants.restaurant(order.restaurant_id())?;
                let customer = self.platform.users.customer(order.customer_id())?;
                let mut lines = vec![
                    format!(
                        "Thanks. We have informed {} that you have arrived and are ready to pick up order #{}.",
                        restaurant.name, order_id
                    ),
                    "Please show the staff this screen as confirmation.".to_string(),
                ];
                if still_preparing {
                    lines.push(
                        "The order is still being prepared, so please wait patiently until it is ready.".to_string(),
                    );
                }
                lines.push(format!(
                    "When you have the order, please deliver it to {} at {}.",
                    customer.profile.name, customer.location
                ));
                lines
            }
        };
        self.say_all(lines)
    }

    fn complete_delivery(&mut self) -> Result<()> {
        let user_id = self.user_id()?;
        let message = match self.platform.complete_delivery(&user_id)? {
            CompletionOutcome::NoOrder => "You have not yet accepted an order.",
            CompletionOutcome::NotPickedUp => "You have not yet picked up this order.",
            CompletionOutcome::Delivered(_) => "Thank you for making the delivery.",
        };
        self.console.say(message)
    }

    fn add_menu_item(&mut self) -> Result<()> {
        let Some((name, price)) = input::menu_item(&mut self.console)? else {
            return Ok(());
        };
        let restaurant_id = self.platform.client_restaurant(&self.user_id()?)?.id.clone();
        let item = self.platform.restaurants.add_menu_item(&restaurant_id, &name, price)?;
        self.console
            .say(format!("Successfully added {} ({}) to menu.", item.name, item.price))
    }

    fn show_current_orders(&mut self) -> Result<()> {
        let restaurant_id = self.platform.client_restaurant(&self.user_id()?)?.id.clone();
        let mut lines = Vec::new();
        for order in self.platform.orders.current_orders(&restaurant_id) {
            let customer = self.platform.users.customer(order.customer_id())?;
            lines.push(format!("Order #{} for {}: {}", order.id(), customer.profile.name, order.status()));
            lines.extend(item_lines(order));
            lines.push(String::new());
        }

        if lines.is_empty() {
            return self.console.say("Your restaurant has no current orders.");
        }
        self.say_all(lines)
    }

    fn start_cooking(&mut self, order_id: OrderId) -> Result<()> {
        let order = self.platform.orders.order(order_id)?;
        let mut lines = vec![format!(
            "Order #{} is now marked as cooking. Please prepare the order, then mark it as finished cooking:",
            order_id
        )];
        lines.extend(item_lines(order));

        self.platform.start_cooking(order_id)?;
        self.say_all(lines)?;
        self.navigator.navigate_back();
        Ok(())
    }

    fn finish_cooking(&mut self, order_id: OrderId) -> Result<()> {
        self.platform.finish_cooking(order_id)?;
        let mut lines = vec![format!("Order #{} is now ready for collection.", order_id)];

        let order = self.platform.orders.order(order_id)?;
        match order.deliverer_id() {
            None => lines.push("No deliverer has been assigned yet.".to_string()),
            Some(deliverer_id) => {
                let deliverer = self.platform.users.deliverer(deliverer_id)?;
                let waiting = self
                    .platform
                    .arrived_deliveries(order.restaurant_id())
                    .iter()
                    .any(|(arrived, _)| arrived.id() == order_id);
                lines.push(if waiting {
                    format!(
                        "Please take it to the deliverer with licence plate {}, who is waiting to collect it.",
                        deliverer.licence_plate
                    )
                } else {
                    format!(
                        "The deliverer with licence plate {} will be arriving soon to collect it.",
                        deliverer.licence_plate
                    )
                });
            }
        }
        self.say_all(lines)?;
        self.go_home()
    }

    fn hand_over(&mut self, order_id: OrderId) -> Result<()> {
        let message = match self.platform.hand_over(order_id)? {
            HandOverOutcome::NotCooked => "This order has not yet been cooked.".to_string(),
            HandOverOutcome::DelivererNotArrived => "The deliverer for this order has not arrived yet.".to_string(),
            HandOverOutcome::PickedUp => format!("Order #{} is now marked as being delivered.", order_id),
        };
        self.console.say(message)?;
        self.go_home()
    }
}

/// `<qty> x <item>` per menu item, duplicates merged
fn item_lines(order: &Order) -> Vec<String> {
    order
        .grouped_items()
        .into_iter()
        .map(|(item, quantity)| format!("{} x {}", quantity, item.name))
        .collect()
}
