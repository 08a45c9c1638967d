use crate::core::errors::{AribaError, Result};
use crate::core::models::{Client, Customer, Deliverer, User};
use crate::core::session::Session;
use crate::core::types::{Role, UserId};

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    UnknownEmail,
    WrongPassword,
    Success(UserId),
}

/// Registry of every registered user, across all roles
pub struct UserManager {
    /// Users in registration order
    users: Vec<User>,
}

impl UserManager {
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Register a user. Fails without touching the registry if the email is taken.
    pub fn add_user(&mut self, user: User) -> Result<()> {
        let email = &user.profile().email;
        if !self.is_email_unique(email) {
            log::warn!("[UserManager] Rejected registration for {}: email in use", email);
            return Err(AribaError::EmailInUse(email.clone()));
        }

        log::info!("[UserManager] Registered {} {} ({})", user.role(), user.profile().name, user.id());
        self.users.push(user);
        Ok(())
    }

    pub fn is_email_unique(&self, email: &str) -> bool {
        !self.users.iter().any(|user| user.profile().email == email)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.profile().email == email)
    }

    pub fn user(&self, id: &UserId) -> Result<&User> {
        self.users
            .iter()
            .find(|user| user.id() == id)
            .ok_or_else(|| AribaError::UserNotFound(id.clone()))
    }

    fn user_mut(&mut self, id: &UserId) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or_else(|| AribaError::UserNotFound(id.clone()))
    }

    /// Check credentials against the registry
    pub fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.user_by_email(email) {
            None => LoginOutcome::UnknownEmail,
            Some(user) if user.profile().password != password => {
                log::info!("[UserManager] Wrong password for {}", email);
                LoginOutcome::WrongPassword
            }
            Some(user) => {
                log::info!("[UserManager] {} logged in", user.id());
                LoginOutcome::Success(user.id().clone())
            }
        }
    }

    /// End a session. Any per-session state dies with the record.
    pub fn logout(&self, session: Session) {
        log::info!("[UserManager] Session {} for {} ended", session.id(), session.user_id());
    }

    pub fn customer(&self, id: &UserId) -> Result<&Customer> {
        match self.user(id)? {
            User::Customer(customer) => Ok(customer),
            other => Err(wrong_role(Role::Customer, other)),
        }
    }

    pub fn customer_mut(&mut self, id: &UserId) -> Result<&mut Customer> {
        match self.user_mut(id)? {
            User::Customer(customer) => Ok(customer),
            other => Err(wrong_role(Role::Customer, other)),
        }
    }

    pub fn deliverer(&self, id: &UserId) -> Result<&Deliverer> {
        match self.user(id)? {
            User::Deliverer(deliverer) => Ok(deliverer),
            other => Err(wrong_role(Role::Deliverer, other)),
        }
    }

    pub fn deliverer_mut(&mut self, id: &UserId) -> Result<&mut Deliverer> {
        match self.user_mut(id)? {
            User::Deliverer(deliverer) => Ok(deliverer),
            other => Err(wrong_role(Role::Deliverer, other)),
        }
    }

    pub fn client(&self, id: &UserId) -> Result<&Client> {
        match self.user(id)? {
            User::Client(client) => Ok(client),
            other => Err(wrong_role(Role::Client, other)),
        }
    }

    /// Users of a single role, in registration order
    pub fn users_by_role(&self, role: Role) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |user| user.role() == role)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

fn wrong_role(expected: Role, user: &User) -> AribaError {
    AribaError::WrongRole {
        expected,
        actual: user.role(),
    }
}

impl Default for UserManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Profile;
    use crate::core::types::Location;

    fn customer(email: &str) -> User {
        User::Customer(Customer::new(
            Profile::new("Ann", 25, email, "0411111111", "Password1"),
            Location::new(0, 0),
        ))
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut users = UserManager::new();
        users.add_user(customer("ann@example.com")).unwrap();

        let second = User::Deliverer(Deliverer::new(
            Profile::new("Dan", 40, "ann@example.com", "0422222222", "Password1"),
            "XYZ 1",
        ));
        let result = users.add_user(second);
        assert!(matches!(result, Err(AribaError::EmailInUse(_))));
        assert_eq!(users.user_count(), 1);
        assert_eq!(users.users_by_role(Role::Deliverer).count(), 0);
    }

    #[test]
    fn test_login_outcomes() {
        let mut users = UserManager::new();
        let user = customer("ann@example.com");
        let id = user.id().clone();
        users.add_user(user).unwrap();

        assert_eq!(users.login("bob@example.com", "Password1"), LoginOutcome::UnknownEmail);
        assert_eq!(users.login("ann@example.com", "password1"), LoginOutcome::WrongPassword);
        assert_eq!(users.login("ann@example.com", "Password1"), LoginOutcome::Success(id));
    }

    #[test]
    fn test_typed_lookup_checks_role() {
        let mut users = UserManager::new();
        let user = customer("ann@example.com");
        let id = user.id().clone();
        users.add_user(user).unwrap();

        assert!(users.customer(&id).is_ok());
        assert!(matches!(
            users.deliverer(&id),
            Err(AribaError::WrongRole { expected: Role::Deliverer, actual: Role::Customer })
        ));
        assert!(matches!(users.client(&UserId::new()), Err(AribaError::UserNotFound(_))));
    }
}
