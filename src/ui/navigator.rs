use crate::core::errors::{AribaError, Result};
use crate::core::types::Role;
use std::collections::HashMap;

/// Back-stack of screens with a single anchor bookmark and a home screen per role
#[derive(Debug, Clone)]
pub struct MenuNavigator<M> {
    current: M,
    /// Previously shown screens, most recent last
    history: Vec<M>,
    anchor: Option<M>,
    homes: HashMap<Role, M>,
}

impl<M: Clone + PartialEq> MenuNavigator<M> {
    pub fn new(start: M) -> Self {
        Self {
            current: start,
            history: Vec::new(),
            anchor: None,
            homes: HashMap::new(),
        }
    }

    pub fn current(&self) -> &M {
        &self.current
    }

    pub fn navigate_to(&mut self, screen: M) {
        let previous = std::mem::replace(&mut self.current, screen);
        self.history.push(previous);
    }

    /// Navigate and bookmark the new screen as the anchor
    pub fn navigate_to_with_anchor(&mut self, screen: M) {
        self.navigate_to(screen);
        self.set_anchor();
    }

    /// Pop one screen. Returns false when there is nothing to go back to.
    pub fn navigate_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn set_anchor(&mut self) {
        self.anchor = Some(self.current.clone());
    }

    pub fn anchor(&self) -> Option<&M> {
        self.anchor.as_ref()
    }

    /// Unwind history until the anchor becomes current again.
    ///
    /// Screens above the anchor are discarded, so history ends up as it was
    /// when the anchor was set. Does nothing when there is no anchor or it is
    /// already current, and fails without touching history when the anchor is
    /// not on the stack.
    pub fn navigate_to_anchor(&mut self) -> Result<()> {
        let Some(anchor) = self.anchor.as_ref() else {
            return Ok(());
        };
        if *anchor == self.current {
            return Ok(());
        }
        let Some(position) = self.history.iter().rposition(|screen| screen == anchor) else {
            return Err(AribaError::AnchorNotInHistory);
        };

        self.history.truncate(position + 1);
        if let Some(screen) = self.history.pop() {
            self.current = screen;
        }
        Ok(())
    }

    /// Forget all history. The current screen stays.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn set_home(&mut self, role: Role, screen: M) {
        self.homes.insert(role, screen);
    }

    pub fn home(&self, role: Role) -> Option<&M> {
        self.homes.get(&role)
    }

    /// Jump straight to the role's home screen, keeping the current one in history
    pub fn navigate_home(&mut self, role: Role) -> Result<()> {
        let home = self.homes.get(&role).cloned().ok_or(AribaError::HomeNotSet(role))?;
        self.navigate_to(home);
        Ok(())
    }

    pub fn history(&self) -> &[M] {
        &self.history
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
