//! Request-generation tickets for menu fetches.
//!
//! Each fetch is issued a ticket; only the newest ticket for a given target
//! list may apply its response. A slow response that resolves after a newer
//! request was issued is dropped (last issued wins).

/// Which menu list a fetch populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    /// The unfiltered list (`SetMenus`).
    All,
    /// The user's authorised list (`SetUserMenus`).
    User,
}

/// What to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScope {
    All,
    Current,
    User(u64),
    Permissions(u64),
}

impl MenuScope {
    pub fn target(&self) -> MenuTarget {
        match self {
            MenuScope::All => MenuTarget::All,
            MenuScope::Current | MenuScope::User(_) | MenuScope::Permissions(_) => MenuTarget::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub scope: MenuScope,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct FetchGenerations {
    latest_all: u64,
    latest_user: u64,
}

impl FetchGenerations {
    pub fn issue(&mut self, scope: MenuScope) -> FetchTicket {
        let slot = self.slot_mut(scope.target());
        *slot += 1;
        FetchTicket {
            scope,
            generation: *slot,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.latest(ticket.scope.target())
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate_all(&mut self) {
        self.latest_all += 1;
        self.latest_user += 1;
    }

    /// Generation of the most recently issued ticket for `target`.
    pub fn latest(&self, target: MenuTarget) -> u64 {
        match target {
            MenuTarget::All => self.latest_all,
            MenuTarget::User => self.latest_user,
        }
    }

    fn slot_mut(&mut self, target: MenuTarget) -> &mut u64 {
        match target {
            MenuTarget::All => &mut self.latest_all,
            MenuTarget::User => &mut self.latest_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut gens = FetchGenerations::default();
        let first = gens.issue(MenuScope::User(1));
        let second = gens.issue(MenuScope::Permissions(1));
        assert!(!gens.is_current(&first));
        assert!(gens.is_current(&second));
    }

    #[test]
    fn test_targets_are_independent() {
        let mut gens = FetchGenerations::default();
        let all = gens.issue(MenuScope::All);
        let user = gens.issue(MenuScope::Current);
        assert!(gens.is_current(&all));
        assert!(gens.is_current(&user));
        assert_eq!(gens.latest(MenuTarget::User), 1);
    }

    #[test]
    fn test_invalidate_all() {
        let mut gens = FetchGenerations::default();
        let all = gens.issue(MenuScope::All);
        let user = gens.issue(MenuScope::Current);
        gens.invalidate_all();
        assert!(!gens.is_current(&all));
        assert!(!gens.is_current(&user));
        let fresh = gens.issue(MenuScope::All);
        assert!(gens.is_current(&fresh));
    }
}
