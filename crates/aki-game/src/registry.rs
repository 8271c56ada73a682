//! Session registry
//!
//! Process-wide tracking of who is playing and which guilds have a guess
//! confirmation outstanding. One registry instance is shared by every game
//! the process drives; cloning is cheap and clones share state.

use crate::chat::{GuildId, UserId};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Tracks active players and outstanding guess confirmations
///
/// Invariants:
/// - at most one active session per user id
/// - at most one outstanding guess confirmation per guild id
/// - releasing is idempotent; releasing an id that was never acquired is a
///   no-op
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    players: Arc<RwLock<HashSet<UserId>>>,
    guessing: Arc<RwLock<HashSet<GuildId>>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `user` as playing
    ///
    /// Returns `false` when the user already has an active session. The
    /// check and the insert happen under one write lock, so two concurrent
    /// callers cannot both succeed for the same user.
    pub fn try_acquire(&self, user: &UserId) -> bool {
        match self.players.write() {
            Ok(mut players) => players.insert(user.clone()),
            Err(_) => false,
        }
    }

    /// Remove `user` from the active set
    pub fn release(&self, user: &UserId) {
        if let Ok(mut players) = self.players.write() {
            players.remove(user);
        }
    }

    /// Whether `user` currently has an active session
    pub fn is_playing(&self, user: &UserId) -> bool {
        self.players
            .read()
            .map(|players| players.contains(user))
            .unwrap_or(false)
    }

    /// Mark a guess confirmation as outstanding in `guild`
    ///
    /// Returns `false` when one is already outstanding there.
    pub fn try_lock_guess(&self, guild: &GuildId) -> bool {
        match self.guessing.write() {
            Ok(mut guessing) => guessing.insert(guild.clone()),
            Err(_) => false,
        }
    }

    /// Clear the outstanding guess confirmation for `guild`
    pub fn unlock_guess(&self, guild: &GuildId) {
        if let Ok(mut guessing) = self.guessing.write() {
            guessing.remove(guild);
        }
    }

    /// Number of users with an active session
    pub fn active_players(&self) -> usize {
        self.players.read().map(|players| players.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_session_per_user() {
        let registry = SessionRegistry::new();
        let user = UserId::new("u1");

        assert!(registry.try_acquire(&user));
        assert!(!registry.try_acquire(&user));

        registry.release(&user);
        assert!(registry.try_acquire(&user));
    }

    #[test]
    fn test_release_is_idempotent() {
        let registry = SessionRegistry::new();
        let user = UserId::new("u1");

        // Releasing something never acquired must not panic or error
        registry.release(&user);

        assert!(registry.try_acquire(&user));
        registry.release(&user);
        registry.release(&user);
        assert!(!registry.is_playing(&user));
    }

    #[test]
    fn test_one_guess_per_guild() {
        let registry = SessionRegistry::new();
        let guild = GuildId::new("g1");

        assert!(registry.try_lock_guess(&guild));
        assert!(!registry.try_lock_guess(&guild));

        registry.unlock_guess(&guild);
        assert!(registry.try_lock_guess(&guild));
    }

    #[test]
    fn test_users_and_guilds_are_independent() {
        let registry = SessionRegistry::new();

        assert!(registry.try_acquire(&UserId::new("a")));
        assert!(registry.try_acquire(&UserId::new("b")));
        assert!(registry.try_lock_guess(&GuildId::new("a")));
        assert_eq!(registry.active_players(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = SessionRegistry::new();
        let clone = registry.clone();
        let user = UserId::new("u1");

        assert!(registry.try_acquire(&user));
        assert!(!clone.try_acquire(&user));
        clone.release(&user);
        assert!(!registry.is_playing(&user));
    }
}
