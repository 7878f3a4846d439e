// 👤 Account Entities - Users and Administrators
//
// Both kinds share the Account capability (id, username, email, kind) but are
// independent structs stored in independent registries. The AccountRegistry
// keeps a registration log so callers can walk every account, in the order
// accounts were created, and branch on `AccountKind` instead of downcasting.

use crate::error::CatalogResult;
use crate::registry::{ids_match, Identified, Registry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

// ============================================================================
// ACCOUNT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccountKind {
    /// Regular library user (keeps favorites)
    User,

    /// Administrator (holds privileges)
    Administrator,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::User => "User",
            AccountKind::Administrator => "Administrator",
        }
    }
}

/// Capability shared by every account variant
pub trait Account: Identified {
    fn username(&self) -> &str;
    fn email(&self) -> &str;
    fn kind(&self) -> AccountKind;
    fn registered_at(&self) -> DateTime<Utc>;
}

// ============================================================================
// USER
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: String,
    pub username: String,
    pub email: String,
    registered_at: DateTime<Utc>,

    /// Favorited movies, written only by the favorites tracker
    favorites: Vec<FavoriteRef>,
}

/// A favorited movie id plus the registration stamp of the movie it was
/// taken from, so a later movie reusing the id is not mistaken for it
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
struct FavoriteRef {
    movie_id: String,
    #[serde(skip)]
    registration: u64,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            registered_at: Utc::now(),
            favorites: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Favorited movie ids in the order they were added. Ids of deleted
    /// movies stay here until explicitly removed.
    pub fn favorites(&self) -> impl Iterator<Item = &str> + '_ {
        self.favorites.iter().map(|favorite| favorite.movie_id.as_str())
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.favorite_position(movie_id).is_some()
    }

    /// Registration stamp of the movie the favorite was added for
    pub(crate) fn favorite_registration(&self, movie_id: &str) -> Option<u64> {
        self.favorite_position(movie_id)
            .map(|index| self.favorites[index].registration)
    }

    pub(crate) fn add_favorite(&mut self, movie_id: &str, registration: u64) -> bool {
        if self.is_favorite(movie_id) {
            return false;
        }
        self.favorites.push(FavoriteRef {
            movie_id: movie_id.to_string(),
            registration,
        });
        true
    }

    pub(crate) fn remove_favorite(&mut self, movie_id: &str) -> bool {
        match self.favorite_position(movie_id) {
            Some(index) => {
                self.favorites.remove(index);
                true
            }
            None => false,
        }
    }

    fn favorite_position(&self, movie_id: &str) -> Option<usize> {
        self.favorites
            .iter()
            .position(|favorite| ids_match(&favorite.movie_id, movie_id))
    }

    pub(crate) fn clear_favorites(&mut self) -> usize {
        let removed = self.favorites.len();
        self.favorites.clear();
        removed
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Account for User {
    fn username(&self) -> &str {
        &self.username
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn kind(&self) -> AccountKind {
        AccountKind::User
    }

    fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

// ============================================================================
// ADMINISTRATOR
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Administrator {
    id: String,
    pub username: String,
    pub email: String,
    registered_at: DateTime<Utc>,
    privileges: Vec<String>,
}

impl Administrator {
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        Administrator {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            registered_at: Utc::now(),
            privileges: Vec::new(),
        }
    }

    /// Builder: grant initial privileges
    pub fn with_privileges<I, S>(mut self, privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for privilege in privileges {
            self.grant_privilege(privilege.as_ref());
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn privileges(&self) -> &[String] {
        &self.privileges
    }

    /// Grant a privilege; `false` if blank or already held
    pub fn grant_privilege(&mut self, privilege: &str) -> bool {
        let privilege = privilege.trim();
        if privilege.is_empty() || self.has_privilege(privilege) {
            return false;
        }
        self.privileges.push(privilege.to_string());
        true
    }

    pub fn revoke_privilege(&mut self, privilege: &str) -> bool {
        match self.privileges.iter().position(|p| p == privilege.trim()) {
            Some(index) => {
                self.privileges.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.privileges.iter().any(|p| p == privilege.trim())
    }
}

impl Identified for Administrator {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Account for Administrator {
    fn username(&self) -> &str {
        &self.username
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Administrator
    }

    fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

// ============================================================================
// ACCOUNT VIEW
// ============================================================================

/// Borrowed view over either account kind
#[derive(Debug, Clone, Copy)]
pub enum AccountView<'a> {
    User(&'a User),
    Administrator(&'a Administrator),
}

impl<'a> AccountView<'a> {
    /// Borrowed from the registry, not from the view
    pub fn id(&self) -> &'a str {
        self.inner().id()
    }

    pub fn username(&self) -> &'a str {
        self.inner().username()
    }

    pub fn email(&self) -> &'a str {
        self.inner().email()
    }

    pub fn as_user(&self) -> Option<&'a User> {
        match *self {
            AccountView::User(user) => Some(user),
            AccountView::Administrator(_) => None,
        }
    }

    pub fn as_admin(&self) -> Option<&'a Administrator> {
        match *self {
            AccountView::Administrator(admin) => Some(admin),
            AccountView::User(_) => None,
        }
    }

    fn inner(&self) -> &'a dyn Account {
        match *self {
            AccountView::User(user) => user,
            AccountView::Administrator(admin) => admin,
        }
    }
}

impl Identified for AccountView<'_> {
    fn id(&self) -> &str {
        self.inner().id()
    }
}

impl Account for AccountView<'_> {
    fn username(&self) -> &str {
        self.inner().username()
    }

    fn email(&self) -> &str {
        self.inner().email()
    }

    fn kind(&self) -> AccountKind {
        self.inner().kind()
    }

    fn registered_at(&self) -> DateTime<Utc> {
        self.inner().registered_at()
    }
}

// ============================================================================
// ACCOUNT REGISTRY
// ============================================================================

/// Registration slot in the unified log. Accounts are never removed, so a
/// slot stays valid for the registry's lifetime.
#[derive(Debug, Clone, Copy)]
struct LogEntry {
    kind: AccountKind,
    slot: usize,
}

/// Registry of users and administrators
///
/// The two kinds live in separate id namespaces: a user and an administrator
/// may share the same id.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    users: Registry<User>,
    admins: Registry<Administrator>,
    log: Vec<LogEntry>,
}

impl AccountRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        AccountRegistry {
            users: Registry::new("user"),
            admins: Registry::new("administrator"),
            log: Vec::new(),
        }
    }

    pub fn try_register_user(&mut self, user: User) -> CatalogResult<()> {
        let slot = self.users.len();
        self.users.try_register(user)?;
        self.log.push(LogEntry {
            kind: AccountKind::User,
            slot,
        });
        Ok(())
    }

    pub fn register_user(&mut self, user: User) -> bool {
        match self.try_register_user(user) {
            Ok(()) => true,
            Err(err) => {
                debug!(reason = %err, "user registration rejected");
                false
            }
        }
    }

    pub fn try_register_admin(&mut self, admin: Administrator) -> CatalogResult<()> {
        let slot = self.admins.len();
        self.admins.try_register(admin)?;
        self.log.push(LogEntry {
            kind: AccountKind::Administrator,
            slot,
        });
        Ok(())
    }

    pub fn register_admin(&mut self, admin: Administrator) -> bool {
        match self.try_register_admin(admin) {
            Ok(()) => true,
            Err(err) => {
                debug!(reason = %err, "administrator registration rejected");
                false
            }
        }
    }

    pub fn find_user_by_id(&self, id: &str) -> Option<&User> {
        self.users.find_by_id(id)
    }

    pub fn find_admin_by_id(&self, id: &str) -> Option<&Administrator> {
        self.admins.find_by_id(id)
    }

    pub fn find_admin_by_id_mut(&mut self, id: &str) -> Option<&mut Administrator> {
        self.admins.find_by_id_mut(id)
    }

    pub fn users(&self) -> &Registry<User> {
        &self.users
    }

    pub fn admins(&self) -> &Registry<Administrator> {
        &self.admins
    }

    /// Favorites are written through the tracker only
    pub(crate) fn users_mut(&mut self) -> &mut Registry<User> {
        &mut self.users
    }

    /// Every account in registration order, users and administrators
    /// interleaved
    pub fn all_accounts(&self) -> impl Iterator<Item = AccountView<'_>> + '_ {
        self.log.iter().filter_map(move |entry| match entry.kind {
            AccountKind::User => self.users.get(entry.slot).map(AccountView::User),
            AccountKind::Administrator => {
                self.admins.get(entry.slot).map(AccountView::Administrator)
            }
        })
    }

    /// Count total accounts
    pub fn count(&self) -> usize {
        self.log.len()
    }

    pub fn by_kind(&self, kind: AccountKind) -> impl Iterator<Item = AccountView<'_>> + '_ {
        self.all_accounts().filter(move |account| account.kind() == kind)
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_labels() {
        assert_eq!(AccountKind::User.as_str(), "User");
        assert_eq!(AccountKind::Administrator.as_str(), "Administrator");
    }

    #[test]
    fn test_user_creation() {
        let user = User::new("U1", "ana", "ana@example.com");
        assert_eq!(user.id(), "U1");
        assert_eq!(user.kind(), AccountKind::User);
        assert_eq!(Account::username(&user), "ana");
        assert_eq!(user.favorite_count(), 0);
        assert!(user.registered_at() <= Utc::now());
    }

    #[test]
    fn test_admin_privileges() {
        let mut admin = Administrator::new("A1", "root", "root@example.com")
            .with_privileges(["catalog:write", "catalog:write", " "]);
        assert_eq!(admin.privileges(), &["catalog:write".to_string()]);

        assert!(admin.grant_privilege("accounts:read"));
        assert!(!admin.grant_privilege("accounts:read"));
        assert!(admin.has_privilege("accounts:read"));

        assert!(admin.revoke_privilege("accounts:read"));
        assert!(!admin.revoke_privilege("accounts:read"));
        assert!(!admin.has_privilege("accounts:read"));
    }

    #[test]
    fn test_registry_rejects_duplicate_user() {
        let mut registry = AccountRegistry::new();
        assert!(registry.register_user(User::new("U1", "ana", "ana@example.com")));
        assert!(!registry.register_user(User::new("u1", "other", "other@example.com")));

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.find_user_by_id("U1").unwrap().username, "ana");
    }

    #[test]
    fn test_user_and_admin_may_share_id() {
        let mut registry = AccountRegistry::new();
        assert!(registry.register_user(User::new("X1", "ana", "ana@example.com")));
        assert!(registry.register_admin(Administrator::new("X1", "root", "root@example.com")));

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.find_user_by_id("x1").unwrap().username, "ana");
        assert_eq!(registry.find_admin_by_id("x1").unwrap().username, "root");
    }

    #[test]
    fn test_all_accounts_interleaves_in_registration_order() {
        let mut registry = AccountRegistry::new();
        registry.register_user(User::new("U1", "ana", "ana@example.com"));
        registry.register_admin(Administrator::new("A1", "root", "root@example.com"));
        registry.register_user(User::new("U2", "ben", "ben@example.com"));
        // rejected registrations never reach the log
        registry.register_admin(Administrator::new("a1", "dup", "dup@example.com"));

        let seen: Vec<(AccountKind, String)> = registry
            .all_accounts()
            .map(|account| (account.kind(), account.id().to_string()))
            .collect();

        assert_eq!(
            seen,
            vec![
                (AccountKind::User, "U1".to_string()),
                (AccountKind::Administrator, "A1".to_string()),
                (AccountKind::User, "U2".to_string()),
            ]
        );
    }

    #[test]
    fn test_account_view_branches_without_downcast() {
        let mut registry = AccountRegistry::new();
        registry.register_user(User::new("U1", "ana", "ana@example.com"));
        registry.register_admin(
            Administrator::new("A1", "root", "root@example.com").with_privileges(["all"]),
        );

        let admins: Vec<&Administrator> = registry
            .all_accounts()
            .filter_map(|account| account.as_admin())
            .collect();
        assert_eq!(admins.len(), 1);
        assert!(admins[0].has_privilege("all"));

        let users = registry.by_kind(AccountKind::User).count();
        assert_eq!(users, 1);
        assert_eq!(registry.all_accounts().next().unwrap().email(), "ana@example.com");
    }
}
