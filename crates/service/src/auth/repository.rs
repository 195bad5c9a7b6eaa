use async_trait::async_trait;
use tokio::sync::RwLock;

use super::domain::User;
use super::errors::AuthError;

/// Repository abstraction for user storage.
///
/// Implementations own their synchronization; the service never locks.
/// Storage faults are reported as `AuthError::Repository`, which the HTTP layer
/// turns into a 500. The in-memory store below cannot fail and never returns it.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Append a user. Emails are not required to be unique.
    async fn add(&self, user: User) -> Result<(), AuthError>;
    /// First user, in insertion order, whose email matches ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
    async fn count(&self) -> Result<usize, AuthError>;
}

/// Case-insensitive email comparison, folding one `char` at a time.
///
/// `str::to_lowercase` picks the Greek final sigma by context, so whole-string
/// lowercasing would treat "ΟΔΟΣ" and "οδοσ" as different.
pub fn emails_match(a: &str, b: &str) -> bool {
    a == b || a.chars().flat_map(fold_char).eq(b.chars().flat_map(fold_char))
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase().map(|l| if l == 'ς' { 'σ' } else { l })
}

/// Process-lifetime store backed by an ordered `Vec`.
///
/// Lookups are a linear scan, fine for small user counts.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: User) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        users.push(user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| emails_match(&u.email, email)).cloned())
    }

    async fn count(&self) -> Result<usize, AuthError> {
        Ok(self.users.read().await.len())
    }
}
