//! User Record Store
//!
//! Collaborator interface for the (excluded) auth layer: user records keyed
//! by name plus the password-hash comparison primitive. The scheduler core
//! never touches this; it only consumes the opaque owner identity the auth
//! layer supplies.

use anyhow::Result;
use dashmap::DashMap;

#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    pub password_hash: String,
}

impl User {
    /// Hashes the given plaintext at creation time; the plaintext is never
    /// stored.
    pub fn new(name: &str, password: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            password_hash: generate_hash(password)?,
        })
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.password_hash).unwrap_or(false)
    }
}

pub fn generate_hash(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

pub trait UserDirectory: Send + Sync {
    /// Fails if a user with the same name already exists.
    fn insert_user(&self, user: User) -> Result<()>;
    fn select_user(&self, name: &str) -> Option<User>;
}

pub struct MemoryUserDirectory {
    users: DashMap<String, User>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }
}

impl Default for MemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory for MemoryUserDirectory {
    fn insert_user(&self, user: User) -> Result<()> {
        if self.users.contains_key(&user.name) {
            return Err(anyhow::anyhow!("user already exists: {}", user.name));
        }
        self.users.insert(user.name.clone(), user);
        Ok(())
    }

    fn select_user(&self, name: &str) -> Option<User> {
        self.users.get(name).map(|u| u.clone())
    }
}
