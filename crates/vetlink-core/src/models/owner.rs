//! Owner (clinic user) models.

use serde::{Deserialize, Serialize};

/// Role of a clinic user. Only `Client` rows participate in pet ownership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Vet,
    Admin,
}

/// A clinic user; client-role users may own zero or more pets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    /// Unique user ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Postal address
    pub address: String,
    /// User role
    pub role: Role,
}

impl Owner {
    /// Create a new client-role owner.
    pub fn new_client(name: String, phone: String, email: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            phone,
            email,
            address: String::new(),
            role: Role::Client,
        }
    }

    /// Whether this user may own pets.
    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }
}
