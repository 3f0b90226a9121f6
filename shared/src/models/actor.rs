//! Actor Model (操作人)

use serde::{Deserialize, Serialize};

/// Role of whoever issues a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    Client,
    Receptionist,
    Administrator,
    Technician,
}

impl ActorRole {
    /// Receptionists and administrators share the staff column of the transition table
    pub fn is_staff(&self) -> bool {
        matches!(self, ActorRole::Receptionist | ActorRole::Administrator)
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Client => write!(f, "CLIENT"),
            ActorRole::Receptionist => write!(f, "RECEPTIONIST"),
            ActorRole::Administrator => write!(f, "ADMINISTRATOR"),
            ActorRole::Technician => write!(f, "TECHNICIAN"),
        }
    }
}

/// Authenticated caller, as resolved by the surrounding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    pub fn client(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, ActorRole::Client)
    }

    pub fn receptionist(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, ActorRole::Receptionist)
    }

    pub fn administrator(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, ActorRole::Administrator)
    }

    pub fn technician(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, ActorRole::Technician)
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
