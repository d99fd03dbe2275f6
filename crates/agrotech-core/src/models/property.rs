//! Property and session user models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Dairy,
    Beef,
    #[default]
    Mixed,
}

impl ActivityKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dairy => "Leite",
            Self::Beef => "Corte",
            Self::Mixed => "Misto",
        }
    }
}

/// The farm itself. There is exactly one per store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Property {
    pub name: String,
    pub owner: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Total area in hectares
    pub total_area: f64,
    /// Rural environmental registry number (CAR)
    pub registration_number: String,
    pub activity: ActivityKind,
    pub founded_year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Manager,
    Employee,
}

impl UserRole {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Manager => "Gerente",
            Self::Employee => "Funcionário",
        }
    }
}

/// Session identity. Not an authenticated principal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl User {
    /// Two-letter avatar initials.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        let user = User {
            name: "Visitante Agro".into(),
            ..Default::default()
        };
        assert_eq!(user.initials(), "VI");
        assert_eq!(User::default().initials(), "");
    }

    #[test]
    fn test_property_round_trip() {
        let property = Property {
            name: "Fazenda Bela Vista".into(),
            total_area: 450.0,
            activity: ActivityKind::Dairy,
            ..Default::default()
        };
        let json = serde_json::to_string(&property).unwrap();
        let back: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(back, property);
    }
}
