use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered beneficiary, as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub birthdate: NaiveDate,
    pub address: String,
    pub phone: String,
    pub active: bool,
    pub bolsa_familia: bool,
    pub attends_church: bool,
    pub church_name: Option<String>,
}

/// Body of `POST /api/users`. The birthdate arrives already normalized to `YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub birthdate: NaiveDate,
    pub address: String,
    pub phone: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub bolsa_familia: bool,
    #[serde(default)]
    pub attends_church: bool,
    #[serde(default)]
    pub church_name: Option<String>,
}

fn default_active() -> bool {
    true
}

impl NewUser {
    /// Church name to persist: an empty string is stored as NULL.
    pub fn church_name(&self) -> Option<&str> {
        self.church_name.as_deref().filter(|name| !name.is_empty())
    }
}
