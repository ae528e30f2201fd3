use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A stored beneficiary as returned by the API.
///
/// The backend does not validate what it stores, so any column other than
/// `id` may come back null. Text and date columns stay optional; null flags
/// read as their table defaults' zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bolsa_familia: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attends_church: bool,
    #[serde(default)]
    pub church_name: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        non_blank(&self.name).unwrap_or("Nome não disponível")
    }

    pub fn display_phone(&self) -> &str {
        non_blank(&self.phone).unwrap_or("Sem telefone")
    }

    pub fn display_address(&self) -> &str {
        non_blank(&self.address).unwrap_or("Sem endereço")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validated registration payload sent with `POST /api/users`.
/// `birthdate` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub birthdate: NaiveDate,
    pub address: String,
    pub phone: String,
    pub active: bool,
    pub bolsa_familia: bool,
    pub attends_church: bool,
    pub church_name: Option<String>,
}
