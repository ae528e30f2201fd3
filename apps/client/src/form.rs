use crate::birthdate::parse_birthdate;
use crate::errors::FormError;
use crate::models::NewUser;

/// Registration form as staff fill it in. Text fields hold raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    /// `DD/MM/YYYY`
    pub birthdate: String,
    pub address: String,
    pub phone: String,
    pub active: bool,
    pub bolsa_familia: bool,
    pub attends_church: bool,
    /// Only read when `attends_church` is set.
    pub church_name: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            birthdate: String::new(),
            address: String::new(),
            phone: String::new(),
            active: true,
            bolsa_familia: false,
            attends_church: false,
            church_name: String::new(),
        }
    }
}

impl RegistrationForm {
    /// Checks required fields, then the birthdate, and builds the request payload.
    ///
    /// Required-field blankness is reported before date problems, so an empty
    /// birthdate yields `MissingRequiredFields`.
    pub fn validate(&self) -> Result<NewUser, FormError> {
        let required = [&self.name, &self.birthdate, &self.address, &self.phone];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(FormError::MissingRequiredFields);
        }

        let birthdate = parse_birthdate(&self.birthdate)?;

        let church_name = Some(self.church_name.trim())
            .filter(|name| self.attends_church && !name.is_empty())
            .map(str::to_string);

        Ok(NewUser {
            name: self.name.trim().to_string(),
            birthdate,
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            active: self.active,
            bolsa_familia: self.bolsa_familia,
            attends_church: self.attends_church,
            church_name,
        })
    }
}
