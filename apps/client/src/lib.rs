//! Staff-side client for the Sopão registration API.
//!
//! Holds everything the registration app does besides drawing screens:
//! form validation and birthdate normalization, the HTTP calls, and the
//! listing state shown to the user.

pub mod api;
pub mod birthdate;
pub mod errors;
pub mod form;
pub mod listing;
pub mod models;

pub use api::{ApiClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use errors::{ClientError, FormError};
pub use form::RegistrationForm;
pub use listing::ListingState;
pub use models::{NewUser, User};
