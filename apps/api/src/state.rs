use std::sync::Arc;

use crate::users::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record store. Production: `PgUserStore` over the one pool built at startup.
    pub users: Arc<dyn UserStore>,
}
