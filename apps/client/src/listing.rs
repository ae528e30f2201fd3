//! What the user-list screen shows: loading, nothing yet, rows, or a failure.

use tracing::warn;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::User;

pub const DELETE_SUCCESS_MESSAGE: &str = "Usuário deletado com sucesso!";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListingState {
    #[default]
    Loading,
    /// The request succeeded and there are no records.
    Empty,
    Loaded(Vec<User>),
    /// The request failed or returned something other than an array.
    Failed(String),
}

impl ListingState {
    pub fn from_result(result: Result<Vec<User>, ClientError>) -> Self {
        match result {
            Ok(users) if users.is_empty() => ListingState::Empty,
            Ok(users) => ListingState::Loaded(users),
            Err(e) => {
                warn!("Listing failed: {e}");
                ListingState::Failed(e.to_string())
            }
        }
    }

    /// Rows to display; empty for every state but `Loaded`.
    pub fn users(&self) -> &[User] {
        match self {
            ListingState::Loaded(users) => users,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListingState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Fetches the full listing.
pub async fn fetch_listing(client: &ApiClient) -> ListingState {
    ListingState::from_result(client.list_users().await)
}

/// Deletes one record and, only if that succeeded, fetches the listing again.
pub async fn delete_and_refresh(client: &ApiClient, id: i64) -> Result<ListingState, ClientError> {
    client.delete_user(id).await?;
    Ok(fetch_listing(client).await)
}
