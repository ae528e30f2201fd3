//! HTTP client for the registration API.
//!
//! One request per action, a fixed 30 s timeout, no retries. A failed action is
//! final and the user retries by hand.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ClientError;
use crate::form::RegistrationForm;
use crate::models::{NewUser, User};

/// Development backend address (Android emulator alias for the host machine).
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:5000";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    /// Validates the form and, only if it passes, submits it.
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, ClientError> {
        let new_user = form.validate()?;
        self.create_user(&new_user).await
    }

    /// POST /api/users
    pub async fn create_user(&self, new_user: &NewUser) -> Result<User, ClientError> {
        debug!(?new_user, "Submitting registration");

        let response = self
            .client
            .post(self.users_url())
            .json(new_user)
            .send()
            .await?;
        let response = check_status(response).await?;

        let bytes = response.bytes().await?;
        let user: User = serde_json::from_slice(&bytes)?;
        debug!(id = user.id, "Registration stored");
        Ok(user)
    }

    /// GET /api/users
    ///
    /// A body that is not a JSON array is `UnexpectedBody`, never an empty
    /// listing. An array entry that is not a record is `InvalidRow`.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        debug!("Fetching user listing");

        let response = self.client.get(self.users_url()).send().await?;
        let response = check_status(response).await?;

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|_| ClientError::UnexpectedBody)?;
        let rows = match body {
            Value::Array(rows) => rows,
            other => {
                debug!(body = %other, "Listing body is not an array");
                return Err(ClientError::UnexpectedBody);
            }
        };

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_value(row).map_err(|source| ClientError::InvalidRow { index, source })
            })
            .collect()
    }

    /// DELETE /api/users/:id
    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        debug!(id, "Deleting user");

        let response = self
            .client
            .delete(format!("{}/{id}", self.users_url()))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turns any non-2xx response into `ClientError::Api`, preferring the server's
/// `error` field over a generic status message.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .map(|e| e.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn maria_form() -> RegistrationForm {
        RegistrationForm {
            name: "Maria da Silva".to_string(),
            birthdate: "17/05/1989".to_string(),
            address: "Rua das Acácias, 45".to_string(),
            phone: "(11) 98765-4321".to_string(),
            bolsa_familia: true,
            ..RegistrationForm::default()
        }
    }

    fn maria_row(id: i64) -> Value {
        json!({
            "id": id,
            "name": "Maria da Silva",
            "birthdate": "1989-05-17",
            "address": "Rua das Acácias, 45",
            "phone": "(11) 98765-4321",
            "active": true,
            "bolsa_familia": true,
            "attends_church": false,
            "church_name": null
        })
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.users_url(), "http://localhost:5000/api/users");
    }

    #[tokio::test]
    async fn test_register_posts_normalized_payload() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/api/users")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "name": "Maria da Silva",
                "birthdate": "1989-05-17",
                "active": true,
                "bolsa_familia": true,
                "attends_church": false,
                "church_name": null
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(maria_row(1).to_string())
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let user = client.register(&maria_form()).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name.as_deref(), Some("Maria da Silva"));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_with_invalid_date_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/api/users")
            .expect(0)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let form = RegistrationForm {
            birthdate: "31/02/1990".to_string(),
            ..maria_form()
        };
        let err = client.register(&form).await.unwrap_err();
        assert!(err.is_validation());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_with_blank_name_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/api/users")
            .expect(0)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let form = RegistrationForm {
            name: String::new(),
            ..maria_form()
        };
        let err = client.register(&form).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(crate::errors::FormError::MissingRequiredFields)
        ));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_surfaces_server_error_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/users")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"relation \"users\" does not exist"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.register(&maria_form()).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "relation \"users\" does not exist");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_without_body_falls_back_to_status_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/users")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.register(&maria_form()).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 502");
    }

    #[tokio::test]
    async fn test_list_returns_records() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([maria_row(1), maria_row(2)]).to_string())
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let users = client.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id, 2);
    }

    #[tokio::test]
    async fn test_list_empty_array_is_ok() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        assert!(client.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_non_array_is_unexpected_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"users":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.list_users().await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedBody));
    }

    #[tokio::test]
    async fn test_list_keeps_rows_with_null_fields() {
        let mut server = mockito::Server::new_async().await;
        let mut sparse = maria_row(2);
        sparse["phone"] = Value::Null;
        sparse["name"] = Value::Null;
        let _m = server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([maria_row(1), sparse]).to_string())
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let users = client.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].phone, None);
        assert_eq!(users[1].display_phone(), "Sem telefone");
        assert_eq!(users[1].display_name(), "Nome não disponível");
    }

    #[tokio::test]
    async fn test_list_with_undecodable_row_reports_the_row() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([maria_row(1), "not a record"]).to_string())
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.list_users().await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRow { index: 1, .. }));
        assert!(err.to_string().starts_with("Registro 1 da lista é inválido"));
    }

    #[tokio::test]
    async fn test_silent_server_hits_request_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold connections without ever answering.
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client =
            ApiClient::with_timeout(&format!("http://{addr}"), Duration::from_millis(200)).unwrap();
        let err = client.list_users().await.unwrap_err();
        match &err {
            ClientError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("expected Transport error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "Erro de conexão com o servidor");
    }

    #[test]
    fn test_default_timeout_is_thirty_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_delete_hits_id_path() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/api/users/7")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        client.delete_user(7).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_missing_surfaces_404_message() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("DELETE", "/api/users/9")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Usuário 9 não encontrado"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.delete_user(9).await.unwrap_err();
        assert_eq!(err.to_string(), "Usuário 9 não encontrado");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Nothing listens on port 1.
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = client.list_users().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.to_string(), "Erro de conexão com o servidor");
    }
}
