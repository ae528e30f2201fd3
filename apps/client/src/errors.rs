use thiserror::Error;

/// Local form problems. Caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Por favor, preencha todos os campos obrigatórios.")]
    MissingRequiredFields,

    #[error("Formato de data inválido. Use DD/MM/YYYY com um ano válido (ex.: 1989).")]
    InvalidBirthdate,
}

/// Failure of a single client action. Display text is the message shown to staff.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] FormError),

    #[error("Erro de conexão com o servidor")]
    Transport(#[from] reqwest::Error),

    /// Non-success status; `message` is the server's `error` field when present.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Os dados recebidos não estão no formato esperado (array).")]
    UnexpectedBody,

    /// The listing is an array but one of its entries is not a record.
    #[error("Registro {index} da lista é inválido: {source}")]
    InvalidRow {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Resposta inválida do servidor: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the action failed without ever reaching the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// Message shown when a registration attempt fails.
    /// Validation problems are shown as-is; anything past validation is
    /// prefixed the way the registration screen reports it.
    pub fn registration_message(&self) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            other => format!("Erro ao cadastrar: {other}"),
        }
    }
}
