use thiserror::Error;

/// Why a request to the fleet backend did not produce a usable payload.
///
/// Display strings are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestFailure {
    /// Network, DNS or connection failure before any response arrived
    #[error("Falha de conexão: {0}")]
    Transport(String),

    /// Non-2xx status code
    #[error("Erro HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Body could not be decoded as the expected JSON
    #[error("Resposta inválida do servidor: {0}")]
    MalformedResponse(String),

    /// Envelope status was not "sucesso"; carries the server message
    #[error("{0}")]
    Application(String),
}

impl RequestFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            RequestFailure::Transport(_) => "transport",
            RequestFailure::HttpStatus { .. } => "http-status",
            RequestFailure::MalformedResponse(_) => "malformed-response",
            RequestFailure::Application(_) => "application",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("canvas '{0}' not found")]
    CanvasNotFound(String),
    #[error("failed to draw chart on '{canvas}': {reason}")]
    Drawing { canvas: String, reason: String },
}
