//! Synthesis error taxonomy.

use thiserror::Error;

use crate::ports::AIError;

/// Why a report could not be produced.
///
/// Every variant maps to one plain-language message for the user. None is
/// retried automatically; a retry is a new call made by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// No provider credential is configured.
    #[error("generative provider credential is not configured")]
    ConfigMissing,

    /// The provider refused the call because of quota or request rate.
    #[error("generative provider rate limit reached")]
    RateLimited,

    /// The provider declined to answer for safety reasons.
    #[error("content filtered by provider: {0}")]
    ContentFiltered(String),

    /// The provider answered without any usable text.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Network failure, timeout, server error, rejected credential or a
    /// response that could not be read.
    #[error("generative provider unavailable: {0}")]
    Unavailable(String),
}

impl SynthesisError {
    /// Classifies a provider failure.
    pub fn from_provider(err: AIError) -> Self {
        match err {
            AIError::RateLimited { .. } => SynthesisError::RateLimited,
            AIError::ContentFiltered { reason } => SynthesisError::ContentFiltered(reason),
            AIError::EmptyResponse => SynthesisError::EmptyResponse,
            other => SynthesisError::Unavailable(other.to_string()),
        }
    }

    /// Short label used in log fields.
    pub fn classification(&self) -> &'static str {
        match self {
            SynthesisError::ConfigMissing => "config_missing",
            SynthesisError::RateLimited => "rate_limited",
            SynthesisError::ContentFiltered(_) => "content_filtered",
            SynthesisError::EmptyResponse => "empty_response",
            SynthesisError::Unavailable(_) => "unavailable",
        }
    }

    /// Message shown to the person who filled in the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            SynthesisError::ConfigMissing => {
                "Chave de API não configurada. Verifique as variáveis de ambiente ou o arquivo .env."
            }
            SynthesisError::RateLimited => {
                "Muitas solicitações no momento. Aguarde alguns instantes e tente novamente."
            }
            SynthesisError::ContentFiltered(_) => {
                "Não foi possível gerar o relatório com as respostas enviadas. Revise o conteúdo e tente novamente."
            }
            SynthesisError::EmptyResponse => {
                "O relatório veio vazio desta vez. Tente gerar novamente."
            }
            SynthesisError::Unavailable(_) => {
                "Não foi possível gerar seu diagnóstico agora. Nossa equipe foi notificada."
            }
        }
    }

    /// True when trying again later may succeed without changing anything.
    pub fn is_user_retryable(&self) -> bool {
        matches!(
            self,
            SynthesisError::RateLimited | SynthesisError::EmptyResponse | SynthesisError::Unavailable(_)
        )
    }
}

impl From<AIError> for SynthesisError {
    fn from(err: AIError) -> Self {
        Self::from_provider(err)
    }
}
