use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use thiserror::Error;
use tracing::{error, info};

/// Entity kinds a lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Post,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => write!(f, "User"),
            Entity::Post => write!(f, "Post"),
        }
    }
}

/// Outcome of a repository call that did not produce a value.
///
/// `NotFound` means the source answered and the entity does not exist.
/// The other variants mean the source could not be asked or could not
/// answer, and the same call may succeed later.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("request to {endpoint} failed: {message}")]
    Transport {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },
}

impl RepoError {
    pub fn not_found(entity: Entity, id: &str) -> Self {
        RepoError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound { .. })
    }

    /// True for every failure that is not a definitive "does not exist".
    pub fn is_transport(&self) -> bool {
        !self.is_not_found()
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadGateway(String),
    GatewayTimeout(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad Gateway: {}", msg),
            ApiError::GatewayTimeout(msg) => write!(f, "Gateway Timeout: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match &err {
            RepoError::NotFound { entity, .. } => {
                info!(error = %err, "primary lookup missed");
                ApiError::NotFound(format!("{} not found", entity))
            }
            RepoError::Timeout { .. } => {
                error!(error = %err, "data source timed out");
                ApiError::GatewayTimeout("The data source did not respond in time".to_string())
            }
            RepoError::Transport { .. } => {
                error!(error = %err, "data source unavailable");
                ApiError::BadGateway("The data source could not be reached".to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            ApiError::NotFound(msg) | ApiError::BadGateway(msg) | ApiError::GatewayTimeout(msg) => msg,
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "message": msg }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_repository_errors_to_statuses() {
        let not_found: ApiError = RepoError::not_found(Entity::Post, "p9").into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let timeout: ApiError = RepoError::Timeout {
            endpoint: "/posts/p1".into(),
        }
        .into();
        assert_eq!(timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);

        let transport: ApiError = RepoError::Transport {
            endpoint: "/posts/p1".into(),
            status: Some(500),
            message: "boom".into(),
        }
        .into();
        assert_eq!(transport.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn classifies_not_found_apart_from_transport() {
        let err = RepoError::not_found(Entity::User, "u1");
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "User not found: u1");
    }
}
