use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Invariant violations raised by the Group aggregate. These are synchronous
/// precondition failures; the aggregate is left untouched whenever one is
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Member with ID {0} already exists in this group.")]
    MemberAlreadyExists(String),

    #[error("Payer with ID {0} is not a member of this group.")]
    PayerNotMember(String),

    #[error("Participant with ID {0} is not a member of this group.")]
    ParticipantNotMember(String),

    #[error("An expense needs at least one participant.")]
    NoParticipants,
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Rejected request payload. Raised by the explicit DTO checks before any
/// domain entity is constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError(message.into())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Group with id {0} does not exist")]
    GroupNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Client-facing error. Everything the handlers can fail with converges here
/// so the status mapping lives in one place.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::UseCase(UseCaseError::Domain(domain)) => match domain {
                DomainError::MemberAlreadyExists(_) => "member_already_exists",
                DomainError::PayerNotMember(_) => "payer_not_member",
                DomainError::ParticipantNotMember(_) => "participant_not_member",
                DomainError::NoParticipants => "no_participants",
            },
            ApiError::UseCase(UseCaseError::GroupNotFound(_)) => "group_not_found",
            ApiError::UseCase(UseCaseError::Repository(_)) => "store_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UseCase(UseCaseError::Domain(DomainError::MemberAlreadyExists(_))) => {
                StatusCode::CONFLICT
            }
            ApiError::UseCase(UseCaseError::Domain(_)) => StatusCode::BAD_REQUEST,
            ApiError::UseCase(UseCaseError::GroupNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::UseCase(UseCaseError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::UseCase(UseCaseError::Repository(err)) = self {
            tracing::error!("repository failure: {err}");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }))
    }
}
