use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid id {value:?}: {reason}")]
    InvalidId { value: String, reason: String },
    #[error("cannot cast {value} to text at path \"{field}\"")]
    Cast { field: &'static str, value: String },
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Db(e.to_string())
    }
}
