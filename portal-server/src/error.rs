use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid bind address: {source}")]
    InvalidBindAddr {
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Environment variable error: {message}")]
    EnvVar { message: String },

    #[error("Auth setup error: {0}")]
    Auth(#[from] portal_auth::AuthError),

    #[error("Store error: {0}")]
    Store(#[from] portal_store::StoreError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
