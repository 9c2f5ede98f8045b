pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::account_status::AccountStatus;
pub use models::identity_session::IdentitySession;
pub use models::profile_candidate::ProfileCandidate;
pub use models::profile_record::ProfileRecord;
pub use models::role::Role;

#[cfg(test)]
mod tests;
