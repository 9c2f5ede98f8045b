pub mod account_status;
pub mod identity_session;
pub mod profile_candidate;
pub mod profile_record;
pub mod role;
