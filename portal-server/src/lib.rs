pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    admin::{
        admin::{list_users, verify_admin},
        verify_admin_response::VerifyAdminResponse,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::bearer_token::BearerToken,
    profiles::{
        profile_dto::ProfileDto,
        profile_list_response::ProfileListResponse,
        profile_query::ProfileQuery,
        profile_response::ProfileResponse,
        profiles::{delete_profile, get_profile, update_profile, upsert_profile},
        update_profile_request::UpdateProfileRequest,
        upsert_profile_request::UpsertProfileRequest,
    },
};

pub use crate::config::Config;
pub use crate::routes::build_router;
pub use crate::state::AppState;
