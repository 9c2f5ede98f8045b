pub mod profile_dto;
pub mod profile_list_response;
pub mod profile_query;
pub mod profile_response;
pub mod profiles;
pub mod update_profile_request;
pub mod upsert_profile_request;
