pub mod admin;
pub mod verify_admin_response;
