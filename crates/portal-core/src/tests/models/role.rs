use crate::{AccountStatus, CoreError, Role};

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn test_role_from_str_round_trip() {
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
}

#[test]
fn test_role_from_str_rejects_unknown() {
    let err = Role::from_str("superuser").unwrap_err();
    assert!(matches!(err, CoreError::InvalidRole { .. }));
}

#[test]
fn test_role_default_is_user() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn test_account_status_round_trip() {
    assert_eq!(AccountStatus::from_str("active").unwrap(), AccountStatus::Active);
    assert_eq!(
        AccountStatus::from_str("inactive").unwrap(),
        AccountStatus::Inactive
    );
    assert_eq!(AccountStatus::default(), AccountStatus::Active);
}
