use crate::{AccountStatus, ProfileCandidate, ProfileRecord, Role};

#[test]
fn test_new_record_defaults() {
    let record = ProfileRecord::new("sub-1".to_string(), "a@example.com".to_string());

    assert_eq!(record.subject_id, "sub-1");
    assert_eq!(record.email, "a@example.com");
    assert_eq!(record.role, Role::User);
    assert_eq!(record.status, AccountStatus::Active);
    assert!(!record.is_deleted());
    assert!(!record.is_admin());
}

#[test]
fn test_placeholder_email_is_deterministic_and_distinct() {
    let a1 = ProfileRecord::placeholder_email("subject-a");
    let a2 = ProfileRecord::placeholder_email("subject-a");
    let b = ProfileRecord::placeholder_email("subject-b");

    assert_eq!(a1, a2);
    assert_ne!(a1, b);
    assert!(a1.contains("subject-a"));
}

#[test]
fn test_from_candidate_synthesizes_email_when_absent() {
    let candidate = ProfileCandidate {
        phone_number: Some("+712345678".to_string()),
        ..ProfileCandidate::default()
    };
    let record = ProfileRecord::from_candidate("phone-only".to_string(), &candidate);

    assert_eq!(record.email, ProfileRecord::placeholder_email("phone-only"));
    assert_eq!(record.phone_number.as_deref(), Some("+712345678"));
}

#[test]
fn test_apply_never_erases_with_absent_fields() {
    let mut record = ProfileRecord::new("sub-1".to_string(), "a@example.com".to_string());
    record.university = Some("A".to_string());

    // Candidate omits university entirely
    let candidate = ProfileCandidate {
        department: Some("Physics".to_string()),
        ..ProfileCandidate::default()
    };
    record.apply(&candidate);

    assert_eq!(record.university.as_deref(), Some("A"));
    assert_eq!(record.department.as_deref(), Some("Physics"));
}

#[test]
fn test_apply_never_erases_with_empty_strings() {
    let mut record = ProfileRecord::new("sub-1".to_string(), "a@example.com".to_string());
    record.course = Some("BSc CS".to_string());

    let candidate = ProfileCandidate {
        course: Some("".to_string()),
        email: Some("   ".to_string()),
        ..ProfileCandidate::default()
    };
    record.apply(&candidate);

    assert_eq!(record.course.as_deref(), Some("BSc CS"));
    assert_eq!(record.email, "a@example.com");
}

#[test]
fn test_display_name_derived_from_name_parts() {
    let mut record = ProfileRecord::new("sub-1".to_string(), "a@example.com".to_string());
    record.display_name = Some("oldhandle".to_string());

    let candidate = ProfileCandidate {
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        ..ProfileCandidate::default()
    };
    record.apply(&candidate);

    assert_eq!(record.display_name.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_display_name_kept_when_name_parts_incomplete() {
    let mut record = ProfileRecord::new("sub-1".to_string(), "a@example.com".to_string());

    let candidate = ProfileCandidate {
        display_name: Some("handle".to_string()),
        first_name: Some("Jane".to_string()),
        ..ProfileCandidate::default()
    };
    record.apply(&candidate);

    // No last name, so the explicit display name stands
    assert_eq!(record.display_name.as_deref(), Some("handle"));
}

#[test]
fn test_apply_is_idempotent() {
    let candidate = ProfileCandidate {
        email: Some("jane@uni.edu".to_string()),
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        university: Some("State".to_string()),
        role: Some(Role::Admin),
        ..ProfileCandidate::default()
    };

    let mut record = ProfileRecord::from_candidate("sub-1".to_string(), &candidate);
    let first_pass = record.clone();
    record.apply(&candidate);

    assert_eq!(record.email, first_pass.email);
    assert_eq!(record.display_name, first_pass.display_name);
    assert_eq!(record.university, first_pass.university);
    assert_eq!(record.role, first_pass.role);
}

#[test]
fn test_overlay_prefers_explicit_values() {
    let session_fields = ProfileCandidate {
        email: Some("session@example.com".to_string()),
        display_name: Some("Session Name".to_string()),
        ..ProfileCandidate::default()
    };
    let explicit = ProfileCandidate {
        display_name: Some("Explicit Name".to_string()),
        ..ProfileCandidate::default()
    };

    let merged = session_fields.overlaid_with(explicit);

    assert_eq!(merged.email.as_deref(), Some("session@example.com"));
    assert_eq!(merged.display_name.as_deref(), Some("Explicit Name"));
}
