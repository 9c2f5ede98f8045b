use crate::{AccountStatus, ProfileCandidate, Role};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted profile record, keyed by the immutable `subject_id`.
///
/// `email` is never empty: phone-only subjects get a deterministic
/// placeholder derived from the subject id (see [`placeholder_email`]).
///
/// [`placeholder_email`]: ProfileRecord::placeholder_email
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub subject_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
    pub semester: Option<String>,
    pub unit: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn new(subject_id: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            subject_id,
            email,
            display_name: None,
            phone_number: None,
            photo_url: None,
            first_name: None,
            last_name: None,
            university: None,
            college: None,
            department: None,
            course: None,
            year_of_study: None,
            semester: None,
            unit: None,
            role: Role::User,
            status: AccountStatus::Active,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deterministic stand-in email for subjects that have none (phone-only
    /// sign-ups). Embeds the subject id so two subjects can never collide;
    /// uses the reserved `.invalid` TLD so it can never route.
    pub fn placeholder_email(subject_id: &str) -> String {
        format!("{}@placeholder.invalid", subject_id)
    }

    /// Merge candidate fields into this record.
    ///
    /// Merge-if-present: absent or empty candidate fields never erase a
    /// stored value. When first and last name are both known afterwards,
    /// the display name is rewritten as their concatenation, winning over
    /// whatever was stored before.
    pub fn apply(&mut self, candidate: &ProfileCandidate) {
        let candidate = candidate.clone().normalized();

        if let Some(email) = candidate.email {
            self.email = email;
        }
        if candidate.display_name.is_some() {
            self.display_name = candidate.display_name;
        }
        if candidate.phone_number.is_some() {
            self.phone_number = candidate.phone_number;
        }
        if candidate.photo_url.is_some() {
            self.photo_url = candidate.photo_url;
        }
        if candidate.first_name.is_some() {
            self.first_name = candidate.first_name;
        }
        if candidate.last_name.is_some() {
            self.last_name = candidate.last_name;
        }
        if candidate.university.is_some() {
            self.university = candidate.university;
        }
        if candidate.college.is_some() {
            self.college = candidate.college;
        }
        if candidate.department.is_some() {
            self.department = candidate.department;
        }
        if candidate.course.is_some() {
            self.course = candidate.course;
        }
        if candidate.year_of_study.is_some() {
            self.year_of_study = candidate.year_of_study;
        }
        if candidate.semester.is_some() {
            self.semester = candidate.semester;
        }
        if candidate.unit.is_some() {
            self.unit = candidate.unit;
        }
        if let Some(role) = candidate.role {
            self.role = role;
        }
        if let Some(status) = candidate.status {
            self.status = status;
        }

        if let (Some(first), Some(last)) = (&self.first_name, &self.last_name) {
            self.display_name = Some(format!("{} {}", first, last));
        }

        self.updated_at = Utc::now();
    }

    /// Build a fresh record from a candidate (first reconciliation)
    pub fn from_candidate(subject_id: String, candidate: &ProfileCandidate) -> Self {
        let email = candidate
            .email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| Self::placeholder_email(&subject_id));

        let mut record = Self::new(subject_id, email);
        record.apply(candidate);
        record
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
