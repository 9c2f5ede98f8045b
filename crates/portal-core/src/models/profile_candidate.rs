use crate::{AccountStatus, IdentitySession, Role};

use serde::{Deserialize, Serialize};

/// Partial profile payload used for merge-upserts.
///
/// Every field is optional; absent and empty-string fields are treated
/// identically (not present) so that a partial sync can never erase a
/// previously captured value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileCandidate {
    pub email: Option<String>,
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
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
}

/// Drop empty strings so they never participate in a merge
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProfileCandidate {
    /// Candidate built from the display fields of a live session
    pub fn from_session(session: &IdentitySession) -> Self {
        Self {
            email: non_empty(session.primary_email.clone()),
            display_name: non_empty(session.display_name.clone()),
            phone_number: non_empty(session.phone_number.clone()),
            photo_url: non_empty(session.photo_url.clone()),
            ..Self::default()
        }
    }

    /// Overlay `explicit` on top of `self`: explicitly passed values win
    /// over session-derived ones, field by field.
    pub fn overlaid_with(self, explicit: ProfileCandidate) -> Self {
        Self {
            email: non_empty(explicit.email).or(self.email),
            display_name: non_empty(explicit.display_name).or(self.display_name),
            phone_number: non_empty(explicit.phone_number).or(self.phone_number),
            photo_url: non_empty(explicit.photo_url).or(self.photo_url),
            first_name: non_empty(explicit.first_name).or(self.first_name),
            last_name: non_empty(explicit.last_name).or(self.last_name),
            university: non_empty(explicit.university).or(self.university),
            college: non_empty(explicit.college).or(self.college),
            department: non_empty(explicit.department).or(self.department),
            course: non_empty(explicit.course).or(self.course),
            year_of_study: non_empty(explicit.year_of_study).or(self.year_of_study),
            semester: non_empty(explicit.semester).or(self.semester),
            unit: non_empty(explicit.unit).or(self.unit),
            role: explicit.role.or(self.role),
            status: explicit.status.or(self.status),
        }
    }

    /// Normalized view with empty strings dropped
    pub fn normalized(self) -> Self {
        Self {
            email: non_empty(self.email),
            display_name: non_empty(self.display_name),
            phone_number: non_empty(self.phone_number),
            photo_url: non_empty(self.photo_url),
            first_name: non_empty(self.first_name),
            last_name: non_empty(self.last_name),
            university: non_empty(self.university),
            college: non_empty(self.college),
            department: non_empty(self.department),
            course: non_empty(self.course),
            year_of_study: non_empty(self.year_of_study),
            semester: non_empty(self.semester),
            unit: non_empty(self.unit),
            role: self.role,
            status: self.status,
        }
    }
}
