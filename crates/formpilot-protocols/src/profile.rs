//! User profile record.
//!
//! The profile is the only source of answers: the matcher reads it, nothing
//! in the pipeline writes it. Serialized as camelCase JSON.

use serde::{Deserialize, Serialize};

pub const PROFILE_VERSION: &str = "1.0.0";

/// The complete user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub meta: Meta,
    pub basics: Basics,
    /// Ordered oldest first; the last entry is the most recent.
    pub education: Vec<Education>,
    /// Ordered oldest first; the last entry is the most recent.
    pub experience: Vec<Experience>,
    pub legal: Legal,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub version: String,
    /// Unix timestamp in milliseconds.
    pub last_updated: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Basics {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_native: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_native: Option<String>,
    pub preferred_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_type: Option<String>,
    pub location: Location,
    pub urls: Urls,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_pdf: Option<ResumeFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Urls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

/// A stored resume document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeFile {
    pub file_name: String,
    /// Base64-encoded file content.
    pub file_data: String,
    /// Unix timestamp in milliseconds.
    pub uploaded_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub school_name: String,
    pub degree: String,
    pub major: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    /// `MM/YYYY`.
    pub start_date: String,
    /// `MM/YYYY` or `Present`.
    pub end_date: String,
}

impl Education {
    pub fn new(
        school_name: impl Into<String>,
        degree: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            school_name: school_name.into(),
            degree: degree.into(),
            major: major.into(),
            ..Default::default()
        }
    }

    pub fn with_gpa(mut self, gpa: impl Into<String>) -> Self {
        self.gpa = Some(gpa.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company_name: String,
    pub position_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub description: String,
}

impl Experience {
    pub fn new(company_name: impl Into<String>, position_title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            company_name: company_name.into(),
            position_title: position_title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Legal {
    /// e.g. `U.S. Citizen`, `Permanent Resident`, `Foreign National`.
    pub citizenship_status: String,
    pub visa_status: VisaStatus,
    pub demographics: Demographics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisaStatus {
    /// e.g. `F-1`, `H-1B`, `O-1`, `TN`, `Other`.
    #[serde(rename = "type")]
    pub visa_type: String,
    pub sponsorship: Sponsorship,
    pub work_authorization: WorkAuthorization,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sponsorship {
    pub require_now: bool,
    pub require_future: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkAuthorization {
    pub authorized: bool,
    /// e.g. `CPT`, `OPT`, `STEM OPT`, `H-1B`.
    #[serde(rename = "type")]
    pub auth_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Demographics {
    pub gender: String,
    pub race: String,
    pub veteran: String,
    pub disability: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub salary: Salary,
    pub location: LocationPreferences,
    /// e.g. `Immediate` or `06/2026`.
    pub start_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Salary {
    /// Zero means "not stated".
    pub expected: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationPreferences {
    pub remote: bool,
    pub onsite: bool,
    pub relocation: bool,
}

const DECLINE: &str = "Decline to identify";

impl Profile {
    /// The skeleton handed out when nothing has been saved yet.
    pub fn placeholder() -> Self {
        Self {
            meta: Meta {
                version: PROFILE_VERSION.to_string(),
                last_updated: chrono::Utc::now().timestamp_millis(),
            },
            basics: Basics {
                first_name_native: Some(String::new()),
                last_name_native: Some(String::new()),
                phone_type: Some("Mobile".to_string()),
                location: Location {
                    country: "United States".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            education: Vec::new(),
            experience: Vec::new(),
            legal: Legal {
                citizenship_status: "Foreign National".to_string(),
                visa_status: VisaStatus {
                    visa_type: "F-1".to_string(),
                    sponsorship: Sponsorship {
                        require_now: false,
                        require_future: true,
                    },
                    work_authorization: WorkAuthorization {
                        authorized: true,
                        auth_type: "OPT".to_string(),
                    },
                },
                demographics: Demographics {
                    gender: DECLINE.to_string(),
                    race: DECLINE.to_string(),
                    veteran: DECLINE.to_string(),
                    disability: DECLINE.to_string(),
                },
            },
            preferences: Preferences {
                salary: Salary {
                    expected: 0.0,
                    currency: "USD".to_string(),
                },
                location: LocationPreferences {
                    remote: true,
                    onsite: true,
                    relocation: true,
                },
                start_date: "Immediate".to_string(),
            },
        }
    }

    /// Stored full name, or `"<first> <last>"` when none is stored.
    pub fn display_name(&self) -> String {
        if !self.basics.full_name.is_empty() {
            return self.basics.full_name.clone();
        }
        format!("{} {}", self.basics.first_name, self.basics.last_name)
    }

    pub fn latest_education(&self) -> Option<&Education> {
        self.education.last()
    }

    pub fn latest_experience(&self) -> Option<&Experience> {
        self.experience.last()
    }

    /// Stamp `meta.last_updated` with the current time.
    pub fn touch(&mut self) {
        self.meta.last_updated = chrono::Utc::now().timestamp_millis();
        if self.meta.version.is_empty() {
            self.meta.version = PROFILE_VERSION.to_string();
        }
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
