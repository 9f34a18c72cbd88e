//! Wire models shared between the TeleMed desktop client and the backend REST API.
//!
//! The backend speaks Mongo-flavored JSON: string `_id` keys, camelCase field
//! names, and a `success`/`message` envelope on every response. These models
//! mirror that shape exactly; presentation concerns stay in the client.

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod chat;
pub mod prescriptions;

use serde::{Deserialize, Serialize};

/// Account role, as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Patient,
    Doctor,
    Admin,
}

/// Admin review state of a doctor registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// A full user record. Patients carry only the common fields; doctors also
/// carry their professional profile and approval state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// Compact user projection embedded inside appointments and prescriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Plain acknowledgement envelope returned by mutation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Doctor listing envelope, shared by the patient browse endpoint and the
/// admin review endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub doctors: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_parses_mongo_shape() {
        let json = r#"{
            "_id": "64fe2a1c9d1e8a0012ab34cd",
            "name": "Asha Rao",
            "email": "asha@example.com",
            "role": "doctor",
            "specialization": "cardiology",
            "yearsOfExperience": 12,
            "consultationFee": 150.0,
            "approvalStatus": "approved"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "64fe2a1c9d1e8a0012ab34cd");
        assert_eq!(user.role, UserRole::Doctor);
        assert_eq!(user.years_of_experience, Some(12));
        assert_eq!(user.approval_status, Some(ApprovalStatus::Approved));
        assert!(user.rejection_reason.is_none());
    }

    #[test]
    fn user_accepts_plain_id_alias() {
        let json = r#"{"id": "abc", "name": "Pat", "role": "patient"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "abc");
        assert_eq!(user.role, UserRole::Patient);
    }
}
