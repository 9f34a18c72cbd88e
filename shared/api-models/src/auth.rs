//! Login and signup payloads.

use serde::{Deserialize, Serialize};

use crate::{User, UserRole};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Role-dependent signup payload. Patient demographics and doctor
/// credentials are both optional here; the backend validates per role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
}

impl SignupRequest {
    pub fn patient(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
            role: UserRole::Patient,
            date_of_birth: None,
            phone: None,
            address: None,
            gender: None,
            emergency_contact: None,
            emergency_phone: None,
            specialization: None,
            license_number: None,
            years_of_experience: None,
            hospital: None,
            qualifications: None,
            consultation_fee: None,
        }
    }

    pub fn doctor(name: String, email: String, password: String) -> Self {
        Self {
            role: UserRole::Doctor,
            ..Self::patient(name, email, password)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_signup_omits_doctor_fields() {
        let req = SignupRequest {
            date_of_birth: Some("1990-04-02".into()),
            phone: Some("555-0100".into()),
            ..SignupRequest::patient("Pat".into(), "pat@example.com".into(), "secret".into())
        };
        let body = serde_json::to_string(&req).unwrap();
        assert!(body.contains("dateOfBirth"));
        assert!(!body.contains("licenseNumber"));
        assert!(!body.contains("consultationFee"));
    }
}
