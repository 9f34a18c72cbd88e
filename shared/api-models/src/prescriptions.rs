//! Prescription wire models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PersonRef;

/// One prescribed medication line. `instructions` is free-form and optional;
/// the other fields are required by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Medication {
    /// A line is submittable once every required field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.dosage.trim().is_empty()
            && !self.frequency.trim().is_empty()
            && !self.duration.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub doctor: Option<PersonRef>,
    #[serde(default)]
    pub patient: Option<PersonRef>,
    #[serde(default)]
    pub appointment_id: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequest {
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub medications: Vec<Medication>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrescriptionsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_medication_is_rejected() {
        let med = Medication {
            name: "Amoxicillin".into(),
            dosage: "500mg".into(),
            frequency: String::new(),
            duration: "7 days".into(),
            instructions: None,
        };
        assert!(!med.is_complete());
    }

    #[test]
    fn prescription_parses() {
        let json = r#"{
            "success": true,
            "prescriptions": [{
                "_id": "rx1",
                "doctor": {"_id": "doc1", "name": "Asha Rao", "specialization": "cardiology"},
                "diagnosis": "Hypertension",
                "medications": [
                    {"name": "Amlodipine", "dosage": "5mg", "frequency": "once daily", "duration": "30 days"}
                ],
                "createdAt": "2024-06-01T12:00:00.000Z"
            }]
        }"#;
        let parsed: PrescriptionsResponse = serde_json::from_str(json).unwrap();
        let rx = &parsed.prescriptions[0];
        assert_eq!(rx.medications.len(), 1);
        assert!(rx.medications[0].is_complete());
        assert!(rx.notes.is_none());
    }
}
