//! Appointment wire models and status transitions.

use serde::{Deserialize, Serialize};

use crate::PersonRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

/// A booked appointment. Depending on who asks, the backend populates the
/// counterpart reference (`doctor` for patients, `patient` for doctors).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub doctor: Option<PersonRef>,
    #[serde(default)]
    pub patient: Option<PersonRef>,
    /// Calendar date as entered at booking, e.g. `2024-06-14`.
    pub date: String,
    /// Wall-clock slot as entered at booking, e.g. `10:30`.
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

/// Doctor-side status transition. A rejection carries the reason shown to
/// the patient.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_list_parses() {
        let json = r#"{
            "success": true,
            "appointments": [{
                "_id": "apt1",
                "doctor": {"_id": "doc1", "name": "Asha Rao", "specialization": "cardiology", "hospital": "City Care"},
                "date": "2024-06-14",
                "time": "10:30",
                "reason": "Follow-up",
                "status": "confirmed"
            }]
        }"#;
        let parsed: AppointmentsResponse = serde_json::from_str(json).unwrap();
        let apt = &parsed.appointments[0];
        assert_eq!(apt.status, AppointmentStatus::Confirmed);
        assert_eq!(apt.doctor.as_ref().unwrap().hospital.as_deref(), Some("City Care"));
        assert!(apt.patient.is_none());
    }

    #[test]
    fn rejection_reason_serialized_only_when_present() {
        let confirm = UpdateAppointmentStatusRequest {
            status: AppointmentStatus::Confirmed,
            rejection_reason: None,
        };
        let body = serde_json::to_string(&confirm).unwrap();
        assert_eq!(body, r#"{"status":"confirmed"}"#);

        let reject = UpdateAppointmentStatusRequest {
            status: AppointmentStatus::Rejected,
            rejection_reason: Some("Slot unavailable".into()),
        };
        let body = serde_json::to_string(&reject).unwrap();
        assert!(body.contains("rejectionReason"));
    }
}
