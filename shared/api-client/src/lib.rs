//! Typed HTTP client for the TeleMed backend REST API.
//!
//! Every call carries the session's bearer token, sends/receives JSON, and
//! unwraps the backend's `success`/`message` envelope. Transport failures
//! and backend-reported failures both surface as [`ApiError`]; callers on
//! read paths are expected to log and keep their stale state, callers on
//! write paths to show the message.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use telemed_api_models::admin::{AdminStats, RejectDoctorRequest, StatsResponse};
use telemed_api_models::appointments::{
    Appointment, AppointmentStatus, AppointmentsResponse, BookAppointmentRequest,
    UpdateAppointmentStatusRequest,
};
use telemed_api_models::auth::{LoginRequest, LoginResponse, SignupRequest};
use telemed_api_models::chat::{
    ChatMessage, ConversationSummary, ConversationsResponse, MessagesResponse, SendMessageRequest,
    SendMessageResponse, SendOutcome, UnreadCountResponse,
};
use telemed_api_models::prescriptions::{CreatePrescriptionRequest, Prescription, PrescriptionsResponse};
use telemed_api_models::{AckResponse, ApprovalStatus, DoctorsResponse, User};

/// Failure of a backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a decodable response: network unreachable,
    /// timeout, or a malformed body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered but flagged the call as failed.
    #[error("{0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

fn backend_error(message: Option<String>) -> ApiError {
    ApiError::Backend(message.unwrap_or_else(|| "the server rejected the request".to_string()))
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

/// Handle to the backend. Cheap to clone; the underlying connection pool is
/// shared between clones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url),
            token: None,
        }
    }

    /// Clone of this client that authenticates with the given bearer token.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        debug!(%method, %path, "backend call");
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.request(method, path).json(body).send().await?;
        Ok(response.json::<T>().await?)
    }

    // --- auth ---

    /// Exchange credentials for a bearer token and the account record.
    pub async fn login(&self, request: &LoginRequest) -> Result<(String, User)> {
        let response: LoginResponse = self
            .send_json(reqwest::Method::POST, "/api/auth/login", request)
            .await?;
        if !response.success {
            return Err(backend_error(response.message));
        }
        match (response.token, response.user) {
            (Some(token), Some(user)) => Ok((token, user)),
            _ => Err(ApiError::Backend("login response missing token or user".to_string())),
        }
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let ack: AckResponse = self
            .send_json(reqwest::Method::POST, "/api/auth/signup", request)
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(backend_error(ack.message))
        }
    }

    // --- chat ---

    pub async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let response: ConversationsResponse = self.get_json("/api/chat/conversations").await?;
        if response.success {
            Ok(response.conversations)
        } else {
            Err(backend_error(response.message))
        }
    }

    /// Full history with one peer, oldest first. Messages the backend failed
    /// to populate a sender for are dropped, matching the reference frontend.
    pub async fn fetch_messages(&self, peer_id: &str) -> Result<Vec<ChatMessage>> {
        let response: MessagesResponse = self
            .get_json(&format!("/api/chat/messages/{peer_id}"))
            .await?;
        if response.success {
            Ok(response
                .messages
                .into_iter()
                .filter(|m| m.sender.is_some())
                .collect())
        } else {
            Err(backend_error(response.message))
        }
    }

    pub async fn send_message(&self, receiver_id: &str, text: &str) -> Result<ChatMessage> {
        let request = SendMessageRequest {
            receiver_id: receiver_id.to_string(),
            message: text.to_string(),
        };
        let response: SendMessageResponse = self
            .send_json(reqwest::Method::POST, "/api/chat/send", &request)
            .await?;
        match (response.success, response.message) {
            (true, Some(SendOutcome::Sent(message))) => Ok(message),
            (_, Some(SendOutcome::Error(text))) => Err(ApiError::Backend(text)),
            _ => Err(ApiError::Backend("failed to send message".to_string())),
        }
    }

    pub async fn unread_count(&self) -> Result<u32> {
        let response: UnreadCountResponse = self.get_json("/api/chat/unread-count").await?;
        if response.success {
            Ok(response.unread_count)
        } else {
            Err(ApiError::Backend("failed to fetch unread count".to_string()))
        }
    }

    // --- appointments ---

    pub async fn list_doctors(&self) -> Result<Vec<User>> {
        let response: DoctorsResponse = self.get_json("/api/patient/doctors").await?;
        if response.success {
            Ok(response.doctors)
        } else {
            Err(backend_error(response.message))
        }
    }

    pub async fn book_appointment(&self, request: &BookAppointmentRequest) -> Result<()> {
        let ack: AckResponse = self
            .send_json(reqwest::Method::POST, "/api/appointments/book", request)
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(backend_error(ack.message))
        }
    }

    pub async fn patient_appointments(&self) -> Result<Vec<Appointment>> {
        let response: AppointmentsResponse = self.get_json("/api/appointments/patient").await?;
        if response.success {
            Ok(response.appointments)
        } else {
            Err(backend_error(response.message))
        }
    }

    pub async fn doctor_appointments(&self, status: Option<AppointmentStatus>) -> Result<Vec<Appointment>> {
        let path = match status {
            Some(status) => format!("/api/appointments/doctor?status={}", status.as_str()),
            None => "/api/appointments/doctor".to_string(),
        };
        let response: AppointmentsResponse = self.get_json(&path).await?;
        if response.success {
            Ok(response.appointments)
        } else {
            Err(backend_error(response.message))
        }
    }

    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<()> {
        let ack: AckResponse = self
            .send_json(
                reqwest::Method::PATCH,
                &format!("/api/appointments/{appointment_id}/cancel"),
                &serde_json::json!({}),
            )
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(backend_error(ack.message))
        }
    }

    pub async fn update_appointment_status(
        &self,
        appointment_id: &str,
        request: &UpdateAppointmentStatusRequest,
    ) -> Result<()> {
        let ack: AckResponse = self
            .send_json(
                reqwest::Method::PATCH,
                &format!("/api/appointments/{appointment_id}/status"),
                request,
            )
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(backend_error(ack.message))
        }
    }

    // --- prescriptions ---

    pub async fn patient_prescriptions(&self) -> Result<Vec<Prescription>> {
        let response: PrescriptionsResponse = self.get_json("/api/prescriptions/patient").await?;
        if response.success {
            Ok(response.prescriptions)
        } else {
            Err(backend_error(response.message))
        }
    }

    pub async fn create_prescription(&self, request: &CreatePrescriptionRequest) -> Result<()> {
        let ack: AckResponse = self
            .send_json(reqwest::Method::POST, "/api/prescriptions/create", request)
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(backend_error(ack.message))
        }
    }

    // --- admin ---

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        let response: StatsResponse = self.get_json("/api/admin/stats").await?;
        match (response.success, response.stats) {
            (true, Some(stats)) => Ok(stats),
            _ => Err(ApiError::Backend("failed to fetch stats".to_string())),
        }
    }

    /// Doctor registrations in the given review state.
    pub async fn admin_doctors(&self, status: ApprovalStatus) -> Result<Vec<User>> {
        let response: DoctorsResponse = self
            .get_json(&format!("/api/admin/{}-doctors", status.as_str()))
            .await?;
        if response.success {
            Ok(response.doctors)
        } else {
            Err(backend_error(response.message))
        }
    }

    pub async fn approve_doctor(&self, doctor_id: &str) -> Result<()> {
        let ack: AckResponse = self
            .send_json(
                reqwest::Method::POST,
                &format!("/api/admin/approve-doctor/{doctor_id}"),
                &serde_json::json!({}),
            )
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(backend_error(ack.message))
        }
    }

    pub async fn reject_doctor(&self, doctor_id: &str, reason: &str) -> Result<()> {
        let request = RejectDoctorRequest {
            reason: reason.to_string(),
        };
        let ack: AckResponse = self
            .send_json(
                reqwest::Method::POST,
                &format!("/api/admin/reject-doctor/{doctor_id}"),
                &request,
            )
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(backend_error(ack.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let client = ApiClient::new("http://localhost:4000//");
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[test]
    fn backend_error_falls_back_to_generic_text() {
        let err = backend_error(None);
        assert_eq!(err.to_string(), "the server rejected the request");
        let err = backend_error(Some("Doctor not approved yet".into()));
        assert_eq!(err.to_string(), "Doctor not approved yet");
    }
}
