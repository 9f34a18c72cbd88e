use std::env;

/// Runtime configuration for the desktop client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API.
    pub api_base_url: String,
    /// Base URL of the web app hosting the consultation rooms.
    pub consult_base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("TELEMED_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        let consult_base_url = env::var("TELEMED_CONSULT_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());
        Self {
            api_base_url: trim_trailing_slashes(&api_base_url),
            consult_base_url: trim_trailing_slashes(&consult_base_url),
        }
    }

    /// URL of the consultation room for one appointment.
    pub fn consult_room_url(&self, appointment_id: &str) -> String {
        format!("{}/consult/{}", self.consult_base_url, appointment_id)
    }
}

// Avoids "//api/..." URLs when the env var carries a trailing slash.
fn trim_trailing_slashes(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consult_url_has_single_separator() {
        let config = ClientConfig {
            api_base_url: trim_trailing_slashes("http://localhost:5000/"),
            consult_base_url: trim_trailing_slashes("https://telemed.example.com/"),
        };
        assert_eq!(
            config.consult_room_url("apt42"),
            "https://telemed.example.com/consult/apt42"
        );
    }
}
