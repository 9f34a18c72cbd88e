//! Admin wire models: platform stats and doctor review.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_patients: u64,
    #[serde(default)]
    pub total_doctors: u64,
    #[serde(default)]
    pub pending_doctors: u64,
    #[serde(default)]
    pub approved_doctors: u64,
    #[serde(default)]
    pub rejected_doctors: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(default)]
    pub stats: Option<AdminStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectDoctorRequest {
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_parse() {
        let json = r#"{"success": true, "stats": {
            "totalPatients": 40, "totalDoctors": 12,
            "pendingDoctors": 3, "approvedDoctors": 8, "rejectedDoctors": 1
        }}"#;
        let parsed: StatsResponse = serde_json::from_str(json).unwrap();
        let stats = parsed.stats.unwrap();
        assert_eq!(stats.total_patients, 40);
        assert_eq!(stats.pending_doctors, 3);
    }
}
