//! Local persistence of the login session using a JSON file.
//!
//! The bearer token is stored as-is: it is a revocable credential, not key
//! material, and the backend expires it server-side.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use telemed_api_models::User;

/// The authenticated session as handed out by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Get the data directory for TeleMed, creating it if needed.
pub fn get_data_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not find home directory")?;

    let data_dir = PathBuf::from(home).join(".telemed");
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
    }

    Ok(data_dir)
}

fn get_session_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("session.json"))
}

pub fn load_session() -> Result<Option<Session>> {
    load_session_from(&get_session_path()?)
}

pub fn save_session(session: &Session) -> Result<()> {
    save_session_to(&get_session_path()?, session)
}

/// Delete the persisted session, if any.
pub fn clear_session() -> Result<()> {
    let path = get_session_path()?;
    if path.exists() {
        fs::remove_file(&path).context("Failed to delete session file")?;
    }
    Ok(())
}

fn load_session_from(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path).context("Failed to read session file")?;
    let session: Session = serde_json::from_str(&json).context("Failed to parse session")?;
    Ok(Some(session))
}

fn save_session_to(path: &Path, session: &Session) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    fs::write(path, json).context("Failed to save session")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use telemed_api_models::UserRole;

    #[test]
    fn session_roundtrips_through_disk() {
        let session = Session {
            token: "jwt-token".to_string(),
            user: User {
                id: "u1".to_string(),
                name: "Pat".to_string(),
                email: Some("pat@example.com".to_string()),
                role: UserRole::Patient,
                specialization: None,
                hospital: None,
                qualifications: None,
                license_number: None,
                years_of_experience: None,
                consultation_fee: None,
                approval_status: None,
                rejection_reason: None,
            },
        };

        let path = std::env::temp_dir().join("telemed-session-test.json");
        save_session_to(&path, &session).unwrap();
        let restored = load_session_from(&path).unwrap().unwrap();
        assert_eq!(restored.token, "jwt-token");
        assert_eq!(restored.user.id, "u1");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("telemed-session-absent.json");
        let _ = fs::remove_file(&path);
        assert!(load_session_from(&path).unwrap().is_none());
    }
}
