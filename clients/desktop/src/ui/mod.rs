//! Screen views. Each module renders one screen as a pure function over the
//! application state.

pub mod admin;
pub mod appointments;
pub mod chat;
pub mod doctor;
pub mod doctors;
pub mod login;
pub mod patient;
pub mod prescriptions;
pub mod records;
pub mod signup;

use chrono::{DateTime, Utc};
use iced::widget::{button, row, text, Space};
use iced::{Color, Element, Length};

use crate::theme;
use crate::{Message, Screen, TeleMed};

/// "Just now" / "5m ago" style label for conversation previews.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    timestamp.format("%b %e, %Y").to_string()
}

pub(crate) fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let head: String = value.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

/// Top bar shared by the signed-in screens: brand, welcome line, theme
/// toggle, logout.
pub(crate) fn top_bar<'a>(app: &'a TeleMed, welcome: String) -> Element<'a, Message> {
    let theme_label = if app.dark_mode { "Light Mode" } else { "Dark Mode" };
    row![
        text("TeleMed").size(22),
        Space::with_width(Length::Fill),
        text(welcome).size(13),
        button(text(theme_label).size(11))
            .style(iced::theme::Button::Text)
            .padding([4, 8])
            .on_press(Message::ToggleTheme),
        button(text("Logout").size(11))
            .style(iced::theme::Button::Text)
            .padding([4, 8])
            .on_press(Message::Logout),
    ]
    .spacing(12)
    .align_items(iced::Alignment::Center)
    .into()
}

/// "Back to dashboard" row with a screen title.
pub(crate) fn back_row<'a>(title: &'a str, target: Screen) -> Element<'a, Message> {
    row![
        button(text("< Back").size(12))
            .style(iced::theme::Button::Text)
            .padding([4, 8])
            .on_press(Message::Navigate(target)),
        text(title).size(20),
    ]
    .spacing(12)
    .align_items(iced::Alignment::Center)
    .into()
}

/// The transient status notice, or nothing.
pub(crate) fn status_line(app: &TeleMed) -> Element<'_, Message> {
    if app.status.is_empty() {
        Space::with_height(0).into()
    } else {
        text(&app.status)
            .size(12)
            .style(iced::theme::Text::Color(theme::colors::ACCENT_TEAL))
            .into()
    }
}

pub(crate) fn error_line(error: Option<&str>) -> Element<'_, Message> {
    match error {
        Some(error) => text(error)
            .size(12)
            .style(iced::theme::Text::Color(Color::from_rgb(1.0, 0.3, 0.3)))
            .into(),
        None => Space::with_height(0).into(),
    }
}

pub(crate) fn muted(value: String, size: u16) -> iced::widget::Text<'static> {
    text(value)
        .size(size)
        .style(iced::theme::Text::Color(theme::colors::TEXT_SECONDARY))
}

/// Home screen of the signed-in role, used as the back target.
pub(crate) fn home_of(app: &TeleMed) -> Screen {
    match app.session.as_ref().map(|s| s.user.role) {
        Some(telemed_api_models::UserRole::Doctor) => Screen::DoctorHome,
        Some(telemed_api_models::UserRole::Admin) => Screen::AdminHome,
        _ => Screen::PatientHome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let at = |secs: i64| now - chrono::Duration::seconds(secs);
        assert_eq!(relative_time(at(30), now), "Just now");
        assert_eq!(relative_time(at(5 * 60), now), "5m ago");
        assert_eq!(relative_time(at(3 * 3600), now), "3h ago");
        assert_eq!(relative_time(at(2 * 86_400), now), "2d ago");
        assert!(relative_time(at(30 * 86_400), now).contains("2024"));
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_needed() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer preview text", 8), "a longer...");
    }
}
