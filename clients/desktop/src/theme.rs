//! TeleMed visual theme.
//!
//! Clinical dark palette; light mode falls back to iced's stock light theme
//! with the same accent.

use iced::Color;

use telemed_api_models::appointments::AppointmentStatus;

/// Dark theme color palette
pub mod colors {
    use super::Color;

    // Background colors
    pub const SIDEBAR_BG: Color = Color::from_rgb(0.071, 0.082, 0.098);       // #121519
    pub const CARD_BG: Color = Color::from_rgb(0.153, 0.169, 0.196);          // #272b32

    // Accent colors
    pub const ACCENT_TEAL: Color = Color::from_rgb(0.102, 0.624, 0.608);      // #1a9f9b
    pub const SUCCESS_GREEN: Color = Color::from_rgb(0.196, 0.706, 0.196);    // #32b432
    pub const WARNING_ORANGE: Color = Color::from_rgb(1.0, 0.584, 0.0);       // #ff9500
    pub const ERROR_RED: Color = Color::from_rgb(1.0, 0.231, 0.188);          // #ff3b30

    // Text colors
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.557, 0.557, 0.576);   // #8e8e93

    // Message bubbles
    pub const BUBBLE_MINE: Color = Color::from_rgb(0.102, 0.624, 0.608);      // accent teal
    pub const BUBBLE_THEIRS: Color = Color::from_rgb(0.153, 0.169, 0.196);    // card bg
}

/// Sidebar container style
pub fn sidebar_container(_theme: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(colors::SIDEBAR_BG)),
        ..Default::default()
    }
}

/// Card container style (panels, list entries)
pub fn card_container(_theme: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(colors::CARD_BG)),
        border: iced::Border {
            radius: 12.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// My message bubble style
pub fn my_bubble() -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(colors::BUBBLE_MINE)),
        text_color: Some(Color::WHITE),
        border: iced::Border {
            radius: 16.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Their message bubble style
pub fn their_bubble() -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(colors::BUBBLE_THEIRS)),
        text_color: Some(Color::WHITE),
        border: iced::Border {
            radius: 16.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Small rounded pill for unread counters
pub fn unread_pill(_theme: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(colors::ACCENT_TEAL)),
        text_color: Some(Color::WHITE),
        border: iced::Border {
            radius: 10.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Display color for an appointment status label.
pub fn status_color(status: AppointmentStatus) -> Color {
    match status {
        AppointmentStatus::Pending => colors::WARNING_ORANGE,
        AppointmentStatus::Confirmed => colors::SUCCESS_GREEN,
        AppointmentStatus::Completed => colors::ACCENT_TEAL,
        AppointmentStatus::Rejected | AppointmentStatus::Cancelled => colors::ERROR_RED,
    }
}
