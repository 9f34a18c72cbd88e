//! Patient home: navigation cards into the patient screens.

use iced::widget::{button, column, container, row, text, Space};
use iced::{Element, Length};

use crate::ui;
use crate::{Message, Screen, TeleMed};

fn nav_card<'a>(title: &'a str, subtitle: &'a str, target: Screen) -> Element<'a, Message> {
    button(
        column![text(title).size(16), ui::muted(subtitle.to_string(), 11)]
            .spacing(6)
            .width(Length::Fill),
    )
    .style(iced::theme::Button::Secondary)
    .width(220)
    .padding(16)
    .on_press(Message::Navigate(target))
    .into()
}

pub fn view(app: &TeleMed) -> Element<Message> {
    let name = app
        .session
        .as_ref()
        .map(|s| s.user.name.clone())
        .unwrap_or_default();

    let messages_label = if app.chat.aggregate_unread > 0 {
        format!("Messages ({})", app.chat.aggregate_unread)
    } else {
        "Messages".to_string()
    };

    let cards = column![
        row![
            nav_card("Browse Doctors", "Find specialists and book a consultation", Screen::BrowseDoctors),
            nav_card("My Appointments", "Track, join or cancel your bookings", Screen::PatientAppointments),
        ]
        .spacing(12),
        row![
            nav_card("Prescriptions", "Medications your doctors prescribed", Screen::PatientPrescriptions),
            nav_card("Health Records", "Your full visit and treatment history", Screen::HealthRecords),
        ]
        .spacing(12),
        row![
            button(
                column![
                    text(messages_label).size(16),
                    ui::muted("Chat with your doctors".to_string(), 11)
                ]
                .spacing(6)
                .width(Length::Fill),
            )
            .style(iced::theme::Button::Secondary)
            .width(220)
            .padding(16)
            .on_press(Message::Navigate(Screen::Chat)),
        ]
        .spacing(12),
    ]
    .spacing(12);

    let content = column![
        ui::top_bar(app, format!("Welcome, {name}")),
        ui::status_line(app),
        Space::with_height(16),
        text(format!("Welcome back, {name}!")).size(24),
        ui::muted(
            "Book appointments, talk to your doctors and keep your records in one place.".to_string(),
            13,
        ),
        Space::with_height(16),
        cards,
    ]
    .spacing(8)
    .padding(24);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
