//! Health records: appointments and prescriptions merged into one history.

use chrono::NaiveDate;
use iced::widget::{column, container, row, scrollable, text, Space};
use iced::{Element, Length};

use telemed_api_models::appointments::Appointment;
use telemed_api_models::prescriptions::Prescription;

use crate::ui;
use crate::{theme, Message, Screen, TeleMed};

enum RecordEntry<'a> {
    Appointment(&'a Appointment),
    Prescription(&'a Prescription),
}

impl RecordEntry<'_> {
    fn date(&self) -> NaiveDate {
        match self {
            RecordEntry::Appointment(appointment) => {
                NaiveDate::parse_from_str(&appointment.date, "%Y-%m-%d")
                    .unwrap_or(NaiveDate::MIN)
            }
            RecordEntry::Prescription(prescription) => prescription.created_at.date_naive(),
        }
    }
}

fn appointment_record(appointment: &Appointment) -> Element<'_, Message> {
    let doctor = appointment
        .doctor
        .as_ref()
        .map(|d| format!("Dr. {}", d.name))
        .unwrap_or_else(|| "Doctor".to_string());

    let card = column![
        row![
            text("Appointment").size(11).style(iced::theme::Text::Color(theme::colors::ACCENT_TEAL)),
            Space::with_width(Length::Fill),
            ui::muted(format!("{} at {}", appointment.date, appointment.time), 11),
        ],
        text(doctor).size(14),
        ui::muted(format!("Reason: {}", appointment.reason), 11),
        text(appointment.status.as_str())
            .size(11)
            .style(iced::theme::Text::Color(theme::status_color(appointment.status))),
    ]
    .spacing(3);

    container(card)
        .style(theme::card_container)
        .padding(12)
        .width(Length::Fill)
        .into()
}

pub fn view(app: &TeleMed) -> Element<Message> {
    let mut entries: Vec<RecordEntry> = app
        .appointments
        .iter()
        .map(RecordEntry::Appointment)
        .chain(app.prescriptions.iter().map(RecordEntry::Prescription))
        .collect();
    entries.sort_by(|a, b| b.date().cmp(&a.date()));

    let list: Element<Message> = if entries.is_empty() {
        column![
            Space::with_height(30),
            ui::muted("You don't have any health records yet.".to_string(), 13),
        ]
        .into()
    } else {
        column(
            entries
                .iter()
                .map(|entry| match entry {
                    RecordEntry::Appointment(appointment) => appointment_record(appointment),
                    RecordEntry::Prescription(prescription) => {
                        super::prescriptions::prescription_card(prescription)
                    }
                })
                .collect::<Vec<_>>(),
        )
        .spacing(8)
        .into()
    };

    let content = column![
        ui::back_row("Health Records", Screen::PatientHome),
        ui::muted("Your complete medical history, newest first.".to_string(), 12),
        scrollable(list).height(Length::Fill),
    ]
    .spacing(12)
    .padding(24);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
