//! Patient appointments: status, cancellation, consultation join.

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Element, Length};

use telemed_api_models::appointments::{Appointment, AppointmentStatus};

use crate::ui;
use crate::{theme, Message, Screen, TeleMed};

fn appointment_card(appointment: &Appointment) -> Element<'_, Message> {
    let doctor_line = match &appointment.doctor {
        Some(doctor) => {
            let mut line = format!("Dr. {}", doctor.name);
            if let Some(specialization) = &doctor.specialization {
                line.push_str(&format!(" - {specialization}"));
            }
            line
        }
        None => "Doctor unavailable".to_string(),
    };

    let mut details = column![
        text(doctor_line).size(15),
        ui::muted(format!("{} at {}", appointment.date, appointment.time), 12),
        ui::muted(format!("Reason: {}", appointment.reason), 11),
    ]
    .spacing(3);

    if let Some(doctor) = &appointment.doctor {
        if let Some(hospital) = &doctor.hospital {
            details = details.push(ui::muted(hospital.clone(), 11));
        }
    }
    if let Some(reason) = &appointment.rejection_reason {
        details = details.push(
            text(format!("Rejected: {reason}"))
                .size(11)
                .style(iced::theme::Text::Color(theme::colors::ERROR_RED)),
        );
    }

    let status_label = text(appointment.status.as_str())
        .size(12)
        .style(iced::theme::Text::Color(theme::status_color(appointment.status)));

    let mut actions = row![].spacing(6);
    if appointment.status == AppointmentStatus::Confirmed {
        actions = actions.push(
            button(text("Join consultation").size(11))
                .padding([5, 10])
                .on_press(Message::JoinConsultation(appointment.id.clone())),
        );
    }
    if matches!(
        appointment.status,
        AppointmentStatus::Pending | AppointmentStatus::Confirmed
    ) {
        actions = actions.push(
            button(text("Cancel").size(11))
                .style(iced::theme::Button::Destructive)
                .padding([5, 10])
                .on_press(Message::CancelAppointment(appointment.id.clone())),
        );
    }

    let card = row![
        details.width(Length::Fill),
        column![status_label, actions].spacing(8).align_items(iced::Alignment::End),
    ]
    .spacing(12)
    .align_items(iced::Alignment::Center);

    container(card)
        .style(theme::card_container)
        .padding(14)
        .width(Length::Fill)
        .into()
}

pub fn view(app: &TeleMed) -> Element<Message> {
    let list: Element<Message> = if app.appointments.is_empty() {
        column![
            Space::with_height(30),
            ui::muted("You have no appointments yet.".to_string(), 13),
        ]
        .into()
    } else {
        column(
            app.appointments
                .iter()
                .map(appointment_card)
                .collect::<Vec<_>>(),
        )
        .spacing(8)
        .into()
    };

    let content = column![
        ui::back_row("My Appointments", Screen::PatientHome),
        ui::status_line(app),
        scrollable(list).height(Length::Fill),
    ]
    .spacing(12)
    .padding(24);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
