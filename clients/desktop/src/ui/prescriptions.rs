//! Patient prescriptions.

use iced::widget::{column, container, row, scrollable, text, Space};
use iced::{Element, Length};

use telemed_api_models::prescriptions::Prescription;

use crate::ui;
use crate::{theme, Message, Screen, TeleMed};

pub(super) fn prescription_card(prescription: &Prescription) -> Element<'_, Message> {
    let doctor_line = match &prescription.doctor {
        Some(doctor) => {
            let mut line = format!("Dr. {}", doctor.name);
            if let Some(specialization) = &doctor.specialization {
                line.push_str(&format!(" - {specialization}"));
            }
            line
        }
        None => "Prescription".to_string(),
    };

    let mut details = column![
        row![
            text(doctor_line).size(15).width(Length::Fill),
            ui::muted(prescription.created_at.format("%b %e, %Y").to_string(), 11),
        ]
        .spacing(8),
    ]
    .spacing(4);

    if let Some(diagnosis) = &prescription.diagnosis {
        details = details.push(text(format!("Diagnosis: {diagnosis}")).size(12));
    }

    for medication in &prescription.medications {
        let mut line = format!(
            "{} - {} - {} for {}",
            medication.name, medication.dosage, medication.frequency, medication.duration
        );
        if let Some(instructions) = &medication.instructions {
            line.push_str(&format!(" ({instructions})"));
        }
        details = details.push(ui::muted(line, 11));
    }

    if let Some(notes) = &prescription.notes {
        details = details.push(ui::muted(format!("Notes: {notes}"), 11));
    }

    container(details)
        .style(theme::card_container)
        .padding(14)
        .width(Length::Fill)
        .into()
}

pub fn view(app: &TeleMed) -> Element<Message> {
    let list: Element<Message> = if app.prescriptions.is_empty() {
        column![
            Space::with_height(30),
            ui::muted("No prescriptions yet.".to_string(), 13),
        ]
        .into()
    } else {
        column(
            app.prescriptions
                .iter()
                .map(prescription_card)
                .collect::<Vec<_>>(),
        )
        .spacing(8)
        .into()
    };

    let content = column![
        ui::back_row("Prescriptions", Screen::PatientHome),
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
