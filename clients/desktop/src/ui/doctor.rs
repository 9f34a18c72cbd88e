//! Doctor home: appointment requests, upcoming consultations, prescribing.

use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Element, Length};

use telemed_api_models::appointments::{Appointment, AppointmentStatus};
use telemed_api_models::PersonRef;

use crate::ui;
use crate::{theme, MedicationField, Message, Screen, TeleMed};

fn patient_ref(appointment: &Appointment) -> Option<PersonRef> {
    appointment.patient.clone()
}

fn request_card<'a>(app: &'a TeleMed, appointment: &'a Appointment) -> Element<'a, Message> {
    let patient_line = appointment
        .patient
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Patient".to_string());

    let mut details = column![
        text(patient_line).size(15),
        ui::muted(format!("{} at {}", appointment.date, appointment.time), 12),
        ui::muted(format!("Reason: {}", appointment.reason), 11),
    ]
    .spacing(3);
    if let Some(patient) = &appointment.patient {
        if let Some(phone) = &patient.phone {
            details = details.push(ui::muted(format!("Phone: {phone}"), 11));
        }
    }

    let rejecting = app
        .appointment_reject
        .as_ref()
        .filter(|draft| draft.target_id == appointment.id);

    let actions: Element<Message> = match rejecting {
        Some(draft) => {
            let submit = if draft.submitting {
                button(text("Rejecting...").size(11)).padding([5, 10])
            } else {
                button(text("Confirm rejection").size(11))
                    .style(iced::theme::Button::Destructive)
                    .padding([5, 10])
                    .on_press(Message::SubmitRejectAppointment)
            };
            column![
                text_input("Reason shown to the patient", &draft.reason)
                    .on_input(Message::RejectReasonChanged)
                    .padding(6)
                    .size(12),
                row![
                    submit,
                    button(text("Keep").size(11))
                        .style(iced::theme::Button::Secondary)
                        .padding([5, 10])
                        .on_press(Message::CancelRejectAppointment),
                ]
                .spacing(6),
            ]
            .spacing(6)
            .width(260)
            .into()
        }
        None => row![
            button(text("Confirm").size(11))
                .padding([5, 10])
                .on_press(Message::ConfirmAppointment(appointment.id.clone())),
            button(text("Reject").size(11))
                .style(iced::theme::Button::Destructive)
                .padding([5, 10])
                .on_press(Message::OpenRejectAppointment(appointment.id.clone())),
        ]
        .spacing(6)
        .into(),
    };

    container(
        row![details.width(Length::Fill), actions]
            .spacing(12)
            .align_items(iced::Alignment::Center),
    )
    .style(theme::card_container)
    .padding(14)
    .width(Length::Fill)
    .into()
}

fn confirmed_card(appointment: &Appointment) -> Element<'_, Message> {
    let patient_line = appointment
        .patient
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Patient".to_string());

    let details = column![
        text(patient_line).size(15),
        ui::muted(format!("{} at {}", appointment.date, appointment.time), 12),
        ui::muted(format!("Reason: {}", appointment.reason), 11),
    ]
    .spacing(3);

    let mut actions = row![
        button(text("Join consultation").size(11))
            .padding([5, 10])
            .on_press(Message::JoinConsultation(appointment.id.clone())),
        button(text("Complete").size(11))
            .style(iced::theme::Button::Secondary)
            .padding([5, 10])
            .on_press(Message::CompleteAppointment(appointment.id.clone())),
    ]
    .spacing(6);
    if let Some(patient) = patient_ref(appointment) {
        actions = actions.push(
            button(text("Prescribe").size(11))
                .padding([5, 10])
                .on_press(Message::OpenPrescriptionDraft {
                    patient,
                    appointment_id: Some(appointment.id.clone()),
                }),
        );
    }

    container(
        row![details.width(Length::Fill), actions]
            .spacing(12)
            .align_items(iced::Alignment::Center),
    )
    .style(theme::card_container)
    .padding(14)
    .width(Length::Fill)
    .into()
}

fn medication_row<'a>(index: usize, row_data: &'a crate::MedicationRow, removable: bool) -> Element<'a, Message> {
    let input = |placeholder: &'static str, value: &'a str, field: MedicationField| {
        text_input(placeholder, value)
            .on_input(move |v| Message::MedicationChanged(index, field, v))
            .padding(6)
            .size(12)
    };

    let mut line = row![
        input("Name *", &row_data.name, MedicationField::Name),
        input("Dosage *", &row_data.dosage, MedicationField::Dosage),
        input("Frequency *", &row_data.frequency, MedicationField::Frequency),
        input("Duration *", &row_data.duration, MedicationField::Duration),
        input("Instructions", &row_data.instructions, MedicationField::Instructions),
    ]
    .spacing(6);
    if removable {
        line = line.push(
            button(text("X").size(11))
                .style(iced::theme::Button::Destructive)
                .padding([5, 8])
                .on_press(Message::RemoveMedicationRow(index)),
        );
    }
    line.into()
}

fn prescription_form(app: &TeleMed) -> Element<'_, Message> {
    let Some(draft) = &app.prescription_draft else {
        return Space::with_height(0).into();
    };

    let removable = draft.medications.len() > 1;
    let medication_rows: Vec<Element<Message>> = draft
        .medications
        .iter()
        .enumerate()
        .map(|(index, row_data)| medication_row(index, row_data, removable))
        .collect();

    let submit = if draft.submitting {
        button(text("Saving...").size(12)).padding([6, 14])
    } else {
        button(text("Create prescription").size(12))
            .padding([6, 14])
            .on_press(Message::SubmitPrescription)
    };

    let form = column![
        text(format!("New prescription for {}", draft.patient.name)).size(15),
        column![
            text("Diagnosis").size(11),
            text_input("", &draft.diagnosis)
                .on_input(Message::PrescriptionDiagnosisChanged)
                .padding(6)
                .size(12),
        ]
        .spacing(3),
        text("Medications").size(11),
        column(medication_rows).spacing(6),
        button(text("+ Add medication").size(11))
            .style(iced::theme::Button::Text)
            .on_press(Message::AddMedicationRow),
        column![
            text("Notes").size(11),
            text_input("", &draft.notes)
                .on_input(Message::PrescriptionNotesChanged)
                .padding(6)
                .size(12),
        ]
        .spacing(3),
        ui::error_line(draft.error.as_deref()),
        row![
            submit,
            button(text("Cancel").size(12))
                .style(iced::theme::Button::Secondary)
                .padding([6, 14])
                .on_press(Message::CancelPrescriptionDraft),
        ]
        .spacing(8),
    ]
    .spacing(8);

    container(form)
        .style(theme::card_container)
        .padding(16)
        .width(Length::Fill)
        .into()
}

pub fn view(app: &TeleMed) -> Element<Message> {
    let name = app
        .session
        .as_ref()
        .map(|s| s.user.name.clone())
        .unwrap_or_default();

    let pending: Vec<&Appointment> = app
        .doctor_appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Pending)
        .collect();
    let confirmed: Vec<&Appointment> = app
        .doctor_appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Confirmed)
        .collect();

    let requests: Element<Message> = if pending.is_empty() {
        ui::muted("No new appointment requests.".to_string(), 12).into()
    } else {
        column(
            pending
                .into_iter()
                .map(|a| request_card(app, a))
                .collect::<Vec<_>>(),
        )
        .spacing(8)
        .into()
    };

    let upcoming: Element<Message> = if confirmed.is_empty() {
        ui::muted("No confirmed consultations.".to_string(), 12).into()
    } else {
        column(confirmed.into_iter().map(confirmed_card).collect::<Vec<_>>())
            .spacing(8)
            .into()
    };

    let messages_label = if app.chat.aggregate_unread > 0 {
        format!("Messages ({})", app.chat.aggregate_unread)
    } else {
        "Messages".to_string()
    };

    let body = column![
        text(format!("Welcome back, Dr. {name}!")).size(24),
        ui::muted(
            "Manage your appointments, patients and consultations from one place.".to_string(),
            13,
        ),
        row![
            button(text(messages_label).size(12))
                .padding([6, 14])
                .on_press(Message::Navigate(Screen::Chat)),
        ],
        prescription_form(app),
        text("Appointment requests").size(17),
        requests,
        text("Upcoming consultations").size(17),
        upcoming,
    ]
    .spacing(12);

    let content = column![
        ui::top_bar(app, format!("Welcome, Dr. {name}")),
        ui::status_line(app),
        scrollable(body).height(Length::Fill),
    ]
    .spacing(10)
    .padding(24);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
