//! Browse doctors: search, specialization filter, inline booking form.

use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input, Space};
use iced::{Element, Length};

use telemed_api_models::User;

use crate::ui;
use crate::{theme, BookingField, Message, Screen, TeleMed};

pub const ALL_SPECIALIZATIONS: &str = "All specializations";

fn matches_search(doctor: &User, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |field: &Option<String>| {
        field
            .as_ref()
            .map(|v| v.to_lowercase().contains(needle))
            .unwrap_or(false)
    };
    doctor.name.to_lowercase().contains(needle)
        || hit(&doctor.specialization)
        || hit(&doctor.hospital)
        || hit(&doctor.qualifications)
}

fn doctor_card(doctor: &User) -> Element<'_, Message> {
    let mut details = column![text(format!("Dr. {}", doctor.name)).size(16)].spacing(3);
    if let Some(specialization) = &doctor.specialization {
        details = details.push(
            text(specialization.clone())
                .size(12)
                .style(iced::theme::Text::Color(theme::colors::ACCENT_TEAL)),
        );
    }
    if let Some(hospital) = &doctor.hospital {
        details = details.push(ui::muted(hospital.clone(), 11));
    }
    if let Some(qualifications) = &doctor.qualifications {
        details = details.push(ui::muted(qualifications.clone(), 11));
    }
    let mut facts = Vec::new();
    if let Some(years) = doctor.years_of_experience {
        facts.push(format!("{years} yrs experience"));
    }
    if let Some(fee) = doctor.consultation_fee {
        facts.push(format!("${fee:.0} per consultation"));
    }
    if !facts.is_empty() {
        details = details.push(ui::muted(facts.join(" | "), 11));
    }

    let card = row![
        details.width(Length::Fill),
        button(text("Book").size(12))
            .padding([6, 14])
            .on_press(Message::OpenBooking(doctor.id.clone())),
    ]
    .spacing(12)
    .align_items(iced::Alignment::Center);

    container(card)
        .style(theme::card_container)
        .padding(14)
        .width(Length::Fill)
        .into()
}

fn booking_form(app: &TeleMed) -> Element<'_, Message> {
    let Some(draft) = &app.booking else {
        return Space::with_height(0).into();
    };

    let submit_btn = if draft.submitting {
        button(text("Booking...").size(12)).padding([6, 14])
    } else {
        button(text("Confirm booking").size(12))
            .padding([6, 14])
            .on_press(Message::SubmitBooking)
    };

    let form = column![
        text(format!("Book an appointment with Dr. {}", draft.doctor.name)).size(15),
        row![
            column![
                text("Date *").size(11),
                text_input("2024-07-01", &draft.date)
                    .on_input(|v| Message::BookingFieldChanged(BookingField::Date, v))
                    .padding(8)
                    .size(13),
            ]
            .spacing(3),
            column![
                text("Time *").size(11),
                text_input("10:30", &draft.time)
                    .on_input(|v| Message::BookingFieldChanged(BookingField::Time, v))
                    .padding(8)
                    .size(13),
            ]
            .spacing(3),
        ]
        .spacing(10),
        column![
            text("Reason for visit *").size(11),
            text_input("Describe your symptoms", &draft.reason)
                .on_input(|v| Message::BookingFieldChanged(BookingField::Reason, v))
                .padding(8)
                .size(13),
        ]
        .spacing(3),
        ui::error_line(draft.error.as_deref()),
        row![
            submit_btn,
            button(text("Cancel").size(12))
                .style(iced::theme::Button::Secondary)
                .padding([6, 14])
                .on_press(Message::CancelBooking),
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
    let needle = app.doctor_search.to_lowercase();
    let filtered: Vec<&User> = app
        .doctors
        .iter()
        .filter(|d| matches_search(d, &needle))
        .filter(|d| match &app.specialization_filter {
            Some(filter) => d
                .specialization
                .as_ref()
                .map(|s| s.eq_ignore_ascii_case(filter))
                .unwrap_or(false),
            None => true,
        })
        .collect();

    let spec_options: Vec<String> = std::iter::once(ALL_SPECIALIZATIONS.to_string())
        .chain(app.specializations.iter().cloned())
        .collect();
    let selected_spec = app
        .specialization_filter
        .clone()
        .unwrap_or_else(|| ALL_SPECIALIZATIONS.to_string());

    let filters = row![
        text_input("Search by name, specialty, hospital...", &app.doctor_search)
            .on_input(Message::DoctorSearchChanged)
            .padding(8)
            .size(13)
            .width(Length::Fill),
        pick_list(spec_options, Some(selected_spec), Message::SpecializationPicked)
            .text_size(13)
            .padding(8),
    ]
    .spacing(10);

    let list: Element<Message> = if app.doctors.is_empty() {
        ui::muted("No doctors available yet.".to_string(), 13).into()
    } else if filtered.is_empty() {
        ui::muted("No doctors match your search.".to_string(), 13).into()
    } else {
        column(filtered.into_iter().map(doctor_card).collect::<Vec<_>>())
            .spacing(8)
            .into()
    };

    let content = column![
        ui::back_row("Browse Doctors", Screen::PatientHome),
        ui::status_line(app),
        filters,
        booking_form(app),
        scrollable(list).height(Length::Fill),
    ]
    .spacing(12)
    .padding(24);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
