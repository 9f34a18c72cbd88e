//! Account registration screen with role-dependent fields.

use iced::widget::{button, column, radio, row, scrollable, text, text_input, Space};
use iced::{Element, Length};

use telemed_api_models::UserRole;

use crate::ui;
use crate::{Message, Screen, SignupField, TeleMed};

fn field<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    target: SignupField,
) -> Element<'a, Message> {
    column![
        text(label).size(11),
        text_input(placeholder, value)
            .on_input(move |v| Message::SignupFieldChanged(target, v))
            .padding(8)
            .size(13),
    ]
    .spacing(3)
    .into()
}

fn secret_field<'a>(
    label: &'a str,
    value: &'a str,
    target: SignupField,
) -> Element<'a, Message> {
    column![
        text(label).size(11),
        text_input("", value)
            .secure(true)
            .on_input(move |v| Message::SignupFieldChanged(target, v))
            .padding(8)
            .size(13),
    ]
    .spacing(3)
    .into()
}

pub fn view(app: &TeleMed) -> Element<Message> {
    let form = &app.signup;

    let role_picker = row![
        text("I am a:").size(12),
        radio("Patient", UserRole::Patient, Some(form.role), Message::SignupRoleChanged),
        radio("Doctor", UserRole::Doctor, Some(form.role), Message::SignupRoleChanged),
    ]
    .spacing(16)
    .align_items(iced::Alignment::Center);

    let common = column![
        field("Full name *", "Jane Doe", &form.name, SignupField::Name),
        field("Email *", "you@example.com", &form.email, SignupField::Email),
        secret_field("Password *", &form.password, SignupField::Password),
        secret_field("Confirm password *", &form.confirm_password, SignupField::ConfirmPassword),
    ]
    .spacing(8);

    let role_fields: Element<Message> = match form.role {
        UserRole::Doctor => column![
            field("Specialization *", "cardiology", &form.specialization, SignupField::Specialization),
            field("License number *", "", &form.license_number, SignupField::LicenseNumber),
            field("Years of experience", "", &form.years_of_experience, SignupField::YearsOfExperience),
            field("Hospital / clinic", "", &form.hospital, SignupField::Hospital),
            field("Qualifications", "MBBS, MD", &form.qualifications, SignupField::Qualifications),
            field("Consultation fee", "", &form.consultation_fee, SignupField::ConsultationFee),
        ]
        .spacing(8)
        .into(),
        _ => column![
            field("Date of birth", "1990-01-31", &form.date_of_birth, SignupField::DateOfBirth),
            field("Phone", "", &form.phone, SignupField::Phone),
            field("Address", "", &form.address, SignupField::Address),
            field("Gender", "", &form.gender, SignupField::Gender),
            field("Emergency contact", "", &form.emergency_contact, SignupField::EmergencyContact),
            field("Emergency phone", "", &form.emergency_phone, SignupField::EmergencyPhone),
        ]
        .spacing(8)
        .into(),
    };

    let submit_btn = if form.submitting {
        button(text("Creating account...").size(14)).padding([10, 30])
    } else {
        button(text("Create Account").size(14))
            .padding([10, 30])
            .on_press(Message::SubmitSignup)
    };

    let content = column![
        Space::with_height(30),
        text("Create your TeleMed account").size(24),
        role_picker,
        common,
        role_fields,
        ui::error_line(form.error.as_deref()),
        Space::with_height(6),
        submit_btn,
        button(text("Back to login").size(12))
            .style(iced::theme::Button::Text)
            .on_press(Message::Navigate(Screen::Login)),
        Space::with_height(30),
    ]
    .width(380)
    .spacing(10)
    .align_items(iced::Alignment::Center);

    scrollable(
        iced::widget::container(content)
            .width(Length::Fill)
            .center_x(),
    )
    .into()
}
