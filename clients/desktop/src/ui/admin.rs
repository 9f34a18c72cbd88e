//! Admin dashboard: platform stats and doctor registration review.

use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Element, Length};

use telemed_api_models::{ApprovalStatus, User};

use crate::ui;
use crate::{theme, Message, TeleMed};

fn stat_card<'a>(label: &'a str, value: u64) -> Element<'a, Message> {
    container(
        column![text(value.to_string()).size(22), ui::muted(label.to_string(), 11)]
            .spacing(2)
            .align_items(iced::Alignment::Center),
    )
    .style(theme::card_container)
    .padding(12)
    .width(150)
    .into()
}

fn tab_button<'a>(label: &'a str, tab: ApprovalStatus, active: ApprovalStatus) -> Element<'a, Message> {
    let style = if tab == active {
        iced::theme::Button::Primary
    } else {
        iced::theme::Button::Secondary
    };
    button(text(label).size(12))
        .style(style)
        .padding([6, 14])
        .on_press(Message::AdminTabSelected(tab))
        .into()
}

fn doctor_card<'a>(app: &'a TeleMed, doctor: &'a User) -> Element<'a, Message> {
    let mut details = column![text(format!("Dr. {}", doctor.name)).size(15)].spacing(3);
    if let Some(email) = &doctor.email {
        details = details.push(ui::muted(email.clone(), 11));
    }

    let mut facts = Vec::new();
    if let Some(specialization) = &doctor.specialization {
        facts.push(format!("Specialization: {specialization}"));
    }
    if let Some(license) = &doctor.license_number {
        facts.push(format!("License: {license}"));
    }
    if let Some(years) = doctor.years_of_experience {
        facts.push(format!("{years} yrs experience"));
    }
    if let Some(hospital) = &doctor.hospital {
        facts.push(hospital.clone());
    }
    if let Some(fee) = doctor.consultation_fee {
        facts.push(format!("${fee:.0} fee"));
    }
    for fact in facts {
        details = details.push(ui::muted(fact, 11));
    }
    if let Some(qualifications) = &doctor.qualifications {
        details = details.push(ui::muted(qualifications.clone(), 11));
    }
    if let Some(reason) = &doctor.rejection_reason {
        details = details.push(
            text(format!("Rejected: {reason}"))
                .size(11)
                .style(iced::theme::Text::Color(theme::colors::ERROR_RED)),
        );
    }

    let rejecting = app
        .admin_reject
        .as_ref()
        .filter(|draft| draft.target_id == doctor.id);

    let actions: Element<Message> = if doctor.approval_status == Some(ApprovalStatus::Pending) {
        match rejecting {
            Some(draft) => {
                let submit = if draft.submitting {
                    button(text("Rejecting...").size(11)).padding([5, 10])
                } else {
                    button(text("Confirm rejection").size(11))
                        .style(iced::theme::Button::Destructive)
                        .padding([5, 10])
                        .on_press(Message::SubmitRejectDoctor)
                };
                column![
                    text_input("Reason for rejection", &draft.reason)
                        .on_input(Message::AdminRejectReasonChanged)
                        .padding(6)
                        .size(12),
                    row![
                        submit,
                        button(text("Keep").size(11))
                            .style(iced::theme::Button::Secondary)
                            .padding([5, 10])
                            .on_press(Message::CancelRejectDoctor),
                    ]
                    .spacing(6),
                ]
                .spacing(6)
                .width(260)
                .into()
            }
            None => row![
                button(text("Approve").size(11))
                    .padding([5, 10])
                    .on_press(Message::ApproveDoctor(doctor.id.clone())),
                button(text("Reject").size(11))
                    .style(iced::theme::Button::Destructive)
                    .padding([5, 10])
                    .on_press(Message::OpenRejectDoctor(doctor.id.clone())),
            ]
            .spacing(6)
            .into(),
        }
    } else {
        let label = doctor
            .approval_status
            .map(|s| s.as_str())
            .unwrap_or("unknown");
        text(label)
            .size(12)
            .style(iced::theme::Text::Color(theme::colors::TEXT_SECONDARY))
            .into()
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

pub fn view(app: &TeleMed) -> Element<Message> {
    let stats: Element<Message> = match &app.admin_stats {
        Some(stats) => row![
            stat_card("Patients", stats.total_patients),
            stat_card("Doctors", stats.total_doctors),
            stat_card("Pending review", stats.pending_doctors),
            stat_card("Approved", stats.approved_doctors),
            stat_card("Rejected", stats.rejected_doctors),
        ]
        .spacing(10)
        .into(),
        None => Space::with_height(0).into(),
    };

    let tabs = row![
        tab_button("Pending", ApprovalStatus::Pending, app.admin_tab),
        tab_button("Approved", ApprovalStatus::Approved, app.admin_tab),
        tab_button("Rejected", ApprovalStatus::Rejected, app.admin_tab),
    ]
    .spacing(8);

    let list: Element<Message> = if app.admin_doctors.is_empty() {
        ui::muted(
            format!("No {} doctors.", app.admin_tab.as_str()),
            12,
        )
        .into()
    } else {
        column(
            app.admin_doctors
                .iter()
                .map(|doctor| doctor_card(app, doctor))
                .collect::<Vec<_>>(),
        )
        .spacing(8)
        .into()
    };

    let content = column![
        ui::top_bar(app, "Admin".to_string()),
        ui::status_line(app),
        text("Doctor registrations").size(20),
        stats,
        tabs,
        scrollable(list).height(Length::Fill),
    ]
    .spacing(12)
    .padding(24);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
