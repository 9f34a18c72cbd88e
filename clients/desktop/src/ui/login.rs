//! Login screen.

use iced::widget::{button, column, container, text, text_input, Space};
use iced::{Element, Length};

use crate::ui;
use crate::{Message, Screen, TeleMed};

pub fn view(app: &TeleMed) -> Element<Message> {
    let email_input = column![
        text("Email:").size(11),
        text_input("you@example.com", &app.login_email)
            .on_input(Message::LoginEmailChanged)
            .padding(8)
            .size(14),
    ]
    .spacing(4);

    let password_input = column![
        text("Password:").size(11),
        text_input("Password", &app.login_password)
            .secure(true)
            .on_input(Message::LoginPasswordChanged)
            .on_submit(Message::SubmitLogin)
            .padding(8)
            .size(14),
    ]
    .spacing(4);

    let action_btn = if app.logging_in {
        button(text("Signing in...").size(14)).padding([10, 30])
    } else {
        button(text("Login").size(14))
            .padding([10, 30])
            .on_press(Message::SubmitLogin)
    };

    let signup_btn = button(text("New here? Create an account").size(12))
        .style(iced::theme::Button::Text)
        .on_press(Message::Navigate(Screen::Signup));

    let content = column![
        Space::with_height(60),
        text("TeleMed").size(44),
        ui::muted("Consult a doctor from anywhere".to_string(), 14),
        Space::with_height(20),
        ui::status_line(app),
        email_input,
        password_input,
        ui::error_line(app.login_error.as_deref()),
        Space::with_height(10),
        action_btn,
        signup_btn,
    ]
    .width(320)
    .spacing(8)
    .align_items(iced::Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
}
