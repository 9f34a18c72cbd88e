//! The messaging screen: conversation sidebar plus the active thread.

use chrono::Utc;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Element, Length};

use telemed_api_models::chat::{ChatMessage, ConversationSummary};
use telemed_api_models::UserRole;

use crate::ui;
use crate::{theme, Message, TeleMed};

fn my_user_id(app: &TeleMed) -> &str {
    app.session
        .as_ref()
        .map(|s| s.user.id.as_str())
        .unwrap_or("")
}

fn unread_pill<'a>(count: u32) -> Element<'a, Message> {
    container(text(count.to_string()).size(10))
        .style(theme::unread_pill)
        .padding([2, 7])
        .into()
}

fn conversation_row<'a>(app: &'a TeleMed, conversation: &'a ConversationSummary) -> Element<'a, Message> {
    let me = my_user_id(app);
    let is_active = app
        .chat
        .active_peer
        .as_ref()
        .map(|p| p.id == conversation.user.id)
        .unwrap_or(false);

    let mut name_line = conversation.user.name.clone();
    if conversation.user.role == UserRole::Doctor {
        if let Some(specialization) = &conversation.user.specialization {
            name_line.push_str(&format!(" | {specialization}"));
        }
    }

    let mut content = column![].spacing(2);
    match &conversation.last_message {
        Some(last) => {
            content = content.push(
                row![
                    text(name_line).size(13).width(Length::Fill),
                    ui::muted(ui::relative_time(last.created_at, Utc::now()), 10),
                ]
                .spacing(6),
            );
            let prefix = if last.sender_id == me { "You: " } else { "" };
            let preview = ui::truncate(&format!("{prefix}{}", last.message), 38);
            let mut preview_row = row![ui::muted(preview, 11).width(Length::Fill)].spacing(6);
            if conversation.unread_count > 0 {
                preview_row = preview_row.push(unread_pill(conversation.unread_count));
            }
            content = content.push(preview_row);
        }
        None => {
            content = content.push(text(name_line).size(13));
        }
    }

    let style = if is_active {
        iced::theme::Button::Primary
    } else {
        iced::theme::Button::Secondary
    };

    button(content)
        .style(style)
        .width(Length::Fill)
        .padding(8)
        .on_press(Message::SelectConversation(conversation.user.id.clone()))
        .into()
}

fn sidebar(app: &TeleMed) -> Element<Message> {
    let mut header = row![text("Messages").size(18).width(Length::Fill)]
        .spacing(8)
        .align_items(iced::Alignment::Center);
    if app.chat.aggregate_unread > 0 {
        header = header.push(unread_pill(app.chat.aggregate_unread));
    }
    header = header.push(
        button(text("< Back").size(11))
            .style(iced::theme::Button::Text)
            .padding([4, 6])
            .on_press(Message::Navigate(ui::home_of(app))),
    );

    let list: Element<Message> = if app.chat.conversations.is_empty() {
        let hint = match app.session.as_ref().map(|s| s.user.role) {
            Some(UserRole::Doctor) => {
                "Start chatting with your patients who have confirmed appointments"
            }
            _ => "You can chat with doctors who have confirmed your appointments",
        };
        column![
            ui::muted("No conversations yet".to_string(), 12),
            ui::muted(hint.to_string(), 10),
        ]
        .spacing(4)
        .into()
    } else {
        scrollable(
            column(
                app.chat
                    .conversations
                    .iter()
                    .map(|c| conversation_row(app, c))
                    .collect::<Vec<_>>(),
            )
            .spacing(4),
        )
        .height(Length::Fill)
        .into()
    };

    column![header, list].spacing(10).padding(12).into()
}

fn bubble<'a>(app: &'a TeleMed, message: &'a ChatMessage) -> Element<'a, Message> {
    let mine = message.sender_id() == Some(my_user_id(app));
    let when = message
        .created_at
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();

    let mut content = column![].spacing(3);
    if !mine {
        if let Some(sender) = &message.sender {
            content = content.push(text(&sender.name).size(11));
        }
    }
    content = content
        .push(text(&message.message).size(14))
        .push(text(when).size(9));

    let bubble_style: fn(&iced::Theme) -> iced::widget::container::Appearance = if mine {
        |_| theme::my_bubble()
    } else {
        |_| theme::their_bubble()
    };

    let bubble = container(content)
        .padding([8, 14])
        .max_width(480)
        .style(bubble_style);

    let aligned = if mine {
        row![Space::with_width(Length::Fill), bubble]
    } else {
        row![bubble, Space::with_width(Length::Fill)]
    };
    aligned.width(Length::Fill).into()
}

fn thread(app: &TeleMed) -> Element<Message> {
    let Some(peer) = &app.chat.active_peer else {
        return container(
            column![
                text("Select a conversation").size(20),
                ui::muted(
                    "Choose a conversation from the sidebar to start chatting".to_string(),
                    12,
                ),
            ]
            .spacing(6)
            .align_items(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into();
    };

    let mut header = column![text(&peer.name).size(16)].spacing(2);
    if let Some(specialization) = &peer.specialization {
        header = header.push(ui::muted(specialization.clone(), 11));
    }

    let pane: Element<Message> = if app.chat.messages.is_empty() {
        container(ui::muted(
            "No messages yet. Start the conversation!".to_string(),
            13,
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
    } else {
        let bubbles: Vec<Element<Message>> = app
            .chat
            .messages
            .iter()
            .map(|message| bubble(app, message))
            .collect();
        scrollable(column(bubbles).spacing(8).padding(16))
            .id(app.chat.scroll_id.clone())
            .on_scroll(Message::ChatPaneScrolled)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    };

    let send_btn = if app.chat.sending {
        button(text("Sending...").size(13)).padding([8, 16])
    } else if app.chat.accepts_send(&app.chat.input) {
        button(text("Send").size(13))
            .padding([8, 16])
            .on_press(Message::SendChatMessage)
    } else {
        button(text("Send").size(13)).padding([8, 16])
    };

    let input_row = row![
        text_input("Type a message...", &app.chat.input)
            .on_input(Message::ChatInputChanged)
            .on_submit(Message::SendChatMessage)
            .padding(10)
            .size(14),
        send_btn,
    ]
    .spacing(8);

    column![
        container(header).padding([10, 16]),
        pane,
        container(
            column![
                ui::error_line(app.chat.send_error.as_deref()),
                input_row
            ]
            .spacing(6),
        )
        .padding(12),
    ]
    .into()
}

pub fn view(app: &TeleMed) -> Element<Message> {
    row![
        container(sidebar(app))
            .width(Length::Fixed(300.0))
            .height(Length::Fill)
            .style(theme::sidebar_container),
        container(thread(app))
            .width(Length::Fill)
            .height(Length::Fill),
    ]
    .into()
}
