//! Rendering.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Cryptochat · Rooms          alice        │  header
//! │ ┌ Rooms ───────────────────────────────┐ │
//! │ │ > lobby              created by bob  │ │  body, per destination
//! │ │   ┌ Create room ──────────┐          │ │
//! │ │   │ Name: Team Sync       │          │ │  dialog overlay
//! │ │   │ Room name cannot ...  │          │ │
//! │ │   └───────────────────────┘          │ │
//! │ └──────────────────────────────────────┘ │
//! │ status                                   │
//! │ ┌ Input ───────────────────────────────┐ │
//! │ │ /create                              │ │
//! │ └──────────────────────────────────────┘ │
//! └──────────────────────────────────────────┘
//! ```

use cryptochat_app::{App, CreateRoomDialog, Destination};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::input::InputState;

/// Draw the whole screen.
pub fn draw(frame: &mut Frame<'_>, app: &App, input: &InputState) {
    let [header, body, status, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_header(frame, app, header);

    match app.current() {
        Destination::AuthenticationOption => draw_auth_option(frame, body),
        Destination::Register | Destination::Login => draw_auth_form(frame, app, body),
        Destination::ChatRoomList => draw_room_list(frame, app, input, body),
        Destination::ChatRoom { room_id } => draw_room(frame, app, room_id, body),
    }

    frame.render_widget(
        Paragraph::new(app.status().unwrap_or_default()).style(Style::new().fg(Color::Yellow)),
        status,
    );

    draw_input(frame, app, input, input_area);

    if *app.current() == Destination::ChatRoomList && app.room_list().dialog().is_open() {
        draw_dialog(frame, app.room_list().dialog(), body);
    }
}

fn title(dest: &Destination) -> String {
    match dest {
        Destination::AuthenticationOption => "Welcome".into(),
        Destination::Register => "Register".into(),
        Destination::Login => "Log in".into(),
        Destination::ChatRoomList => "Rooms".into(),
        Destination::ChatRoom { room_id } => room_id.clone(),
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let user = app
        .session()
        .map_or_else(|| "not signed in".to_string(), |session| session.display_name.clone());

    let width = u16::try_from(user.chars().count()).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);

    let heading = Line::from(vec![
        Span::styled("Cryptochat", Style::new().add_modifier(Modifier::BOLD)),
        Span::raw(" · "),
        Span::raw(title(app.current())),
    ]);
    frame.render_widget(Paragraph::new(heading), left);
    frame.render_widget(Paragraph::new(user).dim(), right);
}

fn draw_auth_option(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from("Choose how to continue:"),
        Line::from(""),
        Line::from("  /register <email> <password> [display name]"),
        Line::from("  /login <email> <password>"),
    ];
    frame.render_widget(Paragraph::new(lines).block(Block::bordered().title(" Welcome ")), area);
}

fn draw_auth_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (heading, usage) = match app.current() {
        Destination::Login => ("Log in", "/login <email> <password>"),
        _ => ("Create an account", "/register <email> <password> [display name]"),
    };

    let mut lines = vec![Line::from(format!("Type {usage}")), Line::from("")];
    if app.auth().is_pending() {
        lines.push(Line::from("Signing in...").italic());
    }
    if let Some(error) = app.auth().error() {
        lines.push(Line::from(error.to_string()).red());
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(format!(" {heading} "))),
        area,
    );
}

fn draw_room_list(frame: &mut Frame<'_>, app: &App, input: &InputState, area: Rect) {
    let block = Block::bordered().title(" Rooms ");
    let screen = app.room_list();

    if !screen.is_loaded() {
        frame.render_widget(Paragraph::new("Loading rooms...").block(block), area);
        return;
    }
    if screen.rooms().is_empty() {
        frame.render_widget(
            Paragraph::new("No rooms yet. Type /create to add one.").block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem<'_>> = screen
        .rooms()
        .iter()
        .map(|room| {
            ListItem::new(Line::from(vec![
                Span::raw(room.name.clone()),
                Span::raw("  "),
                Span::styled(format!("created by {}", room.creator), Style::new().dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_symbol("> ").highlight_style(
        Style::new().add_modifier(Modifier::REVERSED),
    );
    let mut state = ListState::default().with_selected(input.selected(app));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_room(frame: &mut Frame<'_>, app: &App, room_id: &str, area: Rect) {
    let lines = match app.current_room() {
        Some(room) => vec![
            Line::from(format!("Room: {}", room.name)),
            Line::from(format!("Created by: {}", room.creator)),
            Line::from(""),
            Line::from("Messaging is not available in this client.").dim(),
            Line::from("Esc or /back returns to the room list.").dim(),
        ],
        None => vec![
            Line::from(format!("Room \"{room_id}\" is not listed.")),
            Line::from("Esc or /back returns to the room list.").dim(),
        ],
    };
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(format!(" {room_id} "))),
        area,
    );
}

fn draw_dialog(frame: &mut Frame<'_>, dialog: &CreateRoomDialog, area: Rect) {
    let area = centered(area, 70, 7);

    let mut lines = vec![Line::from(vec![
        Span::raw("Name: "),
        Span::styled(dialog.draft().unwrap_or_default().to_string(), Style::new().bold()),
    ])];
    match dialog.error() {
        Some(error) if !error.is_empty() => lines.push(Line::from(error.to_string()).red()),
        _ => lines.push(Line::from("")),
    }
    if dialog.pending().is_some() {
        lines.push(Line::from("Creating...").italic());
    }
    lines.push(Line::from("Enter to create, Esc to cancel").dim());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Create room ")),
        area,
    );
}

fn draw_input(frame: &mut Frame<'_>, app: &App, input: &InputState, area: Rect) {
    let dialog = app.room_list().dialog();
    let (title, text) = if *app.current() == Destination::ChatRoomList && dialog.is_open() {
        (" Room name ", dialog.draft().unwrap_or_default())
    } else {
        (" Input ", input.line())
    };
    frame.render_widget(Paragraph::new(text).block(Block::bordered().title(title)), area);
}

/// Horizontally centered box, `percent` wide and `height` rows tall.
fn centered(area: Rect, percent: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [cell] =
        Layout::horizontal([Constraint::Percentage(percent)]).flex(Flex::Center).areas(row);
    cell
}
