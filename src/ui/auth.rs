//! Login / signup screen shown before a user is picked.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, AuthForm, AuthTab};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.auth_form();

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(17),
        Constraint::Fill(1),
    ])
    .split(area);

    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(52),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        tabs_line(form.tab),
        Line::from(""),
    ];

    for (index, label) in form.field_labels().iter().enumerate() {
        content.push(field_line(form, index, label));
        content.push(Line::from(""));
    }

    match &form.error {
        Some(error) => content.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from("")),
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Tab] login/signup  ·  [Enter] submit  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, columns[1]);
}

fn tabs_line(tab: AuthTab) -> Line<'static> {
    let active = Style::default().fg(Color::Cyan).bold();
    let inactive = Style::default().fg(Color::DarkGray);
    let (login_style, signup_style) = match tab {
        AuthTab::Login => (active, inactive),
        AuthTab::Signup => (inactive, active),
    };

    Line::from(vec![
        Span::styled("LOGIN", login_style),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled("SIGNUP", signup_style),
    ])
}

fn field_line(form: &AuthForm, index: usize, label: &str) -> Line<'static> {
    let focused = form.field == index;
    let value = if form.field_is_secret(index) {
        "*".repeat(form.field_value(index).chars().count())
    } else {
        form.field_value(index).to_string()
    };

    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}
