//! Quiz results summary.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = app.summary() else {
        return;
    };
    let grade_color = get_grade_color(summary.percentage);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
    ])
    .split(area);

    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(52),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    let wrong = summary.total_questions - summary.score;
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ COMPLETE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", summary.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} correct", summary.score),
                Style::default().fg(Color::Green),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{wrong} wrong"), Style::default().fg(Color::Red)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Time ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_time(summary.elapsed_seconds),
                Style::default().fg(Color::White),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Points ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("+{}", app.last_points()),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]),
    ];

    if app.last_offline() {
        content.push(Line::from(Span::styled(
            "offline quiz",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        content.push(Line::from(""));
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "v review  ·  n new quiz  ·  h home  ·  q quit",
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

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
