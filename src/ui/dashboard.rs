//! Home screen: lifetime stats, leaderboard and recent quizzes.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_greeting(frame, chunks[0], app);
    render_stats(frame, chunks[1], app);

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_leaderboard(frame, columns[0], app);
    render_recent_activity(frame, columns[1], app);

    render_controls(frame, chunks[3]);
}

fn render_greeting(frame: &mut Frame, area: Rect, app: &App) {
    let username = app
        .current_user()
        .map(|account| account.username.as_str())
        .unwrap_or("guest");

    let greeting = Line::from(vec![
        Span::styled("Welcome back, ", Style::default().fg(Color::White)),
        Span::styled(username.to_string(), Style::default().fg(Color::Cyan).bold()),
        Span::styled("!", Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(greeting), area);

    let prefs = format!(
        "theme {}  ·  sound {}",
        app.theme(),
        if app.sound_enabled() { "on" } else { "off" }
    );
    let widget = Paragraph::new(prefs)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let Some(account) = app.current_user() else {
        return;
    };
    let stats = &account.stats;

    let metrics = [
        ("Quizzes", stats.total_quizzes.to_string()),
        ("Points", stats.points.to_string()),
        ("Best", format!("{}%", stats.best_score)),
        ("Average", format!("{}%", stats.average_score())),
    ];

    let mut spans = Vec::new();
    for (index, (label, value)) in metrics.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(value, Style::default().fg(Color::White).bold()));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "LEADERBOARD",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    let rows = app.leaderboard();
    if rows.is_empty() {
        lines.push(Line::from("No quizzes played yet".fg(Color::DarkGray)));
    }
    for row in rows {
        let style = if row.is_you {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = vec![
            Span::styled(format!("{:2}. ", row.rank), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{:<16}", row.username), style),
            Span::styled(format!("{:>6} pts", row.points), style),
        ];
        if row.is_you {
            spans.push(Span::styled("  (you)", Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_recent_activity(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(
            "RECENT ACTIVITY",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    let recent = app.recent_activity();
    if recent.is_empty() {
        lines.push(Line::from("No quizzes taken yet".fg(Color::DarkGray)));
    }
    for entry in recent {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<20}", entry.category), Style::default().fg(Color::Gray)),
            Span::styled(format!("{:>3}%", entry.score), Style::default().fg(Color::White).bold()),
            Span::styled(format!("  +{} pts", entry.points), Style::default().fg(Color::Green)),
            Span::styled(
                format!("  {}", entry.date.format("%b %e %Y")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "n new quiz  ·  o offline quiz  ·  t theme  ·  s sound  ·  l logout  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
