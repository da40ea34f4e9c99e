//! Active quiz screen: question, choices, countdown.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Difficulty;
use crate::session::QuestionView;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(view) = app.current_view() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], view);
    render_timer(frame, chunks[0], app, view);
    render_meta(frame, chunks[1], view);
    render_question_text(frame, chunks[3], &view.question.question);
    render_choices(frame, chunks[4], app, view);
    render_controls(frame, chunks[5], app);
}

fn render_progress(frame: &mut Frame, area: Rect, view: &QuestionView) {
    let progress = format!("Question {} of {}", view.index + 1, view.total);
    let widget = Paragraph::new(progress).fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App, view: &QuestionView) {
    let (text, color) = if app.reveal().is_some() {
        (
            format!("next in {}s", app.auto_advance_seconds().unwrap_or(0)),
            Color::DarkGray,
        )
    } else if view.time_limit == 0 {
        ("∞".to_string(), Color::DarkGray)
    } else {
        let remaining = app.remaining_seconds().unwrap_or(0);
        let color = match remaining {
            0..=5 => Color::Red,
            6..=10 => Color::Yellow,
            _ => Color::Gray,
        };
        (format!("{remaining}s"), color)
    };

    let widget = Paragraph::new(text).alignment(Alignment::Right).fg(color);
    frame.render_widget(widget, area);
}

fn render_meta(frame: &mut Frame, area: Rect, view: &QuestionView) {
    let mut meta = view.question.category.clone();
    if view.question.difficulty != Difficulty::Unspecified {
        meta.push_str(&format!("  ·  {}", view.question.difficulty));
    }
    let widget = Paragraph::new(meta).fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_choices(frame: &mut Frame, area: Rect, app: &App, view: &QuestionView) {
    let correct_index = view
        .choices
        .iter()
        .position(|choice| *choice == view.question.correct);

    let mut lines: Vec<Line> = Vec::with_capacity(view.choices.len() * 2);
    for (index, choice) in view.choices.iter().enumerate() {
        let (marker, style) = choice_presentation(app, index, correct_index);
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Marker and style for one choice row, before and after the reveal.
fn choice_presentation(app: &App, index: usize, correct_index: Option<usize>) -> (char, Style) {
    match app.reveal() {
        None => {
            if index == app.selected_choice() {
                ('>', Style::default().fg(Color::Cyan).bold())
            } else {
                (' ', Style::default().fg(Color::Gray))
            }
        }
        Some(reveal) => {
            if Some(index) == correct_index {
                ('+', Style::default().fg(Color::Green).bold())
            } else if reveal.chosen == Some(index) {
                ('-', Style::default().fg(Color::Red).bold())
            } else {
                (' ', Style::default().fg(Color::DarkGray))
            }
        }
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.reveal().is_some() {
        "enter next  ·  esc abandon"
    } else {
        "j/k navigate  ·  enter answer  ·  esc abandon"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
