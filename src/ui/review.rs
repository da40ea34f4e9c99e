//! Scrollable answer-by-answer review of the last quiz.

use ratatui::{
    prelude::*,
    widgets::{Block, Padding, Paragraph},
};

use crate::app::App;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let header = Paragraph::new("ANSWER REVIEW")
        .alignment(Alignment::Center)
        .fg(Color::Cyan)
        .bold();
    frame.render_widget(header, chunks[0]);

    render_breakdown(frame, chunks[1], app);
    render_controls(frame, chunks[2]);
}

fn render_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    if app.review_answers().is_empty() {
        lines.push(Line::from("Nothing to review".fg(Color::DarkGray)));
    }

    for (index, record) in app.review_answers().iter().enumerate() {
        let (symbol, color) = if record.is_correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_question(&record.question),
                Style::default().fg(Color::White),
            ),
        ]));

        let user_answer = record.user_answer.as_deref().unwrap_or("Not answered");
        lines.push(Line::from(vec![
            Span::styled("      your answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(user_answer.to_string(), Style::default().fg(color)),
        ]));

        if !record.is_correct {
            lines.push(Line::from(vec![
                Span::styled("      correct:     ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    record.correct_answer.as_str(),
                    Style::default().fg(Color::Green),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll_offset(app) as u16, 0));
    frame.render_widget(widget, area);
}

/// Line offset for the current scroll position. Entries are three or four
/// lines tall, so scrolling steps over whole entries.
fn scroll_offset(app: &App) -> usize {
    app.review_answers()
        .iter()
        .take(app.review_scroll())
        .map(|record| if record.is_correct { 3 } else { 4 })
        .sum()
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  b back  ·  n new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
