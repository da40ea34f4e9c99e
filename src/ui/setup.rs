//! Quiz setup form.

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::{App, SetupForm};

const ROW_LABELS: [&str; 4] = ["Category", "Difficulty", "Questions", "Time per question"];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.setup_form();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let title = Paragraph::new("NEW QUIZ").fg(Color::Cyan).bold();
    frame.render_widget(title, chunks[0]);

    let mut lines = Vec::with_capacity(SetupForm::ROWS * 2);
    for (row, label) in ROW_LABELS.iter().enumerate() {
        lines.push(settings_row(form, row, label));
        lines.push(Line::from(""));
    }

    let start_focused = form.row() == SetupForm::START_ROW;
    let start_style = if start_focused {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let start_marker = if start_focused { ">" } else { " " };
    lines.push(Line::from(vec![
        Span::styled(format!(" {start_marker} "), start_style),
        Span::styled("[ START QUIZ ]", start_style),
    ]));

    frame.render_widget(Paragraph::new(lines), chunks[2]);

    let controls = Paragraph::new("j/k row  ·  h/l change  ·  enter start  ·  esc back")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}

fn settings_row(form: &SetupForm, row: usize, label: &str) -> Line<'static> {
    let focused = form.row() == row;
    let style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { ">" } else { " " };

    Line::from(vec![
        Span::styled(format!(" {marker} "), style),
        Span::styled(format!("{label:<18}"), style),
        Span::styled(format!("< {} >", form.value_label(row)), style),
    ])
}
