mod auth;
mod dashboard;
mod quiz;
mod results;
mod review;
mod setup;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, Screen, StatusKind};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen() {
        Screen::Auth => auth::render(frame, area, app),
        Screen::Dashboard => dashboard::render(frame, area, app),
        Screen::Setup => setup::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Results => results::render(frame, area, app),
        Screen::Review => review::render(frame, area, app),
    }

    if app.is_loading() {
        render_loading(frame, area);
    }
    render_status(frame, area, app);
}

/// Indicator shown for the frame(s) while questions are being fetched.
fn render_loading(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    let widget = Paragraph::new("Fetching questions...")
        .alignment(Alignment::Center)
        .fg(Color::Cyan);
    frame.render_widget(widget, row);
}

/// Transient status message on the bottom row, over whatever screen is up.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = app.status() else { return };
    if area.height < 2 {
        return;
    }

    let color = match status.kind {
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
        StatusKind::Info => Color::Cyan,
    };

    let line_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
    let widget = Paragraph::new(status.text.as_str())
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, line_area);
}
