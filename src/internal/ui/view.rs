use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use super::app::App;
use super::greeting;
use crate::internal::notification::NotificationType;

#[tracing::instrument(skip(app, f))]
pub fn draw(app: &App, f: &mut Frame) {
    // High level render timing. Logged at the end of draw when performance
    // metrics are enabled and in debug builds.
    let start = std::time::Instant::now();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);
    render_content(app, f, chunks[1]);
    render_status_bar(app, f, chunks[2]);

    // Render notification overlay if present
    if app.notification.is_some() {
        render_notification(app, f);
    }

    // Conditional render timing: only emit when the config allows it and during debug builds
    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?start.elapsed(), "render.draw");
    }
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    // Show the active theme in the top-right corner
    let top_bar_text = format!("Theme: {}", app.theme_label());

    let p = Paragraph::new(top_bar_text)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .padding(Padding::new(
                    app.config.ui.padding.horizontal,
                    app.config.ui.padding.horizontal,
                    app.config.ui.padding.vertical,
                    app.config.ui.padding.vertical,
                ))
                .style(Style::default().bg(app.theme.background)),
        )
        .style(Style::default().fg(app.theme.muted));
    f.render_widget(p, area);
}

fn render_content(app: &App, f: &mut Frame, area: Rect) {
    let view_start = std::time::Instant::now();

    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(
            app.config.ui.padding.horizontal,
            app.config.ui.padding.horizontal,
            app.config.ui.padding.vertical,
            app.config.ui.padding.vertical,
        ))
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.background))
        .title("Greeting");

    let inner = block.inner(area);
    f.render_widget(&block, area);

    greeting::render(f, inner, &app.theme);

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?view_start.elapsed(), view = "greeting", "render.greeting");
    }
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let status = "q: Quit | t: Switch Theme";

    let p = Paragraph::new(status)
        .block(
            Block::default()
                .padding(Padding::new(
                    app.config.ui.padding.horizontal,
                    app.config.ui.padding.horizontal,
                    app.config.ui.padding.vertical,
                    app.config.ui.padding.vertical,
                ))
                .style(Style::default().bg(app.theme.accent)),
        )
        .style(Style::default().fg(app.theme.background));
    f.render_widget(p, area);
}

fn render_notification(app: &App, f: &mut Frame) {
    if let Some(notification) = &app.notification {
        let area = f.area();
        if area.width < 8 || area.height < 3 {
            return;
        }

        // Create centered popup
        let popup_width = (notification.message.len() as u16 + 4).min(area.width - 4);
        let popup_height = 3;

        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;

        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        // Color code based on notification type
        let (bg_color, title) = match notification.notification_type {
            NotificationType::Info => (Color::Blue, "Info"),
            NotificationType::Warning => (Color::Yellow, "Warning"),
            NotificationType::Error => (Color::Red, "Error"),
        };

        let popup = Paragraph::new(notification.message.as_str())
            .style(
                Style::default()
                    .bg(bg_color)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border))
                    .title(title)
                    .title_style(Style::default().fg(app.theme.foreground)),
            )
            .alignment(Alignment::Center);

        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}
