//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::core::SessionKind;
use crate::tui::app::App;

const HELP: &str = "s:start | p:pause | r:reset | q:quit";

const fn kind_color(kind: SessionKind) -> Color {
    match kind {
        SessionKind::Work => Color::Red,
        SessionKind::ShortBreak => Color::Green,
        SessionKind::LongBreak => Color::Cyan,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, percent, chart, count, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Percent
            Constraint::Min(6),    // Chart
            Constraint::Length(1), // Completed count
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_percent(frame, app, chunks[1]);
    render_chart(frame, app, chunks[2]);
    render_count(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

/// Render the session label and countdown.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let color = kind_color(app.snapshot.kind);
    let title = Line::from(vec![
        Span::styled(
            app.snapshot.session_label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            app.snapshot.remaining_formatted.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(header, area);
}

fn render_percent(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = format!("{}% Complete", app.snapshot.percent_complete);
    let percent = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(percent, area);
}

/// Render the rolling progress chart.
fn render_chart(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let points = app.chart_points();
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(kind_color(app.snapshot.kind)))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(" Progress ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, App::x_max()]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0%"), Span::raw("50%"), Span::raw("100%")]),
        );

    frame.render_widget(chart, area);
}

fn render_count(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = format!(
        "Completed pomodoros: {}",
        app.snapshot.completed_work_sessions
    );
    let count = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
    frame.render_widget(count, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = format!("{} | {HELP}", app.state_label());
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
