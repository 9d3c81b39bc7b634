//! Result panel: the verdict (or error) of the last submit.

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::Outcome;
use crate::domain::PredictionResult;
use crate::tui::styles::MedicalTheme;

/// Render the outcome of the last submit, if any.
pub fn render_result_panel(f: &mut Frame, area: Rect, outcome: Option<&Outcome>) {
    match outcome {
        None => render_idle(f, area),
        Some(Outcome::Result(result)) => render_result(f, area, result),
        Some(Outcome::Error(message)) => render_error(f, area, message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(Line::from(Span::styled(
        "Fill in the form and press [Enter] to predict",
        MedicalTheme::text_muted(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Result ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_result(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let style = MedicalTheme::verdict(result.verdict);
    let icon = if result.positive() { "+" } else { "-" };

    let content = Paragraph::new(Line::from(Span::styled(
        format!("{icon} {}", result.label()),
        style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(
                format!(" {} Result ", result.disease),
                MedicalTheme::subtitle(),
            ))
            .borders(Borders::ALL)
            .border_style(style),
    );

    f.render_widget(content, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(Span::styled("! Error", MedicalTheme::danger())),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}
