//! Sidebar: the five diseases, one of them active.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::Disease;
use crate::tui::styles::{MedicalTheme, LOGO_SMALL};

/// Render the disease selection sidebar.
pub fn render_menu(f: &mut Frame, area: Rect, active: Disease, models_verified: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Choices
            Constraint::Length(6), // Status + keys
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(format!(" {LOGO_SMALL} "), MedicalTheme::header())),
        Line::from(Span::styled(
            " Disease Prediction System",
            MedicalTheme::text_secondary(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = Disease::ALL
        .iter()
        .map(|d| ListItem::new(Line::from(format!(" {} ", d.display_name()))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" Select ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .style(MedicalTheme::text())
        .highlight_style(MedicalTheme::selected())
        .highlight_symbol("▶");

    let mut state = ListState::default();
    state.select(Some(active.index()));
    f.render_stateful_widget(list, chunks[1], &mut state);

    render_menu_footer(f, chunks[2], models_verified);
}

fn render_menu_footer(f: &mut Frame, area: Rect, models_verified: bool) {
    let (icon, label, style) = if models_verified {
        ("OK", "Models verified", MedicalTheme::success())
    } else {
        ("--", "Models unsigned", MedicalTheme::warning())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {icon} "), style),
            Span::styled(label, MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled(" [PgUp/PgDn] ", MedicalTheme::key_hint()),
            Span::styled("Disease", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled(" [Ctrl+Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
    ];

    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(p, area);
}
