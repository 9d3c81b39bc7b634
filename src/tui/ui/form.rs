//! Input form for the active disease.

use std::ops::Range;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{FieldSpec, FormState};
use crate::tui::styles::MedicalTheme;

const FIELD_HEIGHT: u16 = 3;

/// Render the active form: header, two columns of inputs, key hints.
pub fn render_form(f: &mut Frame, area: Rect, form: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_form_header(f, chunks[0], form);
    render_form_fields(f, chunks[1], form);
    render_form_footer(f, chunks[2], form);
}

fn render_form_header(f: &mut Frame, area: Rect, form: &FormState) {
    let disease = form.disease();
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" ", MedicalTheme::text()),
            Span::styled(disease.title(), MedicalTheme::title()),
            Span::styled(
                format!(" │ {} inputs", form.schema().len()),
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", disease.intro()),
            MedicalTheme::text_muted(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, form: &FormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .horizontal_margin(1)
        .split(area);

    let fields = form.schema().fields;
    let mid = fields.len().div_ceil(2);
    let fit = usize::from(area.height / FIELD_HEIGHT).max(1);
    let rows = visible_rows(mid, fit, form.focused() % mid);

    render_field_column(f, columns[0], form, 0..mid, rows.clone());
    render_field_column(f, columns[1], form, mid..fields.len(), rows);
}

/// Rows of a column that fit on screen while keeping `focused_row` in view.
fn visible_rows(total: usize, fit: usize, focused_row: usize) -> Range<usize> {
    if total <= fit {
        return 0..total;
    }
    let start = focused_row.saturating_sub(fit - 1).min(total - fit);
    start..start + fit
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    form: &FormState,
    column: Range<usize>,
    rows: Range<usize>,
) {
    let shown: Vec<usize> = rows
        .map(|row| column.start + row)
        .filter(|index| column.contains(index))
        .collect();

    let constraints: Vec<Constraint> = shown
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, index) in shown.into_iter().enumerate() {
        let field = &form.schema().fields[index];
        let is_selected = index == form.focused();
        render_field(f, chunks[slot], field, form.raw(index), is_selected);
    }
}

fn render_field(f: &mut Frame, area: Rect, field: &FieldSpec, raw: &str, is_selected: bool) {
    let border_style = if is_selected {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    };

    let title_style = if is_selected {
        MedicalTheme::focused()
    } else {
        MedicalTheme::text_secondary()
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", field.label), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let value_display = if raw.is_empty() {
        Span::styled(field.help, MedicalTheme::text_muted())
    } else {
        Span::styled(raw, MedicalTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if is_selected {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, form: &FormState) {
    let content = Line::from(vec![
        Span::styled("[↑↓/Tab] ", MedicalTheme::key_hint()),
        Span::styled("Field ", MedicalTheme::key_desc()),
        Span::styled("[←→] ", MedicalTheme::key_hint()),
        Span::styled("-/+1 ", MedicalTheme::key_desc()),
        Span::styled("[Del] ", MedicalTheme::key_hint()),
        Span::styled("Clear ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled(form.disease().submit_label(), MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rows_fit() {
        assert_eq!(visible_rows(4, 10, 3), 0..4);
    }

    #[test]
    fn test_scrolls_to_keep_focus_visible() {
        // Parkinson's: 11 rows per column, room for 5.
        assert_eq!(visible_rows(11, 5, 0), 0..5);
        assert_eq!(visible_rows(11, 5, 4), 0..5);
        assert_eq!(visible_rows(11, 5, 5), 1..6);
        assert_eq!(visible_rows(11, 5, 10), 6..11);
    }
}
