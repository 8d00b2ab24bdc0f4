use crate::app::App;
use crate::cli::CliArgs;
use crate::ui::widgets::form::render_form;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::results::{render_banner, render_details, render_single, render_table};
use hfprop_tui::theme::Palette;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

const FORM_WIDTH: u16 = 40;
const SINGLE_PANEL_HEIGHT: u16 = 6;
const MAX_TABLE_HEIGHT: u16 = 14;

pub fn render_main(app: &mut App, f: &mut Frame<'_>) {
    let palette = app.theme.palette();
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Form and results
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(area.inner(Margin::new(1, 0)));

    render_title_section(app, palette, f, main_layout[0]);
    render_content_section(app, palette, f, main_layout[1]);
    render_shortcuts(palette, f, main_layout[2]);

    if app.show_help {
        render_help_popup(palette, f, area);
    }
}

fn render_title_section(app: &mut App, palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title(" HF Propagation Simulator ")
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    f.render_widget(title_block, area);

    let inner = area.inner(Margin::new(1, 1));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(6),
        ])
        .split(inner);

    let variant = app.controller.variant();
    let summary = TextLine::from(vec![
        Span::styled(
            format!("{} ", variant.as_str()),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            app.controller.client().endpoint().to_string(),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(summary), chunks[0]);

    if app.controller.controls().busy {
        let throbber = Throbber::default()
            .label("Simulating...")
            .style(Style::default().fg(palette.text))
            .throbber_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        f.render_stateful_widget(throbber, chunks[1], &mut app.throbber);
    }

    let glyph = Paragraph::new(Span::styled(
        format!("[{}]", app.theme.glyph()),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);
    f.render_widget(glyph, chunks[2]);
}

fn render_content_section(app: &App, palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(30)])
        .split(area);

    render_form(app, palette, f, columns[0]);

    let view = app.controller.view();
    let banner_height = if app.controller.banner().is_some() { 3 } else { 0 };
    let results_height = if view.shows_table() {
        u16::try_from(view.rows.len() + 3)
            .unwrap_or(MAX_TABLE_HEIGHT)
            .min(MAX_TABLE_HEIGHT)
    } else {
        SINGLE_PANEL_HEIGHT
    };

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(results_height),
            Constraint::Min(8),
        ])
        .split(columns[1]);

    if let Some(banner) = app.controller.banner() {
        render_banner(banner, palette, f, right[0]);
    }

    if view.shows_table() {
        render_table(&view.rows, app.table_selected, palette, f, right[1]);
    } else {
        render_single(&view.single, palette, f, right[1]);
    }

    match app.controller.map() {
        Some(overlay) => {
            let bottom = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(right[2]);
            render_details(&view.details, palette, f, bottom[0]);
            render_map(overlay, palette, f, bottom[1]);
        }
        None => render_details(&view.details, palette, f, right[2]),
    }
}

fn render_shortcuts(palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new(shortcuts_line(palette)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn shortcut_spans(palette: Palette, key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(action, Style::default().fg(palette.muted)),
    ]
}

fn shortcuts_line(palette: Palette) -> TextLine<'static> {
    let entries = [
        ("F1", ": Help | "),
        ("F5/s", ": Run | "),
        ("Tab", ": Next field | "),
        ("←/→", ": Change option | "),
        ("PgUp/PgDn", ": Scroll | "),
        ("t", ": Theme | "),
        ("q", ": Quit"),
    ];
    TextLine::from(
        entries
            .into_iter()
            .flat_map(|(key, action)| shortcut_spans(palette, key, action))
            .collect::<Vec<_>>(),
    )
}

fn render_help_popup(palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.warning))
        .style(Style::default().bg(palette.background).fg(palette.text));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines(palette)))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(palette.muted),
    ))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn help_entry(palette: Palette, key: &'static str, text: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {text}")),
    ])
}

fn build_help_lines(palette: Palette) -> Vec<TextLine<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        TextLine::from(Span::styled(
            "HF Propagation Simulator",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Fill in the path and station parameters, then run the simulation. One frequency shows a summary; a sweep shows one table row per step.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled("Keyboard Shortcuts:", bold)),
        help_entry(palette, "F5 / s / Enter", "Run simulation"),
        help_entry(palette, "Tab / Down", "Next field"),
        help_entry(palette, "Shift-Tab / Up", "Previous field"),
        help_entry(palette, "Left / Right", "Change antenna or noise option"),
        help_entry(palette, "Backspace / Del", "Delete a character / clear field"),
        help_entry(palette, "PgUp / PgDn", "Scroll the sweep table"),
        help_entry(palette, "d", "Dismiss message"),
        help_entry(palette, "t", "Toggle light/dark theme"),
        help_entry(palette, "F1", "Toggle this help popup"),
        help_entry(palette, "q / Esc", "Quit application"),
        TextLine::from(""),
        TextLine::from(Span::styled("Skywave Likelihood:", bold)),
        TextLine::from(vec![
            Span::styled("  Good", Style::default().fg(palette.good)),
            Span::raw("  "),
            Span::styled("Fair", Style::default().fg(palette.fair)),
            Span::raw("  "),
            Span::styled("Poor", Style::default().fg(palette.poor)),
            Span::raw("  "),
            Span::styled("Fair (GW)", Style::default().fg(palette.fair_ground_wave)),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled("CLI Options:", bold)),
    ];

    let help_text = CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
