use crate::ui::widgets::tables::scroll_offset;
use hfprop_tui::display::{DetailLine, DetailPanel, SinglePanel, TableRow};
use hfprop_tui::theme::Palette;
use hfprop_tui::{Banner, BannerKind};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

fn panel_block(title: &str, palette: Palette) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
}

pub fn render_banner(banner: &Banner, palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let (title, color) = match banner.kind {
        BannerKind::Error => (" Error ", palette.error),
        BannerKind::Warning => (" Warning ", palette.warning),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let text = TextLine::from(vec![
        Span::styled(banner.message.as_str(), Style::default().fg(color)),
        Span::styled("  (d to dismiss)", Style::default().fg(palette.muted)),
    ]);

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_single(panel: &SinglePanel, palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let label = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.text).add_modifier(Modifier::BOLD);

    let lines = vec![
        TextLine::from(vec![
            Span::styled("Distance (km):        ", label),
            Span::styled(panel.distance_km.as_str(), value),
        ]),
        TextLine::from(vec![
            Span::styled("Skywave Likelihood:   ", label),
            Span::styled(
                panel.likelihood.as_str(),
                Style::default()
                    .fg(palette.bucket(panel.likelihood_style))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Ground Wave SNR (dB): ", label),
            Span::styled(panel.ground_wave_snr.as_str(), value),
        ]),
        TextLine::from(vec![
            Span::styled("Skywave SNR (dB):     ", label),
            Span::styled(panel.skywave_snr.as_str(), value),
        ]),
    ];

    f.render_widget(
        Paragraph::new(Text::from(lines)).block(panel_block(" Result ", palette)),
        area,
    );
}

pub fn render_table(
    rows: &[TableRow],
    selected: usize,
    palette: Palette,
    f: &mut Frame<'_>,
    area: Rect,
) {
    // Borders plus header row.
    let visible = usize::from(area.height.saturating_sub(3));
    let offset = scroll_offset(rows.len(), visible, selected);

    let header = Row::new(
        TableRow::HEADERS
            .iter()
            .map(|h| Cell::from(*h))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));

    let body = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, row)| {
            let cells = row.cells();
            let mut out: Vec<Cell<'_>> = cells[..6]
                .iter()
                .map(|cell| Cell::from(*cell))
                .collect();
            out.push(Cell::from(Span::styled(
                cells[6],
                Style::default()
                    .fg(palette.bucket(row.likelihood_style))
                    .add_modifier(Modifier::BOLD),
            )));

            let style = if index == selected {
                Style::default().fg(palette.text).bg(palette.highlight)
            } else {
                Style::default().fg(palette.text)
            };
            Row::new(out).style(style)
        })
        .collect::<Vec<_>>();

    let title = format!(" Frequency Sweep ({} rows) ", rows.len());
    let table = Table::new(
        body,
        [
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Min(14),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(panel_block(&title, palette));

    f.render_widget(table, area);
}

pub fn render_details(panel: &DetailPanel, palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let rule_width = usize::from(area.width.saturating_sub(2));
    let lines: Vec<TextLine<'_>> = panel
        .lines
        .iter()
        .map(|line| match line {
            DetailLine::Field { label, value } => TextLine::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(palette.muted)),
                Span::styled(value.as_str(), Style::default().fg(palette.text)),
            ]),
            DetailLine::Rule => TextLine::from(Span::styled(
                "─".repeat(rule_width),
                Style::default().fg(palette.border),
            )),
            DetailLine::Note(note) => TextLine::from(Span::styled(
                note.as_str(),
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            )),
        })
        .collect();

    let title = format!(" {} ", panel.title);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(panel_block(&title, palette))
            .wrap(Wrap { trim: false }),
        area,
    );
}
