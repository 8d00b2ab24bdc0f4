use crate::app::App;
use hfprop_tui::theme::Palette;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const LABEL_WIDTH: usize = 17;

pub fn render_form(app: &App, palette: Palette, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Parameters ")
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let focused = app.focused();
    let mut lines: Vec<TextLine<'_>> = app
        .fields
        .iter()
        .map(|field| {
            let is_focused = *field == focused;
            let value = app.field_value(*field);
            let value_text = if field.is_choice() {
                format!("< {value} >")
            } else if is_focused {
                format!("{value}_")
            } else {
                value.to_string()
            };

            let (prefix, label_style, value_style) = if is_focused {
                (
                    ">",
                    Style::default()
                        .fg(palette.accent)
                        .bg(palette.highlight)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .fg(palette.text)
                        .bg(palette.highlight)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (
                    " ",
                    Style::default().fg(palette.muted),
                    Style::default().fg(palette.text),
                )
            };

            TextLine::from(vec![
                Span::styled(
                    format!("{prefix} {:<LABEL_WIDTH$}", field.label()),
                    label_style,
                ),
                Span::styled(value_text, value_style),
            ])
        })
        .collect();

    lines.push(TextLine::from(""));
    lines.push(trigger_line(app, palette));

    let paragraph = Paragraph::new(Text::from(lines)).block(block);
    f.render_widget(paragraph, area);
}

fn trigger_line(app: &App, palette: Palette) -> TextLine<'static> {
    let controls = app.controller.controls();
    if controls.trigger_enabled {
        TextLine::from(Span::styled(
            "  [ Run Simulation (F5) ]",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ))
    } else {
        TextLine::from(Span::styled(
            "  [ Running... ]",
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::DIM),
        ))
    }
}
