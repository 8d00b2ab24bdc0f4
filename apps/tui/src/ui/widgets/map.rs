use hfprop_tui::map::{MapOverlay, PathKind};
use hfprop_tui::theme::Palette;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

// Smallest box the canvas will zoom to, in degrees.
const MIN_VIEW_SPAN: f64 = 2.0;

pub fn render_map(overlay: &MapOverlay, palette: Palette, f: &mut Frame<'_>, area: Rect) {
    if area.width < 8 || area.height < 5 {
        return;
    }

    let view = overlay.viewport().with_min_span(MIN_VIEW_SPAN);
    let footer = overlay
        .markers()
        .map(|marker| format!("{} {}", marker.label, marker.detail()))
        .collect::<Vec<_>>()
        .join("  ");

    let block = Block::default()
        .title(" Map ")
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .title_bottom(TextLine::from(Span::styled(
            footer,
            Style::default().fg(palette.muted),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([view.west, view.east])
        .y_bounds([view.south, view.north])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: palette.map,
                resolution: MapResolution::High,
            });
            ctx.layer();

            for path in overlay.paths() {
                let color = palette.bucket(path.style);
                for (from, to) in path.segments() {
                    ctx.draw(&CanvasLine {
                        x1: from.lon,
                        y1: from.lat,
                        x2: to.lon,
                        y2: to.lat,
                        color,
                    });
                }
                // Hop point of the skywave arc.
                if path.kind == PathKind::Sky {
                    if let Some(apex) = path.points.get(1) {
                        ctx.draw(&Points {
                            coords: &[(apex.lon, apex.lat)],
                            color,
                        });
                    }
                }
            }

            for marker in overlay.markers() {
                let position = marker.position;
                ctx.draw(&Points {
                    coords: &[(position.lon, position.lat)],
                    color: palette.accent,
                });
                ctx.print(
                    position.lon,
                    position.lat,
                    Span::styled(
                        marker.label,
                        Style::default()
                            .fg(palette.text)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}
