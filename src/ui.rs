use crate::app::{App, MapKind};
use crate::braille::BrailleCanvas;
use crate::config::Coloring;
use crate::format::format_bound;
use crate::map::MapLayers;
use crate::sources::source_for;
use crate::view::SelectionMode;
use crate::viz::ramp;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};
use std::time::Instant;

pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    render_map(frame, app, chunks[0], now);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let title = format!(" {} · {} ", app.map, app.active_kind());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(title, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app.map_renderer.render(
        inner.width as usize,
        inner.height as usize,
        &viewport,
        app.visible_markers(now),
    );
    frame.render_widget(MapWidget { layers }, inner);

    render_legend(frame, app, inner);
    if let Some(marker) = app.hovered(now) {
        if let (Some((col, row)), Some((title, rows))) = (app.mouse_pos, app.tooltip(marker)) {
            render_tooltip(frame, inner, col, row, &title, &rows);
        }
    }
}

struct MapWidget {
    layers: MapLayers,
}

/// Copy non-empty cells of `canvas`, using the cell's own ink when it has
/// one and `color` otherwise
fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
    for cell in canvas.cells() {
        if cell.col >= area.width as usize || cell.row >= area.height as usize {
            continue;
        }
        let fg = cell.ink.map_or(color, Color::from);
        buf[(area.x + cell.col as u16, area.y + cell.row as u16)]
            .set_char(cell.glyph)
            .set_fg(fg);
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_layer(&self.layers.coastlines, Color::Cyan, area, buf);
        render_layer(&self.layers.states, Color::DarkGray, area, buf);
        render_layer(&self.layers.borders, Color::Gray, area, buf);
        render_layer(&self.layers.markers, Color::White, area, buf);
    }
}

fn legend_lines(app: &App) -> Vec<Line<'static>> {
    let kind = app.active_kind();
    let style = app.active_style();
    let mut lines = vec![Line::from(Span::styled(
        format!("{} ({})", kind, kind.unit()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    match style.coloring {
        Coloring::Buckets => {
            for entry in style.buckets.legend() {
                let range = match entry.upper {
                    Some(upper) => format!("{} - {}", format_bound(kind, entry.lower), format_bound(kind, upper)),
                    None => format!("{}+", format_bound(kind, entry.lower)),
                };
                lines.push(Line::from(vec![
                    Span::styled("██ ", Style::default().fg(entry.color.into())),
                    Span::raw(range),
                ]));
            }
        }
        Coloring::Gradient => {
            let ctx = &app.active_dataset().context;
            let mut spans = vec![Span::raw(format!("{} ", format_bound(kind, ctx.min())))];
            for step in 0..8 {
                let color = ramp(step as f64 / 7.0);
                spans.push(Span::styled("█", Style::default().fg(color.into())));
            }
            spans.push(Span::raw(format!(" {}", format_bound(kind, ctx.max()))));
            lines.push(Line::from(spans));
        }
    }
    lines
}

fn render_legend(frame: &mut Frame, app: &App, inner: Rect) {
    let lines = legend_lines(app);
    let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 2;
    let height = lines.len() as u16 + 2;
    if width > inner.width || height > inner.height {
        return;
    }
    let area = Rect {
        x: inner.x,
        y: inner.y + inner.height - height,
        width,
        height,
    };
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}

fn render_tooltip(frame: &mut Frame, inner: Rect, col: u16, row: u16, title: &str, rows: &[(String, String)]) {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let lines: Vec<Line> = rows
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<label_width$}  "), Style::default().fg(Color::DarkGray)),
                Span::styled(value.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let body = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = (body.max(title.chars().count() + 2) as u16 + 2).min(inner.width);
    let height = (lines.len() as u16 + 2).min(inner.height);

    // Right of and below the cursor, flipped when it would not fit
    let x = if col + 2 + width <= inner.x + inner.width {
        col + 2
    } else {
        col.saturating_sub(width + 1).max(inner.x)
    };
    let y = if row + 1 + height <= inner.y + inner.height {
        row + 1
    } else {
        row.saturating_sub(height).max(inner.y)
    };
    let area = Rect { x, y, width, height };

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    format!(" {title} "),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
        ),
        area,
    );
}

fn toggle_span(on: bool, on_text: &'static str, off_text: &'static str) -> Span<'static> {
    Span::styled(
        if on { on_text } else { off_text },
        Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
    )
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.map_renderer.settings;
    let dim = Style::default().fg(Color::DarkGray);
    let loaded = app.active_dataset();

    let mut spans = vec![
        Span::styled(" Zoom: ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" (", dim),
        Span::styled(app.lod_level(), Style::default().fg(Color::Magenta)),
        Span::styled(") ", dim),
    ];
    if app.map == MapKind::Japan {
        let (mode, color) = match app.view.mode {
            SelectionMode::Automatic => ("[A]uto ", Color::Green),
            SelectionMode::Manual => ("[a]manual 1/2/3 ", Color::Yellow),
        };
        spans.push(Span::styled(mode, Style::default().fg(color)));
    }
    spans.extend([
        toggle_span(settings.show_borders, "[B]order ", "[b]order "),
        toggle_span(settings.show_states, "[S]tate ", "[s]tate "),
        Span::styled("| ", dim),
        Span::styled(
            if loaded.is_fallback() { "fallback data " } else { "api data " },
            Style::default().fg(if loaded.is_fallback() { Color::Red } else { Color::Green }),
        ),
        Span::styled(format!("{} | ", source_for(app.active_kind()).provider), dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | hjkl:pan +/-:zoom w/J:map r:reset q:quit", dim),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
