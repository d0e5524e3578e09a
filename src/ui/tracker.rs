//! "Where is ISS?" tab
//!
//! A world map centered on the station with a marker at its position, plus an
//! info panel beside it (wide terminals) or below it (narrow terminals).

use crate::config::{MapConfig, MapDetail};
use crate::tracker::{PanelMode, TrackerState};
use crate::types::PositionSample;
use crate::ui::{animation, widgets, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};
use std::time::{Duration, Instant};

/// Glyph drawn at the station's position
pub const ISS_MARKER: &str = "✚";

/// Cells the info panel slides in from
const SLIDE_DISTANCE: u16 = 6;

/// Rows needed by the stacked info panel (6 fields + borders + padding)
const STACKED_PANEL_HEIGHT: u16 = 9;

const FIELD_ICONS: [&str; 6] = ["↕", "↔", "▲", "»", "◷", "☼"];

/// Everything the tracker tab needs to draw one frame
pub struct TrackerView<'a> {
    pub state: &'a TrackerState,
    pub map: &'a MapConfig,
    pub side_by_side: bool,
    pub theme: &'a Theme,
    /// Time since the screen was mounted, drives the spinner
    pub mounted_for: Duration,
    pub now: Instant,
}

/// Render the map and info panel
pub fn render_tracker_tab(frame: &mut Frame, view: &TrackerView, area: Rect) {
    let (map_area, panel_area) = if view.side_by_side {
        let panels = widgets::horizontal_split(area, &[65, 35]);
        (panels[0], panels[1])
    } else {
        let rows = widgets::vertical_layout(
            area,
            vec![Constraint::Min(5), Constraint::Length(STACKED_PANEL_HEIGHT)],
        );
        (rows[0], rows[1])
    };

    render_map(frame, view, map_area);
    render_info_panel(frame, view, panel_area);
}

/// World map around the last known position.
///
/// A viewport that crosses the antimeridian is drawn as two canvases side by
/// side, so the far side of the date line shows the correct coastlines.
fn render_map(frame: &mut Frame, view: &TrackerView, area: Rect) {
    let theme = view.theme;
    let sample = &view.state.sample;
    let has_fix = view.state.last_fix_at.is_some();

    let (lon, lat) = (normalize_longitude(sample.longitude), sample.latitude);
    let half_lon = view.map.longitude_span() / 2.0;
    let half_lat = view.map.latitude_span() / 2.0;

    let resolution = match view.map.resolution {
        MapDetail::Low => MapResolution::Low,
        MapDetail::High => MapResolution::High,
    };

    let title = match (has_fix, view.state.footprint) {
        (true, Some(km)) => format!(" Map · {:.2}°, {:.2}° · footprint {:.0} km ", lat, lon, km),
        (true, None) => format!(" Map · {:.2}°, {:.2}° ", lat, lon),
        (false, _) => " Map ".to_string(),
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(title)
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let segments = longitude_segments(lon, half_lon);
    let marker_segment = segments
        .iter()
        .position(|&(west, east)| (west..=east).contains(&lon));

    for (index, (&(west, east), column)) in segments
        .iter()
        .zip(segment_columns(inner, &segments))
        .enumerate()
    {
        if column.width == 0 {
            continue;
        }

        let show_marker = has_fix && marker_segment == Some(index);
        let canvas = Canvas::default()
            .background_color(theme.bg)
            .marker(Marker::Braille)
            .x_bounds([west, east])
            .y_bounds([lat - half_lat, lat + half_lat])
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: theme.map_land,
                    resolution,
                });
                if show_marker {
                    ctx.layer();
                    ctx.print(lon, lat, Span::styled(ISS_MARKER, theme.marker()));
                }
            });

        frame.render_widget(canvas, column);
    }
}

/// Wrap a longitude into `[-180, 180)`
fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Longitude ranges covering `center ± half`, split at the antimeridian,
/// listed west to east as they appear on screen
fn longitude_segments(center: f64, half: f64) -> Vec<(f64, f64)> {
    let center = normalize_longitude(center);
    let (west, east) = (center - half, center + half);

    if west < -180.0 {
        vec![(west + 360.0, 180.0), (-180.0, east)]
    } else if east > 180.0 {
        vec![(west, 180.0), (-180.0, east - 360.0)]
    } else {
        vec![(west, east)]
    }
}

/// Split `area` into columns proportional to each segment's width in degrees
fn segment_columns(area: Rect, segments: &[(f64, f64)]) -> Vec<Rect> {
    let total: f64 = segments.iter().map(|(west, east)| east - west).sum();
    let mut columns = Vec::with_capacity(segments.len());
    let mut x = area.x;

    for (i, (west, east)) in segments.iter().enumerate() {
        let used = x - area.x;
        let width = if i + 1 == segments.len() || total <= 0.0 {
            area.width - used
        } else {
            let share = (f64::from(area.width) * (east - west) / total).round() as u16;
            share.min(area.width - used)
        };
        columns.push(Rect { x, width, ..area });
        x += width;
    }
    columns
}

/// Position details, acquiring placeholder, or error state
fn render_info_panel(frame: &mut Frame, view: &TrackerView, area: Rect) {
    let theme = view.theme;
    let mode = view.state.panel_mode();

    let border_style = match mode {
        PanelMode::Error => theme.error(),
        _ => theme.border(),
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(" ISS Position ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let inner = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };

    match mode {
        PanelMode::Acquiring => {
            let line = Line::from(vec![
                Span::styled(widgets::spinner_frame(view.mounted_for), theme.title()),
                Span::styled(" Acquiring position…", theme.text_dim()),
            ]);
            frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
        }
        PanelMode::Error => {
            let message = view
                .state
                .sample
                .error_message
                .as_deref()
                .unwrap_or_default();
            let lines = vec![
                Line::styled(format!("⚠ {}", message), theme.error().add_modifier(Modifier::BOLD)),
                Line::raw(""),
                Line::styled("Retrying on the next update.", theme.text_dim()),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Left)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
        PanelMode::Data => {
            let entry = view.state.entry.as_ref().filter(|e| !e.is_finished(view.now));
            let offset = animation::slide_offset(entry, view.now, SLIDE_DISTANCE);
            let dimmed = entry.is_some_and(|e| e.is_dimmed(view.now));

            let text_style = if dimmed { theme.text_dim() } else { theme.text() };
            let icon_style = if dimmed { theme.text_dim() } else { theme.icon() };

            let lines = field_lines(&view.state.sample, text_style, icon_style);
            frame.render_widget(Paragraph::new(lines), widgets::shifted(inner, offset));
        }
    }
}

fn field_lines(sample: &PositionSample, text: Style, icon: Style) -> Vec<Line<'static>> {
    sample
        .panel_lines()
        .into_iter()
        .zip(FIELD_ICONS)
        .map(|(field, glyph)| {
            Line::from(vec![
                Span::styled(format!("{} ", glyph), icon),
                Span::styled(field, text),
            ])
        })
        .collect()
}
