//! Twinkling starfield behind the Home screen
//!
//! Each star has a random size, position and period. Brightness oscillates
//! on a period of 1.5x its drift period; position drifts down and back.

use crate::ui::Theme;
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::f64::consts::TAU;
use std::time::Duration;

pub const STAR_COUNT: usize = 50;

/// Maximum downward drift as a fraction of the area height
const DRIFT: f64 = 0.06;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Horizontal position, `0.0..1.0` of the area width
    pub x: f64,
    /// Vertical position, `0.0..1.0` of the area height
    pub y: f64,
    /// 1 (faint) to 3 (bright)
    pub size: u8,
    /// Drift period
    pub period: Duration,
    /// Twinkle phase offset in radians
    pub phase: f64,
}

impl Star {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            x: rng.random_range(0.0..1.0),
            y: rng.random_range(0.0..1.0),
            size: rng.random_range(1..=3),
            period: Duration::from_millis(rng.random_range(2000..5000)),
            phase: rng.random_range(0.0..TAU),
        }
    }

    /// Brightness in `0.0..=1.0` at a point in time
    pub fn brightness(&self, elapsed: Duration) -> f64 {
        let twinkle_period = self.period.as_secs_f64() * 1.5;
        let angle = TAU * elapsed.as_secs_f64() / twinkle_period + self.phase;
        0.5 + 0.5 * angle.sin()
    }

    /// Vertical position including drift, `0.0..1.0 + DRIFT`
    pub fn drifted_y(&self, elapsed: Duration) -> f64 {
        let period = self.period.as_secs_f64();
        // triangle wave: down over one period, back up over the next
        let t = (elapsed.as_secs_f64() / period) % 2.0;
        let wave = if t < 1.0 { t } else { 2.0 - t };
        self.y + wave * DRIFT
    }

    fn symbol(&self) -> &'static str {
        match self.size {
            1 => "·",
            2 => "•",
            _ => "✦",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        Self {
            stars: (0..count).map(|_| Star::random(rng)).collect(),
        }
    }

    pub fn widget<'a>(&'a self, elapsed: Duration, theme: &'a Theme) -> StarfieldWidget<'a> {
        StarfieldWidget {
            field: self,
            elapsed,
            theme,
        }
    }
}

pub struct StarfieldWidget<'a> {
    field: &'a Starfield,
    elapsed: Duration,
    theme: &'a Theme,
}

impl Widget for StarfieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for star in &self.field.stars {
            let brightness = star.brightness(self.elapsed);
            let style = if brightness > 0.66 {
                Style::default().fg(self.theme.fg)
            } else if brightness > 0.33 {
                Style::default().fg(self.theme.fg_dim)
            } else {
                continue;
            };

            let y = star.drifted_y(self.elapsed) % 1.0;
            let col = (star.x * area.width as f64) as u16;
            let row = (y * area.height as f64) as u16;
            let (col, row) = (col.min(area.width - 1), row.min(area.height - 1));

            buf.set_string(area.x + col, area.y + row, star.symbol(), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = Starfield::generate(STAR_COUNT, &mut rng);

        assert_eq!(field.stars.len(), STAR_COUNT);
        for star in &field.stars {
            assert!((0.0..1.0).contains(&star.x));
            assert!((1..=3).contains(&star.size));
            assert!(star.period >= Duration::from_millis(2000));
            assert!(star.period < Duration::from_millis(5000));
        }
    }

    #[test]
    fn test_brightness_and_drift_ranges() {
        let star = Star {
            x: 0.5,
            y: 0.2,
            size: 2,
            period: Duration::from_secs(2),
            phase: 0.0,
        };

        for ms in (0..10_000).step_by(250) {
            let elapsed = Duration::from_millis(ms);
            let b = star.brightness(elapsed);
            assert!((0.0..=1.0).contains(&b));
            let y = star.drifted_y(elapsed);
            assert!(y >= 0.2 && y <= 0.2 + DRIFT + 1e-9);
        }
        assert_eq!(star.drifted_y(Duration::ZERO), 0.2);
        assert!((star.drifted_y(Duration::from_secs(2)) - (0.2 + DRIFT)).abs() < 1e-9);
    }

    #[test]
    fn test_render_stays_inside_area() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = Starfield::generate(STAR_COUNT, &mut rng);
        let theme = Theme::transparent();
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);

        field.widget(Duration::from_millis(1234), &theme).render(area, &mut buf);
        // Rendering into a tiny area must not panic; something should be visible
        let drawn = buf.content.iter().filter(|c| c.symbol() != " ").count();
        assert!(drawn > 0);
    }
}
