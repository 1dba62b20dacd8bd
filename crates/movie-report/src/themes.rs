use plotters::style::RGBColor;

/// A piecewise-linear colour ramp through evenly spaced stops.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    stops: &'static [(u8, u8, u8)],
}

/// Dark purple → teal → yellow; used for release years.
pub const VIRIDIS: Gradient = Gradient {
    stops: &[
        (68, 1, 84),
        (59, 82, 139),
        (33, 145, 140),
        (94, 201, 98),
        (253, 231, 37),
    ],
};

/// Red → yellow → green; used for ratings.
pub const RED_YELLOW_GREEN: Gradient = Gradient {
    stops: &[(215, 48, 39), (254, 224, 139), (26, 152, 80)],
};

impl Gradient {
    /// Colour at position `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let idx = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - idx as f64;
        let (r0, g0, b0) = self.stops[idx];
        let (r1, g1, b1) = self.stops[idx + 1];
        RGBColor(lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
    }

    /// Colour for `value` on the scale `[min, max]`.
    pub fn map(&self, value: f64, min: f64, max: f64) -> RGBColor {
        if max <= min {
            return self.at(1.0);
        }
        self.at((value - min) / (max - min))
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Fixed palette for the rendered charts.
#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub decade_bar: RGBColor,
    pub decade_edge: RGBColor,
    pub histogram: RGBColor,
    pub histogram_edge: RGBColor,
    pub top_bar: RGBColor,
    pub year_bar: RGBColor,
    pub year_scale: Gradient,
    pub rating_scale: Gradient,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            decade_bar: RGBColor(135, 206, 235),
            decade_edge: RGBColor(0, 0, 128),
            histogram: RGBColor(144, 238, 144),
            histogram_edge: RGBColor(0, 100, 0),
            top_bar: RGBColor(255, 127, 80),
            year_bar: RGBColor(70, 130, 180),
            year_scale: VIRIDIS,
            rating_scale: RED_YELLOW_GREEN,
        }
    }
}
