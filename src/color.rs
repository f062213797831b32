use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// Named gradients used by the three views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Density map.
    Hot,
    /// Magnitude.
    Turbo,
    /// Depth.
    Viridis,
    /// Treemap metric, blue (low) to red (high).
    RdYlBuR,
}

impl ColorScale {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorScale::Hot => &[(0, 0, 0), (230, 0, 0), (255, 210, 0), (255, 255, 255)],
            ColorScale::Turbo => &[
                (48, 18, 59),
                (70, 107, 227),
                (40, 187, 236),
                (50, 241, 151),
                (164, 252, 60),
                (237, 208, 58),
                (251, 128, 34),
                (210, 49, 5),
                (122, 4, 3),
            ],
            ColorScale::Viridis => &[
                (68, 1, 84),
                (71, 44, 122),
                (59, 81, 139),
                (44, 113, 142),
                (33, 144, 141),
                (39, 173, 129),
                (92, 200, 99),
                (170, 220, 50),
                (253, 231, 37),
            ],
            ColorScale::RdYlBuR => &[
                (49, 54, 149),
                (69, 117, 180),
                (116, 173, 209),
                (171, 217, 233),
                (224, 243, 248),
                (254, 224, 144),
                (253, 174, 97),
                (244, 109, 67),
                (215, 48, 39),
                (165, 0, 38),
            ],
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range input is clamped.
    pub fn sample(self, t: f32) -> Color32 {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let x = t * (stops.len() - 1) as f32;
        let i = (x.floor() as usize).min(stops.len() - 2);
        let f = x - i as f32;

        let mixed = linear(stops[i]).mix(linear(stops[i + 1]), f);
        let out: Srgb = Srgb::from_linear(mixed);
        let out = out.into_format::<u8>();
        Color32::from_rgb(out.red, out.green, out.blue)
    }

    /// Colour for `value` placed within `range`.
    pub fn map(self, value: f64, range: ValueRange) -> Color32 {
        self.sample(range.normalize(value) as f32)
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

// ---------------------------------------------------------------------------
// Value range
// ---------------------------------------------------------------------------

/// Observed min/max of the value being coloured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// `None` for an empty iterator.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(ValueRange { min: v, max: v }),
            Some(r) => Some(ValueRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// Position of `value` in `[0, 1]`. A degenerate range maps to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Apply a 0–1 opacity to an opaque colour.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
