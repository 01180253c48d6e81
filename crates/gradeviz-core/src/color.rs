/// RGB color with an alpha channel. Alpha is only used by the comparison
/// table rows; everything else stays opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }

    /// `#rrggbb` form used in render artifacts. Alpha is carried separately.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Piecewise-linear interpolation over equally spaced color stops. Inputs
/// are clamped to [0, 1]; the stops themselves are hit exactly.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<Rgba>,
}

impl ColorRamp {
    pub fn new(stops: Vec<Rgba>) -> Self {
        assert!(stops.len() >= 2, "a ramp needs at least two stops");
        ColorRamp { stops }
    }

    /// The tree-node ramp: red at 0, yellow at 0.5, green at 1.
    pub fn score_ramp() -> Self {
        ColorRamp::new(vec![
            Rgba::opaque(0xff, 0x00, 0x00),
            Rgba::opaque(0xff, 0xff, 0x66),
            Rgba::opaque(0x00, 0xcc, 0x44),
        ])
    }

    /// Light-to-dark blue ramp styling the comparison views.
    pub fn blues() -> Self {
        ColorRamp::new(vec![
            Rgba::opaque(0xf7, 0xfb, 0xff),
            Rgba::opaque(0x08, 0x30, 0x6b),
        ])
    }

    pub fn color_at(&self, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - index as f64;
        lerp(self.stops[index], self.stops[index + 1], frac)
    }

    /// Discrete sampling of the ramp, used for colorbar legends. 256 levels
    /// is the conventional resolution.
    pub fn levels(&self, n: usize) -> Vec<Rgba> {
        assert!(n >= 2);
        (0..n)
            .map(|i| self.color_at(i as f64 / (n - 1) as f64))
            .collect()
    }
}

fn lerp(a: Rgba, b: Rgba, frac: f64) -> Rgba {
    let channel = |x: u8, y: u8| -> u8 {
        (f64::from(x) + (f64::from(y) - f64::from(x)) * frac).round() as u8
    };
    Rgba {
        r: channel(a.r, b.r),
        g: channel(a.g, b.g),
        b: channel(a.b, b.b),
        a: (f64::from(a.a) + (f64::from(b.a) - f64::from(a.a)) * frac) as f32,
    }
}

/// Maps task scores to node colors. Pure and stateless: the same score
/// always yields the same color, and an absent score maps like 0.0.
#[derive(Debug, Clone)]
pub struct ScoreColorMap {
    ramp: ColorRamp,
}

impl Default for ScoreColorMap {
    fn default() -> Self {
        ScoreColorMap {
            ramp: ColorRamp::score_ramp(),
        }
    }
}

impl ScoreColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&self, score: Option<f64>) -> Rgba {
        self.ramp.color_at(score.unwrap_or(0.0))
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }
}
