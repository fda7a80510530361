use rand::Rng;

/// Color is the state of a single cell.
/// Pure black is the dead sentinel; any other triple is alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// The dead cell
    pub const DEAD: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.r != 0 || self.g != 0 || self.b != 0
    }

    /// Draw each channel independently and uniformly from 0..=255.
    /// May return black, which reads as dead.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }
}

/// Real-valued component-wise mean of a set of colors.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct MeanColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeanColor {
    pub const BLACK: MeanColor = MeanColor { r: 0.0, g: 0.0, b: 0.0 };

    /// Mean of the given colors, black when there are none
    pub fn of<I: IntoIterator<Item = Color>>(colors: I) -> Self {
        let (sum, n) = colors.into_iter().fold(([0u32; 3], 0u32), |(s, n), c| {
            ([s[0] + c.r as u32, s[1] + c.g as u32, s[2] + c.b as u32], n + 1)
        });
        if n == 0 {
            return Self::BLACK;
        }
        let n = n as f32;
        Self {
            r: sum[0] as f32 / n,
            g: sum[1] as f32 / n,
            b: sum[2] as f32 / n,
        }
    }

    /// Quantize to an 8-bit cell color.
    ///
    /// Channels round to nearest. A non-black mean never quantizes to the dead
    /// sentinel: if rounding would produce black, the channels round up instead.
    pub fn to_color(self) -> Color {
        let quantize = |v: f32, f: fn(f32) -> f32| f(v).clamp(0.0, 255.0) as u8;
        let rounded = Color::new(
            quantize(self.r, f32::round),
            quantize(self.g, f32::round),
            quantize(self.b, f32::round),
        );
        if rounded.is_alive() || self == Self::BLACK {
            return rounded;
        }
        Color::new(
            quantize(self.r, f32::ceil),
            quantize(self.g, f32::ceil),
            quantize(self.b, f32::ceil),
        )
    }
}

impl From<Color> for MeanColor {
    fn from(c: Color) -> Self {
        Self {
            r: c.r as f32,
            g: c.g as f32,
            b: c.b as f32,
        }
    }
}
