use std::fmt;

/// An 8-bit RGB color as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color the way molecular viewers accept literal colors, e.g. `0xff00ff`.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

static NAMED_COLORS: phf::Map<&'static str, Rgb> = phf::phf_map! {
    "blue" => Rgb { r: 0x00, g: 0x00, b: 0xFF },
    "cyan" => Rgb { r: 0x00, g: 0xFF, b: 0xFF },
    "white" => Rgb { r: 0xFF, g: 0xFF, b: 0xFF },
    "yellow" => Rgb { r: 0xFF, g: 0xFF, b: 0x00 },
    "red" => Rgb { r: 0xFF, g: 0x00, b: 0x00 },
};

/// The stops of the diverging charge ramp, as `(charge, color name)` pairs.
///
/// [`charge_to_color`] reproduces each of these stops exactly; renderers use the same list to
/// draw a matching color bar.
pub const CALIBRATION_RAMP: [(f64, &str); 5] = [
    (-1.0, "blue"),
    (-0.25, "cyan"),
    (0.0, "white"),
    (0.25, "yellow"),
    (1.0, "red"),
];

pub fn named_color(name: &str) -> Option<Rgb> {
    NAMED_COLORS.get(name).copied()
}

/// The calibration stops as `(charge, name, color)`, colors looked up by name.
pub fn calibration_stops() -> impl Iterator<Item = (f64, &'static str, Rgb)> {
    CALIBRATION_RAMP
        .iter()
        .filter_map(|&(charge, name)| named_color(name).map(|color| (charge, name, color)))
}

/// Maps a partial charge onto the diverging blue-white-red ramp.
///
/// Charges are clamped to `[-1, 1]`. Positive charges fade white → yellow → red, negative
/// charges fade white → cyan → blue, and zero (or NaN) stays white.
///
/// # Arguments
///
/// * `charge` - The signed partial charge, in units of the elementary charge.
///
/// # Return
///
/// The RGB color for the charge. The function is total and never fails.
pub fn charge_to_color(charge: f64) -> Rgb {
    let mut color = Rgb::WHITE;

    if charge > 0.0 {
        let magnitude = charge.min(1.0);
        color.b = fading_channel(magnitude);
        color.g = green_channel(magnitude);
    } else if charge < 0.0 {
        let magnitude = (-charge).min(1.0);
        color.r = fading_channel(magnitude);
        color.g = green_channel(magnitude);
    }

    color
}

// Reaches zero at |charge| = 0.25.
fn fading_channel(magnitude: f64) -> u8 {
    let value = 255.0 - (4.0 * magnitude * 255.0).round_ties_even();
    value.clamp(0.0, 255.0) as u8
}

// Stays saturated up to |charge| = 0.25, reaches zero at |charge| = 1.
fn green_channel(magnitude: f64) -> u8 {
    let value = 255.0 - ((4.0 / 3.0) * (magnitude - 0.25) * 255.0).round_ties_even();
    value.clamp(0.0, 255.0) as u8
}
