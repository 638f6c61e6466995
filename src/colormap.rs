use serde::{Deserialize, Serialize};

/// Colour maps for spectrogram images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Viridis,
    Greyscale,
}

/// Viridis sampled at nine evenly spaced stops.
const VIRIDIS_STOPS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

impl Colormap {
    /// Map a normalised value in `[0, 1]` to RGB. Out-of-range input is clamped.
    pub fn rgb(self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Greyscale => {
                let g = (t * 255.0).round() as u8;
                [g, g, g]
            }
            Colormap::Viridis => interpolate(&VIRIDIS_STOPS, t),
        }
    }

    /// 256-entry lookup table, index = quantised normalised value.
    pub fn lut(self) -> Vec<[u8; 3]> {
        (0..256u16).map(|i| self.rgb(i as f32 / 255.0)).collect()
    }
}

impl std::str::FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "grey" | "gray" | "greyscale" | "grayscale" => Ok(Colormap::Greyscale),
            other => Err(format!("unknown colormap: {other}")),
        }
    }
}

fn interpolate(stops: &[[u8; 3]], t: f32) -> [u8; 3] {
    let segments = (stops.len() - 1) as f32;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let frac = pos - i as f32;
    let (a, b) = (stops[i], stops[i + 1]);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * frac).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(Colormap::Viridis.rgb(0.0), [68, 1, 84]);
        assert_eq!(Colormap::Viridis.rgb(1.0), [253, 231, 37]);
        assert_eq!(Colormap::Viridis.rgb(0.5), [33, 144, 141]);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(Colormap::Greyscale.rgb(-3.0), [0, 0, 0]);
        assert_eq!(Colormap::Greyscale.rgb(7.0), [255, 255, 255]);
        assert_eq!(Colormap::Greyscale.rgb(f32::NAN), [0, 0, 0]);
    }

    #[test]
    fn test_lut_monotonic_grey() {
        let lut = Colormap::Greyscale.lut();
        assert_eq!(lut.len(), 256);
        assert!(lut.windows(2).all(|w| w[0][0] <= w[1][0]));
        assert_eq!(lut[128], [128, 128, 128]);
    }
}
