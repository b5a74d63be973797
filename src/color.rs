use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use brewery_dashboard::data::model::BreweryType;

// ---------------------------------------------------------------------------
// Type colours
// ---------------------------------------------------------------------------

/// Hue step between consecutive colours, in degrees.
const GOLDEN_ANGLE: f32 = 137.507_77;

/// Colour for the `index`-th type. Hues advance by the golden angle, so the
/// first few are far apart and adding a type never recolours earlier ones.
pub fn type_color(index: usize) -> Color32 {
    let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
    // Alternate lightness so neighbours on the hue wheel stay distinguishable.
    let lightness = if index % 2 == 0 { 0.55 } else { 0.45 };
    let rgb: Srgb = Hsl::new(hue, 0.65, lightness).into_color();
    let (r, g, b) = rgb.into_format::<u8>().into_components();
    Color32::from_rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// Color mapping: brewery type → Color32
// ---------------------------------------------------------------------------

/// Gives every brewery type a stable colour for the chart and the table.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<BreweryType, Color32>,
}

impl ColorMap {
    /// Build a colour map for the given types, assigning hues in order.
    pub fn new(types: &[BreweryType]) -> Self {
        let mapping = types
            .iter()
            .cloned()
            .zip((0..).map(type_color))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a type; unknown types are grey.
    pub fn color_for(&self, brewery_type: &BreweryType) -> Color32 {
        self.mapping
            .get(brewery_type)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_type_colours_are_distinct_and_stable() {
        let colours: Vec<Color32> = (0..12).map(type_color).collect();
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(type_color(3), colours[3]);
    }

    #[test]
    fn unmapped_type_is_grey() {
        let map = ColorMap::new(&BreweryType::COMMON);
        assert_ne!(map.color_for(&BreweryType::Micro), Color32::GRAY);
        assert_eq!(map.color_for(&BreweryType::Closed), Color32::GRAY);
    }
}
