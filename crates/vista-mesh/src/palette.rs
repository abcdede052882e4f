//! Height-weighted vertex coloring.

use glam::Vec3;

/// Two-stop color ramp from low ground to high mountain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Color at weight 0.
    pub ground: Vec3,
    /// Color at weight 1.
    pub mountain: Vec3,
}

impl Palette {
    /// Create a palette from RGB triples.
    pub fn new(ground: [f32; 3], mountain: [f32; 3]) -> Self {
        Self {
            ground: Vec3::from_array(ground),
            mountain: Vec3::from_array(mountain),
        }
    }

    /// Linear blend between ground and mountain.
    ///
    /// The weight is not clamped: heights beyond the nominal scale
    /// extrapolate past either stop.
    pub fn color(&self, weight: f32) -> [f32; 3] {
        self.ground.lerp(self.mountain, weight).to_array()
    }

    /// Weight for a height, normalized by the terrain scale.
    ///
    /// A zero scale yields weight 0 (flat terrain is all ground).
    pub fn weight(height: f64, scale: f64) -> f32 {
        if scale == 0.0 {
            0.0
        } else {
            (height / scale) as f32
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new([0.22, 0.52, 0.18], [0.92, 0.92, 0.95])
    }
}
