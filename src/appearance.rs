//! Visual attributes and logical volumes.

use crate::geometry::Solid;
use crate::material::MaterialId;

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const MAGENTA: Self = Self::rgba(1.0, 0.0, 1.0, 1.0);
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);
    pub const GREY: Self = Self::rgba(0.5, 0.5, 0.5, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// How a logical volume is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub color: Color,
    pub force_solid: bool,
    pub visible: bool,
    pub line_width: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self::wireframe(Color::WHITE)
    }
}

impl Appearance {
    /// Filled surfaces in the given color.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            force_solid: true,
            visible: true,
            line_width: 1.0,
        }
    }

    /// Edges only.
    #[must_use]
    pub fn wireframe(color: Color) -> Self {
        Self {
            color,
            force_solid: false,
            visible: true,
            line_width: 1.0,
        }
    }

    #[must_use]
    pub fn invisible() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A solid bound to a material and an appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: Solid,
    pub material: MaterialId,
    pub appearance: Appearance,
}

/// Binds a solid to its material and appearance.
#[must_use]
pub fn decorate(
    name: impl Into<String>,
    solid: Solid,
    material: MaterialId,
    appearance: Appearance,
) -> LogicalVolume {
    LogicalVolume {
        name: name.into(),
        solid,
        material,
        appearance,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::material::MaterialCatalog;
    use crate::operations::creation::MakeBox;

    #[test]
    fn decorate_keeps_inputs() {
        let mut catalog = MaterialCatalog::new();
        let lead = catalog.resolve("G4_Pb").unwrap();
        let solid = MakeBox::cube("Block", 1.0).execute().unwrap();
        let look = Appearance::wireframe(Color::GREY.with_alpha(0.05)).with_line_width(2.0);
        let volume = decorate("block_log", solid.clone(), lead, look);

        assert_eq!(volume.name, "block_log");
        assert_eq!(volume.solid, solid);
        assert_eq!(volume.material, lead);
        assert!(!volume.appearance.force_solid);
        assert!((volume.appearance.color.a - 0.05).abs() < 1e-12);
    }

    #[test]
    fn invisible_preset() {
        assert!(!Appearance::invisible().visible);
        assert!(Appearance::solid(Color::BLUE).force_solid);
    }
}
