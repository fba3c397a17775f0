use serde::{Deserialize, Serialize};

/// A size in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// A physical sheet size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalPageSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl PhysicalPageSize {
    pub const LETTER: Self = Self {
        width_in: 8.5,
        height_in: 11.0,
    };
    pub const A4: Self = Self {
        width_in: 8.27,
        height_in: 11.69,
    };

    /// Converts to CSS pixels at the given rendering resolution.
    pub fn to_pixels(self, dpi: f64) -> Size {
        Size::new(self.width_in * dpi, self.height_in * dpi)
    }

    /// Converts to PDF points (1/72 in).
    pub fn to_points(self) -> Size {
        self.to_pixels(72.0)
    }
}

impl Default for PhysicalPageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// The scroll metrics of the page viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub client_height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
        }
    }

    pub fn midpoint(&self) -> f64 {
        self.scroll_top + self.client_height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.scroll_top + self.client_height
    }
}
