use crate::LayoutError;
use folio_types::PhysicalPageSize;
use serde::Deserialize;

/// Pixel dimensions of one rendered page and the gap between pages.
///
/// All pagination math works in CSS pixels over a "stride", the height of a
/// page plus the inter-page margin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    /// Vertical gap between consecutive pages.
    ///
    /// Defaults to `20`.
    pub page_margin: f64,
}

impl PageGeometry {
    /// Rendering resolution assumed for on-screen pages.
    pub const SCREEN_DPI: f64 = 96.0;
    pub const DEFAULT_MARGIN: f64 = 20.0;

    /// Derives the geometry from a physical sheet at `dpi`.
    pub fn from_physical(
        size: PhysicalPageSize,
        dpi: f64,
        page_margin: f64,
    ) -> Result<Self, LayoutError> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!("dpi must be positive, got {dpi}")));
        }
        if !page_margin.is_finite() || page_margin < 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "page margin must be non-negative, got {page_margin}"
            )));
        }
        let px = size.to_pixels(dpi);
        if px.width.is_nan() || px.width <= 0.0 || px.height.is_nan() || px.height <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "page size must be positive, got {}x{}",
                px.width, px.height
            )));
        }
        Ok(Self {
            page_width: px.width,
            page_height: px.height,
            page_margin,
        })
    }

    /// Distance from the top of one page to the top of the next.
    pub fn stride(&self) -> f64 {
        self.page_height + self.page_margin
    }
}

impl Default for PageGeometry {
    /// US Letter at 96 DPI (816x1056) with a 20px gap.
    fn default() -> Self {
        Self {
            page_width: PhysicalPageSize::LETTER.width_in * Self::SCREEN_DPI,
            page_height: PhysicalPageSize::LETTER.height_in * Self::SCREEN_DPI,
            page_margin: Self::DEFAULT_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_letter_at_96_dpi() {
        let g = PageGeometry::default();
        assert_eq!(g.page_width, 816.0);
        assert_eq!(g.page_height, 1056.0);
        assert_eq!(g.stride(), 1076.0);
    }

    #[test]
    fn test_from_physical_matches_default() {
        let g = PageGeometry::from_physical(PhysicalPageSize::LETTER, 96.0, 20.0).unwrap();
        assert_eq!(g, PageGeometry::default());
    }

    #[test]
    fn test_from_physical_rejects_bad_input() {
        assert!(PageGeometry::from_physical(PhysicalPageSize::LETTER, 0.0, 20.0).is_err());
        assert!(PageGeometry::from_physical(PhysicalPageSize::LETTER, 96.0, -1.0).is_err());
        let flat = PhysicalPageSize {
            width_in: 8.5,
            height_in: 0.0,
        };
        assert!(matches!(
            PageGeometry::from_physical(flat, 96.0, 20.0),
            Err(LayoutError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let g: PageGeometry = serde_json::from_str(r#"{"page_margin": 32}"#).unwrap();
        assert_eq!(g.page_height, 1056.0);
        assert_eq!(g.page_margin, 32.0);
    }
}
