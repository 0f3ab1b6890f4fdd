//! Geometry types: viewport and element rectangles.

use serde::{Deserialize, Serialize};

/// Viewport information for coordinate calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportInfo {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Device pixel ratio.
    pub device_pixel_ratio: f64,
    /// Scroll X offset.
    pub scroll_x: f64,
    /// Scroll Y offset.
    pub scroll_y: f64,
}

impl Default for ViewportInfo {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            device_pixel_ratio: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// Element rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if this rectangle intersects with another.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Check if this rectangle is inside the scrolled viewport.
    pub fn is_visible_in_viewport(&self, viewport: &ViewportInfo) -> bool {
        let vp = Rect {
            x: viewport.scroll_x,
            y: viewport.scroll_y,
            width: viewport.width as f64,
            height: viewport.height as f64,
        };
        self.intersects(&vp)
    }

    /// True when either dimension is below `min`.
    pub fn is_smaller_than(&self, min: f64) -> bool {
        self.width < min || self.height < min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let c = Rect::new(200.0, 200.0, 100.0, 100.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rect_in_scrolled_viewport() {
        let viewport = ViewportInfo {
            scroll_y: 1000.0,
            ..Default::default()
        };
        assert!(!Rect::new(0.0, 10.0, 100.0, 20.0).is_visible_in_viewport(&viewport));
        assert!(Rect::new(0.0, 1100.0, 100.0, 20.0).is_visible_in_viewport(&viewport));
    }

    #[test]
    fn test_rect_smaller_than() {
        assert!(Rect::new(0.0, 0.0, 4.0, 40.0).is_smaller_than(5.0));
        assert!(!Rect::new(0.0, 0.0, 10.0, 10.0).is_smaller_than(10.0));
    }

    #[test]
    fn test_viewport_default() {
        let viewport = ViewportInfo::default();
        assert_eq!(viewport.width, 1280);
        assert_eq!(viewport.height, 720);
        assert_eq!(viewport.device_pixel_ratio, 1.0);
    }
}
