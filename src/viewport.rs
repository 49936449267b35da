use crate::math::Vec2;
use crate::scene::{WORLD_HEIGHT, WORLD_WIDTH};

/// Uniform scale-and-offset mapping from world units to device pixels.
///
/// The whole world rectangle is fitted into the view and centered, keeping
/// its aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    view_width: f64,
    view_height: f64,
    zoom: f64,
    offset: Vec2,
}

impl Viewport {
    /// Fits the world into a `width` x `height` pixel view
    pub fn new(width: usize, height: usize) -> Self {
        let mut vp = Viewport {
            view_width: width as f64,
            view_height: height as f64,
            zoom: 1.0,
            offset: Vec2::ZERO,
        };
        vp.fit_world();
        vp
    }

    fn fit_world(&mut self) {
        let zoom = (self.view_width / WORLD_WIDTH).min(self.view_height / WORLD_HEIGHT);
        // A zero-sized view still needs an invertible transform
        self.zoom = if zoom > 0.0 { zoom } else { 1.0 };
        self.offset = Vec2::new(
            (self.view_width - WORLD_WIDTH * self.zoom) / 2.0,
            (self.view_height - WORLD_HEIGHT * self.zoom) / 2.0,
        );
    }

    /// Pixels per world unit
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn world_to_view_point(&self, p: Vec2) -> Vec2 {
        p * self.zoom + self.offset
    }

    pub fn view_to_world_point(&self, p: Vec2) -> Vec2 {
        (p - self.offset) * (1.0 / self.zoom)
    }

    pub fn world_to_view_length(&self, length: f64) -> f64 {
        length * self.zoom
    }

    /// World point mapped to the nearest integer pixel
    pub fn to_pixel(&self, p: Vec2) -> (i32, i32) {
        let v = self.world_to_view_point(p);
        (v.x.round() as i32, v.y.round() as i32)
    }
}
