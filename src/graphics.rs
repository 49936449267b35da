use crate::math::Vec2;

/// Straight-alpha RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Composites `self` over an opaque `dst` color
    pub fn blend_over(self, dst: [u8; 3]) -> [u8; 3] {
        let alpha = self.a as u32;
        let mix = |src: u8, dst: u8| -> u8 {
            ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
        };
        [mix(self.r, dst[0]), mix(self.g, dst[1]), mix(self.b, dst[2])]
    }
}

/// Primitive drawing in device pixels.
///
/// The current draw color is set before each call and applies to every
/// primitive until it is changed again.
pub trait Surface {
    fn set_draw_color(&mut self, color: Rgba);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
    fn draw_point(&mut self, x: i32, y: i32);
}

/// Opaque RGB pixel buffer with alpha-blended drawing
#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixel_data: Vec<[u8; 3]>,
    color: Rgba,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            pixel_data: vec![[0; 3]; width * height],
            color: Rgba::WHITE,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x < self.width && y < self.height {
            Some(self.pixel_data[y * self.width + x])
        } else {
            None
        }
    }

    /// Fills the whole buffer with an opaque color, ignoring alpha
    pub fn clear(&mut self, color: Rgba) {
        self.pixel_data.fill([color.r, color.g, color.b]);
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let offset = y as usize * self.width + x as usize;
        self.pixel_data[offset] = self.color.blend_over(self.pixel_data[offset]);
    }
}

impl Surface for Canvas {
    fn set_draw_color(&mut self, color: Rgba) {
        self.color = color;
    }

    /// Draws a line between two points using Bresenham's algorithm
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (mut x, mut y) = (x1 as i64, y1 as i64);
        let (x2, y2) = (x2 as i64, y2 as i64);
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.plot(x as i32, y as i32);

            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.plot(x, y);
    }
}

/// Draws a line `thickness` pixels wide as parallel offset lines
pub fn draw_thick_line<S: Surface + ?Sized>(
    surface: &mut S,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    thickness: i32,
) {
    if thickness <= 1 {
        surface.draw_line(x1, y1, x2, y2);
        return;
    }
    let along = Vec2::new((x2 - x1) as f64, (y2 - y1) as f64);
    if along.length() < 1e-6 {
        surface.draw_point(x1, y1);
        return;
    }

    let perpendicular = Vec2::new(-along.y, along.x).normalize();
    let half = thickness / 2;
    for t in -half..=half {
        let offset = perpendicular * t as f64;
        let (ox, oy) = (offset.x.round() as i32, offset.y.round() as i32);
        surface.draw_line(x1 + ox, y1 + oy, x2 + ox, y2 + oy);
    }
}

/// Fills a disk with one horizontal span per pixel row, so each pixel is blended once
pub fn fill_circle<S: Surface + ?Sized>(surface: &mut S, cx: f64, cy: f64, radius: f64) {
    if radius < 0.5 {
        surface.draw_point(cx.round() as i32, cy.round() as i32);
        return;
    }
    let top = (cy - radius).ceil() as i32;
    let bottom = (cy + radius).floor() as i32;
    for y in top..=bottom {
        let dy = y as f64 - cy;
        let half = (radius * radius - dy * dy).max(0.0).sqrt();
        let left = (cx - half).round() as i32;
        let right = (cx + half).round() as i32;
        surface.draw_line(left, y, right, y);
    }
}

/// Draws a circle outline as a closed polyline
pub fn stroke_circle<S: Surface + ?Sized>(surface: &mut S, cx: f64, cy: f64, radius: f64) {
    // Enough vertices that chords stay under a pixel long
    let steps = ((radius * std::f64::consts::TAU).ceil() as usize).clamp(8, 2048);
    let point = |i: usize| {
        let angle = i as f64 / steps as f64 * std::f64::consts::TAU;
        (
            (cx + radius * angle.cos()).round() as i32,
            (cy + radius * angle.sin()).round() as i32,
        )
    };
    let mut prev = point(0);
    for i in 1..=steps {
        let next = point(i);
        surface.draw_line(prev.0, prev.1, next.0, next.1);
        prev = next;
    }
}
