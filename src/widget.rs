use crate::graphics::{draw_thick_line, fill_circle, stroke_circle, Canvas, Rgba, Surface};
use crate::math::Vec2;
use crate::scene::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::shadow::{Segment, SegmentKind, SHADOW_THICKNESS};
use crate::state::AppState;
use crate::viewport::Viewport;

const BACKGROUND: Rgba = Rgba::rgb(200, 220, 255);
const GRID: Rgba = Rgba::rgb(220, 230, 240);
const GRID_SPACING: f64 = 40.0;
const SHADOW: Rgba = Rgba::rgba(0, 0, 0, 180);
const BLOCKED_RAY: Rgba = Rgba::rgba(255, 180, 0, 120);
const FREE_RAY: Rgba = Rgba::rgba(255, 180, 0, 30);
const SELECTION: Rgba = Rgba::rgba(255, 255, 255, 200);
const LIGHT: Rgba = Rgba::rgb(255, 230, 80);
const LIGHT_RADIUS: f64 = 6.0;

/// Shadow scene widget: owns the pixel buffer and the world-to-pixel mapping
pub struct ShadowWidget {
    canvas: Canvas,
    viewport: Viewport,
}

impl ShadowWidget {
    pub fn new(width: usize, height: usize) -> Self {
        ShadowWidget {
            canvas: Canvas::new(width, height),
            viewport: Viewport::new(width, height),
        }
    }

    /// Rebuilds the buffer when the pixel size changes
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.canvas.width() && height == self.canvas.height() {
            return;
        }
        self.canvas = Canvas::new(width, height);
        self.viewport = Viewport::new(width, height);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Paint the scene and the shadow segments into the buffer
    pub fn paint(&mut self, data: &AppState, segments: &[Segment]) {
        self.canvas.clear(BACKGROUND);
        paint_scene(&mut self.canvas, &self.viewport, data, segments);
    }
}

/// Draws grid, shadows, rays, occluders and the light marker, in that order
pub fn paint_scene<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    data: &AppState,
    segments: &[Segment],
) {
    // Grid
    surface.set_draw_color(GRID);
    let mut x = 0.0;
    while x < WORLD_WIDTH {
        let (x1, y1) = viewport.to_pixel(Vec2::new(x, 0.0));
        let (x2, y2) = viewport.to_pixel(Vec2::new(x, WORLD_HEIGHT));
        surface.draw_line(x1, y1, x2, y2);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < WORLD_HEIGHT {
        let (x1, y1) = viewport.to_pixel(Vec2::new(0.0, y));
        let (x2, y2) = viewport.to_pixel(Vec2::new(WORLD_WIDTH, y));
        surface.draw_line(x1, y1, x2, y2);
        y += GRID_SPACING;
    }

    // Shadows and debug rays
    let thickness = (viewport.world_to_view_length(SHADOW_THICKNESS).round() as i32).max(1);
    for segment in segments {
        let (x1, y1) = viewport.to_pixel(segment.start);
        let (x2, y2) = viewport.to_pixel(segment.end);
        match segment.kind {
            SegmentKind::Shadow => {
                surface.set_draw_color(SHADOW);
                draw_thick_line(surface, x1, y1, x2, y2, thickness);
            }
            SegmentKind::BlockedRay => {
                surface.set_draw_color(BLOCKED_RAY);
                surface.draw_line(x1, y1, x2, y2);
            }
            SegmentKind::FreeRay => {
                surface.set_draw_color(FREE_RAY);
                surface.draw_line(x1, y1, x2, y2);
            }
        }
    }

    // Occluders
    let selected = data.selected();
    for (index, occluder) in data.scene.occluders().iter().enumerate() {
        let [r, g, b] = occluder.color;
        let center = viewport.world_to_view_point(occluder.center);
        let radius = viewport.world_to_view_length(occluder.radius());
        surface.set_draw_color(Rgba::rgb(r, g, b));
        fill_circle(surface, center.x, center.y, radius);

        if selected == Some(index) {
            surface.set_draw_color(SELECTION);
            stroke_circle(surface, center.x, center.y, radius);
        }
    }

    // Light marker
    let light = viewport.world_to_view_point(data.scene.light);
    surface.set_draw_color(LIGHT);
    fill_circle(
        surface,
        light.x,
        light.y,
        viewport.world_to_view_length(LIGHT_RADIUS).max(1.0),
    );
}

/// Status line shown in the window title
pub fn status_text(data: &AppState) -> String {
    format!(
        "2D Shadow Demo - rays={} (Up/Down)  R toggles rays  LClick-drag circles  \
         Wheel/+/- resize  C cycle color  A add  Del remove",
        data.config.samples()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::tests::Recorder;
    use crate::scene::{Occluder, Scene};
    use crate::shadow::cast_shadows;
    use crate::state::{Interaction, RenderConfig};

    fn demo_state() -> AppState {
        let mut scene = Scene::new(Vec2::new(100.0, 400.0));
        scene
            .push(Occluder::new(Vec2::new(500.0, 400.0), 50.0, [200, 40, 40]))
            .unwrap();
        AppState::new(scene, RenderConfig::new(120, true))
    }

    #[test]
    fn status_reports_sample_count() {
        let state = demo_state();
        let text = status_text(&state);
        assert!(text.starts_with("2D Shadow Demo - rays=120 (Up/Down)"));
        assert!(text.ends_with("Del remove"));
    }

    #[test]
    fn every_primitive_has_its_color() {
        let mut state = demo_state();
        state.interaction = Interaction::Selected(0);
        let segments = cast_shadows(&state.scene, &state.config);
        let viewport = Viewport::new(1400, 800);

        let mut recorder = Recorder::default();
        paint_scene(&mut recorder, &viewport, &state, &segments);

        let colors: Vec<Rgba> = recorder.lines.iter().map(|(c, _)| *c).collect();
        for expected in [GRID, SHADOW, BLOCKED_RAY, FREE_RAY, SELECTION, LIGHT] {
            assert!(colors.contains(&expected), "missing {expected:?}");
        }
        assert!(colors.contains(&Rgba::rgb(200, 40, 40)));

        // The light marker is drawn last, on top of everything.
        assert_eq!(recorder.lines.last().map(|(c, _)| *c), Some(LIGHT));
    }

    #[test]
    fn shadows_are_drawn_thick_and_rays_thin() {
        let state = demo_state();
        let segments = cast_shadows(&state.scene, &state.config);
        let shadow_count = segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Shadow)
            .count();
        let viewport = Viewport::new(1400, 800);

        let mut recorder = Recorder::default();
        paint_scene(&mut recorder, &viewport, &state, &segments);

        let shadow_lines = recorder.lines.iter().filter(|(c, _)| *c == SHADOW).count();
        // Thickness 8 at unit zoom draws offsets -4..=4.
        assert_eq!(shadow_lines, shadow_count * 9);

        let ray_lines = recorder
            .lines
            .iter()
            .filter(|(c, _)| *c == BLOCKED_RAY || *c == FREE_RAY)
            .count();
        assert_eq!(ray_lines, 120);
    }

    #[test]
    fn painted_canvas_shows_shadow_behind_occluder() {
        let state = AppState::new(demo_state().scene, RenderConfig::new(720, false));
        let segments = cast_shadows(&state.scene, &state.config);

        let mut widget = ShadowWidget::new(140, 80);
        widget.paint(&state, &segments);
        let canvas = widget.canvas();
        let viewport = *widget.viewport();

        let pixel_at = |p: Vec2| {
            let (x, y) = viewport.to_pixel(p);
            canvas.pixel(x as usize, y as usize).unwrap()
        };
        let shadow_pixel = pixel_at(Vec2::new(900.0, 400.0));
        let lit_pixel = pixel_at(Vec2::new(900.0, 100.0));
        let occluder_pixel = pixel_at(Vec2::new(500.0, 400.0));

        assert!(shadow_pixel[2] < lit_pixel[2], "{shadow_pixel:?} vs {lit_pixel:?}");
        assert_eq!(occluder_pixel, [200, 40, 40]);
    }

    #[test]
    fn resize_rebuilds_buffer() {
        let mut widget = ShadowWidget::new(10, 10);
        widget.resize(280, 160);
        assert_eq!(widget.canvas().width(), 280);
        assert_eq!(widget.canvas().height(), 160);
        assert!((widget.viewport().zoom() - 0.2).abs() < 1e-12);
    }
}
