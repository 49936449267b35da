use crate::math::Vec2;
use thiserror::Error;

/// Width of the logical world, in world units
pub const WORLD_WIDTH: f64 = 1400.0;
/// Height of the logical world, in world units
pub const WORLD_HEIGHT: f64 = 800.0;

/// Maximum number of occluders in a scene
pub const MAX_OCCLUDERS: usize = 8;
/// Smallest radius an occluder can have
pub const MIN_RADIUS: f64 = 4.0;

/// Radius given to occluders created with [`Scene::add_occluder`]
pub const NEW_OCCLUDER_RADIUS: f64 = 40.0;
/// Color given to occluders created with [`Scene::add_occluder`]
pub const NEW_OCCLUDER_COLOR: [u8; 3] = [180, 80, 200];

/// Errors reported by scene mutations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("no occluder at index {0}")]
    InvalidIndex(usize),

    #[error("scene already holds the maximum of {0} occluders")]
    CapacityExceeded(usize),
}

/// A disk that blocks light
#[derive(Clone, Debug, PartialEq)]
pub struct Occluder {
    pub center: Vec2,
    radius: f64,
    pub color: [u8; 3],
}

impl Occluder {
    /// Creates an occluder, clamping `radius` to [`MIN_RADIUS`]
    pub fn new(center: Vec2, radius: f64, color: [u8; 3]) -> Self {
        Occluder {
            center,
            radius: radius.max(MIN_RADIUS),
            color,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Grows or shrinks the radius, never going below [`MIN_RADIUS`]
    pub fn resize_by(&mut self, delta: f64) {
        self.radius = (self.radius + delta).max(MIN_RADIUS);
    }

    /// Rotates the color channels so that R takes G, G takes B and B takes R
    pub fn cycle_color(&mut self) {
        self.color.rotate_left(1);
    }

    /// Squared distance from the center to `point`
    pub fn distance_squared(&self, point: Vec2) -> f64 {
        let d = point - self.center;
        d.dot(d)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.distance_squared(point) <= self.radius * self.radius
    }
}

/// Occluders plus the light that they block
#[derive(Clone, Debug)]
pub struct Scene {
    occluders: Vec<Occluder>,
    pub light: Vec2,
}

impl Scene {
    /// Creates an empty scene with the light at `light`
    pub fn new(light: Vec2) -> Self {
        Scene {
            occluders: Vec::with_capacity(MAX_OCCLUDERS),
            light,
        }
    }

    pub fn occluders(&self) -> &[Occluder] {
        &self.occluders
    }

    pub fn occluder_count(&self) -> usize {
        self.occluders.len()
    }

    fn occluder_mut(&mut self, index: usize) -> Result<&mut Occluder, SceneError> {
        self.occluders
            .get_mut(index)
            .ok_or(SceneError::InvalidIndex(index))
    }

    /// Appends an existing occluder, enforcing the capacity limit
    pub fn push(&mut self, occluder: Occluder) -> Result<usize, SceneError> {
        if self.occluders.len() >= MAX_OCCLUDERS {
            return Err(SceneError::CapacityExceeded(MAX_OCCLUDERS));
        }
        self.occluders.push(occluder);
        Ok(self.occluders.len() - 1)
    }

    /// Adds a default occluder centered at `at` and returns its index
    pub fn add_occluder(&mut self, at: Vec2) -> Result<usize, SceneError> {
        self.push(Occluder::new(at, NEW_OCCLUDER_RADIUS, NEW_OCCLUDER_COLOR))
    }

    /// Removes the occluder at `index`; later occluders shift down by one
    pub fn remove_occluder(&mut self, index: usize) -> Result<Occluder, SceneError> {
        if index >= self.occluders.len() {
            return Err(SceneError::InvalidIndex(index));
        }
        Ok(self.occluders.remove(index))
    }

    pub fn resize(&mut self, index: usize, delta: f64) -> Result<(), SceneError> {
        self.occluder_mut(index)?.resize_by(delta);
        Ok(())
    }

    pub fn recolor_cycle(&mut self, index: usize) -> Result<(), SceneError> {
        self.occluder_mut(index)?.cycle_color();
        Ok(())
    }

    pub fn move_occluder(&mut self, index: usize, to: Vec2) -> Result<(), SceneError> {
        self.occluder_mut(index)?.center = to;
        Ok(())
    }

    /// Finds the occluder under `point`.
    ///
    /// When several occluders contain the point, the one whose center is
    /// closest wins. Exact ties go to the lowest index.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        let mut found = None;
        let mut best = f64::INFINITY;
        for (index, occluder) in self.occluders.iter().enumerate() {
            let d2 = occluder.distance_squared(point);
            if occluder.contains(point) && d2 < best {
                best = d2;
                found = Some(index);
            }
        }
        found
    }
}

impl Default for Scene {
    /// The demo scene: three occluders spread over the world and the light in the upper left
    fn default() -> Self {
        let mut scene = Scene::new(Vec2::new(WORLD_WIDTH * 0.2, WORLD_HEIGHT * 0.2));
        scene.occluders.extend([
            Occluder::new(
                Vec2::new(WORLD_WIDTH * 0.35, WORLD_HEIGHT * 0.5),
                70.0,
                [200, 40, 40],
            ),
            Occluder::new(
                Vec2::new(WORLD_WIDTH * 0.6, WORLD_HEIGHT * 0.45),
                60.0,
                [40, 200, 80],
            ),
            Occluder::new(
                Vec2::new(WORLD_WIDTH * 0.65, WORLD_HEIGHT * 0.7),
                40.0,
                [40, 120, 200],
            ),
        ]);
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_scene() -> Scene {
        let mut scene = Scene::new(Vec2::ZERO);
        for i in 0..MAX_OCCLUDERS {
            scene
                .add_occluder(Vec2::new(i as f64 * 100.0, 0.0))
                .expect("below capacity");
        }
        scene
    }

    #[test]
    fn default_scene_has_three_occluders() {
        let scene = Scene::default();
        assert_eq!(scene.occluder_count(), 3);
        assert_eq!(scene.light, Vec2::new(280.0, 160.0));
        assert_eq!(scene.occluders()[0].radius(), 70.0);
        assert_eq!(scene.occluders()[2].color, [40, 120, 200]);
    }

    #[test]
    fn add_beyond_capacity_leaves_scene_unchanged() {
        let mut scene = full_scene();
        let before = scene.occluders().to_vec();

        assert_eq!(
            scene.add_occluder(Vec2::new(1.0, 1.0)),
            Err(SceneError::CapacityExceeded(MAX_OCCLUDERS))
        );
        assert_eq!(scene.occluders(), &before[..]);
    }

    #[test]
    fn radius_never_drops_below_floor() {
        let occluder = Occluder::new(Vec2::ZERO, -10.0, [0, 0, 0]);
        assert_eq!(occluder.radius(), MIN_RADIUS);

        let mut scene = Scene::new(Vec2::ZERO);
        let index = scene.add_occluder(Vec2::ZERO).unwrap();
        scene.resize(index, -6.0 * 50.0).unwrap();
        assert_eq!(scene.occluders()[index].radius(), MIN_RADIUS);

        scene.resize(index, 10.0).unwrap();
        assert_eq!(scene.occluders()[index].radius(), MIN_RADIUS + 10.0);
        scene.resize(index, -4.0).unwrap();
        scene.resize(index, -4.0).unwrap();
        scene.resize(index, -4.0).unwrap();
        assert_eq!(scene.occluders()[index].radius(), MIN_RADIUS);
    }

    #[test]
    fn remove_shifts_later_occluders_down() {
        let mut scene = full_scene();
        let removed = scene.remove_occluder(2).unwrap();
        assert_eq!(removed.center, Vec2::new(200.0, 0.0));
        assert_eq!(scene.occluder_count(), MAX_OCCLUDERS - 1);

        let xs: Vec<f64> = scene.occluders().iter().map(|o| o.center.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 300.0, 400.0, 500.0, 600.0, 700.0]);
    }

    #[test]
    fn operations_on_missing_index_fail() {
        let mut scene = Scene::new(Vec2::ZERO);
        assert_eq!(scene.remove_occluder(0), Err(SceneError::InvalidIndex(0)));
        assert_eq!(scene.resize(3, 1.0), Err(SceneError::InvalidIndex(3)));
        assert_eq!(scene.recolor_cycle(1), Err(SceneError::InvalidIndex(1)));
        assert_eq!(
            scene.move_occluder(0, Vec2::ZERO),
            Err(SceneError::InvalidIndex(0))
        );
    }

    #[test]
    fn recolor_rotates_channels() {
        let mut scene = Scene::new(Vec2::ZERO);
        scene
            .push(Occluder::new(Vec2::ZERO, 10.0, [1, 2, 3]))
            .unwrap();
        scene.recolor_cycle(0).unwrap();
        assert_eq!(scene.occluders()[0].color, [2, 3, 1]);
        scene.recolor_cycle(0).unwrap();
        scene.recolor_cycle(0).unwrap();
        assert_eq!(scene.occluders()[0].color, [1, 2, 3]);
    }

    #[test]
    fn hit_test_prefers_nearest_center() {
        let mut scene = Scene::new(Vec2::ZERO);
        // The large disk comes first and covers the small one entirely.
        scene
            .push(Occluder::new(Vec2::new(0.0, 0.0), 100.0, [0, 0, 0]))
            .unwrap();
        scene
            .push(Occluder::new(Vec2::new(30.0, 0.0), 20.0, [0, 0, 0]))
            .unwrap();

        assert_eq!(scene.hit_test(Vec2::new(25.0, 0.0)), Some(1));
        assert_eq!(scene.hit_test(Vec2::new(10.0, 0.0)), Some(0));
        assert_eq!(scene.hit_test(Vec2::new(0.0, 150.0)), None);

        // Same answer when the collection order is reversed.
        let mut reversed = Scene::new(Vec2::ZERO);
        for occluder in scene.occluders().iter().rev() {
            reversed.push(occluder.clone()).unwrap();
        }
        assert_eq!(reversed.hit_test(Vec2::new(25.0, 0.0)), Some(0));
        assert_eq!(reversed.hit_test(Vec2::new(10.0, 0.0)), Some(1));
    }

    #[test]
    fn hit_test_includes_boundary() {
        let mut scene = Scene::new(Vec2::ZERO);
        scene
            .push(Occluder::new(Vec2::new(10.0, 10.0), 5.0, [0, 0, 0]))
            .unwrap();
        assert_eq!(scene.hit_test(Vec2::new(15.0, 10.0)), Some(0));
        assert_eq!(scene.hit_test(Vec2::new(15.1, 10.0)), None);
    }

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(
            SceneError::InvalidIndex(4).to_string(),
            "no occluder at index 4"
        );
        assert_eq!(
            SceneError::CapacityExceeded(8).to_string(),
            "scene already holds the maximum of 8 occluders"
        );
    }
}
