use crate::scene::Scene;

/// Lowest number of angular samples per frame
pub const MIN_SAMPLES: usize = 60;
/// Step used when the sample count is raised or lowered
pub const SAMPLE_STEP: usize = 120;
/// Sample count used when nothing else is configured
pub const DEFAULT_SAMPLES: usize = 720;

/// What the pointer is currently doing to the scene
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing selected
    #[default]
    Idle,
    /// An occluder is selected but not being dragged
    Selected(usize),
    /// The primary button is held on a selected occluder
    Dragging(usize),
}

impl Interaction {
    /// Index of the selected occluder, if any; a dragged occluder counts as selected
    pub fn selected(self) -> Option<usize> {
        match self {
            Interaction::Idle => None,
            Interaction::Selected(index) | Interaction::Dragging(index) => Some(index),
        }
    }

    pub fn dragging(self) -> Option<usize> {
        match self {
            Interaction::Dragging(index) => Some(index),
            _ => None,
        }
    }
}

/// Rendering options the user can change while running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    samples: usize,
    /// Draw the rays from the light as well as the shadows
    pub show_rays: bool,
}

impl RenderConfig {
    pub fn new(samples: usize, show_rays: bool) -> Self {
        RenderConfig {
            samples: samples.max(MIN_SAMPLES),
            show_rays,
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn increase_samples(&mut self) {
        self.samples = self.samples.saturating_add(SAMPLE_STEP);
    }

    /// Lowers the sample count by one step, flooring at [`MIN_SAMPLES`]
    pub fn decrease_samples(&mut self) {
        self.samples = self.samples.saturating_sub(SAMPLE_STEP).max(MIN_SAMPLES);
    }

    pub fn toggle_rays(&mut self) {
        self.show_rays = !self.show_rays;
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::new(DEFAULT_SAMPLES, false)
    }
}

/// Application state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Occluders and light
    pub scene: Scene,
    /// Selection and drag state
    pub interaction: Interaction,
    /// Sampling density and debug rays
    pub config: RenderConfig,
}

impl AppState {
    pub fn new(scene: Scene, config: RenderConfig) -> Self {
        AppState {
            scene,
            interaction: Interaction::Idle,
            config,
        }
    }

    /// Selected occluder index, only if it still refers to an occluder
    pub fn selected(&self) -> Option<usize> {
        self.interaction
            .selected()
            .filter(|&index| index < self.scene.occluder_count())
    }

    /// Drops the selection when it points at `removed` or at an occluder shifted by its removal
    pub(crate) fn forget_removed(&mut self, removed: usize) {
        if matches!(self.interaction.selected(), Some(index) if index >= removed) {
            self.interaction = Interaction::Idle;
        }
    }
}
