//! Scan scene context.
//!
//! [`ScanScene`] bundles everything the render loop needs for one scan: the
//! grid, the camera, the options, and a lazily rebuilt cell mesh. The loop owns
//! the scene and passes it around explicitly, calling [`ScanScene::tick`] once
//! per frame and feeding the returned delta to camera movement.

use glam::{Mat4, Vec3};
use sonoscan_core::{CellMesh, DemoKind, DepositMode, Result, ScanOptions, VolumeGrid};
use sonoscan_render::{
    bounding_cube_lines, model_matrix, FlyCamera, FrameTimer, FrameUniforms, SceneColors,
    CUBE_LINE_VERTEX_COUNT,
};

use crate::demos;

/// A scan being viewed: grid, camera, options, and cached mesh.
pub struct ScanScene {
    grid: VolumeGrid,
    camera: FlyCamera,
    options: ScanOptions,
    timer: FrameTimer,
    mesh_cache: Option<CellMesh>,
}

impl ScanScene {
    /// Creates an empty scene.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidArgument`](sonoscan_core::ScanError::InvalidArgument)
    /// if the options do not validate.
    pub fn new(options: ScanOptions) -> Result<Self> {
        options.validate()?;
        let grid = VolumeGrid::new(options.dimension)?;
        let camera = FlyCamera::from_options(&options.camera);
        Ok(Self {
            grid,
            camera,
            options,
            timer: FrameTimer::new(),
            mesh_cache: None,
        })
    }

    /// Creates a scene and loads the demo named in the options.
    pub fn with_demo(options: ScanOptions) -> Result<Self> {
        let demo = options.demo;
        let mut scene = Self::new(options)?;
        scene.load_demo(demo);
        Ok(scene)
    }

    /// Returns the grid.
    #[must_use]
    pub fn grid(&self) -> &VolumeGrid {
        &self.grid
    }

    /// Returns the grid for direct edits and drops the cached mesh.
    pub fn grid_mut(&mut self) -> &mut VolumeGrid {
        self.mesh_cache = None;
        &mut self.grid
    }

    /// Returns the camera.
    #[must_use]
    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    /// Returns the camera for input handling.
    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    /// Returns the options the scene was built with.
    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Returns the frame timer.
    #[must_use]
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Advances the frame timer and returns the frame delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.timer.tick()
    }

    /// Splat radius used when a smoothed deposit does not name one.
    #[must_use]
    pub fn splat_radius(&self) -> u32 {
        self.options.resolved_splat_radius()
    }

    /// Deposits a scan line with the sharp policy.
    pub fn deposit_sharp(&mut self, p1: Vec3, p2: Vec3, samples: &[f32]) {
        self.grid_mut().deposit_line_sharp(p1, p2, samples);
    }

    /// Deposits a scan line with the smoothed policy.
    ///
    /// `radius` defaults to [`splat_radius`](Self::splat_radius).
    pub fn deposit_smoothed(&mut self, p1: Vec3, p2: Vec3, samples: &[f32], radius: Option<u32>) {
        let radius = radius.unwrap_or_else(|| self.splat_radius());
        self.grid_mut().deposit_line_smoothed(p1, p2, samples, radius);
    }

    /// Deposits a scan line with the policy from the options.
    pub fn deposit(&mut self, p1: Vec3, p2: Vec3, samples: &[f32]) {
        match self.options.deposit {
            DepositMode::Sharp => self.deposit_sharp(p1, p2, samples),
            DepositMode::Smoothed => self.deposit_smoothed(p1, p2, samples, None),
        }
    }

    /// Resets the grid to zero.
    pub fn clear(&mut self) {
        self.grid_mut().clear();
    }

    /// Clears the grid and fills it with a demo scan.
    pub fn load_demo(&mut self, demo: DemoKind) {
        let mode = self.options.deposit;
        let radius = self.splat_radius();
        let grid = self.grid_mut();
        grid.clear();
        match demo {
            DemoKind::Empty => {}
            DemoKind::Sphere => demos::sphere_demo(grid),
            DemoKind::Fan => demos::fan_demo(grid, mode, radius),
        }
        log::info!("loaded {demo:?} demo into {}^3 grid", grid.dimension());
    }

    /// Returns true if the next [`cell_mesh`](Self::cell_mesh) call re-extracts.
    #[must_use]
    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_cache.is_none()
    }

    /// Returns the cell mesh, extracting it only if the grid changed.
    pub fn cell_mesh(&mut self) -> &CellMesh {
        let grid = &self.grid;
        self.mesh_cache.get_or_insert_with(|| grid.extract_mesh())
    }

    /// Model matrix for the cell mesh.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(self.grid.dimension(), self.options.display_size)
    }

    /// Transforms for drawing the cell mesh this frame.
    #[must_use]
    pub fn frame_uniforms(&self, aspect_ratio: f32) -> FrameUniforms {
        FrameUniforms::new(
            self.camera.projection_matrix(aspect_ratio),
            self.camera.view_matrix(),
            self.model_matrix(),
        )
    }

    /// Wireframe of the display cube, in world space.
    #[must_use]
    pub fn wireframe(&self) -> [Vec3; CUBE_LINE_VERTEX_COUNT] {
        bounding_cube_lines(self.options.display_size / 2.0)
    }

    /// Clear and line colors.
    #[must_use]
    pub fn colors(&self) -> SceneColors {
        SceneColors::new(self.options.background_color, Vec3::ONE)
    }
}
