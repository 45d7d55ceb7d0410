/// Camera pose and the screen-scaled basis used by the projector
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vector::{Point3, Vec3, VectorExt};

/// Default offset of the projection plane along the view direction
pub const DEFAULT_DISTANCE: f64 = 0.4;

/// Size of the drawing surface in surface units (pixels for a canvas)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale applied to the unit basis: the larger of the two dimensions
    pub fn scale(&self) -> f64 {
        self.width.max(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Serializable starting pose for a camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPose {
    pub position: [f64; 3],
    pub angle_h: f64,
    pub angle_v: f64,
    pub distance: f64,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: [-1.0, 1.0, -1.0],
            angle_h: FRAC_PI_4,
            angle_v: -FRAC_PI_6,
            distance: DEFAULT_DISTANCE,
        }
    }
}

/// Viewer camera with yaw/pitch orientation and no roll
///
/// `angle`, `basis_x` and `basis_y` are derived from `angle_h`, `angle_v` and
/// the viewport by [`Camera::update_orientation`], which must run after any
/// direct write to those fields. The basis vectors carry the viewport scale,
/// so dotting a projected offset with them yields surface units directly.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3,
    /// Yaw in radians
    pub angle_h: f64,
    /// Pitch in radians, kept within `[-π/2, π/2]`
    pub angle_v: f64,
    pub distance: f64,
    viewport: Viewport,
    angle: Vec3,
    basis_x: Vec3,
    basis_y: Vec3,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        let mut camera = Self {
            position: Point3::origin(),
            angle_h: 0.0,
            angle_v: 0.0,
            distance: DEFAULT_DISTANCE,
            viewport,
            angle: Vec3::x(),
            basis_x: Vec3::zeros(),
            basis_y: Vec3::zeros(),
        };
        camera.update_orientation();
        camera
    }

    pub fn from_pose(pose: &CameraPose, viewport: Viewport) -> Self {
        let mut camera = Self::new(viewport);
        camera.position = Point3::from(pose.position);
        camera.angle_h = pose.angle_h;
        camera.angle_v = pose.angle_v;
        camera.distance = pose.distance;
        camera.update_orientation();
        camera
    }

    /// Unit view direction
    pub fn angle(&self) -> &Vec3 {
        &self.angle
    }

    pub fn basis_x(&self) -> &Vec3 {
        &self.basis_x
    }

    pub fn basis_y(&self) -> &Vec3 {
        &self.basis_y
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Clamp pitch, then rederive the view direction and the scaled basis
    pub fn update_orientation(&mut self) {
        self.angle_v = self.angle_v.clamp(-FRAC_PI_2, FRAC_PI_2);

        let (sin_h, cos_h) = self.angle_h.sin_cos();
        let (sin_v, cos_v) = self.angle_v.sin_cos();

        self.angle = Vec3::new(cos_v * cos_h, sin_v, cos_v * sin_h);

        let scale = self.viewport.scale();
        self.basis_x = Vec3::new(cos_v * sin_h, 0.0, -cos_v * cos_h) * -scale;
        self.basis_y = Vec3::new(-sin_v * cos_h, cos_v, -sin_v * sin_h) * scale;
    }

    /// Adopt a new viewport size and rescale the basis
    pub fn resize(&mut self, viewport: Viewport) {
        debug!("camera viewport {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.update_orientation();
    }

    pub fn set_orientation(&mut self, angle_h: f64, angle_v: f64) {
        self.angle_h = angle_h;
        self.angle_v = angle_v;
        self.update_orientation();
    }

    /// Rotate by yaw/pitch deltas (in radians)
    pub fn rotate(&mut self, delta_h: f64, delta_v: f64) {
        self.set_orientation(self.angle_h + delta_h, self.angle_v + delta_v);
    }

    /// Move along the view direction
    pub fn move_forward(&mut self, step: f64) {
        self.position += self.angle * step;
    }

    /// Move along the screen's horizontal axis
    ///
    /// Fails with `DegenerateVector` when the horizontal basis has collapsed,
    /// which happens at pitch ±π/2 or with a zero-sized viewport.
    pub fn strafe(&mut self, step: f64) -> Result<()> {
        let right = self.basis_x.checked_normalized()?;
        self.position += right * step;
        Ok(())
    }

    /// Move along the world y axis
    pub fn move_vertical(&mut self, step: f64) {
        self.position.y += step;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
