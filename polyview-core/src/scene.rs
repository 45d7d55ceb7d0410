/// A convex solid: a shared vertex pool plus the faces built on it
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::face::Face;
use crate::surface::{Rgb, Surface};
use crate::vector::{direction_vector, Point3, Vec3};

/// Colors used when drawing a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub fill: Rgb,
    pub outline: Rgb,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            fill: Rgb::SKY_BLUE,
            outline: Rgb::GRAY,
        }
    }
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    /// Faces facing the camera but entirely behind its view plane
    pub clipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    vertices: Vec<Point3>,
    faces: Vec<Face>,
}

impl Scene {
    pub fn new(vertices: Vec<Point3>) -> Self {
        Self {
            vertices,
            faces: Vec::new(),
        }
    }

    /// Add a face over existing pool vertices, returning its index
    pub fn add_face(&mut self, indices: Vec<usize>) -> Result<usize> {
        let face = Face::new(indices, &self.vertices)?;
        self.faces.push(face);
        Ok(self.faces.len() - 1)
    }

    /// Build a scene from a vertex pool and the index rings of its faces
    pub fn from_faces<I>(vertices: Vec<Point3>, faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<usize>>,
    {
        let faces = faces
            .into_iter()
            .map(|indices| Face::new(indices, &vertices))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { vertices, faces })
    }

    /// Axis-aligned cube of edge `size` centered on the origin
    pub fn cube(size: f64) -> Result<Self> {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
            Point3::new(-h, h, -h),
            Point3::new(h, h, -h),
            Point3::new(h, -h, h),
            Point3::new(-h, -h, h),
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
        ];

        // Top, front (+z), left, back (-z), right, bottom
        const FACES: [[usize; 4]; 6] = [
            [0, 1, 2, 3],
            [4, 5, 1, 0],
            [5, 6, 2, 1],
            [6, 7, 3, 2],
            [7, 4, 0, 3],
            [7, 6, 5, 4],
        ];
        Self::from_faces(vertices, FACES.iter().map(|indices| indices.to_vec()))
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Move a pool vertex; every face using it follows
    ///
    /// Face normals and centroids stay as they were until
    /// [`Scene::recompute_faces`] runs.
    pub fn move_vertex(&mut self, index: usize, position: Point3) -> Result<()> {
        let len = self.vertices.len();
        let vertex = self
            .vertices
            .get_mut(index)
            .ok_or(Error::VertexOutOfRange { index, len })?;
        *vertex = position;
        Ok(())
    }

    pub fn recompute_faces(&mut self) -> Result<()> {
        for face in &mut self.faces {
            face.recompute(&self.vertices)?;
        }
        Ok(())
    }

    /// Check that every face normal points away from the pool centroid
    ///
    /// Only meaningful for convex solids. Reports the first offending face and
    /// leaves the faces untouched.
    pub fn check_winding(&self) -> Result<()> {
        if self.vertices.is_empty() {
            return Ok(());
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::zeros(), |acc, vertex| acc + vertex.coords);
        let centroid = Point3::from(sum / self.vertices.len() as f64);

        for (i, face) in self.faces.iter().enumerate() {
            if face.normal().dot(&direction_vector(&centroid, face.center())) <= 0.0 {
                return Err(Error::InconsistentWinding { face: i });
            }
        }
        Ok(())
    }

    /// Clear the surface and draw every face turned towards the camera
    pub fn draw<S: Surface + ?Sized>(&self, camera: &Camera, surface: &mut S, style: &RenderStyle) -> FrameStats {
        surface.clear();

        let mut stats = FrameStats::default();
        for (i, face) in self.faces.iter().enumerate() {
            if !face.is_visible(camera) {
                trace!("face {} culled", i);
                stats.culled += 1;
                continue;
            }
            if face.draw(&self.vertices, camera, surface, style.fill, style.outline) {
                stats.drawn += 1;
            } else {
                stats.clipped += 1;
            }
        }

        debug!(
            "frame: {} drawn, {} culled, {} clipped",
            stats.drawn, stats.culled, stats.clipped
        );
        stats
    }

    /// Clear the surface and draw every edge of every face, without culling
    pub fn draw_wireframe<S: Surface + ?Sized>(&self, camera: &Camera, surface: &mut S, color: Rgb) {
        surface.clear();
        for face in &self.faces {
            face.draw_wireframe(&self.vertices, camera, surface, color);
        }
    }
}
