/// Planar polygon faces: culling and near-plane clipped drawing
use log::trace;

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::projection::{fixed_axis_position, is_in_front, project, project_segment};
use crate::surface::{Rgb, ScreenPoint, Surface};
use crate::vector::{direction_vector, Point3, Vec3};

/// A convex planar polygon referencing vertices of a shared pool by index
///
/// The normal and centroid are computed when the face is built and are not
/// tracked afterwards: moving a pool vertex leaves them stale until
/// [`Face::recompute`] is called.
#[derive(Debug, Clone)]
pub struct Face {
    indices: Vec<usize>,
    normal: Vec3,
    center: Point3,
}

impl Face {
    /// Build a face from at least three pool indices, in winding order
    pub fn new(indices: Vec<usize>, pool: &[Point3]) -> Result<Self> {
        if indices.len() < 3 {
            return Err(Error::InvalidFace {
                count: indices.len(),
            });
        }
        let mut face = Self {
            indices,
            normal: Vec3::zeros(),
            center: Point3::origin(),
        };
        face.recompute(pool)?;
        Ok(face)
    }

    /// Rederive the normal and centroid from the current pool positions
    pub fn recompute(&mut self, pool: &[Point3]) -> Result<()> {
        if let Some(&index) = self.indices.iter().find(|&&index| index >= pool.len()) {
            return Err(Error::VertexOutOfRange {
                index,
                len: pool.len(),
            });
        }

        let (v0, v1, v2) = (
            &pool[self.indices[0]],
            &pool[self.indices[1]],
            &pool[self.indices[2]],
        );
        self.normal = direction_vector(v1, v0).cross(&direction_vector(v1, v2));

        let sum = self
            .indices
            .iter()
            .fold(Vec3::zeros(), |acc, &index| acc + pool[index].coords);
        self.center = Point3::from(sum / self.indices.len() as f64);
        Ok(())
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Outward normal (not normalized)
    pub fn normal(&self) -> &Vec3 {
        &self.normal
    }

    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Backface test: true when the camera sits on the outward side
    pub fn is_visible(&self, camera: &Camera) -> bool {
        let camera_to_face = direction_vector(&camera.position, &self.center);
        self.normal.dot(&camera_to_face) < 0.0
    }

    /// Pool vertices in ring order, `None` if the pool no longer covers them
    fn ring<'a>(&self, pool: &'a [Point3]) -> Option<Vec<&'a Point3>> {
        let ring: Option<Vec<&Point3>> = self.indices.iter().map(|&index| pool.get(index)).collect();
        if ring.is_none() {
            trace!("face {:?} outside pool of {} vertices", self.indices, pool.len());
        }
        ring
    }

    /// Screen outline of the part of the face in front of the camera
    ///
    /// Vertices behind the camera are replaced by the view plane crossings of
    /// their edges to in-front neighbours. The result may hold fewer than
    /// three points when little or nothing of the face is in front, and is
    /// empty when `pool` lacks any of the face's vertices.
    pub fn outline(&self, pool: &[Point3], camera: &Camera) -> Vec<ScreenPoint> {
        let Some(ring) = self.ring(pool) else {
            return Vec::new();
        };
        let in_front: Vec<bool> = ring.iter().map(|vertex| is_in_front(vertex, camera)).collect();
        let n = ring.len();

        let mut points = Vec::with_capacity(n + 2);
        for curr in 0..n {
            let prev = (curr + n - 1) % n;
            let next = (curr + 1) % n;

            if in_front[curr] {
                points.push(project(ring[curr], camera).point);
                continue;
            }
            for neighbour in [prev, next] {
                if in_front[neighbour] {
                    if let Some(clipped) = fixed_axis_position(ring[neighbour], ring[curr], camera) {
                        points.push(clipped.point);
                    }
                }
            }
        }
        points
    }

    /// Fill the visible part of the face, then outline its edges
    ///
    /// Assumes the face already passed [`Face::is_visible`]. Returns whether
    /// anything was drawn.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        pool: &[Point3],
        camera: &Camera,
        surface: &mut S,
        fill: Rgb,
        outline: Rgb,
    ) -> bool {
        let points = self.outline(pool, camera);
        if points.len() < 3 {
            trace!("face {:?} clipped away ({} points)", self.indices, points.len());
            return false;
        }

        surface.fill_polygon(&points, fill);
        self.draw_wireframe(pool, camera, surface, outline);
        true
    }

    /// Draw every edge of the face, clipping at the view plane
    ///
    /// Draws nothing when `pool` lacks any of the face's vertices.
    pub fn draw_wireframe<S: Surface + ?Sized>(
        &self,
        pool: &[Point3],
        camera: &Camera,
        surface: &mut S,
        color: Rgb,
    ) {
        let Some(ring) = self.ring(pool) else {
            return;
        };
        let n = ring.len();
        for i in 0..n {
            if let Some((start, end)) = project_segment(ring[i], ring[(i + 1) % n], camera) {
                surface.draw_line(start, end, color);
            }
        }
    }
}
