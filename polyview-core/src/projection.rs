/// Perspective projection from world space onto the camera's view plane
use log::trace;

use crate::camera::Camera;
use crate::surface::ScreenPoint;
use crate::vector::{direction_vector, Point3, Vec3, VectorExt};

/// Result of projecting a world point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub point: ScreenPoint,
    /// Whether the source point lies in front of the camera
    pub visible: bool,
}

impl Projected {
    fn hidden() -> Self {
        Self {
            point: ScreenPoint::new(0.0, 0.0),
            visible: false,
        }
    }
}

/// Whether `point` lies strictly in front of the camera
pub fn is_in_front(point: &Point3, camera: &Camera) -> bool {
    direction_vector(&camera.position, point).dot(camera.angle()) > 0.0
}

/// Project a world point to surface coordinates
///
/// Points on the plane through the camera parallel to the view plane,
/// including the camera position itself, come back as not visible. Points
/// behind the camera still get coordinates but are flagged not visible.
pub fn project(point: &Point3, camera: &Camera) -> Projected {
    let cr = direction_vector(&camera.position, point);
    let cr_dot_e = camera.angle().dot(&cr);
    if cr_dot_e == 0.0 {
        return Projected::hidden();
    }

    let u = match cr.checked_normalized() {
        Ok(u) => u,
        Err(err) => {
            trace!("point {:?} not representable: {}", point, err);
            return Projected::hidden();
        }
    };

    let on_plane = (u * (cr.norm() / cr_dot_e) - camera.angle()) * camera.distance;
    Projected {
        point: to_screen(&on_plane, camera),
        visible: cr_dot_e > 0.0,
    }
}

/// Project the point where the segment `inside -> outside` crosses the view plane
///
/// `inside` is expected in front of the camera and `outside` behind it. The
/// result is always visible. Returns `None` only when the segment runs
/// parallel to the view plane, which a genuine front/behind pair never does.
pub fn fixed_axis_position(inside: &Point3, outside: &Point3, camera: &Camera) -> Option<Projected> {
    let Some(crossing) = view_plane_crossing(inside, outside, camera) else {
        trace!("segment {:?} -> {:?} parallel to view plane", inside, outside);
        return None;
    };

    let on_plane = direction_vector(&camera.position, &crossing) - camera.angle() * camera.distance;
    Some(Projected {
        point: to_screen(&on_plane, camera),
        visible: true,
    })
}

/// World-space point where `inside -> outside` meets the view plane
pub fn view_plane_crossing(inside: &Point3, outside: &Point3, camera: &Camera) -> Option<Point3> {
    let e = camera.angle();
    let segment = direction_vector(inside, outside);
    let toward_plane = e.dot(&segment);
    if toward_plane == 0.0 {
        return None;
    }
    let t = (camera.distance - e.dot(&direction_vector(&camera.position, inside))) / toward_plane;
    Some(inside + segment * t)
}

/// Project both ends of a segment, clipping an end that lies behind the camera
///
/// Returns `None` when both ends are behind the camera.
pub fn project_segment(from: &Point3, to: &Point3, camera: &Camera) -> Option<(ScreenPoint, ScreenPoint)> {
    let mut start = project(from, camera);
    let mut end = project(to, camera);
    if !start.visible && !end.visible {
        return None;
    }
    if !start.visible {
        start = fixed_axis_position(to, from, camera)?;
    }
    if !end.visible {
        end = fixed_axis_position(from, to, camera)?;
    }
    Some((start.point, end.point))
}

fn to_screen(on_plane: &Vec3, camera: &Camera) -> ScreenPoint {
    ScreenPoint::new(on_plane.dot(camera.basis_x()), on_plane.dot(camera.basis_y()))
}
