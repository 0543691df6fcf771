//! Camera description and screen-to-world unprojection.
//!
//! The camera itself belongs to the render layer; the simulation only needs
//! the inverse view-projection to turn a pointer position into a point on
//! the z = 0 node plane, so this module intentionally avoids any platform
//! APIs and stays usable on both native and web targets.

use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Viewport extents of the render target, in physical pixels.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Unproject screen-space pixel coordinates onto the z = 0 node plane.
///
/// Builds a world-space ray through the pixel from the camera's inverse
/// view-projection and intersects it with the plane the nodes live on.
/// Returns `None` when the ray runs parallel to the plane or the plane is
/// behind the camera.
pub fn screen_to_node_plane(camera: &Camera, viewport: Viewport, sx: f32, sy: f32) -> Option<Vec3> {
    let ndc_x = (2.0 * sx / viewport.width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / viewport.height.max(1.0));
    let inv = (camera.projection_matrix() * camera.view_matrix()).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p_far: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye;
    let rd = (p_far - ro).normalize();
    if rd.z.abs() < 1e-6 {
        return None;
    }
    let t = -ro.z / rd.z;
    (t >= 0.0).then(|| ro + rd * t)
}
