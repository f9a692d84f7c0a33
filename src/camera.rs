use crate::math::*;

/// A fixed pinhole camera. The tracer targets a single, non-configurable
/// scene, so the camera takes its placement from spherical coordinates
/// around a fixed focus point rather than an arbitrary look-from/look-at
/// pair — this is the same orthonormal-basis construction as a general
/// look-at camera, just with `look_from` derived rather than supplied
/// directly.
pub struct Camera {
    origin: Point3,
    lower_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    width: u32,
    height: u32,
}

/// Configuration for the fixed camera: two spherical angles and a distance
/// locate it relative to `focus`, which it always looks directly at.
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub angle_x: f64,
    pub angle_y: f64,
    pub distance: f64,
    pub focus: Point3,
    pub vfov_degrees: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            angle_x: 0.04258603374866164,
            angle_y: 0.0,
            distance: 5.5,
            focus: Point3::new(0.0, 1.25, 0.0),
            vfov_degrees: 30.0,
        }
    }
}

impl Camera {
    /// Constructs the camera from configuration. `look_from` is placed on a
    /// sphere of radius `distance` around `focus`:
    ///   look_from = focus + distance * (sin(ay)cos(ax), sin(ax), cos(ay)cos(ax))
    /// The orthonormal basis is then the usual look-at construction:
    ///   w = normalize(look_from - look_at)   (points backward, away from scene)
    ///   u = normalize(vup × w)               (points right)
    ///   v = w × u                             (points up, orthogonal to both)
    pub fn new(config: &CameraConfig) -> Self {
        let ax = config.angle_x;
        let ay = config.angle_y;
        let offset = Vec3::new(ay.sin() * ax.cos(), ax.sin(), ay.cos() * ax.cos()) * config.distance;
        let look_from = config.focus + offset;
        let vup = Vec3::unit_y();

        let aspect_ratio = config.width as f64 / config.height as f64;
        let theta = config.vfov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let w = (look_from - config.focus).normalized();
        let u = vup.cross(w).normalized();
        let v = w.cross(u);

        let horizontal = u * viewport_width;
        let vertical = v * viewport_height;
        let lower_left = look_from - horizontal / 2.0 - vertical / 2.0 - w;

        Camera {
            origin: look_from,
            lower_left,
            horizontal,
            vertical,
            width: config.width,
            height: config.height,
        }
    }

    /// Generates a primary ray through continuous pixel-space coordinates
    /// `(sample_x, sample_y)`, where (0, 0) is the top-left corner of the
    /// image and (width, height) the bottom-right — matching the film's
    /// pixel-center convention of `(px + 0.5, py + 0.5)`.
    pub fn ray_for(&self, sample_x: f64, sample_y: f64) -> Ray {
        let s = sample_x / self.width as f64;
        let t = 1.0 - sample_y / self.height as f64;
        Ray::new(
            self.origin,
            (self.lower_left + self.horizontal * s + self.vertical * t - self.origin).normalized(),
        )
    }
}
