use crate::math::{Point3, Ray, Vec3};

/// The material a primitive is made of. The `Color` payload is overloaded by
/// kind per spec: albedo for `Diffuse`, radiosity (W/m²) for `Emissive`, a
/// reflectance ratio ρ for `Mirror`, and an index of refraction stored in
/// the first channel for `Refractive`. A per-material record would be
/// cleaner; the single overloaded field is kept for fidelity to the
/// original design and is flagged here rather than hidden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Diffuse(Vec3),
    Emissive(Vec3),
    Mirror(Vec3),
    Refractive(Vec3),
}

/// The geometric shape of a primitive. A sum type rather than a trait object:
/// the scene has only two shape kinds and the hot traversal loop should not
/// pay for virtual dispatch.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Sphere {
        center: Point3,
        radius: f64,
    },
    Triangle {
        v0: Point3,
        v1: Point3,
        v2: Point3,
        two_sided: bool,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

impl Primitive {
    pub const fn sphere(center: Point3, radius: f64, material: Material) -> Self {
        Self {
            shape: Shape::Sphere { center, radius },
            material,
        }
    }

    pub const fn triangle(v0: Point3, v1: Point3, v2: Point3, two_sided: bool, material: Material) -> Self {
        Self {
            shape: Shape::Triangle { v0, v1, v2, two_sided },
            material,
        }
    }
}

/// The result of a successful ray/primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitInfo {
    pub t: f64,
    pub p: Point3,
    pub n: Vec3,
    pub inside: bool,
}

/// Ray/sphere intersection. Rejects a negative discriminant (no real root)
/// and a forward interval entirely behind the ray. The outward normal is
/// never flipped here — `inside` tells callers whether the origin was
/// already inside the sphere.
pub fn intersect_sphere(ray: &Ray, center: Point3, radius: f64) -> Option<HitInfo> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t0 = (-b - sqrt_d) / (2.0 * a);
    let t1 = (-b + sqrt_d) / (2.0 * a);
    if t1 <= 0.0 {
        return None;
    }
    let t = if t0 > 0.0 { t0 } else { t1 };
    let p = ray.at(t);
    let n = (p - center).normalized();
    let inside = t0 <= 0.0;
    Some(HitInfo { t, p, n, inside })
}

/// Möller–Trumbore ray/triangle intersection. `two_sided` controls back-face
/// behavior: a two-sided triangle flips its normal and reports a front-facing
/// hit; a one-sided triangle keeps its geometric normal and reports
/// `inside = true` so material dispatch can treat it as a back-face hit.
pub fn intersect_triangle(
    ray: &Ray,
    v0: Point3,
    v1: Point3,
    v2: Point3,
    two_sided: bool,
) -> Option<HitInfo> {
    const EPS: f64 = 1e-7;
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let h = ray.direction.cross(e2);
    let a = e1.dot(h);
    if a.abs() < EPS {
        return None;
    }
    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if u < 0.0 || u > 1.0 {
        return None;
    }
    let q = s.cross(e1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * e2.dot(q);
    if t <= EPS {
        return None;
    }

    let p = ray.at(t);
    let geometric_n = e1.cross(e2).normalized();
    let (n, inside) = if ray.direction.dot(geometric_n) > 0.0 {
        if two_sided {
            (-geometric_n, false)
        } else {
            (geometric_n, true)
        }
    } else {
        (geometric_n, false)
    };
    Some(HitInfo { t, p, n, inside })
}

/// Intersects a ray against a single primitive, dispatching on its shape.
pub fn intersect_primitive(ray: &Ray, primitive: &Primitive) -> Option<HitInfo> {
    match primitive.shape {
        Shape::Sphere { center, radius } => intersect_sphere(ray, center, radius),
        Shape::Triangle { v0, v1, v2, two_sided } => intersect_triangle(ray, v0, v1, v2, two_sided),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_unit_sphere_from_outside() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = intersect_sphere(&ray, Point3::zero(), 1.0).expect("should hit");
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!((hit.p - Point3::new(0.0, 0.0, -1.0)).length() < 1e-12);
        assert!((hit.n - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
        assert!(!hit.inside);
    }

    #[test]
    fn ray_from_inside_sphere_reports_inside() {
        let ray = Ray::new(Point3::zero(), Vec3::new(1.0, 0.0, 0.0));
        let hit = intersect_sphere(&ray, Point3::zero(), 1.0).expect("should hit");
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!((hit.p - Point3::new(1.0, 0.0, 0.0)).length() < 1e-12);
        assert!((hit.n - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-12);
        assert!(hit.inside);
    }

    #[test]
    fn moller_trumbore_hits_expected_point() {
        let v0 = Point3::new(0.0, 0.0, 0.0);
        let v1 = Point3::new(1.0, 0.0, 0.0);
        let v2 = Point3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(Point3::new(0.25, 0.25, -1.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = intersect_triangle(&ray, v0, v1, v2, false).expect("should hit");
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!((hit.p - Point3::new(0.25, 0.25, 0.0)).length() < 1e-9);
    }

    #[test]
    fn one_sided_triangle_back_face_reports_inside() {
        let v0 = Point3::new(0.0, 0.0, 0.0);
        let v1 = Point3::new(1.0, 0.0, 0.0);
        let v2 = Point3::new(0.0, 1.0, 0.0);
        // Ray approaching from +z, geometric normal e1 x e2 points toward +z, so this
        // ray hits the back face.
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_triangle(&ray, v0, v1, v2, false).expect("should hit");
        assert!(hit.inside);
    }

    #[test]
    fn two_sided_triangle_back_face_flips_normal_and_is_not_inside() {
        let v0 = Point3::new(0.0, 0.0, 0.0);
        let v1 = Point3::new(1.0, 0.0, 0.0);
        let v2 = Point3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_triangle(&ray, v0, v1, v2, true).expect("should hit");
        assert!(!hit.inside);
        assert!(hit.n.z < 0.0);
    }
}
