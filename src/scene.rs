use crate::geometry::{intersect_primitive, HitInfo, Material, Primitive};
use crate::math::{Point3, Ray, Vec3};

/// A fixed, ordered list of primitives. Immutable after construction; the
/// scene is traversed linearly (no spatial index — the fixed room has only a
/// few dozen primitives, well under the point where an accelerator pays for
/// itself).
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Linear scan over all primitives, keeping the closest valid hit.
    pub fn intersect(&self, ray: &Ray) -> Option<(HitInfo, Material)> {
        let mut closest: Option<(HitInfo, Material)> = None;
        for primitive in &self.primitives {
            if let Some(hit) = intersect_primitive(ray, primitive) {
                let keep = match &closest {
                    Some((best, _)) => hit.t < best.t,
                    None => true,
                };
                if keep {
                    closest = Some((hit, primitive.material));
                }
            }
        }
        closest
    }

    /// Builds the fixed Cornell-box-style room: diffuse walls, a mirror
    /// sphere, a refractive sphere, and an emissive area light shielded by a
    /// four-sided, 45°-angled baffle that keeps it from being visible
    /// edge-on. Room shell has no wall on the camera-facing (+z) side — a
    /// solid wall there would fully occlude the interior for any camera
    /// placed outside the room volume, which is how this scene's camera is
    /// positioned in the default test configuration. This follows the
    /// grounding reference implementation, whose room is built from five
    /// bounding surfaces (left, right, back, floor, ceiling) with no front
    /// wall.
    pub fn cornell_box() -> Self {
        let mut primitives = Vec::new();

        let red = Material::Diffuse(Vec3::new(0.75, 0.25, 0.25));
        let blue = Material::Diffuse(Vec3::new(0.25, 0.25, 0.75));
        let gray = Material::Diffuse(Vec3::new(0.75, 0.75, 0.75));
        let shield_gray = Material::Diffuse(Vec3::new(0.1, 0.1, 0.1));

        let x_min = -1.5;
        let x_max = 1.5;
        let y_min = 0.0;
        let y_max = 2.4;
        let z_min = -2.0;
        let z_max = 2.0;

        // Left wall (x = x_min), facing +x into the room.
        push_quad(
            &mut primitives,
            Point3::new(x_min, y_min, z_min),
            Point3::new(x_min, y_max, z_min),
            Point3::new(x_min, y_max, z_max),
            Point3::new(x_min, y_min, z_max),
            red,
        );
        // Right wall (x = x_max), facing -x into the room.
        push_quad(
            &mut primitives,
            Point3::new(x_max, y_min, z_max),
            Point3::new(x_max, y_max, z_max),
            Point3::new(x_max, y_max, z_min),
            Point3::new(x_max, y_min, z_min),
            blue,
        );
        // Back wall (z = z_min), facing +z into the room.
        push_quad(
            &mut primitives,
            Point3::new(x_min, y_min, z_min),
            Point3::new(x_max, y_min, z_min),
            Point3::new(x_max, y_max, z_min),
            Point3::new(x_min, y_max, z_min),
            gray,
        );
        // Floor (y = y_min), facing +y into the room.
        push_quad(
            &mut primitives,
            Point3::new(x_min, y_min, z_max),
            Point3::new(x_max, y_min, z_max),
            Point3::new(x_max, y_min, z_min),
            Point3::new(x_min, y_min, z_min),
            gray,
        );
        // Ceiling (y = y_max), facing -y into the room.
        push_quad(
            &mut primitives,
            Point3::new(x_min, y_max, z_min),
            Point3::new(x_max, y_max, z_min),
            Point3::new(x_max, y_max, z_max),
            Point3::new(x_min, y_max, z_max),
            gray,
        );

        // Mirror sphere.
        primitives.push(Primitive::sphere(
            Point3::new(-0.7, 0.5, -0.6),
            0.5,
            Material::Mirror(Vec3::ones()),
        ));
        // Refractive (glass) sphere, IOR 1.5 stored in color.x.
        primitives.push(Primitive::sphere(
            Point3::new(0.7, 0.5, 0.6),
            0.5,
            Material::Refractive(Vec3::new(1.5, 0.0, 0.0)),
        ));

        // Emissive area light: a 1x1 m rectangle at y = 2.399, centered at the origin.
        let light_y = 2.399;
        let light_half = 0.5;
        let radiosity = Vec3::new(5.0 * 21.5, 5.0 * 21.5, 5.0 * 21.5);
        let la = Point3::new(-light_half, light_y, -light_half);
        let lb = Point3::new(light_half, light_y, -light_half);
        let lc = Point3::new(light_half, light_y, light_half);
        let ld = Point3::new(-light_half, light_y, light_half);
        // Facing -y (downward into the room), matching the ceiling's orientation.
        push_quad(&mut primitives, la, lb, lc, ld, Material::Emissive(radiosity));

        // Four-sided shield: flares outward at 45 degrees from the light's
        // footprint down to a wider skirt, hiding the light from grazing
        // viewing angles. Two-sided since it can be seen from inside or
        // outside the flare.
        let drop = 0.3;
        let outer_half = light_half + drop; // 45 degree flare: horizontal = vertical
        let skirt_y = light_y - drop;
        let oa = Point3::new(-outer_half, skirt_y, -outer_half);
        let ob = Point3::new(outer_half, skirt_y, -outer_half);
        let oc = Point3::new(outer_half, skirt_y, outer_half);
        let od = Point3::new(-outer_half, skirt_y, outer_half);

        push_two_sided_quad(&mut primitives, la, lb, ob, oa, shield_gray);
        push_two_sided_quad(&mut primitives, lb, lc, oc, ob, shield_gray);
        push_two_sided_quad(&mut primitives, lc, ld, od, oc, shield_gray);
        push_two_sided_quad(&mut primitives, ld, la, oa, od, shield_gray);

        Self { primitives }
    }
}

/// Splits a planar quad (a, b, c, d in order around the perimeter) into two
/// one-sided triangles sharing the diagonal a-c.
fn push_quad(out: &mut Vec<Primitive>, a: Point3, b: Point3, c: Point3, d: Point3, material: Material) {
    out.push(Primitive::triangle(a, b, c, false, material));
    out.push(Primitive::triangle(a, c, d, false, material));
}

fn push_two_sided_quad(out: &mut Vec<Primitive>, a: Point3, b: Point3, c: Point3, d: Point3, material: Material) {
    out.push(Primitive::triangle(a, b, c, true, material));
    out.push(Primitive::triangle(a, c, d, true, material));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cornell_box_builds_without_panicking() {
        let scene = Scene::cornell_box();
        assert!(scene.primitives.len() >= 22);
    }

    #[test]
    fn primary_ray_into_room_hits_something() {
        let scene = Scene::cornell_box();
        let ray = Ray::new(Point3::new(0.0, 1.2, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.intersect(&ray).is_some());
    }
}
