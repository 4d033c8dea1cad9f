use crate::color::Color;
use crate::error::Result;
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;
use crate::sphere::build_sphere;

/// Static description of a body; [`CelestialBody`] adds the moving state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDescriptor {
    pub name: &'static str,
    pub radius: f32,
    pub orbital_radius: f32,
    /// Radians per second around the center.
    pub orbital_speed: f32,
    /// Radians per second around the body's own Y axis.
    pub rotation_speed: f32,
    pub color: Color,
    pub is_central: bool,
}

pub const SUN: BodyDescriptor = BodyDescriptor {
    name: "Sun",
    radius: 15.0,
    orbital_radius: 0.0,
    orbital_speed: 0.0,
    rotation_speed: 0.1,
    color: Color::rgb(255, 200, 50),
    is_central: true,
};

pub const PLANETS: [BodyDescriptor; 4] = [
    BodyDescriptor {
        name: "Mercury",
        radius: 3.0,
        orbital_radius: 50.0,
        orbital_speed: 1.5,
        rotation_speed: 2.0,
        color: Color::rgb(169, 169, 169),
        is_central: false,
    },
    BodyDescriptor {
        name: "Venus",
        radius: 5.0,
        orbital_radius: 80.0,
        orbital_speed: 1.2,
        rotation_speed: 2.0,
        color: Color::rgb(255, 198, 73),
        is_central: false,
    },
    BodyDescriptor {
        name: "Earth",
        radius: 5.5,
        orbital_radius: 110.0,
        orbital_speed: 1.0,
        rotation_speed: 2.0,
        color: Color::rgb(100, 149, 237),
        is_central: false,
    },
    BodyDescriptor {
        name: "Mars",
        radius: 4.0,
        orbital_radius: 150.0,
        orbital_speed: 0.8,
        rotation_speed: 2.0,
        color: Color::rgb(193, 68, 14),
        is_central: false,
    },
];

/// A sphere that spins on its Y axis and, unless central, circles the
/// origin in the XZ plane. Owns its mesh.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    name: String,
    visual_radius: f32,
    orbital_radius: f32,
    orbital_speed: f32,
    rotation_speed: f32,
    current_angle: f32,
    current_rotation: f32,
    position: Vec3,
    color: Color,
    is_central: bool,
    mesh: Mesh,
}

impl CelestialBody {
    pub fn new(descriptor: &BodyDescriptor, mesh: Mesh) -> Self {
        let mut body = Self {
            name: descriptor.name.to_string(),
            visual_radius: descriptor.radius,
            orbital_radius: descriptor.orbital_radius,
            orbital_speed: descriptor.orbital_speed,
            rotation_speed: descriptor.rotation_speed,
            current_angle: 0.0,
            current_rotation: 0.0,
            position: Vec3::ZERO,
            color: descriptor.color,
            is_central: descriptor.is_central,
            mesh,
        };
        body.place_on_orbit();
        body
    }

    /// Builds the body with a freshly tessellated sphere of its radius.
    pub fn with_sphere(descriptor: &BodyDescriptor, sectors: u32, stacks: u32) -> Result<Self> {
        let mesh = build_sphere(descriptor.radius, sectors, stacks)?;
        Ok(Self::new(descriptor, mesh))
    }

    fn place_on_orbit(&mut self) {
        if self.is_central {
            return;
        }
        let (sin, cos) = self.current_angle.sin_cos();
        self.position = Vec3::new(cos * self.orbital_radius, 0.0, sin * self.orbital_radius);
    }

    /// Advances the orbit and spin by `dt` seconds. Position is recomputed
    /// from the angle, not integrated.
    pub fn update(&mut self, dt: f32) {
        if !self.is_central {
            self.current_angle += self.orbital_speed * dt;
            self.place_on_orbit();
        }
        self.current_rotation += self.rotation_speed * dt;
    }

    /// Spin in local space, then move onto the orbit.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::translation(self.position) * Mat4::rotation_y(self.current_rotation)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visual_radius(&self) -> f32 {
        self.visual_radius
    }

    pub fn orbital_radius(&self) -> f32 {
        self.orbital_radius
    }

    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    pub fn current_rotation(&self) -> f32 {
        self.current_rotation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_central(&self) -> bool {
        self.is_central
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn planet_starts_on_its_orbit() {
        let earth = CelestialBody::with_sphere(&PLANETS[2], 8, 6).unwrap();
        assert_eq!(earth.position(), Vec3::new(110.0, 0.0, 0.0));
        assert_eq!(earth.mesh().triangle_count(), 2 * 8 * 6 - 2 * 8);
    }

    #[test]
    fn update_moves_along_the_circle() {
        let mut mars = CelestialBody::with_sphere(&PLANETS[3], 8, 6).unwrap();
        for _ in 0..37 {
            mars.update(0.05);
        }
        let angle: f32 = 0.8 * 0.05 * 37.0;
        assert_abs_diff_eq!(mars.current_angle(), angle, epsilon = 1e-4);
        assert_abs_diff_eq!(mars.position().x, angle.cos() * 150.0, epsilon = 1e-2);
        assert_abs_diff_eq!(mars.position().z, angle.sin() * 150.0, epsilon = 1e-2);
        assert_eq!(mars.position().y, 0.0);
        assert_abs_diff_eq!(mars.position().length(), 150.0, epsilon = 1e-2);
        assert_abs_diff_eq!(mars.current_rotation(), 2.0 * 0.05 * 37.0, epsilon = 1e-4);
    }

    #[test]
    fn central_body_spins_in_place() {
        let mut sun = CelestialBody::with_sphere(&SUN, 8, 6).unwrap();
        sun.update(3.0);
        assert_eq!(sun.position(), Vec3::ZERO);
        assert_eq!(sun.current_angle(), 0.0);
        assert_abs_diff_eq!(sun.current_rotation(), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn model_matrix_rotates_before_translating() {
        let mut venus = CelestialBody::with_sphere(&PLANETS[1], 8, 6).unwrap();
        // a quarter turn of spin with the orbit frozen
        let quarter = std::f32::consts::FRAC_PI_2 / venus.rotation_speed;
        venus.orbital_speed = 0.0;
        venus.update(quarter);
        let p = venus.model_matrix().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.x, 80.0, epsilon = 1e-4);
        assert_abs_diff_eq!(p.z, -1.0, epsilon = 1e-4);
    }
}
