//! CPU rasterizer for a small solar system: tessellated spheres, an orbiting
//! camera, flat Lambert shading and a z-buffer, drawn into a packed
//! `0xAARRGGBB` framebuffer that any windowing layer can present.

pub mod body;
pub mod camera;
pub mod clock;
pub mod color;
pub mod config;
pub mod depth;
pub mod error;
pub mod math;
pub mod mesh;
pub mod rasterizer;
pub mod renderer;
pub mod sphere;
pub mod starfield;
pub mod surface;
pub mod system;

pub use body::{BodyDescriptor, CelestialBody};
pub use camera::Camera;
pub use clock::SimulationClock;
pub use color::Color;
pub use config::{CameraConfig, RenderConfig, SimulationConfig};
pub use depth::DepthBuffer;
pub use error::{Error, Result};
pub use math::{Mat4, Vec3};
pub use mesh::{Mesh, Vertex};
pub use rasterizer::{DrawStats, Lighting, Rasterizer};
pub use renderer::{HudInfo, Renderer};
pub use sphere::build_sphere;
pub use starfield::Starfield;
pub use surface::{Framebuffer, Surface};
pub use system::SolarSystem;
