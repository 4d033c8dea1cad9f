use std::f32::consts::PI;

use solar_raster::{
    build_sphere, Camera, CameraConfig, Color, Framebuffer, HudInfo, Lighting, Mat4, Rasterizer,
    RenderConfig, Renderer, SimulationClock, SolarSystem, Vec3,
};

const SIZE: usize = 200;

/// Camera on the -Z axis looking back at the origin with a narrow lens, so
/// a radius-5 sphere fills a good part of the frame.
fn camera_on_negative_z() -> Camera {
    let config = CameraConfig {
        fov_degrees: 10.0,
        yaw: PI,
        pitch: 0.0,
        ..CameraConfig::default()
    };
    Camera::new(1.0, &config).unwrap()
}

fn side_lit_rasterizer() -> Rasterizer {
    let lighting = Lighting::new(Vec3::new(1.0, 0.0, 1.0), 0.2, 0.8).unwrap();
    let mut rasterizer = Rasterizer::new(Framebuffer::new(SIZE, SIZE), lighting);
    rasterizer.clear(Color::BLACK);
    rasterizer
}

fn drawn_pixels(rasterizer: &Rasterizer) -> Vec<Color> {
    let black = Color::BLACK.to_u32();
    rasterizer
        .target()
        .as_slice()
        .iter()
        .filter(|&&p| p != black)
        .map(|&p| Color::from_u32(p))
        .collect()
}

#[test]
fn lit_sphere_spans_ambient_to_full_brightness() {
    let camera = camera_on_negative_z();
    let mut rasterizer = side_lit_rasterizer();
    let sphere = build_sphere(5.0, 18, 12).unwrap();

    let stats = rasterizer.draw_mesh(
        &sphere,
        &Mat4::identity(),
        &camera.view_matrix(),
        &camera.projection_matrix(),
        Color::WHITE,
    );
    assert_eq!(stats.triangles_drawn + stats.triangles_culled, sphere.triangle_count());
    assert!(stats.triangles_culled > 0);

    let pixels = drawn_pixels(&rasterizer);
    assert!(!pixels.is_empty());
    let brightest = pixels.iter().map(|c| c.r).max().unwrap();
    let dimmest = pixels.iter().map(|c| c.r).min().unwrap();
    assert!(brightest >= 240, "brightest channel {}", brightest);
    assert!(dimmest < 128, "dimmest channel {}", dimmest);
    // never darker than the ambient floor
    assert!(dimmest as f32 >= 0.2 * 255.0 - 1.0, "dimmest channel {}", dimmest);
    for c in &pixels {
        assert_eq!((c.r, c.g), (c.g, c.b));
    }
}

#[test]
fn default_lens_lit_face_toward_camera() {
    // window-sized target, 60 degree lens at distance 300, light straight down +Z
    let camera = Camera::new(
        1280.0 / 720.0,
        &CameraConfig {
            yaw: PI,
            pitch: 0.0,
            ..CameraConfig::default()
        },
    )
    .unwrap();
    assert_eq!(camera.distance(), 300.0);
    let lighting = Lighting::new(Vec3::new(0.0, 0.0, 1.0), 0.2, 0.8).unwrap();
    let mut rasterizer = Rasterizer::new(Framebuffer::new(1280, 720), lighting);
    rasterizer.clear(Color::BLACK);
    let sphere = build_sphere(5.0, 18, 12).unwrap();

    let stats = rasterizer.draw_mesh(
        &sphere,
        &Mat4::identity(),
        &camera.view_matrix(),
        &camera.projection_matrix(),
        Color::WHITE,
    );
    assert_eq!(stats.triangles_drawn + stats.triangles_culled, sphere.triangle_count());

    // the face pointing back at the light sits in the middle of the frame
    let mut center_max = 0;
    for y in 358..=362 {
        for x in 638..=642 {
            center_max = center_max.max(rasterizer.target().pixel(x, y).unwrap().r);
        }
    }
    assert!(center_max >= 240, "center channel {}", center_max);

    let pixels = drawn_pixels(&rasterizer);
    let dimmest = pixels.iter().map(|c| c.r).min().unwrap();
    assert!(dimmest < 200, "dimmest channel {}", dimmest);
    assert!(dimmest as f32 >= 0.2 * 255.0 - 1.0, "dimmest channel {}", dimmest);

    // silhouette normals are perpendicular to the view axis and get ambient only
    let light = rasterizer.lighting();
    approx::assert_abs_diff_eq!(light.brightness(Vec3::new(1.0, 0.0, 0.0)), 0.2, epsilon = 1e-6);
    approx::assert_abs_diff_eq!(light.brightness(Vec3::new(0.0, 1.0, 0.0)), 0.2, epsilon = 1e-6);
    approx::assert_abs_diff_eq!(light.brightness(Vec3::new(0.0, 0.0, -1.0)), 1.0, epsilon = 1e-6);
}

#[test]
fn nearer_sphere_wins_regardless_of_draw_order() {
    let camera = camera_on_negative_z();
    let far = build_sphere(5.0, 18, 12).unwrap();
    let near = build_sphere(2.0, 18, 12).unwrap();
    let near_model = Mat4::translation(Vec3::new(0.0, 0.0, -20.0));
    let red = Color::rgb(255, 0, 0);
    let blue = Color::rgb(0, 0, 255);

    for near_first in [true, false] {
        let mut rasterizer = side_lit_rasterizer();
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        if near_first {
            rasterizer.draw_mesh(&near, &near_model, &view, &projection, blue);
            rasterizer.draw_mesh(&far, &Mat4::identity(), &view, &projection, red);
        } else {
            rasterizer.draw_mesh(&far, &Mat4::identity(), &view, &projection, red);
            rasterizer.draw_mesh(&near, &near_model, &view, &projection, blue);
        }

        let mut covered = 0;
        for y in 97..=103 {
            for x in 97..=103 {
                let c = rasterizer.target().pixel(x, y).unwrap();
                if c != Color::BLACK {
                    covered += 1;
                    assert!(c.b > 0 && c.r == 0, "pixel ({}, {}) is {:?}", x, y, c);
                }
            }
        }
        assert!(covered > 0);
        // the far sphere still shows around the near one
        assert!(drawn_pixels(&rasterizer).iter().any(|c| c.r > 0));
    }
}

#[test]
fn solar_system_frame_renders_and_animates() {
    let config = RenderConfig {
        width: 320,
        height: 180,
        ..RenderConfig::default()
    };
    let mut renderer = Renderer::new(&config).unwrap();
    let mut system = SolarSystem::inner_planets(&config).unwrap();
    let camera = Camera::new(config.aspect_ratio(), &CameraConfig::default()).unwrap();
    let clock = SimulationClock::default();

    let stats = renderer.render(&system, &camera);
    assert_eq!(stats.triangles_drawn + stats.triangles_culled, system.total_triangle_count());
    let first = renderer.framebuffer().as_slice().to_vec();

    for _ in 0..10 {
        system.update(clock.advance(0.1));
    }
    let earth = system.body(3).unwrap();
    approx::assert_abs_diff_eq!(earth.current_angle(), 1.0, epsilon = 1e-4);
    approx::assert_abs_diff_eq!(earth.position().length(), 110.0, epsilon = 1e-2);

    renderer.render(&system, &camera);
    assert_ne!(renderer.framebuffer().as_slice(), first.as_slice());

    renderer.render_info(&HudInfo {
        fps: 30.0,
        target_fps: config.target_fps,
        triangles: stats.triangles_drawn,
        speed: clock.speed(),
        max_speed: clock.max_speed(),
    });
    assert_eq!(renderer.framebuffer().pixel(10, 10), Some(Color::rgb(0, 255, 0)));
}
