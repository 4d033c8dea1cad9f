use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use solar_raster::config::WINDOW_TITLE;
use solar_raster::{
    Camera, CameraConfig, HudInfo, RenderConfig, Renderer, SimulationClock, SimulationConfig,
    SolarSystem, Surface,
};

/// Software-rasterized view of the Sun and the inner planets.
///
/// Drag with the left mouse button to orbit, scroll to zoom. Keys: Space
/// pause, W wireframe, O orbits, S stars, I info panel, +/- speed,
/// R reset zoom, 1-4 select a planet, Esc quit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial window width in pixels.
    #[arg(long)]
    width: Option<usize>,

    /// Initial window height in pixels.
    #[arg(long)]
    height: Option<usize>,

    /// Ambient light strength in [0, 1].
    #[arg(long)]
    ambient: Option<f32>,

    /// Diffuse light strength in [0, 1].
    #[arg(long)]
    diffuse: Option<f32>,

    /// Longitude subdivisions of every planet sphere.
    #[arg(long)]
    sectors: Option<u32>,

    /// Latitude subdivisions of every planet sphere.
    #[arg(long)]
    stacks: Option<u32>,

    /// Number of background stars.
    #[arg(long)]
    stars: Option<usize>,

    /// Seed for the star positions.
    #[arg(long)]
    seed: Option<u64>,

    /// Start in wireframe mode.
    #[arg(long)]
    wireframe: bool,

    /// Frame rate cap.
    #[arg(long)]
    fps: Option<u32>,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        RenderConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            ambient_strength: self.ambient.unwrap_or(defaults.ambient_strength),
            diffuse_strength: self.diffuse.unwrap_or(defaults.diffuse_strength),
            planet_sectors: self.sectors.unwrap_or(defaults.planet_sectors),
            planet_stacks: self.stacks.unwrap_or(defaults.planet_stacks),
            star_count: self.stars.unwrap_or(defaults.star_count),
            star_seed: self.seed.unwrap_or(defaults.star_seed),
            target_fps: self.fps.unwrap_or(defaults.target_fps),
            ..defaults
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.render_config();
    if let Err(err) = config.validate() {
        log::warn!("rejected configuration: {}", err);
        return Err(err).context("invalid render configuration");
    }
    let camera_config = CameraConfig::default();

    let mut window = Window::new(
        WINDOW_TITLE,
        config.width,
        config.height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .context("failed to open window")?;
    window.limit_update_rate(Some(config.frame_delay()));

    let mut renderer = Renderer::new(&config).context("failed to set up renderer")?;
    if args.wireframe {
        renderer.toggle_wireframe();
    }
    let mut system = SolarSystem::inner_planets(&config).context("failed to build solar system")?;
    let mut camera = Camera::new(config.aspect_ratio(), &camera_config).context("failed to set up camera")?;
    let mut clock = SimulationClock::new(&SimulationConfig::default());

    let mut size = (config.width, config.height);
    let mut last_frame = Instant::now();
    let mut last_mouse: Option<(f32, f32)> = None;
    let mut fps_timer = Instant::now();
    let mut frames = 0u32;
    let mut fps = 0.0f32;
    let mut triangles = 0usize;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let frame_dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        let current_size = window.get_size();
        if current_size != size && current_size.0 > 0 && current_size.1 > 0 {
            size = current_size;
            renderer.resize(size.0, size.1);
            camera.set_aspect_ratio(size.0 as f32 / size.1 as f32);
        }

        // drag to orbit
        let mouse = window.get_mouse_pos(MouseMode::Pass);
        if window.get_mouse_down(MouseButton::Left) {
            if let (Some((x, y)), Some((px, py))) = (mouse, last_mouse) {
                let speed = camera_config.rotation_speed;
                camera.rotate((x - px) * speed, -(y - py) * speed);
            }
        }
        last_mouse = mouse;

        if let Some((_, scroll)) = window.get_scroll_wheel() {
            if scroll != 0.0 {
                camera.zoom(-scroll.signum() * camera_config.zoom_speed);
            }
        }

        handle_keys(&window, &mut renderer, &mut clock, &mut camera, &camera_config, &system);

        system.update(clock.advance(frame_dt));
        let stats = renderer.render(&system, &camera);
        triangles = stats.triangles_drawn;
        renderer.render_info(&HudInfo {
            fps,
            target_fps: config.target_fps,
            triangles,
            speed: clock.speed(),
            max_speed: clock.max_speed(),
        });

        frames += 1;
        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            fps = frames as f32 / elapsed;
            log::info!(
                "fps {:.1} | triangles {} | speed {:.1}x | zoom {:.0}",
                fps,
                triangles,
                clock.speed(),
                camera.distance()
            );
            frames = 0;
            fps_timer = Instant::now();
        }

        let framebuffer = renderer.framebuffer();
        window
            .update_with_buffer(framebuffer.as_slice(), framebuffer.width(), framebuffer.height())
            .context("failed to present frame")?;
    }

    log::info!("shutting down after {} triangles in the last frame", triangles);
    Ok(())
}

fn handle_keys(
    window: &Window,
    renderer: &mut Renderer,
    clock: &mut SimulationClock,
    camera: &mut Camera,
    camera_config: &CameraConfig,
    system: &SolarSystem,
) {
    let pressed = |key| window.is_key_pressed(key, KeyRepeat::No);

    if pressed(Key::Space) {
        let paused = clock.toggle_pause();
        log::info!("simulation {}", if paused { "paused" } else { "resumed" });
    }
    if pressed(Key::W) {
        log::info!("wireframe {}", on_off(renderer.toggle_wireframe()));
    }
    if pressed(Key::O) {
        log::info!("orbits {}", on_off(renderer.toggle_orbits()));
    }
    if pressed(Key::S) {
        log::info!("stars {}", on_off(renderer.toggle_stars()));
    }
    if pressed(Key::I) {
        log::info!("info panel {}", on_off(renderer.toggle_info()));
    }
    if pressed(Key::Equal) || pressed(Key::NumPadPlus) {
        log::info!("simulation speed {:.1}x", clock.speed_up());
    }
    if pressed(Key::Minus) || pressed(Key::NumPadMinus) {
        log::info!("simulation speed {:.1}x", clock.slow_down());
    }
    if pressed(Key::R) {
        camera.set_distance(camera_config.distance);
        log::info!("zoom reset to {:.0}", camera.distance());
    }
    for (index, key) in [Key::Key1, Key::Key2, Key::Key3, Key::Key4].into_iter().enumerate() {
        if pressed(key) {
            if let Some(body) = system.body(index + 1) {
                log::info!("selected {}", body.name());
            }
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
