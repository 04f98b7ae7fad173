//! Sun demo
//!
//! Headless stand-in for the slider UI: four spheres with different
//! materials around the origin, a point light placed from the command line,
//! and a cube-map reflection that follows the light.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use image::ImageFormat;

use envlight::foundation::logging;
use envlight::prelude::*;

const SPHERE_RING_RADIUS: f64 = 3.0;
const SPHERE_HEIGHT: f64 = 1.0;
const SPHERE_RADIUS: f64 = 0.7;

/// One orientation event per sweep step, or a single event from the flags
#[derive(Debug)]
struct DemoOptions {
    config: Option<PathBuf>,
    input: OrientationInput,
    sweep: Option<u32>,
    frames: u32,
    dump_faces: Option<PathBuf>,
}

impl DemoOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            input: OrientationInput {
                angle_x: matches.get_one::<f64>("angle-x").copied(),
                angle_y: matches.get_one::<f64>("angle-y").copied(),
                angle_z: matches.get_one::<f64>("angle-z").copied(),
                distance: matches.get_one::<f64>("distance").copied(),
            },
            sweep: matches.get_one::<u32>("sweep").copied(),
            frames: matches.get_one::<u32>("frames").copied().unwrap_or(1),
            dump_faces: matches.get_one::<PathBuf>("dump-faces").cloned(),
        }
    }
}

struct SunDemoApp {
    backend: SoftwareBackend,
    rig: LightRig,
    materials: MaterialStore,
    objects: Vec<SceneObject>,
    camera: Camera,
}

impl SunDemoApp {
    fn new(config: RigConfig) -> Result<Self> {
        let mut backend = SoftwareBackend::new();
        let mut rig = LightRig::from_config(config).context("Invalid rig configuration")?;
        rig.activate(&mut backend).context("Failed to create the reflection capture")?;

        let mut camera = Camera::default();
        camera.look_at(Vec3::zeros(), Vec3::y());

        Ok(Self {
            backend,
            rig,
            materials: MaterialStore::new(),
            objects: Vec::new(),
            camera,
        })
    }

    /// Place the light, then build the spheres and subscribe their materials
    fn initialize(&mut self) {
        log::info!("Initializing sun demo...");
        let defaults = self.rig.config().orientation;
        self.rig.set_orientation(defaults, &mut self.backend, &mut self.materials);

        for (i, material) in presets::all().into_iter().enumerate() {
            let angle = (i as f64 * 90.0).to_radians();
            let position = Vec3::new(
                SPHERE_RING_RADIUS * angle.cos(),
                SPHERE_HEIGHT,
                SPHERE_RING_RADIUS * angle.sin(),
            );
            let name = material.name.clone();
            let key = self.materials.insert(material);
            self.rig.register_material(key);
            self.objects.push(SceneObject::sphere(name, position, SPHERE_RADIUS, key));
        }

        // Spheres were created after the first capture
        let update = self.rig.refresh(&mut self.backend, &mut self.materials);
        log::info!("Subscribed {} materials to the reflection capture", update.notified);
    }

    fn run(&mut self, options: &DemoOptions) -> Result<()> {
        match options.sweep {
            Some(steps) if steps > 0 => {
                let base = options.input.or_defaults(&self.rig.config().orientation);
                for step in 0..steps {
                    let angle_y = base.angle_y + 360.0 * f64::from(step) / f64::from(steps);
                    self.apply(Orientation { angle_y, ..base });
                }
            }
            _ => {
                let orientation = options.input.or_defaults(&self.rig.config().orientation);
                self.apply(orientation);
            }
        }

        for _ in 0..options.frames {
            let frame = self
                .rig
                .render_frame(&mut self.backend, &self.camera, &self.objects, &self.materials)
                .context("Frame rendering failed")?;
            for object in &frame.objects {
                log::debug!(
                    "frame {} {}: diffuse {:.3} specular {:.3} env map {:?} x{:.2}",
                    frame.frame_index,
                    object.name,
                    object.shading.diffuse,
                    object.shading.specular,
                    object.env_map,
                    object.env_map_intensity
                );
            }
        }

        if let Some(dir) = &options.dump_faces {
            self.dump_faces(dir)?;
        }

        log::info!(
            "Done: {} captures, {} frames",
            self.backend.capture_count(),
            self.backend.frame_count()
        );
        Ok(())
    }

    fn apply(&mut self, orientation: Orientation) {
        let update = self.rig.set_orientation(orientation, &mut self.backend, &mut self.materials);
        if !update.captured {
            log::warn!("Reflections not refreshed for light at {:?}", update.position);
        }
    }

    fn dump_faces(&self, dir: &Path) -> Result<()> {
        let target = self
            .rig
            .environment_map()
            .context("Reflection capture is not active")?;
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

        for face in CubeFace::ALL {
            let path = dir.join(format!("{}.png", face.label()));
            target
                .face(face)
                .save_with_format(&path, ImageFormat::Png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        Ok(())
    }
}

fn cli() -> Command {
    Command::new("sun_demo")
        .about("Moves a point light and keeps a cube-map reflection in sync with it")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Rig configuration (.toml or .ron)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("angle-x")
                .long("angle-x")
                .value_name("DEGREES")
                .help("Rotation about X")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("angle-y")
                .long("angle-y")
                .value_name("DEGREES")
                .help("Rotation about Y")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("angle-z")
                .long("angle-z")
                .value_name("DEGREES")
                .help("Rotation about Z")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("distance")
                .short('d')
                .long("distance")
                .value_name("UNITS")
                .help("Distance of the light from the origin")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("sweep")
                .long("sweep")
                .value_name("STEPS")
                .help("Rotate the Y angle through a full turn in this many events")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_name("COUNT")
                .help("Frames to render after the light events")
                .default_value("1")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("dump-faces")
                .long("dump-faces")
                .value_name("DIR")
                .help("Write the six captured faces as PNG files")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log warnings and errors")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let options = DemoOptions::from_matches(&matches);

    let config = match &options.config {
        Some(path) => {
            let path_str = path.to_str().context("Config path is not valid UTF-8")?;
            RigConfig::load_from_file(path_str)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => RigConfig::default(),
    };

    let filter = if matches.get_flag("quiet") {
        "warn"
    } else {
        config.engine.log_level.as_str()
    };
    logging::init(filter);
    log::info!("Starting sun demo");

    let mut app = SunDemoApp::new(config)?;
    app.initialize();
    app.run(&options)?;

    log::info!("Sun demo finished successfully");
    Ok(())
}
