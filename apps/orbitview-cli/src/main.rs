use anyhow::Context;
use clap::{Parser, Subcommand};
use orbitview_assets::{AssetStore, TextureData, cube_geometry};
use orbitview_camera::{OrbitCameraController, OrbitSettings};
use orbitview_input::{InputEvent, PointerButton};
use orbitview_render::{
    CameraSettings, DemoScene, RenderContext, RenderSettings, Renderer, RendererKind,
    TextRenderer,
};
use orbitview_tools::{RenderInspector, RenderSummary};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shader name used for materials in the headless context.
const SHADER: &str = "uber";

#[derive(Parser)]
#[command(name = "orbitview-cli", about = "Headless orbitview tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, renderers and default settings
    Info,
    /// Drive an orbit camera with a scripted drag and scroll
    Orbit {
        /// Frames spent dragging
        #[arg(short, long, default_value = "10")]
        frames: u32,
        /// Horizontal drag distance in pixels
        #[arg(long, default_value = "200", allow_hyphen_values = true)]
        drag_x: f32,
        /// Vertical drag distance in pixels
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        drag_y: f32,
        /// Scroll lines after the drag (negative zooms in)
        #[arg(long, default_value = "-2", allow_hyphen_values = true)]
        scroll: f32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Print the full text render of each frame
        #[arg(long)]
        dump: bool,
    },
    /// Load an image and describe it as a texture
    Texture {
        /// Image file
        path: PathBuf,
    },
}

/// Scripted pointer input for the `orbit` command.
#[derive(Debug, Clone, Copy)]
struct OrbitScript {
    frames: u32,
    drag_x: f32,
    drag_y: f32,
    scroll: f32,
    dt: f32,
}

impl OrbitScript {
    /// Events for each frame: press, `frames` moves, then release and scroll.
    fn events(&self) -> Vec<Vec<InputEvent>> {
        let frames = self.frames.max(1);
        let mut script = vec![vec![InputEvent::PointerPressed {
            button: PointerButton::Primary,
            x: 0.0,
            y: 0.0,
        }]];
        for i in 1..=frames {
            let t = i as f32 / frames as f32;
            script.push(vec![InputEvent::PointerMoved {
                x: self.drag_x * t,
                y: self.drag_y * t,
            }]);
        }
        script.push(vec![
            InputEvent::PointerReleased {
                button: PointerButton::Primary,
                x: self.drag_x,
                y: self.drag_y,
            },
            InputEvent::Scroll { delta: self.scroll },
        ]);
        script
    }
}

/// Headless context holding the demo scene.
fn demo_context() -> anyhow::Result<(RenderContext, DemoScene)> {
    let mut ctx = RenderContext::new(RenderSettings::default());
    ctx.register_shader(SHADER, "");
    let mut assets = AssetStore::new();
    let geometry = assets.add_geometry(&mut ctx, "cube", cube_geometry());
    let white = assets.add_texture(&mut ctx, TextureData::white())?;
    let material = ctx.create_material(SHADER)?;
    ctx.set_material_texture(material, "u_albedo", white)?;
    let scene = DemoScene::build(&mut ctx, geometry, material, material)?;
    Ok((ctx, scene))
}

/// Run `script` and return one output block per frame.
fn run_orbit(
    script: &OrbitScript,
    settings: OrbitSettings,
    dump: bool,
) -> anyhow::Result<Vec<String>> {
    let (mut ctx, mut scene) = demo_context()?;
    let camera = ctx.create_camera(CameraSettings::default());
    let mut controller = OrbitCameraController::from_rig(&ctx, camera, settings);
    let mut renderer = TextRenderer::new();
    let mut output = Vec::new();

    for (frame, events) in script.events().iter().enumerate() {
        for event in events {
            controller.on_event(event);
        }
        controller.on_update(script.dt, &mut ctx);
        scene.advance(script.dt);
        scene.apply(&mut ctx)?;

        if dump {
            output.push(renderer.render(&ctx, camera)?);
        } else {
            output.push(format!(
                "frame {frame:>3}: yaw={:.3} pitch={:.3} {}",
                controller.yaw(),
                controller.pitch(),
                RenderInspector::describe_camera(&ctx, camera)
            ));
        }
    }
    Ok(output)
}

fn describe_texture(path: &Path) -> anyhow::Result<Vec<String>> {
    let texture = TextureData::from_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let (width, height) = (texture.width, texture.height);
    let bytes = texture.data.len();
    let name = texture.name.clone();

    let mut ctx = RenderContext::default();
    let mut store = AssetStore::new();
    store.add_texture(&mut ctx, texture)?;
    let id = store
        .entries()
        .next()
        .map(|(id, _)| id.0)
        .unwrap_or_default();

    Ok(vec![
        format!("texture: {name}"),
        format!("size: {width}x{height} rgba8 ({bytes} bytes)"),
        format!("asset id: {id:#018x}"),
    ])
}

fn print_summary(summary: &RenderSummary) {
    println!("{summary}");
    println!("systems: {:?}", summary.systems);
    println!("shaders: {:?}", summary.shaders);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("orbitview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", orbitview_input::crate_info());
            println!("camera: {}", orbitview_camera::crate_info());
            println!("render: {}", orbitview_render::crate_info());
            println!("assets: {}", orbitview_assets::crate_info());
            println!("tools: {}", orbitview_tools::crate_info());
            let names: Vec<&str> = RendererKind::ALL.iter().map(|k| k.name()).collect();
            println!("renderers: {}", names.join(", "));
            let orbit = OrbitSettings::default();
            println!(
                "orbit: sensitivity={} zoom_step={} distance=[{}, {}] smoothing={}",
                orbit.sensitivity,
                orbit.zoom_step,
                orbit.min_distance,
                orbit.max_distance,
                orbit.interpolation_speed
            );
            let (ctx, _) = demo_context()?;
            print_summary(&RenderInspector::summary(&ctx));
        }
        Commands::Orbit {
            frames,
            drag_x,
            drag_y,
            scroll,
            dt,
            dump,
        } => {
            let script = OrbitScript {
                frames,
                drag_x,
                drag_y,
                scroll,
                dt,
            };
            tracing::info!(?script, "running orbit script");
            for block in run_orbit(&script, OrbitSettings::default(), dump)? {
                println!("{block}");
            }
        }
        Commands::Texture { path } => {
            for line in describe_texture(&path)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
