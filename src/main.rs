use std::env;
use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use torus_sketch::{PassKind, Renderer, SharedViewport, Sketch, SketchConfig};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    if options.headless {
        return run_headless(&options);
    }

    match run_interactive(&options) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --headless mode (set DISPLAY or install a windowing backend to enable rendering)."
                );
                run_headless(&options)
            } else {
                Err(err)
            }
        }
    }
}

fn run_headless(options: &CliOptions) -> Result<()> {
    let mut sketch = Sketch::new(SketchConfig {
        width: options.width,
        height: options.height,
    })?;

    let (width, height) = sketch.size();
    println!("Viewport {}x{} (aspect {:.4})", width, height, sketch.aspect());

    let frames = options.frames.unwrap_or(DEFAULT_HEADLESS_FRAMES);
    for _ in 0..frames {
        sketch.tick();
    }
    println!("Simulated {frames} frame(s)");

    print_final_state(&sketch);
    Ok(())
}

fn run_interactive(options: &CliOptions) -> Result<()> {
    let sketch = Sketch::new(SketchConfig {
        width: options.width,
        height: options.height,
    })?;

    let event_loop =
        EventLoop::new().map_err(|err| WindowInitError::from_error("event loop", err))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        size: PhysicalSize::new(options.width, options.height),
        max_frames: options.frames,
        viewport: SharedViewport::new(options.width, options.height),
        sketch,
        renderer: None,
        orbiting: false,
        last_cursor: None,
        init_error: None,
        last_error: None,
    };
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.init_error {
        return Err(err);
    }
    if let Some(err) = app.last_error {
        return Err(err);
    }

    print_final_state(&app.sketch);
    Ok(())
}

const DEFAULT_HEADLESS_FRAMES: u64 = 10;

fn print_final_state(sketch: &Sketch) {
    let (rotation_x, rotation_y) = sketch.rotation();
    println!("Final sketch state:");
    println!(" - frame {}", sketch.frame());
    println!(" - time {:.2}", sketch.time());
    println!(" - rotation ({rotation_x:.4}, {rotation_y:.4})");
    println!(
        " - passes {}",
        torus_sketch::POST_CHAIN
            .iter()
            .map(|pass| pass_name(*pass))
            .collect::<Vec<_>>()
            .join(" -> ")
    );
}

fn pass_name(pass: PassKind) -> &'static str {
    match pass {
        PassKind::Render => "render",
        PassKind::Bloom => "bloom",
    }
}

struct App {
    size: PhysicalSize<u32>,
    max_frames: Option<u64>,
    viewport: SharedViewport,
    sketch: Sketch,
    renderer: Option<Renderer>,
    orbiting: bool,
    last_cursor: Option<(f64, f64)>,
    init_error: Option<anyhow::Error>,
    last_error: Option<anyhow::Error>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Torus Sketch")
            .with_inner_size(self.size);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.init_error = Some(WindowInitError::from_error("window", err).into());
                event_loop.exit();
                return;
            }
        };

        let inner_size = window.inner_size();
        self.viewport.update(inner_size.width, inner_size.height);

        match block_on(Renderer::new(Arc::clone(&window))).context("failed to set up renderer") {
            Ok(renderer) => {
                info!("renderer ready ({}x{})", inner_size.width, inner_size.height);
                self.renderer = Some(renderer);
            }
            Err(err) => {
                self.last_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        if window_id != renderer.window_id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                debug!("resized to {}x{}", size.width, size.height);
                renderer.resize(size);
                self.viewport.update(size.width, size.height);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.orbiting = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.orbiting {
                    if let Some((last_x, last_y)) = self.last_cursor {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        self.sketch.controls_mut().rotate(dx, dy);
                    }
                }
                self.last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 60.0,
                };
                self.sketch.controls_mut().zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                // Apply the most recent viewport size before the tick so
                // the frame never renders with a stale aspect ratio.
                let (width, height) = self.viewport.size();
                self.sketch.resize(width, height);

                let frame = self.sketch.tick();
                renderer.update_globals(&self.sketch, &frame);
                if let Err(err) = renderer.render() {
                    match err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            let size = renderer.window().inner_size();
                            renderer.resize(size);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            self.last_error = Some(anyhow!("GPU is out of memory"));
                            event_loop.exit();
                        }
                        wgpu::SurfaceError::Timeout => {
                            info!("surface timeout; retrying next frame");
                        }
                        wgpu::SurfaceError::Other => {
                            self.last_error = Some(anyhow!("surface rejected the frame"));
                            event_loop.exit();
                        }
                    }
                }

                if let Some(max_frames) = self.max_frames {
                    if frame.frame >= max_frames {
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = &self.renderer {
            renderer.window().request_redraw();
        }
    }
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

struct CliOptions {
    width: u32,
    height: u32,
    frames: Option<u64>,
    headless: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut width = 1280;
        let mut height = 720;
        let mut frames = None;
        let mut headless = false;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--size" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--size expects WIDTHxHEIGHT"))?;
                    (width, height) = parse_size(&value)?;
                }
                "--frames" => {
                    let value = args.next().ok_or_else(|| anyhow!("--frames expects N"))?;
                    frames = Some(
                        value
                            .parse::<u64>()
                            .with_context(|| format!("invalid frame count {value}"))?,
                    );
                }
                "--headless" => headless = true,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: torus-sketch [--size WxH] [--frames N] [--headless]"
                    ));
                }
            }
        }

        Ok(Self {
            width,
            height,
            frames,
            headless,
        })
    }
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| anyhow!("--size expects WIDTHxHEIGHT, got {value}"))?;
    let width = width
        .parse::<u32>()
        .with_context(|| format!("invalid width {width}"))?;
    let height = height
        .parse::<u32>()
        .with_context(|| format!("invalid height {height}"))?;
    Ok((width, height))
}
