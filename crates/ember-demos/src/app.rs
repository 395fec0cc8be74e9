use anyhow::{Context, Result};
use ember_shader::glow::{self, HasContext};
use ember_shader::{ProgramConfig, ShaderProgram, SourceLoader};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::config::DemoConfig;
use crate::frame_clock::FrameClock;
use crate::gl_window::GlWindow;
use crate::triangle::Triangle;

pub const VERTEX_SHADER: &str = "vertexShader.vs";
pub const FRAGMENT_SHADER: &str = "fragmentShader.fs";
pub const TINT_UNIFORM: &str = "u_tint";

/// Everything that lives while the window is open.
struct Scene {
    program: ShaderProgram<glow::Context>,
    triangle: Triangle,
    clock: FrameClock,
    clear_color: [f32; 4],
    // Dropped last: owns the context the fields above were created on.
    window: GlWindow,
}

impl Scene {
    fn new<L: SourceLoader>(
        event_loop: &ActiveEventLoop,
        config: &DemoConfig,
        loader: &L,
    ) -> Result<Self> {
        let window = GlWindow::new(event_loop, config)?;
        let gl = &window.gl;

        let program = ShaderProgram::from_locations_with(
            gl,
            loader,
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            ProgramConfig::labeled("first-steps"),
        )
        .context("failed to build the triangle shader program")?;

        let triangle = match Triangle::new(gl) {
            Ok(triangle) => triangle,
            Err(e) => {
                program.destroy(gl);
                return Err(e);
            }
        };

        if config.wireframe {
            unsafe { gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE) };
        }
        window.resize(window.window.inner_size());

        Ok(Self {
            program,
            triangle,
            clock: FrameClock::new(),
            clear_color: config.clear_color,
            window,
        })
    }

    fn render(&mut self) -> Result<()> {
        let elapsed = self.clock.tick();
        let gl = &self.window.gl;
        let [r, g, b, a] = self.clear_color;

        unsafe {
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.program.activate(gl);
        self.program.set_float(gl, TINT_UNIFORM, tint_at(elapsed));
        self.triangle.draw(gl);

        self.window.swap_buffers()
    }

    fn destroy(self) {
        let Scene {
            program,
            triangle,
            window,
            ..
        } = self;
        triangle.destroy(&window.gl);
        program.destroy(&window.gl);
        log::debug!("scene released");
    }
}

/// Brightness pulse in `[0, 1]`.
fn tint_at(seconds: f32) -> f32 {
    seconds.sin() * 0.5 + 0.5
}

/// Winit handler for the first-steps triangle.
pub struct FirstSteps<L> {
    config: DemoConfig,
    loader: L,
    scene: Option<Scene>,
    failure: Option<anyhow::Error>,
}

impl<L: SourceLoader> FirstSteps<L> {
    pub fn new(config: DemoConfig, loader: L) -> Self {
        Self {
            config,
            loader,
            scene: None,
            failure: None,
        }
    }

    /// The first error that stopped the loop, if any.
    pub fn finish(self) -> Result<()> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.failure.get_or_insert(error);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scene) = self.scene.take() {
            scene.destroy();
        }
        event_loop.exit();
    }
}

impl<L: SourceLoader> ApplicationHandler for FirstSteps<L> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scene) = self.scene.as_mut() {
            scene.clock.reset();
            return;
        }

        match Scene::new(event_loop, &self.config, &self.loader) {
            Ok(scene) => {
                scene.window.window.request_redraw();
                self.scene = Some(scene);
            }
            Err(e) => self.fail(event_loop, e.context("failed to start first-steps")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the tint animates every frame.
        if let Some(scene) = &self.scene {
            scene.window.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.shutdown(event_loop),

            WindowEvent::Resized(size) => {
                if let Some(scene) = &self.scene {
                    scene.window.resize(size);
                    scene.window.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(scene) = self.scene.as_mut() else {
                    return;
                };
                if let Err(e) = scene.render() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = self.scene.take() {
            scene.destroy();
        }
    }
}
