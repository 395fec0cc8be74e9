//! Draws a vertex-coloured triangle whose brightness pulses through a
//! `u_tint` uniform. Esc or closing the window exits.
//!
//! `EMBER_SHADER_DIR` overrides where the shader files are read from and
//! `EMBER_WIREFRAME=1` draws outlines only.

mod app;
mod config;
mod frame_clock;
mod gl_window;
mod triangle;

use anyhow::{Context, Result};
use ember_shader::logging::{init_logging, LoggingConfig};
use ember_shader::FileSourceLoader;
use winit::event_loop::EventLoop;

use crate::app::FirstSteps;
use crate::config::DemoConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::from_env();
    let loader = FileSourceLoader::from_env_or(&config.shader_dir);
    log::info!("loading shaders from {}", loader.root().display());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = FirstSteps::new(config, loader);
    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    app.finish()
}
