//! Textured-quad viewer: a minimal real-time renderer with a fly camera.

mod app;
mod geometry;

use anyhow::Result;

use glint_engine::logging;
use glint_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use crate::app::QuadApp;

fn main() -> Result<()> {
    logging::init();

    let config = RuntimeConfig {
        title: "glint viewer".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        grab_cursor: true,
    };

    Runtime::run(config, QuadApp::new())
}
