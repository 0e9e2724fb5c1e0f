/// tri3d - Rotating triangle through a software 3D pipeline
///
/// Usage:
///   tri3d                      interactive terminal view
///   tri3d -r <angle> <file>    render once and write a PNG
/// Controls:
///   - A / D: Rotate by +10 / -10 degrees
///   - ESC: Quit

use anyhow::Result;
use tri3d_core::Scene;
use tri3d_terminal::{dispatch, parse_args};

fn main() -> Result<()> {
    env_logger::init();

    let invocation = parse_args(std::env::args())?;
    log::debug!("invocation: {invocation:?}");

    dispatch(invocation, Scene::default())
}
