//! Reads a left and a right quadrant board and prints the event stream for
//! the sound engine on stdout.
//!
//! Example:
//! cargo run --bin triangulate -- --left /dev/ttyACM0 --right /dev/ttyACM1 | engine

use clap::Parser;
use quadrant::{
    args::TriangulateArgs, config::ReducerConfig, event_reducer::EventReducer,
    quadrant::Quadrant, report_source::ReportSource, triangulate::Triangulator,
};

use log::info;
use std::{error::Error, io, time::Duration};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = TriangulateArgs::parse();

    let config = match &args.config {
        Some(path) => ReducerConfig::from_path(path)?,
        None => ReducerConfig::default(),
    };
    info!("reducer settings: {:?}", config);

    let mut left = Quadrant::open(&args.left, args.baud)?;
    let mut right = Quadrant::open(&args.right, args.baud)?;
    let mut triangulator = Triangulator::new(EventReducer::new(config));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let poll_period = Duration::from_millis(args.poll_ms);

    while left.is_connected() && right.is_connected() {
        triangulator.poll(&mut left, &mut right, &mut out)?;
        spin_sleep::sleep(poll_period);
    }
    // Whatever arrived before the disconnect still gets out.
    triangulator.poll(&mut left, &mut right, &mut out)?;
    info!(
        "a board went away ({}: {}, {}: {}), stopping",
        left.name(),
        left.is_connected(),
        right.name(),
        right.is_connected()
    );

    left.stop();
    right.stop();
    Ok(())
}
