//! Live terminal view of a quadrant board.
//!
//! Logs go to stderr, which shares the terminal with the view; redirect
//! them (`2>monitor.log`) when running with `RUST_LOG` set.

use clap::Parser;
use quadrant::{
    args::{MonitorArgs, ViewKind},
    dummy_quadrant::DummyQuadrant,
    gui::{device_selector, engage_monitor, QuadrantGuiError},
    quadrant::Quadrant,
    report_source::ReportSource,
    views::{Dashboard, Graphing, JitterScope, View},
};

use log::info;
use serial2::SerialPort;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = MonitorArgs::parse();

    let view: Box<dyn View> = match args.view {
        ViewKind::Dashboard => Box::new(Dashboard::new()),
        ViewKind::Jitter => Box::new(JitterScope::new()),
        ViewKind::Graphing => Box::new(Graphing::new()),
    };

    if args.demo {
        let source = DummyQuadrant::new(args.demo_rate);
        engage_monitor(view, Box::new(source), "demo")?;
        return Ok(());
    }

    let device = if args.select {
        let available_ports = SerialPort::available_ports()?;
        match device_selector(available_ports)? {
            Some(port) => port.to_string_lossy().into_owned(),
            None => {
                info!("no device selected");
                return Ok(());
            }
        }
    } else {
        args.port
    };

    let source: Box<dyn ReportSource> = Box::new(
        Quadrant::open(&device, args.baud)
            .map_err(|e| QuadrantGuiError::DeviceError(device.clone(), e))?,
    );
    engage_monitor(view, source, &device)?;

    Ok(())
}
