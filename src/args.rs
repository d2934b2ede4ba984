// Commandline argument parsers using clap for the quadrant tools

use crate::quadrant::DEFAULT_BAUD;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Live view of a single quadrant board
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct MonitorArgs {
    /// Serial device the board is connected to
    #[arg(default_value = "/dev/ttyACM0")]
    pub port: String,

    /// Which view to open
    #[arg(short, long, value_enum, default_value_t = ViewKind::Dashboard)]
    pub view: ViewKind,

    /// Baud rate of the serial link
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Pick the device from a list of available ports instead
    #[arg(short, long)]
    pub select: bool,

    /// Show made-up data instead of reading a board
    #[arg(long)]
    pub demo: bool,

    /// Reports per second made up in demo mode
    #[arg(long = "demo-rate", default_value_t = 200.0)]
    pub demo_rate: f64,
}

/// The views the monitor can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewKind {
    /// Distances, parameter gauges and sample rate
    Dashboard,
    /// Sample rate jitter
    Jitter,
    /// Plain four-channel distance plot
    Graphing,
}

/// Map two quadrant boards onto a textual event stream for the sound engine
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct TriangulateArgs {
    /// Serial device of the left board
    #[arg(short, long, default_value = "/dev/ttyACM0")]
    pub left: String,

    /// Serial device of the right board
    #[arg(short, long, default_value = "/dev/ttyACM1")]
    pub right: String,

    /// Baud rate of both serial links
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// RON file with reducer settings; defaults are used for anything it
    /// leaves out
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How long to wait between polls of the boards, in milliseconds
    #[arg(short, long = "poll-ms", default_value_t = 1)]
    pub poll_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_defaults() {
        let args = MonitorArgs::try_parse_from(["monitor"]).unwrap();
        assert_eq!(args.port, "/dev/ttyACM0");
        assert_eq!(args.view, ViewKind::Dashboard);
        assert_eq!(args.baud, 115200);
        assert!(!args.select && !args.demo);
        assert_eq!(args.demo_rate, 200.0);
    }

    #[test]
    fn monitor_options() {
        let args =
            MonitorArgs::try_parse_from(["monitor", "/dev/ttyUSB3", "--view", "jitter", "-b", "9600"])
                .unwrap();
        assert_eq!(args.port, "/dev/ttyUSB3");
        assert_eq!(args.view, ViewKind::Jitter);
        assert_eq!(args.baud, 9600);
        assert!(MonitorArgs::try_parse_from(["monitor", "--view", "scope"]).is_err());

        let args =
            MonitorArgs::try_parse_from(["monitor", "--demo", "--demo-rate", "50"]).unwrap();
        assert!(args.demo);
        assert_eq!(args.demo_rate, 50.0);
    }

    #[test]
    fn triangulate_options() {
        let args = TriangulateArgs::try_parse_from(["triangulate"]).unwrap();
        assert_eq!(args.left, "/dev/ttyACM0");
        assert_eq!(args.right, "/dev/ttyACM1");
        assert!(args.config.is_none());

        let args = TriangulateArgs::try_parse_from([
            "triangulate",
            "--right",
            "/dev/ttyACM2",
            "--config",
            "tuning.ron",
            "--poll-ms",
            "5",
        ])
        .unwrap();
        assert_eq!(args.right, "/dev/ttyACM2");
        assert_eq!(args.config, Some(PathBuf::from("tuning.ron")));
        assert_eq!(args.poll_ms, 5);
    }
}
