//! A [`ReportSource`] fed by a quadrant board on a serial port.
//!
//! A background thread reads the port, frames lines, decodes them into
//! [`Report`]s and stores them in a thread-safe buffer. The owner drains the
//! buffer whenever it likes, which stands in for polling "bytes available".

use crate::line_framer::LineFramer;
use crate::report_source::{push_capped, ReportSource};
use crate::telemetry::{decode_line, Report};

use log::{debug, info, warn};
use serial2::SerialPort;
use std::{
    collections::VecDeque,
    io::{self, Read},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc, Mutex,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

/// Baud rate the boards ship with.
pub const DEFAULT_BAUD: u32 = 115200;

/// How long a single read may block before we check for a stop signal.
const READ_TIMEOUT: Duration = Duration::from_millis(25);

enum Signal {
    Stop,
}

/// A serial-connected quadrant board.
pub struct Quadrant {
    name: String,
    handle: Option<JoinHandle<()>>,
    tx: mpsc::Sender<Signal>,
    reports: Arc<Mutex<VecDeque<Report>>>,
    connected: Arc<AtomicBool>,
}

impl Quadrant {
    /// Open the serial device at `path` and start reading from it.
    pub fn open(path: impl AsRef<Path>, baud_rate: u32) -> io::Result<Self> {
        let path = path.as_ref();
        let mut port = SerialPort::open(path, baud_rate)?;
        port.set_read_timeout(READ_TIMEOUT)?;
        info!("opened {} at {} baud", path.display(), baud_rate);
        Ok(Self::from_reader(path.to_string_lossy(), port))
    }

    /// Start reading reports from anything [`Read`]able. The thread ends at
    /// end of stream, on a hard io error, or when [`ReportSource::stop`] is
    /// called.
    pub fn from_reader<R>(name: impl Into<String>, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let name = name.into();
        let (tx, rx) = mpsc::channel::<Signal>();
        let reports = Arc::new(Mutex::new(VecDeque::new()));
        let connected = Arc::new(AtomicBool::new(true));

        let th_reports = Arc::clone(&reports);
        let th_connected = Arc::clone(&connected);
        let th_name = name.clone();
        let handle = thread::spawn(move || {
            read_reports(&th_name, reader, rx, &th_reports);
            th_connected.store(false, Ordering::SeqCst);
        });

        Quadrant {
            name,
            handle: Some(handle),
            tx,
            reports,
            connected,
        }
    }

    /// Name of the device, for titles and log lines.
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn read_reports<R: Read>(
    name: &str,
    mut reader: R,
    rx: mpsc::Receiver<Signal>,
    reports: &Mutex<VecDeque<Report>>,
) {
    let mut buffer = [0; 256];
    let mut framer = LineFramer::new();

    loop {
        if let Ok(Signal::Stop) = rx.try_recv() {
            debug!("{}: reader stopping", name);
            break;
        }

        let read_len = match reader.read(&mut buffer) {
            Ok(0) => {
                info!("{}: end of stream", name);
                break;
            }
            Ok(n) => n,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut
                        | io::ErrorKind::WouldBlock
                        | io::ErrorKind::Interrupted
                ) =>
            {
                continue
            }
            Err(e) => {
                warn!("{}: device disconnected: {}", name, e);
                break;
            }
        };

        for line in framer.push(&buffer[..read_len]) {
            match decode_line(&line) {
                Ok(Some(report)) => {
                    if push_capped(&mut reports.lock().unwrap(), report) {
                        debug!("{}: queue full, dropped the oldest report", name);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("{}: dropped line: {}", name, e),
            }
        }
    }
}

impl Iterator for Quadrant {
    type Item = Report;

    fn next(&mut self) -> Option<Self::Item> {
        self.reports.lock().unwrap().pop_front()
    }
}

impl ReportSource for Quadrant {
    fn clear(&mut self) {
        self.reports.lock().unwrap().clear();
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn stop(&mut self) {
        // The reader may already be gone, in which case nobody is listening.
        let _ = self.tx.send(Signal::Stop);
        if let Some(thread) = self.handle.take() {
            if thread.join().is_err() {
                warn!("{}: reader thread panicked", self.name);
            }
        }
    }
}

impl Drop for Quadrant {
    fn drop(&mut self) {
        self.stop();
    }
}
