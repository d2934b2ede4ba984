//! A fake quadrant board, handy for trying the monitor without hardware.

use crate::report_source::{push_capped, ReportSource};
use crate::telemetry::{Lidar, ParamChannel, Report, N_LIDAR};
use rand::prelude::*;
use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc, Mutex,
};
use std::thread;
use std::time::{Duration, Instant};

/// A [`ReportSource`] that makes up reports on a background thread: a
/// random walk over distances and parameters, with the odd hit or swipe.
pub struct DummyQuadrant {
    handle: Option<thread::JoinHandle<()>>,
    tx: mpsc::Sender<Signal>,
    msgs: Arc<Mutex<VecDeque<Report>>>,
    running: Arc<AtomicBool>,
}

enum Signal {
    Stop,
}

/// Board state that the random walk moves around.
#[derive(Debug, Clone)]
struct Walk {
    ts: i64,
    dists: [f64; N_LIDAR],
    params: [f64; 4],
}

impl Default for Walk {
    fn default() -> Self {
        Walk {
            ts: 0,
            dists: [400.0; N_LIDAR],
            params: [0.5, 0.0, 0.0, 0.0],
        }
    }
}

impl DummyQuadrant {
    /// Start producing reports at `rate` reports per second.
    pub fn new(rate: f64) -> Self {
        let (tx, rx) = mpsc::channel::<Signal>();
        let msgs = Arc::new(Mutex::new(VecDeque::new()));
        let running = Arc::new(AtomicBool::new(true));
        let th_msgs = Arc::clone(&msgs);
        let th_running = Arc::clone(&running);

        let handle = thread::spawn(move || {
            let mut rng = thread_rng();
            let mut walk = Walk::default();
            let period = Duration::from_secs_f64(1.0 / rate.max(1.0));
            let start = Instant::now();
            loop {
                match rx.try_recv() {
                    Ok(Signal::Stop) | Err(mpsc::TryRecvError::Disconnected) => break,
                    Err(mpsc::TryRecvError::Empty) => {}
                }
                walk.ts = start.elapsed().as_micros() as i64;
                let report = step(&mut walk, &mut rng);
                push_capped(&mut th_msgs.lock().unwrap(), report);
                thread::sleep(period);
            }
            th_running.store(false, Ordering::SeqCst);
        });

        DummyQuadrant {
            handle: Some(handle),
            tx,
            msgs,
            running,
        }
    }
}

impl Iterator for DummyQuadrant {
    type Item = Report;
    fn next(&mut self) -> Option<Self::Item> {
        self.msgs.lock().unwrap().pop_front()
    }
}

impl ReportSource for DummyQuadrant {
    fn clear(&mut self) {
        self.msgs.lock().unwrap().clear();
    }

    fn is_connected(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn stop(&mut self) {
        let _ = self.tx.send(Signal::Stop);
        if let Some(thread) = self.handle.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for DummyQuadrant {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Advance the walk by one report. Distances wander in `[0, 512]`, a channel
/// counts as engaged when something is closer than 300. Elevation stays in
/// `[0, 1]`, the rest in `[-1, 1]`.
fn step<R: Rng>(walk: &mut Walk, rng: &mut R) -> Report {
    for d in walk.dists.iter_mut() {
        *d = (*d + rng.gen_range(-20.0..20.0)).clamp(0.0, 512.0);
    }
    for (i, p) in walk.params.iter_mut().enumerate() {
        let lo = if i == 0 { 0.0 } else { -1.0 };
        *p = (*p + rng.gen_range(-0.05..0.05)).clamp(lo, 1.0);
    }

    let lidar = |i: usize| {
        Some(Lidar {
            dist: Some(walk.dists[i].round()),
            en: walk.dists[i] < 300.0,
        })
    };
    let engaged = walk.dists.iter().any(|&d| d < 300.0);
    let param = |i: usize| {
        Some(ParamChannel {
            val: Some(walk.params[i]),
            en: engaged,
        })
    };

    let mut events = Vec::new();
    if rng.gen_bool(0.02) {
        events.push(format!("hit{}", rng.gen_range(0..N_LIDAR)));
    }
    if rng.gen_bool(0.005) {
        events.push(if rng.gen() { "swl" } else { "swr" }.to_string());
    }

    Report {
        ts: Some(walk.ts),
        l0: lidar(0),
        l1: lidar(1),
        l2: lidar(2),
        l3: lidar(3),
        elevation: param(0),
        pitch: param(1),
        roll: param(2),
        arc: param(3),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_source::MAX_QUEUED;
    use crate::telemetry::{BoardEvent, Parameter};
    use rand::rngs::StdRng;

    #[test]
    fn walk_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut walk = Walk::default();
        for _ in 0..2000 {
            let report = step(&mut walk, &mut rng);
            for i in 0..N_LIDAR {
                let d = report.require_dist(i).unwrap();
                assert!((0.0..=512.0).contains(&d));
                assert_eq!(report.lidar(i).unwrap().en, walk.dists[i] < 300.0);
            }
            let elv = report.require_val(Parameter::Elevation).unwrap();
            assert!((0.0..=1.0).contains(&elv));
            let roll = report.require_val(Parameter::Roll).unwrap();
            assert!((-1.0..=1.0).contains(&roll));
            assert_eq!(report.board_events().count(), report.events.len());
            assert!(report
                .board_events()
                .all(|e| !matches!(e, BoardEvent::Hit(n) if n >= N_LIDAR)));
        }
    }

    #[test]
    fn produces_and_stops() {
        let mut dq = DummyQuadrant::new(1000.0);
        let start = Instant::now();
        let mut got = None;
        while got.is_none() && start.elapsed() < Duration::from_secs(5) {
            got = dq.next();
            thread::sleep(Duration::from_millis(1));
        }
        assert!(got.is_some());
        dq.stop();
        assert!(!dq.is_connected());
        dq.clear();
        assert!(dq.next().is_none());
    }

    #[test]
    fn paused_consumer_does_not_grow_the_queue() {
        let mut dq = DummyQuadrant::new(1_000_000.0);
        let queued = |dq: &DummyQuadrant| dq.msgs.lock().unwrap().len();
        let start = Instant::now();
        while queued(&dq) < MAX_QUEUED {
            assert!(start.elapsed() < Duration::from_secs(30), "queue never filled");
            thread::sleep(Duration::from_millis(5));
        }
        thread::sleep(Duration::from_millis(50));
        assert_eq!(queued(&dq), MAX_QUEUED);
        dq.stop();
    }
}
