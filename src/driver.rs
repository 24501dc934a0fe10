// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The animation loop.  A Driver waits for its Ticker, asks the
//! session for one batch, and hands the freshly painted buffer to a
//! FrameSink, over and over until the ticker says stop or the session
//! stops running.  Everything happens on the calling thread; the only
//! thing that crosses threads is the stop signal.

use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, info};
use rand::Rng;

use crate::error::ChaosError;
use crate::raster::Raster;
use crate::session::Session;

/// What a ticker has to say when asked for the next tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Produce one more batch.
    Fire,
    /// Stop the run.
    Cancelled,
}

/// Decides when the next batch happens.  Blocking is allowed.
pub trait Ticker {
    /// Wait for, and report, the next tick.
    fn next_tick(&mut self) -> Tick;
}

/// Fires a fixed number of times with no delay, then cancels.
#[derive(Copy, Clone, Debug)]
pub struct FixedTicks(pub u64);

impl Ticker for FixedTicks {
    fn next_tick(&mut self) -> Tick {
        if self.0 == 0 {
            return Tick::Cancelled;
        }
        self.0 -= 1;
        Tick::Fire
    }
}

/// Fires once per interval of wall-clock time until a stop signal
/// arrives or an optional tick limit runs out.  A stop signal cuts the
/// current wait short.
pub struct IntervalTicker {
    interval: Duration,
    stop: Receiver<()>,
    limit: Option<u64>,
}

/// Cancels the IntervalTicker it was made with.  Can be cloned and
/// sent to other threads.
#[derive(Clone, Debug)]
pub struct StopHandle(Sender<()>);

impl StopHandle {
    /// Ask the ticker to cancel at its next opportunity.  Asking twice
    /// is the same as asking once.
    pub fn stop(&self) {
        let _ = self.0.try_send(());
    }
}

impl IntervalTicker {
    /// A ticker with no limit, and the handle that stops it.
    pub fn new(interval: Duration) -> (Self, StopHandle) {
        let (sender, receiver) = bounded(1);
        let ticker = IntervalTicker {
            interval,
            stop: receiver,
            limit: None,
        };
        (ticker, StopHandle(sender))
    }

    /// Cancel by itself after `ticks` ticks.
    pub fn with_limit(mut self, ticks: u64) -> Self {
        self.limit = Some(ticks);
        self
    }
}

impl Ticker for IntervalTicker {
    fn next_tick(&mut self) -> Tick {
        if self.limit == Some(0) {
            return Tick::Cancelled;
        }
        match self.stop.recv_timeout(self.interval) {
            Ok(()) => return Tick::Cancelled,
            Err(RecvTimeoutError::Timeout) => {}
            // Nobody is left to stop us; keep time without them.
            Err(RecvTimeoutError::Disconnected) => thread::sleep(self.interval),
        }
        if let Some(remaining) = self.limit.as_mut() {
            *remaining -= 1;
        }
        Tick::Fire
    }
}

/// Whoever displays the frames.  Called once with the freshly started
/// buffer and then once per batch, never per point.
pub trait FrameSink {
    /// Show `frame`, which now holds `points` generated points.
    fn present(&mut self, frame: &Raster, points: u64) -> Result<(), failure::Error>;
}

impl<F> FrameSink for F
where
    F: FnMut(&Raster, u64) -> Result<(), failure::Error>,
{
    fn present(&mut self, frame: &Raster, points: u64) -> Result<(), failure::Error> {
        self(frame, points)
    }
}

/// Runs a started session against a ticker.
pub struct Driver<T: Ticker> {
    ticker: T,
    batch: usize,
}

impl<T: Ticker> Driver<T> {
    /// Constructor.  `batch` points are produced on each tick.
    pub fn new(ticker: T, batch: usize) -> Self {
        Driver { ticker, batch }
    }

    /// Animate `session` until the ticker cancels, which also stops the
    /// session.  The session must already be running.  Returns the
    /// number of batches produced.
    pub fn run<R: Rng, S: FrameSink>(
        &mut self,
        session: &mut Session<R>,
        sink: &mut S,
    ) -> Result<u64, failure::Error> {
        if !session.is_running() {
            return Err(ChaosError::NotInitialized.into());
        }
        sink.present(session.raster(), session.point_count())?;

        let mut ticks = 0;
        while session.is_running() {
            match self.ticker.next_tick() {
                Tick::Fire => {
                    session.tick(self.batch)?;
                    sink.present(session.raster(), session.point_count())?;
                    ticks += 1;
                    debug!("Tick {}: {} points", ticks, session.point_count());
                }
                Tick::Cancelled => {
                    session.stop();
                }
            }
        }
        info!("Animation ended after {} ticks", ticks);
        Ok(ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn running() -> Session<StdRng> {
        let config = Config {
            width: 64,
            height: 64,
            ..Config::default()
        };
        let mut session = Session::new(config, StdRng::seed_from_u64(21)).unwrap();
        session.start_configured().unwrap();
        session
    }

    #[test]
    fn fixed_ticks_count_exactly() {
        let mut ticker = FixedTicks(2);
        assert_eq!(ticker.next_tick(), Tick::Fire);
        assert_eq!(ticker.next_tick(), Tick::Fire);
        assert_eq!(ticker.next_tick(), Tick::Cancelled);
        assert_eq!(ticker.next_tick(), Tick::Cancelled);
    }

    #[test]
    fn n_ticks_of_b_points_draw_n_times_b() {
        let mut session = running();
        let mut counts = vec![];
        let mut sink = |_: &Raster, points: u64| -> Result<(), failure::Error> {
            counts.push(points);
            Ok(())
        };
        let ticks = Driver::new(FixedTicks(9), 37).run(&mut session, &mut sink).unwrap();
        assert_eq!(ticks, 9);
        assert_eq!(session.point_count(), 9 * 37);
        assert!(!session.is_running());
        assert_eq!(counts, (0..=9).map(|n| n * 37).collect::<Vec<u64>>());
    }

    #[test]
    fn driving_an_idle_session_fails() {
        let mut session = Session::new(Config::default(), StdRng::seed_from_u64(0)).unwrap();
        let mut sink = |_: &Raster, _: u64| -> Result<(), failure::Error> { Ok(()) };
        assert!(Driver::new(FixedTicks(1), 10).run(&mut session, &mut sink).is_err());
    }

    #[test]
    fn sink_failures_end_the_run() {
        let mut session = running();
        let mut sink = |_: &Raster, points: u64| -> Result<(), failure::Error> {
            if points > 0 {
                Err(failure::format_err!("display went away"))
            } else {
                Ok(())
            }
        };
        assert!(Driver::new(FixedTicks(5), 10).run(&mut session, &mut sink).is_err());
        assert_eq!(session.point_count(), 10);
    }

    #[test]
    fn interval_ticker_honors_its_limit() {
        let (ticker, _stop) = IntervalTicker::new(Duration::from_millis(1));
        let mut session = running();
        let mut sink = |_: &Raster, _: u64| -> Result<(), failure::Error> { Ok(()) };
        let ticks = Driver::new(ticker.with_limit(3), 100)
            .run(&mut session, &mut sink)
            .unwrap();
        assert_eq!(ticks, 3);
        assert_eq!(session.point_count(), 300);
    }

    #[test]
    fn stop_handle_cancels_a_waiting_ticker() {
        let (mut ticker, stop) = IntervalTicker::new(Duration::from_secs(60));
        let started = Instant::now();
        stop.stop();
        stop.stop();
        assert_eq!(ticker.next_tick(), Tick::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn stop_from_another_thread_finishes_the_in_flight_batch() {
        let (ticker, stop) = IntervalTicker::new(Duration::from_millis(5));
        let mut session = running();
        let mut sink = move |_: &Raster, points: u64| -> Result<(), failure::Error> {
            if points >= 500 {
                let stop = stop.clone();
                thread::spawn(move || stop.stop()).join().unwrap();
            }
            Ok(())
        };
        let ticks = Driver::new(ticker, 100).run(&mut session, &mut sink).unwrap();
        assert_eq!(ticks, 5);
        assert_eq!(session.point_count(), 500);
        assert!(!session.is_running());
    }
}
