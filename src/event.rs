use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, KeyEvent};
use log::{debug, warn};

pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick(Instant),
}

/// Terminal input plus a fixed-rate clock, delivered on one channel so the
/// main loop handles them one at a time.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut next_tick = Instant::now() + tick_rate;
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                match event::poll(timeout) {
                    Ok(true) => {
                        let forwarded = match event::read() {
                            Ok(event::Event::Key(key)) => Some(Event::Key(key)),
                            Ok(event::Event::Resize(w, h)) => Some(Event::Resize(w, h)),
                            Ok(_) => None,
                            Err(e) => {
                                warn!("reading terminal event: {e}");
                                None
                            }
                        };
                        if let Some(ev) = forwarded {
                            if tx.send(ev).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(e) => warn!("polling terminal events: {e}"),
                }

                let now = Instant::now();
                if now >= next_tick {
                    if tx.send(Event::Tick(now)).is_err() {
                        return;
                    }
                    next_tick += tick_rate;
                    // Overran by more than a period: skip the missed ticks.
                    if next_tick <= now {
                        debug!("tick overrun by {:?}", now - next_tick);
                        next_tick = now + tick_rate;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<Event> {
        self.rx.recv().context("event thread stopped")
    }
}
