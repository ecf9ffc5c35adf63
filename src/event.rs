use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

pub enum AppEvent {
    Line(String),
    Tick,
    /// Input closed.
    Eof,
}

/// Reads stdin on a background thread and interleaves ticks so a countdown
/// can fire while the prompt waits.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self::from_reader(io::BufReader::new(io::stdin()), tick_rate)
    }

    pub fn from_reader<R: BufRead + Send + 'static>(reader: R, tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(AppEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = tx.send(AppEvent::Eof);
        });

        Self { rx, tick_rate }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        match self.rx.recv_timeout(self.tick_rate) {
            Ok(event) => Ok(event),
            Err(RecvTimeoutError::Timeout) => Ok(AppEvent::Tick),
            Err(RecvTimeoutError::Disconnected) => Ok(AppEvent::Eof),
        }
    }
}
