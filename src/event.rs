use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::{mpsc, watch};

use crate::config::MAX_INTERVAL_SECS;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Multiplexes terminal input with the sampling tick.
///
/// The tick period can be changed while running; the new period starts
/// counting from the moment it is set.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    rate_tx: watch::Sender<Duration>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let (rate_tx, mut rate_rx) = watch::channel(tick_rate);

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut tick_interval = new_interval(tick_rate);

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    changed = rate_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let rate = *rate_rx.borrow_and_update();
                        tick_interval = new_interval(rate);
                    }
                }
            }
        });

        Self {
            rx,
            rate_tx,
            _task: task,
        }
    }

    pub fn set_tick_rate(&self, tick_rate: Duration) {
        self.rate_tx.send_if_modified(|current| {
            if *current == tick_rate {
                false
            } else {
                *current = tick_rate;
                true
            }
        });
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

// First tick one full period from now, not immediately.
fn new_interval(period: Duration) -> tokio::time::Interval {
    let period = period.min(Duration::from_secs(MAX_INTERVAL_SECS));
    let start = tokio::time::Instant::now() + period;
    let mut interval = tokio::time::interval_at(start, period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn huge_period_is_capped_instead_of_overflowing() {
        let interval = new_interval(Duration::from_secs(u64::MAX / 2));
        assert_eq!(interval.period(), Duration::from_secs(MAX_INTERVAL_SECS));
    }

    #[tokio::test]
    async fn ordinary_period_is_kept() {
        let interval = new_interval(Duration::from_secs(2));
        assert_eq!(interval.period(), Duration::from_secs(2));
    }
}
