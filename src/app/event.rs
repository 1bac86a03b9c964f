//! Terminal event abstraction.
//!
//! Crossterm events are forwarded over a channel by a background task so
//! the main loop can `select!` on them without blocking.  When the
//! terminal is quiet the task emits [`AppEvent::Frame`] at the configured
//! interval, which is what keeps the ring animating while idle.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application loop.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Animation heartbeat — no input arrived within one frame interval.
    Frame,
}

/// Spawn the background reader task and return its channel.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let has_event = event::poll(frame_interval).unwrap_or(false);
            let app_event = if has_event {
                match event::read() {
                    Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                    Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                    Ok(_) => continue,
                    Err(_) => break,
                }
            } else {
                AppEvent::Frame
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped, the app is shutting down
            }
        }
    });

    rx
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// The main loop exits when `recv()` returns `None`.  This pins the
    /// channel behaviour that shutdown path relies on: queued events drain
    /// first, then the closed channel reports `None` instead of hanging.
    #[tokio::test]
    async fn a_dead_sender_drains_then_closes_the_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
        tx.send(AppEvent::Frame).expect("send on open channel");
        drop(tx);

        assert!(matches!(rx.recv().await, Some(AppEvent::Frame)));
        assert!(rx.recv().await.is_none());
    }
}
