use std::future;

use tokio::time::{sleep_until, Duration, Instant};

/// Cancel-and-reschedule timer. Every `poke` pushes the deadline out by the
/// configured delay; `fired` resolves once the deadline passes without a
/// newer poke, then disarms.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn poke(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Arm for an explicit delay, replacing any pending deadline.
    pub fn schedule_in(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending forever while disarmed, so it can sit in a `select!` loop.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => future::pending::<()>().await,
        }
    }
}
