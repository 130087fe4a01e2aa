use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Transient user-facing messages. Each one disappears on its own after the
/// configured time; several can be pending at once.
#[derive(Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    notices: VecDeque<(String, Instant)>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            notices: VecDeque::new(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(message, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, now: Instant) {
        self.notices.push_back((message.into(), now + self.ttl));
    }

    /// Drop every notice whose time is up.
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|(_, expires)| *expires > now);
    }

    /// Newest notice still showing at `now`, and how many others are.
    pub fn latest(&self, now: Instant) -> Option<(&str, usize)> {
        let mut live = self.notices.iter().filter(|(_, expires)| *expires > now);
        let count = live.clone().count();
        live.next_back().map(|(msg, _)| (msg.as_str(), count - 1))
    }
}
