//! Out-of-space notifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use webquota_core::provider::OutOfSpaceNotifier;

/// Emits a warning event; the host's subscriber decides where it goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl OutOfSpaceNotifier for LoggingNotifier {
    fn notify_out_of_space(&self) {
        #[cfg(feature = "tracing")]
        tracing::warn!("web storage is full; free space by clearing site data");
    }
}

/// Counts how many times it fired.
#[derive(Debug, Default)]
pub struct CountingNotifier {
    fired: AtomicU64,
}

impl CountingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.fired.load(Ordering::Acquire)
    }
}

impl OutOfSpaceNotifier for CountingNotifier {
    fn notify_out_of_space(&self) {
        self.fired.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_notifier_counts() {
        let n = CountingNotifier::new();
        n.notify_out_of_space();
        n.notify_out_of_space();
        assert_eq!(n.count(), 2);
    }
}
