//! Notifications emitted alongside successful ledger operations.

use serde::{Deserialize, Serialize};

use tokenpad_types::{Address, Amount};

/// A structured record of a state change, observable by external
/// collaborators and decoupled from the operation's return value.
///
/// Mint and burn are modeled as transfers from/to [`Address::NULL`],
/// matching standard ledger semantics for external observers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    OwnershipChanged {
        previous: Address,
        new: Address,
    },
}

/// Append-only log of notifications in emission order.
///
/// State mutation always completes before a notification is recorded, so
/// an observer never sees a notification for a change that did not commit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notification.
    pub fn record(&mut self, notification: Notification) {
        self.entries.push(notification);
    }

    /// All notifications recorded so far, oldest first.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Entries at or after `start` — used for incremental display.
    pub fn since(&self, start: usize) -> &[Notification] {
        self.entries.get(start..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn record_preserves_emission_order() {
        let mut log = NotificationLog::new();
        let first = Notification::Approval {
            owner: addr(1),
            spender: addr(2),
            amount: Amount::new(7),
        };
        let second = Notification::Transfer {
            from: addr(1),
            to: addr(3),
            amount: Amount::new(4),
        };
        log.record(first.clone());
        log.record(second.clone());

        assert_eq!(log.entries(), &[first, second]);
    }

    #[test]
    fn since_returns_the_tail() {
        let mut log = NotificationLog::new();
        for n in 1..=3u8 {
            log.record(Notification::OwnershipChanged {
                previous: addr(n),
                new: addr(n + 1),
            });
        }

        assert_eq!(log.since(2).len(), 1);
        assert!(log.since(3).is_empty());
        assert!(log.since(100).is_empty());
    }

    #[test]
    fn json_roundtrip() {
        let mut log = NotificationLog::new();
        log.record(Notification::Transfer {
            from: Address::NULL,
            to: addr(2),
            amount: Amount::new(1000),
        });

        let encoded = serde_json::to_string(&log).unwrap();
        let decoded: NotificationLog = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.entries(), log.entries());
    }
}
