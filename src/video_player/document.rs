// SPDX-License-Identifier: MPL-2.0
//! Document visibility fan-out.
//!
//! The host owns one [`DocumentVisibilityHub`] per page and publishes
//! visibility changes to it. Each mounted component holds a
//! [`DocumentSubscription`]; dropping the subscription on unmount is all it
//! takes to stop receiving changes.

use std::sync::Arc;
use tokio::sync::watch;

/// Whether the page is currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentVisibility {
    #[default]
    Visible,
    Hidden,
}

impl DocumentVisibility {
    pub fn is_hidden(self) -> bool {
        self == Self::Hidden
    }
}

/// Shared publisher of document visibility.
#[derive(Debug, Clone)]
pub struct DocumentVisibilityHub {
    sender: Arc<watch::Sender<DocumentVisibility>>,
}

impl Default for DocumentVisibilityHub {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisibilityHub {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(DocumentVisibility::Visible);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publishes `visibility`. Subscribers are only notified on change.
    pub fn publish(&self, visibility: DocumentVisibility) {
        self.sender.send_if_modified(|current| {
            if *current == visibility {
                false
            } else {
                *current = visibility;
                true
            }
        });
    }

    pub fn current(&self) -> DocumentVisibility {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> DocumentSubscription {
        DocumentSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// One component's view of the hub.
#[derive(Debug)]
pub struct DocumentSubscription {
    receiver: watch::Receiver<DocumentVisibility>,
}

impl DocumentSubscription {
    /// Returns the latest visibility if it changed since the last poll.
    pub fn poll(&mut self) -> Option<DocumentVisibility> {
        match self.receiver.has_changed() {
            Ok(true) => Some(*self.receiver.borrow_and_update()),
            Ok(false) | Err(_) => None,
        }
    }
}
