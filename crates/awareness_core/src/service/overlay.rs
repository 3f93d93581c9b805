//! Fixed-position overlay containers for notification rendering.
//!
//! # Responsibility
//! - Get-or-create named overlay containers outside the normal page flow.
//! - Track how many notifications each holder has attached.
//! - Remove a container once it has no holders and no attached children.
//!
//! # Invariants
//! - At most one container exists per id, whatever the call interleaving.
//! - A container with attached children is never removed.
//! - Dropping a lease detaches its children exactly once.

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Container id used by the notification portal.
pub const NOTIFICATION_CONTAINER_ID: &str = "notification-portal";

/// Corner the overlay is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl OverlayPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top-left" => Some(Self::TopLeft),
            "top-right" => Some(Self::TopRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-right" => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Anchor class for the fixed region.
    pub fn anchor_class(self) -> &'static str {
        match self {
            Self::TopLeft => "fixed z-50 max-w-sm top-4 left-4",
            Self::TopRight => "fixed z-50 max-w-sm top-4 right-4",
            Self::BottomLeft => "fixed z-50 max-w-sm bottom-4 left-4",
            Self::BottomRight => "fixed z-50 max-w-sm bottom-4 right-4",
        }
    }
}

#[derive(Debug, Default)]
struct Container {
    /// Attached child count per live lease.
    attached: HashMap<u64, usize>,
}

impl Container {
    fn children(&self) -> usize {
        self.attached.values().sum()
    }
}

#[derive(Debug, Default)]
struct HostState {
    containers: HashMap<String, Container>,
    next_lease: u64,
}

/// Registry of overlay containers shared by every mounted portal.
#[derive(Debug, Default)]
pub struct OverlayHost {
    state: Mutex<HostState>,
}

impl OverlayHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Ensures the container exists and registers a holder on it.
    pub fn acquire(self: &Arc<Self>, container_id: &str) -> OverlayLease {
        let mut state = self.lock();
        let lease_id = state.next_lease;
        state.next_lease += 1;

        let created = !state.containers.contains_key(container_id);
        state
            .containers
            .entry(container_id.to_string())
            .or_default()
            .attached
            .insert(lease_id, 0);
        if created {
            debug!("event=overlay_mount module=overlay status=created container={container_id}");
        }

        OverlayLease {
            host: Arc::clone(self),
            container_id: container_id.to_string(),
            lease_id,
        }
    }

    pub fn contains(&self, container_id: &str) -> bool {
        self.lock().containers.contains_key(container_id)
    }

    pub fn container_count(&self) -> usize {
        self.lock().containers.len()
    }

    /// Total children attached to a container by all holders.
    pub fn children(&self, container_id: &str) -> usize {
        self.lock()
            .containers
            .get(container_id)
            .map_or(0, Container::children)
    }

    fn set_attached(&self, container_id: &str, lease_id: u64, count: usize) {
        let mut state = self.lock();
        state
            .containers
            .entry(container_id.to_string())
            .or_default()
            .attached
            .insert(lease_id, count);
    }

    fn release(&self, container_id: &str, lease_id: u64) {
        let mut state = self.lock();
        let Some(container) = state.containers.get_mut(container_id) else {
            return;
        };
        container.attached.remove(&lease_id);
        // any remaining holder keeps the container, even with zero children
        if container.attached.is_empty() {
            state.containers.remove(container_id);
            debug!("event=overlay_unmount module=overlay status=removed container={container_id}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// One holder's claim on an overlay container.
#[derive(Debug)]
pub struct OverlayLease {
    host: Arc<OverlayHost>,
    container_id: String,
    lease_id: u64,
}

impl OverlayLease {
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Records how many notifications this holder renders into the container.
    pub fn set_attached(&self, count: usize) {
        self.host
            .set_attached(&self.container_id, self.lease_id, count);
    }
}

impl Drop for OverlayLease {
    fn drop(&mut self) {
        self.host.release(&self.container_id, self.lease_id);
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayHost, OverlayPosition, NOTIFICATION_CONTAINER_ID};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn repeated_acquire_shares_one_container() {
        let host = OverlayHost::new();
        let first = host.acquire(NOTIFICATION_CONTAINER_ID);
        let second = host.acquire(NOTIFICATION_CONTAINER_ID);
        assert_eq!(host.container_count(), 1);

        drop(first);
        assert!(host.contains(NOTIFICATION_CONTAINER_ID));
        drop(second);
        assert!(!host.contains(NOTIFICATION_CONTAINER_ID));
    }

    #[test]
    fn concurrent_mounts_never_duplicate_containers() {
        let host = OverlayHost::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let host = Arc::clone(&host);
                thread::spawn(move || {
                    let lease = host.acquire(NOTIFICATION_CONTAINER_ID);
                    assert_eq!(host.container_count(), 1);
                    lease.set_attached(1);
                    lease.set_attached(0);
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("mount thread");
        }
        assert_eq!(host.container_count(), 0);
    }

    #[test]
    fn parses_positions() {
        assert_eq!(
            OverlayPosition::parse(" Bottom-Left "),
            Some(OverlayPosition::BottomLeft)
        );
        assert_eq!(OverlayPosition::parse("center"), None);
        assert_eq!(OverlayPosition::default().as_str(), "top-right");
    }
}
