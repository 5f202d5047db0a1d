/// Frustum visibility monitor.
///
/// Once per frame the monitor rebuilds a camera's frustum from scratch, tests
/// a target's world bounding volume against it and reports edge-triggered
/// transitions. The stored state is always the result of the latest test.

use crate::camera::{Camera, Frustum};
use crate::events::{Subscribers, SubscriptionId};
use crate::scene::{Bounded, BoundingVolume};
use crate::engine_info;

/// Whether the target intersects the monitored frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    NotVisible,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible { Visibility::Visible } else { Visibility::NotVisible }
    }
}

/// Emitted when the visibility state flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityTransition {
    /// State after the transition
    pub visibility: Visibility,
    /// Tick that observed the change (first tick is 1)
    pub tick: u64,
}

impl VisibilityTransition {
    pub fn visible(&self) -> bool {
        self.visibility.is_visible()
    }
}

#[derive(Debug)]
pub struct FrustumVisibilityMonitor {
    state: Visibility,
    ticks: u64,
    subscribers: Subscribers<VisibilityTransition>,
}

impl FrustumVisibilityMonitor {
    /// Create a monitor whose state is the current visibility of `target`.
    ///
    /// No event is emitted for this baseline.
    pub fn new<T: Bounded + ?Sized>(camera: &Camera, target: &T) -> Self {
        let frustum = Self::compute_frustum(camera);
        let visible = Self::check_intersection(&frustum, &target.world_bounding_volume());
        Self {
            state: visible.into(),
            ticks: 0,
            subscribers: Subscribers::new(),
        }
    }

    /// Frustum of `camera` from `projection * view`.
    pub fn compute_frustum(camera: &Camera) -> Frustum {
        Frustum::from_view_projection(&camera.view_projection_matrix())
    }

    /// True if `volume` intersects or lies inside `frustum`.
    pub fn check_intersection(frustum: &Frustum, volume: &BoundingVolume) -> bool {
        frustum.intersects(volume)
    }

    /// Recompute visibility. Returns the transition if the state changed.
    pub fn tick<T: Bounded + ?Sized>(&mut self, camera: &Camera, target: &T) -> Option<VisibilityTransition> {
        self.ticks += 1;
        let frustum = Self::compute_frustum(camera);
        let visibility = Visibility::from(Self::check_intersection(&frustum, &target.world_bounding_volume()));
        if visibility == self.state {
            return None;
        }

        self.state = visibility;
        let transition = VisibilityTransition { visibility, tick: self.ticks };
        engine_info!("fviewer::FrustumMonitor", "Target visibility changed: {}", transition.visible());
        self.subscribers.emit(&transition);
        Some(transition)
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&VisibilityTransition) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Drop every subscription.
    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
