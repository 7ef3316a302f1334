use log::debug;

use crate::config::Timings;
use crate::signal::{Schedule, Task};
use crate::surface::PresentationSurface;

/// The loading screen shown until the page has loaded.
pub struct Splash<N> {
    node: Option<N>,
    hide_ms: u32,
    removal_ms: u32,
}

impl<N: Clone> Splash<N> {
    pub fn discover<S>(surface: &S, timings: &Timings) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        Self {
            node: surface.find_by_id("loadingScreen"),
            hide_ms: timings.splash_hide,
            removal_ms: timings.splash_removal,
        }
    }

    pub fn on_load(&self, schedule: &mut Schedule<N>) {
        if self.node.is_some() {
            schedule.after(self.hide_ms, Task::HideSplash);
        }
    }

    /// Starts the fade-out and queues the node's removal once it is done.
    pub fn hide<S>(&mut self, surface: &S, schedule: &mut Schedule<N>)
    where
        S: PresentationSurface<Node = N>,
    {
        let Some(node) = self.node.take() else {
            return;
        };
        debug!("Hiding loading screen");
        surface.toggle_class(&node, "hidden", true);
        schedule.after(self.removal_ms, Task::RemoveNode(node));
    }
}
