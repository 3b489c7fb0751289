//! Map view controller
//!
//! Thin adapter around a [`MapWidget`]. It re-centers the widget on
//! command, reports the viewport when the user stops panning or zooming,
//! and recalculates the widget size once the surrounding layout has
//! settled.

pub mod headless;

use crate::coord::{Coordinates, MapViewport};
use crate::poster::ViewCommand;
use crate::timer::{TimerEvent, TimerId, TimerQueue};
use std::time::Duration;
use tracing::debug;

pub use headless::HeadlessMap;

/// The interactive map being wrapped
pub trait MapWidget {
    /// Center the map at `center` with `zoom`
    fn set_view(&mut self, center: Coordinates, zoom: u8);

    /// Center, zoom and visible bounds as the widget currently reports them
    fn viewport(&self) -> MapViewport;

    /// The layout gave the container a new size. Widgets keep their old
    /// size until [`MapWidget::invalidate_size`].
    fn resize_container(&mut self, width: u32, height: u32);

    /// Re-read the container size
    fn invalidate_size(&mut self);
}

/// Controller owning the widget
#[derive(Debug)]
pub struct MapView<W> {
    widget: W,
    resize_delay: Duration,
    pending_resize: Option<TimerId>,
}

impl<W: MapWidget> MapView<W> {
    /// Take over `widget` and center it at the initial view
    pub fn mount(mut widget: W, center: Coordinates, zoom: u8, resize_delay: Duration) -> Self {
        widget.set_view(center, zoom);
        Self {
            widget,
            resize_delay,
            pending_resize: None,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Direct access for user-driven interaction (drag, scroll)
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn viewport(&self) -> MapViewport {
        self.widget.viewport()
    }

    /// The user finished dragging
    pub fn on_move_end(&self) -> MapViewport {
        self.widget.viewport()
    }

    /// The user finished zooming
    pub fn on_zoom_end(&self) -> MapViewport {
        self.widget.viewport()
    }

    pub fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::SetView { center, zoom } => {
                debug!(%center, zoom, "map set view");
                self.widget.set_view(center, zoom);
            }
        }
    }

    /// The container's shape changed (e.g. a new paper size)
    ///
    /// The widget is resized after `resize_delay`; a second change inside
    /// that window restarts the wait.
    pub fn on_container_resized(&mut self, timers: &mut TimerQueue<TimerEvent>) {
        if let Some(id) = self.pending_resize.take() {
            timers.cancel(id);
        }
        self.pending_resize = Some(timers.schedule(self.resize_delay, TimerEvent::Resize));
    }

    /// The resize delay elapsed
    pub fn on_resize_elapsed(&mut self) {
        self.pending_resize = None;
        self.widget.invalidate_size();
    }

    pub fn resize_pending(&self) -> bool {
        self.pending_resize.is_some()
    }
}
