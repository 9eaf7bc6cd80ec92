//! The alert map view: draws every alert once, then keeps exactly one of
//! them highlighted in response to clicks.

use tracing::{debug, info};

use crate::alert::{AlertId, AlertRecord};
use crate::bounds::{compute_bounds, Bounds};
use crate::command::{CommandBatch, MapCommand, MarkerId, PolygonId, PopupId};
use crate::config::MapConfig;
use crate::debug_checks::check_view_integrity;
use crate::error::ViewError;
use crate::timer::{TimerAction, TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Default,
    Selected,
}

/// An input record plus the widget handles drawn for it.
#[derive(Debug)]
pub struct RenderedAlert {
    pub record: AlertRecord,
    pub polygons: Vec<PolygonId>,
    pub marker: Option<MarkerId>,
    pub popup: Option<PopupId>,
    pub appearance: Appearance,
}

#[derive(Debug, Default)]
struct HandleAllocator {
    polygons: u32,
    markers: u32,
    popups: u32,
}

impl HandleAllocator {
    fn polygon(&mut self) -> PolygonId {
        self.polygons += 1;
        PolygonId(self.polygons - 1)
    }

    fn marker(&mut self) -> MarkerId {
        self.markers += 1;
        MarkerId(self.markers - 1)
    }

    fn popup(&mut self) -> PopupId {
        self.popups += 1;
        PopupId(self.popups - 1)
    }
}

pub struct AlertMapView {
    config: MapConfig,
    alerts: Vec<RenderedAlert>,
    selected: Option<AlertId>,
    bounds: Bounds,
    timers: TimerQueue,
    auto_select: Option<TimerId>,
    handles: HandleAllocator,
    commands: CommandBatch,
    set_up: bool,
}

impl Default for AlertMapView {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl AlertMapView {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            alerts: Vec::new(),
            selected: None,
            bounds: Bounds::new(),
            timers: TimerQueue::new(),
            auto_select: None,
            handles: HandleAllocator::default(),
            commands: CommandBatch::new(),
            set_up: false,
        }
    }

    /// Create the map inside `container` and draw every alert in order.
    ///
    /// `None` means the host could not find the container element; nothing
    /// happens in that case.
    pub fn setup(&mut self, container: Option<&str>, alerts: Vec<AlertRecord>) -> Result<(), ViewError> {
        let Some(container_id) = container else {
            debug!("map container missing, skipping setup");
            return Ok(());
        };
        if self.set_up {
            return Err(ViewError::AlreadySetUp);
        }
        self.set_up = true;

        self.commands.push(MapCommand::SizeContainer {
            container_id: container_id.to_string(),
            width_px: self.config.width_px,
            height_px: self.config.height_px,
        });
        self.commands.push(MapCommand::CreateMap {
            container_id: container_id.to_string(),
            center: self.config.center,
            zoom: self.config.zoom,
            map_type: self.config.map_type,
            map_type_control: self.config.map_type_control,
            scale_control: self.config.scale_control,
            navigation_control: self.config.navigation_control,
            navigation_style: self.config.navigation_style,
        });

        for (index, record) in alerts.into_iter().enumerate() {
            let rendered = self.draw_alert(AlertId(index as u32), record);
            self.alerts.push(rendered);
        }

        if let Some((south_west, north_east)) = self.bounds.corners() {
            self.commands.push(MapCommand::FitBounds {
                south_west,
                north_east,
            });
        }

        // A single-result view opens its lone popup without waiting for a click.
        if self.alerts.len() == 1 && self.alerts[0].marker.is_some() {
            let delay_ms = self.config.auto_select_delay_ms;
            let timer = self
                .timers
                .schedule(delay_ms, TimerAction::SelectAlert(AlertId(0)));
            self.commands.push(MapCommand::ScheduleTimer { timer, delay_ms });
            self.auto_select = Some(timer);
            debug!(%timer, delay_ms, "auto-select scheduled");
        }

        info!(
            alerts = self.alerts.len(),
            points = self.bounds.points_seen(),
            "alert map set up"
        );
        check_view_integrity(self);
        Ok(())
    }

    fn draw_alert(&mut self, id: AlertId, record: AlertRecord) -> RenderedAlert {
        let mut polygons = Vec::new();
        for path in record.polygons.iter().flatten() {
            for point in path {
                compute_bounds(&mut self.bounds, *point);
            }
            if path.is_empty() {
                continue;
            }
            let polygon = self.handles.polygon();
            self.commands.push(MapCommand::CreatePolygon {
                polygon,
                alert: id,
                path: path.clone(),
                style: self.config.polygon_style.clone(),
            });
            polygons.push(polygon);
        }

        let mut marker = None;
        if let Some(centroid) = record.centroid {
            compute_bounds(&mut self.bounds, centroid);
            let handle = self.handles.marker();
            self.commands.push(MapCommand::CreateMarker {
                marker: handle,
                alert: id,
                position: centroid,
            });
            if record.info_content().is_some() {
                self.commands.push(MapCommand::ListenMarkerClick {
                    marker: handle,
                    alert: id,
                });
            }
            marker = Some(handle);
        }

        RenderedAlert {
            record,
            polygons,
            marker,
            popup: None,
            appearance: Appearance::Default,
        }
    }

    /// Make `id` the highlighted alert, restoring whichever alert held the
    /// highlight before.
    ///
    /// Selecting the alert that is already selected runs the full sequence
    /// again, so its popup is closed and reopened.
    pub fn select(&mut self, id: AlertId) -> Result<(), ViewError> {
        if id.index() >= self.alerts.len() {
            return Err(ViewError::UnknownAlert(id));
        }

        if let Some(previous) = self.selected {
            self.deselect(previous);
        }
        self.selected = Some(id);

        let alert = &mut self.alerts[id.index()];
        for &polygon in &alert.polygons {
            self.commands.push(MapCommand::SetPolygonStyle {
                polygon,
                style: self.config.selected_polygon_style.clone(),
            });
        }
        if let Some(marker) = alert.marker {
            self.commands.push(MapCommand::SetMarkerStyle {
                marker,
                style: self.config.selected_marker_style.clone(),
            });
        }
        alert.appearance = Appearance::Selected;

        match (alert.record.info_content(), alert.marker) {
            (Some(content), Some(marker)) => {
                let popup = self.handles.popup();
                self.commands.push(MapCommand::OpenPopup {
                    popup,
                    marker,
                    content: content.to_string(),
                });
                alert.popup = Some(popup);
            }
            (Some(_), None) => debug!(alert = %id, "popup content without a marker to anchor it"),
            _ => {}
        }

        info!(alert = %id, "alert selected");
        check_view_integrity(self);
        Ok(())
    }

    fn deselect(&mut self, id: AlertId) {
        let alert = &mut self.alerts[id.index()];
        if let Some(popup) = alert.popup.take() {
            self.commands.push(MapCommand::ClosePopup { popup });
        }
        for &polygon in &alert.polygons {
            self.commands.push(MapCommand::SetPolygonStyle {
                polygon,
                style: self.config.polygon_style.clone(),
            });
        }
        if let Some(marker) = alert.marker {
            self.commands.push(MapCommand::SetMarkerStyle {
                marker,
                style: self.config.marker_style.clone(),
            });
        }
        alert.appearance = Appearance::Default;
        debug!(alert = %id, "alert deselected");
    }

    /// Deliver an elapsed timer reported by the host.
    pub fn timer_fired(&mut self, timer: TimerId) -> Result<(), ViewError> {
        if self.auto_select == Some(timer) {
            self.auto_select = None;
        }
        match self.timers.fire(timer)? {
            Some(TimerAction::SelectAlert(alert)) => {
                debug!(%timer, alert = %alert, "timer fired");
                self.select(alert)
            }
            None => {
                debug!(%timer, "ignoring cancelled timer");
                Ok(())
            }
        }
    }

    /// Cancel the pending lone-alert selection. Returns false when nothing
    /// was pending.
    pub fn cancel_auto_select(&mut self) -> bool {
        let Some(timer) = self.auto_select.take() else {
            return false;
        };
        if !self.timers.cancel(timer) {
            return false;
        }
        self.commands.push(MapCommand::CancelTimer { timer });
        debug!(%timer, "auto-select cancelled");
        true
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn is_set_up(&self) -> bool {
        self.set_up
    }

    pub fn selected(&self) -> Option<AlertId> {
        self.selected
    }

    pub fn alerts(&self) -> &[RenderedAlert] {
        &self.alerts
    }

    pub fn alert(&self, id: AlertId) -> Option<&RenderedAlert> {
        self.alerts.get(id.index())
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn auto_select_timer(&self) -> Option<TimerId> {
        self.auto_select
    }

    pub fn commands(&self) -> &CommandBatch {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandBatch {
        &mut self.commands
    }

    pub fn take_commands(&mut self) -> Vec<MapCommand> {
        self.commands.take()
    }
}
