//! Widget operations recorded for the host to replay.
//!
//! The view never touches the mapping widget. It appends `MapCommand`s to a
//! `CommandBatch`; after every entry point the batch is encoded as a JSON
//! array and the host applies it in order, keeping its own table from the
//! integer handles below to live widget objects.

use serde::Serialize;

use crate::alert::{AlertId, LatLng};
use crate::config::{MapType, MarkerStyle, NavigationStyle, PolygonStyle};
use crate::timer::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PolygonId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PopupId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MapCommand {
    SizeContainer {
        container_id: String,
        width_px: u32,
        height_px: u32,
    },
    CreateMap {
        container_id: String,
        center: LatLng,
        zoom: u8,
        map_type: MapType,
        map_type_control: bool,
        scale_control: bool,
        navigation_control: bool,
        navigation_style: NavigationStyle,
    },
    CreatePolygon {
        polygon: PolygonId,
        alert: AlertId,
        path: Vec<LatLng>,
        style: PolygonStyle,
    },
    CreateMarker {
        marker: MarkerId,
        alert: AlertId,
        position: LatLng,
    },
    /// Host wires a click on `marker` to `alert_map_select(alert)`.
    ListenMarkerClick { marker: MarkerId, alert: AlertId },
    FitBounds { south_west: LatLng, north_east: LatLng },
    /// Host calls `alert_map_timer_fired(timer)` once `delay_ms` elapses.
    ScheduleTimer { timer: TimerId, delay_ms: u32 },
    CancelTimer { timer: TimerId },
    SetPolygonStyle { polygon: PolygonId, style: PolygonStyle },
    SetMarkerStyle { marker: MarkerId, style: MarkerStyle },
    OpenPopup {
        popup: PopupId,
        marker: MarkerId,
        content: String,
    },
    ClosePopup { popup: PopupId },
}

#[derive(Debug, Default)]
pub struct CommandBatch {
    commands: Vec<MapCommand>,
    export_buf: Vec<u8>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: MapCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[MapCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop recorded commands, starting a new batch.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<MapCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Encode the current batch into the export buffer.
    pub fn refresh_export_buf(&mut self) -> Result<(), serde_json::Error> {
        self.export_buf.clear();
        serde_json::to_writer(&mut self.export_buf, &self.commands)
    }

    pub fn export_ptr(&self) -> *const u8 {
        self.export_buf.as_ptr()
    }

    pub fn export_len(&self) -> u32 {
        self.export_buf.len() as u32
    }

    pub fn export_bytes(&self) -> &[u8] {
        &self.export_buf
    }
}
