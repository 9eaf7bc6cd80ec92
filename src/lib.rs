// SAFETY POLICY: Single-threaded WASM execution only
// This code uses UnsafeCell without synchronization.
// DO NOT compile with WASM atomics/threads without adding Mutex protection.
#[cfg(target_feature = "atomics")]
compile_error!("This code is NOT thread-safe. Add Mutex<Host> before enabling atomics.");

pub mod alert;
pub mod bounds;
pub mod command;
pub mod config;
mod debug_checks;
pub mod error;
pub mod logging;
pub mod timer;
pub mod view;

use core::cell::UnsafeCell;
use core::ptr;

use tracing::warn;

pub use alert::{decode_alerts, AlertId, AlertRecord, LatLng};
pub use bounds::{compute_bounds, Bounds};
pub use command::{CommandBatch, MapCommand, MarkerId, PolygonId, PopupId};
pub use config::{MapConfig, MarkerStyle, PolygonStyle};
pub use error::ViewError;
pub use logging::init_logger;
pub use timer::{TimerAction, TimerId, TimerQueue};
pub use view::{AlertMapView, Appearance, RenderedAlert};

/// Everything the page talks to: the view, a scratch buffer the host writes
/// JSON into, and the text of the last failure.
struct Host {
    view: AlertMapView,
    input: Vec<u8>,
    last_error: String,
}

impl Host {
    fn new(config: MapConfig) -> Self {
        Self {
            view: AlertMapView::new(config),
            input: Vec::new(),
            last_error: String::new(),
        }
    }

    fn input(&self, len: u32) -> &[u8] {
        let len = (len as usize).min(self.input.len());
        &self.input[..len]
    }
}

// LOCK POLICY:
// This global is accessed only from single-threaded WASM.
// JavaScript calls all alert_map_* functions from the main thread only,
// either on page load, from a marker click listener, or from a timer.
// SAFETY: UnsafeCell is wrapped in Sync ONLY because we guarantee single-threaded access.
// If Web Workers or WASM threads are used, this MUST be changed to Mutex<Option<Host>>.
struct HostCell {
    inner: UnsafeCell<Option<Host>>,
}

unsafe impl Sync for HostCell {} // Only safe for single-threaded WASM

static HOST: HostCell = HostCell {
    inner: UnsafeCell::new(None),
};

fn host_mut() -> Option<&'static mut Host> {
    unsafe { (*HOST.inner.get()).as_mut() }
}

fn host_ref() -> Option<&'static Host> {
    unsafe { (*HOST.inner.get()).as_ref() }
}

/// Run one entry point: start a fresh command batch, apply `action`, then
/// publish the batch and turn any error into a status code.
fn dispatch(action: impl FnOnce(&mut Host) -> Result<(), ViewError>) -> i32 {
    let Some(host) = host_mut() else {
        return ViewError::NotInitialized.code();
    };
    host.view.commands_mut().clear();

    let code = match action(host) {
        Ok(()) => {
            host.last_error.clear();
            0
        }
        Err(err) => {
            warn!(%err, "alert map call failed");
            host.last_error = err.to_string();
            err.code()
        }
    };

    if let Err(err) = host.view.commands_mut().refresh_export_buf() {
        warn!(%err, "failed to encode map commands");
    }
    code
}

#[no_mangle]
pub extern "C" fn alert_map_init() {
    unsafe {
        *HOST.inner.get() = Some(Host::new(MapConfig::default()));
    }
}

/// Hand the host `len` writable bytes for the next JSON payload.
#[no_mangle]
pub extern "C" fn alert_map_input_reserve(len: u32) -> *mut u8 {
    match host_mut() {
        Some(host) => {
            host.input.clear();
            host.input.resize(len as usize, 0);
            host.input.as_mut_ptr()
        }
        None => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn alert_map_configure(len: u32) -> i32 {
    dispatch(|host| {
        let config = MapConfig::from_json(host.input(len))?;
        init_logger(config.log_level());
        if host.view.is_set_up() {
            return Err(ViewError::AlreadySetUp);
        }
        host.view = AlertMapView::new(config);
        Ok(())
    })
}

#[no_mangle]
pub extern "C" fn alert_map_setup(container_found: u32, len: u32) -> i32 {
    dispatch(|host| {
        init_logger(host.view.config().log_level());
        if container_found == 0 {
            return host.view.setup(None, Vec::new());
        }
        let alerts = decode_alerts(host.input(len))?;
        let container_id = host.view.config().container_id.clone();
        host.view.setup(Some(container_id.as_str()), alerts)
    })
}

#[no_mangle]
pub extern "C" fn alert_map_select(alert: u32) -> i32 {
    dispatch(|host| host.view.select(AlertId(alert)))
}

#[no_mangle]
pub extern "C" fn alert_map_timer_fired(timer: u32) -> i32 {
    dispatch(|host| host.view.timer_fired(TimerId(timer)))
}

/// Returns 1 when a pending auto-select was cancelled, 0 otherwise.
#[no_mangle]
pub extern "C" fn alert_map_cancel_auto_select() -> i32 {
    let mut cancelled = false;
    let code = dispatch(|host| {
        cancelled = host.view.cancel_auto_select();
        Ok(())
    });
    if code < 0 {
        code
    } else {
        cancelled as i32
    }
}

#[no_mangle]
pub extern "C" fn alert_map_selected() -> i32 {
    host_ref()
        .and_then(|host| host.view.selected())
        .map(|id| id.0 as i32)
        .unwrap_or(-1)
}

#[no_mangle]
pub extern "C" fn alert_map_commands_ptr() -> *const u8 {
    host_ref()
        .map(|host| host.view.commands().export_ptr())
        .unwrap_or(ptr::null())
}

#[no_mangle]
pub extern "C" fn alert_map_commands_len() -> u32 {
    host_ref()
        .map(|host| host.view.commands().export_len())
        .unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn alert_map_last_error_ptr() -> *const u8 {
    host_ref()
        .map(|host| host.last_error.as_ptr())
        .unwrap_or(ptr::null())
}

#[no_mangle]
pub extern "C" fn alert_map_last_error_len() -> u32 {
    host_ref()
        .map(|host| host.last_error.len() as u32)
        .unwrap_or(0)
}
