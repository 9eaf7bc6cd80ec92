//! Log output for the module.
//!
//! Events are formatted by `tracing-subscriber` and each finished line is
//! handed to the host page, which decides where it ends up (usually the
//! browser console). Native builds write to stderr instead.

use std::io;
use std::sync::Once;

use tracing::Level;

static INIT: Once = Once::new();

#[cfg(target_arch = "wasm32")]
extern "C" {
    fn alert_map_host_log(ptr: *const u8, len: usize);
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logger(level: Level) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .without_time()
            .with_writer(HostLog::default)
            .try_init();
    });
}

/// Buffers one formatted event and emits it as a single line.
#[derive(Default)]
pub struct HostLog {
    line: Vec<u8>,
}

impl io::Write for HostLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        while self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        if !self.line.is_empty() {
            emit(&self.line);
            self.line.clear();
        }
        Ok(())
    }
}

impl Drop for HostLog {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &[u8]) {
    // SAFETY: the host copies the bytes out before returning.
    unsafe { alert_map_host_log(line.as_ptr(), line.len()) }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &[u8]) {
    eprintln!("{}", String::from_utf8_lossy(line));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flush_clears_the_pending_line() {
        let mut log = HostLog::default();
        log.write_all(b" INFO alert map set up\n").unwrap();
        log.flush().unwrap();
        assert!(log.line.is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        init_logger(Level::DEBUG);
        init_logger(Level::TRACE);
        tracing::debug!("logger ready");
    }
}
