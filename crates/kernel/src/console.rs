//! The global debug console.
//!
//! All diagnostic output of the kernel goes through a single global sink.
//! The architecture layer installs the real output device with
//! [`set_sink`] once it has one; until then every write is discarded,
//! which also keeps host-side unit tests quiet.

use core::fmt;
use spin::{Mutex, MutexGuard};

static CONSOLE: Mutex<Console> = Mutex::new(Console { sink: None });

/// The console state living behind the global lock.
pub struct Console {
    sink: Option<&'static mut (dyn fmt::Write + Send)>,
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.sink.as_mut() {
            Some(sink) => sink.write_str(s),
            // no device installed yet, drop the output
            None => Ok(()),
        }
    }
}

/// Install the device that will receive all console output from now on.
pub fn set_sink(sink: &'static mut (dyn fmt::Write + Send)) {
    CONSOLE.lock().sink = Some(sink);
}

/// Lock the console for a sequence of writes.
///
/// Keep the guard for as short as possible, every log message in the
/// system has to wait for it.
pub fn lock() -> MutexGuard<'static, Console> {
    CONSOLE.lock()
}
