//! Logging framework for the kernel.
//!
//! Messages are written to the global [console](crate::console) and are
//! prefixed with their level and the module they came from. The levels
//! are types instead of enum variants, so a message's level is resolved
//! entirely at compile time.

use core::fmt::{self, Write};
use core::marker::PhantomData;
use owo_colors::{colors, Color, OwoColorize};

/// Represents any level a log message can have.
pub trait Level {
    /// The color the level tag is printed in.
    type Color: Color;

    const NAME: &'static str;
}

/// The debug log level.
pub enum Debug {}
impl Level for Debug {
    type Color = colors::Magenta;
    const NAME: &'static str = "Debug";
}

/// The info log level.
pub enum Info {}
impl Level for Info {
    type Color = colors::Cyan;
    const NAME: &'static str = "Info";
}

/// The warn log level.
pub enum Warn {}
impl Level for Warn {
    type Color = colors::Yellow;
    const NAME: &'static str = "Warn";
}

/// The error log level.
pub enum Error {}
impl Level for Error {
    type Color = colors::Red;
    const NAME: &'static str = "Error";
}

/// Log a debug message.
#[macro_export]
macro_rules! debug {
    (guard = $guard:expr; $($args:tt)+) => {
        $crate::log!(guard = $guard; Debug, $($args)+);
    };

    ($($args:tt)+) => {
        $crate::log!(Debug, $($args)+);
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    (guard = $guard:expr; $($args:tt)+) => {
        $crate::log!(guard = $guard; Info, $($args)+);
    };

    ($($args:tt)+) => {
        $crate::log!(Info, $($args)+);
    };
}

/// Log a warn message.
#[macro_export]
macro_rules! warn {
    (guard = $guard:expr; $($args:tt)+) => {
        $crate::log!(guard = $guard; Warn, $($args)+);
    };

    ($($args:tt)+) => {
        $crate::log!(Warn, $($args)+);
    };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    (guard = $guard:expr; $($args:tt)+) => {
        $crate::log!(guard = $guard; Error, $($args)+);
    };

    ($($args:tt)+) => {
        $crate::log!(Error, $($args)+);
    };
}

/// The standard logging macro.
///
/// Locks the console, unless an already held guard is passed in using
/// the `guard = ...;` form.
#[macro_export]
macro_rules! log {
    ($level:ident, $($args:tt)+) => {{
        let mut _guard = $crate::console::lock();
        $crate::log!(guard = _guard; $level, $($args)*)
    }};

    (guard = $guard:expr; $level:ident, $($args:tt)+) => {{
        $crate::log::_log::<$crate::log::$level, _>(
            &mut *$guard,
            ::core::module_path!(),
            ::core::format_args!($($args)*),
        );
    }};
}

/// Custom implementation of the `dbg` macro.
#[macro_export]
macro_rules! dbg {
    () => {
        $crate::debug!("[{}:{}]", ::core::file!(), ::core::line!());
    };

    ($val:expr $(,)?) => {
        match $val {
            tmp => {
                $crate::debug!("[{}:{}] {} = {:#?}", ::core::file!(), ::core::line!(),
                    ::core::stringify!($val), &tmp);
                tmp
            }
        }
    };

    ($($val:expr),+ $(,)?) => {
        ($($crate::dbg!($val)),+,)
    };
}

struct LogWriter<'fmt, L, G> {
    prefix: bool,
    module: &'fmt str,
    sink: &'fmt mut G,
    _level: PhantomData<L>,
}

impl<L: Level, G: Write> LogWriter<'_, L, G> {
    fn print_prefix(&mut self) -> fmt::Result {
        write!(
            self.sink,
            "{:>5} {} > ",
            L::NAME.fg::<L::Color>(),
            self.module.dimmed(),
        )
    }
}

impl<L: Level, G: Write> fmt::Write for LogWriter<'_, L, G> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // re-print the prefix at the start of every line, so multi line
        // messages stay aligned
        for chunk in s.split_inclusive('\n') {
            if self.prefix {
                self.print_prefix()?;
                self.prefix = false;
            }

            self.sink.write_str(chunk)?;

            if chunk.ends_with('\n') {
                self.prefix = true;
            }
        }

        Ok(())
    }
}

#[doc(hidden)]
pub fn _log<L: Level, G: Write>(sink: &mut G, module: &str, args: fmt::Arguments<'_>) {
    let mut writer = LogWriter {
        prefix: true,
        module,
        sink,
        _level: PhantomData::<L>,
    };

    writeln!(writer, "{}", args).expect("failed to write log message");
}
