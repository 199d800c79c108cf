// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "FIMP_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LogLevel {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

impl LogLevel {
    /// Unknown values fall back to `Quiet`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" | "info" => LogLevel::Normal,
            "verbose" | "debug" => LogLevel::Verbose,
            _ => LogLevel::Quiet,
        }
    }

    pub fn from_env() -> Self {
        std::env::var(LOG_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or(LogLevel::Quiet)
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            2 => LogLevel::Verbose,
            1 => LogLevel::Normal,
            _ => LogLevel::Quiet,
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Quiet as u8);

pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn log_level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        {
            use colored::Colorize;
            eprintln!("{} {}", "[fimp]".red().bold(), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if $crate::utils::log_level() != $crate::utils::LogLevel::Quiet {
            use colored::Colorize;
            println!("{} {}", "[fimp]".green(), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)*) => {
        if $crate::utils::log_level() == $crate::utils::LogLevel::Verbose {
            use colored::Colorize;
            println!("{} {}", "[fimp]".dimmed(), format_args!($($arg)*));
        }
    };
}
