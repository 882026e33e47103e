//! A small, hand-rolled colored trace logger used by every tmplkit pipeline
//! stage to report progress (statement counts, block counts, expression
//! evaluation). Never affects control flow or output content.

use std::fmt;

use chrono::Local;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType<'a> {
    Error(&'a str),
    Warn(&'a str),
    Info(&'a str),
    Debug(&'a str),
    Trace(&'a str),
}

impl<'a> fmt::Display for LogType<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogType::Error(msg) => write!(f, "{} {}", "ERROR".red().bold(), msg),
            LogType::Warn(msg) => write!(f, "{} {}", "WARN ".yellow().bold(), msg),
            LogType::Info(msg) => write!(f, "{} {}", "INFO ".green().bold(), msg),
            LogType::Debug(msg) => write!(f, "{} {}", "DEBUG".blue().bold(), msg),
            LogType::Trace(msg) => write!(f, "{} {}", "TRACE".dimmed(), msg),
        }
    }
}

pub struct Logger;

impl Logger {
    pub fn log(log_type: LogType, stage: &str) {
        if !Self::enabled() {
            return;
        }
        let now = Local::now().format("%H:%M:%S%.3f");
        eprintln!("[{}] {} ({})", now.to_string().dimmed(), log_type, stage.dimmed());
    }

    fn enabled() -> bool {
        std::env::var_os("TMPLKIT_LOG").is_some()
    }
}
