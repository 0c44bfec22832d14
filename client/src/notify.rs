//! One-line coloured notices for the outcome of an action. They go to stderr
//! so that JSON output on stdout stays parseable.

use colorful::{Color, Colorful};

pub fn warn(message: &str) {
    eprintln!("{}", format!("warning: {}", message).color(Color::Yellow));
}

pub fn success(message: &str) {
    eprintln!("{}", message.color(Color::Green));
}

pub fn error(message: &str) {
    eprintln!("{}", format!("error: {}", message).color(Color::Red).bold());
}
