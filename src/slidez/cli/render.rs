//! Terminal output.
//!
//! Status messages go to stderr so stdout carries only results: new ids,
//! extracted text and JSON, which scripts can capture.

use colored::*;
use serde::Serialize;
use slidez::commands::{CmdMessage, CmdResult, MessageLevel};
use slidez::config::{SlidezConfig, KEYS};
use slidez::error::Result;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
        };
        output.push_str(&format!("{}\n", line));
    }
    output
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        eprint!("{}", output);
    }
}

pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_config(config: &SlidezConfig) -> String {
    KEYS.iter()
        .map(|key| format!("{} = {}\n", key, config.get(key).unwrap_or_default()))
        .collect()
}

/// Prints messages first, then whatever result the command produced.
pub fn print_result(result: &CmdResult) -> Result<()> {
    print_messages(&result.messages);
    if let Some(id) = &result.created_id {
        println!("{}", id);
    }
    if let Some(text) = &result.text {
        println!("{}", text);
    }
    if let Some(matches) = &result.matches {
        println!("{}", render_json(matches)?);
    }
    if let Some(notes) = &result.notes {
        println!("{}", render_json(notes)?);
    }
    if let Some(config) = &result.config {
        print!("{}", render_config(config));
    }
    Ok(())
}
