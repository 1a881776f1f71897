use std::path::PathBuf;

use clap::{command, Parser};
use serde::Deserialize;

/// Catalog of group identifiers the bot offers. Fixed at build time,
/// never checked against the live site.
pub const GROUPS: &[&str] = &[
    "МР-24", "ИС-21", "ИС-22", "ИС-23", "ИС-24",
    "ПИ-21", "ПИ-22", "ПИ-23", "ПИ-24",
    "ЭЛ-21", "ЭЛ-22", "ЭЛ-23", "ЭЛ-24",
    "МА-21", "МА-22", "МА-23", "МА-24",
    "ФИ-21", "ФИ-22", "ФИ-23", "ФИ-24",
    "БИ-21", "БИ-22", "БИ-23", "БИ-24",
    "ХИ-21", "ХИ-22", "ХИ-23", "ХИ-24", "ХИ-25",
];

/// One row of the schedule table. All four fields stay trimmed text,
/// the time is not parsed into a time-of-day value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub time: String,
    pub subject: String,
    pub teacher: String,
    pub room: String,
}

/// Result of parsing a schedule page. `NoLessons` covers both a genuinely
/// empty day and a page whose table did not match the expected four-column
/// layout; the two cannot be told apart downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    Lessons(Vec<Lesson>),
    NoLessons,
}

/// A model for describing ARGS of the bot.
/// Consists of:
/// 1. Path to config.json, that contains the bot token and site parameters.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
}

/// A model for describing configuration of the bot.
/// Consists of:
/// 1. Telegram bot token (required; `BOT_TOKEN` overrides the file)
/// 2. Base URL of the timetable page
/// 3. Timeout of a single page fetch, in seconds
#[derive(Debug, Deserialize)]
pub struct Config {
    pub token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://kmt.kemobl.ru/Studentu-fx3ifzdiool1km80bra3c7/Raspisanie-zanyatij-sds6lyy3puj6e7uocr20i3/"
        .to_owned()
}

fn default_request_timeout_secs() -> u64 {
    10
}
