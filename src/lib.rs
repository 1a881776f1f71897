//! Telegram bot for the KMT college timetable: the user picks a group and
//! a date from inline menus, the bot scrapes the public schedule page and
//! answers with the lessons of that day.

pub mod bot;
pub mod fetcher;
pub mod flow;
pub mod formatter;
pub mod models;
pub mod parser;
