use std::sync::Arc;

use clap::Parser;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::info;
use teloxide::Bot;

use kmt_schedule_bot::bot::run_bot;
use kmt_schedule_bot::fetcher::SiteClient;
use kmt_schedule_bot::flow::Conversation;
use kmt_schedule_bot::models::{Args, Config, GROUPS};

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .init();

    /* Get all the required resources; a missing token aborts right here */
    let args = Args::parse();
    let config: Config = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("BOT_"))
        .extract()
        .unwrap();
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)
            .unwrap()
            .display()
    );

    let site = SiteClient::new(&config.base_url, config.request_timeout_secs).unwrap();
    let conversation = Arc::new(Conversation::new(site));
    let bot = Bot::new(&config.token);

    info!(
        "Serving {} groups with schedule from {}",
        GROUPS.len(),
        config.base_url
    );
    run_bot(bot, conversation).await;
}
