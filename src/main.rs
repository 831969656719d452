use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use match_forecast::bot::{self, AppState};
use match_forecast::bot_config::BotConfig;
use match_forecast::fulfillment::Fulfiller;
use match_forecast::localization;
use match_forecast::match_parser::MatchParser;
use match_forecast::prediction::OpenAiPredictor;
use match_forecast::rate_limiter::RequestGuard;
use match_forecast::sports_data::TheSportsDb;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn spawn_guard_sweeper(guard: RequestGuard, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = guard.sweep();
            if removed > 0 {
                debug!(removed, "Swept expired rate limit entries");
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing();
    info!("Starting match forecast bot");

    let config = BotConfig::from_env().context("Failed to load configuration")?;
    localization::init_localization();

    let parser = MatchParser::new(config.parser.clone()).context("Invalid parser configuration")?;
    let sports_db = Arc::new(
        TheSportsDb::new(config.sports_db.clone()).context("Failed to build sports data client")?,
    );
    let predictor = Arc::new(
        OpenAiPredictor::new(config.llm.clone(), config.recovery.clone())
            .context("Failed to build prediction client")?,
    );

    let guard = RequestGuard::new(&config.rate_limit);
    spawn_guard_sweeper(
        guard.clone(),
        Duration::from_secs(config.rate_limit.sweep_interval_secs.max(1)),
    );

    let state = Arc::new(AppState {
        parser,
        guard,
        fulfiller: Fulfiller::new(
            sports_db.clone(),
            sports_db.clone(),
            predictor,
            &config.fulfillment,
        ),
        teams: sports_db,
    });

    let bot = Bot::new(&config.telegram_token);
    let handler = dptree::entry().branch(Update::filter_message().endpoint(bot::message_handler));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build();

    if config.use_polling {
        info!("Starting long polling");
        dispatcher.dispatch().await;
    } else {
        let app_url = config
            .app_url
            .as_deref()
            .context("APP_URL must be set for webhook mode")?;
        let url: reqwest::Url = format!("{}/webhook", app_url.trim_end_matches('/'))
            .parse()
            .context("APP_URL is not a valid URL")?;
        let address = ([0, 0, 0, 0], config.port).into();

        info!(%url, port = config.port, "Starting webhook listener");
        let listener = webhooks::axum(bot, webhooks::Options::new(address, url))
            .await
            .context("Failed to set up webhook")?;

        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    }

    Ok(())
}
