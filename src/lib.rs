mod charts;
mod conversation;
mod history;
mod models;
mod omdb;
mod settings;
mod stats;
mod telegram;
mod utils;

use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use log::{error, info};
use tokio_util::sync::CancellationToken;

use conversation::ConversationController;
use history::HistoryStore;
use omdb::OmdbClient;
use settings::Settings;
use telegram::{run_polling, TelegramApi};

pub fn run() -> ExitCode {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("configuration error: {err}");
            eprintln!("moviebot: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serve(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("moviebot stopped: {err:#}");
            eprintln!("moviebot: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn serve(settings: Settings) -> Result<()> {
    info!("starting moviebot with {:?}", settings);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    runtime.block_on(async move {
        let omdb = OmdbClient::new(
            settings.omdb_base_url.clone(),
            settings.omdb_api_key.clone(),
            settings.http_timeout,
        )?;
        let controller = ConversationController::new(Arc::new(omdb), HistoryStore::new())
            .with_selection_policy(settings.selection_policy);
        let api = TelegramApi::new(
            &settings.telegram_api_url,
            &settings.telegram_bot_token,
            settings.http_timeout,
        )?;

        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, shutting down");
                    shutdown.cancel();
                }
                Err(err) => error!("failed to listen for Ctrl-C: {err}"),
            }
        });

        run_polling(api, controller, settings.poll_timeout, cancel).await;
        Ok::<(), anyhow::Error>(())
    })
}
