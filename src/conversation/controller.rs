use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::{
    charts::{render_all, StatsCharts},
    history::HistoryStore,
    models::UserId,
    omdb::{FetchError, MovieSource},
    stats::{aggregate_history, summarize, StatsConfig},
};
use crate::{log_debug, log_error, log_info, log_warn};

use super::{
    format,
    inbound::{select_payload, BotCommand, CallbackAction, Inbound, STATS_PAYLOAD},
    reply::{Button, PhotoSource, Reply, ReplySink, TextFormat},
    state::{ConversationState, SelectionPolicy},
};

const ENABLE_LOGS: bool = true;

/// Routes chat events to search, history and stats. Clones share all state.
#[derive(Clone)]
pub struct ConversationController {
    source: Arc<dyn MovieSource>,
    history: HistoryStore,
    sessions: Arc<Mutex<HashMap<UserId, ConversationState>>>,
    stats_config: StatsConfig,
    selection_policy: SelectionPolicy,
}

impl ConversationController {
    pub fn new(source: Arc<dyn MovieSource>, history: HistoryStore) -> Self {
        Self {
            source,
            history,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            stats_config: StatsConfig::default(),
            selection_policy: SelectionPolicy::default(),
        }
    }

    pub fn with_selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }

    #[cfg(test)]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub async fn state_of(&self, user: UserId) -> ConversationState {
        self.sessions
            .lock()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    async fn update_state(&self, user: UserId, apply: impl FnOnce(&mut ConversationState)) {
        let mut sessions = self.sessions.lock().await;
        apply(sessions.entry(user).or_default());
    }

    /// Handle one event. Provider failures are answered in the chat; only
    /// failures to deliver a reply are returned.
    pub async fn handle(&self, user: UserId, inbound: Inbound, sink: &dyn ReplySink) -> Result<()> {
        log_debug!("user {} -> {:?}", user, inbound);
        match inbound {
            Inbound::Command(BotCommand::Start)
            | Inbound::Command(BotCommand::Help)
            | Inbound::Command(BotCommand::Unknown(_)) => {
                sink.send(Reply::markdown(format::welcome())).await
            }
            Inbound::Command(BotCommand::Search(query)) | Inbound::Text(query) => {
                self.search(user, &query, sink).await
            }
            Inbound::Command(BotCommand::Stats) | Inbound::Callback(CallbackAction::Stats) => {
                self.stats(user, sink).await
            }
            Inbound::Command(BotCommand::Clear) => self.clear(user, sink).await,
            Inbound::Callback(CallbackAction::SelectMovie(id)) => self.select(user, &id, sink).await,
        }
    }

    async fn search(&self, user: UserId, query: &str, sink: &dyn ReplySink) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return sink.send(Reply::plain(format::USAGE)).await;
        }

        sink.send(Reply::plain(format::searching(query))).await?;

        let movies = match self.source.search(query).await {
            Ok(movies) => movies,
            Err(err) => {
                log_warn!("search for '{}' failed: {}", query, err);
                return sink.send(Reply::plain(format::FETCH_FAILED)).await;
            }
        };

        if movies.is_empty() {
            self.update_state(user, ConversationState::reset).await;
            return sink.send(Reply::plain(format::no_results(query))).await;
        }

        log_info!("user {} got {} results for '{}'", user, movies.len(), query);

        let offered: Vec<String> = movies.iter().map(|m| m.external_id.clone()).collect();
        self.update_state(user, |state| state.show_menu(offered)).await;

        let buttons = movies
            .iter()
            .map(|m| vec![Button::callback(m.menu_label(), select_payload(&m.external_id))])
            .collect();
        sink.send(Reply::markdown(format::results_header(query)).with_buttons(buttons))
            .await
    }

    async fn select(&self, user: UserId, external_id: &str, sink: &dyn ReplySink) -> Result<()> {
        let state = self.state_of(user).await;
        if !self.selection_policy.accepts(&state, external_id) {
            log_info!("user {} picked '{}' from a stale menu", user, external_id);
            return sink.send(Reply::plain(format::SELECTION_EXPIRED)).await;
        }

        let record = match self.source.fetch_detail(external_id).await {
            Ok(record) => record,
            Err(FetchError::NotFound(id)) => {
                log_warn!("movie '{}' not found", id);
                self.update_state(user, ConversationState::reset).await;
                return sink.send(Reply::plain(format::NOT_FOUND)).await;
            }
            Err(err) => {
                log_warn!("detail fetch for '{}' failed: {}", external_id, err);
                return sink.send(Reply::plain(format::FETCH_FAILED)).await;
            }
        };

        self.history.append(user, record.clone()).await;
        self.update_state(user, ConversationState::reset).await;

        if let Some(poster) = &record.poster_url {
            let photo = Reply::photo(
                PhotoSource::Url(poster.clone()),
                format::poster_caption(&record),
                TextFormat::Markdown,
            );
            // Telegram may refuse to fetch the poster; the details still go out.
            if let Err(err) = sink.send(photo).await {
                log_warn!("poster for '{}' not delivered: {:#}", external_id, err);
            }
        }

        let buttons = vec![
            vec![Button::callback(format::STATS_BUTTON, STATS_PAYLOAD)],
            vec![Button::link(format::IMDB_BUTTON, record.imdb_url())],
        ];
        sink.send(Reply::markdown(format::movie_details(&record)).with_buttons(buttons))
            .await
    }

    async fn stats(&self, user: UserId, sink: &dyn ReplySink) -> Result<()> {
        let history = self.history.get(user).await;
        if history.is_empty() {
            return sink.send(Reply::plain(format::NO_HISTORY)).await;
        }

        sink.send(Reply::plain(format::GENERATING)).await?;

        let summary = summarize(&history);
        let aggregates = aggregate_history(&history, &self.stats_config);

        let charts = tokio::task::spawn_blocking(move || render_all(&aggregates))
            .await
            .context("chart rendering task failed")
            .and_then(|rendered| rendered);

        match charts {
            Ok(StatsCharts {
                ratings,
                genres,
                years,
            }) => {
                let captioned = [
                    (ratings, format::RATING_CAPTION),
                    (genres, format::GENRE_CAPTION),
                    (years, format::YEAR_CAPTION),
                ];
                for (chart, caption) in captioned {
                    if let Some(chart) = chart {
                        sink.send(Reply::photo(
                            PhotoSource::Png(chart.png),
                            caption,
                            TextFormat::Plain,
                        ))
                        .await?;
                    }
                }
            }
            Err(err) => log_error!("failed to render charts for user {}: {:#}", user, err),
        }

        sink.send(Reply::markdown(format::stats_summary(&summary))).await
    }

    async fn clear(&self, user: UserId, sink: &dyn ReplySink) -> Result<()> {
        self.history.clear(user).await;
        log_info!("cleared history for user {}", user);
        sink.send(Reply::plain(format::CLEARED)).await
    }
}
