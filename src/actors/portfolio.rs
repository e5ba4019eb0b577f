use crate::error::{PortfolioError, Result};
use crate::loader::{Loader, LoaderConfig};
use crate::models::{RepositorySummary, Resolved};
use crate::panels::Panels;
use crate::prefs::{PreferenceStore, Preferences};
use crate::render::{render_document, render_panels};
use crate::state::{apply_loaded, reduce, Effect, FilterChange, Intent, Loaded, Tab, ViewState};
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort, SpawnErr};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Upper bound for a call that may trigger a full repository load
pub const CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the portfolio actor
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Quiet period before typed search text is applied
    pub search_debounce: Duration,
    pub loader: LoaderConfig,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            loader: LoaderConfig::default(),
        }
    }
}

/// Owns the view state. Messages are handled one at a time, so every state
/// change is a whole replacement and the last write wins.
///
/// Loads never run inside `handle`: they are spawned and report back with
/// [`PortfolioMessage::Loaded`], so renders and stats stay responsive while
/// GitHub is slow.
pub struct PortfolioActor;

pub struct PortfolioArgs {
    pub loader: Loader,
    pub prefs: PreferenceStore,
    pub config: PortfolioConfig,
}

/// A dispatch reply held until the loads it depends on have landed
struct PendingReply {
    waiting_on: Vec<Effect>,
    reply: RpcReplyPort<PortfolioView>,
}

pub struct PortfolioState {
    loader: Loader,
    prefs: PreferenceStore,
    config: PortfolioConfig,
    view: ViewState,
    pending_text: Option<String>,
    debounce_generation: u64,
    in_flight: HashSet<Effect>,
    pending_replies: Vec<PendingReply>,
    stats: PortfolioStats,
}

/// Rendered output handed back to callers
#[derive(Debug, Clone)]
pub struct PortfolioView {
    pub active_tab: Tab,
    pub dark_mode: bool,
    pub panels: Panels,
    pub document: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PortfolioStats {
    pub intents_processed: u64,
    pub loads_started: u64,
    pub loads_completed: u64,
    pub loads_in_flight: usize,
    pub debounced_inputs: u64,
    pub uses_fallback: bool,
    pub repositories_loaded: Option<usize>,
}

#[derive(Debug)]
pub enum PortfolioMessage {
    /// Run the first-visit loads
    Initialize,
    /// Apply an intent and reply with the rendered view once its loads land
    Dispatch(Intent, RpcReplyPort<PortfolioView>),
    /// Results of a spawned load, in effect order
    Loaded(Vec<Effect>, Vec<Loaded>),
    /// Search box keystroke; applied after the debounce period
    SearchInput(String),
    DebounceElapsed(u64),
    /// Search through GitHub's search endpoint
    RemoteSearch(String, RpcReplyPort<Resolved<Vec<RepositorySummary>>>),
    Render(RpcReplyPort<PortfolioView>),
    GetStats(RpcReplyPort<PortfolioStats>),
    Shutdown,
}

impl PortfolioActor {
    pub async fn spawn(args: PortfolioArgs) -> std::result::Result<ActorRef<PortfolioMessage>, SpawnErr> {
        let (actor_ref, _handle) = Actor::spawn(None, PortfolioActor, args).await?;
        info!("Portfolio actor started");
        Ok(actor_ref)
    }
}

impl PortfolioState {
    fn render(&self) -> PortfolioView {
        let panels = render_panels(&self.view, Utc::now());
        PortfolioView {
            active_tab: self.view.active_tab,
            dark_mode: self.view.dark_mode,
            document: render_document(&self.view, &panels),
            panels,
        }
    }

    fn apply(&mut self, intent: Intent) -> Vec<Effect> {
        let (view, effects) = reduce(std::mem::take(&mut self.view), intent);
        self.view = view;
        self.stats.intents_processed += 1;
        effects
    }

    /// Spawn the effects that are not already running. A repeated request
    /// for a running load joins it instead of starting another.
    fn start_effects(&mut self, myself: &ActorRef<PortfolioMessage>, effects: &[Effect]) {
        let fresh: Vec<Effect> = effects
            .iter()
            .copied()
            .filter(|effect| self.in_flight.insert(*effect))
            .collect();

        if fresh.is_empty() {
            return;
        }
        debug!(effects = ?fresh, "Starting load effects");
        self.stats.loads_started += fresh.len() as u64;
        self.stats.loads_in_flight = self.in_flight.len();

        let loader = self.loader.clone();
        let myself = myself.clone();
        tokio::spawn(async move {
            let results = loader.run_all(&fresh, Utc::now()).await;
            if let Err(e) = myself.send_message(PortfolioMessage::Loaded(fresh, results)) {
                warn!("Portfolio actor gone before loads finished: {}", e);
            }
        });
    }

    fn finish_effects(&mut self, effects: &[Effect], results: Vec<Loaded>) {
        for loaded in results {
            self.view = apply_loaded(std::mem::take(&mut self.view), loaded);
            self.stats.loads_completed += 1;
        }
        for effect in effects {
            self.in_flight.remove(effect);
        }

        self.stats.loads_in_flight = self.in_flight.len();
        self.stats.uses_fallback = self.view.uses_fallback();
        self.stats.repositories_loaded = self.view.repos.as_ref().map(|r| r.data.len());

        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_replies)
            .into_iter()
            .partition(|pending| {
                pending
                    .waiting_on
                    .iter()
                    .all(|effect| !self.in_flight.contains(effect))
            });
        self.pending_replies = waiting;

        for pending in ready {
            self.reply_with_view(pending.reply);
        }
    }

    fn reply_with_view(&self, reply: RpcReplyPort<PortfolioView>) {
        if !reply.is_closed() {
            let _ = reply.send(self.render());
        }
    }

    async fn persist_theme(&self) {
        let prefs = Preferences {
            dark_mode: self.view.dark_mode,
        };
        if let Err(e) = self.prefs.save(prefs).await {
            error!(path = %self.prefs.path().display(), "Failed to save theme preference: {}", e);
        }
    }
}

#[ractor::async_trait]
impl Actor for PortfolioActor {
    type Msg = PortfolioMessage;
    type State = PortfolioState;
    type Arguments = PortfolioArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        let prefs = args.prefs.load().await;
        info!(dark_mode = prefs.dark_mode, "Starting portfolio actor");

        myself
            .send_message(PortfolioMessage::Initialize)
            .map_err(|e| ActorProcessingErr::from(format!("Failed to queue initial load: {}", e)))?;

        Ok(PortfolioState {
            loader: args.loader,
            prefs: args.prefs,
            config: args.config,
            view: ViewState::new(prefs.dark_mode),
            pending_text: None,
            debounce_generation: 0,
            in_flight: HashSet::new(),
            pending_replies: Vec::new(),
            stats: PortfolioStats::default(),
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            PortfolioMessage::Initialize => {
                state.start_effects(&myself, &ViewState::initial_effects());
            }

            PortfolioMessage::Dispatch(intent, reply) => {
                let theme_toggled = matches!(intent, Intent::ThemeToggled);
                let effects = state.apply(intent);

                if theme_toggled {
                    state.persist_theme().await;
                }

                if effects.is_empty() {
                    state.reply_with_view(reply);
                } else {
                    state.start_effects(&myself, &effects);
                    state.pending_replies.push(PendingReply {
                        waiting_on: effects,
                        reply,
                    });
                }
            }

            PortfolioMessage::Loaded(effects, results) => {
                state.finish_effects(&effects, results);
                info!(
                    effects = ?effects,
                    uses_fallback = state.stats.uses_fallback,
                    "Portfolio data loaded"
                );
            }

            PortfolioMessage::SearchInput(text) => {
                state.debounce_generation += 1;
                state.pending_text = Some(text);

                let generation = state.debounce_generation;
                myself.send_after(state.config.search_debounce, move || {
                    PortfolioMessage::DebounceElapsed(generation)
                });
            }

            PortfolioMessage::DebounceElapsed(generation) => {
                if generation != state.debounce_generation {
                    debug!(generation, "Skipping superseded search input");
                    return Ok(());
                }

                if let Some(text) = state.pending_text.take() {
                    state.stats.debounced_inputs += 1;
                    let effects = state.apply(Intent::FilterChanged(FilterChange::Text(text)));
                    state.start_effects(&myself, &effects);
                }
            }

            PortfolioMessage::RemoteSearch(query, reply) => {
                let loader = state.loader.clone();
                tokio::spawn(async move {
                    let results = loader.remote_search(&query).await;
                    if !reply.is_closed() {
                        let _ = reply.send(results);
                    }
                });
            }

            PortfolioMessage::Render(reply) => {
                state.reply_with_view(reply);
            }

            PortfolioMessage::GetStats(reply) => {
                if !reply.is_closed() {
                    let _ = reply.send(state.stats.clone());
                }
            }

            PortfolioMessage::Shutdown => {
                info!("Shutting down portfolio actor");
                myself.stop(Some("Shutdown requested".to_string()));
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        info!(
            intents_processed = state.stats.intents_processed,
            loads_completed = state.stats.loads_completed,
            abandoned_replies = state.pending_replies.len(),
            "Portfolio actor stopped"
        );
        Ok(())
    }
}

/// Dispatch an intent and wait for the rendered view
pub async fn dispatch(actor: &ActorRef<PortfolioMessage>, intent: Intent) -> Result<PortfolioView> {
    match actor
        .call(|reply| PortfolioMessage::Dispatch(intent, reply), Some(CALL_TIMEOUT))
        .await
    {
        Ok(ractor::rpc::CallResult::Success(view)) => Ok(view),
        Ok(ractor::rpc::CallResult::Timeout) => Err(PortfolioError::ActorError(
            "Timed out waiting for the portfolio actor".to_string(),
        )),
        Ok(ractor::rpc::CallResult::SenderError) => Err(PortfolioError::ActorError(
            "Portfolio actor dropped the reply".to_string(),
        )),
        Err(e) => Err(PortfolioError::ActorError(format!("Failed to reach portfolio actor: {}", e))),
    }
}

pub async fn render(actor: &ActorRef<PortfolioMessage>, timeout: Duration) -> Result<PortfolioView> {
    match actor
        .call(PortfolioMessage::Render, Some(timeout))
        .await
    {
        Ok(ractor::rpc::CallResult::Success(view)) => Ok(view),
        Ok(_) => Err(PortfolioError::ActorError("Portfolio actor did not render".to_string())),
        Err(e) => Err(PortfolioError::ActorError(format!("Failed to reach portfolio actor: {}", e))),
    }
}

pub async fn remote_search(
    actor: &ActorRef<PortfolioMessage>,
    query: String,
) -> Result<Resolved<Vec<RepositorySummary>>> {
    match actor
        .call(|reply| PortfolioMessage::RemoteSearch(query, reply), Some(CALL_TIMEOUT))
        .await
    {
        Ok(ractor::rpc::CallResult::Success(results)) => Ok(results),
        Ok(_) => Err(PortfolioError::ActorError("Remote search did not complete".to_string())),
        Err(e) => Err(PortfolioError::ActorError(format!("Failed to reach portfolio actor: {}", e))),
    }
}

pub async fn stats(actor: &ActorRef<PortfolioMessage>, timeout: Duration) -> Result<PortfolioStats> {
    match actor.call(PortfolioMessage::GetStats, Some(timeout)).await {
        Ok(ractor::rpc::CallResult::Success(stats)) => Ok(stats),
        Ok(_) => Err(PortfolioError::ActorError("Portfolio actor did not report stats".to_string())),
        Err(e) => Err(PortfolioError::ActorError(format!("Failed to reach portfolio actor: {}", e))),
    }
}

/// Queue a search box keystroke
pub fn search_input(actor: &ActorRef<PortfolioMessage>, text: String) -> Result<()> {
    actor
        .send_message(PortfolioMessage::SearchInput(text))
        .map_err(|e| PortfolioError::ActorError(format!("Failed to queue search input: {}", e)))
}
