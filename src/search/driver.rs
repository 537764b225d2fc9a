use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

use super::session::{Effect, RequestId, SearchSession, SearchState};
use crate::{book::Book, error::ServiceError, query::SearchMode, service::BookSearch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Input(String),
    Mode(SearchMode),
    Clear,
    Retry,
}

type Completion = (RequestId, Result<Vec<Book>, ServiceError>);

/// Front end of a running search session. Dropping it stops the session;
/// fetches already in flight run to completion and are ignored.
#[derive(Debug)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<SearchCommand>,
    state: watch::Receiver<SearchState>,
}

impl SearchHandle {
    pub fn input(&self, text: impl Into<String>) {
        self.send(SearchCommand::Input(text.into()));
    }

    pub fn set_mode(&self, mode: SearchMode) {
        self.send(SearchCommand::Mode(mode));
    }

    pub fn clear(&self) {
        self.send(SearchCommand::Clear);
    }

    pub fn retry(&self) {
        self.send(SearchCommand::Retry);
    }

    pub fn send(&self, command: SearchCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!("search session has stopped");
        }
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }
}

/// Starts a search session on the current tokio runtime.
pub fn spawn<S>(service: Arc<S>, debounce: Duration) -> SearchHandle
where
    S: BookSearch + ?Sized + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(SearchState::Idle);
    tokio::spawn(run(service, SearchSession::new(debounce), command_rx, state_tx));
    SearchHandle {
        commands: command_tx,
        state: state_rx,
    }
}

async fn run<S>(
    service: Arc<S>,
    mut session: SearchSession,
    mut commands: mpsc::UnboundedReceiver<SearchCommand>,
    state: watch::Sender<SearchState>,
) where
    S: BookSearch + ?Sized + 'static,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut timer: Option<(u64, Instant)> = None;

    loop {
        let deadline = timer.map_or_else(Instant::now, |(_, at)| at);
        let effect = tokio::select! {
            command = commands.recv() => match command {
                Some(SearchCommand::Input(text)) => Some(session.input_changed(text)),
                Some(SearchCommand::Mode(mode)) => session.mode_changed(mode),
                Some(SearchCommand::Clear) => {
                    timer = None;
                    session.clear();
                    None
                }
                Some(SearchCommand::Retry) => session.retry(),
                None => break,
            },
            _ = sleep_until(deadline), if timer.is_some() => {
                match timer.take() {
                    Some((generation, _)) => session.debounce_elapsed(generation),
                    None => None,
                }
            }
            Some((id, result)) = done_rx.recv() => {
                session.fetch_completed(id, result);
                None
            }
        };

        match effect {
            Some(Effect::ScheduleDebounce { generation, delay }) => {
                timer = Some((generation, Instant::now() + delay));
            }
            Some(Effect::Fetch(request)) => {
                let service = Arc::clone(&service);
                let done = done_tx.clone();
                tokio::spawn(async move {
                    let result = service.search(&request.query, request.mode).await;
                    // the session may be gone by now
                    let _ = done.send((request.id, result));
                });
            }
            None => {}
        }

        state.send_if_modified(|current| {
            if current == session.state() {
                false
            } else {
                *current = session.state().clone();
                true
            }
        });
    }
}
