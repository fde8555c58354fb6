use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bind_logging::{bind_debug, bind_info, bind_trace, bind_warn};
use fetchbind_core::{update, AsyncState, BindState, Effect, FetchOutcome, Generation, Msg};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::debounce::DebounceGate;
use crate::fetch::{run_fetch, Fetcher};
use crate::poll::PollScheduler;
use crate::settings::BindSettings;
use crate::view::{RefetchHandle, ViewFrame, ViewSink};

static NEXT_BINDER_ID: AtomicU64 = AtomicU64::new(1);

enum Command<P, T> {
    SetParams(P),
    Dispatch(Msg<T>),
}

/// Owner side of a running binder.
///
/// Dropping the handle tears the binder down.
pub struct BinderHandle<P, T> {
    id: u64,
    cmd_tx: mpsc::UnboundedSender<Command<P, T>>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<P, T> BinderHandle<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Binds `sink` to `fetcher` and issues the initial load with `params`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(
        params: P,
        fetcher: Arc<dyn Fetcher<P, T>>,
        sink: impl ViewSink<T> + 'static,
        settings: BindSettings,
    ) -> Self {
        let id = NEXT_BINDER_ID.fetch_add(1, Ordering::Relaxed);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let actor = BinderActor {
            id,
            state: BindState::new(settings.poll()),
            params,
            fetcher,
            sink: Box::new(sink),
            refetch: refetch_handle(&cmd_tx),
            cmd_tx: cmd_tx.clone(),
            cmd_rx,
            shutdown: shutdown.clone(),
            in_flight: None,
            debounce: DebounceGate::new(settings.debounce),
            poll: PollScheduler::new(),
            fetch_timeout: settings.fetch_timeout,
        };
        let task = tokio::spawn(actor.run());

        Self {
            id,
            cmd_tx,
            shutdown,
            task: Some(task),
        }
    }
}

impl<P, T> BinderHandle<P, T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Replaces the params; every call counts as a change and refetches.
    pub fn set_params(&self, params: P) {
        self.send(Command::SetParams(params));
    }

    pub fn refetch(&self, ignore_error: bool) {
        self.send(Command::Dispatch(Msg::RefetchRequested { ignore_error }));
    }

    /// Zero disables polling and cancels an armed timer.
    pub fn set_poll_interval(&self, interval: Duration) {
        self.send(Command::Dispatch(Msg::PollIntervalChanged(interval)));
    }

    pub fn refetch_handle(&self) -> RefetchHandle
    where
        P: Send + 'static,
        T: Send + 'static,
    {
        refetch_handle(&self.cmd_tx)
    }

    /// Stops the binder. Safe to call any number of times.
    pub fn teardown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Waits until the binder task has exited. Only returns after [`teardown`](Self::teardown).
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                bind_warn!("binder#{} task ended abnormally: {}", self.id, err);
            }
        }
    }

    fn send(&self, command: Command<P, T>) {
        if self.cmd_tx.send(command).is_err() {
            bind_debug!("binder#{} is torn down; command dropped", self.id);
        }
    }
}

impl<P, T> Drop for BinderHandle<P, T> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn refetch_handle<P, T>(cmd_tx: &mpsc::UnboundedSender<Command<P, T>>) -> RefetchHandle
where
    P: Send + 'static,
    T: Send + 'static,
{
    let weak = cmd_tx.downgrade();
    RefetchHandle::new(move |ignore_error| {
        if let Some(tx) = weak.upgrade() {
            let _ = tx.send(Command::Dispatch(Msg::RefetchRequested { ignore_error }));
        }
    })
}

/// Single owner of the state; processes commands, fetch outcomes and timer
/// fires one at a time in arrival order.
struct BinderActor<P, T> {
    id: u64,
    state: BindState<T>,
    params: P,
    fetcher: Arc<dyn Fetcher<P, T>>,
    sink: Box<dyn ViewSink<T>>,
    refetch: RefetchHandle,
    cmd_tx: mpsc::UnboundedSender<Command<P, T>>,
    cmd_rx: mpsc::UnboundedReceiver<Command<P, T>>,
    shutdown: CancellationToken,
    in_flight: Option<CancellationToken>,
    debounce: DebounceGate<AsyncState<T>>,
    poll: PollScheduler,
    fetch_timeout: Option<Duration>,
}

impl<P, T> BinderActor<P, T>
where
    P: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    async fn run(mut self) {
        bind_info!("binder#{} bound", self.id);
        self.dispatch(Msg::Bind);

        while !self.state.is_torn_down() {
            let debounce_at = self.debounce.deadline();
            let poll_at = self.poll.deadline();

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => self.dispatch(Msg::TearDown),
                command = self.cmd_rx.recv() => match command {
                    Some(Command::SetParams(params)) => {
                        self.params = params;
                        self.dispatch(Msg::ParamsChanged);
                    }
                    Some(Command::Dispatch(msg)) => self.dispatch(msg),
                    None => self.dispatch(Msg::TearDown),
                },
                _ = sleep_until_some(debounce_at) => self.flush_view(),
                _ = sleep_until_some(poll_at) => {
                    if self.poll.take_due(Instant::now()) {
                        bind_debug!("binder#{} poll timer fired", self.id);
                        self.dispatch(Msg::PollElapsed);
                    }
                }
            }
        }
        bind_info!("binder#{} torn down", self.id);
    }

    fn dispatch(&mut self, msg: Msg<T>) {
        if let Msg::FetchCompleted {
            generation,
            outcome,
        } = &msg
        {
            self.log_outcome(*generation, outcome);
        }

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartFetch {
                generation,
                ignore_error,
            } => self.start_fetch(generation, ignore_error),
            Effect::Render => {
                self.debounce.offer(self.state.view(), Instant::now());
            }
            Effect::ArmPoll { interval } => {
                bind_trace!("binder#{} poll armed for {:?}", self.id, interval);
                self.poll.arm(interval, Instant::now());
            }
            Effect::DisarmPoll => self.poll.disarm(),
            Effect::Release => {
                if let Some(cancel) = self.in_flight.take() {
                    cancel.cancel();
                }
                self.debounce.cancel();
                self.poll.disarm();
            }
        }
    }

    fn start_fetch(&mut self, generation: Generation, ignore_error: bool) {
        // Superseded attempts are dropped; a result that slips through is still discarded by generation.
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        let cancel = self.shutdown.child_token();
        self.in_flight = Some(cancel.clone());

        bind_debug!(
            "binder#{} fetch generation={} ignore_error={}",
            self.id,
            generation,
            ignore_error
        );

        let fetcher = self.fetcher.clone();
        let params = self.params.clone();
        let timeout = self.fetch_timeout;
        let cmd_tx = self.cmd_tx.clone();
        tokio::spawn(async move {
            // A cancelled attempt has nothing to report.
            if let Some(result) = run_fetch(fetcher, params, cancel, timeout).await {
                let _ = cmd_tx.send(Command::Dispatch(Msg::FetchCompleted {
                    generation,
                    outcome: FetchOutcome::new(result, ignore_error),
                }));
            }
        });
    }

    fn flush_view(&mut self) {
        if let Some(state) = self.debounce.take_due(Instant::now()) {
            bind_trace!(
                "binder#{} render loading={} error={}",
                self.id,
                state.loading,
                state.error.is_some()
            );
            self.sink.render(ViewFrame {
                state,
                refetch: self.refetch.clone(),
            });
        }
    }

    fn log_outcome(&self, generation: Generation, outcome: &FetchOutcome<T>) {
        if self.state.pending() != Some(generation) {
            bind_debug!(
                "binder#{} discarding outcome of superseded generation {}",
                self.id,
                generation
            );
            return;
        }
        if let Err(err) = &outcome.result {
            bind_warn!(
                "binder#{} generation {} failed (ignore_error={}): {}",
                self.id,
                generation,
                outcome.ignore_error,
                err
            );
        }
    }
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
