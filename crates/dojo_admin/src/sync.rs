//! List synchronization: initial load, silent refresh and polling.
//!
//! The synchronizer owns the authoritative collection and the filtered view.
//! Background polling runs in a task that only fetches; results come back over
//! a channel and are applied by whoever owns the synchronizer, so state is
//! never touched from two places at once.
//!
//! Responses are not sequenced. A slow silent refresh that completes after a
//! newer `load` still overwrites the collection with its older snapshot until
//! the next tick corrects it.

use dojo_client::{ApiError, ListSource};
use dojo_core::models::{Resource, ResourceId};
use dojo_core::search::{self, Searchable};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error};

/// Result of one background fetch.
pub type FetchResult<R> = Result<Vec<R>, ApiError>;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Authoritative collection, search term and derived view of one resource.
pub struct ListSynchronizer<R, S> {
    source: Arc<S>,
    collection: Vec<R>,
    view: Vec<R>,
    search_term: String,
    loading: bool,
    error: Option<String>,
    load_error_message: &'static str,
    view_revision: u64,
}

impl<R, S> ListSynchronizer<R, S>
where
    R: Resource + Searchable,
    S: ListSource<R>,
{
    /// New, not yet loaded synchronizer. `load_error_message` is the text shown
    /// when [`ListSynchronizer::load`] fails.
    pub fn new(source: Arc<S>, load_error_message: &'static str) -> Self {
        Self {
            source,
            collection: Vec::new(),
            view: Vec::new(),
            search_term: String::new(),
            loading: true,
            error: None,
            load_error_message,
            view_revision: 0,
        }
    }

    pub fn collection(&self) -> &[R] {
        &self.collection
    }

    /// Records matching the current search term, in collection order.
    pub fn view(&self) -> &[R] {
        &self.view
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Page-level load error, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped every time the view is recomputed.
    pub fn view_revision(&self) -> u64 {
        self.view_revision
    }

    pub fn find(&self, id: ResourceId) -> Option<&R> {
        self.collection.iter().find(|record| record.id() == id)
    }

    fn recompute_view(&mut self) {
        self.view = search::filter(&self.collection, &self.search_term);
        self.view_revision += 1;
    }

    fn replace(&mut self, records: Vec<R>) {
        self.collection = records;
        self.recompute_view();
    }

    /// Fetch the whole collection, replacing state on success.
    ///
    /// On failure the previous collection is kept and the load error is set.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.source.list().await {
            Ok(records) => {
                debug!(collection = R::COLLECTION, count = records.len(), "loaded");
                self.replace(records);
            }
            Err(err) => {
                error!(collection = R::COLLECTION, error = %err, "load failed");
                self.error = Some(self.load_error_message.to_string());
            }
        }
        self.loading = false;
    }

    /// Fetch and apply without any operator-visible feedback.
    ///
    /// # Returns
    /// `true` when the collection changed.
    pub async fn refresh_silently(&mut self) -> bool {
        let result = self.source.list().await;
        self.apply_silent_result(result)
    }

    /// Apply a background fetch result.
    ///
    /// Failures are swallowed and a snapshot equal to the current collection
    /// leaves everything untouched, including the view revision.
    ///
    /// # Returns
    /// `true` when the collection was replaced.
    pub fn apply_silent_result(&mut self, result: FetchResult<R>) -> bool {
        match result {
            Ok(records) if records == self.collection => false,
            Ok(records) => {
                debug!(
                    collection = R::COLLECTION,
                    count = records.len(),
                    "refresh changed collection"
                );
                self.replace(records);
                true
            }
            Err(err) => {
                debug!(collection = R::COLLECTION, error = %err, "silent refresh failed");
                false
            }
        }
    }

    /// Change the search term and recompute the view from the full collection.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute_view();
    }

    /// Mutate one record in place after the server confirmed the change.
    ///
    /// # Returns
    /// `false` when no record has `id`.
    pub fn update_record(&mut self, id: ResourceId, apply: impl FnOnce(&mut R)) -> bool {
        let Some(record) = self.collection.iter_mut().find(|record| record.id() == id) else {
            return false;
        };
        apply(record);
        self.recompute_view();
        true
    }

    /// Start fetching every `interval`; the first fetch happens one full
    /// interval from now.
    pub fn start_polling(&self, interval: Duration) -> PollingHandle<R> {
        let period = interval.max(MIN_POLL_INTERVAL);
        let source = Arc::clone(&self.source);
        let first_tick = time::Instant::now() + period;
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let result = source.list().await;
                if tx.send(result).await.is_err() {
                    break;
                }
            }
        });
        debug!(
            collection = R::COLLECTION,
            interval_ms = period.as_millis() as u64,
            "polling started"
        );
        PollingHandle {
            rx,
            task: Some(task),
        }
    }

    /// Wait for the next polled result and apply it silently.
    ///
    /// # Returns
    /// `Some(changed)` per applied result, `None` once polling has stopped.
    pub async fn apply_next_poll(&mut self, handle: &mut PollingHandle<R>) -> Option<bool> {
        let result = handle.next_result().await?;
        Some(self.apply_silent_result(result))
    }
}

/// Owner of a running polling task.
///
/// Stopping consumes the handle; dropping it stops the task as well.
pub struct PollingHandle<R> {
    rx: mpsc::Receiver<FetchResult<R>>,
    task: Option<JoinHandle<()>>,
}

impl<R> PollingHandle<R> {
    /// Next fetch result, or `None` once the task is gone.
    pub async fn next_result(&mut self) -> Option<FetchResult<R>> {
        self.rx.recv().await
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("polling stopped");
        }
        self.rx.close();
    }
}

impl<R> Drop for PollingHandle<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}
