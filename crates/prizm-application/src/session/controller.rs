use super::store::SessionStore;
use crate::delivery::{DeliveryHandle, DeliveryScheduler};
use crate::projection::TranscriptProjection;
use prizm_core::config::DeliverySettings;
use prizm_core::debate::{DatasetRepository, DebateDataset, compile};
use prizm_core::delivery::{DeliveryJob, DeliveryStatus};
use prizm_core::error::{PrizmError, Result};
use prizm_core::session::{
    ActiveView, Attachment, Message, MessageRole, Session, derive_title,
};
use prizm_core::timer::{Timer, TimerHandle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Playback state of one session, as tracked by the controller.
enum Playback {
    /// Waiting for the start delay to elapse.
    Pending(TimerHandle),
    /// Handed to the delivery scheduler.
    Delivering(DeliveryHandle),
}

type Playbacks = Arc<Mutex<HashMap<String, Playback>>>;

fn lock_playbacks(playbacks: &Playbacks) -> MutexGuard<'_, HashMap<String, Playback>> {
    playbacks.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives session lifecycles.
///
/// `SessionLifecycleController` is responsible for:
/// - Validating and starting analyses
/// - Seeding the first user message
/// - Starting delivery after the configured start delay
/// - Switching the active view between sessions
/// - Tearing down playbacks (on request, on shutdown, and on switch when
///   `cancel_on_switch` is set)
pub struct SessionLifecycleController {
    store: SessionStore,
    scheduler: DeliveryScheduler,
    timer: Arc<dyn Timer>,
    datasets: Arc<dyn DatasetRepository>,
    settings: DeliverySettings,
    view: Mutex<ActiveView>,
    playbacks: Playbacks,
}

impl SessionLifecycleController {
    /// Creates a controller over `store`.
    ///
    /// # Arguments
    ///
    /// * `store` - The session store shared with the projection
    /// * `timer` - Clock driving the start delay and the delivery ticks
    /// * `datasets` - Source of the debate records played back
    /// * `settings` - Delivery interval, start delay and switch policy
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the settings are invalid.
    pub fn new(
        store: SessionStore,
        timer: Arc<dyn Timer>,
        datasets: Arc<dyn DatasetRepository>,
        settings: DeliverySettings,
    ) -> Result<Self> {
        settings.validate()?;
        let scheduler = DeliveryScheduler::new(store.clone(), timer.clone(), settings.interval())?;

        Ok(Self {
            store,
            scheduler,
            timer,
            datasets,
            settings,
            view: Mutex::new(ActiveView::default()),
            playbacks: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    fn view(&self) -> MutexGuard<'_, ActiveView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a read-only projection over this controller's store.
    pub fn projection(&self) -> TranscriptProjection {
        TranscriptProjection::new(self.store.clone())
    }

    pub fn settings(&self) -> &DeliverySettings {
        &self.settings
    }

    /// Starts a new analysis.
    ///
    /// Creates a session seeded with one `user` message, makes it the active
    /// session, and schedules playback to start after the start delay.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The user's request text
    /// * `attachment` - Optional attached document; only its name is read
    ///
    /// # Returns
    ///
    /// The ID of the new session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` when the prompt is blank and no attachment is
    /// given. Nothing is created in that case.
    pub fn start_analysis(&self, prompt: &str, attachment: Option<&Attachment>) -> Result<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() && attachment.is_none() {
            return Err(PrizmError::invalid_request(
                "an analysis needs a prompt or an attachment",
            ));
        }

        if self.settings.cancel_on_switch {
            let previous = self.active_session_id();
            if let Some(previous) = previous {
                self.cancel_delivery(&previous);
            }
        }

        let attachment_name = attachment.map(|a| a.name.clone());
        let session_id = uuid::Uuid::new_v4().to_string();
        let now = self.timer.now();
        let session = Session::new(
            session_id.clone(),
            derive_title(prompt, attachment_name.as_deref()),
            now,
            attachment_name.clone(),
        );
        let title = session.title.clone();

        self.store.insert(session)?;
        self.store.append(
            &session_id,
            Message {
                id: uuid::Uuid::new_v4().to_string(),
                role: MessageRole::User,
                body: seed_body(prompt, attachment_name.as_deref()),
                created_at: now,
            },
        )?;
        self.store
            .set_delivery_status(&session_id, DeliveryStatus::Scheduled)?;

        *self.view() = ActiveView::SessionActive {
            session_id: session_id.clone(),
        };

        tracing::info!(
            session_id = %session_id,
            title = %title,
            has_attachment = attachment_name.is_some(),
            "[SessionLifecycleController] Analysis started"
        );

        self.schedule_start(&session_id);
        Ok(session_id)
    }

    fn schedule_start(&self, session_id: &str) {
        let scheduler = self.scheduler.clone();
        let datasets = self.datasets.clone();
        let playbacks = self.playbacks.clone();
        let id = session_id.to_string();

        // Holding the map while scheduling keeps a fast timer from starting
        // playback before the pending entry exists.
        let mut guard = lock_playbacks(&self.playbacks);
        let handle = self.timer.schedule(
            self.settings.start_delay(),
            Box::new(move || begin_delivery(&scheduler, datasets.as_ref(), &playbacks, &id)),
        );
        guard.insert(session_id.to_string(), Playback::Pending(handle));
    }

    /// Switches the active view.
    ///
    /// `None` returns to the `NoSessionSelected` state. Playbacks of other
    /// sessions keep running unless `cancel_on_switch` is set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `session_id` names no known session; the view
    /// is left unchanged.
    pub fn switch_session(&self, session_id: Option<&str>) -> Result<()> {
        if let Some(id) = session_id {
            if !self.store.contains(id) {
                return Err(PrizmError::not_found("Session", id));
            }
        }

        let previous = self.active_session_id();
        if self.settings.cancel_on_switch {
            if let Some(previous) = previous.as_deref() {
                if Some(previous) != session_id {
                    self.cancel_delivery(previous);
                }
            }
        }

        *self.view() = match session_id {
            Some(id) => ActiveView::SessionActive {
                session_id: id.to_string(),
            },
            None => ActiveView::NoSessionSelected,
        };

        tracing::debug!(
            from = ?previous,
            to = ?session_id,
            "[SessionLifecycleController] Switched session"
        );
        Ok(())
    }

    pub fn active_view(&self) -> ActiveView {
        self.view().clone()
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.view().session_id().map(str::to_string)
    }

    /// Returns the delivery handle of a session once playback has started.
    pub fn delivery_handle(&self, session_id: &str) -> Option<DeliveryHandle> {
        match lock_playbacks(&self.playbacks).get(session_id) {
            Some(Playback::Delivering(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Cancels a session's playback, whether it is waiting to start or running.
    ///
    /// # Returns
    ///
    /// `true` if something was cancelled by this call.
    pub fn cancel_delivery(&self, session_id: &str) -> bool {
        let playbacks = lock_playbacks(&self.playbacks);
        match playbacks.get(session_id) {
            Some(Playback::Pending(handle)) => {
                if handle.is_cancelled() {
                    return false;
                }
                handle.cancel();
                let _ = self
                    .store
                    .set_delivery_status(session_id, DeliveryStatus::Cancelled);
                tracing::info!(
                    session_id = %session_id,
                    "[SessionLifecycleController] Pending playback cancelled"
                );
                true
            }
            Some(Playback::Delivering(handle)) => self.scheduler.cancel(handle),
            None => false,
        }
    }

    /// Cancels every pending and running playback.
    pub fn shutdown(&self) {
        let ids: Vec<String> = lock_playbacks(&self.playbacks).keys().cloned().collect();
        let cancelled = ids.iter().filter(|id| self.cancel_delivery(id)).count();
        tracing::info!(
            cancelled,
            "[SessionLifecycleController] Shut down playbacks"
        );
    }
}

fn seed_body(prompt: &str, attachment_name: Option<&str>) -> String {
    match attachment_name {
        Some(name) if prompt.is_empty() => format!("📎 {name}"),
        Some(name) => format!("{prompt}\n\n📎 {name}"),
        None => prompt.to_string(),
    }
}

fn begin_delivery(
    scheduler: &DeliveryScheduler,
    datasets: &dyn DatasetRepository,
    playbacks: &Playbacks,
    session_id: &str,
) {
    // A dataset that cannot be read still yields a valid script: the
    // completion marker alone.
    let dataset = datasets.load().unwrap_or_else(|e| {
        tracing::warn!(
            session_id = %session_id,
            "[SessionLifecycleController] Failed to load dataset, delivering empty script: {}",
            e
        );
        DebateDataset::default()
    });
    let script = compile(&dataset.records);

    let mut playbacks = lock_playbacks(playbacks);
    match playbacks.get(session_id) {
        Some(Playback::Pending(handle)) if !handle.is_cancelled() => {}
        _ => return,
    }

    let handle = scheduler.start(DeliveryJob::new(session_id, script));
    playbacks.insert(session_id.to_string(), Playback::Delivering(handle));
}
