#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Annotation;
use crate::domain::models::IdGenerator;
use crate::domain::models::Intent;
use crate::domain::models::MediaContent;
use crate::domain::models::MediaDraft;
use crate::domain::models::Message;
use crate::domain::models::Outcome;
use crate::domain::models::PendingSequence;
use crate::domain::models::Position;
use crate::domain::models::ResolverBox;
use crate::domain::models::SendReceipt;
use crate::domain::models::Sender;
use crate::domain::models::SequenceStage;
use crate::domain::models::SequenceToken;
use crate::domain::models::SessionError;
use crate::domain::models::SessionSettings;
use crate::domain::models::SessionState;

pub const FALLBACK_TEXT: &str =
    "Sorry, something went wrong while generating a response. Please try again.";
pub const CANCELLED_TEXT: &str = "Response cancelled.";

struct Sequence {
    pending: PendingSequence,
    cancel: CancellationToken,
}

struct Inner {
    state: SessionState,
    /// Outstanding send sequences in issuance order.
    sequences: Vec<Sequence>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Inner {
    /// Wall clock time, clamped so it never runs backwards across the log.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now < last {
                now = last;
            }
        }
        self.last_timestamp = Some(now);

        return now;
    }

    fn sequence_mut(&mut self, token: &SequenceToken) -> Option<&mut Sequence> {
        return self
            .sequences
            .iter_mut()
            .find(|sequence| return &sequence.pending.token == token);
    }

    fn position_of(&self, message_id: &str) -> Option<usize> {
        return self
            .state
            .messages
            .iter()
            .position(|message| return message.id == message_id);
    }
}

/// Owns the session state. Every mutation goes through this handle and is
/// followed by a fresh snapshot on the watch channel.
///
/// Clones share the same state. Sending a message spawns its delayed stages
/// on the tokio runtime, so `send_message` must be called from within one.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
    resolver: ResolverBox,
    ids: Arc<dyn IdGenerator>,
    settings: SessionSettings,
    snapshots: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    pub fn new(
        resolver: ResolverBox,
        ids: Arc<dyn IdGenerator>,
        settings: SessionSettings,
    ) -> SessionStore {
        let (snapshots, _) = watch::channel(SessionState::default());

        return SessionStore {
            inner: Arc::new(Mutex::new(Inner {
                state: SessionState::default(),
                sequences: vec![],
                last_timestamp: None,
            })),
            tasks: Arc::new(Mutex::new(vec![])),
            resolver,
            ids,
            settings,
            snapshots: Arc::new(snapshots),
        };
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        return self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| return poisoned.into_inner());
    }

    fn publish(&self, inner: &Inner) {
        self.snapshots.send_replace(inner.state.clone());
    }

    fn create_items(&self, drafts: Vec<MediaDraft>) -> Vec<MediaContent> {
        return drafts
            .into_iter()
            .map(|draft| return MediaContent::from_draft(&self.ids.next_id(), draft))
            .collect();
    }

    /// Appends finalized messages without going through a send sequence.
    /// Used to start a session with an existing conversation.
    pub fn seed_history(&self, history: Vec<(Sender, Vec<MediaDraft>)>) {
        let mut inner = self.lock();
        for (sender, drafts) in history {
            let items = self.create_items(drafts);
            let created_at = inner.next_timestamp();
            inner.state.messages.push(Message::new(
                &self.ids.next_id(),
                sender,
                created_at,
                items,
            ));
        }

        self.publish(&inner);
    }

    pub fn snapshot(&self) -> SessionState {
        return self.lock().state.clone();
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        return self.snapshots.subscribe();
    }

    pub fn annotations_for(&self, media_id: &str) -> Vec<Annotation> {
        return self.lock().state.annotations_for(media_id).to_vec();
    }

    pub fn find_media(&self, media_id: &str) -> Option<MediaContent> {
        return self.lock().state.find_media(media_id).cloned();
    }

    pub fn selected_message(&self) -> Option<Message> {
        let inner = self.lock();
        let selected = inner.state.selected_message_id.as_ref()?;

        return inner.state.message(selected).cloned();
    }

    pub fn pending(&self) -> Vec<PendingSequence> {
        return self
            .lock()
            .sequences
            .iter()
            .map(|sequence| return sequence.pending.clone())
            .collect();
    }

    /// Appends the user message right away, then shows a composing
    /// placeholder after the composing delay and swaps it for the resolved
    /// reply after the resolve delay.
    pub fn send_message(&self, drafts: Vec<MediaDraft>) -> Result<SendReceipt, SessionError> {
        let drafts = drafts
            .into_iter()
            .filter_map(|draft| return draft.normalize())
            .collect::<Vec<MediaDraft>>();
        if drafts.is_empty() {
            tracing::warn!("Ignoring empty message");
            return Err(SessionError::EmptyMessage);
        }

        if self.settings.cancel_on_send {
            self.cancel_all();
        }

        let token = SequenceToken::new(&self.ids.next_id());
        let user_message_id = self.ids.next_id();
        let composing_message_id = self.ids.next_id();
        let composing_item_id = self.ids.next_id();
        let cancel = CancellationToken::new();
        let items = self.create_items(drafts);

        {
            let mut inner = self.lock();
            let created_at = inner.next_timestamp();
            inner.state.messages.push(Message::new(
                &user_message_id,
                Sender::User,
                created_at,
                items,
            ));
            inner.sequences.push(Sequence {
                pending: PendingSequence {
                    token: token.clone(),
                    user_message_id: user_message_id.to_string(),
                    composing_message_id,
                    composing_item_id,
                    stage: SequenceStage::UserAppended,
                },
                cancel: cancel.clone(),
            });

            self.publish(&inner);
        }

        tracing::debug!(
            sequence = token.as_str(),
            message_id = user_message_id.as_str(),
            "User message appended"
        );

        let store = self.clone();
        let worker = tokio::spawn(store.run_sequence(token.clone(), cancel));

        let mut tasks = self
            .tasks
            .lock()
            .unwrap_or_else(|poisoned| return poisoned.into_inner());
        tasks.retain(|task| return !task.is_finished());
        tasks.push(worker);

        return Ok(SendReceipt {
            sequence: token,
            user_message_id,
        });
    }

    /// Returns false when the wait was cut short by cancellation.
    async fn wait(duration: Duration, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => {
                return false;
            }
            _ = time::sleep(duration) => {
                return true;
            }
        }
    }

    async fn run_sequence(self, token: SequenceToken, cancel: CancellationToken) {
        let mut cancelled = !SessionStore::wait(self.settings.composing_delay, &cancel).await;
        self.show_composing(&token);

        if !cancelled {
            cancelled = !SessionStore::wait(self.settings.resolve_delay, &cancel).await;
        }

        let items = if cancelled {
            vec![MediaDraft::text(CANCELLED_TEXT)]
        } else {
            self.resolve(&token, &cancel).await
        };

        self.finish(&token, items);
    }

    fn show_composing(&self, token: &SequenceToken) {
        let mut inner = self.lock();
        let created_at = inner.next_timestamp();

        let (user_message_id, composing_message_id, composing_item_id) =
            match inner.sequence_mut(token) {
                Some(sequence) => {
                    sequence.pending.stage = SequenceStage::Composing;
                    (
                        sequence.pending.user_message_id.to_string(),
                        sequence.pending.composing_message_id.to_string(),
                        sequence.pending.composing_item_id.to_string(),
                    )
                }
                None => {
                    tracing::error!(sequence = token.as_str(), "Unknown sequence");
                    return;
                }
            };

        // Directly after its own user message, so overlapping sequences keep
        // issuance order.
        let index = match inner.position_of(&user_message_id) {
            Some(idx) => idx + 1,
            None => inner.state.messages.len(),
        };
        inner.state.messages.insert(
            index,
            Message::composing(&composing_message_id, &composing_item_id, created_at),
        );

        tracing::debug!(
            sequence = token.as_str(),
            message_id = composing_message_id.as_str(),
            "Composing"
        );

        self.publish(&inner);
    }

    async fn resolve(&self, token: &SequenceToken, cancel: &CancellationToken) -> Vec<MediaDraft> {
        let user_message = {
            let inner = self.lock();
            inner
                .sequences
                .iter()
                .find(|sequence| return &sequence.pending.token == token)
                .and_then(|sequence| return inner.state.message(&sequence.pending.user_message_id))
                .cloned()
        };

        let message = match user_message {
            Some(message) => message,
            None => {
                tracing::error!(sequence = token.as_str(), "User message missing for sequence");
                return vec![MediaDraft::text(FALLBACK_TEXT)];
            }
        };

        let res = tokio::select! {
            res = AssertUnwindSafe(self.resolver.resolve(&message)).catch_unwind() => res,
            _ = cancel.cancelled() => {
                return vec![MediaDraft::text(CANCELLED_TEXT)];
            }
        };

        let err = match res {
            Ok(Ok(drafts)) => {
                let drafts = drafts
                    .into_iter()
                    .filter_map(|draft| return draft.normalize())
                    .collect::<Vec<MediaDraft>>();
                if !drafts.is_empty() {
                    return drafts;
                }
                SessionError::ResolverFailure("empty reply".to_string())
            }
            Ok(Err(err)) => SessionError::ResolverFailure(err.to_string()),
            Err(_) => SessionError::ResolverFailure("resolver panicked".to_string()),
        };

        tracing::error!(
            sequence = token.as_str(),
            resolver = self.resolver.name().to_string(),
            error = %err,
            "Falling back to generic reply"
        );

        return vec![MediaDraft::text(FALLBACK_TEXT)];
    }

    fn finish(&self, token: &SequenceToken, drafts: Vec<MediaDraft>) {
        let items = self.create_items(drafts);

        let mut inner = self.lock();
        let created_at = inner.next_timestamp();

        let idx = match inner
            .sequences
            .iter()
            .position(|sequence| return &sequence.pending.token == token)
        {
            Some(idx) => idx,
            None => {
                tracing::error!(sequence = token.as_str(), "Unknown sequence");
                return;
            }
        };
        let mut sequence = inner.sequences.remove(idx);
        sequence.pending.stage = SequenceStage::Resolved;

        // Same id as the placeholder, so a selection made while composing
        // still points at the reply.
        let resolved_id = sequence.pending.composing_message_id.to_string();
        let resolved = Message::new(&resolved_id, Sender::Assistant, created_at, items);

        match inner.position_of(&sequence.pending.composing_message_id) {
            Some(position) => {
                inner.state.messages[position] = resolved;
            }
            None => {
                inner.state.messages.push(resolved);
            }
        }

        tracing::debug!(
            sequence = token.as_str(),
            message_id = resolved_id.as_str(),
            "Resolved"
        );

        self.publish(&inner);
    }

    /// Cuts a pending sequence short. It still passes through the composing
    /// stage and resolves with a cancellation notice.
    pub fn cancel(&self, token: &SequenceToken) -> bool {
        let inner = self.lock();
        for sequence in inner.sequences.iter() {
            if &sequence.pending.token == token && !sequence.cancel.is_cancelled() {
                tracing::debug!(sequence = token.as_str(), "Cancelling sequence");
                sequence.cancel.cancel();
                return true;
            }
        }

        return false;
    }

    pub fn cancel_all(&self) -> usize {
        let inner = self.lock();
        let mut count = 0;
        for sequence in inner.sequences.iter() {
            if !sequence.cancel.is_cancelled() {
                sequence.cancel.cancel();
                count += 1;
            }
        }

        if count > 0 {
            tracing::debug!(count, "Cancelled pending sequences");
        }

        return count;
    }

    /// Waits for every outstanding send sequence to resolve.
    pub async fn wait_idle(&self) {
        loop {
            let tasks = {
                let mut tasks = self
                    .tasks
                    .lock()
                    .unwrap_or_else(|poisoned| return poisoned.into_inner());
                tasks.drain(..).collect::<Vec<JoinHandle<()>>>()
            };
            if tasks.is_empty() {
                return;
            }

            for task in tasks {
                if let Err(err) = task.await {
                    tracing::error!(error = ?err, "Send sequence task failed");
                }
            }
        }
    }

    pub fn select_message(&self, id: Option<&str>) {
        let mut inner = self.lock();
        inner.state.selected_message_id = id.map(|e| return e.to_string());
        if id.is_none() {
            inner.state.is_annotating = false;
        }

        tracing::debug!(message_id = ?id, "Selected message");
        self.publish(&inner);
    }

    /// Returns the new annotation mode.
    pub fn toggle_annotation_mode(&self) -> Result<bool, SessionError> {
        let mut inner = self.lock();
        if !inner.state.is_annotating && inner.state.selected_message_id.is_none() {
            tracing::warn!("Annotation mode requires a selected message");
            return Err(SessionError::SelectionRequired);
        }

        inner.state.is_annotating = !inner.state.is_annotating;
        let is_annotating = inner.state.is_annotating;

        tracing::debug!(is_annotating, "Toggled annotation mode");
        self.publish(&inner);

        return Ok(is_annotating);
    }

    /// Annotation mode is not checked here, gating on it is up to the
    /// presentation layer.
    pub fn add_annotation(
        &self,
        media_id: &str,
        text: &str,
        position: Position,
    ) -> Result<String, SessionError> {
        if let Err(err) = Annotation::validate(text, &position) {
            tracing::warn!(media_id, error = %err, "Rejected annotation");
            return Err(err);
        }

        let id = self.ids.next_id();
        let annotation = Annotation::new(&id, media_id, text.trim(), position);

        let mut inner = self.lock();
        if inner.state.find_media(media_id).is_none() {
            tracing::debug!(media_id, "Annotating media that is not in the log");
        }
        inner
            .state
            .annotations_by_media
            .entry(media_id.to_string())
            .or_default()
            .push(annotation);

        tracing::debug!(media_id, annotation_id = id.as_str(), "Added annotation");
        self.publish(&inner);

        return Ok(id);
    }

    /// Returns whether anything was removed. Unknown ids are a no-op.
    pub fn remove_annotation(&self, id: &str) -> bool {
        let mut inner = self.lock();
        let mut removed = false;
        for annotations in inner.state.annotations_by_media.values_mut() {
            let before = annotations.len();
            annotations.retain(|annotation| return annotation.id != id);
            removed = removed || annotations.len() != before;
        }
        inner
            .state
            .annotations_by_media
            .retain(|_, annotations| return !annotations.is_empty());

        if removed {
            tracing::debug!(annotation_id = id, "Removed annotation");
            self.publish(&inner);
        }

        return removed;
    }

    pub fn apply(&self, intent: Intent) -> Result<Outcome, SessionError> {
        match intent {
            Intent::AddAnnotation(media_id, text, position) => {
                let id = self.add_annotation(&media_id, &text, position)?;
                return Ok(Outcome::AnnotationAdded(id));
            }
            Intent::CancelPending() => {
                return Ok(Outcome::Cancelled(self.cancel_all()));
            }
            Intent::RemoveAnnotation(id) => {
                return Ok(Outcome::AnnotationRemoved(self.remove_annotation(&id)));
            }
            Intent::SelectMessage(id) => {
                self.select_message(id.as_deref());
                return Ok(Outcome::Selected(id));
            }
            Intent::SendMessage(drafts) => {
                return Ok(Outcome::Sent(self.send_message(drafts)?));
            }
            Intent::ToggleAnnotationMode() => {
                return Ok(Outcome::AnnotationMode(self.toggle_annotation_mode()?));
            }
        }
    }
}
