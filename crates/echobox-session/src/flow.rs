// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-chat feedback collection state machine.
//!
//! A [`Session`] exists only while a feedback flow is in progress; the
//! idle state is the absence of a session in the registry. Events that
//! make no sense for the current step never advance the machine — they
//! re-issue the step's prompt with a short nudge.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use echobox_core::{FeedbackDraft, FeedbackService, Prompt, UserEvent, UserIdentity};

use crate::prompts::{self, codes, SKIP_COMMAND};

/// Collection step the session is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    AwaitingRating,
    AwaitingCategory,
    AwaitingComment,
    AwaitingConfirmation,
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlowState::AwaitingRating => "awaiting-rating",
            FlowState::AwaitingCategory => "awaiting-category",
            FlowState::AwaitingComment => "awaiting-comment",
            FlowState::AwaitingConfirmation => "awaiting-confirmation",
        };
        write!(f, "{name}")
    }
}

/// What to send back after handling one event, and whether the session
/// is finished.
#[derive(Debug)]
pub struct FlowReply {
    pub prompts: Vec<Prompt>,
    pub done: bool,
}

impl FlowReply {
    fn send(prompt: Prompt) -> Self {
        Self {
            prompts: vec![prompt],
            done: false,
        }
    }

    fn finish(prompt: Prompt) -> Self {
        Self {
            prompts: vec![prompt],
            done: true,
        }
    }
}

/// One user's in-progress feedback flow.
pub struct Session {
    user: UserIdentity,
    state: FlowState,
    draft: FeedbackDraft,
    /// Shown in the submission confirmation, when configured.
    sheet_url: Option<String>,
    last_activity: Instant,
}

impl Session {
    /// Starts a fresh flow at the rating step.
    pub fn new(user: UserIdentity, sheet_url: Option<String>) -> Self {
        Self {
            user,
            state: FlowState::AwaitingRating,
            draft: FeedbackDraft::default(),
            sheet_url,
            last_activity: Instant::now(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// How long since this session last handled an event.
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Opening prompt for a newly created session.
    pub fn opening_prompt(&self) -> Prompt {
        prompts::rating_prompt()
    }

    /// Advances the machine by one event.
    ///
    /// `done: true` in the reply means the flow ended (submitted,
    /// cancelled, or failed) and the session should be dropped.
    pub async fn handle(&mut self, event: &UserEvent, service: &dyn FeedbackService) -> FlowReply {
        self.last_activity = Instant::now();

        // Cancel works the same at every step.
        if matches!(event, UserEvent::Cancel)
            || matches!(event, UserEvent::Select(data) if data == codes::CANCEL)
        {
            info!(user_id = self.user.id, state = %self.state, "flow cancelled");
            return FlowReply::finish(prompts::cancelled());
        }

        match self.state {
            FlowState::AwaitingRating => self.on_rating(event),
            FlowState::AwaitingCategory => self.on_category(event),
            FlowState::AwaitingComment => self.on_comment(event),
            FlowState::AwaitingConfirmation => self.on_confirmation(event, service).await,
        }
    }

    fn on_rating(&mut self, event: &UserEvent) -> FlowReply {
        if let UserEvent::Select(data) = event {
            if let Some(rating) = codes::rating_from_data(data) {
                self.draft.rating = Some(rating);
                self.state = FlowState::AwaitingCategory;
                debug!(user_id = self.user.id, rating = rating.value(), "rating chosen");
                return FlowReply::send(prompts::category_prompt());
            }
            warn!(user_id = self.user.id, data = %data, "unexpected callback at rating step");
        }
        FlowReply::send(prompts::rating_nudge())
    }

    fn on_category(&mut self, event: &UserEvent) -> FlowReply {
        if let UserEvent::Select(data) = event {
            if let Some(category) = codes::category_from_data(data) {
                self.draft.category = Some(category);
                self.state = FlowState::AwaitingComment;
                debug!(user_id = self.user.id, category = %category, "category chosen");
                return FlowReply::send(prompts::comment_prompt());
            }
            warn!(user_id = self.user.id, data = %data, "unexpected callback at category step");
        }
        FlowReply::send(prompts::category_nudge())
    }

    fn on_comment(&mut self, event: &UserEvent) -> FlowReply {
        match event {
            UserEvent::Text(text) => {
                let trimmed = text.trim();
                self.draft.comment = if trimmed == SKIP_COMMAND {
                    Some(String::new())
                } else {
                    Some(trimmed.to_string())
                };
                self.state = FlowState::AwaitingConfirmation;
                FlowReply::send(prompts::confirmation_prompt(&self.draft))
            }
            _ => FlowReply::send(prompts::comment_prompt()),
        }
    }

    async fn on_confirmation(
        &mut self,
        event: &UserEvent,
        service: &dyn FeedbackService,
    ) -> FlowReply {
        let UserEvent::Select(data) = event else {
            return FlowReply::send(prompts::confirmation_nudge(&self.draft));
        };

        match data.as_str() {
            codes::SUBMIT => match service.submit(&self.user, self.draft.clone()).await {
                Ok(record_ref) => {
                    info!(user_id = self.user.id, row = record_ref.0, "feedback submitted");
                    FlowReply::finish(prompts::submitted(self.sheet_url.as_deref()))
                }
                Err(err) => {
                    // The draft is discarded; the user restarts from the menu.
                    warn!(user_id = self.user.id, error = %err, "feedback submission failed");
                    FlowReply::finish(prompts::store_failure())
                }
            },
            codes::EDIT => {
                self.draft = FeedbackDraft::default();
                self.state = FlowState::AwaitingRating;
                debug!(user_id = self.user.id, "draft reset for editing");
                FlowReply::send(prompts::rating_prompt())
            }
            _ => {
                warn!(user_id = self.user.id, data = %data, "unexpected callback at confirmation step");
                FlowReply::send(prompts::confirmation_nudge(&self.draft))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use echobox_core::{
        Category, EchoboxError, Rating, RecordRef, StatisticsSnapshot, StoreErrorKind,
    };
    use tokio::sync::Mutex;

    struct MockService {
        submissions: Mutex<Vec<FeedbackDraft>>,
        fail: bool,
    }

    impl MockService {
        fn new() -> Self {
            Self {
                submissions: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                submissions: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl FeedbackService for MockService {
        async fn submit(
            &self,
            _user: &UserIdentity,
            draft: FeedbackDraft,
        ) -> Result<RecordRef, EchoboxError> {
            if self.fail {
                return Err(EchoboxError::store(
                    StoreErrorKind::Connectivity,
                    "store down",
                ));
            }
            let mut submissions = self.submissions.lock().await;
            submissions.push(draft);
            Ok(RecordRef(submissions.len() as u64 + 1))
        }

        async fn statistics(&self, _force_refresh: bool) -> StatisticsSnapshot {
            StatisticsSnapshot::default()
        }
    }

    fn user() -> UserIdentity {
        UserIdentity {
            id: 1,
            username: "alice".into(),
            first_name: "Alice".into(),
            last_name: String::new(),
        }
    }

    fn select(data: &str) -> UserEvent {
        UserEvent::Select(data.to_string())
    }

    fn text(t: &str) -> UserEvent {
        UserEvent::Text(t.to_string())
    }

    /// Drives a session through rating, category, and comment.
    async fn walk_to_confirmation(
        session: &mut Session,
        service: &MockService,
        comment: &str,
    ) {
        session.handle(&select("rate_5"), service).await;
        session.handle(&select("type_thanks"), service).await;
        session.handle(&text(comment), service).await;
        assert_eq!(session.state(), FlowState::AwaitingConfirmation);
    }

    #[tokio::test]
    async fn happy_path_submits_chosen_values() {
        let service = MockService::new();
        let mut session = Session::new(user(), None);

        walk_to_confirmation(&mut session, &service, "Great!").await;
        let reply = session.handle(&select("submit"), &service).await;
        assert!(reply.done);
        assert!(reply.prompts[0].text.contains("Thank you"));

        let submissions = service.submissions.lock().await;
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].rating, Rating::new(5));
        assert_eq!(submissions[0].category, Some(Category::Thanks));
        assert_eq!(submissions[0].comment.as_deref(), Some("Great!"));
    }

    #[tokio::test]
    async fn every_rating_category_combination_appends_one_record() {
        for value in 1..=5u8 {
            for category in Category::ALL {
                let service = MockService::new();
                let mut session = Session::new(user(), None);

                session.handle(&select(&codes::rate(value)), &service).await;
                session
                    .handle(&select(&codes::category(category)), &service)
                    .await;
                session.handle(&text("ok"), &service).await;
                let reply = session.handle(&select("submit"), &service).await;
                assert!(reply.done);

                let submissions = service.submissions.lock().await;
                assert_eq!(submissions.len(), 1);
                assert_eq!(submissions[0].rating, Rating::new(value));
                assert_eq!(submissions[0].category, Some(category));
            }
        }
    }

    #[tokio::test]
    async fn skip_command_records_empty_comment() {
        let service = MockService::new();
        let mut session = Session::new(user(), None);

        walk_to_confirmation(&mut session, &service, "/skip").await;
        session.handle(&select("submit"), &service).await;

        let submissions = service.submissions.lock().await;
        assert_eq!(submissions[0].comment.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn text_at_rating_step_does_not_advance() {
        let service = MockService::new();
        let mut session = Session::new(user(), None);

        let reply = session.handle(&text("five stars"), &service).await;
        assert!(!reply.done);
        assert_eq!(session.state(), FlowState::AwaitingRating);
        assert!(reply.prompts[0].menu.is_some());
    }

    #[tokio::test]
    async fn malformed_rating_callback_is_absorbed() {
        let service = MockService::new();
        let mut session = Session::new(user(), None);

        for bad in ["rate_0", "rate_9", "rate_x", "type_bug", "submit", "garbage"] {
            let reply = session.handle(&select(bad), &service).await;
            assert!(!reply.done, "callback {bad:?} must not end the flow");
            assert_eq!(session.state(), FlowState::AwaitingRating);
        }
    }

    #[tokio::test]
    async fn cancel_works_at_every_step() {
        let service = MockService::new();

        for steps in 0..4usize {
            let mut session = Session::new(user(), None);
            let walk: [UserEvent; 3] =
                [select("rate_3"), select("type_idea"), text("hmm")];
            for event in walk.iter().take(steps) {
                session.handle(event, &service).await;
            }

            let reply = session.handle(&select("cancel"), &service).await;
            assert!(reply.done, "cancel must finish at step {steps}");
            assert!(reply.prompts[0].text.contains("cancelled"));
        }
        assert!(service.submissions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn edit_resets_draft_to_rating_step() {
        let service = MockService::new();
        let mut session = Session::new(user(), None);

        walk_to_confirmation(&mut session, &service, "first try").await;
        let reply = session.handle(&select("edit"), &service).await;
        assert!(!reply.done);
        assert_eq!(session.state(), FlowState::AwaitingRating);

        // The re-entered flow carries none of the old answers.
        session.handle(&select("rate_2"), &service).await;
        session.handle(&select("type_bug"), &service).await;
        session.handle(&text("second try"), &service).await;
        session.handle(&select("submit"), &service).await;

        let submissions = service.submissions.lock().await;
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].rating, Rating::new(2));
        assert_eq!(submissions[0].category, Some(Category::Bug));
        assert_eq!(submissions[0].comment.as_deref(), Some("second try"));
    }

    #[tokio::test]
    async fn store_failure_ends_flow_and_discards_draft() {
        let service = MockService::failing();
        let mut session = Session::new(user(), None);

        walk_to_confirmation(&mut session, &service, "lost").await;
        let reply = session.handle(&select("submit"), &service).await;
        assert!(reply.done);
        assert!(reply.prompts[0].text.contains("went wrong"));
        assert!(service.submissions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn text_at_confirmation_reissues_summary() {
        let service = MockService::new();
        let mut session = Session::new(user(), None);

        walk_to_confirmation(&mut session, &service, "detail").await;
        let reply = session.handle(&text("yes please"), &service).await;
        assert!(!reply.done);
        assert_eq!(session.state(), FlowState::AwaitingConfirmation);
        assert!(reply.prompts[0].text.contains("detail"));
    }
}
