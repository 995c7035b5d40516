use crate::presenter::PresenterInputs;
use crate::session::{FormSnapshot, InteractionState, SubmitOutcome, SubmitSource};
use crate::traits::{Notification, Notifier, SuggestionProvider};
use emojiassist_core::examples::example_text;
use emojiassist_core::types::SuggestionRequest;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct FormInner {
    text: String,
    state: InteractionState,
    has_searched: bool,
    validation_message: Option<String>,
}

/// Owns the interaction state and runs submissions through validation and the provider.
///
/// At most one suggestion request is in flight: the Loading check and the transition into
/// Loading happen under the same lock, which is released while the provider runs.
pub struct EmojiSuggestionForm {
    provider: Arc<dyn SuggestionProvider>,
    notifier: Arc<dyn Notifier>,
    inner: Mutex<FormInner>,
}

impl EmojiSuggestionForm {
    pub fn new(provider: Arc<dyn SuggestionProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            provider,
            notifier,
            inner: Mutex::new(FormInner::default()),
        }
    }

    /// Edits the text field. Typing stays possible while a request is in flight.
    pub async fn set_text(&self, text: impl Into<String>) {
        self.inner.lock().await.text = text.into();
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.state.is_loading()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let inner = self.inner.lock().await;
        FormSnapshot {
            text: inner.text.clone(),
            state: inner.state.clone(),
            has_searched: inner.has_searched,
            validation_message: inner.validation_message.clone(),
        }
    }

    pub async fn presenter_inputs(&self) -> PresenterInputs {
        let inner = self.inner.lock().await;
        let (emojis, detected_language) = match &inner.state {
            InteractionState::Success(resp) => {
                (resp.emojis.clone(), resp.detected_language.clone())
            }
            _ => (Vec::new(), None),
        };
        let error = match &inner.state {
            InteractionState::Failure(msg) => Some(msg.clone()),
            _ => None,
        };

        PresenterInputs {
            emojis,
            is_loading: inner.state.is_loading(),
            error,
            has_searched: inner.has_searched,
            detected_language,
            input_text: inner.text.clone(),
        }
    }

    /// Submits whatever is currently in the text field.
    pub async fn submit(&self, source: SubmitSource) -> SubmitOutcome {
        let request = {
            let mut inner = self.inner.lock().await;
            match begin_submission(&mut inner) {
                Ok(req) => req,
                Err(outcome) => return outcome,
            }
        };
        self.dispatch(request, source).await
    }

    /// Replaces the text and submits it in one step (example clicks, dictation).
    ///
    /// While a request is in flight the text is left untouched and nothing is dispatched.
    pub async fn submit_text(
        &self,
        text: impl Into<String>,
        source: SubmitSource,
    ) -> SubmitOutcome {
        let request = {
            let mut inner = self.inner.lock().await;
            if inner.state.is_loading() {
                log::debug!("submit ignored: request already in flight ({source:?})");
                return SubmitOutcome::Ignored;
            }
            inner.text = text.into();
            match begin_submission(&mut inner) {
                Ok(req) => req,
                Err(outcome) => return outcome,
            }
        };
        self.dispatch(request, source).await
    }

    /// Fills in one of the built-in examples and submits it.
    pub async fn submit_example(&self, index: usize) -> Option<SubmitOutcome> {
        let example = example_text(index)?;
        Some(self.submit_text(example.text, SubmitSource::Example).await)
    }

    async fn dispatch(&self, request: SuggestionRequest, source: SubmitSource) -> SubmitOutcome {
        log::info!(
            "requesting suggestions ({source:?}, {} chars)",
            request.text().chars().count()
        );

        let t0 = Instant::now();
        let result = self.provider.suggest(&request).await;
        let elapsed_ms = t0.elapsed().as_millis();

        let mut inner = self.inner.lock().await;
        match result {
            Ok(resp) => {
                log::info!("received {} suggestions in {elapsed_ms}ms", resp.emojis.len());
                inner.state = InteractionState::Success(resp.clone());
                SubmitOutcome::Succeeded(resp)
            }
            Err(e) => {
                let reason = format!("{e:#}");
                log::error!("suggestion request failed after {elapsed_ms}ms: {reason}");

                let message = format!("Failed to get suggestions. {reason}");
                inner.state = InteractionState::Failure(message.clone());
                drop(inner);

                self.notifier.notify(Notification::error(
                    "Error",
                    format!("Could not fetch emoji suggestions. {reason}"),
                ));
                SubmitOutcome::Failed(message)
            }
        }
    }
}

fn begin_submission(inner: &mut FormInner) -> Result<SuggestionRequest, SubmitOutcome> {
    if inner.state.is_loading() {
        log::debug!("submit ignored: request already in flight");
        return Err(SubmitOutcome::Ignored);
    }

    // An invalid submit leaves whatever was on screen before.
    let previous = std::mem::replace(&mut inner.state, InteractionState::Validating);

    match SuggestionRequest::new(inner.text.clone()) {
        Ok(request) => {
            inner.state = InteractionState::Loading;
            inner.validation_message = None;
            inner.has_searched = true;
            Ok(request)
        }
        Err(e) => {
            inner.state = previous;
            inner.validation_message = Some(e.to_string());
            Err(SubmitOutcome::Invalid(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NotificationLevel;
    use emojiassist_core::types::SuggestionResponse;
    use emojiassist_core::validation::ValidationError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingNotifier {
        seen: std::sync::Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    struct FixedProvider {
        result: Result<Vec<&'static str>, &'static str>,
        calls: AtomicUsize,
        texts: std::sync::Mutex<Vec<String>>,
    }

    impl FixedProvider {
        fn ok(emojis: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(emojis),
                calls: AtomicUsize::new(0),
                texts: Default::default(),
            })
        }

        fn failing(reason: &'static str) -> Arc<Self> {
            Arc::new(Self {
                result: Err(reason),
                calls: AtomicUsize::new(0),
                texts: Default::default(),
            })
        }
    }

    #[async_trait::async_trait]
    impl SuggestionProvider for FixedProvider {
        async fn suggest(&self, request: &SuggestionRequest) -> anyhow::Result<SuggestionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.texts.lock().unwrap().push(request.text().to_string());
            match &self.result {
                Ok(emojis) => Ok(SuggestionResponse::new(
                    emojis.iter().map(|e| e.to_string()).collect(),
                )),
                Err(reason) => Err(anyhow::anyhow!(*reason)),
            }
        }
    }

    /// Holds the request open until the test releases it.
    struct GatedProvider {
        gate: tokio::sync::Notify,
        started: tokio::sync::Notify,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SuggestionProvider for GatedProvider {
        async fn suggest(
            &self,
            _request: &SuggestionRequest,
        ) -> anyhow::Result<SuggestionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.gate.notified().await;
            Ok(SuggestionResponse::new(vec!["🐱".into()]))
        }
    }

    fn form_with(
        provider: Arc<dyn SuggestionProvider>,
    ) -> (EmojiSuggestionForm, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (EmojiSuggestionForm::new(provider, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn success_stores_ordered_emojis() {
        let provider = FixedProvider::ok(vec!["🎂", "🎉"]);
        let (form, notifier) = form_with(provider.clone());

        form.set_text("Happy birthday!").await;
        let outcome = form.submit(SubmitSource::Manual).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Succeeded(SuggestionResponse::new(vec!["🎂".into(), "🎉".into()]))
        );
        let inputs = form.presenter_inputs().await;
        assert_eq!(inputs.emojis, vec!["🎂", "🎉"]);
        assert!(!inputs.is_loading);
        assert_eq!(inputs.error, None);
        assert!(inputs.has_searched);
        assert!(notifier.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_sets_error_clears_emojis_and_notifies() {
        let provider = FixedProvider::failing("network unreachable");
        let (form, notifier) = form_with(provider);

        form.set_text("Cat").await;
        let outcome = form.submit(SubmitSource::Manual).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed("Failed to get suggestions. network unreachable".into())
        );

        let inputs = form.presenter_inputs().await;
        assert!(inputs.has_searched);
        assert!(inputs.emojis.is_empty());
        assert_eq!(
            inputs.error.as_deref(),
            Some("Failed to get suggestions. network unreachable")
        );

        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, NotificationLevel::Error);
        assert_eq!(
            seen[0].description,
            "Could not fetch emoji suggestions. network unreachable"
        );
    }

    #[tokio::test]
    async fn invalid_text_never_reaches_provider() {
        let provider = FixedProvider::ok(vec!["🐱"]);
        let (form, _) = form_with(provider.clone());

        let outcome = form.submit(SubmitSource::Manual).await;
        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::Empty));

        let snap = form.snapshot().await;
        assert_eq!(snap.state, InteractionState::Idle);
        assert!(!snap.has_searched);
        assert_eq!(snap.validation_message.as_deref(), Some("Please enter some text."));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        form.set_text("x".repeat(501)).await;
        let outcome = form.submit(SubmitSource::Manual).await;
        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::TooLong { max: 500 }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_submit_keeps_previous_results() {
        let provider = FixedProvider::ok(vec!["🐱"]);
        let (form, _) = form_with(provider);

        form.submit_text("Cat", SubmitSource::Manual).await;
        form.set_text("").await;
        form.submit(SubmitSource::Manual).await;

        let snap = form.snapshot().await;
        assert!(matches!(snap.state, InteractionState::Success(_)));
        assert!(snap.validation_message.is_some());

        // A valid submit clears the inline message again.
        form.submit_text("Dog", SubmitSource::Manual).await;
        assert_eq!(form.snapshot().await.validation_message, None);
    }

    #[tokio::test]
    async fn submit_while_loading_is_a_no_op() {
        let provider = Arc::new(GatedProvider {
            gate: tokio::sync::Notify::new(),
            started: tokio::sync::Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let (form, _) = form_with(provider.clone());
        let form = Arc::new(form);

        form.set_text("Cat").await;
        let first = {
            let form = form.clone();
            tokio::spawn(async move { form.submit(SubmitSource::Manual).await })
        };
        provider.started.notified().await;
        assert!(form.is_loading().await);

        let second = form.submit_text("Dog", SubmitSource::Example).await;
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(form.submit(SubmitSource::Manual).await, SubmitOutcome::Ignored);
        assert_eq!(form.snapshot().await.text, "Cat");
        assert_eq!(form.snapshot().await.state, InteractionState::Loading);

        provider.gate.notify_one();
        let first = first.await.unwrap();
        assert!(matches!(first, SubmitOutcome::Succeeded(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn example_click_submits_example_text_once() {
        let provider = FixedProvider::ok(vec!["🐈"]);
        let (form, _) = form_with(provider.clone());

        let outcome = form.submit_example(1).await;
        assert!(matches!(outcome, Some(SubmitOutcome::Succeeded(_))));
        assert_eq!(*provider.texts.lock().unwrap(), vec!["貓咪".to_string()]);
        assert_eq!(form.snapshot().await.text, "貓咪");

        assert_eq!(form.submit_example(99).await, None);
    }

    #[tokio::test]
    async fn raw_text_is_sent_without_trimming() {
        let provider = FixedProvider::ok(vec![]);
        let (form, _) = form_with(provider.clone());

        form.submit_text("  Cat \n", SubmitSource::Manual).await;
        assert_eq!(*provider.texts.lock().unwrap(), vec!["  Cat \n".to_string()]);
    }

    #[tokio::test]
    async fn empty_success_is_not_an_error() {
        let provider = FixedProvider::ok(vec![]);
        let (form, notifier) = form_with(provider);

        form.submit_text("qwzx", SubmitSource::Manual).await;
        let inputs = form.presenter_inputs().await;
        assert!(inputs.emojis.is_empty());
        assert_eq!(inputs.error, None);
        assert!(inputs.has_searched);
        assert!(notifier.seen.lock().unwrap().is_empty());
    }
}
