pub mod feedback;
pub mod validation;

pub use self::feedback::ERROR_DISPLAY;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, instrument};

use crate::{
    api,
    form::feedback::ErrorSlot,
    session::{Navigator, SessionStore},
};

/// Storage key for the persisted user identifier.
pub const SESSION_KEY: &str = "userId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Signup,
}

impl FormKind {
    #[must_use]
    pub fn success_route(self) -> &'static str {
        match self {
            Self::Login => "/header",
            Self::Signup => "/welcome",
        }
    }
}

/// Raw field state, keyed by the form's field identifiers.
#[derive(Debug, Default, Clone)]
pub struct Inputs {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    /// Used only for the equality check, never transmitted.
    pub confirm_password: String,
}

/// Outcome of a submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A validation rule failed; its message is showing in the error slot.
    Rejected,
    /// Another submission is still outstanding; nothing was done.
    InFlight,
    /// The request failed or carried no user identifier; logged, not shown.
    Failed,
    /// Session record committed and navigation requested.
    Authenticated { user_id: String },
}

/// Credential submission workflow for one form instance.
///
/// Field edits, the CAPTCHA callback, and submits may arrive from independent
/// tasks; state lives behind interior mutability so the instance can be
/// shared. At most one submission is in flight at a time.
pub struct Form {
    kind: FormKind,
    base_url: String,
    inputs: Mutex<Inputs>,
    captcha_valid: AtomicBool,
    submitting: AtomicBool,
    error: ErrorSlot,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl Form {
    #[must_use]
    pub fn login(base_url: &str, store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(FormKind::Login, base_url, store, navigator)
    }

    #[must_use]
    pub fn signup(
        base_url: &str,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(FormKind::Signup, base_url, store, navigator)
    }

    fn new(
        kind: FormKind,
        base_url: &str,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            kind,
            base_url: base_url.to_string(),
            inputs: Mutex::new(Inputs::default()),
            captcha_valid: AtomicBool::new(false),
            submitting: AtomicBool::new(false),
            error: ErrorSlot::default(),
            store,
            navigator,
        }
    }

    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Record a field edit, keyed by field identifier.
    pub fn set_field(&self, field: &str, value: &str) {
        let mut inputs = self.inputs.lock().unwrap_or_else(PoisonError::into_inner);

        match field {
            "username" => inputs.username = value.to_string(),
            "email" => inputs.email = value.to_string(),
            "phoneNumber" => inputs.phone_number = value.to_string(),
            "password" => inputs.password = value.to_string(),
            "confirmPassword" => inputs.confirm_password = value.to_string(),
            unknown => debug!("ignoring edit for unknown field: {}", unknown),
        }
    }

    /// CAPTCHA collaborator callback: verified only while a non-empty token
    /// is present.
    pub fn on_captcha(&self, token: Option<&str>) {
        let valid = token.map_or(false, |value| !value.is_empty());
        self.captcha_valid.store(valid, Ordering::SeqCst);
    }

    /// Currently displayed validation message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error.current()
    }

    /// Handle a submit event: validate, then issue at most one request to the
    /// authentication API.
    #[instrument(skip(self), fields(kind = ?self.kind))]
    pub async fn submit(&self) -> Submission {
        if self.submitting.swap(true, Ordering::SeqCst) {
            debug!("submission already in flight");
            return Submission::InFlight;
        }

        let outcome = self.run_submission().await;
        self.submitting.store(false, Ordering::SeqCst);

        outcome
    }

    async fn run_submission(&self) -> Submission {
        // snapshot, so edits during the request cannot change the payload
        let inputs = self
            .inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let captcha_valid = self.captcha_valid.load(Ordering::SeqCst);

        if let Err(message) = validation::validate(self.kind, &inputs, captcha_valid) {
            self.error.show(message);
            return Submission::Rejected;
        }

        let result = match self.kind {
            FormKind::Login => api::login(&self.base_url, &inputs.email, &inputs.password).await,
            FormKind::Signup => {
                api::signup(
                    &self.base_url,
                    &inputs.username,
                    &inputs.email,
                    &inputs.phone_number,
                    &inputs.password,
                )
                .await
            }
        };

        match result {
            Ok(user_id) => {
                if let Err(err) = self.store.set(SESSION_KEY, &user_id) {
                    error!("failed to persist session record: {:?}", err);
                }

                self.navigator.mark_authenticated();
                self.navigator.navigate(self.kind.success_route());

                Submission::Authenticated { user_id }
            }
            Err(err) => {
                // request failures are logged only, the form shows no message
                error!("authentication request failed: {:?}", err);

                Submission::Failed
            }
        }
    }
}
