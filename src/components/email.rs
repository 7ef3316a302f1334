use std::sync::OnceLock;

use log::{debug, info, warn};
use regex::Regex;
use thiserror::Error;

use crate::config::LandingConfig;
use crate::signal::{Schedule, Task};
use crate::surface::{KeyValueStore, PresentationSurface};

const ERROR_BORDER: &str = "var(--netflix-red)";
const IDLE_BORDER: &str = "var(--border-color)";

const SUCCESS_MARKUP: &str = r#"
        <svg width="24" height="24" viewBox="0 0 24 24" fill="none">
            <path d="M20 6L9 17L4 12" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>
        </svg>
        Success!
    "#;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap()
    })
}

// Browsers count the byte order mark as whitespace when trimming form input.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Empty,
    MalformedFormat,
    Valid(String),
}

/// Why a submit was turned down. The message is what the user sees.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Email is required.")]
    Empty,
    #[error("Please enter a valid email address.")]
    MalformedFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(String),
    Rejected(Rejection),
}

/// Trims the candidate and checks it against `<local>@<domain>.<tld>`.
pub fn validate(candidate: &str) -> Validation {
    let email = candidate.trim_matches(is_blank);
    if email.is_empty() {
        Validation::Empty
    } else if !email_pattern().is_match(email) {
        Validation::MalformedFormat
    } else {
        Validation::Valid(email.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormSlot {
    Header,
    Footer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFormState {
    pub raw_input: String,
    pub last_error: Option<Rejection>,
}

#[cfg(test)]
impl EmailFormState {
    pub fn last_error_message(&self) -> Option<String> {
        self.last_error.map(|e| e.to_string())
    }
}

#[derive(Debug)]
struct EmailForm<N> {
    slot: FormSlot,
    state: EmailFormState,
    input: N,
    button: N,
    error: Option<N>,
    idle_markup: String,
}

/// The header and footer signup forms. They validate the same way but keep
/// separate state; both write to the same storage key.
pub struct EmailCapture<N> {
    forms: Vec<EmailForm<N>>,
    storage_key: String,
    revert_ms: u32,
}

impl<N: Clone + PartialEq> EmailCapture<N> {
    pub fn discover<S>(surface: &S, config: &LandingConfig) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        let mut forms = Vec::new();

        if let (Some(input), Some(button)) = (
            surface.find_by_id("emailInput"),
            surface.find_by_id("getStartedBtn"),
        ) {
            forms.push(EmailForm {
                slot: FormSlot::Header,
                state: EmailFormState::default(),
                idle_markup: surface.markup(&button),
                error: surface.find_by_id("emailError"),
                input,
                button,
            });
        }

        if let Some(form) = surface.query_first(None, ".cta-section .email-signup") {
            let input = surface.query_first(Some(&form), ".email-input");
            let button = surface.query_first(Some(&form), ".btn-primary");
            if let (Some(input), Some(button)) = (input, button) {
                // The footer markup usually has no message slot of its own.
                let error = surface
                    .query_first(Some(&form), ".email-error")
                    .or_else(|| surface.create_transient_node(&form, "email-error"));
                forms.push(EmailForm {
                    slot: FormSlot::Footer,
                    state: EmailFormState::default(),
                    idle_markup: surface.markup(&button),
                    error,
                    input,
                    button,
                });
            }
        }

        debug!("Found {} email form(s)", forms.len());
        Self {
            forms,
            storage_key: config.storage_key.clone(),
            revert_ms: config.timings.submit_revert,
        }
    }

    /// `(slot, input, button)` for every form on the page.
    pub fn bindings(&self) -> Vec<(FormSlot, N, N)> {
        self.forms
            .iter()
            .map(|f| (f.slot, f.input.clone(), f.button.clone()))
            .collect()
    }

    #[cfg(test)]
    pub fn state(&self, slot: FormSlot) -> Option<&EmailFormState> {
        self.forms.iter().find(|f| f.slot == slot).map(|f| &f.state)
    }

    pub fn current_input<S>(&self, surface: &S, slot: FormSlot) -> String
    where
        S: PresentationSurface<Node = N>,
    {
        self.form(slot)
            .map(|f| surface.value(&f.input))
            .unwrap_or_default()
    }

    fn form(&self, slot: FormSlot) -> Option<&EmailForm<N>> {
        self.forms.iter().find(|f| f.slot == slot)
    }

    fn form_mut(&mut self, slot: FormSlot) -> Option<&mut EmailForm<N>> {
        self.forms.iter_mut().find(|f| f.slot == slot)
    }

    /// Any edit clears the previous rejection.
    pub fn on_input<S>(&mut self, surface: &S, slot: FormSlot, raw: String)
    where
        S: PresentationSurface<Node = N>,
    {
        let Some(form) = self.form_mut(slot) else {
            return;
        };
        form.state.raw_input = raw;
        form.state.last_error = None;
        if let Some(error) = &form.error {
            surface.toggle_class(error, "show", false);
        }
        surface.set_style_property(&form.input, "border-color", IDLE_BORDER);
    }

    pub fn submit<S, K>(
        &mut self,
        surface: &S,
        store: &K,
        schedule: &mut Schedule<N>,
        slot: FormSlot,
        candidate: &str,
    ) -> SubmitOutcome
    where
        S: PresentationSurface<Node = N>,
        K: KeyValueStore,
    {
        let outcome = match validate(candidate) {
            Validation::Empty => SubmitOutcome::Rejected(Rejection::Empty),
            Validation::MalformedFormat => SubmitOutcome::Rejected(Rejection::MalformedFormat),
            Validation::Valid(email) => {
                if let Err(e) = store.set_item(&self.storage_key, &email) {
                    warn!("Could not remember signup email: {}", e);
                }
                SubmitOutcome::Accepted(email)
            }
        };

        let revert_ms = self.revert_ms;
        let Some(form) = self.form_mut(slot) else {
            return outcome;
        };
        form.state.raw_input = candidate.to_string();

        match &outcome {
            SubmitOutcome::Rejected(reason) => {
                debug!("{:?} form rejected input: {:?}", slot, reason);
                form.state.last_error = Some(*reason);
                if let Some(error) = &form.error {
                    surface.set_text(error, &reason.to_string());
                    surface.toggle_class(error, "show", true);
                }
                surface.set_style_property(&form.input, "border-color", ERROR_BORDER);
                surface.focus(&form.input);
            }
            SubmitOutcome::Accepted(_) => {
                info!("Signup email captured from {:?} form", slot);
                form.state.last_error = None;
                surface.set_markup(&form.button, SUCCESS_MARKUP);
                schedule.after(revert_ms, Task::RevertSubmit(slot));
            }
        }

        outcome
    }

    /// Puts the submit button back to its idle prompt.
    pub fn revert<S>(&self, surface: &S, slot: FormSlot)
    where
        S: PresentationSurface<Node = N>,
    {
        if let Some(form) = self.form(slot) {
            surface.set_markup(&form.button, &form.idle_markup);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{drain_timers, FakeSurface, MemoryStore, NodeId};

    struct Fixture {
        surface: FakeSurface,
        header_input: NodeId,
        header_button: NodeId,
        header_error: NodeId,
        footer_input: NodeId,
        footer_button: NodeId,
    }

    fn fixture() -> Fixture {
        let surface = FakeSurface::new();
        let hero = surface.add(None, "section.hero");
        let header_input = surface.add(Some(hero), "input#emailInput");
        let header_button = surface.add(Some(hero), "button#getStartedBtn");
        surface.set_markup(&header_button, "Get Started");
        let header_error = surface.add(Some(hero), "div#emailError");

        let cta = surface.add(None, "section.cta-section");
        let form = surface.add(Some(cta), "div.email-signup");
        let footer_input = surface.add(Some(form), "input.email-input");
        let footer_button = surface.add(Some(form), "button.btn-primary");
        surface.set_markup(&footer_button, "Get Started");

        Fixture {
            surface,
            header_input,
            header_button,
            header_error,
            footer_input,
            footer_button,
        }
    }

    fn capture(fx: &Fixture) -> EmailCapture<NodeId> {
        EmailCapture::discover(&fx.surface, &LandingConfig::default())
    }

    #[test]
    fn test_validate_rejects_strings_without_at() {
        for s in ["plainaddress", "user.example.com", "x", "a.b.c"] {
            assert_eq!(validate(s), Validation::MalformedFormat, "{}", s);
        }
        assert_eq!(validate(""), Validation::Empty);
        assert_eq!(validate("   \t "), Validation::Empty);
    }

    #[test]
    fn test_validate_accepts_local_domain_tld() {
        for s in ["a@b.c", "user@example.com", "first.last@mail.example.co.uk", "x+tag@y.io"] {
            assert_eq!(validate(s), Validation::Valid(s.to_string()), "{}", s);
        }
    }

    #[test]
    fn test_validate_rejects_broken_shapes() {
        for s in ["a@b", "@b.c", "a@.c", "a@b.", "a b@c.d", "a@@b.c", "a@b c.d"] {
            assert_eq!(validate(s), Validation::MalformedFormat, "{}", s);
        }
    }

    #[test]
    fn test_validate_trims_and_is_idempotent() {
        let first = validate(" user@example.com ");
        assert_eq!(first, Validation::Valid("user@example.com".to_string()));
        if let Validation::Valid(email) = &first {
            assert_eq!(validate(email), first);
        }
    }

    #[test]
    fn test_rejection_messages_are_distinct() {
        assert_eq!(Rejection::Empty.to_string(), "Email is required.");
        assert_eq!(
            Rejection::MalformedFormat.to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_header_submit_scenario() {
        let fx = fixture();
        let store = MemoryStore::default();
        let mut capture = capture(&fx);
        let mut schedule = Schedule::new();

        let outcome = capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Header, "");
        assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::Empty));
        assert_eq!(store.get("userEmail"), None);
        assert_eq!(fx.surface.text(fx.header_error), "Email is required.");
        assert!(fx.surface.has_class(&fx.header_error, "show"));
        assert!(fx.surface.node(fx.header_input).focused);

        let outcome = capture.submit(
            &fx.surface,
            &store,
            &mut schedule,
            FormSlot::Header,
            "not-an-email",
        );
        assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::MalformedFormat));
        assert_eq!(store.get("userEmail"), None);
        assert_eq!(
            capture.state(FormSlot::Header).unwrap().last_error_message().as_deref(),
            Some("Please enter a valid email address.")
        );

        let outcome = capture.submit(
            &fx.surface,
            &store,
            &mut schedule,
            FormSlot::Header,
            "  a@b.co ",
        );
        assert_eq!(outcome, SubmitOutcome::Accepted("a@b.co".to_string()));
        assert_eq!(store.get("userEmail").as_deref(), Some("a@b.co"));
        assert_eq!(capture.state(FormSlot::Header).unwrap().last_error, None);
        assert!(schedule.into_vec().iter().any(|d| d.after_ms == 1500
            && d.task == Task::RevertSubmit(FormSlot::Header)));
    }

    #[test]
    fn test_footer_overwrites_and_invalid_never_writes() {
        let fx = fixture();
        let store = MemoryStore::default();
        let mut capture = capture(&fx);
        let mut schedule = Schedule::new();

        capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Header, "first@example.com");
        capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Footer, "second@example.com");
        assert_eq!(store.get("userEmail").as_deref(), Some("second@example.com"));

        let outcome = capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Footer, "nope@");
        assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::MalformedFormat));
        assert_eq!(store.get("userEmail").as_deref(), Some("second@example.com"));
        assert_eq!(
            fx.surface.style(fx.footer_input, "border-color").as_deref(),
            Some(ERROR_BORDER)
        );
    }

    #[test]
    fn test_forms_keep_separate_error_state() {
        let fx = fixture();
        let store = MemoryStore::default();
        let mut capture = capture(&fx);
        let mut schedule = Schedule::new();

        capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Footer, "");
        assert_eq!(capture.state(FormSlot::Footer).unwrap().last_error, Some(Rejection::Empty));
        assert_eq!(capture.state(FormSlot::Header).unwrap().last_error, None);
        assert!(!fx.surface.has_class(&fx.header_error, "show"));
    }

    #[test]
    fn test_input_clears_error() {
        let fx = fixture();
        let store = MemoryStore::default();
        let mut capture = capture(&fx);
        let mut schedule = Schedule::new();

        capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Header, "bad");
        capture.on_input(&fx.surface, FormSlot::Header, "bad@".to_string());

        let state = capture.state(FormSlot::Header).unwrap();
        assert_eq!(state.last_error, None);
        assert_eq!(state.raw_input, "bad@");
        assert!(!fx.surface.has_class(&fx.header_error, "show"));
        assert_eq!(
            fx.surface.style(fx.header_input, "border-color").as_deref(),
            Some(IDLE_BORDER)
        );
    }

    #[test]
    fn test_success_feedback_reverts_to_idle_prompt() {
        let fx = fixture();
        let store = MemoryStore::default();
        let mut capture = capture(&fx);
        let mut schedule = Schedule::new();

        capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Footer, "a@b.co");
        assert!(fx.surface.markup(&fx.footer_button).contains("Success!"));
        assert_eq!(fx.surface.markup(&fx.header_button), "Get Started");

        drain_timers(schedule.into_vec(), |task| {
            if let Task::RevertSubmit(slot) = task {
                capture.revert(&fx.surface, slot);
            }
            Vec::new()
        });
        assert_eq!(fx.surface.markup(&fx.footer_button), "Get Started");
    }

    #[test]
    fn test_refused_store_write_still_accepts() {
        let fx = fixture();
        let store = MemoryStore {
            refuse_writes: true,
            ..MemoryStore::default()
        };
        let mut capture = capture(&fx);
        let mut schedule = Schedule::new();

        let outcome = capture.submit(
            &fx.surface,
            &store,
            &mut schedule,
            FormSlot::Header,
            "a@b.co",
        );
        assert_eq!(outcome, SubmitOutcome::Accepted("a@b.co".to_string()));
    }

    #[test]
    fn test_footer_without_message_slot_still_shows_reason() {
        let fx = fixture();
        let store = MemoryStore::default();
        let mut capture = capture(&fx);
        let mut schedule = Schedule::new();

        let outcome = capture.submit(&fx.surface, &store, &mut schedule, FormSlot::Footer, "");
        assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::Empty));
        let shown: Vec<_> = fx
            .surface
            .query_all(None, ".cta-section .email-error")
            .into_iter()
            .filter(|n| fx.surface.has_class(n, "show"))
            .collect();
        assert_eq!(shown.len(), 1);
        assert_eq!(fx.surface.text(shown[0]), "Email is required.");

        capture.on_input(&fx.surface, FormSlot::Footer, "a".to_string());
        assert!(!fx.surface.has_class(&shown[0], "show"));
    }

    #[test]
    fn test_existing_footer_message_slot_is_reused() {
        let surface = FakeSurface::new();
        let cta = surface.add(None, "section.cta-section");
        let form = surface.add(Some(cta), "div.email-signup");
        surface.add(Some(form), "input.email-input");
        surface.add(Some(form), "button.btn-primary");
        let error = surface.add(Some(form), "div.email-error");
        let mut capture: EmailCapture<NodeId> =
            EmailCapture::discover(&surface, &LandingConfig::default());

        let store = MemoryStore::default();
        let mut schedule = Schedule::new();
        capture.submit(&surface, &store, &mut schedule, FormSlot::Footer, "nope");
        assert_eq!(surface.find_all_by_class(None, "email-error"), vec![error]);
        assert_eq!(surface.text(error), "Please enter a valid email address.");
    }

    #[test]
    fn test_validate_treats_byte_order_mark_as_whitespace() {
        assert_eq!(
            validate("\u{FEFF}a@b.c\u{FEFF}"),
            Validation::Valid("a@b.c".to_string())
        );
        assert_eq!(validate("\u{FEFF}"), Validation::Empty);
        assert_eq!(validate("a\u{FEFF}b@c.d"), Validation::MalformedFormat);
    }

    #[test]
    fn test_missing_footer_form_is_skipped() {
        let surface = FakeSurface::new();
        surface.add(None, "input#emailInput");
        surface.add(None, "button#getStartedBtn");
        let capture: EmailCapture<NodeId> =
            EmailCapture::discover(&surface, &LandingConfig::default());

        let slots: Vec<_> = capture.bindings().into_iter().map(|(slot, _, _)| slot).collect();
        assert_eq!(slots, vec![FormSlot::Header]);
    }
}
