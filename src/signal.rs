use crate::components::email::FormSlot;
use crate::components::faq::PanelId;
use crate::effects::language::LanguageSelect;

/// Which observer reported a visibility change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watch {
    FeatureCard,
    FaqItem,
    Video,
}

/// Inbound events the page reacts to. The host translates DOM events and
/// elapsed timers into these.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal<N> {
    PageLoaded,
    EmailInput(FormSlot),
    EmailSubmit(FormSlot),
    FaqClick(PanelId),
    FaqKey { panel: PanelId, key: String },
    FaqHoverEnter(PanelId),
    FaqHoverLeave(PanelId),
    /// Keydown anywhere on the page.
    KeyDown(String),
    Scroll { y: f64, viewport_height: f64 },
    Visibility { watch: Watch, target: N, visible: bool },
    MediaError(N),
    LanguageChanged(LanguageSelect),
    ScrollIndicator,
    SignIn,
    PhoneLink,
    TimerElapsed(Task<N>),
}

/// A continuation that runs once its delay has elapsed.
#[derive(Clone, Debug, PartialEq)]
pub enum Task<N> {
    HideSplash,
    RemoveNode(N),
    RevertSubmit(FormSlot),
    SettlePanel { panel: PanelId, generation: u32 },
    ExpandRipple(N),
    ScrollIntoView(N),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Deferred<N> {
    pub after_ms: u32,
    pub task: Task<N>,
}

/// Timer continuations requested while handling one signal.
#[derive(Debug)]
pub struct Schedule<N> {
    pending: Vec<Deferred<N>>,
}

impl<N> Schedule<N> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    pub fn after(&mut self, after_ms: u32, task: Task<N>) {
        self.pending.push(Deferred { after_ms, task });
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn into_vec(self) -> Vec<Deferred<N>> {
        self.pending
    }
}

impl<N> Default for Schedule<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// What the host should do after a signal was handled.
#[derive(Debug)]
pub struct Reaction<N> {
    pub prevent_default: bool,
    pub deferred: Vec<Deferred<N>>,
}

impl<N> Reaction<N> {
    pub fn new(schedule: Schedule<N>) -> Self {
        Self {
            prevent_default: false,
            deferred: schedule.into_vec(),
        }
    }
}
