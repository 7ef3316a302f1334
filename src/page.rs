use log::{debug, info};

use crate::components::email::{EmailCapture, FormSlot, SubmitOutcome};
use crate::components::faq::{self, FaqAccordion, PanelId};
use crate::config::LandingConfig;
use crate::effects::language::{LanguageMirror, LanguageSelect};
use crate::effects::media::VideoPlayback;
use crate::effects::reveal::Reveal;
use crate::effects::scroll::{NavbarShade, Parallax};
use crate::effects::splash::Splash;
use crate::signal::{Reaction, Schedule, Signal, Task, Watch};
use crate::surface::{KeyValueStore, PresentationSurface, ScrollBlock};

/// Elements the host has to subscribe to.
pub struct Bindings<N> {
    pub email_forms: Vec<(FormSlot, N, N)>,
    pub faq_questions: Vec<(PanelId, N)>,
    pub language_selects: Vec<(LanguageSelect, N)>,
    pub reveal_targets: Vec<(Watch, N)>,
    pub videos: Vec<N>,
    pub scroll_indicator: Option<N>,
    pub sign_in: Option<N>,
    pub phone_link: Option<N>,
}

/// Every interactive piece of the landing page, driven one signal at a time.
pub struct Page<S: PresentationSurface, K> {
    surface: S,
    store: K,
    email: EmailCapture<S::Node>,
    faq: FaqAccordion<S::Node>,
    splash: Splash<S::Node>,
    navbar: NavbarShade<S::Node>,
    parallax: Parallax<S::Node>,
    language: LanguageMirror<S::Node>,
    reveal: Reveal<S::Node>,
    videos: VideoPlayback<S::Node>,
    scroll_indicator: Option<S::Node>,
    features: Option<S::Node>,
    sign_in: Option<S::Node>,
    phone_link: Option<S::Node>,
}

impl<S: PresentationSurface, K: KeyValueStore> Page<S, K> {
    pub fn new(surface: S, store: K, config: &LandingConfig) -> Self {
        let faq = FaqAccordion::discover(&surface, &config.timings);
        let reveal = Reveal::discover(&surface, faq.items());

        Self {
            email: EmailCapture::discover(&surface, config),
            splash: Splash::discover(&surface, &config.timings),
            navbar: NavbarShade::discover(&surface, config),
            parallax: Parallax::discover(&surface, config),
            language: LanguageMirror::discover(&surface),
            videos: VideoPlayback::discover(&surface),
            scroll_indicator: surface.query_first(None, ".scroll-indicator"),
            features: surface.query_first(None, ".features"),
            sign_in: surface.query_first(None, ".btn-signin"),
            phone_link: surface.query_first(None, r#"a[href^="tel:"]"#),
            faq,
            reveal,
            surface,
            store,
        }
    }

    pub fn bindings(&self) -> Bindings<S::Node> {
        Bindings {
            email_forms: self.email.bindings(),
            faq_questions: self.faq.bindings(),
            language_selects: self.language.bindings(),
            reveal_targets: self.reveal.targets(),
            videos: self.videos.videos().to_vec(),
            scroll_indicator: self.scroll_indicator.clone(),
            sign_in: self.sign_in.clone(),
            phone_link: self.phone_link.clone(),
        }
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub fn email(&self) -> &EmailCapture<S::Node> {
        &self.email
    }

    #[cfg(test)]
    pub fn faq(&self) -> &FaqAccordion<S::Node> {
        &self.faq
    }

    pub fn dispatch(&mut self, signal: Signal<S::Node>) -> Reaction<S::Node> {
        let mut schedule = Schedule::new();
        let mut prevent_default = false;

        match signal {
            Signal::PageLoaded => self.splash.on_load(&mut schedule),
            Signal::EmailInput(slot) => {
                let raw = self.email.current_input(&self.surface, slot);
                self.email.on_input(&self.surface, slot, raw);
            }
            Signal::EmailSubmit(slot) => {
                let candidate = self.email.current_input(&self.surface, slot);
                let outcome = self
                    .email
                    .submit(&self.surface, &self.store, &mut schedule, slot, &candidate);
                if let SubmitOutcome::Accepted(_) = outcome {
                    debug!("Signup would continue to registration here");
                }
                prevent_default = true;
            }
            Signal::FaqClick(panel) => {
                self.faq.activate(&self.surface, &mut schedule, panel);
                prevent_default = true;
            }
            Signal::FaqKey { panel, key } => {
                prevent_default = self.faq.on_key(&self.surface, &mut schedule, panel, &key);
            }
            Signal::FaqHoverEnter(panel) => self.faq.hover_enter(&self.surface, panel),
            Signal::FaqHoverLeave(panel) => self.faq.hover_leave(&self.surface, panel),
            Signal::KeyDown(key) => {
                if key == "Escape" {
                    self.faq.close_all(&self.surface, &mut schedule);
                }
            }
            Signal::Scroll { y, viewport_height } => {
                self.navbar.on_scroll(&self.surface, y);
                self.parallax.on_scroll(&self.surface, y, viewport_height);
            }
            Signal::Visibility { watch, target, visible } => match watch {
                Watch::Video => self.videos.on_visibility(&self.surface, &target, visible),
                _ if visible => self.reveal.on_visible(&self.surface, watch, &target),
                _ => {}
            },
            Signal::MediaError(video) => self.videos.on_error(&self.surface, &video),
            Signal::LanguageChanged(origin) => self.language.on_change(&self.surface, origin),
            Signal::ScrollIndicator => {
                if let Some(features) = &self.features {
                    self.surface.scroll_into_view(features, ScrollBlock::Start);
                }
            }
            Signal::SignIn => info!("Sign-in requested"),
            Signal::PhoneLink => info!("Phone number clicked"),
            Signal::TimerElapsed(task) => self.on_timer(task, &mut schedule),
        }

        let mut reaction = Reaction::new(schedule);
        reaction.prevent_default = prevent_default;
        reaction
    }

    fn on_timer(&mut self, task: Task<S::Node>, schedule: &mut Schedule<S::Node>) {
        match task {
            Task::HideSplash => self.splash.hide(&self.surface, schedule),
            Task::RemoveNode(node) => self.surface.remove_node(&node),
            Task::RevertSubmit(slot) => self.email.revert(&self.surface, slot),
            Task::SettlePanel { panel, generation } => {
                self.faq.settle(&self.surface, panel, generation)
            }
            Task::ExpandRipple(node) => faq::expand_ripple(&self.surface, &node),
            Task::ScrollIntoView(node) => self.surface.scroll_into_view(&node, ScrollBlock::Center),
        }
    }
}
