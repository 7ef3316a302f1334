use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use stylist::GlobalStyle;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, PerformanceNavigationTiming, Window,
};

use crate::config::LandingConfig;
use crate::dom::{self, DomSurface, LocalStore};
use crate::page::Page;
use crate::signal::{Deferred, Signal, Watch};
use crate::styles::ANIMATIONS;

type SharedPage = Rc<RefCell<Page<DomSurface, LocalStore>>>;

/// An event listener that unsubscribes itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Connects the page logic to the live document. Dropping it detaches every
/// listener and observer; timers already queued still run.
pub struct Host {
    window: Window,
    page: SharedPage,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
    _styles: Option<GlobalStyle>,
}

impl Host {
    pub fn attach(config: LandingConfig) -> Option<Rc<Host>> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let styles = match GlobalStyle::new(ANIMATIONS) {
            Ok(style) => Some(style),
            Err(e) => {
                warn!("Could not install animation styles: {}", e);
                None
            }
        };

        let page = Page::new(DomSurface::new(document.clone()), LocalStore::new(&window), &config);
        let bindings = page.bindings();
        let page = Rc::new(RefCell::new(page));

        let mut host = Host {
            window: window.clone(),
            page,
            listeners: Vec::new(),
            observers: Vec::new(),
            _styles: styles,
        };

        for (slot, input, button) in bindings.email_forms {
            host.listen(&input, "input", move |_| Some(Signal::EmailInput(slot)));
            host.listen(&input, "keypress", move |e| {
                (key_of(&e).as_deref() == Some("Enter")).then_some(Signal::EmailSubmit(slot))
            });
            host.listen(&button, "click", move |_| Some(Signal::EmailSubmit(slot)));
        }

        for (panel, question) in bindings.faq_questions {
            host.listen(&question, "click", move |_| Some(Signal::FaqClick(panel)));
            host.listen(&question, "keydown", move |e| {
                key_of(&e).map(|key| Signal::FaqKey { panel, key })
            });
            host.listen(&question, "mouseenter", move |_| Some(Signal::FaqHoverEnter(panel)));
            host.listen(&question, "mouseleave", move |_| Some(Signal::FaqHoverLeave(panel)));
        }

        for (origin, select) in bindings.language_selects {
            host.listen(&select, "change", move |_| Some(Signal::LanguageChanged(origin)));
        }

        if let Some(indicator) = &bindings.scroll_indicator {
            host.listen(indicator, "click", |_| Some(Signal::ScrollIndicator));
        }
        if let Some(button) = &bindings.sign_in {
            host.listen(button, "click", |_| Some(Signal::SignIn));
        }
        if let Some(link) = &bindings.phone_link {
            host.listen(link, "click", |_| Some(Signal::PhoneLink));
        }

        for video in &bindings.videos {
            let target = video.clone();
            host.listen(video, "error", move |_| Some(Signal::MediaError(target.clone())));
        }

        host.observe(
            bindings.reveal_targets,
            config.reveal_threshold,
            Some(&config.reveal_root_margin),
        );
        host.observe(
            bindings.videos.into_iter().map(|v| (Watch::Video, v)).collect(),
            config.video_threshold,
            None,
        );

        if document.ready_state() == "complete" {
            host.page_loaded();
        } else {
            let window_target: EventTarget = window.clone().into();
            let load_page = host.page.clone();
            let load_window = window.clone();
            host.add_listener(&window_target, "load", move |_| {
                log_load_time(&load_window);
                dispatch(&load_page, Signal::PageLoaded);
            });
        }

        dom::preload_images(&config.preload_images);

        debug!(
            "Attached {} listener(s) and {} observer(s)",
            host.listeners.len(),
            host.observers.len()
        );
        Some(Rc::new(host))
    }

    pub fn on_scroll(&self) {
        let y = self.window.scroll_y().unwrap_or_default();
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or_default();
        dispatch(&self.page, Signal::Scroll { y, viewport_height });
    }

    pub fn on_key_down(&self, key: String) {
        dispatch(&self.page, Signal::KeyDown(key));
    }

    fn page_loaded(&self) {
        log_load_time(&self.window);
        dispatch(&self.page, Signal::PageLoaded);
    }

    /// Subscribes `target` so that `event` feeds the page whatever signal
    /// `to_signal` yields for it.
    fn listen<F>(&mut self, target: &Element, event: &'static str, to_signal: F)
    where
        F: Fn(&Event) -> Option<Signal<Element>> + 'static,
    {
        let page = self.page.clone();
        self.add_listener(target.as_ref(), event, move |e: Event| {
            if let Some(signal) = to_signal(&e) {
                if dispatch(&page, signal) {
                    e.prevent_default();
                }
            }
        });
    }

    fn add_listener<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            Ok(()) => self.listeners.push(Listener {
                target: target.clone(),
                event,
                callback,
            }),
            Err(e) => warn!("Could not listen for {}: {:?}", event, e),
        }
    }

    fn observe(
        &mut self,
        targets: Vec<(Watch, Element)>,
        threshold: f64,
        root_margin: Option<&str>,
    ) {
        if targets.is_empty() {
            return;
        }
        let page = self.page.clone();
        let watched = targets.clone();
        let on_entries = move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let Some((watch, _)) = watched.iter().find(|(_, el)| *el == target) else {
                    continue;
                };
                dispatch(
                    &page,
                    Signal::Visibility {
                        watch: *watch,
                        target,
                        visible: entry.is_intersecting(),
                    },
                );
            }
        };
        let callback =
            Closure::wrap(Box::new(on_entries) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            init.set_root_margin(margin);
        }

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for (_, target) in &targets {
                    observer.observe(target);
                }
                self.observers.push(Observer {
                    observer,
                    _callback: callback,
                });
            }
            Err(e) => warn!("IntersectionObserver unavailable: {:?}", e),
        }
    }
}

fn key_of(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(|e| e.key())
}

/// Feeds one signal to the page and queues whatever it asks for. Returns
/// whether the browser default should be suppressed.
fn dispatch(page: &SharedPage, signal: Signal<Element>) -> bool {
    let reaction = match page.try_borrow_mut() {
        Ok(mut page) => page.dispatch(signal),
        Err(_) => {
            warn!("Dropped re-entrant signal {:?}", signal);
            return false;
        }
    };
    schedule(page, reaction.deferred);
    reaction.prevent_default
}

fn schedule(page: &SharedPage, deferred: Vec<Deferred<Element>>) {
    for Deferred { after_ms, task } in deferred {
        let page = page.clone();
        Timeout::new(after_ms, move || {
            dispatch(&page, Signal::TimerElapsed(task));
        })
        .forget();
    }
}

/// Logs `loadEventEnd - fetchStart` of the navigation entry. The end mark is
/// only written after the load handlers return, hence the zero delay.
fn log_load_time(window: &Window) {
    let Some(performance) = window.performance() else {
        return;
    };
    Timeout::new(0, move || {
        let Some(timing) = performance
            .get_entries_by_type("navigation")
            .get(0)
            .dyn_into::<PerformanceNavigationTiming>()
            .ok()
        else {
            debug!("No navigation timing entry");
            return;
        };
        if timing.load_event_end() > 0.0 {
            let elapsed = timing.load_event_end() - timing.fetch_start();
            info!("Page load time: {} ms", elapsed.round());
        }
    })
    .forget();
}
