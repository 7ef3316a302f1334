use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use web_sys::{Event, KeyboardEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

mod config;
mod dom;
mod host;
mod page;
mod signal;
mod styles;
mod surface;
mod components {
    pub mod email;
    pub mod faq;
}
mod effects {
    pub mod language;
    pub mod media;
    pub mod reveal;
    pub mod scroll;
    pub mod splash;
}
#[cfg(test)]
mod testing;

use config::LandingConfig;
use host::Host;

#[function_component]
fn App() -> Html {
    let host = use_mut_ref(|| None::<Rc<Host>>);

    {
        let host = host.clone();
        use_effect_with_deps(
            move |_| {
                *host.borrow_mut() = Host::attach(LandingConfig::load());
                move || {
                    // Dropping the host detaches its listeners and observers
                    host.borrow_mut().take();
                }
            },
            (),
        );
    }

    {
        let host = host.clone();
        use_event_with_window("scroll", move |_: Event| {
            if let Some(host) = current(&host) {
                host.on_scroll();
            }
        });
    }

    {
        let host = host.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if let Some(host) = current(&host) {
                host.on_key_down(e.key());
            }
        });
    }

    html! {}
}

fn current(host: &Rc<RefCell<Option<Rc<Host>>>>) -> Option<Rc<Host>> {
    host.borrow().clone()
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Landing page scripts starting");

    // Mount into a node of our own so the static page markup stays untouched
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| {
            let root = d.create_element("div").ok()?;
            d.body()?.append_child(&root).ok()?;
            Some(root)
        })
    else {
        return;
    };
    yew::Renderer::<App>::with_root(root).render();
}
