use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlMediaElement,
    HtmlSelectElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Storage,
    Window,
};

use crate::surface::{KeyValueStore, PresentationSurface, ScrollBlock, StoreError};

/// The live document.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PresentationSurface for DomSurface {
    type Node = Element;

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, scope: Option<&Element>, selector: &str) -> Vec<Element> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        match list {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(e) => {
                warn!("Bad selector {}: {:?}", selector, e);
                Vec::new()
            }
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn markup(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_markup(&self, node: &Element, markup: &str) {
        node.set_inner_html(markup);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn toggle_class(&self, node: &Element, class: &str, on: bool) {
        if let Err(e) = node.class_list().toggle_with_force(class, on) {
            warn!("Could not toggle class {}: {:?}", class, e);
        }
    }

    fn set_style_property(&self, node: &Element, property: &str, value: &str) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            warn!("Could not set {}: {:?}", property, e);
        }
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn create_transient_node(&self, parent: &Element, class: &str) -> Option<Element> {
        let node = self.document.create_element("div").ok()?;
        node.set_class_name(class);
        parent.append_child(&node).ok()?;
        Some(node)
    }

    fn remove_node(&self, node: &Element) {
        node.remove();
    }

    fn content_height(&self, node: &Element) -> f64 {
        node.scroll_height() as f64
    }

    fn bounding_size(&self, node: &Element) -> (f64, f64) {
        let rect = node.get_bounding_client_rect();
        (rect.width(), rect.height())
    }

    fn scroll_into_view(&self, node: &Element, block: ScrollBlock) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(match block {
            ScrollBlock::Start => ScrollLogicalPosition::Start,
            ScrollBlock::Center => ScrollLogicalPosition::Center,
        });
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn set_playing(&self, node: &Element, playing: bool) {
        let Some(media) = node.dyn_ref::<HtmlMediaElement>() else {
            return;
        };
        if !playing {
            let _ = media.pause();
            return;
        }
        match media.play() {
            // Autoplay policies reject the promise rather than throwing.
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    info!("Video play failed: {:?}", e);
                }
            }),
            Err(e) => info!("Video play failed: {:?}", e),
        }
    }
}

/// `window.localStorage`, when the browser lets us have it.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

/// Warms the browser cache for images the page shows early.
pub fn preload_images(urls: &[String]) {
    for url in urls {
        match HtmlImageElement::new() {
            Ok(img) => img.set_src(url),
            Err(e) => warn!("Could not preload {}: {:?}", url, e),
        }
    }
}
