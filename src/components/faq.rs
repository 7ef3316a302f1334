use log::{debug, warn};

use crate::config::Timings;
use crate::signal::{Schedule, Task};
use crate::surface::PresentationSurface;

pub type PanelId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelState {
    /// Open or on its way there.
    pub fn is_active(self) -> bool {
        matches!(self, PanelState::Opening | PanelState::Open)
    }

    fn settled(self) -> Self {
        match self {
            PanelState::Opening => PanelState::Open,
            PanelState::Closing => PanelState::Closed,
            stable => stable,
        }
    }
}

/// Enter and Space act like a click on a focused question.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[derive(Debug)]
struct Panel<N> {
    item: N,
    question: N,
    answer: Option<N>,
    content: Option<N>,
    icon: Option<N>,
    label: Option<N>,
    state: PanelState,
    // Bumped on every transition so completion timers of a superseded
    // transition can be told apart.
    generation: u32,
    content_height: f64,
}

/// FAQ panels with at most one panel open or opening at any time.
pub struct FaqAccordion<N> {
    panels: Vec<Panel<N>>,
    timings: Timings,
}

impl<N: Clone + PartialEq> FaqAccordion<N> {
    pub fn discover<S>(surface: &S, timings: &Timings) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        let mut panels = Vec::new();
        let mut seen_open = false;

        for item in surface.find_all_by_class(None, "faq-item") {
            let Some(question) = surface.query_first(Some(&item), ".faq-question") else {
                warn!("Skipping FAQ item without a question control");
                continue;
            };
            let answer = surface.query_first(Some(&item), ".faq-answer");
            let content = answer
                .as_ref()
                .and_then(|a| surface.query_first(Some(a), ".faq-answer-content"));

            // Markup may ship with a panel already expanded; keep only the first.
            let state = if surface.has_class(&item, "active") && !seen_open {
                seen_open = true;
                PanelState::Open
            } else {
                surface.toggle_class(&item, "active", false);
                PanelState::Closed
            };

            panels.push(Panel {
                icon: surface.query_first(Some(&question), ".faq-icon"),
                label: surface.query_first(Some(&question), "span"),
                item,
                question,
                answer,
                content,
                state,
                generation: 0,
                content_height: 0.0,
            });
        }

        debug!("Found {} FAQ panel(s)", panels.len());
        Self {
            panels,
            timings: timings.clone(),
        }
    }

    #[cfg(test)]
    pub fn state(&self, panel: PanelId) -> Option<PanelState> {
        self.panels.get(panel).map(|p| p.state)
    }

    #[cfg(test)]
    pub fn states(&self) -> Vec<PanelState> {
        self.panels.iter().map(|p| p.state).collect()
    }

    #[cfg(test)]
    pub fn content_height(&self, panel: PanelId) -> Option<f64> {
        self.panels.get(panel).map(|p| p.content_height)
    }

    /// `(panel, question control)` pairs for event wiring.
    pub fn bindings(&self) -> Vec<(PanelId, N)> {
        self.panels
            .iter()
            .enumerate()
            .map(|(id, p)| (id, p.question.clone()))
            .collect()
    }

    pub fn items(&self) -> Vec<N> {
        self.panels.iter().map(|p| p.item.clone()).collect()
    }

    /// Click on a question. An open panel collapses on its own; anything else
    /// closes whatever is open and then opens `panel`.
    pub fn activate<S>(&mut self, surface: &S, schedule: &mut Schedule<N>, panel: PanelId)
    where
        S: PresentationSurface<Node = N>,
    {
        if panel >= self.panels.len() {
            warn!("Ignoring activation of unknown FAQ panel {}", panel);
            return;
        }
        self.collapse_in_flight();

        if self.panels[panel].state == PanelState::Open {
            self.close(surface, schedule, panel);
            return;
        }
        for other in 0..self.panels.len() {
            if other != panel && self.panels[other].state == PanelState::Open {
                self.close(surface, schedule, other);
            }
        }
        self.open(surface, schedule, panel);
    }

    pub fn close_all<S>(&mut self, surface: &S, schedule: &mut Schedule<N>)
    where
        S: PresentationSurface<Node = N>,
    {
        self.collapse_in_flight();
        for panel in 0..self.panels.len() {
            if self.panels[panel].state == PanelState::Open {
                self.close(surface, schedule, panel);
            }
        }
    }

    /// Returns whether the key was consumed.
    pub fn on_key<S>(
        &mut self,
        surface: &S,
        schedule: &mut Schedule<N>,
        panel: PanelId,
        key: &str,
    ) -> bool
    where
        S: PresentationSurface<Node = N>,
    {
        if !is_activation_key(key) {
            return false;
        }
        self.activate(surface, schedule, panel);
        true
    }

    /// Completion of an open/close animation.
    pub fn settle<S>(&mut self, surface: &S, panel: PanelId, generation: u32)
    where
        S: PresentationSurface<Node = N>,
    {
        let Some(p) = self.panels.get_mut(panel) else {
            return;
        };
        if let Some(icon) = &p.icon {
            surface.set_style_property(icon, "animation", "");
        }
        if p.generation == generation {
            p.state = p.state.settled();
        }
    }

    pub fn hover_enter<S>(&self, surface: &S, panel: PanelId)
    where
        S: PresentationSurface<Node = N>,
    {
        let Some(p) = self.panels.get(panel) else {
            return;
        };
        surface.set_style_property(&p.question, "background", "rgba(229, 9, 20, 0.1)");
        surface.set_style_property(&p.question, "box-shadow", "0 8px 32px rgba(229, 9, 20, 0.2)");
        if let (Some(icon), false) = (&p.icon, p.state.is_active()) {
            surface.set_style_property(icon, "transform", "scale(1.1) rotate(15deg)");
            surface.set_style_property(icon, "color", "var(--netflix-red)");
        }
        if let Some(label) = &p.label {
            surface.set_style_property(label, "text-shadow", "0 0 20px rgba(229, 9, 20, 0.3)");
        }
    }

    pub fn hover_leave<S>(&self, surface: &S, panel: PanelId)
    where
        S: PresentationSurface<Node = N>,
    {
        let Some(p) = self.panels.get(panel) else {
            return;
        };
        surface.set_style_property(&p.question, "background", "");
        surface.set_style_property(&p.question, "box-shadow", "");
        if let (Some(icon), false) = (&p.icon, p.state.is_active()) {
            surface.set_style_property(icon, "transform", "");
            surface.set_style_property(icon, "color", "");
        }
        if let Some(label) = &p.label {
            surface.set_style_property(label, "text-shadow", "");
        }
    }

    fn collapse_in_flight(&mut self) {
        for p in self.panels.iter_mut() {
            let settled = p.state.settled();
            if settled != p.state {
                p.state = settled;
                p.generation += 1;
            }
        }
    }

    fn open<S>(&mut self, surface: &S, schedule: &mut Schedule<N>, panel: PanelId)
    where
        S: PresentationSurface<Node = N>,
    {
        let timings = self.timings.clone();
        let p = &mut self.panels[panel];
        p.state = PanelState::Opening;
        p.generation += 1;

        surface.toggle_class(&p.item, "active", true);
        if let Some(icon) = &p.icon {
            // Drop the closed-panel hover tilt so the open rotation shows.
            surface.set_style_property(icon, "transform", "");
            surface.set_style_property(icon, "color", "");
            animate_icon(surface, icon, true, timings.icon_open);
        }

        if let Some(content) = &p.content {
            p.content_height = surface.content_height(content);
            animate_paragraphs(surface, content, true);
        }
        if let Some(answer) = &p.answer {
            surface.set_style_property(answer, "max-height", &format!("{}px", p.content_height));
            surface.set_style_property(answer, "padding", "28px 35px");
        }

        add_ripple(surface, schedule, &p.question, &timings);
        schedule.after(timings.icon_open, Task::SettlePanel { panel, generation: p.generation });
        schedule.after(timings.scroll_nudge, Task::ScrollIntoView(p.item.clone()));
    }

    fn close<S>(&mut self, surface: &S, schedule: &mut Schedule<N>, panel: PanelId)
    where
        S: PresentationSurface<Node = N>,
    {
        let close_ms = self.timings.icon_close;
        let p = &mut self.panels[panel];
        p.state = PanelState::Closing;
        p.generation += 1;

        surface.toggle_class(&p.item, "active", false);
        if let Some(icon) = &p.icon {
            animate_icon(surface, icon, false, close_ms);
        }
        if let Some(answer) = &p.answer {
            surface.set_style_property(answer, "max-height", "0");
            surface.set_style_property(answer, "padding", "0 35px");
        }
        if let Some(content) = &p.content {
            animate_paragraphs(surface, content, false);
        }

        schedule.after(close_ms, Task::SettlePanel { panel, generation: p.generation });
    }
}

fn animate_icon<S: PresentationSurface>(
    surface: &S,
    icon: &S::Node,
    opening: bool,
    duration_ms: u32,
) {
    surface.toggle_class(icon, "rotating-open", false);
    surface.toggle_class(icon, "rotating-close", false);
    if opening {
        surface.toggle_class(icon, "rotating-open", true);
        surface.set_style_property(
            icon,
            "animation",
            &format!("iconBounceOpen {}ms cubic-bezier(0.68, -0.55, 0.265, 1.55)", duration_ms),
        );
    } else {
        surface.toggle_class(icon, "rotating-close", true);
        surface.set_style_property(
            icon,
            "animation",
            &format!("iconBounceClose {}ms cubic-bezier(0.4, 0, 0.2, 1)", duration_ms),
        );
    }
}

fn animate_paragraphs<S: PresentationSurface>(surface: &S, content: &S::Node, opening: bool) {
    for (index, p) in surface.query_all(Some(content), "p").iter().enumerate() {
        let animation = if opening {
            format!("fadeInUp 0.5s cubic-bezier(0.4, 0, 0.2, 1) {}ms both", 200 + index * 100)
        } else {
            format!("fadeOutDown 0.3s cubic-bezier(0.4, 0, 0.2, 1) {}ms both", index * 50)
        };
        surface.set_style_property(p, "animation", &animation);
    }
}

fn add_ripple<S: PresentationSurface>(
    surface: &S,
    schedule: &mut Schedule<S::Node>,
    question: &S::Node,
    timings: &Timings,
) {
    let Some(ripple) = surface.create_transient_node(question, "ripple-effect") else {
        return;
    };
    let (width, height) = surface.bounding_size(question);
    let size = format!("{}px", width.max(height));

    surface.set_style_property(&ripple, "width", &size);
    surface.set_style_property(&ripple, "height", &size);
    surface.set_style_property(&ripple, "left", "50%");
    surface.set_style_property(&ripple, "top", "50%");
    surface.set_style_property(&ripple, "transform", "translate(-50%, -50%) scale(0)");
    surface.set_style_property(question, "position", "relative");
    surface.set_style_property(question, "overflow", "hidden");

    schedule.after(timings.ripple_expand, Task::ExpandRipple(ripple.clone()));
    schedule.after(timings.ripple_removal, Task::RemoveNode(ripple));
}

pub fn expand_ripple<S: PresentationSurface>(surface: &S, ripple: &S::Node) {
    surface.set_style_property(ripple, "transform", "translate(-50%, -50%) scale(2)");
    surface.set_style_property(ripple, "opacity", "0");
}
