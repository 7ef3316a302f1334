use crate::signal::Watch;
use crate::surface::PresentationSurface;

const FAQ_SLIDE_IN: &str = "slideInFromLeft 0.8s cubic-bezier(0.4, 0, 0.2, 1) both";

/// Scroll-triggered entrance animations.
pub struct Reveal<N> {
    feature_cards: Vec<N>,
    faq_items: Vec<N>,
}

impl<N: Clone + PartialEq> Reveal<N> {
    /// Staggers the FAQ entrance so items slide in one after another.
    pub fn discover<S>(surface: &S, faq_items: Vec<N>) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        for (index, item) in faq_items.iter().enumerate() {
            surface.set_style_property(item, "animation-delay", &format!("{}ms", index * 100));
        }
        Self {
            feature_cards: surface.find_all_by_class(None, "feature-card"),
            faq_items,
        }
    }

    pub fn targets(&self) -> Vec<(Watch, N)> {
        self.feature_cards
            .iter()
            .map(|n| (Watch::FeatureCard, n.clone()))
            .chain(self.faq_items.iter().map(|n| (Watch::FaqItem, n.clone())))
            .collect()
    }

    /// Only entering the viewport matters; revealed elements stay revealed.
    pub fn on_visible<S>(&self, surface: &S, watch: Watch, target: &N)
    where
        S: PresentationSurface<Node = N>,
    {
        match watch {
            Watch::FeatureCard if self.feature_cards.contains(target) => {
                surface.toggle_class(target, "animate", true);
            }
            Watch::FaqItem if self.faq_items.contains(target) => {
                surface.set_style_property(target, "animation", FAQ_SLIDE_IN);
            }
            _ => {}
        }
    }
}
