use crate::config::LandingConfig;
use crate::surface::PresentationSurface;

const SHADED_BACKGROUND: &str = "rgba(0, 0, 0, 0.9)";
const CLEAR_BACKGROUND: &str = "linear-gradient(to bottom, rgba(0, 0, 0, 0.7), transparent)";

/// Offset for the hero background, or `None` once the hero is scrolled past.
pub fn parallax_offset(scroll_y: f64, viewport_height: f64, speed: f64) -> Option<f64> {
    (scroll_y < viewport_height).then(|| scroll_y * speed)
}

/// Solid navbar background once the page is scrolled past the threshold.
pub struct NavbarShade<N> {
    node: Option<N>,
    threshold: f64,
    shaded: Option<bool>,
}

impl<N> NavbarShade<N> {
    pub fn discover<S>(surface: &S, config: &LandingConfig) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        Self {
            node: surface.query_first(None, ".navbar"),
            threshold: config.navbar_shade_threshold,
            shaded: None,
        }
    }

    #[cfg(test)]
    pub fn is_shaded(&self) -> Option<bool> {
        self.shaded
    }

    pub fn on_scroll<S>(&mut self, surface: &S, scroll_y: f64)
    where
        S: PresentationSurface<Node = N>,
    {
        let Some(node) = &self.node else {
            return;
        };
        let shaded = scroll_y > self.threshold;
        if self.shaded == Some(shaded) {
            return;
        }
        self.shaded = Some(shaded);

        if shaded {
            surface.set_style_property(node, "background", SHADED_BACKGROUND);
            surface.set_style_property(node, "backdrop-filter", "blur(10px)");
        } else {
            surface.set_style_property(node, "background", CLEAR_BACKGROUND);
            surface.set_style_property(node, "backdrop-filter", "none");
        }
    }
}

pub struct Parallax<N> {
    node: Option<N>,
    speed: f64,
}

impl<N> Parallax<N> {
    pub fn discover<S>(surface: &S, config: &LandingConfig) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        Self {
            node: surface.query_first(None, ".hero-background"),
            speed: config.parallax_speed,
        }
    }

    pub fn on_scroll<S>(&self, surface: &S, scroll_y: f64, viewport_height: f64)
    where
        S: PresentationSurface<Node = N>,
    {
        let Some(node) = &self.node else {
            return;
        };
        if let Some(offset) = parallax_offset(scroll_y, viewport_height, self.speed) {
            surface.set_style_property(node, "transform", &format!("translateY({}px)", offset));
        }
    }
}
