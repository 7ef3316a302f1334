use log::warn;

use crate::surface::PresentationSurface;

/// Background videos only play while they are on screen.
pub struct VideoPlayback<N> {
    videos: Vec<N>,
}

impl<N: Clone + PartialEq> VideoPlayback<N> {
    pub fn discover<S>(surface: &S) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        Self {
            videos: surface.query_all(None, "video"),
        }
    }

    pub fn videos(&self) -> &[N] {
        &self.videos
    }

    pub fn on_visibility<S>(&self, surface: &S, video: &N, visible: bool)
    where
        S: PresentationSurface<Node = N>,
    {
        if self.videos.contains(video) {
            surface.set_playing(video, visible);
        }
    }

    /// A video that fails to load is taken out of the layout.
    pub fn on_error<S>(&self, surface: &S, video: &N)
    where
        S: PresentationSurface<Node = N>,
    {
        let source = surface.attribute(video, "src").unwrap_or_default();
        warn!("Video failed to load: {}", source);
        surface.set_style_property(video, "display", "none");
    }
}
