use log::info;

use crate::surface::PresentationSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSelect {
    Header,
    Footer,
}

/// Keeps the header and footer language pickers showing the same code.
pub struct LanguageMirror<N> {
    header: Option<N>,
    footer: Option<N>,
}

impl<N: Clone> LanguageMirror<N> {
    pub fn discover<S>(surface: &S) -> Self
    where
        S: PresentationSurface<Node = N>,
    {
        Self {
            header: surface.find_by_id("languageSelect"),
            footer: surface.query_first(None, ".footer-language select"),
        }
    }

    pub fn bindings(&self) -> Vec<(LanguageSelect, N)> {
        let mut out = Vec::new();
        if let Some(header) = &self.header {
            out.push((LanguageSelect::Header, header.clone()));
        }
        if let Some(footer) = &self.footer {
            out.push((LanguageSelect::Footer, footer.clone()));
        }
        out
    }

    pub fn on_change<S>(&self, surface: &S, origin: LanguageSelect)
    where
        S: PresentationSurface<Node = N>,
    {
        let (source, mirror) = match origin {
            LanguageSelect::Header => (&self.header, &self.footer),
            LanguageSelect::Footer => (&self.footer, &self.header),
        };
        let Some(source) = source else {
            return;
        };
        let code = surface.value(source);
        if let Some(mirror) = mirror {
            surface.set_value(mirror, &code);
        }
        info!("Language changed to: {}", code);
    }
}
