//! In-memory model of the two page regions the controller drives: the night
//! list and the content panel.

/// One clickable night in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub night: String,
    pub selected: bool,
}

/// The `#nightlist` container.
#[derive(Debug, Clone, Default)]
pub struct NavList {
    entries: Vec<NavEntry>,
}

impl NavList {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, night: impl Into<String>) {
        self.entries.push(NavEntry {
            night: night.into(),
            selected: false,
        });
    }

    /// Drop the marker from every entry, then mark `night`.
    pub fn select(&mut self, night: &str) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
        for entry in &mut self.entries {
            if entry.night == night {
                entry.selected = true;
            }
        }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.selected)
            .map(|e| e.night.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A thumbnail tile holding one exposure's deferred image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Tooltip; the exposure id.
    pub title: String,
    pub deferred_src: String,
    resolved_src: Option<String>,
}

impl Placeholder {
    pub fn new(title: impl Into<String>, deferred_src: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            deferred_src: deferred_src.into(),
            resolved_src: None,
        }
    }

    /// The loader fetched the deferred source.
    pub fn resolve(&mut self) {
        self.resolved_src = Some(self.deferred_src.clone());
    }

    pub fn resolved_src(&self) -> Option<&str> {
        self.resolved_src.as_deref()
    }

    /// What a click opens in a new browsing context: the currently resolved
    /// source. Nothing until the loader has resolved the image.
    pub fn open_target(&self) -> Option<&str> {
        self.resolved_src()
    }
}

/// The `#content` panel.
#[derive(Debug, Clone, Default)]
pub struct ContentPanel {
    summary_link: Option<String>,
    placeholders: Vec<Placeholder>,
    scroll_top: u32,
}

impl ContentPanel {
    /// Remove all children and scroll back to the top.
    pub fn clear(&mut self) {
        self.summary_link = None;
        self.placeholders.clear();
        self.scroll_top = 0;
    }

    pub fn set_summary_link(&mut self, url: String) {
        self.summary_link = Some(url);
    }

    pub fn push(&mut self, placeholder: Placeholder) {
        self.placeholders.push(placeholder);
    }

    pub fn scroll_to(&mut self, top: u32) {
        self.scroll_top = top;
    }

    pub fn summary_link(&self) -> Option<&str> {
        self.summary_link.as_deref()
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Placeholders currently showing `deferred_src`.
    pub fn find_mut<'a>(
        &'a mut self,
        deferred_src: &'a str,
    ) -> impl Iterator<Item = &'a mut Placeholder> + 'a {
        self.placeholders
            .iter_mut()
            .filter(move |p| p.deferred_src == deferred_src)
    }

    pub fn is_empty(&self) -> bool {
        self.summary_link.is_none() && self.placeholders.is_empty()
    }
}
