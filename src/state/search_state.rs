// src/state/search_state.rs

/// Header search box: typed text, whether the suggestion list is open and
/// which suggestion (if any) the arrow keys have highlighted.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    open: bool,
    active: Option<usize>,
}

impl SearchState {
    pub fn is_open(&self) -> bool {
        self.open && !self.query.trim().is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The text changed; reopen the list with nothing highlighted.
    pub fn edited(&mut self) {
        self.open = true;
        self.active = None;
    }

    pub fn move_down(&mut self, suggestion_count: usize) {
        if suggestion_count == 0 {
            self.active = None;
            return;
        }
        self.open = true;
        self.active = Some(match self.active {
            None => 0,
            Some(i) => (i + 1).min(suggestion_count - 1),
        });
    }

    /// Moving up from the first suggestion leaves the list with no highlight.
    pub fn move_up(&mut self) {
        self.active = match self.active {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn escape(&mut self) {
        self.open = false;
        self.active = None;
    }

    /// Enter: the highlighted suggestion, else the typed text. The query is
    /// replaced by the committed name and the list closes.
    pub fn commit(&mut self, suggestions: &[&str]) -> Option<String> {
        let chosen = match self.active.and_then(|i| suggestions.get(i)) {
            Some(name) => name.to_string(),
            None => self.query.trim().to_string(),
        };
        self.escape();
        if chosen.is_empty() {
            return None;
        }
        self.query = chosen.clone();
        Some(chosen)
    }

    /// Picking a suggestion with the pointer.
    pub fn pick(&mut self, name: &str) -> String {
        self.query = name.to_string();
        self.escape();
        self.query.clone()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
