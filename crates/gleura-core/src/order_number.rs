//! Canonical forms of a shopper-entered order number.
//!
//! Shopify order names carry a leading `#` (`"#1001"`) but shoppers type
//! either `1001` or `#1001`. Searches are run against both forms.

/// The two textual forms of one order identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNumberForms {
    /// Exactly one leading `#`, e.g. `"#1001"`.
    pub decorated: String,
    /// No leading `#`, e.g. `"1001"`.
    pub bare: String,
}

impl OrderNumberForms {
    /// Builds both forms from raw input.
    ///
    /// Surrounding whitespace is trimmed and a leading run of `#` collapses
    /// to a single one. The decorated form keeps everything after that run as
    /// typed (`"# 12"` stays `"# 12"`); the bare form is trimmed again, so it
    /// never starts with whitespace or `#`.
    ///
    /// Returns `None` when nothing is left after trimming (`""`, `"  "`, `"#"`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.trim().trim_start_matches('#');
        let bare = rest.trim_start_matches(|c: char| c == '#' || c.is_whitespace());
        if bare.is_empty() {
            return None;
        }
        Some(Self {
            decorated: format!("#{rest}"),
            bare: bare.to_owned(),
        })
    }

    /// Search candidates in order: decorated first, then bare when distinct.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        let bare = (self.bare != self.decorated).then_some(self.bare.as_str());
        std::iter::once(self.decorated.as_str()).chain(bare)
    }
}
