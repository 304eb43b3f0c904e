//! Paragraph style classification
//!
//! Style names are free text, so classification goes through an ordered
//! table of rules. The first rule whose pattern matches the normalized name
//! decides; a name no rule matches is body text.

/// What a paragraph style maps to in Markdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleKind {
    /// ATX heading of the given level (1-6)
    Heading(u8),
    /// Bullet list item
    ListItem,
    /// Plain paragraph with inline emphasis
    Body,
}

impl StyleKind {
    /// Line prefix for this kind, `None` for body text
    pub fn marker(&self) -> Option<String> {
        match *self {
            StyleKind::Heading(level) => Some("#".repeat(level.clamp(1, 6) as usize)),
            StyleKind::ListItem => Some("-".to_string()),
            StyleKind::Body => None,
        }
    }
}

/// How a rule pattern is compared with a style name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matching {
    /// Whole name equals the pattern
    Exact,
    /// Name starts with the pattern
    Prefix,
    /// Pattern occurs anywhere in the name
    Contains,
}

/// One entry of a [`StyleMap`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    pattern: String,
    matching: Matching,
    kind: StyleKind,
}

impl StyleRule {
    pub fn new(pattern: &str, matching: Matching, kind: StyleKind) -> Self {
        Self {
            pattern: normalize(pattern),
            matching,
            kind,
        }
    }

    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    /// Match against an already normalized name
    fn matches(&self, name: &str) -> bool {
        match self.matching {
            Matching::Exact => name == self.pattern,
            Matching::Prefix => name.starts_with(&self.pattern),
            Matching::Contains => name.contains(&self.pattern),
        }
    }
}

/// Ordered style classification table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleMap {
    rules: Vec<StyleRule>,
}

impl Default for StyleMap {
    /// Built-in Word taxonomy: `heading 1`..`heading 3` by exact name,
    /// any name starting with `list` as a list item.
    fn default() -> Self {
        Self::empty()
            .with_rule("heading 1", Matching::Exact, StyleKind::Heading(1))
            .with_rule("heading 2", Matching::Exact, StyleKind::Heading(2))
            .with_rule("heading 3", Matching::Exact, StyleKind::Heading(3))
            .with_rule("list", Matching::Prefix, StyleKind::ListItem)
    }
}

impl StyleMap {
    /// A table with no rules; everything is body text
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Substring matching on the same names as the default table.
    ///
    /// "My Heading 1 Variant" becomes a heading and "Not a List" a list item.
    pub fn substring() -> Self {
        Self::empty()
            .with_rule("heading 1", Matching::Contains, StyleKind::Heading(1))
            .with_rule("heading 2", Matching::Contains, StyleKind::Heading(2))
            .with_rule("heading 3", Matching::Contains, StyleKind::Heading(3))
            .with_rule("list", Matching::Contains, StyleKind::ListItem)
    }

    /// Append a rule (checked after the existing ones)
    pub fn with_rule(mut self, pattern: &str, matching: Matching, kind: StyleKind) -> Self {
        self.push(StyleRule::new(pattern, matching, kind));
        self
    }

    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Classify a single style name
    pub fn classify_name(&self, name: &str) -> StyleKind {
        let name = normalize(name);
        self.rules
            .iter()
            .find(|rule| rule.matches(&name))
            .map(StyleRule::kind)
            .unwrap_or(StyleKind::Body)
    }

    /// Classify a paragraph by its style name and the name of its base style.
    ///
    /// The base style only contributes list membership: a custom style based
    /// on "List Bullet" is a list item, one based on "heading 1" is not a heading.
    pub fn classify(&self, name: &str, base_name: Option<&str>) -> StyleKind {
        match self.classify_name(name) {
            StyleKind::Body => match base_name.map(|base| self.classify_name(base)) {
                Some(StyleKind::ListItem) => StyleKind::ListItem,
                _ => StyleKind::Body,
            },
            kind => kind,
        }
    }
}

/// Lowercase and collapse whitespace runs to single spaces
fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
