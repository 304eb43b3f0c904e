//! Bold/italic markup for runs

/// Marker used for italic text; bold is always `**`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItalicMarker {
    /// `*text*`
    #[default]
    Asterisk,
    /// `_text_`
    Underscore,
}

impl ItalicMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItalicMarker::Asterisk => "*",
            ItalicMarker::Underscore => "_",
        }
    }
}

/// Which marker pair sits closest to the text of a bold+italic run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Nesting {
    /// Bold is applied first and italic wraps it: `*` + `**text**` + `*`
    #[default]
    BoldInner,
    /// Italic is applied first and bold wraps it: `**` + `*text*` + `**`
    ItalicInner,
}

/// How run-level bold/italic flags become Markdown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmphasisPolicy {
    pub italic_marker: ItalicMarker,
    pub nesting: Nesting,
}

const BOLD: &str = "**";

impl EmphasisPolicy {
    pub fn new(italic_marker: ItalicMarker, nesting: Nesting) -> Self {
        Self {
            italic_marker,
            nesting,
        }
    }

    /// Wrap run text according to its flags.
    ///
    /// Text is wrapped as is, surrounding whitespace included. Empty text
    /// is never wrapped.
    pub fn wrap(&self, text: &str, bold: bool, italic: bool) -> String {
        if text.is_empty() {
            return String::new();
        }

        let italic_marker = self.italic_marker.as_str();
        let layers: [(bool, &str); 2] = match self.nesting {
            Nesting::BoldInner => [(bold, BOLD), (italic, italic_marker)],
            Nesting::ItalicInner => [(italic, italic_marker), (bold, BOLD)],
        };

        let mut wrapped = text.to_string();
        for (enabled, marker) in layers {
            if enabled {
                wrapped = format!("{marker}{wrapped}{marker}");
            }
        }
        wrapped
    }
}
