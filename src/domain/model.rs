use std::fmt;

use bytes::Bytes;

/// One downloadable encoding of the source media, as advertised by the
/// listing endpoint. Immutable once built; the whole set is replaced on
/// every new negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityOption {
    /// Opaque server-defined stream selector.
    pub identifier: String,
    /// Human-readable resolution/bitrate descriptor, e.g. "360p".
    pub label: String,
    /// Container format tag, e.g. "mp4".
    pub container: String,
    pub has_audio: bool,
    pub has_video: bool,
}

impl QualityOption {
    /// Rendered chooser label: "360p (mp4) - Audio+Video".
    ///
    /// Exactly one capability suffix applies: both streams, audio only,
    /// video only, or none at all.
    pub fn display_label(&self) -> String {
        let mut label = format!("{} ({})", self.label, self.container);
        match (self.has_audio, self.has_video) {
            (true, true) => label.push_str(" - Audio+Video"),
            (true, false) => label.push_str(" - Audio Only"),
            (false, true) => label.push_str(" - Video Only"),
            (false, false) => {}
        }
        label
    }
}

impl fmt::Display for QualityOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

/// Current URL, known quality options, and the user's choice.
///
/// Invariant: `chosen`, when present, names an element of `options`.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub url: String,
    options: Vec<QualityOption>,
    chosen: Option<String>,
}

impl SelectionState {
    pub fn options(&self) -> &[QualityOption] {
        &self.options
    }

    /// Replace the option set wholesale, preserving server order.
    ///
    /// The first option becomes the default selection, mirroring what a
    /// freshly populated chooser displays and submits.
    pub fn replace_options(&mut self, options: Vec<QualityOption>) {
        self.options = options;
        self.chosen = self.options.first().map(|q| q.identifier.clone());
    }

    pub fn clear_options(&mut self) {
        self.options.clear();
        self.chosen = None;
    }

    /// Select an option by identifier. Rejected if the identifier is not
    /// in the current option set, keeping the invariant intact.
    pub fn choose(&mut self, identifier: &str) -> bool {
        if self.options.iter().any(|q| q.identifier == identifier) {
            self.chosen = Some(identifier.to_string());
            true
        } else {
            false
        }
    }

    pub fn chosen_identifier(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    pub fn chosen_option(&self) -> Option<&QualityOption> {
        let chosen = self.chosen.as_deref()?;
        self.options.iter().find(|q| q.identifier == chosen)
    }

    /// A download may start only with a non-empty URL and a chosen quality.
    pub fn can_download(&self) -> bool {
        !self.url.trim().is_empty() && self.chosen.is_some()
    }
}

/// Advisory presentation class for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Neutral,
    Loading,
    Success,
    Error,
}

/// The single live operation status. Never queued: each transition
/// overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    Loading(String),
    Ready(String),
    Error(String),
}

impl OperationStatus {
    pub fn message(&self) -> &str {
        match self {
            OperationStatus::Idle => "",
            OperationStatus::Loading(msg)
            | OperationStatus::Ready(msg)
            | OperationStatus::Error(msg) => msg,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            OperationStatus::Idle => Severity::Neutral,
            OperationStatus::Loading(_) => Severity::Loading,
            OperationStatus::Ready(_) => Severity::Success,
            OperationStatus::Error(_) => Severity::Error,
        }
    }
}

/// A fetched download: the resolved save filename plus the full payload.
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    pub filename: String,
    pub payload: Bytes,
}
