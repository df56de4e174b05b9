//! Fallback layouts rendered in place of a failed subtree.
//!
//! Layouts only decide presentation. Catching, classification and reset
//! behaviour are shared by every boundary.

use crate::classifier::ClassificationResult;
use crate::failure::FetchFailure;
use crate::i18n::Translator;
use std::fmt;

pub const DETAILED_ERROR_INFO: &str = "api.error-boundary.detailed-error-info";
pub const NOT_YOUR_FAULT: &str = "api.error-boundary.not-your-fault";
pub const EMBEDDED: &str = "errors.embedded";

/// Keys the layouts look up in addition to the classifier's message keys.
pub const LAYOUT_KEYS: [&str; 3] = [DETAILED_ERROR_INFO, NOT_YOUR_FAULT, EMBEDDED];

/// Presentation of a caught failure
pub trait FallbackLayout {
    type Output;

    fn render(
        &self,
        failure: &FetchFailure,
        classification: &ClassificationResult,
        t: &dyn Translator,
    ) -> Self::Output;
}

/// Full page fallback with the diagnostic panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    /// One translated message per distinct cause.
    pub messages: Vec<String>,
    /// Shown when the failure is attributable to the operator.
    pub not_your_fault: Option<String>,
    pub detailed_info_note: String,
    /// Verbatim dump of the failure.
    pub diagnostics: String,
}

impl FallbackLayout for PageLayout {
    type Output = ErrorPage;

    fn render(
        &self,
        failure: &FetchFailure,
        classification: &ClassificationResult,
        t: &dyn Translator,
    ) -> ErrorPage {
        let messages = classification
            .items()
            .iter()
            .map(|c| t.t(c.message_key.key()))
            .collect();

        ErrorPage {
            messages,
            not_your_fault: classification
                .any_operator_fault()
                .then(|| t.t(NOT_YOUR_FAULT)),
            detailed_info_note: t.t(DETAILED_ERROR_INFO),
            diagnostics: failure.diagnostic_dump(),
        }
    }
}

impl fmt::Display for ErrorPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.messages.as_slice() {
            [single] => writeln!(f, "{single}")?,
            many => {
                for message in many {
                    writeln!(f, "  • {message}")?;
                }
            }
        }
        if let Some(note) = &self.not_your_fault {
            writeln!(f)?;
            writeln!(f, "{note}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.detailed_info_note)?;
        writeln!(f)?;
        for line in self.diagnostics.lines() {
            writeln!(f, "    {line}")?;
        }
        Ok(())
    }
}

/// Compact placeholder for embedded players.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    AlertTriangle,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::AlertTriangle => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedPlaceholder {
    pub icon: Icon,
    pub text: String,
}

impl FallbackLayout for EmbedLayout {
    type Output = EmbedPlaceholder;

    fn render(
        &self,
        _failure: &FetchFailure,
        _classification: &ClassificationResult,
        t: &dyn Translator,
    ) -> EmbedPlaceholder {
        EmbedPlaceholder {
            icon: Icon::AlertTriangle,
            text: t.t(EMBEDDED),
        }
    }
}

impl fmt::Display for EmbedPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon.glyph(), self.text)
    }
}
