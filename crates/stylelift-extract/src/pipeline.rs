//! The per-document pipeline, entirely in memory.

use serde::Serialize;
use strum_macros::Display;
use stylelift_css::{IdentityArbiter, Resolution, emit, styled_elements};
use stylelift_html::{ParseIssue, Serializer, parse};
use tracing::{debug, trace};

use crate::rewrite::rewrite;

/// Stages a document moves through, in order. A document with no styled
/// elements stops at [`PipelineStage::StylesDetected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// The text is a tree.
    Parsed,
    /// Styled elements have been snapshotted.
    StylesDetected,
    /// Every styled element has a selector.
    SelectorsResolved,
    /// The stylesheet text exists.
    RulesEmitted,
    /// Styles are stripped and the stylesheet is linked.
    Rewritten,
    /// The document is text again.
    Serialized,
}

/// What [`process_document`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No element carries a non-empty `style`. Nothing should be written.
    Unstyled {
        /// Problems the parser recovered from.
        issues: Vec<ParseIssue>,
    },
    /// The document had inline styles.
    Rewritten(Extraction),
}

impl Outcome {
    /// The last stage the document reached.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        match self {
            Self::Unstyled { .. } => PipelineStage::StylesDetected,
            Self::Rewritten(_) => PipelineStage::Serialized,
        }
    }

    /// Problems the parser recovered from.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        match self {
            Self::Unstyled { issues } | Self::Rewritten(Extraction { issues, .. }) => issues,
        }
    }
}

/// Result of extracting a styled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Generated stylesheet text.
    pub stylesheet: String,
    /// Rewritten document text.
    pub document: String,
    /// Number of rules in the stylesheet.
    pub rules: usize,
    /// What happened to each styled element, in document order.
    pub resolutions: Vec<Resolution>,
    /// Problems the parser recovered from.
    pub issues: Vec<ParseIssue>,
}

impl Extraction {
    /// Number of styled elements.
    #[must_use]
    pub fn styled(&self) -> usize {
        self.resolutions.len()
    }

    /// Number of synthetic identities left on elements.
    #[must_use]
    pub fn synthetic(&self) -> usize {
        self.resolutions
            .iter()
            .filter(|r| matches!(r, Resolution::Emitted { synthetic: Some(_), .. }))
            .count()
    }
}

/// Run the whole pipeline over one document.
///
/// `href` is the value the inserted stylesheet link points at. The input is
/// never modified; a document without inline styles yields
/// [`Outcome::Unstyled`].
#[must_use]
pub fn process_document(html: &str, href: &str) -> Outcome {
    let (mut tree, issues) = parse(html);
    trace!(stage = %PipelineStage::Parsed, nodes = tree.len(), issues = issues.len());

    let styled = styled_elements(&tree);
    trace!(stage = %PipelineStage::StylesDetected, styled = styled.len());
    if styled.is_empty() {
        return Outcome::Unstyled { issues };
    }

    let mut arbiter = IdentityArbiter::for_document(&tree);
    let (rules, resolutions) = arbiter.resolve_all(&mut tree, &styled);
    trace!(stage = %PipelineStage::SelectorsResolved, rules = rules.len());

    let stylesheet = emit(&rules);
    trace!(stage = %PipelineStage::RulesEmitted, bytes = stylesheet.len());

    let link = rewrite(&mut tree, &styled, href);
    trace!(stage = %PipelineStage::Rewritten, href);

    let document = Serializer::new(&tree).break_around(link).serialize();
    trace!(stage = %PipelineStage::Serialized, bytes = document.len());

    debug!(
        styled = styled.len(),
        rules = rules.len(),
        "extracted inline styles"
    );

    Outcome::Rewritten(Extraction {
        stylesheet,
        document,
        rules: rules.len(),
        resolutions: resolutions.into_iter().map(|(_, r)| r).collect(),
        issues,
    })
}
