//! Selector synthesis and stylesheet generation for stylelift.
//!
//! # Scope
//!
//! This crate turns inline `style` attributes into stylesheet rules:
//!
//! - **Inline styles** - which elements count as styled, and how their
//!   declaration text splits into declarations
//! - **Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID and `:root` simple selectors
//!   - Single compound selectors only; no combinators
//! - **Selector synthesis** - one selector per styled element, from its `id`,
//!   its classes, or a synthetic `temp<N>` identity
//! - **Identity arbitration** - first-seen deduplication of selectors and the
//!   bookkeeping for synthetic identities within one document
//! - **Emission** - the generated stylesheet text
//!
//! # Not Yet Implemented
//!
//! - Selectors that walk up to ancestors to disambiguate shared classes
//! - Declaration validation or normalization (text is passed through)

/// Per-document selector deduplication and synthetic identity bookkeeping.
pub mod arbiter;
/// Stylesheet text generation.
pub mod emit;
/// Styled element detection and declaration splitting.
pub mod inline;
/// Ordered selector to declarations mapping.
pub mod rules;
/// Compound selectors per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Selector synthesis for a single element.
pub mod synthesize;

pub use arbiter::{IdentityArbiter, Resolution};
pub use emit::{HEADER, emit};
pub use inline::{STYLE_ATTRIBUTE, is_styled, split_declarations, styled_elements};
pub use rules::{Rule, RuleSet};
pub use selector::{Selector, SimpleSelector};
pub use synthesize::{SyntheticId, Synthesized, synthesize};
