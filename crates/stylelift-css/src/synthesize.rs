use std::fmt;

use stylelift_dom::ElementData;

use crate::selector::Selector;

/// A generated placeholder identity, rendered `temp<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyntheticId(pub u32);

impl SyntheticId {
    /// Prefix shared by every synthetic identity.
    pub const PREFIX: &'static str = "temp";

    /// Counters start at 1.
    pub const FIRST: Self = Self(1);

    /// The identity after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Parse `temp<N>`. Anything else, including `temp` alone, `temp01`
    /// or `template`, is not a synthetic identity.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix(Self::PREFIX)?;
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return None;
        }
        digits.parse().ok().map(Self)
    }
}

impl fmt::Display for SyntheticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Result of [`synthesize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    /// Selector for the element.
    pub selector: Selector,
    /// Set when the selector relies on an identity the element does not have
    /// yet. The caller decides whether to commit it.
    pub synthetic: Option<SyntheticId>,
}

impl Synthesized {
    /// Whether the selector depends on a synthetic identity.
    #[must_use]
    pub const fn used_synthetic(&self) -> bool {
        self.synthetic.is_some()
    }
}

/// Derive a selector for one element.
///
/// 1. A non-empty `id` gives `#<id>`.
/// 2. The document element, when it is `html`, gives `:root`.
/// 3. One or more classes give `tag.class1.class2`, classes in source order.
/// 4. Otherwise `tag#<candidate>`, with `candidate` reported as synthetic.
///
/// The element is not modified. Only one compound selector is ever produced;
/// ancestors are never consulted.
#[must_use]
pub fn synthesize(
    element: &ElementData,
    is_document_element: bool,
    candidate: SyntheticId,
) -> Synthesized {
    if let Some(id) = element.id().filter(|id| !id.is_empty()) {
        return Synthesized {
            selector: Selector::id(id),
            synthetic: None,
        };
    }

    if is_document_element {
        return Synthesized {
            selector: Selector::root(),
            synthetic: None,
        };
    }

    let classes = element.classes();
    if !classes.is_empty() {
        return Synthesized {
            selector: Selector::with_classes(&element.tag_name, &classes),
            synthetic: None,
        };
    }

    Synthesized {
        selector: Selector::with_id(&element.tag_name, &candidate.to_string()),
        synthetic: Some(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_id_parsing_is_strict() {
        assert_eq!(SyntheticId::parse("temp7"), Some(SyntheticId(7)));
        assert_eq!(SyntheticId::parse("temp"), None);
        assert_eq!(SyntheticId::parse("template"), None);
        assert_eq!(SyntheticId::parse("temp07"), None);
        assert_eq!(SyntheticId::parse("temp-1"), None);
        assert_eq!(SyntheticId(12).to_string(), "temp12");
    }

    #[test]
    fn empty_id_falls_through_to_classes() {
        let element = ElementData::new("div")
            .with_attr("id", "")
            .with_attr("class", "card");
        let result = synthesize(&element, false, SyntheticId::FIRST);
        assert_eq!(result.selector.to_string(), "div.card");
        assert!(!result.used_synthetic());
    }
}
