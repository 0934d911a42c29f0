//! Identity arbitration.
//!
//! Styled elements are resolved one at a time, in document order. Each gets a
//! selector from [`synthesize`]; the first element to produce a given selector
//! owns the rule for it. A synthetic identity is committed to an element only
//! when its selector is new, and is taken back if the element later turns out
//! to share an already-emitted selector. One arbiter serves one document.

use std::collections::{HashMap, HashSet};

use stylelift_dom::{DomTree, ElementData, NodeId};
use tracing::{debug, trace};

use crate::inline::{STYLE_ATTRIBUTE, split_declarations};
use crate::rules::RuleSet;
use crate::synthesize::{SyntheticId, synthesize};

/// What happened to one styled element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The selector was new and a rule was added for it.
    Emitted {
        /// Selector text.
        selector: String,
        /// Synthetic identity committed to the element, if one was needed.
        synthetic: Option<SyntheticId>,
    },
    /// The selector had already been emitted; no rule was added.
    Collapsed {
        /// Selector text.
        selector: String,
        /// Synthetic identity taken back from the element, if it had one.
        retracted: Option<SyntheticId>,
    },
}

impl Resolution {
    /// Selector text the element resolved to.
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Self::Emitted { selector, .. } | Self::Collapsed { selector, .. } => selector,
        }
    }
}

/// Per-document arbitration state: emitted selectors and the synthetic
/// identity counter.
#[derive(Debug, Clone)]
pub struct IdentityArbiter {
    seen: HashSet<String>,
    next: SyntheticId,
    /// Identities that must not be handed out: every `id` already in the
    /// document plus every identity committed so far.
    reserved: HashSet<String>,
    committed: HashMap<NodeId, SyntheticId>,
}

impl Default for IdentityArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityArbiter {
    /// An arbiter with nothing reserved. The first synthetic identity is
    /// `temp1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            next: SyntheticId::FIRST,
            reserved: HashSet::new(),
            committed: HashMap::new(),
        }
    }

    /// An arbiter that will never hand out an identity already used as an
    /// `id` in `tree`.
    #[must_use]
    pub fn for_document(tree: &DomTree) -> Self {
        let mut arbiter = Self::new();
        for node in tree.descendants(NodeId::ROOT) {
            if let Some(id) = tree.as_element(node).and_then(ElementData::id) {
                arbiter.reserve(id);
            }
        }
        arbiter
    }

    /// Keep `id` from ever being used as a synthetic identity.
    pub fn reserve(&mut self, id: &str) {
        let _ = self.reserved.insert(id.to_string());
    }

    /// The synthetic identity committed to `node` during this pass.
    #[must_use]
    pub fn synthetic_identity(&self, node: NodeId) -> Option<SyntheticId> {
        self.committed.get(&node).copied()
    }

    /// The identity the next synthetic selector would use.
    fn candidate(&mut self) -> SyntheticId {
        while self.reserved.contains(&self.next.to_string()) {
            self.next = self.next.next();
        }
        self.next
    }

    /// Resolve one styled element.
    ///
    /// A new selector is recorded, any synthetic identity is written to the
    /// element's `id`, and a rule with the element's declarations is added to
    /// `rules`. A repeated selector adds nothing and strips a synthetic
    /// identity committed to the element earlier in this pass.
    ///
    /// Returns `None` if `node` is not an element. The `style` attribute is
    /// left in place.
    pub fn resolve(
        &mut self,
        tree: &mut DomTree,
        node: NodeId,
        rules: &mut RuleSet,
    ) -> Option<Resolution> {
        let candidate = self.candidate();
        let is_document_element = tree.html_element() == Some(node);
        let element = tree.as_element(node)?;
        let synthesized = synthesize(element, is_document_element, candidate);
        let selector = synthesized.selector.to_string();

        if !self.seen.insert(selector.clone()) {
            let retracted = self.retract(tree, node);
            debug!(%selector, ?retracted, "selector already emitted");
            return Some(Resolution::Collapsed {
                selector,
                retracted,
            });
        }

        let declarations = element
            .attrs
            .get(STYLE_ATTRIBUTE)
            .map(split_declarations)
            .unwrap_or_default();

        if let Some(synthetic) = synthesized.synthetic {
            let value = synthetic.to_string();
            if let Some(element) = tree.as_element_mut(node) {
                element.attrs.set("id", &value);
            }
            let _ = self.reserved.insert(value);
            let _ = self.committed.insert(node, synthetic);
            self.next = synthetic.next();
            trace!(%synthetic, "committed synthetic identity");
        }

        debug!(%selector, declarations = declarations.len(), "emitting rule");
        let added = rules.insert(selector.clone(), declarations);
        debug_assert!(added, "rule set and seen set disagree on {selector}");

        Some(Resolution::Emitted {
            selector,
            synthetic: synthesized.synthetic,
        })
    }

    /// Resolve every node in `styled`, in order, into a fresh rule set.
    pub fn resolve_all(
        &mut self,
        tree: &mut DomTree,
        styled: &[NodeId],
    ) -> (RuleSet, Vec<(NodeId, Resolution)>) {
        let mut rules = RuleSet::new();
        let resolutions = styled
            .iter()
            .filter_map(|&node| {
                self.resolve(tree, node, &mut rules)
                    .map(|resolution| (node, resolution))
            })
            .collect();
        (rules, resolutions)
    }

    /// Remove the synthetic identity committed to `node` in this pass, if the
    /// element still carries it.
    ///
    /// Never finds a committed identity under [`Self::resolve_all`], which
    /// resolves each node once. Only resolving the same node again does.
    fn retract(&mut self, tree: &mut DomTree, node: NodeId) -> Option<SyntheticId> {
        let synthetic = self.committed.remove(&node)?;
        let element = tree.as_element_mut(node)?;
        if element.id().and_then(SyntheticId::parse) == Some(synthetic) {
            let _ = element.attrs.remove("id");
        }
        Some(synthetic)
    }
}
