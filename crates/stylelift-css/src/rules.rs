use std::collections::HashMap;
use std::fmt;

/// A selector paired with its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector text.
    pub selector: String,
    /// Declarations, each ending in `;`.
    pub declarations: Vec<String>,
}

impl fmt::Display for Rule {
    /// ```text
    /// selector {
    ///     declaration;
    /// }
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for declaration in &self.declarations {
            writeln!(f, "    {declaration}")?;
        }
        writeln!(f, "}}")
    }
}

/// Rules keyed by selector, in the order selectors were first seen.
/// The first rule for a selector wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl RuleSet {
    /// An empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule unless one exists for `selector`. Returns whether it was
    /// added.
    pub fn insert(&mut self, selector: String, declarations: Vec<String>) -> bool {
        if self.index.contains_key(&selector) {
            return false;
        }
        let _ = self.index.insert(selector.clone(), self.rules.len());
        self.rules.push(Rule {
            selector,
            declarations,
        });
        true
    }

    /// Declarations for `selector`.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&[String]> {
        self.index
            .get(selector)
            .map(|&i| self.rules[i].declarations.as_slice())
    }

    /// Rules in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Selectors in first-seen order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.selector.as_str())
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
