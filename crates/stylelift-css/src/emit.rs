use crate::rules::RuleSet;

/// First line of every generated stylesheet.
pub const HEADER: &str = "/* Generated CSS from inline styles */";

/// Render a rule set as stylesheet text: the header line, then one block per
/// rule in first-seen order.
///
/// ```
/// use stylelift_css::{RuleSet, emit};
///
/// let mut rules = RuleSet::new();
/// let _ = rules.insert("#a".to_string(), vec!["color: red;".to_string()]);
/// assert_eq!(
///     emit(&rules),
///     "/* Generated CSS from inline styles */\n#a {\n    color: red;\n}\n"
/// );
/// ```
#[must_use]
pub fn emit(rules: &RuleSet) -> String {
    let mut css = String::with_capacity(HEADER.len() + 1 + rules.len() * 48);
    css.push_str(HEADER);
    css.push('\n');
    for rule in rules {
        css.push_str(&rule.to_string());
    }
    css
}
