//! `{{name}}` placeholder substitution.
//!
//! Placeholders without a matching parameter are left verbatim so that a
//! missing argument is visible in the rendered text instead of silently
//! vanishing. Substituted values are never rescanned for placeholders.

use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Named parameters for interpolation, coerced to strings on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Substitute every `{{name}}` in `template` with `params[name]`.
pub fn interpolate(template: &str, params: &Params) -> String {
    if !template.contains("{{") {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of all placeholders appearing in `template`.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    placeholder_regex()
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Substitution Tests ====================

    #[test]
    fn test_interpolate_single_param() {
        let params = Params::new().with("key", "API_TOKEN");
        assert_eq!(
            interpolate("Required secret '{{key}}' is not set.", &params),
            "Required secret 'API_TOKEN' is not set."
        );
    }

    #[test]
    fn test_interpolate_repeated_and_multiple_params() {
        let params = Params::new().with("a", 1).with("b", "two");
        assert_eq!(interpolate("{{a}}-{{b}}-{{a}}", &params), "1-two-1");
    }

    #[test]
    fn test_interpolate_tolerates_inner_whitespace() {
        let params = Params::new().with("name", "x");
        assert_eq!(interpolate("[{{ name }}]", &params), "[x]");
    }

    #[test]
    fn test_unmatched_placeholder_passes_through() {
        assert_eq!(
            interpolate("Status: {{status}}", &Params::new()),
            "Status: {{status}}"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let params = Params::new().with("a", "{{b}}").with("b", "nope");
        assert_eq!(interpolate("{{a}}", &params), "{{b}}");
    }

    #[test]
    fn test_non_placeholder_braces_untouched() {
        let params = Params::new().with("x", "1");
        assert_eq!(interpolate("{x} {{}} {{x", &params), "{x} {{}} {{x");
    }

    #[test]
    fn test_values_coerced_to_string() {
        let params = Params::new().with("count", 42).with("ok", true);
        assert_eq!(interpolate("{{count}} {{ok}}", &params), "42 true");
    }

    // ==================== Params Tests ====================

    #[test]
    fn test_params_from_iter() {
        let params: Params = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("b"), Some("2"));
        assert!(!params.is_empty());
    }

    #[test]
    fn test_placeholders_extracted() {
        let names = placeholders("{{a}} and {{ b }} and {{a}}");
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    proptest! {
        #[test]
        fn prop_templates_without_braces_unchanged(template in "[^{}]*") {
            let params = Params::new().with("x", "y");
            prop_assert_eq!(interpolate(&template, &params), template);
        }

        #[test]
        fn prop_every_param_is_substituted(name in "[a-z_]{1,12}", value in "[^{}]{0,20}") {
            let template = format!("<{{{{{name}}}}}>");
            let params = Params::new().with(name.clone(), value.clone());
            prop_assert_eq!(interpolate(&template, &params), format!("<{value}>"));
        }
    }
}
