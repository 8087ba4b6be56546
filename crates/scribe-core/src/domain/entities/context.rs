//! Variables for literal placeholder substitution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Context for scaffold rendering.
///
/// Maps variable names to values. A file containing `{{ name }}` (one space
/// inside each brace pair) gets the value of `name`; anything else is copied
/// through untouched. This is literal substitution, not a template language:
/// no conditionals, no filters, no nesting.
///
/// ## Project helpers
///
/// [`GenerationContext::for_project`] seeds the variables the built-in
/// scaffolds use:
///
/// | Variable | Example |
/// |----------|---------|
/// | `project_name` | "My Task App" |
/// | `project_slug` | "my-task-app" |
/// | `package_name` | "my_task_app" |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationContext {
    variables: BTreeMap<String, String>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pre-filled with the name-derived variables.
    pub fn for_project(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new()
            .with_variable("project_slug", split_words(&name).join("-"))
            .with_variable("package_name", split_words(&name).join("_"))
            .with_variable("project_name", name)
    }

    /// Build a context from `KEY=VALUE` assignments.
    ///
    /// Later assignments to the same key win.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ctx = Self::new();
        for raw in assignments {
            let raw = raw.as_ref();
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| DomainError::InvalidVariable(format!("expected KEY=VALUE, got '{raw}'")))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(DomainError::InvalidVariable(format!("empty key in '{raw}'")));
            }
            ctx.insert(key, value);
        }
        Ok(ctx)
    }

    /// Add a variable, consuming self.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Merge another context on top of this one (the other side wins).
    pub fn merged(mut self, other: &GenerationContext) -> Self {
        for (k, v) in &other.variables {
            self.variables.insert(k.clone(), v.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `{{ key }}` whose key is defined.
    ///
    /// Single left-to-right pass: substituted values are never re-scanned, so
    /// a value containing `{{ other }}` is written out literally.
    pub fn render(&self, template: &str) -> String {
        const OPEN: &str = "{{ ";
        const CLOSE: &str = " }}";

        if self.variables.is_empty() {
            return template.to_string();
        }

        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];

            let replaced = after_open.find(CLOSE).and_then(|end| {
                self.get(&after_open[..end])
                    .map(|value| (value, start + OPEN.len() + end + CLOSE.len()))
            });

            match replaced {
                Some((value, consumed)) => {
                    out.push_str(value);
                    rest = &rest[consumed..];
                }
                None => {
                    // Not ours: keep the first brace and rescan from the next char.
                    out.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Split a name into lowercase words on separators and case transitions.
///
/// `"MyTaskApp"`, `"my task app"` and `"my-task_app"` all give
/// `["my", "task", "app"]`.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // camelCase: "myApp" -> "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // acronym: "HTTPServer" -> "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_spaced_placeholders() {
        let ctx = GenerationContext::new().with_variable("name", "demo");
        assert_eq!(ctx.render("# {{ name }}\n{{ name }}!"), "# demo\ndemo!");
    }

    #[test]
    fn leaves_unmatched_placeholders_verbatim() {
        let ctx = GenerationContext::new().with_variable("name", "demo");
        assert_eq!(ctx.render("{{ missing }} {{ name }}"), "{{ missing }} demo");
    }

    #[test]
    fn requires_exactly_one_space_inside_braces() {
        let ctx = GenerationContext::new().with_variable("name", "demo");
        assert_eq!(ctx.render("{{name}}"), "{{name}}");
        assert_eq!(ctx.render("{{  name  }}"), "{{  name  }}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let ctx = GenerationContext::new()
            .with_variable("a", "{{ b }}")
            .with_variable("b", "nope");
        assert_eq!(ctx.render("{{ a }}"), "{{ b }}");
    }

    #[test]
    fn handles_brace_runs_and_trailing_open() {
        let ctx = GenerationContext::new().with_variable("x", "1");
        assert_eq!(ctx.render("{{{ x }}}"), "{1}");
        assert_eq!(ctx.render("tail {{ "), "tail {{ ");
    }

    #[test]
    fn empty_context_is_identity() {
        let ctx = GenerationContext::new();
        assert_eq!(ctx.render("{{ anything }}"), "{{ anything }}");
    }

    #[test]
    fn for_project_derives_names() {
        let ctx = GenerationContext::for_project("My Task App");
        assert_eq!(ctx.get("project_name"), Some("My Task App"));
        assert_eq!(ctx.get("project_slug"), Some("my-task-app"));
        assert_eq!(ctx.get("package_name"), Some("my_task_app"));
    }

    #[test]
    fn split_words_handles_case_transitions() {
        assert_eq!(split_words("HTTPServer"), vec!["http", "server"]);
        assert_eq!(split_words("myApp"), vec!["my", "app"]);
    }

    #[test]
    fn assignments_parse_and_last_wins() {
        let ctx = GenerationContext::from_assignments(["a=1", "b = x=y", "a=2"]).unwrap();
        assert_eq!(ctx.get("a"), Some("2"));
        assert_eq!(ctx.get("b"), Some(" x=y"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn assignments_reject_malformed_input() {
        assert!(GenerationContext::from_assignments(["novalue"]).is_err());
        assert!(GenerationContext::from_assignments(["=1"]).is_err());
    }

    #[test]
    fn merged_prefers_the_other_side() {
        let base = GenerationContext::for_project("demo");
        let overrides = GenerationContext::new().with_variable("project_name", "Demo!");
        let ctx = base.merged(&overrides);
        assert_eq!(ctx.get("project_name"), Some("Demo!"));
        assert_eq!(ctx.get("project_slug"), Some("demo"));
    }
}
