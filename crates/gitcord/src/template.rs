//! Placeholder Renderer
//!
//! A small recursive templating engine over user-authored template strings.
//! Placeholders take the form `{{path}}`, `{{path[join]}}` and
//! `{{path(default)}}`:
//!
//! - `path` is a dotted lookup into the rendered data tree; the literal
//!   path `value` resolves to the whole current data object, and a
//!   `value.` prefix drills into it, which is how an array element
//!   template refers to "this element" and its fields.
//! - when the path resolves to a non-empty array, each element is rendered
//!   with the sub-template keyed `{key}.{path}` and the results are joined
//!   by `join` (empty string when omitted). This is the only recursion
//!   point.
//! - when the path is absent or empty (empty string, empty array), the
//!   `default` literal is substituted; without a default the placeholder
//!   is left in place.
//!
//! Substituted values are not JSON-escaped. The rendered output is handed
//! to the delivery layer verbatim, so a template that wants to produce
//! JSON must account for quotes and newlines in the data itself. This is
//! a documented contract with existing template authors.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::domain::value_objects::TemplatePath;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z.]+)(?:\[([^\]]+)\])?(?:\(([^)]+)\))?\}\}")
        .expect("placeholder pattern compiles")
});

/// The per-handler template dictionary: dot-joined template key to
/// template string. Stored as-is in handler configuration, so the map is
/// serialized transparently as a JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSet(BTreeMap<String, String>);

impl TemplateSet {
    pub fn get(&self, path: &TemplatePath) -> Option<&str> {
        self.0.get(&path.key()).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.0.insert(key.into(), template.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Render the template stored under `key` against `data`.
///
/// A missing template is not an error: it means the user configured no
/// message for this key, and renders to the empty string.
pub fn render(templates: &TemplateSet, key: &TemplatePath, data: &Value) -> String {
    let Some(template) = templates.get(key) else {
        return String::new();
    };

    let mut result = template.to_string();

    // Matches are taken against the original template text; replacement
    // covers every literal occurrence of the placeholder, so a repeated
    // placeholder is resolved once and substituted everywhere.
    for caps in PLACEHOLDER.captures_iter(template) {
        let placeholder = &caps[0];
        let path = &caps[1];

        let value = if path == "value" {
            Some(data)
        } else if let Some(rest) = path.strip_prefix("value.") {
            // `value.x` addresses a field of the current data object, the
            // way an array element template drills into "this element".
            lookup(data, rest)
        } else {
            lookup(data, path)
        };

        match value {
            Some(Value::Array(items)) if !items.is_empty() => {
                let join = caps.get(2).map_or("", |m| m.as_str());
                let sub_key = key.child(path);
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| render(templates, &sub_key, item))
                    .collect();
                result = result.replace(placeholder, &rendered.join(join));
            }
            Some(value) if is_present(value) => {
                result = result.replace(placeholder, &stringify(value));
            }
            _ => {
                if let Some(default) = caps.get(3) {
                    result = result.replace(placeholder, default.as_str());
                }
            }
        }
    }

    result
}

/// Resolve a dotted path (`user.name`) against a JSON tree. Absent at any
/// segment means absent overall.
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(data, |value, segment| value.get(segment))
}

/// Present means "worth substituting": non-empty strings and arrays, any
/// number (zero included), any boolean, any object. `null` is absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(entries: &[(&str, &str)]) -> TemplateSet {
        entries.iter().copied().collect()
    }

    fn path(key: &str) -> TemplatePath {
        TemplatePath::from(key)
    }

    #[test]
    fn test_literal_template_renders_unchanged() {
        let templates = set(&[("push", r#"{"content": "something was pushed"}"#)]);
        let out = render(&templates, &path("push"), &json!({"anything": "at all"}));
        assert_eq!(out, r#"{"content": "something was pushed"}"#);
    }

    #[test]
    fn test_scalar_substitution() {
        let templates = set(&[("push", "Hello {{user.name}}")]);
        let out = render(&templates, &path("push"), &json!({"user": {"name": "Ada"}}));
        assert_eq!(out, "Hello Ada");
    }

    #[test]
    fn test_missing_path_with_default() {
        let templates = set(&[("push", "{{missing.path(n/a)}}")]);
        let out = render(&templates, &path("push"), &json!({"user": {}}));
        assert_eq!(out, "n/a");
    }

    #[test]
    fn test_missing_path_without_default_is_left_verbatim() {
        let templates = set(&[("push", "before {{missing.path}} after")]);
        let out = render(&templates, &path("push"), &json!({}));
        assert_eq!(out, "before {{missing.path}} after");
    }

    #[test]
    fn test_null_value_behaves_as_absent() {
        let templates = set(&[("issue", "{{closedDate(still open)}}")]);
        let out = render(&templates, &path("issue"), &json!({"closedDate": null}));
        assert_eq!(out, "still open");
    }

    #[test]
    fn test_array_join_with_sub_template() {
        let templates = set(&[("push", "{{commits[, ]}}"), ("push.commits", "{{value.id}}")]);
        let data = json!({"commits": [{"id": "a"}, {"id": "b"}]});
        let out = render(&templates, &path("push"), &data);
        assert_eq!(out, "a, b");
    }

    #[test]
    fn test_array_join_defaults_to_empty_string() {
        let templates = set(&[("push", "{{commits}}"), ("push.commits", "{{value.id}}")]);
        let data = json!({"commits": [{"id": "a"}, {"id": "b"}]});
        let out = render(&templates, &path("push"), &data);
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_empty_array_takes_default_branch() {
        let templates = set(&[("push", "{{commits[, ](no commits)}}")]);
        let out = render(&templates, &path("push"), &json!({"commits": []}));
        assert_eq!(out, "no commits");

        let templates = set(&[("push", "{{commits[, ]}}")]);
        let out = render(&templates, &path("push"), &json!({"commits": []}));
        assert_eq!(out, "{{commits[, ]}}");
    }

    #[test]
    fn test_nested_array_recursion() {
        let templates = set(&[
            ("push", "{{commits[\n]}}"),
            ("push.commits", "{{value.title}}: {{files.added[, ](none)}}"),
            ("push.commits.files.added", "{{value}}"),
        ]);
        let data = json!({"commits": [
            {"title": "first", "files": {"added": ["a.rs", "b.rs"]}},
            {"title": "second", "files": {"added": []}}
        ]});
        let out = render(&templates, &path("push"), &data);
        assert_eq!(out, "first: a.rs, b.rs\nsecond: none");
    }

    #[test]
    fn test_value_prefix_resolves_against_current_data() {
        let templates = set(&[("push", "{{value.user.name}} pushed")]);
        let out = render(&templates, &path("push"), &json!({"user": {"name": "Ada"}}));
        assert_eq!(out, "Ada pushed");

        // Absent behind the prefix still falls through to the default.
        let templates = set(&[("push", "{{value.user.name(someone)}} pushed")]);
        let out = render(&templates, &path("push"), &json!({}));
        assert_eq!(out, "someone pushed");
    }

    #[test]
    fn test_value_placeholder_resolves_to_whole_data() {
        let templates = set(&[("push", "{{tags[|]}}"), ("push.tags", "#{{value}}")]);
        let data = json!({"tags": ["linux", "docker"]});
        let out = render(&templates, &path("push"), &data);
        assert_eq!(out, "#linux|#docker");
    }

    #[test]
    fn test_numeric_zero_is_present() {
        let templates = set(&[("push", "{{totalCommitsCount(none)}} commits")]);
        let out = render(&templates, &path("push"), &json!({"totalCommitsCount": 0}));
        assert_eq!(out, "0 commits");
    }

    #[test]
    fn test_integer_number_renders_without_fraction() {
        let templates = set(&[("pipeline", "took {{duration}}s")]);
        let out = render(&templates, &path("pipeline"), &json!({"duration": 63}));
        assert_eq!(out, "took 63s");
    }

    #[test]
    fn test_boolean_false_is_present() {
        let templates = set(&[("merge_request", "WIP: {{workInProgress(unknown)}}")]);
        let out = render(
            &templates,
            &path("merge_request"),
            &json!({"workInProgress": false}),
        );
        assert_eq!(out, "WIP: false");
    }

    #[test]
    fn test_empty_string_takes_default_branch() {
        let templates = set(&[("issue", "{{description(no description)}}")]);
        let out = render(&templates, &path("issue"), &json!({"description": ""}));
        assert_eq!(out, "no description");
    }

    #[test]
    fn test_all_occurrences_are_replaced() {
        let templates = set(&[("push", "{{ref}} and {{ref}} again")]);
        let out = render(&templates, &path("push"), &json!({"ref": "main"}));
        assert_eq!(out, "main and main again");
    }

    #[test]
    fn test_missing_template_key_renders_empty() {
        let templates = TemplateSet::default();
        let out = render(&templates, &path("push"), &json!({"ref": "main"}));
        assert_eq!(out, "");
    }

    #[test]
    fn test_missing_sub_template_renders_elements_empty() {
        let templates = set(&[("push", "[{{commits[, ]}}]")]);
        let data = json!({"commits": [{"id": "a"}, {"id": "b"}]});
        let out = render(&templates, &path("push"), &data);
        assert_eq!(out, "[, ]");
    }

    #[test]
    fn test_no_json_escaping_of_substituted_values() {
        let templates = set(&[("push", r#"{"content": "{{message}}"}"#)]);
        let data = json!({"message": "say \"hi\""});
        let out = render(&templates, &path("push"), &data);
        assert_eq!(out, r#"{"content": "say "hi""}"#);
    }

    #[test]
    fn test_malformed_placeholder_is_ignored() {
        let templates = set(&[("push", "{{commits[]}} {{123}} {{a_b}}")]);
        let data = json!({"commits": [{"id": "a"}], "123": "x", "a_b": "y"});
        let out = render(&templates, &path("push"), &data);
        assert_eq!(out, "{{commits[]}} {{123}} {{a_b}}");
    }

    #[test]
    fn test_lookup_resolves_nested_paths() {
        let data = json!({"a": {"b": {"c": 1}}});
        assert_eq!(lookup(&data, "a.b.c"), Some(&json!(1)));
        assert_eq!(lookup(&data, "a.b"), Some(&json!({"c": 1})));
        assert_eq!(lookup(&data, "a.x.c"), None);
        assert_eq!(lookup(&data, "x"), None);
    }

    #[test]
    fn test_object_value_substitutes_as_compact_json() {
        let templates = set(&[("push", "{{user}}")]);
        let out = render(&templates, &path("push"), &json!({"user": {"name": "Ada"}}));
        assert_eq!(out, r#"{"name":"Ada"}"#);
    }
}
