//! TemplatePath - Structured key into the template dictionary
//!
//! Template keys are dot-joined strings on the wire (`push`,
//! `push.commits`, `push.commits.files.added`) because that is what the
//! configuration UI stores. Internally the key is a sequence of segments
//! so that building a sub-template key for an array field is a structural
//! operation rather than string concatenation at every call site.

use crate::domain::value_objects::EventKind;

/// A logical path identifying which template applies to a value:
/// the event kind, optionally followed by the dotted path of the array
/// field being rendered (nesting observed up to depth 3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplatePath {
    segments: Vec<String>,
}

impl TemplatePath {
    /// The top-level template key for an event kind.
    pub fn root(kind: EventKind) -> Self {
        Self {
            segments: vec![kind.as_str().to_string()],
        }
    }

    /// Extend this path with a (possibly dotted) field path, producing the
    /// key of the sub-template used for that field's array elements.
    pub fn child(&self, field_path: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(field_path.split('.').map(str::to_string));
        Self { segments }
    }

    /// The external dot-joined key, byte-compatible with stored
    /// configuration payloads.
    pub fn key(&self) -> String {
        self.segments.join(".")
    }
}

impl std::fmt::Display for TemplatePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl From<&str> for TemplatePath {
    fn from(key: &str) -> Self {
        Self {
            segments: key.split('.').map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_key_is_the_kind_name() {
        assert_eq!(TemplatePath::root(EventKind::Push).key(), "push");
        assert_eq!(TemplatePath::root(EventKind::TagPush).key(), "tag_push");
    }

    #[test]
    fn test_child_appends_dotted_field_path() {
        let commits = TemplatePath::root(EventKind::Push).child("commits");
        assert_eq!(commits.key(), "push.commits");

        let added = commits.child("files.added");
        assert_eq!(added.key(), "push.commits.files.added");
    }

    #[test]
    fn test_from_str_round_trips() {
        let path = TemplatePath::from("push.commits.files.added");
        assert_eq!(path.to_string(), "push.commits.files.added");
    }
}
