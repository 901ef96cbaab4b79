//! EventKind - Classification of GitLab webhook events

use serde_json::Value;

use crate::domain::errors::UnrecognizedEvent;

/// The kind of a GitLab webhook event, resolved from the payload's
/// discriminator fields.
///
/// GitLab is not consistent about where the discriminator lives:
/// push-style events carry `event_name`, issue-style events carry
/// `event_type`, everything else uses `object_kind`. [`EventKind::resolve`]
/// encodes the precedence between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    TagPush,
    Issue,
    ConfidentialIssue,
    Note,
    ConfidentialNote,
    MergeRequest,
    Job,
    Pipeline,
    WikiPage,
    FeatureFlag,
    Release,
}

impl EventKind {
    /// Resolve the event kind from a raw payload. First match wins:
    /// `event_name`, then `event_type`, then `object_kind` - with the
    /// quirk that `object_kind: "build"` means a CI job event (the richer
    /// payload fields use `build_*` prefixes but the webhook docs call
    /// these "job events").
    pub fn resolve(raw: &Value) -> Result<Self, UnrecognizedEvent> {
        let discriminator = raw
            .get("event_name")
            .and_then(Value::as_str)
            .or_else(|| raw.get("event_type").and_then(Value::as_str))
            .or_else(|| match raw.get("object_kind").and_then(Value::as_str) {
                Some("build") => Some("job"),
                other => other,
            });

        match discriminator {
            Some(kind) => kind.parse(),
            None => Err(UnrecognizedEvent { kind: None }),
        }
    }

    /// The external (wire/template-key) name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::TagPush => "tag_push",
            EventKind::Issue => "issue",
            EventKind::ConfidentialIssue => "confidential_issue",
            EventKind::Note => "note",
            EventKind::ConfidentialNote => "confidential_note",
            EventKind::MergeRequest => "merge_request",
            EventKind::Job => "job",
            EventKind::Pipeline => "pipeline",
            EventKind::WikiPage => "wiki_page",
            EventKind::FeatureFlag => "feature_flag",
            EventKind::Release => "release",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = UnrecognizedEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(EventKind::Push),
            "tag_push" => Ok(EventKind::TagPush),
            "issue" => Ok(EventKind::Issue),
            "confidential_issue" => Ok(EventKind::ConfidentialIssue),
            "note" => Ok(EventKind::Note),
            "confidential_note" => Ok(EventKind::ConfidentialNote),
            "merge_request" => Ok(EventKind::MergeRequest),
            "job" => Ok(EventKind::Job),
            "pipeline" => Ok(EventKind::Pipeline),
            "wiki_page" => Ok(EventKind::WikiPage),
            "feature_flag" => Ok(EventKind::FeatureFlag),
            "release" => Ok(EventKind::Release),
            _ => Err(UnrecognizedEvent {
                kind: Some(s.to_string()),
            }),
        }
    }
}
