//! Event Normalizer
//!
//! Projects a raw GitLab webhook payload into a [`CanonicalEvent`]. The
//! projection is purely structural: keys are renamed and regrouped, nothing
//! is defaulted and no values are transformed. The two exceptions are the
//! CI job event, whose pipeline/job URLs are synthesized from the
//! repository homepage, and array-valued sub-entities, which are projected
//! element-wise.
//!
//! Payload shape drifts across GitLab versions, so every access is
//! optional: a missing `project`, `user`, `commit.author` or whole commit
//! list simply leaves the canonical field absent.

use serde_json::{Number, Value};

use crate::domain::entities::*;
use crate::domain::errors::UnrecognizedEvent;
use crate::domain::value_objects::EventKind;

static NULL: Value = Value::Null;

/// Normalize a raw webhook payload into a canonical event.
///
/// The only error outcome is [`UnrecognizedEvent`]; projection itself
/// cannot fail.
pub fn normalize(raw: &Value) -> Result<CanonicalEvent, UnrecognizedEvent> {
    let kind = EventKind::resolve(raw).inspect_err(|e| {
        tracing::debug!(kind = ?e.kind, "discriminator matched no known event kind");
    })?;

    Ok(match kind {
        EventKind::Push => CanonicalEvent::Push(push_event(raw, false)),
        EventKind::TagPush => CanonicalEvent::TagPush(push_event(raw, true)),
        EventKind::Issue => CanonicalEvent::Issue(issue_event(raw)),
        EventKind::ConfidentialIssue => CanonicalEvent::ConfidentialIssue(issue_event(raw)),
        EventKind::Note => CanonicalEvent::Note(note_event(raw)),
        EventKind::ConfidentialNote => CanonicalEvent::ConfidentialNote(note_event(raw)),
        EventKind::MergeRequest => CanonicalEvent::MergeRequest(merge_request_event(raw)),
        EventKind::Job => CanonicalEvent::Job(job_event(raw)),
        EventKind::Pipeline => CanonicalEvent::Pipeline(pipeline_event(raw)),
        EventKind::WikiPage => CanonicalEvent::WikiPage(wiki_page_event(raw)),
        EventKind::FeatureFlag => CanonicalEvent::FeatureFlag(feature_flag_event(raw)),
        EventKind::Release => CanonicalEvent::Release(release_event(raw)),
    })
}

// ---------------------------------------------------------------------------
// Field accessors. `null` on the raw payload counts as absent.

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn object_or_null<'a>(value: &'a Value, key: &str) -> &'a Value {
    field(value, key).unwrap_or(&NULL)
}

fn string(value: &Value, key: &str) -> Option<String> {
    field(value, key).and_then(Value::as_str).map(str::to_owned)
}

fn integer(value: &Value, key: &str) -> Option<i64> {
    field(value, key).and_then(Value::as_i64)
}

/// Numbers pass through untouched: an integer duration stays an integer
/// rather than picking up a fractional part.
fn number(value: &Value, key: &str) -> Option<Number> {
    match field(value, key) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn boolean(value: &Value, key: &str) -> Option<bool> {
    field(value, key).and_then(Value::as_bool)
}

fn string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    field(value, key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
}

fn list<T>(value: &Value, key: &str, project: impl Fn(&Value) -> T) -> Option<Vec<T>> {
    field(value, key)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(project).collect())
}

// ---------------------------------------------------------------------------
// Shared sub-entity projections.

/// Push payloads carry the user inline as `user_*` fields.
fn user_from_flat(raw: &Value) -> EventUser {
    EventUser {
        id: integer(raw, "user_id"),
        name: string(raw, "user_name"),
        username: string(raw, "user_username"),
        email: string(raw, "user_email"),
        avatar: string(raw, "user_avatar"),
    }
}

/// Everything else nests the user as an object.
fn user_from_object(value: &Value) -> EventUser {
    EventUser {
        id: integer(value, "id"),
        name: string(value, "name"),
        username: string(value, "username"),
        email: string(value, "email"),
        avatar: string(value, "avatar_url"),
    }
}

/// Project block as carried by push/issue/note/wiki/release payloads,
/// where the repository URLs are `homepage`/`ssh_url`/`http_url`.
fn project_from_webhook(value: &Value) -> EventProject {
    EventProject {
        id: integer(value, "id"),
        name: string(value, "name"),
        description: string(value, "description"),
        avatar: string(value, "avatar_url"),
        urls: ProjectUrls {
            repository: string(value, "homepage"),
            git_ssh: string(value, "ssh_url"),
            git_http: string(value, "http_url"),
        },
        namespace: string(value, "namespace"),
        default_branch: string(value, "default_branch"),
    }
}

/// Pipeline payloads spell the same URLs `web_url`/`git_ssh_url`/`git_http_url`.
fn project_from_pipeline(value: &Value) -> EventProject {
    EventProject {
        id: integer(value, "id"),
        name: string(value, "name"),
        description: string(value, "description"),
        avatar: string(value, "avatar_url"),
        urls: ProjectUrls {
            repository: string(value, "web_url"),
            git_ssh: string(value, "git_ssh_url"),
            git_http: string(value, "git_http_url"),
        },
        namespace: string(value, "namespace"),
        default_branch: string(value, "default_branch"),
    }
}

fn commit_author(value: &Value) -> CommitAuthor {
    CommitAuthor {
        name: string(value, "name"),
        email: string(value, "email"),
    }
}

fn push_commit(value: &Value) -> PushCommit {
    PushCommit {
        id: string(value, "id"),
        message: string(value, "message"),
        title: string(value, "title"),
        timestamp: string(value, "timestamp"),
        url: string(value, "url"),
        author: field(value, "author").map(commit_author),
        files: FileChanges {
            added: string_list(value, "added"),
            modified: string_list(value, "modified"),
            removed: string_list(value, "removed"),
        },
    }
}

fn commit_detail(value: &Value) -> CommitDetail {
    CommitDetail {
        id: string(value, "id"),
        title: string(value, "title"),
        message: string(value, "message"),
        timestamp: string(value, "timestamp"),
        url: string(value, "url"),
        author: field(value, "author").map(commit_author),
    }
}

fn label(value: &Value) -> Label {
    Label {
        title: string(value, "title"),
        color: string(value, "color"),
    }
}

// ---------------------------------------------------------------------------
// Per-kind projections.

fn push_event(raw: &Value, tag_push: bool) -> PushEvent {
    PushEvent {
        event_name: string(raw, "event_name"),
        sha: ShaPair {
            before: string(raw, "before"),
            after: string(raw, "after"),
            checkout: string(raw, "checkout"),
        },
        ref_name: string(raw, "ref"),
        message: if tag_push { string(raw, "message") } else { None },
        user: Some(user_from_flat(raw)),
        project: field(raw, "project").map(project_from_webhook),
        total_commits_count: integer(raw, "total_commits_count"),
        commits: list(raw, "commits", push_commit),
    }
}

fn issue_event(raw: &Value) -> IssueEvent {
    let attrs = object_or_null(raw, "object_attributes");
    IssueEvent {
        event_name: string(raw, "event_type"),
        title: string(attrs, "title"),
        description: string(attrs, "description"),
        created_date: string(attrs, "created_at"),
        updated_date: string(attrs, "updated_at"),
        closed_date: string(attrs, "closed_at"),
        due_date: string(attrs, "due_date"),
        id: integer(attrs, "iid"),
        state: string(attrs, "state"),
        severity: string(attrs, "severity"),
        url: string(attrs, "url"),
        user: field(raw, "user").map(user_from_object),
        project: field(raw, "project").map(project_from_webhook),
        assignees: list(raw, "assignees", user_from_object),
        labels: list(raw, "labels", label),
    }
}

fn note_event(raw: &Value) -> NoteEvent {
    let attrs = object_or_null(raw, "object_attributes");
    NoteEvent {
        event_name: string(raw, "event_type"),
        created_date: string(attrs, "created_at"),
        updated_date: string(attrs, "updated_at"),
        resolved_date: string(attrs, "resolved_at"),
        note: string(attrs, "note"),
        noteable_type: string(attrs, "noteable_type"),
        url: string(attrs, "url"),
        user: field(raw, "user").map(user_from_object),
        project: field(raw, "project").map(project_from_webhook),
    }
}

fn merge_request_event(raw: &Value) -> MergeRequestEvent {
    let attrs = object_or_null(raw, "object_attributes");
    MergeRequestEvent {
        event_name: string(raw, "event_type"),
        created_date: string(attrs, "created_at"),
        updated_date: string(attrs, "updated_at"),
        title: string(attrs, "title"),
        description: string(attrs, "description"),
        id: integer(attrs, "iid"),
        state: string(attrs, "state"),
        work_in_progress: boolean(attrs, "work_in_progress"),
        url: string(attrs, "url"),
        merge_status: string(attrs, "merge_status"),
        source_branch: string(attrs, "source_branch"),
        target_branch: string(attrs, "target_branch"),
        user: field(raw, "user").map(user_from_object),
        project: field(raw, "project").map(project_from_webhook),
        assignees: list(raw, "assignees", user_from_object),
        labels: list(raw, "labels", label),
    }
}

fn job_event(raw: &Value) -> JobEvent {
    let repository = object_or_null(raw, "repository");
    let homepage = string(repository, "homepage");

    // The job payload carries no browsable links of its own; build them
    // from the repository homepage and the pipeline/build ids.
    let pipeline_url = homepage.as_deref().zip(integer(raw, "pipeline_id"));
    let job_url = homepage.as_deref().zip(integer(raw, "build_id"));

    JobEvent {
        ref_name: string(raw, "ref"),
        tag: boolean(raw, "tag"),
        stage: string(raw, "build_stage"),
        name: string(raw, "build_name"),
        status: string(raw, "build_status"),
        duration: number(raw, "build_duration"),
        queue_duration: number(raw, "build_queued_duration"),
        created_at: string(raw, "build_created_at"),
        started_at: string(raw, "build_started_at"),
        finished_at: string(raw, "build_finished_at"),
        sha: ShaPair {
            before: string(raw, "before_sha"),
            after: string(raw, "sha"),
            checkout: None,
        },
        urls: JobUrls {
            pipeline: pipeline_url.map(|(home, id)| format!("{home}/-/pipelines/{id}")),
            job: job_url.map(|(home, id)| format!("{home}/-/jobs/{id}")),
        },
        user: field(raw, "user").map(user_from_object),
        project: Some(EventProject {
            id: integer(raw, "project_id"),
            name: string(raw, "project_name"),
            description: string(repository, "description"),
            avatar: None,
            urls: ProjectUrls {
                repository: homepage,
                git_ssh: string(repository, "git_ssh_url"),
                git_http: string(repository, "git_http_url"),
            },
            namespace: None,
            default_branch: None,
        }),
        runner: field(raw, "runner").map(|runner| JobRunner {
            id: integer(runner, "id"),
            description: string(runner, "description"),
            runner_type: string(runner, "runner_type"),
            active: boolean(runner, "active"),
            shared: boolean(runner, "is_shared"),
            tags: string_list(runner, "tags"),
        }),
    }
}

fn pipeline_event(raw: &Value) -> PipelineEvent {
    PipelineEvent {
        id: integer(raw, "id"),
        ref_name: string(raw, "ref"),
        tag: boolean(raw, "tag"),
        sha: ShaPair {
            before: string(raw, "before_sha"),
            after: string(raw, "sha"),
            checkout: None,
        },
        source: string(raw, "source"),
        status: string(raw, "status"),
        detailed_status: string(raw, "detailed_status"),
        stages: string_list(raw, "stages"),
        created_at: string(raw, "created_at"),
        finished_at: string(raw, "finished_at"),
        duration: number(raw, "duration"),
        queue_duration: number(raw, "queued_duration"),
        user: field(raw, "user").map(user_from_object),
        project: field(raw, "project").map(project_from_pipeline),
        commit: field(raw, "commit").map(commit_detail),
    }
}

fn wiki_page_event(raw: &Value) -> WikiPageEvent {
    let attrs = object_or_null(raw, "object_attributes");
    WikiPageEvent {
        slug: string(attrs, "slug"),
        title: string(attrs, "title"),
        format: string(attrs, "format"),
        content: string(attrs, "content"),
        action: string(attrs, "action"),
        urls: PageUrls {
            page: string(attrs, "url"),
            diff: string(attrs, "diff_url"),
        },
        user: field(raw, "user").map(user_from_object),
        project: field(raw, "project").map(project_from_webhook),
        wiki: field(raw, "wiki").map(|wiki| WikiInfo {
            urls: WikiUrls {
                web: string(wiki, "web_url"),
                git_ssh: string(wiki, "git_ssh_url"),
                git_http: string(object_or_null(raw, "project"), "git_http_url"),
            },
            default_branch: string(wiki, "default_branch"),
        }),
    }
}

fn feature_flag_event(raw: &Value) -> FeatureFlagEvent {
    let attrs = object_or_null(raw, "object_attributes");
    FeatureFlagEvent {
        id: integer(attrs, "id"),
        name: string(attrs, "name"),
        description: string(attrs, "description"),
        active: boolean(attrs, "active"),
        user: field(raw, "user").map(user_from_object),
        project: field(raw, "project").map(project_from_webhook),
    }
}

fn release_event(raw: &Value) -> ReleaseEvent {
    ReleaseEvent {
        id: integer(raw, "id"),
        description: string(raw, "description"),
        name: string(raw, "name"),
        tag: string(raw, "tag"),
        url: string(raw, "url"),
        action: string(raw, "action"),
        created_at: string(raw, "created_at"),
        released_at: string(raw, "released_at"),
        assets: field(raw, "assets").map(|assets| ReleaseAssets {
            count: integer(assets, "count"),
            links: list(assets, "links", |link| AssetLink {
                id: integer(link, "id"),
                external: boolean(link, "external"),
                link_type: string(link, "link_type"),
                name: string(link, "name"),
                url: string(link, "url"),
            }),
            sources: field(assets, "sources").cloned(),
        }),
        project: field(raw, "project").map(project_from_webhook),
        commit: field(raw, "commit").map(commit_detail),
    }
}
