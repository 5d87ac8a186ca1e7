//! Static payloads served when no document store is reachable, plus the
//! seed data installed by `POST /api/seed-dummy`.

use chrono::{DateTime, Days, Duration, Utc};
use daytrack_docstore::{Document, date_value, new_id};
use serde_json::{Value, json};

use crate::analytics::DEMO_HOURS;

fn doc(v: Value) -> Document {
    v.as_object().cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Demo fallbacks (wire-format records, already serialized)
// ---------------------------------------------------------------------------

pub fn tasks(now: DateTime<Utc>) -> Vec<Value> {
    vec![
        json!({
            "id": "demo1",
            "title": "Plan the week",
            "description": "Outline top priorities and meetings",
            "status": "in_progress",
            "priority": "high",
            "due_date": now.to_rfc3339(),
            "tags": ["planning"],
        }),
        json!({
            "id": "demo2",
            "title": "Deep work block",
            "description": "Focus on project Alpha",
            "status": "pending",
            "priority": "medium",
            "due_date": null,
            "tags": ["focus"],
        }),
        json!({
            "id": "demo3",
            "title": "Review PRs",
            "description": "Check incoming pull requests",
            "status": "done",
            "priority": "low",
            "due_date": null,
            "tags": ["code"],
        }),
    ]
}

pub fn worklogs(now: DateTime<Utc>) -> Vec<Value> {
    DEMO_HOURS
        .iter()
        .enumerate()
        .map(|(i, hours)| {
            json!({
                "id": new_id(),
                "date": (now - Days::new(i as u64)).to_rfc3339(),
                "hours": hours,
                "project": "General",
                "notes": "Demo data",
            })
        })
        .collect()
}

pub fn notes() -> Vec<Value> {
    vec![
        json!({
            "id": "n1",
            "title": "Standup at 9:30",
            "content": "Share progress and blockers",
            "pinned": true,
        }),
        json!({
            "id": "n2",
            "title": "Follow up",
            "content": "Email client about contract",
            "pinned": false,
        }),
    ]
}

pub fn activities(now: DateTime<Utc>) -> Vec<Value> {
    vec![
        json!({
            "id": "a1",
            "type": "task_completed",
            "message": "Completed 'Review PRs'",
            "created_at": (now - Duration::hours(2)).to_rfc3339(),
        }),
        json!({
            "id": "a2",
            "type": "work_logged",
            "message": "Logged 7.5h",
            "created_at": (now - Duration::hours(5)).to_rfc3339(),
        }),
        json!({
            "id": "a3",
            "type": "note_added",
            "message": "Added reminder: Standup at 9:30",
            "created_at": (now - Days::new(1)).to_rfc3339(),
        }),
    ]
}

// ---------------------------------------------------------------------------
// Seed data (stored documents)
// ---------------------------------------------------------------------------

pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Document> {
    let yesterday = now - Days::new(1);
    vec![
        doc(json!({
            "title": "Plan the week",
            "description": "Outline priorities",
            "status": "in_progress",
            "priority": "high",
            "tags": ["planning"],
            "created_at": date_value(now),
            "updated_at": date_value(now),
        })),
        doc(json!({
            "title": "Deep work block",
            "description": "Project Alpha",
            "status": "pending",
            "priority": "medium",
            "tags": ["focus"],
            "created_at": date_value(now),
            "updated_at": date_value(now),
        })),
        doc(json!({
            "title": "Review PRs",
            "description": "Check PRs",
            "status": "done",
            "priority": "low",
            "tags": ["code"],
            "created_at": date_value(yesterday),
            "updated_at": date_value(yesterday),
        })),
    ]
}

pub fn seed_worklogs(now: DateTime<Utc>) -> Vec<Document> {
    DEMO_HOURS
        .iter()
        .enumerate()
        .map(|(i, hours)| {
            doc(json!({
                "date": date_value(now - Days::new(i as u64)),
                "hours": hours,
                "project": "General",
                "notes": "Seed",
                "created_at": date_value(now),
            }))
        })
        .collect()
}

pub fn seed_notes(now: DateTime<Utc>) -> Vec<Document> {
    vec![
        doc(json!({
            "title": "Standup at 9:30",
            "content": "Progress & blockers",
            "pinned": true,
            "created_at": date_value(now),
            "updated_at": date_value(now),
        })),
        doc(json!({
            "title": "Follow up",
            "content": "Email client about contract",
            "pinned": false,
            "created_at": date_value(now),
            "updated_at": date_value(now),
        })),
    ]
}
