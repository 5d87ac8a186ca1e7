use chrono::{DateTime, Days, NaiveDate, Utc};
use daytrack_docstore::{Document, date_from_value};
use serde::Serialize;

/// Demo hours series, oldest day first. Shared by the analytics demo
/// fallbacks and the seed data.
pub const DEMO_HOURS: [f64; 7] = [6.0, 7.5, 8.0, 4.0, 0.0, 5.0, 7.0];

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// 7 daily buckets ending today, oldest first. The three sequences are
/// parallel: `days[i]`, `hours[i]`, and `tasks_completed[i]` describe the
/// same calendar day.
#[derive(Debug, Serialize)]
pub struct WeeklyReport {
    pub days: Vec<String>,
    pub hours: Vec<f64>,
    pub tasks_completed: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct WeekSummary {
    pub label: String,
    pub hours: f64,
    pub tasks_completed: u32,
}

/// 4 weekly buckets covering the 28 days ending today, oldest first.
#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    pub weeks: Vec<WeekSummary>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------
//
// Pure functions of (now, stored documents). Documents whose date field
// is missing or not a `$date` value are silently excluded. All bucketing
// is by UTC calendar date.

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn worklog_date(wl: &Document) -> Option<NaiveDate> {
    wl.get("date").and_then(date_from_value).map(|t| t.date_naive())
}

/// A task's completion day: `updated_at`, falling back to `created_at`.
fn completion_date(task: &Document) -> Option<NaiveDate> {
    task.get("updated_at")
        .and_then(date_from_value)
        .or_else(|| task.get("created_at").and_then(date_from_value))
        .map(|t| t.date_naive())
}

fn day_offset(start: NaiveDate, d: NaiveDate, window: i64) -> Option<usize> {
    let offset = (d - start).num_days();
    (0..window).contains(&offset).then_some(offset as usize)
}

/// Bucket worklog hours and completed-task counts into the 7 days ending
/// today (inclusive), oldest first.
pub fn weekly(now: DateTime<Utc>, worklogs: &[Document], tasks: &[Document]) -> WeeklyReport {
    let today = now.date_naive();
    let start = today - Days::new(6);

    let mut hours = [0.0_f64; 7];
    let mut completed = [0_u32; 7];

    for wl in worklogs {
        let Some(d) = worklog_date(wl) else { continue };
        let Some(i) = day_offset(start, d, 7) else { continue };
        hours[i] += wl.get("hours").and_then(|v| v.as_f64()).unwrap_or(0.0);
    }

    for task in tasks {
        if task.get("status").and_then(|v| v.as_str()) != Some("done") {
            continue;
        }
        let Some(d) = completion_date(task) else { continue };
        let Some(i) = day_offset(start, d, 7) else { continue };
        completed[i] += 1;
    }

    WeeklyReport {
        days: day_labels(start),
        hours: hours.iter().map(|h| round2(*h)).collect(),
        tasks_completed: completed.to_vec(),
    }
}

/// Fixed series served when the store is unreachable: real day labels,
/// demo hours, a few completions at the recent end of the window.
pub fn weekly_demo(now: DateTime<Utc>) -> WeeklyReport {
    let start = now.date_naive() - Days::new(6);
    let mut completed = vec![0_u32; 7];
    completed[5] = 3;
    completed[6] = 2;
    WeeklyReport {
        days: day_labels(start),
        hours: DEMO_HOURS.to_vec(),
        tasks_completed: completed,
    }
}

fn day_labels(start: NaiveDate) -> Vec<String> {
    (0..7)
        .map(|i| (start + Days::new(i)).format("%a").to_string())
        .collect()
}

/// Partition the 28 days ending today into 4 consecutive 7-day buckets,
/// oldest first, summing worklog hours and completed-task counts per
/// bucket. No day is double-counted or omitted.
pub fn monthly(now: DateTime<Utc>, worklogs: &[Document], tasks: &[Document]) -> MonthlyReport {
    let today = now.date_naive();
    let start = today - Days::new(27);

    let mut hours = [0.0_f64; 4];
    let mut completed = [0_u32; 4];

    for wl in worklogs {
        let Some(d) = worklog_date(wl) else { continue };
        let Some(i) = day_offset(start, d, 28) else { continue };
        hours[i / 7] += wl.get("hours").and_then(|v| v.as_f64()).unwrap_or(0.0);
    }

    for task in tasks {
        if task.get("status").and_then(|v| v.as_str()) != Some("done") {
            continue;
        }
        let Some(d) = completion_date(task) else { continue };
        let Some(i) = day_offset(start, d, 28) else { continue };
        completed[i / 7] += 1;
    }

    MonthlyReport {
        weeks: (0..4)
            .map(|i| WeekSummary {
                label: format!("W{}", i + 1),
                hours: round2(hours[i]),
                tasks_completed: completed[i],
            })
            .collect(),
    }
}

pub fn monthly_demo() -> MonthlyReport {
    MonthlyReport {
        weeks: (0..4)
            .map(|i| WeekSummary {
                label: format!("W{}", i + 1),
                hours: (32 + 4 * i) as f64,
                tasks_completed: (5 + i) as u32,
            })
            .collect(),
    }
}
