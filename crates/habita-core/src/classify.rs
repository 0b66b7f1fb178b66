//! Occurrence classification: pure functions of a record and "today".
//!
//! Nothing in this module mutates or performs I/O; the engine composes
//! these predicates to partition the record set for presentation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{Priority, Task, TaskId, TaskView};

/// A completed task is never overdue; otherwise a record is overdue once
/// its effective date has passed.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    if task.completed {
        return false;
    }
    task.effective_date() < today
}

/// "Completed today" is date-bound on both ends: the completion must
/// have happened today AND the record must be scheduled for today. A
/// task completed today but dated elsewhere is historical, not today's.
pub fn is_completed_today(task: &Task, today: NaiveDate) -> bool {
    if !task.completed {
        return false;
    }
    let Some(completed_at) = task.completed_at else {
        return false;
    };
    completed_at.date() == today && task.effective_date() == today
}

/// Whether the record belongs in today's active list. Templates with an
/// active recurrence never display directly; occurrences and one-off
/// tasks are treated uniformly past that filter.
pub fn should_display_today(task: &Task, today: NaiveDate) -> bool {
    if is_completed_today(task, today) {
        return false;
    }
    if task.is_template() {
        return false;
    }
    task.effective_date() == today
}

/// Sort key for any "today" list: ascending time of day with timeless
/// records last, high priority before the rest, then id as the stable
/// tie-break.
pub fn day_sort_key(task: &Task) -> (bool, Option<NaiveTime>, bool, TaskId) {
    (
        task.time_of_day.is_none(),
        task.time_of_day,
        task.priority != Priority::High,
        task.id,
    )
}

pub fn sort_for_day(views: &mut [TaskView]) {
    views.sort_by_key(|v| day_sort_key(&v.task));
}

/// Reminder lead window in minutes: a task "comes up" when its wall-clock
/// time is 28 to 32 minutes away.
const REMINDER_WINDOW_MIN: i64 = 28;
const REMINDER_WINDOW_MAX: i64 = 32;

/// Whether a pending task's time of day falls inside the reminder
/// window relative to `now`. Timeless and completed tasks never remind.
pub fn due_for_reminder(task: &Task, now: NaiveDateTime) -> bool {
    if task.completed {
        return false;
    }
    let Some(time) = task.time_of_day else {
        return false;
    };
    let diff = (time - now.time()).num_minutes();
    (REMINDER_WINDOW_MIN..=REMINDER_WINDOW_MAX).contains(&diff)
}
