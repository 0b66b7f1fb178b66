//! Recurrence rule evaluation: decides whether a template produces an
//! occurrence on a given date, and where its recurrence advances to next.
//!
//! All functions here are pure over calendar dates. A rule that cannot be
//! evaluated (empty weekly day set) fails closed to "not eligible" rather
//! than erroring, matching the engine-wide fail-soft policy.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{Frequency, Recurrence};

/// Whether `rule` (belonging to a template created on `created`) should
/// produce an occurrence dated `date`.
///
/// Monthly rules fire on the template's creation day-of-month only; a
/// template created on day 31 is never eligible in a 30-day month. That
/// is intended behavior, not a gap to patch around.
pub fn is_eligible(rule: &Recurrence, created: NaiveDate, date: NaiveDate) -> bool {
    if let Some(until) = rule.until {
        if date > until {
            return false;
        }
    }

    match rule.freq {
        Frequency::Daily => date >= created,
        Frequency::Weekly => {
            !rule.weekdays.is_empty() && date >= created && rule.weekdays.contains(date.weekday())
        }
        Frequency::Monthly => date >= created && date.day() == created.day(),
        Frequency::None => date == created,
    }
}

/// The next date strictly after `from` on which the rule fires, ignoring
/// the `until` bound (callers gate on [`should_create_next`] first).
///
/// Weekly rules always hit within seven days, so the scan is bounded;
/// monthly rules land on the same day-of-month in the following month,
/// clamped to that month's length.
pub fn next_eligible_date(rule: &Recurrence, from: NaiveDate) -> Option<NaiveDate> {
    match rule.freq {
        Frequency::Daily => from.checked_add_days(Days::new(1)),
        Frequency::Weekly => {
            if rule.weekdays.is_empty() {
                return None;
            }
            (1..=7)
                .filter_map(|offset| from.checked_add_days(Days::new(offset)))
                .find(|d| rule.weekdays.contains(d.weekday()))
        }
        Frequency::Monthly => {
            // Day 28 plus four days always lands inside the next month.
            let next_month = from.with_day(28)?.checked_add_days(Days::new(4))?;
            let day = from
                .day()
                .min(days_in_month(next_month.year(), next_month.month()));
            NaiveDate::from_ymd_opt(next_month.year(), next_month.month(), day)
        }
        Frequency::None => None,
    }
}

/// Whether completing an occurrence today should advance the template's
/// recurrence: the rule must be active and today must still be strictly
/// before the end bound.
pub fn should_create_next(rule: &Recurrence, today: NaiveDate) -> bool {
    if rule.is_none() {
        return false;
    }
    rule.until.map_or(true, |until| today < until)
}

/// Re-evaluates an existing occurrence against a template's changed rule,
/// using the date the occurrence was generated for. Occurrences failing
/// this check are pruned by the template update.
pub fn displays_after_update(rule: &Recurrence, created: NaiveDate, date: NaiveDate) -> bool {
    match rule.freq {
        Frequency::None => created == date,
        _ => is_eligible(rule, created, date),
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // Both constructions are infallible for valid (year, month) input.
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}
