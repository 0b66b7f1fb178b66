//! Occurrence materialization: lazily expands recurring templates into
//! concrete dated occurrences, at most one per (template, date).

use chrono::NaiveDate;

use crate::classify::is_completed_today;
use crate::models::{Task, TaskId, TaskRole};
use crate::recurrence;

/// Fresh id allocation over a record set: one past the current maximum.
pub fn next_id(tasks: &[Task]) -> TaskId {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

/// Whether an occurrence of `template_id` generated for `date` already
/// exists. Keyed on the occurrence's creation date so that a moved
/// exception still blocks regeneration for the date it was made for.
pub fn occurrence_exists(tasks: &[Task], template_id: TaskId, date: NaiveDate) -> bool {
    tasks
        .iter()
        .any(|t| t.template_id() == Some(template_id) && t.created_at == date)
}

/// Builds the occurrence a template produces for `date`: template fields
/// carry over, completion state resets, and the recurrence is dropped in
/// favor of the back-link to the template.
pub fn spawn_occurrence(template: &Task, date: NaiveDate, id: TaskId) -> Task {
    Task {
        id,
        title: template.title.clone(),
        description: template.description.clone(),
        category_id: template.category_id,
        priority: template.priority,
        estimated_time: template.estimated_time,
        scheduled_date: Some(date),
        time_of_day: template.time_of_day,
        completed: false,
        completed_at: None,
        created_at: date,
        role: TaskRole::Occurrence {
            template_id: template.id,
            is_exception: false,
        },
    }
}

/// Backfills today's occurrences for every eligible template, returning
/// the number generated so the caller persists only on change.
/// Idempotent: the existence check makes a second run for the same date
/// a no-op.
pub fn materialize_for_date(tasks: &mut Vec<Task>, today: NaiveDate) -> usize {
    let templates: Vec<Task> = tasks
        .iter()
        .filter(|t| t.is_template())
        .cloned()
        .collect();

    let mut generated = 0;
    for template in templates {
        // A template marked completed today is treated as already
        // handled and not re-expanded the same day.
        if is_completed_today(&template, today) {
            continue;
        }
        let Some(rule) = template.recurrence() else {
            continue;
        };
        if !recurrence::is_eligible(rule, template.created_at, today) {
            continue;
        }
        if occurrence_exists(tasks, template.id, today) {
            continue;
        }
        let id = next_id(tasks);
        tasks.push(spawn_occurrence(&template, today, id));
        generated += 1;
    }
    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Recurrence, Weekdays};
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(id: TaskId, created: NaiveDate, recurrence: Recurrence) -> Task {
        Task {
            id,
            title: format!("template {id}"),
            description: "desc".to_string(),
            category_id: Some(2),
            priority: Priority::High,
            estimated_time: 15,
            scheduled_date: Some(created),
            time_of_day: NaiveTime::from_hms_opt(8, 0, 0),
            completed: false,
            completed_at: None,
            created_at: created,
            role: TaskRole::Source { recurrence },
        }
    }

    #[test]
    fn spawned_occurrence_copies_fields_and_resets_state() {
        let tpl = template(1, date(2024, 1, 1), Recurrence::daily());
        let occ = spawn_occurrence(&tpl, date(2024, 1, 5), 9);

        assert_eq!(occ.id, 9);
        assert_eq!(occ.title, tpl.title);
        assert_eq!(occ.category_id, tpl.category_id);
        assert_eq!(occ.priority, tpl.priority);
        assert_eq!(occ.time_of_day, tpl.time_of_day);
        assert_eq!(occ.scheduled_date, Some(date(2024, 1, 5)));
        assert_eq!(occ.created_at, date(2024, 1, 5));
        assert!(!occ.completed);
        assert_eq!(occ.completed_at, None);
        assert_eq!(occ.template_id(), Some(1));
        assert!(!occ.is_exception());
        assert_eq!(occ.recurrence(), None);
    }

    #[test]
    fn materializes_one_occurrence_per_eligible_template() {
        let mut tasks = vec![
            template(1, date(2024, 1, 1), Recurrence::daily()),
            template(2, date(2024, 1, 1), Recurrence::weekly("1,3".parse::<Weekdays>().unwrap())),
        ];
        // 2024-01-02 is a Tuesday: both templates fire.
        let generated = materialize_for_date(&mut tasks, date(2024, 1, 2));
        assert_eq!(generated, 2);
        assert_eq!(tasks.len(), 4);

        // Wednesday: only the daily one fires, and its Tuesday
        // occurrence does not block it.
        let generated = materialize_for_date(&mut tasks, date(2024, 1, 3));
        assert_eq!(generated, 1);
    }

    #[test]
    fn materialization_is_idempotent_for_a_date() {
        let mut tasks = vec![template(1, date(2024, 1, 1), Recurrence::daily())];
        assert_eq!(materialize_for_date(&mut tasks, date(2024, 1, 2)), 1);
        assert_eq!(materialize_for_date(&mut tasks, date(2024, 1, 2)), 0);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn template_completed_today_is_not_re_expanded() {
        let mut tpl = template(1, date(2024, 1, 1), Recurrence::daily());
        tpl.scheduled_date = Some(date(2024, 1, 5));
        tpl.completed = true;
        tpl.completed_at = date(2024, 1, 5).and_hms_opt(7, 0, 0);
        let mut tasks = vec![tpl];

        assert_eq!(materialize_for_date(&mut tasks, date(2024, 1, 5)), 0);
    }

    #[test]
    fn one_off_tasks_are_not_templates() {
        let mut tasks = vec![template(1, date(2024, 1, 1), Recurrence::none())];
        assert_eq!(materialize_for_date(&mut tasks, date(2024, 1, 1)), 0);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn weekly_template_over_two_days_yields_two_occurrences() {
        // Template created 2024-01-01, weekly on Tue/Thu.
        let mut tasks = vec![template(
            1,
            date(2024, 1, 1),
            Recurrence::weekly("1,3".parse::<Weekdays>().unwrap()),
        )];

        assert_eq!(materialize_for_date(&mut tasks, date(2024, 1, 2)), 1);
        assert_eq!(materialize_for_date(&mut tasks, date(2024, 1, 4)), 1);

        let occurrences: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.template_id() == Some(1))
            .collect();
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].effective_date(), date(2024, 1, 2));
        assert_eq!(occurrences[1].effective_date(), date(2024, 1, 4));
    }

    #[test]
    fn monthly_day_31_template_skips_april() {
        let mut tasks = vec![template(1, date(2024, 1, 31), Recurrence::monthly())];
        for day in 1..=30 {
            assert_eq!(materialize_for_date(&mut tasks, date(2024, 4, day)), 0);
        }
        assert_eq!(materialize_for_date(&mut tasks, date(2024, 5, 31)), 1);
    }

    #[test]
    fn ids_allocate_past_the_maximum() {
        assert_eq!(next_id(&[]), 1);
        let tasks = vec![
            template(3, date(2024, 1, 1), Recurrence::daily()),
            template(10, date(2024, 1, 1), Recurrence::daily()),
        ];
        assert_eq!(next_id(&tasks), 11);
    }

    proptest! {
        /// However many times a date is materialized, no template ever
        /// has two occurrences for the same generation date.
        #[test]
        fn no_duplicate_occurrences(runs in 1usize..5, day_offset in 0u64..60) {
            let start = date(2024, 1, 1);
            let today = start.checked_add_days(chrono::Days::new(day_offset)).unwrap();
            let mut tasks = vec![
                template(1, start, Recurrence::daily()),
                template(2, start, Recurrence::weekly("0,2,4".parse::<Weekdays>().unwrap())),
                template(3, start, Recurrence::monthly()),
            ];
            for _ in 0..runs {
                materialize_for_date(&mut tasks, today);
            }
            for tpl_id in 1..=3 {
                let count = tasks
                    .iter()
                    .filter(|t| t.template_id() == Some(tpl_id) && t.created_at == today)
                    .count();
                prop_assert!(count <= 1);
            }
        }
    }
}
