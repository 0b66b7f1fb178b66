//! The completion/exception controller and read-path orchestration.
//!
//! Every operation is a full read-modify-write cycle against the store:
//! load the record set, run the pure evaluator/classifier/materializer
//! logic, write back. An internal mutex serializes those cycles because
//! several operations perform non-atomic multi-step mutations (for
//! example the delete-then-insert in [`Engine::uncomplete`]) that are
//! not safe under interleaving. A background materialization job must go
//! through the same engine instance to share that lock.

use chrono::{Days, NaiveDate, NaiveDateTime};
use tokio::sync::Mutex;

use crate::classify::{self, sort_for_day};
use crate::error::CoreError;
use crate::materialize;
use crate::models::{
    default_categories, Category, CompletionResult, DataSet, DayStats, DayView, MoveData,
    NewCategoryData, NewTaskData, Priority, Reminder, Task, TaskId, TaskRole, TaskView,
    UpdateTaskData,
};
use crate::recurrence;
use crate::store::TaskStore;

pub struct Engine<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: TaskStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The three-way day partition: backfills today's occurrences, then
    /// classifies every record as active today, completed today, or
    /// belonging to another day. The active list carries the day sort.
    pub async fn list_day(&self, today: NaiveDate) -> Result<DayView, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.store.load().await?;
        if materialize::materialize_for_date(&mut data.tasks, today) > 0 {
            self.store.save(&data).await?;
        }

        let mut view = DayView::default();
        for task in &data.tasks {
            let enriched = task_view(&data, task, today);
            if classify::is_completed_today(task, today) {
                view.today_completed.push(enriched);
            } else if classify::should_display_today(task, today) && !task.completed {
                view.today_active.push(enriched);
            } else {
                view.other_days.push(enriched);
            }
        }
        sort_for_day(&mut view.today_active);
        Ok(view)
    }

    pub async fn create_task(
        &self,
        data: NewTaskData,
        today: NaiveDate,
    ) -> Result<Task, CoreError> {
        if data.title.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Task title must not be empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut set = self.store.load().await?;

        let task = Task {
            id: materialize::next_id(&set.tasks),
            title: data.title,
            description: data.description,
            category_id: data.category_id,
            priority: data.priority.unwrap_or_default(),
            estimated_time: data.estimated_time,
            scheduled_date: Some(data.scheduled_date.unwrap_or(today)),
            time_of_day: data.time_of_day,
            completed: false,
            completed_at: None,
            created_at: today,
            role: TaskRole::Source {
                recurrence: data.recurrence,
            },
        };

        set.tasks.push(task.clone());
        self.store.save(&set).await?;
        Ok(task)
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Task, CoreError> {
        let data = self.store.load().await?;
        data.find_task(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Full-replace template update. Existing occurrences of the
    /// template are re-evaluated against the new rule on the date each
    /// was generated for, and pruned when the new rule would no longer
    /// produce them.
    pub async fn update_template(
        &self,
        id: TaskId,
        data: UpdateTaskData,
    ) -> Result<Task, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut set = self.store.load().await?;

        let task = set
            .find_task_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        task.title = data.title;
        task.description = data.description;
        task.category_id = data.category_id;
        task.priority = data.priority;
        task.estimated_time = data.estimated_time;
        let is_source = match &mut task.role {
            TaskRole::Source { recurrence } => {
                *recurrence = data.recurrence;
                true
            }
            // Recurrence edits do not apply to generated occurrences.
            TaskRole::Occurrence { .. } => false,
        };
        let updated = task.clone();

        if is_source {
            let rule = data.recurrence;
            set.tasks.retain(|t| {
                t.template_id() != Some(id)
                    || recurrence::displays_after_update(&rule, t.created_at, t.created_at)
            });
        }

        self.store.save(&set).await?;
        Ok(updated)
    }

    /// Reschedules a record. A template-derived occurrence becomes a
    /// standing exception, permanently detached from regeneration.
    ///
    /// The effective date lands two days after the requested one. That
    /// offset is inherited source behavior kept for compatibility and
    /// flagged for product review, not an intentional feature.
    pub async fn move_task(&self, id: TaskId, data: MoveData) -> Result<Task, CoreError> {
        let effective_date = data
            .date
            .checked_add_days(Days::new(2))
            .ok_or_else(|| CoreError::InvalidInput("Date out of range".to_string()))?;

        let _guard = self.write_lock.lock().await;
        let mut set = self.store.load().await?;

        let task = set
            .find_task_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        task.scheduled_date = Some(effective_date);
        if let Some(time) = data.time_of_day {
            task.time_of_day = Some(time);
        }
        if let TaskRole::Occurrence { is_exception, .. } = &mut task.role {
            *is_exception = true;
        }

        let moved = task.clone();
        self.store.save(&set).await?;
        Ok(moved)
    }

    /// Marks a record completed and advances its recurrence: when the
    /// owning template (or the record itself, when a recurring template
    /// is completed directly) is still generating, the next eligible
    /// occurrence is materialized unless it already exists.
    pub async fn complete(
        &self,
        id: TaskId,
        now: NaiveDateTime,
    ) -> Result<CompletionResult, CoreError> {
        let today = now.date();
        let _guard = self.write_lock.lock().await;
        let mut set = self.store.load().await?;

        let task = set
            .find_task_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        task.completed = true;
        task.completed_at = Some(now);
        let completed = task.clone();

        let template = match completed.template_id() {
            Some(template_id) => set.find_task(template_id).cloned(),
            None if completed.is_template() => Some(completed.clone()),
            None => None,
        };

        let result = match template {
            Some(template) => {
                let next = self.advance_recurrence(&mut set, &template, today);
                CompletionResult::Recurring { completed, next }
            }
            None => CompletionResult::Single(completed),
        };

        self.store.save(&set).await?;
        Ok(result)
    }

    /// Clears completion state. A template-derived occurrence whose
    /// template is eligible today is replaced by a fresh occurrence
    /// dated today, re-surfacing the task as today's pending instance
    /// instead of leaving stale fields behind. When today's occurrence
    /// already exists (a later read materialized it), the cleared record
    /// is kept as-is so no date ever holds two occurrences.
    pub async fn uncomplete(&self, id: TaskId, today: NaiveDate) -> Result<Task, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut set = self.store.load().await?;

        let task = set
            .find_task_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        task.completed = false;
        task.completed_at = None;
        let cleared = task.clone();

        if let Some(template_id) = cleared.template_id() {
            if let Some(template) = set.find_task(template_id).cloned() {
                let eligible = template
                    .recurrence()
                    .is_some_and(|rule| recurrence::is_eligible(rule, template.created_at, today));
                let already_present = cleared.created_at != today
                    && materialize::occurrence_exists(&set.tasks, template_id, today);
                if eligible && !already_present {
                    set.tasks.retain(|t| t.id != id);
                    let fresh = materialize::spawn_occurrence(
                        &template,
                        today,
                        materialize::next_id(&set.tasks),
                    );
                    set.tasks.push(fresh.clone());
                    self.store.save(&set).await?;
                    return Ok(fresh);
                }
            }
        }

        self.store.save(&set).await?;
        Ok(cleared)
    }

    /// Deletes a record; deleting a template cascades to every
    /// occurrence that references it.
    pub async fn delete(&self, id: TaskId) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut set = self.store.load().await?;

        if set.find_task(id).is_none() {
            return Err(CoreError::NotFound(id.to_string()));
        }
        set.tasks
            .retain(|t| t.id != id && t.template_id() != Some(id));

        self.store.save(&set).await?;
        Ok(())
    }

    pub async fn stats_for(&self, today: NaiveDate) -> Result<DayStats, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.store.load().await?;
        if materialize::materialize_for_date(&mut data.tasks, today) > 0 {
            self.store.save(&data).await?;
        }

        let day_tasks: Vec<&Task> = data
            .tasks
            .iter()
            .filter(|t| {
                classify::should_display_today(t, today) || classify::is_completed_today(t, today)
            })
            .collect();

        let total_tasks = day_tasks.len();
        let completed_tasks = day_tasks
            .iter()
            .filter(|t| classify::is_completed_today(t, today))
            .count();
        let total_time: u64 = day_tasks.iter().map(|t| t.estimated_time as u64).sum();
        let completed_time: u64 = day_tasks
            .iter()
            .filter(|t| classify::is_completed_today(t, today))
            .map(|t| t.estimated_time as u64)
            .sum();

        let count_by = |p: Priority| day_tasks.iter().filter(|t| t.priority == p).count();

        Ok(DayStats {
            total_tasks,
            completed_tasks,
            completion_rate: rate(completed_tasks as f64, total_tasks as f64),
            high_priority: count_by(Priority::High),
            medium_priority: count_by(Priority::Medium),
            low_priority: count_by(Priority::Low),
            total_time_minutes: total_time,
            completed_time_minutes: completed_time,
            time_completion_rate: rate(completed_time as f64, total_time as f64),
        })
    }

    /// Every record scheduled on `date`, with category and overdue
    /// metadata attached, in day order.
    pub async fn calendar_for(
        &self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<TaskView>, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.store.load().await?;
        if materialize::materialize_for_date(&mut data.tasks, today) > 0 {
            self.store.save(&data).await?;
        }

        let mut views: Vec<TaskView> = data
            .tasks
            .iter()
            .filter(|t| t.effective_date() == date)
            .map(|t| task_view(&data, t, today))
            .collect();
        sort_for_day(&mut views);
        Ok(views)
    }

    /// Pending tasks displaying today whose wall-clock time falls in
    /// the reminder lead window. Delivery is the caller's concern.
    pub async fn upcoming_reminders(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<Reminder>, CoreError> {
        let today = now.date();
        let _guard = self.write_lock.lock().await;
        let mut data = self.store.load().await?;
        if materialize::materialize_for_date(&mut data.tasks, today) > 0 {
            self.store.save(&data).await?;
        }

        Ok(data
            .tasks
            .iter()
            .filter(|t| {
                classify::should_display_today(t, today)
                    && !t.completed
                    && classify::due_for_reminder(t, now)
            })
            .map(|t| Reminder {
                task_id: t.id,
                title: t.title.clone(),
                time_of_day: t.time_of_day,
                description: t.description.clone(),
                noted_at: now,
            })
            .collect())
    }

    /// Lists categories, seeding the default set on first read.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.store.load().await?;
        if data.categories.is_empty() {
            data.categories = default_categories();
            self.store.save(&data).await?;
        }
        Ok(data.categories)
    }

    pub async fn create_category(&self, data: NewCategoryData) -> Result<Category, CoreError> {
        if data.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Category name must not be empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut set = self.store.load().await?;

        let category = Category {
            id: set.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: data.name,
            color: data.color,
            icon: data.icon,
        };
        set.categories.push(category.clone());
        self.store.save(&set).await?;
        Ok(category)
    }

    /// Entry point for a scheduled daily job: backfill today's
    /// occurrences outside any read request, under the same lock.
    pub async fn materialize_today(&self, today: NaiveDate) -> Result<usize, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.store.load().await?;
        let generated = materialize::materialize_for_date(&mut data.tasks, today);
        if generated > 0 {
            self.store.save(&data).await?;
        }
        Ok(generated)
    }

    fn advance_recurrence(
        &self,
        set: &mut DataSet,
        template: &Task,
        today: NaiveDate,
    ) -> Option<Task> {
        let rule = template.recurrence()?;
        if !recurrence::should_create_next(rule, today) {
            return None;
        }
        let next_date = recurrence::next_eligible_date(rule, today)?;
        if materialize::occurrence_exists(&set.tasks, template.id, next_date) {
            return None;
        }
        let occurrence = materialize::spawn_occurrence(
            template,
            next_date,
            materialize::next_id(&set.tasks),
        );
        set.tasks.push(occurrence.clone());
        Some(occurrence)
    }
}

fn rate(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        100.0 * part / whole
    }
}

fn task_view(data: &DataSet, task: &Task, today: NaiveDate) -> TaskView {
    TaskView {
        task: task.clone(),
        category: task
            .category_id
            .and_then(|id| data.find_category(id))
            .cloned(),
        overdue: classify::is_overdue(task, today),
    }
}
