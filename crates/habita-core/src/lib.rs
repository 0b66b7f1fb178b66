//! # Habita Core Library
//!
//! A task tracking library built around recurring templates and the
//! dated occurrences they produce: recurrence evaluation, lazy
//! occurrence materialization, per-day classification and completion
//! state transitions.
//!
//! ## Features
//!
//! - **Template-Based Recurrence**: daily, weekly (by weekday set) and
//!   monthly (by day-of-month) rules with an optional end date
//! - **Lazy Materialization**: occurrences are generated on first read
//!   for an eligible date, at most one per (template, date)
//! - **Exceptions**: a moved occurrence detaches from its template and
//!   stops regenerating
//! - **Day Classification**: pure overdue / completed-today /
//!   displayable-today predicates with a deterministic day ordering
//! - **Pluggable Storage**: an async store trait with a
//!   corruption-tolerant JSON file implementation
//!
//! ## Core Modules
//!
//! - [`models`]: record types, closed enums and transfer objects
//! - [`recurrence`]: recurrence rule evaluation
//! - [`classify`]: per-day classification predicates
//! - [`materialize`]: occurrence generation
//! - [`engine`]: completion/exception state transitions and read paths
//! - [`store`]: the task store collaborator boundary
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use habita_core::error::CoreError;
//! use habita_core::{engine::Engine, models::NewTaskData, store::JsonFileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), CoreError> {
//!     let engine = Engine::new(JsonFileStore::new("tasks.json"));
//!     let today = Local::now().date_naive();
//!
//!     let task = engine
//!         .create_task(
//!             NewTaskData {
//!                 title: "Morning stretch".to_string(),
//!                 recurrence: habita_core::models::Recurrence::daily(),
//!                 ..Default::default()
//!             },
//!             today,
//!         )
//!         .await?;
//!     println!("Created task: {}", task.title);
//!
//!     let day = engine.list_day(today).await?;
//!     println!("{} tasks active today", day.today_active.len());
//!
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod engine;
pub mod error;
pub mod materialize;
pub mod models;
pub mod recurrence;
pub mod store;
