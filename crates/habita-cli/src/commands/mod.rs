pub mod add;
pub mod category;
pub mod delete;
pub mod r#do;
pub mod edit;
pub mod list;
pub mod r#move;
pub mod remind;
pub mod stats;
