pub mod activity;
pub mod column;
pub mod priority;
pub mod project;
pub mod task;
