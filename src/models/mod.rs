pub mod task;

pub use task::{GraphQlError, Item, Objective, Task, TaskData, TaskResponse};
