pub mod execution_record;

pub use execution_record::{ExecutionRecord, ExecutionStatus, NewExecutionRecord};
