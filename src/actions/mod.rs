//! File actions module.
//!
//! This module provides functionality for:
//! - Planning which copy of each duplicate group survives ([`plan`])
//! - Asking the operator for confirmation ([`confirm`])
//! - Executing the plan with per-file failure isolation ([`delete`])
//!
//! ```no_run
//! use dupsweep::actions::{execute, AutoAnswer, Confirm, DeletionPlan};
//!
//! let plan = DeletionPlan::from_groups(Vec::new());
//! let mut confirm = AutoAnswer(false);
//! if confirm.confirm("Delete? (y/n): ").unwrap() {
//!     let report = execute(&plan, None);
//!     println!("{}", report.summary());
//! }
//! ```

pub mod confirm;
pub mod delete;
pub mod plan;

// Re-export commonly used types
pub use confirm::{is_affirmative, AutoAnswer, Confirm, LineConfirm};
pub use delete::{
    execute, permanent_delete, DeleteError, DeleteFailure, DeleteProgressCallback,
    ExecutionReport,
};
pub use plan::{DeletionPlan, PlannedGroup};
