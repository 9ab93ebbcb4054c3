//! In-memory employee table.
//!
//! Employees are held in a fixed, immutable table with an id index for
//! O(1) lookup and a department index used to narrow filter scans.

mod fixtures;
mod store;

pub use fixtures::demo_employees;
pub use store::EmployeeStore;
