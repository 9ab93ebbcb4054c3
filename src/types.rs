//! Core types for the directory.

use crate::error::DirectoryError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an employee.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Debug for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmployeeId({})", self.0)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Department an employee belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    #[serde(rename = "Human Resources")]
    HumanResources,
    Marketing,
    Sales,
    Finance,
    Operations,
}

impl Department {
    /// All departments, in the order a form offers them.
    pub const ALL: [Department; 6] = [
        Department::Engineering,
        Department::HumanResources,
        Department::Marketing,
        Department::Sales,
        Department::Finance,
        Department::Operations,
    ];

    /// Human-readable label (also the serialized form).
    pub fn label(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::HumanResources => "Human Resources",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::Finance => "Finance",
            Department::Operations => "Operations",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| DirectoryError::InvalidValue {
                field: "department",
                value: s.to_string(),
            })
    }
}

/// Employment status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Terminated,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [
        EmployeeStatus::Active,
        EmployeeStatus::OnLeave,
        EmployeeStatus::Terminated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::OnLeave => "On Leave",
            EmployeeStatus::Terminated => "Terminated",
        }
    }

    /// Badge class for the status, e.g. `on-leave`.
    pub fn css_class(self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmployeeStatus {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeStatus::ALL
            .into_iter()
            .find(|st| st.label() == s)
            .ok_or_else(|| DirectoryError::InvalidValue {
                field: "status",
                value: s.to_string(),
            })
    }
}

/// A single employee in the directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique, stable identifier.
    pub id: EmployeeId,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub department: Department,

    /// Job title.
    pub position: String,

    pub status: EmployeeStatus,

    pub hire_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Id of this employee's manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<EmployeeId>,

    /// Annual salary in whole dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl Employee {
    /// "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Leading letters of first and last name, for avatar placeholders.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}

/// Optional-field query narrowing which employees are returned.
///
/// A field that is `None` places no constraint. An empty `name` is treated
/// the same as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    /// Filter with no constraints.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True if no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
            && self.department.is_none()
            && self.status.is_none()
    }

    /// Same constraints, with an empty name dropped.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone().filter(|n| !n.is_empty()),
            department: self.department,
            status: self.status,
        }
    }

    /// Check whether an employee satisfies every present field.
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            let needle = name.to_lowercase();
            if !employee.full_name().to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(department) = self.department {
            if employee.department != department {
                return false;
            }
        }

        if let Some(status) = self.status {
            if employee.status != status {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(first: &str, last: &str) -> Employee {
        Employee {
            id: EmployeeId(1),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: "x@company.com".to_string(),
            department: Department::Engineering,
            position: "Engineer".to_string(),
            status: EmployeeStatus::Active,
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            phone: None,
            address: None,
            manager: None,
            salary: None,
            bio: None,
            profile_image: None,
        }
    }

    #[test]
    fn test_department_labels_roundtrip() {
        for dept in Department::ALL {
            assert_eq!(dept.label().parse::<Department>().unwrap(), dept);
        }
        assert!(matches!(
            "HR".parse::<Department>(),
            Err(DirectoryError::InvalidValue { field: "department", .. })
        ));
    }

    #[test]
    fn test_status_css_class() {
        assert_eq!(EmployeeStatus::OnLeave.css_class(), "on-leave");
        assert_eq!(EmployeeStatus::Active.css_class(), "active");
    }

    #[test]
    fn test_name_match_spans_first_and_last() {
        let e = employee("Michael", "Johnson");
        assert!(EmployeeFilter::name("john").matches(&e));
        assert!(EmployeeFilter::name("EL JOH").matches(&e));
        assert!(!EmployeeFilter::name("jane").matches(&e));
    }

    #[test]
    fn test_empty_name_is_unconstrained() {
        let filter = EmployeeFilter::name("");
        assert!(filter.is_empty());
        assert!(filter.matches(&employee("Jane", "Smith")));
    }

    #[test]
    fn test_filter_serializes_without_absent_fields() {
        let filter = EmployeeFilter::name("John").with_department(Department::HumanResources);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "John", "department": "Human Resources"})
        );
        assert_eq!(serde_json::to_string(&EmployeeFilter::all()).unwrap(), "{}");
    }

    #[test]
    fn test_initials() {
        assert_eq!(employee("John", "Doe").initials(), "JD");
    }
}
