//! Immutable employee table with lookup indices.

use crate::error::{DirectoryError, Result};
use crate::types::{Department, Employee, EmployeeFilter, EmployeeId};
use std::collections::HashMap;

use super::fixtures::demo_employees;

/// A fixed table of employees.
///
/// The table never changes after construction. Iteration order is the order
/// the employees were supplied in.
#[derive(Clone, Debug)]
pub struct EmployeeStore {
    /// Employees in store order.
    employees: Vec<Employee>,

    /// Employee ID to position in `employees`.
    id_index: HashMap<EmployeeId, usize>,

    /// Department to positions, ascending.
    department_index: HashMap<Department, Vec<usize>>,
}

impl EmployeeStore {
    /// Build a store, rejecting duplicate ids.
    pub fn new(employees: Vec<Employee>) -> Result<Self> {
        match Self::index(employees) {
            (_, Some(duplicate)) => Err(DirectoryError::DuplicateEmployee(duplicate)),
            (store, None) => Ok(store),
        }
    }

    /// The bundled demo table.
    pub fn demo() -> Self {
        Self::index(demo_employees()).0
    }

    /// Build indices, reporting the first duplicated id if any.
    fn index(employees: Vec<Employee>) -> (Self, Option<EmployeeId>) {
        let mut id_index = HashMap::with_capacity(employees.len());
        let mut department_index: HashMap<Department, Vec<usize>> = HashMap::new();
        let mut duplicate = None;

        for (pos, employee) in employees.iter().enumerate() {
            if id_index.insert(employee.id, pos).is_some() && duplicate.is_none() {
                duplicate = Some(employee.id);
            }
            department_index
                .entry(employee.department)
                .or_default()
                .push(pos);
        }

        let store = Self {
            employees,
            id_index,
            department_index,
        };
        (store, duplicate)
    }

    /// Every employee, in store order.
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.id_index.get(&id).map(|&pos| &self.employees[pos])
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn require(&self, id: EmployeeId) -> Result<&Employee> {
        self.get(id).ok_or(DirectoryError::EmployeeNotFound(id))
    }

    /// Employees satisfying every present field of `filter`, in store order.
    pub fn filter(&self, filter: &EmployeeFilter) -> Vec<Employee> {
        match filter.department {
            Some(department) => self
                .department_index
                .get(&department)
                .map(|positions| {
                    positions
                        .iter()
                        .map(|&pos| &self.employees[pos])
                        .filter(|e| filter.matches(e))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            None => self
                .employees
                .iter()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeStatus;

    #[test]
    fn test_demo_ids_are_unique() {
        let store = EmployeeStore::demo();
        assert_eq!(store.len(), 15);
        assert!(EmployeeStore::new(store.all().to_vec()).is_ok());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut employees = demo_employees();
        let mut dup = employees[0].clone();
        dup.first_name = "Johnny".to_string();
        employees.push(dup);

        let result = EmployeeStore::new(employees);
        assert!(matches!(
            result,
            Err(DirectoryError::DuplicateEmployee(EmployeeId(1)))
        ));
    }

    #[test]
    fn test_get_and_require() {
        let store = EmployeeStore::demo();
        assert_eq!(store.get(EmployeeId(5)).unwrap().first_name, "David");
        assert!(store.get(EmployeeId(999)).is_none());
        assert!(matches!(
            store.require(EmployeeId(999)),
            Err(DirectoryError::EmployeeNotFound(EmployeeId(999)))
        ));
    }

    #[test]
    fn test_department_filter_keeps_store_order() {
        let store = EmployeeStore::demo();
        let ids: Vec<u32> = store
            .filter(&EmployeeFilter::all().with_department(Department::Engineering))
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(ids, vec![1, 5, 11, 13]);
    }

    #[test]
    fn test_combined_filter() {
        let store = EmployeeStore::demo();
        let filter = EmployeeFilter::all()
            .with_department(Department::Engineering)
            .with_status(EmployeeStatus::Active);
        let ids: Vec<u32> = store.filter(&filter).iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 5, 13]);
    }

    #[test]
    fn test_department_with_no_members() {
        let store = EmployeeStore::new(demo_employees().into_iter().take(1).collect()).unwrap();
        let result = store.filter(&EmployeeFilter::all().with_department(Department::Sales));
        assert!(result.is_empty());
    }
}
