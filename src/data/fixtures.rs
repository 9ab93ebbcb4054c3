//! The bundled demo employees.

use crate::types::{Department, Employee, EmployeeId, EmployeeStatus};
use chrono::NaiveDate;

struct Row {
    id: u32,
    first: &'static str,
    last: &'static str,
    department: Department,
    position: &'static str,
    status: EmployeeStatus,
    hired: (i32, u32, u32),
    phone: &'static str,
    address: &'static str,
    manager: Option<u32>,
    salary: u32,
    bio: &'static str,
    portrait: &'static str,
}

impl Row {
    fn into_employee(self) -> Employee {
        let (y, m, d) = self.hired;
        Employee {
            id: EmployeeId(self.id),
            first_name: self.first.to_string(),
            last_name: self.last.to_string(),
            email: format!(
                "{}.{}@company.com",
                self.first.to_lowercase(),
                self.last.to_lowercase()
            ),
            department: self.department,
            position: self.position.to_string(),
            status: self.status,
            hire_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            phone: Some(self.phone.to_string()),
            address: Some(self.address.to_string()),
            manager: self.manager.map(EmployeeId),
            salary: Some(self.salary),
            bio: Some(self.bio.to_string()),
            profile_image: Some(format!(
                "https://randomuser.me/api/portraits/{}/{}.jpg",
                self.portrait, self.id
            )),
        }
    }
}

/// The fifteen employees of the demo directory, in display order.
pub fn demo_employees() -> Vec<Employee> {
    use Department::*;
    use EmployeeStatus::*;

    vec![
        Row {
            id: 1,
            first: "John",
            last: "Doe",
            department: Engineering,
            position: "Senior Software Engineer",
            status: Active,
            hired: (2020, 1, 15),
            phone: "555-123-4567",
            address: "123 Main St, Anytown, USA",
            manager: Some(5),
            salary: 120_000,
            bio: "John is a senior software engineer with expertise in React and TypeScript.",
            portrait: "men",
        },
        Row {
            id: 2,
            first: "Jane",
            last: "Smith",
            department: HumanResources,
            position: "HR Manager",
            status: Active,
            hired: (2019, 3, 20),
            phone: "555-987-6543",
            address: "456 Oak Ave, Somewhere, USA",
            manager: Some(8),
            salary: 95_000,
            bio: "Jane oversees all HR functions and employee relations.",
            portrait: "women",
        },
        Row {
            id: 3,
            first: "Michael",
            last: "Johnson",
            department: Marketing,
            position: "Marketing Specialist",
            status: OnLeave,
            hired: (2021, 5, 10),
            phone: "555-456-7890",
            address: "789 Pine Rd, Elsewhere, USA",
            manager: Some(7),
            salary: 85_000,
            bio: "Michael specializes in digital marketing campaigns.",
            portrait: "men",
        },
        Row {
            id: 4,
            first: "Emily",
            last: "Williams",
            department: Sales,
            position: "Sales Representative",
            status: Active,
            hired: (2022, 2, 15),
            phone: "555-789-0123",
            address: "101 Cedar Ln, Nowhere, USA",
            manager: Some(9),
            salary: 75_000,
            bio: "Emily excels at building client relationships and closing deals.",
            portrait: "women",
        },
        Row {
            id: 5,
            first: "David",
            last: "Brown",
            department: Engineering,
            position: "Engineering Director",
            status: Active,
            hired: (2018, 11, 5),
            phone: "555-234-5678",
            address: "202 Maple Dr, Anytown, USA",
            manager: None,
            salary: 150_000,
            bio: "David leads the engineering department and oversees all technical projects.",
            portrait: "men",
        },
        Row {
            id: 6,
            first: "Sarah",
            last: "Miller",
            department: Finance,
            position: "Financial Analyst",
            status: Active,
            hired: (2021, 9, 12),
            phone: "555-345-6789",
            address: "303 Birch St, Somewhere, USA",
            manager: Some(10),
            salary: 90_000,
            bio: "Sarah analyzes financial data and prepares reports for management.",
            portrait: "women",
        },
        Row {
            id: 7,
            first: "Robert",
            last: "Davis",
            department: Marketing,
            position: "Marketing Director",
            status: Active,
            hired: (2019, 7, 22),
            phone: "555-456-7890",
            address: "404 Elm Ct, Elsewhere, USA",
            manager: None,
            salary: 130_000,
            bio: "Robert oversees all marketing initiatives and brand strategy.",
            portrait: "men",
        },
        Row {
            id: 8,
            first: "Jennifer",
            last: "Wilson",
            department: HumanResources,
            position: "HR Director",
            status: Active,
            hired: (2018, 4, 18),
            phone: "555-567-8901",
            address: "505 Spruce Way, Nowhere, USA",
            manager: None,
            salary: 135_000,
            bio: "Jennifer leads the HR department and develops company-wide policies.",
            portrait: "women",
        },
        Row {
            id: 9,
            first: "Thomas",
            last: "Anderson",
            department: Sales,
            position: "Sales Director",
            status: Active,
            hired: (2017, 8, 30),
            phone: "555-678-9012",
            address: "606 Redwood Ave, Anytown, USA",
            manager: None,
            salary: 140_000,
            bio: "Thomas leads the sales team and develops sales strategies.",
            portrait: "men",
        },
        Row {
            id: 10,
            first: "Lisa",
            last: "Taylor",
            department: Finance,
            position: "Finance Director",
            status: Active,
            hired: (2016, 12, 10),
            phone: "555-789-0123",
            address: "707 Sequoia Blvd, Somewhere, USA",
            manager: None,
            salary: 145_000,
            bio: "Lisa oversees all financial operations and budgeting processes.",
            portrait: "women",
        },
        Row {
            id: 11,
            first: "James",
            last: "Moore",
            department: Engineering,
            position: "Software Engineer",
            status: Terminated,
            hired: (2021, 3, 15),
            phone: "555-890-1234",
            address: "808 Aspen Pl, Elsewhere, USA",
            manager: Some(5),
            salary: 95_000,
            bio: "James specializes in backend development and database design.",
            portrait: "men",
        },
        Row {
            id: 12,
            first: "Patricia",
            last: "Jackson",
            department: Operations,
            position: "Operations Manager",
            status: Active,
            hired: (2020, 6, 22),
            phone: "555-901-2345",
            address: "909 Willow Dr, Nowhere, USA",
            manager: Some(15),
            salary: 100_000,
            bio: "Patricia manages day-to-day operations and process improvements.",
            portrait: "women",
        },
        Row {
            id: 13,
            first: "Richard",
            last: "White",
            department: Engineering,
            position: "QA Engineer",
            status: Active,
            hired: (2022, 1, 10),
            phone: "555-012-3456",
            address: "110 Cypress Ln, Anytown, USA",
            manager: Some(5),
            salary: 90_000,
            bio: "Richard ensures software quality through comprehensive testing.",
            portrait: "men",
        },
        Row {
            id: 14,
            first: "Elizabeth",
            last: "Harris",
            department: Marketing,
            position: "Content Specialist",
            status: OnLeave,
            hired: (2021, 11, 5),
            phone: "555-123-4567",
            address: "211 Magnolia St, Somewhere, USA",
            manager: Some(7),
            salary: 80_000,
            bio: "Elizabeth creates engaging content for various marketing channels.",
            portrait: "women",
        },
        Row {
            id: 15,
            first: "Charles",
            last: "Clark",
            department: Operations,
            position: "Operations Director",
            status: Active,
            hired: (2017, 5, 18),
            phone: "555-234-5678",
            address: "312 Juniper Rd, Elsewhere, USA",
            manager: None,
            salary: 135_000,
            bio: "Charles oversees all operational aspects of the company.",
            portrait: "men",
        },
    ]
    .into_iter()
    .map(Row::into_employee)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managers_exist() {
        let employees = demo_employees();
        for e in &employees {
            if let Some(manager) = e.manager {
                assert!(employees.iter().any(|m| m.id == manager), "{:?}", e.id);
            }
        }
    }

    #[test]
    fn test_emails_follow_name() {
        let employees = demo_employees();
        assert_eq!(employees[0].email, "john.doe@company.com");
        assert_eq!(employees[0].hire_date.to_string(), "2020-01-15");
    }
}
