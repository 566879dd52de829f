//! Demo sites and employees for local runs (`SEED_DEMO_DATA=true`).

use crate::model::attendance::WorkCategory;
use crate::model::person::Person;
use crate::model::site::Site;

pub const MANILA_SITE_ID: &str = "3f1d2c4b-8a6e-4f0b-9c7d-1e2a3b4c5d01";
pub const CEBU_SITE_ID: &str = "3f1d2c4b-8a6e-4f0b-9c7d-1e2a3b4c5d05";
pub const DAVAO_SITE_ID: &str = "3f1d2c4b-8a6e-4f0b-9c7d-1e2a3b4c5d12";

/// Departments offered to head-office staff.
pub const DEPARTMENTS: [&str; 6] = [
    "Finance and admin",
    "Human Resource",
    "Logistics",
    "Operations",
    "Sales and SAQ",
    "Telecom Enterprise",
];

/// Roles offered for field team members. Other values are accepted.
pub const JOB_ROLES: [&str; 3] = ["Rigger", "Installer", "Driver"];

pub fn demo_sites() -> Vec<Site> {
    let site = |id: &str, code: &str, name: &str, address: &str| Site {
        id: id.to_string(),
        site_code: code.to_string(),
        site_name: name.to_string(),
        location_address: Some(address.to_string()),
        is_active: true,
    };

    vec![
        site(MANILA_SITE_ID, "MTI-MANILA-01", "Manila Tower Project", "Ermita, Manila"),
        site(CEBU_SITE_ID, "MTI-CEBU-05", "Cebu Data Center", "IT Park, Cebu City"),
        site(DAVAO_SITE_ID, "MTI-DAVAO-12", "Davao Telecom Hub", "Lanang, Davao City"),
    ]
}

pub fn demo_people() -> Vec<Person> {
    let person = |id: &str,
                  email: &str,
                  first: &str,
                  last: &str,
                  category: WorkCategory,
                  department: &str,
                  position: &str| Person {
        id: id.to_string(),
        email: email.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        department: Some(department.to_string()),
        work_category: category,
        position: Some(position.to_string()),
    };

    vec![
        person(
            "9b2e6c1a-0d4f-4e8b-a7c3-5f6d7e8f9a01",
            "cto@martindaletech.com",
            "Michael",
            "Technical",
            WorkCategory::HeadOffice,
            "Operations",
            "Chief Technical Officer",
        ),
        person(
            "9b2e6c1a-0d4f-4e8b-a7c3-5f6d7e8f9a02",
            "bdm@martindaletech.com",
            "Sarah",
            "Sales",
            WorkCategory::HeadOffice,
            "Sales and SAQ",
            "Business Development Manager",
        ),
        person(
            "9b2e6c1a-0d4f-4e8b-a7c3-5f6d7e8f9a03",
            "tl1@martindaletech.com",
            "Juan",
            "Dela Cruz",
            WorkCategory::Field,
            "Telecom Enterprise",
            "Team Leader",
        ),
    ]
}
