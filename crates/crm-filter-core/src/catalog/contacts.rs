//! Stock catalog for the contacts screen.

use crate::api::operator::OperatorId;

use super::{FieldCatalog, FieldDescriptor};

const CONTACT_TYPES: [(&str, &str); 6] = [
    ("it_candidate", "IT Candidate"),
    ("healthcare_candidate", "Healthcare Candidate"),
    ("vendor_client", "Vendor/Client"),
    ("empanelment_contact", "Empanelment Contact"),
    ("internal_india", "Internal India"),
    ("internal_usa", "Internal USA"),
];

const WORKFLOW_STATUSES: [(&str, &str); 11] = [
    ("Initial Contact", "Initial Contact"),
    ("Spoke to candidate", "Spoke to candidate"),
    ("Resume needs to be prepared", "Resume needs to be prepared"),
    ("Resume prepared and sent for review", "Resume prepared"),
    ("Assigned to Recruiter", "Assigned to Recruiter"),
    ("Recruiter started marketing", "Recruiter started marketing"),
    ("Placed into Job", "Placed into Job"),
    ("Candidate declined marketing", "Candidate declined"),
    ("Candidate on vacation", "On vacation"),
    ("Candidate not responding", "Not responding"),
    ("Exclusive roles only", "Exclusive roles"),
];

const VISA_STATUSES: [(&str, &str); 9] = [
    ("F1", "F1"),
    ("OPT", "OPT"),
    ("STEM OPT", "STEM OPT"),
    ("H1B", "H1B"),
    ("H4", "H4"),
    ("H4 EAD", "H4 EAD"),
    ("GC EAD", "GC EAD"),
    ("GC", "GC"),
    ("USC", "USC"),
];

const YEARS_EXPERIENCE: [(&str, &str); 6] = [
    ("0", "0"),
    ("1 to 3", "1 to 3"),
    ("4 to 6", "4 to 6"),
    ("7 to 9", "7 to 9"),
    ("10 -15", "10 to 15"),
    ("15+", "15+"),
];

const COUNTRIES: [(&str, &str); 2] = [("USA", "USA"), ("India", "India")];

const REFERRAL_SOURCES: [(&str, &str); 3] =
    [("FB", "Facebook"), ("Google", "Google"), ("Friend", "Friend")];

/// The contacts catalog used by the recruiting CRM.
///
/// Fresh conditions default to `first_name starts_with ""`. Fields backed
/// by reference tables read their identifiers from `<name>_id` columns
/// (`status` reads `workflow_status_id`).
pub fn contacts_catalog() -> FieldCatalog {
    let fields = vec![
        FieldDescriptor::text("first_name", "First Name"),
        FieldDescriptor::text("last_name", "Last Name"),
        FieldDescriptor::text("email", "Email"),
        FieldDescriptor::text("phone", "Phone"),
        FieldDescriptor::enumerated("contact_type", "Contact Type", CONTACT_TYPES),
        FieldDescriptor::enumerated("status", "Status", WORKFLOW_STATUSES)
            .with_identifier_attribute("workflow_status_id"),
        FieldDescriptor::enumerated("visa_status", "Visa Status", VISA_STATUSES)
            .with_identifier_attribute("visa_status_id"),
        FieldDescriptor::text("job_title", "Job Title").with_identifier_attribute("job_title_id"),
        FieldDescriptor::enumerated("years_experience", "Years of Experience", YEARS_EXPERIENCE)
            .with_identifier_attribute("years_experience_id"),
        FieldDescriptor::enumerated("country", "Country", COUNTRIES)
            .with_identifier_attribute("country_id"),
        FieldDescriptor::text("state", "State"),
        FieldDescriptor::text("city", "City"),
        FieldDescriptor::enumerated("referral_source", "Referral Source", REFERRAL_SOURCES)
            .with_identifier_attribute("referral_source_id"),
        FieldDescriptor::text("remarks", "Remarks"),
    ];

    // The field list is static; both calls only fail on programmer error.
    FieldCatalog::new(fields)
        .and_then(|catalog| catalog.with_default_operator(OperatorId::StartsWith))
        .expect("stock contacts catalog is valid")
}
