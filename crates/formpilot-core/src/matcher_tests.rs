use super::*;
use formpilot_protocols::{Education, Experience};

fn profile() -> Profile {
    let mut profile = Profile::placeholder();
    profile.basics.first_name = "Ada".into();
    profile.basics.last_name = "Lovelace".into();
    profile.basics.email = "ada@example.com".into();
    profile.basics.phone = "555-0100".into();
    profile.basics.location.city = "London".into();
    profile.basics.location.zip_code = "N1".into();
    profile.basics.location.address = "12 St James's Square".into();
    profile.basics.urls.linkedin = Some("https://linkedin.com/in/ada".into());
    profile.basics.urls.github = Some("https://github.com/ada".into());
    profile
}

fn m(label: &str, profile: &Profile) -> Option<String> {
    match_label(label, profile)
}

#[test]
fn test_normalize_label() {
    assert_eq!(normalize_label("First Name *"), "firstname");
    assert_eq!(normalize_label("E-mail (work)"), "emailwork");
    assert_eq!(normalize_label("Zip/Postal Code 2"), "zippostalcode2");
    assert_eq!(normalize_label("  ---  "), "");
}

#[test]
fn test_identity_rules() {
    let p = profile();
    assert_eq!(m("First Name", &p).as_deref(), Some("Ada"));
    assert_eq!(m("Given name", &p).as_deref(), Some("Ada"));
    assert_eq!(m("First", &p).as_deref(), Some("Ada"));
    assert_eq!(m("Surname", &p).as_deref(), Some("Lovelace"));
    assert_eq!(m("Last", &p).as_deref(), Some("Lovelace"));
    assert_eq!(m("Name", &p).as_deref(), Some("Ada Lovelace"));
    assert_eq!(m("Email Address", &p).as_deref(), Some("ada@example.com"));
    assert_eq!(m("Mobile number", &p).as_deref(), Some("555-0100"));
}

#[test]
fn test_exact_rules_do_not_match_substrings() {
    let p = profile();
    // "firstly" contains "first" but is not equal to it.
    assert_eq!(m("Firstly", &p), None);
    assert_eq!(m("Company name", &p), None);
}

#[test]
fn test_full_name_prefers_stored_value() {
    let mut p = profile();
    p.basics.full_name = "Augusta Ada King".into();
    assert_eq!(m("Full name", &p).as_deref(), Some("Augusta Ada King"));
}

#[test]
fn test_preferred_name() {
    let mut p = profile();
    assert_eq!(m("Nickname", &p).as_deref(), Some("Ada"));
    p.basics.preferred_name = "Countess".into();
    assert_eq!(m("Preferred name", &p).as_deref(), Some("Countess"));
}

#[test]
fn test_links() {
    let mut p = profile();
    assert_eq!(
        m("LinkedIn Profile", &p).as_deref(),
        Some("https://linkedin.com/in/ada")
    );
    assert_eq!(m("Website", &p).as_deref(), Some("https://github.com/ada"));
    p.basics.urls.portfolio = Some("https://ada.dev".into());
    assert_eq!(m("Portfolio URL", &p).as_deref(), Some("https://ada.dev"));
    p.basics.urls = Default::default();
    assert_eq!(m("Website", &p).as_deref(), Some(""));
}

#[test]
fn test_location_rules() {
    let p = profile();
    assert_eq!(m("Street address", &p).as_deref(), Some("12 St James's Square"));
    // Email wins before the address rule is considered.
    assert_eq!(m("Email address", &p).as_deref(), Some("ada@example.com"));
    assert_eq!(m("City", &p).as_deref(), Some("London"));
    assert_eq!(m("Postal code", &p).as_deref(), Some("N1"));
    assert_eq!(m("Country", &p).as_deref(), Some("United States"));
}

#[test]
fn test_legal_rules() {
    let p = profile();
    assert_eq!(m("Citizenship", &p).as_deref(), Some("Foreign National"));
    assert_eq!(m("Visa", &p).as_deref(), Some("F-1"));
    assert_eq!(
        m("Are you legally authorized to work in the US?", &p).as_deref(),
        Some("Yes")
    );
    assert_eq!(
        m("Will you now require sponsorship?", &p).as_deref(),
        Some("No")
    );
    assert_eq!(
        m("Will you in the future require sponsorship?", &p).as_deref(),
        Some("Yes")
    );
    assert_eq!(m("Sponsorship", &p).as_deref(), Some("Yes"));
}

#[test]
fn test_require_sponsorship_leans_on_future_answer() {
    let mut p = profile();
    p.basics.first_name = "Jane".into();
    p.legal.visa_status.sponsorship.require_now = false;
    p.legal.visa_status.sponsorship.require_future = true;
    assert_eq!(m("First Name", &p).as_deref(), Some("Jane"));
    assert_eq!(m("Require Sponsorship", &p).as_deref(), Some("Yes"));

    p.legal.visa_status.sponsorship.require_future = false;
    assert_eq!(m("Require Sponsorship", &p).as_deref(), Some("No"));
}

#[test]
fn test_sponsorship_future_uses_will() {
    let mut p = profile();
    p.legal.visa_status.sponsorship.require_future = false;
    assert_eq!(m("Sponsor will be needed", &p).as_deref(), Some("No"));
}

#[test]
fn test_demographics_and_preferences() {
    let mut p = profile();
    assert_eq!(m("Gender", &p).as_deref(), Some("Decline to identify"));
    assert_eq!(m("Race", &p).as_deref(), Some("Decline to identify"));
    // Location rules come first: "ethnicity" contains "city".
    assert_eq!(m("Ethnicity", &p).as_deref(), Some("London"));
    assert_eq!(m("Expected salary", &p).as_deref(), Some(""));
    p.preferences.salary.expected = 120000.0;
    assert_eq!(m("Desired compensation", &p).as_deref(), Some("120000"));
    assert_eq!(m("Open to remote work?", &p).as_deref(), Some("Yes"));
    p.preferences.location.relocation = false;
    assert_eq!(m("Willing to relocate", &p).as_deref(), Some("No"));
    assert_eq!(m("Relocation", &p).as_deref(), Some("No"));
    assert_eq!(m("Availability", &p).as_deref(), Some("Immediate"));
}

#[test]
fn test_education_rules_skip_when_empty() {
    let mut p = profile();
    assert_eq!(m("University", &p), None);
    assert_eq!(m("GPA", &p), None);
    p.education.push(Education::new("Old School", "BSc", "Math"));
    p.education.push(Education::new("Cambridge", "MSc", "Computing"));
    assert_eq!(m("University", &p).as_deref(), Some("Cambridge"));
    assert_eq!(m("Degree", &p).as_deref(), Some("MSc"));
    assert_eq!(m("Field of study", &p).as_deref(), Some("Computing"));
    assert_eq!(m("GPA", &p), None);
    p.education.last_mut().unwrap().gpa = Some("3.9".into());
    assert_eq!(m("GPA", &p).as_deref(), Some("3.9"));
}

#[test]
fn test_experience_rules() {
    let mut p = profile();
    assert_eq!(m("Job title", &p), None);
    p.experience.push(Experience::new("Analytical Engines Ltd", "Engineer"));
    assert_eq!(m("Current employer", &p).as_deref(), Some("Analytical Engines Ltd"));
    assert_eq!(m("Job title", &p).as_deref(), Some("Engineer"));
}

#[test]
fn test_skipped_rule_falls_through() {
    let mut p = profile();
    p.experience.push(Experience::new("Acme", "Engineer"));
    // "College title" holds for the school rule, which yields nothing
    // without education, so the title rule answers.
    assert_eq!(m("College title", &p).as_deref(), Some("Engineer"));
}

#[test]
fn test_unmatched_and_empty_labels() {
    let p = profile();
    assert_eq!(m("Favourite colour", &p), None);
    assert_eq!(m("", &p), None);
    assert_eq!(m("Unknown", &p), None);
}

#[test]
fn test_deterministic() {
    let p = profile();
    for label in ["First Name", "Sponsorship", "Country", "Degree"] {
        assert_eq!(m(label, &p), m(label, &p));
    }
}

#[test]
fn test_explain() {
    let p = profile();
    let field = FieldRecord {
        id: "x".into(),
        kind: formpilot_scanner::FieldKind::Text("text".into()),
        label: "Zip".into(),
        value: String::new(),
        node: formpilot_dom::NodeRef {
            pass: formpilot_dom::PassId(1),
            node: formpilot_dom::NodeId::new(1),
        },
    };
    let why = explain(&field, &p).unwrap();
    assert_eq!(why.rule, "zip_code");
    assert_eq!(why.domain, Domain::Location);
    assert_eq!(match_field(&field, &p).as_deref(), Some("N1"));
}

#[test]
fn test_rule_table_order() {
    let names: Vec<_> = rules().iter().map(|r| r.name).collect();
    let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();
    assert!(pos("first_name") < pos("full_name"));
    assert!(pos("email") < pos("address"));
    assert!(pos("sponsorship_now") < pos("sponsorship_future"));
    assert!(pos("sponsorship_future") < pos("sponsorship"));
    assert!(pos("gpa") < pos("company"));
    assert_eq!(names.last(), Some(&"job_title"));
}
