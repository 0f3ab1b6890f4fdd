//! Deterministic label-to-profile matching.
//!
//! A field label is normalized (lower-cased, stripped to `[a-z0-9]`) and run
//! through an ordered rule table. The first rule whose predicate holds and
//! which yields a value wins. Rules for empty lists or absent optional data
//! yield nothing and evaluation continues with the next rule.

use std::fmt;

use serde::Serialize;

use formpilot_protocols::Profile;
use formpilot_scanner::FieldRecord;

/// Profile area a rule reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Identity,
    Links,
    Location,
    Legal,
    Demographics,
    Preferences,
    Education,
    Experience,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Identity => "identity",
            Domain::Links => "links",
            Domain::Location => "location",
            Domain::Legal => "legal",
            Domain::Demographics => "demographics",
            Domain::Preferences => "preferences",
            Domain::Education => "education",
            Domain::Experience => "experience",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition on a normalized label.
#[derive(Debug, Clone, Copy)]
pub enum Pred {
    /// Label contains the fragment.
    Has(&'static str),
    /// Label equals the fragment.
    Is(&'static str),
    /// Label contains both fragments.
    Both(&'static str, &'static str),
    /// Label contains the first fragment but not the second.
    HasNot(&'static str, &'static str),
    /// Label contains the first fragment and any of the others.
    WithAny(&'static str, &'static [&'static str]),
}

impl Pred {
    pub fn holds(&self, label: &str) -> bool {
        let has = |fragment: &str| !fragment.is_empty() && label.contains(fragment);
        match *self {
            Pred::Has(f) => has(f),
            Pred::Is(f) => label == f,
            Pred::Both(a, b) => has(a) && has(b),
            Pred::HasNot(a, b) => has(a) && !has(b),
            Pred::WithAny(a, others) => has(a) && others.iter().any(|o| has(o)),
        }
    }
}

/// One entry of the rule table. A rule fires when any predicate holds.
pub struct Rule {
    pub name: &'static str,
    pub domain: Domain,
    pub preds: &'static [Pred],
    pub value: fn(&Profile) -> Option<String>,
}

impl Rule {
    pub fn applies(&self, label: &str) -> bool {
        self.preds.iter().any(|p| p.holds(label))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("preds", &self.preds)
            .finish()
    }
}

/// Diagnostic description of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchExplanation {
    pub rule: &'static str,
    pub domain: Domain,
    pub value: String,
}

fn yes_no(flag: bool) -> Option<String> {
    Some(if flag { "Yes" } else { "No" }.to_string())
}

use Pred::{Both, Has, HasNot, Is, WithAny};

static RULES: &[Rule] = &[
    // Identity
    Rule {
        name: "preferred_name",
        domain: Domain::Identity,
        preds: &[Has("preferredname"), Has("nickname")],
        value: |p| {
            let name = &p.basics.preferred_name;
            Some(if name.is_empty() { &p.basics.first_name } else { name }.clone())
        },
    },
    Rule {
        name: "first_name",
        domain: Domain::Identity,
        preds: &[Has("firstname"), Is("first"), Has("givenname")],
        value: |p| Some(p.basics.first_name.clone()),
    },
    Rule {
        name: "last_name",
        domain: Domain::Identity,
        preds: &[Has("lastname"), Is("last"), Has("familyname"), Has("surname")],
        value: |p| Some(p.basics.last_name.clone()),
    },
    Rule {
        name: "full_name",
        domain: Domain::Identity,
        preds: &[Is("name"), Has("fullname")],
        value: |p| Some(p.display_name()),
    },
    Rule {
        name: "email",
        domain: Domain::Identity,
        preds: &[Has("email")],
        value: |p| Some(p.basics.email.clone()),
    },
    Rule {
        name: "phone",
        domain: Domain::Identity,
        preds: &[Has("phone"), Has("mobile"), Has("contact")],
        value: |p| Some(p.basics.phone.clone()),
    },
    // Links
    Rule {
        name: "linkedin",
        domain: Domain::Links,
        preds: &[Has("linkedin")],
        value: |p| Some(p.basics.urls.linkedin.clone().unwrap_or_default()),
    },
    Rule {
        name: "website",
        domain: Domain::Links,
        preds: &[Has("website"), Has("portfolio"), Has("url")],
        value: |p| {
            let urls = &p.basics.urls;
            Some(
                urls.portfolio
                    .clone()
                    .filter(|u| !u.is_empty())
                    .or_else(|| urls.github.clone())
                    .unwrap_or_default(),
            )
        },
    },
    // Location
    Rule {
        name: "address",
        domain: Domain::Location,
        preds: &[HasNot("address", "email")],
        value: |p| Some(p.basics.location.address.clone()),
    },
    Rule {
        name: "city",
        domain: Domain::Location,
        preds: &[Has("city")],
        value: |p| Some(p.basics.location.city.clone()),
    },
    Rule {
        name: "zip_code",
        domain: Domain::Location,
        preds: &[Has("zip"), Has("postal")],
        value: |p| Some(p.basics.location.zip_code.clone()),
    },
    Rule {
        name: "state",
        domain: Domain::Location,
        preds: &[Has("state"), Has("province")],
        value: |p| Some(p.basics.location.state.clone()),
    },
    Rule {
        name: "country",
        domain: Domain::Location,
        preds: &[Has("country")],
        value: |p| Some(p.basics.location.country.clone()),
    },
    // Legal
    Rule {
        name: "citizenship",
        domain: Domain::Legal,
        preds: &[Has("citizenship"), Has("citizen")],
        value: |p| Some(p.legal.citizenship_status.clone()),
    },
    Rule {
        name: "visa_type",
        domain: Domain::Legal,
        preds: &[Has("visatype"), Has("visastatus"), Has("visa")],
        value: |p| Some(p.legal.visa_status.visa_type.clone()),
    },
    Rule {
        name: "work_authorization",
        domain: Domain::Legal,
        preds: &[
            Has("authorizedtowork"),
            Has("workauthorization"),
            Has("authorized"),
            Both("work", "author"),
        ],
        value: |p| yes_no(p.legal.visa_status.work_authorization.authorized),
    },
    Rule {
        name: "work_auth_type",
        domain: Domain::Legal,
        preds: &[Has("workauthtype"), Has("workpermittype")],
        value: |p| Some(p.legal.visa_status.work_authorization.auth_type.clone()),
    },
    Rule {
        name: "sponsorship_now",
        domain: Domain::Legal,
        preds: &[
            Has("sponsorshipnow"),
            Has("requiresponsorshipnow"),
            Both("sponsor", "now"),
        ],
        value: |p| yes_no(p.legal.visa_status.sponsorship.require_now),
    },
    Rule {
        name: "sponsorship_future",
        domain: Domain::Legal,
        preds: &[
            Has("sponsorshipfuture"),
            Has("requiresponsorshipfuture"),
            WithAny("sponsor", &["future", "will"]),
        ],
        value: |p| yes_no(p.legal.visa_status.sponsorship.require_future),
    },
    Rule {
        // Ambiguous wording; answered with the future requirement.
        name: "sponsorship",
        domain: Domain::Legal,
        preds: &[Has("sponsorship"), Has("requiresponsor")],
        value: |p| yes_no(p.legal.visa_status.sponsorship.require_future),
    },
    // Demographics
    Rule {
        name: "gender",
        domain: Domain::Demographics,
        preds: &[Has("gender")],
        value: |p| Some(p.legal.demographics.gender.clone()),
    },
    Rule {
        name: "race",
        domain: Domain::Demographics,
        preds: &[Has("race"), Has("ethnicity")],
        value: |p| Some(p.legal.demographics.race.clone()),
    },
    Rule {
        name: "veteran",
        domain: Domain::Demographics,
        preds: &[Has("veteran")],
        value: |p| Some(p.legal.demographics.veteran.clone()),
    },
    Rule {
        name: "disability",
        domain: Domain::Demographics,
        preds: &[Has("disability")],
        value: |p| Some(p.legal.demographics.disability.clone()),
    },
    // Preferences
    Rule {
        name: "salary",
        domain: Domain::Preferences,
        preds: &[Has("salary"), Has("compensation"), Has("pay")],
        value: |p| {
            let expected = p.preferences.salary.expected;
            Some(if expected > 0.0 { expected.to_string() } else { String::new() })
        },
    },
    Rule {
        name: "remote",
        domain: Domain::Preferences,
        preds: &[Has("remote"), Has("workfromhome")],
        value: |p| yes_no(p.preferences.location.remote),
    },
    Rule {
        name: "onsite",
        domain: Domain::Preferences,
        preds: &[Has("onsite"), Has("office")],
        value: |p| yes_no(p.preferences.location.onsite),
    },
    Rule {
        name: "relocation",
        domain: Domain::Preferences,
        preds: &[Has("relocation"), Has("willingtorelocate")],
        value: |p| yes_no(p.preferences.location.relocation),
    },
    Rule {
        name: "start_date",
        domain: Domain::Preferences,
        preds: &[Has("startdate"), Has("available"), Has("availability")],
        value: |p| Some(p.preferences.start_date.clone()),
    },
    // Education, most recent entry
    Rule {
        name: "school",
        domain: Domain::Education,
        preds: &[Has("school"), Has("university"), Has("college")],
        value: |p| p.latest_education().map(|e| e.school_name.clone()),
    },
    Rule {
        name: "degree",
        domain: Domain::Education,
        preds: &[Has("degree")],
        value: |p| p.latest_education().map(|e| e.degree.clone()),
    },
    Rule {
        name: "major",
        domain: Domain::Education,
        preds: &[Has("major"), Has("fieldofstudy")],
        value: |p| p.latest_education().map(|e| e.major.clone()),
    },
    Rule {
        name: "gpa",
        domain: Domain::Education,
        preds: &[Has("gpa")],
        value: |p| {
            p.latest_education()
                .and_then(|e| e.gpa.clone())
                .filter(|g| !g.is_empty())
        },
    },
    // Experience, most recent entry
    Rule {
        name: "company",
        domain: Domain::Experience,
        preds: &[Has("company"), Has("employer")],
        value: |p| p.latest_experience().map(|e| e.company_name.clone()),
    },
    Rule {
        name: "job_title",
        domain: Domain::Experience,
        preds: &[Has("position"), Has("title"), Has("jobtitle")],
        value: |p| p.latest_experience().map(|e| e.position_title.clone()),
    },
];

/// The rule table, in evaluation order.
pub fn rules() -> &'static [Rule] {
    RULES
}

/// Lower-case and keep only `[a-z0-9]`.
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Profile value for a field, or `None` when no rule answers it.
pub fn match_field(field: &FieldRecord, profile: &Profile) -> Option<String> {
    match_label(&field.label, profile)
}

pub fn match_label(label: &str, profile: &Profile) -> Option<String> {
    explain_label(label, profile).map(|m| m.value)
}

/// Which rule answers a field, and with what.
pub fn explain(field: &FieldRecord, profile: &Profile) -> Option<MatchExplanation> {
    explain_label(&field.label, profile)
}

fn explain_label(label: &str, profile: &Profile) -> Option<MatchExplanation> {
    let label = normalize_label(label);
    if label.is_empty() {
        return None;
    }
    RULES
        .iter()
        .filter(|rule| rule.applies(&label))
        .find_map(|rule| {
            (rule.value)(profile).map(|value| MatchExplanation {
                rule: rule.name,
                domain: rule.domain,
                value,
            })
        })
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
