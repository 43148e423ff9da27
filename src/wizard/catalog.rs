//! Step catalog
//!
//! `derive_steps` builds the full ordered list of steps from the current
//! form data. Later steps read earlier answers (greeting, referrer label and
//! visibility), so callers re-derive after every change instead of patching.

use std::sync::OnceLock;

use crate::models::{FieldDefinition, FieldPattern, FormData, SelectOption, StepDefinition};

pub const FIRST_NAME: &str = "contact.first_name";
pub const LAST_NAME: &str = "contact.last_name";
pub const EMAIL: &str = "contact.email";
pub const COMPANY_NAME: &str = "contact.company_name";
pub const ACCEPTS_MARKETING: &str = "contact.accepts_marketing";
pub const EMPLOYEE_COUNT: &str = "company.employee_count";
pub const ANNUAL_REVENUE: &str = "company.annual_revenue";
pub const SELLING_SUBSCRIPTIONS: &str = "company.selling_subscriptions";
pub const INDUSTRY: &str = "company.industry";
pub const REFERRAL_SOURCE: &str = "contact.referral_source";
pub const REFERRER_NAME: &str = "contact.referrer_name";

/// A "how did you hear about us" answer
pub struct ReferralSource {
    pub value: &'static str,
    pub label: &'static str,
    /// Noun used in the follow-up question ("Which colleague referred you...")
    pub description: &'static str,
}

pub const REFERRAL_SOURCES: &[ReferralSource] = &[
    ReferralSource { value: "google", label: "Google", description: "search" },
    ReferralSource { value: "linkedin", label: "LinkedIn", description: "LinkedIn post or member" },
    ReferralSource { value: "twitter_x", label: "Twitter/X", description: "Twitter/X user" },
    ReferralSource { value: "facebook", label: "Facebook", description: "Facebook post or group" },
    ReferralSource { value: "colleague", label: "A Colleague", description: "colleague" },
    ReferralSource { value: "friend", label: "A Friend", description: "friend" },
    ReferralSource { value: "conference", label: "A Conference", description: "conference" },
    ReferralSource { value: "podcast", label: "A Podcast", description: "podcast" },
    ReferralSource { value: "blog", label: "A Blog", description: "blog" },
    ReferralSource { value: "newsletter", label: "A Newsletter", description: "newsletter" },
    ReferralSource { value: "webinar", label: "A Webinar", description: "webinar" },
    ReferralSource { value: "other", label: "Other", description: "other" },
];

const WELCOME: &str = "Welcome to Scriber. You're on your way to creating the ultimate \
     subscription shopping experience for your customers.";

const BUSINESS_INTRO: &str = "Let's learn a little bit more about your business. This will \
     help our AI tailor your experience and help you get the most out of the platform.";

const LAST_QUESTION: &str =
    "Great! Last question before we get started. How did you find out about Scriber?";

/// Derive the ordered step catalog
///
/// Returns no steps while the form data has not been loaded yet.
pub fn derive_steps(data: Option<&FormData>) -> Vec<StepDefinition> {
    let Some(data) = data else {
        return Vec::new();
    };

    vec![contact_step(), company_step(data), referral_step(data)]
}

/// Number of steps in a fully loaded catalog
pub fn step_count() -> u32 {
    derive_steps(Some(&FormData::new())).len() as u32
}

fn contact_step() -> StepDefinition {
    StepDefinition::new(
        1,
        WELCOME,
        vec![
            FieldDefinition::text(FIRST_NAME, "First Name").col_span(6).required(),
            FieldDefinition::text(LAST_NAME, "Last Name").col_span(6).required(),
            FieldDefinition::text(EMAIL, "What is your email?")
                .required()
                .pattern(email_pattern()),
            FieldDefinition::text(COMPANY_NAME, "What is your company name?").required(),
            FieldDefinition::checkbox(
                ACCEPTS_MARKETING,
                "I want to receive promotional emails from Scriber (don't worry, we won't \
                 spam you or share your information with third parties)",
                true,
            ),
        ],
    )
}

fn company_step(data: &FormData) -> StepDefinition {
    StepDefinition::new(
        2,
        format!("{} {}", greeting(data), BUSINESS_INTRO),
        vec![
            FieldDefinition::dropdown(
                EMPLOYEE_COUNT,
                "How many employees does your company have?",
                options(&[("1-10", "1-10"), ("11-50", "11-50"), ("51-250", "51-250"), ("251+", "251+")]),
            )
            .required(),
            FieldDefinition::dropdown(
                ANNUAL_REVENUE,
                "What is your annual revenue?",
                options(&[
                    ("$0-100,000", "$0-100,000"),
                    ("$100,001-500,000", "$100,001-500,000"),
                    ("$500,001-1,000,000", "$500,001-1,000,000"),
                    ("$1,000,001+", "$1,000,001+"),
                ]),
            )
            .required(),
            FieldDefinition::dropdown(
                SELLING_SUBSCRIPTIONS,
                "Do you currently sell subscriptions?",
                options(&[("true", "Yes"), ("false", "No")]),
            )
            .required(),
            FieldDefinition::dropdown(
                INDUSTRY,
                "What industry does your company operate in?",
                options(&[
                    ("retail", "Retail"),
                    ("manufacturing", "Manufacturing"),
                    ("service", "Service"),
                    ("other", "Other"),
                ]),
            )
            .required(),
        ],
    )
}

fn referral_step(data: &FormData) -> StepDefinition {
    let source = data
        .get(REFERRAL_SOURCE)
        .filter(|value| !value.is_empty());

    let referrer_noun = source
        .and_then(|value| REFERRAL_SOURCES.iter().find(|s| s.value == value))
        .map_or("referral source", |s| s.description);

    StepDefinition::new(
        3,
        LAST_QUESTION,
        vec![
            FieldDefinition::dropdown(
                REFERRAL_SOURCE,
                "How did you find out about Scriber?",
                REFERRAL_SOURCES
                    .iter()
                    .map(|s| SelectOption::new(s.value, s.label))
                    .collect(),
            )
            .required(),
            FieldDefinition::text(
                REFERRER_NAME,
                format!("Which {} referred you to Scriber?", referrer_noun),
            )
            .hidden(source.is_none()),
        ],
    )
}

/// "Great to meet you, Ada." or "Great to meet you." without a name
fn greeting(data: &FormData) -> String {
    match data.get(FIRST_NAME).map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Great to meet you, {}.", name),
        None => "Great to meet you.".to_string(),
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}

fn email_pattern() -> Option<FieldPattern> {
    static EMAIL_PATTERN: OnceLock<Option<FieldPattern>> = OnceLock::new();
    EMAIL_PATTERN
        .get_or_init(|| {
            FieldPattern::new(
                r"^[^@\s]+@[^@\s]+\.[^@\s]+$",
                "Please enter a valid email address",
            )
            .ok()
        })
        .clone()
}
