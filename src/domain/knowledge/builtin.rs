//! Built-in knowledge base.
//!
//! Four scenarios covering the common reasons small store owners ask for a
//! consultation. Replace with a YAML file via `KnowledgeBase::load` to ship
//! different text without rebuilding.

use once_cell::sync::Lazy;

use crate::domain::consultation::{LocationType, ProfileDraft, SalesTier};

use super::{KnowledgeBase, KnowledgeBlock, Scenario, ScenarioId};

/// Version of the built-in text blocks.
pub const BUILTIN_VERSION: &str = "2024.06";

/// Scenario used when none is selected.
pub const DEFAULT_SCENARIO: &str = "general-diagnosis";

static BUILTIN: Lazy<KnowledgeBase> = Lazy::new(build);

/// Returns the built-in knowledge base.
pub fn builtin() -> &'static KnowledgeBase {
    &BUILTIN
}

// ============================================================================
// Shared text
// ============================================================================

const PERSONA: &str = "You are a seasoned small-business consultant who has \
advised hundreds of neighbourhood stores. You speak plainly, use numbers when \
you have them, and always tie advice back to the owner's own situation.";

const COMMON_RULES: &[&str] = &[
    "Base every claim on the store profile, the domain facts or the reference data; say so when you are guessing.",
    "Prefer actions the owner can start this week with the staff and budget of a small store.",
    "Never invent statistics. If the reference data is unavailable, reason from the profile alone.",
    "Keep the tone encouraging but honest; do not promise sales outcomes.",
];

const COMMON_FACTS: &[&str] = &[
    "Foot-traffic locations live on impulse visits; visibility, signage and speed of service dominate.",
    "Residential locations depend on regulars; familiarity, consistency and weekend demand matter most.",
    "Office locations peak at lunch and after work on weekdays and fall off sharply on weekends.",
];

fn rules(extra: &[&str]) -> Vec<String> {
    COMMON_RULES
        .iter()
        .chain(extra)
        .map(|s| s.to_string())
        .collect()
}

fn facts(extra: &[&str]) -> Vec<String> {
    COMMON_FACTS
        .iter()
        .chain(extra)
        .map(|s| s.to_string())
        .collect()
}

fn block(extra_facts: &[&str], extra_rules: &[&str]) -> KnowledgeBlock {
    KnowledgeBlock {
        version: BUILTIN_VERSION.to_string(),
        persona: PERSONA.to_string(),
        domain_facts: facts(extra_facts),
        response_rules: rules(extra_rules),
    }
}

fn id(value: &str) -> ScenarioId {
    // Built-in ids are non-blank literals.
    ScenarioId(value.to_string())
}

// ============================================================================
// Scenarios
// ============================================================================

fn general_diagnosis() -> Scenario {
    Scenario {
        id: id(DEFAULT_SCENARIO),
        title: "General store check-up".to_string(),
        reference_url: None,
        defaults: ProfileDraft::default(),
        knowledge: block(
            &["A first check-up looks at location fit, product mix, pricing and customer experience before anything else."],
            &["Cover strengths as well as weaknesses."],
        ),
    }
}

fn revisit_rate_improvement() -> Scenario {
    Scenario {
        id: id("revisit-rate-improvement"),
        title: "Improving the revisit rate".to_string(),
        reference_url: None,
        defaults: ProfileDraft::default()
            .with_location_type(LocationType::Residential)
            .with_sales_tier(SalesTier::Medium),
        knowledge: block(
            &[
                "Winning back a lapsed customer costs far less than finding a new one.",
                "Stamp cards, remembered names and small surprise extras are the cheapest loyalty levers.",
                "A revisit problem is often a consistency problem: quality, opening hours or wait times that vary.",
            ],
            &["Separate quick wins (this week) from structural changes (this quarter)."],
        ),
    }
}

fn new_customer_acquisition() -> Scenario {
    Scenario {
        id: id("new-customer-acquisition"),
        title: "Attracting new customers".to_string(),
        reference_url: None,
        defaults: ProfileDraft::default()
            .with_location_type(LocationType::FootTraffic)
            .with_sales_tier(SalesTier::Low),
        knowledge: block(
            &[
                "Map listings, reviews and storefront signage are the first things a new customer sees.",
                "Opening offers work only if the regular offer is good enough to come back for.",
            ],
            &["Name the customer segment each action targets."],
        ),
    }
}

fn sales_slump() -> Scenario {
    Scenario {
        id: id("sales-slump"),
        title: "Recovering from a sales slump".to_string(),
        reference_url: None,
        defaults: ProfileDraft::default().with_sales_tier(SalesTier::Low),
        knowledge: block(
            &[
                "A slump is either fewer customers or a smaller basket; diagnose which before prescribing.",
                "Seasonality and new nearby competitors explain most sudden drops in a stable area.",
            ],
            &["Ask for the numbers you would need to tell the two causes apart."],
        ),
    }
}

fn build() -> KnowledgeBase {
    KnowledgeBase {
        version: BUILTIN_VERSION.to_string(),
        default_scenario: id(DEFAULT_SCENARIO),
        scenarios: vec![
            general_diagnosis(),
            revisit_rate_improvement(),
            new_customer_acquisition(),
            sales_slump(),
        ],
    }
}
