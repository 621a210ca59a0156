//! Store profile captured at intake.
//!
//! The intake form is edited as a [`ProfileDraft`]; submitting it validates the
//! draft into an immutable [`StoreProfile`] snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Where the store sits, by the kind of people passing its door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// Street-level trade driven by passers-by.
    FootTraffic,
    /// Customers live nearby.
    Residential,
    /// Customers work nearby.
    Office,
}

impl LocationType {
    /// Human-readable label used in prompts and reports.
    pub fn label(&self) -> &'static str {
        match self {
            LocationType::FootTraffic => "foot-traffic area",
            LocationType::Residential => "residential area",
            LocationType::Office => "office district",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LocationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(&['-', ' '][..], "_").as_str() {
            "foot_traffic" => Ok(LocationType::FootTraffic),
            "residential" => Ok(LocationType::Residential),
            "office" => Ok(LocationType::Office),
            other => Err(ValidationError::unknown_value("location_type", other)),
        }
    }
}

/// Monthly sales band relative to comparable stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesTier {
    Low,
    Medium,
    High,
}

impl SalesTier {
    /// Human-readable label used in prompts and reports.
    pub fn label(&self) -> &'static str {
        match self {
            SalesTier::Low => "below area average",
            SalesTier::Medium => "around area average",
            SalesTier::High => "above area average",
        }
    }
}

impl fmt::Display for SalesTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SalesTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SalesTier::Low),
            "medium" => Ok(SalesTier::Medium),
            "high" => Ok(SalesTier::High),
            other => Err(ValidationError::unknown_value("sales_tier", other)),
        }
    }
}

/// Editable intake form.
///
/// Every field is optional until submission. Scenario selection fills in
/// defaults; the user may overwrite any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub store_name: Option<String>,
    pub region: Option<String>,
    pub sub_location: Option<String>,
    pub category: Option<String>,
    pub location_type: Option<LocationType>,
    pub sales_tier: Option<SalesTier>,
    pub concern: Option<String>,
    pub demographic_tags: Vec<String>,
}

impl ProfileDraft {
    /// Field names that must be present for a submission to pass.
    pub const REQUIRED_FIELDS: [&'static str; 5] =
        ["region", "category", "location_type", "sales_tier", "concern"];

    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store_name(mut self, value: impl Into<String>) -> Self {
        self.store_name = Some(value.into());
        self
    }

    pub fn with_region(mut self, value: impl Into<String>) -> Self {
        self.region = Some(value.into());
        self
    }

    pub fn with_sub_location(mut self, value: impl Into<String>) -> Self {
        self.sub_location = Some(value.into());
        self
    }

    pub fn with_category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn with_location_type(mut self, value: LocationType) -> Self {
        self.location_type = Some(value);
        self
    }

    pub fn with_sales_tier(mut self, value: SalesTier) -> Self {
        self.sales_tier = Some(value);
        self
    }

    pub fn with_concern(mut self, value: impl Into<String>) -> Self {
        self.concern = Some(value.into());
        self
    }

    pub fn with_demographic_tag(mut self, tag: impl Into<String>) -> Self {
        self.demographic_tags.push(tag.into());
        self
    }

    /// Sets a field by its intake name, parsing enum-valued fields.
    ///
    /// Used by text front-ends that edit the form one field at a time.
    ///
    /// # Errors
    ///
    /// - `UnknownValue` if the field name or an enum value is not recognized
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        let text = Some(value.trim().to_string());
        match field {
            "store_name" => self.store_name = text,
            "region" => self.region = text,
            "sub_location" => self.sub_location = text,
            "category" => self.category = text,
            "location_type" => self.location_type = Some(value.parse()?),
            "sales_tier" => self.sales_tier = Some(value.parse()?),
            "concern" => self.concern = text,
            "demographic_tags" => {
                self.demographic_tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            other => return Err(ValidationError::unknown_value("field", other)),
        }
        Ok(())
    }

    /// Overlays `other` on top of this draft.
    ///
    /// Non-blank values in `other` win; blank or absent ones keep the value
    /// already present here.
    pub fn merged_with(&self, other: &ProfileDraft) -> ProfileDraft {
        ProfileDraft {
            store_name: pick(&other.store_name, &self.store_name),
            region: pick(&other.region, &self.region),
            sub_location: pick(&other.sub_location, &self.sub_location),
            category: pick(&other.category, &self.category),
            location_type: other.location_type.or(self.location_type),
            sales_tier: other.sales_tier.or(self.sales_tier),
            concern: pick(&other.concern, &self.concern),
            demographic_tags: if other.demographic_tags.is_empty() {
                self.demographic_tags.clone()
            } else {
                other.demographic_tags.clone()
            },
        }
    }

    /// Returns the required fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            non_blank(&self.region).is_some(),
            non_blank(&self.category).is_some(),
            self.location_type.is_some(),
            self.sales_tier.is_some(),
            non_blank(&self.concern).is_some(),
        ];

        Self::REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Validates the draft into an immutable profile.
    ///
    /// # Errors
    ///
    /// - `MissingFields` naming every required field that is absent or blank
    pub fn validate(&self) -> Result<StoreProfile, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::missing_fields(missing));
        }

        match (
            non_blank(&self.region),
            non_blank(&self.category),
            self.location_type,
            self.sales_tier,
            non_blank(&self.concern),
        ) {
            (Some(region), Some(category), Some(location_type), Some(sales_tier), Some(concern)) => {
                Ok(StoreProfile {
                    store_name: non_blank(&self.store_name).map(str::to_string),
                    region: region.to_string(),
                    sub_location: non_blank(&self.sub_location).map(str::to_string),
                    category: category.to_string(),
                    location_type,
                    sales_tier,
                    concern: concern.to_string(),
                    demographic_tags: self
                        .demographic_tags
                        .iter()
                        .map(|t| t.trim())
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect(),
                    created_at: Timestamp::now(),
                })
            }
            _ => Err(ValidationError::missing_fields(Self::REQUIRED_FIELDS)),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn pick(preferred: &Option<String>, fallback: &Option<String>) -> Option<String> {
    non_blank(preferred)
        .or_else(|| non_blank(fallback))
        .map(str::to_string)
}

/// Immutable snapshot of the intake fields.
///
/// # Invariants
///
/// - mandatory text fields are non-blank and trimmed
/// - never mutated after submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    store_name: Option<String>,
    region: String,
    sub_location: Option<String>,
    category: String,
    location_type: LocationType,
    sales_tier: SalesTier,
    concern: String,
    demographic_tags: Vec<String>,
    created_at: Timestamp,
}

impl StoreProfile {
    pub fn store_name(&self) -> Option<&str> {
        self.store_name.as_deref()
    }

    /// Store name for display, falling back to the category.
    pub fn display_name(&self) -> String {
        match &self.store_name {
            Some(name) => name.clone(),
            None => format!("{} in {}", self.category, self.region),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn sub_location(&self) -> Option<&str> {
        self.sub_location.as_deref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn location_type(&self) -> LocationType {
        self.location_type
    }

    pub fn sales_tier(&self) -> SalesTier {
        self.sales_tier
    }

    pub fn concern(&self) -> &str {
        &self.concern
    }

    pub fn demographic_tags(&self) -> &[String] {
        &self.demographic_tags
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Labeled key/value pairs in a fixed order.
    ///
    /// Optional fields are omitted when absent, so the rendering is stable
    /// for a given profile.
    pub fn labeled_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(8);
        if let Some(name) = &self.store_name {
            fields.push(("Store name", name.clone()));
        }
        fields.push(("Region", self.region.clone()));
        if let Some(sub) = &self.sub_location {
            fields.push(("Sub-location", sub.clone()));
        }
        fields.push(("Category", self.category.clone()));
        fields.push(("Location type", self.location_type.label().to_string()));
        fields.push(("Sales tier", self.sales_tier.label().to_string()));
        fields.push(("Concern", self.concern.clone()));
        if !self.demographic_tags.is_empty() {
            fields.push(("Customer demographics", self.demographic_tags.join(", ")));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ProfileDraft {
        ProfileDraft::new()
            .with_region("district-X")
            .with_category("cafe")
            .with_location_type(LocationType::Residential)
            .with_sales_tier(SalesTier::Medium)
            .with_concern("revisit rate too low")
    }

    mod validation {
        use super::*;

        #[test]
        fn complete_draft_validates() {
            let profile = complete_draft().validate().unwrap();
            assert_eq!(profile.region(), "district-X");
            assert_eq!(profile.category(), "cafe");
            assert_eq!(profile.location_type(), LocationType::Residential);
            assert!(profile.store_name().is_none());
        }

        #[test]
        fn empty_draft_names_all_required_fields() {
            let err = ProfileDraft::new().validate().unwrap_err();
            assert_eq!(
                err,
                ValidationError::missing_fields([
                    "region",
                    "category",
                    "location_type",
                    "sales_tier",
                    "concern"
                ])
            );
        }

        #[test]
        fn blank_text_counts_as_missing() {
            let draft = complete_draft().with_concern("   ");
            let err = draft.validate().unwrap_err();
            assert_eq!(err, ValidationError::missing_fields(["concern"]));
        }

        #[test]
        fn values_are_trimmed() {
            let profile = complete_draft()
                .with_region("  district-X ")
                .with_demographic_tag(" students ")
                .with_demographic_tag("  ")
                .validate()
                .unwrap();
            assert_eq!(profile.region(), "district-X");
            assert_eq!(profile.demographic_tags(), &["students".to_string()]);
        }
    }

    mod merging {
        use super::*;

        #[test]
        fn submitted_values_override_defaults() {
            let defaults = ProfileDraft::new()
                .with_category("bakery")
                .with_sales_tier(SalesTier::Low);
            let submitted = ProfileDraft::new().with_category("cafe");

            let merged = defaults.merged_with(&submitted);
            assert_eq!(merged.category.as_deref(), Some("cafe"));
            assert_eq!(merged.sales_tier, Some(SalesTier::Low));
        }

        #[test]
        fn blank_submitted_values_keep_defaults() {
            let defaults = ProfileDraft::new().with_region("district-Y");
            let submitted = ProfileDraft::new().with_region("");

            let merged = defaults.merged_with(&submitted);
            assert_eq!(merged.region.as_deref(), Some("district-Y"));
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn location_type_accepts_common_spellings() {
            assert_eq!("foot-traffic".parse::<LocationType>().unwrap(), LocationType::FootTraffic);
            assert_eq!("Office".parse::<LocationType>().unwrap(), LocationType::Office);
            assert!("harbor".parse::<LocationType>().is_err());
        }

        #[test]
        fn set_field_updates_named_field() {
            let mut draft = ProfileDraft::new();
            draft.set_field("category", " cafe ").unwrap();
            draft.set_field("sales_tier", "high").unwrap();
            draft.set_field("demographic_tags", "students, office workers,").unwrap();

            assert_eq!(draft.category.as_deref(), Some("cafe"));
            assert_eq!(draft.sales_tier, Some(SalesTier::High));
            assert_eq!(draft.demographic_tags, vec!["students", "office workers"]);
        }

        #[test]
        fn set_field_rejects_unknown_field() {
            let mut draft = ProfileDraft::new();
            let err = draft.set_field("owner", "me").unwrap_err();
            assert_eq!(err, ValidationError::unknown_value("field", "owner"));
        }

        #[test]
        fn draft_deserializes_from_snake_case_yaml() {
            let draft: ProfileDraft =
                serde_yaml::from_str("location_type: foot_traffic\nsales_tier: low\n").unwrap();
            assert_eq!(draft.location_type, Some(LocationType::FootTraffic));
            assert_eq!(draft.sales_tier, Some(SalesTier::Low));
            assert!(draft.region.is_none());
        }
    }

    #[test]
    fn labeled_fields_skip_absent_optionals() {
        let profile = complete_draft().validate().unwrap();
        let labels: Vec<_> = profile.labeled_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            labels,
            vec!["Region", "Category", "Location type", "Sales tier", "Concern"]
        );
    }
}
