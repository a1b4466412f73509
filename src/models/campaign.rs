use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when a campaign has no organization attached.
const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";

/// A fundraising campaign, as returned by `GET /campaigns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub goal: f64,
    pub raised: f64,
    pub progress: f64,
    pub participants: i64,
    pub image_url: Option<String>,
    pub status: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

impl Campaign {
    /// The category as a typed value; unknown keys map to `Other`.
    pub fn category_kind(&self) -> CampaignCategory {
        CampaignCategory::from_key(&self.category)
    }

    pub fn organization_name(&self) -> &str {
        self.organization
            .as_ref()
            .map(|org| org.name.as_str())
            .unwrap_or(UNKNOWN_ORGANIZATION)
    }
}

/// Campaign categories the app knows how to present.
///
/// The wire format is a free-form string; anything unrecognized lands in
/// `Other` rather than failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignCategory {
    Food,
    Water,
    Education,
    Other,
}

impl CampaignCategory {
    pub fn from_key(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "food" => CampaignCategory::Food,
            "water" => CampaignCategory::Water,
            "education" => CampaignCategory::Education,
            _ => CampaignCategory::Other,
        }
    }

    /// The query-parameter key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            CampaignCategory::Food => "food",
            CampaignCategory::Water => "water",
            CampaignCategory::Education => "education",
            CampaignCategory::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_campaign() {
        let json = r#"{
            "id": 7,
            "title": "Clean Water for Gaza",
            "description": "Wells and filtration",
            "category": "Water",
            "goal": 50000.0,
            "raised": 12500.0,
            "progress": 0.25,
            "participants": 310,
            "imageUrl": "https://cdn.sanad.app/c7.png",
            "status": "active",
            "verified": true,
            "createdAt": "2024-03-01T09:00:00Z",
            "updatedAt": "2024-03-10T18:30:00Z",
            "organization": { "id": 2, "name": "Relief Works" }
        }"#;

        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.id, 7);
        assert_eq!(campaign.category_kind(), CampaignCategory::Water);
        assert_eq!(campaign.organization_name(), "Relief Works");
        assert!(campaign.verified);
    }

    #[test]
    fn test_missing_organization_falls_back() {
        let json = r#"{
            "id": 8,
            "title": "School Supplies",
            "description": "",
            "category": "education",
            "goal": 1000.0,
            "raised": 0.0,
            "progress": 0.0,
            "participants": 0,
            "imageUrl": null,
            "status": "active",
            "verified": false,
            "createdAt": "2024-03-01T09:00:00Z",
            "updatedAt": "2024-03-01T09:00:00Z"
        }"#;

        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.organization_name(), "Unknown Organization");
        assert_eq!(campaign.image_url, None);
    }

    #[test]
    fn test_category_mapping_is_case_insensitive_with_other_fallback() {
        assert_eq!(CampaignCategory::from_key("FOOD"), CampaignCategory::Food);
        assert_eq!(CampaignCategory::from_key("water"), CampaignCategory::Water);
        assert_eq!(
            CampaignCategory::from_key("medical"),
            CampaignCategory::Other
        );
        assert_eq!(CampaignCategory::from_key(""), CampaignCategory::Other);
    }
}
