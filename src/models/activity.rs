use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
    pub user: Option<ActivityUser>,
    pub campaign: Option<ActivityCampaign>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityUser {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityCampaign {
    pub id: i64,
    pub title: String,
}

impl Activity {
    /// Whether this entry is an individual donation, as opposed to a
    /// campaign-level event. Drives the icon choice in the feed.
    pub fn is_donation(&self) -> bool {
        self.kind == "donation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity() {
        let json = r#"{
            "id": "a1",
            "type": "donation",
            "message": "Ana donated $25 to Clean Water for Gaza",
            "createdAt": "2024-03-12T10:00:06Z",
            "isPublic": true,
            "user": { "id": "u1", "name": "Ana" },
            "campaign": { "id": 7, "title": "Clean Water for Gaza" }
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(activity.is_donation());
        assert_eq!(activity.user.as_ref().unwrap().name, "Ana");
        assert_eq!(activity.campaign.as_ref().unwrap().id, 7);
    }

    #[test]
    fn test_campaign_activity_without_user() {
        let json = r#"{
            "id": "a2",
            "type": "campaign_created",
            "message": "Relief Works launched School Supplies",
            "createdAt": "2024-03-01T09:00:00Z",
            "isPublic": true
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(!activity.is_donation());
        assert!(activity.user.is_none());
        assert!(activity.campaign.is_none());
    }
}
