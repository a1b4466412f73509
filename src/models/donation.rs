use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /donations`. Optional fields are omitted from the payload
/// when unset and the backend applies its defaults.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub campaign_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
}

impl DonationRequest {
    pub fn new(amount: f64, campaign_id: i64) -> Self {
        Self {
            amount,
            currency: None,
            campaign_id,
            payment_method: None,
            anonymous: None,
        }
    }
}

/// A completed (or pending) donation record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub campaign_id: i64,
    pub campaign_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_fields() {
        let request = DonationRequest::new(25.0, 7);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["amount"], 25.0);
        assert_eq!(json["campaignId"], 7);
        assert!(json.get("currency").is_none());
        assert!(json.get("paymentMethod").is_none());
        assert!(json.get("anonymous").is_none());
    }

    #[test]
    fn test_parse_donation_record() {
        let json = r#"{
            "id": "d42",
            "amount": 25.0,
            "currency": "USD",
            "status": "completed",
            "paymentMethod": "card",
            "anonymous": false,
            "createdAt": "2024-03-12T10:00:00Z",
            "completedAt": "2024-03-12T10:00:05Z",
            "userId": "u1",
            "userName": "Ana",
            "campaignId": 7,
            "campaignTitle": "Clean Water for Gaza"
        }"#;

        let donation: Donation = serde_json::from_str(json).unwrap();
        assert_eq!(donation.id, "d42");
        assert_eq!(donation.campaign_title, "Clean Water for Gaza");
        assert!(donation.completed_at.is_some());
    }
}
