//! Entity types for the farming-assistant store.
//!
//! Every family comes in two shapes: the full record as the store keeps it
//! (server-generated `id`, timestamps, synthesized fields) and an insert
//! shape (`New*`) holding only what a client may supply. Insert shapes
//! deserialize strictly (`deny_unknown_fields`) so malformed payloads fail
//! at the boundary instead of being silently accepted.
//!
//! Wire naming is camelCase to match the web client, with one deliberate
//! exception: the nutrient breakdown keeps its historical `organic_matter`
//! key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

fn default_priority() -> String {
    "medium".to_string()
}

/// Alert and diagnosis severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Lifecycle of an expert consultation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[default]
    Pending,
    Answered,
    Closed,
}

// --- Users

/// A farmer account. The bcrypt hash is excluded from serialization, so it
/// never appears in a response no matter which handler returns the record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    // ---
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
    pub farm_location: Option<String>,
    pub farm_size: Option<f64>,
    pub farm_type: Option<String>,
    pub primary_crops: Option<Vec<String>>,
    pub experience: Option<String>,
    pub language: String,
    pub location: Option<Value>,
    pub profile_image: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Signup payload. `password` arrives in the clear and is hashed by the
/// auth route before it reaches the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    // ---
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
    pub farm_location: Option<String>,
    pub farm_size: Option<f64>,
    pub farm_type: Option<String>,
    pub primary_crops: Option<Vec<String>>,
    pub experience: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub location: Option<Value>,
    pub profile_image: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Partial profile update. `password` is accepted because older clients
/// send it, but password changes never flow through profile updates; the
/// store ignores the field entirely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    // ---
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub farm_location: Option<String>,
    pub farm_size: Option<f64>,
    pub farm_type: Option<String>,
    pub primary_crops: Option<Vec<String>>,
    pub experience: Option<String>,
    pub language: Option<String>,
    pub location: Option<Value>,
    pub profile_image: Option<String>,
    pub is_verified: Option<bool>,
}

// --- Weather and soil, looked up by normalized location

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    // ---
    pub id: String,
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub visibility: f64,
    pub condition: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewWeatherReport {
    // ---
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub visibility: f64,
    pub condition: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilReport {
    // ---
    pub id: String,
    pub location: String,
    pub soil_type: String,
    pub ph_level: f64,
    pub fertility: String,
    pub recommendations: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewSoilReport {
    // ---
    pub location: String,
    pub soil_type: String,
    pub ph_level: f64,
    pub fertility: String,
    pub recommendations: String,
}

// --- Broadcast alerts

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    // ---
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub location: String,
    pub is_active: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAlert {
    // ---
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub location: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// --- Voice queries (append-only log)

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceQuery {
    // ---
    pub id: String,
    pub user_id: Option<String>,
    pub query: String,
    pub response: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

/// Store-facing insert shape; the voice route fills `response` in from the
/// assistant before logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewVoiceQuery {
    // ---
    pub user_id: Option<String>,
    pub query: String,
    pub response: String,
    pub language: String,
}

// --- Disease detections

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetection {
    // ---
    pub id: String,
    pub user_id: String,
    pub image_path: String,
    pub crop_type: String,
    pub detected_disease: String,
    pub confidence: f64,
    pub symptoms: Vec<String>,
    pub treatment: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewDiseaseDetection {
    // ---
    pub user_id: String,
    pub image_path: String,
    pub crop_type: String,
}

// --- Fertilizer advisory

/// Fixed fertilizer plan attached to every recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerPlan {
    // ---
    pub primary: &'static str,
    pub secondary: &'static str,
    pub micronutrients: [&'static str; 2],
    pub application: &'static str,
}

/// Nutrient breakdown. Keys stay exactly as the client reads them,
/// including snake_case `organic_matter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutrientProfile {
    // ---
    pub nitrogen: u32,
    pub phosphorus: u32,
    pub potassium: u32,
    pub organic_matter: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationSchedule {
    // ---
    pub week1: &'static str,
    pub week3: &'static str,
    pub week6: &'static str,
    pub week9: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerRecommendation {
    // ---
    pub id: String,
    pub user_id: String,
    pub crop_type: String,
    pub soil_type: String,
    pub crop_stage: String,
    pub recommended_fertilizers: FertilizerPlan,
    pub nutrients: NutrientProfile,
    pub application_schedule: ApplicationSchedule,
    pub cost_estimate: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewFertilizerRecommendation {
    // ---
    pub user_id: String,
    pub crop_type: String,
    pub soil_type: String,
    pub crop_stage: String,
}

// --- Market prices

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrice {
    // ---
    pub id: String,
    pub crop_name: String,
    pub variety: Option<String>,
    pub market_location: String,
    pub price_min: f64,
    pub price_max: f64,
    pub price_average: f64,
    pub unit: String,
    pub quality: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewMarketPrice {
    // ---
    pub crop_name: String,
    pub variety: Option<String>,
    pub market_location: String,
    pub price_min: f64,
    pub price_max: f64,
    pub price_average: f64,
    pub unit: String,
    pub quality: Option<String>,
}

// --- Financial records

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    // ---
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub crop_related: Option<String>,
    pub receipt_image: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewFinancialRecord {
    // ---
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub crop_related: Option<String>,
    pub receipt_image: Option<String>,
}

// --- Experts and consultations

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    // ---
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub experience: String,
    pub location: Option<String>,
    pub contact_info: Option<Value>,
    pub rating: f64,
    pub is_verified: bool,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewExpert {
    // ---
    pub name: String,
    pub specialization: String,
    pub experience: String,
    pub location: Option<String>,
    pub contact_info: Option<Value>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_verified: bool,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    // ---
    pub id: String,
    pub user_id: String,
    pub expert_id: String,
    pub question: String,
    pub response: Option<String>,
    pub status: ConsultationStatus,
    pub images: Option<Vec<String>>,
    pub priority: String,
    pub timestamp: DateTime<Utc>,
    pub response_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewConsultation {
    // ---
    pub user_id: String,
    pub expert_id: String,
    pub question: String,
    #[serde(default)]
    pub status: ConsultationStatus,
    pub images: Option<Vec<String>>,
    #[serde(default = "default_priority")]
    pub priority: String,
}

/// Partial consultation update. Supplying `response` stamps
/// `responseTimestamp`; omitting it leaves any existing stamp untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConsultationUpdate {
    // ---
    pub response: Option<String>,
    pub status: Option<ConsultationStatus>,
    pub priority: Option<String>,
}

// --- Community

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    // ---
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub images: Option<Vec<String>>,
    pub likes: u32,
    pub tags: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCommunityPost {
    // ---
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub likes: u32,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    // ---
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPostComment {
    // ---
    pub post_id: String,
    pub user_id: String,
    pub content: String,
}

// --- Irrigation and regional advisories

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationSchedule {
    // ---
    pub id: String,
    pub user_id: String,
    pub crop_type: String,
    pub field_size: f64,
    pub soil_type: String,
    pub irrigation_method: String,
    pub schedule: Option<Value>,
    pub water_requirement: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewIrrigationSchedule {
    // ---
    pub user_id: String,
    pub crop_type: String,
    pub field_size: f64,
    pub soil_type: String,
    pub irrigation_method: String,
    pub schedule: Option<Value>,
    pub water_requirement: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAdvisory {
    // ---
    pub id: String,
    pub crop_name: String,
    pub variety: Option<String>,
    pub region: String,
    pub season: String,
    pub planting_guidance: Option<Value>,
    pub care_instructions: Option<Value>,
    pub harvest_guidance: Option<Value>,
    pub common_issues: Option<Value>,
    pub expected_yield: Option<f64>,
    pub profitability: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCropAdvisory {
    // ---
    pub crop_name: String,
    pub variety: Option<String>,
    pub region: String,
    pub season: String,
    pub planting_guidance: Option<Value>,
    pub care_instructions: Option<Value>,
    pub harvest_guidance: Option<Value>,
    pub common_issues: Option<Value>,
    pub expected_yield: Option<f64>,
    pub profitability: Option<Value>,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn create_test_user() -> User {
        // ---
        User {
            id: "u-1".to_string(),
            username: "demo".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            email: Some("demo@example.com".to_string()),
            full_name: "Demo Farmer".to_string(),
            phone: None,
            farm_location: Some("Ernakulam, Kerala".to_string()),
            farm_size: Some(5.0),
            farm_type: Some("organic".to_string()),
            primary_crops: Some(vec!["Rice".to_string()]),
            experience: Some("intermediate".to_string()),
            language: "en".to_string(),
            location: None,
            profile_image: None,
            is_verified: true,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_user_serialization_never_exposes_hash() {
        // ---
        let value = serde_json::to_value(create_test_user()).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("passwordHash"));
        assert_eq!(obj["username"], "demo");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        // ---
        let value = serde_json::to_value(create_test_user()).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("fullName"));
        assert!(obj.contains_key("farmLocation"));
        assert!(obj.contains_key("isVerified"));
        assert!(obj.contains_key("createdAt"));
    }

    #[test]
    fn test_signup_payload_fills_defaults() {
        // ---
        let new_user: NewUser = serde_json::from_value(serde_json::json!({
            "username": "gopan",
            "password": "secret",
            "fullName": "Gopan K"
        }))
        .unwrap();

        assert_eq!(new_user.language, "en");
        assert!(!new_user.is_verified);
        assert!(new_user.email.is_none());
    }

    #[test]
    fn test_insert_shapes_reject_unknown_fields() {
        // ---
        let result: Result<NewWeatherReport, _> = serde_json::from_value(serde_json::json!({
            "location": "Ernakulam, Kerala",
            "temperature": 28.0,
            "humidity": 75.0,
            "windSpeed": 12.0,
            "visibility": 10.0,
            "condition": "Partly Cloudy",
            "forecast": "sunny"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_alert_kind_uses_type_key() {
        // ---
        let alert: NewAlert = serde_json::from_value(serde_json::json!({
            "type": "weather",
            "title": "Heavy Rain Alert",
            "message": "Expected rainfall 50-75mm",
            "severity": "high",
            "location": "Ernakulam, Kerala"
        }))
        .unwrap();

        assert_eq!(alert.kind, "weather");
        // Alerts default to active when the flag is omitted
        assert!(alert.is_active);
        assert_eq!(alert.severity, Severity::High);
    }

    #[test]
    fn test_consultation_defaults_to_pending_medium() {
        // ---
        let new: NewConsultation = serde_json::from_value(serde_json::json!({
            "userId": "u-1",
            "expertId": "e-1",
            "question": "Leaf spots on my pepper vines?"
        }))
        .unwrap();

        assert_eq!(new.status, ConsultationStatus::Pending);
        assert_eq!(new.priority, "medium");
    }

    #[test]
    fn test_profile_update_tolerates_password_key() {
        // ---
        let update: UserUpdate = serde_json::from_value(serde_json::json!({
            "password": "new-secret",
            "farmSize": 7.5
        }))
        .unwrap();

        assert_eq!(update.password.as_deref(), Some("new-secret"));
        assert_eq!(update.farm_size, Some(7.5));
    }

    #[test]
    fn test_nutrient_profile_keeps_organic_matter_key() {
        // ---
        let nutrients = NutrientProfile {
            nitrogen: 45,
            phosphorus: 30,
            potassium: 40,
            organic_matter: 9,
        };
        let value = serde_json::to_value(&nutrients).unwrap();

        assert!(value.as_object().unwrap().contains_key("organic_matter"));
    }
}
