//! Process-lifetime in-memory store.
//!
//! One `HashMap` per entity family plus a `Vec` for the append-only voice
//! log, all behind a single `tokio::sync::RwLock` so each operation sees and
//! leaves a consistent snapshot. Synthesis draws from a seedable `StdRng`
//! behind its own mutex: production stores seed from entropy, tests inject a
//! fixed seed and get reproducible diagnoses.
//!
//! List operations clone and sort before returning. The backing maps have no
//! stable iteration order, so every listing sorts explicitly: newest first
//! for time-ordered families, rating first for experts, oldest first for
//! comment threads.

use std::collections::HashMap;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Alert, CommunityPost, Consultation, ConsultationUpdate, CropAdvisory, DiseaseDetection,
    Expert, FertilizerRecommendation, FinancialRecord, IrrigationSchedule, MarketPrice, NewAlert,
    NewCommunityPost, NewConsultation, NewCropAdvisory, NewDiseaseDetection, NewExpert,
    NewFertilizerRecommendation, NewFinancialRecord, NewIrrigationSchedule, NewMarketPrice,
    NewPostComment, NewSoilReport, NewUser, NewVoiceQuery, NewWeatherReport, PostComment,
    SoilReport, User, UserUpdate, VoiceQuery, WeatherReport,
};
use crate::simulation;

// ---

/// Normalized lookup key for weather and soil records: lowercase, text
/// before the first comma, trimmed. "Ernakulam, Kerala" and "ernakulam"
/// address the same slot.
pub fn location_key(location: &str) -> String {
    // ---
    location
        .to_lowercase()
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Default)]
struct Collections {
    // ---
    users: HashMap<String, User>,
    weather: HashMap<String, WeatherReport>,
    soil: HashMap<String, SoilReport>,
    alerts: HashMap<String, Alert>,
    voice_queries: Vec<VoiceQuery>,
    detections: HashMap<String, DiseaseDetection>,
    fertilizer_recommendations: HashMap<String, FertilizerRecommendation>,
    market_prices: HashMap<String, MarketPrice>,
    financial_records: HashMap<String, FinancialRecord>,
    experts: HashMap<String, Expert>,
    consultations: HashMap<String, Consultation>,
    community_posts: HashMap<String, CommunityPost>,
    post_comments: HashMap<String, PostComment>,
    irrigation_schedules: HashMap<String, IrrigationSchedule>,
    crop_advisories: HashMap<String, CropAdvisory>,
}

/// All mutable service state. Cheap to share as `Arc<Store>`.
pub struct Store {
    // ---
    collections: RwLock<Collections>,
    rng: Mutex<StdRng>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    // ---
    /// Empty store with entropy-seeded synthesis.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Empty store with caller-supplied randomness. Two stores built from
    /// the same seed synthesize identical diagnoses and recommendations.
    pub fn with_rng(rng: StdRng) -> Self {
        // ---
        Store {
            collections: RwLock::new(Collections::default()),
            rng: Mutex::new(rng),
        }
    }

    // --- Users

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.collections.read().await.users.get(id).cloned()
    }

    /// Exact, case-sensitive username match.
    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        // ---
        self.collections
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Insert a new account. The caller passes the bcrypt hash separately;
    /// the plaintext in `new.password` never reaches the store.
    pub async fn create_user(&self, new: NewUser, password_hash: String) -> User {
        // ---
        let now = Utc::now();
        let user = User {
            id: new_id(),
            username: new.username,
            password_hash,
            email: new.email,
            full_name: new.full_name,
            phone: new.phone,
            farm_location: new.farm_location,
            farm_size: new.farm_size,
            farm_type: new.farm_type,
            primary_crops: new.primary_crops,
            experience: new.experience,
            language: new.language,
            location: new.location,
            profile_image: new.profile_image,
            is_verified: new.is_verified,
            created_at: now,
            updated_at: now,
        };

        let mut collections = self.collections.write().await;
        collections.users.insert(user.id.clone(), user.clone());
        user
    }

    /// Merge the supplied fields into an existing account and refresh
    /// `updatedAt`. The `password` field is ignored; password changes do not
    /// go through profile updates.
    pub async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User, StoreError> {
        // ---
        let mut collections = self.collections.write().await;
        let user = collections
            .users
            .get_mut(id)
            .ok_or(StoreError::NotFound("User"))?;

        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = Some(email);
        }
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        if let Some(farm_location) = update.farm_location {
            user.farm_location = Some(farm_location);
        }
        if let Some(farm_size) = update.farm_size {
            user.farm_size = Some(farm_size);
        }
        if let Some(farm_type) = update.farm_type {
            user.farm_type = Some(farm_type);
        }
        if let Some(primary_crops) = update.primary_crops {
            user.primary_crops = Some(primary_crops);
        }
        if let Some(experience) = update.experience {
            user.experience = Some(experience);
        }
        if let Some(language) = update.language {
            user.language = language;
        }
        if let Some(location) = update.location {
            user.location = Some(location);
        }
        if let Some(profile_image) = update.profile_image {
            user.profile_image = Some(profile_image);
        }
        if let Some(is_verified) = update.is_verified {
            user.is_verified = is_verified;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    // --- Weather and soil (one live record per location key)

    pub async fn get_weather(&self, location: &str) -> Option<WeatherReport> {
        // ---
        self.collections
            .read()
            .await
            .weather
            .get(&location_key(location))
            .cloned()
    }

    /// Last write wins per normalized location key.
    pub async fn create_weather(&self, new: NewWeatherReport) -> WeatherReport {
        // ---
        let report = WeatherReport {
            id: new_id(),
            location: new.location,
            temperature: new.temperature,
            humidity: new.humidity,
            wind_speed: new.wind_speed,
            visibility: new.visibility,
            condition: new.condition,
            timestamp: Utc::now(),
        };

        let key = location_key(&report.location);
        let mut collections = self.collections.write().await;
        collections.weather.insert(key, report.clone());
        report
    }

    pub async fn get_soil(&self, location: &str) -> Option<SoilReport> {
        // ---
        self.collections
            .read()
            .await
            .soil
            .get(&location_key(location))
            .cloned()
    }

    pub async fn create_soil(&self, new: NewSoilReport) -> SoilReport {
        // ---
        let report = SoilReport {
            id: new_id(),
            location: new.location,
            soil_type: new.soil_type,
            ph_level: new.ph_level,
            fertility: new.fertility,
            recommendations: new.recommendations,
        };

        let key = location_key(&report.location);
        let mut collections = self.collections.write().await;
        collections.soil.insert(key, report.clone());
        report
    }

    // --- Alerts

    /// Active alerts, newest first.
    pub async fn get_active_alerts(&self) -> Vec<Alert> {
        // ---
        let collections = self.collections.read().await;
        let mut alerts: Vec<Alert> = collections
            .alerts
            .values()
            .filter(|alert| alert.is_active)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts
    }

    pub async fn create_alert(&self, new: NewAlert) -> Alert {
        // ---
        let alert = Alert {
            id: new_id(),
            kind: new.kind,
            title: new.title,
            message: new.message,
            severity: new.severity,
            location: new.location,
            is_active: new.is_active,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections.alerts.insert(alert.id.clone(), alert.clone());
        alert
    }

    // --- Voice queries

    pub async fn create_voice_query(&self, new: NewVoiceQuery) -> VoiceQuery {
        // ---
        let query = VoiceQuery {
            id: new_id(),
            user_id: new.user_id,
            query: new.query,
            response: new.response,
            language: new.language,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections.voice_queries.push(query.clone());
        query
    }

    /// Newest `limit` entries of the query log.
    pub async fn get_recent_voice_queries(&self, limit: usize) -> Vec<VoiceQuery> {
        // ---
        let collections = self.collections.read().await;
        let mut queries = collections.voice_queries.clone();
        queries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        queries.truncate(limit);
        queries
    }

    // --- Disease detections

    /// Store an upload and synthesize its diagnosis.
    pub async fn create_disease_detection(&self, new: NewDiseaseDetection) -> DiseaseDetection {
        // ---
        let diagnosis = {
            let mut rng = self.rng.lock().await;
            simulation::diagnose(&new.crop_type, &mut *rng)
        };

        let detection = DiseaseDetection {
            id: new_id(),
            user_id: new.user_id,
            image_path: new.image_path,
            crop_type: new.crop_type,
            detected_disease: diagnosis.disease.to_string(),
            confidence: diagnosis.confidence,
            symptoms: diagnosis.symptoms.iter().map(|s| s.to_string()).collect(),
            treatment: diagnosis.treatment.to_string(),
            severity: diagnosis.severity,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .detections
            .insert(detection.id.clone(), detection.clone());
        detection
    }

    pub async fn get_disease_detections_by_user(&self, user_id: &str) -> Vec<DiseaseDetection> {
        // ---
        let collections = self.collections.read().await;
        let mut detections: Vec<DiseaseDetection> = collections
            .detections
            .values()
            .filter(|detection| detection.user_id == user_id)
            .cloned()
            .collect();
        detections.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        detections
    }

    // --- Fertilizer recommendations

    pub async fn create_fertilizer_recommendation(
        &self,
        new: NewFertilizerRecommendation,
    ) -> FertilizerRecommendation {
        // ---
        let advice = {
            let mut rng = self.rng.lock().await;
            simulation::fertilizer_advice(&mut *rng)
        };

        let recommendation = FertilizerRecommendation {
            id: new_id(),
            user_id: new.user_id,
            crop_type: new.crop_type,
            soil_type: new.soil_type,
            crop_stage: new.crop_stage,
            recommended_fertilizers: advice.plan,
            nutrients: advice.nutrients,
            application_schedule: advice.schedule,
            cost_estimate: advice.cost_estimate,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .fertilizer_recommendations
            .insert(recommendation.id.clone(), recommendation.clone());
        recommendation
    }

    pub async fn get_fertilizer_recommendations_by_user(
        &self,
        user_id: &str,
    ) -> Vec<FertilizerRecommendation> {
        // ---
        let collections = self.collections.read().await;
        let mut recommendations: Vec<FertilizerRecommendation> = collections
            .fertilizer_recommendations
            .values()
            .filter(|rec| rec.user_id == user_id)
            .cloned()
            .collect();
        recommendations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recommendations
    }

    // --- Market prices

    pub async fn create_market_price(&self, new: NewMarketPrice) -> MarketPrice {
        // ---
        let price = MarketPrice {
            id: new_id(),
            crop_name: new.crop_name,
            variety: new.variety,
            market_location: new.market_location,
            price_min: new.price_min,
            price_max: new.price_max,
            price_average: new.price_average,
            unit: new.unit,
            quality: new.quality,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .market_prices
            .insert(price.id.clone(), price.clone());
        price
    }

    /// All prices, optionally narrowed to markets whose location contains
    /// the filter (case-insensitive), newest first either way.
    pub async fn get_market_prices(&self, location: Option<&str>) -> Vec<MarketPrice> {
        // ---
        let collections = self.collections.read().await;
        let needle = location.map(str::to_lowercase);
        let mut prices: Vec<MarketPrice> = collections
            .market_prices
            .values()
            .filter(|price| match &needle {
                Some(needle) => price.market_location.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        prices.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        prices
    }

    // --- Financial records

    pub async fn create_financial_record(&self, new: NewFinancialRecord) -> FinancialRecord {
        // ---
        let record = FinancialRecord {
            id: new_id(),
            user_id: new.user_id,
            kind: new.kind,
            category: new.category,
            amount: new.amount,
            description: new.description,
            crop_related: new.crop_related,
            receipt_image: new.receipt_image,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .financial_records
            .insert(record.id.clone(), record.clone());
        record
    }

    pub async fn get_financial_records_by_user(&self, user_id: &str) -> Vec<FinancialRecord> {
        // ---
        let collections = self.collections.read().await;
        let mut records: Vec<FinancialRecord> = collections
            .financial_records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    // --- Experts and consultations

    pub async fn create_expert(&self, new: NewExpert) -> Expert {
        // ---
        let expert = Expert {
            id: new_id(),
            name: new.name,
            specialization: new.specialization,
            experience: new.experience,
            location: new.location,
            contact_info: new.contact_info,
            rating: new.rating,
            is_verified: new.is_verified,
            profile_image: new.profile_image,
            bio: new.bio,
            created_at: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .experts
            .insert(expert.id.clone(), expert.clone());
        expert
    }

    /// Highest-rated first.
    pub async fn get_experts(&self) -> Vec<Expert> {
        // ---
        let collections = self.collections.read().await;
        let mut experts: Vec<Expert> = collections.experts.values().cloned().collect();
        experts.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        experts
    }

    pub async fn create_consultation(&self, new: NewConsultation) -> Consultation {
        // ---
        let consultation = Consultation {
            id: new_id(),
            user_id: new.user_id,
            expert_id: new.expert_id,
            question: new.question,
            response: None,
            status: new.status,
            images: new.images,
            priority: new.priority,
            timestamp: Utc::now(),
            response_timestamp: None,
        };

        let mut collections = self.collections.write().await;
        collections
            .consultations
            .insert(consultation.id.clone(), consultation.clone());
        consultation
    }

    pub async fn get_consultations_by_user(&self, user_id: &str) -> Vec<Consultation> {
        // ---
        let collections = self.collections.read().await;
        let mut consultations: Vec<Consultation> = collections
            .consultations
            .values()
            .filter(|consultation| consultation.user_id == user_id)
            .cloned()
            .collect();
        consultations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        consultations
    }

    /// Merge the supplied fields. A new `response` stamps
    /// `responseTimestamp`; updates without one leave the stamp alone.
    pub async fn update_consultation(
        &self,
        id: &str,
        update: ConsultationUpdate,
    ) -> Result<Consultation, StoreError> {
        // ---
        let mut collections = self.collections.write().await;
        let consultation = collections
            .consultations
            .get_mut(id)
            .ok_or(StoreError::NotFound("Consultation"))?;

        if let Some(response) = update.response {
            consultation.response = Some(response);
            consultation.response_timestamp = Some(Utc::now());
        }
        if let Some(status) = update.status {
            consultation.status = status;
        }
        if let Some(priority) = update.priority {
            consultation.priority = priority;
        }

        Ok(consultation.clone())
    }

    // --- Community posts and comments

    pub async fn create_community_post(&self, new: NewCommunityPost) -> CommunityPost {
        // ---
        let post = CommunityPost {
            id: new_id(),
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            category: new.category,
            images: new.images,
            likes: new.likes,
            tags: new.tags,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .community_posts
            .insert(post.id.clone(), post.clone());
        post
    }

    pub async fn get_community_posts(&self) -> Vec<CommunityPost> {
        // ---
        let collections = self.collections.read().await;
        let mut posts: Vec<CommunityPost> = collections.community_posts.values().cloned().collect();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts
    }

    pub async fn create_post_comment(&self, new: NewPostComment) -> PostComment {
        // ---
        let comment = PostComment {
            id: new_id(),
            post_id: new.post_id,
            user_id: new.user_id,
            content: new.content,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .post_comments
            .insert(comment.id.clone(), comment.clone());
        comment
    }

    /// Thread order: oldest first.
    pub async fn get_post_comments(&self, post_id: &str) -> Vec<PostComment> {
        // ---
        let collections = self.collections.read().await;
        let mut comments: Vec<PostComment> = collections
            .post_comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        comments
    }

    // --- Irrigation schedules

    pub async fn create_irrigation_schedule(
        &self,
        new: NewIrrigationSchedule,
    ) -> IrrigationSchedule {
        // ---
        let schedule = IrrigationSchedule {
            id: new_id(),
            user_id: new.user_id,
            crop_type: new.crop_type,
            field_size: new.field_size,
            soil_type: new.soil_type,
            irrigation_method: new.irrigation_method,
            schedule: new.schedule,
            water_requirement: new.water_requirement,
            is_active: new.is_active,
            created_at: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .irrigation_schedules
            .insert(schedule.id.clone(), schedule.clone());
        schedule
    }

    pub async fn get_irrigation_schedules_by_user(&self, user_id: &str) -> Vec<IrrigationSchedule> {
        // ---
        let collections = self.collections.read().await;
        let mut schedules: Vec<IrrigationSchedule> = collections
            .irrigation_schedules
            .values()
            .filter(|schedule| schedule.user_id == user_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        schedules
    }

    // --- Crop advisories

    pub async fn create_crop_advisory(&self, new: NewCropAdvisory) -> CropAdvisory {
        // ---
        let advisory = CropAdvisory {
            id: new_id(),
            crop_name: new.crop_name,
            variety: new.variety,
            region: new.region,
            season: new.season,
            planting_guidance: new.planting_guidance,
            care_instructions: new.care_instructions,
            harvest_guidance: new.harvest_guidance,
            common_issues: new.common_issues,
            expected_yield: new.expected_yield,
            profitability: new.profitability,
            timestamp: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections
            .crop_advisories
            .insert(advisory.id.clone(), advisory.clone());
        advisory
    }

    /// All advisories, optionally narrowed to regions containing the filter
    /// (case-insensitive), newest first either way.
    pub async fn get_crop_advisories(&self, region: Option<&str>) -> Vec<CropAdvisory> {
        // ---
        let collections = self.collections.read().await;
        let needle = region.map(str::to_lowercase);
        let mut advisories: Vec<CropAdvisory> = collections
            .crop_advisories
            .values()
            .filter(|advisory| match &needle {
                Some(needle) => advisory.region.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        advisories.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        advisories
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::{ConsultationStatus, Severity};
    use std::time::Duration;

    fn create_test_store() -> Store {
        // ---
        Store::with_rng(StdRng::seed_from_u64(99))
    }

    fn create_test_new_user(username: &str) -> NewUser {
        // ---
        NewUser {
            username: username.to_string(),
            password: "plaintext".to_string(),
            email: None,
            full_name: "Test Farmer".to_string(),
            phone: None,
            farm_location: Some("Ernakulam, Kerala".to_string()),
            farm_size: None,
            farm_type: None,
            primary_crops: None,
            experience: None,
            language: "en".to_string(),
            location: None,
            profile_image: None,
            is_verified: false,
        }
    }

    fn create_test_weather(location: &str, temperature: f64) -> NewWeatherReport {
        // ---
        NewWeatherReport {
            location: location.to_string(),
            temperature,
            humidity: 75.0,
            wind_speed: 12.0,
            visibility: 10.0,
            condition: "Partly Cloudy".to_string(),
        }
    }

    fn create_test_consultation(user_id: &str) -> NewConsultation {
        // ---
        NewConsultation {
            user_id: user_id.to_string(),
            expert_id: "e-1".to_string(),
            question: "Why are my pepper leaves curling?".to_string(),
            status: ConsultationStatus::Pending,
            images: None,
            priority: "medium".to_string(),
        }
    }

    #[test]
    fn test_location_key_normalization() {
        // ---
        assert_eq!(location_key("Ernakulam, Kerala"), "ernakulam");
        assert_eq!(location_key("ernakulam"), "ernakulam");
        assert_eq!(location_key("  Kochi , Kerala, India"), "kochi");
        assert_eq!(location_key(""), "");
    }

    #[tokio::test]
    async fn test_created_users_get_distinct_ids() {
        // ---
        let store = create_test_store();
        let a = store
            .create_user(create_test_new_user("farmer_a"), "hash-a".to_string())
            .await;
        let b = store
            .create_user(create_test_new_user("farmer_b"), "hash-b".to_string())
            .await;

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn test_username_lookup_is_case_sensitive() {
        // ---
        let store = create_test_store();
        store
            .create_user(create_test_new_user("demo"), "hash".to_string())
            .await;

        assert!(store.get_user_by_username("demo").await.is_some());
        assert!(store.get_user_by_username("Demo").await.is_none());
    }

    #[tokio::test]
    async fn test_update_user_merges_and_ignores_password() {
        // ---
        let store = create_test_store();
        let user = store
            .create_user(create_test_new_user("demo"), "original-hash".to_string())
            .await;

        tokio::time::sleep(Duration::from_millis(2)).await;
        let updated = store
            .update_user(
                &user.id,
                UserUpdate {
                    farm_size: Some(7.5),
                    password: Some("new-secret".to_string()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.farm_size, Some(7.5));
        // Untouched fields survive the merge
        assert_eq!(updated.full_name, "Test Farmer");
        assert_eq!(updated.password_hash, "original-hash");
        assert!(updated.updated_at > user.updated_at);
    }

    #[tokio::test]
    async fn test_update_user_unknown_id_fails() {
        // ---
        let store = create_test_store();
        let result = store.update_user("missing", UserUpdate::default()).await;

        assert!(matches!(result, Err(StoreError::NotFound("User"))));
    }

    #[tokio::test]
    async fn test_weather_last_write_wins_per_location_key() {
        // ---
        let store = create_test_store();
        store
            .create_weather(create_test_weather("Ernakulam, Kerala", 28.0))
            .await;
        store
            .create_weather(create_test_weather("ernakulam", 31.0))
            .await;

        let report = store.get_weather("Ernakulam, Kerala").await.unwrap();
        assert_eq!(report.temperature, 31.0);

        // Different key, different slot
        assert!(store.get_weather("Kochi").await.is_none());
    }

    #[tokio::test]
    async fn test_soil_lookup_uses_normalized_key() {
        // ---
        let store = create_test_store();
        store
            .create_soil(NewSoilReport {
                location: "Ernakulam, Kerala".to_string(),
                soil_type: "Lateritic Soil".to_string(),
                ph_level: 6.2,
                fertility: "Moderate".to_string(),
                recommendations: "Add organic matter".to_string(),
            })
            .await;

        let report = store.get_soil("ERNAKULAM").await.unwrap();
        assert_eq!(report.soil_type, "Lateritic Soil");
    }

    #[tokio::test]
    async fn test_inactive_alerts_are_hidden() {
        // ---
        let store = create_test_store();
        store
            .create_alert(NewAlert {
                kind: "weather".to_string(),
                title: "Heavy Rain Alert".to_string(),
                message: "Expected rainfall 50-75mm".to_string(),
                severity: Severity::High,
                location: "Ernakulam, Kerala".to_string(),
                is_active: true,
            })
            .await;
        store
            .create_alert(NewAlert {
                kind: "pest".to_string(),
                title: "Old Advisory".to_string(),
                message: "Resolved".to_string(),
                severity: Severity::Low,
                location: "Ernakulam, Kerala".to_string(),
                is_active: false,
            })
            .await;

        let alerts = store.get_active_alerts().await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Heavy Rain Alert");
    }

    #[tokio::test]
    async fn test_recent_voice_queries_newest_first_with_limit() {
        // ---
        let store = create_test_store();
        for text in ["first", "second", "third"] {
            store
                .create_voice_query(NewVoiceQuery {
                    user_id: None,
                    query: text.to_string(),
                    response: "ok".to_string(),
                    language: "en".to_string(),
                })
                .await;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let recent = store.get_recent_voice_queries(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query, "third");
        assert_eq!(recent[1].query, "second");

        assert!(store.get_recent_voice_queries(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_detection_synthesis_uses_crop_table() {
        // ---
        let store = create_test_store();
        let rice_diseases = [
            "Brown Spot",
            "Leaf Blast",
            "Sheath Blight",
            "Bacterial Leaf Blight",
        ];

        for _ in 0..20 {
            let detection = store
                .create_disease_detection(NewDiseaseDetection {
                    user_id: "u-1".to_string(),
                    image_path: "/uploads/leaf.jpg".to_string(),
                    crop_type: "Rice".to_string(),
                })
                .await;

            assert!(rice_diseases.contains(&detection.detected_disease.as_str()));
            assert!(detection.confidence >= 0.70 && detection.confidence < 1.0);
            assert!((2..=4).contains(&detection.symptoms.len()));
        }

        let listed = store.get_disease_detections_by_user("u-1").await;
        assert_eq!(listed.len(), 20);
    }

    #[tokio::test]
    async fn test_same_seed_same_synthesis() {
        // ---
        let a = Store::with_rng(StdRng::seed_from_u64(7));
        let b = Store::with_rng(StdRng::seed_from_u64(7));
        let new = |user: &str| NewDiseaseDetection {
            user_id: user.to_string(),
            image_path: "/uploads/leaf.jpg".to_string(),
            crop_type: "Coconut".to_string(),
        };

        let from_a = a.create_disease_detection(new("u-1")).await;
        let from_b = b.create_disease_detection(new("u-1")).await;

        assert_eq!(from_a.detected_disease, from_b.detected_disease);
        assert_eq!(from_a.confidence, from_b.confidence);
        assert_eq!(from_a.symptoms, from_b.symptoms);
    }

    #[tokio::test]
    async fn test_fertilizer_recommendation_ranges() {
        // ---
        let store = create_test_store();
        let rec = store
            .create_fertilizer_recommendation(NewFertilizerRecommendation {
                user_id: "u-1".to_string(),
                crop_type: "Rice".to_string(),
                soil_type: "Lateritic".to_string(),
                crop_stage: "vegetative".to_string(),
            })
            .await;

        assert_eq!(rec.recommended_fertilizers.primary, "NPK 20:20:20");
        assert!((30..80).contains(&rec.nutrients.nitrogen));
        assert!((2000..7000).contains(&rec.cost_estimate));
        assert_eq!(rec.application_schedule.week1, "Base fertilizer application");
    }

    #[tokio::test]
    async fn test_market_price_filter_is_substring_case_insensitive() {
        // ---
        let store = create_test_store();
        for market in ["Ernakulam Market", "Thrissur Market"] {
            store
                .create_market_price(NewMarketPrice {
                    crop_name: "Rice".to_string(),
                    variety: None,
                    market_location: market.to_string(),
                    price_min: 2600.0,
                    price_max: 3000.0,
                    price_average: 2800.0,
                    unit: "quintal".to_string(),
                    quality: None,
                })
                .await;
        }

        let filtered = store.get_market_prices(Some("ernakulam")).await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].market_location, "Ernakulam Market");

        assert_eq!(store.get_market_prices(None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_experts_sorted_by_rating() {
        // ---
        let store = create_test_store();
        for (name, rating) in [("Dr. Nair", 4.2), ("Dr. Menon", 4.8), ("Dr. Das", 3.9)] {
            store
                .create_expert(NewExpert {
                    name: name.to_string(),
                    specialization: "Plant Pathology".to_string(),
                    experience: "10 years".to_string(),
                    location: None,
                    contact_info: None,
                    rating,
                    is_verified: true,
                    profile_image: None,
                    bio: None,
                })
                .await;
        }

        let experts = store.get_experts().await;
        let names: Vec<&str> = experts.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Dr. Menon", "Dr. Nair", "Dr. Das"]);
    }

    #[tokio::test]
    async fn test_consultation_response_stamps_timestamp() {
        // ---
        let store = create_test_store();
        let consultation = store
            .create_consultation(create_test_consultation("u-1"))
            .await;
        assert!(consultation.response_timestamp.is_none());

        // Status-only update leaves the stamp alone
        let updated = store
            .update_consultation(
                &consultation.id,
                ConsultationUpdate {
                    status: Some(ConsultationStatus::Closed),
                    ..ConsultationUpdate::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.response_timestamp.is_none());
        assert_eq!(updated.status, ConsultationStatus::Closed);

        // Supplying a response sets it
        let answered = store
            .update_consultation(
                &consultation.id,
                ConsultationUpdate {
                    response: Some("Likely a mite infestation.".to_string()),
                    status: Some(ConsultationStatus::Answered),
                    ..ConsultationUpdate::default()
                },
            )
            .await
            .unwrap();
        assert!(answered.response_timestamp.is_some());
        assert_eq!(answered.response.as_deref(), Some("Likely a mite infestation."));
    }

    #[tokio::test]
    async fn test_update_consultation_unknown_id_fails() {
        // ---
        let store = create_test_store();
        let result = store
            .update_consultation("missing", ConsultationUpdate::default())
            .await;

        assert!(matches!(result, Err(StoreError::NotFound("Consultation"))));
    }

    #[tokio::test]
    async fn test_comments_run_oldest_first() {
        // ---
        let store = create_test_store();
        for text in ["earliest", "middle", "latest"] {
            store
                .create_post_comment(NewPostComment {
                    post_id: "p-1".to_string(),
                    user_id: "u-1".to_string(),
                    content: text.to_string(),
                })
                .await;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        // Comments on another thread stay invisible
        store
            .create_post_comment(NewPostComment {
                post_id: "p-2".to_string(),
                user_id: "u-1".to_string(),
                content: "elsewhere".to_string(),
            })
            .await;

        let comments = store.get_post_comments("p-1").await;
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["earliest", "middle", "latest"]);
    }

    #[tokio::test]
    async fn test_advisory_region_filter() {
        // ---
        let store = create_test_store();
        for region in ["Ernakulam", "Idukki"] {
            store
                .create_crop_advisory(NewCropAdvisory {
                    crop_name: "Pepper".to_string(),
                    variety: None,
                    region: region.to_string(),
                    season: "monsoon".to_string(),
                    planting_guidance: None,
                    care_instructions: None,
                    harvest_guidance: None,
                    common_issues: None,
                    expected_yield: None,
                    profitability: None,
                })
                .await;
        }

        let filtered = store.get_crop_advisories(Some("iduk")).await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].region, "Idukki");
    }

    #[tokio::test]
    async fn test_scoped_lists_are_empty_for_unknown_user() {
        // ---
        let store = create_test_store();

        assert!(store.get_disease_detections_by_user("nobody").await.is_empty());
        assert!(store.get_consultations_by_user("nobody").await.is_empty());
        assert!(store.get_financial_records_by_user("nobody").await.is_empty());
        assert!(store.get_irrigation_schedules_by_user("nobody").await.is_empty());
    }
}
