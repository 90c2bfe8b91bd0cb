//! Startup seed data: the Kerala baseline records and the demo account.
//!
//! The service boots with one weather report, one soil report and one
//! active alert for Ernakulam, plus a verified `demo` farmer so the client
//! can log in against a fresh process.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::models::{NewAlert, NewSoilReport, NewUser, NewWeatherReport, Severity};
use crate::store::Store;

// ---

/// Populate a fresh store. Safe to call again: the demo account is only
/// created if the username is free, and the keyed baselines overwrite
/// themselves in place.
pub async fn populate(store: &Store, config: &Config) -> Result<()> {
    // ---
    store
        .create_weather(NewWeatherReport {
            location: "Ernakulam, Kerala".to_string(),
            temperature: 28.0,
            humidity: 75.0,
            wind_speed: 12.0,
            visibility: 10.0,
            condition: "Partly Cloudy".to_string(),
        })
        .await;

    store
        .create_soil(NewSoilReport {
            location: "Ernakulam, Kerala".to_string(),
            soil_type: "Lateritic Soil".to_string(),
            ph_level: 6.2,
            fertility: "Moderate".to_string(),
            recommendations: "Suitable for rice, coconut, and spice cultivation. \
                              Consider organic fertilizers to improve fertility."
                .to_string(),
        })
        .await;

    store
        .create_alert(NewAlert {
            kind: "weather".to_string(),
            title: "Heavy Rain Alert".to_string(),
            message: "Expected rainfall 50-75mm in next 6 hours. \
                      Take necessary precautions for your crops."
                .to_string(),
            severity: Severity::High,
            location: "Ernakulam, Kerala".to_string(),
            is_active: true,
        })
        .await;

    if store.get_user_by_username("demo").await.is_none() {
        let password_hash = bcrypt::hash("demo123", config.bcrypt_cost)
            .context("Failed to hash demo account password")?;

        store
            .create_user(
                NewUser {
                    username: "demo".to_string(),
                    // Ignored by the store; the hash above is what it keeps
                    password: String::new(),
                    email: Some("demo@example.com".to_string()),
                    full_name: "Demo Farmer".to_string(),
                    phone: Some("+91 9876543210".to_string()),
                    farm_location: Some("Ernakulam, Kerala".to_string()),
                    farm_size: Some(5.0),
                    farm_type: Some("organic".to_string()),
                    primary_crops: Some(vec![
                        "Rice".to_string(),
                        "Coconut".to_string(),
                        "Pepper".to_string(),
                    ]),
                    experience: Some("intermediate".to_string()),
                    language: "en".to_string(),
                    location: None,
                    profile_image: None,
                    is_verified: true,
                },
                password_hash,
            )
            .await;

        tracing::info!("Seeded demo account");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_config() -> Config {
        // ---
        // Low bcrypt cost keeps the test fast
        Config {
            port: 0,
            bcrypt_cost: 4,
            rng_seed: Some(1),
        }
    }

    #[tokio::test]
    async fn test_populate_seeds_the_ernakulam_baseline() {
        // ---
        let store = Store::new();
        populate(&store, &create_test_config()).await.unwrap();

        let weather = store.get_weather("Ernakulam, Kerala").await.unwrap();
        assert_eq!(weather.temperature, 28.0);
        assert_eq!(weather.condition, "Partly Cloudy");

        let soil = store.get_soil("ernakulam").await.unwrap();
        assert_eq!(soil.soil_type, "Lateritic Soil");
        assert_eq!(soil.ph_level, 6.2);

        let alerts = store.get_active_alerts().await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Heavy Rain Alert");
    }

    #[tokio::test]
    async fn test_demo_account_logs_in_and_survives_reseeding() {
        // ---
        let store = Store::new();
        let config = create_test_config();
        populate(&store, &config).await.unwrap();

        let demo = store.get_user_by_username("demo").await.unwrap();
        assert!(demo.is_verified);
        assert!(bcrypt::verify("demo123", &demo.password_hash).unwrap());

        // A second populate keeps the same account
        populate(&store, &config).await.unwrap();
        let again = store.get_user_by_username("demo").await.unwrap();
        assert_eq!(again.id, demo.id);
    }
}
