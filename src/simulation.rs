//! Mock agronomy results, standing in for real detection and optimization
//! models.
//!
//! Diagnoses come from fixed per-crop disease tables and shared symptom and
//! treatment pools; fertilizer advice pairs a fixed plan with randomized
//! nutrient levels and cost. Callers pass the RNG in, so the store can run
//! seeded for deterministic tests and from entropy in production.

use rand::Rng;

use crate::models::{ApplicationSchedule, FertilizerPlan, NutrientProfile, Severity};

// ---

const RICE_DISEASES: [&str; 4] = [
    "Brown Spot",
    "Leaf Blast",
    "Sheath Blight",
    "Bacterial Leaf Blight",
];

const COCONUT_DISEASES: [&str; 4] = ["Leaf Spot", "Bud Rot", "Crown Rot", "Root Wilt"];

const PEPPER_DISEASES: [&str; 4] = ["Anthracnose", "Leaf Spot", "Quick Wilt", "Phytophthora"];

const DEFAULT_DISEASES: [&str; 4] = [
    "Leaf Spot",
    "Fungal Infection",
    "Bacterial Wilt",
    "Nutrient Deficiency",
];

const SYMPTOM_POOL: [&str; 6] = [
    "Yellow spots on leaves",
    "Brown patches on stem",
    "Wilting of lower leaves",
    "Dark spots with yellow halo",
    "Premature leaf drop",
    "Stunted growth",
];

const TREATMENT_POOL: [&str; 5] = [
    "Apply copper-based fungicide spray every 7-10 days",
    "Remove affected leaves and improve air circulation",
    "Use neem oil spray in early morning or evening",
    "Ensure proper drainage and avoid overwatering",
    "Apply organic compost to improve plant immunity",
];

/// Synthesized disease-detection result.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    // ---
    pub disease: &'static str,
    pub confidence: f64,
    pub symptoms: &'static [&'static str],
    pub treatment: &'static str,
    pub severity: Severity,
}

/// Synthesized fertilizer recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct FertilizerAdvice {
    // ---
    pub plan: FertilizerPlan,
    pub nutrients: NutrientProfile,
    pub schedule: ApplicationSchedule,
    pub cost_estimate: u32,
}

/// Crop names are matched exactly; anything unrecognized falls back to the
/// generic disease table.
fn disease_table(crop_type: &str) -> &'static [&'static str; 4] {
    // ---
    match crop_type {
        "Rice" => &RICE_DISEASES,
        "Coconut" => &COCONUT_DISEASES,
        "Pepper" => &PEPPER_DISEASES,
        _ => &DEFAULT_DISEASES,
    }
}

/// Produce a diagnosis for one uploaded image.
///
/// Confidence is uniform in [0.70, 1.00); symptoms are a prefix of two to
/// four entries from the shared pool; severity splits 50-50 between medium
/// and low.
pub fn diagnose(crop_type: &str, rng: &mut impl Rng) -> Diagnosis {
    // ---
    let table = disease_table(crop_type);

    Diagnosis {
        disease: table[rng.gen_range(0..table.len())],
        confidence: rng.gen_range(0.70..1.0),
        symptoms: &SYMPTOM_POOL[..rng.gen_range(2..=4)],
        treatment: TREATMENT_POOL[rng.gen_range(0..TREATMENT_POOL.len())],
        severity: if rng.gen_bool(0.5) {
            Severity::Medium
        } else {
            Severity::Low
        },
    }
}

/// Produce fertilizer advice.
///
/// The plan and schedule are fixed; nutrient levels and the cost estimate
/// are uniform integers within the advisory ranges (nitrogen [30, 80),
/// phosphorus [20, 50), potassium [25, 65), organic matter [5, 15), cost
/// [2000, 7000) rupees).
pub fn fertilizer_advice(rng: &mut impl Rng) -> FertilizerAdvice {
    // ---
    FertilizerAdvice {
        plan: FertilizerPlan {
            primary: "NPK 20:20:20",
            secondary: "Organic Compost",
            micronutrients: ["Zinc Sulphate", "Boron"],
            application: "Apply during vegetative growth stage",
        },
        nutrients: NutrientProfile {
            nitrogen: rng.gen_range(30..80),
            phosphorus: rng.gen_range(20..50),
            potassium: rng.gen_range(25..65),
            organic_matter: rng.gen_range(5..15),
        },
        schedule: ApplicationSchedule {
            week1: "Base fertilizer application",
            week3: "First top dressing",
            week6: "Second top dressing",
            week9: "Final application before harvest",
        },
        cost_estimate: rng.gen_range(2000..7000),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_rng(seed: u64) -> StdRng {
        // ---
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_rice_diagnoses_come_from_rice_table() {
        // ---
        let mut rng = create_test_rng(7);

        for _ in 0..50 {
            let diagnosis = diagnose("Rice", &mut rng);
            assert!(RICE_DISEASES.contains(&diagnosis.disease));
        }
    }

    #[test]
    fn test_unknown_crop_uses_default_table() {
        // ---
        let mut rng = create_test_rng(7);

        for _ in 0..50 {
            let diagnosis = diagnose("Banana", &mut rng);
            assert!(DEFAULT_DISEASES.contains(&diagnosis.disease));
        }

        // Lookup is case-sensitive, so lowercase "rice" is not the Rice crop
        let diagnosis = diagnose("rice", &mut rng);
        assert!(DEFAULT_DISEASES.contains(&diagnosis.disease));
    }

    #[test]
    fn test_confidence_stays_in_range() {
        // ---
        let mut rng = create_test_rng(11);

        for _ in 0..200 {
            let diagnosis = diagnose("Coconut", &mut rng);
            assert!(diagnosis.confidence >= 0.70);
            assert!(diagnosis.confidence < 1.0);
        }
    }

    #[test]
    fn test_symptoms_are_a_pool_prefix() {
        // ---
        let mut rng = create_test_rng(13);

        for _ in 0..50 {
            let diagnosis = diagnose("Pepper", &mut rng);
            let len = diagnosis.symptoms.len();

            assert!((2..=4).contains(&len));
            assert_eq!(diagnosis.symptoms, &SYMPTOM_POOL[..len]);
        }
    }

    #[test]
    fn test_severity_is_medium_or_low() {
        // ---
        let mut rng = create_test_rng(17);

        for _ in 0..50 {
            let diagnosis = diagnose("Rice", &mut rng);
            assert!(matches!(
                diagnosis.severity,
                Severity::Medium | Severity::Low
            ));
        }
    }

    #[test]
    fn test_nutrients_and_cost_stay_in_ranges() {
        // ---
        let mut rng = create_test_rng(19);

        for _ in 0..200 {
            let advice = fertilizer_advice(&mut rng);

            assert!((30..80).contains(&advice.nutrients.nitrogen));
            assert!((20..50).contains(&advice.nutrients.phosphorus));
            assert!((25..65).contains(&advice.nutrients.potassium));
            assert!((5..15).contains(&advice.nutrients.organic_matter));
            assert!((2000..7000).contains(&advice.cost_estimate));
        }
    }

    #[test]
    fn test_fixed_plan_never_varies() {
        // ---
        let mut rng = create_test_rng(23);
        let advice = fertilizer_advice(&mut rng);

        assert_eq!(advice.plan.primary, "NPK 20:20:20");
        assert_eq!(advice.plan.micronutrients, ["Zinc Sulphate", "Boron"]);
        assert_eq!(advice.schedule.week9, "Final application before harvest");
    }

    #[test]
    fn test_same_seed_same_output() {
        // ---
        let mut a = create_test_rng(42);
        let mut b = create_test_rng(42);

        assert_eq!(diagnose("Rice", &mut a), diagnose("Rice", &mut b));
        assert_eq!(fertilizer_advice(&mut a), fertilizer_advice(&mut b));
    }
}
