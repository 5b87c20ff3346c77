//! Recommendation Integration Tests
//!
//! Exercises the full pipeline end to end: persist a model bundle, load
//! it back, recommend from categorical and raw inputs, and match the
//! recommended crop against a seller catalog.

use std::fs;
use std::path::PathBuf;

use crop_recommender_rust::{
    CategoryEncoder, CategoryInput, CropRecommender, DenseLayer, EncoderSet, Measurements,
    ModelArtifact, RecommendError, SellerCatalog, TrainedClassifier,
};

fn sorted_classes(names: &[&str]) -> CategoryEncoder {
    let mut classes: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    classes.sort();
    CategoryEncoder::new(classes)
}

fn trained_encoders() -> EncoderSet {
    let nutrient = ["Very Low", "Low", "Medium", "High", "Very High"];
    let mut encoders = EncoderSet::new();
    encoders.insert("N_cat", sorted_classes(&nutrient));
    encoders.insert("P_cat", sorted_classes(&nutrient));
    encoders.insert("K_cat", sorted_classes(&nutrient));
    encoders.insert("temperature_cat", sorted_classes(&["Cool", "Mild", "Warm", "Hot"]));
    encoders.insert("humidity_cat", sorted_classes(&["Dry", "Moderate", "Humid", "Very Humid"]));
    encoders.insert("ph_cat", sorted_classes(&["Acidic", "Neutral", "Alkaline"]));
    encoders.insert("rainfall_cat", sorted_classes(&["Low", "Medium", "High", "Very High"]));
    encoders
}

fn logistic_artifact() -> ModelArtifact {
    ModelArtifact {
        model_type: "Logistic Regression".to_string(),
        labels: vec![
            "coconut".to_string(),
            "maize".to_string(),
            "rice".to_string(),
        ],
        encoders: trained_encoders(),
        classifier: TrainedClassifier::LogisticRegression {
            coefficients: vec![
                vec![0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05],
                vec![-0.1, 0.1, 0.1, 0.2, -0.2, 0.1, -0.3],
                vec![0.2, 0.2, 0.2, 0.5, 0.5, 0.4, 0.3],
            ],
            intercepts: vec![-0.5, -0.5, 1.0],
        },
    }
}

fn mlp_artifact() -> ModelArtifact {
    ModelArtifact {
        model_type: "Neural Network".to_string(),
        labels: vec!["maize".to_string(), "rice".to_string()],
        encoders: trained_encoders(),
        classifier: TrainedClassifier::NeuralNetwork {
            layers: vec![
                DenseLayer {
                    weights: vec![
                        vec![0.2, -0.1, 0.1, 0.3, 0.1, 0.0, 0.2],
                        vec![-0.2, 0.1, 0.0, -0.1, 0.3, 0.1, -0.1],
                        vec![0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1],
                    ],
                    biases: vec![0.1, -0.1, 0.0],
                },
                DenseLayer {
                    weights: vec![vec![0.5, -0.5, 0.2], vec![-0.3, 0.4, 0.6]],
                    biases: vec![0.0, 0.1],
                },
            ],
        },
    }
}

fn scenario_input() -> CategoryInput {
    CategoryInput {
        nitrogen: "High".to_string(),
        phosphorous: "Medium".to_string(),
        potassium: "Medium".to_string(),
        temperature: "Warm".to_string(),
        humidity: "Humid".to_string(),
        ph: "Neutral".to_string(),
        rainfall: "High".to_string(),
    }
}

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("crop_recommender_it_{}_{}", std::process::id(), name))
}

#[test]
fn persisted_bundle_round_trips_through_recommendation() {
    let path = temp_file("logistic.json");
    logistic_artifact().save(&path).unwrap();

    let recommender = CropRecommender::load(&path).unwrap();
    let rec = recommender.recommend(&scenario_input()).unwrap();

    assert!(recommender.artifact().labels.contains(&rec.crop));
    let confidence = rec.confidence.expect("logistic model exposes probabilities");
    assert!((0.0..=1.0).contains(&confidence));

    // Same bundle, same input, same answer.
    let again = recommender.recommend(&scenario_input()).unwrap();
    assert_eq!(rec.crop, again.crop);
    assert_eq!(rec.confidence, again.confidence);

    let _ = fs::remove_file(&path);
}

#[test]
fn mlp_bundle_reports_bounded_confidence() {
    let path = temp_file("mlp.json");
    mlp_artifact().save(&path).unwrap();

    let recommender = CropRecommender::load(&path).unwrap();
    let rec = recommender.recommend(&scenario_input()).unwrap();
    let confidence = rec.confidence.expect("network exposes probabilities");
    assert!((0.0..=1.0).contains(&confidence));

    // With two classes the winner's probability is at least half.
    assert!(confidence >= 0.5);

    let _ = fs::remove_file(&path);
}

#[test]
fn missing_bundle_is_service_fatal() {
    let err = CropRecommender::load("/nonexistent/crop_model.json").unwrap_err();
    assert!(matches!(err, RecommendError::ArtifactUnavailable { .. }));
}

#[test]
fn unknown_category_never_falls_back() {
    let recommender = CropRecommender::new(logistic_artifact());
    let mut input = scenario_input();
    input.phosphorous = "Invalid".to_string();

    match recommender.recommend(&input).unwrap_err() {
        RecommendError::UnknownCategory { feature, value, .. } => {
            assert_eq!(feature, "phosphorous");
            assert_eq!(value, "Invalid");
        }
        other => panic!("expected UnknownCategory, got {other:?}"),
    }
}

#[test]
fn raw_measurements_agree_with_prebinned_categories() {
    let recommender = CropRecommender::new(logistic_artifact());

    let measurements = Measurements {
        nitrogen: 90.0,
        phosphorous: 60.0,
        potassium: 45.0,
        temperature_c: 27.0,
        humidity_pct: 80.0,
        soil_ph: 6.5,
        rainfall_mm: 180.0,
    };

    let from_raw = recommender.recommend_measurements(&measurements).unwrap();
    let from_categories = recommender.recommend(&scenario_input()).unwrap();
    assert_eq!(from_raw.crop, from_categories.crop);
    assert_eq!(from_raw.confidence, from_categories.confidence);
}

#[test]
fn batch_recommendation_matches_serial_calls() {
    let recommender = CropRecommender::new(logistic_artifact());

    let inputs: Vec<CategoryInput> = vec![
        scenario_input(),
        Measurements {
            nitrogen: 10.0,
            phosphorous: 15.0,
            potassium: 10.0,
            temperature_c: 15.0,
            humidity_pct: 30.0,
            soil_ph: 5.5,
            rainfall_mm: 40.0,
        }
        .categorize(),
        Measurements {
            nitrogen: 140.0,
            phosphorous: 110.0,
            potassium: 120.0,
            temperature_c: 35.0,
            humidity_pct: 95.0,
            soil_ph: 7.8,
            rainfall_mm: 250.0,
        }
        .categorize(),
    ];

    let batched = recommender.recommend_batch(&inputs);
    assert_eq!(batched.len(), inputs.len());

    for (input, batched_result) in inputs.iter().zip(batched) {
        let serial = recommender.recommend(input).unwrap();
        let batched_rec = batched_result.unwrap();
        assert_eq!(serial.crop, batched_rec.crop);
        assert_eq!(serial.confidence, batched_rec.confidence);
    }
}

#[test]
fn top_k_ranks_descending_and_covers_label_set() {
    let recommender = CropRecommender::new(logistic_artifact());
    let ranked = recommender.top_k(&scenario_input(), 3).unwrap();

    assert_eq!(ranked.len(), 3);
    for pair in ranked.windows(2) {
        assert!(pair[0].confidence.unwrap() >= pair[1].confidence.unwrap());
    }
    for entry in &ranked {
        assert!(recommender.artifact().labels.contains(&entry.crop));
    }
}

#[test]
fn recommendation_feeds_seller_lookup() {
    let csv_path = temp_file("sellers.csv");
    fs::write(
        &csv_path,
        "\
seller_id,business_name,contact_number,city,district,province,crop_name,crop_variety,price_per_kg,quantity_available,minimum_order,quality_grade,organic_certified,pesticide_free,is_available,is_active,is_verified
1,Green Valley Farms,0771234567,Kandy,Kandy,Central,rice,Nadu,120.0,500,25,A,true,true,true,true,false
2,Paddy Direct,0712345678,Anuradhapura,Anuradhapura,North Central,Rice,Samba,95.5,1200,50,A,false,false,true,true,true
3,Hill Estate,0759876543,Nuwara Eliya,Nuwara Eliya,Central,tea,BOP,850.0,80,5,Premium,true,true,true,true,true
4,Idle Barn,0723456789,Galle,Galle,Southern,rice,Nadu,70.0,200,10,B,false,false,false,true,false
",
    )
    .unwrap();

    // A bundle whose only strong class is rice, so the lookup is stable.
    let mut artifact = logistic_artifact();
    artifact.classifier = TrainedClassifier::LogisticRegression {
        coefficients: vec![vec![0.0; 7], vec![0.0; 7], vec![0.1; 7]],
        intercepts: vec![-2.0, -2.0, 2.0],
    };
    let recommender = CropRecommender::new(artifact);

    let catalog = SellerCatalog::from_csv(csv_path.to_str().unwrap()).unwrap();
    let market = catalog
        .recommend_with_sellers(&recommender, &scenario_input())
        .unwrap();

    assert_eq!(market.recommendation.crop, "rice");
    // Seller 4 is filtered out (unavailable); verified seller 2 sorts first.
    assert_eq!(market.sellers_count(), 2);
    assert_eq!(market.sellers[0].seller_id, 2);
    assert_eq!(market.sellers[1].seller_id, 1);

    let _ = fs::remove_file(&csv_path);
}
