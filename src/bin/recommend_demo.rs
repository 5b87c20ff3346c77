//! Recommendation Demo
//!
//! Builds (or loads) a model bundle, runs the encode-and-predict pipeline
//! on sample conditions, and optionally matches the recommended crop
//! against a seller catalog.
//!
//! Run with: cargo run --bin recommend_demo
//!
//! Environment:
//! - ARTIFACT_PATH: path to a model bundle JSON; a small demo bundle is
//!   written to the temp directory when unset.
//! - SELLERS_CSV: optional seller listings export for the catalog step.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_recommender_rust::{
    CategoryInput, CategoryEncoder, CropRecommender, EncoderSet, Measurements, ModelArtifact,
    SellerCatalog, TrainedClassifier,
};

/// Build the small logistic bundle used when no artifact is supplied.
fn demo_artifact() -> ModelArtifact {
    fn sorted_classes(names: &[&str]) -> CategoryEncoder {
        let mut classes: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        classes.sort();
        CategoryEncoder::new(classes)
    }

    let nutrient = ["Very Low", "Low", "Medium", "High", "Very High"];
    let mut encoders = EncoderSet::new();
    encoders.insert("N_cat", sorted_classes(&nutrient));
    encoders.insert("P_cat", sorted_classes(&nutrient));
    encoders.insert("K_cat", sorted_classes(&nutrient));
    encoders.insert("temperature_cat", sorted_classes(&["Cool", "Mild", "Warm", "Hot"]));
    encoders.insert("humidity_cat", sorted_classes(&["Dry", "Moderate", "Humid", "Very Humid"]));
    encoders.insert("ph_cat", sorted_classes(&["Acidic", "Neutral", "Alkaline"]));
    encoders.insert("rainfall_cat", sorted_classes(&["Low", "Medium", "High", "Very High"]));

    ModelArtifact {
        model_type: "Logistic Regression".to_string(),
        labels: vec![
            "coconut".to_string(),
            "maize".to_string(),
            "rice".to_string(),
            "watermelon".to_string(),
        ],
        encoders,
        classifier: TrainedClassifier::LogisticRegression {
            coefficients: vec![
                vec![0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05],
                vec![-0.1, 0.1, 0.1, 0.2, -0.2, 0.1, -0.3],
                vec![0.2, 0.2, 0.2, 0.5, 0.5, 0.4, 0.3],
                vec![0.1, 0.0, 0.0, 0.3, -0.1, 0.0, -0.2],
            ],
            intercepts: vec![-0.5, -0.5, 1.0, -1.0],
        },
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_recommender_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Crop Recommendation Demo");
    println!("========================\n");

    // Load the bundle from ARTIFACT_PATH, or write a demo bundle and load
    // it back through the same path every deployment uses.
    let artifact_path = std::env::var("ARTIFACT_PATH").unwrap_or_else(|_| {
        let path = std::env::temp_dir().join("crop_recommendation_demo_model.json");
        demo_artifact()
            .save(&path)
            .expect("demo bundle must be writable");
        path.to_string_lossy().into_owned()
    });

    let recommender = CropRecommender::load(&artifact_path)?;
    println!(
        "Model: {} ({} crop labels)\n",
        recommender.artifact().model_type,
        recommender.artifact().labels.len()
    );

    // Categorical input, as a caller with pre-binned data would supply it.
    let input = CategoryInput {
        nitrogen: "High".to_string(),
        phosphorous: "Medium".to_string(),
        potassium: "Medium".to_string(),
        temperature: "Warm".to_string(),
        humidity: "Humid".to_string(),
        ph: "Neutral".to_string(),
        rainfall: "High".to_string(),
    };

    println!("Inputs: N=High, P=Medium, K=Medium, Temperature=Warm,");
    println!("        Humidity=Humid, pH=Neutral, Rainfall=High\n");

    let recommendation = recommender.recommend(&input)?;
    println!("Predicted crop: {}", recommendation.crop);
    match recommendation.confidence_percentage() {
        Some(pct) => println!("Confidence: {:.2}%", pct),
        None => println!("Confidence: not exposed by this model"),
    }

    println!("\nTop 3 candidates:");
    for ranked in recommender.top_k(&input, 3)? {
        match ranked.confidence {
            Some(p) => println!("  {} ({:.4})", ranked.crop, p),
            None => println!("  {}", ranked.crop),
        }
    }

    // The raw-measurement path: bin first, then predict.
    let measurements = Measurements {
        nitrogen: 90.0,
        phosphorous: 60.0,
        potassium: 45.0,
        temperature_c: 27.0,
        humidity_pct: 80.0,
        soil_ph: 6.5,
        rainfall_mm: 180.0,
    };
    let from_raw = recommender.recommend_measurements(&measurements)?;
    println!(
        "\nFrom raw measurements (N=90, P=60, K=45, 27C, 80%, pH 6.5, 180mm): {}",
        from_raw.crop
    );

    // Unknown categories fail loudly instead of silently falling back.
    let mut invalid = input.clone();
    invalid.phosphorous = "Extreme".to_string();
    match recommender.recommend(&invalid) {
        Err(err) => println!("\nRejected bad input as expected: {}", err),
        Ok(_) => println!("\nUnexpected: invalid category was accepted"),
    }

    // Optional seller lookup.
    if let Ok(csv_path) = std::env::var("SELLERS_CSV") {
        println!("\nSeller lookup ({})", csv_path);
        let catalog = SellerCatalog::from_csv(&csv_path)?;
        let market = catalog.recommend_with_sellers(&recommender, &input)?;
        println!(
            "{} seller(s) offering {}:",
            market.sellers_count(),
            market.recommendation.crop
        );
        for seller in &market.sellers {
            let price = seller
                .price_per_kg
                .map(|p| format!("{:.2}/kg", p))
                .unwrap_or_else(|| "price on request".to_string());
            println!(
                "  {} ({}) - {}",
                seller.business_name,
                seller.location_text(),
                price
            );
        }
    }

    Ok(())
}
