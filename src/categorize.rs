//! Feature Categorization
//!
//! Converts continuous agronomic measurements into the fixed ordinal
//! categories the classifier was trained on. Each function scans inclusive
//! upper bounds in ascending order; a value that fails every bound check
//! (including NaN, which compares false against everything) takes the top
//! band. The functions are pure and total: any `f64` maps to some category.

// ============================================================================
// NUTRIENT LEVELS (nitrogen, phosphorous, potassium)
// ============================================================================

/// Soil nutrient level, shared alphabet for N, P and K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NutrientLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl NutrientLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientLevel::VeryLow => "Very Low",
            NutrientLevel::Low => "Low",
            NutrientLevel::Medium => "Medium",
            NutrientLevel::High => "High",
            NutrientLevel::VeryHigh => "Very High",
        }
    }
}

/// Categorize soil nitrogen (kg/ha).
///
/// Thresholds (inclusive upper bounds):
/// - Very Low: <= 20
/// - Low: <= 40
/// - Medium: <= 80
/// - High: <= 120
/// - Very High: above 120
pub fn categorize_nitrogen(n: f64) -> NutrientLevel {
    if n <= 20.0 {
        NutrientLevel::VeryLow
    } else if n <= 40.0 {
        NutrientLevel::Low
    } else if n <= 80.0 {
        NutrientLevel::Medium
    } else if n <= 120.0 {
        NutrientLevel::High
    } else {
        NutrientLevel::VeryHigh
    }
}

/// Categorize soil phosphorous (kg/ha).
///
/// Thresholds: <=25 Very Low, <=50 Low, <=75 Medium, <=100 High, else Very High.
pub fn categorize_phosphorous(p: f64) -> NutrientLevel {
    if p <= 25.0 {
        NutrientLevel::VeryLow
    } else if p <= 50.0 {
        NutrientLevel::Low
    } else if p <= 75.0 {
        NutrientLevel::Medium
    } else if p <= 100.0 {
        NutrientLevel::High
    } else {
        NutrientLevel::VeryHigh
    }
}

/// Categorize soil potassium (kg/ha).
///
/// Thresholds: <=20 Very Low, <=35 Low, <=60 Medium, <=100 High, else Very High.
pub fn categorize_potassium(k: f64) -> NutrientLevel {
    if k <= 20.0 {
        NutrientLevel::VeryLow
    } else if k <= 35.0 {
        NutrientLevel::Low
    } else if k <= 60.0 {
        NutrientLevel::Medium
    } else if k <= 100.0 {
        NutrientLevel::High
    } else {
        NutrientLevel::VeryHigh
    }
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Temperature band (annual mean, degrees C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TemperatureBand {
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::Cool => "Cool",
            TemperatureBand::Mild => "Mild",
            TemperatureBand::Warm => "Warm",
            TemperatureBand::Hot => "Hot",
        }
    }
}

/// Categorize temperature (degrees C).
///
/// Thresholds: <=18 Cool, <=25 Mild, <=32 Warm, else Hot.
pub fn categorize_temperature(temp_c: f64) -> TemperatureBand {
    if temp_c <= 18.0 {
        TemperatureBand::Cool
    } else if temp_c <= 25.0 {
        TemperatureBand::Mild
    } else if temp_c <= 32.0 {
        TemperatureBand::Warm
    } else {
        TemperatureBand::Hot
    }
}

// ============================================================================
// HUMIDITY
// ============================================================================

/// Relative humidity band (%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HumidityBand {
    Dry,
    Moderate,
    Humid,
    VeryHumid,
}

impl HumidityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityBand::Dry => "Dry",
            HumidityBand::Moderate => "Moderate",
            HumidityBand::Humid => "Humid",
            HumidityBand::VeryHumid => "Very Humid",
        }
    }
}

/// Categorize relative humidity (%).
///
/// Thresholds: <=40 Dry, <=70 Moderate, <=90 Humid, else Very Humid.
pub fn categorize_humidity(humidity_pct: f64) -> HumidityBand {
    if humidity_pct <= 40.0 {
        HumidityBand::Dry
    } else if humidity_pct <= 70.0 {
        HumidityBand::Moderate
    } else if humidity_pct <= 90.0 {
        HumidityBand::Humid
    } else {
        HumidityBand::VeryHumid
    }
}

// ============================================================================
// SOIL pH
// ============================================================================

/// Soil pH class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhClass {
    Acidic,
    Neutral,
    Alkaline,
}

impl PhClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhClass::Acidic => "Acidic",
            PhClass::Neutral => "Neutral",
            PhClass::Alkaline => "Alkaline",
        }
    }
}

/// Categorize soil pH (H2O).
///
/// Thresholds: <=6.0 Acidic, <=7.0 Neutral, else Alkaline.
pub fn categorize_ph(ph: f64) -> PhClass {
    if ph <= 6.0 {
        PhClass::Acidic
    } else if ph <= 7.0 {
        PhClass::Neutral
    } else {
        PhClass::Alkaline
    }
}

// ============================================================================
// RAINFALL
// ============================================================================

/// Rainfall band (mm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RainfallBand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RainfallBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainfallBand::Low => "Low",
            RainfallBand::Medium => "Medium",
            RainfallBand::High => "High",
            RainfallBand::VeryHigh => "Very High",
        }
    }
}

/// Categorize rainfall (mm).
///
/// Thresholds: <=60 Low, <=120 Medium, <=200 High, else Very High.
pub fn categorize_rainfall(rainfall_mm: f64) -> RainfallBand {
    if rainfall_mm <= 60.0 {
        RainfallBand::Low
    } else if rainfall_mm <= 120.0 {
        RainfallBand::Medium
    } else if rainfall_mm <= 200.0 {
        RainfallBand::High
    } else {
        RainfallBand::VeryHigh
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Boundary exactness (bounds are inclusive) ----

    #[test]
    fn test_nitrogen_boundaries() {
        assert_eq!(categorize_nitrogen(20.0), NutrientLevel::VeryLow);
        assert_eq!(categorize_nitrogen(20.0001), NutrientLevel::Low);
        assert_eq!(categorize_nitrogen(40.0), NutrientLevel::Low);
        assert_eq!(categorize_nitrogen(40.0001), NutrientLevel::Medium);
        assert_eq!(categorize_nitrogen(80.0), NutrientLevel::Medium);
        assert_eq!(categorize_nitrogen(80.0001), NutrientLevel::High);
        assert_eq!(categorize_nitrogen(120.0), NutrientLevel::High);
        assert_eq!(categorize_nitrogen(120.0001), NutrientLevel::VeryHigh);
    }

    #[test]
    fn test_phosphorous_boundaries() {
        assert_eq!(categorize_phosphorous(25.0), NutrientLevel::VeryLow);
        assert_eq!(categorize_phosphorous(25.0001), NutrientLevel::Low);
        assert_eq!(categorize_phosphorous(50.0), NutrientLevel::Low);
        assert_eq!(categorize_phosphorous(75.0), NutrientLevel::Medium);
        assert_eq!(categorize_phosphorous(100.0), NutrientLevel::High);
        assert_eq!(categorize_phosphorous(100.0001), NutrientLevel::VeryHigh);
    }

    #[test]
    fn test_potassium_boundaries() {
        assert_eq!(categorize_potassium(20.0), NutrientLevel::VeryLow);
        assert_eq!(categorize_potassium(20.0001), NutrientLevel::Low);
        assert_eq!(categorize_potassium(35.0), NutrientLevel::Low);
        assert_eq!(categorize_potassium(60.0), NutrientLevel::Medium);
        assert_eq!(categorize_potassium(100.0), NutrientLevel::High);
        assert_eq!(categorize_potassium(100.5), NutrientLevel::VeryHigh);
    }

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(categorize_temperature(18.0), TemperatureBand::Cool);
        assert_eq!(categorize_temperature(18.0001), TemperatureBand::Mild);
        assert_eq!(categorize_temperature(25.0), TemperatureBand::Mild);
        assert_eq!(categorize_temperature(32.0), TemperatureBand::Warm);
        assert_eq!(categorize_temperature(32.0001), TemperatureBand::Hot);
    }

    #[test]
    fn test_humidity_boundaries() {
        assert_eq!(categorize_humidity(40.0), HumidityBand::Dry);
        assert_eq!(categorize_humidity(40.0001), HumidityBand::Moderate);
        assert_eq!(categorize_humidity(70.0), HumidityBand::Moderate);
        assert_eq!(categorize_humidity(90.0), HumidityBand::Humid);
        assert_eq!(categorize_humidity(90.0001), HumidityBand::VeryHumid);
    }

    #[test]
    fn test_ph_boundaries() {
        assert_eq!(categorize_ph(6.0), PhClass::Acidic);
        assert_eq!(categorize_ph(6.0001), PhClass::Neutral);
        assert_eq!(categorize_ph(7.0), PhClass::Neutral);
        assert_eq!(categorize_ph(7.0001), PhClass::Alkaline);
    }

    #[test]
    fn test_rainfall_boundaries() {
        assert_eq!(categorize_rainfall(60.0), RainfallBand::Low);
        assert_eq!(categorize_rainfall(60.0001), RainfallBand::Medium);
        assert_eq!(categorize_rainfall(120.0), RainfallBand::Medium);
        assert_eq!(categorize_rainfall(200.0), RainfallBand::High);
        assert_eq!(categorize_rainfall(200.0001), RainfallBand::VeryHigh);
    }

    // ---- Monotonicity and totality ----

    #[test]
    fn test_nitrogen_monotone() {
        // Category rank never decreases as the measurement increases.
        let samples = [
            -50.0, 0.0, 10.0, 20.0, 21.0, 39.9, 40.0, 55.0, 80.0, 99.0, 120.0, 121.0, 500.0,
        ];
        let mut prev = categorize_nitrogen(samples[0]);
        for &n in &samples[1..] {
            let cat = categorize_nitrogen(n);
            assert!(cat >= prev, "rank decreased at n={n}");
            prev = cat;
        }
    }

    #[test]
    fn test_rainfall_monotone() {
        let samples = [0.0, 30.0, 60.0, 61.0, 120.0, 121.0, 200.0, 201.0, 3000.0];
        let mut prev = categorize_rainfall(samples[0]);
        for &r in &samples[1..] {
            let cat = categorize_rainfall(r);
            assert!(cat >= prev, "rank decreased at rainfall={r}");
            prev = cat;
        }
    }

    #[test]
    fn test_out_of_physical_range_still_maps() {
        // Out-of-range inputs are not validated; they map via the same rule.
        assert_eq!(categorize_rainfall(-10.0), RainfallBand::Low);
        assert_eq!(categorize_nitrogen(f64::MIN), NutrientLevel::VeryLow);
        assert_eq!(categorize_nitrogen(f64::MAX), NutrientLevel::VeryHigh);
        assert_eq!(categorize_ph(-3.0), PhClass::Acidic);
    }

    #[test]
    fn test_nan_takes_top_band() {
        // NaN fails every bound check and falls through to the top band,
        // matching the binning used at training time.
        assert_eq!(categorize_nitrogen(f64::NAN), NutrientLevel::VeryHigh);
        assert_eq!(categorize_temperature(f64::NAN), TemperatureBand::Hot);
        assert_eq!(categorize_ph(f64::NAN), PhClass::Alkaline);
    }

    #[test]
    fn test_category_strings() {
        assert_eq!(NutrientLevel::VeryLow.as_str(), "Very Low");
        assert_eq!(TemperatureBand::Hot.as_str(), "Hot");
        assert_eq!(HumidityBand::VeryHumid.as_str(), "Very Humid");
        assert_eq!(PhClass::Neutral.as_str(), "Neutral");
        assert_eq!(RainfallBand::VeryHigh.as_str(), "Very High");
    }
}
