//! Product-sales walkthrough: run both detectors over three years of
//! monthly sales counts and print the per-month predictions.
//!
//! Run with: cargo run --example product_sales

use anofox_anomaly::detection::{ChangepointDetector, DetectorConfig, SpikeDetector};
use anofox_anomaly::engine::StreamingEngine;

/// Three years of monthly sales: a stable first year, one promotional
/// spike, then a lasting jump to a higher level.
fn monthly_sales() -> Vec<(String, f64)> {
    let mut records = Vec::new();
    for (i, base) in [
        263.0, 250.9, 288.1, 254.3, 285.3, 273.5, 296.8, 279.5, 287.8, 267.9, 281.5, 290.9,
        269.3, 254.5, 285.1, 278.3, 276.4, 892.0, 261.0, 288.6, 274.9, 286.6, 269.5, 287.3,
        584.7, 605.4, 590.7, 610.1, 600.1, 616.4, 591.4, 609.0, 602.1, 583.0, 614.4, 603.7,
    ]
    .iter()
    .enumerate()
    {
        let year = 2017 + i / 12;
        let month = i % 12 + 1;
        records.push((format!("{year}-{month:02}"), *base));
    }
    records
}

fn main() {
    let records = monthly_sales();
    let config = DetectorConfig::with_history_for_len(records.len()).confidence(95.0);

    println!("=== Spike detection ===");
    println!("Month\tAlert\tScore\tP-Value");
    let detector = SpikeDetector::new(&config).expect("valid configuration");
    let mut engine = StreamingEngine::new(detector);
    for (month, prediction) in engine.run_labeled(records.clone()).expect("finite input") {
        let mut line = format!(
            "{month}\t{}\t{:.2}\t{:.2}",
            prediction.alert as u8, prediction.score, prediction.p_value
        );
        if prediction.alert {
            line += " <-- spike detected";
        }
        println!("{line}");
    }

    println!();
    println!("=== Changepoint detection ===");
    println!("Month\tAlert\tScore\tP-Value\tMartingale");
    let detector = ChangepointDetector::new(&config).expect("valid configuration");
    let mut engine = StreamingEngine::new(detector);
    for (month, prediction) in engine.run_labeled(records).expect("finite input") {
        let martingale = prediction.martingale.unwrap_or_default();
        let mut line = format!(
            "{month}\t{}\t{:.2}\t{:.2}\t{:.2}",
            prediction.alert as u8, prediction.score, prediction.p_value, martingale
        );
        if prediction.alert {
            line += " <-- changepoint detected";
        }
        println!("{line}");
    }
}
