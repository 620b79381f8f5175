use scan_pipeline::render::{ScoreTier, rounded_score};
use scan_pipeline::scoring::ScanResult;

/// Print a scored product: name, energy, score with its tier, then alerts
/// and reasons in that order.
pub fn render_result(result: &ScanResult) {
    println!("\n=== {} ===", result.name);
    if let Some(nutrition) = &result.nutrition {
        if let Some(kcal) = nutrition.energy_kcal_100g {
            println!("{} kcal / 100g", kcal.round() as i64);
        }
    }

    let tier = ScoreTier::from_score(result.suitability_score);
    println!(
        "Score: {} / 100  [{}]",
        rounded_score(result.suitability_score),
        tier.label()
    );

    if !result.warnings.is_empty() {
        println!("\nHealth Alerts:");
        for warning in &result.warnings {
            println!("  ! {warning}");
        }
    }
    if !result.reasons.is_empty() {
        println!("\nWhy:");
        for reason in &result.reasons {
            println!("  - {reason}");
        }
    }
}
