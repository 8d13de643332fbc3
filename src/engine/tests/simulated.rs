use super::common::{service, student, table};
use crate::engine::domain::{Category, Preferences, RiskLevel};
use crate::engine::strategy::Algorithm;

fn sample_plan() -> crate::engine::service::RecommendationPlan {
    let svc = service(table(&[
        (4810, 590),
        (4850, 575),
        (4900, 565),
        (4950, 560),
        (5010, 548),
        (5050, 544),
        (5090, 540),
    ]));
    svc.generate_with(&student(5000), &Preferences::default(), Algorithm::Simulated, 10)
}

#[test]
fn probabilities_and_confidence_stay_in_bounds() {
    let plan = sample_plan();
    assert!(!plan.degraded);
    assert!(!plan.items.is_empty());

    for item in &plan.items {
        assert!(
            (1.0..=99.0).contains(&item.admission_probability),
            "probability {} out of bounds",
            item.admission_probability
        );
        let confidence = item.confidence.unwrap();
        assert!(
            (60.0..=95.0).contains(&confidence),
            "confidence {confidence} out of bounds"
        );
    }
}

#[test]
fn categories_follow_the_probability_thresholds() {
    let plan = sample_plan();

    for item in &plan.items {
        let expected = if item.admission_probability >= 80.0 {
            (Category::Safety, RiskLevel::Low)
        } else if item.admission_probability >= 60.0 {
            (Category::Stable, RiskLevel::Medium)
        } else if item.admission_probability >= 30.0 {
            (Category::Reach, RiskLevel::High)
        } else {
            (Category::Reach, RiskLevel::VeryHigh)
        };
        assert_eq!(
            (item.category, item.risk_level),
            expected,
            "school {}",
            item.school_name
        );
    }
}

#[test]
fn slate_sorts_by_probability_descending() {
    let plan = sample_plan();
    for pair in plan.items.windows(2) {
        assert!(pair[0].admission_probability >= pair[1].admission_probability);
    }
}

#[test]
fn mid_band_candidate_grades_stable() {
    let svc = service(table(&[(5050, 555)]));
    let plan = svc.generate_with(&student(5000), &Preferences::default(), Algorithm::Simulated, 10);

    assert_eq!(plan.items.len(), 1);
    let item = &plan.items[0];
    // Combination ~0.202 -> probability ~60.1.
    assert!((item.admission_probability - 60.1).abs() < 0.2);
    assert_eq!(item.category, Category::Stable);
    assert_eq!(item.risk_level, RiskLevel::Medium);
    assert!(item.rationale.contains("simulated model"));
}

#[test]
fn window_filter_applies_to_the_simulated_path_too() {
    let svc = service(table(&[(4700, 585), (4950, 560)]));
    let plan = svc.generate_with(&student(5000), &Preferences::default(), Algorithm::Simulated, 10);

    let schools: Vec<&str> = plan.items.iter().map(|i| i.school_name.as_str()).collect();
    assert_eq!(schools, ["School 4950"]);
}
