//! Behavioural properties of the classifier, exercised through the public API.

use std::sync::Arc;

use civic_intake::classify::{
    CategorySpec, CategoryTable, Classifier, MAX_SUGGESTIONS, OTHER_CATEGORY,
};

const SAMPLES: &[&str] = &[
    "There is a dangerous pothole on Main Street, urgent repair needed",
    "No water in our area for three days, the pipeline is leaking",
    "Frequent power cut and voltage fluctuation, transformer sparks at night",
    "Garbage has not been collected, trash piles up and it stinks",
    "Open drain is blocked and mosquito breeding everywhere",
    "The street light near the school is flickering and the lamp is dim",
    "overflow overflow",
    "asdkj qweroiu",
    "road",
    "roadway",
    "   ",
    "",
];

fn one_decimal(value: f64) -> bool {
    let tenths = value * 10.0;
    (tenths - tenths.round()).abs() < 1e-9
}

#[test]
fn other_iff_total_is_zero() {
    let c = Classifier::builtin();
    for text in SAMPLES {
        let result = c.classify(Some(text));
        assert_eq!(
            result.scores.total() == 0,
            result.category == OTHER_CATEGORY,
            "text: {text:?}"
        );
    }
}

#[test]
fn confidence_bounds_and_precision() {
    let c = Classifier::builtin();
    for text in SAMPLES {
        let result = c.classify(Some(text));
        if result.scores.total() > 0 {
            assert!(result.confidence > 0.0 && result.confidence <= 100.0, "text: {text:?}");
            assert!(one_decimal(result.confidence), "text: {text:?}");
        } else {
            assert_eq!(result.confidence, 0.0);
        }
    }
}

#[test]
fn winner_has_maximum_score() {
    let c = Classifier::builtin();
    for text in SAMPLES {
        let result = c.classify(Some(text));
        if let Some(best) = result.scores.get(&result.category) {
            assert!(result.scores.iter().all(|(_, score)| score <= best));
        }
    }
}

#[test]
fn expected_categories() {
    let c = Classifier::builtin();
    let expected = [
        "Roads",
        "Water",
        "Electricity",
        "Garbage",
        "Drainage",
        "Street Lighting",
    ];
    for (text, category) in SAMPLES.iter().zip(expected) {
        assert_eq!(c.classify(Some(text)).category, category, "text: {text:?}");
    }
}

#[test]
fn main_street_example() {
    let result = Classifier::builtin()
        .classify(Some("There is a dangerous pothole on Main Street, urgent repair needed"));
    let roads = result.scores.get("Roads").expect("roads score");
    assert!(result
        .scores
        .iter()
        .filter(|(name, _)| *name != "Roads")
        .all(|(_, score)| score < roads));
}

#[test]
fn suggestions_invariants() {
    let c = Classifier::builtin();
    for text in SAMPLES {
        let suggestions = c.suggestions(Some(text));
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
        assert!(suggestions.iter().all(|s| s.score > 0));
        assert!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));

        let result = c.classify(Some(text));
        if let Some(first) = suggestions.first() {
            assert_eq!(first.category, result.category);
        } else {
            assert!(result.is_other());
        }
    }
}

#[test]
fn tie_break_in_classify_and_suggestions() {
    let table = CategoryTable::new(vec![
        CategorySpec::new("Noise", &[("loud", 3), ("music", 1)]),
        CategorySpec::new("Parks", &[("park", 4)]),
        CategorySpec::new("Animals", &[("dog", 4)]),
    ])
    .expect("table");
    let c = Classifier::new(Arc::new(table));

    // Noise 4, Parks 4, Animals 4
    let text = "loud music in the park, dog barking";
    let result = c.classify(Some(text));
    assert_eq!(result.category, "Noise");
    assert_eq!(result.confidence, 33.3);

    let names: Vec<String> = c
        .suggestions(Some(text))
        .into_iter()
        .map(|s| s.category)
        .collect();
    assert_eq!(names, ["Noise", "Parks", "Animals"]);
}

#[test]
fn shared_classifier_across_threads() {
    let c = Arc::new(Classifier::builtin());
    let expected = c.classify(Some(SAMPLES[0]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let c = Arc::clone(&c);
            std::thread::spawn(move || c.classify(Some(SAMPLES[0])))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread"), expected);
    }
}
