use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::render::backend::FrameRGBA;

/// Paints each card a gray level derived from its body length.
struct FlatRenderer;

impl CardRenderer for FlatRenderer {
    fn render_card(&mut self, card: &Card) -> PoemcardResult<FrameRGBA> {
        let v = (card.body_text.len() % 256) as u8;
        Ok(FrameRGBA::filled(8, 10, [v, v, v, 255]))
    }
}

struct FailOn(&'static str);

impl CardRenderer for FailOn {
    fn render_card(&mut self, card: &Card) -> PoemcardResult<FrameRGBA> {
        if card.body_text == self.0 {
            return Err(PoemcardError::rasterization("surface lost"));
        }
        Ok(FrameRGBA::filled(2, 2, [0, 0, 0, 255]))
    }
}

fn cards(bodies: &[&str]) -> Vec<Card> {
    let n = bodies.len();
    bodies
        .iter()
        .enumerate()
        .map(|(i, b)| Card {
            date: "2026. 01. 06".to_string(),
            title: "T".to_string(),
            author: "A".to_string(),
            body_text: b.to_string(),
            footer_label: crate::compose::card::footer_label(i, n),
        })
        .collect()
}

fn parallel(threads: usize) -> ExportThreading {
    ExportThreading {
        parallel: true,
        threads: Some(threads),
    }
}

#[test]
fn one_card_exports_a_single_png() {
    let out = export_cards(
        &cards(&["only"]),
        "2026-01-06",
        || Ok(FlatRenderer),
        &ExportThreading::default(),
    )
    .unwrap();
    let ExportOutput::Single(a) = out else {
        panic!("expected single artifact");
    };
    assert_eq!(a.filename, "2026_01_06.png");
    assert_eq!(&a.image_bytes[..4], b"\x89PNG");
}

#[test]
fn several_cards_are_bundled_in_order() {
    let out = export_cards(
        &cards(&["a", "bb"]),
        "2026-01-06",
        || Ok(FlatRenderer),
        &ExportThreading::default(),
    )
    .unwrap();
    assert_eq!(out.filename(), "2026_01_06_poems.zip");
    let ExportOutput::Bundle { entries, .. } = out else {
        panic!("expected bundle");
    };
    assert_eq!(entries, vec!["2026_01_06 (1).png", "2026_01_06 (2).png"]);
}

#[test]
fn parallel_export_matches_sequential_bytes() {
    let bodies: Vec<String> = (0..9).map(|i| "x".repeat(i * 7)).collect();
    let refs: Vec<&str> = bodies.iter().map(String::as_str).collect();
    let cs = cards(&refs);

    let seq = export_cards(&cs, "2026-01-06", || Ok(FlatRenderer), &ExportThreading::default())
        .unwrap();
    let par = export_cards(&cs, "2026-01-06", || Ok(FlatRenderer), &parallel(3)).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn parallel_builds_at_most_one_renderer_per_worker_split() {
    let made = AtomicUsize::new(0);
    let cs = cards(&["a", "b", "c", "d", "e", "f"]);
    export_cards(
        &cs,
        "2026-01-06",
        || {
            made.fetch_add(1, Ordering::SeqCst);
            Ok(FlatRenderer)
        },
        &parallel(2),
    )
    .unwrap();
    let n = made.load(Ordering::SeqCst);
    assert!((1..=cs.len()).contains(&n), "made {n} renderers");
}

#[test]
fn any_render_failure_fails_the_export() {
    for threading in [ExportThreading::default(), parallel(2)] {
        let err = export_cards(
            &cards(&["a", "boom", "c"]),
            "2026-01-06",
            || Ok(FailOn("boom")),
            &threading,
        )
        .unwrap_err();
        assert!(matches!(err, PoemcardError::Rasterization(_)));
    }
}

#[test]
fn renderer_setup_failure_is_reported() {
    let err = export_cards(
        &cards(&["a"]),
        "2026-01-06",
        || -> PoemcardResult<FlatRenderer> { Err(PoemcardError::measurement("no font")) },
        &ExportThreading::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PoemcardError::Measurement(_)));
}

#[test]
fn zero_cards_is_a_validation_error() {
    let err = export_cards(&[], "2026-01-06", || Ok(FlatRenderer), &ExportThreading::default())
        .unwrap_err();
    assert!(matches!(err, PoemcardError::Validation(_)));
}

#[test]
fn zero_threads_is_rejected() {
    let err = export_cards(
        &cards(&["a", "b"]),
        "2026-01-06",
        || Ok(FlatRenderer),
        &parallel(0),
    )
    .unwrap_err();
    assert!(matches!(err, PoemcardError::Validation(_)));
}

#[test]
fn invalid_date_still_exports() {
    let out = export_cards(
        &cards(&["x"]),
        "invalid",
        || Ok(FlatRenderer),
        &ExportThreading::default(),
    )
    .unwrap();
    assert_eq!(out.filename(), "invalid.png");
}
