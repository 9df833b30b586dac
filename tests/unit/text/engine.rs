use super::*;
use crate::test_fonts::test_font;

const BODY: FontSpec = FontSpec::new(36.0, 2.0);

#[test]
fn garbage_bytes_are_a_measurement_error() {
    let err = LoadedFont::from_bytes(vec![0u8; 64]).unwrap_err();
    assert!(matches!(err, PoemcardError::Measurement(_)));
}

#[test]
fn missing_font_file_is_a_measurement_error() {
    let err = LoadedFont::from_path("no/such/font.ttf").unwrap_err();
    assert!(matches!(err, PoemcardError::Measurement(_)));
    assert!(err.to_string().contains("no/such/font.ttf"));
}

#[test]
fn loaded_font_exposes_family_name() {
    let Some(font) = test_font() else {
        return;
    };
    assert!(!font.family().trim().is_empty());
    let engine = TextLayoutEngine::new(&font).unwrap();
    assert_eq!(engine.family_name(), font.family());
}

#[test]
fn one_line_uses_the_configured_line_height() {
    let Some(font) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let h = engine.measure_height("a short line", 880.0, &BODY).unwrap();
    assert!((h - BODY.line_px()).abs() < 2.0, "got {h}");
}

#[test]
fn hard_breaks_add_lines() {
    let Some(font) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let one = engine.measure_height("first", 880.0, &BODY).unwrap();
    let three = engine
        .measure_height("first\nsecond\nthird", 880.0, &BODY)
        .unwrap();
    assert!((three - 3.0 * one).abs() < 3.0, "one={one} three={three}");
}

#[test]
fn narrow_width_wraps_at_word_boundaries() {
    let Some(font) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let text = "the quick brown fox jumps over the lazy dog again and again";
    let wide = engine.measure_height(text, 5000.0, &BODY).unwrap();
    let narrow = engine.measure_height(text, 200.0, &BODY).unwrap();
    assert!(narrow > wide * 2.0, "wide={wide} narrow={narrow}");
}

#[test]
fn single_long_word_is_never_split() {
    let Some(font) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let word = "incomprehensibilities".repeat(3);
    let one = engine.measure_height("x", 120.0, &BODY).unwrap();
    let long = engine.measure_height(&word, 120.0, &BODY).unwrap();
    assert!((long - one).abs() < 2.0, "one={one} long={long}");
}

#[test]
fn measurement_is_repeatable() {
    let Some(font) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let text = "repeat me\nplease, with a line that is long enough to wrap at this width";
    let a = engine.measure_height(text, 300.0, &BODY).unwrap();
    let b = engine.measure_height(text, 300.0, &BODY).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rejects_zero_width() {
    let Some(font) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    assert!(engine.measure_height("x", 0.0, &BODY).is_err());
}

#[test]
fn hangul_words_are_never_split_across_lines() {
    let Some(font) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let text = "가나다라마바사 아자차카타파하";
    let layout = engine
        .layout_text(text, &BODY, TextBrushRgba8::default(), 300.0)
        .unwrap();

    let words: Vec<&str> = text.split(' ').collect();
    let lines: Vec<&str> = layout
        .lines()
        .map(|line| text[line.text_range()].trim())
        .collect();
    assert!(lines.len() >= 2, "expected a wrap, got {lines:?}");
    for line in &lines {
        for piece in line.split(' ') {
            assert!(words.contains(&piece), "line {line:?} splits a word: {lines:?}");
        }
    }
}
