use super::*;
use crate::foundation::error::PoemcardError;
use crate::text::metrics::FixedLineMetrics;

const FONT: FontSpec = FontSpec::new(36.0, 2.0);
const H: f32 = 72.0;

fn contents(pages: &[Page]) -> Vec<&str> {
    pages.iter().map(|p| p.content.as_str()).collect()
}

fn numbered_lines(n: usize) -> String {
    (1..=n)
        .map(|i| format!("line{i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn two_short_lines_fit_one_page() {
    let mut m = FixedLineMetrics::new(H);
    let pages = paginate("line1\nline2", 10.0 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].content, "line1\nline2");
    assert_eq!(pages[0].index, 0);
    assert_eq!(pages[0].total_pages, 1);
}

#[test]
fn greedy_packing_fills_pages_forward() {
    let body = numbered_lines(10);
    let mut m = FixedLineMetrics::new(H);
    let pages = paginate(&body, 3.5 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(
        contents(&pages),
        vec![
            "line1\nline2\nline3",
            "line4\nline5\nline6",
            "line7\nline8\nline9",
            "line10",
        ]
    );
    assert!(pages.iter().all(|p| p.total_pages == 4));
    assert_eq!(
        pages.iter().map(|p| p.index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn exact_fit_stays_on_the_page() {
    let body = numbered_lines(6);
    let mut m = FixedLineMetrics::new(H);
    let pages = paginate(&body, 3.0 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].content, "line4\nline5\nline6");
}

#[test]
fn overlong_line_gets_its_own_page() {
    // 40 columns per row: the middle line wraps to 5 rows on a 3-row budget.
    let long = "x".repeat(200);
    let body = format!("before\n{long}\nafter");
    let mut m = FixedLineMetrics::new(H).with_wrap_columns(40);
    let pages = paginate(&body, 3.0 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(contents(&pages), vec!["before", long.as_str(), "after"]);
}

#[test]
fn overlong_first_line_is_kept() {
    let mut m = FixedLineMetrics::new(H);
    let pages = paginate("only", 0.5 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(contents(&pages), vec!["only"]);
}

#[test]
fn empty_body_has_no_pages() {
    let mut m = FixedLineMetrics::new(H);
    assert!(paginate("", 10.0 * H, 880.0, &FONT, &mut m).unwrap().is_empty());
}

#[test]
fn blank_lines_are_paginated_like_any_other() {
    let mut m = FixedLineMetrics::new(H);
    let pages = paginate("\n\n\n\n", 2.0 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(contents(&pages), vec!["\n", "\n", ""]);
    let joined = contents(&pages).join("\n");
    assert_eq!(joined, "\n\n\n\n");
}

#[test]
fn trailing_newline_survives_the_split() {
    let body = "a\nb\nc\n";
    let mut m = FixedLineMetrics::new(H);
    let pages = paginate(body, 2.0 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(contents(&pages), vec!["a\nb", "c\n"]);
    assert_eq!(contents(&pages).join("\n"), body);
}

#[test]
fn carriage_returns_stay_inside_lines() {
    let body = "a\r\nb\r\nc";
    let mut m = FixedLineMetrics::new(H);
    let pages = paginate(body, 2.0 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(contents(&pages), vec!["a\r\nb\r", "c"]);
}

#[test]
fn pagination_is_idempotent() {
    let body = numbered_lines(17);
    let mut m = FixedLineMetrics::new(H).with_wrap_columns(3);
    let a = paginate(&body, 5.0 * H, 880.0, &FONT, &mut m).unwrap();
    let b = paginate(&body, 5.0 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(a, b);
}

struct CountingMetrics {
    inner: FixedLineMetrics,
    calls: usize,
}

impl TextMetrics for CountingMetrics {
    fn measure_height(&mut self, text: &str, width: f32, font: &FontSpec) -> PoemcardResult<f32> {
        self.calls += 1;
        self.inner.measure_height(text, width, font)
    }
}

#[test]
fn one_measurement_per_line_plus_one_per_break() {
    let body = numbered_lines(10);
    let mut m = CountingMetrics {
        inner: FixedLineMetrics::new(H),
        calls: 0,
    };
    let pages = paginate(&body, 3.5 * H, 880.0, &FONT, &mut m).unwrap();
    assert_eq!(m.calls, 10 + (pages.len() - 1));
}

struct FailingMetrics;

impl TextMetrics for FailingMetrics {
    fn measure_height(&mut self, _: &str, _: f32, _: &FontSpec) -> PoemcardResult<f32> {
        Err(PoemcardError::measurement("layout surface unavailable"))
    }
}

#[test]
fn measurement_failures_propagate() {
    let err = paginate("a\nb", 100.0, 880.0, &FONT, &mut FailingMetrics).unwrap_err();
    assert!(matches!(err, PoemcardError::Measurement(_)));
}
