mod common;

use common::assert_approx;
use docxside_reflow::{
    FallbackMeasurer, FontMeasurer, Line, Run, TextMeasurer, TextRun, TextTransform,
    estimate_line_height, transformed_slice,
};

fn run_with(text: &str, transform: TextTransform) -> TextRun {
    TextRun {
        text_transform: transform,
        ..TextRun::new(text, "Arial", 10.0)
    }
}

#[test]
fn fallback_is_six_tenths_of_an_em() {
    let run = TextRun::new("abcd", "Arial", 20.0);
    assert_approx(FallbackMeasurer.measure_slice(&run, 0, 4), 48.0);
    assert_approx(FallbackMeasurer.measure_slice(&run, 1, 3), 24.0);
    assert_eq!(FallbackMeasurer.measure_slice(&run, 3, 3), 0.0);
}

#[test]
fn fallback_clamps_out_of_range_slices() {
    let run = TextRun::new("abc", "Arial", 10.0);
    assert_approx(FallbackMeasurer.measure_slice(&run, 1, 99), 12.0);
    assert_eq!(FallbackMeasurer.measure_slice(&run, 5, 9), 0.0);
    assert_eq!(FallbackMeasurer.measure_slice(&run, 2, 1), 0.0);
}

#[test]
fn invalid_font_size_uses_the_default() {
    let run = TextRun::new("ab", "Arial", f32::NAN);
    assert_approx(FallbackMeasurer.measure_slice(&run, 0, 2), 2.0 * 16.0 * 0.6);
}

#[test]
fn transforms_apply_to_the_displayed_text_only() {
    let upper = run_with("straße", TextTransform::Uppercase);
    assert_eq!(transformed_slice(&upper, 0, 6), "STRASSE");
    // Uppercasing can add characters, and the fallback width follows them.
    assert_approx(FallbackMeasurer.measure_slice(&upper, 0, 6), 7.0 * 6.0);
    assert_eq!(upper.text, "straße");

    let lower = run_with("MiXeD", TextTransform::Lowercase);
    assert_eq!(transformed_slice(&lower, 1, 4), "ixe");
}

#[test]
fn capitalize_sees_across_slice_boundaries() {
    let run = run_with("hello world, it's fine", TextTransform::Capitalize);
    assert_eq!(transformed_slice(&run, 0, 22), "Hello World, It's Fine");
    // "llo" continues a word, "w" starts one.
    assert_eq!(transformed_slice(&run, 2, 5), "llo");
    assert_eq!(transformed_slice(&run, 6, 8), "Wo");
}

#[test]
fn unknown_font_measures_like_the_fallback() {
    let dir = std::env::temp_dir().join("docxside-reflow-no-fonts");
    std::fs::create_dir_all(&dir).unwrap();
    let measurer = FontMeasurer::with_font_dirs([dir]);
    let run = TextRun::new("Sample text", "Definitely Not Installed Sans", 12.0);

    for (from, to) in [(0, 11), (0, 6), (7, 11)] {
        assert_approx(
            measurer.measure_slice(&run, from, to),
            FallbackMeasurer.measure_slice(&run, from, to),
        );
    }
}

#[test]
fn font_lists_use_the_first_family() {
    let measurer = FontMeasurer::new();
    let run = TextRun::new("abc", "Definitely Not Installed Sans; Arial", 10.0);
    assert_approx(measurer.measure_slice(&run, 0, 3), 18.0);
}

#[test]
fn line_height_ignores_invalid_sizes() {
    let runs = vec![
        Run::text("a", "Arial", 0.0),
        Run::Tab,
        Run::text("b", "Arial", f32::NAN),
    ];
    let line = Line {
        from_run: 0,
        from_char: 0,
        to_run: 2,
        to_char: 1,
        width: 0.0,
        line_height: 0.0,
        max_width: 100.0,
        segments: None,
        leaders: None,
    };
    assert_approx(estimate_line_height(&runs, &line), 19.2);
}

#[test]
fn line_height_excludes_runs_the_line_does_not_reach() {
    let runs = vec![Run::text("ab", "Arial", 10.0), Run::text("cd", "Arial", 30.0)];
    let ends_at_boundary = Line {
        from_run: 0,
        from_char: 0,
        to_run: 1,
        to_char: 0,
        width: 0.0,
        line_height: 0.0,
        max_width: 100.0,
        segments: None,
        leaders: None,
    };
    assert_approx(estimate_line_height(&runs, &ends_at_boundary), 12.0);

    let spans_both = Line { to_char: 1, ..ends_at_boundary };
    assert_approx(estimate_line_height(&runs, &spans_both), 36.0);
}

#[test]
fn single_characters_measure_like_their_slice() {
    let text = "abcd ".repeat(2000) + "word";
    let last = text.chars().count() - 4;
    for (transform, expected) in [
        (TextTransform::None, "word"),
        (TextTransform::Capitalize, "Word"),
        (TextTransform::Uppercase, "WORD"),
    ] {
        let run = run_with(&text, transform);
        assert_eq!(transformed_slice(&run, last, last + 4), expected);
        assert_eq!(transformed_slice(&run, last + 1, last + 4), &expected[1..]);

        let chars: Vec<char> = text.chars().collect();
        for i in last - 1..chars.len() {
            assert_approx(
                FallbackMeasurer.measure_char(&run, i, chars[i], Some(chars[i - 1])),
                FallbackMeasurer.measure_slice(&run, i, i + 1),
            );
        }
    }
}
