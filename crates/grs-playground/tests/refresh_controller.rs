use grs_playground::{
    AnalysisConfig, AnalysisEngine, ByteRange, Diagnostic, DisplayPosition, MemorySurface,
    OverlayChangeKind, PlaygroundError, RefreshController, RefreshOptions, RefreshPhase,
    RenderMode, RuleKind, TextVersion, Token, scan_with_settings,
};
use std::sync::{Arc, Mutex};

/// Reports one diagnostic per whitespace-separated word and one token per word.
#[derive(Default)]
struct WordEngine {
    configs: Mutex<Vec<AnalysisConfig>>,
}

fn words(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                out.push((s, &text[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, &text[s..]));
    }
    out
}

impl AnalysisEngine for WordEngine {
    fn scan(&self, text: &str, config: &AnalysisConfig) -> Vec<Diagnostic> {
        self.configs.lock().unwrap().push(config.clone());
        words(text)
            .into_iter()
            .map(|(start, word)| {
                Diagnostic::new(RuleKind::DuplicatedWord, start, start + word.len())
            })
            .filter(|d| config.is_enabled(d.kind))
            .collect()
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        words(text)
            .into_iter()
            .enumerate()
            .map(|(index, (start, word))| Token {
                text: word.to_string(),
                whitespace: String::new(),
                index,
                start,
                end: start + word.len(),
                punct: false,
                greek: true,
            })
            .collect()
    }

    fn normalize(&self, text: &str) -> String {
        text.to_uppercase()
    }
}

/// Reports a fixed list of diagnostics regardless of input.
struct FixedEngine(Vec<Diagnostic>);

impl AnalysisEngine for FixedEngine {
    fn scan(&self, _text: &str, _config: &AnalysisConfig) -> Vec<Diagnostic> {
        self.0.clone()
    }

    fn tokenize(&self, _text: &str) -> Vec<Token> {
        Vec::new()
    }

    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}

#[test]
fn test_marker_batch_replaces_previous_batch() {
    let mut controller = RefreshController::new(WordEngine::default(), MemorySurface::new());

    controller.on_text_changed("ένα δύο τρία").unwrap();
    assert_eq!(controller.surface().markers("owner").len(), 3);

    controller.on_text_changed("τέσσερα").unwrap();
    let markers = controller.surface().markers("owner");
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].start, DisplayPosition::new(0, 0));
    assert_eq!(markers[0].end, DisplayPosition::new(0, 7));
    assert_eq!(controller.surface().marker_count(), 1);
    assert_eq!(controller.surface().marker_batches(), 2);
    assert_eq!(controller.overlay().markers(), markers);
}

#[test]
fn test_stale_result_is_dropped() {
    let mut controller = RefreshController::new(WordEngine::default(), MemorySurface::new());

    let first = controller.request_text("πρώτο κείμενο");
    let second = controller.request_text("δεύτερο");
    assert_eq!(first.version(), TextVersion(1));
    assert_eq!(second.version(), TextVersion(2));
    assert_eq!(controller.phase(), RefreshPhase::Analyzing);

    let first_outcome = controller.analyze(&first);
    let second_outcome = controller.analyze(&second);

    // Version 2 resolves first, version 1 afterwards.
    assert_eq!(controller.apply(second_outcome).unwrap(), TextVersion(2));
    assert_eq!(controller.phase(), RefreshPhase::Idle);

    let err = controller.apply(first_outcome).unwrap_err();
    assert!(matches!(
        err,
        PlaygroundError::StaleResult {
            version: TextVersion(1),
            latest: TextVersion(2)
        }
    ));

    assert_eq!(controller.overlay().applied_version(), Some(TextVersion(2)));
    assert_eq!(controller.overlay().text(), "δεύτερο");
    assert_eq!(controller.surface().markers("owner").len(), 1);
    assert_eq!(controller.phase(), RefreshPhase::Idle);
}

#[test]
fn test_older_result_arriving_first_is_dropped_too() {
    let mut controller = RefreshController::new(WordEngine::default(), MemorySurface::new());

    let first = controller.request_text("α β γ");
    let first_outcome = controller.analyze(&first);
    let second = controller.request_text("δ");

    assert!(controller.apply(first_outcome).is_err());
    // Still waiting for version 2; nothing was drawn.
    assert_eq!(controller.phase(), RefreshPhase::Analyzing);
    assert_eq!(controller.overlay().applied_version(), None);
    assert_eq!(controller.surface().marker_batches(), 0);

    let second_outcome = controller.analyze(&second);
    controller.apply(second_outcome.clone()).unwrap();
    assert_eq!(controller.surface().markers("owner").len(), 1);

    // Applying the same outcome twice is a no-op.
    assert!(controller.apply(second_outcome).is_err());
    assert_eq!(controller.surface().marker_batches(), 1);
}

#[test]
fn test_invalid_diagnostic_does_not_blank_overlay() {
    let text = "λάθος λέξη";
    let engine = FixedEngine(vec![
        Diagnostic::new(RuleKind::MixedScripts, 1, 4),
        Diagnostic::new(RuleKind::DuplicatedWord, 11, 19),
        Diagnostic::new(RuleKind::AmbiguousChar, 0, 400),
    ]);
    let options = RefreshOptions {
        render_mode: RenderMode::Both,
        ..RefreshOptions::default()
    };
    let mut controller = RefreshController::with_options(engine, MemorySurface::new(), options);
    controller.on_text_changed(text).unwrap();

    assert_eq!(controller.overlay().diagnostics().len(), 1);
    let markers = controller.surface().markers("owner");
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].start, DisplayPosition::new(0, 6));
    assert_eq!(markers[0].end, DisplayPosition::new(0, 10));
    assert_eq!(
        controller.surface().inline_html(),
        Some("λάθος <span class='underline' title='duplicated_word'>λέξη</span>")
    );
}

#[test]
fn test_inline_mode_leaves_markers_alone() {
    let options = RefreshOptions {
        render_mode: RenderMode::InlineSpans,
        marker_owner: "grs".to_string(),
    };
    let mut controller =
        RefreshController::with_options(WordEngine::default(), MemorySurface::new(), options);
    controller.on_text_changed("α\nβ").unwrap();

    assert_eq!(controller.surface().marker_batches(), 0);
    assert_eq!(
        controller.surface().inline_html(),
        Some(
            "<span class='underline' title='duplicated_word'>α</span><br>\
             <span class='underline' title='duplicated_word'>β</span>"
        )
    );
}

#[test]
fn test_token_table_and_lookup() {
    let mut controller = RefreshController::new(WordEngine::default(), MemorySurface::new());
    controller.on_text_changed("καλή μέρα").unwrap();

    assert_eq!(
        controller.surface().token_table(),
        "\"καλή\", \"\", 0..8\n\"μέρα\", \"\", 9..17"
    );
    assert_eq!(controller.surface().decorations().len(), 2);

    // `"μέρα", "", ` is 12 code units.
    assert_eq!(
        controller.lookup_byte_range(DisplayPosition::new(1, 12)),
        Some(ByteRange::new(9, 17))
    );
    assert_eq!(controller.lookup_byte_range(DisplayPosition::new(1, 3)), None);

    controller.on_text_changed("νέο").unwrap();
    assert_eq!(controller.surface().decorations().len(), 1);
    assert_eq!(controller.lookup_byte_range(DisplayPosition::new(1, 12)), None);
    assert_eq!(
        controller.lookup_byte_range(DisplayPosition::new(0, 11)),
        Some(ByteRange::new(0, 6))
    );
}

#[test]
fn test_settings_change_rerenders_current_text() {
    let mut controller = RefreshController::new(WordEngine::default(), MemorySurface::new());
    controller.on_text_changed("ένα δύο").unwrap();
    assert_eq!(controller.surface().markers("owner").len(), 2);

    controller
        .on_settings_changed(Some(r#"{"rules": ["mixed_scripts"]}"#))
        .unwrap();
    assert_eq!(controller.latest_requested(), TextVersion(2));
    assert!(controller.surface().markers("owner").is_empty());
    assert_eq!(controller.text(), "ένα δύο");

    controller.on_settings_changed(Some("{not json")).unwrap();
    assert_eq!(controller.surface().markers("owner").len(), 2);

    let configs = controller.engine().configs.lock().unwrap();
    assert_eq!(configs.len(), 3);
    assert_eq!(configs[2], AnalysisConfig::default());
}

#[test]
fn test_malformed_settings_scan_like_no_settings() {
    let engine = WordEngine::default();
    let text = "κάτι εδώ";
    assert_eq!(
        scan_with_settings(&engine, text, Some("{not json")),
        scan_with_settings(&engine, text, None)
    );
}

#[test]
fn test_notifications_and_close() {
    let mut controller = RefreshController::new(WordEngine::default(), MemorySurface::new());

    let seen = Arc::new(Mutex::new(Vec::<(OverlayChangeKind, TextVersion)>::new()));
    let seen_clone = Arc::clone(&seen);
    controller.subscribe(move |change| {
        seen_clone
            .lock()
            .unwrap()
            .push((change.kind, change.version));
    });

    let stale = controller.request_text("α");
    let stale_outcome = controller.analyze(&stale);
    controller.on_text_changed("β").unwrap();
    let _ = controller.apply(stale_outcome);

    assert_eq!(controller.normalize_text("αβ"), "ΑΒ");

    let surface = controller.close();
    assert_eq!(surface.marker_count(), 0);
    assert_eq!(surface.token_table(), "");
    assert!(surface.decorations().is_empty());

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            (OverlayChangeKind::MarkersReplaced, TextVersion(2)),
            (OverlayChangeKind::TokenTableReplaced, TextVersion(2)),
            (OverlayChangeKind::StaleDropped, TextVersion(1)),
            (OverlayChangeKind::Cleared, TextVersion(2)),
        ]
    );
}
