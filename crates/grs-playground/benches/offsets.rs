use criterion::{Criterion, black_box, criterion_group, criterion_main};
use grs_playground::{
    Diagnostic, OffsetConverter, RuleKind, build_markers, convert_batch, render_inline_spans,
    to_display_position,
};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 96);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} Η γρήγορη καφέ αλεπού πηδάει πάνω από το τεμπέλικο σκυλί\n"
        ));
    }
    out.pop();
    out
}

/// One diagnostic per word, the way a noisy rule set reports them.
fn word_diagnostics(text: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                out.push(Diagnostic::new(RuleKind::MultisyllableNotAccented, s, i + 1));
                start = None;
            }
            _ => {}
        }
    }
    out
}

fn bench_batch_vs_single(c: &mut Criterion) {
    let text = large_text(2_000);
    let diagnostics = word_diagnostics(&text);
    let offsets: Vec<usize> = diagnostics.iter().flat_map(|d| [d.start, d.end]).collect();

    c.bench_function("offsets/batch_scan", |b| {
        b.iter(|| black_box(convert_batch(black_box(&text), &offsets)))
    });

    let converter = OffsetConverter::new(&text);
    c.bench_function("offsets/rope_lookup", |b| {
        b.iter(|| {
            for offset in &offsets {
                black_box(converter.to_display_position(*offset).ok());
            }
        })
    });

    let sample = &offsets[..200];
    c.bench_function("offsets/rescan_per_offset_200", |b| {
        b.iter(|| {
            for offset in sample {
                black_box(to_display_position(&text, *offset).ok());
            }
        })
    });
}

fn bench_renderers(c: &mut Criterion) {
    let text = large_text(2_000);
    let diagnostics = word_diagnostics(&text);

    c.bench_function("render/markers", |b| {
        b.iter(|| black_box(build_markers(&text, &diagnostics, true)))
    });
    c.bench_function("render/inline_spans", |b| {
        b.iter(|| black_box(render_inline_spans(&text, &diagnostics, true)))
    });
}

criterion_group!(benches, bench_batch_vs_single, bench_renderers);
criterion_main!(benches);
