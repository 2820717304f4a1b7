//! Benchmarks for the keystroke path and frame drawing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mdpreview::app::{App, Message, update};
use mdpreview::ui::render;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn bench_keystroke(c: &mut Criterion) {
    let app = App::new();
    c.bench_function("keystroke_update", |b| {
        b.iter_batched(
            || app.initial_model(120, 40, 0),
            |model| update(model, Message::EditorInsertChar(black_box('x'))),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_draw_split(c: &mut Criterion) {
    let model = App::new().initial_model(120, 40, 0);
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    c.bench_function("draw_split", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| render(black_box(&model), frame))
                .unwrap();
        });
    });
}

fn bench_visible_lines(c: &mut Criterion) {
    let model = App::new().initial_model(120, 40, 0);
    c.bench_function("visible_lines", |b| {
        b.iter(|| model.document.visible_lines(black_box(0), black_box(39)).len())
    });
}

criterion_group!(benches, bench_keystroke, bench_draw_split, bench_visible_lines);
criterion_main!(benches);
