use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ratatui::{Terminal, backend::TestBackend};
use tui_greeting::internal::ui::greeting;

fn benchmark_fragment(c: &mut Criterion) {
    c.bench_function("greeting fragment", |b| {
        b.iter(|| black_box(greeting::fragment()))
    });

    c.bench_function("greeting line_box_rows", |b| {
        b.iter(|| greeting::line_box_rows(black_box(greeting::GREETING_POINT_SIZE)))
    });
}

fn benchmark_preview_draw(c: &mut Criterion) {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();

    c.bench_function("greeting preview draw 80x24", |b| {
        b.iter(|| {
            terminal.draw(|f| greeting::preview(f)).unwrap();
        })
    });
}

criterion_group!(benches, benchmark_fragment, benchmark_preview_draw);
criterion_main!(benches);
