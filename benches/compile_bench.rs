use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xnilang::{compile_source, CompileOptions, Pipeline, PipelineOptions, Scanner};

const SCENE: &str = r#"
    (define ball ((area.circle (0 0) 5) (circle (0 0) 7)))
    (define wall ((area.square (0 0) 4 40) (line (-2 -20) (-2 20))))
    (define mark ((path ((0 0) (3 0) (3 3) (0 3)))))
    (place wall (100 50))
    (place ball (10 50))
    (loop 40 ((shift ball right) (shift ball up)))
    (place mark (0 0))
    (loop 20 ((shift mark down) (erase ball) (place ball (10 50))))
"#;

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize scene", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(SCENE));
            scanner.scan_tokens().unwrap()
        })
    });
}

fn compile_benchmark(c: &mut Criterion) {
    let options = CompileOptions::default();
    c.bench_function("compile scene to script", |b| {
        b.iter(|| compile_source(black_box(SCENE), &options).unwrap())
    });
}

fn batch_benchmark(c: &mut Criterion) {
    let pipeline = Pipeline::new(PipelineOptions::default()).unwrap();
    let sources = vec![SCENE; 16];
    c.bench_function("compile 16 scenes in parallel", |b| {
        b.iter(|| pipeline.run_batch(black_box(&sources)).unwrap())
    });
}

criterion_group!(benches, lexer_benchmark, compile_benchmark, batch_benchmark);
criterion_main!(benches);
