use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wordrill::generator::{ExerciseGenerator, RngShuffler};
use wordrill::session::SessionMode;
use wordrill::store::VocabularyEntry;

fn make_entries(count: usize) -> Vec<VocabularyEntry> {
    (0..count)
        .map(|i| {
            VocabularyEntry::new(&i.to_string(), &format!("word{i}"), &format!("meaning{i}"))
                .with_context(&format!("This sentence uses word{i} once."))
        })
        .collect()
}

fn bench_learning(c: &mut Criterion) {
    let entries = make_entries(200);
    let mut generator = ExerciseGenerator::new(RngShuffler::seeded(1));

    c.bench_function("generate learning (200 entries)", |b| {
        b.iter(|| generator.generate(black_box(&entries), SessionMode::Learning))
    });
}

fn bench_test(c: &mut Criterion) {
    let entries = make_entries(200);
    let mut generator = ExerciseGenerator::new(RngShuffler::seeded(2));

    c.bench_function("generate test (200 entries)", |b| {
        b.iter(|| generator.generate(black_box(&entries), SessionMode::Test))
    });
}

criterion_group!(benches, bench_learning, bench_test);
criterion_main!(benches);
