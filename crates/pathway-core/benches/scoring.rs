use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pathway_core::model::{Answers, QuestionId};
use pathway_core::statistics::CohortSummary;
use pathway_core::{classify, score, AssessmentRecord, Identity, NewAssessment};

fn full_answers() -> Answers {
    let mut answers = Answers::new();
    for q in QuestionId::all() {
        answers.set(q, (q.get() % 5 + 1) as i64);
    }
    answers
}

fn make_record(id: i64) -> AssessmentRecord {
    let answers = full_answers();
    let scores = score(&answers);
    AssessmentRecord::from_new(
        id,
        NewAssessment {
            identity: Identity {
                name: format!("student-{id}"),
                school: "bench".into(),
                district: "bench".into(),
                mobile: "0".into(),
                board: "SSLC".into(),
            },
            scores,
            dominant_trait: classify(&scores).dominant_trait,
        },
        chrono::Utc::now(),
    )
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    group.bench_function("empty", |b| {
        let answers = Answers::new();
        b.iter(|| score(black_box(&answers)))
    });

    group.bench_function("complete", |b| {
        let answers = full_answers();
        b.iter(|| score(black_box(&answers)))
    });

    group.bench_function("sparse_pairs", |b| {
        let pairs: Vec<(String, i64)> = (1..=60)
            .step_by(3)
            .map(|q| (q.to_string(), 4))
            .collect();
        b.iter(|| score(&Answers::from_pairs(black_box(pairs.clone()))))
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let scores = score(&full_answers());

    group.bench_function("complete", |b| b.iter(|| classify(black_box(&scores))));

    group.finish();
}

fn bench_cohort_summary(c: &mut Criterion) {
    let records: Vec<AssessmentRecord> = (1..=1000).map(make_record).collect();

    c.bench_function("cohort_summary/1000", |b| {
        b.iter(|| CohortSummary::from_records(black_box(&records)))
    });
}

criterion_group!(benches, bench_score, bench_classify, bench_cohort_summary);
criterion_main!(benches);
