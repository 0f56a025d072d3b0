use criterion::{criterion_group, criterion_main, Criterion};
use rank_core::{JobCriteria, Ranker};

fn synthetic_resumes(n: usize) -> Vec<String> {
    let skills = ["python", "java", "sql", "rust", "cloud", "kubernetes", "design", "communication"];
    (0..n)
        .map(|i| {
            let mut text = format!("Candidate {i}\ncandidate{i}@example.com\n");
            for j in 0..200 {
                text.push_str(skills[(i + j * 7) % skills.len()]);
                text.push_str(if j % 11 == 0 { ".\n" } else { " " });
            }
            text
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let job = JobCriteria::new("Software Engineer", "2-5 years", vec!["Python".into(), "SQL".into(), "Cloud Computing".into()]);
    let query = job.to_query();
    let resumes = synthetic_resumes(50);
    let ranker = Ranker::default();
    c.bench_function("rank_50_resumes", |b| b.iter(|| ranker.rank(&query, &resumes)));
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
