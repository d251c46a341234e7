use criterion::{black_box, criterion_group, criterion_main, Criterion};
use truthlens::pipelines::text_classification::clean_text;

const ARTICLE: &str = "WASHINGTON (Reuters) - The head of a conservative Republican faction in \
the U.S. Congress, who voted this month for a huge expansion of the national debt to pay for tax \
cuts, called himself a \"fiscal conservative\" on Sunday and urged budget restraint in 2018. \
Read more at https://www.reuters.com/article/us-usa-budget and www.example.com/news!";

fn bench_clean_text(c: &mut Criterion) {
    c.bench_function("clean_text", |b| b.iter(|| clean_text(black_box(ARTICLE))));
}

criterion_group!(benches, bench_clean_text);
criterion_main!(benches);
