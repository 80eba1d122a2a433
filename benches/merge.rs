use corsheaders::dispatcher::{HandlerResponse, HeaderVec};
use corsheaders::middleware::cors::{apply_config, merge_header_values, CorsBuilder, CorsConfig};
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::Value;
use std::hint::black_box;

fn bench_merge(c: &mut Criterion) {
    let existing = ["GET, POST,PUT", "DELETE"];
    c.bench_function("merge_header_values", |b| {
        b.iter(|| {
            merge_header_values(
                black_box(existing.iter().copied()),
                black_box("OPTIONS,GET,HEAD,PATCH"),
            )
        })
    });
}

fn bench_apply(c: &mut Criterion) {
    let default_set = CorsConfig::default_set();
    c.bench_function("apply_default_set", |b| {
        b.iter(|| {
            let mut res = HandlerResponse::new(200, HeaderVec::new(), Value::Null);
            apply_config(black_box(&default_set), &mut res);
            res
        })
    });

    let appending = CorsBuilder::builder()
        .append_allow_methods("GET,POST,OPTIONS")
        .append_allow_headers("Origin,Accept,Content-Type")
        .finish()
        .unwrap();
    c.bench_function("apply_appending_existing", |b| {
        b.iter(|| {
            let mut res = HandlerResponse::new(200, HeaderVec::new(), Value::Null);
            res.add_header("Access-Control-Allow-Methods", "GET,PUT".to_string());
            res.add_header("Access-Control-Allow-Headers", "Authorization".to_string());
            apply_config(black_box(&appending), &mut res);
            res
        })
    });
}

criterion_group!(benches, bench_merge, bench_apply);
criterion_main!(benches);
