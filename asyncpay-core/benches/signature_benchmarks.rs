//! Benchmarks for request signing and parameter encoding
//!
//! Every signed call runs one of these on the request path, so they should
//! stay negligible next to the network round trip.

use asyncpay_core::providers::params::ParameterSet;
use asyncpay_core::providers::{signature, BoolEncoding};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn order_params(extra: usize) -> ParameterSet {
    let mut params = ParameterSet::new()
        .with("shopId", 1234)
        .with("nonce", 1_700_000_000_123_456_789i64)
        .with("paymentId", "order_1700000000")
        .with("i", 6)
        .with("email", "buyer@example.com")
        .with("ip", "203.0.113.7")
        .with("amount", 1500.5)
        .with("currency", "RUB");
    for n in 0..extra {
        params.insert(format!("us_field_{n}"), format!("value-{n}"));
    }
    params
}

fn bench_digest_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest_templates");

    group.bench_function("aaio_sha256", |b| {
        b.iter(|| {
            signature::aaio(
                black_box("42"),
                black_box("1500.5"),
                black_box("RUB"),
                black_box("secret-key"),
                black_box("order_1700000000"),
            )
        })
    });

    group.bench_function("apays_md5", |b| {
        b.iter(|| signature::apays(black_box("order_1"), Some(black_box("150000")), black_box("secret")))
    });

    group.bench_function("crystalpay_sha1", |b| {
        b.iter(|| {
            signature::crystalpay_payoff(
                black_box("100.0"),
                black_box("BITCOIN"),
                black_box("bc1qexamplewallet"),
                black_box("salt"),
            )
        })
    });

    group.bench_function("payok_md5", |b| {
        b.iter(|| {
            signature::payok(
                black_box("100.0"),
                black_box("order1"),
                black_box("42"),
                black_box("RUB"),
                black_box("Order"),
                black_box("secret"),
            )
        })
    });

    group.finish();
}

fn bench_cryptomus_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("cryptomus_body");

    for size in [0usize, 8, 64] {
        let body = order_params(size).to_json_string();
        group.bench_with_input(BenchmarkId::from_parameter(size), &body, |b, body| {
            b.iter(|| signature::cryptomus(black_box(body), black_box("payment-key")))
        });
    }

    group.finish();
}

fn bench_freekassa_hmac(c: &mut Criterion) {
    let mut group = c.benchmark_group("freekassa_hmac");

    for size in [0usize, 8, 64] {
        let params = order_params(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &params, |b, params| {
            b.iter(|| signature::freekassa(black_box(params), black_box("api-key")))
        });
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    let params = order_params(16);

    group.bench_function("form_pairs", |b| {
        b.iter(|| black_box(&params).to_pairs(BoolEncoding::Lowercase))
    });

    group.bench_function("json_string", |b| {
        b.iter(|| black_box(&params).to_json_string())
    });

    group.bench_function("query_string", |b| {
        b.iter(|| black_box(&params).to_query_string(BoolEncoding::Numeric))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_digest_templates,
    bench_cryptomus_body,
    bench_freekassa_hmac,
    bench_encoding
);
criterion_main!(benches);
