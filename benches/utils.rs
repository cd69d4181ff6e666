//! 工具函数性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quicklink::utils::{generate_random_code, is_valid_custom_code, is_valid_url};

// ============== is_valid_custom_code 基准测试 ==============

fn bench_is_valid_custom_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_custom_code");

    group.bench_function("valid_simple", |b| {
        b.iter(|| {
            assert!(is_valid_custom_code("my-link_01"));
        });
    });

    group.bench_function("valid_unicode", |b| {
        b.iter(|| {
            assert!(is_valid_custom_code("链接一二三"));
        });
    });

    group.bench_function("invalid_special_chars", |b| {
        b.iter(|| {
            assert!(!is_valid_custom_code("'; DROP--"));
        });
    });

    // 长度边界
    let max_len_code = "a".repeat(20);
    group.bench_function("valid_max_length", |b| {
        b.iter(|| {
            assert!(is_valid_custom_code(&max_len_code));
        });
    });

    let too_long_code = "a".repeat(21);
    group.bench_function("invalid_too_long", |b| {
        b.iter(|| {
            assert!(!is_valid_custom_code(&too_long_code));
        });
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [6, 8, 12, 20] {
        group.bench_with_input(BenchmarkId::new("length", length), &length, |b, &length| {
            b.iter(|| {
                let code = generate_random_code(length);
                assert_eq!(code.len(), length);
            });
        });
    }

    group.finish();
}

// ============== is_valid_url 基准测试 ==============

fn bench_is_valid_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_url");

    let urls = [
        ("https_short", "https://example.com"),
        (
            "https_long",
            "https://example.com/some/deeply/nested/path?with=query&and=more#fragment",
        ),
        ("invalid_scheme", "ftp://example.com/file"),
        ("too_short", "http://a.b"),
    ];

    for (name, url) in urls {
        group.bench_with_input(BenchmarkId::new("url", name), &url, |b, url| {
            b.iter(|| is_valid_url(url));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_is_valid_custom_code,
    bench_generate_random_code,
    bench_is_valid_url
);
criterion_main!(benches);
