//! 设备识别与链接 id 生成基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lessonlinker::services::{DeviceClassifier, WootheeClassifier};
use lessonlinker::utils::generate_link_id;

const USER_AGENTS: &[(&str, &str)] = &[
    (
        "iphone",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1",
    ),
    (
        "android_tablet",
        "Mozilla/5.0 (Linux; Android 12; SM-X700) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36",
    ),
    (
        "desktop_chrome",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "smart_tv",
        "Mozilla/5.0 (SMART-TV; Linux; Tizen 6.0) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/4.0 Chrome/76.0.3809.146 TV Safari/537.36",
    ),
];

fn bench_classify(c: &mut Criterion) {
    let classifier = WootheeClassifier::new();
    let mut group = c.benchmark_group("device_classifier/classify");

    for (name, ua) in USER_AGENTS {
        group.bench_with_input(BenchmarkId::from_parameter(name), ua, |b, ua| {
            b.iter(|| classifier.classify(ua));
        });
    }

    group.finish();
}

fn bench_generate_link_id(c: &mut Criterion) {
    c.bench_function("utils/generate_link_id", |b| {
        b.iter(generate_link_id);
    });
}

criterion_group!(benches, bench_classify, bench_generate_link_id);
criterion_main!(benches);
