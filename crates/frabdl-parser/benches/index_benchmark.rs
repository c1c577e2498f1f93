//! Benchmarks for frabdl-parser.
//!
//! Run with: cargo bench -p frabdl-parser

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use frabdl_common::TalkId;
use frabdl_parser::{build_index, decode, to_canonical, LanguageSelector};

const SAMPLES: &[&str] = &[
    "33c3-8414-deu-eng-Kampf_dem_Abmahnunwesen_hd.mp4",
    "32c3-7550-de-Grundrechte_gelten_nicht_im_Weltall_hd.mp4",
    "34c3-9270-deu-eng-fra-Die_Sprache_der_Maschinen_hd.mp4",
    "36c3-10496-deu-eng-opening-Ceremony_hd.mp4",
];

const PREFIX: &str = "https://cdn.media.example/congress/2016";

/// A listing page of `talks` talks with three language variants each.
fn synthetic_listing(talks: u64) -> Vec<String> {
    (0..talks)
        .flat_map(|id| {
            ["deu", "eng", "deu-eng"]
                .into_iter()
                .map(move |langs| format!("33c3-{}-{}-Talk_Number_{}_hd.mp4", 8000 + id, langs, id))
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for code in ["de", "deu", "chi", "special"] {
        group.bench_with_input(BenchmarkId::new("to_canonical", code), code, |b, code| {
            b.iter(|| to_canonical(black_box(code)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(SAMPLES.len() as u64));
    group.bench_function("samples", |b| {
        b.iter(|| {
            for sample in SAMPLES {
                let _ = decode(black_box(sample), "https://cdn.media.example/h264-hd/");
            }
        })
    });
    group.finish();
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");
    for talks in [50u64, 200, 800] {
        let links = synthetic_listing(talks);
        group.throughput(Throughput::Elements(links.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(talks), &links, |b, links| {
            b.iter(|| build_index(PREFIX, "h264-hd", black_box(links), false))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let links = synthetic_listing(800);
    let Ok(index) = build_index(PREFIX, "h264-hd", &links, true) else {
        return;
    };
    let selector: LanguageSelector = "+eng".parse().unwrap_or_default();
    let id = TalkId::from(8400);

    c.bench_function("get_url_best", |b| {
        b.iter(|| index.get_url(black_box(&id), &LanguageSelector::BestAvailable))
    });
    c.bench_function("get_url_containing", |b| {
        b.iter(|| index.get_url(black_box(&id), &selector))
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_decode,
    bench_build_index,
    bench_lookup
);
criterion_main!(benches);
