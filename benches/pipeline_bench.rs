use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ppg_core::config::PipelineConfig;
use ppg_core::processing::features::FeatureExtractor;
use ppg_core::processing::PpgPipeline;
use ppg_core::simulation::{SyntheticPpgConfig, SyntheticPpgSource};

const WINDOW_LENGTHS: &[usize] = &[100, 200, 300];

fn benchmark_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1));

    group.bench_function("process_frame_full_window", |b| {
        let mut pipeline = PpgPipeline::new(PipelineConfig::default()).unwrap();
        let mut source = SyntheticPpgSource::with_seed(SyntheticPpgConfig::default(), 11);

        // Pre-fill so every measured frame runs a full analysis pass.
        for _ in 0..300 {
            pipeline.process_frame(&source.next_frame());
        }

        b.iter(|| {
            let frame = source.next_frame();
            black_box(pipeline.process_frame(black_box(&frame)));
        });
    });

    group.finish();
}

fn benchmark_feature_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("features");

    for &window_len in WINDOW_LENGTHS {
        group.throughput(Throughput::Elements(window_len as u64));
        group.bench_with_input(
            BenchmarkId::new("extract", window_len),
            &window_len,
            |b, &len| {
                let mut extractor = FeatureExtractor::new(100.0);
                let signal: Vec<f32> = (0..len)
                    .map(|i| 220.0 + 40.0 * (i as f32 * 0.21).sin())
                    .collect();

                b.iter(|| black_box(extractor.extract(black_box(&signal))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_process_frame, benchmark_feature_extraction);
criterion_main!(benches);
