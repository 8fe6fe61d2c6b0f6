
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ekg_core::analysis::estimate_rate_bpm;
use ekg_core::config::{SimulatorSettings, SynthesisSettings};
use ekg_core::render::StripRenderer;
use ekg_core::simulation::SimulationState;
use ekg_core::synthesis::{generate, Lead, Rhythm};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLE_RATES: &[u32] = &[250, 500, 1000];

fn benchmark_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for &sampling_rate_hz in SAMPLE_RATES {
        let settings = SynthesisSettings {
            sampling_rate_hz,
            ..SynthesisSettings::default()
        };
        group.throughput(Throughput::Elements((settings.total_samples() * 12) as u64));

        for rhythm in Rhythm::ALL {
            group.bench_with_input(
                BenchmarkId::new(rhythm.id(), format!("{}hz", sampling_rate_hz)),
                &settings,
                |b, settings| {
                    let mut rng = StdRng::seed_from_u64(42);
                    b.iter(|| {
                        generate(
                            black_box(rhythm),
                            black_box(rhythm.default_rate_bpm()),
                            settings,
                            &mut rng,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let mut rng = StdRng::seed_from_u64(7);
    let set = generate(Rhythm::Normal, 75, &SynthesisSettings::default(), &mut rng);
    let renderer = StripRenderer::default();

    group.bench_function("window_single_lead", |b| {
        b.iter(|| renderer.window(set.channel(Lead::II), black_box(37.5)))
    });

    group.bench_function("render_all_leads", |b| {
        b.iter(|| renderer.render_all(&set, black_box(37.5)))
    });

    group.bench_function("path_data", |b| {
        let strip = renderer.window(set.channel(Lead::II), 37.5);
        b.iter(|| black_box(&strip).to_path_data())
    });

    group.finish();
}

fn benchmark_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback");

    group.bench_function("tick_and_render", |b| {
        let mut settings = SimulatorSettings::default();
        settings.synthesis.seed = Some(1);
        let mut state = SimulationState::new(settings);
        state.play();
        b.iter(|| {
            state.tick();
            black_box(state.visible_windows())
        });
    });

    group.bench_function("rate_change_regenerates", |b| {
        let mut state = SimulationState::default();
        let mut rate = 60;
        b.iter(|| {
            rate = if rate == 60 { 61 } else { 60 };
            state.set_rate(black_box(rate))
        });
    });

    group.finish();
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let set = generate(Rhythm::AtrialFibrillation, 110, &SynthesisSettings::default(), &mut rng);

    c.bench_function("estimate_rate_bpm", |b| {
        b.iter(|| estimate_rate_bpm(black_box(set.channel(Lead::II)), 250, set.baseline()))
    });
}

criterion_group!(
    benches,
    benchmark_generation,
    benchmark_rendering,
    benchmark_playback,
    benchmark_analysis
);
criterion_main!(benches);
