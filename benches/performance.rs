use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filmsim::cpu;
use filmsim::params::EffectiveParameters;
use filmsim::presets::find_preset;
use image::DynamicImage;

fn bench_film_pipeline(c: &mut Criterion) {
    let test_image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(1920, 1080, image::Rgba([128, 128, 128, 255])));
    let params = find_preset("classic_neg").at_intensity(0.8);

    c.bench_function("cpu_film_pipeline_1920x1080", |b| {
        b.iter(|| {
            let _result = cpu::apply_film(black_box(&test_image), &params, 0.42);
        })
    });
}

fn bench_parameter_interpolation(c: &mut Criterion) {
    let velvia = find_preset("velvia");

    c.bench_function("preset_interpolation_sweep", |b| {
        b.iter(|| {
            let mut last = EffectiveParameters::neutral();
            for step in 0..=100 {
                last = velvia.at_intensity(black_box(step as f32 / 100.0));
            }
            black_box(last);
        })
    });
}

fn bench_preset_lookup(c: &mut Criterion) {
    c.bench_function("preset_lookup", |b| {
        b.iter(|| {
            let _hit = find_preset(black_box("acros_r"));
            let _miss = find_preset(black_box("no_such_stock"));
        })
    });
}

criterion_group!(benches, bench_film_pipeline, bench_parameter_interpolation, bench_preset_lookup);
criterion_main!(benches);
