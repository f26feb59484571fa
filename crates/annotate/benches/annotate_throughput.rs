use annotate::Annotator;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::RgbImage;
use inference::{ClassNameTable, Detection};

fn bench_annotate(c: &mut Criterion) {
    let annotator = Annotator::new();
    let image = RgbImage::new(1280, 720);
    let table = ClassNameTable::waste_default();

    let detections: Vec<Detection> = (0..8)
        .map(|i| Detection {
            x1: (i * 100) as f32 + 20.0,
            y1: 80.0,
            x2: (i * 100) as f32 + 90.0,
            y2: 400.0,
            confidence: 0.9,
            class_id: (i % 6) as u32,
        })
        .collect();

    c.bench_function("annotate_720p_8_boxes", |b| {
        b.iter(|| {
            let out = annotator
                .annotate(black_box(&image), black_box(&detections), &table)
                .unwrap();
            black_box(out);
        })
    });
}

criterion_group!(benches, bench_annotate);
criterion_main!(benches);
