use criterion::{black_box, criterion_group, criterion_main, Criterion};
use panosphere_core::RgbImage;
use panosphere_cubemap::{equirect_to_faces, faces_to_equirect, CubemapCodec, CubemapParams};

fn gradient(width: usize, height: usize) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        [
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) % 256) as u8,
        ]
    })
}

fn bench_split(c: &mut Criterion) {
    let pano = gradient(1024, 512);

    c.bench_function("equirect_to_faces_1024x512_256px", |b| {
        b.iter(|| equirect_to_faces(black_box(&pano.view()), Some(256)).unwrap())
    });

    let mut codec = CubemapCodec::new(CubemapParams {
        face_size: Some(256),
        ..CubemapParams::default()
    });
    c.bench_function("codec_split_cached_1024x512_256px", |b| {
        b.iter(|| codec.split(black_box(&pano.view())).unwrap())
    });

    let faces = equirect_to_faces(&pano.view(), Some(256)).unwrap();
    c.bench_function("faces_to_equirect_256px_1024x512", |b| {
        b.iter(|| faces_to_equirect(black_box(&faces), 1024, 512).unwrap())
    });
}

criterion_group!(benches, bench_split);
criterion_main!(benches);
