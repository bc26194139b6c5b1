use criterion::{criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma, Rgb, RgbImage};
use stegosuite_core::{CodecOptions, Media, Method, Steganography};

pub fn image_decoding(c: &mut Criterion) {
    let options = CodecOptions::default();

    for method in Method::ALL {
        let media: Media = match method {
            Method::Rdh => GrayImage::from_fn(256, 256, |x, y| {
                Luma([((x / 4 + y / 8) % 24) as u8 + 90])
            })
            .into(),
            _ => RgbImage::from_fn(256, 256, |x, y| {
                Rgb([(x * 3) as u8, (y * 5) as u8, (x + y) as u8])
            })
            .into(),
        };
        let strategy = method.strategy(&options);
        let embedded = strategy
            .embed(&media, "Hello World!")
            .expect("Cannot hide secret message");

        c.bench_function(&format!("Image Decoding {method}"), |b| {
            b.iter(|| {
                strategy
                    .extract(&embedded.stego, embedded.artifact.as_ref())
                    .expect("Failed to unveil 12 chars")
            })
        });
    }
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
