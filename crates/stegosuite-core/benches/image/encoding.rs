use criterion::{criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma, Rgb, RgbImage};
use stegosuite_core::{CodecOptions, Media, Method, Steganography};

fn carrier(method: Method) -> Media {
    match method {
        Method::Rdh => {
            GrayImage::from_fn(256, 256, |x, y| Luma([((x / 4 + y / 8) % 24) as u8 + 90])).into()
        }
        _ => RgbImage::from_fn(256, 256, |x, y| {
            Rgb([(x * 7 + y) as u8, (x ^ y) as u8, (x * y) as u8])
        })
        .into(),
    }
}

pub fn image_encoding(c: &mut Criterion) {
    let options = CodecOptions::default();
    let secret_message = "Hello World!";

    for method in Method::ALL {
        let media = carrier(method);
        let strategy = method.strategy(&options);

        c.bench_function(&format!("Image Encoding {method}"), |b| {
            b.iter(|| {
                strategy
                    .embed(&media, secret_message)
                    .expect("Cannot hide secret message")
            })
        });
    }
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
