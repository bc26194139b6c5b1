use std::fs;
use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tempfile::TempDir;

use stegosuite_core::api::{capacity, hide, unveil};
use stegosuite_core::artifact::KeyArtifact;
use stegosuite_core::codec::ImprovedLsb;
use stegosuite_core::position::{EdgeMap, HenonParams, HenonPoints};
use stegosuite_core::{
    compare_images, ArtifactKind, CodecOptions, Media, Method, SideArtifact, SteganoError,
    Steganography,
};
use stegosuite_cipher::SecretKey;

fn noisy_rgb(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb(rng.gen::<[u8; 3]>()))
}

fn smooth_gray(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([60 + ((x / 3 + y / 2) % 10) as u8]))
}

fn write_cover(dir: &Path, name: &str, method: Method) -> std::path::PathBuf {
    let path = dir.join(name);
    match method {
        Method::Rdh => smooth_gray(80, 60).save(&path).unwrap(),
        _ => noisy_rgb(120, 100, 42).save(&path).unwrap(),
    }
    path
}

#[test]
fn every_method_should_unveil_what_it_hid() {
    let dir = TempDir::new().unwrap();
    let message = "Stegosuite hides text.";

    for method in Method::ALL {
        let cover = write_cover(dir.path(), &format!("cover-{method}.png"), method);
        let secret = dir.path().join(format!("secret-{method}.png"));

        let hidden = hide::prepare()
            .with_method(method)
            .with_message(message)
            .with_image(&cover)
            .with_output(&secret)
            .execute()
            .unwrap_or_else(|e| panic!("{method} failed to hide: {e}"));
        assert_eq!(hidden.artifact.is_some(), method.artifact_kind().is_some());

        let revealed = unveil::prepare()
            .with_method(method)
            .from_secret_file(&secret)
            .use_restored_output(Some(dir.path().join(format!("restored-{method}.png"))))
            .execute()
            .unwrap_or_else(|e| panic!("{method} failed to unveil: {e}"));
        assert_eq!(revealed.message, message, "{method} unveiled something else");
        assert_eq!(revealed.restored.is_some(), method == Method::Rdh);
    }
}

#[test]
fn standard_lsb_on_10x10_has_36_chars() {
    let dir = TempDir::new().unwrap();
    let cover = dir.path().join("cover.png");
    let secret = dir.path().join("secret.png");
    noisy_rgb(10, 10, 1).save(&cover).unwrap();

    let capacity = capacity::prepare().with_image(&cover).execute().unwrap();
    assert_eq!(capacity.chars, 36);

    hide::prepare()
        .with_message("Hi")
        .with_image(&cover)
        .with_output(&secret)
        .execute()
        .unwrap();
    let revealed = unveil::prepare().from_secret_file(&secret).execute().unwrap();
    assert_eq!(revealed.message, "Hi");
}

#[test]
fn exceeding_capacity_should_leave_no_files() {
    let dir = TempDir::new().unwrap();
    let cover = dir.path().join("cover.png");
    noisy_rgb(10, 10, 1).save(&cover).unwrap();

    for method in [Method::StandardLsb, Method::ImprovedLsb, Method::EdgeLsb] {
        let secret = dir.path().join(format!("secret-{method}.png"));
        let result = hide::prepare()
            .with_method(method)
            .with_message(&"x".repeat(37))
            .with_image(&cover)
            .with_output(&secret)
            .execute();

        match result {
            Err(SteganoError::CapacityExceeded { requested, .. }) => assert_eq!(requested, 37),
            other => panic!("{method} should exceed its capacity, got {other:?}"),
        }
        assert!(!secret.exists());
        if let Some(kind) = method.artifact_kind() {
            assert!(!kind.default_path(&secret).exists());
        }
    }

    let remaining: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(remaining.len(), 1, "only the cover should be left");
}

#[test]
fn every_method_should_fill_its_capacity_but_not_more() {
    let options = CodecOptions::default();

    for method in Method::ALL {
        let cover = match method {
            Method::Rdh => Media::from(smooth_gray(80, 60)),
            _ => Media::from(noisy_rgb(60, 50, 11)),
        };
        let strategy = method.strategy(&options);
        let capacity = strategy.capacity(&cover).unwrap();
        assert!(capacity > 0, "{method} should offer room on this cover");

        match strategy.embed(&cover, &"z".repeat(capacity + 1)) {
            Err(SteganoError::CapacityExceeded {
                capacity: reported,
                requested,
            }) => {
                assert_eq!(reported, capacity, "{method}");
                assert_eq!(requested, capacity + 1, "{method}");
            }
            other => panic!("{method} should reject capacity + 1, got {other:?}"),
        }

        // the bound ignores the encryption overhead, only the sealed capacity fits
        if method == Method::ImprovedLsb {
            continue;
        }
        let full = "z".repeat(capacity);
        let embedded = strategy
            .embed(&cover, &full)
            .unwrap_or_else(|e| panic!("{method} failed at full capacity: {e}"));
        let unveiled = strategy
            .extract(&embedded.stego, embedded.artifact.as_ref())
            .unwrap_or_else(|e| panic!("{method} failed to unveil at full capacity: {e}"));
        assert_eq!(unveiled.message, full, "{method}");
    }
}

#[test]
fn standard_lsb_rejects_37_chars_with_bound_36() {
    let cover = Media::from(noisy_rgb(10, 10, 3));
    let result = Method::StandardLsb
        .strategy(&CodecOptions::default())
        .embed(&cover, &"y".repeat(37));

    assert!(matches!(
        result,
        Err(SteganoError::CapacityExceeded {
            capacity: 36,
            requested: 37
        })
    ));
}

#[test]
fn rdh_should_restore_a_flat_cover_bit_for_bit() {
    let cover = Media::from(GrayImage::from_pixel(50, 50, Luma([128])));
    let strategy = Method::Rdh.strategy(&CodecOptions::default());

    let embedded = strategy.embed(&cover, "flat").unwrap();
    let unveiled = strategy
        .extract(&embedded.stego, embedded.artifact.as_ref())
        .unwrap();

    assert_eq!(unveiled.message, "flat");
    let restored = unveiled.restored.unwrap();
    assert_eq!(compare_images(&cover, &restored).unwrap().differing_bits, 0);
    assert!(restored.to_luma8().pixels().all(|p| p.0[0] == 128));
}

#[test]
fn rdh_should_restore_the_cover_file() {
    let dir = TempDir::new().unwrap();
    let cover = write_cover(dir.path(), "cover.png", Method::Rdh);
    let secret = dir.path().join("secret.png");
    let restored = dir.path().join("restored.png");

    hide::prepare()
        .with_method(Method::Rdh)
        .with_message("reversible")
        .with_image(&cover)
        .with_output(&secret)
        .execute()
        .unwrap();
    let metadata: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("secret.rdh.json")).unwrap()).unwrap();
    assert_eq!(metadata["secret_length"], 80);

    unveil::prepare()
        .with_method(Method::Rdh)
        .from_secret_file(&secret)
        .use_restored_output(Some(restored.clone()))
        .execute()
        .unwrap();

    let original = image::open(&cover).unwrap().to_luma8();
    let recovered = image::open(&restored).unwrap().to_luma8();
    assert_eq!(original, recovered);
}

#[test]
fn improved_lsb_should_fail_on_a_tampered_key() {
    let dir = TempDir::new().unwrap();
    let cover = dir.path().join("cover.png");
    let secret = dir.path().join("secret.png");
    noisy_rgb(20, 20, 5).save(&cover).unwrap();

    hide::prepare()
        .with_method(Method::ImprovedLsb)
        .with_message("Hi")
        .with_image(&cover)
        .with_output(&secret)
        .execute()
        .unwrap();

    // "Hi" seals into 41 framed bytes, the routing never reaches the key's last characters
    let key_file = ArtifactKind::Key.default_path(&secret);
    let artifact = SideArtifact::load(ArtifactKind::Key, &key_file).unwrap();
    let key = SecretKey::from_base64(&artifact.as_key().unwrap().secret_key).unwrap();
    let mut raw = *key.as_bytes();
    raw[31] ^= 1;
    SideArtifact::Key(KeyArtifact {
        secret_key: SecretKey::from_bytes(raw).to_base64(),
    })
    .save_as(&key_file)
    .unwrap();

    let result = unveil::prepare()
        .with_method(Method::ImprovedLsb)
        .from_secret_file(&secret)
        .execute();
    assert!(matches!(result, Err(SteganoError::DecryptionFailed(_))));
}

#[test]
fn improved_lsb_should_admit_less_than_it_reports() {
    let cover = Media::from(noisy_rgb(20, 20, 5));
    let reported = ImprovedLsb.capacity(&cover).unwrap();

    assert_eq!(reported, 149);
    assert_eq!(ImprovedLsb::sealed_capacity(400), 8);
    assert!(matches!(
        ImprovedLsb.embed(&cover, &"z".repeat(9)),
        Err(SteganoError::CapacityExceeded { capacity: 8, requested: 9 })
    ));
}

#[test]
fn chaotic_points_should_be_reproducible() {
    let first: Vec<_> = HenonPoints::new(120, 90, HenonParams::default()).collect();
    let second: Vec<_> = HenonPoints::new(120, 90, HenonParams::default()).collect();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn edge_set_should_survive_hiding() {
    let dir = TempDir::new().unwrap();
    let cover = dir.path().join("cover.png");
    let secret = dir.path().join("secret.png");
    noisy_rgb(64, 64, 77).save(&cover).unwrap();

    let hidden = hide::prepare()
        .with_method(Method::EdgeLsb)
        .with_message("edge stability")
        .with_image(&cover)
        .with_output(&secret)
        .execute()
        .unwrap();
    let count = SideArtifact::load(ArtifactKind::EdgeCount, &hidden.artifact.unwrap())
        .unwrap()
        .as_edge_count()
        .unwrap();

    let red = |path: &Path| {
        let rgb = image::open(path).unwrap().to_rgb8();
        GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| Luma([rgb.get_pixel(x, y).0[0]]))
    };
    let options = CodecOptions::default().edge_search;
    let before = EdgeMap::new(&red(&cover)).search_exact(count, &options).unwrap();
    let after = EdgeMap::new(&red(&secret)).search_exact(count, &options).unwrap();

    assert_eq!(before.len(), count);
    assert_eq!(before, after);
}

#[test]
fn single_bit_methods_change_one_bit_per_pixel() {
    let cover = Media::from(noisy_rgb(30, 30, 8));
    // these methods write a single low bit per carrier pixel
    for method in [Method::ImprovedLsb, Method::EdgeLsb, Method::ChaoticLsb] {
        let strategy = method.strategy(&CodecOptions::default());
        let embedded = strategy.embed(&cover, "low").unwrap();
        let diff = compare_images(&cover, &embedded.stego).unwrap();

        assert_eq!(diff.differing_bits, diff.differing_pixels, "{method}");
    }
}
