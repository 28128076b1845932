//! Headless simulator tests: screenshots and key injection through `Host`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use platform::{DisplaySurface, InputSource, Key, Pen, StorageBackend};
use simulator::{Host, SimConfig};

fn host(dir: &std::path::Path) -> Host {
    let mut cfg = SimConfig::with_storage_root(dir);
    cfg.display.width = 32;
    cfg.display.height = 16;
    Host::headless(cfg)
}

#[test]
fn screenshot_maps_pens_to_gray_levels() {
    let dir = tempfile::tempdir().unwrap();
    let mut display = host(dir.path()).display();

    display.fill(Pen::BG);
    display.rect(0, 0, 4, 4, Pen::INK, true);
    display.rect(10, 0, 2, 2, Pen::new(3), true);
    display.update().unwrap();

    let path = dir.path().join("shot.png");
    display.save_screenshot(&path).unwrap();

    let img = image::open(&path).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (32, 16));
    assert_eq!(img.get_pixel(1, 1).0, [255]);
    assert_eq!(img.get_pixel(10, 1).0, [51]);
    assert_eq!(img.get_pixel(20, 10).0, [0]);
}

#[test]
fn injected_keys_reach_input_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let host = host(dir.path());
    let mut input = host.input();
    let injector = host.injector();

    injector.press(Key::DOWN);
    injector.type_text("ok");
    assert_eq!(input.read_key().unwrap(), Some(Key::DOWN));
    assert_eq!(input.poll().unwrap(), [Key::new(b'o'), Key::new(b'k')]);
    assert_eq!(input.read_key().unwrap(), None);
}

#[test]
fn storage_lives_under_configured_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = host(dir.path()).storage();
    storage.write("memos.json", b"{}").unwrap();
    assert!(dir.path().join("memos.json").is_file());
}

#[test]
fn headless_host_reports_itself() {
    let dir = tempfile::tempdir().unwrap();
    assert!(host(dir.path()).is_headless());
}
