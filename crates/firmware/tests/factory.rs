//! Simulated-mode bring-up through `PlatformFactory`.

#![cfg(feature = "emulator")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use firmware::{HardwareHandles, PlatformFactory};
use platform::{Key, Mode, PlatformConfig, Rgbw};
use simulator::{Host, SimConfig};
use ui::{App, AppRuntime, Context, DrawOutcome, Launcher, LauncherEntry, Navigation};

fn config(root: &std::path::Path) -> PlatformConfig {
    PlatformConfig {
        storage_root: root.to_string_lossy().into_owned(),
        ..PlatformConfig::default()
    }
}

fn factory(root: &std::path::Path) -> (PlatformFactory, simulator::KeyInjector) {
    let cfg = config(root);
    let host = Host::headless(SimConfig::from(&cfg));
    let keys = host.injector();
    let factory = PlatformFactory::new(Mode::Simulated, cfg, HardwareHandles::new())
        .with_host(host);
    (factory, keys)
}

struct Blank;

impl App for Blank {
    fn title(&self) -> &str {
        "Blank"
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
        ui::widgets::clear_screen(ctx.display);
        DrawOutcome::Continue
    }

    fn handle_input(&mut self, _ctx: &mut Context<'_>, _key: Key) -> Navigation {
        Navigation::Pop
    }
}

#[test]
fn simulated_backends_are_memoized() {
    let dir = tempfile::tempdir().unwrap();
    let (mut factory, keys) = factory(dir.path());
    assert!(factory.is_simulator());

    factory.init_display().unwrap().set_pen(platform::Pen::new(4));
    assert_eq!(factory.init_display().unwrap().pen(), platform::Pen::new(4));

    keys.press(Key::UP);
    keys.press(Key::DOWN);
    assert_eq!(factory.init_input().unwrap().read_key().unwrap(), Some(Key::UP));
    assert_eq!(factory.init_input().unwrap().read_key().unwrap(), Some(Key::DOWN));
}

#[test]
fn simulated_storage_uses_configured_root() {
    let dir = tempfile::tempdir().unwrap();
    let (factory, _keys) = factory(dir.path());
    let mut hal = factory.build().unwrap();
    hal.storage.write("memo.txt", b"milk").unwrap();
    assert!(dir.path().join("memo.txt").is_file());
    assert_eq!(hal.storage.read("memo.txt").unwrap(), b"milk");
    hal.backlight.set_backlight(Rgbw::new(1, 2, 3, 4)).unwrap();
}

#[test]
fn launcher_runs_on_simulated_hal() {
    let dir = tempfile::tempdir().unwrap();
    let (factory, keys) = factory(dir.path());
    let hal = factory.build().unwrap();
    let launcher = Launcher::new(vec![LauncherEntry::new("Blank", || Box::new(Blank))]);
    let mut runtime = AppRuntime::new(hal, Box::new(launcher));

    keys.press(Key::ENTER);
    let report = runtime.step();
    assert!(report.drew);
    assert_eq!(runtime.stack().titles(), ["Menu", "Blank"]);

    keys.press(Key::ESCAPE);
    runtime.step();
    assert_eq!(runtime.stack().titles(), ["Menu"]);
}
