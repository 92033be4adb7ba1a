use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn gooshade() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gooshade"))
}

#[test]
fn defaults_sync_cli_installs_bundled_scenes() {
    let root = TempDir::new().unwrap();
    let config_dir = root.path().join("config");
    let data_dir = root.path().join("data");
    let cache_dir = root.path().join("cache");

    let status = gooshade()
        .env("GOOSHADE_CONFIG_DIR", &config_dir)
        .env("GOOSHADE_DATA_DIR", &data_dir)
        .env("GOOSHADE_CACHE_DIR", &cache_dir)
        .args(["defaults", "sync"])
        .status()
        .expect("failed to run gooshade defaults sync");
    assert!(status.success());

    for scene in ["spectrum-badge", "goo-card", "carousel-depth", "retro-tv"] {
        assert!(
            data_dir.join("scenes").join(scene).join("scene.toml").exists(),
            "bundled scene '{scene}' missing after sync"
        );
    }

    // A second sync must be a clean no-op.
    let second = gooshade()
        .env("GOOSHADE_CONFIG_DIR", &config_dir)
        .env("GOOSHADE_DATA_DIR", &data_dir)
        .env("GOOSHADE_CACHE_DIR", &cache_dir)
        .args(["defaults", "sync"])
        .status()
        .expect("failed to rerun gooshade defaults sync");
    assert!(second.success());
}

#[test]
fn renders_a_pack_directory_to_numbered_frames() {
    let root = TempDir::new().unwrap();
    let pack_dir = root.path().join("tiny-tv");
    let output_dir = root.path().join("out");
    fs::create_dir_all(&pack_dir).unwrap();
    fs::write(
        pack_dir.join("scene.toml"),
        r#"
name = "tiny tv"
effect = "crt"

[input]
type = "checker"
cell = 8.0

[params]
pixel_size = 4.0
"#,
    )
    .unwrap();

    let status = gooshade()
        .env("GOOSHADE_CONFIG_DIR", root.path().join("config"))
        .env("GOOSHADE_DATA_DIR", root.path().join("data"))
        .env("GOOSHADE_CACHE_DIR", root.path().join("cache"))
        .arg(pack_dir.to_str().unwrap())
        .args(["--frames", "3", "--size", "64x36"])
        .arg("--output")
        .arg(output_dir.to_str().unwrap())
        .status()
        .expect("failed to run gooshade render");
    assert!(status.success());

    for index in 0..3 {
        assert!(
            output_dir.join(format!("frame-{index:05}.png")).exists(),
            "frame {index} missing"
        );
    }
}
