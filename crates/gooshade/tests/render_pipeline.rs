//! End-to-end pipeline checks through the library crates: scene pack on disk,
//! per-pixel shading, parallel dispatch, and PNG output.

use std::fs;

use effects::{CheckerSampler, CrtUniforms, GooeyUniforms};
use glam::{Vec2, Vec4};
use renderer::{render_into, EffectInstance, FrameSink, FrameTimeline, Pixmap, PixmapSampler};
use scenepack::{ensure_assets, LocalScenePack, SceneHandle, SceneRepository};
use tempfile::TempDir;

#[test]
fn scene_pack_resolves_and_renders_frames() {
    let root = TempDir::new().unwrap();
    let scenes = root.path().join("scenes");
    let pack_dir = scenes.join("checker-tv");
    fs::create_dir_all(&pack_dir).unwrap();
    fs::write(
        pack_dir.join("scene.toml"),
        r#"
effect = "crt"

[input]
type = "checker"
cell = 6.0

[params]
pixel_size = 3.0
"#,
    )
    .unwrap();

    let repo = SceneRepository::new(vec![scenes]);
    let pack = repo
        .resolve(&SceneHandle::Named("checker-tv".into()))
        .expect("resolve scene");
    ensure_assets(&pack).expect("assets");

    let instance = EffectInstance::Crt {
        uniforms: CrtUniforms {
            size: Vec2::new(48.0, 32.0),
            time: 0.0,
            pixel_size: 3.0,
        },
    };
    let sampler = CheckerSampler {
        cell: 6.0,
        even: Vec4::ONE,
        odd: Vec4::new(0.1, 0.1, 0.1, 1.0),
    };

    let timeline = FrameTimeline::new(24.0, 3);
    let sink = FrameSink::create(root.path().join("frames"), "frame").expect("sink");
    let mut target = Pixmap::new(48, 32);
    for stamp in timeline.stamps() {
        let mut frame_instance = instance.clone();
        frame_instance.set_time(stamp.seconds);
        render_into(&frame_instance, &sampler, &mut target);
        sink.submit(stamp.index, target.clone()).expect("submit");
    }
    assert_eq!(sink.finish().expect("finish"), 3);
    for index in 0..3 {
        assert!(root
            .path()
            .join("frames")
            .join(format!("frame-{index:05}.png"))
            .exists());
    }
}

#[test]
fn distortion_reads_back_through_a_rendered_layer() {
    // Render a checkerboard into a pixmap, then distort that pixmap: the
    // gooey pass must only ever read colors that exist in the source layer.
    let mut layer = Pixmap::new(64, 64);
    for (index, pixel) in layer.pixels_mut().iter_mut().enumerate() {
        let (x, y) = (index % 64, index / 64);
        *pixel = if (x / 8 + y / 8) % 2 == 0 {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            [0.0, 0.0, 0.0, 1.0]
        };
    }

    let instance = EffectInstance::Gooey {
        uniforms: GooeyUniforms {
            size: Vec2::new(64.0, 64.0),
            touch: Vec2::new(48.0, 32.0),
            velocity: Vec2::new(120.0, 0.0),
            time: 0.7,
            angularity: 0.4,
            amplitude: 0.8,
            viscosity: 0.3,
            dragging: 1.0,
        },
    };

    let sampler = PixmapSampler::new(&layer);
    let mut target = Pixmap::new(64, 64);
    render_into(&instance, &sampler, &mut target);

    for pixel in target.pixels() {
        let is_white = pixel[0] == 1.0 && pixel[1] == 1.0 && pixel[2] == 1.0;
        let is_black = pixel[0] == 0.0 && pixel[1] == 0.0 && pixel[2] == 0.0;
        assert!(is_white || is_black, "unexpected color {pixel:?}");
        assert_eq!(pixel[3], 1.0);
    }
}

#[test]
fn loading_a_texture_backed_pack_requires_the_texture() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("scene.toml"),
        r#"
effect = "gooey"

[input]
type = "texture"
path = "card.png"
"#,
    )
    .unwrap();
    let pack = LocalScenePack::load(root.path()).expect("load pack");
    assert!(ensure_assets(&pack).is_err());

    // Drop a real PNG in place and the pack becomes renderable.
    Pixmap::solid(8, 8, Vec4::new(0.2, 0.4, 0.6, 1.0))
        .to_rgba_image()
        .save(root.path().join("card.png"))
        .expect("write texture");
    assert!(ensure_assets(&pack).is_ok());
    let loaded = Pixmap::open(pack.texture_path().unwrap()).expect("open texture");
    assert_eq!(loaded.width(), 8);
}
