use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use motion::{EasingCurve, FadeEnvelope, Sequencer};
use renderer::{blend_into, FrameSink, FrameTimeline, Pixmap};
use scenepack::{SceneHandle, SceneRepository};
use showconfig::ShowConfig;
use tracing::info;

use crate::bootstrap::{parse_surface_size, DEFAULT_FPS};
use crate::cli::RunArgs;
use crate::paths::AppPaths;
use crate::player::ScenePlayer;

/// Renders one pass through a session playlist, crossfading between scenes.
///
/// The previous scene keeps animating past its scheduled end while it fades
/// out, the same way the live switcher keeps the outgoing card alive during
/// the hand-off.
pub fn run_session(
    args: &RunArgs,
    repo: &SceneRepository,
    path: &Path,
    paths: &AppPaths,
) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read session config '{}'", path.display()))?;
    let config = ShowConfig::from_toml_str(&raw)?;

    let playlist = select_playlist(&config)?;
    let sequencer = Sequencer::new(&config, &playlist, args.seed)?;

    let size = parse_surface_size(args.size.as_deref().or(config.defaults.size.as_deref()))?;
    let output = args
        .output
        .clone()
        .or_else(|| config.defaults.output.clone())
        .unwrap_or_else(|| paths.default_output_dir());

    info!(
        playlist = %playlist,
        scenes = sequencer.len(),
        width = size.0,
        height = size.1,
        output = %output.display(),
        "starting session render"
    );

    let sink = FrameSink::create(&output, "session")?;
    let mut current = Pixmap::new(size.0, size.1);
    let mut outgoing = Pixmap::new(size.0, size.1);
    let mut blended = Pixmap::new(size.0, size.1);

    let mut frame_index = 0u32;
    let mut previous: Option<(ScenePlayer, f32)> = None;

    for scheduled in sequencer.scenes() {
        let pack = repo.resolve(&SceneHandle::from_input(&scheduled.handle))?;
        let mut player = ScenePlayer::from_pack(&pack, size)?;

        let fps = args.fps.or(scheduled.fps).unwrap_or(DEFAULT_FPS);
        let frames = (scheduled.duration.as_secs_f32() * fps).round().max(1.0) as u32;
        let timeline = FrameTimeline::new(fps, frames);
        let dt = timeline.frame_interval();

        let mut fade = previous
            .as_ref()
            .and_then(|_| {
                FadeEnvelope::new(
                    0.0,
                    scheduled.crossfade.as_secs_f32(),
                    EasingCurve::Smoothstep,
                )
            });

        info!(
            scene = player.label(),
            effect = player.effect(),
            frames,
            fps,
            "rendering scene"
        );

        for stamp in timeline.stamps() {
            player.advance(stamp.seconds, dt)?;
            player.render(&mut current);

            let mut submit_blended = false;
            if let Some(envelope) = fade {
                let (_, incoming_weight, finished) = envelope.mixes(stamp.seconds);
                if finished {
                    fade = None;
                    previous = None;
                } else if let Some((outgoing_player, outgoing_end)) = previous.as_mut() {
                    outgoing_player.advance(*outgoing_end + stamp.seconds, dt)?;
                    outgoing_player.render(&mut outgoing);
                    blend_into(&outgoing, &current, incoming_weight, &mut blended);
                    submit_blended = true;
                }
            }

            if submit_blended {
                sink.submit(frame_index, blended.clone())?;
            } else {
                sink.submit(frame_index, current.clone())?;
            }
            frame_index += 1;
        }

        previous = Some((player, scheduled.duration.as_secs_f32()));
    }

    let written = sink.finish()?;
    info!(frames = written, output = %output.display(), "session complete");
    Ok(())
}

fn select_playlist(config: &ShowConfig) -> Result<String> {
    if let Some(name) = config.default_playlist() {
        return Ok(name.to_string());
    }
    let mut names = config.playlists.keys();
    match (names.next(), names.next()) {
        (Some(only), None) => Ok(only.clone()),
        _ => anyhow::bail!(
            "session config declares multiple playlists; set defaults.playlist to choose one"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_selection_prefers_the_default() {
        let config = ShowConfig::from_toml_str(
            r#"
version = 1

[defaults]
playlist = "b"

[playlists.a]
mode = "continuous"
item_duration = 1
[[playlists.a.items]]
handle = "scene://one"

[playlists.b]
mode = "continuous"
item_duration = 1
[[playlists.b.items]]
handle = "scene://two"
"#,
        )
        .unwrap();
        assert_eq!(select_playlist(&config).unwrap(), "b");
    }

    #[test]
    fn lone_playlist_is_selected_implicitly() {
        let config = ShowConfig::from_toml_str(
            r#"
version = 1

[playlists.solo]
mode = "continuous"
item_duration = 1
[[playlists.solo.items]]
handle = "scene://one"
"#,
        )
        .unwrap();
        assert_eq!(select_playlist(&config).unwrap(), "solo");
    }

    #[test]
    fn ambiguous_playlists_need_a_default() {
        let config = ShowConfig::from_toml_str(
            r#"
version = 1

[playlists.a]
mode = "continuous"
item_duration = 1
[[playlists.a.items]]
handle = "scene://one"

[playlists.b]
mode = "continuous"
item_duration = 1
[[playlists.b.items]]
handle = "scene://two"
"#,
        )
        .unwrap();
        assert!(select_playlist(&config).is_err());
    }
}
