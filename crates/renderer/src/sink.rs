use std::fs;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Sender};
use thiserror::Error;
use tracing::debug;

use crate::pixmap::Pixmap;

#[derive(Debug, Error)]
pub enum FrameSinkError {
    #[error("failed to create output directory '{path}'")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write frame {index} to '{path}'")]
    Write {
        index: u32,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("frame writer stopped unexpectedly")]
    Disconnected,
}

struct QueuedFrame {
    index: u32,
    pixmap: Pixmap,
}

/// Writes finished frames to disk as numbered PNGs on a background thread so
/// PNG encoding never stalls the render loop.
///
/// A bounded queue keeps at most a few frames in flight; `finish` drains the
/// queue and surfaces the first write error.
pub struct FrameSink {
    sender: Option<Sender<QueuedFrame>>,
    worker: Option<JoinHandle<Result<u32, FrameSinkError>>>,
}

impl FrameSink {
    pub fn create(directory: impl Into<PathBuf>, prefix: &str) -> Result<Self, FrameSinkError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| FrameSinkError::CreateDir {
            path: directory.clone(),
            source,
        })?;

        let prefix = prefix.to_string();
        let (sender, receiver) = bounded::<QueuedFrame>(4);
        let worker = thread::spawn(move || {
            let mut written = 0;
            for frame in receiver {
                let path = directory.join(format!("{prefix}-{:05}.png", frame.index));
                frame
                    .pixmap
                    .to_rgba_image()
                    .save(&path)
                    .map_err(|source| FrameSinkError::Write {
                        index: frame.index,
                        path: path.clone(),
                        source,
                    })?;
                debug!(frame = frame.index, path = %path.display(), "frame written");
                written += 1;
            }
            Ok(written)
        });

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Queues one frame for writing. Fails only if the writer already died,
    /// in which case `finish` reports the underlying error.
    pub fn submit(&self, index: u32, pixmap: Pixmap) -> Result<(), FrameSinkError> {
        let sender = self.sender.as_ref().ok_or(FrameSinkError::Disconnected)?;
        sender
            .send(QueuedFrame { index, pixmap })
            .map_err(|_| FrameSinkError::Disconnected)
    }

    /// Closes the queue, waits for the writer, and returns the number of
    /// frames written.
    pub fn finish(mut self) -> Result<u32, FrameSinkError> {
        self.sender.take();
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| FrameSinkError::Disconnected)?,
            None => Err(FrameSinkError::Disconnected),
        }
    }
}

impl Drop for FrameSink {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn writes_numbered_frames() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = FrameSink::create(dir.path(), "frame").expect("create sink");
        sink.submit(0, Pixmap::solid(8, 8, Vec4::ONE)).unwrap();
        sink.submit(1, Pixmap::solid(8, 8, Vec4::ZERO)).unwrap();
        let written = sink.finish().expect("finish");
        assert_eq!(written, 2);
        assert!(dir.path().join("frame-00000.png").exists());
        assert!(dir.path().join("frame-00001.png").exists());
    }

    #[test]
    fn create_fails_on_unwritable_directory() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        // A plain file cannot become a directory.
        let err = FrameSink::create(file.path(), "frame");
        assert!(err.is_err());
    }
}
