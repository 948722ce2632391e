//! Ambient audio output via rodio.
//!
//! One looping track. The engine's pause semantics rewind to the start, so
//! playback always rebuilds the sink from the decoded bytes instead of
//! resuming. A missing output device or missing/undecodable track surfaces
//! as a `PlaybackError`, which the engine treats exactly like a browser
//! autoplay rejection.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use circle22_engine::{AudioSink, PlaybackError};

pub struct RodioSink {
    /// rodio output stream (must be kept alive)
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    /// Encoded track bytes, decoded fresh on every play
    track: Option<Arc<Vec<u8>>>,
    volume: f32,
}

impl RodioSink {
    /// Open the default output device and load the ambient track. Either
    /// may be absent; play() then reports rejection instead of panicking.
    pub fn new(track_path: Option<&Path>) -> Self {
        let (stream, handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => {
                tracing::info!("Audio output initialized");
                (Some(stream), Some(handle))
            }
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}", e);
                (None, None)
            }
        };

        let track = track_path.and_then(|path| match std::fs::read(path) {
            Ok(bytes) => {
                tracing::info!("Ambient track: {} ({} bytes)", path.display(), bytes.len());
                Some(Arc::new(bytes))
            }
            Err(e) => {
                tracing::warn!("Failed to read ambient track {}: {}", path.display(), e);
                None
            }
        });
        if track.is_none() {
            tracing::info!("No ambient track; the audio toggle will report rejection");
        }

        Self {
            _stream: stream,
            handle,
            sink: None,
            track,
            volume: 1.0,
        }
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let handle = self
            .handle
            .as_ref()
            .ok_or_else(|| PlaybackError::new("no audio output device"))?;
        let track = self
            .track
            .as_ref()
            .ok_or_else(|| PlaybackError::new("ambient track unavailable"))?;

        // Always restart from the top: pause rewinds
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let source = Decoder::new(Cursor::new((**track).clone()))
            .map_err(|e| PlaybackError::new(format!("failed to decode ambient track: {e}")))?;
        let sink = Sink::try_new(handle)
            .map_err(|e| PlaybackError::new(format!("failed to open playback channel: {e}")))?;
        sink.set_volume(self.volume);
        sink.append(source.repeat_infinite());
        self.sink = Some(sink);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }
}
