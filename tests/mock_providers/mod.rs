//! In-process stand-ins for the remote speech service.
//!
//! `StubConnector` hands out `StubSpeechService` clients that answer from a
//! fixed voice catalog and return canned MP3 bytes, counting every call.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use fourier_gateway::core::credentials::{ClientId, ServiceAccountKey};
use fourier_gateway::core::tts::{
    ClientConnector, SpeechError, SpeechResult, SpeechService, SynthesisRequest, Voice,
    VoiceGender,
};

/// Bytes returned for every successful synthesis.
pub const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-mp3-frame";

/// Counters and switches shared by every client a connector hands out.
#[derive(Default)]
pub struct StubControls {
    pub connects: AtomicUsize,
    pub voice_calls: AtomicUsize,
    pub synth_calls: AtomicUsize,
    pub fail_voices: AtomicBool,
    pub fail_synthesis: AtomicBool,
    pub last_request: Mutex<Option<SynthesisRequest>>,
}

impl StubControls {
    pub fn voice_calls(&self) -> usize {
        self.voice_calls.load(Ordering::SeqCst)
    }

    pub fn synth_calls(&self) -> usize {
        self.synth_calls.load(Ordering::SeqCst)
    }
}

pub fn catalog() -> Vec<Voice> {
    [
        ("en-US-Standard-A", "en-US", VoiceGender::Male),
        ("en-US-Chirp3-HD-Charon", "en-US", VoiceGender::Male),
        ("en-US-Chirp3-HD-Kore", "en-US", VoiceGender::Female),
        ("fr-FR-Neural2-A", "fr-FR", VoiceGender::Female),
        ("de-DE-Wavenet-B", "de-DE", VoiceGender::Male),
    ]
    .into_iter()
    .map(|(name, language_code, gender)| Voice {
        name: name.to_string(),
        language_code: language_code.to_string(),
        gender,
    })
    .collect()
}

pub struct StubSpeechService {
    id: ClientId,
    controls: Arc<StubControls>,
}

#[async_trait]
impl SpeechService for StubSpeechService {
    fn client_id(&self) -> ClientId {
        self.id
    }

    async fn list_voices(&self) -> SpeechResult<Vec<Voice>> {
        self.controls.voice_calls.fetch_add(1, Ordering::SeqCst);
        if self.controls.fail_voices.load(Ordering::SeqCst) {
            return Err(SpeechError::Remote {
                status: 403,
                message: "Cloud Text-to-Speech API has not been enabled".to_string(),
            });
        }
        Ok(catalog())
    }

    async fn synthesize_speech(&self, request: &SynthesisRequest) -> SpeechResult<Bytes> {
        self.controls.synth_calls.fetch_add(1, Ordering::SeqCst);
        *self.controls.last_request.lock() = Some(request.clone());
        if self.controls.fail_synthesis.load(Ordering::SeqCst) {
            return Err(SpeechError::Remote {
                status: 403,
                message: "Permission denied on project demo-project".to_string(),
            });
        }
        Ok(Bytes::from_static(FAKE_MP3))
    }
}

#[derive(Default)]
pub struct StubConnector {
    pub controls: Arc<StubControls>,
}

impl StubConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl ClientConnector for StubConnector {
    async fn connect(&self, key: &ServiceAccountKey) -> SpeechResult<Arc<dyn SpeechService>> {
        self.controls.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(StubSpeechService {
            id: key.client_id(),
            controls: self.controls.clone(),
        }))
    }
}
