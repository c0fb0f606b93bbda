//! Clipboard manager - retry-wrapped, cached, platform-aware operations

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::time::sleep;

use crate::application::facade::BackendFacade;
use crate::application::ports::{
    BackendError, HeadlessPredicate, PhaseProfiler, PlatformProbe, ProbeResult,
};
use crate::domain::config::ClipboardConfig;
use crate::domain::content::{classify, ContentType};
use crate::domain::error::ClipboardError;
use crate::domain::image::{parse_base64_image, ImagePayload};
use crate::domain::snapshot::{CachePolicy, ClipboardSnapshot, SnapshotCache};

/// Lowercased substrings of platform-specific read failures that mean
/// "the clipboard holds something the text backend cannot represent",
/// not "the operation failed". Covers the Windows "element not found"
/// message and its common localizations, plus format-availability errors.
const PLATFORM_READ_SIGNATURES: &[&str] = &[
    "element not found",
    "elemento no encontrado",
    "\u{e9}l\u{e9}ment introuvable",
    "element nicht gefunden",
    "elemento non trovato",
    "not available in the requested format",
    "clipboard format is not valid",
    "conversion failure",
];

fn is_platform_read_signature(message: &str) -> bool {
    let lower = message.to_lowercase();
    PLATFORM_READ_SIGNATURES
        .iter()
        .any(|sig| lower.contains(sig))
}

/// What a resilient read resolved to.
enum ReadOutcome {
    /// The backend produced raw text
    Raw(String),
    /// The backend could not read, but a probe identified an image
    ProbedImage,
    /// The backend could not read and the probe saw nothing
    ProbedEmpty,
}

/// Uniform asynchronous clipboard access with retries, a short-TTL snapshot
/// cache, out-of-band OS probes, and a headless guard.
///
/// Callers are expected to await one clipboard operation before issuing the
/// next; no internal mutex serializes overlapping calls against the single
/// global OS clipboard. The snapshot cache itself is internally synchronized,
/// so overlapping calls cannot corrupt manager state, but their ordering
/// against the OS clipboard is unspecified.
pub struct ClipboardManager {
    facade: BackendFacade,
    probe: Box<dyn PlatformProbe>,
    cache: SnapshotCache,
    policy: Box<dyn CachePolicy>,
    profiler: Arc<dyn PhaseProfiler>,
    headless: HeadlessPredicate,
    config: ClipboardConfig,
}

impl ClipboardManager {
    /// Assemble a manager from explicit collaborators.
    ///
    /// See `infrastructure::create_manager` for platform-default wiring.
    pub fn new(
        facade: BackendFacade,
        probe: Box<dyn PlatformProbe>,
        policy: Box<dyn CachePolicy>,
        profiler: Arc<dyn PhaseProfiler>,
        headless: HeadlessPredicate,
        config: ClipboardConfig,
    ) -> Self {
        Self {
            facade,
            probe,
            cache: SnapshotCache::new(),
            policy,
            profiler,
            headless,
            config,
        }
    }

    /// Handle to the injected profiler, for `export`/`reset`/`set_enabled`.
    pub fn profiler(&self) -> &Arc<dyn PhaseProfiler> {
        &self.profiler
    }

    /// Whether the clipboard holds any content.
    ///
    /// In a headless context this resolves `false` without touching the
    /// backend.
    pub async fn has_content(&self) -> Result<bool, ClipboardError> {
        if self.simulated() {
            return Ok(false);
        }
        match self.observe().await {
            Ok(snapshot) => Ok(!snapshot.is_empty),
            Err(err) => self.headless_fallback(err, false),
        }
    }

    /// Read the clipboard as text.
    ///
    /// An empty clipboard resolves `Ok("")`, never an error, in both normal
    /// and headless operation - polling consumers rely on this.
    pub async fn read_text(&self) -> Result<String, ClipboardError> {
        if self.simulated() {
            return Ok(String::new());
        }
        match self.observe().await {
            Ok(snapshot) => Ok(snapshot.raw),
            Err(err) => self.headless_fallback(err, String::new()),
        }
    }

    /// Classify the current clipboard content.
    pub async fn content_type(&self) -> Result<ContentType, ClipboardError> {
        if self.simulated() {
            return Ok(ContentType::Empty);
        }
        match self.observe().await {
            Ok(snapshot) => Ok(snapshot.content_type),
            Err(err) => self.headless_fallback(err, ContentType::Empty),
        }
    }

    /// Write text to the clipboard. Invalidates the snapshot cache on
    /// success so the next read reflects fresh state.
    pub async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.write_through(text, "backend-write").await
    }

    /// Clear the clipboard (writes an empty string).
    pub async fn clear(&self) -> Result<(), ClipboardError> {
        self.write_through("", "backend-clear").await
    }

    async fn write_through(&self, text: &str, phase: &'static str) -> Result<(), ClipboardError> {
        if self.simulated() {
            return Ok(());
        }
        let start = Instant::now();
        let result = self.facade.write(text).await;
        self.profiler.record(phase, start.elapsed());

        match result {
            Ok(()) => {
                self.cache.invalidate();
                Ok(())
            }
            Err(err) => self.headless_fallback(map_write_error(err), ()),
        }
    }

    /// Extract image bytes from the clipboard.
    ///
    /// Tries the base64 data-URL path first, then falls back to the
    /// platform probe. `Ok(None)` means "no recognizable image", never an
    /// operational error.
    pub async fn read_image(&self) -> Result<Option<ImagePayload>, ClipboardError> {
        if self.simulated() {
            return Ok(None);
        }
        let snapshot = match self.observe().await {
            Ok(snapshot) => snapshot,
            Err(err) => return self.headless_fallback(err, None),
        };

        if let Some(payload) = parse_base64_image(&snapshot.raw) {
            return Ok(Some(payload));
        }

        // The OS clipboard can carry text and image formats simultaneously
        // (e.g. a copy from a word processor), so the probe checks native
        // formats regardless of how the text classified. Probes without an
        // image resolve None quickly.
        let start = Instant::now();
        let payload = self.probe.extract_image().await;
        self.profiler.record("probe-extract", start.elapsed());
        Ok(payload)
    }

    /// Place the image file at `path` onto the OS clipboard via the
    /// platform probe.
    pub async fn write_image(&self, path: &Path) -> Result<(), ClipboardError> {
        if self.simulated() {
            return Ok(());
        }
        if !path.exists() {
            return Err(ClipboardError::ImageNotFound(path.to_path_buf()));
        }
        if !self.probe.supports_image_write() {
            return Err(ClipboardError::UnsupportedPlatform("clipboard image write"));
        }

        let start = Instant::now();
        let wrote = self.probe.write_image(path).await;
        self.profiler.record("probe-write", start.elapsed());

        if wrote {
            self.cache.invalidate();
            Ok(())
        } else {
            Err(ClipboardError::WriteFailed(
                "platform probe failed to write image".to_string(),
            ))
        }
    }

    /// Cache-aware classified read shared by the query operations.
    async fn observe(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        if let Some(snapshot) = self.cache.get(self.policy.as_ref()) {
            tracing::debug!(content_type = %snapshot.content_type, "serving clipboard snapshot from cache");
            return Ok(snapshot);
        }

        match self.read_with_retry().await? {
            ReadOutcome::Raw(raw) => {
                let mut type_hint = None;
                if raw.trim().is_empty() {
                    // An image-only clipboard can read as empty text
                    // (notably on macOS); ask the probe before declaring
                    // the clipboard empty. The null probe answers
                    // immediately, so this costs nothing elsewhere.
                    if self.probe_detect().await == Some(ProbeResult::Image) {
                        type_hint = Some(ContentType::Image);
                    }
                }
                let content_type = type_hint.unwrap_or_else(|| classify(&raw));
                self.cache.update(&raw, Some(content_type));
                Ok(ClipboardSnapshot {
                    is_empty: content_type == ContentType::Empty,
                    content_type,
                    raw,
                    captured_at: Instant::now(),
                })
            }
            ReadOutcome::ProbedImage => {
                self.cache.update("", Some(ContentType::Image));
                Ok(ClipboardSnapshot {
                    raw: String::new(),
                    is_empty: false,
                    content_type: ContentType::Image,
                    captured_at: Instant::now(),
                })
            }
            ReadOutcome::ProbedEmpty => {
                self.cache.update("", Some(ContentType::Empty));
                Ok(ClipboardSnapshot {
                    raw: String::new(),
                    is_empty: true,
                    content_type: ContentType::Empty,
                    captured_at: Instant::now(),
                })
            }
        }
    }

    /// Read through the facade with bounded retries.
    ///
    /// Some platform backends intermittently report empty content or
    /// failures right after an OS-level clipboard update; a short fixed
    /// delay between attempts rides that out, and an empty successful read
    /// is re-attempted just like a failed one. Recognized platform
    /// signatures short-circuit to the probe instead of erroring.
    async fn read_with_retry(&self) -> Result<ReadOutcome, ClipboardError> {
        let attempts = self.config.read_retries.max(1);
        let mut last_error = BackendError::ReadFailed("no read attempts made".to_string());
        let mut empty_read: Option<String> = None;

        for attempt in 1..=attempts {
            let start = Instant::now();
            let result = self.facade.read().await;
            self.profiler.record("backend-read", start.elapsed());

            match result {
                Ok(raw) => {
                    if raw.trim().is_empty() && attempt < attempts {
                        tracing::debug!(attempt, "empty clipboard read; re-checking for transient state");
                        empty_read = Some(raw);
                        sleep(self.config.retry_delay).await;
                        continue;
                    }
                    return Ok(ReadOutcome::Raw(raw));
                }
                Err(err) => {
                    let message = err.to_string();
                    if is_platform_read_signature(&message) {
                        tracing::debug!(error = %message, "platform read signature; consulting probe");
                        match self.probe_detect().await {
                            Some(ProbeResult::Image) => return Ok(ReadOutcome::ProbedImage),
                            Some(ProbeResult::Empty) | None => return Ok(ReadOutcome::ProbedEmpty),
                            _ => {}
                        }
                    }
                    tracing::debug!(attempt, error = %message, "clipboard read attempt failed");
                    last_error = err;
                }
            }

            if attempt < attempts {
                sleep(self.config.retry_delay).await;
            }
        }

        // An empty success is authoritative over later transient failures.
        if let Some(raw) = empty_read {
            return Ok(ReadOutcome::Raw(raw));
        }

        Err(map_read_error(last_error))
    }

    async fn probe_detect(&self) -> Option<ProbeResult> {
        let start = Instant::now();
        let result = self.probe.detect().await;
        self.profiler.record("probe-detect", start.elapsed());
        result
    }

    /// Whether operations should resolve simulated results: a headless
    /// context with no test-injected backend.
    fn simulated(&self) -> bool {
        !self.facade.is_injected() && (self.headless)(true)
    }

    /// Safety net: unexpected errors in a headless context resolve to safe
    /// defaults instead of propagating into automated environments.
    fn headless_fallback<T>(&self, err: ClipboardError, fallback: T) -> Result<T, ClipboardError> {
        if !self.facade.is_injected() && (self.headless)(true) {
            tracing::warn!(error = %err, "clipboard error in headless context; returning simulated result");
            Ok(fallback)
        } else {
            Err(err)
        }
    }
}

fn map_read_error(err: BackendError) -> ClipboardError {
    match err {
        BackendError::Unavailable(msg) => ClipboardError::BackendUnavailable(msg),
        BackendError::ReadFailed(msg) | BackendError::WriteFailed(msg) => {
            ClipboardError::ReadFailed(msg)
        }
    }
}

fn map_write_error(err: BackendError) -> ClipboardError {
    match err {
        BackendError::Unavailable(msg) => ClipboardError::BackendUnavailable(msg),
        BackendError::ReadFailed(msg) | BackendError::WriteFailed(msg) => {
            ClipboardError::WriteFailed(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_windows_element_not_found() {
        assert!(is_platform_read_signature("Element not found. (0x8002802B)"));
        assert!(is_platform_read_signature("Elemento no encontrado"));
        assert!(is_platform_read_signature(
            "The clipboard contents were not available in the requested format"
        ));
    }

    #[test]
    fn ignores_ordinary_errors() {
        assert!(!is_platform_read_signature("access denied"));
        assert!(!is_platform_read_signature("transient glitch"));
        assert!(!is_platform_read_signature(""));
    }
}
