//! Host-facing plugin lifecycle for the Region OCR feature.
//!
//! A host (tray app, screenshot tool, whatever owns the menus and global
//! hotkeys) drives this through `start` and `stop`. `start` runs the engine
//! probe exactly once; when the engine is unusable the feature simply never
//! comes into existence, so no menu entry, no hotkey and no temp file can
//! ever be produced.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::capture::{CaptureHost, RegionCapture};
use crate::clipboard::{ClipboardPublisher, ClipboardWriter};
use crate::config::{self, HotkeyBinding, OcrSettings};
use crate::engine::{OcrEngine, OcrEngineAdapter};
use crate::pipeline;

/// Menu label for the single exposed action.
pub const ACTION_LABEL: &str = "Region OCR";

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("hotkey registration failed: {0}")]
    Registration(String),
}

/// Opaque token for one live hotkey binding. Owned by the plugin; giving it
/// back to the registrar is the only way to release the binding.
#[derive(Debug, PartialEq, Eq)]
pub struct HotkeyHandle {
    id: u64,
}

impl HotkeyHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Implemented by the host that owns actual global-hotkey registration.
pub trait HotkeyRegistrar {
    fn register(&mut self, binding: &HotkeyBinding) -> Result<HotkeyHandle, HotkeyError>;
    fn unregister(&mut self, handle: HotkeyHandle);
}

/// The Region OCR feature, alive only while the engine is usable.
pub struct OcrPlugin<E> {
    adapter: OcrEngineAdapter<E>,
    settings: OcrSettings,
    hotkey: Option<HotkeyHandle>,
}

impl<E: OcrEngine> OcrPlugin<E> {
    /// Probes the engine once and, when usable, brings the feature up with
    /// the persisted settings. Returns `None` when the engine is missing or
    /// broken; the host must then expose neither menu entry nor hotkey.
    pub fn start(engine: E, registrar: &mut dyn HotkeyRegistrar) -> Option<Self> {
        Self::start_with_settings(engine, registrar, config::load_settings())
    }

    /// `start` with explicit settings, for hosts that manage persistence
    /// themselves (and for tests).
    pub fn start_with_settings(
        engine: E,
        registrar: &mut dyn HotkeyRegistrar,
        settings: OcrSettings,
    ) -> Option<Self> {
        let adapter = OcrEngineAdapter::new(engine);
        let availability = adapter.probe();
        if !availability.usable {
            warn!(
                diagnostic = %availability.diagnostic,
                "OCR engine not usable, feature disabled"
            );
            return None;
        }
        info!(diagnostic = %availability.diagnostic, "OCR engine available");

        let mut plugin = Self {
            adapter,
            settings,
            hotkey: None,
        };
        plugin.bind_hotkey(registrar);
        Some(plugin)
    }

    /// The single exposed action: ask the host for a region capture and run
    /// one pipeline invocation on its completion callback. The job config is
    /// captured by value, so a settings change mid-capture cannot tear one
    /// invocation's parameters.
    pub fn trigger<W: ClipboardWriter>(
        &self,
        host: &mut dyn CaptureHost,
        publisher: &mut ClipboardPublisher<W>,
    ) {
        debug!("Region OCR triggered");
        let job = self.settings.job_config();
        let adapter = &self.adapter;
        host.capture_region(Box::new(move |capture: Option<RegionCapture>| {
            pipeline::run_invocation(capture, adapter, publisher, &job);
        }));
    }

    /// Called when the host's settings dialog is confirmed: persist, then
    /// rebind the hotkey.
    pub fn settings_confirmed(
        &mut self,
        registrar: &mut dyn HotkeyRegistrar,
        settings: OcrSettings,
    ) {
        config::save_settings(&settings);
        self.apply_settings(registrar, settings);
    }

    /// Adopts new settings and re-registers the hotkey. The previous binding
    /// is always released before the new one is installed, so two live
    /// bindings can never trigger duplicate concurrent invocations.
    pub fn apply_settings(&mut self, registrar: &mut dyn HotkeyRegistrar, settings: OcrSettings) {
        self.release_hotkey(registrar);
        self.settings = settings;
        self.bind_hotkey(registrar);
    }

    /// Releases the hotkey. Idempotent; the host may call this any number of
    /// times during shutdown.
    pub fn stop(&mut self, registrar: &mut dyn HotkeyRegistrar) {
        debug!("Stopping Region OCR feature");
        self.release_hotkey(registrar);
    }

    pub fn action_label(&self) -> &'static str {
        ACTION_LABEL
    }

    /// Display string for the current hotkey, empty when registration
    /// failed and only the menu entry is live.
    pub fn hotkey_label(&self) -> String {
        if self.hotkey.is_some() {
            self.settings.hotkey.label()
        } else {
            String::new()
        }
    }

    pub fn settings(&self) -> &OcrSettings {
        &self.settings
    }

    fn bind_hotkey(&mut self, registrar: &mut dyn HotkeyRegistrar) {
        match registrar.register(&self.settings.hotkey) {
            Ok(handle) => {
                info!(shortcut = %self.settings.hotkey.label(), "Registered OCR hotkey");
                self.hotkey = Some(handle);
            }
            Err(e) => {
                // Menu entry still works without a hotkey.
                warn!(error = %e, "Failed to register OCR hotkey");
                self.hotkey = None;
            }
        }
    }

    fn release_hotkey(&mut self, registrar: &mut dyn HotkeyRegistrar) {
        if let Some(handle) = self.hotkey.take() {
            registrar.unregister(handle);
        }
    }
}
