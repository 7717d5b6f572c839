//! End-to-end scenarios over the capture-to-clipboard pipeline, with a
//! scripted engine and a recording clipboard writer standing in for the
//! external collaborators. The temp artifact store is the real one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

use textgrab::clipboard::ClipboardError;
use textgrab::engine::EngineError;
use textgrab::plugin::{HotkeyError, HotkeyHandle, HotkeyRegistrar};
use textgrab::{
    CaptureDetails, CaptureHost, ClipboardPublisher, ClipboardWriter, EngineAvailability,
    OcrEngine, OcrJobConfig, OcrPlugin, OcrSettings, RegionCapture,
};

#[derive(Default)]
struct EngineScript {
    available: bool,
    text: Option<String>,
    fault: bool,
    seen_paths: Mutex<Vec<PathBuf>>,
    seen_dimensions: Mutex<Vec<(u32, u32)>>,
    seen_jobs: Mutex<Vec<OcrJobConfig>>,
}

#[derive(Clone)]
struct ScriptedEngine(Arc<EngineScript>);

impl ScriptedEngine {
    fn returning(text: &str) -> Self {
        Self(Arc::new(EngineScript {
            available: true,
            text: Some(text.to_string()),
            ..Default::default()
        }))
    }

    fn faulting() -> Self {
        Self(Arc::new(EngineScript {
            available: true,
            fault: true,
            ..Default::default()
        }))
    }

    fn unavailable() -> Self {
        Self(Arc::new(EngineScript::default()))
    }

    fn script(&self) -> &EngineScript {
        &self.0
    }
}

impl OcrEngine for ScriptedEngine {
    fn probe(&self) -> EngineAvailability {
        if self.0.available {
            EngineAvailability::usable("scripted")
        } else {
            EngineAvailability::unusable("engine not installed")
        }
    }

    fn recognize(&self, path: &Path, job: &OcrJobConfig) -> Result<String, EngineError> {
        self.0.seen_paths.lock().unwrap().push(path.to_path_buf());
        self.0.seen_jobs.lock().unwrap().push(job.clone());
        let decoded = image::open(path)
            .map_err(|e| EngineError::Invocation(format!("unreadable input: {e}")))?;
        self.0
            .seen_dimensions
            .lock()
            .unwrap()
            .push((decoded.width(), decoded.height()));
        if self.0.fault {
            return Err(EngineError::Invocation("simulated engine fault".into()));
        }
        Ok(self.0.text.clone().unwrap_or_default())
    }
}

#[derive(Clone, Default)]
struct RecordingWriter {
    writes: Arc<Mutex<Vec<String>>>,
}

impl ClipboardWriter for RecordingWriter {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Delivers one prepared capture (or a cancellation) per trigger.
struct SingleShotHost {
    capture: Option<RegionCapture>,
}

impl CaptureHost for SingleShotHost {
    fn capture_region(&mut self, on_capture: textgrab::capture::CaptureCallback<'_>) {
        on_capture(self.capture.take());
    }
}

#[derive(Default)]
struct CountingRegistrar {
    registered: u64,
}

impl HotkeyRegistrar for CountingRegistrar {
    fn register(
        &mut self,
        _binding: &textgrab::HotkeyBinding,
    ) -> Result<HotkeyHandle, HotkeyError> {
        self.registered += 1;
        Ok(HotkeyHandle::new(self.registered))
    }

    fn unregister(&mut self, _handle: HotkeyHandle) {}
}

fn solid_capture(width: u32, height: u32) -> RegionCapture {
    RegionCapture::new(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([40, 40, 40]))),
        CaptureDetails::new(Some("test window".to_string())),
    )
}

fn english_settings() -> OcrSettings {
    OcrSettings {
        language: "ENGLISH".to_string(),
        ..Default::default()
    }
}

#[test]
fn scenario_a_recognized_text_reaches_the_clipboard() {
    let engine = ScriptedEngine::returning("Hello World");
    let mut registrar = CountingRegistrar::default();
    let plugin =
        OcrPlugin::start_with_settings(engine.clone(), &mut registrar, english_settings())
            .expect("usable engine must start the feature");

    let writer = RecordingWriter::default();
    let mut publisher = ClipboardPublisher::new(writer.clone());
    let mut host = SingleShotHost {
        capture: Some(solid_capture(200, 200)),
    };
    plugin.trigger(&mut host, &mut publisher);

    assert_eq!(*writer.writes.lock().unwrap(), vec!["Hello World"]);

    let script = engine.script();
    assert_eq!(
        script.seen_jobs.lock().unwrap()[0].language,
        "ENGLISH"
    );
    let paths = script.seen_paths.lock().unwrap();
    assert_eq!(paths.len(), 1);
    assert!(!paths[0].exists(), "temp file must be removed");
}

#[test]
fn scenario_b_undersized_capture_is_padded_before_recognition() {
    let engine = ScriptedEngine::returning("tiny");
    let mut registrar = CountingRegistrar::default();
    let plugin =
        OcrPlugin::start_with_settings(engine.clone(), &mut registrar, english_settings())
            .unwrap();

    let writer = RecordingWriter::default();
    let mut publisher = ClipboardPublisher::new(writer.clone());
    let mut host = SingleShotHost {
        capture: Some(solid_capture(50, 40)),
    };
    plugin.trigger(&mut host, &mut publisher);

    // The engine saw the grown canvas, not the raw capture.
    assert_eq!(
        *engine.script().seen_dimensions.lock().unwrap(),
        vec![(130, 130)]
    );
    assert_eq!(*writer.writes.lock().unwrap(), vec!["tiny"]);
}

#[test]
fn scenario_c_failed_probe_disables_the_feature_entirely() {
    let engine = ScriptedEngine::unavailable();
    let mut registrar = CountingRegistrar::default();
    let plugin =
        OcrPlugin::start_with_settings(engine.clone(), &mut registrar, english_settings());

    assert!(plugin.is_none(), "feature must not be exposed");
    assert_eq!(registrar.registered, 0, "no hotkey may be registered");
    assert!(
        engine.script().seen_paths.lock().unwrap().is_empty(),
        "no capture can reach the engine, so no temp file is ever created"
    );
}

#[test]
fn scenario_d_empty_recognition_leaves_the_clipboard_alone() {
    let engine = ScriptedEngine::returning("");
    let mut registrar = CountingRegistrar::default();
    let plugin =
        OcrPlugin::start_with_settings(engine.clone(), &mut registrar, english_settings())
            .unwrap();

    let writer = RecordingWriter::default();
    let mut publisher = ClipboardPublisher::new(writer.clone());
    let mut host = SingleShotHost {
        capture: Some(solid_capture(200, 200)),
    };
    plugin.trigger(&mut host, &mut publisher);

    assert!(writer.writes.lock().unwrap().is_empty());
    let paths = engine.script().seen_paths.lock().unwrap();
    assert!(!paths[0].exists());
}

#[test]
fn engine_fault_cleans_up_and_publishes_nothing() {
    let engine = ScriptedEngine::faulting();
    let mut registrar = CountingRegistrar::default();
    let plugin =
        OcrPlugin::start_with_settings(engine.clone(), &mut registrar, english_settings())
            .unwrap();

    let writer = RecordingWriter::default();
    let mut publisher = ClipboardPublisher::new(writer.clone());
    let mut host = SingleShotHost {
        capture: Some(solid_capture(200, 200)),
    };
    plugin.trigger(&mut host, &mut publisher);

    assert!(writer.writes.lock().unwrap().is_empty());
    let paths = engine.script().seen_paths.lock().unwrap();
    assert_eq!(paths.len(), 1);
    assert!(!paths[0].exists(), "fault must not leave the temp file behind");
}

#[test]
fn cancelled_capture_is_a_clean_no_op() {
    let engine = ScriptedEngine::returning("never used");
    let mut registrar = CountingRegistrar::default();
    let plugin =
        OcrPlugin::start_with_settings(engine.clone(), &mut registrar, english_settings())
            .unwrap();

    let writer = RecordingWriter::default();
    let mut publisher = ClipboardPublisher::new(writer.clone());
    let mut host = SingleShotHost { capture: None };
    plugin.trigger(&mut host, &mut publisher);

    assert!(engine.script().seen_paths.lock().unwrap().is_empty());
    assert!(writer.writes.lock().unwrap().is_empty());
}
