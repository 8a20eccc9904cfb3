use std::path::{Path, PathBuf};

use log::{error, info};

use crate::compose;
use crate::config::AppConfig;
use crate::detection::{BoundingBox, BoxDetector, Detection};
use crate::errors::MockupResult;
use crate::template::{
    params_path_for_box, save_params, PlacementOverrides, PlacementParams, TemplateInfo,
    TemplateStore,
};
use crate::utils::image_utils::{decode_file, encode_png};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Outcome of processing every box template in a directory
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Box templates whose parameters were written
    pub succeeded: Vec<PathBuf>,
    /// Box templates that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Main interface to the MockupKit library
pub struct MockupKit {
    logger: Logger,
    config: AppConfig,
    store: TemplateStore,
    detector: BoxDetector,
}

impl MockupKit {
    /// Create a new MockupKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "mockupkit.log"
    /// * `config` - Template directory, detection and compose settings
    ///
    /// # Returns
    /// A MockupKit instance or an error if initialization fails
    pub fn new(log_file: Option<&Path>, config: AppConfig) -> MockupResult<Self> {
        let log_path = log_file.unwrap_or_else(|| Path::new("mockupkit.log"));
        let logger = Logger::new(log_path)?;
        let store = TemplateStore::new(config.templates_dir.clone());
        let detector = config.detection.detector();

        Ok(MockupKit { logger, config, store, detector })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.store
    }

    /// Detect the placeholder box in an image file
    ///
    /// # Arguments
    /// * `image_path` - Box template to scan
    ///
    /// # Returns
    /// The detection, or `NoMatchFound` if the configured color is absent
    pub fn detect_box(&self, image_path: &Path) -> MockupResult<Detection> {
        info!("Detecting box in {}", image_path.display());

        let decoded = decode_file(image_path)?;
        let detection = self.detector.detect(&decoded.raster()?)?;

        info!(
            "Box detected: {} pixels, position X={}, Y={}, size {}x{}",
            detection.matched_pixels,
            detection.bounds.x,
            detection.bounds.y,
            detection.bounds.width,
            detection.bounds.height
        );
        self.logger.log_detection(image_path, &detection)?;

        Ok(detection)
    }

    /// Detect the box in a box template and save it as the template's parameters
    ///
    /// # Returns
    /// The detected box and the path of the parameter file written
    pub fn process_template(&self, box_path: &Path) -> MockupResult<(BoundingBox, PathBuf)> {
        let detection = self.detect_box(box_path)?;
        let params_path = params_path_for_box(box_path);

        save_params(&params_path, &detection.bounds)?;
        info!("Parameters saved to {}", params_path.display());
        self.logger.log(&format!("Parameters saved to {}", params_path.display()))?;

        Ok((detection.bounds, params_path))
    }

    /// Process every `*-box.png` in `dir` (the template directory by default)
    ///
    /// A failing template is recorded in the summary and does not stop the batch.
    pub fn process_all_templates(&self, dir: Option<&Path>, show_progress: bool) -> MockupResult<BatchSummary> {
        let store = match dir {
            Some(d) => TemplateStore::new(d),
            None => self.store.clone(),
        };

        let box_files = store.box_templates()?;
        info!("Found {} box templates in {}", box_files.len(), store.root().display());

        let progress = if show_progress {
            ProgressTracker::new(box_files.len() as u64, "Detecting boxes")
        } else {
            ProgressTracker::hidden(box_files.len() as u64)
        };

        let mut summary = BatchSummary::default();
        for box_path in box_files {
            let label = box_path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            progress.set_message(&label);

            match self.process_template(&box_path) {
                Ok(_) => summary.succeeded.push(box_path),
                Err(e) => {
                    error!("Failed to process {}: {}", label, e);
                    self.logger.log(&format!("Failed to process {}: {}", label, e))?;
                    summary.failed.push((box_path, e.to_string()));
                }
            }
            progress.increment(1);
        }
        progress.finish();

        self.logger.log(&format!(
            "Batch complete: {} succeeded, {} failed, {} total",
            summary.succeeded.len(),
            summary.failed.len(),
            summary.total()
        ))?;

        Ok(summary)
    }

    /// List templates in the template directory
    pub fn list_templates(&self) -> MockupResult<Vec<TemplateInfo>> {
        self.store.list()
    }

    /// Place a design on an arbitrary mockup image
    ///
    /// # Arguments
    /// * `design_path` - Design image
    /// * `mockup_path` - Background image
    /// * `overrides` - Explicit placement values; missing ones are defaulted
    ///
    /// # Returns
    /// PNG-encoded result
    pub fn create_mockup(&self,
                         design_path: &Path,
                         mockup_path: &Path,
                         overrides: &PlacementOverrides) -> MockupResult<Vec<u8>> {
        info!("Creating mockup of {} on {}", design_path.display(), mockup_path.display());
        self.render(design_path, mockup_path, &PlacementParams::from(*overrides))
    }

    /// Place a design on a named template using its stored parameters
    ///
    /// # Arguments
    /// * `design_path` - Design image
    /// * `template` - Template name, resolved to `<templates_dir>/<template>.png`
    /// * `overrides` - Values taking precedence over the stored parameters
    ///
    /// # Returns
    /// PNG-encoded result, or `TemplateNotFound` when the template is missing
    pub fn create_mockup_from_template(&self,
                                       design_path: &Path,
                                       template: &str,
                                       overrides: &PlacementOverrides) -> MockupResult<Vec<u8>> {
        let mockup_path = self.store.require_template(template)?;
        let params = self.store.load_params(template)?.merged_with(overrides);

        info!("Creating mockup of {} on template '{}'", design_path.display(), template);
        self.render(design_path, &mockup_path, &params)
    }

    /// Prepare a design for a template, inverting it for dark templates
    ///
    /// # Returns
    /// PNG-encoded design
    pub fn adjust_design(&self, design_path: &Path, template: &str) -> MockupResult<Vec<u8>> {
        let design = image::open(design_path)?;
        let adjusted = compose::adjust_design(&design, template, &self.config.compose.dark_keywords);
        encode_png(&adjusted)
    }

    fn render(&self, design_path: &Path, mockup_path: &Path, params: &PlacementParams) -> MockupResult<Vec<u8>> {
        let design = image::open(design_path)?;
        let mockup = image::open(mockup_path)?;

        let (result, placement) = compose::create_mockup(&mockup, &design, params)?;
        self.logger.log(&format!(
            "Composited {} onto {} at ({}, {}) size {}x{} rotation {}",
            design_path.display(),
            mockup_path.display(),
            placement.x,
            placement.y,
            placement.width,
            placement.height,
            placement.rotation
        ))?;

        encode_png(&image::DynamicImage::ImageRgba8(result))
    }
}
