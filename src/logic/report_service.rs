use crate::error::{FishOpsError, Result};
use crate::logic::report::{report_file_name, ReportComposer};
use crate::models::{ReportSpec, WeatherSample};
use crate::render::DocumentRenderer;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;

/// Composes and writes reports off the async runtime.
#[derive(Clone)]
pub struct ReportService {
    renderer: Arc<dyn DocumentRenderer>,
}

impl ReportService {
    pub fn new(renderer: Box<dyn DocumentRenderer>) -> Self {
        Self {
            renderer: Arc::from(renderer),
        }
    }

    /// Write one report and return the path of the created file.
    ///
    /// Composition and rendering run on a blocking worker. Any failure,
    /// including a panicked worker, comes back as `ReportWriteFailure`.
    pub async fn generate(
        &self,
        spec: ReportSpec,
        sample: WeatherSample,
        activities: Vec<String>,
    ) -> Result<PathBuf> {
        let renderer = Arc::clone(&self.renderer);

        let job = tokio::task::spawn_blocking(move || -> Result<PathBuf> {
            std::fs::create_dir_all(&spec.output_dir).map_err(|e| {
                FishOpsError::ReportWriteFailure(format!(
                    "cannot create {}: {}",
                    spec.output_dir.display(),
                    e
                ))
            })?;

            let now = Local::now();
            let path = spec
                .output_dir
                .join(report_file_name(&spec, now, renderer.extension()));
            let doc = ReportComposer::compose(&spec, &sample, &activities, now);
            renderer.render(&doc, &path)?;
            Ok(path)
        });

        let result = match job.await {
            Ok(result) => result.map_err(|e| match e {
                FishOpsError::ReportWriteFailure(_) => e,
                other => FishOpsError::ReportWriteFailure(other.to_string()),
            }),
            Err(e) => Err(FishOpsError::ReportWriteFailure(format!(
                "report worker failed: {}",
                e
            ))),
        };

        match &result {
            Ok(path) => tracing::info!("Report written to {}", path.display()),
            Err(e) => tracing::warn!("Report generation failed: {}", e),
        }
        result
    }
}
