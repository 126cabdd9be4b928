//! Composition pipeline orchestration.
//!
//! Each call proceeds strictly in sequence: acquire assets, plan the
//! timeline, drive one FFmpeg process, publish, report. The scoped
//! workspace is released on every exit path when it drops.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use uuid::Uuid;
use validator::Validate;

use promocast_media::{
    build_plan, emit_command, fetch_asset, fetch_candidates, planned_duration, probe_duration,
    EncodeInputs, FfmpegRunner, Workspace,
};
use promocast_models::{CompositionRequest, OutputProfile, ProcessingResult};
use promocast_storage::{PublishOutcome, Publisher};

use crate::config::ComposerConfig;
use crate::error::{ComposeError, ComposeResult};
use crate::logging::RequestLogger;

/// Shared composition pipeline.
///
/// Holds no per-request state; every call owns its own workspace. The
/// hosting platform bounds how many calls run concurrently.
pub struct Composer {
    config: ComposerConfig,
    http: reqwest::Client,
    publisher: Arc<dyn Publisher>,
    profile: OutputProfile,
}

impl Composer {
    pub fn new(config: ComposerConfig, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            publisher,
            profile: OutputProfile::default(),
        }
    }

    /// Process one composition request.
    ///
    /// Never returns an error: every failure becomes a structured failure
    /// result at this boundary.
    pub async fn process(&self, request: CompositionRequest) -> ProcessingResult {
        let request_id = Uuid::new_v4().to_string();
        let logger = RequestLogger::new(request_id, "compose");

        match self.run(&logger, request).await {
            Ok(result) => {
                counter!("promocast_compose_success_total").increment(1);
                logger.log_completion("composition finished");
                result
            }
            Err(e) => {
                counter!("promocast_compose_failure_total").increment(1);
                let report = e.report();
                logger.log_error(&report);
                ProcessingResult::failure(report)
            }
        }
    }

    async fn run(
        &self,
        logger: &RequestLogger,
        request: CompositionRequest,
    ) -> ComposeResult<ProcessingResult> {
        let request = request.clamped();
        request
            .validate()
            .map_err(|e| ComposeError::invalid_request(e.to_string()))?;

        logger.log_start(&format!(
            "{} video candidate(s), {} image candidate(s)",
            request.video_urls.len(),
            request.image_urls.len()
        ));

        let workspace = Workspace::new()?;

        // Narration drives the timeline.
        let narration = fetch_asset(
            &self.http,
            &request.audio_url,
            workspace.file("narration.mp3"),
        )
        .await?;

        let probed = probe_duration(&narration).await;
        let total_duration = planned_duration(probed, request.output_duration_extra);
        logger.log_progress(&format!("planned output duration {total_duration}s"));

        let videos = self
            .fetch_layer(request.capped_video_urls(), &workspace, "video", "mp4")
            .await?;
        let images = self
            .fetch_layer(request.capped_image_urls(), &workspace, "image", "jpg")
            .await?;

        // Only the first of each candidate list is composited.
        let plan = build_plan(
            !videos.is_empty(),
            !images.is_empty(),
            request.video_volume_reduction,
            total_duration,
        );

        let mut inputs = EncodeInputs::new(&narration);
        if let Some(video) = videos.first() {
            inputs = inputs.with_background_video(video);
        }
        if let Some(image) = images.first() {
            inputs = inputs.with_overlay_image(image);
        }

        let output = workspace.file(format!(
            "promocast_{}.mp4",
            Utc::now().format("%Y%m%d_%H%M%S")
        ));
        let cmd = emit_command(&plan, &self.profile, &inputs, &output)?
            .log_level(self.config.ffmpeg_log_level.clone());

        logger.log_progress("running encoder");
        FfmpegRunner::new()
            .with_timeout(self.config.encode_timeout_secs)
            .run(&cmd)
            .await?;

        let file_size = tokio::fs::metadata(&output).await?.len();
        let outcome = self.publish_step(logger, &output).await;

        Ok(ProcessingResult::success(
            outcome.video_url,
            outcome.video_data,
            outcome.upload_ready,
            total_duration,
            file_size,
            self.profile.specs(),
        ))
    }

    /// Fetch a capped candidate list, or only the first candidate when the
    /// wasted fetches are configured away.
    async fn fetch_layer(
        &self,
        urls: &[String],
        workspace: &Workspace,
        stem: &str,
        ext: &str,
    ) -> ComposeResult<Vec<PathBuf>> {
        let urls = if self.config.fetch_all_candidates {
            urls
        } else {
            &urls[..urls.len().min(1)]
        };
        Ok(fetch_candidates(&self.http, urls, workspace, stem, ext).await?)
    }

    /// Publish the encoded file, absorbing publish failures: the result
    /// stays successful with the upload marked not ready.
    async fn publish_step(&self, logger: &RequestLogger, output: &Path) -> PublishOutcome {
        match self.publisher.publish(output).await {
            Ok(outcome) => outcome,
            Err(e) => {
                logger.log_warning(&format!("publish failed, returning local file: {e}"));
                PublishOutcome::not_ready(output)
            }
        }
    }
}
