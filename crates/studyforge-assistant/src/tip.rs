use std::sync::Arc;

use studyforge_persist::{DailyTip, DailyTipRepository};
use studyforge_types::Clock;

use crate::error::Result;
use crate::prompts;
use crate::service::AssistantService;

/// Tip of the day, fetched at most once per calendar day
#[derive(Clone)]
pub struct DailyTipCache {
    repo: DailyTipRepository,
    clock: Arc<dyn Clock>,
}

impl DailyTipCache {
    pub fn new(repo: DailyTipRepository, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Cached tip when issued today, otherwise a fresh one from the model.
    /// The fallback tip is cached like any other, so a failing day costs one call.
    pub async fn get(&self, service: &AssistantService) -> Result<String> {
        let today = self.clock.today();
        if let Some(cached) = self.repo.load().filter(|t| t.is_fresh(&today)) {
            return Ok(cached.tip);
        }

        let tip = service.study_tip().await?;
        if tip == prompts::TIP_FALLBACK {
            tracing::debug!("Caching fallback tip until tomorrow");
        }
        if let Err(e) = self.repo.save(&DailyTip::new(tip.clone(), today)) {
            tracing::warn!(error = %e, "Failed to cache daily tip");
        }
        Ok(tip)
    }
}
