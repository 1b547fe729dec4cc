//! # Hybrid Recommendation Orchestrator
//!
//! Coordinates one recommendation request end to end:
//! 1. Snapshot the session's rating profile
//! 2. Run both scorers concurrently (collaborative fit + content lookup
//!    seeded by the first item the session rated)
//! 3. Outer-join the two score lists by item, blend with a fixed weight
//! 4. Filter out already-rated items
//! 5. Rank and return the top N
//!
//! Both scorers are CPU-bound, so they run under `spawn_blocking` and are
//! awaited together with `tokio::join!`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::session::SessionManager;
use data_loader::{ItemIndex, ModelBundle};
use pipeline::FilterPipeline;
use pipeline::filters::AlreadyRatedFilter;
use sources::{
    ColdStartSource, CollabSource, ContentSource, EngineError, RatingProfile, ScoreSource,
    ScoredItem,
};

/// Weight of the collaborative score in the blend; the content score gets
/// the complement.
pub const BLEND_ALPHA: f64 = 0.7;

/// How many similarity neighbours of the seed item enter the blend
const CONTENT_NEIGHBOURS: usize = 10;

/// Bounds for the requested result count
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 50;
pub const DEFAULT_LIMIT: usize = 10;

/// Final recommendation returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
}

/// Main orchestrator combining both scorers over per-session state.
pub struct HybridRecommender {
    bundle: Arc<ModelBundle>,
    collab: CollabSource,
    content: ContentSource,
    coldstart: ColdStartSource,
    filters: FilterPipeline,
    sessions: SessionManager,
}

impl HybridRecommender {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        let collab = CollabSource::new(bundle.clone());
        let content = ContentSource::new(bundle.clone());
        let coldstart = ColdStartSource::new(bundle.clone());
        let filters = FilterPipeline::new().add_filter(AlreadyRatedFilter);
        let sessions = SessionManager::new(bundle.n_items());
        Self {
            bundle,
            collab,
            content,
            coldstart,
            filters,
            sessions,
        }
    }

    /// Record a rating for `title` in the given session.
    ///
    /// The title is resolved against the catalog once, here; everything
    /// downstream works with the item's index.
    pub fn add_rating(&self, session: &str, title: &str, rating: f64) -> Result<(), EngineError> {
        let item = self.resolve(title)?;
        self.sessions.add_rating(session, item, title.trim(), rating)?;
        info!("Session {session}: rated item {item} ({:?}) = {rating}", title.trim());
        Ok(())
    }

    /// Drop all ratings in the given session.
    pub fn reset(&self, session: &str) {
        self.sessions.reset(session);
        info!("Session {session}: ratings reset");
    }

    /// Hybrid recommendations for a session.
    ///
    /// Fails with [`EngineError::NoRatings`] until at least one rating has
    /// been added. `limit` is clamped to `[MIN_LIMIT, MAX_LIMIT]`.
    pub async fn recommend(
        &self,
        session: &str,
        limit: usize,
    ) -> Result<Vec<Recommendation>, EngineError> {
        let start = Instant::now();
        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);

        let profile = self
            .sessions
            .snapshot(session)
            .filter(|p| !p.is_empty())
            .ok_or(EngineError::NoRatings)?;
        let seed = profile.seed().ok_or(EngineError::NoRatings)?;

        let (collab_scores, content_scores) = self.score_concurrently(&profile, seed).await?;
        info!(
            "Session {session}: {} collaborative and {} content candidates",
            collab_scores.len(),
            content_scores.len()
        );

        let blended = blend(&collab_scores, &content_scores);
        let filtered = self
            .filters
            .apply(blended, &profile)
            .map_err(|e| EngineError::ScoringFailed(e.to_string()))?;

        let mut ranked = filtered;
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.item.cmp(&b.item))
        });
        ranked.truncate(limit);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .map(|s| Recommendation {
                title: self.title_of(s.item),
                score: s.score,
            })
            .collect();

        info!(
            "Session {session}: {} recommendations in {:.2?}",
            recommendations.len(),
            start.elapsed()
        );
        Ok(recommendations)
    }

    /// Run both scorers concurrently on their own blocking threads.
    async fn score_concurrently(
        &self,
        profile: &RatingProfile,
        seed: ItemIndex,
    ) -> Result<(Vec<ScoredItem>, Vec<ScoredItem>), EngineError> {
        let (collab_result, content_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let collab = self.collab.clone();
                let profile = profile.clone();
                move || collab.fit_and_score(&profile)
            }),
            tokio::task::spawn_blocking({
                let content = self.content.clone();
                move || content.similar_to(seed, CONTENT_NEIGHBOURS)
            })
        );

        let collab_scores = collab_result
            .map_err(|e| EngineError::ScoringFailed(format!("collaborative scorer: {e}")))??;
        let content_scores = content_result
            .map_err(|e| EngineError::ScoringFailed(format!("content scorer: {e}")))?;
        Ok((collab_scores, content_scores))
    }

    /// Content-only lookup: top-k items similar to `title`.
    pub fn similar(&self, title: &str, k: usize) -> Result<Vec<Recommendation>, EngineError> {
        let seed = self.resolve(title)?;
        Ok(self
            .content
            .similar_to(seed, k)
            .into_iter()
            .map(|s| Recommendation {
                title: self.title_of(s.item),
                score: s.score,
            })
            .collect())
    }

    /// Preference-based sampling for callers with no rating history.
    pub fn cold_start(&self, genres: &[String], n: usize) -> Vec<String> {
        self.coldstart
            .sample(genres, n)
            .into_iter()
            .map(|item| self.title_of(item))
            .collect()
    }

    /// Catalog listing passthrough.
    pub fn titles(&self) -> Vec<String> {
        self.bundle.catalog().titles().map(str::to_string).collect()
    }

    fn resolve(&self, title: &str) -> Result<ItemIndex, EngineError> {
        self.bundle
            .catalog()
            .resolve(title)
            .ok_or_else(|| EngineError::UnknownTitle {
                title: title.trim().to_string(),
            })
    }

    fn title_of(&self, item: ItemIndex) -> String {
        self.bundle
            .catalog()
            .title(item)
            .unwrap_or_default()
            .to_string()
    }
}

/// Outer-join two score lists by item index and blend them.
///
/// An item present on only one side gets 0.0 for the other, so content
/// neighbours absent from the collaborative list still surface.
fn blend(collab: &[ScoredItem], content: &[ScoredItem]) -> Vec<ScoredItem> {
    let mut joined: HashMap<ItemIndex, (f64, f64)> = HashMap::new();
    for s in collab {
        joined.entry(s.item).or_insert((0.0, 0.0)).0 = s.score;
    }
    for s in content {
        joined.entry(s.item).or_insert((0.0, 0.0)).1 = s.score;
    }

    joined
        .into_iter()
        .map(|(item, (collab_score, content_score))| {
            ScoredItem::new(
                item,
                ScoreSource::Hybrid,
                BLEND_ALPHA * collab_score + (1.0 - BLEND_ALPHA) * content_score,
            )
        })
        .collect()
}
