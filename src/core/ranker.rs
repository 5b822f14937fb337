use crate::models::{Profile, RankingOptions, ScoredCandidate};
use crate::core::{filters::filter_candidates, similarity::cosine_similarity};
use crate::services::{GatewayError, ProfileGateway};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a ranking call
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result of ranking one already-fetched pool
#[derive(Debug, Clone, PartialEq)]
pub struct RankOutcome {
    pub matches: Vec<ScoredCandidate>,
    /// Pool size after removing the target itself
    pub total_candidates: usize,
    /// Candidates that passed eligibility filtering
    pub eligible: usize,
}

/// Rank a pool against a target profile without any I/O
///
/// # Pipeline Stages
/// 1. Drop the target's own profile from the pool
/// 2. Location and age-window filtering
/// 3. Hobby similarity scoring
/// 4. Stable sort by descending score, then truncation to `top_n`
///
/// Equal scores keep the pool's order, so a fixed pool always ranks the
/// same way.
pub fn rank_pool(
    target: &Profile,
    pool: &[Profile],
    age_tolerance: u32,
    top_n: usize,
) -> RankOutcome {
    let total_candidates = pool
        .iter()
        .filter(|p| p.user_id != target.user_id)
        .count();

    let target_hobbies = target.hobby_set();
    let eligible: Vec<&Profile> = filter_candidates(target, pool, age_tolerance)
        .into_iter()
        .filter(|p| p.user_id != target.user_id)
        .collect();
    let eligible_count = eligible.len();

    let mut scored: Vec<ScoredCandidate> = eligible
        .into_iter()
        .map(|candidate| ScoredCandidate {
            id: candidate.user_id.clone(),
            score: cosine_similarity(&target_hobbies, &candidate.hobby_set()),
        })
        .collect();

    // sort_by is stable: ties stay in pool order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);

    RankOutcome {
        matches: scored,
        total_candidates,
        eligible: eligible_count,
    }
}

/// Ranking orchestrator over a profile gateway
///
/// Holds no mutable state; one instance serves any number of concurrent
/// ranking calls.
#[derive(Clone)]
pub struct MatchRanker {
    gateway: Arc<dyn ProfileGateway>,
    options: RankingOptions,
}

impl MatchRanker {
    pub fn new(gateway: Arc<dyn ProfileGateway>, options: RankingOptions) -> Self {
        Self { gateway, options }
    }

    pub fn with_default_options(gateway: Arc<dyn ProfileGateway>) -> Self {
        Self::new(gateway, RankingOptions::default())
    }

    pub fn options(&self) -> RankingOptions {
        self.options
    }

    /// Rank candidates for `target_id`
    ///
    /// The target lookup and the pool listing run concurrently; scoring
    /// starts only once both have returned. `top_n` falls back to the
    /// configured default.
    ///
    /// # Errors
    /// `RankError::NotFound` if the target has no profile; gateway errors
    /// pass through unchanged.
    pub async fn rank(
        &self,
        target_id: &str,
        top_n: Option<usize>,
    ) -> Result<Vec<ScoredCandidate>, RankError> {
        Ok(self.rank_detailed(target_id, top_n).await?.matches)
    }

    /// Same as [`MatchRanker::rank`], keeping the pool statistics
    pub async fn rank_detailed(
        &self,
        target_id: &str,
        top_n: Option<usize>,
    ) -> Result<RankOutcome, RankError> {
        let top_n = top_n.unwrap_or(self.options.default_top_n);

        let (target, pool) = tokio::try_join!(
            self.gateway.get_profile(target_id),
            self.gateway.list_profiles(),
        )?;

        let target = target.ok_or_else(|| RankError::NotFound(target_id.to_string()))?;

        let outcome = rank_pool(&target, &pool, self.options.age_tolerance, top_n);

        tracing::debug!(
            "Ranked {} of {} eligible candidates for {} (pool: {})",
            outcome.matches.len(),
            outcome.eligible,
            target_id,
            outcome.total_candidates
        );

        Ok(outcome)
    }
}

impl std::fmt::Debug for MatchRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchRanker")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
