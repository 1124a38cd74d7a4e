//! CRUD round-trips through the repository layer.

use chrono::Utc;
use sqlx::PgPool;

use shortscout_core::channel_risk::{RISK_FORBIDDEN, RISK_WARNING};
use shortscout_core::community::aggregate_reports;
use shortscout_core::heuristic::{AnalysisOutcome, AutomatedAnalysis};
use shortscout_core::grade::recommendation_for;
use shortscout_db::models::analysis_snapshot::UpsertAnalysisSnapshot;
use shortscout_db::models::excluded_channel::CreateExcludedChannel;
use shortscout_db::models::safety_report::CreateSafetyReport;
use shortscout_db::models::title::{CreateTitle, Title, UpdateTitle};
use shortscout_db::repositories::{
    AnalysisSnapshotRepo, ExcludedChannelRepo, SafetyReportRepo, TitleRepo,
};

async fn seed_title(pool: &PgPool, name: &str) -> Title {
    TitleRepo::create(
        pool,
        &CreateTitle {
            kind: "movie".to_string(),
            name: name.to_string(),
            release_date: None,
            rating: Some(8.2),
            audience_count: Some(3_000_000),
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn title_crud(pool: PgPool) {
    let title = seed_title(&pool, "올드보이").await;
    assert_eq!(title.kind, "movie");
    assert_eq!(title.safety_rating_count, 0);
    assert!(!title.admin_recommended);

    let fetched = TitleRepo::find_by_id(&pool, title.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "올드보이");

    let updated = TitleRepo::update(
        &pool,
        title.id,
        &UpdateTitle {
            admin_recommended: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.admin_recommended);
    // Untouched fields keep their values.
    assert_eq!(updated.rating, 8.2);

    assert!(TitleRepo::delete(&pool, title.id).await.unwrap());
    assert!(TitleRepo::find_by_id(&pool, title.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_append_and_summary_cache(pool: PgPool) {
    let title = seed_title(&pool, "기생충").await;

    for _ in 0..3 {
        SafetyReportRepo::create(
            &pool,
            title.id,
            &CreateSafetyReport {
                shorts_created: true,
                copyright_issue: Some(false),
                shorts_deleted: Some(false),
                months_since_upload: Some(6),
                comment: None,
                is_admin_rating: false,
            },
        )
        .await
        .unwrap();
    }

    let rows = SafetyReportRepo::list_by_title(&pool, title.id).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(SafetyReportRepo::count_by_title(&pool, title.id).await.unwrap(), 3);

    // Recompute the summary from rows and cache it, as the API does.
    let now = Utc::now();
    let inputs: Vec<_> = rows.iter().map(|r| r.scoring_input()).collect();
    let summary = aggregate_reports(&inputs, now);
    assert_eq!(summary.score, 9.0);

    TitleRepo::update_safety_cache(&pool, title.id, summary.score, summary.count as i32, now)
        .await
        .unwrap();

    let cached = TitleRepo::find_by_id(&pool, title.id).await.unwrap().unwrap();
    assert_eq!(cached.safety_rating_average, 9.0);
    assert_eq!(cached.safety_rating_count, 3);
    assert!(cached.safety_last_updated.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn registry_snapshot_load(pool: PgPool) {
    for (channel_id, risk) in [("UC_official", RISK_FORBIDDEN), ("UC_clips", RISK_WARNING)] {
        ExcludedChannelRepo::create(
            &pool,
            &CreateExcludedChannel {
                channel_id: channel_id.to_string(),
                channel_name: channel_id.to_string(),
                channel_url: None,
                risk_level: risk.to_string(),
                reason: Some("registry test".to_string()),
            },
        )
        .await
        .unwrap();
    }

    let registry = ExcludedChannelRepo::load_registry(&pool).await.unwrap();
    assert_eq!(registry.risk_of("UC_official"), Some(RISK_FORBIDDEN));
    assert_eq!(registry.risk_of("UC_clips"), Some(RISK_WARNING));
    assert_eq!(registry.risk_of("UC_other"), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn snapshot_upsert_overwrites(pool: PgPool) {
    let title = seed_title(&pool, "오징어 게임").await;
    let now = Utc::now();

    // First run: nothing found.
    let empty = UpsertAnalysisSnapshot::from_outcome(
        &AnalysisOutcome::NoVideosFound,
        "#영화 #오징어 게임 shorts",
        now,
    );
    let saved = AnalysisSnapshotRepo::upsert(&pool, title.id, &empty).await.unwrap();
    assert!(saved.no_videos_found);
    assert!(saved.total_score.is_none());
    assert!(saved.grade.is_none());

    // Second run: real analysis replaces the empty one.
    let analysis = AutomatedAnalysis {
        total_postings: 10,
        sampled_count: 10,
        old_count: 8,
        medium_count: 0,
        recent_count: 2,
        earliest_published_at: Some(now),
        unique_channel_count: 10,
        is_forbidden: false,
        forbidden_channels: Vec::new(),
        has_warning_channel: false,
        warning_channels: Vec::new(),
        safety_score: 9,
        competition_score: 8,
        total_score: 8.6,
        recommendation: recommendation_for(8.6, 9, 8),
        analyzed_at: now,
    };
    let body = UpsertAnalysisSnapshot::from_outcome(
        &AnalysisOutcome::Analyzed(analysis),
        "#영화 #오징어 게임 shorts",
        now,
    );
    let replaced = AnalysisSnapshotRepo::upsert(&pool, title.id, &body).await.unwrap();
    assert_eq!(replaced.id, saved.id, "upsert must overwrite, not append");
    assert!(!replaced.no_videos_found);
    assert_eq!(replaced.total_score, Some(8.6));
    assert_eq!(replaced.grade.as_deref(), Some("A"));

    let fetched = AnalysisSnapshotRepo::find_by_title(&pool, title.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.safety_score, Some(9));
}
