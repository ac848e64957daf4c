//! Cohort workflow tests against a real MySQL database.
//!
//! These drive `services::cohort` end to end, transactions included. They
//! need `DATABASE_URL` pointing at a MySQL server the test user may create
//! databases on. Run with `cargo test -p coachhub-api -- --ignored`.

use assert_matches::assert_matches;
use coachhub_api::error::AppError;
use coachhub_api::services::cohort;
use coachhub_core::cohort::{plan_cohort, CreateCohort, UpdateCohort};
use coachhub_core::corporate::UnlimitedPriceInput;
use coachhub_core::error::CoreError;
use coachhub_db::repositories::{
    CohortRepo, EnrollmentRepo, FeedbackFrequencyRepo, InteractionRepo, UnlimitedPriceRepo,
};
use serde_json::json;
use sqlx::MySqlPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CORPORATE_ID: i64 = 11;

fn request(extra: serde_json::Value) -> CreateCohort {
    let mut body = json!({
        "name": "Spring",
        "corporateId": CORPORATE_ID,
        "mentoringType": "ONE_TO_ONE",
        "startDate": "2024-01-01",
        "endDate": "2024-01-31",
        "allowedMentees": 10,
        "minPrice": 100.0,
        "maxPrice": 200.0,
        "noOfInteractions": 4,
        "coachSearchType": ["ALGORITHMIC_MATCHES"]
    });
    if let (Some(map), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        map.extend(extra.clone());
    }
    serde_json::from_value(body).unwrap()
}

fn patch(body: serde_json::Value) -> UpdateCohort {
    serde_json::from_value(body).unwrap()
}

fn tiers(prices: &[(i32, f64)]) -> Vec<UnlimitedPriceInput> {
    prices
        .iter()
        .map(|&(month, price)| UnlimitedPriceInput { month, price })
        .collect()
}

async fn cohort_count(pool: &MySqlPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cohorts")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn feedback_metadata(pool: &MySqlPool, cohort_id: i64) -> Vec<Vec<String>> {
    FeedbackFrequencyRepo::list_by_cohort(pool, cohort_id)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.metadata.0)
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_create_writes_cohort_interactions_and_feedback(pool: MySqlPool) {
    let detail = cohort::create(&pool, &request(json!({"metadata": ["2"]})))
        .await
        .unwrap();

    assert_eq!(detail.cohort.name, "Spring");
    assert_eq!(detail.interactions.len(), 4);
    assert_eq!(detail.feedback_frequencies.len(), 1);
    assert_eq!(feedback_metadata(&pool, detail.cohort.id).await, vec![vec!["2"]]);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_name_collision_is_a_conflict(pool: MySqlPool) {
    cohort::create(&pool, &request(json!({}))).await.unwrap();

    let result = cohort::create(&pool, &request(json!({}))).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Conflict(msg))) if msg.contains("Spring"));
    assert_eq!(cohort_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_failed_rule_leaves_no_rows(pool: MySqlPool) {
    let broken = request(json!({"name": "Broken", "mentoringType": "GROUP"}));

    let result = cohort::create(&pool, &broken).await;
    assert_matches!(result, Err(AppError::Core(CoreError::InvalidInput(msg))) if msg.contains("groupSize"));

    assert_eq!(cohort_count(&pool).await, 0);
    let leftover: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interactions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(leftover, 0);
}

// ---------------------------------------------------------------------------
// Update: feedback toggle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_ff_mandatory_toggle_adds_and_removes_last_session(pool: MySqlPool) {
    let created = cohort::create(&pool, &request(json!({"metadata": ["2"]})))
        .await
        .unwrap();
    let id = created.cohort.id;

    cohort::update(&pool, id, &patch(json!({"isFfMandatory": true})))
        .await
        .unwrap();
    let rows = FeedbackFrequencyRepo::list_by_cohort(&pool, id).await.unwrap();
    assert_eq!(rows[0].metadata.0, vec!["2", "4"]);
    assert_eq!(rows[0].frequency, 2);
    assert!(cohort::find(&pool, id).await.unwrap().is_ff_mandatory);

    cohort::update(&pool, id, &patch(json!({"isFfMandatory": false})))
        .await
        .unwrap();
    assert_eq!(feedback_metadata(&pool, id).await, vec![vec!["2"]]);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_ff_mandatory_on_without_rows_creates_one(pool: MySqlPool) {
    let created = cohort::create(&pool, &request(json!({}))).await.unwrap();
    assert!(created.feedback_frequencies.is_empty());

    cohort::update(&pool, created.cohort.id, &patch(json!({"isFfMandatory": 1})))
        .await
        .unwrap();

    let rows = FeedbackFrequencyRepo::list_by_cohort(&pool, created.cohort.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].metadata.0, vec!["4"]);
    assert_eq!(rows[0].frequency, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_ff_mandatory_off_deletes_emptied_rows(pool: MySqlPool) {
    let created = cohort::create(
        &pool,
        &request(json!({"metadata": ["4"], "isFfMandatory": true})),
    )
    .await
    .unwrap();
    assert_eq!(feedback_metadata(&pool, created.cohort.id).await, vec![vec!["4"]]);

    cohort::update(&pool, created.cohort.id, &patch(json!({"isFfMandatory": false})))
        .await
        .unwrap();
    assert!(feedback_metadata(&pool, created.cohort.id).await.is_empty());
}

// ---------------------------------------------------------------------------
// Update: unlimited pricing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_unlimited_prices_replaced_then_cleared(pool: MySqlPool) {
    let created = cohort::create(&pool, &request(json!({"isUnlimited": true})))
        .await
        .unwrap();
    let mut conn = pool.acquire().await.unwrap();
    UnlimitedPriceRepo::create_many(&mut conn, CORPORATE_ID, &tiers(&[(1, 10.0), (3, 25.0)]))
        .await
        .unwrap();
    drop(conn);

    cohort::update(
        &pool,
        created.cohort.id,
        &patch(json!({"unlimitedPrices": [{"month": 6, "price": 40.0}]})),
    )
    .await
    .unwrap();
    let stored = UnlimitedPriceRepo::list_by_corporate(&pool, CORPORATE_ID)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].month, 6);

    cohort::update(&pool, created.cohort.id, &patch(json!({"isUnlimited": false})))
        .await
        .unwrap();
    assert!(UnlimitedPriceRepo::list_by_corporate(&pool, CORPORATE_ID)
        .await
        .unwrap()
        .is_empty());
    assert!(!cohort::find(&pool, created.cohort.id).await.unwrap().is_unlimited);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_limited_cohort_patch_keeps_corporate_prices(pool: MySqlPool) {
    let created = cohort::create(&pool, &request(json!({}))).await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    UnlimitedPriceRepo::create_many(&mut conn, CORPORATE_ID, &tiers(&[(1, 10.0)]))
        .await
        .unwrap();
    drop(conn);

    cohort::update(&pool, created.cohort.id, &patch(json!({"isUnlimited": false})))
        .await
        .unwrap();
    assert_eq!(
        UnlimitedPriceRepo::list_by_corporate(&pool, CORPORATE_ID)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_update_missing_cohort_is_not_found(pool: MySqlPool) {
    let result = cohort::update(&pool, 999, &patch(json!({"description": "x"}))).await;
    assert_matches!(result, Err(AppError::Core(CoreError::NotFound { .. })));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_cohort_with_interactions_cannot_be_deleted(pool: MySqlPool) {
    let created = cohort::create(&pool, &request(json!({}))).await.unwrap();

    let result = cohort::remove(&pool, created.cohort.id).await;
    assert_matches!(
        result,
        Err(AppError::Core(CoreError::InvalidInput(msg))) if msg.contains("cannot be deleted")
    );
    assert!(CohortRepo::find_by_id(&pool, created.cohort.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_delete_removes_feedback_and_enrollments(pool: MySqlPool) {
    let plan = plan_cohort(&request(json!({"metadata": ["2"]})), "Empty".to_string()).unwrap();
    let mut tx = pool.begin().await.unwrap();
    let created = CohortRepo::create(&mut tx, &plan).await.unwrap();
    FeedbackFrequencyRepo::create(&mut tx, created.id, plan.feedback.as_ref().unwrap())
        .await
        .unwrap();
    EnrollmentRepo::enroll_many(&mut tx, created.id, &[1, 2])
        .await
        .unwrap();
    tx.commit().await.unwrap();

    cohort::remove(&pool, created.id).await.unwrap();

    assert!(CohortRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert!(feedback_metadata(&pool, created.id).await.is_empty());
    assert!(EnrollmentRepo::list_by_cohort(&pool, created.id)
        .await
        .unwrap()
        .is_empty());
    assert!(InteractionRepo::list_by_cohort(&pool, created.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a MySQL DATABASE_URL"]
async fn test_delete_missing_cohort_is_not_found(pool: MySqlPool) {
    assert_matches!(
        cohort::remove(&pool, 999).await,
        Err(AppError::Core(CoreError::NotFound { .. }))
    );
}
