//! In-memory integration tests for saved-search execution.

use super::helpers::{Harness, PROJECT_PATH, config, harness, issue, publish};
use rstest::rstest;
use taskbridge::connector::{
    adapters::memory::CollectingSink,
    domain::{FieldValue, Query, RepositoryConfig, TaskData},
    services::{ConnectionError, QueryError, QueryOutcome},
};
use tokio_util::sync::CancellationToken;

fn keys(collected: &[TaskData]) -> Vec<String> {
    collected
        .iter()
        .map(|data| data.task_key().to_string())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attribute_query_selects_open_assigned_issues(
    harness: Harness,
) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [
            issue(1, "Checkout button misaligned", "opened", 10).with_assignee("dana"),
            issue(2, "Checkout times out", "closed", 20).with_assignee("dana"),
            issue(3, "Cart badge count", "opened", 30).with_assignee("eli"),
            issue(4, "Checkout copy review", "reopened", 40).with_assignee("dana"),
        ],
    )?;
    let query = Query::from_attributes([
        ("status", "open"),
        ("title", "checkout"),
        ("assignee", "dana"),
    ]);
    let mut sink = CollectingSink::new();

    let outcome = harness
        .connector
        .run_query(&config(), &query, &mut sink, &CancellationToken::new())
        .await?;

    eyre::ensure!(
        matches!(outcome, QueryOutcome::Completed(stats) if stats.scanned == 4 && stats.matched == 2),
        "unexpected outcome {outcome:?}"
    );
    eyre::ensure!(
        keys(sink.collected()) == ["1", "4"],
        "unexpected matches {:?}",
        keys(sink.collected())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exact_match_requires_whole_value(harness: Harness) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [
            issue(1, "Release", "opened", 1).with_milestone("2024.1"),
            issue(2, "Hotfix", "opened", 2).with_milestone("2024.10"),
        ],
    )?;
    let query = Query::from_attributes([("milestone", "2024.1"), ("match", "exact")]);
    let mut sink = CollectingSink::new();

    harness
        .connector
        .run_query(&config(), &query, &mut sink, &CancellationToken::new())
        .await?;

    eyre::ensure!(keys(sink.collected()) == ["1"], "exact match leaked");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsupported_attributes_do_not_narrow_results(
    harness: Harness,
) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [
            issue(1, "First", "opened", 1),
            issue(2, "Second", "closed", 2),
        ],
    )?;
    let query = Query::from_attributes([("weight", "3"), ("status", "triaged")]);
    let mut sink = CollectingSink::new();

    harness
        .connector
        .run_query(&config(), &query, &mut sink, &CancellationToken::new())
        .await?;

    eyre::ensure!(
        keys(sink.collected()) == ["1", "2"],
        "unsupported criteria filtered issues"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_queries_reuse_the_connection(harness: Harness) -> Result<(), eyre::Report> {
    publish(&harness, [issue(1, "Only issue", "opened", 1)])?;

    for _ in 0..3 {
        let mut sink = CollectingSink::new();
        harness
            .connector
            .run_query(&config(), &Query::new(), &mut sink, &CancellationToken::new())
            .await?;
    }

    let handshakes = harness.transport.authentication_count()?;
    eyre::ensure!(handshakes == 1, "expected one handshake, got {handshakes}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closure_sink_receives_complete_records(harness: Harness) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [issue(5, "No assignee", "opened", 5).with_description("Steps to reproduce")],
    )?;
    let mut owners = Vec::new();
    let mut sink = |data: TaskData| {
        owners.push(data.owner().cloned());
        taskbridge::connector::ports::SinkControl::Continue
    };

    harness
        .connector
        .run_query(&config(), &Query::new(), &mut sink, &CancellationToken::new())
        .await?;

    eyre::ensure!(
        owners == [Some(FieldValue::Unset)],
        "expected an explicit unset owner, got {owners:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validate_reports_missing_project_without_caching(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let missing = RepositoryConfig::new("https://gitlab.acme.test", super::helpers::TOKEN, "acme/gone")?;

    let result = harness.connector.validate(&missing).await;

    eyre::ensure!(
        matches!(result, Err(ConnectionError::Unreachable(_))),
        "expected unreachable, got {result:?}"
    );
    eyre::ensure!(
        !harness.connector.resolver().is_cached(&missing).await,
        "validation populated the cache"
    );
    let project = harness.connector.validate(&config()).await?;
    eyre::ensure!(project == super::helpers::project_id(), "wrong project resolved");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revoked_token_surfaces_as_connection_error(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let revoked = RepositoryConfig::new("https://gitlab.acme.test", "glpat-revoked", PROJECT_PATH)?;
    let mut sink = CollectingSink::new();

    let result = harness
        .connector
        .run_query(&revoked, &Query::new(), &mut sink, &CancellationToken::new())
        .await;

    eyre::ensure!(
        matches!(result, Err(QueryError::Connection(_))),
        "expected connection error, got {result:?}"
    );
    Ok(())
}
