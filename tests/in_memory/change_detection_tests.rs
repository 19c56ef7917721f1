//! In-memory integration tests for synchronising query results into local
//! tasks.

use super::helpers::{Harness, at, config, harness, issue, project_id, publish};
use rstest::rstest;
use taskbridge::connector::{
    adapters::memory::CollectingSink,
    domain::{LocalTask, Query, RemoteComment, TaskData, TaskKey, TaskMapper, TaskStatus},
    ports::LocalTaskStore,
};
use tokio_util::sync::CancellationToken;

async fn query_all(harness: &Harness) -> Result<Vec<TaskData>, eyre::Report> {
    let mut sink = CollectingSink::new();
    harness
        .connector
        .run_query(&config(), &Query::new(), &mut sink, &CancellationToken::new())
        .await?;
    Ok(sink.into_collected())
}

async fn synchronize_all(harness: &Harness) -> Result<Vec<bool>, eyre::Report> {
    let mut changes = Vec::new();
    for data in query_all(harness).await? {
        changes.push(harness.connector.synchronize_task(&data).await?);
    }
    Ok(changes)
}

async fn stored(harness: &Harness, key: &str) -> Result<LocalTask, eyre::Report> {
    let task_key = TaskKey::from(taskbridge::connector::domain::IssueId::parse(key)?);
    harness
        .store
        .find(&task_key)
        .await?
        .ok_or_else(|| eyre::eyre!("task {key} missing from local store"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_synchronisation_creates_local_tasks(harness: Harness) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [
            issue(1, "Search is slow", "opened", 10).with_labels(vec!["perf".to_owned()]),
            issue(2, "Broken footer link", "closed", 20),
        ],
    )?;
    harness.transport.set_comments(
        project_id(),
        1,
        vec![RemoteComment::new("Profiled, see flamegraph", at(15)).with_author("fin")],
    )?;

    let changes = synchronize_all(&harness).await?;

    eyre::ensure!(changes == [true, true], "unexpected changes {changes:?}");
    let slow_search = stored(&harness, "1").await?;
    eyre::ensure!(slow_search.labels == ["perf"], "labels not synchronised");
    eyre::ensure!(slow_search.comments.len() == 1, "comments not synchronised");
    eyre::ensure!(
        slow_search.synchronized_at.is_some(),
        "synchronisation time not stamped"
    );
    let footer = stored(&harness, "2").await?;
    eyre::ensure!(
        footer.status == Some(TaskStatus::Closed),
        "status not synchronised"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unchanged_remote_issues_are_not_reapplied(harness: Harness) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [
            issue(1, "Stable", "opened", 10),
            issue(2, "Also stable", "opened", 20),
        ],
    )?;
    synchronize_all(&harness).await?;

    let changes = synchronize_all(&harness).await?;

    eyre::ensure!(changes == [false, false], "unexpected changes {changes:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_edits_are_detected_by_modification_time(
    harness: Harness,
) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [
            issue(1, "Untouched", "opened", 10),
            issue(2, "Will be closed", "opened", 20),
        ],
    )?;
    synchronize_all(&harness).await?;
    publish(&harness, [issue(2, "Will be closed", "closed", 90)])?;

    let changes = synchronize_all(&harness).await?;

    eyre::ensure!(changes == [false, true], "unexpected changes {changes:?}");
    let closed = stored(&harness, "2").await?;
    eyre::ensure!(
        closed.status == Some(TaskStatus::Closed) && closed.modified_at == Some(at(90)),
        "closed issue not applied: {closed:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_records_preserve_downloaded_details(harness: Harness) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [issue(3, "Export fails", "opened", 10)
            .with_description("CSV export returns 500")
            .with_author("gil")],
    )?;
    synchronize_all(&harness).await?;

    let retitled = issue(3, "Export fails for large carts", "opened", 30)
        .with_description("CSV export returns 500")
        .with_author("gil");
    let partial = TaskMapper::to_task_data(&retitled, &[], true)?;
    let changed = harness.connector.synchronize_task(&partial).await?;

    eyre::ensure!(changed, "partial change not detected");
    let task = stored(&harness, "3").await?;
    eyre::ensure!(
        task.summary.as_deref() == Some("Export fails for large carts"),
        "summary not applied"
    );
    eyre::ensure!(
        task.description.as_deref() == Some("CSV export returns 500")
            && task.reporter.as_deref() == Some("gil"),
        "partial record clobbered fields it does not carry"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn single_task_download_matches_query_result(harness: Harness) -> Result<(), eyre::Report> {
    publish(
        &harness,
        [
            issue(1, "One", "opened", 1),
            issue(2, "Two", "opened", 2).with_assignee("hal"),
        ],
    )?;

    let from_query = query_all(&harness)
        .await?
        .into_iter()
        .find(|data| data.task_key().as_str() == "2")
        .ok_or_else(|| eyre::eyre!("issue 2 missing from query results"))?;
    let downloaded = harness.connector.get_task_data(&config(), "2").await?;

    eyre::ensure!(from_query == downloaded, "records differ");
    Ok(())
}
