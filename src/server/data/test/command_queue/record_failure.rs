use super::*;

/// Tests recording a transient failure.
///
/// Expected: Ok(true) with record still pending, error stored and claim released
#[tokio::test]
async fn transient_failure_stays_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = factory::create_command(db).await?;

    let repo = CommandRepository::new(db);
    assert!(
        repo.claim(command.id, 0, "worker-a", Utc::now() - Duration::minutes(5))
            .await?
    );
    let updated = repo
        .record_failure(
            command.id,
            "worker-a",
            CommandStatus::Pending,
            "connection refused".to_string(),
        )
        .await?;

    assert!(updated);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.status, CommandStatus::Pending);
    assert_eq!(record.attempts, 1);
    assert_eq!(record.error_message.as_deref(), Some("connection refused"));
    assert!(record.claimed_by.is_none());
    assert!(record.executed_at.is_none());

    Ok(())
}

/// Tests recording a terminal failure.
///
/// Expected: Ok(true) with record failed
#[tokio::test]
async fn terminal_failure_marks_failed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CommandFactory::new(db).attempts(2).build().await?;

    let repo = CommandRepository::new(db);
    assert!(
        repo.claim(command.id, 2, "worker-a", Utc::now() - Duration::minutes(5))
            .await?
    );
    repo.record_failure(
        command.id,
        "worker-a",
        CommandStatus::Failed,
        "timed out".to_string(),
    )
    .await?;

    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.status, CommandStatus::Failed);
    assert_eq!(record.attempts, record.max_attempts);
    assert_eq!(record.error_message.as_deref(), Some("timed out"));

    Ok(())
}
