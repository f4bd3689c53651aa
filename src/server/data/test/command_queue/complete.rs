use super::*;

/// Tests completing a claimed command.
///
/// Verifies that completion sets executed_at, stores the response, clears the previous
/// error and releases the claim.
///
/// Expected: Ok(true) with completed record
#[tokio::test]
async fn completes_claimed_command() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CommandFactory::new(db)
        .attempts(1)
        .error_message("connection refused")
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    assert!(
        repo.claim(command.id, 1, "worker-a", Utc::now() - Duration::minutes(5))
            .await?
    );
    let updated = repo
        .complete(command.id, "worker-a", "Gave 1 diamond".to_string())
        .await?;

    assert!(updated);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.status, CommandStatus::Completed);
    assert_eq!(record.attempts, 2);
    assert!(record.executed_at.is_some());
    assert!(record.error_message.is_none());
    assert_eq!(record.response.as_deref(), Some("Gave 1 diamond"));
    assert!(record.claimed_by.is_none());
    assert!(record.claimed_at.is_none());

    Ok(())
}

/// Tests that only the claim holder can complete a command.
///
/// Expected: Ok(false) with record unchanged
#[tokio::test]
async fn other_worker_cannot_complete() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CommandFactory::new(db)
        .attempts(1)
        .claimed("worker-a", Utc::now())
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let updated = repo
        .complete(command.id, "worker-b", String::new())
        .await?;

    assert!(!updated);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.status, CommandStatus::Pending);
    assert!(record.executed_at.is_none());

    Ok(())
}
