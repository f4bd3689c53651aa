use super::*;

/// Tests reopening and claiming a failed command for a manual retry.
///
/// Expected: Ok(true) with status pending, attempt counted, limit raised and claim set
#[tokio::test]
async fn reopens_and_claims_failed_command() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CommandFactory::new(db)
        .status("failed")
        .attempts(3)
        .error_message("timed out")
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let claimed = repo
        .claim_for_retry(command.id, 3, 4, "worker-a", Utc::now() - Duration::minutes(5))
        .await?;

    assert!(claimed);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.status, CommandStatus::Pending);
    assert_eq!(record.attempts, 4);
    assert_eq!(record.max_attempts, 4);
    assert_eq!(record.claimed_by.as_deref(), Some("worker-a"));
    assert!(record.claimed_at.is_some());

    Ok(())
}

/// Tests that completed commands are never reopened.
///
/// Expected: Ok(false) with record unchanged
#[tokio::test]
async fn does_not_reopen_completed_command() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CommandFactory::new(db)
        .status("completed")
        .attempts(1)
        .executed_at(Utc::now())
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let claimed = repo
        .claim_for_retry(command.id, 1, 2, "worker-a", Utc::now() - Duration::minutes(5))
        .await?;

    assert!(!claimed);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.status, CommandStatus::Completed);
    assert_eq!(record.attempts, 1);
    assert_eq!(record.max_attempts, 3);
    assert!(record.claimed_by.is_none());

    Ok(())
}

/// Tests that a stale attempt count changes nothing.
///
/// Simulates another retry that counted an attempt after this one read the record.
///
/// Expected: Ok(false) with status, attempts and limit unchanged
#[tokio::test]
async fn stale_attempts_leave_record_untouched() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CommandFactory::new(db)
        .status("failed")
        .attempts(3)
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let claimed = repo
        .claim_for_retry(command.id, 2, 3, "worker-a", Utc::now() - Duration::minutes(5))
        .await?;

    assert!(!claimed);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.status, CommandStatus::Failed);
    assert_eq!(record.attempts, 3);
    assert_eq!(record.max_attempts, 3);
    assert!(record.claimed_by.is_none());

    Ok(())
}
