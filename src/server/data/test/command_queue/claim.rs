use super::*;

/// Tests claiming a pending command.
///
/// Verifies the attempt counter is incremented and the claim recorded before any
/// execution happens.
///
/// Expected: Ok(true) with attempts incremented and claim set
#[tokio::test]
async fn claims_and_counts_attempt() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = factory::create_command(db).await?;

    let repo = CommandRepository::new(db);
    let claimed = repo
        .claim(command.id, 0, "worker-a", Utc::now() - Duration::minutes(5))
        .await?;

    assert!(claimed);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.attempts, 1);
    assert_eq!(record.status, CommandStatus::Pending);
    assert_eq!(record.claimed_by.as_deref(), Some("worker-a"));
    assert!(record.claimed_at.is_some());

    Ok(())
}

/// Tests that a stale attempt count loses the claim.
///
/// Simulates a second dispatcher that read the record before the first one claimed it.
///
/// Expected: Ok(false) with attempts counted once
#[tokio::test]
async fn second_claim_with_stale_attempts_fails() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = factory::create_command(db).await?;
    let cutoff = Utc::now() - Duration::minutes(5);

    let repo = CommandRepository::new(db);
    assert!(repo.claim(command.id, 0, "worker-a", cutoff).await?);
    assert!(!repo.claim(command.id, 0, "worker-b", cutoff).await?);

    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.attempts, 1);
    assert_eq!(record.claimed_by.as_deref(), Some("worker-a"));

    Ok(())
}

/// Tests that a live claim blocks a claim even with a current attempt count.
///
/// Expected: Ok(false) with record unchanged
#[tokio::test]
async fn live_claim_blocks_claim() -> Result<(), DbErr> {
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
    let claimed = repo
        .claim(command.id, 1, "worker-b", Utc::now() - Duration::minutes(5))
        .await?;

    assert!(!claimed);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.attempts, 1);
    assert_eq!(record.claimed_by.as_deref(), Some("worker-a"));

    Ok(())
}

/// Tests that an abandoned claim can be taken over.
///
/// Expected: Ok(true) with new owner
#[tokio::test]
async fn expired_claim_can_be_taken_over() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CommandFactory::new(db)
        .attempts(1)
        .claimed("crashed-worker", Utc::now() - Duration::hours(1))
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let claimed = repo
        .claim(command.id, 1, "worker-b", Utc::now() - Duration::minutes(5))
        .await?;

    assert!(claimed);
    let record = repo.find_by_id(command.id).await?.unwrap();
    assert_eq!(record.attempts, 2);
    assert_eq!(record.claimed_by.as_deref(), Some("worker-b"));

    Ok(())
}

/// Tests that terminal commands cannot be claimed.
///
/// Expected: Ok(false)
#[tokio::test]
async fn terminal_command_cannot_be_claimed() -> Result<(), DbErr> {
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
        .claim(command.id, 3, "worker-a", Utc::now() - Duration::minutes(5))
        .await?;

    assert!(!claimed);

    Ok(())
}
