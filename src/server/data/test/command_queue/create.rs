use super::*;

/// Tests creating a command enqueued by order fulfilment.
///
/// Verifies that a new record starts pending with no attempts, keeps its order and
/// package links and has no execution data.
///
/// Expected: Ok with pending record
#[tokio::test]
async fn creates_pending_command() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandRepository::new(db);
    let record = repo
        .create(CreateCommandParams {
            order_id: Some("order-42".to_string()),
            package_id: Some("vip-rank".to_string()),
            username: "Alex".to_string(),
            command: "lp user Alex parent add vip".to_string(),
            max_attempts: 3,
        })
        .await?;

    assert_eq!(record.status, CommandStatus::Pending);
    assert_eq!(record.attempts, 0);
    assert_eq!(record.max_attempts, 3);
    assert_eq!(record.order_id.as_deref(), Some("order-42"));
    assert_eq!(record.package_id.as_deref(), Some("vip-rank"));
    assert!(record.executed_at.is_none());
    assert!(record.error_message.is_none());
    assert!(record.claimed_by.is_none());

    Ok(())
}

/// Tests creating a one-shot manual command.
///
/// Expected: Ok with max_attempts of 1 and no order link
#[tokio::test]
async fn creates_manual_command_with_single_attempt() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandRepository::new(db);
    let record = repo
        .create(CreateCommandParams::manual(
            "Steve".to_string(),
            "give Steve diamond 1".to_string(),
        ))
        .await?;

    assert_eq!(record.max_attempts, 1);
    assert!(record.order_id.is_none());

    let found = repo.find_by_id(record.id).await?;
    assert_eq!(found, Some(record));

    Ok(())
}

/// Tests looking up an unknown command.
///
/// Expected: Ok(None)
#[tokio::test]
async fn find_by_id_returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CommandRepository::new(db);

    assert!(repo.find_by_id(9999).await?.is_none());

    Ok(())
}
