use super::*;

/// Tests that executable commands come back oldest first.
///
/// Expected: Ok with records ordered by created_at ascending
#[tokio::test]
async fn returns_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let newer = CommandFactory::new(db).created_at(now).build().await?;
    let older = CommandFactory::new(db)
        .created_at(now - Duration::minutes(5))
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let records = repo
        .get_executable(10, 3, now - Duration::minutes(5))
        .await?;

    let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);

    Ok(())
}

/// Tests that terminal, exhausted and ceiling-reached commands are excluded.
///
/// Expected: Ok with only the eligible pending record
#[tokio::test]
async fn excludes_ineligible_commands() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let eligible = CommandFactory::new(db).attempts(2).build().await?;
    CommandFactory::new(db).status("completed").build().await?;
    CommandFactory::new(db).status("failed").attempts(3).build().await?;
    // Pending but already at its own ceiling
    CommandFactory::new(db)
        .max_attempts(1)
        .attempts(1)
        .build()
        .await?;
    // Pending with a raised ceiling but past the automatic limit
    CommandFactory::new(db)
        .max_attempts(5)
        .attempts(3)
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let records = repo
        .get_executable(10, 3, Utc::now() - Duration::minutes(5))
        .await?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, eligible.id);

    Ok(())
}

/// Tests that live claims hide a record while expired claims do not.
///
/// Expected: Ok with only the record whose claim is older than the lease
#[tokio::test]
async fn skips_live_claims() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    CommandFactory::new(db)
        .attempts(1)
        .claimed("other-worker", now)
        .build()
        .await?;
    let abandoned = CommandFactory::new(db)
        .attempts(1)
        .claimed("crashed-worker", now - Duration::hours(1))
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let records = repo
        .get_executable(10, 3, now - Duration::minutes(5))
        .await?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, abandoned.id);

    Ok(())
}

/// Tests that the batch limit is respected.
///
/// Expected: Ok with at most `limit` records, the oldest ones
#[tokio::test]
async fn respects_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let start = Utc::now() - Duration::hours(1);
    let mut created = Vec::new();
    for i in 0..12 {
        let record = CommandFactory::new(db)
            .created_at(start + Duration::seconds(i))
            .build()
            .await?;
        created.push(record.id);
    }

    let repo = CommandRepository::new(db);
    let records = repo
        .get_executable(10, 3, Utc::now() - Duration::minutes(5))
        .await?;

    let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, created[..10].to_vec());

    Ok(())
}

/// Tests an empty queue.
///
/// Expected: Ok with no records
#[tokio::test]
async fn returns_empty_when_nothing_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::command_queue::CommandFactory::new(db)
        .status("completed")
        .build()
        .await?;

    let repo = CommandRepository::new(db);
    let records = repo.get_executable(10, 3, Utc::now()).await?;

    assert!(records.is_empty());

    Ok(())
}
