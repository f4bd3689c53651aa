use crate::server::data::setting::SettingRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests reading a missing setting.
///
/// Expected: Ok(None)
#[tokio::test]
async fn get_returns_none_for_missing_key() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingRepository::new(db);

    assert!(repo.get("rcon_config").await?.is_none());

    Ok(())
}

/// Tests that upsert inserts and then replaces a value.
///
/// Expected: Ok with the latest value stored under the key
#[tokio::test]
async fn upsert_inserts_then_replaces() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingRepository::new(db);
    repo.upsert("rcon_config", "{\"a\":1}".to_string()).await?;
    repo.upsert("rcon_config", "{\"a\":2}".to_string()).await?;

    assert_eq!(repo.get("rcon_config").await?.as_deref(), Some("{\"a\":2}"));

    Ok(())
}

/// Tests reading a setting created by the factory.
///
/// Expected: Ok with the stored raw value
#[tokio::test]
async fn get_returns_stored_value() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_dispatcher_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_setting(db, "motd", "\"hello\"").await?;

    let repo = SettingRepository::new(db);

    assert_eq!(repo.get("motd").await?.as_deref(), Some("\"hello\""));

    Ok(())
}
