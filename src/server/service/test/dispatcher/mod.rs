use crate::server::{
    data::command_queue::CommandRepository,
    error::{dispatch::DispatchError, rcon::RconError},
    model::{command::CommandStatus, rcon::RconProfile},
    rcon::CommandExecutor,
    service::{
        dispatcher::{CommandDispatcher, DispatchSummary},
        profile::StaticProfileSource,
    },
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use std::{collections::VecDeque, sync::Arc};
use test_utils::{builder::TestBuilder, factory, factory::command_queue::CommandFactory};
use tokio::sync::Mutex;


/// Executor that records every command and answers from a script.
///
/// Scripted outcomes are consumed in order; once the script is exhausted every call
/// returns the fallback outcome.
struct ScriptedExecutor {
    script: Mutex<VecDeque<Result<String, String>>>,
    fallback: Result<String, String>,
    calls: Mutex<Vec<String>>,
    delay: Option<std::time::Duration>,
}

impl ScriptedExecutor {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self::with_fallback(Ok("done".to_string())))
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self::with_fallback(Err("connection refused".to_string())))
    }

    fn scripted(outcomes: Vec<Result<&str, &str>>) -> Arc<Self> {
        let mut executor = Self::with_fallback(Ok("done".to_string()));
        executor.script = Mutex::new(
            outcomes
                .into_iter()
                .map(|outcome| outcome.map(str::to_string).map_err(str::to_string))
                .collect(),
        );
        Arc::new(executor)
    }

    /// Succeeds after sleeping, so concurrent cycles interleave.
    fn slow(delay: std::time::Duration) -> Arc<Self> {
        let mut executor = Self::with_fallback(Ok("done".to_string()));
        executor.delay = Some(delay);
        Arc::new(executor)
    }

    fn with_fallback(fallback: Result<String, String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, _profile: &RconProfile, command: &str) -> Result<String, RconError> {
        self.calls.lock().await.push(command.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        outcome.map_err(RconError::Protocol)
    }
}

fn test_profile() -> RconProfile {
    RconProfile {
        host: "127.0.0.1".to_string(),
        port: 25575,
        password: "secret".to_string(),
        timeout: 1000,
    }
}

fn dispatcher(db: &DatabaseConnection, executor: Arc<ScriptedExecutor>) -> CommandDispatcher {
    CommandDispatcher::new(
        db.clone(),
        Arc::new(StaticProfileSource(Some(test_profile()))),
        executor,
    )
}

fn unconfigured_dispatcher(
    db: &DatabaseConnection,
    executor: Arc<ScriptedExecutor>,
) -> CommandDispatcher {
    CommandDispatcher::new(db.clone(), Arc::new(StaticProfileSource(None)), executor)
}
