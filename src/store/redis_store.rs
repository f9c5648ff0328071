//! Redis-backed store shared by every process in the fleet.
//!
//! # Responsibilities
//! - Build the connection URL from configuration
//! - Establish one `ConnectionManager` per process, lazily, on first use
//! - Bound every connect and command with a timeout
//!
//! # Design Decisions
//! - The manager reconnects on its own; a failed initial connect is retried
//!   on the next call instead of poisoning the process
//! - Counter increments run as a Lua script so the read and the write are
//!   a single atomic step on the server

use std::future::Future;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult, Script};
use tokio::sync::OnceCell;
use url::Url;

use crate::config::StoreConfig;
use crate::resilience::timeouts::with_timeout;
use crate::store::{KvStore, StoreError, StoreResult, MAX_COUNTER};

/// Increment with the counter's degrade rules: anything but a run of ASCII
/// digits, or a value below 1, counts as 1. `ARGV[1]` is the ceiling past
/// which the counter refuses to advance.
const INCREMENT_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
local current = 1
if raw and string.match(raw, '^%s*%d+%s*$') then
  current = math.max(tonumber(raw), 1)
end
if current >= tonumber(ARGV[1]) then
  return redis.error_reply('counter overflow')
end
local advanced = current + 1
redis.call('SET', KEYS[1], string.format('%d', advanced))
return advanced
"#;

/// Store adapter for a Redis server.
pub struct RedisStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    increment: Script,
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl RedisStore {
    /// Create the adapter. No connection is opened until the first call.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let url = connection_url(config)?;
        let client = Client::open(url.as_str()).map_err(|e| StoreError::Connect(e.to_string()))?;

        tracing::debug!(
            host = %config.host,
            port = config.port,
            db = config.db,
            "Store client configured"
        );

        Ok(Self {
            client,
            connection: OnceCell::new(),
            increment: Script::new(INCREMENT_SCRIPT),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            command_timeout: Duration::from_millis(config.command_timeout_ms),
        })
    }

    async fn connection(&self) -> StoreResult<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = with_timeout(self.connect_timeout, async {
                    ConnectionManager::new(self.client.clone())
                        .await
                        .map_err(|e| StoreError::Connect(e.to_string()))
                })
                .await?;
                tracing::info!("Store connection established");
                Ok::<_, StoreError>(manager)
            })
            .await?;
        Ok(manager.clone())
    }

    async fn run<T, F>(&self, command: F) -> StoreResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        with_timeout(self.command_timeout, async {
            command.await.map_err(|e| StoreError::Command(e.to_string()))
        })
        .await
    }
}

impl KvStore for RedisStore {
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            let mut conn = self.connection().await?;
            let _pong: String = self.run(redis::cmd("PING").query_async(&mut conn)).await?;
            Ok(())
        }
        .boxed()
    }

    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<Option<String>>> {
        async move {
            let mut conn = self.connection().await?;
            let value: Option<String> = self.run(conn.get(key)).await?;
            Ok(value)
        }
        .boxed()
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            let mut conn = self.connection().await?;
            self.run::<(), _>(conn.set(key, value)).await
        }
        .boxed()
    }

    fn increment<'a>(&'a self, key: &'a str) -> BoxFuture<'a, StoreResult<i64>> {
        async move {
            let mut conn = self.connection().await?;
            let advanced: i64 = self
                .run(self.increment.key(key).arg(MAX_COUNTER).invoke_async(&mut conn))
                .await?;
            Ok(advanced)
        }
        .boxed()
    }
}

/// Build `redis://[:password@]host:port/db` with the password percent-encoded.
pub fn connection_url(config: &StoreConfig) -> StoreResult<Url> {
    let mut url = Url::parse(&format!("redis://{}:{}/{}", config.host, config.port, config.db))
        .map_err(|e| StoreError::Connect(format!("invalid store address: {}", e)))?;

    if let Some(password) = config.password.as_deref().filter(|p| !p.is_empty()) {
        url.set_password(Some(password))
            .map_err(|_| StoreError::Connect("store address cannot carry a password".into()))?;
    }

    Ok(url)
}
