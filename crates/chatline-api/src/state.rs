//! Application state wiring the chat service and the reply generator.
//!
//! AppState is built once at startup and cloned into every request and
//! WebSocket connection. Services are generic over repository traits, but
//! AppState pins them to the concrete infra implementations.

use std::sync::Arc;

use chatline_core::chat::service::ChatService;
use chatline_core::reply::{ReplyGenerator, build_reply_generator};
use chatline_infra::sqlite::conversation::SqliteConversationRepository;
use chatline_infra::sqlite::pool::DatabasePool;
use chatline_types::config::{ReplyMode, ServerConfig};

/// Concrete type alias for the service generic pinned to the infra implementation.
pub type ConcreteChatService = ChatService<SqliteConversationRepository>;

/// Shared application state used by REST handlers and the WebSocket gateway.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub reply_generator: Arc<dyn ReplyGenerator>,
}

impl AppState {
    /// Initialize the application state: connect to DB, run migrations, wire services.
    pub async fn init(config: &ServerConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;
        Ok(Self::with_pool(db_pool, config.reply_mode))
    }

    /// Wire services on top of an already opened pool.
    pub fn with_pool(db_pool: DatabasePool, reply_mode: ReplyMode) -> Self {
        let repo = SqliteConversationRepository::new(db_pool);

        Self {
            chat_service: Arc::new(ChatService::new(repo)),
            reply_generator: build_reply_generator(reply_mode),
        }
    }
}
