use sqlx::{QueryBuilder, SqlitePool};
use tokio::sync::mpsc;

use crate::error::AppResult;
use crate::models::{InteractionAction, InteractionEvent, NewInteraction};

/// Append-only interaction log backed by SQLite
///
/// Appends flow through an unbounded channel into a single background
/// writer task, so recording never blocks a request handler and
/// concurrent appends are serialized. Reads go straight to the pool.
#[derive(Clone)]
pub struct InteractionStore {
    pool: SqlitePool,
    write_tx: mpsc::UnboundedSender<NewInteraction>,
}

/// Handle for gracefully shutting down the interaction writer
pub struct InteractionWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl InteractionWriterHandle {
    /// Signals the writer task to flush queued appends and stop
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Interaction writer shutdown signal sent");
    }
}

impl InteractionStore {
    /// Creates the store and spawns its background writer task
    pub fn new(pool: SqlitePool) -> (Self, InteractionWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let writer_pool = pool.clone();
        tokio::spawn(async move {
            writer_task(writer_pool, write_rx, shutdown_rx).await;
        });

        (
            Self { pool, write_tx },
            InteractionWriterHandle { shutdown_tx },
        )
    }

    /// Queues an append without waiting for the write
    ///
    /// Failures surface in the writer task's log, never to the caller.
    pub fn record_in_background(&self, event: NewInteraction) {
        if let Err(e) = self.write_tx.send(event) {
            tracing::error!(error = %e, "Failed to queue interaction");
        }
    }

    /// Appends one event directly, bypassing the writer queue
    pub async fn append(&self, event: &NewInteraction) -> AppResult<()> {
        insert(&self.pool, event).await
    }

    /// Events whose action is among `actions`, oldest first
    ///
    /// An empty filter scans the whole log.
    pub async fn scan(&self, actions: &[InteractionAction]) -> AppResult<Vec<InteractionEvent>> {
        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
            "SELECT id, action, movie_title, genre, timestamp FROM user_interactions",
        );
        if !actions.is_empty() {
            query.push(" WHERE action IN (");
            let mut separated = query.separated(", ");
            for action in actions {
                separated.push_bind(action.as_str());
            }
            query.push(")");
        }
        query.push(" ORDER BY id");

        let events = query
            .build_query_as::<InteractionEvent>()
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }
}

async fn insert(pool: &SqlitePool, event: &NewInteraction) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO user_interactions (action, movie_title, genre, timestamp) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(event.action.as_str())
    .bind(&event.movie_title)
    .bind(&event.genre)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

async fn writer_task(
    pool: SqlitePool,
    mut write_rx: mpsc::UnboundedReceiver<NewInteraction>,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    tracing::info!("Interaction writer task started");
    loop {
        tokio::select! {
            Some(event) = write_rx.recv() => {
                if let Err(e) = insert(&pool, &event).await {
                    tracing::error!(
                        error = %e,
                        action = event.action.as_str(),
                        title = %event.movie_title,
                        "Failed to append interaction"
                    );
                }
            }
            _ = shutdown_rx.recv() => {
                // Drain whatever is already queued, then stop
                while let Ok(event) = write_rx.try_recv() {
                    if let Err(e) = insert(&pool, &event).await {
                        tracing::error!(error = %e, "Failed to flush interaction during shutdown");
                    }
                }
                tracing::info!("Interaction writer task stopped");
                break;
            }
        }
    }
}
