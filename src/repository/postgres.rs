use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteRepository, embedded::migrations};
use crate::{error::RepositoryError, models::Note};

pub struct PgRepository {
    client: Mutex<Option<Client>>,
    connection: Mutex<Option<JoinHandle<()>>>,
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        added_date: row.get("added_date"),
    }
}

impl PgRepository {
    pub async fn new(database_dsn: &str) -> Result<Self, RepositoryError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        let connection = tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self {
            client: Mutex::new(Some(client)),
            connection: Mutex::new(Some(connection)),
        })
    }

    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(RepositoryError::Closed)?;

        let migrations_report = migrations::runner().run_async(client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

// Every method below opens its own transaction. Returning early (including
// through `?`) drops the transaction, which rolls it back.
#[async_trait]
impl NoteRepository for PgRepository {
    async fn create(
        &self,
        title: String,
        content: String,
        added_date: DateTime<Utc>,
    ) -> Result<Note, RepositoryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(RepositoryError::Closed)?;
        let tx = client.transaction().await?;

        let row = tx
            .query_one(
                "INSERT INTO notes (title, content, added_date) VALUES ($1, $2, $3) \
                 RETURNING id, title, content, added_date",
                &[&title, &content, &added_date],
            )
            .await?;

        tx.commit().await?;

        Ok(note_from_row(&row))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(RepositoryError::Closed)?;
        let tx = client.transaction().await?;

        let row = tx
            .query_opt(
                "SELECT id, title, content, added_date FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        tx.commit().await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn update(
        &self,
        id: i64,
        title: String,
        content: String,
        added_date: DateTime<Utc>,
    ) -> Result<Option<Note>, RepositoryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(RepositoryError::Closed)?;
        let tx = client.transaction().await?;

        let existing = tx
            .query_opt("SELECT id FROM notes WHERE id = $1", &[&id])
            .await?;
        if existing.is_none() {
            return Ok(None);
        }

        let row = tx
            .query_one(
                "UPDATE notes SET title = $1, content = $2, added_date = $3 WHERE id = $4 \
                 RETURNING id, title, content, added_date",
                &[&title, &content, &added_date, &id],
            )
            .await?;

        tx.commit().await?;

        Ok(Some(note_from_row(&row)))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(RepositoryError::Closed)?;
        let tx = client.transaction().await?;

        let existing = tx
            .query_opt("SELECT id FROM notes WHERE id = $1", &[&id])
            .await?;
        if existing.is_none() {
            return Ok(false);
        }

        let rows = tx
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        tx.commit().await?;

        Ok(rows == 1)
    }

    async fn get_all(&self) -> Result<Vec<Note>, RepositoryError> {
        let mut guard = self.client.lock().await;
        let client = guard.as_mut().ok_or(RepositoryError::Closed)?;
        let tx = client.transaction().await?;

        let rows = tx
            .query(
                "SELECT id, title, content, added_date FROM notes ORDER BY id",
                &[],
            )
            .await?;

        tx.commit().await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn shutdown(&self) {
        // Dropping the client closes the connection and lets the driver task finish
        drop(self.client.lock().await.take());

        if let Some(connection) = self.connection.lock().await.take() {
            if let Err(e) = connection.await {
                tracing::error!("connection task failed during shutdown: {}", e);
            }
        }

        tracing::info!("Database connection closed");
    }
}
