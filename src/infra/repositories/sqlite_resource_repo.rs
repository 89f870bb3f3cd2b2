use crate::domain::{models::resource::{Resource, ResourceOption}, ports::ResourceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};

pub struct SqliteResourceRepo {
    pool: SqlitePool,
}

impl SqliteResourceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for SqliteResourceRepo {
    async fn create(&self, resource: &Resource) -> Result<Resource, AppError> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (id, name, description, location, capacity, is_available, version, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&resource.id)
            .bind(&resource.name)
            .bind(&resource.description)
            .bind(&resource.location)
            .bind(resource.capacity)
            .bind(resource.is_available)
            .bind(resource.version)
            .bind(resource.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Resource>, AppError> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, available: Option<bool>) -> Result<Vec<Resource>, AppError> {
        sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources WHERE (? IS NULL OR is_available = ?) ORDER BY name ASC"
        )
            .bind(available)
            .bind(available)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_options(&self) -> Result<Vec<ResourceOption>, AppError> {
        sqlx::query_as::<_, ResourceOption>("SELECT id, name FROM resources ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, resource: &Resource, expected_version: Option<i64>) -> Result<Option<Resource>, AppError> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET name=?, description=?, location=?, capacity=?, is_available=?, version = version + 1
             WHERE id=? AND (? IS NULL OR version = ?)
             RETURNING *"
        )
            .bind(&resource.name)
            .bind(&resource.description)
            .bind(&resource.location)
            .bind(resource.capacity)
            .bind(resource.is_available)
            .bind(&resource.id)
            .bind(expected_version)
            .bind(expected_version)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM resources WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Resource not found".into()));
        }
        Ok(())
    }
}
