use crate::domain::{models::resource::{Resource, ResourceOption}, ports::ResourceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresResourceRepo {
    pool: PgPool,
}

impl PostgresResourceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PostgresResourceRepo {
    async fn create(&self, resource: &Resource) -> Result<Resource, AppError> {
        sqlx::query_as::<_, Resource>("INSERT INTO resources (id, name, description, location, capacity, is_available, version, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *").bind(&resource.id).bind(&resource.name).bind(&resource.description).bind(&resource.location).bind(resource.capacity).bind(resource.is_available).bind(resource.version).bind(resource.created_at).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Resource>, AppError> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, available: Option<bool>) -> Result<Vec<Resource>, AppError> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE ($1::BOOLEAN IS NULL OR is_available = $1) ORDER BY name ASC").bind(available).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_options(&self) -> Result<Vec<ResourceOption>, AppError> {
        sqlx::query_as::<_, ResourceOption>("SELECT id, name FROM resources ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, resource: &Resource, expected_version: Option<i64>) -> Result<Option<Resource>, AppError> {
        sqlx::query_as::<_, Resource>("UPDATE resources SET name=$1, description=$2, location=$3, capacity=$4, is_available=$5, version = version + 1 WHERE id=$6 AND ($7::BIGINT IS NULL OR version = $7) RETURNING *").bind(&resource.name).bind(&resource.description).bind(&resource.location).bind(resource.capacity).bind(resource.is_available).bind(&resource.id).bind(expected_version).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM resources WHERE id = $1").bind(id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count") > 0)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Resource not found".into())); }
        Ok(())
    }
}
