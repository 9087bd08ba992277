//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::errors::{LessonLinkerError, Result};

pub use connection::{connect_generic, connect_sqlite, normalize_sqlite_url, run_migrations};
pub use converters::{
    lesson_to_active_model, link_to_active_model, model_to_click, model_to_lesson, model_to_link,
    model_to_school, school_to_active_model,
};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LessonLinkerError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
///
/// 启动时显式构造，注入到各个 service，关闭时显式 `close`。
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LessonLinkerError::database_config(
                "database_url 未设置".to_string(),
            ));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, config).await?
        } else {
            connect_generic(database_url, backend_name, config).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        // 运行迁移
        run_migrations(&storage.db).await?;

        info!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 存活检查
    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await.map_err(|e| {
            LessonLinkerError::database_connection(format!("数据库不可用: {}", e))
        })
    }

    /// 关闭连接池
    pub async fn close(&self) -> Result<()> {
        match self.db.clone().close().await {
            Ok(()) => {
                info!("{} Storage closed.", self.backend_name.to_uppercase());
                Ok(())
            }
            Err(e) => {
                warn!("关闭数据库连接失败: {}", e);
                Err(LessonLinkerError::database_connection(format!(
                    "关闭数据库连接失败: {}",
                    e
                )))
            }
        }
    }
}
