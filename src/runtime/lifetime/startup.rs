use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::get_config;
use crate::services::{
    AnalyticsService, ChatService, ClickRecorder, DeviceClassifier, LessonService, LinkService,
    SchoolService, WootheeClassifier,
};
use crate::storage::{SeaOrmStorage, StorageFactory};

#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub school_service: Arc<SchoolService>,
    pub lesson_service: Arc<LessonService>,
    pub link_service: Arc<LinkService>,
    pub click_recorder: Arc<ClickRecorder>,
    pub analytics_service: Arc<AnalyticsService>,
    pub chat_service: Arc<ChatService>,
}

impl StartupContext {
    /// 由已有存储组装所有 service
    pub fn from_storage(storage: Arc<SeaOrmStorage>, chat_service: ChatService) -> Self {
        let classifier: Arc<dyn DeviceClassifier> = Arc::new(WootheeClassifier::new());

        Self {
            school_service: Arc::new(SchoolService::new(storage.clone())),
            lesson_service: Arc::new(LessonService::new(storage.clone())),
            link_service: Arc::new(LinkService::new(storage.clone())),
            click_recorder: Arc::new(ClickRecorder::new(storage.clone(), classifier)),
            analytics_service: Arc::new(AnalyticsService::new(storage.clone())),
            chat_service: Arc::new(chat_service),
            storage,
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）和各业务 service
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let chat_service = ChatService::from_config(&config.chat);

    let context = StartupContext::from_storage(storage, chat_service);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(context)
}
