//! Click recording
//!
//! Called after a successful resolution, before the redirect is returned.
//! A failed insert fails the redirect.

use std::sync::Arc;

use tracing::{debug, error};

use super::device_classifier::{DeviceClassifier, DeviceType};
use super::link_service::Resolution;
use crate::errors::Result;
use crate::storage::{Click, NewClick, SeaOrmStorage};

pub struct ClickRecorder {
    storage: Arc<SeaOrmStorage>,
    classifier: Arc<dyn DeviceClassifier>,
}

impl ClickRecorder {
    pub fn new(storage: Arc<SeaOrmStorage>, classifier: Arc<dyn DeviceClassifier>) -> Self {
        Self {
            storage,
            classifier,
        }
    }

    /// Device label for a raw user agent, `desktop` when unclassified
    pub fn device_type(&self, user_agent: Option<&str>) -> DeviceType {
        user_agent
            .and_then(|ua| self.classifier.classify(ua))
            .unwrap_or(DeviceType::Desktop)
    }

    pub async fn record_click(
        &self,
        resolution: &Resolution,
        user_agent: Option<&str>,
        remote_address: Option<&str>,
    ) -> Result<Click> {
        let link = &resolution.link;
        let device_type = self.device_type(user_agent);

        let new_click = NewClick {
            link_id: link.id.clone(),
            school_id: link.school_id.clone(),
            grade: link.grade,
            week: link.week,
            tech_level: link.tech_level,
            device_type: device_type.to_string(),
            ip_address: remote_address.map(str::to_string),
            user_agent: user_agent.map(str::to_string),
        };

        match self.storage.insert_click(new_click).await {
            Ok(click) => {
                debug!(
                    "Logged click for link {} ({}, {})",
                    click.link_id,
                    click.device_type,
                    click.ip_address.as_deref().unwrap_or("-")
                );
                Ok(click)
            }
            Err(e) => {
                error!("Failed to record click for link {}: {}", link.id, e);
                Err(e)
            }
        }
    }

    pub async fn list_clicks(&self) -> Result<Vec<Click>> {
        self.storage.list_clicks().await
    }
}
