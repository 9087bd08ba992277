//! User-agent device classification
//!
//! Desktop browsers, crawlers and unknown agents yield `None`; the click
//! recorder stores those as `desktop`.

use strum::{AsRefStr, Display, EnumString};
use woothee::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Console,
    #[strum(serialize = "smarttv")]
    SmartTv,
    Desktop,
}

/// 设备类型识别能力
pub trait DeviceClassifier: Send + Sync {
    fn classify(&self, user_agent: &str) -> Option<DeviceType>;
}

/// 电视类 UA 标记（woothee 不区分电视与其他家电）
const SMART_TV_MARKERS: &[&str] = &[
    "smart-tv",
    "smarttv",
    "hbbtv",
    "googletv",
    "appletv",
    "crkey",
    "roku",
    "netcast",
    "viera",
    "bravia",
    "webos.tv",
    "tizen tv",
];

/// woothee-based classifier
pub struct WootheeClassifier {
    parser: Parser,
}

impl WootheeClassifier {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }
}

impl Default for WootheeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceClassifier for WootheeClassifier {
    fn classify(&self, user_agent: &str) -> Option<DeviceType> {
        if user_agent.trim().is_empty() {
            return None;
        }

        let lowered = user_agent.to_ascii_lowercase();
        if SMART_TV_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Some(DeviceType::SmartTv);
        }

        let result = self.parser.parse(user_agent)?;

        match result.category {
            "smartphone" => {
                let is_tablet = result.os == "iPad"
                    || (result.os == "Android" && !user_agent.contains("Mobile"));
                if is_tablet {
                    Some(DeviceType::Tablet)
                } else {
                    Some(DeviceType::Mobile)
                }
            }
            "mobilephone" => Some(DeviceType::Mobile),
            "appliance" => Some(DeviceType::Console),
            // pc / crawler / misc / UNKNOWN
            _ => None,
        }
    }
}
