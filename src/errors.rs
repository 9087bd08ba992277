use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LessonLinkerError {
    Validation(String),
    NotFound(String),
    NoMatch(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Upstream(String),
    Serialization(String),
}

impl LessonLinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LessonLinkerError::Validation(_) => "E001",
            LessonLinkerError::NotFound(_) => "E002",
            LessonLinkerError::NoMatch(_) => "E003",
            LessonLinkerError::DatabaseConfig(_) => "E004",
            LessonLinkerError::DatabaseConnection(_) => "E005",
            LessonLinkerError::DatabaseOperation(_) => "E006",
            LessonLinkerError::Upstream(_) => "E007",
            LessonLinkerError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LessonLinkerError::Validation(_) => "Validation Error",
            LessonLinkerError::NotFound(_) => "Resource Not Found",
            LessonLinkerError::NoMatch(_) => "No Matching Lesson",
            LessonLinkerError::DatabaseConfig(_) => "Database Configuration Error",
            LessonLinkerError::DatabaseConnection(_) => "Database Connection Error",
            LessonLinkerError::DatabaseOperation(_) => "Database Operation Error",
            LessonLinkerError::Upstream(_) => "Upstream Service Error",
            LessonLinkerError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LessonLinkerError::Validation(msg)
            | LessonLinkerError::NotFound(msg)
            | LessonLinkerError::NoMatch(msg)
            | LessonLinkerError::DatabaseConfig(msg)
            | LessonLinkerError::DatabaseConnection(msg)
            | LessonLinkerError::DatabaseOperation(msg)
            | LessonLinkerError::Upstream(msg)
            | LessonLinkerError::Serialization(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            LessonLinkerError::Validation(_) => StatusCode::BAD_REQUEST,
            LessonLinkerError::NotFound(_) | LessonLinkerError::NoMatch(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为服务端内部错误（需要对调用方隐藏细节）
    pub fn is_internal(&self) -> bool {
        self.http_status().is_server_error()
    }

    /// 返回给调用方的消息：内部错误只给出概括信息
    pub fn public_message(&self) -> &str {
        match self {
            LessonLinkerError::Upstream(_) => "Failed to fetch response from the assistant",
            e if e.is_internal() => "Internal server error",
            e => e.message(),
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LessonLinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LessonLinkerError {}

// 便捷的构造函数
impl LessonLinkerError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::NotFound(msg.into())
    }

    pub fn no_match<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::NoMatch(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::DatabaseOperation(msg.into())
    }

    pub fn upstream<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::Upstream(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LessonLinkerError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for LessonLinkerError {
    fn from(err: sea_orm::DbErr) -> Self {
        LessonLinkerError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LessonLinkerError {
    fn from(err: serde_json::Error) -> Self {
        LessonLinkerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LessonLinkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            LessonLinkerError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LessonLinkerError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LessonLinkerError::no_match("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LessonLinkerError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            LessonLinkerError::upstream("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_internal_details() {
        let db = LessonLinkerError::database_operation("UNIQUE constraint failed: links.id");
        assert_eq!(db.public_message(), "Internal server error");
        let upstream = LessonLinkerError::upstream("connect timeout");
        assert_eq!(
            upstream.public_message(),
            "Failed to fetch response from the assistant"
        );
        let missing = LessonLinkerError::validation("Missing required fields: name");
        assert_eq!(missing.public_message(), "Missing required fields: name");
    }

    #[test]
    fn test_invalid_date_is_a_validation_error() {
        let err = crate::services::parse_date("endDate", "31/01/2024").unwrap_err();
        assert!(matches!(err, LessonLinkerError::Validation(_)));
        assert_eq!(err.code(), "E001");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert!(!err.is_internal());
    }

    #[test]
    fn test_serialization_error_is_internal() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: LessonLinkerError = json_err.into();
        assert_eq!(err.code(), "E008");
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_internal_flag() {
        assert!(LessonLinkerError::database_connection("down").is_internal());
        assert!(!LessonLinkerError::no_match("none").is_internal());
    }
}
