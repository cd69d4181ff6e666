use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuicklinkError {
    InvalidUrl(String),
    InvalidCode(String),
    CodeTaken(String),
    NotFound(String),
    GenerationExhausted(String),
    FileOperation(String),
    Serialization(String),
    Persistence(String),
    Config(String),
    Internal(String),
}

impl QuicklinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            QuicklinkError::InvalidUrl(_) => "E001",
            QuicklinkError::InvalidCode(_) => "E002",
            QuicklinkError::CodeTaken(_) => "E003",
            QuicklinkError::NotFound(_) => "E004",
            QuicklinkError::GenerationExhausted(_) => "E005",
            QuicklinkError::FileOperation(_) => "E006",
            QuicklinkError::Serialization(_) => "E007",
            QuicklinkError::Persistence(_) => "E008",
            QuicklinkError::Config(_) => "E009",
            QuicklinkError::Internal(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            QuicklinkError::InvalidUrl(_) => "Invalid URL",
            QuicklinkError::InvalidCode(_) => "Invalid Custom Code",
            QuicklinkError::CodeTaken(_) => "Custom Code Taken",
            QuicklinkError::NotFound(_) => "Resource Not Found",
            QuicklinkError::GenerationExhausted(_) => "Code Generation Exhausted",
            QuicklinkError::FileOperation(_) => "File Operation Error",
            QuicklinkError::Serialization(_) => "Serialization Error",
            QuicklinkError::Persistence(_) => "Persistence Error",
            QuicklinkError::Config(_) => "Configuration Error",
            QuicklinkError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            QuicklinkError::InvalidUrl(msg) => msg,
            QuicklinkError::InvalidCode(msg) => msg,
            QuicklinkError::CodeTaken(msg) => msg,
            QuicklinkError::NotFound(msg) => msg,
            QuicklinkError::GenerationExhausted(msg) => msg,
            QuicklinkError::FileOperation(msg) => msg,
            QuicklinkError::Serialization(msg) => msg,
            QuicklinkError::Persistence(msg) => msg,
            QuicklinkError::Config(msg) => msg,
            QuicklinkError::Internal(msg) => msg,
        }
    }

    /// Whether the error was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QuicklinkError::InvalidUrl(_)
                | QuicklinkError::InvalidCode(_)
                | QuicklinkError::CodeTaken(_)
                | QuicklinkError::NotFound(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
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

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for QuicklinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for QuicklinkError {}

// 便捷的构造函数
impl QuicklinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::InvalidUrl(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::InvalidCode(msg.into())
    }

    pub fn code_taken<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::CodeTaken(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::NotFound(msg.into())
    }

    pub fn generation_exhausted<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::GenerationExhausted(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::Serialization(msg.into())
    }

    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::Persistence(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::Config(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        QuicklinkError::Internal(msg.into())
    }
}

impl From<std::io::Error> for QuicklinkError {
    fn from(err: std::io::Error) -> Self {
        QuicklinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for QuicklinkError {
    fn from(err: serde_json::Error) -> Self {
        QuicklinkError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for QuicklinkError {
    fn from(err: toml::ser::Error) -> Self {
        QuicklinkError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for QuicklinkError {
    fn from(err: config::ConfigError) -> Self {
        QuicklinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuicklinkError>;
