use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Freezer not found: {freezer}")]
    FreezerNotFound { freezer: String },

    #[error("Destination freezer not found: {freezer}")]
    DestinationFreezerNotFound { freezer: String },

    #[error("Container not found: {container}")]
    ContainerNotFound { container: String },

    #[error("Request body decode error: {0}")]
    BodyDecodeError(#[source] serde_json::Error),

    #[error("Failed to read store {}: {source}", path.display())]
    StoreReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store {}: {source}", path.display())]
    StoreParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write store {}: {source}", path.display())]
    StoreWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 客戶端送來的請求無法解析
    Request,
    /// 找不到冷凍庫或容器
    Inventory,
    /// 狀態檔讀寫失敗
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InventoryError {
    /// Stable error name, used in structured HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            InventoryError::FreezerNotFound { .. } => "FreezerNotFound",
            InventoryError::DestinationFreezerNotFound { .. } => "DestinationFreezerNotFound",
            InventoryError::ContainerNotFound { .. } => "ContainerNotFound",
            InventoryError::BodyDecodeError(_) => "BodyDecodeError",
            InventoryError::StoreReadError { .. } => "StoreReadError",
            InventoryError::StoreParseError { .. } => "StoreParseError",
            InventoryError::StoreWriteError { .. } => "StoreWriteError",
            InventoryError::IoError(_) => "IoError",
            InventoryError::SerializationError(_) => "SerializationError",
            InventoryError::CsvError(_) => "CsvError",
            InventoryError::ConfigError { .. } => "ConfigError",
            InventoryError::InvalidConfigValueError { .. } => "InvalidConfigValueError",
            InventoryError::ConfigValidationError { .. } => "ConfigValidationError",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            InventoryError::BodyDecodeError(_) => ErrorCategory::Request,
            InventoryError::FreezerNotFound { .. }
            | InventoryError::DestinationFreezerNotFound { .. }
            | InventoryError::ContainerNotFound { .. } => ErrorCategory::Inventory,
            InventoryError::StoreReadError { .. }
            | InventoryError::StoreParseError { .. }
            | InventoryError::StoreWriteError { .. } => ErrorCategory::Storage,
            InventoryError::ConfigError { .. }
            | InventoryError::InvalidConfigValueError { .. }
            | InventoryError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            InventoryError::IoError(_)
            | InventoryError::SerializationError(_)
            | InventoryError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request | ErrorCategory::Inventory => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// True when the store file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            InventoryError::StoreReadError { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            InventoryError::FreezerNotFound { freezer }
            | InventoryError::DestinationFreezerNotFound { freezer } => format!(
                "Check the freezer name '{}' against the Freezers listed by GET /state",
                freezer
            ),
            InventoryError::ContainerNotFound { container } => format!(
                "Container '{}' is not stored in any freezer; refresh the state and retry",
                container
            ),
            InventoryError::BodyDecodeError(_) => {
                "Send a JSON object with the documented fields".to_string()
            }
            InventoryError::StoreReadError { path, .. } if self.is_not_found() => format!(
                "Create {} with at least {{\"Containers\": [], \"Freezers\": []}}",
                path.display()
            ),
            InventoryError::StoreReadError { path, .. }
            | InventoryError::StoreWriteError { path, .. } => {
                format!("Check permissions on {}", path.display())
            }
            InventoryError::StoreParseError { path, .. } => {
                format!("Fix or restore the JSON document at {}", path.display())
            }
            InventoryError::ConfigError { .. }
            | InventoryError::InvalidConfigValueError { .. }
            | InventoryError::ConfigValidationError { .. } => {
                "Review the command line flags and the TOML config file".to_string()
            }
            InventoryError::IoError(_)
            | InventoryError::SerializationError(_)
            | InventoryError::CsvError(_) => "Check disk space and file permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Request => format!("The request could not be understood: {}", self),
            ErrorCategory::Inventory => self.to_string(),
            ErrorCategory::Storage => format!("The inventory store is unavailable: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }
}
