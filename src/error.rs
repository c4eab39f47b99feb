use thiserror::Error;

#[derive(Debug, Error)]
pub enum GaejeongError {
    #[error("🔑 API 키가 설정되지 않았습니다")]
    NoApiKey,

    #[error("🌐 네트워크 오류: {0}")]
    Network(#[from] reqwest::Error),

    #[error("⚠️ API 오류 ({code}): {message}")]
    ApiError {
        code: String,
        message: String,
        hint: Option<String>,
    },

    #[error("⏱️ 시간 초과: {0}초 안에 응답이 없습니다")]
    Timeout(u64),

    #[error("⚙️ 설정 오류: {0}")]
    Config(String),

    #[error("💾 파일 시스템 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("📄 데이터 변환 오류: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("🔍 응답 파싱 오류: {0}")]
    Parse(String),

    #[error("❌ 잘못된 입력: {0}")]
    InvalidInput(String),
}

impl GaejeongError {
    /// Create an API error with an optional hint
    pub fn api_error(code: impl Into<String>, message: impl Into<String>, hint: Option<String>) -> Self {
        Self::ApiError {
            code: code.into(),
            message: message.into(),
            hint,
        }
    }

    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NoApiKey => Some(
                "https://open.law.go.kr 에서 OC(API 키)를 발급받은 뒤 \
                 'gaejeong config set law.key YOUR_KEY' 로 설정하거나 OC 환경 변수를 지정하세요."
                    .to_string(),
            ),
            Self::ApiError { hint, .. } => hint.clone(),
            Self::Network(_) => Some("인터넷 연결을 확인한 뒤 다시 시도하세요.".to_string()),
            Self::Timeout(_) => Some(
                "law.go.kr 응답이 지연되고 있습니다. 'gaejeong config set law.timeout 30' 으로 제한 시간을 늘려 보세요."
                    .to_string(),
            ),
            Self::Parse(_) => Some(
                "API 응답 형식이 예상과 다릅니다. --verbose 옵션으로 자세한 로그를 확인하세요.".to_string(),
            ),
            Self::InvalidInput(_) => Some(
                "입력한 값을 다시 확인하세요. 사용법은 'gaejeong --help' 를 참고하세요.".to_string(),
            ),
            Self::Io(err) => match err.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    Some("설정 파일에 접근할 권한이 없습니다. ~/.gaejeong 디렉터리 권한을 확인하세요.".to_string())
                }
                std::io::ErrorKind::NotFound => {
                    Some("파일을 찾을 수 없습니다. 경로를 다시 확인하세요.".to_string())
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Transport failures (network, timeout, non-success status) as opposed to
    /// malformed documents. Both skip a statute; only the log line differs.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::ApiError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GaejeongError>;
