//! 역할 버전 관리자 API 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 토큰 일괄 무효화 요청 (본문은 선택)
///
/// `reason` 은 감사 로그 메시지에 덧붙여집니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InvalidateTokensRequest {
    #[validate(length(max = 256, message = "사유는 256자 이하여야 합니다"))]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_length_is_validated() {
        let ok = InvalidateTokensRequest { reason: Some("role matrix changed".to_string()) };
        assert!(ok.validate().is_ok());

        let empty = InvalidateTokensRequest::default();
        assert!(empty.validate().is_ok());

        let too_long = InvalidateTokensRequest { reason: Some("x".repeat(257)) };
        assert!(too_long.validate().is_err());
    }
}
