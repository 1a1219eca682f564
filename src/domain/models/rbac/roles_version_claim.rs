//! `roles_ver` 클레임 해석

use serde_json::Value;

/// 토큰에 기록된 역할 버전 클레임
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolesVersionClaim {
    /// 클레임 없음. 가드 검사 대상이 아님
    Absent,
    Valid(i64),
    /// 정수로 해석되지 않는 값. 원문 보관
    Malformed(String),
}

impl RolesVersionClaim {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => RolesVersionClaim::Absent,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(version) => RolesVersionClaim::Valid(version),
                Err(_) => RolesVersionClaim::Malformed(raw.to_string()),
            },
        }
    }

    /// 토큰의 `roles_ver` JSON 값을 해석합니다.
    ///
    /// - 없거나 `null` → `Absent`
    /// - 문자열 → 정수로 파싱 (`parse`)
    /// - 정수 JSON 숫자 → `Valid`
    /// - 그 외 (실수, 불리언, 배열, 객체) → `Malformed`
    pub fn from_claim(raw: Option<&Value>) -> Self {
        match raw {
            None | Some(Value::Null) => RolesVersionClaim::Absent,
            Some(Value::String(raw)) => Self::parse(Some(raw.as_str())),
            Some(Value::Number(number)) => match number.as_i64() {
                Some(version) => RolesVersionClaim::Valid(version),
                None => RolesVersionClaim::Malformed(number.to_string()),
            },
            Some(other) => RolesVersionClaim::Malformed(other.to_string()),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, RolesVersionClaim::Absent)
    }

    /// 비교에 사용할 버전 값
    ///
    /// 잘못된 값은 0 으로 취급되어 항상 오래된 토큰으로 판정됩니다.
    pub fn effective_version(&self) -> i64 {
        match self {
            RolesVersionClaim::Valid(version) => *version,
            RolesVersionClaim::Absent | RolesVersionClaim::Malformed(_) => 0,
        }
    }
}
