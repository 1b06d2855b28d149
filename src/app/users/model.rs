//! 用户数据模型

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::error::ServiceError;

/// 对外返回的用户记录，`id` 为 24 位小写十六进制字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    #[serde(serialize_with = "serialize_hex")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
}

/// 创建/更新请求体，两个字段都必须出现（允许为空字符串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    /// 解析 JSON 请求体
    ///
    /// 只接受 JSON 对象；缺失字段或类型不符都返回 `InvalidInput`，不会补零值。
    pub fn from_json(body: &[u8]) -> Result<Self, ServiceError> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        if !value.is_object() {
            return Err(ServiceError::InvalidInput(
                "request body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| ServiceError::InvalidInput(e.to_string()))
    }
}

/// 校验并解析路径中的用户 ID
pub fn parse_user_id(raw: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(raw).map_err(|_| ServiceError::InvalidIdentifier(raw.to_string()))
}

fn serialize_hex<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_complete_payload() {
        let payload = UserPayload::from_json(br#"{"name":"Ada","email":"ada@example.com"}"#)
            .unwrap();
        assert_eq!(payload.name, "Ada");
        assert_eq!(payload.email, "ada@example.com");
    }

    #[test]
    fn empty_strings_are_accepted() {
        let payload = UserPayload::from_json(br#"{"name":"A","email":""}"#).unwrap();
        assert_eq!(payload.email, "");
    }

    #[test]
    fn rejects_malformed_bodies() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"not json",
            br#"{"name":"Ada"}"#,
            br#"{"name":"Ada","email":null}"#,
            br#"{"name":1,"email":"a@b.c"}"#,
            br#"["Ada","ada@example.com"]"#,
        ];
        for body in bodies {
            assert!(
                matches!(UserPayload::from_json(body), Err(ServiceError::InvalidInput(_))),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        let payload =
            UserPayload::from_json(br#"{"name":"Ada","email":"a@b.c","role":"admin"}"#).unwrap();
        assert_eq!(payload.name, "Ada");
    }

    #[test]
    fn parses_valid_object_id() {
        let id = parse_user_id("65f1c0ffee0123456789abcd").unwrap();
        assert_eq!(id.to_hex(), "65f1c0ffee0123456789abcd");
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "123", "65f1c0ffee0123456789abc", "zzzzzzzzzzzzzzzzzzzzzzzz", "65f1c0ffee0123456789abcd00"] {
            assert!(matches!(
                parse_user_id(raw),
                Err(ServiceError::InvalidIdentifier(ref s)) if s == raw
            ));
        }
    }

    #[test]
    fn user_serializes_id_as_hex() {
        let id = parse_user_id("65f1c0ffee0123456789abcd").unwrap();
        let user = User {
            id,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "id": "65f1c0ffee0123456789abcd", "name": "Ada", "email": "ada@example.com" })
        );
    }
}
