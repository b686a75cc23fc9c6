use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型，目前只签发 "access"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// 访问令牌有效期
    pub fn access_token_ttl() -> chrono::Duration {
        chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry)
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::sign(
            user_id,
            role,
            ACCESS_TOKEN_TYPE,
            Self::access_token_ttl(),
            &Self::get_secret(),
        )
    }

    // 用指定密钥签发令牌
    fn sign(
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 用指定密钥校验令牌及其类型
    fn verify_with_secret(
        token: &str,
        expected_type: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let claims = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)?;

        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(token, ACCESS_TOKEN_TYPE, &Self::get_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-for-unit-tests";

    #[test]
    fn test_sign_and_verify() {
        let token =
            JwtUtils::sign(7, "teacher", "access", chrono::Duration::minutes(5), SECRET).unwrap();
        let claims = JwtUtils::verify_with_secret(&token, "access", SECRET).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, "teacher");
    }

    #[test]
    fn test_rejects_wrong_secret_and_type() {
        let token =
            JwtUtils::sign(7, "admin", "refresh", chrono::Duration::minutes(5), SECRET).unwrap();
        assert!(JwtUtils::verify_with_secret(&token, "access", SECRET).is_err());
        assert!(JwtUtils::verify_with_secret(&token, "refresh", "other-secret").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let token =
            JwtUtils::sign(1, "student", "access", chrono::Duration::hours(-2), SECRET).unwrap();
        assert!(JwtUtils::verify_with_secret(&token, "access", SECRET).is_err());
    }
}
