use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JwtClaims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct JwtHeader {
    alg: String,
    typ: Option<String>,
}

/// Issue an HS256 token for `username`, valid for `ttl_secs`.
pub fn issue_token(username: &str, secret: &str, ttl_secs: i64) -> Result<String, String> {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        username: username.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    encode_claims(&claims, secret)
}

pub fn encode_claims(claims: &JwtClaims, secret: &str) -> Result<String, String> {
    let header = serde_json::json!({"alg": "HS256", "typ": "JWT"});
    let payload =
        serde_json::to_vec(claims).map_err(|e| format!("Failed to serialize JWT claims: {}", e))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(payload)
    );
    let signature = sign(signing_input.as_bytes(), secret)?;

    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
}

/// Verify signature and expiration, then return the claims.
pub fn verify_token(token: &str, secret: &str) -> Result<JwtClaims, String> {
    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header = URL_SAFE_NO_PAD
        .decode(parts[0])
        .map_err(|e| format!("Failed to decode token header: {}", e))?;
    let header: JwtHeader = serde_json::from_slice(&header)
        .map_err(|e| format!("Failed to parse token header: {}", e))?;
    if header.alg != "HS256" {
        return Err(format!("Unsupported token algorithm: {}", header.alg));
    }

    let signature = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|e| format!("Failed to decode token signature: {}", e))?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| format!("Invalid signing key: {}", e))?;
    mac.update(format!("{}.{}", parts[0], parts[1]).as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| "Invalid token signature".to_string())?;

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| format!("Failed to decode token payload: {}", e))?;
    let claims: JwtClaims = serde_json::from_slice(&payload)
        .map_err(|e| format!("Failed to parse token claims: {}", e))?;

    validate_expiration(&claims)?;
    Ok(claims)
}

pub fn validate_expiration(claims: &JwtClaims) -> Result<(), String> {
    let now = chrono::Utc::now().timestamp();
    if claims.exp < now {
        return Err(format!("Token expired (exp: {}, now: {})", claims.exp, now));
    }
    Ok(())
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Result<&str, String> {
    let parts: Vec<&str> = authorization.split_whitespace().collect();
    if parts.len() != 2 {
        return Err("Invalid Authorization header format".to_string());
    }
    if parts[0] != "Bearer" {
        return Err("Expected Bearer scheme in Authorization header".to_string());
    }
    Ok(parts[1])
}

fn sign(input: &[u8], secret: &str) -> Result<Vec<u8>, String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| format!("Invalid signing key: {}", e))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}
