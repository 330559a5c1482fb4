//! OAuth 1.0a request signing (HMAC-SHA1).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::TwitterConfig;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encode per RFC 3986 (unreserved characters pass through).
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// The four keys a user-context request is signed with.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl From<&TwitterConfig> for OAuthCredentials {
    fn from(config: &TwitterConfig) -> Self {
        Self {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            token: config.access_token.clone(),
            token_secret: config.access_token_secret.clone(),
        }
    }
}

impl OAuthCredentials {
    /// `Authorization` header value for a request, with a fresh nonce and timestamp.
    ///
    /// `params` are the query or form parameters that take part in the
    /// signature. JSON and multipart bodies are not signed.
    pub fn authorization(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_with(method, url, params, &nonce, &timestamp)
    }

    fn authorization_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let mut oauth = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let mut all: Vec<(&str, &str)> = oauth.clone();
        all.extend_from_slice(params);
        let signature = self.sign(method, url, &all);
        oauth.push(("oauth_signature", signature.as_str()));

        let fields: Vec<String> = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }

    /// Base64 HMAC-SHA1 over the signature base string.
    pub fn sign(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let mut encoded: Vec<(String, String)> =
            params.iter().map(|(k, v)| (encode(k), encode(v))).collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let base = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            encode(url),
            encode(&param_string)
        );
        let key = format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.token_secret)
        );

        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}
