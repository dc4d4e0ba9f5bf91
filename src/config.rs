use anyhow::Context;
use core::time::Duration;
use std::sync::Arc;

/// Start-up settings, read once from the environment.
pub struct Config {
    pub token: String,
    /// Chat that receives forwarded uploads and generated quizzes.
    pub review_chat: Option<i64>,
    /// Serve webhooks on this port instead of long polling.
    pub port: Option<u16>,
    /// Expected value of the webhook secret header.
    pub secret: Option<Arc<str>>,
    /// Lifetime of review records. `None` keeps them forever.
    pub ttl: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = var("TOKEN").context("TOKEN must be set")?;
        let review_chat =
            var("REVIEW_CHAT_ID").map(|chat| chat.parse()).transpose().context("REVIEW_CHAT_ID must be a chat ID")?;
        let port = var("PORT").map(|port| port.parse()).transpose().context("PORT must be a port number")?;
        let secret = var("WEBHOOK_SECRET").map(Arc::from);
        let ttl = match var("REVIEW_TTL_SECS") {
            Some(secs) => {
                let secs: u64 = secs.parse().context("REVIEW_TTL_SECS must be a number of seconds")?;
                anyhow::ensure!(secs > 0, "REVIEW_TTL_SECS must be positive. Unset it to keep reviews forever.");
                Some(Duration::from_secs(secs))
            }
            None => None,
        };
        Ok(Self { token, review_chat, port, secret, ttl })
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use core::time::Duration;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        Config::from_lookup(|key| vars.get(key).map(|value| String::from(*value)))
    }

    #[test]
    fn token_alone_is_enough() {
        let config = config(&[("TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.token, "123:abc");
        assert!(config.review_chat.is_none());
        assert!(config.port.is_none());
        assert!(config.secret.is_none());
        assert!(config.ttl.is_none());
    }

    #[test]
    fn reads_every_setting() {
        let config = config(&[
            ("TOKEN", "123:abc"),
            ("REVIEW_CHAT_ID", "-1005206036224"),
            ("PORT", "8443"),
            ("WEBHOOK_SECRET", "hunter2"),
            ("REVIEW_TTL_SECS", "86400"),
        ])
        .unwrap();
        assert_eq!(config.review_chat, Some(-1005206036224));
        assert_eq!(config.port, Some(8443));
        assert_eq!(config.secret.as_deref(), Some("hunter2"));
        assert_eq!(config.ttl, Some(Duration::from_secs(86400)));
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = config(&[("PORT", "8443")]).err().unwrap();
        assert!(err.to_string().contains("TOKEN"));
    }

    #[test]
    fn parse_failures_name_the_variable() {
        let err = config(&[("TOKEN", "t"), ("REVIEW_CHAT_ID", "the-group")]).err().unwrap();
        assert!(err.to_string().contains("REVIEW_CHAT_ID"));

        let err = config(&[("TOKEN", "t"), ("PORT", "99999")]).err().unwrap();
        assert!(err.to_string().contains("PORT"));

        let err = config(&[("TOKEN", "t"), ("REVIEW_TTL_SECS", "1h")]).err().unwrap();
        assert!(err.to_string().contains("REVIEW_TTL_SECS"));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let err = config(&[("TOKEN", "t"), ("REVIEW_TTL_SECS", "0")]).err().unwrap();
        assert!(err.to_string().contains("REVIEW_TTL_SECS"));
    }
}
