use crate::errors::AppResult;
use crate::gateway::Transport;
use crate::gateway::endpoint::Endpoint;
use serde_json::Value;

/// Sends every request to `primary`; when it cannot be reached the same
/// request goes to `fallback`. Any other primary error is returned as is.
pub struct Failover<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Transport, F: Transport> Failover<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Transport, F: Transport> Transport for Failover<P, F> {
    fn post(&self, endpoint: Endpoint, payload: Value) -> AppResult<Value> {
        match self.primary.post(endpoint, payload.clone()) {
            Err(e) if e.is_unreachable() => {
                tracing::warn!(%endpoint, error = %e, "primary backend unreachable, using local store");
                self.fallback.post(endpoint, payload)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use serde_json::json;

    struct Fixed(fn() -> AppResult<Value>);

    impl Transport for Fixed {
        fn post(&self, _: Endpoint, _: Value) -> AppResult<Value> {
            (self.0)()
        }
    }

    fn down() -> AppResult<Value> {
        Err(AppError::Unreachable("connection refused".into()))
    }
    fn denied() -> AppResult<Value> {
        Err(AppError::Api {
            status: 401,
            message: "Invalid credentials".into(),
        })
    }
    fn local() -> AppResult<Value> {
        Ok(json!("local"))
    }
    fn remote() -> AppResult<Value> {
        Ok(json!("remote"))
    }

    #[test]
    fn uses_primary_when_it_answers() {
        let t = Failover::new(Fixed(remote), Fixed(local));
        assert_eq!(t.post(Endpoint::ProfileGet, json!({})).unwrap(), "remote");
    }

    #[test]
    fn falls_back_when_primary_is_down() {
        let t = Failover::new(Fixed(down), Fixed(local));
        assert_eq!(t.post(Endpoint::ProfileGet, json!({})).unwrap(), "local");
    }

    #[test]
    fn api_errors_are_not_masked() {
        let t = Failover::new(Fixed(denied), Fixed(local));
        let err = t.post(Endpoint::Login, json!({})).unwrap_err();
        assert!(matches!(err, AppError::Api { status: 401, .. }));
    }
}
