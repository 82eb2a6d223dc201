//! Per-IP rate limiting middleware using the governor crate.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::state::AppState;

/// Rate limiter state for a single IP
type KeyedLimiter = RateLimiter<NotKeyed, InMemoryState, governor::clock::DefaultClock>;

/// Per-IP rate limiter
pub struct IpRateLimiter {
    limiters: RwLock<HashMap<IpAddr, Arc<KeyedLimiter>>>,
    quota: Quota,
}

impl IpRateLimiter {
    /// Create a rate limiter allowing `per_minute` requests per IP
    pub fn new(per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(per_minute.max(1)).unwrap_or(NonZeroU32::MIN);
        Self {
            limiters: RwLock::new(HashMap::new()),
            quota: Quota::per_minute(per_minute),
        }
    }

    /// Check whether a request from this IP is allowed
    pub async fn check_ip(&self, ip: IpAddr) -> bool {
        // Get or create rate limiter for this IP
        let limiter = {
            let read_guard = self.limiters.read().await;
            if let Some(limiter) = read_guard.get(&ip) {
                limiter.clone()
            } else {
                drop(read_guard);

                let mut write_guard = self.limiters.write().await;
                // Double-check after acquiring write lock
                if let Some(limiter) = write_guard.get(&ip) {
                    limiter.clone()
                } else {
                    let limiter = Arc::new(RateLimiter::direct(self.quota));
                    write_guard.insert(ip, limiter.clone());
                    limiter
                }
            }
        };

        limiter.check().is_ok()
    }

    /// Get the number of tracked IPs
    pub async fn limiter_count(&self) -> usize {
        self.limiters.read().await.len()
    }
}

/// Axum middleware enforcing the per-IP quota on the wrapped routes
pub async fn rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !state.limiter.check_ip(addr.ip()).await {
        tracing::debug!(ip = %addr.ip(), "Rate limit exceeded");
        return ApiError::TooManyRequests.into_response();
    }

    next.run(request).await
}
