//! Replay a scripted sequence of quota requests against a fresh allocator.
//!
//! The replayer plays the host's part: it remembers each origin's granted
//! quota and keeps `total_used_quota` current as grants come back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use webquota_alloc::QuotaAllocator;
use webquota_core::config::QuotaConfig;
use webquota_core::decision::QuotaDecision;
use webquota_core::error::Result;
use webquota_core::provider::OutOfSpaceNotifier;
use webquota_io::{FixedCacheInfo, FixedDiskInfo};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub total_bytes: i64,
    pub free_bytes: i64,
    #[serde(default)]
    pub app_cache_bytes: i64,
    #[serde(default)]
    pub requests: Vec<Request>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    Database {
        origin: String,
        #[serde(default)]
        database: String,
        /// Overrides the quota the replayer has tracked for this origin.
        #[serde(default)]
        current_quota: Option<i64>,
    },
    AppCache {
        space_needed: i64,
    },
}

/// One replayed step, as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub request: Request,
    pub decision: QuotaDecision,
    pub total_used_quota: i64,
    pub app_cache_max_size: i64,
}

pub struct Replay {
    allocator: QuotaAllocator,
    origin_quotas: HashMap<String, i64>,
    total_used_quota: i64,
}

impl Replay {
    pub fn new(
        trace: &Trace,
        config: &QuotaConfig,
        notifier: impl OutOfSpaceNotifier + 'static,
    ) -> Result<Self> {
        let disk = FixedDiskInfo::new(trace.total_bytes, trace.free_bytes);
        let cache = FixedCacheInfo(trace.app_cache_bytes);
        let allocator = QuotaAllocator::with_config(config, &disk, &cache)?;
        Ok(Self {
            allocator: allocator.with_notifier(notifier),
            origin_quotas: HashMap::new(),
            total_used_quota: 0,
        })
    }

    pub fn allocator(&self) -> &QuotaAllocator {
        &self.allocator
    }

    pub fn run(&mut self, requests: &[Request]) -> Vec<Step> {
        requests.iter().map(|r| self.apply(r)).collect()
    }

    pub fn apply(&mut self, request: &Request) -> Step {
        let decision = match request {
            Request::Database {
                origin,
                database,
                current_quota,
            } => {
                let tracked = self.origin_quotas.get(origin).copied().unwrap_or(0);
                let current = current_quota.unwrap_or(tracked);
                let decision = self.allocator.on_exceeded_database_quota(
                    origin,
                    database,
                    current,
                    self.total_used_quota,
                );
                if decision.is_granted() {
                    self.total_used_quota += decision.quota - tracked;
                    self.origin_quotas.insert(origin.clone(), decision.quota);
                }
                decision
            }
            Request::AppCache { space_needed } => self
                .allocator
                .on_reached_max_app_cache_size(*space_needed, self.total_used_quota),
        };

        Step {
            request: request.clone(),
            decision,
            total_used_quota: self.total_used_quota,
            app_cache_max_size: self.allocator.app_cache_max_size(),
        }
    }
}
