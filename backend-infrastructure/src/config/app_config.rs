use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::utils::parse_date;
use backend_domain::{RuntimeConfig, StatsConfig};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_path: String,
    pub roster_path: String,
    pub catalog_path: String,
    pub report_dir: String,
    pub public_base_url: String,
    pub webhook_url: Option<String>,
    pub webhook_template: Option<String>,
    pub goal_total: u64,
    pub goal_deadline: String,
    pub goal_start_date: String,
    pub utc_offset_hours: i32,
    pub player_volume_threshold_l: f64,
    pub player_count_threshold: u64,
    pub team_volume_threshold_l: f64,
    pub hot_streak_threshold_l: f64,
    pub excluded_brands: Vec<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub report_hour: u32,
    pub report_minute: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3210".to_string(),
            api_token: None,
            data_path: "./data/records.json".to_string(),
            roster_path: "./roster.yaml".to_string(),
            catalog_path: "./catalog.json".to_string(),
            report_dir: "./reports".to_string(),
            public_base_url: "http://127.0.0.1:3210".to_string(),
            webhook_url: None,
            webhook_template: None,
            goal_total: 5000,
            goal_deadline: "2026-12-31".to_string(),
            goal_start_date: "2026-01-01".to_string(),
            utc_offset_hours: -3,
            player_volume_threshold_l: 50.0,
            player_count_threshold: 100,
            team_volume_threshold_l: 500.0,
            hot_streak_threshold_l: 5.0,
            excluded_brands: vec!["otras".to_string(), "other".to_string()],
            max_body_bytes: 2 * 1024 * 1024,
            request_timeout_seconds: 15,
            report_hour: 23,
            report_minute: 55,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("TOAST_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(webhook_url) = &self.webhook_url {
            if webhook_url.trim().is_empty() {
                self.webhook_url = None;
            }
        }
        if let Some(template) = &self.webhook_template {
            if template.trim().is_empty() {
                self.webhook_template = None;
            }
        }
        self.excluded_brands = normalize_brand_list(std::mem::take(&mut self.excluded_brands));
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_path = resolve_path(base, &self.data_path);
        self.roster_path = resolve_path(base, &self.roster_path);
        self.catalog_path = resolve_path(base, &self.catalog_path);
        self.report_dir = resolve_path(base, &self.report_dir);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.public_base_url.trim().is_empty() {
            return Err(anyhow!("public_base_url must not be empty"));
        }
        if self.data_path.trim().is_empty() {
            return Err(anyhow!("data_path must not be empty"));
        }
        if self.goal_total == 0 {
            return Err(anyhow!("goal_total must be greater than 0"));
        }
        parse_date(&self.goal_deadline).map_err(|err| anyhow!("invalid goal_deadline: {}", err))?;
        parse_date(&self.goal_start_date)
            .map_err(|err| anyhow!("invalid goal_start_date: {}", err))?;
        if !(-23..=23).contains(&self.utc_offset_hours) {
            return Err(anyhow!("utc_offset_hours out of range"));
        }
        for (name, value) in [
            ("player_volume_threshold_l", self.player_volume_threshold_l),
            ("team_volume_threshold_l", self.team_volume_threshold_l),
            ("hot_streak_threshold_l", self.hot_streak_threshold_l),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{} must be a non-negative number", name));
            }
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.report_hour > 23 || self.report_minute > 59 {
            return Err(anyhow!("report_hour or report_minute out of range"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_path: self.data_path.clone(),
            roster_path: self.roster_path.clone(),
            catalog_path: self.catalog_path.clone(),
            report_dir: self.report_dir.clone(),
            public_base_url: self.public_base_url.clone(),
            webhook_url: self.webhook_url.clone(),
            webhook_template: self.webhook_template.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            report_hour: self.report_hour,
            report_minute: self.report_minute,
        }
    }

    /// Fails only on unparseable dates; configs that came through `load`
    /// were already validated.
    pub fn to_stats_config(&self) -> Result<StatsConfig> {
        Ok(StatsConfig {
            goal_total: self.goal_total,
            deadline: parse_date(&self.goal_deadline)?,
            start_date: parse_date(&self.goal_start_date)?,
            utc_offset_hours: self.utc_offset_hours,
            player_volume_threshold_l: self.player_volume_threshold_l,
            player_count_threshold: self.player_count_threshold,
            team_volume_threshold_l: self.team_volume_threshold_l,
            hot_streak_threshold_l: self.hot_streak_threshold_l,
            excluded_brands: self.excluded_brands.clone(),
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("TOAST_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("TOAST_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("TOAST_DATA_PATH") {
            self.data_path = value;
        }
        if let Ok(value) = env::var("TOAST_ROSTER_PATH") {
            self.roster_path = value;
        }
        if let Ok(value) = env::var("TOAST_CATALOG_PATH") {
            self.catalog_path = value;
        }
        if let Ok(value) = env::var("TOAST_REPORT_DIR") {
            self.report_dir = value;
        }
        if let Ok(value) = env::var("TOAST_PUBLIC_BASE_URL") {
            self.public_base_url = value;
        }
        if let Ok(value) = env::var("TOAST_WEBHOOK_URL") {
            self.webhook_url = Some(value);
        }
        if let Ok(value) = env::var("TOAST_WEBHOOK_TEMPLATE") {
            self.webhook_template = Some(value);
        }
        if let Ok(value) = env::var("TOAST_GOAL_TOTAL") {
            self.goal_total = value.parse().unwrap_or(self.goal_total);
        }
        if let Ok(value) = env::var("TOAST_GOAL_DEADLINE") {
            self.goal_deadline = value;
        }
        if let Ok(value) = env::var("TOAST_GOAL_START_DATE") {
            self.goal_start_date = value;
        }
        if let Ok(value) = env::var("TOAST_UTC_OFFSET_HOURS") {
            self.utc_offset_hours = value.parse().unwrap_or(self.utc_offset_hours);
        }
        if let Ok(value) = env::var("TOAST_PLAYER_VOLUME_THRESHOLD_L") {
            self.player_volume_threshold_l =
                value.parse().unwrap_or(self.player_volume_threshold_l);
        }
        if let Ok(value) = env::var("TOAST_PLAYER_COUNT_THRESHOLD") {
            self.player_count_threshold = value.parse().unwrap_or(self.player_count_threshold);
        }
        if let Ok(value) = env::var("TOAST_TEAM_VOLUME_THRESHOLD_L") {
            self.team_volume_threshold_l = value.parse().unwrap_or(self.team_volume_threshold_l);
        }
        if let Ok(value) = env::var("TOAST_HOT_STREAK_THRESHOLD_L") {
            self.hot_streak_threshold_l = value.parse().unwrap_or(self.hot_streak_threshold_l);
        }
        if let Ok(value) = env::var("TOAST_EXCLUDED_BRANDS") {
            self.excluded_brands = parse_env_list(&value);
        }
        if let Ok(value) = env::var("TOAST_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("TOAST_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("TOAST_REPORT_HOUR") {
            self.report_hour = value.parse().unwrap_or(self.report_hour);
        }
        if let Ok(value) = env::var("TOAST_REPORT_MINUTE") {
            self.report_minute = value.parse().unwrap_or(self.report_minute);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn parse_env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_brand_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}
