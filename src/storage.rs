use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use time::{macros::format_description, Date};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{meals::repo_types::DailyLog, profile::repo_types::Profile};

/// Persistence for the single profile and the per-date meal logs.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn load_profile(&self) -> anyhow::Result<Option<Profile>>;
    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()>;
    async fn load_day(&self, date: Date) -> anyhow::Result<Option<DailyLog>>;
    async fn save_day(&self, date: Date, log: &DailyLog) -> anyhow::Result<()>;
}

/// JSON documents under a data directory:
/// `profile.json` and `days/<YYYY-MM-DD>.json`.
#[derive(Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join("days"))
            .await
            .with_context(|| format!("create data dir {}", root.display()))?;
        Ok(Self { root })
    }

    fn profile_path(&self) -> PathBuf {
        self.root.join("profile.json")
    }

    fn day_path(&self, date: Date) -> anyhow::Result<PathBuf> {
        let key = date
            .format(format_description!("[year]-[month]-[day]"))
            .context("format date key")?;
        Ok(self.root.join("days").join(format!("{key}.json")))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    let value = serde_json::from_slice(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(value))
}

// Write to a sibling temp file first so readers never see a partial document.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_vec_pretty(value).context("serialize json")?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body)
        .await
        .with_context(|| format!("write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    debug!(path = %path.display(), "json written");
    Ok(())
}

#[async_trait]
impl TrackerStore for JsonFileStore {
    async fn load_profile(&self) -> anyhow::Result<Option<Profile>> {
        read_json(&self.profile_path()).await
    }

    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        write_json(&self.profile_path(), profile).await
    }

    async fn load_day(&self, date: Date) -> anyhow::Result<Option<DailyLog>> {
        read_json(&self.day_path(date)?).await
    }

    async fn save_day(&self, date: Date, log: &DailyLog) -> anyhow::Result<()> {
        write_json(&self.day_path(date)?, log).await
    }
}

#[derive(Default)]
struct MemoryInner {
    profile: Option<Profile>,
    days: BTreeMap<Date, DailyLog>,
}

/// Process-local store; contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[async_trait]
impl TrackerStore for MemoryStore {
    async fn load_profile(&self) -> anyhow::Result<Option<Profile>> {
        Ok(self.inner.read().await.profile.clone())
    }

    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        self.inner.write().await.profile = Some(profile.clone());
        Ok(())
    }

    async fn load_day(&self, date: Date) -> anyhow::Result<Option<DailyLog>> {
        Ok(self.inner.read().await.days.get(&date).cloned())
    }

    async fn save_day(&self, date: Date, log: &DailyLog) -> anyhow::Result<()> {
        self.inner.write().await.days.insert(date, log.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foods::{portions::PortionUnit, services::MatchConfidence},
        meals::repo_types::{FoodEntry, Meal},
        profile::repo_types::{ActivityLevel, Gender, GoalRate},
    };
    use time::macros::{date, datetime};
    use uuid::Uuid;

    fn sample_profile() -> Profile {
        Profile {
            weight_kg: 72.5,
            height_cm: 168.0,
            age_years: 41,
            gender: Gender::Female,
            activity_level: ActivityLevel::Light,
            goal_rate: GoalRate::Slow,
            goal_weight_kg: Some(65.0),
        }
    }

    fn sample_day() -> DailyLog {
        let mut log = DailyLog::new(date!(2024 - 05 - 03));
        log.meals.push(Meal {
            id: Uuid::new_v4(),
            name: "lunch".into(),
            logged_at: datetime!(2024-05-03 12:30:00 UTC),
            entries: vec![FoodEntry {
                food_name: "Pizza".into(),
                unit: PortionUnit::Slice,
                quantity: 2.0,
                grams: 60.0,
                calories: 159.6,
                confidence: MatchConfidence::Exact,
                matched_to: Some("pizza".into()),
            }],
        });
        log
    }

    #[tokio::test]
    async fn json_store_round_trips_profile_and_days() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path()).await.expect("store");

        assert!(store.load_profile().await.unwrap().is_none());
        store.save_profile(&sample_profile()).await.unwrap();
        assert_eq!(store.load_profile().await.unwrap(), Some(sample_profile()));

        let day = sample_day();
        assert!(store.load_day(day.date).await.unwrap().is_none());
        store.save_day(day.date, &day).await.unwrap();
        let loaded = store.load_day(day.date).await.unwrap().expect("day");
        assert_eq!(loaded, day);
        assert_eq!(loaded.consumed(), day.consumed());
        assert!(dir.path().join("days").join("2024-05-03.json").exists());
    }

    #[tokio::test]
    async fn json_store_reports_corrupt_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path()).await.expect("store");
        tokio::fs::write(dir.path().join("profile.json"), b"{not json")
            .await
            .unwrap();
        let err = store.load_profile().await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[tokio::test]
    async fn memory_store_keeps_days_apart() {
        let store = MemoryStore::default();
        let day = sample_day();
        store.save_day(day.date, &day).await.unwrap();
        assert_eq!(store.load_day(day.date).await.unwrap(), Some(day));
        assert!(store
            .load_day(date!(2024 - 05 - 04))
            .await
            .unwrap()
            .is_none());
    }
}
