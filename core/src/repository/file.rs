use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::default_data_dir;
use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::model::task::{Task, TaskDraft, TaskId};
use crate::repository::snapshot::Snapshot;
use crate::repository::traits::{CategoryRepository, TaskRepository};

const DEFAULT_FILE_NAME: &str = "taskdeck.json";

/// JSON file holding every task and category. Each call reads and rewrites
/// the whole file, so it is meant for one process at a time.
#[derive(Debug, Clone)]
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("creating data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        let store = FileStore { file_path: path };
        if !store.file_path.exists() {
            info!(path = %store.file_path.display(), "initializing empty store file");
            store.write_snapshot(&Snapshot::default())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_snapshot(&self) -> Result<Snapshot> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("opening {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let snapshot: Snapshot = serde_json::from_reader(reader)
            .with_context(|| format!("parsing {}", self.file_path.display()))?;
        debug!(tasks = snapshot.tasks.len(), categories = snapshot.categories.len(), "loaded store file");
        Ok(snapshot)
    }

    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("writing {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        Ok(())
    }

    fn modify<T>(&self, change: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let mut snapshot = self.read_snapshot()?;
        let out = change(&mut snapshot)?;
        self.write_snapshot(&snapshot)?;
        Ok(out)
    }
}

impl TaskRepository for FileStore {
    fn list(&self) -> Result<Vec<Task>> {
        Ok(self.read_snapshot()?.tasks)
    }

    fn get(&self, id: TaskId) -> Result<Task> {
        Ok(self.read_snapshot()?.task(id)?.clone())
    }

    fn create(&self, draft: TaskDraft, created_at: DateTime<Utc>) -> Result<Task> {
        let task = self.modify(|s| Ok(s.insert_task(draft, created_at)))?;
        info!(id = task.id, "task created");
        Ok(task)
    }

    fn update(&self, task: &Task) -> Result<()> {
        self.modify(|s| Ok(s.replace_task(task)?))?;
        info!(id = task.id, "task updated");
        Ok(())
    }

    fn delete(&self, id: TaskId) -> Result<()> {
        self.modify(|s| Ok(s.remove_task(id)?))?;
        info!(id, "task deleted");
        Ok(())
    }
}

impl CategoryRepository for FileStore {
    fn list(&self) -> Result<Vec<Category>> {
        Ok(self.read_snapshot()?.categories)
    }

    fn get(&self, id: CategoryId) -> Result<Category> {
        Ok(self.read_snapshot()?.category(id)?.clone())
    }

    fn create(&self, draft: CategoryDraft) -> Result<Category> {
        let category = self.modify(|s| Ok(s.insert_category(draft)))?;
        info!(id = category.id, "category created");
        Ok(category)
    }

    fn update(&self, category: &Category) -> Result<()> {
        self.modify(|s| Ok(s.replace_category(category)?))?;
        info!(id = category.id, "category updated");
        Ok(())
    }

    fn delete(&self, id: CategoryId) -> Result<()> {
        self.modify(|s| Ok(s.remove_category(id)?))?;
        info!(id, "category deleted");
        Ok(())
    }
}
