use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    compact_column_positions, place_new_task, sort, Activity, ActivityContent, BoardStore, Column,
    ColumnId, ColumnUpdate, Position, Priority, PriorityId, Project, ProjectId, Task, TaskId,
    UserId,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::atomic_writer::AtomicWriter;
use super::document::{BoardDocument, JsonEnvelope, PersistenceMetadata};

/// Task store backed by one JSON file.
///
/// Every operation reads the file, applies its change and writes the whole
/// document back. Operations from one store (and its clones) are serialized;
/// separate processes are not coordinated and the last write wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_instance_id(path, Uuid::new_v4())
    }

    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Current document; a missing file is an empty board.
    pub async fn load(&self) -> KanbanResult<BoardDocument> {
        match AtomicWriter::read_if_exists(&self.path).await? {
            Some(bytes) => Ok(JsonEnvelope::from_slice(&bytes)?.data),
            None => Ok(BoardDocument::default()),
        }
    }

    async fn save(&self, document: BoardDocument) -> KanbanResult<PersistenceMetadata> {
        let envelope = JsonEnvelope::new(self.instance_id, document);
        let bytes = envelope.to_vec()?;
        AtomicWriter::write_atomic(&self.path, &bytes).await?;
        tracing::info!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(envelope.metadata)
    }

    async fn read<T>(&self, f: impl FnOnce(&BoardDocument) -> KanbanResult<T>) -> KanbanResult<T> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        f(&document)
    }

    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut BoardDocument) -> KanbanResult<T> + Send,
    ) -> KanbanResult<T> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let result = f(&mut document)?;
        self.save(document).await?;
        Ok(result)
    }

    pub async fn create_project(&self, name: String) -> KanbanResult<Project> {
        self.mutate(|doc| {
            let project = Project::new(name);
            doc.projects.push(project.clone());
            Ok(project)
        })
        .await
    }

    pub async fn create_column(
        &self,
        project_id: ProjectId,
        name: String,
        color: String,
        limit: Option<u32>,
    ) -> KanbanResult<Column> {
        self.mutate(move |doc| {
            if !doc.projects.iter().any(|p| p.id == project_id) {
                return Err(KanbanError::not_found("Project", project_id));
            }
            let position = doc
                .columns
                .iter()
                .filter(|c| c.project_id == project_id)
                .count() as i32;
            let mut column = Column::new(project_id, name, color, position);
            column.limit = limit;
            doc.columns.push(column.clone());
            Ok(column)
        })
        .await
    }

    pub async fn list_columns(&self, project_id: ProjectId) -> KanbanResult<Vec<Column>> {
        self.read(|doc| {
            let mut columns: Vec<Column> = doc
                .columns
                .iter()
                .filter(|c| c.project_id == project_id)
                .cloned()
                .collect();
            columns.sort_by_key(|c| c.position);
            Ok(columns)
        })
        .await
    }

    pub async fn create_priority(&self, name: String, color: String, rank: i32) -> KanbanResult<Priority> {
        self.mutate(move |doc| {
            let priority = Priority::new(name, color, rank);
            doc.priorities.push(priority.clone());
            Ok(priority)
        })
        .await
    }

    /// Create a task at the bottom of its column.
    pub async fn create_task(
        &self,
        column_id: ColumnId,
        title: String,
        priority_id: Option<PriorityId>,
    ) -> KanbanResult<Task> {
        self.mutate(move |doc| {
            let project_id = doc.column(column_id)?.project_id;
            let priority = priority_id
                .map(|id| {
                    doc.priorities
                        .iter()
                        .find(|p| p.id == id)
                        .cloned()
                        .ok_or_else(|| KanbanError::not_found("Priority", id))
                })
                .transpose()?;

            let (position, renumbered) = place_new_task(&mut doc.tasks, column_id);
            if !renumbered.is_empty() {
                tracing::info!(
                    "Renumbered {} tasks in column {} to fit a new task",
                    renumbered.len(),
                    column_id
                );
            }
            let mut task = Task::new(project_id, column_id, title, position);
            task.priority = priority;
            doc.tasks.push(task.clone());
            Ok(task)
        })
        .await
    }

    pub async fn task(&self, task_id: TaskId) -> KanbanResult<Task> {
        self.read(|doc| {
            doc.tasks
                .iter()
                .find(|t| t.id == task_id)
                .cloned()
                .ok_or_else(|| KanbanError::not_found("Task", task_id))
        })
        .await
    }

    /// A column's tasks in display order.
    pub async fn column_tasks(&self, column_id: ColumnId) -> KanbanResult<Vec<Task>> {
        self.read(|doc| {
            doc.column(column_id)?;
            Ok(sort::column_tasks(&doc.tasks, column_id)
                .into_iter()
                .cloned()
                .collect())
        })
        .await
    }

    pub async fn compact_column(&self, column_id: ColumnId) -> KanbanResult<Vec<(TaskId, Position)>> {
        self.mutate(move |doc| {
            doc.column(column_id)?;
            Ok(compact_column_positions(&mut doc.tasks, column_id))
        })
        .await
    }

    /// Activity entries of a task, oldest first.
    pub async fn activities(&self, task_id: TaskId) -> KanbanResult<Vec<Activity>> {
        self.read(|doc| {
            Ok(doc
                .activities
                .iter()
                .filter(|a| a.task_id == task_id)
                .cloned()
                .collect())
        })
        .await
    }
}

#[async_trait]
impl BoardStore for JsonFileStore {
    async fn fetch_project_tasks(&self, project_id: ProjectId) -> KanbanResult<Vec<Task>> {
        self.read(|doc| {
            Ok(doc
                .tasks
                .iter()
                .filter(|t| t.project_id == project_id)
                .cloned()
                .collect())
        })
        .await
    }

    async fn update_task_position(&self, task_id: TaskId, position: Position) -> KanbanResult<Task> {
        self.mutate(move |doc| {
            let task = doc.task_mut(task_id)?;
            task.set_position(position);
            Ok(task.clone())
        })
        .await
    }

    async fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        position: Position,
    ) -> KanbanResult<Task> {
        self.mutate(move |doc| {
            doc.column(column_id)?;
            let task = doc.task_mut(task_id)?;
            task.move_to_column(column_id, position);
            Ok(task.clone())
        })
        .await
    }

    async fn fetch_column(&self, column_id: ColumnId) -> KanbanResult<Column> {
        self.read(|doc| doc.column(column_id).cloned()).await
    }

    async fn patch_column(&self, column_id: ColumnId, update: ColumnUpdate) -> KanbanResult<Column> {
        self.mutate(move |doc| {
            let column = doc.column_mut(column_id)?;
            column.update(update);
            Ok(column.clone())
        })
        .await
    }

    async fn record_activity(
        &self,
        task_id: TaskId,
        user_id: UserId,
        content: ActivityContent,
    ) -> KanbanResult<()> {
        self.mutate(move |doc| {
            doc.activities.push(Activity::new(task_id, user_id, content));
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{ActivitySegment, FieldUpdate};
    use tempfile::tempdir;

    async fn seeded(store: &JsonFileStore) -> (Project, Column, Column) {
        let project = store.create_project("Launch".into()).await.unwrap();
        let todo = store
            .create_column(project.id, "Todo".into(), "gray".into(), None)
            .await
            .unwrap();
        let done = store
            .create_column(project.id, "Done".into(), "green".into(), Some(3))
            .await
            .unwrap();
        (project, todo, done)
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_board() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        assert!(!store.exists().await);
        assert!(store.load().await.unwrap().tasks.is_empty());
    }

    #[tokio::test]
    async fn test_new_tasks_go_to_the_bottom() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let (_, todo, _) = seeded(&store).await;

        let first = store.create_task(todo.id, "first".into(), None).await.unwrap();
        let second = store.create_task(todo.id, "second".into(), None).await.unwrap();
        assert_eq!(first.position, 10000.0);
        assert_eq!(second.position, 9900.0);

        let titles: Vec<_> = store
            .column_tasks(todo.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_move_and_reorder_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        let store = JsonFileStore::new(&path);
        let (project, todo, done) = seeded(&store).await;
        let task = store.create_task(todo.id, "ship".into(), None).await.unwrap();

        store.move_task(task.id, done.id, 10000.0).await.unwrap();
        store.update_task_position(task.id, 12000.0).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        let tasks = reopened.fetch_project_tasks(project.id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].column_id, done.id);
        assert_eq!(tasks[0].position, 12000.0);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let (_, todo, _) = seeded(&store).await;
        let task = store.create_task(todo.id, "t".into(), None).await.unwrap();

        let err = store.move_task(task.id, Uuid::new_v4(), 1.0).await.unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
        let err = store.update_task_position(Uuid::new_v4(), 1.0).await.unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
        let err = store
            .create_task(todo.id, "t".into(), Some(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, KanbanError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_patch_column() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let (_, _, done) = seeded(&store).await;

        let patched = store
            .patch_column(
                done.id,
                ColumnUpdate {
                    name: Some("Shipped".into()),
                    limit: FieldUpdate::Clear,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.name, "Shipped");
        assert_eq!(patched.limit, None);

        let fetched = store.fetch_column(done.id).await.unwrap();
        assert_eq!(fetched.name, "Shipped");
        assert_eq!(fetched.color, "green");
    }

    #[tokio::test]
    async fn test_record_activity() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let (_, todo, done) = seeded(&store).await;
        let task = store.create_task(todo.id, "t".into(), None).await.unwrap();

        let content = ActivityContent::task_moved("ada", todo.id, done.id, chrono::Utc::now());
        store
            .record_activity(task.id, "ada".into(), content)
            .await
            .unwrap();

        let activities = store.activities(task.id).await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].user_id, "ada");
        assert_eq!(
            activities[0].content.segments()[4],
            ActivitySegment::Column(done.id)
        );
    }

    #[tokio::test]
    async fn test_priority_copied_onto_task() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let (_, todo, _) = seeded(&store).await;
        let high = store.create_priority("High".into(), "red".into(), 2).await.unwrap();

        let plain = store.create_task(todo.id, "plain".into(), None).await.unwrap();
        let urgent = store
            .create_task(todo.id, "urgent".into(), Some(high.id))
            .await
            .unwrap();
        assert_eq!(urgent.priority.as_ref().map(|p| p.rank), Some(2));

        let order: Vec<_> = store
            .column_tasks(todo.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(order, [urgent.id, plain.id]);
    }

    #[tokio::test]
    async fn test_new_plain_task_below_prioritized_gets_own_slot() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let (_, todo, _) = seeded(&store).await;
        let high = store.create_priority("High".into(), "red".into(), 2).await.unwrap();

        let first = store.create_task(todo.id, "first".into(), None).await.unwrap();
        let urgent = store
            .create_task(todo.id, "urgent".into(), Some(high.id))
            .await
            .unwrap();
        let second = store.create_task(todo.id, "second".into(), None).await.unwrap();

        let tasks = store.column_tasks(todo.id).await.unwrap();
        let order: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(order, [urgent.id, first.id, second.id]);

        let mut bits: Vec<u64> = tasks.iter().map(|t| t.position.to_bits()).collect();
        bits.sort_unstable();
        bits.dedup();
        assert_eq!(bits.len(), 3);
        assert!(tasks.windows(2).all(|pair| pair[0].position > pair[1].position));
        assert_eq!(second.position, tasks[2].position);
    }

    #[tokio::test]
    async fn test_compact_column() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        let (_, todo, _) = seeded(&store).await;
        let a = store.create_task(todo.id, "a".into(), None).await.unwrap();
        let b = store.create_task(todo.id, "b".into(), None).await.unwrap();

        let changed = store.compact_column(todo.id).await.unwrap();
        assert_eq!(changed, vec![(a.id, 2000.0), (b.id, 1000.0)]);
    }
}
