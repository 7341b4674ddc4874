//! Task CRUD operations and queries.

use rusqlite::{params, params_from_iter, types::Value, OptionalExtension};

use super::utils::{date_text, id_column, optional_id_column, parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::{NewTask, Task, TaskFilter, TaskKind, TaskUpdate},
    store::{check_delete, TaskStore},
};

const TASK_COLUMNS: &str =
    "id, kind, text, start, due, completed_on, plant_instance_id, container_id, sequence, schedule, path";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (kind, text, start, due, completed_on, plant_instance_id, container_id, sequence, schedule, path) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET text = ?1, start = ?2, due = ?3, completed_on = ?4, container_id = ?5, path = ?6 WHERE id = ?7";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: id_column(row, 0)?,
            kind: parse_column::<TaskKind>(row, 1)?,
            text: row.get(2)?,
            start: parse_column(row, 3)?,
            due: parse_column(row, 4)?,
            completed_on: parse_optional_column(row, 5)?,
            plant_instance_id: optional_id_column(row, 6)?,
            container_id: optional_id_column(row, 7)?,
            sequence: row.get::<_, i64>(8)? as u32,
            schedule: parse_optional_column(row, 9)?,
            path: row.get(10)?,
        })
    }

    fn select_tasks(&self, clause: &str, values: Vec<Value>) -> Result<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks{clause} ORDER BY start, id");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let tasks = stmt
            .query_map(params_from_iter(values), Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to parse task")?;
        Ok(tasks)
    }
}

impl TaskStore for super::Database {
    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        self.connection
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id as i64],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to fetch task")
    }

    fn find_tasks_by_instance_and_kind(
        &self,
        instance_id: u64,
        kind: TaskKind,
    ) -> Result<Vec<Task>> {
        self.select_tasks(
            " WHERE plant_instance_id = ?1 AND kind = ?2",
            vec![
                Value::Integer(instance_id as i64),
                Value::Text(kind.as_str().to_string()),
            ],
        )
    }

    fn find_open_tasks_by_instance_and_kind(
        &self,
        instance_id: u64,
        kind: TaskKind,
    ) -> Result<Vec<Task>> {
        self.select_tasks(
            " WHERE plant_instance_id = ?1 AND kind = ?2 AND completed_on IS NULL",
            vec![
                Value::Integer(instance_id as i64),
                Value::Text(kind.as_str().to_string()),
            ],
        )
    }

    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut conditions = Vec::new();
        let mut values = Vec::new();

        if let Some(container_id) = filter.container_id {
            values.push(Value::Integer(container_id as i64));
            conditions.push(format!("container_id = ?{}", values.len()));
        }
        if let Some(instance_id) = filter.plant_instance_id {
            values.push(Value::Integer(instance_id as i64));
            conditions.push(format!("plant_instance_id = ?{}", values.len()));
        }
        if let Some(kind) = filter.kind {
            values.push(Value::Text(kind.as_str().to_string()));
            conditions.push(format!("kind = ?{}", values.len()));
        }
        if filter.open_only {
            conditions.push("completed_on IS NULL".to_string());
        }
        if let Some(date) = filter.starting_by {
            values.push(Value::Text(date_text(date)));
            conditions.push(format!("start <= ?{}", values.len()));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        self.select_tasks(&clause, values)
    }

    fn create_task(&mut self, task: NewTask) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_TASK_SQL,
            params![
                task.kind.as_str(),
                &task.text,
                date_text(task.start),
                date_text(task.due),
                task.completed_on.map(date_text),
                task.plant_instance_id.map(|id| id as i64),
                task.container_id.map(|id| id as i64),
                i64::from(task.sequence),
                task.schedule.map(|kind| kind.as_str()),
                &task.path,
            ],
        )
        .db_context("Failed to insert task")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(task.into_task(id))
    }

    fn update_task_by_id(&mut self, id: u64, update: &TaskUpdate) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut task = tx
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id as i64],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to fetch task")?
            .ok_or(GardenError::TaskNotFound { id })?;

        update.apply(&mut task);

        tx.execute(
            UPDATE_TASK_SQL,
            params![
                &task.text,
                date_text(task.start),
                date_text(task.due),
                task.completed_on.map(date_text),
                task.container_id.map(|id| id as i64),
                &task.path,
                id as i64,
            ],
        )
        .db_context("Failed to update task")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(task)
    }

    fn delete_task_by_id(&mut self, id: u64, force: bool) -> Result<()> {
        let task = self.get_task(id)?.ok_or(GardenError::TaskNotFound { id })?;
        check_delete(&task, force)?;

        self.connection
            .execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;
        Ok(())
    }
}
