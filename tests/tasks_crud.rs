#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taskrec::db::tasks::Tasks;
    use taskrec::db::users::Users;
    use taskrec::libs::config::Config;
    use taskrec::libs::task::{NewTask, TaskPatch, TaskStatus};
    use taskrec::libs::user::NewUser;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use uuid::Uuid;

    struct TaskTestContext {
        _temp_dir: TempDir,
        config: Config,
        alice: Uuid,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = Config {
                db_file: Some(temp_dir.path().join("taskrec.db")),
            };
            let alice = Users::new(&config)
                .unwrap()
                .create(&NewUser::new("Alice", "alice@example.com"))
                .unwrap()
                .id;
            TaskTestContext {
                _temp_dir: temp_dir,
                config,
                alice,
            }
        }
    }

    fn due(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_then_get_round_trip(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks.insert(&NewTask::new("T1", due(2024, 6, 15, 12), ctx.alice)).unwrap();
        assert_eq!(created.title, "T1");
        assert_eq!(created.status, TaskStatus::Pending);
        assert_eq!(created.due_date, due(2024, 6, 15, 12));
        assert_eq!(created.user_id, ctx.alice);
        assert_eq!(created.idempotency_key, None);

        let fetched = tasks.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_explicit_status_is_kept(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks
            .insert(&NewTask::new("Started", due(2024, 6, 15, 12), ctx.alice).with_status(TaskStatus::InProgress))
            .unwrap();
        assert_eq!(created.status, TaskStatus::InProgress);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_partial_update_keeps_other_fields(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks.insert(&NewTask::new("T1", due(2024, 6, 15, 12), ctx.alice)).unwrap();

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let updated = tasks.update(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.title, "T1");
        assert_eq!(updated.due_date, created.due_date);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_due_date(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks.insert(&NewTask::new("T1", due(2024, 6, 15, 12), ctx.alice)).unwrap();

        let patch = TaskPatch {
            due_date: Some(due(2024, 7, 1, 9)),
            ..Default::default()
        };
        let updated = tasks.update(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.due_date, due(2024, 7, 1, 9));
        assert_eq!(updated.status, TaskStatus::Pending);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_explicit_null_clears_idempotency_key(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks
            .insert(&NewTask::new("T1", due(2024, 6, 15, 12), ctx.alice).with_idempotency_key("key-1"))
            .unwrap();
        assert_eq!(created.idempotency_key.as_deref(), Some("key-1"));

        let patch = TaskPatch {
            idempotency_key: Some(None),
            ..Default::default()
        };
        let updated = tasks.update(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.idempotency_key, None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_empty_patch_returns_row(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks.insert(&NewTask::new("T1", due(2024, 6, 15, 12), ctx.alice)).unwrap();
        let updated = tasks.update(created.id, &TaskPatch::default()).unwrap().unwrap();
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.due_date, created.due_date);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_unknown_id_returns_none(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let patch = TaskPatch {
            title: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(tasks.update(Uuid::new_v4(), &patch).unwrap().is_none());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_reports_existence(ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks.insert(&NewTask::new("T1", due(2024, 6, 15, 12), ctx.alice)).unwrap();
        assert!(tasks.delete(created.id).unwrap());
        assert!(tasks.get(created.id).unwrap().is_none());
        assert!(!tasks.delete(created.id).unwrap());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_full_lifecycle(ctx: &mut TaskTestContext) {
        // create -> defaults to pending -> mark done -> delete -> gone
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let created = tasks.insert(&NewTask::new("T1", due(2024, 6, 15, 12), ctx.alice)).unwrap();
        assert_eq!(created.status, TaskStatus::Pending);

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let updated = tasks.update(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.due_date, created.due_date);

        assert!(tasks.delete(created.id).unwrap());
        assert!(tasks.get(created.id).unwrap().is_none());
    }
}
