#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taskrec::db::tasks::Tasks;
    use taskrec::db::users::Users;
    use taskrec::libs::config::Config;
    use taskrec::libs::task::{NewTask, TaskStatus, TaskSummary};
    use taskrec::libs::user::NewUser;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use uuid::Uuid;

    struct SummaryTestContext {
        _temp_dir: TempDir,
        config: Config,
        alice: Uuid,
    }

    impl TestContext for SummaryTestContext {
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
            SummaryTestContext {
                _temp_dir: temp_dir,
                config,
                alice,
            }
        }
    }

    fn due(d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test_context(SummaryTestContext)]
    #[test]
    fn test_empty_table_is_zero_filled(ctx: &mut SummaryTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let summary = tasks.summary().unwrap();
        assert_eq!(summary, TaskSummary::default());
        assert_eq!(summary.total(), 0);
    }

    #[test_context(SummaryTestContext)]
    #[test]
    fn test_counts_per_status(ctx: &mut SummaryTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        for i in 1..=3 {
            tasks.insert(&NewTask::new(&format!("P{}", i), due(i), ctx.alice)).unwrap();
        }
        tasks
            .insert(&NewTask::new("D1", due(10), ctx.alice).with_status(TaskStatus::Done))
            .unwrap();

        let summary = tasks.summary().unwrap();
        assert_eq!(summary.pending, 3);
        assert_eq!(summary.in_progress, 0);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test_context(SummaryTestContext)]
    #[test]
    fn test_total_matches_table_size(ctx: &mut SummaryTestContext) {
        let mut tasks = Tasks::new(&ctx.config).unwrap();

        let statuses = [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::Done,
            TaskStatus::Done,
        ];
        for (i, status) in statuses.iter().enumerate() {
            tasks
                .insert(&NewTask::new(&format!("T{}", i), due(i as u32 + 1), ctx.alice).with_status(*status))
                .unwrap();
        }

        let summary = tasks.summary().unwrap();
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.in_progress, 2);
        assert_eq!(summary.done, 3);
        assert_eq!(summary.total() as usize, tasks.fetch_filtered(&Default::default()).unwrap().len());
    }

    #[test_context(SummaryTestContext)]
    #[test]
    fn test_summary_ignores_filters_entirely(ctx: &mut SummaryTestContext) {
        // summary() is over the whole table; a second user's tasks count too
        let mut users = Users::new(&ctx.config).unwrap();
        let bob = users.create(&NewUser::new("Bob", "bob@example.com")).unwrap().id;

        let mut tasks = Tasks::new(&ctx.config).unwrap();
        tasks.insert(&NewTask::new("A", due(1), ctx.alice)).unwrap();
        tasks.insert(&NewTask::new("B", due(2), bob)).unwrap();

        assert_eq!(tasks.summary().unwrap().total(), 2);
    }
}
