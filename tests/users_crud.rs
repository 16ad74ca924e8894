#[cfg(test)]
mod tests {
    use taskrec::db::users::Users;
    use taskrec::libs::config::Config;
    use taskrec::libs::user::{NewUser, UserPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use uuid::Uuid;

    struct UserTestContext {
        _temp_dir: TempDir,
        config: Config,
    }

    impl TestContext for UserTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = Config {
                db_file: Some(temp_dir.path().join("taskrec.db")),
            };
            UserTestContext { _temp_dir: temp_dir, config }
        }
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_create_and_get(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        let created = users
            .create(&NewUser::new("Alice", "alice@example.com").with_phone_number("+1-555-0100"))
            .unwrap();
        assert_eq!(created.name, "Alice");
        assert_eq!(created.email, "alice@example.com");
        assert_eq!(created.phone_number.as_deref(), Some("+1-555-0100"));

        let fetched = users.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);

        let by_email = users.get_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_absent_lookups_are_not_errors(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        assert!(users.get(Uuid::new_v4()).unwrap().is_none());
        assert!(users.get_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_duplicate_email_is_a_conflict(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        users.create(&NewUser::new("Alice", "alice@example.com")).unwrap();
        let err = users.create(&NewUser::new("Other Alice", "alice@example.com")).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_list_pagination(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        for i in 0..5 {
            users.create(&NewUser::new(&format!("User {}", i), &format!("user{}@example.com", i))).unwrap();
        }

        assert_eq!(users.list(0, 100).unwrap().len(), 5);
        assert_eq!(users.list(0, 2).unwrap().len(), 2);
        assert_eq!(users.list(4, 100).unwrap().len(), 1);
        assert_eq!(users.list(5, 100).unwrap().len(), 0);
        assert_eq!(users.list(0, 0).unwrap().len(), 0);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_partial_update_touches_only_present_fields(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        let created = users
            .create(&NewUser::new("Alice", "alice@example.com").with_phone_number("+1-555-0100"))
            .unwrap();

        let patch = UserPatch {
            name: Some("Alice Liddell".to_string()),
            ..Default::default()
        };
        let updated = users.update(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.name, "Alice Liddell");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.phone_number.as_deref(), Some("+1-555-0100"));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_explicit_null_clears_phone(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        let created = users
            .create(&NewUser::new("Alice", "alice@example.com").with_phone_number("+1-555-0100"))
            .unwrap();

        let patch = UserPatch {
            phone_number: Some(None),
            ..Default::default()
        };
        let updated = users.update(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.phone_number, None);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_update_unknown_id_returns_none(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        let patch = UserPatch {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(users.update(Uuid::new_v4(), &patch).unwrap().is_none());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_delete_reports_existence(ctx: &mut UserTestContext) {
        let mut users = Users::new(&ctx.config).unwrap();

        let created = users.create(&NewUser::new("Alice", "alice@example.com")).unwrap();
        assert!(users.delete(created.id).unwrap());
        assert!(users.get(created.id).unwrap().is_none());
        assert!(!users.delete(created.id).unwrap());
    }
}
