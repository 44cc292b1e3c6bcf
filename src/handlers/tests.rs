//! Handler tests against the in-memory store

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::auth::{Identity, PasswordHashingParams, PasswordService, TokenService};
    use crate::domain::{AmountInput, DomainError, OperationContext};
    use crate::error::AppError;
    use crate::handlers::{
        AccountHandler, AddEntryCommand, EditEntryCommand, EntryHandler, LoginCommand,
        SignupCommand,
    };
    use crate::state::AppState;
    use crate::store::MemoryStore;

    fn state() -> AppState {
        let passwords = PasswordService::new(&PasswordHashingParams {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        AppState::new(
            Arc::new(MemoryStore::with_categories(["Income", "Rent"])),
            passwords,
            TokenService::new("handler-test-secret"),
        )
    }

    fn signup_command(email: &str) -> SignupCommand {
        SignupCommand::new(
            "Jane".to_string(),
            "Doe".to_string(),
            email.to_string(),
            "Abcd1234!".to_string(),
        )
    }

    fn add_command(amount: i64) -> AddEntryCommand {
        AddEntryCommand::new(
            "Pay".to_string(),
            "Income".to_string(),
            AmountInput::Integer(amount),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    async fn registered(state: &AppState, email: &str) -> Identity {
        let result = AccountHandler::new(state)
            .signup(signup_command(email), &OperationContext::new())
            .await
            .unwrap();
        Identity {
            email: result.email,
        }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    #[tokio::test]
    async fn test_signup_normalizes_email() {
        let state = state();
        let result = AccountHandler::new(&state)
            .signup(signup_command("  Jane.Doe@X.com "), &OperationContext::new())
            .await
            .unwrap();

        assert_eq!(result.email, "jane.doe@x.com");
        assert_eq!(result.user_id, 1);
    }

    #[tokio::test]
    async fn test_signup_email_case_conflict() {
        let state = state();
        let accounts = AccountHandler::new(&state);
        let context = OperationContext::new();

        accounts
            .signup(signup_command("Jane.Doe@x.com"), &context)
            .await
            .unwrap();
        let second = accounts.signup(signup_command("jane.doe@X.COM"), &context).await;

        assert!(matches!(second, Err(AppError::EmailAlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let state = state();
        let accounts = AccountHandler::new(&state);
        let context = OperationContext::new();

        let bad_email = accounts.signup(signup_command("not-an-email"), &context).await;
        assert!(matches!(bad_email, Err(AppError::Domain(DomainError::InvalidEmail))));

        let mut weak = signup_command("jane@x.com");
        weak.password = "password".to_string();
        let weak = accounts.signup(weak, &context).await;
        assert!(matches!(weak, Err(AppError::Domain(DomainError::WeakPassword))));

        let mut nameless = signup_command("jane@x.com");
        nameless.first_name = "   ".to_string();
        let nameless = accounts.signup(nameless, &context).await;
        assert!(matches!(
            nameless,
            Err(AppError::Domain(DomainError::MissingField("firstName")))
        ));
    }

    #[tokio::test]
    async fn test_signup_rejects_over_long_fields_before_writing() {
        let state = state();
        let accounts = AccountHandler::new(&state);
        let context = OperationContext::new();

        let mut long_first = signup_command("jane@x.com");
        long_first.first_name = "J".repeat(101);
        let result = accounts.signup(long_first, &context).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::FieldTooLong("firstName", 100)))
        ));

        let long_email = format!("{}@x.com", "j".repeat(250));
        let result = accounts.signup(signup_command(&long_email), &context).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::FieldTooLong("email", 255)))
        ));

        // Nothing was stored, so the address is still free
        accounts
            .signup(signup_command("jane@x.com"), &context)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let state = state();
        registered(&state, "Jane.Doe@x.com").await;

        let token = AccountHandler::new(&state)
            .login(
                LoginCommand::new("jane.doe@x.com".to_string(), "Abcd1234!".to_string()),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        let identity = state.tokens.verify(&token).unwrap();
        assert_eq!(identity.email, "jane.doe@x.com");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let state = state();
        registered(&state, "jane.doe@x.com").await;
        let accounts = AccountHandler::new(&state);
        let context = OperationContext::new();

        let wrong_password = accounts
            .login(
                LoginCommand::new("jane.doe@x.com".to_string(), "Abcd1234!x".to_string()),
                &context,
            )
            .await;
        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));

        let unknown = accounts
            .login(
                LoginCommand::new("nobody@x.com".to_string(), "Abcd1234!".to_string()),
                &context,
            )
            .await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));

        let empty = accounts
            .login(LoginCommand::new(String::new(), String::new()), &context)
            .await;
        assert!(matches!(empty, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_identity_is_not_found() {
        let state = state();
        let ghost = Identity {
            email: "ghost@x.com".to_string(),
        };

        let result = EntryHandler::new(&state).list(&ghost).await;
        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    // =========================================================================
    // Entries
    // =========================================================================

    #[tokio::test]
    async fn test_add_amount_boundaries() {
        let state = state();
        let jane = registered(&state, "jane@x.com").await;
        let entries = EntryHandler::new(&state);
        let context = OperationContext::new();

        let zero = entries.add(&jane, add_command(0), &context).await;
        assert!(matches!(
            zero,
            Err(AppError::Domain(DomainError::NonPositiveAmount(0)))
        ));

        let negative = entries.add(&jane, add_command(-10), &context).await;
        assert!(matches!(
            negative,
            Err(AppError::Domain(DomainError::NonPositiveAmount(-10)))
        ));

        let one = entries.add(&jane, add_command(1), &context).await.unwrap();
        assert_eq!(one.category_id, 1);
    }

    #[tokio::test]
    async fn test_add_validates_before_resolving_user() {
        let state = state();
        let ghost = Identity {
            email: "ghost@x.com".to_string(),
        };

        let result = EntryHandler::new(&state)
            .add(&ghost, add_command(0), &OperationContext::new())
            .await;
        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[tokio::test]
    async fn test_add_creates_category_lazily() {
        let state = state();
        let jane = registered(&state, "jane@x.com").await;
        let entries = EntryHandler::new(&state);

        let mut command = add_command(40);
        command.category_name = "Entertainment".to_string();
        let added = entries
            .add(&jane, command, &OperationContext::new())
            .await
            .unwrap();

        assert_eq!(added.category_id, 3);
        assert_eq!(
            entries.categories().await.unwrap(),
            vec!["Income", "Rent", "Entertainment"]
        );
    }

    #[tokio::test]
    async fn test_entries_isolated_between_owners() {
        let state = state();
        let jane = registered(&state, "jane@x.com").await;
        let john = registered(&state, "john@x.com").await;
        let entries = EntryHandler::new(&state);
        let context = OperationContext::new();

        let added = entries.add(&jane, add_command(100), &context).await.unwrap();

        assert!(entries.list(&john).await.unwrap().is_empty());

        let delete = entries.delete(&john, added.entry_id, &context).await;
        assert!(matches!(delete, Err(AppError::EntryNotFound(id)) if id == added.entry_id));

        let edit = entries
            .edit(
                &john,
                EditEntryCommand::new(
                    added.entry_id,
                    1,
                    "Mine now".to_string(),
                    AmountInput::Integer(1),
                    NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                ),
                &context,
            )
            .await;
        assert!(matches!(edit, Err(AppError::EntryNotFound(_))));

        assert_eq!(entries.list(&jane).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_accepts_negative_amount_and_existing_category() {
        let state = state();
        let jane = registered(&state, "jane@x.com").await;
        let entries = EntryHandler::new(&state);
        let context = OperationContext::new();
        let added = entries.add(&jane, add_command(100), &context).await.unwrap();

        entries
            .edit(
                &jane,
                EditEntryCommand::new(
                    added.entry_id,
                    2,
                    "Monthly Rent".to_string(),
                    AmountInput::Number(-1200.0),
                    NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
                ),
                &context,
            )
            .await
            .unwrap();

        let listed = entries.list(&jane).await.unwrap();
        assert_eq!(listed[0].amount, -1200);
        assert_eq!(listed[0].category_name, "Rent");
    }

    #[tokio::test]
    async fn test_edit_unknown_category_is_not_found() {
        let state = state();
        let jane = registered(&state, "jane@x.com").await;
        let entries = EntryHandler::new(&state);
        let context = OperationContext::new();
        let added = entries.add(&jane, add_command(100), &context).await.unwrap();

        let result = entries
            .edit(
                &jane,
                EditEntryCommand::new(
                    added.entry_id,
                    99,
                    "Pay".to_string(),
                    AmountInput::Integer(100),
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                ),
                &context,
            )
            .await;
        assert!(matches!(result, Err(AppError::CategoryNotFound(99))));

        // No lazy creation on edit
        assert_eq!(entries.categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_then_list_is_empty() {
        let state = state();
        let jane = registered(&state, "jane@x.com").await;
        let entries = EntryHandler::new(&state);
        let context = OperationContext::new();
        let added = entries.add(&jane, add_command(100), &context).await.unwrap();

        entries.delete(&jane, added.entry_id, &context).await.unwrap();
        assert!(entries.list(&jane).await.unwrap().is_empty());

        let again = entries.delete(&jane, added.entry_id, &context).await;
        assert!(matches!(again, Err(AppError::EntryNotFound(_))));
    }
}
