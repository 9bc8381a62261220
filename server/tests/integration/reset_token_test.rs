use chrono::{Duration, Utc};

use shukatsu_server::domain::types::RESET_TOKEN_LEN;
use shukatsu_server::error::TrackerServiceError;
use shukatsu_server::infra::hash::Argon2CredentialStore;
use shukatsu_server::usecase::reset_token::{
    CompletePasswordResetInput, CompletePasswordResetUseCase, InvalidateResetTokenUseCase,
    IssueResetTokenInput, IssueResetTokenUseCase, ResolveResetTokenUseCase,
};
use shukatsu_server::usecase::user::{LoginInput, LoginUseCase};

use crate::helpers::{
    FakeCredentialStore, MockTokenStore, MockUserStore, RecordingNotifier, test_user,
};

#[tokio::test]
async fn should_issue_token_with_24h_expiry_and_notify() {
    let user = test_user("taro@example.com");
    let tokens = MockTokenStore::empty();
    let tokens_handle = tokens.tokens_handle();
    let notifier = RecordingNotifier::new();
    let sent_handle = notifier.sent_handle();

    let uc = IssueResetTokenUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        tokens,
        notifier,
    };
    let raw = uc
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    assert_eq!(raw.len(), RESET_TOKEN_LEN);

    let tokens = tokens_handle.lock().unwrap();
    assert_eq!(tokens.len(), 1, "expected exactly one token to be created");
    assert_eq!(tokens[0].user_id, user.id);
    assert_eq!(tokens[0].token, raw);
    let ttl = tokens[0].expires_at - tokens[0].created_at;
    assert_eq!(ttl, Duration::hours(24));

    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], (user.email, raw));
}

#[tokio::test]
async fn should_return_not_found_when_issuing_for_unknown_email() {
    let uc = IssueResetTokenUseCase {
        users: MockUserStore::empty(),
        tokens: MockTokenStore::empty(),
        notifier: RecordingNotifier::new(),
    };
    let result = uc
        .execute(IssueResetTokenInput {
            email: "nobody@example.com".into(),
        })
        .await;
    assert!(
        matches!(result, Err(TrackerServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_resolve_fresh_token_to_issuing_user() {
    let user = test_user("taro@example.com");
    let users = MockUserStore::new(vec![user.clone()]);
    let tokens = MockTokenStore::empty();

    let issue = IssueResetTokenUseCase {
        users,
        tokens: tokens.share(),
        notifier: RecordingNotifier::new(),
    };
    let raw = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    let resolve = ResolveResetTokenUseCase { tokens };
    assert_eq!(resolve.execute(&raw).await.unwrap(), user.id);
}

#[tokio::test]
async fn should_not_resolve_expired_token() {
    let user = test_user("taro@example.com");
    let tokens = MockTokenStore::empty();
    let tokens_handle = tokens.tokens_handle();

    let issue = IssueResetTokenUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        tokens: tokens.share(),
        notifier: RecordingNotifier::new(),
    };
    let raw = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    // Simulate the clock passing the 24h deadline.
    tokens_handle.lock().unwrap()[0].expires_at = Utc::now() - Duration::seconds(1);

    let resolve = ResolveResetTokenUseCase {
        tokens: tokens.share(),
    };
    let result = resolve.execute(&raw).await;
    assert!(
        matches!(result, Err(TrackerServiceError::InvalidResetToken)),
        "expected InvalidResetToken, got {result:?}"
    );

    // Invalidate stays no-op-safe on the already-expired token.
    let invalidate = InvalidateResetTokenUseCase { tokens };
    invalidate.execute(&raw).await.unwrap();
}

#[tokio::test]
async fn should_not_resolve_token_after_invalidation() {
    let user = test_user("taro@example.com");
    let tokens = MockTokenStore::empty();

    let issue = IssueResetTokenUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        tokens: tokens.share(),
        notifier: RecordingNotifier::new(),
    };
    let raw = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    let invalidate = InvalidateResetTokenUseCase {
        tokens: tokens.share(),
    };
    invalidate.execute(&raw).await.unwrap();

    let resolve = ResolveResetTokenUseCase { tokens };
    assert!(matches!(
        resolve.execute(&raw).await,
        Err(TrackerServiceError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn should_never_resolve_unknown_token() {
    let resolve = ResolveResetTokenUseCase {
        tokens: MockTokenStore::empty(),
    };
    assert!(matches!(
        resolve.execute("NOSUCHTOKEN").await,
        Err(TrackerServiceError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn should_keep_prior_tokens_live_when_issuing_again() {
    let user = test_user("taro@example.com");
    let users = MockUserStore::new(vec![user.clone()]);
    let tokens = MockTokenStore::empty();

    let issue = IssueResetTokenUseCase {
        users: users.share(),
        tokens: tokens.share(),
        notifier: RecordingNotifier::new(),
    };
    let first = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();
    let second = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();
    assert_ne!(first, second);

    let resolve = ResolveResetTokenUseCase { tokens };
    assert_eq!(resolve.execute(&first).await.unwrap(), user.id);
    assert_eq!(resolve.execute(&second).await.unwrap(), user.id);
}

#[tokio::test]
async fn should_reject_weak_password_on_reset_completion() {
    let user = test_user("taro@example.com");
    let users = MockUserStore::new(vec![user.clone()]);
    let tokens = MockTokenStore::empty();

    let issue = IssueResetTokenUseCase {
        users: users.share(),
        tokens: tokens.share(),
        notifier: RecordingNotifier::new(),
    };
    let raw = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    let complete = CompletePasswordResetUseCase {
        users: users.share(),
        tokens: tokens.share(),
        credentials: FakeCredentialStore,
    };
    let result = complete
        .execute(CompletePasswordResetInput {
            token: raw.clone(),
            password: "short7!".into(),
        })
        .await;
    assert!(matches!(result, Err(TrackerServiceError::WeakPassword)));

    // The rejected attempt must not consume the token.
    let resolve = ResolveResetTokenUseCase { tokens };
    assert_eq!(resolve.execute(&raw).await.unwrap(), user.id);
}

#[tokio::test]
async fn should_reject_multibyte_password_below_char_minimum_on_reset() {
    let user = test_user("taro@example.com");
    let users = MockUserStore::new(vec![user.clone()]);
    let tokens = MockTokenStore::empty();

    let issue = IssueResetTokenUseCase {
        users: users.share(),
        tokens: tokens.share(),
        notifier: RecordingNotifier::new(),
    };
    let raw = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    let complete = CompletePasswordResetUseCase {
        users: users.share(),
        tokens: tokens.share(),
        credentials: FakeCredentialStore,
    };
    // 3 characters but 9 UTF-8 bytes; the minimum counts characters.
    let result = complete
        .execute(CompletePasswordResetInput {
            token: raw.clone(),
            password: "ぱすわ".into(),
        })
        .await;
    assert!(
        matches!(result, Err(TrackerServiceError::WeakPassword)),
        "expected WeakPassword, got {result:?}"
    );
}

#[tokio::test]
async fn should_activate_account_and_allow_login_after_reset() {
    let user = test_user("taro@example.com");
    let users = MockUserStore::new(vec![user.clone()]);
    let users_handle = users.users_handle();
    let tokens = MockTokenStore::empty();

    let issue = IssueResetTokenUseCase {
        users: users.share(),
        tokens: tokens.share(),
        notifier: RecordingNotifier::new(),
    };
    let raw = issue
        .execute(IssueResetTokenInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    let complete = CompletePasswordResetUseCase {
        users: users.share(),
        tokens: tokens.share(),
        credentials: Argon2CredentialStore::new(),
    };
    complete
        .execute(CompletePasswordResetInput {
            token: raw.clone(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();

    {
        let users = users_handle.lock().unwrap();
        assert!(users[0].is_active, "reset must activate the account");
        assert!(users[0].password_hash.is_some());
    }

    // The consumed token is gone.
    let resolve = ResolveResetTokenUseCase { tokens };
    assert!(matches!(
        resolve.execute(&raw).await,
        Err(TrackerServiceError::InvalidResetToken)
    ));

    // Login succeeds with the new password, fails with a near-miss.
    let login = LoginUseCase {
        repo: users.share(),
        credentials: Argon2CredentialStore::new(),
    };
    login
        .execute(LoginInput {
            email: user.email.clone(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();
    let result = login
        .execute(LoginInput {
            email: user.email,
            password: "correct horsex".into(),
        })
        .await;
    assert!(matches!(
        result,
        Err(TrackerServiceError::InvalidCredentials)
    ));
}
