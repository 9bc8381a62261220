use shukatsu_server::error::TrackerServiceError;
use shukatsu_server::usecase::user::{
    ChangePasswordUseCase, DeleteUserUseCase, LoginInput, LoginUseCase, RegisterUserInput,
    RegisterUserUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

use crate::helpers::{FakeCredentialStore, MockUserStore, active_user, test_user};

#[tokio::test]
async fn should_reject_second_registration_with_same_email() {
    let users = MockUserStore::empty();
    let uc = RegisterUserUseCase {
        repo: users.share(),
    };

    uc.execute(RegisterUserInput {
        username: "taro".into(),
        email: "taro@example.com".into(),
    })
    .await
    .unwrap();

    let result = uc
        .execute(RegisterUserInput {
            username: "impostor".into(),
            email: "taro@example.com".into(),
        })
        .await;
    assert!(
        matches!(result, Err(TrackerServiceError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
    assert_eq!(users.users_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_allow_profile_edit_keeping_own_email() {
    let user = test_user("taro@example.com");
    let users = MockUserStore::new(vec![user.clone()]);
    let uc = UpdateProfileUseCase {
        repo: users.share(),
    };

    uc.execute(
        user.id,
        UpdateProfileInput {
            username: Some("taro-renamed".into()),
            email: Some("taro@example.com".into()),
        },
    )
    .await
    .unwrap();

    let stored = users.users_handle().lock().unwrap()[0].clone();
    assert_eq!(stored.username, "taro-renamed");
    assert_eq!(stored.email, "taro@example.com");
}

#[tokio::test]
async fn should_reject_profile_edit_taking_anothers_email() {
    let taro = test_user("taro@example.com");
    let hanako = test_user("hanako@example.com");
    let uc = UpdateProfileUseCase {
        repo: MockUserStore::new(vec![taro.clone(), hanako]),
    };

    let result = uc
        .execute(
            taro.id,
            UpdateProfileInput {
                username: None,
                email: Some("hanako@example.com".into()),
            },
        )
        .await;
    assert!(matches!(result, Err(TrackerServiceError::EmailTaken)));
}

#[tokio::test]
async fn should_change_password_when_long_enough() {
    let user = active_user("taro@example.com", "hashed:old-password");
    let users = MockUserStore::new(vec![user.clone()]);

    let uc = ChangePasswordUseCase {
        repo: users.share(),
        credentials: FakeCredentialStore,
    };
    uc.execute(user.id, "new-password").await.unwrap();

    let login = LoginUseCase {
        repo: users.share(),
        credentials: FakeCredentialStore,
    };
    login
        .execute(LoginInput {
            email: user.email.clone(),
            password: "new-password".into(),
        })
        .await
        .unwrap();
    assert!(matches!(
        login
            .execute(LoginInput {
                email: user.email,
                password: "old-password".into(),
            })
            .await,
        Err(TrackerServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_reject_seven_char_password_on_change() {
    let user = active_user("taro@example.com", "hashed:x");
    let uc = ChangePasswordUseCase {
        repo: MockUserStore::new(vec![user.clone()]),
        credentials: FakeCredentialStore,
    };
    let result = uc.execute(user.id, "1234567").await;
    assert!(matches!(result, Err(TrackerServiceError::WeakPassword)));
}

#[tokio::test]
async fn should_not_login_with_unknown_email() {
    let uc = LoginUseCase {
        repo: MockUserStore::empty(),
        credentials: FakeCredentialStore,
    };
    let result = uc
        .execute(LoginInput {
            email: "ghost@example.com".into(),
            password: "whatever!".into(),
        })
        .await;
    assert!(matches!(
        result,
        Err(TrackerServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_delete_user_and_report_missing_on_second_attempt() {
    let user = test_user("taro@example.com");
    let users = MockUserStore::new(vec![user.clone()]);
    let uc = DeleteUserUseCase {
        repo: users.share(),
    };

    uc.execute(user.id).await.unwrap();
    let result = uc.execute(user.id).await;
    assert!(matches!(result, Err(TrackerServiceError::UserNotFound)));
}
