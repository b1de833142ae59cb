use std::sync::Arc;

use tracing::{info_span, Instrument};

use cb_core::auth::validate_sign_up;
use cb_core::ports::CredentialProviderPort;
use cb_core::{AppPhase, Credentials, SignupMethod};

use super::{authenticate_with, AuthFlowError};
use crate::usecases::PhaseController;

/// Create a new account, by email or through a social provider.
pub struct SignUp {
    provider: Arc<dyn CredentialProviderPort>,
    controller: Arc<PhaseController>,
}

impl SignUp {
    pub fn new(provider: Arc<dyn CredentialProviderPort>, controller: Arc<PhaseController>) -> Self {
        Self {
            provider,
            controller,
        }
    }

    pub async fn with_email(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<AppPhase, AuthFlowError> {
        validate_sign_up(email, password, confirm_password)?;
        let credentials = Credentials::Registration {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        authenticate_with(self.provider.as_ref(), &self.controller, credentials)
            .instrument(info_span!("usecase.sign_up.with_email"))
            .await
    }

    pub async fn with_provider(&self, provider: SignupMethod) -> Result<AppPhase, AuthFlowError> {
        authenticate_with(
            self.provider.as_ref(),
            &self.controller,
            Credentials::Social { provider },
        )
        .instrument(info_span!("usecase.sign_up.with_provider", provider = provider.as_str()))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use cb_core::persisted::{ONBOARDED_KEY, ONBOARDED_VALUE, USER_PROFILE_KEY};
    use cb_core::ports::{KeyValueStorePort, PhaseEventPort, StoreError};
    use cb_core::{AuthError, AuthGrant, AuthToken, CredentialsError, Profile};

    mockall::mock! {
        pub Provider {}

        #[async_trait]
        impl CredentialProviderPort for Provider {
            async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError>;
        }
    }

    #[derive(Default)]
    struct MemoryStore(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl KeyValueStorePort for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    struct NoEvents;

    #[async_trait]
    impl PhaseEventPort for NoEvents {
        async fn emit_phase_changed(&self, _from: AppPhase, _to: AppPhase) {}
    }

    async fn controller_at_sign_up(store: Arc<MemoryStore>) -> Arc<PhaseController> {
        store.set(ONBOARDED_KEY, ONBOARDED_VALUE).await.unwrap();
        let controller = Arc::new(PhaseController::new(store, Arc::new(NoEvents)));
        controller.resolve_startup_phase().await;
        controller.navigate_to_signup().await.unwrap();
        controller
    }

    #[tokio::test]
    async fn mismatched_passwords_never_reach_provider() {
        let mut provider = MockProvider::new();
        provider.expect_authenticate().never();
        let controller = controller_at_sign_up(Arc::new(MemoryStore::default())).await;
        let use_case = SignUp::new(Arc::new(provider), controller);

        let err = use_case
            .with_email("a@b.com", "secret1", "secret2")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AuthFlowError::InvalidCredentials(CredentialsError::PasswordMismatch)
        ));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let mut provider = MockProvider::new();
        provider.expect_authenticate().never();
        let controller = controller_at_sign_up(Arc::new(MemoryStore::default())).await;
        let use_case = SignUp::new(Arc::new(provider), controller);

        let err = use_case.with_email("a@b.com", "abc", "abc").await.unwrap_err();

        assert!(matches!(
            err,
            AuthFlowError::InvalidCredentials(CredentialsError::PasswordTooShort { min_len: 6 })
        ));
    }

    #[tokio::test]
    async fn email_sign_up_stores_granted_profile() {
        let mut provider = MockProvider::new();
        provider
            .expect_authenticate()
            .withf(|creds| matches!(creds, Credentials::Registration { .. }))
            .times(1)
            .returning(|_| {
                Ok(AuthGrant {
                    token: AuthToken::new("signup_token_1").unwrap(),
                    profile: Some(Profile {
                        email: Some("a@b.com".into()),
                        signup_method: Some(SignupMethod::Email),
                        ..Default::default()
                    }),
                })
            });
        let store = Arc::new(MemoryStore::default());
        let controller = controller_at_sign_up(store.clone()).await;
        let use_case = SignUp::new(Arc::new(provider), controller.clone());

        let phase = use_case
            .with_email("a@b.com", "secret1", "secret1")
            .await
            .unwrap();

        assert_eq!(phase, AppPhase::Home);
        let stored = store.0.lock().unwrap().get(USER_PROFILE_KEY).cloned().unwrap();
        assert_eq!(
            Profile::parse(&stored).unwrap().signup_method,
            Some(SignupMethod::Email)
        );
    }

    #[tokio::test]
    async fn social_provider_failure_is_surfaced() {
        let mut provider = MockProvider::new();
        provider
            .expect_authenticate()
            .withf(|creds| {
                *creds
                    == Credentials::Social {
                        provider: SignupMethod::Google,
                    }
            })
            .returning(|_| Err(AuthError::Unavailable("offline".into())));
        let controller = controller_at_sign_up(Arc::new(MemoryStore::default())).await;
        let use_case = SignUp::new(Arc::new(provider), controller.clone());

        let err = use_case.with_provider(SignupMethod::Google).await.unwrap_err();

        assert!(matches!(err, AuthFlowError::Provider(AuthError::Unavailable(_))));
        assert!(controller.phase().await.is_auth());
    }
}
