//! Estado compartido de la sesión
//!
//! Token y usuario actuales. Lo comparten el cliente HTTP (que lee el token
//! y expira la sesión ante un 401) y el `AuthStore`. Los cambios de usuario se
//! publican por un canal `watch`.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::user::User;
use crate::session::credentials::{CredentialStore, StoredCredentials};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn CredentialStore>,
    token: RwLock<Option<String>>,
    user: watch::Sender<Option<User>>,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (user, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner {
                store,
                token: RwLock::new(None),
                user,
            }),
        }
    }

    /// Carga token y usuario desde el almacenamiento
    pub fn restore(&self) -> AppResult<Option<StoredCredentials>> {
        let stored = self.inner.store.load()?;
        match &stored {
            Some(credentials) => {
                self.set_token(Some(credentials.token.clone()));
                self.publish(credentials.user.clone());
            }
            None => {
                self.set_token(None);
                self.publish(None);
            }
        }
        Ok(stored)
    }

    pub fn token(&self) -> Option<String> {
        match self.inner.token.read() {
            Ok(token) => token.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.inner.user.subscribe()
    }

    /// Inicio de sesión: persiste y publica token + usuario
    pub fn establish(&self, token: String, user: User) -> AppResult<()> {
        self.inner.store.save(&StoredCredentials {
            token: token.clone(),
            user: Some(user.clone()),
        })?;
        self.set_token(Some(token));
        info!("🔑 Sesión iniciada para {} ({})", user.email, user.role.as_str());
        self.publish(Some(user));
        Ok(())
    }

    /// Actualiza el usuario conservando el token actual
    pub fn update_user(&self, user: User) -> AppResult<()> {
        if let Some(token) = self.token() {
            self.inner.store.save(&StoredCredentials {
                token,
                user: Some(user.clone()),
            })?;
        }
        self.publish(Some(user));
        Ok(())
    }

    /// Borra credenciales y usuario. No falla: un error de almacenamiento solo se registra
    pub fn expire(&self) {
        if let Err(e) = self.inner.store.clear() {
            warn!("⚠️ No se pudieron borrar las credenciales: {}", e);
        }
        self.set_token(None);
        self.publish(None);
    }

    fn set_token(&self, token: Option<String>) {
        match self.inner.token.write() {
            Ok(mut slot) => *slot = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    fn publish(&self, user: Option<User>) {
        self.inner.user.send_if_modified(|current| {
            if *current == user {
                return false;
            }
            *current = user;
            true
        });
    }
}
