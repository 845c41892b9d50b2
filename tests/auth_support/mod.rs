#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use graphpub::auth::{
    AuthError, Authorizer, NavigableSurface, SurfaceEvent, SurfaceProvider, Token, TokenStore,
};
use url::Url;

pub const REDIRECT: &str = "https://www.facebook.com/connect/login_success.html";

#[derive(Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<Token>>,
    saves: Mutex<usize>,
    fail_saves: bool,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, token: Token) {
        *self.token.lock().expect("store lock poisoned") = Some(token);
    }

    pub fn get(&self) -> Option<Token> {
        self.token.lock().expect("store lock poisoned").clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().expect("store lock poisoned")
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Option<Token> {
        self.get()
    }

    fn save(&self, token: &Token) -> Result<(), AuthError> {
        if self.fail_saves {
            return Err(AuthError::FileAccess("read-only store".to_string()));
        }
        *self.saves.lock().expect("store lock poisoned") += 1;
        *self.token.lock().expect("store lock poisoned") = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.token.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

/// What a scripted surface was asked to do.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub loaded: Vec<Url>,
    pub shows: usize,
    pub destroys: usize,
}

/// Surface replaying a fixed list of events, then reporting nothing.
pub struct ScriptedSurface {
    events: VecDeque<SurfaceEvent>,
    log: Arc<Mutex<SurfaceLog>>,
    fail_load: bool,
}

impl ScriptedSurface {
    pub fn new(events: Vec<SurfaceEvent>) -> (Self, Arc<Mutex<SurfaceLog>>) {
        let log = Arc::new(Mutex::new(SurfaceLog::default()));
        let surface = Self {
            events: events.into(),
            log: log.clone(),
            fail_load: false,
        };
        (surface, log)
    }

    pub fn failing_load() -> (Self, Arc<Mutex<SurfaceLog>>) {
        let (mut surface, log) = Self::new(Vec::new());
        surface.fail_load = true;
        (surface, log)
    }
}

#[async_trait]
impl NavigableSurface for ScriptedSurface {
    async fn load(&mut self, url: &Url) -> Result<(), AuthError> {
        if self.fail_load {
            return Err(AuthError::Surface("web view unavailable".to_string()));
        }
        self.log.lock().expect("log lock poisoned").loaded.push(url.clone());
        Ok(())
    }

    async fn show(&mut self) -> Result<(), AuthError> {
        self.log.lock().expect("log lock poisoned").shows += 1;
        Ok(())
    }

    async fn next_event(&mut self) -> Option<SurfaceEvent> {
        self.events.pop_front()
    }

    async fn destroy(&mut self) {
        self.log.lock().expect("log lock poisoned").destroys += 1;
    }
}

/// Hands out one scripted surface per `open` call.
pub struct ScriptedSurfaceProvider {
    scripts: Mutex<VecDeque<Vec<SurfaceEvent>>>,
    pub logs: Mutex<Vec<Arc<Mutex<SurfaceLog>>>>,
}

impl ScriptedSurfaceProvider {
    pub fn new(scripts: Vec<Vec<SurfaceEvent>>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            logs: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> usize {
        self.logs.lock().expect("logs lock poisoned").len()
    }
}

#[async_trait]
impl SurfaceProvider for ScriptedSurfaceProvider {
    async fn open(&self) -> Result<Box<dyn NavigableSurface>, AuthError> {
        let script = self
            .scripts
            .lock()
            .expect("scripts lock poisoned")
            .pop_front()
            .ok_or_else(|| AuthError::Surface("no more scripted surfaces".to_string()))?;
        let (surface, log) = ScriptedSurface::new(script);
        self.logs.lock().expect("logs lock poisoned").push(log);
        Ok(Box::new(surface))
    }
}

/// Authorizer returning queued results and counting calls.
pub struct CountingAuthorizer {
    results: Mutex<VecDeque<Result<Token, AuthError>>>,
    calls: Mutex<usize>,
}

impl CountingAuthorizer {
    pub fn with_tokens(tokens: &[&str]) -> Self {
        Self::with_results(tokens.iter().map(|t| Ok(Token::new(*t))).collect())
    }

    pub fn with_results(results: Vec<Result<Token, AuthError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock poisoned")
    }
}

#[async_trait]
impl Authorizer for CountingAuthorizer {
    async fn authorize(&self) -> Result<Token, AuthError> {
        *self.calls.lock().expect("calls lock poisoned") += 1;
        self.results
            .lock()
            .expect("results lock poisoned")
            .pop_front()
            .unwrap_or(Err(AuthError::UserCancelled))
    }
}

pub fn navigated(url: &str) -> SurfaceEvent {
    SurfaceEvent::Navigated(url.to_string())
}

pub fn redirect_with(fragment: &str) -> SurfaceEvent {
    navigated(&format!("{REDIRECT}#{fragment}"))
}
