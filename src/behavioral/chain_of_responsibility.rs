// Chain of Responsibility
//
// Intent: pass a request along a chain of handlers. Each handler either
// deals with it or passes it to the next one.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example: who eats what
// ============================================================================

pub trait Handler {
    fn next(&self) -> Option<&Rc<dyn Handler>>;

    /// Handles the request or passes it on. Default: pass it on.
    fn handle(&self, request: &str) -> Option<String> {
        self.next().and_then(|next| next.handle(request))
    }
}

macro_rules! animal_handler {
    ($name:ident, $animal:literal, $food:literal) => {
        pub struct $name {
            next: Option<Rc<dyn Handler>>,
        }

        impl $name {
            pub fn new(next: Option<Rc<dyn Handler>>) -> Self {
                Self { next }
            }
        }

        impl Handler for $name {
            fn next(&self) -> Option<&Rc<dyn Handler>> {
                self.next.as_ref()
            }

            fn handle(&self, request: &str) -> Option<String> {
                if request == $food {
                    Some(format!("{}: I'll eat the {}.", $animal, request))
                } else {
                    self.next().and_then(|next| next.handle(request))
                }
            }
        }
    };
}

animal_handler!(MonkeyHandler, "Monkey", "Banana");
animal_handler!(SquirrelHandler, "Squirrel", "Nut");
animal_handler!(DogHandler, "Dog", "MeatBall");

pub fn client_code(handler: &dyn Handler) -> Vec<String> {
    let mut lines = Vec::new();
    for food in ["Nut", "Banana", "Cup of coffee"] {
        lines.push(format!("Client: Who wants a {}?", food));
        match handler.handle(food) {
            Some(result) => lines.push(format!("   {}", result)),
            None => lines.push(format!("   {} was left untouched.", food)),
        }
    }
    lines
}

pub fn conceptual_demo() -> Transcript {
    let dog: Rc<dyn Handler> = Rc::new(DogHandler::new(None));
    let squirrel: Rc<dyn Handler> = Rc::new(SquirrelHandler::new(Some(dog)));
    let monkey = MonkeyHandler::new(Some(Rc::clone(&squirrel)));

    let mut out = Transcript::new();
    out.line("Chain: Monkey > Squirrel > Dog");
    out.lines(client_code(&monkey));
    out.blank();
    out.line("Subchain: Squirrel > Dog");
    out.lines(client_code(squirrel.as_ref()));
    out
}

// ============================================================================
// Real-world example: login middleware
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareError {
    #[error("request limit of {limit} per window exceeded")]
    Throttled { limit: usize },

    #[error("this email is not registered: {0}")]
    UnknownUser(String),

    #[error("wrong password")]
    WrongPassword,
}

pub trait Middleware {
    fn next(&self) -> Option<&dyn Middleware>;

    fn check(&self, email: &str, password: &str, server: &Server) -> Result<(), MiddlewareError>;

    fn check_next(&self, email: &str, password: &str, server: &Server) -> Result<(), MiddlewareError> {
        match self.next() {
            Some(next) => next.check(email, password, server),
            None => Ok(()),
        }
    }
}

/// Allows `limit` requests per window.
pub struct ThrottlingMiddleware {
    limit: usize,
    window: Duration,
    count: Cell<usize>,
    window_start: Cell<Instant>,
    next: Option<Box<dyn Middleware>>,
}

impl ThrottlingMiddleware {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            count: Cell::new(0),
            window_start: Cell::new(Instant::now()),
            next: None,
        }
    }

    pub fn link_with(mut self, next: impl Middleware + 'static) -> Self {
        self.next = Some(Box::new(next));
        self
    }
}

impl Middleware for ThrottlingMiddleware {
    fn next(&self) -> Option<&dyn Middleware> {
        self.next.as_deref()
    }

    fn check(&self, email: &str, password: &str, server: &Server) -> Result<(), MiddlewareError> {
        if self.window_start.get().elapsed() > self.window {
            self.count.set(0);
            self.window_start.set(Instant::now());
        }
        self.count.set(self.count.get() + 1);
        if self.count.get() > self.limit {
            return Err(MiddlewareError::Throttled { limit: self.limit });
        }
        self.check_next(email, password, server)
    }
}

#[derive(Default)]
pub struct UserExistsMiddleware {
    next: Option<Box<dyn Middleware>>,
}

impl UserExistsMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_with(mut self, next: impl Middleware + 'static) -> Self {
        self.next = Some(Box::new(next));
        self
    }
}

impl Middleware for UserExistsMiddleware {
    fn next(&self) -> Option<&dyn Middleware> {
        self.next.as_deref()
    }

    fn check(&self, email: &str, password: &str, server: &Server) -> Result<(), MiddlewareError> {
        if !server.has_email(email) {
            return Err(MiddlewareError::UnknownUser(email.to_string()));
        }
        if !server.is_valid_password(email, password) {
            return Err(MiddlewareError::WrongPassword);
        }
        self.check_next(email, password, server)
    }
}

#[derive(Default)]
pub struct RoleCheckMiddleware {
    next: Option<Box<dyn Middleware>>,
}

impl RoleCheckMiddleware {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Middleware for RoleCheckMiddleware {
    fn next(&self) -> Option<&dyn Middleware> {
        self.next.as_deref()
    }

    fn check(&self, email: &str, password: &str, server: &Server) -> Result<(), MiddlewareError> {
        if server.is_admin(email) {
            info!(email, "admin logged in");
        } else {
            debug!(email, "user logged in");
        }
        self.check_next(email, password, server)
    }
}

#[derive(Default)]
pub struct Server {
    users: HashMap<String, String>,
    admins: Vec<String>,
    middleware: Option<Box<dyn Middleware>>,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_middleware(&mut self, middleware: impl Middleware + 'static) {
        self.middleware = Some(Box::new(middleware));
    }

    pub fn register(&mut self, email: &str, password: &str) {
        self.users.insert(email.to_string(), password.to_string());
    }

    pub fn register_admin(&mut self, email: &str, password: &str) {
        self.register(email, password);
        self.admins.push(email.to_string());
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.users.contains_key(email)
    }

    pub fn is_valid_password(&self, email: &str, password: &str) -> bool {
        self.users.get(email).map_or(false, |p| p == password)
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.admins.iter().any(|a| a == email)
    }

    /// Runs the request through the middleware chain.
    pub fn log_in(&self, email: &str, password: &str) -> Result<String, MiddlewareError> {
        if let Some(middleware) = &self.middleware {
            middleware.check(email, password, self)?;
        }
        let greeting = if self.is_admin(email) {
            "Hello, admin!"
        } else {
            "Hello, user!"
        };
        Ok(format!("Authorization has been successful. {}", greeting))
    }
}

pub fn demo_server(limit: usize) -> Server {
    let mut server = Server::new();
    server.register_admin("admin@example.com", "admin_pass");
    server.register("user@example.com", "user_pass");
    server.set_middleware(
        ThrottlingMiddleware::new(limit, Duration::from_secs(60))
            .link_with(UserExistsMiddleware::new().link_with(RoleCheckMiddleware::new())),
    );
    server
}

pub fn real_world_demo() -> Transcript {
    let server = demo_server(4);
    let attempts = [
        ("user@example.com", "user_pass"),
        ("admin@example.com", "wrong"),
        ("nobody@example.com", "x"),
        ("admin@example.com", "admin_pass"),
        ("user@example.com", "user_pass"),
    ];

    let mut out = Transcript::new();
    for (email, password) in attempts {
        let result = match server.log_in(email, password) {
            Ok(message) => message,
            Err(err) => format!("Rejected: {}", err),
        };
        out.line(format!("{} -> {}", email, result));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_chain() {
        let dog: Rc<dyn Handler> = Rc::new(DogHandler::new(None));
        let squirrel: Rc<dyn Handler> = Rc::new(SquirrelHandler::new(Some(dog)));
        let monkey = MonkeyHandler::new(Some(squirrel));

        assert_eq!(monkey.handle("Nut").as_deref(), Some("Squirrel: I'll eat the Nut."));
        assert_eq!(monkey.handle("Banana").as_deref(), Some("Monkey: I'll eat the Banana."));
        assert_eq!(monkey.handle("MeatBall").as_deref(), Some("Dog: I'll eat the MeatBall."));
        assert_eq!(monkey.handle("Cup of coffee"), None);
    }

    #[test]
    fn test_subchain_skips_monkey() {
        let dog: Rc<dyn Handler> = Rc::new(DogHandler::new(None));
        let squirrel = SquirrelHandler::new(Some(dog));
        let lines = client_code(&squirrel);

        assert_eq!(lines[1], "   Squirrel: I'll eat the Nut.");
        assert_eq!(lines[3], "   Banana was left untouched.");
        assert_eq!(lines[5], "   Cup of coffee was left untouched.");
    }

    #[test]
    fn test_login_checks() {
        let server = demo_server(10);
        assert_eq!(
            server.log_in("user@example.com", "user_pass").unwrap(),
            "Authorization has been successful. Hello, user!"
        );
        assert!(server
            .log_in("admin@example.com", "admin_pass")
            .unwrap()
            .ends_with("Hello, admin!"));
        assert_eq!(
            server.log_in("ghost@example.com", "x").unwrap_err(),
            MiddlewareError::UnknownUser("ghost@example.com".to_string())
        );
        assert_eq!(
            server.log_in("user@example.com", "nope").unwrap_err(),
            MiddlewareError::WrongPassword
        );
    }

    #[test]
    fn test_throttling_stops_the_chain() {
        let server = demo_server(2);
        assert!(server.log_in("user@example.com", "user_pass").is_ok());
        assert!(server.log_in("user@example.com", "user_pass").is_ok());
        assert_eq!(
            server.log_in("user@example.com", "user_pass").unwrap_err(),
            MiddlewareError::Throttled { limit: 2 }
        );
    }

    #[test]
    fn test_server_without_middleware_accepts_anything() {
        let server = Server::new();
        assert!(server.log_in("anyone", "anything").is_ok());
    }
}
