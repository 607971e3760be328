use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services.
/// It is pulled into the application state via FromRef, embodying the "immutable AppConfig"
/// part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Connection string for the managed document database (MongoDB).
    pub db_url: String,
    // Name of the database holding the blogs/comments/wishlists collections.
    pub db_name: String,
    // The single browser origin allowed by CORS. Must be explicit (not a
    // wildcard) because the session cookie is sent cross-site with credentials.
    pub cors_origin: String,
    // Runtime environment marker. Controls feature activation (e.g., Dev Bypass).
    pub env: Env,
    // Secret key used to sign and validate the session JWT.
    pub jwt_secret: String,
    // TCP port the HTTP server binds to.
    pub port: u16,
}

/// Env
///
/// Defines the runtime context, used to switch between development utilities
/// (auth bypass, pretty logs) and hardened production behavior (JSON logs,
/// mandatory secrets).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        // Provide safe, non-panicking dummy values for test state setup
        Self {
            db_url: "mongodb://localhost:27017".to_string(),
            db_name: "blogDB".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
            env: Env::Local,
            jwt_secret: "super-secure-test-secret-value-local".to_string(),
            port: 5000,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime environment
    /// (especially Production) is not found. This prevents the application from starting
    /// with an incomplete or insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // JWT Secret Resolution
        // The production secret is mandatory and must be explicitly set.
        let jwt_secret = match env {
            Env::Production => env::var("JWT_SECRET")
                .expect("FATAL: JWT_SECRET must be set in production."),
            // In local, we provide a fallback, though the developer should ideally use a real secret.
            _ => env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        match env {
            Env::Local => Self {
                env: Env::Local,
                // DATABASE_URL must still be set, even locally (Dockerized Mongo or Atlas).
                db_url: env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in local"),
                db_name: env::var("DB_NAME").unwrap_or_else(|_| "blogDB".to_string()),
                // Local frontend dev server origin.
                cors_origin: env::var("CORS_ORIGIN")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string()),
                jwt_secret,
                port,
            },
            Env::Production => Self {
                env: Env::Production,
                // Production environment demands explicit setting of all infrastructure secrets.
                db_url: env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
                db_name: env::var("DB_NAME").unwrap_or_else(|_| "blogDB".to_string()),
                cors_origin: env::var("CORS_ORIGIN")
                    .expect("FATAL: CORS_ORIGIN required in prod"),
                jwt_secret,
                port,
            },
        }
    }
}
