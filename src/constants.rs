pub mod auth {

    /// Signing secret used when none is configured. Refused in production.
    pub const DEFAULT_JWT_SECRET: &str = "lettuce-dev-secret-change-in-production";

    pub const TOKEN_COOKIE: &str = "token";

    pub const TOKEN_TTL_DAYS: i64 = 7;

    pub const DEFAULT_ROLE: &str = "user";

    pub const MIN_PASSWORD_LEN: usize = 6;

    /// Shared by the unknown-email and wrong-password branches of login.
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
}

pub mod about {

    /// The about content table holds a single row pinned to this slot.
    pub const SINGLETON_SLOT: i32 = 1;
}

pub mod env {

    pub const DATABASE_URL: &str = "DATABASE_URL";

    pub const RESTRICTED_KEY: &str = "STORE_RESTRICTED_KEY";

    pub const ELEVATED_KEY: &str = "STORE_ELEVATED_KEY";

    pub const JWT_SECRET: &str = "JWT_SECRET";

    pub const PUBLIC_APP_URL: &str = "PUBLIC_APP_URL";

    pub const APP_ENV: &str = "APP_ENV";

    pub const PORT: &str = "PORT";
}
