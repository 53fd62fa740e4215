//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// SESSION LIFETIME
// =============================================================================

/// Sessions untouched for this long are evicted
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 3600;

/// How often the store is swept for idle sessions
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

// =============================================================================
// SIMULATION DEFAULTS
// =============================================================================

/// Default latency of the simulated code generator
pub const DEFAULT_GENERATION_DELAY_MS: u64 = 2000;

/// Default latency of the simulated test executor
pub const DEFAULT_TEST_RUN_DELAY_MS: u64 = 3000;

/// Ranges the submission sampler draws from (lower inclusive, upper exclusive)
pub mod submission_ranges {
    pub const EXECUTION_TIME_MS_MIN: u32 = 10;
    pub const EXECUTION_TIME_MS_MAX: u32 = 60;

    pub const MEMORY_USAGE_MB_MIN: f64 = 12.0;
    pub const MEMORY_USAGE_MB_MAX: f64 = 17.0;

    pub const BETTER_THAN_MIN: u32 = 60;
    pub const BETTER_THAN_MAX: u32 = 100;
}

/// Rank labels attached to a sampled submission
pub mod ranks {
    pub const TOP_25: &str = "Top 25%";
    pub const TOP_50: &str = "Top 50%";
}

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Auth backend identifiers
pub mod auth_providers {
    pub const LOCAL: &str = "local";
    pub const REMOTE: &str = "remote";
}

/// Default redirect target embedded in sign-up confirmation emails
pub const DEFAULT_AUTH_REDIRECT_URL: &str = "http://localhost:8080/";

/// Where the client is sent once a session exists
pub const HOME_PATH: &str = "/";

/// Default JWT token expiry in hours (local provider)
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Capacity of the session-change broadcast channel
pub const AUTH_EVENT_CHANNEL_CAPACITY: usize = 16;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum prompt length in characters
pub const MAX_PROMPT_LENGTH: u64 = 4000;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// PRESENTATION
// =============================================================================

/// Placeholder shown in the code panel while no code exists
pub const CODE_PLACEHOLDER: &str = "// Generated code will appear here...";

/// Placeholder shown in the prompt box
pub const PROMPT_PLACEHOLDER: &str =
    "Describe how to solve this problem using natural language...";

/// Language label of the reference solutions
pub const SOLUTION_LANGUAGE: &str = "JavaScript";

/// Prompts offered as one-click suggestions
pub const EXAMPLE_PROMPTS: &[&str] = &[
    "Use a hash map to track elements and their indices",
    "Implement a two-pointer approach from both ends",
    "Use binary search to find the target efficiently",
];

/// Keywords highlighted by the code panel
pub const HIGHLIGHT_KEYWORDS: &[&str] = &[
    "function",
    "const",
    "let",
    "var",
    "if",
    "else",
    "for",
    "while",
    "return",
    "true",
    "false",
    "null",
    "undefined",
];

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
