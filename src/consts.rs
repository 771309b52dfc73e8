pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! All tunables of the dashboard client, grouped by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of diagnostic events kept for the diagnostics overlay.
    pub const MAX_DIAGNOSTICS: usize = 100;

    /// Buffer size of the channel carrying fetch results back to the UI loop.
    pub const UPDATE_QUEUE_SIZE: usize = 100;

    /// The maximum number of toasts shown at once in the footer.
    pub const MAX_TOASTS: usize = 3;

    // =============================================================================
    // BACKEND CONFIGURATION
    // =============================================================================

    /// Backend connection defaults
    pub mod backend {
        use std::time::Duration;

        /// Address the monitor backend listens on out of the box.
        pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8081";

        /// Basic auth user the backend ships with.
        pub const DEFAULT_USERNAME: &str = "admin";

        /// Basic auth password the backend ships with.
        pub const DEFAULT_PASSWORD: &str = "admin123";

        /// Connect and request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    /// Periodic refresh configuration
    pub mod refresh {
        use std::time::Duration;

        /// Interval between automatic refresh cycles (seconds)
        pub const INTERVAL_SECS: u64 = 10;

        /// Window of the token usage chart (days)
        pub const TOKEN_USAGE_DAYS: u32 = 7;

        /// Day ranges offered by the logs tab selector
        pub const LOG_DAY_CHOICES: [u32; 4] = [1, 3, 7, 30];

        /// Default day range of the logs tab
        pub const DEFAULT_LOG_DAYS: u32 = 7;

        pub const fn interval() -> Duration {
            Duration::from_secs(INTERVAL_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// Timing of transient UI elements
    pub mod ui {
        use std::time::Duration;

        /// How long a toast stays visible (milliseconds)
        pub const TOAST_TTL_MS: u64 = 3000;

        /// How long the splash screen is shown before the dashboard (seconds)
        pub const SPLASH_SECS: u64 = 2;

        /// Keyboard poll timeout of the UI loop (milliseconds)
        pub const POLL_MS: u64 = 100;

        pub const fn toast_ttl() -> Duration {
            Duration::from_millis(TOAST_TTL_MS)
        }

        pub const fn splash() -> Duration {
            Duration::from_secs(SPLASH_SECS)
        }

        pub const fn poll() -> Duration {
            Duration::from_millis(POLL_MS)
        }
    }

    // =============================================================================
    // PRICING CONFIGURATION
    // =============================================================================

    /// Cost preview heuristics
    pub mod pricing {
        /// Share of a token total assumed to be input tokens.
        /// The remainder is treated as output tokens.
        pub const INPUT_SHARE: f64 = 0.6;

        /// Key of the pricing entry used for the cost preview.
        pub const DEFAULT_MODEL_KEY: &str = "default";

        /// Fallback default pricing when the backend has none (USD per 1k tokens).
        pub const FALLBACK_INPUT_PER_1K: f64 = 0.003;
        pub const FALLBACK_OUTPUT_PER_1K: f64 = 0.015;

        /// Fallback USD to CNY rate.
        pub const FALLBACK_USD_TO_CNY: f64 = 7.25;
    }
}
