// ============================================================================
// Test Public Keys
// ============================================================================

/// Recipient used by the transfer scenarios
pub const RECIPIENT_PUBKEY: &str = "AVmDft8deQEo78bRKcGN5ZMf3hyjeLBK4Rd4xGB46yQM";

// ============================================================================
// Ledger
// ============================================================================

pub const LAST_VALID_BLOCK_HEIGHT: u64 = 1_000;

pub const DEFAULT_BLOCK_HEIGHT: u64 = 10;

// ============================================================================
// Timing
// ============================================================================

pub const TEST_QUIESCENCE_MS: u64 = 100;

pub const TEST_BACKOFF_MS: u64 = 1_000;
