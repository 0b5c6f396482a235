//! Unified exit codes for the QA pipeline.
//! These are part of the public contract: failing tests are a normal
//! outcome and still exit 0; only infrastructure failures are non-zero.

pub const SUCCESS: i32 = 0; // Pipeline finished (rich or fallback report)
pub const OUTPUT_WRITE_FAILED: i32 = 1; // Output directory cannot be created/written
pub const RUNNER_CRASHED: i32 = 2; // Test runner hard crash (not merely failing tests)
